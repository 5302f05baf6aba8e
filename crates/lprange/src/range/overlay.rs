//! Render data for the range overlay drawn on top of the price chart.

use lprange_core::{ticks_in_range, Bound, LiquidityTick};

use super::controller::{DragState, RangeController, DRAW_ORDER};
use crate::coords::ValueAxis;

/// One bound handle, positioned on the value axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundHandle {
    pub bound: Bound,
    pub value: f64,
    /// Pixel row from the top of the chart area.
    pub pixel_y: f64,
    /// Whether the handle falls inside the visible window.
    pub visible: bool,
    /// Whether this handle is being dragged.
    pub active: bool,
}

/// Data needed to draw the selected range.
#[derive(Debug, Clone, PartialEq)]
pub struct RangeOverlay {
    /// Handles in draw order (topmost last).
    pub handles: Vec<BoundHandle>,
    /// Shaded band between the handles, clipped to the chart area, as `(top, bottom)` pixels.
    pub band: (f64, f64),
    /// Liquidity bars overlapping the range, to be highlighted.
    pub ticks: Vec<TickBar>,
}

/// A liquidity tick inside the selected range, positioned on the value axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TickBar {
    pub tick: LiquidityTick,
    /// `(top, bottom)` pixel rows, clipped to the chart area.
    pub span_px: (f64, f64),
}

/// Convert the controller state and the tick snapshot to overlay render data.
///
/// Returns `None` before the bounds exist.
pub fn prepare_overlay(
    controller: &RangeController,
    axis: &ValueAxis,
    ticks: &[LiquidityTick],
) -> Option<RangeOverlay> {
    let bounds = controller.bounds()?;
    let (min, max) = axis.visible();

    let handles = DRAW_ORDER
        .iter()
        .map(|&bound| {
            let value = bounds.get(bound);
            BoundHandle {
                bound,
                value,
                pixel_y: axis.value_to_pixel(value),
                visible: value >= min && value <= max,
                active: controller.drag_state() == DragState::Dragging(bound),
            }
        })
        .collect();

    let clip = |y: f64| y.max(0.0).min(axis.height_px());
    let band = (
        clip(axis.value_to_pixel(bounds.upper())),
        clip(axis.value_to_pixel(bounds.lower())),
    );

    let ticks = ticks_in_range(ticks, &bounds)
        .map(|tick| {
            let (low, high) = tick.interval();
            TickBar {
                tick: *tick,
                span_px: (clip(axis.value_to_pixel(high)), clip(axis.value_to_pixel(low))),
            }
        })
        .collect();

    Some(RangeOverlay { handles, band, ticks })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn axis() -> ValueAxis {
        let mut axis = ValueAxis::new(400.0);
        axis.fit(100.0, 200.0, 0.0);
        axis
    }

    #[test]
    fn test_no_overlay_before_seed() {
        assert!(prepare_overlay(&RangeController::default(), &axis(), &[]).is_none());
    }

    #[test]
    fn test_overlay_positions_and_active_handle() {
        let mut controller = RangeController::default();
        controller.seed(150.0);
        controller.set_bounds(Some(125.0), Some(175.0));
        controller.handle_press(100.0, &axis());

        let overlay = prepare_overlay(&controller, &axis(), &[]).unwrap();
        assert_eq!(overlay.handles.len(), 2);
        assert_eq!(overlay.handles[0].bound, Bound::Lower);
        assert_eq!(overlay.handles[0].pixel_y, 300.0);
        assert!(!overlay.handles[0].active);
        assert_eq!(overlay.handles[1].bound, Bound::Upper);
        assert!(overlay.handles[1].active);
        assert_eq!(overlay.band, (100.0, 300.0));
    }

    #[test]
    fn test_band_clipped_when_bound_offscreen() {
        let mut controller = RangeController::default();
        controller.seed(150.0);
        controller.set_bounds(Some(50.0), Some(175.0));

        let overlay = prepare_overlay(&controller, &axis(), &[]).unwrap();
        assert!(!overlay.handles[0].visible);
        assert_eq!(overlay.band, (100.0, 400.0));
    }

    #[test]
    fn test_in_range_ticks_highlighted() {
        let mut controller = RangeController::default();
        controller.seed(150.0);
        controller.set_bounds(Some(125.0), Some(175.0));
        let ticks = [
            LiquidityTick::new(110.0, 130.0, 5.0),
            LiquidityTick::new(180.0, 190.0, 7.0),
            LiquidityTick::new(175.0, 250.0, 9.0),
        ];

        let overlay = prepare_overlay(&controller, &axis(), &ticks).unwrap();
        assert_eq!(overlay.ticks.len(), 2);
        assert_eq!(overlay.ticks[0].tick.usd_value, 5.0);
        assert_eq!(overlay.ticks[0].span_px, (280.0, 360.0));
        // Clipped at the top of the chart
        assert_eq!(overlay.ticks[1].span_px, (0.0, 100.0));
    }
}
