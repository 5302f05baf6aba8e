//! Coordinate conversions for the chart's value axis.
//!
//! Two spaces are involved:
//!
//! - **Screen coordinates** ([`ScreenPos`]): pixels from the top-left of the chart area
//! - **Value coordinates**: prices along the vertical axis
//!
//! [`ValueAxis`] owns the visible price window (zoom/pan state) and is the only
//! place pixel <-> price conversion happens.
//!
//! # Example
//!
//! ```
//! use lprange::coords::ValueAxis;
//!
//! let mut axis = ValueAxis::new(400.0);
//! axis.fit(100.0, 200.0, 0.0);
//! assert_eq!(axis.value_to_pixel(200.0), 0.0);
//! assert_eq!(axis.pixel_to_value(400.0), 100.0);
//! ```

/// Screen coordinates in pixels from the top-left corner of the chart area.
///
/// X increases to the right, Y increases downward.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ScreenPos {
    pub x: f64,
    pub y: f64,
}

impl ScreenPos {
    /// Create a new screen position.
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

impl From<(f64, f64)> for ScreenPos {
    fn from(pos: (f64, f64)) -> Self {
        Self::new(pos.0, pos.1)
    }
}

/// Smallest visible span, to keep conversions well defined.
const MIN_SPAN: f64 = 1e-12;

/// Vertical value axis with a zoomable, pannable visible window.
///
/// The top pixel row shows `max`, the bottom row shows `min`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ValueAxis {
    /// Chart area height in pixels.
    height_px: f64,
    /// Window restored by [`ValueAxis::reset_view`].
    home: (f64, f64),
    /// Currently visible window.
    visible: (f64, f64),
}

impl ValueAxis {
    /// Create an axis of the given pixel height showing `[0, 1]`.
    #[must_use]
    pub fn new(height_px: f64) -> Self {
        Self {
            height_px: height_px.max(1.0),
            home: (0.0, 1.0),
            visible: (0.0, 1.0),
        }
    }

    #[inline]
    pub fn height_px(&self) -> f64 {
        self.height_px
    }

    /// Visible `(min, max)` values.
    #[inline]
    pub fn visible(&self) -> (f64, f64) {
        self.visible
    }

    /// Home `(min, max)` values.
    #[inline]
    pub fn home(&self) -> (f64, f64) {
        self.home
    }

    #[inline]
    fn span(&self) -> f64 {
        self.visible.1 - self.visible.0
    }

    /// Update the pixel height, e.g. after a window resize.
    pub fn resize(&mut self, height_px: f64) {
        self.height_px = height_px.max(1.0);
    }

    /// Fit the home window to `[min, max]` plus `padding` (fraction of the span)
    /// on each side, and show it.
    pub fn fit(&mut self, min: f64, max: f64, padding: f64) {
        self.set_home(min, max, padding);
        self.reset_view();
    }

    /// Fit the home window like [`ValueAxis::fit`] without changing what is shown.
    ///
    /// A degenerate span is widened by 1% of the value so a single price still
    /// produces a usable axis.
    pub fn set_home(&mut self, min: f64, max: f64, padding: f64) {
        if !min.is_finite() || !max.is_finite() {
            return;
        }
        let (lo, hi) = if min <= max { (min, max) } else { (max, min) };
        let span = hi - lo;
        let pad = if span > MIN_SPAN {
            span * padding.max(0.0)
        } else {
            (lo.abs() * 0.01).max(1.0)
        };
        self.home = (lo - pad, hi + pad);
    }

    /// Clear zoom and pan.
    pub fn reset_view(&mut self) {
        self.visible = self.home;
    }

    /// Check if the visible window differs from home.
    pub fn is_zoomed(&self) -> bool {
        self.visible != self.home
    }

    // =========================================================================
    // Conversions
    // =========================================================================

    /// Pixel row (from the top) at which `value` renders.
    #[must_use]
    pub fn value_to_pixel(&self, value: f64) -> f64 {
        (self.visible.1 - value) / self.span() * self.height_px
    }

    /// Value under pixel row `y` (from the top).
    #[must_use]
    pub fn pixel_to_value(&self, y: f64) -> f64 {
        self.visible.1 - y / self.height_px * self.span()
    }

    /// Clamp a value into the visible window.
    #[must_use]
    pub fn clamp_to_visible(&self, value: f64) -> f64 {
        value.max(self.visible.0).min(self.visible.1)
    }

    // =========================================================================
    // Zoom and pan
    // =========================================================================

    /// Zoom by `factor` (> 1 zooms in) keeping the value under `anchor_y` fixed.
    pub fn zoom(&mut self, factor: f64, anchor_y: f64) {
        if !factor.is_finite() || factor <= 0.0 {
            return;
        }
        let anchor = self.pixel_to_value(anchor_y);
        let (min, max) = self.visible;
        let new_min = anchor - (anchor - min) / factor;
        let new_max = anchor + (max - anchor) / factor;
        if new_max - new_min > MIN_SPAN {
            self.visible = (new_min, new_max);
        }
    }

    /// Pan by a pointer drag of `dy` pixels (positive = dragged downward).
    pub fn pan(&mut self, dy: f64) {
        if !dy.is_finite() {
            return;
        }
        let delta = dy / self.height_px * self.span();
        self.visible = (self.visible.0 + delta, self.visible.1 + delta);
    }
}

impl Default for ValueAxis {
    fn default() -> Self {
        Self::new(1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn axis_100_200() -> ValueAxis {
        let mut axis = ValueAxis::new(400.0);
        axis.fit(100.0, 200.0, 0.0);
        axis
    }

    #[test]
    fn test_pixel_round_trip_endpoints() {
        let axis = axis_100_200();
        assert_eq!(axis.value_to_pixel(200.0), 0.0);
        assert_eq!(axis.value_to_pixel(100.0), 400.0);
        assert_eq!(axis.pixel_to_value(200.0), 150.0);
    }

    #[test]
    fn test_fit_adds_padding() {
        let mut axis = ValueAxis::new(100.0);
        axis.fit(100.0, 200.0, 0.1);
        assert_eq!(axis.home(), (90.0, 210.0));
        assert_eq!(axis.visible(), (90.0, 210.0));
    }

    #[test]
    fn test_fit_degenerate_span() {
        let mut axis = ValueAxis::new(100.0);
        axis.fit(500.0, 500.0, 0.1);
        assert_eq!(axis.visible(), (495.0, 505.0));
    }

    #[test]
    fn test_clamp_to_visible() {
        let axis = axis_100_200();
        assert_eq!(axis.clamp_to_visible(50.0), 100.0);
        assert_eq!(axis.clamp_to_visible(250.0), 200.0);
        assert_eq!(axis.clamp_to_visible(150.0), 150.0);
    }

    #[test]
    fn test_zoom_keeps_anchor_fixed() {
        let mut axis = axis_100_200();
        // Anchor at the middle row (value 150)
        axis.zoom(2.0, 200.0);
        assert_eq!(axis.visible(), (125.0, 175.0));
        assert!(axis.is_zoomed());
    }

    #[test]
    fn test_pan_and_reset() {
        let mut axis = axis_100_200();
        axis.pan(40.0);
        assert_eq!(axis.visible(), (110.0, 210.0));
        axis.reset_view();
        assert_eq!(axis.visible(), (100.0, 200.0));
        assert!(!axis.is_zoomed());
    }

    #[test]
    fn test_invalid_zoom_ignored() {
        let mut axis = axis_100_200();
        axis.zoom(0.0, 10.0);
        axis.zoom(f64::NAN, 10.0);
        assert!(!axis.is_zoomed());
    }

    #[test]
    fn test_set_home_keeps_visible_window() {
        let mut axis = axis_100_200();
        axis.pan(40.0);
        axis.set_home(0.0, 400.0, 0.0);
        assert_eq!(axis.home(), (0.0, 400.0));
        assert_eq!(axis.visible(), (110.0, 210.0));
        axis.reset_view();
        assert_eq!(axis.visible(), (0.0, 400.0));
    }
}
