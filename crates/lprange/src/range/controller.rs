//! Range bounds state machine.

use std::fmt;

use lprange_config::RangeConfig;
use lprange_core::{Bound, RangeBounds, MIN_PRICE};

use crate::coords::ValueAxis;
use crate::events::PointerEvent;

/// Order in which bound handles are drawn. Later entries render on top and win
/// hit-test ties.
pub const DRAW_ORDER: [Bound; 2] = [Bound::Lower, Bound::Upper];

/// Current drag interaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DragState {
    #[default]
    Idle,
    /// A bound handle is being dragged.
    Dragging(Bound),
}

/// Handle returned by [`RangeController::on_bounds_changed`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

type Listener = Box<dyn FnMut(&RangeBounds)>;

/// Owner of the live range bounds.
///
/// Bounds are absent until seeded from the first price data. From then on every
/// mutation goes through this type, which keeps `lower <= upper` and notifies
/// listeners synchronously whenever the value changes.
pub struct RangeController {
    bounds: Option<RangeBounds>,
    drag: DragState,
    seeded: bool,
    hit_tolerance_px: f64,
    lower_factor: f64,
    upper_factor: f64,
    listeners: Vec<(ListenerId, Listener)>,
    next_listener: u64,
}

impl fmt::Debug for RangeController {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RangeController")
            .field("bounds", &self.bounds)
            .field("drag", &self.drag)
            .field("seeded", &self.seeded)
            .field("hit_tolerance_px", &self.hit_tolerance_px)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

impl Default for RangeController {
    fn default() -> Self {
        Self::new(&RangeConfig::default())
    }
}

impl RangeController {
    pub fn new(config: &RangeConfig) -> Self {
        Self {
            bounds: None,
            drag: DragState::Idle,
            seeded: false,
            hit_tolerance_px: config.hit_tolerance_px,
            lower_factor: config.seed_lower_factor,
            upper_factor: config.seed_upper_factor,
            listeners: Vec::new(),
            next_listener: 0,
        }
    }

    /// Snapshot of the current bounds.
    pub fn bounds(&self) -> Option<RangeBounds> {
        self.bounds
    }

    pub fn drag_state(&self) -> DragState {
        self.drag
    }

    /// Check if a bound is being dragged.
    pub fn is_dragging(&self) -> bool {
        matches!(self.drag, DragState::Dragging(_))
    }

    /// Whether the bounds have been seeded (or reset) from a price.
    pub fn is_seeded(&self) -> bool {
        self.seeded
    }

    // =========================================================================
    // Observers
    // =========================================================================

    /// Register a listener called with the new bounds after every change.
    pub fn on_bounds_changed<F>(&mut self, listener: F) -> ListenerId
    where
        F: FnMut(&RangeBounds) + 'static,
    {
        let id = ListenerId(self.next_listener);
        self.next_listener += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Remove a listener. Returns `false` if it was not registered.
    pub fn remove_listener(&mut self, id: ListenerId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(lid, _)| *lid != id);
        self.listeners.len() != before
    }

    fn publish(&mut self) {
        if let Some(bounds) = self.bounds {
            for (_, listener) in &mut self.listeners {
                listener(&bounds);
            }
        }
    }

    /// Replace the bounds outright, publishing if the value changed.
    fn replace(&mut self, next: RangeBounds) -> bool {
        if self.bounds == Some(next) {
            return false;
        }
        self.bounds = Some(next);
        self.publish();
        true
    }

    // =========================================================================
    // Seeding and reset
    // =========================================================================

    /// Seed the bounds around `latest_price`, once per session.
    ///
    /// Later calls are ignored so refreshed price data never moves bounds the
    /// user has already adjusted. Returns `true` if the bounds were seeded.
    pub fn seed(&mut self, latest_price: f64) -> bool {
        if self.seeded || !is_valid_price(latest_price) {
            return false;
        }
        self.seeded = true;
        log::info!("Seeding range bounds around {}", latest_price);
        self.replace(RangeBounds::around(latest_price, self.lower_factor, self.upper_factor));
        true
    }

    /// Reset both bounds around `current_price` and end any drag.
    ///
    /// Does nothing for a missing or invalid price. Returns `true` if applied.
    pub fn reset(&mut self, current_price: Option<f64>) -> bool {
        let Some(price) = current_price.filter(|p| is_valid_price(*p)) else {
            return false;
        };
        self.drag = DragState::Idle;
        self.seeded = true;
        self.replace(RangeBounds::around(price, self.lower_factor, self.upper_factor));
        true
    }

    // =========================================================================
    // Direct numeric input
    // =========================================================================

    /// Set one bound from a typed value, clamped against the other bound.
    ///
    /// Values at or below zero are raised to [`MIN_PRICE`]. Returns `true` if
    /// the bounds changed.
    pub fn set_bound(&mut self, bound: Bound, value: f64) -> bool {
        if !value.is_finite() {
            return false;
        }
        let Some(bounds) = self.bounds.as_mut() else {
            return false;
        };
        if !bounds.set_clamped(bound, value.max(MIN_PRICE)) {
            return false;
        }
        self.publish();
        true
    }

    /// Set either or both bounds from typed values.
    ///
    /// With both values present the pair replaces the bounds (swapped if
    /// reversed); with one present it is clamped against the other current bound.
    /// Non-finite values are ignored.
    pub fn set_bounds(&mut self, lower: Option<f64>, upper: Option<f64>) -> bool {
        let lower = lower.filter(|v| v.is_finite());
        let upper = upper.filter(|v| v.is_finite());
        if self.bounds.is_none() {
            return false;
        }
        match (lower, upper) {
            (Some(lo), Some(hi)) => {
                self.replace(RangeBounds::new(lo.max(MIN_PRICE), hi.max(MIN_PRICE)))
            }
            (Some(lo), None) => self.set_bound(Bound::Lower, lo),
            (None, Some(hi)) => self.set_bound(Bound::Upper, hi),
            (None, None) => false,
        }
    }

    // =========================================================================
    // Pointer gestures
    // =========================================================================

    /// Find the bound whose handle renders within tolerance of pixel row `y`.
    ///
    /// Handles are checked topmost first, so the last in [`DRAW_ORDER`] wins ties.
    pub fn hit_test(&self, y: f64, axis: &ValueAxis) -> Option<Bound> {
        let bounds = self.bounds?;
        DRAW_ORDER
            .iter()
            .rev()
            .copied()
            .find(|b| (axis.value_to_pixel(bounds.get(*b)) - y).abs() <= self.hit_tolerance_px)
    }

    /// Handle pointer press. Returns `true` if a bound was grabbed, meaning the
    /// gesture belongs to the range selector rather than to chart panning.
    pub fn handle_press(&mut self, y: f64, axis: &ValueAxis) -> bool {
        self.drag = DragState::Idle;
        match self.hit_test(y, axis) {
            Some(bound) => {
                self.drag = DragState::Dragging(bound);
                true
            }
            None => false,
        }
    }

    /// Handle pointer move. Returns `true` if the dragged bound changed.
    pub fn handle_drag(&mut self, y: f64, axis: &ValueAxis) -> bool {
        let DragState::Dragging(which) = self.drag else {
            return false;
        };
        let candidate = axis.pixel_to_value(y);
        if !candidate.is_finite() {
            return false;
        }
        // Padding or pan can push the window below zero
        let candidate = axis.clamp_to_visible(candidate).max(MIN_PRICE);
        let Some(bounds) = self.bounds.as_mut() else {
            return false;
        };
        if !bounds.set_clamped(which, candidate) {
            return false;
        }
        self.publish();
        true
    }

    /// Handle pointer release or the pointer leaving the canvas.
    ///
    /// Returns the committed bounds if a drag was in progress.
    pub fn handle_release(&mut self) -> Option<RangeBounds> {
        match self.drag {
            DragState::Dragging(bound) => {
                self.drag = DragState::Idle;
                log::debug!("Committed {} bound drag: {:?}", bound.name(), self.bounds);
                self.bounds
            }
            DragState::Idle => None,
        }
    }

    /// Dispatch a pointer event. Returns `true` if the event was consumed or
    /// changed the bounds.
    pub fn handle_pointer(&mut self, event: PointerEvent, axis: &ValueAxis) -> bool {
        match event {
            PointerEvent::Down(pos) => self.handle_press(pos.y, axis),
            PointerEvent::Move(pos) => self.handle_drag(pos.y, axis),
            PointerEvent::Up | PointerEvent::Leave => self.handle_release().is_some(),
        }
    }
}

fn is_valid_price(price: f64) -> bool {
    price.is_finite() && price > 0.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    /// Axis 0..=400 px showing 100..=200, so 1 px == 0.25.
    fn axis() -> ValueAxis {
        let mut axis = ValueAxis::new(400.0);
        axis.fit(100.0, 200.0, 0.0);
        axis
    }

    fn seeded(lower: f64, upper: f64) -> RangeController {
        let mut controller = RangeController::default();
        controller.seed(150.0);
        controller.set_bounds(Some(lower), Some(upper));
        controller
    }

    #[test]
    fn test_unseeded_ignores_input() {
        let mut controller = RangeController::default();
        assert!(controller.bounds().is_none());
        assert!(!controller.set_bound(Bound::Lower, 10.0));
        assert!(!controller.handle_press(0.0, &axis()));
        assert_eq!(controller.drag_state(), DragState::Idle);
    }

    #[test]
    fn test_seed_once() {
        let mut controller = RangeController::default();
        assert!(controller.seed(100.0));
        let first = controller.bounds().unwrap();
        assert_eq!(first.lower(), 100.0 * 0.95);
        assert_eq!(first.upper(), 100.0 * 1.05);

        assert!(!controller.seed(300.0));
        assert_eq!(controller.bounds(), Some(first));
    }

    #[test]
    fn test_seed_rejects_invalid_price() {
        let mut controller = RangeController::default();
        assert!(!controller.seed(0.0));
        assert!(!controller.seed(f64::NAN));
        assert!(!controller.is_seeded());
        assert!(controller.seed(2.0));
    }

    #[test]
    fn test_press_grabs_nearest_handle() {
        // lower 125 -> 300 px, upper 175 -> 100 px
        let mut controller = seeded(125.0, 175.0);
        assert!(controller.handle_press(305.0, &axis()));
        assert_eq!(controller.drag_state(), DragState::Dragging(Bound::Lower));
        controller.handle_release();

        assert!(controller.handle_press(92.0, &axis()));
        assert_eq!(controller.drag_state(), DragState::Dragging(Bound::Upper));
        controller.handle_release();

        assert!(!controller.handle_press(200.0, &axis()));
        assert_eq!(controller.drag_state(), DragState::Idle);
    }

    #[test]
    fn test_tie_break_prefers_topmost_handle() {
        // Bounds 1 px apart: both within tolerance
        let mut controller = seeded(150.0, 150.25);
        assert!(controller.handle_press(199.5, &axis()));
        assert_eq!(controller.drag_state(), DragState::Dragging(*DRAW_ORDER.last().unwrap()));
    }

    #[test]
    fn test_drag_moves_bound_and_release_commits() {
        let mut controller = seeded(125.0, 175.0);
        controller.handle_press(300.0, &axis());
        assert!(controller.handle_drag(280.0, &axis()));
        assert_eq!(controller.bounds().unwrap().lower(), 130.0);

        let committed = controller.handle_release().unwrap();
        assert_eq!(committed.lower(), 130.0);
        assert_eq!(controller.drag_state(), DragState::Idle);
        // Moves after release do nothing
        assert!(!controller.handle_drag(0.0, &axis()));
    }

    #[test]
    fn test_drag_lower_through_upper_clamps_exactly() {
        let mut controller = seeded(125.0, 175.0);
        controller.handle_press(300.0, &axis());
        controller.handle_drag(50.0, &axis());
        let bounds = controller.bounds().unwrap();
        assert_eq!(bounds.lower(), 175.0);
        assert_eq!(bounds.upper(), 175.0);
    }

    #[test]
    fn test_drag_upper_through_lower_clamps_exactly() {
        let mut controller = seeded(125.0, 175.0);
        controller.handle_press(100.0, &axis());
        controller.handle_drag(390.0, &axis());
        assert_eq!(controller.bounds().unwrap().upper(), 125.0);
    }

    #[test]
    fn test_drag_clamped_to_visible_axis() {
        let mut controller = seeded(125.0, 175.0);
        controller.handle_press(100.0, &axis());
        controller.handle_drag(-1000.0, &axis());
        assert_eq!(controller.bounds().unwrap().upper(), 200.0);
    }

    #[test]
    fn test_leave_ends_drag() {
        let mut controller = seeded(125.0, 175.0);
        controller.handle_press(300.0, &axis());
        assert!(controller.handle_pointer(PointerEvent::Leave, &axis()));
        assert!(!controller.is_dragging());
    }

    #[test]
    fn test_set_bound_clamps_against_other() {
        let mut controller = seeded(125.0, 175.0);
        assert!(controller.set_bound(Bound::Upper, 90.0));
        assert_eq!(controller.bounds().unwrap().upper(), 125.0);
        assert!(controller.set_bound(Bound::Lower, 500.0));
        assert_eq!(controller.bounds().unwrap().lower(), 125.0);
        assert!(!controller.set_bound(Bound::Lower, f64::INFINITY));
    }

    #[test]
    fn test_set_bounds_pair_is_normalized() {
        let mut controller = seeded(125.0, 175.0);
        assert!(controller.set_bounds(Some(300.0), Some(250.0)));
        let bounds = controller.bounds().unwrap();
        assert_eq!((bounds.lower(), bounds.upper()), (250.0, 300.0));
        assert!(!controller.set_bounds(None, None));
        assert!(!controller.set_bounds(Some(f64::NAN), None));
    }

    #[test]
    fn test_reset_is_exact_and_idempotent() {
        let mut controller = seeded(125.0, 175.0);
        controller.handle_press(300.0, &axis());
        controller.handle_drag(10.0, &axis());

        assert!(controller.reset(Some(160.0)));
        let bounds = controller.bounds().unwrap();
        assert_eq!(bounds.lower(), 160.0 * 0.95);
        assert_eq!(bounds.upper(), 160.0 * 1.05);
        assert!(!controller.is_dragging());

        assert!(controller.reset(Some(160.0)));
        assert_eq!(controller.bounds(), Some(bounds));
    }

    #[test]
    fn test_reset_without_price_is_noop() {
        let mut controller = RangeController::default();
        assert!(!controller.reset(None));
        assert!(controller.bounds().is_none());
    }

    #[test]
    fn test_listeners_notified_on_change_only() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let mut controller = RangeController::default();
        let sink = Rc::clone(&seen);
        let id = controller.on_bounds_changed(move |b| sink.borrow_mut().push(*b));

        controller.seed(100.0);
        let upper = controller.bounds().unwrap().upper();
        controller.set_bound(Bound::Upper, upper); // unchanged
        controller.set_bound(Bound::Upper, 110.0);
        assert_eq!(seen.borrow().len(), 2);
        assert_eq!(seen.borrow()[1].upper(), 110.0);

        assert!(controller.remove_listener(id));
        assert!(!controller.remove_listener(id));
        controller.set_bound(Bound::Upper, 120.0);
        assert_eq!(seen.borrow().len(), 2);
    }

    #[test]
    fn test_drag_publishes_every_move() {
        let count = Rc::new(RefCell::new(0));
        let mut controller = seeded(125.0, 175.0);
        let sink = Rc::clone(&count);
        controller.on_bounds_changed(move |_| *sink.borrow_mut() += 1);

        controller.handle_press(300.0, &axis());
        controller.handle_drag(290.0, &axis());
        controller.handle_drag(280.0, &axis());
        controller.handle_drag(270.0, &axis());
        assert_eq!(*count.borrow(), 3);
    }

    #[test]
    fn test_listeners_called_in_registration_order() {
        let calls = Rc::new(RefCell::new(Vec::new()));
        let mut controller = seeded(125.0, 175.0);
        for tag in ["first", "second", "third"] {
            let sink = Rc::clone(&calls);
            controller.on_bounds_changed(move |_| sink.borrow_mut().push(tag));
        }

        controller.set_bound(Bound::Lower, 130.0);
        assert_eq!(*calls.borrow(), vec!["first", "second", "third"]);
    }

    #[test]
    fn test_press_during_drag_rehit_tests() {
        // lower 125 -> 300 px, upper 175 -> 100 px
        let mut controller = seeded(125.0, 175.0);
        assert!(controller.handle_press(300.0, &axis()));
        assert_eq!(controller.drag_state(), DragState::Dragging(Bound::Lower));

        // Second press on the other handle without a release
        assert!(controller.handle_press(100.0, &axis()));
        assert_eq!(controller.drag_state(), DragState::Dragging(Bound::Upper));

        // Press on empty space drops the drag
        assert!(!controller.handle_press(200.0, &axis()));
        assert_eq!(controller.drag_state(), DragState::Idle);
    }

    #[test]
    fn test_drag_below_zero_stays_positive() {
        // Window reaching below zero
        let mut axis = ValueAxis::new(400.0);
        axis.fit(-100.0, 300.0, 0.0);
        let mut controller = RangeController::default();
        controller.seed(100.0);
        controller.set_bounds(Some(50.0), Some(150.0));

        let y = axis.value_to_pixel(50.0);
        assert!(controller.handle_press(y, &axis));
        controller.handle_drag(400.0, &axis);
        let lower = controller.bounds().unwrap().lower();
        assert!(lower > 0.0);
        assert_eq!(lower, MIN_PRICE);
    }

    #[test]
    fn test_typed_non_positive_values_stay_positive() {
        let mut controller = seeded(125.0, 175.0);
        controller.set_bound(Bound::Lower, -5.0);
        assert_eq!(controller.bounds().unwrap().lower(), MIN_PRICE);

        controller.set_bounds(Some(0.0), Some(-1.0));
        let bounds = controller.bounds().unwrap();
        assert!(bounds.lower() > 0.0 && bounds.upper() > 0.0);
    }
}
