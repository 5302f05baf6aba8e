//! Interactive range selection over the chart's value axis.

mod controller;
mod overlay;

pub use controller::{DragState, ListenerId, RangeController, DRAW_ORDER};
pub use overlay::{prepare_overlay, BoundHandle, RangeOverlay, TickBar};
