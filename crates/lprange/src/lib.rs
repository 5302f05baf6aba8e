//! Interactive range selection and return estimation for a liquidity pool.
//!
//! The [`Session`] owns a [`RangeController`], the chart's [`ValueAxis`] and the
//! latest loaded series, and keeps the liquidity in range and fee summary up to
//! date as bounds move and data arrives.

pub mod coords;
pub mod display;
pub mod events;
pub mod range;
pub mod session;

pub use coords::{ScreenPos, ValueAxis};
pub use events::{AppEvent, Command, EventBus, PointerEvent};
pub use range::{
    prepare_overlay, BoundHandle, DragState, ListenerId, RangeController, RangeOverlay, TickBar,
};
pub use session::Session;

pub use lprange_core::{
    aggregate, aggregate_bounds, estimate, summarize as summarize_fees, Bound, EstimateResult,
    FeeRecord, FeeSummary, LiquidityTick, PricePoint, RangeBounds,
};
