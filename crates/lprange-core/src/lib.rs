//! Core types and calculations for lprange.
//!
//! This crate provides the data model and the pure calculations, with no external dependencies:
//! - `PricePoint`, `FeeRecord`, `LiquidityTick` - normalized snapshot records
//! - `RangeBounds` - the ordered price range a position would cover
//! - `aggregate` - liquidity overlapping a price range
//! - `estimate` - fee and APR projection for a deposit
//! - `summarize` - trailing fee sums

pub mod bounds;
pub mod estimate;
pub mod fees;
pub mod liquidity;
pub mod point;

pub use bounds::{Bound, RangeBounds, MIN_PRICE};
pub use estimate::{estimate, EstimateResult};
pub use fees::{summarize, FeeSummary};
pub use liquidity::{aggregate, aggregate_bounds, ticks_in_range};
pub use point::{FeeRecord, LiquidityTick, PricePoint};
