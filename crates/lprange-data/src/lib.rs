//! Snapshot loading and normalization for lprange.

pub mod csv;
pub mod error;
pub mod raw;
pub mod source;
pub mod sqrt_price;
pub mod store;
pub mod validation;

pub use self::csv::CsvLoader;
pub use error::DataError;
pub use raw::{RawFeeRecord, RawPricePoint, RawTick};
pub use source::{DataSource, FileSource};
pub use sqrt_price::TokenDecimals;
pub use store::{RequestId, SeriesKind, SeriesStore};
pub use validation::{normalize_fees, normalize_prices, normalize_ticks, Normalized};
