//! Data source trait definition and the file-backed implementation.

use std::path::{Path, PathBuf};

use anyhow::Context;
use lprange_core::{FeeRecord, LiquidityTick, PricePoint};
use serde::de::DeserializeOwned;

use crate::csv::{load_fees_from_csv, load_prices_from_csv, load_ticks_from_csv};
use crate::error::DataError;
use crate::raw::{RawFeeRecord, RawPricePoint, RawTick};
use crate::sqrt_price::TokenDecimals;
use crate::validation::{normalize_fees, normalize_prices, normalize_ticks};

/// Trait for types that can load the three pool series.
///
/// Each series loads independently so a failure in one does not prevent the
/// others from being used. This trait uses `anyhow::Result` for flexible error handling.
pub trait DataSource {
    fn load_prices(&self) -> anyhow::Result<Vec<PricePoint>>;
    fn load_fees(&self) -> anyhow::Result<Vec<FeeRecord>>;
    fn load_ticks(&self) -> anyhow::Result<Vec<LiquidityTick>>;
}

/// Loads series from local snapshot files.
///
/// Files ending in `.csv` are read as CSV; anything else as a JSON array of records.
#[derive(Debug, Clone, Default)]
pub struct FileSource {
    pub prices_path: Option<PathBuf>,
    pub fees_path: Option<PathBuf>,
    pub ticks_path: Option<PathBuf>,
    pub decimals: TokenDecimals,
}

impl FileSource {
    pub fn new(
        prices_path: Option<PathBuf>,
        fees_path: Option<PathBuf>,
        ticks_path: Option<PathBuf>,
        decimals: TokenDecimals,
    ) -> Self {
        Self {
            prices_path,
            fees_path,
            ticks_path,
            decimals,
        }
    }
}

fn is_csv(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map_or(false, |ext| ext.eq_ignore_ascii_case("csv"))
}

fn require<'a>(path: &'a Option<PathBuf>, series: &str) -> anyhow::Result<&'a Path> {
    path.as_deref()
        .with_context(|| format!("No {series} file configured"))
}

/// Read a JSON array of raw records.
pub fn read_json_records<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>, DataError> {
    let content = std::fs::read_to_string(path).map_err(|source| DataError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(serde_json::from_str(&content)?)
}

impl DataSource for FileSource {
    fn load_prices(&self) -> anyhow::Result<Vec<PricePoint>> {
        let path = require(&self.prices_path, "price")?;
        let prices = if is_csv(path) {
            load_prices_from_csv(path, self.decimals)?
        } else {
            let raw: Vec<RawPricePoint> = read_json_records(path)?;
            normalize_prices(&raw, self.decimals).records
        };
        log::info!("Loaded {} price points from {}", prices.len(), path.display());
        Ok(prices)
    }

    fn load_fees(&self) -> anyhow::Result<Vec<FeeRecord>> {
        let path = require(&self.fees_path, "fee")?;
        let fees = if is_csv(path) {
            load_fees_from_csv(path)?
        } else {
            let raw: Vec<RawFeeRecord> = read_json_records(path)?;
            normalize_fees(&raw).records
        };
        log::info!("Loaded {} fee records from {}", fees.len(), path.display());
        Ok(fees)
    }

    fn load_ticks(&self) -> anyhow::Result<Vec<LiquidityTick>> {
        let path = require(&self.ticks_path, "tick")?;
        let ticks = if is_csv(path) {
            load_ticks_from_csv(path)?
        } else {
            let raw: Vec<RawTick> = read_json_records(path)?;
            normalize_ticks(&raw).records
        };
        log::info!("Loaded {} liquidity ticks from {}", ticks.len(), path.display());
        Ok(ticks)
    }
}
