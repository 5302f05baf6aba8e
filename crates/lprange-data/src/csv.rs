//! CSV snapshot loading.
//!
//! Rows are turned into raw records and then normalized, so a malformed row is
//! dropped like a malformed JSON record instead of failing the file.

use std::path::{Path, PathBuf};

use lprange_core::{FeeRecord, LiquidityTick, PricePoint};

use crate::error::{DataError, Result};
use crate::raw::{RawFeeRecord, RawPricePoint, RawTick};
use crate::sqrt_price::TokenDecimals;
use crate::validation::{normalize_fees, normalize_prices, normalize_ticks};

/// Loads price, fee or tick series from CSV files.
pub struct CsvLoader {
    path: PathBuf,
}

impl CsvLoader {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn load_prices(&self, decimals: TokenDecimals) -> Result<Vec<PricePoint>> {
        load_prices_from_csv(&self.path, decimals)
    }

    pub fn load_fees(&self) -> Result<Vec<FeeRecord>> {
        load_fees_from_csv(&self.path)
    }

    pub fn load_ticks(&self) -> Result<Vec<LiquidityTick>> {
        load_ticks_from_csv(&self.path)
    }
}

/// Latest calendar year accepted by [`parse_datetime`].
const MAX_YEAR: i32 = 9999;

/// Parse datetime string "YYYY-MM-DD HH:MM:SS", "YYYY-MM-DD" or a Unix timestamp.
pub fn parse_datetime(s: &str) -> Option<f64> {
    let s = s.trim();
    if let Ok(ts) = s.parse::<f64>() {
        return Some(ts);
    }

    let parts: Vec<&str> = s.split(&['-', ' ', ':', 'T']).filter(|p| !p.is_empty()).collect();
    if parts.len() != 3 && parts.len() < 6 {
        return None;
    }
    let year: i32 = parts[0].parse().ok()?;
    let month: u32 = parts[1].parse().ok()?;
    let day: u32 = parts[2].parse().ok()?;
    let (hour, min, sec): (u32, u32, u32) = if parts.len() >= 6 {
        (parts[3].parse().ok()?, parts[4].parse().ok()?, parts[5].parse().ok()?)
    } else {
        (0, 0, 0)
    };
    if !(1970..=MAX_YEAR).contains(&year) || !(1..=12).contains(&month) {
        return None;
    }
    let is_leap = |y: i32| y % 4 == 0 && (y % 100 != 0 || y % 400 == 0);
    let month_len = match month {
        2 if is_leap(year) => 29,
        2 => 28,
        4 | 6 | 9 | 11 => 30,
        _ => 31,
    };
    if day == 0 || day > month_len || hour > 23 || min > 59 || sec > 59 {
        return None;
    }

    // Days since Unix epoch (1970-01-01), ignoring leap seconds
    let mut days: i64 = (1970..year).map(|y| if is_leap(y) { 366 } else { 365 }).sum();
    let month_days = [0, 31, 59, 90, 120, 151, 181, 212, 243, 273, 304, 334];
    days += month_days[month as usize - 1];
    if month > 2 && is_leap(year) {
        days += 1;
    }
    days += i64::from(day - 1);

    let timestamp = days * 86400 + i64::from(hour) * 3600 + i64::from(min) * 60 + i64::from(sec);
    Some(timestamp as f64)
}

fn find_column(headers: &[String], names: &[&str]) -> Option<usize> {
    headers.iter().position(|h| names.contains(&h.as_str()))
}

fn open(path: &Path) -> Result<(::csv::Reader<std::fs::File>, Vec<String>)> {
    let mut reader = ::csv::ReaderBuilder::new()
        .delimiter(b',')
        .trim(::csv::Trim::All)
        .flexible(true)
        .from_path(path)?;
    let headers = reader
        .headers()?
        .iter()
        .map(|h| h.to_lowercase())
        .collect();
    Ok((reader, headers))
}

fn field(record: &::csv::StringRecord, col: Option<usize>) -> Option<f64> {
    record.get(col?)?.parse().ok()
}

const TIMESTAMP_COLUMNS: &[&str] = &["timestamp", "date", "time", "periodstartunix"];

/// Load a price series. Columns: timestamp, then `price`/`close`, `price1`, `sqrtprice`.
pub fn load_prices_from_csv<P: AsRef<Path>>(path: P, decimals: TokenDecimals) -> Result<Vec<PricePoint>> {
    let (mut reader, headers) = open(path.as_ref())?;

    let ts_col = find_column(&headers, TIMESTAMP_COLUMNS).ok_or(DataError::MissingColumn("timestamp"))?;
    let price_col = find_column(&headers, &["price", "close", "token0price"]);
    let price1_col = find_column(&headers, &["price1", "token1price"]);
    let sqrt_col = find_column(&headers, &["sqrtprice", "sqrtpricex96"]);
    if price_col.is_none() && price1_col.is_none() && sqrt_col.is_none() {
        return Err(DataError::MissingColumn("price"));
    }

    let mut raw = Vec::new();
    for result in reader.records() {
        let record = result?;
        raw.push(RawPricePoint {
            timestamp: record.get(ts_col).and_then(parse_datetime),
            price: field(&record, price_col),
            price1: field(&record, price1_col),
            sqrt_price: field(&record, sqrt_col),
        });
    }

    Ok(normalize_prices(&raw, decimals).records)
}

/// Load a daily fee series. Columns: timestamp and `feesusd`/`fees_usd`/`fees`.
pub fn load_fees_from_csv<P: AsRef<Path>>(path: P) -> Result<Vec<FeeRecord>> {
    let (mut reader, headers) = open(path.as_ref())?;

    let ts_col = find_column(&headers, TIMESTAMP_COLUMNS).ok_or(DataError::MissingColumn("timestamp"))?;
    let fee_col = find_column(&headers, &["feesusd", "fees_usd", "fees"]).ok_or(DataError::MissingColumn("feesUSD"))?;

    let mut raw = Vec::new();
    for result in reader.records() {
        let record = result?;
        raw.push(RawFeeRecord {
            timestamp: record.get(ts_col).and_then(parse_datetime),
            fees_usd: field(&record, Some(fee_col)),
        });
    }

    Ok(normalize_fees(&raw).records)
}

/// Load liquidity ticks. Columns: `pricelower`, `priceupper`, `usdvalue`.
pub fn load_ticks_from_csv<P: AsRef<Path>>(path: P) -> Result<Vec<LiquidityTick>> {
    let (mut reader, headers) = open(path.as_ref())?;

    let lower_col = find_column(&headers, &["pricelower", "price_lower"]).ok_or(DataError::MissingColumn("priceLower"))?;
    let upper_col = find_column(&headers, &["priceupper", "price_upper"]).ok_or(DataError::MissingColumn("priceUpper"))?;
    let value_col = find_column(&headers, &["usdvalue", "usd_value"]).ok_or(DataError::MissingColumn("usdValue"))?;

    let mut raw = Vec::new();
    for result in reader.records() {
        let record = result?;
        raw.push(RawTick {
            price_lower: field(&record, Some(lower_col)),
            price_upper: field(&record, Some(upper_col)),
            usd_value: field(&record, Some(value_col)),
        });
    }

    Ok(normalize_ticks(&raw).records)
}
