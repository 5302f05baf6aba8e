//! Normalization of raw snapshot records.
//!
//! Malformed records are dropped here and never reach the core. Each
//! normalizer reports how many records it dropped.

use lprange_core::{FeeRecord, LiquidityTick, PricePoint};

use crate::raw::{RawFeeRecord, RawPricePoint, RawTick};
use crate::sqrt_price::{sqrt_price_x96_to_price, TokenDecimals};

/// Output of a normalizer.
#[derive(Debug, Clone, PartialEq)]
pub struct Normalized<T> {
    pub records: Vec<T>,
    /// Number of input records that were dropped.
    pub dropped: usize,
}

/// Convert a raw timestamp to whole seconds, detecting milliseconds (13+ digits).
pub fn normalize_timestamp(raw: f64) -> Option<i64> {
    if !raw.is_finite() || raw < 0.0 {
        return None;
    }
    let seconds = if raw > 1e12 { raw / 1000.0 } else { raw };
    Some(seconds.floor() as i64)
}

fn finite(value: Option<f64>) -> Option<f64> {
    value.filter(|v| v.is_finite())
}

/// Resolve the price of a raw point: direct quote, then `1 / price1`, then sqrt price.
pub fn resolve_price(raw: &RawPricePoint, decimals: TokenDecimals) -> Option<f64> {
    let price = finite(raw.price)
        .or_else(|| finite(raw.price1).map(|inverse| 1.0 / inverse).filter(|p| p.is_finite()))
        .or_else(|| raw.sqrt_price.and_then(|s| sqrt_price_x96_to_price(s, decimals)))?;
    (price > 0.0).then_some(price)
}

/// Validate a tick has finite fields and a non-negative value.
pub fn validate_tick(tick: &LiquidityTick) -> bool {
    tick.price_lower.is_finite()
        && tick.price_upper.is_finite()
        && tick.usd_value.is_finite()
        && tick.usd_value >= 0.0
}

/// Sort by timestamp and keep the last record for each duplicate timestamp.
///
/// The sort is stable, so "last" means last in input order.
fn sort_dedup_by_timestamp<T, F>(mut records: Vec<T>, timestamp: F) -> Vec<T>
where
    F: Fn(&T) -> i64,
{
    records.sort_by_key(|r| timestamp(r));
    let mut out: Vec<T> = Vec::with_capacity(records.len());
    for record in records {
        match out.last_mut() {
            Some(prev) if timestamp(prev) == timestamp(&record) => *prev = record,
            _ => out.push(record),
        }
    }
    out
}

/// Normalize a price snapshot into an ascending series with unique timestamps.
pub fn normalize_prices(raw: &[RawPricePoint], decimals: TokenDecimals) -> Normalized<PricePoint> {
    let valid: Vec<PricePoint> = raw
        .iter()
        .filter_map(|r| {
            let timestamp = normalize_timestamp(r.timestamp?)?;
            let price = resolve_price(r, decimals)?;
            Some(PricePoint::new(timestamp, price))
        })
        .collect();
    let dropped = raw.len() - valid.len();
    let records = sort_dedup_by_timestamp(valid, |p| p.timestamp);

    if dropped > 0 {
        log::debug!("Dropped {} malformed price records of {}", dropped, raw.len());
    }
    Normalized { records, dropped }
}

/// Normalize a fee snapshot into an ascending series, one record per period.
pub fn normalize_fees(raw: &[RawFeeRecord]) -> Normalized<FeeRecord> {
    let valid: Vec<FeeRecord> = raw
        .iter()
        .filter_map(|r| {
            let timestamp = normalize_timestamp(r.timestamp?)?;
            let fees = finite(r.fees_usd).filter(|f| *f >= 0.0)?;
            Some(FeeRecord::new(timestamp, fees))
        })
        .collect();
    let dropped = raw.len() - valid.len();
    let records = sort_dedup_by_timestamp(valid, |f| f.timestamp);

    if dropped > 0 {
        log::debug!("Dropped {} malformed fee records of {}", dropped, raw.len());
    }
    Normalized { records, dropped }
}

/// Normalize a tick snapshot. Order is preserved; intervals are left unordered.
pub fn normalize_ticks(raw: &[RawTick]) -> Normalized<LiquidityTick> {
    let records: Vec<LiquidityTick> = raw
        .iter()
        .filter_map(|r| Some(LiquidityTick::new(r.price_lower?, r.price_upper?, r.usd_value?)))
        .filter(validate_tick)
        .collect();
    let dropped = raw.len() - records.len();

    if dropped > 0 {
        log::debug!("Dropped {} malformed tick records of {}", dropped, raw.len());
    }
    Normalized { records, dropped }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn price(ts: f64, price: f64) -> RawPricePoint {
        RawPricePoint {
            timestamp: Some(ts),
            price: Some(price),
            ..Default::default()
        }
    }

    #[test]
    fn test_timestamp_milliseconds_detected() {
        assert_eq!(normalize_timestamp(1_700_000_000_123.0), Some(1_700_000_000));
        assert_eq!(normalize_timestamp(1_700_000_000.0), Some(1_700_000_000));
        assert_eq!(normalize_timestamp(f64::NAN), None);
    }

    #[test]
    fn test_price_falls_back_to_inverse() {
        let raw = RawPricePoint {
            timestamp: Some(1.0),
            price: Some(f64::NAN),
            price1: Some(0.0005),
            sqrt_price: None,
        };
        let resolved = resolve_price(&raw, TokenDecimals::default()).unwrap();
        assert!((resolved - 2000.0).abs() < 1e-9);
    }

    #[test]
    fn test_price_falls_back_to_sqrt_price() {
        let raw = RawPricePoint {
            timestamp: Some(1.0),
            price: None,
            price1: None,
            sqrt_price: Some(79_228_162_514_264_337_593_543_950_336.0),
        };
        let resolved = resolve_price(&raw, TokenDecimals::default()).unwrap();
        assert!((resolved - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_zero_inverse_is_dropped() {
        let raw = RawPricePoint {
            timestamp: Some(1.0),
            price1: Some(0.0),
            ..Default::default()
        };
        assert_eq!(resolve_price(&raw, TokenDecimals::default()), None);
    }

    #[test]
    fn test_prices_sorted_and_deduplicated() {
        let raw = vec![
            price(300.0, 3.0),
            price(100.0, 1.0),
            price(200.0, 2.0),
            price(200.0, 2.5),
            RawPricePoint::default(),
            price(400.0, -1.0),
        ];
        let out = normalize_prices(&raw, TokenDecimals::default());
        assert_eq!(out.dropped, 2);
        assert_eq!(
            out.records,
            vec![
                PricePoint::new(100, 1.0),
                PricePoint::new(200, 2.5),
                PricePoint::new(300, 3.0),
            ]
        );
    }

    #[test]
    fn test_fees_drop_missing_and_non_finite() {
        let raw = vec![
            RawFeeRecord { timestamp: Some(86_400.0), fees_usd: Some(12.0) },
            RawFeeRecord { timestamp: Some(0.0), fees_usd: Some(10.0) },
            RawFeeRecord { timestamp: Some(172_800.0), fees_usd: None },
            RawFeeRecord { timestamp: None, fees_usd: Some(1.0) },
            RawFeeRecord { timestamp: Some(259_200.0), fees_usd: Some(f64::INFINITY) },
        ];
        let out = normalize_fees(&raw);
        assert_eq!(out.dropped, 3);
        assert_eq!(out.records, vec![FeeRecord::new(0, 10.0), FeeRecord::new(86_400, 12.0)]);
    }

    #[test]
    fn test_ticks_drop_non_finite() {
        let raw = vec![
            RawTick { price_lower: Some(110.0), price_upper: Some(90.0), usd_value: Some(5.0) },
            RawTick { price_lower: Some(f64::NAN), price_upper: Some(90.0), usd_value: Some(5.0) },
            RawTick { price_lower: Some(1.0), price_upper: None, usd_value: Some(5.0) },
            RawTick { price_lower: Some(1.0), price_upper: Some(2.0), usd_value: Some(-3.0) },
        ];
        let out = normalize_ticks(&raw);
        assert_eq!(out.dropped, 3);
        // Interval order is kept as delivered
        assert_eq!(out.records, vec![LiquidityTick::new(110.0, 90.0, 5.0)]);
    }
}
