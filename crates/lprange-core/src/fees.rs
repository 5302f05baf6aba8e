//! Trailing fee sums.

use crate::point::FeeRecord;

/// Fee totals over the trailing 1, 7 and 30 records.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct FeeSummary {
    pub last_1d: Option<f64>,
    pub last_7d: Option<f64>,
    pub last_30d: Option<f64>,
}

/// Sum the last `n` records (all of them if fewer exist).
fn trailing_sum(records: &[FeeRecord], n: usize) -> f64 {
    let start = records.len().saturating_sub(n);
    records[start..].iter().map(|r| r.fees_usd).sum()
}

/// Reduce a fee series into trailing sums.
///
/// Records are expected in ascending timestamp order; windows are taken by
/// position, not by date. Every field is `None` for an empty series.
pub fn summarize(records: &[FeeRecord]) -> FeeSummary {
    if records.is_empty() {
        return FeeSummary::default();
    }

    FeeSummary {
        last_1d: Some(trailing_sum(records, 1)),
        last_7d: Some(trailing_sum(records, 7)),
        last_30d: Some(trailing_sum(records, 30)),
    }
}
