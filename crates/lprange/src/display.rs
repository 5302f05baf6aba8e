//! Text formatting for bounds, fee summaries and estimates.

use lprange_core::{EstimateResult, FeeSummary, RangeBounds};

/// Shown in place of any value that could not be computed.
pub const PLACEHOLDER: &str = "-";

/// Format a price with precision scaled to its magnitude.
pub fn format_price(price: f64) -> String {
    if !price.is_finite() {
        return PLACEHOLDER.to_string();
    }
    let abs = price.abs();
    if abs >= 1000.0 {
        format!("{:.0}", price)
    } else if abs >= 1.0 {
        format!("{:.2}", price)
    } else {
        format!("{:.6}", price)
    }
}

/// Format a dollar amount, or the placeholder when unavailable.
pub fn format_usd(value: Option<f64>) -> String {
    match value.filter(|v| v.is_finite()) {
        Some(v) if v < 0.0 => format!("-${:.2}", -v),
        Some(v) => format!("${:.2}", v),
        None => PLACEHOLDER.to_string(),
    }
}

/// Format a percentage, or the placeholder when unavailable.
pub fn format_percent(value: Option<f64>) -> String {
    match value.filter(|v| v.is_finite()) {
        Some(v) => format!("{:.2}%", v),
        None => PLACEHOLDER.to_string(),
    }
}

/// Format bounds as `lower - upper`.
pub fn format_bounds(bounds: Option<RangeBounds>) -> String {
    match bounds {
        Some(b) => format!("{} - {}", format_price(b.lower()), format_price(b.upper())),
        None => PLACEHOLDER.to_string(),
    }
}

/// Display strings for an [`EstimateResult`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EstimateView {
    pub daily: String,
    pub weekly: String,
    pub apr: String,
}

impl From<EstimateResult> for EstimateView {
    fn from(result: EstimateResult) -> Self {
        Self {
            daily: format_usd(result.daily_fees_usd),
            weekly: format_usd(result.weekly_fees_usd),
            apr: format_percent(result.apr_percent),
        }
    }
}

/// Display strings for a [`FeeSummary`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeeSummaryView {
    pub last_1d: String,
    pub last_7d: String,
    pub last_30d: String,
}

impl From<FeeSummary> for FeeSummaryView {
    fn from(summary: FeeSummary) -> Self {
        Self {
            last_1d: format_usd(summary.last_1d),
            last_7d: format_usd(summary.last_7d),
            last_30d: format_usd(summary.last_30d),
        }
    }
}
