//! Fee income and APR projection for a deposit.

/// Weeks per year used to annualize weekly yield.
pub const WEEKS_PER_YEAR: f64 = 52.0;

/// Projected returns for a deposit. `None` means the inputs could not support
/// an estimate, which is distinct from a computed zero.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct EstimateResult {
    pub daily_fees_usd: Option<f64>,
    pub weekly_fees_usd: Option<f64>,
    pub apr_percent: Option<f64>,
}

impl EstimateResult {
    /// Result with every field unavailable.
    pub fn unavailable() -> Self {
        Self::default()
    }

    /// True if every field was computed.
    pub fn is_available(&self) -> bool {
        self.daily_fees_usd.is_some() && self.weekly_fees_usd.is_some() && self.apr_percent.is_some()
    }
}

/// Estimate fees for `deposit` supplied into a range holding `liquidity_in_range`,
/// given the pool's fees over the last seven periods.
///
/// The deposit earns its proportional share of the range's fees:
/// `weekly = deposit / liquidity * fees_7d`, `daily = weekly / 7`.
/// APR is the range's yield rate, `fees_7d / liquidity * 52 * 100`, and does not
/// depend on the deposit.
pub fn estimate(deposit: f64, liquidity_in_range: f64, fees_last_7d: f64) -> EstimateResult {
    let valid = deposit.is_finite()
        && deposit > 0.0
        && liquidity_in_range.is_finite()
        && liquidity_in_range > 0.0
        && fees_last_7d.is_finite()
        && fees_last_7d >= 0.0;
    if !valid {
        return EstimateResult::unavailable();
    }

    let weekly = (deposit / liquidity_in_range) * fees_last_7d;
    let daily = weekly / 7.0;
    let apr = (fees_last_7d / liquidity_in_range) * WEEKS_PER_YEAR * 100.0;

    EstimateResult {
        daily_fees_usd: Some(daily),
        weekly_fees_usd: Some(weekly),
        apr_percent: Some(apr),
    }
}
