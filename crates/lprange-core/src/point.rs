//! Normalized snapshot records.

/// A single price observation (CPU side, already normalized).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PricePoint {
    /// Seconds since the Unix epoch.
    pub timestamp: i64,
    pub price: f64,
}

impl PricePoint {
    pub fn new(timestamp: i64, price: f64) -> Self {
        Self { timestamp, price }
    }
}

/// Pool fees collected during one period (a day).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FeeRecord {
    /// Period start, seconds since the Unix epoch.
    pub timestamp: i64,
    pub fees_usd: f64,
}

impl FeeRecord {
    pub fn new(timestamp: i64, fees_usd: f64) -> Self {
        Self { timestamp, fees_usd }
    }
}

/// Liquidity attributed to one tick's price band.
///
/// `price_lower` and `price_upper` come straight from the source and may be
/// reversed; use [`LiquidityTick::interval`] for the ordered band.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LiquidityTick {
    pub price_lower: f64,
    pub price_upper: f64,
    /// USD value of the liquidity in this band.
    pub usd_value: f64,
}

impl LiquidityTick {
    pub fn new(price_lower: f64, price_upper: f64, usd_value: f64) -> Self {
        Self {
            price_lower,
            price_upper,
            usd_value,
        }
    }

    /// Ordered `(low, high)` price band.
    #[inline]
    pub fn interval(&self) -> (f64, f64) {
        (
            self.price_lower.min(self.price_upper),
            self.price_lower.max(self.price_upper),
        )
    }

    /// Check if the band touches or overlaps the closed interval `[lower, upper]`.
    #[inline]
    pub fn overlaps(&self, lower: f64, upper: f64) -> bool {
        let (low, high) = self.interval();
        high >= lower && low <= upper
    }
}
