//! Liquidity aggregation over a price range.

use crate::bounds::RangeBounds;
use crate::point::LiquidityTick;

/// Sum the USD liquidity of every tick whose band overlaps `[lower, upper]`.
///
/// Bands are normalized per tick; the query interval is not, so callers must
/// pass `lower <= upper`. Touching edges count as overlap. An empty tick set or
/// a range with no overlapping ticks yields `0.0`. A NaN query endpoint yields NaN.
pub fn aggregate(ticks: &[LiquidityTick], lower: f64, upper: f64) -> f64 {
    if lower.is_nan() || upper.is_nan() {
        return f64::NAN;
    }

    ticks
        .iter()
        .filter(|tick| tick.overlaps(lower, upper))
        .map(|tick| tick.usd_value)
        .sum()
}

/// [`aggregate`] over a bounds snapshot.
pub fn aggregate_bounds(ticks: &[LiquidityTick], bounds: &RangeBounds) -> f64 {
    aggregate(ticks, bounds.lower(), bounds.upper())
}

/// Ticks that [`aggregate`] would include for the given bounds.
pub fn ticks_in_range<'a>(
    ticks: &'a [LiquidityTick],
    bounds: &'a RangeBounds,
) -> impl Iterator<Item = &'a LiquidityTick> + 'a {
    ticks
        .iter()
        .filter(move |tick| tick.overlaps(bounds.lower(), bounds.upper()))
}
