//! Best-effort conversion of Q64.96 square-root prices to decimal prices.
//!
//! This works in `f64` and is not bit-exact with on-chain tick math; it is
//! good enough for charting and range selection.

/// 2^96, the fixed-point scale of `sqrtPriceX96`.
const Q96: f64 = 79_228_162_514_264_337_593_543_950_336.0;

/// Decimals of the two pool tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TokenDecimals {
    pub token0: u8,
    pub token1: u8,
}

impl TokenDecimals {
    pub fn new(token0: u8, token1: u8) -> Self {
        Self { token0, token1 }
    }

    /// Factor converting a raw token1/token0 ratio to human units.
    fn scale(&self) -> f64 {
        10f64.powi(i32::from(self.token0) - i32::from(self.token1))
    }
}

impl Default for TokenDecimals {
    fn default() -> Self {
        Self::new(18, 18)
    }
}

/// Price of token0 in token1 from a `sqrtPriceX96` value.
///
/// Returns `None` for non-finite or non-positive input, or when the result
/// overflows to a non-finite or zero value.
pub fn sqrt_price_x96_to_price(sqrt_price_x96: f64, decimals: TokenDecimals) -> Option<f64> {
    if !sqrt_price_x96.is_finite() || sqrt_price_x96 <= 0.0 {
        return None;
    }

    let ratio = sqrt_price_x96 / Q96;
    let price = ratio * ratio * decimals.scale();
    (price.is_finite() && price > 0.0).then_some(price)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unit_sqrt_price() {
        // sqrtPriceX96 == 2^96 encodes a raw ratio of exactly 1
        let price = sqrt_price_x96_to_price(Q96, TokenDecimals::default()).unwrap();
        assert!((price - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_decimals_scale_result() {
        // Raw ratio 4, token0 = 6 and token1 = 18 decimals scale it by 10^-12
        let sqrt = Q96 * 2.0;
        let price = sqrt_price_x96_to_price(sqrt, TokenDecimals::new(6, 18)).unwrap();
        assert!((price - 4.0e-12).abs() < 1e-24);
    }

    #[test]
    fn test_invalid_input() {
        assert_eq!(sqrt_price_x96_to_price(0.0, TokenDecimals::default()), None);
        assert_eq!(sqrt_price_x96_to_price(-1.0, TokenDecimals::default()), None);
        assert_eq!(sqrt_price_x96_to_price(f64::NAN, TokenDecimals::default()), None);
    }
}
