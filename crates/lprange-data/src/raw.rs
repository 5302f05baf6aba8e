//! Raw snapshot records as delivered by the data source.
//!
//! Numeric fields may arrive as JSON numbers, numeric strings (subgraph style)
//! or be absent altogether, so every field is an `Option<f64>` and validity is
//! decided later in [`crate::validation`].

use serde::{Deserialize, Deserializer};

#[derive(Deserialize)]
#[serde(untagged)]
enum NumOrStr {
    Num(f64),
    Str(String),
}

/// Deserialize a number, numeric string or null into `Option<f64>`.
///
/// Unparseable strings become `None` rather than failing the whole document.
fn lenient_f64<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<NumOrStr>::deserialize(deserializer)?;
    Ok(match value {
        Some(NumOrStr::Num(n)) => Some(n),
        Some(NumOrStr::Str(s)) => s.trim().parse().ok(),
        None => None,
    })
}

/// One price observation.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct RawPricePoint {
    #[serde(alias = "date", alias = "periodStartUnix", deserialize_with = "lenient_f64")]
    pub timestamp: Option<f64>,
    #[serde(deserialize_with = "lenient_f64")]
    pub price: Option<f64>,
    /// Inverse quote, used when `price` is missing.
    #[serde(deserialize_with = "lenient_f64")]
    pub price1: Option<f64>,
    /// Q64.96 square-root price, used when both quotes are missing.
    #[serde(rename = "sqrtPrice", alias = "sqrtPriceX96", deserialize_with = "lenient_f64")]
    pub sqrt_price: Option<f64>,
}

/// Fees collected by the pool during one period.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct RawFeeRecord {
    #[serde(alias = "date", alias = "periodStartUnix", deserialize_with = "lenient_f64")]
    pub timestamp: Option<f64>,
    #[serde(rename = "feesUSD", alias = "fees_usd", alias = "feesUsd", deserialize_with = "lenient_f64")]
    pub fees_usd: Option<f64>,
}

/// Liquidity in one tick's price band.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct RawTick {
    #[serde(rename = "priceLower", alias = "price_lower", deserialize_with = "lenient_f64")]
    pub price_lower: Option<f64>,
    #[serde(rename = "priceUpper", alias = "price_upper", deserialize_with = "lenient_f64")]
    pub price_upper: Option<f64>,
    #[serde(rename = "usdValue", alias = "usd_value", deserialize_with = "lenient_f64")]
    pub usd_value: Option<f64>,
}
