//! Configuration management for lprange.
//!
//! Loads configuration from TOML files. Every section falls back to defaults,
//! so a partial file only needs the keys it overrides.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Configuration errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),
    #[error("Failed to parse config file: {0}")]
    ParseError(#[from] toml::de::Error),
    #[error("Failed to serialize config: {0}")]
    SerializeError(#[from] toml::ser::Error),
}

/// Root configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub general: GeneralConfig,
    pub data: DataConfig,
    pub range: RangeConfig,
}

impl Config {
    /// Load configuration from a file path.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Load configuration from default locations.
    ///
    /// Searches in order:
    /// 1. `./config.toml`
    /// 2. `~/.config/lprange/config.toml`
    ///
    /// Returns default config if no file found.
    pub fn load_default() -> Self {
        if let Ok(config) = Self::load(Self::default_path()) {
            return config;
        }

        if let Some(config_dir) = dirs::config_dir() {
            let config_path = config_dir.join("lprange").join("config.toml");
            if let Ok(config) = Self::load(&config_path) {
                return config;
            }
        }

        Self::default()
    }

    /// Save configuration to a file path.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfigError> {
        let content = toml::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }

    /// Get the default config file path.
    pub fn default_path() -> PathBuf {
        PathBuf::from("config.toml")
    }
}

/// General application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    /// Label shown for the pool (e.g. "ETH/USDC 0.05%").
    pub pool_label: String,
    /// Deposit used when none is given on the command line.
    pub default_deposit_usd: f64,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            pool_label: "ETH/USDC".to_string(),
            default_deposit_usd: 1000.0,
        }
    }
}

/// Snapshot file locations and token metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DataConfig {
    /// Price series file (JSON array or CSV).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prices_path: Option<PathBuf>,
    /// Daily fee series file (JSON array or CSV).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fees_path: Option<PathBuf>,
    /// Liquidity tick file (JSON array).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ticks_path: Option<PathBuf>,
    /// Decimals of the pool's token0, used for sqrt-price conversion.
    pub token0_decimals: u8,
    /// Decimals of the pool's token1.
    pub token1_decimals: u8,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            prices_path: None,
            fees_path: None,
            ticks_path: None,
            token0_decimals: 18,
            token1_decimals: 18,
        }
    }
}

/// Range selection behaviour.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RangeConfig {
    /// Pointer distance in pixels within which a press grabs a bound.
    pub hit_tolerance_px: f64,
    /// Factor applied to the latest price for the seeded lower bound.
    pub seed_lower_factor: f64,
    /// Factor applied to the latest price for the seeded upper bound.
    pub seed_upper_factor: f64,
    /// Fraction of the price span added above and below when fitting the axis.
    pub view_padding: f64,
    /// Multiplicative zoom applied per zoom step.
    pub zoom_step: f64,
}

impl Default for RangeConfig {
    fn default() -> Self {
        Self {
            hit_tolerance_px: 8.0,
            seed_lower_factor: 0.95,
            seed_upper_factor: 1.05,
            view_padding: 0.1,
            zoom_step: 1.2,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.general.default_deposit_usd, 1000.0);
        assert_eq!(config.range.seed_lower_factor, 0.95);
        assert_eq!(config.range.seed_upper_factor, 1.05);
        assert_eq!(config.data.token0_decimals, 18);
        assert!(config.data.prices_path.is_none());
    }

    #[test]
    fn test_parse_partial_toml() {
        let toml = r#"
[general]
pool_label = "WBTC/ETH"

[data]
prices_path = "data/prices.json"
token0_decimals = 8

[range]
hit_tolerance_px = 12.0
"#;
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.general.pool_label, "WBTC/ETH");
        // Missing keys keep defaults
        assert_eq!(config.general.default_deposit_usd, 1000.0);
        assert_eq!(config.data.prices_path, Some(PathBuf::from("data/prices.json")));
        assert_eq!(config.data.token0_decimals, 8);
        assert_eq!(config.data.token1_decimals, 18);
        assert_eq!(config.range.hit_tolerance_px, 12.0);
        assert_eq!(config.range.zoom_step, 1.2);
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");

        let mut config = Config::default();
        config.general.default_deposit_usd = 2500.0;
        config.data.fees_path = Some(PathBuf::from("fees.csv"));
        config.save(&path).unwrap();

        let loaded = Config::load(&path).unwrap();
        assert_eq!(loaded.general.default_deposit_usd, 2500.0);
        assert_eq!(loaded.data.fees_path, Some(PathBuf::from("fees.csv")));
    }

    #[test]
    fn test_load_missing_file_is_read_error() {
        let err = Config::load("/definitely/not/here/config.toml").unwrap_err();
        assert!(matches!(err, ConfigError::ReadError(_)));
    }
}
