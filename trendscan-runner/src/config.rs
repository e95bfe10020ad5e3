//! Serializable scan configuration.
//!
//! Every section and field has a default, so an empty file (or no file at
//! all) describes the stock TWSE scan: top 20 by traded value, six months of
//! Yahoo daily bars, four workers, TAIEX as the market index.

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use trendscan_core::domain::Listing;
use trendscan_core::indicators::IndicatorParams;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("invalid config: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScanConfig {
    pub universe: UniverseConfig,
    pub data: DataConfig,
    pub scan: ScanSection,
    pub market: MarketConfig,
    pub indicators: IndicatorParams,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UniverseKind {
    Twse,
    Static,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UniverseConfig {
    pub source: UniverseKind,
    /// How many of the most traded listings to screen.
    pub top_n: usize,
    /// Ranked listings for the `static` source.
    pub symbols: Vec<Listing>,
}

impl Default for UniverseConfig {
    fn default() -> Self {
        Self {
            source: UniverseKind::Twse,
            top_n: 20,
            symbols: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProviderKind {
    Yahoo,
    Csv,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DataConfig {
    pub provider: ProviderKind,
    /// Directory of `<symbol>.csv` files for the `csv` provider.
    pub csv_dir: String,
    /// Appended to listing codes to form provider symbols ("2330" -> "2330.TW").
    pub symbol_suffix: String,
    pub lookback_months: u32,
    /// Per-request timeout for network providers.
    pub timeout_secs: u64,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            provider: ProviderKind::Yahoo,
            csv_dir: "data".into(),
            symbol_suffix: ".TW".into(),
            lookback_months: 6,
            timeout_secs: 30,
        }
    }
}

impl DataConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScanSection {
    /// Upper bound on concurrent per-symbol evaluations.
    pub workers: usize,
}

impl Default for ScanSection {
    fn default() -> Self {
        Self { workers: 4 }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MarketConfig {
    /// Provider symbol of the market index, used as-is (no suffix).
    pub index_symbol: String,
}

impl Default for MarketConfig {
    fn default() -> Self {
        Self {
            index_symbol: "^TWII".into(),
        }
    }
}

impl ScanConfig {
    /// Load and validate a config file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml(&content)
    }

    /// Parse and validate a TOML string.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let invalid = |msg: &str| Err(ConfigError::Invalid(msg.to_string()));

        if self.universe.top_n == 0 {
            return invalid("universe.top_n must be >= 1");
        }
        if self.universe.source == UniverseKind::Static && self.universe.symbols.is_empty() {
            return invalid("universe.symbols must not be empty for the static source");
        }
        if self.scan.workers == 0 {
            return invalid("scan.workers must be >= 1");
        }
        if self.data.lookback_months == 0 {
            return invalid("data.lookback_months must be >= 1");
        }
        if self.data.timeout_secs == 0 {
            return invalid("data.timeout_secs must be >= 1");
        }

        let p = &self.indicators;
        if p.fast_span == 0 || p.slow_span == 0 || p.signal_span == 0 {
            return invalid("indicator spans must be >= 1");
        }
        if p.fast_span >= p.slow_span {
            return invalid("indicators.fast_span must be below slow_span");
        }
        if p.band_period < 2 {
            return invalid("indicators.band_period must be >= 2");
        }
        if !(p.band_width.is_finite() && p.band_width > 0.0) {
            return invalid("indicators.band_width must be positive");
        }
        let sar = &p.sar;
        if !(sar.af_start > 0.0 && sar.af_step > 0.0 && sar.af_max >= sar.af_start) {
            return invalid("indicators.sar needs af_start > 0, af_step > 0, af_max >= af_start");
        }
        Ok(())
    }
}
