//! Dashboard configuration, loaded from TOML.
//!
//! Every field has a default, so an empty file (or no file) is valid.

use crate::data::{CsvProvider, DataProvider, DataSource, ProviderError, YahooProvider};
use crate::pipeline::SignalRequest;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

/// Longest history a config may request: one hundred years.
pub const MAX_LOOKBACK_DAYS: i64 = 36_500;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid config: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DashboardConfig {
    /// Symbol shown at startup.
    pub symbol: String,
    /// Initial stop-loss percentage.
    pub stop_loss_pct: u32,
    /// Lower bound of the stop-loss selector.
    pub stop_loss_min: u32,
    /// Upper bound of the stop-loss selector.
    pub stop_loss_max: u32,
    /// SMA window for the trend filter.
    pub trend_window: usize,
    /// Bars before the latest one used for the breakout level.
    pub breakout_window: usize,
    pub lookback_days: i64,
    pub cache_ttl_secs: u64,
    pub provider: DataSource,
    /// Directory of `{SYMBOL}.csv` files; required when `provider = "csv"`.
    pub csv_dir: Option<PathBuf>,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            symbol: "NVDA".to_string(),
            stop_loss_pct: 10,
            stop_loss_min: 5,
            stop_loss_max: 15,
            trend_window: 200,
            breakout_window: 20,
            lookback_days: 365,
            cache_ttl_secs: 3600,
            provider: DataSource::Yahoo,
            csv_dir: None,
        }
    }
}

impl DashboardConfig {
    /// Load and validate a config file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
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

    /// Load `path` if it exists, otherwise return the defaults.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::from_file(path)
        } else {
            Ok(Self::default())
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.symbol.trim().is_empty() {
            return Err(ConfigError::Invalid("symbol must not be empty".into()));
        }
        if self.trend_window == 0 || self.breakout_window == 0 {
            return Err(ConfigError::Invalid(
                "trend_window and breakout_window must be at least 1".into(),
            ));
        }
        if self.stop_loss_min == 0 || self.stop_loss_max >= 100 {
            return Err(ConfigError::Invalid(
                "stop-loss bounds must lie strictly between 0 and 100".into(),
            ));
        }
        if self.stop_loss_min > self.stop_loss_max {
            return Err(ConfigError::Invalid(format!(
                "stop_loss_min ({}) exceeds stop_loss_max ({})",
                self.stop_loss_min, self.stop_loss_max
            )));
        }
        if !(self.stop_loss_min..=self.stop_loss_max).contains(&self.stop_loss_pct) {
            return Err(ConfigError::Invalid(format!(
                "stop_loss_pct ({}) outside {}..={}",
                self.stop_loss_pct, self.stop_loss_min, self.stop_loss_max
            )));
        }
        if !(1..=MAX_LOOKBACK_DAYS).contains(&self.lookback_days) {
            return Err(ConfigError::Invalid(format!(
                "lookback_days ({}) outside 1..={MAX_LOOKBACK_DAYS}",
                self.lookback_days
            )));
        }
        if self.provider == DataSource::Csv && self.csv_dir.is_none() {
            return Err(ConfigError::Invalid(
                "provider \"csv\" requires csv_dir".into(),
            ));
        }
        Ok(())
    }

    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl_secs)
    }

    pub fn lookback(&self) -> chrono::Duration {
        chrono::Duration::days(self.lookback_days)
    }

    /// Pipeline request for `symbol` using this config's windows.
    pub fn request(&self, symbol: &str, stop_loss_pct: u32) -> SignalRequest {
        SignalRequest {
            symbol: symbol.to_string(),
            stop_loss_pct: f64::from(stop_loss_pct),
            trend_window: self.trend_window,
            breakout_window: self.breakout_window,
            lookback: self.lookback(),
        }
    }

    /// Instantiate the configured provider.
    pub fn build_provider(&self) -> Result<Box<dyn DataProvider>, ProviderError> {
        match self.provider {
            DataSource::Yahoo => Ok(Box::new(YahooProvider::new()?)),
            DataSource::Csv => {
                let dir = self
                    .csv_dir
                    .clone()
                    .ok_or_else(|| ProviderError::Other("csv_dir is not set".into()))?;
                Ok(Box::new(CsvProvider::new(dir)))
            }
        }
    }
}
