//! Scan configuration, loaded from TOML.
//!
//! Every section and field has a default, so an empty file is a valid
//! configuration and a partial file only overrides what it names.

use coinlens_core::data::{ChainedCredentials, CredentialProvider, EnvCredentials, StaticCredentials};
use coinlens_core::indicators::IndicatorParams;
use coinlens_core::signals::{AlertThresholds, DEFAULT_HISTORY_CAPACITY};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Assets scanned when none are given.
pub fn default_assets() -> Vec<String> {
    [
        "bitcoin", "ethereum", "binancecoin", "solana", "ripple", "cardano", "dogecoin",
        "polkadot", "avalanche-2", "chainlink",
    ]
    .into_iter()
    .map(String::from)
    .collect()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScanConfig {
    pub assets: Vec<String>,
    /// Days of daily history requested per asset.
    pub range_days: u32,
    /// Assets fetched per round.
    pub batch_size: usize,
    /// Pause between rounds, in milliseconds.
    pub batch_delay_ms: u64,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            assets: default_assets(),
            range_days: 100,
            batch_size: 5,
            batch_delay_ms: 2000,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AlertConfig {
    #[serde(flatten)]
    pub thresholds: AlertThresholds,
    pub history_capacity: usize,
}

impl Default for AlertConfig {
    fn default() -> Self {
        Self {
            thresholds: AlertThresholds::default(),
            history_capacity: DEFAULT_HISTORY_CAPACITY,
        }
    }
}

/// A price-history source that can appear in `[sources] order`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceKind {
    Coingecko,
    Coincap,
    Synthetic,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SourcesConfig {
    /// Fallback order for price history.
    pub order: Vec<SourceKind>,
    /// Epoch-ms timestamp of the last synthetic point. Unset → today 00:00 UTC.
    pub synthetic_anchor_ms: Option<i64>,
    /// Per-request HTTP timeout.
    pub timeout_secs: u64,
    pub max_retries: u32,
}

impl Default for SourcesConfig {
    fn default() -> Self {
        Self {
            order: vec![SourceKind::Coingecko, SourceKind::Coincap, SourceKind::Synthetic],
            synthetic_anchor_ms: None,
            timeout_secs: 30,
            max_retries: 3,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CoinLensConfig {
    pub scan: ScanConfig,
    pub indicators: IndicatorParams,
    pub alerts: AlertConfig,
    pub sources: SourcesConfig,
    /// API keys by name (e.g. `coingecko_api_key`). Environment variables win.
    pub credentials: BTreeMap<String, String>,
}

impl CoinLensConfig {
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.scan.assets.is_empty() {
            return Err(ConfigError::Invalid("scan.assets is empty".into()));
        }
        if self.scan.batch_size == 0 {
            return Err(ConfigError::Invalid("scan.batch_size must be at least 1".into()));
        }
        if self.scan.range_days == 0 {
            return Err(ConfigError::Invalid("scan.range_days must be at least 1".into()));
        }
        let zero = self.indicators.zero_periods();
        if !zero.is_empty() {
            return Err(ConfigError::Invalid(format!(
                "indicator periods must be positive: {}",
                zero.join(", ")
            )));
        }
        if self.alerts.history_capacity == 0 {
            return Err(ConfigError::Invalid("alerts.history_capacity must be at least 1".into()));
        }
        if self.sources.order.is_empty() {
            return Err(ConfigError::Invalid("sources.order is empty".into()));
        }
        Ok(())
    }

    /// Environment first, then the `[credentials]` table.
    pub fn credential_provider(&self) -> Arc<dyn CredentialProvider> {
        let from_file = StaticCredentials::new(
            self.credentials
                .iter()
                .map(|(k, v)| (k.clone(), v.clone()))
                .collect(),
        );
        Arc::new(
            ChainedCredentials::new()
                .then(Arc::new(EnvCredentials))
                .then(Arc::new(from_file)),
        )
    }
}
