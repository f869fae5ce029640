//! Data provider traits and structured error types.
//!
//! `PriceProvider` abstracts over price-history sources (CoinGecko, CoinCap,
//! synthetic) so the fallback chain can swap them and tests can mock them.

use crate::domain::{AssetQuote, PriceSeries, SeriesError};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Structured error types for data operations.
///
/// Displayable directly in CLI output.
#[derive(Debug, Error)]
pub enum DataError {
    #[error("network unreachable: {0}")]
    NetworkUnreachable(String),

    #[error("rate limited by provider (retry after {retry_after_secs}s)")]
    RateLimited { retry_after_secs: u64 },

    #[error("response format changed: {0}")]
    ResponseFormatChanged(String),

    #[error("authentication required: {0}")]
    AuthenticationRequired(String),

    #[error("asset not found: {asset}")]
    AssetNotFound { asset: String },

    #[error("hard stop: data provider has blocked requests (circuit breaker tripped)")]
    CircuitBreakerTripped,

    #[error("invalid price series: {0}")]
    InvalidSeries(#[from] SeriesError),

    #[error("all sources failed for '{asset}': {}", format_attempts(.attempts))]
    AllSourcesFailed {
        asset: String,
        attempts: Vec<(String, String)>,
    },

    #[error("data error: {0}")]
    Other(String),
}

fn format_attempts(attempts: &[(String, String)]) -> String {
    if attempts.is_empty() {
        return "no provider available".to_string();
    }
    attempts
        .iter()
        .map(|(provider, err)| format!("{provider}: {err}"))
        .collect::<Vec<_>>()
        .join("; ")
}

/// Where the data came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DataSource {
    CoinGecko,
    CoinCap,
    Synthetic,
    Fixture,
}

impl fmt::Display for DataSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            DataSource::CoinGecko => "coingecko",
            DataSource::CoinCap => "coincap",
            DataSource::Synthetic => "synthetic",
            DataSource::Fixture => "fixture",
        };
        write!(f, "{s}")
    }
}

/// Source of daily price history.
///
/// Implementations own their transport and retry policy. The fallback chain
/// sits above this trait; providers don't know about each other.
pub trait PriceProvider: Send + Sync {
    /// Human-readable name of this provider.
    fn name(&self) -> &str;

    /// Fetch roughly `range_days` of daily prices for an asset id (e.g. "bitcoin").
    fn fetch_prices(&self, asset_id: &str, range_days: u32) -> Result<PriceSeries, DataError>;

    /// Check if the provider is currently available (not rate-limited, not blocked).
    fn is_available(&self) -> bool;
}

/// Source of current market quotes, ordered by market cap.
pub trait QuoteProvider: Send + Sync {
    fn name(&self) -> &str;

    fn fetch_quotes(&self, limit: usize) -> Result<Vec<AssetQuote>, DataError>;
}

impl<P: PriceProvider + ?Sized> PriceProvider for Box<P> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn fetch_prices(&self, asset_id: &str, range_days: u32) -> Result<PriceSeries, DataError> {
        (**self).fetch_prices(asset_id, range_days)
    }

    fn is_available(&self) -> bool {
        (**self).is_available()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_sources_failed_lists_attempts() {
        let err = DataError::AllSourcesFailed {
            asset: "bitcoin".into(),
            attempts: vec![
                ("coingecko".into(), "HTTP 500".into()),
                ("coincap".into(), "timeout".into()),
            ],
        };
        assert_eq!(
            err.to_string(),
            "all sources failed for 'bitcoin': coingecko: HTTP 500; coincap: timeout"
        );
    }

    #[test]
    fn all_sources_failed_without_attempts() {
        let err = DataError::AllSourcesFailed {
            asset: "x".into(),
            attempts: vec![],
        };
        assert!(err.to_string().contains("no provider available"));
    }
}
