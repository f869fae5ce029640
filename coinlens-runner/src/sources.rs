//! Builds providers and the price fallback chain from configuration.
//!
//! Each HTTP source gets its own circuit breaker, shared between its price
//! and quote roles, so a ban on one API never blocks another.

use crate::config::{CoinLensConfig, SourceKind};
use chrono::{Datelike, TimeZone, Utc};
use coinlens_core::data::{
    CircuitBreaker, CoinCapProvider, CoinGeckoProvider, CredentialProvider, DataError,
    DominanceSource, FallbackChain, FearGreedSource, HttpFetcher, PriceProvider, QuoteProvider,
    RetryPolicy, SyntheticProvider,
};
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

/// All market-data sources for one session.
pub struct Sources {
    pub prices: FallbackChain,
    /// Quote providers in fallback order (CoinGecko, then CoinCap).
    pub quotes: Vec<Box<dyn QuoteProvider>>,
    pub fear_greed: FearGreedSource,
    pub dominance: DominanceSource,
}

struct Breakers {
    coingecko: Arc<CircuitBreaker>,
    coincap: Arc<CircuitBreaker>,
    alternative_me: Arc<CircuitBreaker>,
    coinmarketcap: Arc<CircuitBreaker>,
}

impl Breakers {
    fn new() -> Self {
        Self {
            coingecko: Arc::new(CircuitBreaker::for_provider("coingecko")),
            coincap: Arc::new(CircuitBreaker::for_provider("coincap")),
            alternative_me: Arc::new(CircuitBreaker::for_provider("alternative.me")),
            coinmarketcap: Arc::new(CircuitBreaker::for_provider("coinmarketcap")),
        }
    }
}

fn retry_policy(config: &CoinLensConfig) -> RetryPolicy {
    RetryPolicy {
        max_retries: config.sources.max_retries,
        timeout: Duration::from_secs(config.sources.timeout_secs.max(1)),
        ..RetryPolicy::default()
    }
}

/// Anchor for synthetic data: configured, or today's midnight UTC.
pub fn synthetic_anchor(config: &CoinLensConfig) -> i64 {
    config.sources.synthetic_anchor_ms.unwrap_or_else(|| {
        let now = Utc::now();
        Utc.with_ymd_and_hms(now.year(), now.month(), now.day(), 0, 0, 0)
            .single()
            .map(|d| d.timestamp_millis())
            .unwrap_or_else(|| now.timestamp_millis())
    })
}

/// Price chain with only the synthetic source.
pub fn synthetic_only(config: &CoinLensConfig) -> FallbackChain {
    FallbackChain::new(vec![Box::new(SyntheticProvider::new(synthetic_anchor(config)))])
}

impl Sources {
    pub fn from_config(config: &CoinLensConfig) -> Result<Self, DataError> {
        let credentials = config.credential_provider();
        Self::with_credentials(config, credentials)
    }

    pub fn with_credentials(
        config: &CoinLensConfig,
        credentials: Arc<dyn CredentialProvider>,
    ) -> Result<Self, DataError> {
        let breakers = Breakers::new();
        let policy = retry_policy(config);
        let fetcher = |breaker: &Arc<CircuitBreaker>| HttpFetcher::new(Arc::clone(breaker), policy.clone());

        let mut price_providers: Vec<Box<dyn PriceProvider>> = Vec::new();
        for kind in &config.sources.order {
            let provider: Box<dyn PriceProvider> = match kind {
                SourceKind::Coingecko => Box::new(CoinGeckoProvider::new(
                    fetcher(&breakers.coingecko)?,
                    Arc::clone(&credentials),
                )),
                SourceKind::Coincap => Box::new(CoinCapProvider::new(fetcher(&breakers.coincap)?)),
                SourceKind::Synthetic => {
                    Box::new(SyntheticProvider::new(synthetic_anchor(config)))
                }
            };
            price_providers.push(provider);
        }
        let prices = FallbackChain::new(price_providers);
        debug!(order = ?prices.provider_names(), "price sources configured");

        let quotes: Vec<Box<dyn QuoteProvider>> = vec![
            Box::new(CoinGeckoProvider::new(
                fetcher(&breakers.coingecko)?,
                Arc::clone(&credentials),
            )),
            Box::new(CoinCapProvider::new(fetcher(&breakers.coincap)?)),
        ];

        Ok(Self {
            prices,
            quotes,
            fear_greed: FearGreedSource::new(fetcher(&breakers.alternative_me)?),
            dominance: DominanceSource::new(fetcher(&breakers.coinmarketcap)?, credentials),
        })
    }
}
