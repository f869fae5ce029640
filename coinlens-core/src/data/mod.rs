//! Market-data ingestion: providers, fallback, credentials and rate limiting.

pub mod circuit_breaker;
pub mod coincap;
pub mod coingecko;
pub mod credentials;
pub mod dominance;
pub mod fallback;
pub mod http;
pub mod provider;
pub mod sentiment;
pub mod synthetic;

pub use circuit_breaker::{BreakerState, CircuitBreaker};
pub use coincap::CoinCapProvider;
pub use coingecko::CoinGeckoProvider;
pub use credentials::{
    ChainedCredentials, CredentialProvider, EnvCredentials, NoCredentials, StaticCredentials,
    COINGECKO_API_KEY, COINMARKETCAP_API_KEY,
};
pub use dominance::DominanceSource;
pub use fallback::FallbackChain;
pub use http::{HttpFetcher, RetryPolicy};
pub use provider::{DataError, DataSource, PriceProvider, QuoteProvider};
pub use sentiment::FearGreedSource;
pub use synthetic::SyntheticProvider;
