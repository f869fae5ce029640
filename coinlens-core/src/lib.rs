//! CoinLens Core: price series, technical indicators, alert classification
//! and market-data ingestion.
//!
//! - `domain`: price series, quotes, sentiment readings, alert records
//! - `indicators`: pure indicator engine producing an `IndicatorSnapshot`
//! - `signals`: threshold alerts, bounded alert history, composite signal
//! - `data`: provider traits, HTTP sources, fallback chain, circuit breaker
//! - `portfolio`: holdings valuation and P&L

pub mod data;
pub mod domain;
pub mod indicators;
pub mod portfolio;
pub mod signals;

#[cfg(test)]
mod tests {
    use super::*;

    /// Compile-time check: types shared across scan worker threads are Send + Sync.
    #[allow(dead_code)]
    fn assert_send_sync() {
        fn require_send<T: Send>() {}
        fn require_sync<T: Sync>() {}

        // Domain
        require_send::<domain::PriceSeries>();
        require_sync::<domain::PriceSeries>();
        require_send::<domain::AlertRecord>();
        require_sync::<domain::AlertRecord>();
        require_send::<domain::AssetQuote>();
        require_sync::<domain::AssetQuote>();

        // Engine and classifier
        require_send::<indicators::IndicatorSnapshot>();
        require_sync::<indicators::IndicatorSnapshot>();
        require_send::<indicators::IndicatorParams>();
        require_sync::<indicators::IndicatorParams>();
        require_send::<signals::AlertClassifier>();
        require_sync::<signals::AlertClassifier>();
        require_send::<signals::AlertHistory>();
        require_sync::<signals::AlertHistory>();

        // Ingestion
        require_send::<data::FallbackChain>();
        require_sync::<data::FallbackChain>();
        require_send::<data::CircuitBreaker>();
        require_sync::<data::CircuitBreaker>();
        require_send::<data::SyntheticProvider>();
        require_sync::<data::SyntheticProvider>();
        require_send::<data::CoinGeckoProvider>();
        require_sync::<data::CoinGeckoProvider>();
    }

    /// The engine takes a bare price slice; nothing about the source leaks in.
    #[test]
    fn engine_is_source_agnostic() {
        let series = data::SyntheticProvider::new(0).generate("bitcoin", 250);
        let prices: Vec<f64> = series.iter().map(|p| p.price).collect();
        let a = indicators::snapshot(&prices);
        let b = indicators::snapshot(&prices.clone());
        assert_eq!(a, b);
    }
}
