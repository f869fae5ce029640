//! CoinLens Runner: scan orchestration on top of `coinlens-core`.
//!
//! - TOML configuration with validation
//! - Provider wiring (fallback chain, circuit breakers, credentials)
//! - Batched multi-asset scans with progress callbacks
//! - Market overview (quotes, fear & greed, dominance)
//! - JSON / CSV export of scan reports

pub mod config;
pub mod export;
pub mod overview;
pub mod scan;
pub mod sources;

pub use config::{CoinLensConfig, ConfigError, SourceKind};
pub use overview::{DominanceOrigin, MarketOverview};
pub use scan::{
    analyze_asset, analyze_series, run_scan, AssetFailure, AssetOutcome, AssetReport,
    NoopProgress, ScanError, ScanProgress, ScanResult, StdoutProgress,
};
pub use sources::Sources;

#[cfg(test)]
mod send_sync_checks {
    use super::*;

    fn assert_send<T: Send>() {}
    fn assert_sync<T: Sync>() {}

    #[test]
    fn config_is_send_sync() {
        assert_send::<CoinLensConfig>();
        assert_sync::<CoinLensConfig>();
    }

    #[test]
    fn reports_are_send_sync() {
        assert_send::<AssetReport>();
        assert_sync::<AssetReport>();
        assert_send::<AssetOutcome>();
    }

    #[test]
    fn sources_are_send_sync() {
        assert_send::<Sources>();
        assert_sync::<Sources>();
    }
}
