//! Indicator engine.
//!
//! Indicators are pure functions: a price slice in, a single latest value out.
//! Each one is total: when the slice is too short it returns a documented
//! sentinel (0 for averages and momentum, 50 for RSI) rather than an error.
//!
//! Single-value indicators are also exposed as structs implementing
//! `Indicator`, so a caller can build a named set and report which ones have
//! enough data to be meaningful.

pub mod bollinger;
pub mod fibonacci;
pub mod ichimoku;
pub mod momentum;
pub mod rsi;
pub mod sma;
pub mod snapshot;
pub mod stats;
pub mod waves;

pub use bollinger::{bollinger_bands, BollingerBands};
pub use fibonacci::{fibonacci_levels, FIBONACCI_RATIOS};
pub use ichimoku::{ichimoku, Ichimoku};
pub use momentum::{momentum, Momentum};
pub use rsi::{rsi, Rsi};
pub use sma::{sma, Sma};
pub use snapshot::{snapshot, snapshot_with, IndicatorParams, IndicatorSnapshot};
pub use waves::{wave_analysis, WaveAnalysis, WavePhase, WaveTrend};

use serde::{Deserialize, Serialize};

/// Directional reading shared by trend-style indicators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrendSignal {
    Bullish,
    Bearish,
    Neutral,
}

/// Trait for single-value indicators.
pub trait Indicator: Send + Sync {
    /// Human-readable name (e.g., "sma_50", "rsi_14").
    fn name(&self) -> &str;

    /// Number of prices needed before the value stops being a sentinel.
    fn lookback(&self) -> usize;

    /// Latest indicator value for the price slice. Never panics.
    fn compute(&self, prices: &[f64]) -> f64;
}

/// One computed indicator value, flagged when the input was too short.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndicatorReading {
    pub name: String,
    pub value: f64,
    pub lookback: usize,
    /// False when the value is an insufficient-data sentinel.
    pub ready: bool,
}

/// Compute every indicator in the set against the same prices.
pub fn read_all(indicators: &[Box<dyn Indicator>], prices: &[f64]) -> Vec<IndicatorReading> {
    indicators
        .iter()
        .map(|ind| IndicatorReading {
            name: ind.name().to_string(),
            value: ind.compute(prices),
            lookback: ind.lookback(),
            ready: prices.len() >= ind.lookback(),
        })
        .collect()
}

impl IndicatorParams {
    /// The single-value indicators this parameter set describes.
    pub fn indicator_set(&self) -> Vec<Box<dyn Indicator>> {
        vec![
            Box::new(Rsi::new(self.rsi_period)),
            Box::new(Momentum::new(self.momentum_period)),
            Box::new(Sma::new(self.sma_short)),
            Box::new(Sma::new(self.sma_mid)),
            Box::new(Sma::new(self.sma_long)),
        ]
    }
}

/// Assert two f64 values are approximately equal (within epsilon).
#[cfg(test)]
pub fn assert_approx(actual: f64, expected: f64, epsilon: f64) {
    assert!(
        (actual - expected).abs() < epsilon,
        "assert_approx failed: actual={actual}, expected={expected}, diff={}, epsilon={epsilon}",
        (actual - expected).abs()
    );
}

/// Default epsilon for indicator tests.
#[cfg(test)]
pub const DEFAULT_EPSILON: f64 = 1e-10;
