//! Indicator snapshot: the full indicator set for one price series.
//!
//! A snapshot is a pure function of its input prices. Every field degrades to
//! its insufficient-data sentinel instead of failing, so callers can compute
//! snapshots over windows of any length.

use super::bollinger::{
    bollinger_bands, BollingerBands, DEFAULT_BOLLINGER_MULTIPLIER, DEFAULT_BOLLINGER_PERIOD,
};
use super::fibonacci::fibonacci_levels;
use super::momentum::{momentum, DEFAULT_MOMENTUM_PERIOD};
use super::rsi::{rsi, DEFAULT_RSI_PERIOD};
use super::sma::sma;
use serde::{Deserialize, Serialize};

/// Periods used to build a snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IndicatorParams {
    /// Also used for `mfi`.
    pub rsi_period: usize,
    pub momentum_period: usize,
    pub bollinger_period: usize,
    pub bollinger_multiplier: f64,
    pub sma_short: usize,
    pub sma_mid: usize,
    pub sma_long: usize,
}

impl Default for IndicatorParams {
    fn default() -> Self {
        Self {
            rsi_period: DEFAULT_RSI_PERIOD,
            momentum_period: DEFAULT_MOMENTUM_PERIOD,
            bollinger_period: DEFAULT_BOLLINGER_PERIOD,
            bollinger_multiplier: DEFAULT_BOLLINGER_MULTIPLIER,
            sma_short: 50,
            sma_mid: 100,
            sma_long: 200,
        }
    }
}

impl IndicatorParams {
    /// Names of any zero periods (a zero period always yields a sentinel).
    pub fn zero_periods(&self) -> Vec<&'static str> {
        [
            ("rsi_period", self.rsi_period),
            ("momentum_period", self.momentum_period),
            ("bollinger_period", self.bollinger_period),
            ("sma_short", self.sma_short),
            ("sma_mid", self.sma_mid),
            ("sma_long", self.sma_long),
        ]
        .into_iter()
        .filter(|(_, p)| *p == 0)
        .map(|(name, _)| name)
        .collect()
    }

    /// Longest lookback across all indicators.
    pub fn max_lookback(&self) -> usize {
        [
            self.rsi_period.saturating_add(1),
            self.momentum_period,
            self.bollinger_period,
            self.sma_short,
            self.sma_mid,
            self.sma_long,
        ]
        .into_iter()
        .max()
        .unwrap_or(0)
    }
}

/// Indicator values for one price series.
///
/// Field names serialize in camelCase to match the dashboard payload.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IndicatorSnapshot {
    pub rsi: f64,
    pub momentum: f64,
    /// Alias of RSI; no volume data is modelled.
    pub mfi: f64,
    pub sma50: f64,
    pub sma100: f64,
    pub sma200: f64,
    pub bollinger_upper: f64,
    pub bollinger_lower: f64,
    pub fibonacci_levels: [f64; 5],
}

impl IndicatorSnapshot {
    /// Snapshot of an empty series: every field at its sentinel.
    pub fn neutral() -> Self {
        snapshot(&[])
    }

    pub fn bollinger(&self) -> BollingerBands {
        BollingerBands {
            upper: self.bollinger_upper,
            middle: (self.bollinger_upper + self.bollinger_lower) / 2.0,
            lower: self.bollinger_lower,
        }
    }

    /// Bollinger band width relative to the long SMA, in percent.
    pub fn volatility_pct(&self) -> f64 {
        self.bollinger().width_pct(self.sma200)
    }
}

/// Snapshot with the default periods.
pub fn snapshot(prices: &[f64]) -> IndicatorSnapshot {
    snapshot_with(prices, &IndicatorParams::default())
}

pub fn snapshot_with(prices: &[f64], params: &IndicatorParams) -> IndicatorSnapshot {
    let bands = bollinger_bands(prices, params.bollinger_period, params.bollinger_multiplier);
    IndicatorSnapshot {
        rsi: rsi(prices, params.rsi_period),
        momentum: momentum(prices, params.momentum_period),
        mfi: rsi(prices, params.rsi_period),
        sma50: sma(prices, params.sma_short),
        sma100: sma(prices, params.sma_mid),
        sma200: sma(prices, params.sma_long),
        bollinger_upper: bands.upper,
        bollinger_lower: bands.lower,
        fibonacci_levels: fibonacci_levels(prices),
    }
}
