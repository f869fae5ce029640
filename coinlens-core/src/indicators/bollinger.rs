//! Bollinger Bands: moving average +/- standard deviation multiplier.
//!
//! - Middle: SMA(period)
//! - Upper: middle + mult * stddev(period)
//! - Lower: middle - mult * stddev(period)
//!
//! Uses population stddev (divide by N).
//! Insufficient data (fewer than `period` prices) → all bands 0.

use super::sma::sma;
use super::stats::{population_stddev, tail};
use serde::{Deserialize, Serialize};

pub const DEFAULT_BOLLINGER_PERIOD: usize = 20;
pub const DEFAULT_BOLLINGER_MULTIPLIER: f64 = 2.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BollingerBands {
    pub upper: f64,
    pub middle: f64,
    pub lower: f64,
}

impl BollingerBands {
    /// Band width as a percentage of `reference` (0 when the reference is 0).
    pub fn width_pct(&self, reference: f64) -> f64 {
        if reference == 0.0 {
            return 0.0;
        }
        (self.upper - self.lower) / reference * 100.0
    }
}

pub fn bollinger_bands(data: &[f64], period: usize, multiplier: f64) -> BollingerBands {
    if period == 0 || data.len() < period {
        return BollingerBands {
            upper: 0.0,
            middle: 0.0,
            lower: 0.0,
        };
    }

    let middle = sma(data, period);
    let stddev = population_stddev(tail(data, period), middle);
    BollingerBands {
        upper: middle + multiplier * stddev,
        middle,
        lower: middle - multiplier * stddev,
    }
}
