//! Simple Moving Average (SMA).
//!
//! Mean of the last `period` prices.
//! Insufficient data (fewer than `period` prices) → 0.

use super::stats::{mean, tail};
use super::Indicator;

/// SMA over the last `period` values; 0 when `data.len() < period` or `period == 0`.
pub fn sma(data: &[f64], period: usize) -> f64 {
    if period == 0 || data.len() < period {
        return 0.0;
    }
    mean(tail(data, period))
}

#[derive(Debug, Clone)]
pub struct Sma {
    period: usize,
    name: String,
}

impl Sma {
    pub fn new(period: usize) -> Self {
        Self {
            period,
            name: format!("sma_{period}"),
        }
    }
}

impl Indicator for Sma {
    fn name(&self) -> &str {
        &self.name
    }

    fn lookback(&self) -> usize {
        self.period
    }

    fn compute(&self, prices: &[f64]) -> f64 {
        sma(prices, self.period)
    }
}
