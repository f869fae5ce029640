//! Momentum: percent change over a lookback window.
//!
//! momentum = (last - prior) / prior * 100, where `prior` is the oldest price
//! of the trailing `period`-length window (`data[len - period]`).
//! Insufficient data (fewer than `period` prices) → 0.

use super::Indicator;

pub const DEFAULT_MOMENTUM_PERIOD: usize = 10;

pub fn momentum(data: &[f64], period: usize) -> f64 {
    let n = data.len();
    if period == 0 || n < period {
        return 0.0;
    }
    let prior = data[n - period];
    let last = data[n - 1];
    if prior == 0.0 {
        return 0.0;
    }
    (last - prior) / prior * 100.0
}

#[derive(Debug, Clone)]
pub struct Momentum {
    period: usize,
    name: String,
}

impl Momentum {
    pub fn new(period: usize) -> Self {
        Self {
            period,
            name: format!("momentum_{period}"),
        }
    }
}

impl Default for Momentum {
    fn default() -> Self {
        Self::new(DEFAULT_MOMENTUM_PERIOD)
    }
}

impl Indicator for Momentum {
    fn name(&self) -> &str {
        &self.name
    }

    fn lookback(&self) -> usize {
        self.period
    }

    fn compute(&self, prices: &[f64]) -> f64 {
        momentum(prices, self.period)
    }
}
