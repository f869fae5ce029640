//! Relative Strength Index (RSI).
//!
//! Windowed gain/loss ratio over the last `period` price changes (no Wilder
//! smoothing): RSI = 100 - 100 / (1 + avg_gain / avg_loss).
//! Insufficient data (fewer than `period + 1` prices) → 50.
//! Edge cases: avg_loss == 0 → 100 (or 50 if avg_gain is also 0).

use super::Indicator;

pub const DEFAULT_RSI_PERIOD: usize = 14;

pub fn rsi(data: &[f64], period: usize) -> f64 {
    let n = data.len();
    if period == 0 || n <= period {
        return 50.0;
    }

    let mut gains = 0.0;
    let mut losses = 0.0;
    for window in data[n - period - 1..].windows(2) {
        let change = window[1] - window[0];
        if change > 0.0 {
            gains += change;
        } else {
            losses -= change;
        }
    }

    let avg_gain = gains / period as f64;
    let avg_loss = losses / period as f64;
    from_averages(avg_gain, avg_loss)
}

fn from_averages(avg_gain: f64, avg_loss: f64) -> f64 {
    if avg_loss == 0.0 && avg_gain == 0.0 {
        50.0
    } else if avg_loss == 0.0 {
        100.0
    } else {
        100.0 - 100.0 / (1.0 + avg_gain / avg_loss)
    }
}

#[derive(Debug, Clone)]
pub struct Rsi {
    period: usize,
    name: String,
}

impl Rsi {
    pub fn new(period: usize) -> Self {
        Self {
            period,
            name: format!("rsi_{period}"),
        }
    }
}

impl Default for Rsi {
    fn default() -> Self {
        Self::new(DEFAULT_RSI_PERIOD)
    }
}

impl Indicator for Rsi {
    fn name(&self) -> &str {
        &self.name
    }

    fn lookback(&self) -> usize {
        self.period.saturating_add(1)
    }

    fn compute(&self, prices: &[f64]) -> f64 {
        rsi(prices, self.period)
    }
}
