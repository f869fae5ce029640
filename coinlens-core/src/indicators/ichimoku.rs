//! Ichimoku cloud from closing prices only.
//!
//! Each line is the midpoint of the high and low close over its window:
//! tenkan-sen (9), kijun-sen (26), senkou span B (52).
//! Senkou span A = (tenkan + kijun) / 2. Spans are not displaced forward.
//! Requires at least 52 prices.

use super::stats::midpoint;
use super::TrendSignal;
use serde::{Deserialize, Serialize};

const TENKAN_PERIOD: usize = 9;
const KIJUN_PERIOD: usize = 26;
const SENKOU_B_PERIOD: usize = 52;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Ichimoku {
    pub tenkan_sen: f64,
    pub kijun_sen: f64,
    pub senkou_span_a: f64,
    pub senkou_span_b: f64,
    pub signal: TrendSignal,
}

pub fn ichimoku(data: &[f64]) -> Option<Ichimoku> {
    if data.len() < SENKOU_B_PERIOD {
        return None;
    }

    let tenkan_sen = midpoint(data, TENKAN_PERIOD)?;
    let kijun_sen = midpoint(data, KIJUN_PERIOD)?;
    let senkou_span_a = (tenkan_sen + kijun_sen) / 2.0;
    let senkou_span_b = midpoint(data, SENKOU_B_PERIOD)?;
    let price = *data.last()?;

    let cloud_top = senkou_span_a.max(senkou_span_b);
    let cloud_bottom = senkou_span_a.min(senkou_span_b);

    let signal = if price > cloud_top && tenkan_sen > kijun_sen {
        TrendSignal::Bullish
    } else if price < cloud_bottom && tenkan_sen < kijun_sen {
        TrendSignal::Bearish
    } else {
        TrendSignal::Neutral
    };

    Some(Ichimoku {
        tenkan_sen,
        kijun_sen,
        senkou_span_a,
        senkou_span_b,
        signal,
    })
}
