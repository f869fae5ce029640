//! Swing wave analysis over the most recent prices.
//!
//! Counts local peaks and troughs over the last 8 prices. Five or more
//! turning points classify the window as an impulse (odd count) or a
//! corrective (even count) phase. Fewer turning points → no reading.

use super::stats::tail;
use serde::{Deserialize, Serialize};

const WAVE_WINDOW: usize = 8;
const MIN_TURNING_POINTS: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WavePhase {
    Impulse,
    Corrective,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WaveTrend {
    Uptrend,
    Downtrend,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WaveAnalysis {
    pub phase: WavePhase,
    pub trend: WaveTrend,
    pub wave_count: usize,
    /// 0..=100
    pub confidence: f64,
}

pub fn wave_analysis(data: &[f64]) -> Option<WaveAnalysis> {
    if data.len() < WAVE_WINDOW {
        return None;
    }
    let recent = tail(data, WAVE_WINDOW);

    let wave_count = recent
        .windows(3)
        .filter(|w| {
            let is_peak = w[1] > w[0] && w[1] > w[2];
            let is_trough = w[1] < w[0] && w[1] < w[2];
            is_peak || is_trough
        })
        .count();

    if wave_count < MIN_TURNING_POINTS {
        return None;
    }

    let trend = if recent[WAVE_WINDOW - 1] > recent[0] {
        WaveTrend::Uptrend
    } else {
        WaveTrend::Downtrend
    };
    let phase = if wave_count % 2 == 1 {
        WavePhase::Impulse
    } else {
        WavePhase::Corrective
    };
    let confidence = (wave_count as f64 / MIN_TURNING_POINTS as f64 * 100.0).min(100.0);

    Some(WaveAnalysis {
        phase,
        trend,
        wave_count,
        confidence,
    })
}
