//! Composite buy/sell/neutral signal and qualitative zones for summary views.

use crate::indicators::IndicatorSnapshot;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CompositeSignal {
    Buy,
    Sell,
    Neutral,
}

impl fmt::Display for CompositeSignal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            CompositeSignal::Buy => "BUY",
            CompositeSignal::Sell => "SELL",
            CompositeSignal::Neutral => "NEUTRAL",
        };
        write!(f, "{s}")
    }
}

/// Buy is checked first, then sell; the conditions overlap.
pub fn composite_signal(s: &IndicatorSnapshot) -> CompositeSignal {
    if s.rsi < 70.0 && s.momentum > 0.0 && s.sma50 > s.sma200 {
        CompositeSignal::Buy
    } else if s.rsi > 70.0 || s.momentum < -5.0 {
        CompositeSignal::Sell
    } else {
        CompositeSignal::Neutral
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RsiZone {
    Overbought,
    Oversold,
    Neutral,
}

impl RsiZone {
    pub fn of(rsi: f64) -> Self {
        if rsi > 70.0 {
            RsiZone::Overbought
        } else if rsi < 30.0 {
            RsiZone::Oversold
        } else {
            RsiZone::Neutral
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MomentumStrength {
    Strong,
    Moderate,
    Weak,
}

impl MomentumStrength {
    pub fn of(momentum: f64) -> Self {
        let m = momentum.abs();
        if m > 10.0 {
            MomentumStrength::Strong
        } else if m > 5.0 {
            MomentumStrength::Moderate
        } else {
            MomentumStrength::Weak
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Bias {
    Bullish,
    Bearish,
    Neutral,
}

impl Bias {
    /// Momentum bias: beyond ±5% is directional.
    pub fn of_momentum(momentum: f64) -> Self {
        if momentum > 5.0 {
            Bias::Bullish
        } else if momentum < -5.0 {
            Bias::Bearish
        } else {
            Bias::Neutral
        }
    }

    /// Trend bias from the short vs long SMA. Never neutral.
    pub fn of_trend(sma_short: f64, sma_long: f64) -> Self {
        if sma_short > sma_long {
            Bias::Bullish
        } else {
            Bias::Bearish
        }
    }
}

/// Every qualitative reading of a snapshot, for summary tables.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SignalSummary {
    pub composite: CompositeSignal,
    pub rsi_zone: RsiZone,
    pub momentum_strength: MomentumStrength,
    pub momentum_bias: Bias,
    pub trend_bias: Bias,
}

impl SignalSummary {
    pub fn of(s: &IndicatorSnapshot) -> Self {
        Self {
            composite: composite_signal(s),
            rsi_zone: RsiZone::of(s.rsi),
            momentum_strength: MomentumStrength::of(s.momentum),
            momentum_bias: Bias::of_momentum(s.momentum),
            trend_bias: Bias::of_trend(s.sma50, s.sma200),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snap(rsi: f64, momentum: f64, sma50: f64, sma200: f64) -> IndicatorSnapshot {
        IndicatorSnapshot {
            rsi,
            momentum,
            sma50,
            sma200,
            ..IndicatorSnapshot::neutral()
        }
    }

    #[test]
    fn buy_when_all_bullish() {
        assert_eq!(composite_signal(&snap(60.0, 2.0, 110.0, 100.0)), CompositeSignal::Buy);
    }

    #[test]
    fn sell_on_overbought() {
        assert_eq!(composite_signal(&snap(75.0, 2.0, 110.0, 100.0)), CompositeSignal::Sell);
    }

    #[test]
    fn sell_on_negative_momentum() {
        assert_eq!(composite_signal(&snap(50.0, -6.0, 90.0, 100.0)), CompositeSignal::Sell);
    }

    #[test]
    fn rsi_at_threshold_is_neutral() {
        // rsi exactly 70 is neither < 70 nor > 70
        assert_eq!(composite_signal(&snap(70.0, 2.0, 110.0, 100.0)), CompositeSignal::Neutral);
    }

    #[test]
    fn neutral_on_sentinels() {
        assert_eq!(composite_signal(&IndicatorSnapshot::neutral()), CompositeSignal::Neutral);
    }

    #[test]
    fn zones() {
        assert_eq!(RsiZone::of(71.0), RsiZone::Overbought);
        assert_eq!(RsiZone::of(29.0), RsiZone::Oversold);
        assert_eq!(RsiZone::of(70.0), RsiZone::Neutral);
        assert_eq!(MomentumStrength::of(-11.0), MomentumStrength::Strong);
        assert_eq!(MomentumStrength::of(6.0), MomentumStrength::Moderate);
        assert_eq!(MomentumStrength::of(5.0), MomentumStrength::Weak);
        assert_eq!(Bias::of_momentum(5.5), Bias::Bullish);
        assert_eq!(Bias::of_momentum(-5.5), Bias::Bearish);
        assert_eq!(Bias::of_momentum(0.0), Bias::Neutral);
        assert_eq!(Bias::of_trend(100.0, 100.0), Bias::Bearish);
    }

    #[test]
    fn summary_collects_readings() {
        let s = SignalSummary::of(&snap(25.0, 12.0, 110.0, 100.0));
        assert_eq!(s.composite, CompositeSignal::Buy);
        assert_eq!(s.rsi_zone, RsiZone::Oversold);
        assert_eq!(s.momentum_strength, MomentumStrength::Strong);
        assert_eq!(s.trend_bias, Bias::Bullish);
    }
}
