//! Daily report signals.
//!
//! A lighter rule set than the alert classifier: RSI extremes and a ±5%
//! momentum band. Not timestamped and never stored in the alert history.

use crate::domain::AlertKind;
use crate::indicators::IndicatorSnapshot;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportSignal {
    pub kind: AlertKind,
    pub message: String,
}

impl ReportSignal {
    fn new(kind: AlertKind, message: &str) -> Self {
        Self {
            kind,
            message: message.to_string(),
        }
    }
}

pub fn daily_signals(s: &IndicatorSnapshot) -> Vec<ReportSignal> {
    let mut out = Vec::new();

    if s.rsi > 70.0 {
        out.push(ReportSignal::new(
            AlertKind::Warning,
            "RSI indicates overbought - possible correction ahead",
        ));
    } else if s.rsi < 30.0 {
        out.push(ReportSignal::new(
            AlertKind::Success,
            "RSI indicates oversold - possible recovery",
        ));
    }

    if s.momentum > 5.0 {
        out.push(ReportSignal::new(
            AlertKind::Success,
            "Positive momentum - uptrend",
        ));
    } else if s.momentum < -5.0 {
        out.push(ReportSignal::new(
            AlertKind::Warning,
            "Negative momentum - downtrend",
        ));
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snap(rsi: f64, momentum: f64) -> IndicatorSnapshot {
        IndicatorSnapshot {
            rsi,
            momentum,
            ..IndicatorSnapshot::neutral()
        }
    }

    #[test]
    fn quiet_market_has_no_signals() {
        assert!(daily_signals(&snap(50.0, 0.0)).is_empty());
    }

    #[test]
    fn overbought_with_uptrend() {
        let out = daily_signals(&snap(75.0, 6.0));
        assert_eq!(out.len(), 2);
        assert_eq!(out[0].kind, AlertKind::Warning);
        assert_eq!(out[1].kind, AlertKind::Success);
    }

    #[test]
    fn oversold_with_downtrend() {
        let out = daily_signals(&snap(20.0, -8.0));
        assert_eq!(out[0].kind, AlertKind::Success);
        assert!(out[1].message.contains("downtrend"));
    }
}
