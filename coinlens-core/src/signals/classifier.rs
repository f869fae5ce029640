//! Alert classifier: maps an indicator snapshot to alert records.
//!
//! Rules are evaluated independently; several may fire for one snapshot.
//! Sentinel snapshots (RSI 50, momentum 0, SMAs 0) fire nothing.

use crate::domain::{AlertKind, AlertRecord, AlertRule};
use crate::indicators::IndicatorSnapshot;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Thresholds for each rule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AlertThresholds {
    pub rsi_overbought: f64,
    pub rsi_oversold: f64,
    /// Absolute percent momentum above which a trend is called strong.
    pub strong_momentum: f64,
    /// sma_short / sma_long ratio above which a golden cross fires.
    pub golden_cross_ratio: f64,
    /// sma_short / sma_long ratio below which a death cross fires.
    pub death_cross_ratio: f64,
}

impl Default for AlertThresholds {
    fn default() -> Self {
        Self {
            rsi_overbought: 70.0,
            rsi_oversold: 30.0,
            strong_momentum: 10.0,
            golden_cross_ratio: 1.02,
            death_cross_ratio: 0.98,
        }
    }
}

/// A rule that fired, before it is stamped into an `AlertRecord`.
#[derive(Debug, Clone, PartialEq)]
pub struct RuleHit {
    pub rule: AlertRule,
    pub kind: AlertKind,
    pub message: String,
}

#[derive(Debug, Clone)]
pub struct AlertClassifier {
    asset_label: String,
    thresholds: AlertThresholds,
}

impl AlertClassifier {
    pub fn new(asset_label: impl Into<String>) -> Self {
        Self::with_thresholds(asset_label, AlertThresholds::default())
    }

    pub fn with_thresholds(asset_label: impl Into<String>, thresholds: AlertThresholds) -> Self {
        Self {
            asset_label: asset_label.into(),
            thresholds,
        }
    }

    pub fn thresholds(&self) -> &AlertThresholds {
        &self.thresholds
    }

    /// Rules that fire for this snapshot, in table order.
    pub fn evaluate(&self, s: &IndicatorSnapshot) -> Vec<RuleHit> {
        let t = &self.thresholds;
        let asset = &self.asset_label;
        let mut hits = Vec::new();

        if s.rsi > t.rsi_overbought {
            hits.push(RuleHit {
                rule: AlertRule::RsiOverbought,
                kind: AlertKind::Warning,
                message: format!("RSI at {:.2} - {asset} may be overbought", s.rsi),
            });
        }
        if s.rsi < t.rsi_oversold {
            hits.push(RuleHit {
                rule: AlertRule::RsiOversold,
                kind: AlertKind::Success,
                message: format!(
                    "RSI at {:.2} - {asset} may be oversold (opportunity)",
                    s.rsi
                ),
            });
        }
        if s.momentum.abs() > t.strong_momentum {
            let direction = if s.momentum > 0.0 { "up" } else { "down" };
            hits.push(RuleHit {
                rule: AlertRule::StrongMomentum,
                kind: AlertKind::Info,
                message: format!(
                    "Strong momentum of {:.2}% - {direction}trend established for {asset}",
                    s.momentum
                ),
            });
        }

        // A zero long SMA is the insufficient-data sentinel, not a price.
        if s.sma200 > 0.0 {
            if s.sma50 > s.sma200 * t.golden_cross_ratio {
                hits.push(RuleHit {
                    rule: AlertRule::GoldenCross,
                    kind: AlertKind::Success,
                    message: format!("Golden cross on {asset} - SMA 50 crossed above SMA 200"),
                });
            }
            if s.sma50 > 0.0 && s.sma50 < s.sma200 * t.death_cross_ratio {
                hits.push(RuleHit {
                    rule: AlertRule::DeathCross,
                    kind: AlertKind::Warning,
                    message: format!("Death cross on {asset} - SMA 50 crossed below SMA 200"),
                });
            }
        }

        hits
    }

    /// Stamp every firing rule with a fresh id and the given time.
    pub fn classify(&self, snapshot: &IndicatorSnapshot, now: DateTime<Utc>) -> Vec<AlertRecord> {
        self.evaluate(snapshot)
            .into_iter()
            .map(|hit| AlertRecord::new(hit.rule, hit.kind, hit.message, now))
            .collect()
    }
}
