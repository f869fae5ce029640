//! Alert records produced by the signal classifier.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

/// Severity/colour of an alert.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlertKind {
    Warning,
    Success,
    Info,
}

impl AlertKind {
    /// Badge label shown next to an alert.
    pub fn label(&self) -> &'static str {
        match self {
            AlertKind::Warning => "Attention",
            AlertKind::Success => "Opportunity",
            AlertKind::Info => "Info",
        }
    }
}

impl fmt::Display for AlertKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            AlertKind::Warning => "warning",
            AlertKind::Success => "success",
            AlertKind::Info => "info",
        };
        write!(f, "{s}")
    }
}

/// Which classifier rule produced an alert.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlertRule {
    RsiOverbought,
    RsiOversold,
    StrongMomentum,
    GoldenCross,
    DeathCross,
}

impl AlertRule {
    pub fn slug(&self) -> &'static str {
        match self {
            AlertRule::RsiOverbought => "rsi-overbought",
            AlertRule::RsiOversold => "rsi-oversold",
            AlertRule::StrongMomentum => "momentum-strong",
            AlertRule::GoldenCross => "golden-cross",
            AlertRule::DeathCross => "death-cross",
        }
    }
}

/// Alert identifier, unique within a process.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AlertId(pub String);

static ALERT_SEQ: AtomicU64 = AtomicU64::new(0);

impl AlertId {
    /// `{rule-slug}-{millis}-{seq}`; the sequence disambiguates same-millisecond alerts.
    pub fn generate(rule: AlertRule, at: DateTime<Utc>) -> Self {
        let seq = ALERT_SEQ.fetch_add(1, Ordering::Relaxed);
        Self(format!("{}-{}-{seq}", rule.slug(), at.timestamp_millis()))
    }
}

impl fmt::Display for AlertId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlertRecord {
    pub id: AlertId,
    pub kind: AlertKind,
    pub rule: AlertRule,
    pub message: String,
    pub timestamp: DateTime<Utc>,
}

impl AlertRecord {
    pub fn new(rule: AlertRule, kind: AlertKind, message: String, at: DateTime<Utc>) -> Self {
        Self {
            id: AlertId::generate(rule, at),
            kind,
            rule,
            message,
            timestamp: at,
        }
    }
}
