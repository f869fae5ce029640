//! Signal and alert classification.
//!
//! - `classifier`: threshold rules that turn a snapshot into alert records
//! - `history`: bounded, de-duplicated alert history (FIFO eviction)
//! - `composite`: buy/sell/neutral decision and qualitative zones
//! - `report`: the daily-report signal set

pub mod classifier;
pub mod composite;
pub mod history;
pub mod report;

pub use classifier::{AlertClassifier, AlertThresholds, RuleHit};
pub use composite::{
    composite_signal, Bias, CompositeSignal, MomentumStrength, RsiZone, SignalSummary,
};
pub use history::{AlertHistory, DEFAULT_HISTORY_CAPACITY};
pub use report::{daily_signals, ReportSignal};
