//! Multi-asset scan: fetch → snapshot → alerts, in rate-limited rounds.
//!
//! Assets are split into rounds of `batch_size`. Each round is computed in
//! parallel with rayon, then the scan pauses for `batch_delay_ms` before the
//! next round. A failed asset is recorded and never aborts the scan.

use crate::config::CoinLensConfig;
use chrono::{DateTime, Utc};
use coinlens_core::data::{DataError, DataSource, PriceProvider};
use coinlens_core::domain::{AlertRecord, PriceSeries};
use coinlens_core::indicators::{
    ichimoku, snapshot_with, wave_analysis, Ichimoku, IndicatorParams, IndicatorSnapshot,
    WaveAnalysis,
};
use coinlens_core::signals::{
    daily_signals, AlertClassifier, AlertHistory, ReportSignal, SignalSummary,
};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};
use thiserror::Error;
use tracing::{info, warn};

#[derive(Debug, Error)]
pub enum ScanError {
    #[error("no assets to scan")]
    NoAssets,
    #[error("invalid config: {0}")]
    Config(#[from] crate::config::ConfigError),
}

/// Everything computed for one asset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssetReport {
    pub asset: String,
    pub source: DataSource,
    pub points: usize,
    pub last_price: f64,
    pub snapshot: IndicatorSnapshot,
    pub summary: SignalSummary,
    pub ichimoku: Option<Ichimoku>,
    pub waves: Option<WaveAnalysis>,
    pub daily_signals: Vec<ReportSignal>,
    pub alerts: Vec<AlertRecord>,
}

impl AssetReport {
    pub fn is_synthetic(&self) -> bool {
        self.source == DataSource::Synthetic
    }
}

/// An asset that could not be analysed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssetFailure {
    pub asset: String,
    pub error: String,
}

#[derive(Debug, Clone)]
pub enum AssetOutcome {
    Report(Box<AssetReport>),
    Failed(AssetFailure),
}

impl AssetOutcome {
    pub fn asset(&self) -> &str {
        match self {
            AssetOutcome::Report(r) => &r.asset,
            AssetOutcome::Failed(f) => &f.asset,
        }
    }
}

#[derive(Debug)]
pub struct ScanResult {
    /// Successful reports, in input order.
    pub reports: Vec<AssetReport>,
    pub failures: Vec<AssetFailure>,
    /// Alerts of every report, bounded to the configured capacity.
    pub history: AlertHistory,
    pub rounds: usize,
    pub elapsed_secs: f64,
}

/// Callbacks during a scan. All methods default to no-ops.
pub trait ScanProgress: Sync {
    fn on_round_start(&self, _round: usize, _total_rounds: usize, _assets: &[String]) {}
    fn on_asset_complete(&self, _outcome: &AssetOutcome) {}
    fn on_scan_complete(&self, _result: &ScanResult) {}
}

pub struct NoopProgress;

impl ScanProgress for NoopProgress {}

/// Prints one line per round and per asset to stdout.
pub struct StdoutProgress;

impl ScanProgress for StdoutProgress {
    fn on_round_start(&self, round: usize, total_rounds: usize, assets: &[String]) {
        println!("round {}/{}: {}", round + 1, total_rounds, assets.join(", "));
    }

    fn on_asset_complete(&self, outcome: &AssetOutcome) {
        match outcome {
            AssetOutcome::Report(r) => {
                let tag = if r.is_synthetic() { " [synthetic]" } else { "" };
                println!(
                    "  {:<14} {:>14.4}  rsi {:>6.2}  mom {:>7.2}%  {}{}",
                    r.asset, r.last_price, r.snapshot.rsi, r.snapshot.momentum, r.summary.composite, tag
                );
            }
            AssetOutcome::Failed(f) => println!("  {:<14} failed: {}", f.asset, f.error),
        }
    }

    fn on_scan_complete(&self, result: &ScanResult) {
        println!(
            "scanned {} assets ({} failed) in {} rounds, {:.1}s",
            result.reports.len() + result.failures.len(),
            result.failures.len(),
            result.rounds,
            result.elapsed_secs
        );
    }
}

/// Split assets into rounds. `batch_size` 0 is treated as 1.
pub fn rounds(assets: &[String], batch_size: usize) -> Vec<&[String]> {
    assets.chunks(batch_size.max(1)).collect()
}

/// Compute the full report for one series.
pub fn analyze_series(
    series: &PriceSeries,
    params: &IndicatorParams,
    classifier: &AlertClassifier,
    now: DateTime<Utc>,
) -> AssetReport {
    let prices = series.prices();
    let snapshot = snapshot_with(&prices, params);
    AssetReport {
        asset: series.asset().to_string(),
        source: series.source(),
        points: series.len(),
        last_price: series.latest().map(|p| p.price).unwrap_or(0.0),
        summary: SignalSummary::of(&snapshot),
        ichimoku: ichimoku(&prices),
        waves: wave_analysis(&prices),
        daily_signals: daily_signals(&snapshot),
        alerts: classifier.classify(&snapshot, now),
        snapshot,
    }
}

/// Fetch and analyse one asset.
pub fn analyze_asset(
    asset: &str,
    provider: &dyn PriceProvider,
    config: &CoinLensConfig,
    now: DateTime<Utc>,
) -> Result<AssetReport, DataError> {
    let series = provider.fetch_prices(asset, config.scan.range_days)?;
    let label = asset.to_uppercase();
    let classifier = AlertClassifier::with_thresholds(label, config.alerts.thresholds.clone());
    Ok(analyze_series(&series, &config.indicators, &classifier, now))
}

pub fn run_scan(
    assets: &[String],
    provider: &dyn PriceProvider,
    config: &CoinLensConfig,
    progress: &dyn ScanProgress,
) -> Result<ScanResult, ScanError> {
    if assets.is_empty() {
        return Err(ScanError::NoAssets);
    }
    config.validate()?;

    let start = Instant::now();
    let batches = rounds(assets, config.scan.batch_size);
    let total_rounds = batches.len();
    let delay = Duration::from_millis(config.scan.batch_delay_ms);

    let mut reports = Vec::new();
    let mut failures = Vec::new();

    for (round, &batch) in batches.iter().enumerate() {
        info!(round = round + 1, total_rounds, assets = batch.len(), "scan round");
        progress.on_round_start(round, total_rounds, batch);

        let now = Utc::now();
        let outcomes: Vec<AssetOutcome> = batch
            .par_iter()
            .map(|asset| match analyze_asset(asset, provider, config, now) {
                Ok(report) => AssetOutcome::Report(Box::new(report)),
                Err(e) => {
                    warn!(asset = %asset, error = %e, "asset failed");
                    AssetOutcome::Failed(AssetFailure {
                        asset: asset.clone(),
                        error: e.to_string(),
                    })
                }
            })
            .collect();

        for outcome in outcomes {
            progress.on_asset_complete(&outcome);
            match outcome {
                AssetOutcome::Report(r) => reports.push(*r),
                AssetOutcome::Failed(f) => failures.push(f),
            }
        }

        if round + 1 < total_rounds && !delay.is_zero() {
            std::thread::sleep(delay);
        }
    }

    let mut history = AlertHistory::with_capacity(config.alerts.history_capacity);
    for report in &reports {
        history.extend(report.alerts.iter().cloned());
    }

    let result = ScanResult {
        reports,
        failures,
        history,
        rounds: total_rounds,
        elapsed_secs: start.elapsed().as_secs_f64(),
    };
    progress.on_scan_complete(&result);
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use coinlens_core::data::SyntheticProvider;

    fn assets(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn rounds_chunk_in_order() {
        let a = assets(&["a", "b", "c", "d", "e", "f", "g"]);
        let r = rounds(&a, 3);
        assert_eq!(r.len(), 3);
        assert_eq!(r[0], &a[0..3]);
        assert_eq!(r[2], &a[6..]);
        assert_eq!(rounds(&a, 0).len(), 7);
    }

    #[test]
    fn analyze_series_fills_report() {
        let series = SyntheticProvider::new(0).fetch_prices("bitcoin", 220).unwrap();
        let report = analyze_series(
            &series,
            &IndicatorParams::default(),
            &AlertClassifier::new("BITCOIN"),
            Utc::now(),
        );
        assert_eq!(report.points, 220);
        assert!(report.is_synthetic());
        assert!(report.snapshot.sma200 > 0.0);
        assert!(report.ichimoku.is_some());
        assert_eq!(report.last_price, series.latest().unwrap().price);
    }

    #[test]
    fn empty_asset_list_is_rejected() {
        let config = CoinLensConfig::default();
        let err = run_scan(&[], &SyntheticProvider::new(0), &config, &NoopProgress).unwrap_err();
        assert!(matches!(err, ScanError::NoAssets));
    }
}
