//! Scan orchestration against in-process providers (no network).

use coinlens_core::data::{DataError, DataSource, PriceProvider, SyntheticProvider};
use coinlens_core::domain::{PricePoint, PriceSeries};
use coinlens_runner::export::{reports_to_csv, write_csv, write_json};
use coinlens_runner::{run_scan, AssetOutcome, CoinLensConfig, NoopProgress, ScanProgress};
use std::sync::Mutex;

/// Fails for any asset whose id starts with "bad", synthetic otherwise.
struct FlakyProvider(SyntheticProvider);

impl PriceProvider for FlakyProvider {
    fn name(&self) -> &str {
        "flaky"
    }

    fn fetch_prices(&self, asset_id: &str, range_days: u32) -> Result<PriceSeries, DataError> {
        if asset_id.starts_with("bad") {
            return Err(DataError::AssetNotFound {
                asset: asset_id.to_string(),
            });
        }
        self.0.fetch_prices(asset_id, range_days)
    }

    fn is_available(&self) -> bool {
        true
    }
}

/// Rising prices: every scan of it fires an overbought alert.
struct RallyProvider;

impl PriceProvider for RallyProvider {
    fn name(&self) -> &str {
        "rally"
    }

    fn fetch_prices(&self, asset_id: &str, range_days: u32) -> Result<PriceSeries, DataError> {
        let points = (0..range_days as i64)
            .map(|i| PricePoint::new(i * 86_400_000, 100.0 + i as f64))
            .collect();
        Ok(PriceSeries::new(asset_id, points, DataSource::Fixture)?)
    }

    fn is_available(&self) -> bool {
        true
    }
}

#[derive(Default)]
struct Recorder {
    rounds: Mutex<Vec<Vec<String>>>,
    completed: Mutex<Vec<String>>,
    finished: Mutex<bool>,
}

impl ScanProgress for Recorder {
    fn on_round_start(&self, _round: usize, _total: usize, assets: &[String]) {
        self.rounds.lock().unwrap().push(assets.to_vec());
    }

    fn on_asset_complete(&self, outcome: &AssetOutcome) {
        self.completed.lock().unwrap().push(outcome.asset().to_string());
    }

    fn on_scan_complete(&self, _result: &coinlens_runner::ScanResult) {
        *self.finished.lock().unwrap() = true;
    }
}

fn config(batch_size: usize) -> CoinLensConfig {
    let mut config = CoinLensConfig::default();
    config.scan.batch_size = batch_size;
    config.scan.batch_delay_ms = 0;
    config.scan.range_days = 220;
    config
}

fn names(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| s.to_string()).collect()
}

#[test]
fn failures_do_not_abort_scan() {
    let assets = names(&["bitcoin", "bad-coin", "ethereum", "bad-two", "solana"]);
    let provider = FlakyProvider(SyntheticProvider::new(1_700_000_000_000));
    let result = run_scan(&assets, &provider, &config(2), &NoopProgress).unwrap();

    let ok: Vec<&str> = result.reports.iter().map(|r| r.asset.as_str()).collect();
    assert_eq!(ok, vec!["bitcoin", "ethereum", "solana"]);
    assert_eq!(result.failures.len(), 2);
    assert_eq!(result.failures[0].asset, "bad-coin");
    assert!(result.failures[0].error.contains("not found"));
    assert_eq!(result.rounds, 3);
}

#[test]
fn progress_sees_every_round_and_asset() {
    let assets = names(&["a", "b", "c", "d", "e", "f", "g"]);
    let recorder = Recorder::default();
    let provider = SyntheticProvider::new(0);
    run_scan(&assets, &provider, &config(5), &recorder).unwrap();

    let rounds = recorder.rounds.lock().unwrap();
    assert_eq!(rounds.len(), 2);
    assert_eq!(rounds[0], names(&["a", "b", "c", "d", "e"]));
    assert_eq!(rounds[1], names(&["f", "g"]));
    assert_eq!(*recorder.completed.lock().unwrap(), assets);
    assert!(*recorder.finished.lock().unwrap());
}

#[test]
fn history_is_bounded_by_capacity() {
    let assets: Vec<String> = (0..15).map(|i| format!("coin-{i}")).collect();
    let mut cfg = config(5);
    cfg.alerts.history_capacity = 10;
    let result = run_scan(&assets, &RallyProvider, &cfg, &NoopProgress).unwrap();

    assert!(result.reports.iter().all(|r| !r.alerts.is_empty()));
    assert_eq!(result.history.len(), 10);
    let all: Vec<_> = result
        .reports
        .iter()
        .flat_map(|r| r.alerts.iter().cloned())
        .collect();
    assert_eq!(result.history.to_vec(), all[all.len() - 10..].to_vec());
}

#[test]
fn huge_history_capacity_is_accepted() {
    let mut cfg = config(5);
    cfg.alerts.history_capacity = 1_000_000_000_000_000_000;
    cfg.validate().unwrap();
    let assets = names(&["bitcoin", "ethereum"]);
    let result = run_scan(&assets, &RallyProvider, &cfg, &NoopProgress).unwrap();

    let total: usize = result.reports.iter().map(|r| r.alerts.len()).sum();
    assert_eq!(result.history.len(), total);
    assert_eq!(result.history.capacity(), 1_000_000_000_000_000_000);
}

#[test]
fn invalid_config_is_rejected() {
    let mut cfg = config(5);
    cfg.indicators.rsi_period = 0;
    let assets = names(&["bitcoin"]);
    assert!(run_scan(&assets, &SyntheticProvider::new(0), &cfg, &NoopProgress).is_err());
}

#[test]
fn exports_write_files() {
    let assets = names(&["bitcoin", "ethereum"]);
    let result = run_scan(&assets, &SyntheticProvider::new(0), &config(5), &NoopProgress).unwrap();

    let dir = tempfile::tempdir().unwrap();
    let json_path = dir.path().join("scan.json");
    let csv_path = dir.path().join("scan.csv");
    write_json(&result.reports, &json_path).unwrap();
    write_csv(&result.reports, &csv_path).unwrap();

    let json: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&json_path).unwrap()).unwrap();
    assert_eq!(json.as_array().unwrap().len(), 2);
    assert_eq!(json[0]["asset"], "bitcoin");
    assert_eq!(json[0]["source"], "synthetic");
    assert!(json[0]["snapshot"]["sma200"].as_f64().unwrap() > 0.0);

    let csv_text = std::fs::read_to_string(&csv_path).unwrap();
    assert_eq!(csv_text, reports_to_csv(&result.reports).unwrap());
    let mut lines = csv_text.lines();
    assert!(lines.next().unwrap().starts_with("asset,source,points,last_price,rsi"));
    assert!(lines.next().unwrap().starts_with("bitcoin,synthetic,220,"));
    assert_eq!(lines.count(), 1);
}
