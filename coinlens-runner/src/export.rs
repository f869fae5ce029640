//! Scan report export.
//!
//! - **JSON**: full reports, pretty-printed
//! - **CSV**: one flat row per asset for spreadsheets

use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use anyhow::{Context, Result};

use crate::scan::AssetReport;

// ─── JSON export ────────────────────────────────────────────────────

pub fn reports_to_json(reports: &[AssetReport]) -> Result<String> {
    serde_json::to_string_pretty(reports).context("failed to serialize reports to JSON")
}

pub fn write_json(reports: &[AssetReport], path: &Path) -> Result<()> {
    let file = File::create(path).with_context(|| format!("failed to create {}", path.display()))?;
    serde_json::to_writer_pretty(BufWriter::new(file), reports)
        .with_context(|| format!("failed to write JSON to {}", path.display()))
}

// ─── CSV export ─────────────────────────────────────────────────────

const CSV_HEADER: [&str; 16] = [
    "asset",
    "source",
    "points",
    "last_price",
    "rsi",
    "momentum",
    "mfi",
    "sma50",
    "sma100",
    "sma200",
    "bollinger_upper",
    "bollinger_lower",
    "signal",
    "rsi_zone",
    "trend",
    "alerts",
];

fn csv_rows<W: std::io::Write>(wtr: &mut csv::Writer<W>, reports: &[AssetReport]) -> Result<()> {
    wtr.write_record(CSV_HEADER)?;
    for r in reports {
        let s = &r.snapshot;
        wtr.write_record([
            r.asset.clone(),
            r.source.to_string(),
            r.points.to_string(),
            format!("{:.8}", r.last_price),
            format!("{:.4}", s.rsi),
            format!("{:.4}", s.momentum),
            format!("{:.4}", s.mfi),
            format!("{:.8}", s.sma50),
            format!("{:.8}", s.sma100),
            format!("{:.8}", s.sma200),
            format!("{:.8}", s.bollinger_upper),
            format!("{:.8}", s.bollinger_lower),
            r.summary.composite.to_string(),
            format!("{:?}", r.summary.rsi_zone),
            format!("{:?}", r.summary.trend_bias),
            r.alerts
                .iter()
                .map(|a| a.rule.slug())
                .collect::<Vec<_>>()
                .join("|"),
        ])?;
    }
    wtr.flush()?;
    Ok(())
}

pub fn reports_to_csv(reports: &[AssetReport]) -> Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);
    csv_rows(&mut wtr, reports)?;
    let bytes = wtr.into_inner().context("failed to finish CSV")?;
    String::from_utf8(bytes).context("CSV output is not UTF-8")
}

pub fn write_csv(reports: &[AssetReport], path: &Path) -> Result<()> {
    let mut wtr = csv::Writer::from_path(path)
        .with_context(|| format!("failed to create {}", path.display()))?;
    csv_rows(&mut wtr, reports).with_context(|| format!("failed to write CSV to {}", path.display()))
}
