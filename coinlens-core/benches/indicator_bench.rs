//! Criterion benchmarks for the indicator engine.
//!
//! 1. Full snapshot at typical series lengths
//! 2. Single-value indicator set via `read_all`
//! 3. Alert classification of a snapshot

use chrono::{TimeZone, Utc};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use coinlens_core::indicators::{read_all, snapshot, IndicatorParams};
use coinlens_core::signals::AlertClassifier;

fn make_prices(n: usize) -> Vec<f64> {
    (0..n)
        .map(|i| 30_000.0 + (i as f64 * 0.1).sin() * 1_500.0 + i as f64 * 5.0)
        .collect()
}

fn bench_snapshot(c: &mut Criterion) {
    let mut group = c.benchmark_group("snapshot");
    for &len in &[100, 200, 365, 1000] {
        let prices = make_prices(len);
        group.bench_with_input(BenchmarkId::new("default_params", len), &len, |b, _| {
            b.iter(|| snapshot(black_box(&prices)));
        });
    }
    group.finish();
}

fn bench_indicator_set(c: &mut Criterion) {
    let prices = make_prices(365);
    let set = IndicatorParams::default().indicator_set();
    c.bench_function("read_all_365", |b| {
        b.iter(|| read_all(black_box(&set), black_box(&prices)));
    });
}

fn bench_classify(c: &mut Criterion) {
    let snap = snapshot(&make_prices(365));
    let classifier = AlertClassifier::new("BTC");
    let now = Utc.timestamp_millis_opt(1_700_000_000_000).unwrap();
    c.bench_function("classify", |b| {
        b.iter(|| classifier.classify(black_box(&snap), now));
    });
}

criterion_group!(benches, bench_snapshot, bench_indicator_set, bench_classify);
criterion_main!(benches);
