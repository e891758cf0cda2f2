//! Criterion benchmarks for the dataset transform.
//!
//! Benchmarks:
//! 1. Feature pipeline (all five families plus trim)
//! 2. Series helpers (EMA, rolling std, RSI)
//! 3. Full build (features, labels, windows)

use chrono::{TimeZone, Utc};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use seqlab_core::indicators::{ema_of_series, rolling_std, rsi_of_series};
use seqlab_core::{build_dataset, Bar, DatasetConfig, FeaturePipeline, Table};

// ── Helpers ──────────────────────────────────────────────────────────

fn make_bars(n: usize) -> Vec<Bar> {
    let base = Utc.with_ymd_and_hms(2020, 1, 2, 0, 0, 0).unwrap();
    (0..n)
        .map(|i| {
            let close = 100.0 + (i as f64 * 0.1).sin() * 10.0;
            let open = close - 0.3;
            Bar {
                timestamp: base + chrono::Duration::days(i as i64),
                open,
                high: close + 1.5,
                low: close - 1.5,
                close,
                volume: 1_000_000.0 + (i % 500_000) as f64,
            }
        })
        .collect()
}

// ── Benchmarks ───────────────────────────────────────────────────────

fn bench_feature_pipeline(c: &mut Criterion) {
    let mut group = c.benchmark_group("feature_pipeline");
    let pipeline = FeaturePipeline::default();
    for n in [500, 2_000, 10_000] {
        let table = Table::from_bars(&make_bars(n));
        group.bench_with_input(BenchmarkId::from_parameter(n), &table, |b, table| {
            b.iter(|| pipeline.run(black_box(table)).unwrap())
        });
    }
    group.finish();
}

fn bench_series(c: &mut Criterion) {
    let closes: Vec<f64> = make_bars(5_000).iter().map(|b| b.close).collect();
    let mut group = c.benchmark_group("series");
    group.bench_function("ema_100", |b| b.iter(|| ema_of_series(black_box(&closes), 100)));
    group.bench_function("rolling_std_14", |b| {
        b.iter(|| rolling_std(black_box(&closes), 14))
    });
    group.bench_function("rsi_14", |b| b.iter(|| rsi_of_series(black_box(&closes), 14)));
    group.finish();
}

fn bench_full_build(c: &mut Criterion) {
    let table = Table::from_bars(&make_bars(2_000));
    let config = DatasetConfig::with_window_size(30);
    c.bench_function("build_dataset_2000x30", |b| {
        b.iter(|| build_dataset(black_box(&table), &config).unwrap())
    });
}

criterion_group!(benches, bench_feature_pipeline, bench_series, bench_full_build);
criterion_main!(benches);
