//! Criterion benchmarks for the analysis hot paths.
//!
//! Benchmarks:
//! 1. Filter design (Butterworth band-pass)
//! 2. Cycle extraction, band-pass and fallback paths
//! 3. Full report (extraction + classification of every point)

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use kwave_core::data::SyntheticParams;
use kwave_core::signal::{extract_cycle, ExtractorConfig};
use kwave_core::{analyze, AnalysisConfig, PriceSeries};

// ── Helpers ──────────────────────────────────────────────────────────

fn make_series(months: usize) -> PriceSeries {
    SyntheticParams {
        months,
        noise: 0.02,
        ..Default::default()
    }
    .generate()
    .expect("synthetic series")
}

// ── Benchmarks ───────────────────────────────────────────────────────

fn bench_design(c: &mut Criterion) {
    let config = ExtractorConfig::default();
    c.bench_function("design_bandpass_order2", |b| {
        b.iter(|| black_box(&config).design())
    });
}

fn bench_extract(c: &mut Criterion) {
    let config = ExtractorConfig::default();
    let mut group = c.benchmark_group("extract_cycle");
    for months in [120, 600, 1200, 3600] {
        let prices = make_series(months).prices();
        group.bench_with_input(BenchmarkId::from_parameter(months), &prices, |b, p| {
            b.iter(|| extract_cycle(black_box(p), &config))
        });
    }
    group.finish();
}

fn bench_analyze(c: &mut Criterion) {
    let series = make_series(1200);
    let config = AnalysisConfig::default();
    c.bench_function("analyze_1200_months", |b| {
        b.iter(|| analyze("bench", black_box(&series), &config, Some(0.5)))
    });
}

criterion_group!(benches, bench_design, bench_extract, bench_analyze);
criterion_main!(benches);
