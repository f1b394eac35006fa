//! Benchmark for the report pipeline.
//!
//! Measures the performance of:
//! 1. Decoding benchmark names with a preset grammar
//! 2. Grouping decoded records into series
//! 3. Running a full preset plan, metrics and chart descriptions included

use bench_charts::plan::presets;
use bench_charts::{BenchmarkRecord, NameDecoder, build, key_by};
use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use std::hint::black_box;

/// A histogram-simd document with `sizes` sizes per (method, scenario).
fn histogram_document(sizes: u32) -> Vec<BenchmarkRecord> {
    let mut records = Vec::new();
    for scenario in ["Random", "Uniform", "Gradient"] {
        for (method, factor) in [("Naive", 4.0), ("SIMD", 1.0)] {
            for exponent in 0..sizes {
                let size = 1u64 << (10 + exponent % 40);
                records.push(BenchmarkRecord::new(
                    format!("BM_Histogram_{method}_{scenario}/{size}"),
                    size as f64 * factor,
                ));
            }
        }
    }
    records
}

fn benchmark_decoding(c: &mut Criterion) {
    let mut group = c.benchmark_group("decoding");
    let grammar = presets::hashmap_grammar();
    let decoder = NameDecoder::new(&grammar).unwrap();

    group.bench_function("simple", |b| {
        b.iter(|| black_box(decoder.decode(black_box("BM_HashMap_Get_No_Collisions/1024"), 1.0)));
    });

    group.bench_function("malformed_size", |b| {
        b.iter(|| black_box(decoder.decode(black_box("BM_HashMap_Get/abc"), 1.0)));
    });

    group.bench_function("untranslated", |b| {
        b.iter(|| black_box(decoder.decode(black_box("BM_HashMap_Put_Few_Collisions/1024"), 1.0)));
    });

    group.finish();
}

fn benchmark_series(c: &mut Criterion) {
    let mut group = c.benchmark_group("series");
    let grammar = presets::histogram_simd_grammar();
    let decoder = NameDecoder::new(&grammar).unwrap();

    for sizes in [8, 32, 128] {
        let decoded = decoder.decode_all(&histogram_document(sizes));
        group.throughput(Throughput::Elements(decoded.records.len() as u64));
        group.bench_with_input(
            BenchmarkId::new("build", sizes),
            &decoded.records,
            |b, records| {
                b.iter(|| black_box(build(records, key_by(&["scenario", "method"]))));
            },
        );
    }

    group.finish();
}

fn benchmark_end_to_end(c: &mut Criterion) {
    let mut group = c.benchmark_group("end_to_end");
    let plan = presets::histogram_simd();

    for sizes in [8, 32, 128] {
        let records = histogram_document(sizes);
        group.throughput(Throughput::Elements(records.len() as u64));
        group.bench_with_input(
            BenchmarkId::new("histogram_simd", sizes),
            &records,
            |b, records| {
                b.iter(|| black_box(plan.run(records).unwrap()));
            },
        );
    }

    group.finish();
}

criterion_group!(
    benches,
    benchmark_decoding,
    benchmark_series,
    benchmark_end_to_end,
);
criterion_main!(benches);
