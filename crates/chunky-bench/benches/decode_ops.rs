//! Criterion benchmarks for whole-replay decoding.

use std::hint::black_box;

use chunky_bench::{match_profile, stress_profile};
use chunky_replay::{decode, decode_with_stats, DecodeConfig};
use chunky_test_utils::fixtures::one_vs_one;
use criterion::{criterion_group, criterion_main, Criterion, Throughput};

/// Benchmark: decode the small hand-written 1v1 fixture.
fn bench_decode_fixture(c: &mut Criterion) {
    let bytes = one_vs_one().build();
    c.bench_function("decode_fixture", |b| {
        b.iter(|| black_box(decode(black_box(&bytes)).unwrap()));
    });
}

/// Benchmark: decode a 20-minute 1v1 and a 60-minute 4v4.
fn bench_decode_profiles(c: &mut Criterion) {
    let mut group = c.benchmark_group("decode_profile");
    for (name, bytes) in [
        ("1v1_20min", match_profile(42).build()),
        ("4v4_60min", stress_profile(42).build()),
    ] {
        group.throughput(Throughput::Bytes(bytes.len() as u64));
        group.bench_function(name, |b| {
            b.iter(|| black_box(decode(black_box(&bytes)).unwrap()));
        });
    }
    group.finish();
}

/// Benchmark: decode with statistics, which also counts unknown actions.
fn bench_decode_with_stats(c: &mut Criterion) {
    let bytes = match_profile(42).build();
    let config = DecodeConfig::default();
    c.bench_function("decode_with_stats_1v1_20min", |b| {
        b.iter(|| black_box(decode_with_stats(black_box(&bytes), &config).unwrap()));
    });
}

criterion_group!(
    benches,
    bench_decode_fixture,
    bench_decode_profiles,
    bench_decode_with_stats
);
criterion_main!(benches);
