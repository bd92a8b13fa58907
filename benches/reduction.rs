//! Performance measurement for the reduction loop at varying tile budgets

// Criterion macros generate undocumented functions
#![allow(missing_docs)]

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use ndarray::Array3;
use std::hint::black_box;
use tilepress::reduction::{MergeMethod, ReductionConfig, reduce_image};

// Deterministic noisy image with many distinct blocks
fn synthetic_image(height: usize, width: usize) -> Array3<f32> {
    Array3::from_shape_fn((height, width, 3), |(y, x, c)| {
        ((y * 7919 + x * 104_729 + c * 1_299_709) % 256) as f32
    })
}

/// Measures a full reduction as the target shrinks from most of the tile
/// set down to a quarter of it
fn bench_reduce_by_target(c: &mut Criterion) {
    let mut group = c.benchmark_group("reduce_by_target");
    let image = synthetic_image(128, 128);
    // 16x16 = 256 distinct blocks
    for &target in &[192, 128, 64] {
        let config = ReductionConfig {
            target_tiles: target,
            sacrifice_enabled: false,
            sacrifice_ratio: 0.0,
            method: MergeMethod::Substitution,
        };
        group.bench_with_input(BenchmarkId::from_parameter(target), &target, |b, _| {
            b.iter(|| {
                let result = reduce_image(black_box(&image), &config, |_, _| {});
                black_box(result)
            });
        });
    }
    group.finish();
}

/// Measures the merging method against substitution at a fixed budget
fn bench_reduce_methods(c: &mut Criterion) {
    let mut group = c.benchmark_group("reduce_methods");
    let image = synthetic_image(96, 96);
    for method in [MergeMethod::Substitution, MergeMethod::Merging] {
        let config = ReductionConfig {
            target_tiles: 48,
            sacrifice_enabled: false,
            sacrifice_ratio: 0.0,
            method,
        };
        let name = match method {
            MergeMethod::Substitution => "substitution",
            MergeMethod::Merging => "merging",
        };
        group.bench_function(name, |b| {
            b.iter(|| {
                let result = reduce_image(black_box(&image), &config, |_, _| {});
                black_box(result)
            });
        });
    }
    group.finish();
}

criterion_group!(benches, bench_reduce_by_target, bench_reduce_methods);
criterion_main!(benches);
