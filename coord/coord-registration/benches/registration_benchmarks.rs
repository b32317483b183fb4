//! Benchmarks for coord-registration operations.
//!
//! Run with: cargo bench -p coord-registration
//!
//! To compare against baseline:
//! 1. First run: cargo bench -p coord-registration -- --save-baseline main
//! 2. After changes: cargo bench -p coord-registration -- --baseline main

#![allow(clippy::unwrap_used, clippy::cast_precision_loss)]

use coord_registration::{AffineTransform, CoordinateMapper, estimate_transform};
use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use nalgebra::{Matrix3, Point3, Vector3};

// =============================================================================
// Test Data Generation
// =============================================================================

/// Points on a slightly twisted helix so no four are coplanar.
fn helix_points(count: usize) -> Vec<Point3<f64>> {
    (0..count)
        .map(|i| {
            let t = i as f64 * 0.37;
            Point3::new(t.cos() * 10.0, t.sin() * 10.0, t * 0.8 + (t * 3.1).sin())
        })
        .collect()
}

fn known_transform() -> AffineTransform {
    #[rustfmt::skip]
    let linear = Matrix3::new(
        0.9, -0.3, 0.1,
        0.3,  0.9, 0.0,
        0.0,  0.1, 1.1,
    );
    AffineTransform::from_parts(&linear, &Vector3::new(25.0, -12.0, 4.0))
}

// =============================================================================
// Benchmarks
// =============================================================================

fn bench_estimate(c: &mut Criterion) {
    let mut group = c.benchmark_group("estimate_transform");
    let transform = known_transform();

    for count in [4, 16, 256, 4096] {
        let source = helix_points(count);
        let target = transform.map_points(&source).unwrap();

        group.throughput(Throughput::Elements(count as u64));
        group.bench_with_input(BenchmarkId::from_parameter(count), &count, |b, _| {
            b.iter(|| estimate_transform(black_box(&source), black_box(&target)));
        });
    }

    group.finish();
}

fn bench_map_points(c: &mut Criterion) {
    let mut group = c.benchmark_group("map_points");
    let source = helix_points(32);
    let target = known_transform().map_points(&source).unwrap();
    let mapper = CoordinateMapper::new(source, target).unwrap();

    for count in [1, 100, 10_000] {
        let queries = helix_points(count);

        group.throughput(Throughput::Elements(count as u64));
        group.bench_with_input(BenchmarkId::from_parameter(count), &count, |b, _| {
            b.iter(|| mapper.map_points(black_box(&queries)));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_estimate, bench_map_points);
criterion_main!(benches);
