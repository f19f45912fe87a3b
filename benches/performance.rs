// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Performance benchmarks

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use metamold::geometry::Primitive;
use metamold::pricing::CostDrivers;
use metamold::{CostModel, GeometryAnalyzer, PricingRequest, PricingStrategy};
use nalgebra::Vector3;

fn bench_primitives(c: &mut Criterion) {
    let mut group = c.benchmark_group("primitives");

    group.bench_function("cube", |b| {
        b.iter(|| Primitive::cube(black_box(Vector3::new(10.0, 10.0, 10.0)), false).to_mesh());
    });

    group.bench_function("sphere_64", |b| {
        b.iter(|| Primitive::sphere(black_box(10.0), black_box(64)).to_mesh());
    });

    group.bench_function("torus", |b| {
        b.iter(|| Primitive::torus(black_box(20.0), black_box(5.0), 48, 24).to_mesh());
    });

    group.finish();
}

fn bench_analyze(c: &mut Criterion) {
    let mut group = c.benchmark_group("analyze");
    let analyzer = GeometryAnalyzer::new();

    for segments in [16u32, 32, 64] {
        let mesh = Primitive::sphere(50.0, segments).to_mesh();
        group.bench_with_input(BenchmarkId::new("sphere", segments), &mesh, |b, mesh| {
            b.iter(|| analyzer.analyze(black_box(mesh)).unwrap());
        });
    }

    let torus = Primitive::torus(40.0, 10.0, 64, 32).to_mesh();
    group.bench_function("torus", |b| {
        b.iter(|| analyzer.analyze(black_box(&torus)).unwrap());
    });

    group.finish();
}

fn bench_pricing(c: &mut Criterion) {
    let mut group = c.benchmark_group("pricing");
    let stats = GeometryAnalyzer::new()
        .analyze(&Primitive::cylinder(40.0, 10.0, 48).to_mesh())
        .unwrap();
    let drivers = CostDrivers::from_statistics(&stats).unwrap();
    let request = PricingRequest::new("H13", "polished", 120);

    for strategy in [PricingStrategy::Detailed, PricingStrategy::Simple] {
        let model = CostModel::standard().with_strategy(strategy);
        group.bench_function(strategy.to_string(), |b| {
            b.iter(|| model.price_drivers(black_box(&drivers), black_box(&request)).unwrap());
        });
    }

    group.finish();
}

criterion_group!(benches, bench_primitives, bench_analyze, bench_pricing);
criterion_main!(benches);
