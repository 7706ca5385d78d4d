// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! Performance benchmarks

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use facemesh::fuzz::{FuzzerConfig, PslgFuzzer};
use facemesh::{mesh_pslg, MesherConfig, Pslg};

fn unit_square() -> Pslg {
    Pslg::polygon(&[[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 1.0]])
}

fn bench_square(c: &mut Criterion) {
    let mut group = c.benchmark_group("square");
    let square = unit_square();

    group.bench_function("plain", |b| {
        b.iter(|| mesh_pslg(black_box(&square), &MesherConfig::default()).unwrap());
    });

    for max_area in [0.01, 0.001] {
        let config = MesherConfig {
            max_area: Some(max_area),
            min_angle: Some(20.0),
            ..MesherConfig::default()
        };
        group.bench_with_input(BenchmarkId::new("refined", max_area), &config, |b, config| {
            b.iter(|| mesh_pslg(black_box(&square), config).unwrap());
        });
    }

    group.finish();
}

fn bench_random_faces(c: &mut Criterion) {
    let mut group = c.benchmark_group("random_faces");

    for with_holes in [false, true] {
        let faces = PslgFuzzer::new(FuzzerConfig {
            count: 50,
            with_holes,
            seed: 42,
            ..FuzzerConfig::default()
        })
        .run();
        let name = if with_holes { "with_holes" } else { "simple" };
        group.bench_function(name, |b| {
            b.iter(|| {
                for (_, pslg) in &faces {
                    mesh_pslg(black_box(pslg), &MesherConfig::default()).unwrap();
                }
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_square, bench_random_faces);
criterion_main!(benches);
