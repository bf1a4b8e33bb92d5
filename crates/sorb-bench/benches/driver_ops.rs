//! Criterion benchmarks for whole repetitions and checkpoint encoding.

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, Criterion};
use sorb_bench::{grid_profile, reference_profile};
use sorb_checkpoint::{decode_checkpoint, encode_checkpoint};
use sorb_core::Model;
use sorb_engine::Simulation;

/// Benchmark: one repetition on the 10K-site ring for each model.
fn bench_line_repetition(c: &mut Criterion) {
    let mut group = c.benchmark_group("line_repetition");
    group.sample_size(20);
    for model in Model::ALL {
        group.bench_function(model.name(), |b| {
            b.iter(|| {
                let sim = Simulation::new(reference_profile(model, 42)).unwrap();
                black_box(sim.run_to_end().unwrap());
            });
        });
    }
    group.finish();
}

/// Benchmark: one repetition on the 100x100 grid for each model.
fn bench_grid_repetition(c: &mut Criterion) {
    let mut group = c.benchmark_group("grid_repetition");
    group.sample_size(20);
    for model in Model::ALL {
        group.bench_function(model.name(), |b| {
            b.iter(|| {
                let sim = Simulation::new(grid_profile(model, 42)).unwrap();
                black_box(sim.run_to_end().unwrap());
            });
        });
    }
    group.finish();
}

/// Benchmark: encode and decode a mid-run checkpoint of the 10K-site ring.
fn bench_checkpoint_codec(c: &mut Criterion) {
    let mut sim = Simulation::new(reference_profile(Model::Dimer, 42)).unwrap();
    for _ in 0..5_000 {
        sim.step();
    }
    let checkpoint = sim.checkpoint().unwrap();
    let mut bytes = Vec::new();
    encode_checkpoint(&mut bytes, &checkpoint).unwrap();

    c.bench_function("checkpoint_encode", |b| {
        b.iter(|| {
            let mut buf = Vec::with_capacity(bytes.len());
            encode_checkpoint(&mut buf, &checkpoint).unwrap();
            black_box(&buf);
        });
    });

    c.bench_function("checkpoint_decode", |b| {
        b.iter(|| {
            let decoded = decode_checkpoint(&mut bytes.as_slice()).unwrap();
            black_box(&decoded);
        });
    });
}

criterion_group!(
    benches,
    bench_line_repetition,
    bench_grid_repetition,
    bench_checkpoint_codec
);
criterion_main!(benches);
