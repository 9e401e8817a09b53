//! Benchmarks for the full distortion engine.

use std::hint::black_box;

use buzzbox::{DistortionEngine, DistortionModel, ProcessSpec, MAX_BLOCK_SIZE};
use criterion::{BenchmarkId, Criterion};

use crate::BLOCK_SIZES;

pub fn bench_engine(c: &mut Criterion) {
    let mut group = c.benchmark_group("scenarios/engine");

    for &size in BLOCK_SIZES {
        let input: Vec<Vec<f32>> = (0..2)
            .map(|ch| {
                (0..size)
                    .map(|i| 0.8 * (i as f32 * 0.05 + ch as f32).sin())
                    .collect()
            })
            .collect();

        for model in DistortionModel::ALL {
            let mut engine = DistortionEngine::new();
            engine.prepare(&ProcessSpec::new(48_000.0, MAX_BLOCK_SIZE, 2));
            engine.set_model(model);
            engine.set_drive(12.0);
            engine.set_mix(1.0);

            let mut output = vec![vec![0.0f32; size]; 2];
            let name = format!("{}", model).to_lowercase();
            group.bench_with_input(BenchmarkId::new(name, size), &size, |b, _| {
                b.iter(|| {
                    engine.process(black_box(input.as_slice()), black_box(output.as_mut_slice()));
                })
            });
        }

        // Mix and drive moving every block: smoothers never settle
        let mut engine = DistortionEngine::new();
        engine.prepare(&ProcessSpec::new(48_000.0, MAX_BLOCK_SIZE, 2));
        let mut output = vec![vec![0.0f32; size]; 2];
        let mut flip = false;
        group.bench_with_input(BenchmarkId::new("automated", size), &size, |b, _| {
            b.iter(|| {
                flip = !flip;
                engine.set_drive(if flip { 18.0 } else { 6.0 });
                engine.set_mix(if flip { 1.0 } else { 0.5 });
                engine.process(black_box(input.as_slice()), black_box(output.as_mut_slice()));
            })
        });
    }

    group.finish();
}
