//! Benchmarks for the waveshaping transfer functions.

use std::hint::black_box;

use buzzbox::dsp::distortion;
use criterion::{BenchmarkId, Criterion};

use crate::BLOCK_SIZES;

pub fn bench_distortion(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/distortion");

    for &size in BLOCK_SIZES {
        // Generate a test signal (sine-like values)
        let input: Vec<f32> = (0..size).map(|i| (i as f32 * 0.1).sin()).collect();

        // Hard clip - gain then limiter
        let mut buffer = input.clone();
        group.bench_with_input(BenchmarkId::new("hard_clip", size), &size, |b, _| {
            b.iter(|| {
                for (out, &x) in buffer.iter_mut().zip(&input) {
                    *out = distortion::hard_clip(black_box(x), black_box(12.0), 1.0, 0.0);
                }
            })
        });

        // Soft clip - arctangent curve
        let mut buffer = input.clone();
        group.bench_with_input(BenchmarkId::new("soft_clip", size), &size, |b, _| {
            b.iter(|| {
                for (out, &x) in buffer.iter_mut().zip(&input) {
                    *out = distortion::soft_clip(black_box(x), black_box(12.0), 1.0, 0.0);
                }
            })
        });

        // Saturation - asymmetric tanh/sinh/sin curve (the most expensive)
        let mut buffer = input.clone();
        group.bench_with_input(BenchmarkId::new("saturation", size), &size, |b, _| {
            b.iter(|| {
                for (out, &x) in buffer.iter_mut().zip(&input) {
                    *out = distortion::saturation(black_box(x), black_box(12.0), 1.0, 0.0);
                }
            })
        });
    }

    group.finish();
}
