//! Benchmarks for linear parameter smoothing.

use std::hint::black_box;

use buzzbox::dsp::smoothing::{SmoothedValue, DEFAULT_RAMP_SECONDS};
use criterion::{BenchmarkId, Criterion};

use crate::BLOCK_SIZES;

pub fn bench_smoothing(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/smoothing");

    for &size in BLOCK_SIZES {
        let mut buffer = vec![0.0f32; size];

        // Settled value - the common case between control changes
        let mut settled = SmoothedValue::new(0.5);
        settled.reset(48_000.0, DEFAULT_RAMP_SECONDS);
        group.bench_with_input(BenchmarkId::new("settled", size), &size, |b, _| {
            b.iter(|| {
                for out in buffer.iter_mut() {
                    *out = settled.next_value();
                }
                black_box(&buffer);
            })
        });

        // Ramping - retarget every block so the ramp never finishes
        let mut ramping = SmoothedValue::new(0.0);
        ramping.reset(48_000.0, DEFAULT_RAMP_SECONDS);
        let mut flip = false;
        group.bench_with_input(BenchmarkId::new("ramping", size), &size, |b, _| {
            b.iter(|| {
                flip = !flip;
                ramping.set_target(if flip { 1.0 } else { 0.0 });
                for out in buffer.iter_mut() {
                    *out = ramping.next_value();
                }
                black_box(&buffer);
            })
        });
    }

    group.finish();
}
