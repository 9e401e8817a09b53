//! Benchmarks for the DC-blocking high-pass.

use std::hint::black_box;

use buzzbox::dsp::dc_blocker::DcBlocker;
use criterion::{BenchmarkId, Criterion};

use crate::BLOCK_SIZES;

pub fn bench_dc_blocker(c: &mut Criterion) {
    let mut group = c.benchmark_group("dsp/dc_blocker");

    for &size in BLOCK_SIZES {
        // Generate a test signal (offset sawtooth-like ramp)
        let input: Vec<f32> = (0..size)
            .map(|i| (i as f32 / size as f32) * 2.0 - 0.5)
            .collect();

        let mut blocker = DcBlocker::new();
        blocker.prepare(48_000.0, 2);
        let mut buffer = input.clone();
        group.bench_with_input(BenchmarkId::new("stereo", size), &size, |b, _| {
            b.iter(|| {
                for channel in 0..2 {
                    buffer.copy_from_slice(&input);
                    blocker.process_buffer(channel, black_box(&mut buffer));
                }
            })
        });
    }

    group.finish();
}
