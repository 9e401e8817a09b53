//! Benchmarks for low-level DSP primitives.

mod dc_blocker;
mod distortion;
mod smoothing;

pub use dc_blocker::bench_dc_blocker;
pub use distortion::bench_distortion;
pub use smoothing::bench_smoothing;
