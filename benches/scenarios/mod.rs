//! Real-world scenario benchmarks.
//!
//! These benchmarks run the complete engine the way a host would: stereo
//! blocks, smoothing active, DC blocker running.

mod engine;

pub use engine::bench_engine;
