pub mod dsp;
pub mod engine; // Smoothing + DC blocking + model dispatch
pub mod io;
pub mod params; // Host-facing parameter layout and shared values

pub use engine::{DistortionEngine, DistortionModel, ProcessSpec};
pub use params::{DistortionParams, ParamId, ParamSnapshot};

pub const MAX_BLOCK_SIZE: usize = 2048;
pub const DEFAULT_SAMPLE_RATE: f32 = 48_000.0;
