//! Low-level DSP primitives used by the distortion engine.
//!
//! These components are allocation-free and realtime-safe once prepared.
//! They stay focused on the signal-processing math; the engine layers
//! parameter handling and channel iteration on top.

/// Per-channel 10 Hz high-pass removing DC offset.
pub mod dc_blocker;
/// Hard clip, soft clip and saturation transfer functions.
pub mod distortion;
/// State-variable filter core.
pub mod filter;
/// Decibel conversion and range remapping.
pub mod gain;
/// Dry/wet crossfade.
pub mod mix;
/// Linear ramps for click-free control changes.
pub mod smoothing;

pub use smoothing::SmoothedValue;
