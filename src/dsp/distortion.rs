//! Distortion / Waveshaping
//!
//! Distortion adds harmonics by reshaping the waveform. The "drive" control
//! sets how hard the signal is pushed into the nonlinear region of the
//! transfer function.
//!
//! # Signal Path
//!
//! Every model follows the same skeleton:
//!
//! ```text
//!   x ──► × drive ──► shape ──► compensate ──► limit ──► wet
//!   x ─────────────────────────────────────────────────► dry
//!
//!   out = ((1 - mix) · dry + mix · wet) · output
//! ```
//!
//! Drive and output are in decibels; mix is a 0..1 fraction.
//!
//! # Models
//!
//! Hard clip:
//!   wet = x · g(drive), then limited to ±0.99
//!   - Harsh, buzzy, odd harmonics
//!   - The limiter *is* the clipper
//!
//! Soft clip:
//!   wet = 2 · (2/π) · atan(x · g(drive)) · g(-drive/4)
//!   - Smooth knee, arctangent curve
//!   - The ×2 brings the knee up to full scale, the -drive/4 term keeps the
//!     level from climbing as drive rises
//!
//! Saturation:
//!   drive is scaled 24 dB → 6 dB, then
//!   wet = tanh(w)                               w ≥ 0
//!   wet = tanh(sinh(w)) - 0.2 · w · sin(π · w)  w < 0
//!   wet ×= 1.15 · g(-drive/20)
//!   - Asymmetric: the negative half-wave bends differently, adding even
//!     harmonics (and some DC, which the engine's DC blocker removes)
//!   - Bounded by the shape itself, so no limiter
//!
//! # Drive Values
//!
//!   0 dB     = Clean (only the shape's own curvature)
//!   6-12 dB  = Warm to obvious distortion
//!   24 dB    = Maximum

use std::f32::consts::{FRAC_2_PI, PI};

use crate::dsp::gain::{db_to_gain, remap};
use crate::dsp::mix::blend_dry_wet;

/// Maximum magnitude of the wet signal for the clipping models.
pub const SAFETY_LIMIT: f32 = 0.99;

/// Top of the drive control range, in dB.
pub const MAX_DRIVE_DB: f32 = 24.0;

/// Top of the drive range the saturation curve actually sees, in dB.
pub const SATURATION_MAX_DRIVE_DB: f32 = 6.0;

/// Scale a wet sample back onto ±[`SAFETY_LIMIT`] if it exceeds it.
///
/// The division only happens once the magnitude is known to be above the
/// limit, so it can never divide by zero.
#[inline]
pub fn safety_limit(wet: f32) -> f32 {
    let magnitude = wet.abs();
    if magnitude > SAFETY_LIMIT {
        wet * (SAFETY_LIMIT / magnitude)
    } else {
        wet
    }
}

/// Wet signal of the hard clip model.
#[inline]
pub fn hard_clip_wet(sample: f32, drive_db: f32) -> f32 {
    safety_limit(sample * db_to_gain(drive_db))
}

/// Wet signal of the soft clip model.
#[inline]
pub fn soft_clip_wet(sample: f32, drive_db: f32) -> f32 {
    let driven = sample * db_to_gain(drive_db);
    let mut wet = FRAC_2_PI * driven.atan();
    wet *= 2.0;
    wet *= db_to_gain(drive_db * -0.25);
    safety_limit(wet)
}

/// Wet signal of the saturation model.
#[inline]
pub fn saturation_wet(sample: f32, drive_db: f32) -> f32 {
    let drive = remap(drive_db, 0.0, MAX_DRIVE_DB, 0.0, SATURATION_MAX_DRIVE_DB);
    let w = sample * db_to_gain(drive);

    let mut wet = if w >= 0.0 {
        w.tanh()
    } else {
        w.sinh().tanh() - 0.2 * w * (PI * w).sin()
    };

    wet *= 1.15;
    wet *= db_to_gain(drive_db * -0.05);
    wet
}

/// Dry/wet crossfade followed by output gain.
#[inline]
pub fn finish(dry: f32, wet: f32, mix: f32, output_db: f32) -> f32 {
    blend_dry_wet(dry, wet, mix) * db_to_gain(output_db)
}

/// Full hard clip path for one sample.
#[inline]
pub fn hard_clip(sample: f32, drive_db: f32, mix: f32, output_db: f32) -> f32 {
    finish(sample, hard_clip_wet(sample, drive_db), mix, output_db)
}

/// Full soft clip path for one sample.
#[inline]
pub fn soft_clip(sample: f32, drive_db: f32, mix: f32, output_db: f32) -> f32 {
    finish(sample, soft_clip_wet(sample, drive_db), mix, output_db)
}

/// Full saturation path for one sample.
#[inline]
pub fn saturation(sample: f32, drive_db: f32, mix: f32, output_db: f32) -> f32 {
    finish(sample, saturation_wet(sample, drive_db), mix, output_db)
}
