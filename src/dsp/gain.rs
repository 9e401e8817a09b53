//! Decibel/linear gain conversion and range remapping.

/*
Gain in Decibels
================

Every level control in the distortion engine (drive, output, and the drive
compensation terms) is expressed in decibels, because human hearing is
logarithmic - we perceive loudness ratios, not differences.

    dB   = 20 × log₁₀(gain)
    gain = 10^(dB / 20)

Common reference points:
    ×1.0    =   0 dB  (unity, no change)
    ×0.5    ≈  -6 dB  (half amplitude)
    ×2.0    ≈  +6 dB  (double amplitude)
    ×15.85  ≈ +24 dB  (maximum drive)

Every halving of amplitude ≈ -6 dB. Every doubling ≈ +6 dB.


Silence Floor
-------------

log₁₀(0) is -∞, which is awkward to store in a float control. Anything at or
below MINUS_INFINITY_DB is treated as silence: db_to_gain returns 0.0 and
gain_to_db returns MINUS_INFINITY_DB.
*/

/// Level treated as silence by the conversions in this module.
pub const MINUS_INFINITY_DB: f32 = -100.0;

/// Convert decibels to a linear gain factor: `10^(db / 20)`.
///
/// Returns exactly 1.0 for 0 dB and 0.0 at or below [`MINUS_INFINITY_DB`].
#[inline]
pub fn db_to_gain(db: f32) -> f32 {
    if db > MINUS_INFINITY_DB {
        10.0_f32.powf(db * 0.05)
    } else {
        0.0
    }
}

/// Convert a linear gain factor to decibels, floored at [`MINUS_INFINITY_DB`].
#[inline]
pub fn gain_to_db(gain: f32) -> f32 {
    if gain > 0.0 {
        (20.0 * gain.log10()).max(MINUS_INFINITY_DB)
    } else {
        MINUS_INFINITY_DB
    }
}

/// Linearly remap `value` from `[src_min, src_max]` to `[dst_min, dst_max]`.
///
/// No clamping is applied; values outside the source range extrapolate.
#[inline]
pub fn remap(value: f32, src_min: f32, src_max: f32, dst_min: f32, dst_max: f32) -> f32 {
    dst_min + (dst_max - dst_min) * (value - src_min) / (src_max - src_min)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unity_is_exact() {
        assert_eq!(db_to_gain(0.0), 1.0);
    }

    #[test]
    fn test_six_db_roughly_doubles() {
        assert!((db_to_gain(6.0) - 1.995).abs() < 0.001);
        assert!((db_to_gain(-6.0) - 0.501).abs() < 0.001);
    }

    #[test]
    fn test_silence_floor() {
        assert_eq!(db_to_gain(MINUS_INFINITY_DB), 0.0);
        assert_eq!(db_to_gain(-200.0), 0.0);
        assert_eq!(gain_to_db(0.0), MINUS_INFINITY_DB);
        assert_eq!(gain_to_db(-1.0), MINUS_INFINITY_DB);
    }

    #[test]
    fn test_db_gain_inverse() {
        for db in [-24.0, -6.0, 0.0, 3.0, 12.0, 24.0] {
            let back = gain_to_db(db_to_gain(db));
            assert!((back - db).abs() < 1e-3, "{db} dB came back as {back}");
        }
    }

    #[test]
    fn test_remap_drive_range() {
        // 24 dB of drive maps onto 6 dB for the saturation stage
        assert_eq!(remap(0.0, 0.0, 24.0, 0.0, 6.0), 0.0);
        assert_eq!(remap(24.0, 0.0, 24.0, 0.0, 6.0), 6.0);
        assert_eq!(remap(12.0, 0.0, 24.0, 0.0, 6.0), 3.0);
    }
}
