//! Dry/wet crossfading.

/*
Dry/Wet Mixing
==============

  dry   the original, unprocessed input sample
  wet   the distorted sample
  mix   0.0 = all dry, 1.0 = all wet

The Math: Linear Crossfade
--------------------------

    output = dry × (1 - mix) + wet × mix

The weights always sum to 1.0, so a fully correlated dry and wet signal never
sums louder than either one alone. Parallel distortion ("New York" style) is
just a mix somewhere in the middle: the dry path keeps the transients, the
wet path adds the harmonics.

Linear crossfades dip slightly in perceived loudness at mix = 0.5 when the
two signals are uncorrelated. Dry and wet here are strongly correlated (same
source, same phase), so the dip is negligible and an equal-power law would
instead bump the level in the middle.
*/

/// Blend dry and wet samples using linear crossfade (single sample version).
///
/// output = (dry × (1-mix)) + (wet × mix)
#[inline]
pub fn blend_dry_wet(dry: f32, wet: f32, mix: f32) -> f32 {
    dry * (1.0 - mix) + wet * mix
}
