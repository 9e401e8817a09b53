//! Linear parameter smoothing.

/*
Parameter Smoothing
===================

When a control jumps (say drive goes from 0 dB to 24 dB between two blocks)
the gain applied to the audio jumps with it. A step in gain is a step in the
waveform, and a step in the waveform is an audible click ("zipper noise" when
it happens repeatedly while a knob is turned).

The fix is to never apply the new value directly. Instead we glide from the
current value to the new target over a short ramp, one small step per sample.

Vocabulary
----------

  current     The value handed to the DSP for this sample.

  target      Where the ramp is heading. Set by the host at any time.

  ramp        The number of samples the glide takes. 20 ms is short enough to
              feel instant on a knob and long enough to hide the step.

  countdown   Samples left until current reaches target. Zero means settled.


The Math: Linear Ramp
---------------------

On retarget we pre-compute the per-sample step once:

    steps = floor(ramp_seconds × sample_rate)
    step  = (target - current) / steps

Each sample:

    countdown -= 1
    current   += step            (while countdown > 0)
    current    = target          (on the final sample)

The last sample is assigned rather than accumulated, so float drift can
never leave the value a hair away from the target.

Example: 20 ms at 48 kHz
  - steps = 960
  - a 0 → 24 dB move advances 0.025 dB per sample


Retargeting Mid-Ramp
--------------------

A new target restarts the countdown from wherever current is now, so the
glide bends toward the new destination without a discontinuity. Setting the
target it already has is ignored, so a host that re-sends unchanged values
every block does not keep restarting the ramp.
*/

/// Default ramp length for the engine's controls.
pub const DEFAULT_RAMP_SECONDS: f32 = 0.02;

/// A control value that glides linearly toward its target.
///
/// `next_value` must be called exactly once per consumed sample: the ramp
/// position is a count of calls since the last retarget.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SmoothedValue {
    current: f32,
    target: f32,
    step: f32,
    countdown: u32,
    steps_to_target: u32,
}

impl SmoothedValue {
    /// Create a settled value. Until [`reset`](Self::reset) is called the
    /// ramp length is zero and targets are applied immediately.
    pub fn new(initial: f32) -> Self {
        Self {
            current: initial,
            target: initial,
            step: 0.0,
            countdown: 0,
            steps_to_target: 0,
        }
    }

    /// Recompute the ramp length and snap the current value to the target.
    ///
    /// A non-positive or non-finite sample rate, or a negative ramp time, is
    /// ignored: hosts probe configurations before the final one.
    pub fn reset(&mut self, sample_rate: f32, ramp_seconds: f32) {
        let valid_rate = sample_rate.is_finite() && sample_rate > 0.0;
        let valid_ramp = ramp_seconds.is_finite() && ramp_seconds >= 0.0;
        if !valid_rate || !valid_ramp {
            return;
        }

        self.steps_to_target = (ramp_seconds * sample_rate).floor() as u32;
        self.set_current_and_target(self.target);
    }

    /// Set the destination. The current value is not touched until the next
    /// call to [`next_value`](Self::next_value).
    pub fn set_target(&mut self, value: f32) {
        if value == self.target {
            return;
        }

        if self.steps_to_target == 0 {
            self.set_current_and_target(value);
            return;
        }

        self.target = value;
        self.countdown = self.steps_to_target;
        self.step = (self.target - self.current) / self.countdown as f32;
    }

    /// Jump straight to `value` with no ramp.
    pub fn set_current_and_target(&mut self, value: f32) {
        self.current = value;
        self.target = value;
        self.step = 0.0;
        self.countdown = 0;
    }

    /// Advance by one sample and return the new current value.
    #[inline]
    pub fn next_value(&mut self) -> f32 {
        if self.countdown == 0 {
            return self.target;
        }

        self.countdown -= 1;

        if self.countdown > 0 {
            self.current += self.step;
        } else {
            self.current = self.target;
        }

        self.current
    }

    /// Advance by `samples` at once and return the resulting value.
    pub fn skip(&mut self, samples: u32) -> f32 {
        if samples >= self.countdown {
            self.set_current_and_target(self.target);
            return self.target;
        }

        self.current += self.step * samples as f32;
        self.countdown -= samples;
        self.current
    }

    pub fn current(&self) -> f32 {
        self.current
    }

    pub fn target(&self) -> f32 {
        self.target
    }

    /// True while a ramp is in progress.
    pub fn is_smoothing(&self) -> bool {
        self.countdown > 0
    }

    /// Ramp length in samples, as computed by the last valid `reset`.
    pub fn ramp_samples(&self) -> u32 {
        self.steps_to_target
    }
}

impl Default for SmoothedValue {
    fn default() -> Self {
        Self::new(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE_RATE: f32 = 48_000.0;

    fn ramped(initial: f32) -> SmoothedValue {
        let mut value = SmoothedValue::new(initial);
        value.reset(SAMPLE_RATE, DEFAULT_RAMP_SECONDS);
        value
    }

    #[test]
    fn test_ramp_length_from_rate() {
        let value = ramped(0.0);
        assert_eq!(value.ramp_samples(), 960);
    }

    #[test]
    fn test_converges_exactly_after_ramp() {
        let mut value = ramped(0.0);
        value.set_target(24.0);

        let mut last = 0.0;
        for _ in 0..value.ramp_samples() {
            last = value.next_value();
        }

        assert_eq!(last, 24.0);
        assert!(!value.is_smoothing());
        // Settled: further reads return the target unchanged
        assert_eq!(value.next_value(), 24.0);
    }

    #[test]
    fn test_intermediate_values_are_monotonic() {
        let mut value = ramped(1.0);
        value.set_target(-0.3);

        let mut previous = value.current();
        while value.is_smoothing() {
            let next = value.next_value();
            assert!(next <= previous, "ramp went backwards: {previous} -> {next}");
            assert!(next >= -0.3);
            previous = next;
        }
    }

    #[test]
    fn test_set_target_does_not_move_current() {
        let mut value = ramped(0.0);
        value.set_target(1.0);
        assert_eq!(value.current(), 0.0);
        assert_eq!(value.target(), 1.0);
    }

    #[test]
    fn test_same_target_keeps_ramp_position() {
        let mut value = ramped(0.0);
        value.set_target(1.0);
        for _ in 0..100 {
            value.next_value();
        }
        let before = value;

        value.set_target(1.0);

        assert_eq!(value, before);
    }

    #[test]
    fn test_reset_snaps_to_target() {
        let mut value = ramped(0.0);
        value.set_target(6.0);
        value.next_value();
        assert!(value.is_smoothing());

        value.reset(44_100.0, DEFAULT_RAMP_SECONDS);

        assert!(!value.is_smoothing());
        assert_eq!(value.current(), 6.0);
        assert_eq!(value.ramp_samples(), 882);
    }

    #[test]
    fn test_invalid_rate_is_ignored() {
        let mut value = ramped(0.0);
        value.set_target(1.0);
        let before = value;

        value.reset(0.0, DEFAULT_RAMP_SECONDS);
        value.reset(-48_000.0, DEFAULT_RAMP_SECONDS);
        value.reset(f32::NAN, DEFAULT_RAMP_SECONDS);
        value.reset(SAMPLE_RATE, -1.0);

        assert_eq!(value, before);
    }

    #[test]
    fn test_unprepared_value_jumps() {
        let mut value = SmoothedValue::new(0.0);
        value.set_target(0.5);
        assert_eq!(value.current(), 0.5);
        assert_eq!(value.next_value(), 0.5);
    }

    #[test]
    fn test_retarget_mid_ramp_has_no_jump() {
        let mut value = ramped(0.0);
        value.set_target(1.0);
        for _ in 0..480 {
            value.next_value();
        }
        let halfway = value.current();

        value.set_target(0.0);
        let next = value.next_value();

        assert!((next - halfway).abs() < 0.01);
        assert!(next < halfway);
    }

    #[test]
    fn test_skip_matches_stepping() {
        let mut stepped = ramped(0.0);
        let mut skipped = ramped(0.0);
        stepped.set_target(1.0);
        skipped.set_target(1.0);

        for _ in 0..100 {
            stepped.next_value();
        }
        skipped.skip(100);
        assert!((stepped.current() - skipped.current()).abs() < 1e-5);

        assert_eq!(skipped.skip(10_000), 1.0);
        assert!(!skipped.is_smoothing());
    }
}
