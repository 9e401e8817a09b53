use std::f32::consts::{PI, SQRT_2};

/*
| response  | passes       | rejects      |
| --------- | ------------ | ------------ |
| low-pass  | below cutoff | above cutoff |
| band-pass | near cutoff  | elsewhere    |
| high-pass | above cutoff | below cutoff |
*/

/// State magnitudes below this are flushed to zero.
///
/// Well above the subnormal range (~1.2e-38), so a decaying integrator
/// reaches exact zero instead of crawling through slow subnormal math.
pub const DENORMAL_FLOOR: f32 = 1.0e-20;

/// Replace near-subnormal values with zero.
#[inline]
pub fn flush_denormal(x: f32) -> f32 {
    if x.abs() < DENORMAL_FLOOR {
        0.0
    } else {
        x
    }
}

/// Damping for a maximally flat (Butterworth, Q = 1/√2) response.
pub const BUTTERWORTH_DAMPING: f32 = SQRT_2;

/// Precomputed per-sample coefficients for [`SVFilter`].
///
/// Coefficients only depend on cutoff, damping and sample rate, so they are
/// computed once in `prepare` and shared by every channel's filter memory.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SvfCoefficients {
    g: f32,
    k: f32,
    h: f32,
}

impl SvfCoefficients {
    /// Bilinear-prewarped coefficients. `damping` is `1/Q`.
    pub fn new(cutoff_hz: f32, damping: f32, sample_rate: f32) -> Self {
        // Keep the prewarp away from tan(π/2)
        let cutoff = cutoff_hz.clamp(1.0e-3, sample_rate * 0.499);
        let g = (PI * cutoff / sample_rate).tan();
        let k = damping;

        Self {
            g,
            k,
            h: 1.0 / (1.0 + g * (g + k)),
        }
    }

    pub fn butterworth(cutoff_hz: f32, sample_rate: f32) -> Self {
        Self::new(cutoff_hz, BUTTERWORTH_DAMPING, sample_rate)
    }
}

pub struct FilterOutputs {
    pub lowpass: f32,
    pub bandpass: f32,
    pub highpass: f32,
}

/// Topology-preserving state-variable filter memory.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SVFilter {
    ic1eq: f32, // First integrator's memory
    ic2eq: f32, // Second integrator's memory
}

impl SVFilter {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn next_sample(&mut self, sample: f32, coeffs: &SvfCoefficients) -> FilterOutputs {
        let SvfCoefficients { g, k, h } = *coeffs;

        let v3 = sample - self.ic2eq;
        let v1 = h * (self.ic1eq + g * v3);
        let v2 = self.ic2eq + g * v1;

        self.ic1eq = flush_denormal(2.0 * v1 - self.ic1eq);
        self.ic2eq = flush_denormal(2.0 * v2 - self.ic2eq);

        FilterOutputs {
            lowpass: v2,
            bandpass: v1,
            highpass: sample - k * v1 - v2,
        }
    }

    #[inline]
    pub fn highpass(&mut self, sample: f32, coeffs: &SvfCoefficients) -> f32 {
        self.next_sample(sample, coeffs).highpass
    }

    pub fn reset(&mut self) {
        self.ic1eq = 0.0;
        self.ic2eq = 0.0;
    }
}
