//! Per-channel DC blocking high-pass.

/*
DC Blocking
===========

Asymmetric waveshaping (the saturation model treats positive and negative
half-waves differently) leaves a constant offset in the signal. That offset
is inaudible on its own but eats headroom, and it thumps when the effect is
bypassed or the transport stops.

A high-pass with a cutoff far below the audible band removes it:

    cutoff = 10 Hz
    slope  = 24 dB/octave (Linkwitz-Riley: two Butterworth sections in series)

At 20 Hz the filter is already within ~1 dB of flat; at 1 kHz and above the
magnitude response is flat and only a small phase shift remains.


Per-Channel Memory
------------------

Filters have memory (the integrator states). Left and right channels carry
different signals, so each channel index owns its own pair of sections.
Running channel 1 through channel 0's memory would smear one channel into
the other.

The coefficients, on the other hand, depend only on cutoff and sample rate,
so a single set is shared.
*/

use crate::dsp::filter::{SVFilter, SvfCoefficients};
use crate::DEFAULT_SAMPLE_RATE;

/// Cutoff of the DC blocking high-pass.
pub const DC_CUTOFF_HZ: f32 = 10.0;

/// Two cascaded Butterworth sections for one channel.
#[derive(Debug, Clone, Copy, Default)]
struct ChannelState {
    first: SVFilter,
    second: SVFilter,
}

/// Fixed 10 Hz, 4th-order high-pass with independent memory per channel.
pub struct DcBlocker {
    coeffs: SvfCoefficients,
    channels: Vec<ChannelState>,
}

impl DcBlocker {
    pub fn new() -> Self {
        Self {
            coeffs: SvfCoefficients::butterworth(DC_CUTOFF_HZ, DEFAULT_SAMPLE_RATE),
            channels: Vec::new(),
        }
    }

    /// (Re)allocate per-channel memory and recompute coefficients.
    ///
    /// Allocates; call only while the audio thread is not running. A
    /// non-positive sample rate keeps the previous configuration.
    pub fn prepare(&mut self, sample_rate: f32, num_channels: usize) {
        if !(sample_rate.is_finite() && sample_rate > 0.0) {
            return;
        }

        self.coeffs = SvfCoefficients::butterworth(DC_CUTOFF_HZ, sample_rate);
        self.channels.clear();
        self.channels.resize(num_channels, ChannelState::default());
    }

    /// Filter one sample using `channel`'s memory.
    ///
    /// Channels that were not prepared pass through unfiltered.
    #[inline]
    pub fn process_sample(&mut self, channel: usize, sample: f32) -> f32 {
        match self.channels.get_mut(channel) {
            Some(state) => {
                let stage = state.first.highpass(sample, &self.coeffs);
                state.second.highpass(stage, &self.coeffs)
            }
            None => sample,
        }
    }

    /// Filter a whole channel buffer in place.
    pub fn process_buffer(&mut self, channel: usize, buffer: &mut [f32]) {
        for sample in buffer.iter_mut() {
            *sample = self.process_sample(channel, *sample);
        }
    }

    /// Zero every channel's memory.
    pub fn clear(&mut self) {
        for state in self.channels.iter_mut() {
            state.first.reset();
            state.second.reset();
        }
    }

    pub fn num_channels(&self) -> usize {
        self.channels.len()
    }

    pub fn cutoff_hz(&self) -> f32 {
        DC_CUTOFF_HZ
    }
}

impl Default for DcBlocker {
    fn default() -> Self {
        Self::new()
    }
}
