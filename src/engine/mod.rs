//! The distortion engine: smoothing, DC blocking and model dispatch tied
//! together into a per-block processing loop.

/*
Processing Order
================

For every channel, for every sample index i, in order:

    1. out[i] = dc_block(channel, out[i])     - filter what the output holds
    2. y      = model(in[i], drive, mix, out) - one smoothed value each
    3. out[i] = y

Step 1 filters the *output* buffer's previous contents, and step 3 then
overwrites them. With separate input and output buffers the filtered value is
discarded and only the filter memory advances. With a single in-place buffer
(`process_replacing`) input and output are the same memory, so step 2 reads
the sample step 1 just filtered: the DC blocker then sits *before* the
waveshaper.

Either way the ordering is kept exactly as described; moving the DC blocker
after the waveshaper changes the sound of the saturation model.


Smoothing Across Channels
-------------------------

There is one smoother per control, not one per channel. Channel 0 consumes
the first N ramp steps of a block, channel 1 the next N, and so on. A stereo
block of N frames therefore sees the same ramp a mono block of 2N frames
would. Per-channel smoothers would be the conventional design; this one is
kept so output matches the established behaviour sample for sample.


Threading
---------

`process*` is realtime-safe: no locks, no allocation. Control values live in
a shared [`DistortionParams`] and are latched once at the start of each
block, which is also the only point where the model can change - a block is
never split across two transfer functions. `prepare` allocates and takes
`&mut self`, so it cannot overlap a `process` call on the same engine.
*/

mod model;

pub use model::DistortionModel;

use std::sync::Arc;

use crate::dsp::dc_blocker::DcBlocker;
use crate::dsp::smoothing::{SmoothedValue, DEFAULT_RAMP_SECONDS};
use crate::params::DistortionParams;
use crate::{DEFAULT_SAMPLE_RATE, MAX_BLOCK_SIZE};

/// Audio configuration handed over by the host before playback.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProcessSpec {
    pub sample_rate: f32,
    pub max_block_size: usize,
    pub num_channels: usize,
}

impl ProcessSpec {
    pub fn new(sample_rate: f32, max_block_size: usize, num_channels: usize) -> Self {
        Self {
            sample_rate,
            max_block_size,
            num_channels,
        }
    }

    /// Positive finite sample rate, non-empty blocks, at least one channel.
    pub fn is_valid(&self) -> bool {
        self.sample_rate.is_finite()
            && self.sample_rate > 0.0
            && self.max_block_size > 0
            && self.num_channels > 0
    }
}

impl Default for ProcessSpec {
    fn default() -> Self {
        Self::new(DEFAULT_SAMPLE_RATE, MAX_BLOCK_SIZE, 2)
    }
}

/// Waveshaping distortion with smoothed drive, output and mix.
pub struct DistortionEngine {
    params: Arc<DistortionParams>,
    drive: SmoothedValue,
    output: SmoothedValue,
    mix: SmoothedValue,
    dc_blocker: DcBlocker,
    model: DistortionModel,
    spec: ProcessSpec,
}

impl DistortionEngine {
    /// Engine with its own parameter block at engine defaults.
    pub fn new() -> Self {
        Self::with_params(Arc::new(DistortionParams::new()))
    }

    /// Engine reading from a parameter block owned by the host adapter.
    pub fn with_params(params: Arc<DistortionParams>) -> Self {
        let snapshot = params.snapshot();

        Self {
            drive: SmoothedValue::new(snapshot.drive_db),
            output: SmoothedValue::new(snapshot.output_db),
            mix: SmoothedValue::new(snapshot.mix),
            dc_blocker: DcBlocker::new(),
            model: snapshot.model,
            spec: ProcessSpec::default(),
            params,
        }
    }

    /// Handle for the control thread.
    pub fn params(&self) -> Arc<DistortionParams> {
        Arc::clone(&self.params)
    }

    /// Configure for a sample rate and channel count, then [`reset`](Self::reset).
    ///
    /// Must be re-run whenever the host's audio configuration changes. An
    /// invalid spec (rate ≤ 0, no channels) is ignored.
    pub fn prepare(&mut self, spec: &ProcessSpec) {
        if !spec.is_valid() {
            return;
        }

        self.spec = *spec;
        self.dc_blocker.prepare(spec.sample_rate, spec.num_channels);
        self.reset();
    }

    /// Latch the current parameter values and snap every smoother to them.
    pub fn reset(&mut self) {
        self.begin_block();

        let rate = self.spec.sample_rate;
        self.drive.reset(rate, DEFAULT_RAMP_SECONDS);
        self.output.reset(rate, DEFAULT_RAMP_SECONDS);
        self.mix.reset(rate, DEFAULT_RAMP_SECONDS);
    }

    /// Zero the DC blocker's memory.
    pub fn clear(&mut self) {
        self.dc_blocker.clear();
    }

    pub fn set_drive(&self, db: f32) {
        self.params.set_drive(db);
    }

    pub fn set_output(&self, db: f32) {
        self.params.set_output(db);
    }

    pub fn set_mix(&self, mix: f32) {
        self.params.set_mix(mix);
    }

    /// Select a model. Takes effect at the next block boundary.
    pub fn set_model(&self, model: DistortionModel) {
        self.params.set_model(model);
    }

    /// Model used by the block currently being (or last) processed.
    pub fn model(&self) -> DistortionModel {
        self.model
    }

    pub fn spec(&self) -> &ProcessSpec {
        &self.spec
    }

    /// Pull parameter targets and the model from the shared block.
    ///
    /// `process` and `process_replacing` do this themselves; call it directly
    /// only when driving [`process_sample`](Self::process_sample) by hand.
    pub fn begin_block(&mut self) {
        self.drive.set_target(self.params.drive_db());
        self.output.set_target(self.params.output_db());
        self.mix.set_target(self.params.mix());
        self.model = self.params.model();
    }

    /// Process separate channel-major input and output buffers.
    ///
    /// Output channels with no matching input channel are cleared and then
    /// processed as silence, so they come out zeroed while the smoothers and
    /// the DC blocker advance exactly as for a real channel. Extra input
    /// channels are ignored.
    pub fn process<I, O>(&mut self, input: &[I], output: &mut [O])
    where
        I: AsRef<[f32]>,
        O: AsMut<[f32]>,
    {
        self.begin_block();

        for (channel, out) in output.iter_mut().enumerate() {
            let out = out.as_mut();

            match input.get(channel) {
                Some(dry) => {
                    let dry = dry.as_ref();
                    debug_assert_eq!(dry.len(), out.len());

                    for (&x, y) in dry.iter().zip(out.iter_mut()) {
                        *y = self.dc_blocker.process_sample(channel, *y);
                        *y = self.process_sample(x);
                    }
                }
                None => {
                    out.fill(0.0);
                    for y in out.iter_mut() {
                        *y = self.dc_blocker.process_sample(channel, *y);
                        *y = self.process_sample(0.0);
                    }
                }
            }
        }
    }

    /// Process a single channel-major buffer in place.
    pub fn process_replacing<C>(&mut self, block: &mut [C])
    where
        C: AsMut<[f32]>,
    {
        self.begin_block();

        for (channel, samples) in block.iter_mut().enumerate() {
            for sample in samples.as_mut().iter_mut() {
                *sample = self.dc_blocker.process_sample(channel, *sample);
                *sample = self.process_sample(*sample);
            }
        }
    }

    /// Run one sample through the active model, advancing each smoother once.
    #[inline]
    pub fn process_sample(&mut self, sample: f32) -> f32 {
        let drive = self.drive.next_value();
        let mix = self.mix.next_value();
        let output = self.output.next_value();

        self.model.process(sample, drive, mix, output)
    }
}

impl Default for DistortionEngine {
    fn default() -> Self {
        Self::new()
    }
}
