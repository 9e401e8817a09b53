// Purpose - external interfaces, buffer layout conversions

/// Channel-major audio buffer.
///
/// Each channel is its own `Vec`. Frame counts can be changed with
/// [`set_num_frames`](Self::set_num_frames) without allocating as long as they
/// stay within the capacity reserved by [`with_capacity`](Self::with_capacity),
/// which makes the buffer usable from an audio callback.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct AudioBuffer {
    pub buffers: Vec<Vec<f32>>,
}

impl AudioBuffer {
    /// Silent buffer of the given shape.
    pub fn new(num_channels: usize, num_frames: usize) -> Self {
        Self {
            buffers: vec![vec![0.0; num_frames]; num_channels],
        }
    }

    /// Empty channels with room for `max_frames` each.
    pub fn with_capacity(num_channels: usize, max_frames: usize) -> Self {
        Self {
            buffers: (0..num_channels)
                .map(|_| Vec::with_capacity(max_frames))
                .collect(),
        }
    }

    pub fn num_channels(&self) -> usize {
        self.buffers.len()
    }

    pub fn num_frames(&self) -> usize {
        self.buffers.first().map_or(0, Vec::len)
    }

    /// Resize every channel to `frames`, zero-filling new samples.
    pub fn set_num_frames(&mut self, frames: usize) {
        for channel in self.buffers.iter_mut() {
            channel.resize(frames, 0.0);
        }
    }

    pub fn channel(&self, index: usize) -> &[f32] {
        &self.buffers[index]
    }

    pub fn channel_mut(&mut self, index: usize) -> &mut [f32] {
        &mut self.buffers[index]
    }

    /// Fill from frame-interleaved samples (`L R L R ...`).
    ///
    /// The buffer is resized to the number of whole frames in `interleaved`.
    pub fn copy_from_interleaved(&mut self, interleaved: &[f32]) {
        let channels = self.num_channels();
        if channels == 0 {
            return;
        }

        self.set_num_frames(interleaved.len() / channels);
        for (frame_index, frame) in interleaved.chunks_exact(channels).enumerate() {
            for (channel, &sample) in self.buffers.iter_mut().zip(frame) {
                channel[frame_index] = sample;
            }
        }
    }

    /// Write into frame-interleaved samples. Stops at whichever side runs
    /// out of frames first.
    pub fn copy_to_interleaved(&self, interleaved: &mut [f32]) {
        let channels = self.num_channels();
        if channels == 0 {
            return;
        }

        for (frame_index, frame) in interleaved.chunks_exact_mut(channels).enumerate() {
            if frame_index >= self.num_frames() {
                break;
            }
            for (sample, channel) in frame.iter_mut().zip(&self.buffers) {
                *sample = channel[frame_index];
            }
        }
    }
}
