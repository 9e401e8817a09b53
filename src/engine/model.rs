use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::dsp::distortion::{hard_clip, saturation, soft_clip};

/// Transfer function applied by the engine.
///
/// The set is closed, so dispatch is a plain `match` rather than a trait
/// object.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum DistortionModel {
    /// Linear gain into a ±0.99 limiter - harsh, buzzy
    #[default]
    HardClip,
    /// Arctangent knee - smooth, rounded
    SoftClip,
    /// Asymmetric tanh/sinh curve - warm, adds even harmonics
    Saturation,
}

impl DistortionModel {
    /// Every model, in host choice order.
    pub const ALL: [Self; 3] = [Self::HardClip, Self::SoftClip, Self::Saturation];

    /// Position in the host's choice list.
    pub fn index(self) -> u8 {
        match self {
            Self::HardClip => 0,
            Self::SoftClip => 1,
            Self::Saturation => 2,
        }
    }

    /// Model for a host choice index, `None` if out of range.
    pub fn from_index(index: u8) -> Option<Self> {
        Self::ALL.get(index as usize).copied()
    }

    /// Label shown by hosts for this choice.
    pub fn label(self) -> &'static str {
        match self {
            Self::HardClip => "Hard",
            Self::SoftClip => "Soft",
            Self::Saturation => "Saturation",
        }
    }

    /// The following model, wrapping around.
    pub fn next(self) -> Self {
        Self::ALL[(self.index() as usize + 1) % Self::ALL.len()]
    }

    /// Run one sample through this model's full path.
    #[inline]
    pub fn process(self, sample: f32, drive_db: f32, mix: f32, output_db: f32) -> f32 {
        match self {
            Self::HardClip => hard_clip(sample, drive_db, mix, output_db),
            Self::SoftClip => soft_clip(sample, drive_db, mix, output_db),
            Self::Saturation => saturation(sample, drive_db, mix, output_db),
        }
    }
}

impl TryFrom<u8> for DistortionModel {
    type Error = u8;

    fn try_from(index: u8) -> Result<Self, Self::Error> {
        Self::from_index(index).ok_or(index)
    }
}

impl fmt::Display for DistortionModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
