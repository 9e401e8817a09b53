//! Host-facing parameter surface.
//!
//! The engine never talks to a plugin host directly. A host adapter (plugin
//! wrapper, standalone app, test harness) registers the layout described by
//! [`ParamId::spec`], and forwards value changes into a shared
//! [`DistortionParams`] block from whatever thread it likes. The audio thread
//! picks the values up at the next block boundary.

/// Lock-free parameter block shared between control and audio threads.
pub mod shared;

pub use shared::{DistortionParams, ParamSnapshot};

use crate::engine::DistortionModel;

/// Labels for the model choice parameter, in index order.
pub const MODEL_CHOICES: [&str; 3] = ["Hard", "Soft", "Saturation"];

/// Static description of one host parameter.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParamSpec {
    /// Stable identifier used for automation and saved state
    pub id: &'static str,
    /// Display name
    pub name: &'static str,
    pub min: f32,
    pub max: f32,
    /// Value a freshly inserted plugin starts with
    pub default: f32,
    pub unit: &'static str,
    /// Non-empty for choice parameters; plain values are choice indices
    pub choices: &'static [&'static str],
}

impl ParamSpec {
    pub fn is_choice(&self) -> bool {
        !self.choices.is_empty()
    }

    /// Clamp a plain value into range, snapping choices to an index.
    pub fn clamp(&self, value: f32) -> f32 {
        let value = value.clamp(self.min, self.max);
        if self.is_choice() {
            value.round()
        } else {
            value
        }
    }

    /// Map a plain value onto 0..1.
    pub fn normalize(&self, value: f32) -> f32 {
        (self.clamp(value) - self.min) / (self.max - self.min)
    }

    /// Map a 0..1 value back to plain units.
    pub fn denormalize(&self, normalized: f32) -> f32 {
        let normalized = normalized.clamp(0.0, 1.0);
        self.clamp(self.min + normalized * (self.max - self.min))
    }
}

const MODEL_SPEC: ParamSpec = ParamSpec {
    id: "disModel",
    name: "Distortion Model",
    min: 0.0,
    max: (MODEL_CHOICES.len() - 1) as f32,
    default: 0.0,
    unit: "",
    choices: &MODEL_CHOICES,
};

const DRIVE_SPEC: ParamSpec = ParamSpec {
    id: "input",
    name: "Input",
    min: 0.0,
    max: 24.0,
    default: 0.0,
    unit: "dB",
    choices: &[],
};

const OUTPUT_SPEC: ParamSpec = ParamSpec {
    id: "output",
    name: "Output",
    min: -24.0,
    max: 24.0,
    default: 0.0,
    unit: "dB",
    choices: &[],
};

const MIX_SPEC: ParamSpec = ParamSpec {
    id: "mix",
    name: "Mix",
    min: 0.0,
    max: 1.0,
    default: 1.0,
    unit: "",
    choices: &[],
};

/// The four parameters the engine exposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParamId {
    Model,
    Drive,
    Output,
    Mix,
}

impl ParamId {
    /// Registration order.
    pub const ALL: [Self; 4] = [Self::Model, Self::Drive, Self::Output, Self::Mix];

    pub fn spec(self) -> &'static ParamSpec {
        match self {
            Self::Model => &MODEL_SPEC,
            Self::Drive => &DRIVE_SPEC,
            Self::Output => &OUTPUT_SPEC,
            Self::Mix => &MIX_SPEC,
        }
    }

    /// Look up a parameter by its stable identifier.
    pub fn from_id(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|param| param.spec().id == id)
    }
}

/// Model for a plain choice value, rounding and clamping like the host does.
pub(crate) fn model_from_plain(value: f32) -> DistortionModel {
    let index = MODEL_SPEC.clamp(value) as u8;
    DistortionModel::from_index(index).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout_ranges() {
        assert_eq!((DRIVE_SPEC.min, DRIVE_SPEC.max), (0.0, 24.0));
        assert_eq!((OUTPUT_SPEC.min, OUTPUT_SPEC.max), (-24.0, 24.0));
        assert_eq!((MIX_SPEC.min, MIX_SPEC.max), (0.0, 1.0));
        assert_eq!(MODEL_SPEC.max, 2.0);
    }

    #[test]
    fn test_choices_match_models() {
        for model in DistortionModel::ALL {
            assert_eq!(MODEL_CHOICES[model.index() as usize], model.label());
        }
    }

    #[test]
    fn test_from_id() {
        assert_eq!(ParamId::from_id("input"), Some(ParamId::Drive));
        assert_eq!(ParamId::from_id("disModel"), Some(ParamId::Model));
        assert_eq!(ParamId::from_id("tone"), None);
    }

    #[test]
    fn test_normalize_range_ends() {
        for param in ParamId::ALL {
            let spec = param.spec();
            assert_eq!(spec.normalize(spec.min), 0.0);
            assert_eq!(spec.normalize(spec.max), 1.0);
            assert_eq!(spec.denormalize(0.0), spec.min);
            assert_eq!(spec.denormalize(1.0), spec.max);
        }
    }

    #[test]
    fn test_output_midpoint_is_unity() {
        assert_eq!(OUTPUT_SPEC.denormalize(0.5), 0.0);
        assert_eq!(OUTPUT_SPEC.normalize(0.0), 0.5);
    }

    #[test]
    fn test_clamp_out_of_domain() {
        assert_eq!(MIX_SPEC.clamp(1.7), 1.0);
        assert_eq!(MIX_SPEC.clamp(-0.2), 0.0);
        assert_eq!(DRIVE_SPEC.clamp(30.0), 24.0);
    }

    #[test]
    fn test_choice_snaps_to_index() {
        assert_eq!(MODEL_SPEC.denormalize(0.4), 1.0);
        assert_eq!(MODEL_SPEC.denormalize(0.8), 2.0);
        assert_eq!(model_from_plain(1.2), DistortionModel::SoftClip);
        assert_eq!(model_from_plain(9.0), DistortionModel::Saturation);
    }
}
