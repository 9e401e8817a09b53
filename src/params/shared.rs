use std::sync::atomic::{AtomicU8, Ordering};

use atomic_float::AtomicF32;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::{model_from_plain, ParamId};
use crate::engine::DistortionModel;

/// Plain copy of every parameter value.
///
/// `Default` gives the engine's own defaults (fully dry, unity output); use
/// [`ParamSnapshot::host_defaults`] for the values a host shows on insert.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ParamSnapshot {
    pub model: DistortionModel,
    pub drive_db: f32,
    pub output_db: f32,
    pub mix: f32,
}

impl ParamSnapshot {
    pub fn host_defaults() -> Self {
        Self {
            model: model_from_plain(ParamId::Model.spec().default),
            drive_db: ParamId::Drive.spec().default,
            output_db: ParamId::Output.spec().default,
            mix: ParamId::Mix.spec().default,
        }
    }
}

/// Parameter values shared between the control thread and the audio thread.
///
/// Every parameter is one atomic, written in a single store, so the audio
/// thread can never observe half an update. There is no ordering between
/// parameters: a drive and a mix change made together may land in different
/// blocks.
///
/// Writes clamp into the parameter's range and drop NaN.
pub struct DistortionParams {
    drive_db: AtomicF32,
    output_db: AtomicF32,
    mix: AtomicF32,
    model: AtomicU8,
}

impl DistortionParams {
    /// Engine defaults: 0 dB drive, 0 dB output, fully dry, hard clip.
    pub fn new() -> Self {
        Self::from_snapshot(&ParamSnapshot::default())
    }

    /// The layout defaults a host starts a fresh instance with (fully wet).
    pub fn with_host_defaults() -> Self {
        Self::from_snapshot(&ParamSnapshot::host_defaults())
    }

    pub fn from_snapshot(snapshot: &ParamSnapshot) -> Self {
        let params = Self {
            drive_db: AtomicF32::new(0.0),
            output_db: AtomicF32::new(0.0),
            mix: AtomicF32::new(0.0),
            model: AtomicU8::new(DistortionModel::default().index()),
        };
        params.restore(snapshot);
        params
    }

    pub fn set_drive(&self, db: f32) {
        store_clamped(&self.drive_db, ParamId::Drive, db);
    }

    pub fn set_output(&self, db: f32) {
        store_clamped(&self.output_db, ParamId::Output, db);
    }

    pub fn set_mix(&self, mix: f32) {
        store_clamped(&self.mix, ParamId::Mix, mix);
    }

    pub fn set_model(&self, model: DistortionModel) {
        self.model.store(model.index(), Ordering::Relaxed);
    }

    pub fn drive_db(&self) -> f32 {
        self.drive_db.load(Ordering::Relaxed)
    }

    pub fn output_db(&self) -> f32 {
        self.output_db.load(Ordering::Relaxed)
    }

    pub fn mix(&self) -> f32 {
        self.mix.load(Ordering::Relaxed)
    }

    pub fn model(&self) -> DistortionModel {
        DistortionModel::from_index(self.model.load(Ordering::Relaxed)).unwrap_or_default()
    }

    /// Set a parameter from its plain value (dB, fraction or choice index).
    pub fn set(&self, id: ParamId, value: f32) {
        match id {
            ParamId::Model => {
                if !value.is_nan() {
                    self.set_model(model_from_plain(value));
                }
            }
            ParamId::Drive => self.set_drive(value),
            ParamId::Output => self.set_output(value),
            ParamId::Mix => self.set_mix(value),
        }
    }

    /// Plain value of a parameter.
    pub fn get(&self, id: ParamId) -> f32 {
        match id {
            ParamId::Model => self.model().index() as f32,
            ParamId::Drive => self.drive_db(),
            ParamId::Output => self.output_db(),
            ParamId::Mix => self.mix(),
        }
    }

    /// Set a parameter from a host's normalized 0..1 value.
    pub fn set_normalized(&self, id: ParamId, normalized: f32) {
        if normalized.is_nan() {
            return;
        }
        self.set(id, id.spec().denormalize(normalized));
    }

    pub fn get_normalized(&self, id: ParamId) -> f32 {
        id.spec().normalize(self.get(id))
    }

    pub fn snapshot(&self) -> ParamSnapshot {
        ParamSnapshot {
            model: self.model(),
            drive_db: self.drive_db(),
            output_db: self.output_db(),
            mix: self.mix(),
        }
    }

    pub fn restore(&self, snapshot: &ParamSnapshot) {
        self.set_model(snapshot.model);
        self.set_drive(snapshot.drive_db);
        self.set_output(snapshot.output_db);
        self.set_mix(snapshot.mix);
    }
}

impl Default for DistortionParams {
    fn default() -> Self {
        Self::new()
    }
}

fn store_clamped(slot: &AtomicF32, id: ParamId, value: f32) {
    if value.is_nan() {
        return;
    }
    slot.store(id.spec().clamp(value), Ordering::Relaxed);
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::thread;

    #[test]
    fn test_engine_defaults() {
        let params = DistortionParams::new();
        assert_eq!(params.snapshot(), ParamSnapshot::default());
        assert_eq!(params.mix(), 0.0);
        assert_eq!(params.model(), DistortionModel::HardClip);
    }

    #[test]
    fn test_host_defaults_are_fully_wet() {
        let params = DistortionParams::with_host_defaults();
        assert_eq!(params.mix(), 1.0);
        assert_eq!(params.drive_db(), 0.0);
        assert_eq!(params.output_db(), 0.0);
    }

    #[test]
    fn test_setters_clamp() {
        let params = DistortionParams::new();
        params.set_drive(40.0);
        params.set_output(-90.0);
        params.set_mix(1.5);

        assert_eq!(params.drive_db(), 24.0);
        assert_eq!(params.output_db(), -24.0);
        assert_eq!(params.mix(), 1.0);
    }

    #[test]
    fn test_nan_is_ignored() {
        let params = DistortionParams::new();
        params.set_mix(0.4);
        params.set_mix(f32::NAN);
        params.set(ParamId::Model, f32::NAN);
        params.set_normalized(ParamId::Drive, f32::NAN);

        assert_eq!(params.mix(), 0.4);
        assert_eq!(params.model(), DistortionModel::HardClip);
        assert_eq!(params.drive_db(), 0.0);
    }

    #[test]
    fn test_normalized_round_trip() {
        let params = DistortionParams::new();
        params.set_normalized(ParamId::Drive, 0.5);
        assert_eq!(params.drive_db(), 12.0);
        assert_eq!(params.get_normalized(ParamId::Drive), 0.5);

        params.set_normalized(ParamId::Model, 1.0);
        assert_eq!(params.model(), DistortionModel::Saturation);
    }

    #[test]
    fn test_snapshot_restore() {
        let source = DistortionParams::new();
        source.set_model(DistortionModel::SoftClip);
        source.set_drive(9.0);
        source.set_output(-3.0);
        source.set_mix(0.25);

        let target = DistortionParams::with_host_defaults();
        target.restore(&source.snapshot());

        assert_eq!(target.snapshot(), source.snapshot());
    }

    #[test]
    fn test_writes_visible_across_threads() {
        let params = Arc::new(DistortionParams::new());
        let writer = Arc::clone(&params);

        thread::spawn(move || {
            writer.set_drive(18.0);
            writer.set_model(DistortionModel::Saturation);
        })
        .join()
        .unwrap();

        assert_eq!(params.drive_db(), 18.0);
        assert_eq!(params.model(), DistortionModel::Saturation);
    }
}
