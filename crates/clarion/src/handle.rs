//! Handle-based surface returning flat [`ErrorCode`]s.
//!
//! Hosts that cannot hold a [`Model`] directly (a binding layer, a plugin
//! shim) address models through a [`Runtime`] by [`ModelHandle`]. Every
//! function returns an [`ErrorCode`], paired with a value where one is
//! produced; the value is meaningless unless the code is
//! [`ErrorCode::Success`].
//!
//! A handle carries its slot's generation. Destroying a model bumps the
//! generation, so the stale handle, and any copy of it, fails with
//! [`ErrorCode::InvalidHandle`] even after the slot is reused.

use clarion_core::{Error, ErrorCode, Result};
use clarion_registry::ModelType;

use crate::model::{Model, Parameter, VadParameter};

/// Opaque reference to a model owned by a [`Runtime`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ModelHandle {
    index: u32,
    generation: u32,
}

#[derive(Debug)]
struct Slot {
    generation: u32,
    model: Option<Model>,
}

/// Table of live models.
#[derive(Debug, Default)]
pub struct Runtime {
    slots: Vec<Slot>,
    free: Vec<u32>,
}

fn code(result: Result<()>) -> ErrorCode {
    ErrorCode::from_result(&result)
}

fn pair<T: Default>(result: Result<T>) -> (T, ErrorCode) {
    match result {
        Ok(value) => (value, ErrorCode::Success),
        Err(e) => (T::default(), e.code()),
    }
}

impl Runtime {
    /// Creates an empty runtime.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of live models.
    pub fn len(&self) -> usize {
        self.slots.iter().filter(|s| s.model.is_some()).count()
    }

    /// Returns `true` if no model is live.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Creates a model by numeric [`ModelType`] id. No handle is produced on
    /// failure.
    pub fn create(&mut self, model_type: u32, license_key: &str) -> (Option<ModelHandle>, ErrorCode) {
        let model = ModelType::from_id(model_type).and_then(|t| Model::create(t, license_key));
        match model {
            Ok(model) => (Some(self.insert(model)), ErrorCode::Success),
            Err(e) => (None, e.code()),
        }
    }

    /// Adopts an existing model.
    pub fn insert(&mut self, model: Model) -> ModelHandle {
        if let Some(index) = self.free.pop() {
            let slot = &mut self.slots[index as usize];
            slot.model = Some(model);
            ModelHandle {
                index,
                generation: slot.generation,
            }
        } else {
            let index = self.slots.len() as u32;
            self.slots.push(Slot {
                generation: 0,
                model: Some(model),
            });
            ModelHandle {
                index,
                generation: 0,
            }
        }
    }

    /// Borrows the model behind `handle`.
    pub fn get(&self, handle: ModelHandle) -> Result<&Model> {
        self.slots
            .get(handle.index as usize)
            .filter(|s| s.generation == handle.generation)
            .and_then(|s| s.model.as_ref())
            .ok_or(Error::InvalidHandle)
    }

    /// Mutably borrows the model behind `handle`.
    pub fn get_mut(&mut self, handle: ModelHandle) -> Result<&mut Model> {
        self.slots
            .get_mut(handle.index as usize)
            .filter(|s| s.generation == handle.generation)
            .and_then(|s| s.model.as_mut())
            .ok_or(Error::InvalidHandle)
    }

    /// Releases the model behind `handle`. A stale handle is ignored.
    pub fn destroy(&mut self, handle: ModelHandle) {
        let Some(slot) = self
            .slots
            .get_mut(handle.index as usize)
            .filter(|s| s.generation == handle.generation)
        else {
            return;
        };
        if let Some(model) = slot.model.take() {
            slot.generation = slot.generation.wrapping_add(1);
            self.free.push(handle.index);
            model.destroy();
        }
    }

    /// See [`Model::initialize`].
    pub fn initialize(
        &mut self,
        handle: ModelHandle,
        sample_rate: u32,
        num_channels: u16,
        num_frames: usize,
        variable_frames: bool,
    ) -> ErrorCode {
        code(self.get_mut(handle).and_then(|m| {
            m.initialize(sample_rate, num_channels, num_frames, variable_frames)
        }))
    }

    /// See [`Model::process_interleaved`].
    pub fn process_interleaved(
        &mut self,
        handle: ModelHandle,
        samples: &mut [f32],
        num_channels: u16,
        num_frames: usize,
    ) -> ErrorCode {
        code(self.get_mut(handle).and_then(|m| {
            m.process_interleaved(samples, usize::from(num_channels), num_frames)
        }))
    }

    /// See [`Model::process_planar`].
    pub fn process_planar(
        &mut self,
        handle: ModelHandle,
        channels: &mut [&mut [f32]],
        num_channels: u16,
        num_frames: usize,
    ) -> ErrorCode {
        code(self.get_mut(handle).and_then(|m| {
            m.process_planar(channels, usize::from(num_channels), num_frames)
        }))
    }

    /// See [`Model::process_sequential`].
    pub fn process_sequential(
        &mut self,
        handle: ModelHandle,
        samples: &mut [f32],
        num_channels: u16,
        num_frames: usize,
    ) -> ErrorCode {
        code(self.get_mut(handle).and_then(|m| {
            m.process_sequential(samples, usize::from(num_channels), num_frames)
        }))
    }

    /// See [`Model::reset`].
    pub fn reset(&mut self, handle: ModelHandle) -> ErrorCode {
        code(self.get_mut(handle).and_then(Model::reset))
    }

    /// Sets an enhancement parameter by numeric id.
    pub fn set_parameter(&mut self, handle: ModelHandle, parameter: u32, value: f32) -> ErrorCode {
        code(self.get_mut(handle).and_then(|m| {
            m.config()?;
            m.set_parameter(Parameter::from_id(parameter)?, value)
        }))
    }

    /// Reads an enhancement parameter by numeric id.
    pub fn get_parameter(&self, handle: ModelHandle, parameter: u32) -> (f32, ErrorCode) {
        pair(self.get(handle).and_then(|m| {
            m.config()?;
            m.get_parameter(Parameter::from_id(parameter)?)
        }))
    }

    /// Sets a VAD parameter by numeric id.
    pub fn set_vad_parameter(&mut self, handle: ModelHandle, parameter: u32, value: f32) -> ErrorCode {
        code(self.get_mut(handle).and_then(|m| {
            m.config()?;
            m.set_vad_parameter(VadParameter::from_id(parameter)?, value)
        }))
    }

    /// Reads a VAD parameter by numeric id.
    pub fn get_vad_parameter(&self, handle: ModelHandle, parameter: u32) -> (f32, ErrorCode) {
        pair(self.get(handle).and_then(|m| {
            m.config()?;
            m.get_vad_parameter(VadParameter::from_id(parameter)?)
        }))
    }

    /// See [`Model::is_speech_detected`].
    pub fn is_speech_detected(&self, handle: ModelHandle) -> (bool, ErrorCode) {
        pair(self.get(handle).and_then(Model::is_speech_detected))
    }

    /// See [`Model::output_delay`].
    pub fn get_output_delay(&self, handle: ModelHandle) -> (usize, ErrorCode) {
        pair(self.get(handle).and_then(Model::output_delay))
    }

    /// See [`Model::optimal_sample_rate`].
    pub fn get_optimal_sample_rate(&self, handle: ModelHandle) -> (u32, ErrorCode) {
        pair(self.get(handle).map(Model::optimal_sample_rate))
    }

    /// See [`Model::optimal_num_frames`].
    pub fn get_optimal_num_frames(&self, handle: ModelHandle) -> (usize, ErrorCode) {
        pair(self.get(handle).map(Model::optimal_num_frames))
    }

    /// See [`Model::optimal_num_frames_for`].
    pub fn get_optimal_num_frames_for(
        &self,
        handle: ModelHandle,
        sample_rate: u32,
    ) -> (usize, ErrorCode) {
        pair(self.get(handle).map(|m| m.optimal_num_frames_for(sample_rate)))
    }

    /// The library version.
    pub fn get_sdk_version() -> &'static str {
        crate::sdk_version()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_failures_produce_no_handle() {
        let mut rt = Runtime::new();
        assert_eq!(rt.create(99, "valid-key"), (None, ErrorCode::InvalidModelType));
        assert_eq!(rt.create(0, ""), (None, ErrorCode::LicenseRejected));
        assert!(rt.is_empty());
    }

    #[test]
    fn stale_handle_after_slot_reuse() {
        let mut rt = Runtime::new();
        let (a, _) = rt.create(0, "valid-key");
        let a = a.unwrap();
        rt.destroy(a);
        let (b, _) = rt.create(1, "valid-key");
        let b = b.unwrap();
        assert_ne!(a, b);
        assert_eq!(rt.len(), 1);

        assert_eq!(rt.initialize(a, 48_000, 1, 480, false), ErrorCode::InvalidHandle);
        assert_eq!(rt.get_optimal_sample_rate(a), (0, ErrorCode::InvalidHandle));
        assert_eq!(rt.get_optimal_sample_rate(b), (16_000, ErrorCode::Success));
        // double destroy is a no-op
        rt.destroy(a);
        assert_eq!(rt.len(), 1);
    }

    #[test]
    fn unknown_parameter_id_is_invalid_argument() {
        let mut rt = Runtime::new();
        let h = rt.create(0, "valid-key").0.unwrap();
        assert_eq!(rt.set_parameter(h, 7, 0.5), ErrorCode::NotInitialized);
        assert_eq!(rt.initialize(h, 48_000, 1, 480, false), ErrorCode::Success);
        assert_eq!(rt.set_parameter(h, 7, 0.5), ErrorCode::InvalidArgument);
        assert_eq!(rt.get_parameter(h, 7), (0.0, ErrorCode::InvalidArgument));
        assert_eq!(rt.get_vad_parameter(h, 1), (6.0, ErrorCode::Success));
    }

    #[test]
    fn optimal_frames_at_caller_rate() {
        let mut rt = Runtime::new();
        let h = rt.create(0, "valid-key").0.unwrap();
        assert_eq!(rt.get_optimal_num_frames_for(h, 16_000), (160, ErrorCode::Success));
        assert_eq!(rt.get_optimal_num_frames_for(h, 48_000), rt.get_optimal_num_frames(h));
        rt.destroy(h);
        assert_eq!(rt.get_optimal_num_frames_for(h, 16_000), (0, ErrorCode::InvalidHandle));
    }

    #[test]
    fn sdk_version_matches_crate() {
        assert_eq!(Runtime::get_sdk_version(), env!("CARGO_PKG_VERSION"));
    }
}
