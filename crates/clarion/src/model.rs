//! The owning model handle and its lifecycle.
//!
//! A [`Model`] is `Created` after a successful [`Model::create`] and becomes
//! `Initialized` once [`Model::initialize`] fixes its format. Processing,
//! parameter access, reset, output delay and voice activity queries all fail
//! with [`Error::NotInitialized`] before that. Dropping the model (or calling
//! [`Model::destroy`]) releases it exactly once.
//!
//! Every failing call leaves the model, its parameters and the caller's
//! buffer exactly as they were.

use std::sync::LazyLock;

use clarion_core::{
    AudioBlock, Config, Error, ParamId, ParameterInfo, Processor, Result, read_param, write_param,
};
use clarion_registry::{ModelRegistry, ModelType};

use crate::license::{KeyFormat, LicenseCheck};
use crate::vad::VoiceActivityDetector;

static REGISTRY: LazyLock<ModelRegistry> = LazyLock::new(ModelRegistry::new);

/// Enhancement parameters.
///
/// Speech-to-text variants do not expose [`Parameter::VoiceGain`]; accessing
/// it on those fails with [`Error::UnknownParameter`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Parameter {
    /// Latency-compensated passthrough at or above 0.5. Range 0.0–1.0, default 0.0.
    Bypass,
    /// Noise attenuation amount. Range 0.0–1.0, default 1.0.
    EnhancementLevel,
    /// Linear output gain. Range 0.1–4.0, default 1.0.
    VoiceGain,
}

impl Parameter {
    /// All parameters in id order.
    pub const ALL: [Parameter; 3] = [
        Parameter::Bypass,
        Parameter::EnhancementLevel,
        Parameter::VoiceGain,
    ];

    /// Stable numeric id.
    pub const fn id(self) -> u32 {
        self as u32
    }

    /// Looks up a parameter by numeric id.
    pub fn from_id(id: u32) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|p| p.id() == id)
            .ok_or(Error::UnknownParameter(id))
    }

    /// Snake-case name used in settings files.
    pub const fn name(self) -> &'static str {
        match self {
            Parameter::Bypass => "bypass",
            Parameter::EnhancementLevel => "enhancement_level",
            Parameter::VoiceGain => "voice_gain",
        }
    }
}

/// Voice activity detector parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VadParameter {
    /// Seconds speech stays detected after energy drops. Range 0.0–1.0, default 0.05.
    SpeechHoldDuration,
    /// Threshold exponent; energy must exceed `10^-sensitivity`. Range 1.0–15.0, default 6.0.
    Sensitivity,
    /// Seconds of energy required before speech is reported. Range 0.0–1.0, default 0.0.
    MinimumSpeechDuration,
}

impl VadParameter {
    /// All VAD parameters in id order.
    pub const ALL: [VadParameter; 3] = [
        VadParameter::SpeechHoldDuration,
        VadParameter::Sensitivity,
        VadParameter::MinimumSpeechDuration,
    ];

    /// Stable numeric id.
    pub const fn id(self) -> u32 {
        self as u32
    }

    /// Looks up a VAD parameter by numeric id.
    pub fn from_id(id: u32) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|p| p.id() == id)
            .ok_or(Error::UnknownParameter(id))
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum State {
    Created,
    Initialized(Config),
}

/// One instance of a speech model.
///
/// Not `Sync`: calls on one model must be serialized by the caller. Distinct
/// models share nothing and may run on different threads.
pub struct Model {
    model_type: ModelType,
    processor: Box<dyn Processor + Send>,
    vad: VoiceActivityDetector,
    state: State,
}

impl core::fmt::Debug for Model {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Model")
            .field("model_type", &self.model_type)
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}

impl Model {
    /// Creates a model, checking `license_key` with [`KeyFormat`].
    pub fn create(model_type: ModelType, license_key: &str) -> Result<Self> {
        Self::create_with(model_type, license_key, &KeyFormat)
    }

    /// Creates a model using a custom license check.
    pub fn create_with(
        model_type: ModelType,
        license_key: &str,
        check: &dyn LicenseCheck,
    ) -> Result<Self> {
        if let Err(reason) = check.check(license_key) {
            tracing::warn!(model = %model_type, reason, "license rejected");
            return Err(Error::LicenseRejected(reason));
        }

        let model = Self {
            model_type,
            processor: REGISTRY.create(model_type),
            vad: VoiceActivityDetector::new(),
            state: State::Created,
        };
        tracing::info!(model = %model_type, "model created");
        Ok(model)
    }

    /// Fixes the audio format. See [`initialize_config`](Self::initialize_config).
    pub fn initialize(
        &mut self,
        sample_rate: u32,
        num_channels: u16,
        num_frames: usize,
        allow_variable_frames: bool,
    ) -> Result<()> {
        self.initialize_config(
            &Config::new(sample_rate, num_channels, num_frames)
                .with_variable_frames(allow_variable_frames),
        )
    }

    /// Fixes the audio format, flushing all signal state.
    ///
    /// Legal in either state; re-initializing replaces the previous format.
    /// Parameter values survive. On failure the previous configuration (or
    /// the `Created` state) is kept.
    pub fn initialize_config(&mut self, config: &Config) -> Result<()> {
        if let Err(e) = self.processor.limits().validate(config) {
            tracing::warn!(model = %self.model_type, error = %e, "format rejected");
            return Err(e);
        }

        if let Err(e) = self.processor.configure(config) {
            // the processor may be half-configured; force a fresh initialize
            self.state = State::Created;
            tracing::warn!(model = %self.model_type, error = %e, "configure failed");
            return Err(e);
        }
        self.vad.set_sample_rate(config.sample_rate);
        self.state = State::Initialized(*config);

        tracing::info!(
            model = %self.model_type,
            sample_rate = config.sample_rate,
            num_channels = config.num_channels,
            num_frames = config.num_frames,
            variable_frames = config.allow_variable_frames,
            output_delay = self.processor.latency_frames(),
            "model initialized"
        );
        Ok(())
    }

    /// Clears all streaming state. Format and parameters are kept.
    pub fn reset(&mut self) -> Result<()> {
        self.config()?;
        self.processor.reset();
        self.vad.reset();
        tracing::debug!(model = %self.model_type, "model reset");
        Ok(())
    }

    /// Processes channel-interleaved samples in place.
    pub fn process_interleaved(
        &mut self,
        buffer: &mut [f32],
        num_channels: usize,
        num_frames: usize,
    ) -> Result<()> {
        self.check_shape(num_channels, num_frames)?;
        let mut block = AudioBlock::interleaved(buffer, num_channels, num_frames)?;
        self.run(&mut block)
    }

    /// Processes one buffer per channel in place.
    pub fn process_planar(
        &mut self,
        channels: &mut [&mut [f32]],
        num_channels: usize,
        num_frames: usize,
    ) -> Result<()> {
        self.check_shape(num_channels, num_frames)?;
        let mut block = AudioBlock::planar(channels, num_channels, num_frames)?;
        self.run(&mut block)
    }

    /// Processes channel-sequential samples (all of channel 0, then all of
    /// channel 1, ...) in place.
    pub fn process_sequential(
        &mut self,
        buffer: &mut [f32],
        num_channels: usize,
        num_frames: usize,
    ) -> Result<()> {
        self.check_shape(num_channels, num_frames)?;
        let mut block = AudioBlock::sequential(buffer, num_channels, num_frames)?;
        self.run(&mut block)
    }

    /// Sets an enhancement parameter. Takes effect from the next processed
    /// frame, smoothed over a few milliseconds.
    pub fn set_parameter(&mut self, parameter: Parameter, value: f32) -> Result<()> {
        self.config()?;
        write_param(&mut *self.processor, ParamId(parameter.id()), value)
            .inspect_err(|e| tracing::warn!(model = %self.model_type, error = %e, "parameter rejected"))?;
        tracing::debug!(model = %self.model_type, parameter = parameter.name(), value, "parameter set");
        Ok(())
    }

    /// Resolves a parameter this variant exposes by display name or
    /// snake-case name, ignoring ASCII case.
    pub fn find_parameter(&self, name: &str) -> Option<Parameter> {
        let index = self.processor.find_param_by_name(name)?;
        let desc = self.processor.param_info(index)?;
        Parameter::from_id(desc.id.0).ok()
    }

    /// Last value set for `parameter`, or its default.
    pub fn get_parameter(&self, parameter: Parameter) -> Result<f32> {
        self.config()?;
        read_param(&*self.processor, ParamId(parameter.id()))
    }

    /// Sets a voice activity detector parameter.
    pub fn set_vad_parameter(&mut self, parameter: VadParameter, value: f32) -> Result<()> {
        self.config()?;
        write_param(&mut self.vad, ParamId(parameter.id()), value)
            .inspect_err(|e| tracing::warn!(model = %self.model_type, error = %e, "parameter rejected"))?;
        tracing::debug!(model = %self.model_type, ?parameter, value, "vad parameter set");
        Ok(())
    }

    /// Last value set for a VAD parameter, or its default.
    pub fn get_vad_parameter(&self, parameter: VadParameter) -> Result<f32> {
        self.config()?;
        read_param(&self.vad, ParamId(parameter.id()))
    }

    /// Whether the most recent output contained speech.
    pub fn is_speech_detected(&self) -> Result<bool> {
        self.config()?;
        Ok(self.vad.is_speech_detected())
    }

    /// Delay in frames between input and corresponding output.
    pub fn output_delay(&self) -> Result<usize> {
        self.config()?;
        Ok(self.processor.latency_frames())
    }

    /// The variant's native sample rate. Advisory.
    pub fn optimal_sample_rate(&self) -> u32 {
        self.processor.timing().optimal_sample_rate()
    }

    /// Frames in one processing window at the configured rate, or at the
    /// native rate before initialization. Advisory.
    pub fn optimal_num_frames(&self) -> usize {
        let rate = match self.state {
            State::Initialized(config) => config.sample_rate,
            State::Created => self.optimal_sample_rate(),
        };
        self.optimal_num_frames_for(rate)
    }

    /// Frames in one processing window at `sample_rate`.
    pub fn optimal_num_frames_for(&self, sample_rate: u32) -> usize {
        self.processor.timing().optimal_num_frames(sample_rate)
    }

    /// Mono configuration at the native rate and window.
    pub fn optimal_config(&self) -> Config {
        self.processor.timing().optimal_config()
    }

    /// The variant this model was created as.
    pub fn model_type(&self) -> ModelType {
        self.model_type
    }

    /// Returns `true` once [`initialize`](Self::initialize) has succeeded.
    pub fn is_initialized(&self) -> bool {
        matches!(self.state, State::Initialized(_))
    }

    /// The active configuration.
    pub fn config(&self) -> Result<Config> {
        match self.state {
            State::Initialized(config) => Ok(config),
            State::Created => Err(Error::NotInitialized),
        }
    }

    /// Releases the model. Equivalent to dropping it.
    pub fn destroy(self) {}

    fn check_shape(&self, num_channels: usize, num_frames: usize) -> Result<()> {
        let config = self.config()?;
        config.check_channels(num_channels)?;
        config.check_frames(num_frames)
    }

    fn run(&mut self, block: &mut AudioBlock<'_, '_>) -> Result<()> {
        self.processor.process(block)?;
        self.vad.update(block.mean_square(), block.num_frames());
        Ok(())
    }
}

impl Drop for Model {
    fn drop(&mut self) {
        tracing::info!(model = %self.model_type, "model destroyed");
    }
}
