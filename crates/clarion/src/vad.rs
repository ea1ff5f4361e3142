//! Energy-based voice activity detection on processed output.
//!
//! The detector sees one energy value per processed block (the block's mean
//! square) and turns it into a speech / no-speech decision with a minimum
//! onset duration and a release hold.
//!
//! ## Parameters (`ParameterInfo`)
//!
//! | Index | Id | Name | Range | Default |
//! |-------|----|------|-------|---------|
//! | 0 | 0 | Speech Hold Duration | 0.0–1.0 s | 0.05 |
//! | 1 | 1 | Sensitivity | 1.0–15.0 | 6.0 |
//! | 2 | 2 | Minimum Speech Duration | 0.0–1.0 s | 0.0 |
//!
//! Sensitivity sets the energy threshold to `10^-sensitivity`.

use clarion_core::{ParamDescriptor, ParamId, ParameterInfo};
use libm::powf;

const HOLD: ParamDescriptor =
    ParamDescriptor::seconds("Speech Hold Duration", "Hold", 0.0, 1.0, 0.05)
        .with_id(ParamId(0), "speech_hold_duration");
const SENSITIVITY: ParamDescriptor =
    ParamDescriptor::custom("Sensitivity", "Sens", clarion_core::ParamUnit::None, 1.0, 15.0, 6.0)
        .with_id(ParamId(1), "sensitivity");
const MIN_SPEECH: ParamDescriptor =
    ParamDescriptor::seconds("Minimum Speech Duration", "MinSpch", 0.0, 1.0, 0.0)
        .with_id(ParamId(2), "minimum_speech_duration");

static DESCRIPTORS: [ParamDescriptor; 3] = [HOLD, SENSITIVITY, MIN_SPEECH];

/// Voice activity detector state.
#[derive(Debug, Clone)]
pub struct VoiceActivityDetector {
    hold_s: f32,
    sensitivity: f32,
    min_speech_s: f32,

    sample_rate: u32,
    threshold: f32,
    hold_frames: usize,
    min_speech_frames: usize,

    speech: bool,
    above_frames: usize,
    hold_remaining: usize,
}

impl Default for VoiceActivityDetector {
    fn default() -> Self {
        Self::new()
    }
}

impl VoiceActivityDetector {
    /// Creates a detector with default parameters, not yet tied to a rate.
    pub fn new() -> Self {
        let mut vad = Self {
            hold_s: HOLD.default,
            sensitivity: SENSITIVITY.default,
            min_speech_s: MIN_SPEECH.default,
            sample_rate: 0,
            threshold: 0.0,
            hold_frames: 0,
            min_speech_frames: 0,
            speech: false,
            above_frames: 0,
            hold_remaining: 0,
        };
        vad.recalculate();
        vad
    }

    /// Ties durations to `sample_rate` and clears detection state.
    pub fn set_sample_rate(&mut self, sample_rate: u32) {
        self.sample_rate = sample_rate;
        self.recalculate();
        self.reset();
    }

    /// Feeds the mean square energy of a block of `num_frames` frames.
    pub fn update(&mut self, energy: f32, num_frames: usize) {
        if energy > self.threshold {
            self.above_frames = self.above_frames.saturating_add(num_frames);
            if self.above_frames >= self.min_speech_frames {
                self.speech = true;
                self.hold_remaining = self.hold_frames;
            }
        } else {
            self.above_frames = 0;
            if self.speech {
                if self.hold_remaining > num_frames {
                    self.hold_remaining -= num_frames;
                } else {
                    self.hold_remaining = 0;
                    self.speech = false;
                }
            }
        }
    }

    /// Current decision.
    pub fn is_speech_detected(&self) -> bool {
        self.speech
    }

    /// Energy above which a block counts as speech.
    pub fn threshold(&self) -> f32 {
        self.threshold
    }

    /// Clears detection state; parameters are kept.
    pub fn reset(&mut self) {
        self.speech = false;
        self.above_frames = 0;
        self.hold_remaining = 0;
    }

    fn recalculate(&mut self) {
        let rate = self.sample_rate as f32;
        self.threshold = powf(10.0, -self.sensitivity);
        self.hold_frames = (self.hold_s * rate) as usize;
        self.min_speech_frames = (self.min_speech_s * rate) as usize;
    }
}

impl ParameterInfo for VoiceActivityDetector {
    fn param_count(&self) -> usize {
        DESCRIPTORS.len()
    }

    fn param_info(&self, index: usize) -> Option<ParamDescriptor> {
        DESCRIPTORS.get(index).copied()
    }

    fn get_param(&self, index: usize) -> f32 {
        match index {
            0 => self.hold_s,
            1 => self.sensitivity,
            2 => self.min_speech_s,
            _ => 0.0,
        }
    }

    fn set_param(&mut self, index: usize, value: f32) {
        match index {
            0 => self.hold_s = value,
            1 => self.sensitivity = value,
            2 => self.min_speech_s = value,
            _ => return,
        }
        self.recalculate();
    }
}
