//! Lookahead speech enhancer.
//!
//! Per frame, the mono mix of the incoming (undelayed) block drives a
//! [`LevelDetector`] and a [`NoiseFloor`]. While the envelope sits near the
//! floor the expander gain falls toward [`SpeechEnhancer::FLOOR_GAIN`]; as soon
//! as speech rises above it the gain opens. The audio itself passes through a
//! [`LatencyLine`] sized to the negotiated output delay, so the detector sees
//! onsets before they reach the output.
//!
//! ## Parameters (`ParameterInfo`)
//!
//! | Index | Id | Name | Range | Default |
//! |-------|----|------|-------|---------|
//! | 0 | 0 | Bypass | 0.0–1.0 | 0.0 |
//! | 1 | 1 | Enhancement Level | 0.0–1.0 | 1.0 |
//! | 2 | 2 | Voice Gain | 0.1–4.0 | 1.0 |
//!
//! Voice Gain is only present when [`ModelSpec::voice_gain`] is set.

use clarion_core::{
    AudioBlock, Config, FormatLimits, LatencyLine, ParamDescriptor, ParamId, ParameterInfo,
    Processor, Result, Smoother, Timing, one_pole_coeff,
};

use crate::detector::{LevelDetector, NoiseFloor};

/// Passthrough switch. At or above 0.5 the model outputs its delayed input.
pub const BYPASS: ParamDescriptor =
    ParamDescriptor::switch("Bypass", "Bypass", 0.0).with_id(ParamId(0), "bypass");

/// Amount of noise attenuation, 0 = none, 1 = full.
pub const ENHANCEMENT_LEVEL: ParamDescriptor =
    ParamDescriptor::fraction("Enhancement Level", "Level", 1.0)
        .with_id(ParamId(1), "enhancement_level");

/// Linear gain applied to the enhanced output.
pub const VOICE_GAIN: ParamDescriptor =
    ParamDescriptor::linear_gain("Voice Gain", "Voice", 0.1, 4.0, 1.0)
        .with_id(ParamId(2), "voice_gain");

/// Static description of one model variant's processor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ModelSpec {
    /// Native rate, window and lookahead.
    pub timing: Timing,
    /// Accepted formats.
    pub limits: FormatLimits,
    /// Whether [`VOICE_GAIN`] is exposed.
    pub voice_gain: bool,
}

/// The speech enhancer. See the [module docs](self).
#[derive(Debug, Clone)]
pub struct SpeechEnhancer {
    spec: ModelSpec,
    detector: LevelDetector,
    noise: NoiseFloor,
    line: LatencyLine,

    bypass: f32,
    level: Smoother,
    voice: Smoother,

    gate: f32,
    open_coeff: f32,
    close_coeff: f32,
}

impl SpeechEnhancer {
    /// Gain applied to frames judged to be noise at full enhancement.
    pub const FLOOR_GAIN: f32 = 0.1;
    /// Envelope to floor ratio above which a frame counts as speech.
    pub const OPEN_RATIO: f32 = 4.0;

    const SMOOTHING_MS: f32 = 10.0;
    const OPEN_MS: f32 = 2.0;
    const CLOSE_MS: f32 = 60.0;

    /// Creates an unconfigured enhancer with default parameters.
    pub fn new(spec: ModelSpec) -> Self {
        Self {
            spec,
            detector: LevelDetector::new(1.0, 50.0),
            noise: NoiseFloor::new(500.0),
            line: LatencyLine::new(),
            bypass: BYPASS.default,
            level: Smoother::new(ENHANCEMENT_LEVEL.default),
            voice: Smoother::new(VOICE_GAIN.default),
            gate: 1.0,
            open_coeff: 0.0,
            close_coeff: 0.0,
        }
    }

    /// The spec this enhancer was built from.
    pub fn spec(&self) -> &ModelSpec {
        &self.spec
    }

    /// Current expander gain, 0.1–1.0.
    pub fn gate_gain(&self) -> f32 {
        self.gate
    }

    fn descriptors(&self) -> &'static [ParamDescriptor] {
        static ALL: [ParamDescriptor; 3] = [BYPASS, ENHANCEMENT_LEVEL, VOICE_GAIN];
        if self.spec.voice_gain { &ALL } else { &ALL[..2] }
    }

    #[inline]
    fn step_gate(&mut self, input: f32) -> f32 {
        let envelope = self.detector.process(input);
        let floor = self.noise.process(envelope);
        let (target, coeff) = if envelope > floor * Self::OPEN_RATIO {
            (1.0, self.open_coeff)
        } else {
            (Self::FLOOR_GAIN, self.close_coeff)
        };
        self.gate = target + coeff * (self.gate - target);
        self.gate
    }
}

impl Processor for SpeechEnhancer {
    fn timing(&self) -> Timing {
        self.spec.timing
    }

    fn limits(&self) -> FormatLimits {
        self.spec.limits
    }

    fn configure(&mut self, config: &Config) -> Result<()> {
        let rate = config.sample_rate;
        self.detector.set_sample_rate(rate);
        self.noise.set_sample_rate(rate);
        self.level.configure(rate, Self::SMOOTHING_MS);
        self.voice.configure(rate, Self::SMOOTHING_MS);
        self.open_coeff = one_pole_coeff(Self::OPEN_MS, rate);
        self.close_coeff = one_pole_coeff(Self::CLOSE_MS, rate);
        self.line.configure(
            usize::from(config.num_channels),
            self.spec.timing.output_delay(config),
        );
        self.reset();
        Ok(())
    }

    fn process(&mut self, block: &mut AudioBlock<'_, '_>) -> Result<()> {
        let num_channels = block.num_channels();
        let bypassed = self.bypass >= 0.5;

        for frame in 0..block.num_frames() {
            let gate = self.step_gate(block.frame_mean(frame));
            let level = self.level.advance();
            let voice = self.voice.advance();
            let gain = if bypassed {
                1.0
            } else {
                (1.0 - level * (1.0 - gate)) * voice
            };

            for ch in 0..num_channels {
                let delayed = self.line.exchange(ch, block.sample(ch, frame));
                block.set_sample(ch, frame, delayed * gain);
            }
            self.line.advance();
        }
        Ok(())
    }

    fn reset(&mut self) {
        self.detector.reset();
        self.noise.reset();
        self.line.clear();
        self.level.snap();
        self.voice.snap();
        self.gate = 1.0;
    }

    fn latency_frames(&self) -> usize {
        self.line.delay()
    }
}

impl ParameterInfo for SpeechEnhancer {
    fn param_count(&self) -> usize {
        self.descriptors().len()
    }

    fn param_info(&self, index: usize) -> Option<ParamDescriptor> {
        self.descriptors().get(index).copied()
    }

    fn get_param(&self, index: usize) -> f32 {
        match index {
            0 => self.bypass,
            1 => self.level.target(),
            2 => self.voice.target(),
            _ => 0.0,
        }
    }

    fn set_param(&mut self, index: usize, value: f32) {
        match index {
            0 => self.bypass = value,
            1 => self.level.set_target(value),
            2 => self.voice.set_target(value),
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clarion_core::{Error, read_param, write_param};

    const SPEC: ModelSpec = ModelSpec {
        timing: Timing {
            native_sample_rate: 16_000,
            window_us: 10_000,
            lookahead_us: 2_000,
        },
        limits: FormatLimits::STANDARD,
        voice_gain: true,
    };

    fn run(model: &mut SpeechEnhancer, samples: &mut [f32], channels: usize) {
        let frames = samples.len() / channels;
        let mut block = AudioBlock::interleaved(samples, channels, frames).unwrap();
        model.process(&mut block).unwrap();
    }

    #[test]
    fn latency_tracks_frame_size() {
        let mut m = SpeechEnhancer::new(SPEC);
        m.configure(&Config::new(16_000, 1, 160)).unwrap();
        assert_eq!(m.latency_frames(), 32);
        m.configure(&Config::new(16_000, 1, 100)).unwrap();
        assert_eq!(m.latency_frames(), 32 + 160);
    }

    #[test]
    fn bypass_is_pure_delay() {
        let mut m = SpeechEnhancer::new(SPEC);
        m.configure(&Config::new(16_000, 2, 160)).unwrap();
        write_param(&mut m, ParamId(0), 1.0).unwrap();

        let mut buf = vec![0.0; 320];
        buf[0] = 1.0;
        buf[1] = -0.5;
        run(&mut m, &mut buf, 2);
        assert_eq!(buf[32 * 2], 1.0);
        assert_eq!(buf[32 * 2 + 1], -0.5);
        assert_eq!(buf.iter().filter(|s| **s != 0.0).count(), 2);
    }

    #[test]
    fn stationary_noise_is_attenuated() {
        let mut m = SpeechEnhancer::new(SPEC);
        m.configure(&Config::new(16_000, 1, 160)).unwrap();
        // constant low-level hum; the floor settles onto it
        let mut buf = vec![0.0; 160];
        for _ in 0..400 {
            for (i, s) in buf.iter_mut().enumerate() {
                *s = if i % 2 == 0 { 0.01 } else { -0.01 };
            }
            run(&mut m, &mut buf, 1);
        }
        assert!(m.gate_gain() < 0.2, "gate {}", m.gate_gain());
        let peak = buf.iter().fold(0.0_f32, |a, s| a.max(s.abs()));
        assert!(peak < 0.002, "peak {peak}");
    }

    #[test]
    fn nan_sample_does_not_latch_gate() {
        let mut m = SpeechEnhancer::new(SPEC);
        m.configure(&Config::new(16_000, 1, 160)).unwrap();
        let mut buf = vec![0.0; 160];
        buf[10] = f32::NAN;
        run(&mut m, &mut buf, 1);
        for _ in 0..10 {
            for (i, s) in buf.iter_mut().enumerate() {
                *s = if i % 2 == 0 { 0.5 } else { -0.5 };
            }
            run(&mut m, &mut buf, 1);
        }
        assert!(m.gate_gain() > 0.9, "gate {}", m.gate_gain());
        assert!(buf.iter().all(|s| s.is_finite() && s.abs() > 0.4));
    }

    #[test]
    fn zero_level_disables_attenuation() {
        let mut m = SpeechEnhancer::new(SPEC);
        m.configure(&Config::new(16_000, 1, 160)).unwrap();
        write_param(&mut m, ParamId(1), 0.0).unwrap();
        m.reset();
        let mut buf = vec![0.01; 160];
        for _ in 0..100 {
            buf.fill(0.01);
            run(&mut m, &mut buf, 1);
        }
        assert!(buf.iter().all(|s| (s - 0.01).abs() < 1e-6));
    }

    #[test]
    fn stt_variant_hides_voice_gain() {
        let m = SpeechEnhancer::new(ModelSpec { voice_gain: false, ..SPEC });
        assert_eq!(m.param_count(), 2);
        assert_eq!(read_param(&m, ParamId(2)), Err(Error::UnknownParameter(2)));
    }

    #[test]
    fn configure_keeps_parameters() {
        let mut m = SpeechEnhancer::new(SPEC);
        write_param(&mut m, ParamId(2), 2.0).unwrap();
        m.configure(&Config::new(48_000, 1, 480)).unwrap();
        assert_eq!(read_param(&m, ParamId(2)), Ok(2.0));
    }
}
