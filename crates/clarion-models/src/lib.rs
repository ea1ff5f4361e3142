//! Clarion Models - speech processors behind the clarion runtime
//!
//! Every model variant is served by a [`SpeechEnhancer`] built from an
//! [`ModelSpec`]: the variant's native timing, accepted formats and
//! whether it exposes a voice gain control. The enhancer is a lookahead
//! downward expander: a level detector running ahead of the delayed signal
//! attenuates frames that sit near the tracked noise floor.
//!
//! # Example
//!
//! ```rust
//! use clarion_core::{AudioBlock, Config, Processor, Timing, FormatLimits};
//! use clarion_models::{ModelSpec, SpeechEnhancer};
//!
//! let spec = ModelSpec {
//!     timing: Timing { native_sample_rate: 16_000, window_us: 10_000, lookahead_us: 2_000 },
//!     limits: FormatLimits::STANDARD,
//!     voice_gain: true,
//! };
//! let mut model = SpeechEnhancer::new(spec);
//! model.configure(&Config::new(16_000, 1, 160)).unwrap();
//!
//! let mut samples = vec![0.0_f32; 160];
//! let mut block = AudioBlock::interleaved(&mut samples, 1, 160).unwrap();
//! model.process(&mut block).unwrap();
//! ```

pub mod detector;
pub mod enhancer;

pub use detector::{LevelDetector, NoiseFloor};
pub use enhancer::{BYPASS, ENHANCEMENT_LEVEL, ModelSpec, SpeechEnhancer, VOICE_GAIN};
