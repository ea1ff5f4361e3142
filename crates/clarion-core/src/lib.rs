//! Clarion Core - the contract shared by clarion audio models
//!
//! Real-time speech models plug into the clarion runtime through the types in
//! this crate. Nothing here allocates on the processing path.
//!
//! # Building Blocks
//!
//! - [`Processor`] - object-safe in-place transform a model implements
//! - [`Config`], [`FormatLimits`], [`Timing`] - audio format, accepted ranges, native timing
//! - [`AudioBlock`] - borrowed view over interleaved, sequential or planar audio
//! - [`ParamDescriptor`], [`ParameterInfo`] - bounded, id-addressed parameters
//! - [`Smoother`] - click-free parameter transitions
//! - [`LatencyLine`] - multi-channel lookahead delay
//! - [`Error`], [`ErrorCode`] - failure kinds and their stable numeric codes
//!
//! # Example
//!
//! ```rust
//! use clarion_core::{AudioBlock, Config, FormatLimits};
//!
//! let config = Config::new(48_000, 2, 4);
//! FormatLimits::STANDARD.validate(&config).unwrap();
//!
//! let mut samples = [0.0_f32; 8];
//! let block = AudioBlock::interleaved(&mut samples, 2, 4).unwrap();
//! config.check_channels(block.num_channels()).unwrap();
//! config.check_frames(block.num_frames()).unwrap();
//! ```

pub mod buffer;
pub mod delay;
pub mod error;
pub mod format;
pub mod math;
pub mod param;
pub mod param_info;
pub mod processor;

pub use buffer::{AudioBlock, Layout};
pub use delay::LatencyLine;
pub use error::{Error, ErrorCode, Result};
pub use format::{Config, FormatLimits, Timing, frames_for_us};
pub use math::one_pole_coeff;
pub use param::Smoother;
pub use param_info::{ParamDescriptor, ParamId, ParamUnit, ParameterInfo, read_param, write_param};
pub use processor::Processor;
