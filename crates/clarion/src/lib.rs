//! Clarion - real-time speech model runtime
//!
//! Create a [`Model`] for a [`ModelType`], fix its audio format with
//! [`Model::initialize`], then stream blocks through it in place in any of
//! three layouts. Parameters, output delay and voice activity are available
//! once the model is initialized.
//!
//! # Example
//!
//! ```rust
//! use clarion::{Model, ModelType, Parameter};
//!
//! let mut model = Model::create(ModelType::QuailL48, "valid-key")?;
//! model.initialize(48_000, 2, 480, false)?;
//! model.set_parameter(Parameter::EnhancementLevel, 0.7)?;
//!
//! let mut block = vec![0.0_f32; 2 * 480];
//! model.process_interleaved(&mut block, 2, 480)?;
//! assert_eq!(block.len(), 960);
//!
//! // 20 ms lookahead, no extra buffering at the optimal block size
//! assert_eq!(model.output_delay()?, 960);
//! # Ok::<(), clarion::Error>(())
//! ```
//!
//! # Threading
//!
//! A [`Model`] is `Send` but not `Sync`. Processing, parameter access, reset
//! and destruction on one model must be serialized by the caller. Once
//! initialized, nothing on the processing path allocates, blocks or logs.
//!
//! # Flat surface
//!
//! [`Runtime`] addresses models by generation-checked [`ModelHandle`] and
//! reports every outcome as an [`ErrorCode`], for hosts that bind the
//! runtime through a foreign function layer.

pub mod handle;
pub mod license;
pub mod model;
pub mod settings;
pub mod vad;

pub use clarion_core::{Config, Error, ErrorCode, Result};
pub use clarion_registry::{ModelDescriptor, ModelFamily, ModelRegistry, ModelType};
pub use handle::{ModelHandle, Runtime};
pub use license::{KeyFormat, LicenseCheck};
pub use model::{Model, Parameter, VadParameter};
pub use settings::{LICENSE_ENV, Settings, SettingsError};
pub use vad::VoiceActivityDetector;

/// Library version, fixed at compile time.
pub const fn sdk_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
