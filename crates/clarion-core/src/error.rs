//! Error taxonomy shared by every clarion crate.
//!
//! Two views of the same failure exist:
//!
//! - [`Error`] carries context (the offending value and the bound it broke)
//!   and is what the Rust API returns.
//! - [`ErrorCode`] is the flat enumerated code handed across the handle
//!   surface. Every [`Error`] maps onto exactly one code via [`Error::code`].
//!
//! No variant owns heap data, so errors can be built on the audio thread.

use thiserror::Error;

/// Errors returned by model creation, configuration, processing and control.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum Error {
    /// The requested model type is not a known variant.
    #[error("invalid model type: {0}")]
    InvalidModelType(&'static str),

    /// The license key was not accepted.
    #[error("license rejected: {0}")]
    LicenseRejected(&'static str),

    /// The operation requires an initialized model.
    #[error("model is not initialized")]
    NotInitialized,

    /// The buffer channel count does not match the configured count.
    #[error("channel count mismatch: configured {expected}, got {actual}")]
    ChannelMismatch {
        /// Configured channel count.
        expected: usize,
        /// Channel count supplied by the caller.
        actual: usize,
    },

    /// The buffer frame count does not match the configured fixed frame size.
    #[error("frame count mismatch: configured {expected}, got {actual}")]
    FrameMismatch {
        /// Configured frame size.
        expected: usize,
        /// Frame count supplied by the caller.
        actual: usize,
    },

    /// The buffer length disagrees with the declared channel and frame counts.
    #[error("buffer holds {actual} samples, expected {expected}")]
    BufferLength {
        /// `num_channels * num_frames`.
        expected: usize,
        /// Actual sample count.
        actual: usize,
    },

    /// Planar channel buffers differ in length.
    #[error("planar channel {channel} holds {actual} frames, expected {expected}")]
    RaggedChannels {
        /// Index of the first offending channel.
        channel: usize,
        /// Length of channel 0.
        expected: usize,
        /// Length of the offending channel.
        actual: usize,
    },

    /// A zero-length block, zero sample rate or zero channel count.
    #[error("{0} must be greater than zero")]
    Zero(&'static str),

    /// The parameter id is not exposed by this model variant.
    #[error("unknown parameter id {0}")]
    UnknownParameter(u32),

    /// The parameter value lies outside its declared range.
    #[error("parameter '{name}' value {value} outside [{min}, {max}]")]
    ParameterOutOfRange {
        /// Parameter name.
        name: &'static str,
        /// Rejected value.
        value: f32,
        /// Declared minimum.
        min: f32,
        /// Declared maximum.
        max: f32,
    },

    /// The sample rate lies outside the variant's supported range.
    #[error("sample rate {sample_rate} Hz unsupported (supported {min}..={max} Hz)")]
    UnsupportedSampleRate {
        /// Requested sample rate.
        sample_rate: u32,
        /// Lowest supported rate.
        min: u32,
        /// Highest supported rate.
        max: u32,
    },

    /// The channel count exceeds the variant's supported maximum.
    #[error("{num_channels} channels unsupported (maximum {max})")]
    UnsupportedChannelCount {
        /// Requested channel count.
        num_channels: u16,
        /// Highest supported count.
        max: u16,
    },

    /// The fixed frame size exceeds the variant's supported maximum.
    #[error("{num_frames} frames unsupported (maximum {max})")]
    UnsupportedFrameCount {
        /// Requested frame size.
        num_frames: usize,
        /// Highest supported frame size.
        max: usize,
    },

    /// The handle was destroyed or never issued.
    #[error("invalid or destroyed model handle")]
    InvalidHandle,

    /// Failure inside the computational unit.
    #[error("internal processing error: {0}")]
    Internal(&'static str),
}

impl Error {
    /// Returns the flat [`ErrorCode`] for this error.
    pub const fn code(&self) -> ErrorCode {
        match self {
            Error::InvalidModelType(_) => ErrorCode::InvalidModelType,
            Error::LicenseRejected(_) => ErrorCode::LicenseRejected,
            Error::NotInitialized => ErrorCode::NotInitialized,
            Error::ChannelMismatch { .. }
            | Error::FrameMismatch { .. }
            | Error::BufferLength { .. }
            | Error::RaggedChannels { .. }
            | Error::Zero(_)
            | Error::UnknownParameter(_)
            | Error::ParameterOutOfRange { .. } => ErrorCode::InvalidArgument,
            Error::UnsupportedSampleRate { .. }
            | Error::UnsupportedChannelCount { .. }
            | Error::UnsupportedFrameCount { .. } => ErrorCode::UnsupportedFormat,
            Error::InvalidHandle => ErrorCode::InvalidHandle,
            Error::Internal(_) => ErrorCode::InternalError,
        }
    }
}

/// Convenience result type for clarion operations.
pub type Result<T> = core::result::Result<T, Error>;

/// Flat error code returned by the handle surface.
///
/// Discriminants are stable and safe to hand across a language boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(i32)]
pub enum ErrorCode {
    /// No error.
    Success = 0,
    /// Unknown model variant; no handle produced.
    InvalidModelType = 1,
    /// License key rejected; no handle produced.
    LicenseRejected = 2,
    /// Operation called before `initialize`.
    NotInitialized = 3,
    /// Malformed input: buffer shape, zero sizes, unknown parameter, out-of-range value.
    InvalidArgument = 4,
    /// Sample rate, channel count or frame size not supported by the variant.
    UnsupportedFormat = 5,
    /// Destroyed or malformed handle.
    InvalidHandle = 6,
    /// Failure inside the computational unit.
    InternalError = 7,
}

impl ErrorCode {
    /// Collapses a result into its code, discarding any value.
    pub fn from_result<T>(result: &Result<T>) -> Self {
        match result {
            Ok(_) => ErrorCode::Success,
            Err(e) => e.code(),
        }
    }

    /// Returns `true` for [`ErrorCode::Success`].
    pub const fn is_success(self) -> bool {
        matches!(self, ErrorCode::Success)
    }

    /// Stable name of the code.
    pub const fn name(self) -> &'static str {
        match self {
            ErrorCode::Success => "Success",
            ErrorCode::InvalidModelType => "InvalidModelType",
            ErrorCode::LicenseRejected => "LicenseRejected",
            ErrorCode::NotInitialized => "NotInitialized",
            ErrorCode::InvalidArgument => "InvalidArgument",
            ErrorCode::UnsupportedFormat => "UnsupportedFormat",
            ErrorCode::InvalidHandle => "InvalidHandle",
            ErrorCode::InternalError => "InternalError",
        }
    }
}

impl From<Error> for ErrorCode {
    fn from(error: Error) -> Self {
        error.code()
    }
}

impl core::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.name())
    }
}
