//! The [`Processor`] trait every model implementation provides.
//!
//! A processor is created unconfigured, gets a validated [`Config`] through
//! [`configure`](Processor::configure), and then transforms audio blocks in
//! place. All allocation happens in `configure`; `process` and `reset` run
//! without touching the heap.

use crate::buffer::AudioBlock;
use crate::error::Result;
use crate::format::{Config, FormatLimits, Timing};
use crate::param_info::ParameterInfo;

/// In-place audio transform with a fixed format.
///
/// Object-safe: the runtime holds models as `Box<dyn Processor + Send>`.
///
/// Callers check the block shape against the configured [`Config`] before
/// calling [`process`](Self::process); implementations may assume the block
/// has the configured channel count and an accepted frame count.
pub trait Processor: ParameterInfo {
    /// Native rate, window and lookahead.
    fn timing(&self) -> Timing;

    /// Formats this processor accepts.
    fn limits(&self) -> FormatLimits {
        FormatLimits::STANDARD
    }

    /// Sizes internal state for `config`. `config` has already passed
    /// [`limits`](Self::limits). Clears all signal history; parameter values
    /// are kept.
    fn configure(&mut self, config: &Config) -> Result<()>;

    /// Transforms `block` in place.
    fn process(&mut self, block: &mut AudioBlock<'_, '_>) -> Result<()>;

    /// Clears signal history without changing format or parameters.
    fn reset(&mut self);

    /// Delay from input to output in frames at the configured format.
    fn latency_frames(&self) -> usize;
}
