//! Format negotiation: what sample rate, channel count and frame size a model
//! accepts, what it would prefer, and how much latency a configuration costs.
//!
//! A model variant is described by two plain values:
//!
//! - [`Timing`] - native rate, processing window and lookahead. Drives the
//!   advisory `optimal_*` queries and the reported output delay.
//! - [`FormatLimits`] - hard bounds checked by [`FormatLimits::validate`].
//!
//! The caller's choice is a [`Config`].

use crate::error::{Error, Result};

/// Audio format a model is initialized with.
///
/// Once a model is initialized, `sample_rate` and `num_channels` never change
/// until the next `initialize`. `num_frames` is the exact block length for
/// every processing call unless `allow_variable_frames` is set, in which case
/// any positive block length is accepted and `num_frames` is only a hint
/// (`0` means unspecified).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Config {
    /// Sample rate in Hz.
    pub sample_rate: u32,
    /// Number of channels in every processed block.
    pub num_channels: u16,
    /// Frames per channel in every processed block.
    #[cfg_attr(feature = "serde", serde(default))]
    pub num_frames: usize,
    /// Accept any positive frame count per call.
    #[cfg_attr(feature = "serde", serde(default))]
    pub allow_variable_frames: bool,
}

impl Config {
    /// Fixed-frame configuration.
    pub const fn new(sample_rate: u32, num_channels: u16, num_frames: usize) -> Self {
        Self {
            sample_rate,
            num_channels,
            num_frames,
            allow_variable_frames: false,
        }
    }

    /// Builder: enable or disable variable frame counts.
    pub const fn with_variable_frames(mut self, allow: bool) -> Self {
        self.allow_variable_frames = allow;
        self
    }

    /// Checks a block's channel count against this configuration.
    #[inline]
    pub fn check_channels(&self, num_channels: usize) -> Result<()> {
        if num_channels != self.num_channels as usize {
            return Err(Error::ChannelMismatch {
                expected: self.num_channels as usize,
                actual: num_channels,
            });
        }
        Ok(())
    }

    /// Checks a block's frame count against this configuration.
    ///
    /// Zero frames are always rejected. With fixed frames the count must
    /// match exactly.
    #[inline]
    pub fn check_frames(&self, num_frames: usize) -> Result<()> {
        if num_frames == 0 {
            return Err(Error::Zero("num_frames"));
        }
        if !self.allow_variable_frames && num_frames != self.num_frames {
            return Err(Error::FrameMismatch {
                expected: self.num_frames,
                actual: num_frames,
            });
        }
        Ok(())
    }
}

/// Hard format bounds of a model variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormatLimits {
    /// Lowest accepted sample rate in Hz.
    pub min_sample_rate: u32,
    /// Highest accepted sample rate in Hz.
    pub max_sample_rate: u32,
    /// Highest accepted channel count.
    pub max_channels: u16,
    /// Highest accepted fixed frame size.
    pub max_frames: usize,
}

impl FormatLimits {
    /// Bounds shared by every built-in variant.
    pub const STANDARD: Self = Self {
        min_sample_rate: 8_000,
        max_sample_rate: 192_000,
        max_channels: 16,
        max_frames: 4096,
    };

    /// Validates a configuration against these bounds.
    ///
    /// Zero values are malformed input ([`Error::Zero`]); non-zero values
    /// outside the bounds are unsupported formats.
    pub fn validate(&self, config: &Config) -> Result<()> {
        if config.sample_rate == 0 {
            return Err(Error::Zero("sample_rate"));
        }
        if config.num_channels == 0 {
            return Err(Error::Zero("num_channels"));
        }
        if !config.allow_variable_frames && config.num_frames == 0 {
            return Err(Error::Zero("num_frames"));
        }
        if config.sample_rate < self.min_sample_rate || config.sample_rate > self.max_sample_rate {
            return Err(Error::UnsupportedSampleRate {
                sample_rate: config.sample_rate,
                min: self.min_sample_rate,
                max: self.max_sample_rate,
            });
        }
        if config.num_channels > self.max_channels {
            return Err(Error::UnsupportedChannelCount {
                num_channels: config.num_channels,
                max: self.max_channels,
            });
        }
        if config.num_frames > self.max_frames {
            return Err(Error::UnsupportedFrameCount {
                num_frames: config.num_frames,
                max: self.max_frames,
            });
        }
        Ok(())
    }
}

impl Default for FormatLimits {
    fn default() -> Self {
        Self::STANDARD
    }
}

/// Intrinsic timing of a model variant.
///
/// Durations are kept in microseconds so that frame counts come out exact at
/// every common rate (10 ms is 480 frames at 48 kHz, 441 at 44.1 kHz).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timing {
    /// Rate the model was trained at; the advisory optimal rate.
    pub native_sample_rate: u32,
    /// Length of one processing window.
    pub window_us: u32,
    /// Algorithmic lookahead.
    pub lookahead_us: u32,
}

impl Timing {
    /// Advisory sample rate.
    pub const fn optimal_sample_rate(&self) -> u32 {
        self.native_sample_rate
    }

    /// Advisory frame count at `sample_rate`: one processing window.
    pub const fn optimal_num_frames(&self, sample_rate: u32) -> usize {
        frames_for_us(self.window_us, sample_rate)
    }

    /// Lookahead expressed in frames at `sample_rate`.
    pub const fn lookahead_frames(&self, sample_rate: u32) -> usize {
        frames_for_us(self.lookahead_us, sample_rate)
    }

    /// Total output delay in frames for `config`.
    ///
    /// The lookahead is always paid. A block size other than the optimal
    /// window, or variable block sizes, add one window of internal buffering.
    pub fn output_delay(&self, config: &Config) -> usize {
        let optimal = self.optimal_num_frames(config.sample_rate);
        let lookahead = self.lookahead_frames(config.sample_rate);
        let buffering = if config.allow_variable_frames || config.num_frames != optimal {
            optimal
        } else {
            0
        };

        #[cfg(feature = "tracing")]
        tracing::debug!(
            sample_rate = config.sample_rate,
            num_frames = config.num_frames,
            lookahead,
            buffering,
            "output delay negotiated"
        );

        lookahead + buffering
    }

    /// The optimal configuration: native rate, one window, mono, fixed frames.
    pub const fn optimal_config(&self) -> Config {
        Config::new(
            self.native_sample_rate,
            1,
            self.optimal_num_frames(self.native_sample_rate),
        )
    }
}

/// Converts a duration in microseconds to a frame count.
///
/// Any non-zero duration yields at least one frame.
#[inline]
pub const fn frames_for_us(duration_us: u32, sample_rate: u32) -> usize {
    let frames = (duration_us as u64 * sample_rate as u64) / 1_000_000;
    if frames == 0 && duration_us > 0 {
        1
    } else {
        frames as usize
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TEN_MS: Timing = Timing {
        native_sample_rate: 48_000,
        window_us: 10_000,
        lookahead_us: 2_000,
    };

    #[test]
    fn optimal_frames_scale_with_rate() {
        assert_eq!(TEN_MS.optimal_num_frames(48_000), 480);
        assert_eq!(TEN_MS.optimal_num_frames(44_100), 441);
        assert_eq!(TEN_MS.optimal_num_frames(16_000), 160);
        assert_eq!(TEN_MS.optimal_num_frames(8_000), 80);
    }

    #[test]
    fn delay_at_optimal_frames_is_lookahead() {
        let config = Config::new(48_000, 2, 480);
        assert_eq!(TEN_MS.output_delay(&config), 96);
    }

    #[test]
    fn delay_adds_window_when_not_optimal() {
        let config = Config::new(48_000, 2, 256);
        assert_eq!(TEN_MS.output_delay(&config), 96 + 480);

        let variable = Config::new(48_000, 2, 480).with_variable_frames(true);
        assert_eq!(TEN_MS.output_delay(&variable), 96 + 480);
    }

    #[test]
    fn optimal_config() {
        let config = TEN_MS.optimal_config();
        assert_eq!(config, Config::new(48_000, 1, 480));
    }

    #[test]
    fn validate_zero_values() {
        let limits = FormatLimits::STANDARD;
        assert_eq!(
            limits.validate(&Config::new(0, 2, 480)),
            Err(Error::Zero("sample_rate"))
        );
        assert_eq!(
            limits.validate(&Config::new(48_000, 0, 480)),
            Err(Error::Zero("num_channels"))
        );
        assert_eq!(
            limits.validate(&Config::new(48_000, 2, 0)),
            Err(Error::Zero("num_frames"))
        );
        // Unspecified frame size is fine in variable mode.
        assert!(limits
            .validate(&Config::new(48_000, 2, 0).with_variable_frames(true))
            .is_ok());
    }

    #[test]
    fn validate_bounds() {
        let limits = FormatLimits::STANDARD;
        assert!(matches!(
            limits.validate(&Config::new(4_000, 1, 480)),
            Err(Error::UnsupportedSampleRate { .. })
        ));
        assert!(matches!(
            limits.validate(&Config::new(48_000, 17, 480)),
            Err(Error::UnsupportedChannelCount { .. })
        ));
        assert!(matches!(
            limits.validate(&Config::new(48_000, 1, 8192)),
            Err(Error::UnsupportedFrameCount { .. })
        ));
        assert!(limits.validate(&Config::new(48_000, 16, 4096)).is_ok());
    }

    #[test]
    fn check_frames_fixed_and_variable() {
        let fixed = Config::new(48_000, 2, 480);
        assert!(fixed.check_frames(480).is_ok());
        assert_eq!(
            fixed.check_frames(256),
            Err(Error::FrameMismatch { expected: 480, actual: 256 })
        );
        assert_eq!(fixed.check_frames(0), Err(Error::Zero("num_frames")));

        let variable = fixed.with_variable_frames(true);
        assert!(variable.check_frames(1).is_ok());
        assert!(variable.check_frames(10_000).is_ok());
        assert_eq!(variable.check_frames(0), Err(Error::Zero("num_frames")));
    }

    #[test]
    fn frames_for_us_rounds_up_short_durations() {
        assert_eq!(frames_for_us(0, 48_000), 0);
        assert_eq!(frames_for_us(10, 8_000), 1);
    }
}
