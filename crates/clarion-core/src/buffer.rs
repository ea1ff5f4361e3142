//! Borrowed views over caller-owned sample buffers.
//!
//! [`AudioBlock`] lets a [`Processor`](crate::Processor) read and write any of
//! the three supported layouts through one index-based interface, in place,
//! without copying or allocating:
//!
//! ```text
//! interleaved (2 ch, 3 frames): [L0 R0 L1 R1 L2 R2]
//! sequential  (2 ch, 3 frames): [L0 L1 L2 R0 R1 R2]
//! planar      (2 ch, 3 frames): [L0 L1 L2] [R0 R1 R2]
//! ```
//!
//! Constructors validate shape only; whether the shape matches a model's
//! configuration is checked by the caller against its [`Config`](crate::Config).
//! The view holds the borrow for the duration of one processing call.

use crate::error::{Error, Result};

/// Sample layout of an [`AudioBlock`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Layout {
    /// One buffer, channels alternate within each frame.
    Interleaved,
    /// One buffer, each channel's frames stored back to back.
    Sequential,
    /// One buffer per channel.
    Planar,
}

/// Mutable view over one block of multi-channel audio.
pub enum AudioBlock<'a, 'b> {
    /// Interleaved samples.
    Interleaved {
        /// `num_channels * num_frames` samples.
        samples: &'a mut [f32],
        /// Channels per frame.
        num_channels: usize,
        /// Frames in the block.
        num_frames: usize,
    },
    /// Channel-sequential samples.
    Sequential {
        /// `num_channels * num_frames` samples.
        samples: &'a mut [f32],
        /// Channels in the block.
        num_channels: usize,
        /// Frames per channel.
        num_frames: usize,
    },
    /// Separate buffer per channel.
    Planar {
        /// One slice per channel, all `num_frames` long.
        channels: &'a mut [&'b mut [f32]],
        /// Frames per channel.
        num_frames: usize,
    },
}

impl<'a, 'b> AudioBlock<'a, 'b> {
    /// Wraps an interleaved buffer of `num_channels * num_frames` samples.
    pub fn interleaved(
        samples: &'a mut [f32],
        num_channels: usize,
        num_frames: usize,
    ) -> Result<Self> {
        check_contiguous(samples.len(), num_channels, num_frames)?;
        Ok(AudioBlock::Interleaved {
            samples,
            num_channels,
            num_frames,
        })
    }

    /// Wraps a channel-sequential buffer of `num_channels * num_frames` samples.
    pub fn sequential(
        samples: &'a mut [f32],
        num_channels: usize,
        num_frames: usize,
    ) -> Result<Self> {
        check_contiguous(samples.len(), num_channels, num_frames)?;
        Ok(AudioBlock::Sequential {
            samples,
            num_channels,
            num_frames,
        })
    }

    /// Wraps `num_channels` planar buffers of `num_frames` samples each.
    ///
    /// Every channel must be present and equally long.
    pub fn planar(
        channels: &'a mut [&'b mut [f32]],
        num_channels: usize,
        num_frames: usize,
    ) -> Result<Self> {
        if num_channels == 0 {
            return Err(Error::Zero("num_channels"));
        }
        if num_frames == 0 {
            return Err(Error::Zero("num_frames"));
        }
        if channels.len() != num_channels {
            return Err(Error::ChannelMismatch {
                expected: num_channels,
                actual: channels.len(),
            });
        }
        if let Some((channel, ch)) = channels
            .iter()
            .enumerate()
            .find(|(_, ch)| ch.len() != num_frames)
        {
            return Err(Error::RaggedChannels {
                channel,
                expected: num_frames,
                actual: ch.len(),
            });
        }
        Ok(AudioBlock::Planar {
            channels,
            num_frames,
        })
    }

    /// Layout of the underlying buffer.
    pub fn layout(&self) -> Layout {
        match self {
            AudioBlock::Interleaved { .. } => Layout::Interleaved,
            AudioBlock::Sequential { .. } => Layout::Sequential,
            AudioBlock::Planar { .. } => Layout::Planar,
        }
    }

    /// Number of channels.
    #[inline]
    pub fn num_channels(&self) -> usize {
        match self {
            AudioBlock::Interleaved { num_channels, .. }
            | AudioBlock::Sequential { num_channels, .. } => *num_channels,
            AudioBlock::Planar { channels, .. } => channels.len(),
        }
    }

    /// Number of frames.
    #[inline]
    pub fn num_frames(&self) -> usize {
        match self {
            AudioBlock::Interleaved { num_frames, .. }
            | AudioBlock::Sequential { num_frames, .. }
            | AudioBlock::Planar { num_frames, .. } => *num_frames,
        }
    }

    /// Reads one sample.
    ///
    /// # Panics
    ///
    /// Panics if `channel` or `frame` is out of range.
    #[inline]
    pub fn sample(&self, channel: usize, frame: usize) -> f32 {
        match self {
            AudioBlock::Interleaved {
                samples,
                num_channels,
                ..
            } => samples[frame * num_channels + channel],
            AudioBlock::Sequential {
                samples,
                num_frames,
                ..
            } => samples[channel * num_frames + frame],
            AudioBlock::Planar { channels, .. } => channels[channel][frame],
        }
    }

    /// Writes one sample.
    ///
    /// # Panics
    ///
    /// Panics if `channel` or `frame` is out of range.
    #[inline]
    pub fn set_sample(&mut self, channel: usize, frame: usize, value: f32) {
        match self {
            AudioBlock::Interleaved {
                samples,
                num_channels,
                ..
            } => samples[frame * *num_channels + channel] = value,
            AudioBlock::Sequential {
                samples,
                num_frames,
                ..
            } => samples[channel * *num_frames + frame] = value,
            AudioBlock::Planar { channels, .. } => channels[channel][frame] = value,
        }
    }

    /// Average of all channels at `frame`.
    #[inline]
    pub fn frame_mean(&self, frame: usize) -> f32 {
        let n = self.num_channels();
        let mut sum = 0.0;
        for ch in 0..n {
            sum += self.sample(ch, frame);
        }
        sum / n as f32
    }

    /// Mean square over every sample in the block.
    pub fn mean_square(&self) -> f32 {
        let sum: f32 = match self {
            AudioBlock::Interleaved { samples, .. } | AudioBlock::Sequential { samples, .. } => {
                samples.iter().map(|s| s * s).sum()
            }
            AudioBlock::Planar { channels, .. } => channels
                .iter()
                .flat_map(|ch| ch.iter())
                .map(|s| s * s)
                .sum(),
        };
        sum / (self.num_channels() * self.num_frames()) as f32
    }
}

fn check_contiguous(len: usize, num_channels: usize, num_frames: usize) -> Result<()> {
    if num_channels == 0 {
        return Err(Error::Zero("num_channels"));
    }
    if num_frames == 0 {
        return Err(Error::Zero("num_frames"));
    }
    let Some(expected) = num_channels.checked_mul(num_frames) else {
        return Err(Error::BufferLength {
            expected: usize::MAX,
            actual: len,
        });
    };
    if len != expected {
        return Err(Error::BufferLength {
            expected,
            actual: len,
        });
    }
    Ok(())
}
