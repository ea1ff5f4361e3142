//! Click-free parameter transitions.
//!
//! A [`Smoother`] follows its target with a one-pole lowpass, so a parameter
//! write lands within a few milliseconds instead of as a step. The time
//! constant is expressed in milliseconds and converted to a per-frame
//! coefficient when the sample rate is known.

use libm::expf;

/// One-pole smoother for a single control value.
#[derive(Debug, Clone)]
pub struct Smoother {
    current: f32,
    target: f32,
    coeff: f32,
}

impl Smoother {
    /// Creates a smoother sitting at `initial` with instant response.
    pub const fn new(initial: f32) -> Self {
        Self {
            current: initial,
            target: initial,
            coeff: 1.0,
        }
    }

    /// Sets the time constant for a given sample rate.
    ///
    /// A time of zero (or a non-positive rate) makes changes instant.
    pub fn configure(&mut self, sample_rate: u32, time_ms: f32) {
        let frames = time_ms * sample_rate as f32 / 1000.0;
        self.coeff = if frames > 1.0 { 1.0 - expf(-1.0 / frames) } else { 1.0 };
    }

    /// Sets a new target. The current value moves toward it on each
    /// [`advance`](Self::advance).
    #[inline]
    pub fn set_target(&mut self, target: f32) {
        self.target = target;
    }

    /// Returns the target.
    #[inline]
    pub fn target(&self) -> f32 {
        self.target
    }

    /// Moves one frame toward the target and returns the new value.
    #[inline]
    pub fn advance(&mut self) -> f32 {
        self.current += self.coeff * (self.target - self.current);
        if (self.target - self.current).abs() < 1e-6 {
            self.current = self.target;
        }
        self.current
    }

    /// Jumps straight to the target.
    #[inline]
    pub fn snap(&mut self) {
        self.current = self.target;
    }
}
