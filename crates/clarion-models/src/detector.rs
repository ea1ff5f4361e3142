//! Level and noise-floor tracking.

use clarion_core::one_pole_coeff;

/// Peak envelope follower with separate attack and release.
#[derive(Debug, Clone)]
pub struct LevelDetector {
    envelope: f32,
    attack_coeff: f32,
    release_coeff: f32,
    attack_ms: f32,
    release_ms: f32,
}

impl LevelDetector {
    /// Creates a detector; call [`set_sample_rate`](Self::set_sample_rate)
    /// before use.
    pub fn new(attack_ms: f32, release_ms: f32) -> Self {
        Self {
            envelope: 0.0,
            attack_coeff: 0.0,
            release_coeff: 0.0,
            attack_ms,
            release_ms,
        }
    }

    /// Recomputes coefficients for `sample_rate`.
    pub fn set_sample_rate(&mut self, sample_rate: u32) {
        self.attack_coeff = one_pole_coeff(self.attack_ms, sample_rate);
        self.release_coeff = one_pole_coeff(self.release_ms, sample_rate);
    }

    /// Feeds one sample and returns the envelope.
    ///
    /// Non-finite input counts as silence.
    #[inline]
    pub fn process(&mut self, input: f32) -> f32 {
        let level = if input.is_finite() { input.abs() } else { 0.0 };
        let coeff = if level > self.envelope {
            self.attack_coeff
        } else {
            self.release_coeff
        };
        self.envelope = level + coeff * (self.envelope - level);
        self.envelope
    }

    /// Current envelope.
    pub fn envelope(&self) -> f32 {
        self.envelope
    }

    /// Drops to silence.
    pub fn reset(&mut self) {
        self.envelope = 0.0;
    }
}

/// Minimum-statistics noise floor estimate.
///
/// Falls immediately to any lower envelope and creeps upward slowly, so
/// sustained speech does not drag the floor up but a rising background does.
#[derive(Debug, Clone)]
pub struct NoiseFloor {
    floor: f32,
    rise: f32,
    rise_ms: f32,
}

impl NoiseFloor {
    /// Floor after a reset.
    pub const INITIAL: f32 = 1e-4;

    /// Creates a tracker whose floor rises by a factor of e every `rise_ms`.
    pub fn new(rise_ms: f32) -> Self {
        Self {
            floor: Self::INITIAL,
            rise: 1.0,
            rise_ms,
        }
    }

    /// Recomputes the rise rate for `sample_rate`.
    pub fn set_sample_rate(&mut self, sample_rate: u32) {
        let frames = self.rise_ms * sample_rate as f32 / 1000.0;
        self.rise = if frames > 1.0 { libm::expf(1.0 / frames) } else { 1.0 };
    }

    /// Feeds one envelope value and returns the updated floor.
    #[inline]
    pub fn process(&mut self, envelope: f32) -> f32 {
        self.floor = (self.floor * self.rise).min(envelope).max(1e-6);
        self.floor
    }

    /// Current floor.
    pub fn floor(&self) -> f32 {
        self.floor
    }

    /// Restores the initial floor.
    pub fn reset(&mut self) {
        self.floor = Self::INITIAL;
    }
}
