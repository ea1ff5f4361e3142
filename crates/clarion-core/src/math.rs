//! Envelope and smoothing coefficients.

use libm::expf;

/// Coefficient for a one-pole follower with time constant `time_ms`.
#[inline]
pub fn one_pole_coeff(time_ms: f32, sample_rate: u32) -> f32 {
    let frames = time_ms * sample_rate as f32 / 1000.0;
    if frames <= 1.0 { 0.0 } else { expf(-1.0 / frames) }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn coeff_edges() {
        assert_eq!(one_pole_coeff(0.0, 48_000), 0.0);
        assert_eq!(one_pole_coeff(10.0, 0), 0.0);
        let c = one_pole_coeff(10.0, 48_000);
        assert!(c > 0.99 && c < 1.0);
    }
}
