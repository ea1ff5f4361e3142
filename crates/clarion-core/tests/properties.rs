//! Property-based tests for clarion-core primitives.
//!
//! Covers layout indexing agreement, parameter range enforcement, smoother
//! convergence and latency line integrity.

use clarion_core::{
    AudioBlock, Config, Error, FormatLimits, LatencyLine, ParamDescriptor, ParamId, Smoother,
    Timing,
};
use proptest::prelude::*;

const TIMING: Timing = Timing {
    native_sample_rate: 48_000,
    window_us: 10_000,
    lookahead_us: 2_000,
};

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    /// The same logical signal stored interleaved, sequential and planar
    /// reads back identically through every view.
    #[test]
    fn layouts_agree(
        num_channels in 1usize..6,
        num_frames in 1usize..64,
        seed in any::<u32>(),
    ) {
        let value = |ch: usize, fr: usize| {
            ((seed as usize).wrapping_add(ch * 131 + fr * 7) % 1000) as f32 / 1000.0
        };

        let mut inter = vec![0.0; num_channels * num_frames];
        let mut seq = vec![0.0; num_channels * num_frames];
        let mut planes: Vec<Vec<f32>> = vec![vec![0.0; num_frames]; num_channels];
        for ch in 0..num_channels {
            for fr in 0..num_frames {
                inter[fr * num_channels + ch] = value(ch, fr);
                seq[ch * num_frames + fr] = value(ch, fr);
                planes[ch][fr] = value(ch, fr);
            }
        }
        let mut refs: Vec<&mut [f32]> = planes.iter_mut().map(Vec::as_mut_slice).collect();

        let a = AudioBlock::interleaved(&mut inter, num_channels, num_frames).unwrap();
        let b = AudioBlock::sequential(&mut seq, num_channels, num_frames).unwrap();
        let c = AudioBlock::planar(&mut refs, num_channels, num_frames).unwrap();
        for ch in 0..num_channels {
            for fr in 0..num_frames {
                prop_assert_eq!(a.sample(ch, fr), value(ch, fr));
                prop_assert_eq!(b.sample(ch, fr), value(ch, fr));
                prop_assert_eq!(c.sample(ch, fr), value(ch, fr));
            }
        }
        prop_assert!((a.mean_square() - c.mean_square()).abs() < 1e-5);
    }

    /// A descriptor accepts exactly the finite values inside its bounds.
    #[test]
    fn descriptor_accepts_only_in_range(value in -10.0f32..10.0) {
        let desc = ParamDescriptor::linear_gain("Voice Gain", "Voice", 0.1, 4.0, 1.0)
            .with_id(ParamId(2), "voice_gain");
        let inside = (0.1..=4.0).contains(&value);
        match desc.validate(value) {
            Ok(v) => prop_assert!(inside && v == value),
            Err(Error::ParameterOutOfRange { .. }) => prop_assert!(!inside),
            Err(other) => prop_assert!(false, "unexpected error {other:?}"),
        }
    }

    /// A smoother never overshoots its target.
    #[test]
    fn smoother_no_overshoot(
        start in -4.0f32..4.0,
        target in -4.0f32..4.0,
        time_ms in 0.0f32..50.0,
    ) {
        let mut s = Smoother::new(start);
        s.configure(48_000, time_ms);
        s.set_target(target);
        let (lo, hi) = if start < target { (start, target) } else { (target, start) };
        for _ in 0..1000 {
            let v = s.advance();
            prop_assert!(v >= lo - 1e-5 && v <= hi + 1e-5);
        }
    }

    /// Every sample pushed into a latency line comes out unchanged exactly
    /// `delay` frames later.
    #[test]
    fn latency_line_preserves_samples(
        delay in 0usize..32,
        input in prop::collection::vec(-1.0f32..1.0, 1..128),
    ) {
        let mut line = LatencyLine::new();
        line.configure(1, delay);
        let mut out = Vec::with_capacity(input.len());
        for &x in &input {
            out.push(line.exchange(0, x));
            line.advance();
        }
        for (i, &y) in out.iter().enumerate() {
            let expected = if i >= delay { input[i - delay] } else { 0.0 };
            prop_assert_eq!(y, expected);
        }
    }

    /// Output delay is never below the lookahead and is minimal only at the
    /// optimal frame count.
    #[test]
    fn delay_minimal_at_optimal(
        rate in 8_000u32..=192_000,
        frames in 1usize..4096,
        variable in any::<bool>(),
    ) {
        let config = Config::new(rate, 1, frames).with_variable_frames(variable);
        prop_assume!(FormatLimits::STANDARD.validate(&config).is_ok());
        let optimal = TIMING.optimal_num_frames(rate);
        let lookahead = TIMING.lookahead_frames(rate);
        let delay = TIMING.output_delay(&config);
        if !variable && frames == optimal {
            prop_assert_eq!(delay, lookahead);
        } else {
            prop_assert_eq!(delay, lookahead + optimal);
        }
    }
}
