//! Property-based tests for the speech enhancer.

use clarion_core::{AudioBlock, Config, FormatLimits, ParamId, Processor, Timing, write_param};
use clarion_models::{BYPASS, ModelSpec, SpeechEnhancer};
use proptest::prelude::*;

const SPEC: ModelSpec = ModelSpec {
    timing: Timing {
        native_sample_rate: 16_000,
        window_us: 10_000,
        lookahead_us: 5_000,
    },
    limits: FormatLimits::STANDARD,
    voice_gain: true,
};

fn input(ch: usize, frame: usize) -> f32 {
    ((ch * 37 + frame * 11) % 97) as f32 / 97.0 - 0.5
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// In bypass the output is the input shifted by exactly the reported
    /// latency, whatever block sizes the host streams.
    #[test]
    fn bypass_delays_by_latency(
        num_channels in 1usize..4,
        block_sizes in prop::collection::vec(1usize..300, 1..8),
        variable in any::<bool>(),
    ) {
        let mut model = SpeechEnhancer::new(SPEC);
        let frames_hint = if variable { 0 } else { 160 };
        let config = Config::new(16_000, num_channels as u16, frames_hint)
            .with_variable_frames(variable);
        model.configure(&config).unwrap();
        write_param(&mut model, ParamId(BYPASS.id.0), 1.0).unwrap();
        let delay = model.latency_frames();

        let mut start = 0;
        for &n in &block_sizes {
            // fixed mode only accepts the configured size
            let n = if variable { n } else { 160 };
            let mut buf: Vec<f32> = (0..n * num_channels)
                .map(|i| input(i % num_channels, start + i / num_channels))
                .collect();
            let mut block = AudioBlock::interleaved(&mut buf, num_channels, n).unwrap();
            model.process(&mut block).unwrap();

            for fr in 0..n {
                let t = start + fr;
                for ch in 0..num_channels {
                    let expected = if t >= delay { input(ch, t - delay) } else { 0.0 };
                    prop_assert_eq!(buf[fr * num_channels + ch], expected);
                }
            }
            start += n;
        }
    }
}
