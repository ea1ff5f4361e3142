//! Model catalogue and factory for clarion.
//!
//! Every [`ModelType`] maps to a [`ModelDescriptor`] holding its family,
//! description and [`ModelSpec`] (native rate, window, lookahead, accepted
//! formats, exposed parameters). [`ModelRegistry::create`] builds the
//! processor for a variant behind `Box<dyn Processor + Send>`, so the runtime
//! never matches on variants itself.
//!
//! # Example
//!
//! ```rust
//! use clarion_core::ParameterInfo;
//! use clarion_registry::{ModelFamily, ModelRegistry, ModelType};
//!
//! let registry = ModelRegistry::new();
//! assert_eq!(registry.len(), 13);
//!
//! let desc = registry.get(ModelType::QuailS16);
//! assert_eq!(desc.spec.timing.optimal_sample_rate(), 16_000);
//!
//! for model in registry.models_in_family(ModelFamily::SpeechToText) {
//!     assert!(!model.spec.voice_gain);
//! }
//!
//! let processor = registry.create(ModelType::QuailL48);
//! assert_eq!(processor.param_count(), 3);
//! ```

mod model_type;

pub use clarion_models::ModelSpec;
pub use model_type::ModelType;

use clarion_core::{FormatLimits, Processor, Timing};
use clarion_models::SpeechEnhancer;

/// Size class of a variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ModelFamily {
    /// Highest quality, highest cost.
    Large,
    /// Balanced quality and cost.
    Small,
    /// Low cost, 48 kHz only.
    Compact,
    /// Tuned as a front end for speech recognition.
    SpeechToText,
}

impl ModelFamily {
    /// Human-readable name.
    pub const fn name(&self) -> &'static str {
        match self {
            ModelFamily::Large => "Large",
            ModelFamily::Small => "Small",
            ModelFamily::Compact => "Compact",
            ModelFamily::SpeechToText => "Speech-to-Text",
        }
    }
}

/// Describes one variant.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ModelDescriptor {
    /// The variant.
    pub model_type: ModelType,
    /// Family for grouping.
    pub family: ModelFamily,
    /// One-line description.
    pub description: &'static str,
    /// Timing, limits and parameter set.
    pub spec: ModelSpec,
}

const fn spec(native_sample_rate: u32, window_ms: u32, lookahead_ms: u32, voice_gain: bool) -> ModelSpec {
    ModelSpec {
        timing: Timing {
            native_sample_rate,
            window_us: window_ms * 1000,
            lookahead_us: lookahead_ms * 1000,
        },
        limits: FormatLimits::STANDARD,
        voice_gain,
    }
}

/// Static descriptor table, indexed by [`ModelType::id`].
const DESCRIPTORS: [ModelDescriptor; 13] = {
    use ModelFamily::{Compact, Large, Small, SpeechToText};
    use ModelType::{
        QuailL8, QuailL16, QuailL48, QuailS8, QuailS16, QuailS48, QuailSttL8, QuailSttL16,
        QuailSttS8, QuailSttS16, QuailVfSttL16, QuailXs, QuailXxs,
    };

    const fn d(
        model_type: ModelType,
        family: ModelFamily,
        description: &'static str,
        spec: ModelSpec,
    ) -> ModelDescriptor {
        ModelDescriptor { model_type, family, description, spec }
    }

    [
        d(QuailL48, Large, "Full-band enhancement for broadcast and recording", spec(48_000, 10, 20, true)),
        d(QuailL16, Large, "Wide-band enhancement for conferencing", spec(16_000, 10, 20, true)),
        d(QuailL8, Large, "Narrow-band enhancement for telephony", spec(8_000, 10, 20, true)),
        d(QuailS48, Small, "Full-band enhancement at reduced cost", spec(48_000, 10, 10, true)),
        d(QuailS16, Small, "Wide-band enhancement at reduced cost", spec(16_000, 10, 10, true)),
        d(QuailS8, Small, "Narrow-band enhancement at reduced cost", spec(8_000, 10, 10, true)),
        d(QuailXs, Compact, "Full-band enhancement for constrained devices", spec(48_000, 10, 5, true)),
        d(QuailXxs, Compact, "Full-band enhancement with a 5 ms window", spec(48_000, 5, 2, true)),
        d(QuailSttL16, SpeechToText, "Recognition front end, wide-band", spec(16_000, 10, 20, false)),
        d(QuailSttL8, SpeechToText, "Recognition front end, narrow-band", spec(8_000, 10, 20, false)),
        d(QuailSttS16, SpeechToText, "Small recognition front end, wide-band", spec(16_000, 10, 10, false)),
        d(QuailSttS8, SpeechToText, "Small recognition front end, narrow-band", spec(8_000, 10, 10, false)),
        d(QuailVfSttL16, SpeechToText, "Recognition front end focused on the primary talker", spec(16_000, 10, 20, false)),
    ]
};

/// Factory for a variant's processor.
type ModelFactory = fn(ModelSpec) -> Box<dyn Processor + Send>;

struct RegistryEntry {
    descriptor: ModelDescriptor,
    factory: ModelFactory,
}

fn speech_enhancer(spec: ModelSpec) -> Box<dyn Processor + Send> {
    Box::new(SpeechEnhancer::new(spec))
}

/// Catalogue of every model variant.
pub struct ModelRegistry {
    entries: Vec<RegistryEntry>,
}

impl Default for ModelRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl ModelRegistry {
    /// Creates a registry holding all built-in variants.
    pub fn new() -> Self {
        let entries = DESCRIPTORS
            .iter()
            .map(|&descriptor| RegistryEntry {
                descriptor,
                factory: speech_enhancer,
            })
            .collect();
        Self { entries }
    }

    /// Descriptors for all variants in id order.
    pub fn all_models(&self) -> impl Iterator<Item = &ModelDescriptor> {
        self.entries.iter().map(|e| &e.descriptor)
    }

    /// Descriptors for one family.
    pub fn models_in_family(&self, family: ModelFamily) -> impl Iterator<Item = &ModelDescriptor> {
        self.all_models().filter(move |d| d.family == family)
    }

    /// Descriptor for a variant.
    pub fn get(&self, model_type: ModelType) -> &ModelDescriptor {
        &self.entry(model_type).descriptor
    }

    /// Builds an unconfigured processor for a variant.
    pub fn create(&self, model_type: ModelType) -> Box<dyn Processor + Send> {
        let entry = self.entry(model_type);
        (entry.factory)(entry.descriptor.spec)
    }

    /// Number of registered variants.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Always `false`; every variant is registered.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn entry(&self, model_type: ModelType) -> &RegistryEntry {
        // DESCRIPTORS is indexed by id, one entry per variant
        &self.entries[model_type.id() as usize]
    }
}
