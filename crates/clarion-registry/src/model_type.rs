//! The enumerated model variants.

use core::fmt;
use core::str::FromStr;

use clarion_core::{Error, Result};

/// A model variant.
///
/// The numeric id ([`id`](Self::id)) is the declaration index and is stable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ModelType {
    /// Large, 48 kHz.
    QuailL48,
    /// Large, 16 kHz.
    QuailL16,
    /// Large, 8 kHz.
    QuailL8,
    /// Small, 48 kHz.
    QuailS48,
    /// Small, 16 kHz.
    QuailS16,
    /// Small, 8 kHz.
    QuailS8,
    /// Extra small, 48 kHz.
    QuailXs,
    /// Extra-extra small, 48 kHz, 5 ms window.
    QuailXxs,
    /// Large, tuned for speech recognition, 16 kHz.
    QuailSttL16,
    /// Large, tuned for speech recognition, 8 kHz.
    QuailSttL8,
    /// Small, tuned for speech recognition, 16 kHz.
    QuailSttS16,
    /// Small, tuned for speech recognition, 8 kHz.
    QuailSttS8,
    /// Voice focus for speech recognition, 16 kHz.
    QuailVfSttL16,
}

impl ModelType {
    /// Every variant in id order.
    pub const ALL: [ModelType; 13] = [
        ModelType::QuailL48,
        ModelType::QuailL16,
        ModelType::QuailL8,
        ModelType::QuailS48,
        ModelType::QuailS16,
        ModelType::QuailS8,
        ModelType::QuailXs,
        ModelType::QuailXxs,
        ModelType::QuailSttL16,
        ModelType::QuailSttL8,
        ModelType::QuailSttS16,
        ModelType::QuailSttS8,
        ModelType::QuailVfSttL16,
    ];

    /// Stable numeric id.
    pub const fn id(self) -> u32 {
        self as u32
    }

    /// Looks up a variant by numeric id.
    pub fn from_id(id: u32) -> Result<Self> {
        usize::try_from(id)
            .ok()
            .and_then(|i| Self::ALL.get(i).copied())
            .ok_or(Error::InvalidModelType("unknown model id"))
    }

    /// Variant name as accepted by [`FromStr`].
    pub const fn name(self) -> &'static str {
        match self {
            ModelType::QuailL48 => "QuailL48",
            ModelType::QuailL16 => "QuailL16",
            ModelType::QuailL8 => "QuailL8",
            ModelType::QuailS48 => "QuailS48",
            ModelType::QuailS16 => "QuailS16",
            ModelType::QuailS8 => "QuailS8",
            ModelType::QuailXs => "QuailXs",
            ModelType::QuailXxs => "QuailXxs",
            ModelType::QuailSttL16 => "QuailSttL16",
            ModelType::QuailSttL8 => "QuailSttL8",
            ModelType::QuailSttS16 => "QuailSttS16",
            ModelType::QuailSttS8 => "QuailSttS8",
            ModelType::QuailVfSttL16 => "QuailVfSttL16",
        }
    }

    /// Returns `true` for the speech recognition variants.
    pub const fn is_stt(self) -> bool {
        matches!(
            self,
            ModelType::QuailSttL16
                | ModelType::QuailSttL8
                | ModelType::QuailSttS16
                | ModelType::QuailSttS8
                | ModelType::QuailVfSttL16
        )
    }
}

impl fmt::Display for ModelType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ModelType {
    type Err = Error;

    /// Parses a variant name, ignoring ASCII case.
    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|t| t.name().eq_ignore_ascii_case(s.trim()))
            .ok_or(Error::InvalidModelType("unknown model name"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_are_declaration_order() {
        for (i, t) in ModelType::ALL.iter().enumerate() {
            assert_eq!(t.id() as usize, i);
            assert_eq!(ModelType::from_id(t.id()), Ok(*t));
        }
        assert_eq!(ModelType::from_id(0), Ok(ModelType::QuailL48));
        assert_eq!(ModelType::from_id(12), Ok(ModelType::QuailVfSttL16));
        assert!(ModelType::from_id(13).is_err());
        assert!(ModelType::from_id(u32::MAX).is_err());
    }

    #[test]
    fn names_round_trip() {
        for t in ModelType::ALL {
            assert_eq!(t.name().parse::<ModelType>(), Ok(t));
            assert_eq!(t.to_string(), t.name());
        }
        assert_eq!("quails16".parse::<ModelType>(), Ok(ModelType::QuailS16));
        assert_eq!(
            "QuailM48".parse::<ModelType>(),
            Err(Error::InvalidModelType("unknown model name"))
        );
    }

    #[test]
    fn stt_variants() {
        let stt: Vec<_> = ModelType::ALL.into_iter().filter(|t| t.is_stt()).collect();
        assert_eq!(stt.len(), 5);
        assert!(!ModelType::QuailXxs.is_stt());
    }
}
