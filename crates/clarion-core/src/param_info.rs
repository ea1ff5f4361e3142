//! Parameter registry: the named, bounded parameters a model exposes.
//!
//! Each parameter is described by a [`ParamDescriptor`] (name, unit, range,
//! default, stable [`ParamId`]). Anything that owns parameter values
//! implements [`ParameterInfo`] and is driven through [`write_param`] and
//! [`read_param`], which resolve ids and enforce ranges.
//!
//! Unlike a UI knob, the registry never clamps: an out-of-range write is
//! rejected and the stored value stays what it was.
//!
//! # Example
//!
//! ```rust
//! use clarion_core::{ParamDescriptor, ParamId, ParameterInfo, read_param, write_param};
//!
//! struct Level {
//!     amount: f32,
//! }
//!
//! const AMOUNT: ParamDescriptor =
//!     ParamDescriptor::fraction("Amount", "Amt", 1.0).with_id(ParamId(1), "amount");
//!
//! impl ParameterInfo for Level {
//!     fn param_count(&self) -> usize { 1 }
//!     fn param_info(&self, index: usize) -> Option<ParamDescriptor> {
//!         (index == 0).then_some(AMOUNT)
//!     }
//!     fn get_param(&self, _index: usize) -> f32 { self.amount }
//!     fn set_param(&mut self, _index: usize, value: f32) { self.amount = value; }
//! }
//!
//! let mut level = Level { amount: 1.0 };
//! assert!(write_param(&mut level, ParamId(1), 2.0).is_err());
//! assert_eq!(read_param(&level, ParamId(1)), Ok(1.0));
//! ```

use crate::error::{Error, Result};

/// Stable parameter identifier.
///
/// Part of the public contract: the numeric value of a given parameter never
/// changes between releases.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ParamId(pub u32);

/// Unit of a parameter value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ParamUnit {
    /// Linear amplitude multiplier.
    LinearGain,
    /// Seconds.
    Seconds,
    /// On/off switch; values at or above 0.5 are "on".
    Switch,
    /// Dimensionless.
    #[default]
    None,
}

/// Metadata for one parameter.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParamDescriptor {
    /// Full display name.
    pub name: &'static str,
    /// Short name, at most 8 characters.
    pub short_name: &'static str,
    /// Display unit.
    pub unit: ParamUnit,
    /// Lowest accepted value, inclusive.
    pub min: f32,
    /// Highest accepted value, inclusive.
    pub max: f32,
    /// Value before the first write.
    pub default: f32,
    /// Stable id.
    pub id: ParamId,
    /// Stable snake_case id for logs and settings files.
    pub string_id: &'static str,
}

impl ParamDescriptor {
    /// Fully specified descriptor with an unassigned id.
    pub const fn custom(
        name: &'static str,
        short_name: &'static str,
        unit: ParamUnit,
        min: f32,
        max: f32,
        default: f32,
    ) -> Self {
        Self {
            name,
            short_name,
            unit,
            min,
            max,
            default,
            id: ParamId(0),
            string_id: "",
        }
    }

    /// On/off switch over 0.0–1.0.
    pub const fn switch(name: &'static str, short_name: &'static str, default: f32) -> Self {
        Self::custom(name, short_name, ParamUnit::Switch, 0.0, 1.0, default)
    }

    /// Dimensionless amount over 0.0–1.0.
    pub const fn fraction(name: &'static str, short_name: &'static str, default: f32) -> Self {
        Self::custom(name, short_name, ParamUnit::None, 0.0, 1.0, default)
    }

    /// Linear gain multiplier.
    pub const fn linear_gain(
        name: &'static str,
        short_name: &'static str,
        min: f32,
        max: f32,
        default: f32,
    ) -> Self {
        Self::custom(name, short_name, ParamUnit::LinearGain, min, max, default)
    }

    /// Duration in seconds.
    pub const fn seconds(
        name: &'static str,
        short_name: &'static str,
        min: f32,
        max: f32,
        default: f32,
    ) -> Self {
        Self::custom(name, short_name, ParamUnit::Seconds, min, max, default)
    }

    /// Sets the stable id and string id.
    pub const fn with_id(mut self, id: ParamId, string_id: &'static str) -> Self {
        self.id = id;
        self.string_id = string_id;
        self
    }

    /// Returns `true` if `value` is finite and within `[min, max]`.
    #[inline]
    pub fn contains(&self, value: f32) -> bool {
        value.is_finite() && value >= self.min && value <= self.max
    }

    /// Returns `value` unchanged if accepted, or the rejection.
    #[inline]
    pub fn validate(&self, value: f32) -> Result<f32> {
        if self.contains(value) {
            Ok(value)
        } else {
            Err(Error::ParameterOutOfRange {
                name: self.name,
                value,
                min: self.min,
                max: self.max,
            })
        }
    }
}

/// Implemented by anything that stores parameter values.
///
/// Indices are dense (`0..param_count()`) and stable for the lifetime of the
/// implementor. Implementations store what they are given; range checks
/// happen in [`write_param`] before `set_param` is reached.
pub trait ParameterInfo {
    /// Number of exposed parameters.
    fn param_count(&self) -> usize;

    /// Descriptor at `index`, `None` past the end.
    fn param_info(&self, index: usize) -> Option<ParamDescriptor>;

    /// Current value at `index`.
    fn get_param(&self, index: usize) -> f32;

    /// Stores a value at `index`. The value has already been validated.
    fn set_param(&mut self, index: usize, value: f32);

    /// Finds a parameter index by its stable id.
    fn param_index_by_id(&self, id: ParamId) -> Option<usize> {
        (0..self.param_count()).find(|&i| self.param_info(i).is_some_and(|d| d.id == id))
    }

    /// Finds a parameter index by name or string id (case-insensitive).
    fn find_param_by_name(&self, name: &str) -> Option<usize> {
        (0..self.param_count()).find(|&i| {
            self.param_info(i).is_some_and(|d| {
                d.name.eq_ignore_ascii_case(name)
                    || d.short_name.eq_ignore_ascii_case(name)
                    || d.string_id.eq_ignore_ascii_case(name)
            })
        })
    }
}

/// Validates and stores a parameter value by id.
///
/// Fails with [`Error::UnknownParameter`] for an id the target does not
/// expose and [`Error::ParameterOutOfRange`] for a rejected value. On failure
/// the target is untouched.
pub fn write_param<P: ParameterInfo + ?Sized>(target: &mut P, id: ParamId, value: f32) -> Result<()> {
    let (index, desc) = resolve(target, id)?;
    let value = desc.validate(value)?;
    target.set_param(index, value);
    Ok(())
}

/// Reads a parameter value by id.
pub fn read_param<P: ParameterInfo + ?Sized>(target: &P, id: ParamId) -> Result<f32> {
    let (index, _) = resolve(target, id)?;
    Ok(target.get_param(index))
}

fn resolve<P: ParameterInfo + ?Sized>(target: &P, id: ParamId) -> Result<(usize, ParamDescriptor)> {
    target
        .param_index_by_id(id)
        .and_then(|i| target.param_info(i).map(|d| (i, d)))
        .ok_or(Error::UnknownParameter(id.0))
}

#[cfg(test)]
mod tests {
    use super::*;

    const GAIN: ParamDescriptor =
        ParamDescriptor::linear_gain("Gain", "Gain", 0.1, 4.0, 1.0).with_id(ParamId(2), "gain");
    const MUTE: ParamDescriptor =
        ParamDescriptor::switch("Mute", "Mute", 0.0).with_id(ParamId(7), "mute");

    struct Pair {
        values: [f32; 2],
    }

    impl ParameterInfo for Pair {
        fn param_count(&self) -> usize {
            2
        }
        fn param_info(&self, index: usize) -> Option<ParamDescriptor> {
            [GAIN, MUTE].get(index).copied()
        }
        fn get_param(&self, index: usize) -> f32 {
            self.values[index]
        }
        fn set_param(&mut self, index: usize, value: f32) {
            self.values[index] = value;
        }
    }

    #[test]
    fn contains_is_inclusive_and_rejects_nan() {
        assert!(GAIN.contains(0.1));
        assert!(GAIN.contains(4.0));
        assert!(!GAIN.contains(4.0001));
        assert!(!GAIN.contains(f32::NAN));
        assert!(!GAIN.contains(f32::INFINITY));
    }

    #[test]
    fn write_rejects_without_partial_apply() {
        let mut p = Pair { values: [1.0, 0.0] };
        write_param(&mut p, ParamId(2), 2.5).unwrap();
        assert_eq!(
            write_param(&mut p, ParamId(2), 9.0),
            Err(Error::ParameterOutOfRange { name: "Gain", value: 9.0, min: 0.1, max: 4.0 })
        );
        assert_eq!(read_param(&p, ParamId(2)), Ok(2.5));
    }

    #[test]
    fn unknown_id() {
        let mut p = Pair { values: [1.0, 0.0] };
        assert_eq!(write_param(&mut p, ParamId(3), 0.0), Err(Error::UnknownParameter(3)));
        assert_eq!(read_param(&p, ParamId(3)), Err(Error::UnknownParameter(3)));
    }

    #[test]
    fn lookup_by_name() {
        let p = Pair { values: [1.0, 0.0] };
        assert_eq!(p.find_param_by_name("gain"), Some(0));
        assert_eq!(p.find_param_by_name("MUTE"), Some(1));
        assert_eq!(p.find_param_by_name("pan"), None);
    }
}
