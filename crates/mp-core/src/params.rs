//! Parameter types for the filter bank controls

use serde::{Deserialize, Serialize};

/// Parameter value (normalized 0.0-1.0)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NormalizedValue(f64);

impl NormalizedValue {
    pub const ZERO: Self = Self(0.0);
    pub const ONE: Self = Self(1.0);
    pub const HALF: Self = Self(0.5);

    /// Clamp into 0-1. NaN collapses to zero so it can never reach a filter.
    #[inline]
    pub fn new(value: f64) -> Self {
        if value.is_nan() {
            Self::ZERO
        } else {
            Self(value.clamp(0.0, 1.0))
        }
    }

    #[inline]
    pub fn get(self) -> f64 {
        self.0
    }

    /// Map to a range
    #[inline]
    pub fn map(self, min: f64, max: f64) -> f64 {
        min + self.0 * (max - min)
    }
}

impl Default for NormalizedValue {
    fn default() -> Self {
        Self::ZERO
    }
}

/// Parameter range specification
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ParamRange {
    pub min: f64,
    pub max: f64,
    pub default: f64,
    /// Round denormalized values to whole numbers
    pub snap: bool,
}

impl ParamRange {
    pub const fn linear(min: f64, max: f64, default: f64) -> Self {
        Self {
            min,
            max,
            default,
            snap: false,
        }
    }

    pub const fn stepped(min: f64, max: f64, default: f64) -> Self {
        Self {
            min,
            max,
            default,
            snap: true,
        }
    }

    /// Denormalize a 0-1 value to actual value
    pub fn denormalize(&self, normalized: f64) -> f64 {
        let value = NormalizedValue::new(normalized).map(self.min, self.max);
        if self.snap { value.round() } else { value }
    }

    /// Normalize an actual value to 0-1
    pub fn normalize(&self, value: f64) -> f64 {
        let clamped = value.clamp(self.min, self.max);
        (clamped - self.min) / (self.max - self.min)
    }

    /// Default value, normalized
    pub fn default_normalized(&self) -> f64 {
        self.normalize(self.default)
    }
}

/// Static description of one host parameter
///
/// Labels, units and the display multiplier are descriptive only. The
/// range is behavioral: the engine denormalizes controls through it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ParamSpec {
    pub label: &'static str,
    pub unit: &'static str,
    pub range: ParamRange,
    pub display_multiplier: f64,
}

impl ParamSpec {
    /// Value shown to the user for a normalized control
    pub fn display_value(&self, normalized: f64) -> f64 {
        self.range.denormalize(normalized) * self.display_multiplier
    }
}
