//! Filter bank configuration
//!
//! Everything here is fixed for the lifetime of a patch. Defaults reproduce
//! the module's stock voicing.

use mp_core::{MpError, MpResult};
use serde::{Deserialize, Serialize};

/// How a lane's biquad history is shared
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StateCoupling {
    /// One history per lane. Every stage of the bandpass pass, then every
    /// stage of the notch pass, reads and overwrites the same four values.
    /// This is the stock voicing; with more than one stage it is not a
    /// stable filter and leans on the runaway guard (`runaway_limit`).
    #[default]
    Shared,
    /// Each stage of each mode keeps its own history (a textbook cascade)
    Isolated,
}

/// What the right output jack carries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RightOutput {
    /// 0 V every tick
    #[default]
    Silent,
    /// The right input, unfiltered, limited to the output range
    Passthrough,
}

/// Filter bank configuration
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BankConfig {
    pub coupling: StateCoupling,
    pub right_output: RightOutput,
    /// Smallest bandwidth control used when computing Q
    pub bandwidth_floor: f64,
    /// Smallest resonance control used when computing Q
    pub resonance_floor: f64,
    /// Gain applied to the lane sum
    pub output_gain: f64,
    /// Output clamp in volts (symmetric)
    pub output_limit: f64,
    /// Highest lane frequency as a fraction of the sample rate
    pub max_frequency_ratio: f64,
    /// Largest bandpass or notch output a lane may produce before its
    /// history is treated as runaway and cleared
    pub runaway_limit: f64,
}

impl Default for BankConfig {
    fn default() -> Self {
        Self {
            coupling: StateCoupling::Shared,
            right_output: RightOutput::Silent,
            bandwidth_floor: 1e-3,
            resonance_floor: 1e-3,
            output_gain: 0.3,
            output_limit: 5.0,
            max_frequency_ratio: 0.45,
            runaway_limit: 1e3,
        }
    }
}

impl BankConfig {
    pub fn with_coupling(mut self, coupling: StateCoupling) -> Self {
        self.coupling = coupling;
        self
    }

    pub fn with_right_output(mut self, right_output: RightOutput) -> Self {
        self.right_output = right_output;
        self
    }

    /// Reject settings that would let non-finite values into the filters
    pub fn validate(&self) -> MpResult<()> {
        positive("bandwidth_floor", self.bandwidth_floor)?;
        positive("resonance_floor", self.resonance_floor)?;
        positive("output_limit", self.output_limit)?;
        positive("runaway_limit", self.runaway_limit)?;

        if !self.output_gain.is_finite() {
            return Err(MpError::InvalidParam(format!(
                "output_gain must be finite, got {}",
                self.output_gain
            )));
        }

        if !(self.max_frequency_ratio > 0.0 && self.max_frequency_ratio < 0.5) {
            return Err(MpError::InvalidParam(format!(
                "max_frequency_ratio must be inside (0, 0.5), got {}",
                self.max_frequency_ratio
            )));
        }

        Ok(())
    }

    /// Parse a JSON config; missing fields take their defaults
    pub fn from_json(json: &str) -> MpResult<Self> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| MpError::Serialization(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json(&self) -> MpResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| MpError::Serialization(e.to_string()))
    }
}

fn positive(name: &str, value: f64) -> MpResult<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(MpError::InvalidParam(format!(
            "{name} must be positive and finite, got {value}"
        )))
    }
}
