//! mp-core: Shared types for the Multipole filter bank
//!
//! Sample types, parameter metadata, host port ids and the error type used
//! by every Multipole crate.

mod error;
mod params;
mod ports;
mod sample;

pub use error::*;
pub use params::*;
pub use ports::*;
pub use sample::*;

/// Standard sample rate options
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[repr(u32)]
pub enum SampleRate {
    Hz22050 = 22050,
    Hz44100 = 44100,
    Hz48000 = 48000,
    Hz88200 = 88200,
    Hz96000 = 96000,
    Hz192000 = 192000,
}

impl SampleRate {
    #[inline]
    pub fn as_f64(self) -> f64 {
        self as u32 as f64
    }

    #[inline]
    pub fn as_u32(self) -> u32 {
        self as u32
    }
}

impl Default for SampleRate {
    fn default() -> Self {
        Self::Hz44100
    }
}

/// Check that a host-reported sample rate can drive the filters
pub fn validate_sample_rate(sample_rate: f64) -> MpResult<f64> {
    if sample_rate.is_finite() && sample_rate > 0.0 {
        Ok(sample_rate)
    } else {
        Err(MpError::InvalidSampleRate(sample_rate))
    }
}
