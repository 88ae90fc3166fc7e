//! mp-dsp: the Multipole filter bank engine
//!
//! Eight harmonically spaced biquad cascades, each evaluated as a bandpass
//! and as a notch, crossfaded and summed into one output voltage.
//!
//! ## Modules
//! - `biquad` - Bandpass/notch coefficients, direct-form-I history, cascade evaluator
//! - `control` - Parameter + CV mapping into the per-tick control set
//! - `mix` - Crossfade, summation and output limiting
//! - `config` - Engine configuration (state coupling, numeric floors, output policy)
//! - `bank` - The filter bank engine and its per-sample pipeline

pub mod bank;
pub mod biquad;
pub mod config;
pub mod control;
pub mod mix;

pub use bank::{FilterBank, Lane};
pub use config::{BankConfig, RightOutput, StateCoupling};
pub use control::{ControlMapper, ControlSet};

use mp_core::Sample;

/// Number of harmonic lanes in the bank
pub const LANE_COUNT: usize = 8;

/// Upper bound of the pole-count control, and stage capacity of every lane
pub const MAX_STAGES: usize = 8;

/// Trait for all DSP processors
pub trait Processor: Send + Sync {
    /// Reset processor state
    fn reset(&mut self);

    /// Get latency in samples
    fn latency(&self) -> usize {
        0
    }
}

/// Stereo processor trait
pub trait StereoProcessor: Processor {
    /// Process a stereo sample pair
    fn process_sample(&mut self, left: Sample, right: Sample) -> (Sample, Sample);

    /// Process stereo blocks
    fn process_block(&mut self, left: &mut [Sample], right: &mut [Sample]) {
        debug_assert_eq!(left.len(), right.len());
        for (l, r) in left.iter_mut().zip(right.iter_mut()) {
            (*l, *r) = self.process_sample(*l, *r);
        }
    }
}

/// Processor configuration for sample rate changes
pub trait ProcessorConfig {
    fn set_sample_rate(&mut self, sample_rate: f64);
}
