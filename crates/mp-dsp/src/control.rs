//! Control mapping: knob + CV pairs into normalized control values
//!
//! Every tick each parameter is offset by its CV jack. The CV is rescaled
//! from ±5 V to 0-1 and centered, so 0 V adds nothing and ±5 V shifts the
//! knob by ±0.5 before clamping.

use mp_core::{NormalizedValue, ParamId, PortFrame, Sample, sanitize};
use serde::{Deserialize, Serialize};

use crate::{LANE_COUNT, MAX_STAGES};

/// The eight control values of one tick, each in 0-1
///
/// `pole_gap`, `stereo_width` and `all_odd_even` are mapped and kept here
/// but do not shape the signal.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ControlSet {
    pub center_frequency: f64,
    pub resonance: f64,
    pub bandwidth: f64,
    pub num_poles: f64,
    pub notch_bandpass: f64,
    pub pole_gap: f64,
    pub stereo_width: f64,
    pub all_odd_even: f64,
}

impl ControlSet {
    pub fn get(&self, id: ParamId) -> f64 {
        match id {
            ParamId::CenterFrequency => self.center_frequency,
            ParamId::Resonance => self.resonance,
            ParamId::Bandwidth => self.bandwidth,
            ParamId::NumPoles => self.num_poles,
            ParamId::NotchBandpass => self.notch_bandpass,
            ParamId::PoleGap => self.pole_gap,
            ParamId::StereoWidth => self.stereo_width,
            ParamId::AllOddEven => self.all_odd_even,
        }
    }

    /// Set one control, clamped to 0-1
    pub fn set(&mut self, id: ParamId, value: f64) {
        let value = NormalizedValue::new(value).get();
        let slot = match id {
            ParamId::CenterFrequency => &mut self.center_frequency,
            ParamId::Resonance => &mut self.resonance,
            ParamId::Bandwidth => &mut self.bandwidth,
            ParamId::NumPoles => &mut self.num_poles,
            ParamId::NotchBandpass => &mut self.notch_bandpass,
            ParamId::PoleGap => &mut self.pole_gap,
            ParamId::StereoWidth => &mut self.stereo_width,
            ParamId::AllOddEven => &mut self.all_odd_even,
        };
        *slot = value;
    }

    /// Builder-style setter
    pub fn with(mut self, id: ParamId, value: f64) -> Self {
        self.set(id, value);
        self
    }

    /// Base (lane 0) center frequency: 100 Hz at 0, 2100 Hz at 1
    #[inline]
    pub fn center_frequency_hz(&self) -> f64 {
        ParamId::CenterFrequency
            .spec()
            .range
            .denormalize(self.center_frequency)
    }

    /// Biquad stages per cascade evaluation, 1..=8
    #[inline]
    pub fn stage_count(&self) -> usize {
        let poles = ParamId::NumPoles.spec().range.denormalize(self.num_poles);
        (poles as usize).clamp(1, MAX_STAGES)
    }

    /// Harmonic lane frequencies, lane `i` at `(i + 1)` times the base,
    /// each capped at `max_frequency`
    pub fn lane_frequencies(&self, max_frequency: f64) -> [f64; LANE_COUNT] {
        let base = self.center_frequency_hz();
        std::array::from_fn(|lane| (base * (lane + 1) as f64).min(max_frequency))
    }

    /// Bandpass/notch mix, 0 = bandpass only, 1 = notch only
    #[inline]
    pub fn crossfade_amount(&self) -> f64 {
        self.notch_bandpass
    }
}

/// Maps parameter and CV pairs into a [`ControlSet`]
pub struct ControlMapper;

impl ControlMapper {
    /// Full CV swing in volts (-5 V to +5 V)
    pub const CV_SPAN: f64 = 10.0;

    /// Offset contributed by a CV voltage: 0 at 0 V, ±0.5 at ±5 V
    #[inline]
    pub fn cv_offset(cv: Sample) -> f64 {
        let cv_scale = (sanitize(cv) + Self::CV_SPAN * 0.5) / Self::CV_SPAN;
        cv_scale - 0.5
    }

    /// Combine one knob value with its CV and clamp to 0-1
    #[inline]
    pub fn map_pair(param: f64, cv: Sample) -> f64 {
        NormalizedValue::new(sanitize(param) + Self::cv_offset(cv)).get()
    }

    /// Map every parameter of a host frame against its CV jack
    pub fn map_frame(frame: &PortFrame) -> ControlSet {
        let mut controls = ControlSet::default();
        for id in ParamId::ALL {
            controls.set(id, Self::map_pair(frame.param(id), frame.input(id.cv_input())));
        }
        controls
    }
}
