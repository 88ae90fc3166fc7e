//! Biquad sections for the filter bank
//!
//! RBJ-style bandpass and notch coefficients evaluated in Direct Form I.
//! DF-I keeps the raw input history (`x1`, `x2`) next to the output history
//! (`y1`, `y2`), which is what the bank's lane state is made of.

use mp_core::Sample;
use std::f64::consts::PI;

/// Biquad coefficients, pre-divided by a0
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct BiquadCoeffs {
    pub b0: f64,
    pub b1: f64,
    pub b2: f64,
    pub a1: f64,
    pub a2: f64,
}

impl BiquadCoeffs {
    /// Bandpass and notch for the same lane, sharing one trig evaluation
    ///
    /// The bandpass is RBJ constant 0 dB peak gain. The notch numerator is
    /// the bandpass denominator reversed (`1-α, -2cos ω, 1+α`). That is the
    /// bank's notch voicing: unity magnitude with a phase flip through the
    /// center, so crossfading it against the bandpass carves the
    /// cancellation notch.
    pub fn bandpass_notch_pair(freq: f64, q: f64, sample_rate: f64) -> (Self, Self) {
        let omega = 2.0 * PI * freq / sample_rate;
        let cos_omega = omega.cos();
        let alpha = omega.sin() / (2.0 * q);

        let a0 = 1.0 + alpha;
        let a1 = -2.0 * cos_omega / a0;
        let a2 = (1.0 - alpha) / a0;

        let bandpass = Self {
            b0: alpha / a0,
            b1: 0.0,
            b2: -alpha / a0,
            a1,
            a2,
        };
        let notch = Self {
            b0: (1.0 - alpha) / a0,
            b1: a1,
            b2: (1.0 + alpha) / a0,
            a1,
            a2,
        };
        (bandpass, notch)
    }

    #[inline]
    pub fn bandpass(freq: f64, q: f64, sample_rate: f64) -> Self {
        Self::bandpass_notch_pair(freq, q, sample_rate).0
    }

    #[inline]
    pub fn notch(freq: f64, q: f64, sample_rate: f64) -> Self {
        Self::bandpass_notch_pair(freq, q, sample_rate).1
    }

    /// Magnitude response at `freq`
    pub fn magnitude_at(&self, freq: f64, sample_rate: f64) -> f64 {
        let w = 2.0 * PI * freq / sample_rate;
        let (s1, c1) = w.sin_cos();
        let (s2, c2) = (2.0 * w).sin_cos();

        let num_re = self.b0 + self.b1 * c1 + self.b2 * c2;
        let num_im = -(self.b1 * s1 + self.b2 * s2);
        let den_re = 1.0 + self.a1 * c1 + self.a2 * c2;
        let den_im = -(self.a1 * s1 + self.a2 * s2);

        ((num_re * num_re + num_im * num_im) / (den_re * den_re + den_im * den_im)).sqrt()
    }
}

/// Q from the resonance and bandwidth controls
///
/// Both controls are floored so a knob at zero can never produce an
/// infinite alpha.
#[inline]
pub fn q_factor(resonance: f64, bandwidth: f64, resonance_floor: f64, bandwidth_floor: f64) -> f64 {
    resonance.max(resonance_floor) / bandwidth.max(bandwidth_floor)
}

/// Direct Form I history: last two inputs and last two outputs
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct BiquadState {
    pub x1: f64,
    pub x2: f64,
    pub y1: f64,
    pub y2: f64,
}

impl BiquadState {
    #[inline(always)]
    pub fn process(&mut self, coeffs: &BiquadCoeffs, input: Sample) -> Sample {
        let output = coeffs.b0 * input + coeffs.b1 * self.x1 + coeffs.b2 * self.x2
            - coeffs.a1 * self.y1
            - coeffs.a2 * self.y2;

        self.x2 = self.x1;
        self.x1 = input;
        self.y2 = self.y1;
        self.y1 = output;
        output
    }

    #[inline]
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    #[inline]
    pub fn is_finite(&self) -> bool {
        self.x1.is_finite() && self.x2.is_finite() && self.y1.is_finite() && self.y2.is_finite()
    }
}

/// Run `stages` biquad stages in series and return the last stage's output
///
/// Stage `k` uses `slots[k]`; when fewer slots than stages are given, the
/// remaining stages reuse the last slot. Passing a single slot gives the
/// shared-history cascade where every stage reads and overwrites the same
/// four values. With no slots at all the input passes through.
#[inline]
pub fn process_cascade(
    slots: &mut [BiquadState],
    coeffs: &BiquadCoeffs,
    stages: usize,
    input: Sample,
) -> Sample {
    let Some(last) = slots.len().checked_sub(1) else {
        return input;
    };

    let mut signal = input;
    for stage in 0..stages {
        signal = slots[stage.min(last)].process(coeffs, signal);
    }
    signal
}
