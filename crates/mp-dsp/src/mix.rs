//! Crossfade and output stage

use mp_core::Sample;

/// Linear blend of one lane's bandpass and notch outputs
///
/// `amount` 0 is pure bandpass, 1 is pure notch.
#[inline(always)]
pub fn crossfade(bandpass: Sample, notch: Sample, amount: f64) -> Sample {
    bandpass * (1.0 - amount) + notch * amount
}

/// Scale the lane sum and hard-limit it to the output voltage range
#[inline(always)]
pub fn scale_and_clamp(sum: Sample, gain: f64, limit: f64) -> Sample {
    if !sum.is_finite() {
        return 0.0;
    }
    (sum * gain).clamp(-limit, limit)
}

/// Running lane sum for one tick
#[derive(Debug, Clone, Copy, Default)]
pub struct LaneMix {
    sum: Sample,
    amount: f64,
}

impl LaneMix {
    #[inline]
    pub fn new(amount: f64) -> Self {
        Self { sum: 0.0, amount }
    }

    /// Crossfade one lane and add it to the sum
    #[inline]
    pub fn accumulate(&mut self, bandpass: Sample, notch: Sample) {
        self.sum += crossfade(bandpass, notch, self.amount);
    }

    #[inline]
    pub fn sum(&self) -> Sample {
        self.sum
    }

    #[inline]
    pub fn finish(self, gain: f64, limit: f64) -> Sample {
        scale_and_clamp(self.sum, gain, limit)
    }
}
