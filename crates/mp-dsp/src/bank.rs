//! Multipole filter bank engine
//!
//! Eight lanes tuned to the harmonics of one base frequency. Each tick every
//! lane runs its biquad cascade twice, once as a bandpass and once as a
//! notch, the two results are crossfaded by the Notch/Bandpass control, and
//! the eight lanes are summed, scaled and clamped to the output range.
//!
//! # Pipeline
//! ```text
//! PortFrame ─► ControlMapper ─► frequencies / Q / stages ─► 8 × lane
//!                                                  (bandpass ─► notch ─► crossfade)
//!                                                           ─► sum ─► ×gain ─► clamp
//! ```
//!
//! All state lives in the [`FilterBank`] value. Nothing on the per-sample
//! path allocates, locks or logs.

use mp_core::{InputId, MpResult, PortFrame, Sample, StereoSample, sanitize, validate_sample_rate};

use crate::biquad::{BiquadCoeffs, BiquadState, process_cascade, q_factor};
use crate::config::{BankConfig, RightOutput, StateCoupling};
use crate::control::{ControlMapper, ControlSet};
use crate::mix::LaneMix;
use crate::{LANE_COUNT, MAX_STAGES, Processor, ProcessorConfig, StereoProcessor};

// ============ Lane ============

/// History for one harmonic lane
///
/// Capacity is always [`MAX_STAGES`] per mode. With
/// [`StateCoupling::Shared`] only `bandpass[0]` is used, by both modes.
#[derive(Debug, Clone, Copy, Default)]
pub struct Lane {
    bandpass: [BiquadState; MAX_STAGES],
    notch: [BiquadState; MAX_STAGES],
}

impl Lane {
    /// Run both cascades for one input sample
    ///
    /// Returns `None` (and clears the lane) when the recursion has run away:
    /// either output is non-finite or larger than `limit` in magnitude. The
    /// shared topology diverges geometrically but stays finite for hundreds
    /// of samples, so a finite bound is what catches it.
    #[inline]
    pub fn process(
        &mut self,
        coupling: StateCoupling,
        bandpass: &BiquadCoeffs,
        notch: &BiquadCoeffs,
        stages: usize,
        input: Sample,
        limit: f64,
    ) -> Option<(Sample, Sample)> {
        let (bp_out, notch_out) = match coupling {
            StateCoupling::Shared => {
                let shared = &mut self.bandpass[..1];
                let bp_out = process_cascade(shared, bandpass, stages, input);
                let notch_out = process_cascade(shared, notch, stages, input);
                (bp_out, notch_out)
            }
            StateCoupling::Isolated => (
                process_cascade(&mut self.bandpass, bandpass, stages, input),
                process_cascade(&mut self.notch, notch, stages, input),
            ),
        };

        // NaN fails both comparisons
        if bp_out.abs() <= limit && notch_out.abs() <= limit {
            Some((bp_out, notch_out))
        } else {
            self.reset();
            None
        }
    }

    /// History used by the shared topology
    #[inline]
    pub fn shared_state(&self) -> &BiquadState {
        &self.bandpass[0]
    }

    pub fn is_finite(&self) -> bool {
        self.bandpass
            .iter()
            .chain(self.notch.iter())
            .all(BiquadState::is_finite)
    }

    pub fn is_silent(&self) -> bool {
        self.bandpass
            .iter()
            .chain(self.notch.iter())
            .all(|s| *s == BiquadState::default())
    }

    #[inline]
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

// ============ Filter Bank ============

/// The Multipole engine: control mapping, eight lanes and the output stage
#[derive(Debug, Clone)]
pub struct FilterBank {
    config: BankConfig,
    sample_rate: f64,
    controls: ControlSet,
    lanes: [Lane; LANE_COUNT],
    runaway_resets: u64,
}

impl FilterBank {
    /// Create a bank with the stock configuration
    pub fn new(sample_rate: f64) -> MpResult<Self> {
        Self::with_config(sample_rate, BankConfig::default())
    }

    pub fn with_config(sample_rate: f64, config: BankConfig) -> MpResult<Self> {
        let sample_rate = validate_sample_rate(sample_rate)?;
        config.validate()?;

        log::debug!(
            "FilterBank: created at {}Hz, coupling={:?}, right_output={:?}",
            sample_rate,
            config.coupling,
            config.right_output
        );

        Ok(Self {
            config,
            sample_rate,
            controls: ControlSet::default(),
            lanes: [Lane::default(); LANE_COUNT],
            runaway_resets: 0,
        })
    }

    #[inline]
    pub fn config(&self) -> &BankConfig {
        &self.config
    }

    /// Swap the configuration. Lane history is cleared when the coupling
    /// changes, since the two topologies read different slots.
    pub fn set_config(&mut self, config: BankConfig) -> MpResult<()> {
        config.validate()?;
        if config.coupling != self.config.coupling {
            self.reset();
        }
        log::debug!("FilterBank: config updated {:?}", config);
        self.config = config;
        Ok(())
    }

    #[inline]
    pub fn sample_rate(&self) -> f64 {
        self.sample_rate
    }

    /// Control values used by the most recent tick
    #[inline]
    pub fn controls(&self) -> &ControlSet {
        &self.controls
    }

    /// Set controls directly, for block processing without a host frame
    pub fn set_controls(&mut self, controls: ControlSet) {
        self.controls = controls;
    }

    #[inline]
    pub fn lanes(&self) -> &[Lane; LANE_COUNT] {
        &self.lanes
    }

    /// Times a lane was cleared after its recursion went non-finite
    #[inline]
    pub fn runaway_resets(&self) -> u64 {
        self.runaway_resets
    }

    /// Lane center frequencies for the current controls and sample rate
    pub fn lane_frequencies(&self) -> [f64; LANE_COUNT] {
        self.controls
            .lane_frequencies(self.config.max_frequency_ratio * self.sample_rate)
    }

    /// One host tick: map the frame's controls, filter the left input and
    /// return both output voltages
    ///
    /// The sample rate is read every tick. An invalid value keeps the
    /// previous rate.
    pub fn tick(&mut self, sample_rate: f64, frame: &PortFrame) -> StereoSample {
        if sample_rate.is_finite() && sample_rate > 0.0 {
            self.sample_rate = sample_rate;
        }
        self.controls = ControlMapper::map_frame(frame);
        self.render(frame.input(InputId::AudioLeft), frame.input(InputId::AudioRight))
    }

    /// Filter one sample with the current controls
    fn render(&mut self, left: Sample, right: Sample) -> StereoSample {
        let input = sanitize(left);
        let stages = self.controls.stage_count();
        let q = q_factor(
            self.controls.resonance,
            self.controls.bandwidth,
            self.config.resonance_floor,
            self.config.bandwidth_floor,
        );
        let frequencies = self.lane_frequencies();
        let coupling = self.config.coupling;
        let runaway_limit = self.config.runaway_limit;

        let mut mix = LaneMix::new(self.controls.crossfade_amount());
        for (lane, &frequency) in self.lanes.iter_mut().zip(frequencies.iter()) {
            let (bandpass, notch) =
                BiquadCoeffs::bandpass_notch_pair(frequency, q, self.sample_rate);

            match lane.process(coupling, &bandpass, &notch, stages, input, runaway_limit) {
                Some((bp_out, notch_out)) => mix.accumulate(bp_out, notch_out),
                None => self.runaway_resets += 1,
            }
        }

        let limit = self.config.output_limit;
        let out_left = mix.finish(self.config.output_gain, limit);
        let out_right = match self.config.right_output {
            RightOutput::Silent => 0.0,
            RightOutput::Passthrough => sanitize(right).clamp(-limit, limit),
        };

        StereoSample::new(out_left, out_right)
    }
}

impl Processor for FilterBank {
    fn reset(&mut self) {
        for lane in self.lanes.iter_mut() {
            lane.reset();
        }
    }
}

impl StereoProcessor for FilterBank {
    #[inline]
    fn process_sample(&mut self, left: Sample, right: Sample) -> (Sample, Sample) {
        let out = self.render(left, right);
        (out.left, out.right)
    }
}

impl ProcessorConfig for FilterBank {
    fn set_sample_rate(&mut self, sample_rate: f64) {
        match validate_sample_rate(sample_rate) {
            Ok(rate) => {
                log::debug!("FilterBank: sample rate {}Hz -> {}Hz", self.sample_rate, rate);
                self.sample_rate = rate;
            }
            Err(e) => log::warn!("FilterBank: {e}, keeping {}Hz", self.sample_rate),
        }
    }
}
