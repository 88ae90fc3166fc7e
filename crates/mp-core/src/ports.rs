//! Host boundary: parameter, input and output port ids
//!
//! The host owns the panel and the cables. It hands the engine one
//! [`PortFrame`] per tick, indexed by these ids.

use serde::{Deserialize, Serialize};

use crate::{ParamRange, ParamSpec, Sample};

/// Knob parameters, in host declaration order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParamId {
    CenterFrequency,
    Resonance,
    Bandwidth,
    NumPoles,
    NotchBandpass,
    PoleGap,
    StereoWidth,
    AllOddEven,
}

impl ParamId {
    pub const COUNT: usize = 8;

    pub const ALL: [ParamId; Self::COUNT] = [
        ParamId::CenterFrequency,
        ParamId::Resonance,
        ParamId::Bandwidth,
        ParamId::NumPoles,
        ParamId::NotchBandpass,
        ParamId::PoleGap,
        ParamId::StereoWidth,
        ParamId::AllOddEven,
    ];

    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    /// CV jack that modulates this parameter
    pub fn cv_input(self) -> InputId {
        match self {
            ParamId::CenterFrequency => InputId::CenterFrequencyCv,
            ParamId::Resonance => InputId::ResonanceCv,
            ParamId::Bandwidth => InputId::BandwidthCv,
            ParamId::NumPoles => InputId::NumPolesCv,
            ParamId::NotchBandpass => InputId::NotchBandpassCv,
            ParamId::PoleGap => InputId::PoleGapCv,
            ParamId::StereoWidth => InputId::StereoWidthCv,
            ParamId::AllOddEven => InputId::AllOddEvenCv,
        }
    }

    pub fn spec(self) -> ParamSpec {
        let percent = |label: &'static str| ParamSpec {
            label,
            unit: "%",
            range: ParamRange::linear(0.0, 1.0, 0.0),
            display_multiplier: 100.0,
        };

        match self {
            ParamId::CenterFrequency => ParamSpec {
                label: "Center Frequency",
                unit: "Hz",
                range: ParamRange::linear(100.0, 2100.0, 100.0),
                display_multiplier: 1.0,
            },
            ParamId::Resonance => percent("Resonance"),
            ParamId::Bandwidth => percent("Bandwidth"),
            ParamId::NumPoles => ParamSpec {
                label: "# of Poles",
                unit: "",
                range: ParamRange::stepped(1.0, 8.0, 1.0),
                display_multiplier: 1.0,
            },
            ParamId::NotchBandpass => percent("Notch/Bandpass"),
            ParamId::PoleGap => percent("Pole Gap"),
            ParamId::StereoWidth => percent("Stereo Width"),
            ParamId::AllOddEven => percent("All/Odd/Even"),
        }
    }
}

/// Input jacks, in host declaration order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InputId {
    AudioLeft,
    CenterFrequencyCv,
    ResonanceCv,
    NumPolesCv,
    BandwidthCv,
    AudioRight,
    PoleGapCv,
    AllOddEvenCv,
    StereoWidthCv,
    NotchBandpassCv,
}

impl InputId {
    pub const COUNT: usize = 10;

    pub const ALL: [InputId; Self::COUNT] = [
        InputId::AudioLeft,
        InputId::CenterFrequencyCv,
        InputId::ResonanceCv,
        InputId::NumPolesCv,
        InputId::BandwidthCv,
        InputId::AudioRight,
        InputId::PoleGapCv,
        InputId::AllOddEvenCv,
        InputId::StereoWidthCv,
        InputId::NotchBandpassCv,
    ];

    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn label(self) -> &'static str {
        match self {
            InputId::AudioLeft => "Audio L",
            InputId::CenterFrequencyCv => "Center Frequency CV",
            InputId::ResonanceCv => "Resonance CV",
            InputId::NumPolesCv => "Num Poles CV",
            InputId::BandwidthCv => "Bandwidth CV",
            InputId::AudioRight => "Audio R",
            InputId::PoleGapCv => "Pole Gap CV",
            InputId::AllOddEvenCv => "All/Odd/Even CV",
            InputId::StereoWidthCv => "Stereo Width CV",
            InputId::NotchBandpassCv => "Notch/Bandpass CV",
        }
    }
}

/// Output jacks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputId {
    AudioLeft,
    AudioRight,
}

impl OutputId {
    pub const COUNT: usize = 2;

    pub const ALL: [OutputId; Self::COUNT] = [OutputId::AudioLeft, OutputId::AudioRight];

    pub fn label(self) -> &'static str {
        match self {
            OutputId::AudioLeft => "Audio L",
            OutputId::AudioRight => "Audio R",
        }
    }
}

/// Everything the host hands over for one tick
///
/// Parameters are host-normalized (0-1). Inputs are voltages; an unpatched
/// jack reads 0 V.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PortFrame {
    pub params: [f64; ParamId::COUNT],
    pub inputs: [Sample; InputId::COUNT],
}

impl PortFrame {
    /// Frame with every knob at its default and every jack unpatched
    pub fn new() -> Self {
        let mut params = [0.0; ParamId::COUNT];
        for id in ParamId::ALL {
            params[id.index()] = id.spec().range.default_normalized();
        }
        Self {
            params,
            inputs: [0.0; InputId::COUNT],
        }
    }

    #[inline]
    pub fn param(&self, id: ParamId) -> f64 {
        self.params[id.index()]
    }

    #[inline]
    pub fn set_param(&mut self, id: ParamId, value: f64) {
        self.params[id.index()] = value;
    }

    #[inline]
    pub fn input(&self, id: InputId) -> Sample {
        self.inputs[id.index()]
    }

    #[inline]
    pub fn set_input(&mut self, id: InputId, voltage: Sample) {
        self.inputs[id.index()] = voltage;
    }

    /// Builder-style parameter setter
    pub fn with_param(mut self, id: ParamId, value: f64) -> Self {
        self.set_param(id, value);
        self
    }

    /// Builder-style input setter
    pub fn with_input(mut self, id: InputId, voltage: Sample) -> Self {
        self.set_input(id, voltage);
        self
    }
}

impl Default for PortFrame {
    fn default() -> Self {
        Self::new()
    }
}
