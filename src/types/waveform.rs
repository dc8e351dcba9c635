use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Supported waveform types for the generator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Waveform {
    Sine,
    Square,
    Triangle,
    Sawtooth,
}

impl Default for Waveform {
    fn default() -> Self {
        Waveform::Sine
    }
}

/// Error returned when a waveform name doesn't match any variant
#[derive(Debug, Error, PartialEq, Eq)]
#[error("Valid waveforms: sine, square, triangle, sawtooth")]
pub struct UnknownWaveform;

impl FromStr for Waveform {
    type Err = UnknownWaveform;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "sine" => Ok(Waveform::Sine),
            "square" => Ok(Waveform::Square),
            "triangle" => Ok(Waveform::Triangle),
            "sawtooth" => Ok(Waveform::Sawtooth),
            _ => Err(UnknownWaveform),
        }
    }
}

impl fmt::Display for Waveform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl Waveform {
    /// Lowercase name, as accepted by the `wave` command
    pub fn name(&self) -> &'static str {
        match self {
            Waveform::Sine => "sine",
            Waveform::Square => "square",
            Waveform::Triangle => "triangle",
            Waveform::Sawtooth => "sawtooth",
        }
    }

    /// Evaluate this waveform at the given phase in radians [0, 2π)
    /// Output is in [-1.0, 1.0] for every waveform
    pub fn generate(&self, phase: f32) -> f32 {
        use std::f32::consts::PI;

        match self {
            Waveform::Sine => phase.sin(),
            Waveform::Square => {
                // Sign of the sine; sin(phase) == 0 resolves to -1
                if phase.sin() > 0.0 {
                    1.0
                } else {
                    -1.0
                }
            }
            Waveform::Triangle => {
                // Linear ramp in [-1, 1] with period 2π
                (2.0 / PI) * phase.sin().asin()
            }
            Waveform::Sawtooth => {
                // -1 at phase 0, rising to +1 approaching 2π
                (phase / PI) - 1.0
            }
        }
    }
}
