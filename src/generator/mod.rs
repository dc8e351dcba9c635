use crate::types::waveform::Waveform;
use thiserror::Error;

/// Frequency limits in Hz, inclusive
pub const MIN_FREQUENCY: f32 = 20.0;
pub const MAX_FREQUENCY: f32 = 5000.0;

/// Default frequency on startup and after a sweep (A440)
pub const DEFAULT_FREQUENCY: f32 = 440.0;

/// Rejected parameter change; prior state is left untouched
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParamError {
    #[error("Frequency must be between 20 and 5000 Hz")]
    FrequencyOutOfRange,
    #[error("Amplitude must be between 0 and 100%")]
    AmplitudeOutOfRange,
}

/// Generator parameters, owned by the control loop
/// Mutated only through the validated setters (or directly by the
/// dispatcher for preset/sweep paths, which use known-good values)
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratorState {
    /// Output frequency in Hz, always within [20, 5000]
    pub frequency: f32,
    /// Amplitude as a fraction, always within [0, 1]
    pub amplitude: f32,
    pub enabled: bool,
    pub waveform: Waveform,
}

impl Default for GeneratorState {
    fn default() -> Self {
        Self {
            frequency: DEFAULT_FREQUENCY,
            amplitude: 1.0,
            enabled: true,
            waveform: Waveform::Sine,
        }
    }
}

impl GeneratorState {
    /// Set frequency in Hz; rejects values outside [20, 5000]
    pub fn set_frequency(&mut self, freq: f32) -> Result<(), ParamError> {
        if !(MIN_FREQUENCY..=MAX_FREQUENCY).contains(&freq) {
            return Err(ParamError::FrequencyOutOfRange);
        }
        self.frequency = freq;
        Ok(())
    }

    /// Set amplitude from a 0-100 percent value; stored as a fraction
    pub fn set_amplitude_percent(&mut self, percent: f32) -> Result<(), ParamError> {
        if !(0.0..=100.0).contains(&percent) {
            return Err(ParamError::AmplitudeOutOfRange);
        }
        self.amplitude = percent / 100.0;
        Ok(())
    }

    /// Adjust frequency by a signed delta, clamping to the valid range
    /// Returns the resulting frequency
    pub fn tune(&mut self, delta: f32) -> f32 {
        self.frequency = (self.frequency + delta).clamp(MIN_FREQUENCY, MAX_FREQUENCY);
        self.frequency
    }

    /// Amplitude as an integer percent, for display
    pub fn amplitude_percent(&self) -> i32 {
        (self.amplitude * 100.0) as i32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let state = GeneratorState::default();
        assert_eq!(state.frequency, 440.0);
        assert_eq!(state.amplitude, 1.0);
        assert!(state.enabled);
        assert_eq!(state.waveform, Waveform::Sine);
    }

    #[test]
    fn test_frequency_boundaries_inclusive() {
        let mut state = GeneratorState::default();
        assert!(state.set_frequency(20.0).is_ok());
        assert_eq!(state.frequency, 20.0);
        assert!(state.set_frequency(5000.0).is_ok());
        assert_eq!(state.frequency, 5000.0);
    }

    #[test]
    fn test_frequency_out_of_range_rejected() {
        let mut state = GeneratorState::default();
        assert_eq!(
            state.set_frequency(19.0),
            Err(ParamError::FrequencyOutOfRange)
        );
        assert_eq!(
            state.set_frequency(5001.0),
            Err(ParamError::FrequencyOutOfRange)
        );
        // Prior state unchanged on rejection
        assert_eq!(state.frequency, 440.0);
    }

    #[test]
    fn test_amplitude_boundaries_inclusive() {
        let mut state = GeneratorState::default();
        assert!(state.set_amplitude_percent(0.0).is_ok());
        assert_eq!(state.amplitude, 0.0);
        assert!(state.set_amplitude_percent(100.0).is_ok());
        assert_eq!(state.amplitude, 1.0);
        assert!(state.set_amplitude_percent(75.0).is_ok());
        assert!((state.amplitude - 0.75).abs() < 0.001);
    }

    #[test]
    fn test_amplitude_out_of_range_rejected() {
        let mut state = GeneratorState::default();
        assert_eq!(
            state.set_amplitude_percent(-1.0),
            Err(ParamError::AmplitudeOutOfRange)
        );
        assert_eq!(
            state.set_amplitude_percent(101.0),
            Err(ParamError::AmplitudeOutOfRange)
        );
        assert_eq!(state.amplitude, 1.0);
    }

    #[test]
    fn test_tune_clamps_high() {
        let mut state = GeneratorState::default();
        state.set_frequency(4950.0).unwrap();
        assert_eq!(state.tune(100.0), 5000.0);
        assert_eq!(state.frequency, 5000.0);
    }

    #[test]
    fn test_tune_clamps_low() {
        let mut state = GeneratorState::default();
        state.set_frequency(20.0).unwrap();
        assert_eq!(state.tune(-5.0), 20.0);
    }

    #[test]
    fn test_tune_small_adjustment() {
        let mut state = GeneratorState::default();
        let freq = state.tune(0.5);
        assert!((freq - 440.5).abs() < 0.001);
    }
}
