use crate::types::waveform::Waveform;
use std::f32::consts::TAU;

/// Oscillator with phase accumulation
/// Phase advances by 2π·f·Δt per tick and wraps at 2π
pub struct Oscillator {
    /// Current phase in radians [0, 2π)
    phase: f32,
}

impl Oscillator {
    pub fn new() -> Self {
        Self { phase: 0.0 }
    }

    /// Advance phase by the elapsed time and evaluate the waveform
    /// at the new phase. Returns a wave value in [-1.0, 1.0].
    ///
    /// The wrap is a single 2π subtraction: Δt must be small enough
    /// that the phase never advances by more than one full cycle,
    /// which holds at the ~25 µs loop cadence for frequencies
    /// up to 5000 Hz.
    pub fn tick(&mut self, waveform: Waveform, frequency: f32, delta_seconds: f32) -> f32 {
        self.phase += TAU * frequency * delta_seconds;
        if self.phase >= TAU {
            self.phase -= TAU;
        }
        waveform.generate(self.phase)
    }
}

impl Default for Oscillator {
    fn default() -> Self {
        Self::new()
    }
}
