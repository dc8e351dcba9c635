pub mod preset;
pub mod waveform;
