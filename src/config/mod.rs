use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::generator::{GeneratorState, MAX_FREQUENCY, MIN_FREQUENCY};
use crate::types::waveform::Waveform;

/// Optional startup configuration
/// Sets initial generator parameters and the output backend; runtime
/// changes are never written back
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GeneratorConfig {
    #[serde(default)]
    pub startup: StartupConfig,

    #[serde(default)]
    pub output: OutputConfig,
}

impl GeneratorConfig {
    /// Load configuration from a YAML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: GeneratorConfig = serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse YAML config: {}", path.display()))?;

        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration, same ranges the command interface enforces
    pub fn validate(&self) -> Result<()> {
        if !(MIN_FREQUENCY..=MAX_FREQUENCY).contains(&self.startup.frequency) {
            return Err(anyhow!("Startup frequency must be between 20 and 5000 Hz"));
        }
        if !(0.0..=100.0).contains(&self.startup.amplitude) {
            return Err(anyhow!("Startup amplitude must be between 0 and 100%"));
        }
        Ok(())
    }

    /// Build the initial generator state from the startup block
    pub fn initial_state(&self) -> GeneratorState {
        GeneratorState {
            frequency: self.startup.frequency,
            amplitude: self.startup.amplitude / 100.0,
            enabled: self.startup.enabled,
            waveform: self.startup.wave,
        }
    }
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            startup: StartupConfig::default(),
            output: OutputConfig::default(),
        }
    }
}

/// Initial generator parameters
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StartupConfig {
    /// Hz, 20-5000
    #[serde(default = "default_frequency")]
    pub frequency: f32,

    /// Percent, 0-100
    #[serde(default = "default_amplitude")]
    pub amplitude: f32,

    #[serde(default)]
    pub wave: Waveform,

    #[serde(default = "default_enabled")]
    pub enabled: bool,
}

impl Default for StartupConfig {
    fn default() -> Self {
        Self {
            frequency: default_frequency(),
            amplitude: default_amplitude(),
            wave: Waveform::default(),
            enabled: default_enabled(),
        }
    }
}

/// Output backend selection
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct OutputConfig {
    #[serde(default)]
    pub backend: OutputBackend,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            backend: OutputBackend::default(),
        }
    }
}

/// Where duty values go: the audio renderer or nowhere
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputBackend {
    Audio,
    None,
}

impl Default for OutputBackend {
    fn default() -> Self {
        OutputBackend::Audio
    }
}

// Default value functions for serde
fn default_frequency() -> f32 {
    440.0
}

fn default_amplitude() -> f32 {
    100.0
}

fn default_enabled() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid_config() {
        let yaml = r#"
startup:
  frequency: 220.0
  amplitude: 75
  wave: square
  enabled: false

output:
  backend: none
"#;

        let config: GeneratorConfig = serde_yaml::from_str(yaml).unwrap();
        assert!(config.validate().is_ok());
        assert_eq!(config.startup.frequency, 220.0);
        assert_eq!(config.startup.wave, Waveform::Square);
        assert_eq!(config.output.backend, OutputBackend::None);

        let state = config.initial_state();
        assert_eq!(state.frequency, 220.0);
        assert!((state.amplitude - 0.75).abs() < 0.001);
        assert!(!state.enabled);
    }

    #[test]
    fn test_defaults() {
        let config: GeneratorConfig = serde_yaml::from_str("{}").unwrap();
        assert!(config.validate().is_ok());
        assert_eq!(config.startup.frequency, 440.0);
        assert_eq!(config.startup.amplitude, 100.0);
        assert_eq!(config.startup.wave, Waveform::Sine);
        assert!(config.startup.enabled);
        assert_eq!(config.output.backend, OutputBackend::Audio);
    }

    #[test]
    fn test_partial_startup_block() {
        let yaml = r#"
startup:
  wave: triangle
"#;
        let config: GeneratorConfig = serde_yaml::from_str(yaml).unwrap();
        assert!(config.validate().is_ok());
        assert_eq!(config.startup.wave, Waveform::Triangle);
        assert_eq!(config.startup.frequency, 440.0);
    }

    #[test]
    fn test_validate_frequency_range() {
        let yaml = r#"
startup:
  frequency: 10000.0
"#;
        let config: GeneratorConfig = serde_yaml::from_str(yaml).unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_amplitude_range() {
        let yaml = r#"
startup:
  amplitude: 150
"#;
        let config: GeneratorConfig = serde_yaml::from_str(yaml).unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_unknown_waveform_fails_parse() {
        let yaml = r#"
startup:
  wave: warble
"#;
        assert!(serde_yaml::from_str::<GeneratorConfig>(yaml).is_err());
    }
}
