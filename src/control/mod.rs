use crossbeam_channel::{Receiver, TryRecvError};
use std::fmt::Write as _;
use std::thread;
use std::time::{Duration, Instant};

use crate::command::Command;
use crate::dsp::oscillator::Oscillator;
use crate::generator::{GeneratorState, DEFAULT_FREQUENCY};
use crate::pwm::{PwmDriver, DUTY_MIDPOINT, MAX_DUTY};
use crate::types::preset;
use crate::types::waveform::Waveform;

/// Loop sleep between samples, ~40 kHz cadence
pub const TICK_INTERVAL: Duration = Duration::from_micros(25);

/// Sweep ramp endpoints and duration
const SWEEP_START_HZ: f32 = 100.0;
const SWEEP_END_HZ: f32 = 1000.0;
const SWEEP_DURATION: Duration = Duration::from_secs(10);

/// The single control task: polls for operator input, dispatches it,
/// and drives one duty write per sample tick
pub struct ControlLoop {
    state: GeneratorState,
    oscillator: Oscillator,
    driver: Box<dyn PwmDriver>,
    last_tick: Option<Instant>,
}

impl ControlLoop {
    pub fn new(state: GeneratorState, driver: Box<dyn PwmDriver>) -> Self {
        Self {
            state,
            oscillator: Oscillator::new(),
            driver,
            last_tick: None,
        }
    }

    /// Current state block for the operator
    pub fn status_text(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "=== CURRENT STATUS ===");
        let _ = writeln!(
            out,
            "Generator: {}",
            if self.state.enabled { "ON" } else { "OFF" }
        );
        let _ = writeln!(out, "Waveform:  {}", self.state.waveform);
        let _ = writeln!(out, "Frequency: {:.1} Hz", self.state.frequency);
        let _ = writeln!(out, "Amplitude: {}%", self.state.amplitude_percent());
        let _ = writeln!(out, "Output:    {}", self.driver.name());
        out.push_str("========================");
        out
    }

    /// Run until the input channel disconnects (stdin EOF)
    pub fn run(&mut self, lines: Receiver<String>) {
        loop {
            match lines.try_recv() {
                Ok(line) => {
                    if let Some(reply) = self.dispatch(&line) {
                        println!("{reply}");
                    }
                }
                Err(TryRecvError::Empty) => {}
                Err(TryRecvError::Disconnected) => break,
            }

            self.tick_once();
            thread::sleep(TICK_INTERVAL);
        }
    }

    /// Parse and execute one line of operator input
    /// Returns the response text, or `None` for empty input
    pub fn dispatch(&mut self, line: &str) -> Option<String> {
        let command = Command::parse(line)?;

        let reply = match command {
            Command::Help => help_text(),
            Command::Status => self.status_text(),
            Command::On => {
                self.state.enabled = true;
                format!("Generator ON\n{}", self.status_text())
            }
            Command::Off => {
                self.state.enabled = false;
                format!("Generator OFF\n{}", self.status_text())
            }
            Command::SetFreq(freq) => match self.state.set_frequency(freq) {
                Ok(()) => format!(
                    "Frequency set to {:.1} Hz\n{}",
                    self.state.frequency,
                    self.status_text()
                ),
                Err(err) => err.to_string(),
            },
            Command::SetAmp(percent) => match self.state.set_amplitude_percent(percent) {
                Ok(()) => format!(
                    "Amplitude set to {}%\n{}",
                    self.state.amplitude_percent(),
                    self.status_text()
                ),
                Err(err) => err.to_string(),
            },
            Command::SetWave(name) => match name.parse::<Waveform>() {
                Ok(waveform) => {
                    self.state.waveform = waveform;
                    format!("Waveform set to {}\n{}", waveform, self.status_text())
                }
                Err(err) => err.to_string(),
            },
            Command::ListNotes => notes_text(),
            Command::SetNote(name) => match preset::find(&name) {
                Some(preset) => {
                    self.state.frequency = preset.frequency;
                    format!(
                        "Set to {} ({:.1} Hz)\n{}",
                        preset.name,
                        preset.frequency,
                        self.status_text()
                    )
                }
                None => "Note not found. Type 'notes' to see available notes.".to_string(),
            },
            Command::Tune(delta) => {
                let freq = self.state.tune(delta);
                format!(
                    "Frequency adjusted to {:.1} Hz\n{}",
                    freq,
                    self.status_text()
                )
            }
            Command::Sweep => self.run_sweep(SWEEP_DURATION),
            Command::Unknown => {
                "Unknown command. Type 'help' for available commands.".to_string()
            }
        };
        Some(reply)
    }

    /// One pass of the sample loop: measure Δt, then either advance the
    /// oscillator and write its duty, or hold the midpoint while disabled
    pub fn tick_once(&mut self) {
        let now = Instant::now();
        let delta = self
            .last_tick
            .map(|last| now.duration_since(last).as_secs_f32())
            .unwrap_or(0.0);
        self.last_tick = Some(now);

        if self.state.enabled {
            let wave =
                self.oscillator
                    .tick(self.state.waveform, self.state.frequency, delta);
            self.driver.set_duty(duty_value(wave, self.state.amplitude));
        } else {
            self.driver.set_duty(DUTY_MIDPOINT);
        }
    }

    /// Linearly ramp frequency from 100 to 1000 Hz over the given
    /// duration while driving the oscillator, then restore the enabled
    /// flag and reset frequency to A440.
    ///
    /// Blocking and not cancellable: no commands are serviced until the
    /// ramp completes.
    pub fn run_sweep(&mut self, duration: Duration) -> String {
        println!("{}", sweep_intro_text(duration));

        let was_enabled = self.state.enabled;
        self.state.enabled = true;

        let start = Instant::now();
        let mut next_report = Duration::ZERO;
        loop {
            let elapsed = start.elapsed();
            if elapsed >= duration {
                break;
            }

            let progress = elapsed.as_secs_f32() / duration.as_secs_f32();
            self.state.frequency =
                SWEEP_START_HZ + (SWEEP_END_HZ - SWEEP_START_HZ) * progress;

            if elapsed >= next_report {
                println!("Sweep: {:.0} Hz", self.state.frequency);
                next_report += Duration::from_secs(1);
            }

            self.tick_once();
            thread::sleep(TICK_INTERVAL);
        }

        self.state.enabled = was_enabled;
        self.state.frequency = DEFAULT_FREQUENCY;
        format!("Sweep complete. Reset to 440 Hz.\n{}", self.status_text())
    }
}

/// Sweep announcement, printed before the ramp starts
fn sweep_intro_text(duration: Duration) -> String {
    format!(
        "\n=== FREQUENCY SWEEP TEST ===\n\
         Sweeping from {:.0}Hz to {:.0}Hz over {} seconds...\n\
         Generator will resume normal operation after sweep.",
        SWEEP_START_HZ,
        SWEEP_END_HZ,
        duration.as_secs()
    )
}

/// Map a wave value in [-1, 1] and an amplitude fraction to a duty value:
/// level = 0.5 + 0.5·a·w, clamped to [0, 1], scaled to 8-bit
pub fn duty_value(wave: f32, amplitude: f32) -> u8 {
    let level = (0.5 + 0.5 * amplitude * wave).clamp(0.0, 1.0);
    (level * MAX_DUTY as f32).round() as u8
}

/// Command list with usage examples
pub fn help_text() -> String {
    concat!(
        "=== AVAILABLE COMMANDS ===\n",
        "help, h           - Show this help\n",
        "status, s         - Show current settings\n",
        "on, start         - Enable generator\n",
        "off, stop         - Disable generator\n",
        "freq <Hz>, f <Hz> - Set frequency (20-5000 Hz)\n",
        "amp <0-100>, a <0-100> - Set amplitude (0-100%)\n",
        "wave <type>, w <type>  - Set waveform (sine/square/triangle/sawtooth)\n",
        "notes, n          - List guitar note presets\n",
        "note <name>       - Set frequency to guitar note\n",
        "tune <±Hz>        - Fine-tune frequency by amount\n",
        "sweep             - Frequency sweep test\n",
        "\n",
        "Examples:\n",
        "  freq 440        - Set to A440\n",
        "  amp 75          - Set amplitude to 75%\n",
        "  wave square     - Switch to square wave\n",
        "  note e2         - Set to low E string\n",
        "  tune 0.5        - Increase frequency by 0.5 Hz\n",
        "  tune -1         - Decrease frequency by 1 Hz",
    )
    .to_string()
}

/// Preset table listing
pub fn notes_text() -> String {
    let mut out = String::from("=== GUITAR NOTE PRESETS ===\n");
    for preset in &preset::PRESETS {
        let _ = writeln!(out, "{} - {:.1} Hz", preset.name, preset.frequency);
    }
    out.push_str("\nUsage: note <name> (e.g., 'note e2' or 'note a4')");
    out
}
