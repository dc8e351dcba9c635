mod command;
mod config;
mod control;
mod dsp;
mod generator;
mod pwm;
mod types;

use anyhow::Result;
use clap::Parser;
use std::io::{self, BufRead};
use std::thread;

use config::{GeneratorConfig, OutputBackend};
use control::{help_text, ControlLoop};
use pwm::{AudioPwm, NullPwm, PwmDriver};

/// Serial-style wave generator: drives a duty-value output from a
/// phase-accumulator oscillator, controlled by text commands on stdin
#[derive(Parser, Debug)]
#[command(name = "wavegen")]
#[command(about = "Text-controlled waveform generator", long_about = None)]
struct Args {
    /// Configuration file (YAML)
    #[arg(short = 'c', long = "config")]
    config: Option<std::path::PathBuf>,

    /// Discard output instead of opening the audio device
    #[arg(long = "silent")]
    silent: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => GeneratorConfig::load(path)?,
        None => GeneratorConfig::default(),
    };

    println!("\n=== Serial Wave Generator ===");
    println!("Initializing...");

    let driver = open_driver(&config, args.silent);

    // Feed stdin lines to the control loop without blocking it
    let (line_tx, line_rx) = crossbeam_channel::unbounded::<String>();
    thread::spawn(move || {
        let stdin = io::stdin();
        for line in stdin.lock().lines() {
            match line {
                Ok(line) => {
                    if line_tx.send(line).is_err() {
                        break;
                    }
                }
                Err(_) => break,
            }
        }
        // Dropping the sender disconnects the channel and stops the loop
    });

    let mut control = ControlLoop::new(config.initial_state(), driver);

    println!("\n=== CONTROLS ===");
    println!("{}", help_text());
    println!("{}", control.status_text());

    control.run(line_rx);

    Ok(())
}

/// Open the configured duty sink
/// Audio initialization failure is logged and demoted to the no-op
/// sink; the loop keeps issuing duty writes either way
fn open_driver(config: &GeneratorConfig, silent: bool) -> Box<dyn PwmDriver> {
    if silent || config.output.backend == OutputBackend::None {
        return Box::new(NullPwm);
    }

    match AudioPwm::new() {
        Ok(driver) => {
            println!("Audio output initialized");
            Box::new(driver)
        }
        Err(err) => {
            eprintln!("Audio output initialization failed: {err:#}");
            eprintln!("Continuing without output");
            Box::new(NullPwm)
        }
    }
}
