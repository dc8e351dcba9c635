use anyhow::{anyhow, Result};
use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::Arc;

/// Full-scale duty value (8-bit resolution)
pub const MAX_DUTY: u8 = 255;

/// Duty held while the generator is disabled (DC midpoint, no signal)
pub const DUTY_MIDPOINT: u8 = 128;

/// Duty-value sink, the stand-in for a PWM output pin
/// The control loop writes one duty value per sample tick
pub trait PwmDriver {
    /// Short name for the status display
    fn name(&self) -> &'static str;

    /// Latch a new duty value in [0, MAX_DUTY]
    fn set_duty(&mut self, duty: u8);
}

/// Discards every duty write
pub struct NullPwm;

impl PwmDriver for NullPwm {
    fn name(&self) -> &'static str {
        "none"
    }

    fn set_duty(&mut self, _duty: u8) {}
}

/// Renders the latest duty value through the default audio output
///
/// The control thread latches duty values into an atomic; the cpal
/// callback reads it per frame and emits the centered level, so the
/// audible output is the duty waveform held between sample ticks.
pub struct AudioPwm {
    duty: Arc<AtomicU8>,
    _stream: cpal::Stream,
}

impl AudioPwm {
    /// Open the default output device and start the stream
    pub fn new() -> Result<Self> {
        let host = cpal::default_host();
        let device = host
            .default_output_device()
            .ok_or_else(|| anyhow!("No audio output device found"))?;
        let config = device.default_output_config()?;
        let num_channels = config.channels() as usize;

        let duty = Arc::new(AtomicU8::new(DUTY_MIDPOINT));

        let stream = match config.sample_format() {
            cpal::SampleFormat::F32 => {
                build_stream::<f32>(&device, &config.into(), duty.clone(), num_channels)?
            }
            cpal::SampleFormat::I16 => {
                build_stream::<i16>(&device, &config.into(), duty.clone(), num_channels)?
            }
            cpal::SampleFormat::U16 => {
                build_stream::<u16>(&device, &config.into(), duty.clone(), num_channels)?
            }
            format => return Err(anyhow!("Unsupported sample format: {:?}", format)),
        };

        stream.play()?;

        Ok(Self {
            duty,
            _stream: stream,
        })
    }
}

impl PwmDriver for AudioPwm {
    fn name(&self) -> &'static str {
        "audio"
    }

    fn set_duty(&mut self, duty: u8) {
        self.duty.store(duty, Ordering::Relaxed);
    }
}

/// Build the output stream for one sample format
fn build_stream<T>(
    device: &cpal::Device,
    config: &cpal::StreamConfig,
    duty: Arc<AtomicU8>,
    num_channels: usize,
) -> Result<cpal::Stream>
where
    T: cpal::Sample + cpal::SizedSample + cpal::FromSample<f32>,
{
    let stream = device.build_output_stream(
        config,
        move |data: &mut [T], _: &cpal::OutputCallbackInfo| {
            for frame in data.chunks_mut(num_channels) {
                let level = duty_to_sample(duty.load(Ordering::Relaxed));
                for sample in frame.iter_mut() {
                    *sample = T::from_sample(level);
                }
            }
        },
        |err| eprintln!("Audio stream error: {}", err),
        None,
    )?;

    Ok(stream)
}

/// Map a duty value to a centered audio sample in [-1.0, 1.0]
fn duty_to_sample(duty: u8) -> f32 {
    (duty as f32 / MAX_DUTY as f32) * 2.0 - 1.0
}
