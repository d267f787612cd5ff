//! cpal-based audio backend.
//!
//! [`CpalBackend`] implements [`AudioBackend`] on top of
//! [cpal](https://crates.io/crates/cpal): ALSA on Linux, CoreAudio on macOS,
//! WASAPI on Windows.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use latprobe_io::{AudioBackend, CpalBackend};
//!
//! let backend = CpalBackend::new();
//! for device in backend.list_devices()? {
//!     println!("{} ({} Hz)", device.name, device.default_sample_rate);
//! }
//! # Ok::<(), latprobe_io::Error>(())
//! ```

use crate::backend::{
    AudioBackend, BackendStreamConfig, ErrorCallback, InputCallback, OutputCallback, StreamHandle,
};
use crate::devices::{Direction, find_device};
use crate::{AudioDevice, Error, Result};
use cpal::Host;
use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};

/// cpal-based audio backend holding the platform's default host.
pub struct CpalBackend {
    host: Host,
}

impl CpalBackend {
    /// Create a backend on the platform's default audio host.
    pub fn new() -> Self {
        let host = cpal::default_host();
        tracing::info!(host = host.id().name(), "cpal backend initialized");
        Self { host }
    }

    fn stream_config(config: &BackendStreamConfig) -> cpal::StreamConfig {
        cpal::StreamConfig {
            channels: config.channels,
            sample_rate: config.sample_rate,
            buffer_size: cpal::BufferSize::Fixed(config.buffer_size),
        }
    }
}

impl Default for CpalBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl AudioBackend for CpalBackend {
    fn name(&self) -> &'static str {
        "cpal"
    }

    fn list_devices(&self) -> Result<Vec<AudioDevice>> {
        // Enumerates the default host, which is the one this backend holds
        crate::devices::list_devices()
    }

    fn build_output_stream(
        &self,
        config: &BackendStreamConfig,
        mut callback: OutputCallback,
        mut error_callback: ErrorCallback,
    ) -> Result<StreamHandle> {
        let device = find_device(&self.host, config.device_name.as_deref(), Direction::Output)?;

        let stream = device
            .build_output_stream(
                &Self::stream_config(config),
                move |data: &mut [f32], _: &cpal::OutputCallbackInfo| {
                    callback(data);
                },
                move |err| {
                    error_callback(&err.to_string());
                },
                None,
            )
            .map_err(|e| Error::Stream(e.to_string()))?;

        stream.play().map_err(|e| Error::Stream(e.to_string()))?;
        tracing::info!(
            channels = config.channels,
            sample_rate = config.sample_rate,
            buffer_size = config.buffer_size,
            "output stream started"
        );

        Ok(StreamHandle::new(stream))
    }

    fn build_input_stream(
        &self,
        config: &BackendStreamConfig,
        mut callback: InputCallback,
        mut error_callback: ErrorCallback,
    ) -> Result<StreamHandle> {
        let device = find_device(&self.host, config.device_name.as_deref(), Direction::Input)?;

        let stream = device
            .build_input_stream(
                &Self::stream_config(config),
                move |data: &[f32], _: &cpal::InputCallbackInfo| {
                    callback(data);
                },
                move |err| {
                    error_callback(&err.to_string());
                },
                None,
            )
            .map_err(|e| Error::Stream(e.to_string()))?;

        stream.play().map_err(|e| Error::Stream(e.to_string()))?;
        tracing::info!(
            channels = config.channels,
            sample_rate = config.sample_rate,
            buffer_size = config.buffer_size,
            "input stream started"
        );

        Ok(StreamHandle::new(stream))
    }
}
