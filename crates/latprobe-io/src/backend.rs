//! Pluggable audio backend abstraction.
//!
//! [`AudioBackend`] decouples the loopback recorder from any specific platform
//! audio API. [`CpalBackend`](crate::CpalBackend) is the desktop
//! implementation; tests drive the recorder with a simulated backend that
//! feeds the output back into the input after a known delay.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────┐
//! │         LoopbackRecorder         │
//! └──────────────┬───────────────────┘
//!                │ uses AudioBackend trait
//!                ▼
//! ┌──────────────────────────────────┐
//! │        AudioBackend trait        │
//! │  list_devices / build_streams    │
//! └──────────────┬───────────────────┘
//!        ┌───────┴────────┐
//!        ▼                ▼
//! ┌─────────────┐  ┌─────────────┐
//! │ CpalBackend │  │  simulated  │
//! │             │  │  (tests)    │
//! └─────────────┘  └─────────────┘
//! ```
//!
//! Callbacks are boxed closures so the trait stays object-safe, and streams
//! are returned as a type-erased [`StreamHandle`] that stops the stream on
//! drop.

use crate::{AudioDevice, Result};

/// Configuration for building an audio stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackendStreamConfig {
    /// Requested sample rate in Hz.
    pub sample_rate: u32,
    /// Preferred buffer size in frames.
    pub buffer_size: u32,
    /// Number of interleaved channels.
    pub channels: u16,
    /// Device index or name (uses the system default if `None`).
    pub device_name: Option<String>,
}

impl Default for BackendStreamConfig {
    fn default() -> Self {
        Self {
            sample_rate: 48000,
            buffer_size: 512,
            channels: 2,
            device_name: None,
        }
    }
}

/// Type-erased audio stream handle.
///
/// The stream is active while this handle exists; dropping it stops playback
/// or capture.
pub struct StreamHandle {
    _inner: Box<dyn Send>,
}

impl StreamHandle {
    /// Wrap a backend-specific stream object, keeping it alive until drop.
    pub fn new<T: Send + 'static>(stream: T) -> Self {
        Self {
            _inner: Box::new(stream),
        }
    }
}

impl std::fmt::Debug for StreamHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StreamHandle").finish_non_exhaustive()
    }
}

/// Audio output callback.
///
/// Runs on the audio thread and fills a buffer of interleaved f32 samples,
/// `frames * channels` long. Must not block.
pub type OutputCallback = Box<dyn FnMut(&mut [f32]) + Send>;

/// Audio input callback.
///
/// Runs on the audio thread with captured interleaved f32 samples.
pub type InputCallback = Box<dyn FnMut(&[f32]) + Send>;

/// Error callback, called with a human-readable message when the backend
/// reports a streaming error.
pub type ErrorCallback = Box<dyn FnMut(&str) + Send>;

/// Pluggable audio backend trait.
///
/// Object-safe, so backends can be selected at runtime as
/// `Box<dyn AudioBackend>`.
pub trait AudioBackend: Send {
    /// Human-readable name of this backend (e.g., "cpal").
    fn name(&self) -> &str;

    /// List all available audio devices.
    fn list_devices(&self) -> Result<Vec<AudioDevice>>;

    /// Build an output-only audio stream.
    ///
    /// `callback` is invoked per buffer on the audio thread. Dropping the
    /// returned handle stops playback.
    fn build_output_stream(
        &self,
        config: &BackendStreamConfig,
        callback: OutputCallback,
        error_callback: ErrorCallback,
    ) -> Result<StreamHandle>;

    /// Build an input-only audio stream.
    ///
    /// `callback` is invoked per captured buffer on the audio thread.
    /// Dropping the returned handle stops capture.
    fn build_input_stream(
        &self,
        config: &BackendStreamConfig,
        callback: InputCallback,
        error_callback: ErrorCallback,
    ) -> Result<StreamHandle>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = BackendStreamConfig::default();
        assert_eq!(config.sample_rate, 48000);
        assert_eq!(config.buffer_size, 512);
        assert_eq!(config.channels, 2);
        assert!(config.device_name.is_none());
    }

    #[test]
    fn test_stream_handle_debug() {
        let handle = StreamHandle::new(42u32);
        assert!(format!("{handle:?}").contains("StreamHandle"));
    }
}
