//! File and device I/O for latprobe.
//!
//! This crate provides:
//!
//! - **Recordings**: [`read_recording`] / [`write_recording`] for the raw
//!   interleaved `f32` capture format, and WAV equivalents via [`wav`]
//! - **Chirp artifacts**: [`write_chirp_artifact`] renders the excitation as
//!   a C++ or Rust source table for embedding in firmware or plugins
//! - **Exports**: [`write_impulse_response_csv`] for plotting the averaged
//!   impulse response
//! - **Capture**: [`LoopbackRecorder`] plays the excitation and records the
//!   reference and captured channels through any [`AudioBackend`]
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use latprobe_analysis::estimate_delay;
//! use latprobe_io::load_recording;
//!
//! let recording = load_recording("recording.bin")?;
//! let estimate = estimate_delay(&recording, 8192, 44100)?;
//! println!("Delay: {} samples", estimate.delay_samples);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod artifact;
pub mod backend;
pub mod cpal_backend;
mod devices;
pub mod export;
pub mod loopback;
pub mod recording;
pub mod wav;

pub use artifact::{ArtifactFormat, render_chirp_artifact, write_chirp_artifact};
pub use backend::{AudioBackend, BackendStreamConfig, StreamHandle};
pub use cpal_backend::CpalBackend;
pub use devices::{AudioDevice, default_device, list_devices};
pub use export::{write_impulse_response_csv, write_signal_csv};
pub use loopback::LoopbackRecorder;
pub use recording::{load_recording, read_recording, save_recording, write_recording};
pub use wav::{
    WavFormat, WavInfo, WavSpec, read_wav_frames, read_wav_info, write_wav, write_wav_frames,
};

/// Error types for latprobe I/O operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// WAV file read/write error.
    #[error("WAV file error: {0}")]
    Wav(#[from] hound::Error),

    /// Standard I/O error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Audio stream setup or runtime error.
    #[error("Audio stream error: {0}")]
    Stream(String),

    /// No audio device available on the system.
    #[error("No audio device available")]
    NoDevice,

    /// The requested audio device was not found.
    #[error("Device not found: {0}")]
    DeviceNotFound(String),

    /// A raw recording whose size is not a whole number of stereo frames.
    #[error("Malformed recording: {len} bytes is not a multiple of {frame_bytes}")]
    MalformedRecording {
        /// File length in bytes.
        len: u64,
        /// Bytes per stereo frame.
        frame_bytes: usize,
    },

    /// A device or file with too few channels for a reference/captured pair.
    #[error("Unsupported channel count: {0} (need at least 2)")]
    UnsupportedChannels(u16),

    /// Capture did not deliver the requested frames in time.
    #[error("Timed out after receiving {received} of {expected} frames")]
    Timeout {
        /// Frames received before the deadline.
        received: usize,
        /// Frames requested.
        expected: usize,
    },
}

/// Convenience result type for I/O operations.
pub type Result<T> = std::result::Result<T, Error>;
