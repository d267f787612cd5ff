//! latprobe Analysis - chirp synthesis and round-trip delay estimation
//!
//! This crate holds the numerical core of the latency probe:
//!
//! - [`fft`] - planned forward/inverse transforms of arbitrary length
//! - [`chirp`] - periodic flat-spectrum chirp built in the frequency domain
//! - [`delay`] - block-wise deconvolution and impulse-peak delay estimation
//! - [`recording`] - stereo frame type and level summary
//!
//! ## Measurement Workflow
//!
//! ```rust,ignore
//! use latprobe_analysis::{synthesize, estimate_delay};
//!
//! // 1. Generate one period of the excitation and loop it on the output
//! let chirp = synthesize(8192, 0.9)?;
//!
//! // 2. Record [reference, captured] frames (external)
//!
//! // 3. Deconvolve and find the impulse peak
//! let estimate = estimate_delay(&recording, 8192, 48000)?;
//! println!("Delay: {} samples, {} msec", estimate.delay_samples, estimate.delay_ms);
//! ```
//!
//! ## Features
//!
//! - `parallel` (default) - deconvolve blocks on the rayon thread pool. The
//!   block average is reduced in block order either way, so results are
//!   identical with and without the feature.

pub mod chirp;
pub mod delay;
pub mod error;
pub mod fft;
pub mod recording;

// Re-export main types
pub use chirp::{
    ChirpSynthesizer, DEFAULT_DUTY_CYCLE, PhaseCoefficients, chirp_spectrum, phase_coefficients,
    synthesize,
};
pub use delay::{
    BlockLayout, BlockResponse, DEGENERATE_FLOOR, DelayEstimate, DelayEstimator, WARMUP_PERIODS,
    estimate_delay,
};
pub use error::{AnalysisError, Result};
pub use fft::Fft;
pub use recording::{Frame, RecordingSummary, summarize};

/// Complex sample type used by the transforms.
pub use rustfft::num_complex::Complex64;
