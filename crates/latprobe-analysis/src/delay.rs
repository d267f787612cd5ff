//! Round-trip delay estimation by block-wise deconvolution.
//!
//! The recording carries the played reference on channel 0 and the captured
//! signal on channel 1. After discarding a warm-up of two periods, the rest is
//! cut into whole blocks of one period each. Per block:
//!
//! ```text
//! In[b]  = FFT(reference block b)
//! Out[b] = FFT(captured block b)
//! H[b]   = Out[b] / In[b]            (bin-wise)
//! h_b    = Re(IFFT(H[b]))
//! ```
//!
//! The block responses are averaged sample-wise and the delay is the index of
//! the largest `|h[k]|`.
//!
//! # Circular delay
//!
//! The deconvolution is circular over one period, so a true delay `d` and
//! `d ± period` are indistinguishable. Estimates are only meaningful when the
//! round-trip delay is known to lie in `[0, period)`; choose a period longer
//! than any plausible latency. [`DelayEstimate::max_unambiguous_ms`] reports
//! the window.
//!
//! # Degenerate bins
//!
//! A reference bin whose power is not above [`DEGENERATE_FLOOR`] times the
//! strongest bin of the same block has its quotient set to zero, removing that
//! frequency from the block's impulse response. The number of such bins is
//! reported in [`DelayEstimate::degenerate_bins`]. A silent reference block
//! therefore contributes an all-zero response instead of NaNs.
//!
//! # Example
//!
//! ```rust
//! use latprobe_analysis::{chirp::synthesize, delay::estimate_delay};
//!
//! let period = 256;
//! let chirp = synthesize(period, 0.9).unwrap();
//! let recording: Vec<[f32; 2]> = (0..6 * period)
//!     .map(|n| {
//!         let reference = chirp[n % period] as f32;
//!         let captured = chirp[(n + period - 5) % period] as f32;
//!         [reference, captured]
//!     })
//!     .collect();
//!
//! let estimate = estimate_delay(&recording, period, 48000).unwrap();
//! assert_eq!(estimate.delay_samples, 5);
//! ```

use crate::error::{AnalysisError, Result, validate_period};
use crate::fft::Fft;
use crate::recording::Frame;
use rustfft::num_complex::Complex64;
use std::ops::Range;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Number of leading periods discarded before analysis.
pub const WARMUP_PERIODS: usize = 2;

/// Relative power floor below which a reference bin is treated as zero.
///
/// 1e-10 in power is 100 dB below the strongest bin of the block, under the
/// noise floor of an `f32` capture.
pub const DEGENERATE_FLOOR: f64 = 1e-10;

/// Block decomposition of a recording, as index arithmetic only.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockLayout {
    period: usize,
    warmup: usize,
    num_blocks: usize,
}

impl BlockLayout {
    /// Lay out `recording_len` frames into blocks of `period`.
    ///
    /// Fails with [`AnalysisError::InsufficientData`] when fewer than
    /// `3 * period` frames are available.
    pub fn new(recording_len: usize, period: usize) -> Result<Self> {
        validate_period(period)?;

        let warmup = WARMUP_PERIODS * period;
        let required = warmup + period;
        if recording_len < required {
            return Err(AnalysisError::InsufficientData {
                required,
                available: recording_len,
            });
        }

        Ok(Self {
            period,
            warmup,
            num_blocks: (recording_len - warmup) / period,
        })
    }

    /// Block length in frames.
    pub fn period(&self) -> usize {
        self.period
    }

    /// Number of frames skipped at the start.
    pub fn warmup(&self) -> usize {
        self.warmup
    }

    /// Number of whole blocks after the warm-up.
    pub fn num_blocks(&self) -> usize {
        self.num_blocks
    }

    /// Frame range of block `b`.
    pub fn block_range(&self, b: usize) -> Range<usize> {
        let start = self.warmup + b * self.period;
        start..start + self.period
    }

    /// Frame range covered by all blocks; trailing partial blocks are excluded.
    pub fn analysed_range(&self) -> Range<usize> {
        self.warmup..self.warmup + self.num_blocks * self.period
    }
}

/// Impulse-response estimate of a single block.
#[derive(Debug, Clone, PartialEq)]
pub struct BlockResponse {
    /// Real part of `IFFT(Out / In)`, `period` samples.
    pub impulse_response: Vec<f64>,
    /// Bins whose quotient was zeroed by the degeneracy floor.
    pub degenerate_bins: usize,
}

/// Result of a delay estimation.
#[derive(Debug, Clone, PartialEq)]
pub struct DelayEstimate {
    /// Index of the impulse-response peak.
    pub delay_samples: usize,
    /// `delay_samples * 1000 / sample_rate`.
    pub delay_ms: f64,
    /// Signed impulse-response value at the peak.
    pub peak_value: f64,
    /// Block-averaged impulse response, `period` samples.
    pub impulse_response: Vec<f64>,
    /// Number of blocks averaged.
    pub num_blocks: usize,
    /// Degenerate bins summed over all blocks.
    pub degenerate_bins: usize,
    /// Analysis block length.
    pub period: usize,
    /// Sample rate used for the millisecond conversion.
    pub sample_rate: u32,
}

impl DelayEstimate {
    /// Length of the unambiguous delay window in milliseconds.
    ///
    /// True delays at or beyond this value alias back into `[0, period)`.
    pub fn max_unambiguous_ms(&self) -> f64 {
        self.period as f64 * 1000.0 / f64::from(self.sample_rate)
    }
}

/// Block-wise deconvolution delay estimator.
///
/// Holds the validated parameters and the planned transforms, so repeated
/// estimates at the same period reuse one plan.
#[derive(Debug, Clone)]
pub struct DelayEstimator {
    period: usize,
    sample_rate: u32,
    fft: Fft,
}

impl DelayEstimator {
    /// Create an estimator for blocks of `period` frames.
    pub fn new(period: usize, sample_rate: u32) -> Result<Self> {
        validate_period(period)?;
        if sample_rate == 0 {
            return Err(AnalysisError::invalid("sample_rate", "must be positive"));
        }

        Ok(Self {
            period,
            sample_rate,
            fft: Fft::new(period),
        })
    }

    /// Block length in frames.
    pub fn period(&self) -> usize {
        self.period
    }

    /// Sample rate in Hz.
    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    /// Block layout for a recording of `recording_len` frames.
    pub fn layout(&self, recording_len: usize) -> Result<BlockLayout> {
        BlockLayout::new(recording_len, self.period)
    }

    /// Deconvolve block `b` of `recording`.
    ///
    /// `layout` must come from [`DelayEstimator::layout`] for the same
    /// recording.
    pub fn block_response(
        &self,
        recording: &[Frame],
        layout: &BlockLayout,
        b: usize,
    ) -> BlockResponse {
        let frames = &recording[layout.block_range(b)];

        let mut input: Vec<Complex64> = frames
            .iter()
            .map(|f| Complex64::new(f64::from(f[0]), 0.0))
            .collect();
        let mut output: Vec<Complex64> = frames
            .iter()
            .map(|f| Complex64::new(f64::from(f[1]), 0.0))
            .collect();

        self.fft.forward_complex(&mut input);
        self.fft.forward_complex(&mut output);

        let degenerate_bins = divide_spectra(&mut output, &input);
        self.fft.inverse_complex(&mut output);

        BlockResponse {
            impulse_response: output.iter().map(|c| c.re).collect(),
            degenerate_bins,
        }
    }

    /// Estimate the round-trip delay of `recording`.
    pub fn estimate(&self, recording: &[Frame]) -> Result<DelayEstimate> {
        let layout = self.layout(recording.len())?;
        check_finite(recording, layout.analysed_range())?;

        tracing::debug!(
            period = self.period,
            num_blocks = layout.num_blocks(),
            discarded = recording.len() - layout.analysed_range().len(),
            "deconvolving recording"
        );

        let responses = self.map_blocks(recording, &layout);
        let (impulse_response, degenerate_bins) = average_responses(&responses, self.period);
        let (delay_samples, peak_value) = peak_index(&impulse_response).unwrap_or((0, 0.0));

        if degenerate_bins > 0 {
            tracing::warn!(
                degenerate_bins,
                num_blocks = layout.num_blocks(),
                "reference spectrum has near-zero bins; their contribution was dropped"
            );
        }

        let delay_ms = delay_samples as f64 * 1000.0 / f64::from(self.sample_rate);
        tracing::info!(delay_samples, delay_ms, peak_value, "delay estimated");

        Ok(DelayEstimate {
            delay_samples,
            delay_ms,
            peak_value,
            impulse_response,
            num_blocks: layout.num_blocks(),
            degenerate_bins,
            period: self.period,
            sample_rate: self.sample_rate,
        })
    }

    /// Map every block index to its response, returned in block order.
    #[cfg(feature = "parallel")]
    fn map_blocks(&self, recording: &[Frame], layout: &BlockLayout) -> Vec<BlockResponse> {
        (0..layout.num_blocks())
            .into_par_iter()
            .map(|b| self.block_response(recording, layout, b))
            .collect()
    }

    /// Map every block index to its response, returned in block order.
    #[cfg(not(feature = "parallel"))]
    fn map_blocks(&self, recording: &[Frame], layout: &BlockLayout) -> Vec<BlockResponse> {
        (0..layout.num_blocks())
            .map(|b| self.block_response(recording, layout, b))
            .collect()
    }
}

/// Estimate the round-trip delay of a stereo recording.
///
/// Shorthand for [`DelayEstimator::new`] followed by
/// [`DelayEstimator::estimate`].
pub fn estimate_delay(recording: &[Frame], period: usize, sample_rate: u32) -> Result<DelayEstimate> {
    DelayEstimator::new(period, sample_rate)?.estimate(recording)
}

/// Replace `output` with `output / input` bin-wise, applying the degeneracy
/// floor. Returns the number of zeroed bins.
fn divide_spectra(output: &mut [Complex64], input: &[Complex64]) -> usize {
    let max_power = input.iter().map(|c| c.norm_sqr()).fold(0.0, f64::max);
    let floor = max_power * DEGENERATE_FLOOR;

    let mut degenerate = 0;
    for (out, inp) in output.iter_mut().zip(input) {
        if inp.norm_sqr() <= floor {
            *out = Complex64::new(0.0, 0.0);
            degenerate += 1;
        } else {
            *out /= *inp;
        }
    }
    degenerate
}

/// Average block responses sample-wise, reducing in slice order.
///
/// Returns the mean impulse response and the total degenerate-bin count. An
/// empty slice yields an all-zero response.
pub fn average_responses(responses: &[BlockResponse], period: usize) -> (Vec<f64>, usize) {
    let mut sum = vec![0.0f64; period];
    let mut degenerate = 0;

    for response in responses {
        for (acc, &v) in sum.iter_mut().zip(&response.impulse_response) {
            *acc += v;
        }
        degenerate += response.degenerate_bins;
    }

    if !responses.is_empty() {
        let scale = 1.0 / responses.len() as f64;
        for v in &mut sum {
            *v *= scale;
        }
    }

    (sum, degenerate)
}

/// Index and value of the largest `|h[k]|`, first occurrence on ties.
///
/// Returns `None` for an empty slice.
pub fn peak_index(h: &[f64]) -> Option<(usize, f64)> {
    let mut best: Option<(usize, f64)> = None;
    for (k, &v) in h.iter().enumerate() {
        match best {
            Some((_, b)) if v.abs() <= b.abs() => {}
            _ => best = Some((k, v)),
        }
    }
    best
}

fn check_finite(recording: &[Frame], range: Range<usize>) -> Result<()> {
    let start = range.start;
    for (offset, frame) in recording[range].iter().enumerate() {
        for (channel, sample) in frame.iter().enumerate() {
            if !sample.is_finite() {
                return Err(AnalysisError::NonFiniteSample {
                    frame: start + offset,
                    channel,
                });
            }
        }
    }
    Ok(())
}
