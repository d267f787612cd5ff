//! Periodic flat-spectrum chirp synthesis.
//!
//! The excitation signal is built directly in the frequency domain: every bin
//! gets a unit-magnitude phasor with a quadratic phase, the half spectrum is
//! mirrored into a Hermitian-symmetric full spectrum, and one inverse FFT
//! yields a real signal of exactly one period. Because the magnitude is 1 in
//! every bin, dividing by the reference spectrum during deconvolution never
//! hits a weak bin.
//!
//! # Phase construction
//!
//! With `NF = period / 2` and duty cycle `d`:
//!
//! ```text
//! β        = 2π·d / period
//! rawAlpha = ceil(β·NF² / 2π)
//! α        = rawAlpha·2π / NF − β·NF
//! S[k]     = exp(−i·(α·k + β·k²)),   k = 0..=NF
//! ```
//!
//! The rounding in `rawAlpha` makes the total phase at the Nyquist bin
//! `α·NF + β·NF²` an exact multiple of 2π, so `S[NF]` is real and the
//! mirrored spectrum is consistent.
//!
//! # Example
//!
//! ```rust
//! use latprobe_analysis::chirp::synthesize;
//!
//! let chirp = synthesize(1024, 0.9).unwrap();
//! assert_eq!(chirp.len(), 1024);
//! ```

use crate::error::{AnalysisError, Result, validate_period};
use crate::fft::Fft;
use rustfft::num_complex::Complex64;
use std::f64::consts::PI;

/// Duty cycle used when none is configured.
pub const DEFAULT_DUTY_CYCLE: f64 = 0.9;

/// Coefficients of the quadratic spectral phase `α·k + β·k²`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PhaseCoefficients {
    /// Linear phase term (radians per bin).
    pub alpha: f64,
    /// Quadratic phase term (radians per bin²).
    pub beta: f64,
}

impl PhaseCoefficients {
    /// Phase of bin `k` in radians.
    pub fn phase(&self, k: usize) -> f64 {
        let k = k as f64;
        self.alpha * k + self.beta * k * k
    }
}

fn validate_duty_cycle(duty_cycle: f64) -> Result<()> {
    if !duty_cycle.is_finite() || duty_cycle <= 0.0 || duty_cycle >= 1.0 {
        return Err(AnalysisError::invalid(
            "duty_cycle",
            format!("must lie in the open interval (0, 1), got {duty_cycle}"),
        ));
    }
    Ok(())
}

/// Derive the phase coefficients for a chirp of `period` samples.
pub fn phase_coefficients(period: usize, duty_cycle: f64) -> Result<PhaseCoefficients> {
    validate_period(period)?;
    validate_duty_cycle(duty_cycle)?;
    Ok(compute_coefficients(period, duty_cycle))
}

fn compute_coefficients(period: usize, duty_cycle: f64) -> PhaseCoefficients {
    let nf = (period / 2) as f64;
    let beta = 2.0 * PI * duty_cycle / period as f64;
    let raw_alpha = (beta * nf * nf / (2.0 * PI)).ceil();
    let alpha = raw_alpha * 2.0 * PI / nf - beta * nf;

    PhaseCoefficients { alpha, beta }
}

/// Build the full Hermitian-symmetric spectrum of the chirp.
///
/// Bins `0..=NF` hold the unit phasors, bins `NF+1..period` hold the
/// conjugates of bins `NF-1..=1` in reverse order, so
/// `spectrum[period - k] == spectrum[k].conj()`.
pub fn chirp_spectrum(period: usize, duty_cycle: f64) -> Result<Vec<Complex64>> {
    let coeffs = phase_coefficients(period, duty_cycle)?;
    let nf = period / 2;

    let mut spectrum: Vec<Complex64> = (0..=nf)
        .map(|k| Complex64::from_polar(1.0, -coeffs.phase(k)))
        .collect();
    spectrum.reserve(period - spectrum.len());
    for k in (1..nf).rev() {
        spectrum.push(spectrum[k].conj());
    }

    debug_assert_eq!(spectrum.len(), period);
    Ok(spectrum)
}

/// Synthesize one period of the chirp.
///
/// Returns exactly `period` samples. The result is a pure function of the
/// arguments.
pub fn synthesize(period: usize, duty_cycle: f64) -> Result<Vec<f64>> {
    let spectrum = chirp_spectrum(period, duty_cycle)?;
    let signal = Fft::new(period).inverse_real(&spectrum);

    tracing::debug!(period, duty_cycle, "synthesized chirp");
    Ok(signal)
}

/// Validated chirp parameters.
///
/// A convenience holder for callers that pass the same configuration around;
/// [`synthesize`] and [`chirp_spectrum`] do the work.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChirpSynthesizer {
    period: usize,
    duty_cycle: f64,
}

impl ChirpSynthesizer {
    /// Create a synthesizer, rejecting invalid parameters up front.
    pub fn new(period: usize, duty_cycle: f64) -> Result<Self> {
        validate_period(period)?;
        validate_duty_cycle(duty_cycle)?;
        Ok(Self { period, duty_cycle })
    }

    /// Create a synthesizer with [`DEFAULT_DUTY_CYCLE`].
    pub fn with_period(period: usize) -> Result<Self> {
        Self::new(period, DEFAULT_DUTY_CYCLE)
    }

    /// Chirp length in samples.
    pub fn period(&self) -> usize {
        self.period
    }

    /// Fraction of the frequency range swept per period.
    pub fn duty_cycle(&self) -> f64 {
        self.duty_cycle
    }

    /// Phase coefficients for this configuration.
    pub fn coefficients(&self) -> PhaseCoefficients {
        compute_coefficients(self.period, self.duty_cycle)
    }

    /// The constructed full spectrum.
    pub fn spectrum(&self) -> Result<Vec<Complex64>> {
        chirp_spectrum(self.period, self.duty_cycle)
    }

    /// One period of the chirp signal.
    pub fn synthesize(&self) -> Result<Vec<f64>> {
        synthesize(self.period, self.duty_cycle)
    }
}
