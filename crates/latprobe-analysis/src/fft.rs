//! FFT wrapper shared by chirp synthesis and delay estimation.
//!
//! Transforms are computed in `f64`: the chirp round trip has to hold to
//! 1e-6 relative at periods of several thousand samples, which `f32`
//! accumulation does not reliably achieve.

use rustfft::{FftPlanner, num_complex::Complex64};
use std::sync::Arc;

/// Planned forward and inverse transforms of one fixed length.
///
/// Lengths need not be powers of two. The plans are `Send + Sync`, so one
/// instance can be shared by every worker of a parallel block map.
#[derive(Clone)]
pub struct Fft {
    fft: Arc<dyn rustfft::Fft<f64>>,
    ifft: Arc<dyn rustfft::Fft<f64>>,
    size: usize,
}

impl Fft {
    /// Create a new FFT processor for the given size
    pub fn new(size: usize) -> Self {
        let mut planner = FftPlanner::new();
        let fft = planner.plan_fft_forward(size);
        let ifft = planner.plan_fft_inverse(size);

        Self { fft, ifft, size }
    }

    /// Get FFT size
    pub fn size(&self) -> usize {
        self.size
    }

    /// Perform forward FFT on real input.
    ///
    /// Returns the full complex spectrum of `size` bins. Input shorter than
    /// the FFT size is zero-padded, longer input is truncated.
    pub fn forward_real(&self, input: &[f64]) -> Vec<Complex64> {
        let mut buffer: Vec<Complex64> = input
            .iter()
            .take(self.size)
            .map(|&x| Complex64::new(x, 0.0))
            .collect();
        buffer.resize(self.size, Complex64::new(0.0, 0.0));

        self.fft.process(&mut buffer);
        buffer
    }

    /// Perform forward FFT on complex input (in-place, unnormalized)
    pub fn forward_complex(&self, buffer: &mut [Complex64]) {
        self.fft.process(buffer);
    }

    /// Perform inverse FFT on complex buffer (in-place)
    ///
    /// Scaled by `1/size`, so `inverse(forward(x)) == x`.
    pub fn inverse_complex(&self, buffer: &mut [Complex64]) {
        self.ifft.process(buffer);

        let scale = 1.0 / self.size as f64;
        for c in buffer.iter_mut() {
            *c *= scale;
        }
    }

    /// Perform a normalized inverse FFT and keep only the real part.
    ///
    /// Takes the full `size`-bin spectrum. For a Hermitian-symmetric spectrum
    /// the discarded imaginary part is rounding residue.
    pub fn inverse_real(&self, spectrum: &[Complex64]) -> Vec<f64> {
        let mut buffer = spectrum.to_vec();
        buffer.resize(self.size, Complex64::new(0.0, 0.0));
        self.inverse_complex(&mut buffer);
        buffer.iter().map(|c| c.re).collect()
    }
}

impl std::fmt::Debug for Fft {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Fft").field("size", &self.size).finish_non_exhaustive()
    }
}
