//! Integration tests for latprobe-analysis crate.
//!
//! Tests exercise the public API end to end: synthesize the chirp, build a
//! recording as a loopback would produce it, and check the delay estimate.

use latprobe_analysis::{
    AnalysisError, DelayEstimator, Fft, Frame, chirp_spectrum, estimate_delay, summarize,
    synthesize,
};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Loop `excitation` for `blocks` periods on the reference channel and put a
/// circularly delayed, scaled copy on the captured channel.
fn loopback(excitation: &[f64], blocks: usize, delay: usize, gain: f32) -> Vec<Frame> {
    let period = excitation.len();
    (0..blocks * period)
        .map(|n| {
            let reference = excitation[n % period] as f32;
            let captured = excitation[(n + period - delay % period) % period] as f32;
            [reference, gain * captured]
        })
        .collect()
}

/// Deterministic xorshift noise in [-amplitude, amplitude].
fn noise(len: usize, amplitude: f32, seed: u32) -> Vec<f32> {
    let mut state = seed.max(1);
    (0..len)
        .map(|_| {
            state ^= state << 13;
            state ^= state >> 17;
            state ^= state << 5;
            (state as i32 as f32) / (i32::MAX as f32) * amplitude
        })
        .collect()
}

/// Chirp with one positive-frequency bin (and its mirror) removed.
fn chirp_with_notch(period: usize, bin: usize) -> Vec<f64> {
    let mut spectrum = chirp_spectrum(period, 0.9).unwrap();
    spectrum[bin] = latprobe_analysis::Complex64::new(0.0, 0.0);
    spectrum[period - bin] = latprobe_analysis::Complex64::new(0.0, 0.0);
    Fft::new(period).inverse_real(&spectrum)
}

// ===========================================================================
// 1. Chirp synthesis
// ===========================================================================

#[test]
fn chirp_roundtrip_reproduces_constructed_spectrum() {
    for (period, duty) in [(1024, 0.9), (8192, 0.9), (1000, 0.4), (6000, 0.75)] {
        let constructed = chirp_spectrum(period, duty).unwrap();
        let chirp = synthesize(period, duty).unwrap();
        let measured = Fft::new(period).forward_real(&chirp);

        for (k, (m, c)) in measured.iter().zip(&constructed).enumerate() {
            let rel = (m - c).norm() / c.norm();
            assert!(
                rel < 1e-6,
                "period {period}, bin {k}: relative error {rel}"
            );
        }
    }
}

#[test]
fn chirp_is_flat_up_to_nyquist() {
    let period = 8192;
    let chirp = synthesize(period, 0.9).unwrap();
    let spectrum = Fft::new(period).forward_real(&chirp);

    for (k, bin) in spectrum.iter().take(period / 2 + 1).enumerate() {
        assert!(
            (bin.norm() - 1.0).abs() < 1e-9,
            "bin {k}: magnitude {}",
            bin.norm()
        );
    }
}

#[test]
fn chirp_energy_matches_parseval() {
    // Unit magnitude in all `period` bins gives sum(x^2) = period / period = 1
    let chirp = synthesize(2048, 0.9).unwrap();
    let energy: f64 = chirp.iter().map(|x| x * x).sum();
    assert!((energy - 1.0).abs() < 1e-9, "energy {energy}");
}

#[test]
fn chirp_survives_f32_narrowing() {
    // The artifact and the playback path carry f32; the spectrum must stay flat
    let period = 4096;
    let narrowed: Vec<f64> = synthesize(period, 0.9)
        .unwrap()
        .iter()
        .map(|&x| f64::from(x as f32))
        .collect();
    let spectrum = Fft::new(period).forward_real(&narrowed);

    for bin in spectrum.iter().take(period / 2 + 1) {
        assert!((bin.norm() - 1.0).abs() < 1e-4);
    }
}

// ===========================================================================
// 2. Delay estimation
// ===========================================================================

#[test]
fn estimates_37_sample_delay_at_44k1() {
    let chirp = synthesize(1024, 0.9).unwrap();
    let recording = loopback(&chirp, 10, 37, 1.0);

    let estimate = estimate_delay(&recording, 1024, 44100).unwrap();

    assert_eq!(estimate.delay_samples, 37);
    assert!((estimate.delay_ms - 0.8390).abs() < 1e-4);
    assert_eq!(estimate.impulse_response.len(), 1024);
}

#[test]
fn estimate_is_scale_invariant() {
    let chirp = synthesize(2048, 0.9).unwrap();
    let base = estimate_delay(&loopback(&chirp, 6, 301, 1.0), 2048, 48000).unwrap();

    for gain in [1e-3f32, 0.25, 7.5, 300.0] {
        let scaled = estimate_delay(&loopback(&chirp, 6, 301, gain), 2048, 48000).unwrap();
        assert_eq!(scaled.delay_samples, base.delay_samples, "gain {gain}");
    }
}

#[test]
fn noisy_capture_still_resolves_delay() {
    let period = 4096;
    let chirp = synthesize(period, 0.9).unwrap();
    let mut recording = loopback(&chirp, 12, 1234, 0.2);
    let hiss = noise(recording.len(), 0.01, 0xdead_beef);
    for (frame, n) in recording.iter_mut().zip(hiss) {
        frame[1] += n;
    }

    let estimate = estimate_delay(&recording, period, 48000).unwrap();
    assert_eq!(estimate.delay_samples, 1234);
    assert_eq!(estimate.num_blocks, 10);
}

#[test]
fn non_chirp_reference_works_too() {
    // Any full-energy reference is enough; white noise repeats every period
    let period = 1024;
    let excitation: Vec<f64> = noise(period, 0.5, 42).iter().map(|&v| f64::from(v)).collect();
    let recording = loopback(&excitation, 5, 700, 1.0);

    let estimate = estimate_delay(&recording, period, 48000).unwrap();
    assert_eq!(estimate.delay_samples, 700);
}

#[test]
fn fractional_block_tail_is_ignored() {
    let chirp = synthesize(512, 0.9).unwrap();
    let mut recording = loopback(&chirp, 5, 64, 1.0);
    // Garbage tail shorter than one block
    recording.extend(std::iter::repeat_n([9.0f32, -9.0], 300));

    let estimate = estimate_delay(&recording, 512, 48000).unwrap();
    assert_eq!(estimate.num_blocks, 3);
    assert_eq!(estimate.delay_samples, 64);
}

#[test]
fn warmup_transient_is_ignored() {
    let chirp = synthesize(512, 0.9).unwrap();
    let mut recording = loopback(&chirp, 6, 99, 1.0);
    // Capture starts with a click and silence before the loop settles
    for frame in recording.iter_mut().take(2 * 512) {
        frame[1] = 0.0;
    }
    recording[10][1] = 1.0;

    let estimate = estimate_delay(&recording, 512, 48000).unwrap();
    assert_eq!(estimate.delay_samples, 99);
}

#[test]
fn notched_reference_bin_is_handled() {
    let period = 1024;
    let excitation = chirp_with_notch(period, 5);
    let recording = loopback(&excitation, 6, 37, 1.0);

    let estimate = estimate_delay(&recording, period, 44100).unwrap();

    assert!(estimate.impulse_response.iter().all(|v| v.is_finite()));
    assert_eq!(estimate.delay_samples, 37);
    // Bin 5 and its mirror in each of the 4 analysed blocks
    assert_eq!(estimate.degenerate_bins, 2 * 4);
}

#[test]
fn silent_reference_gives_finite_result() {
    let recording: Vec<Frame> = noise(4 * 256, 0.3, 7).into_iter().map(|n| [0.0, n]).collect();

    let estimate = estimate_delay(&recording, 256, 48000).unwrap();
    assert!(estimate.impulse_response.iter().all(|v| v.is_finite()));
    assert!(estimate.delay_samples < 256);
}

#[test]
fn estimator_is_reusable() {
    let chirp = synthesize(1024, 0.9).unwrap();
    let estimator = DelayEstimator::new(1024, 48000).unwrap();

    for delay in [0, 1, 511, 1023] {
        let estimate = estimator.estimate(&loopback(&chirp, 4, delay, 1.0)).unwrap();
        assert_eq!(estimate.delay_samples, delay);
    }
}

#[test]
fn short_recording_is_rejected() {
    let chirp = synthesize(1024, 0.9).unwrap();
    let recording = loopback(&chirp, 3, 0, 1.0);

    assert!(estimate_delay(&recording, 1024, 48000).is_ok());
    assert_eq!(
        estimate_delay(&recording[..3 * 1024 - 1], 1024, 48000),
        Err(AnalysisError::InsufficientData {
            required: 3072,
            available: 3071
        })
    );
}

#[test]
fn summary_reports_channel_peaks() {
    let chirp = synthesize(512, 0.9).unwrap();
    let recording = loopback(&chirp, 3, 10, 0.5);
    let summary = summarize(&recording);

    let chirp_peak = chirp.iter().fold(0.0f64, |m, &x| m.max(x.abs())) as f32;
    assert_eq!(summary.frames, 1536);
    assert!((summary.peak[0] - chirp_peak).abs() < 1e-6);
    assert!((summary.peak[1] - 0.5 * chirp_peak).abs() < 1e-6);
}
