//! Latency demo: synthesize a chirp, simulate a loopback, estimate the delay.
//!
//! Run with: cargo run -p latprobe-analysis --example latency_demo

use latprobe_analysis::{Fft, Frame, estimate_delay, summarize, synthesize};

fn main() {
    let period = 4096;
    let sample_rate = 48000;
    let true_delay = 517;

    // --- Excitation ---
    println!("=== Chirp Synthesis ===\n");

    let chirp = synthesize(period, 0.9).expect("valid chirp parameters");
    let spectrum = Fft::new(period).forward_real(&chirp);
    let (min_mag, max_mag) = spectrum
        .iter()
        .take(period / 2 + 1)
        .map(|c| c.norm())
        .fold((f64::INFINITY, 0.0f64), |(lo, hi), m| (lo.min(m), hi.max(m)));

    println!("Period: {} samples ({:.1} ms)", period, period as f64 * 1000.0 / sample_rate as f64);
    println!("Spectral magnitude range: {:.9} .. {:.9}", min_mag, max_mag);

    // --- Simulated loopback: delay, attenuation, a little deterministic noise ---
    println!("\n=== Simulated Loopback ===\n");

    let blocks = 10;
    let mut noise_state = 0x2545_f491u32;
    let recording: Vec<Frame> = (0..blocks * period)
        .map(|n| {
            noise_state ^= noise_state << 13;
            noise_state ^= noise_state >> 17;
            noise_state ^= noise_state << 5;
            let noise = (noise_state as i32 as f32) / (i32::MAX as f32) * 1e-4;

            let reference = chirp[n % period] as f32;
            let captured = 0.3 * chirp[(n + period - true_delay) % period] as f32 + noise;
            [reference, captured]
        })
        .collect();

    let summary = summarize(&recording);
    println!(
        "Recording: {} frames, peaks {:.4} / {:.4}",
        summary.frames, summary.peak[0], summary.peak[1]
    );

    // --- Estimation ---
    println!("\n=== Delay Estimate ===\n");

    let estimate = estimate_delay(&recording, period, sample_rate).expect("enough data");
    println!(
        "Delay: {} samples, {:.3} msec (true delay {} samples)",
        estimate.delay_samples, estimate.delay_ms, true_delay
    );
    println!("Peak value: {:.4}", estimate.peak_value);
    println!("Blocks averaged: {}", estimate.num_blocks);
    println!(
        "Unambiguous up to {:.1} ms",
        estimate.max_unambiguous_ms()
    );
}
