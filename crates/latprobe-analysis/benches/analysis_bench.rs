//! Criterion benchmarks for latprobe-analysis components
//!
//! Run with: cargo bench -p latprobe-analysis

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use latprobe_analysis::{DelayEstimator, Fft, Frame, estimate_delay, synthesize};

/// Looped chirp on the reference channel, delayed copy on the captured one.
fn generate_recording(period: usize, blocks: usize, delay: usize) -> Vec<Frame> {
    let chirp = synthesize(period, 0.9).unwrap();
    (0..blocks * period)
        .map(|n| {
            [
                chirp[n % period] as f32,
                chirp[(n + period - delay) % period] as f32,
            ]
        })
        .collect()
}

// ============================================================================
// FFT benchmarks
// ============================================================================

fn bench_fft_roundtrip(c: &mut Criterion) {
    let mut group = c.benchmark_group("FFT_Roundtrip");

    // 1000 and 6000 exercise the mixed-radix paths
    let sizes = [1000, 1024, 4096, 6000, 8192];

    for &size in &sizes {
        let fft = Fft::new(size);
        let input: Vec<f64> = (0..size).map(|i| ((i * 31) % 17) as f64 - 8.0).collect();

        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, _| {
            b.iter(|| {
                let spectrum = fft.forward_real(black_box(&input));
                let result = fft.inverse_real(&spectrum);
                black_box(result)
            })
        });
    }

    group.finish();
}

// ============================================================================
// Chirp synthesis benchmarks
// ============================================================================

fn bench_chirp_synthesis(c: &mut Criterion) {
    let mut group = c.benchmark_group("ChirpSynthesis");

    let periods = [1024, 4096, 8192, 16384];

    for &period in &periods {
        group.bench_with_input(BenchmarkId::from_parameter(period), &period, |b, &p| {
            b.iter(|| {
                let result = synthesize(black_box(p), 0.9).unwrap();
                black_box(result)
            })
        });
    }

    group.finish();
}

// ============================================================================
// Delay estimation benchmarks
// ============================================================================

fn bench_delay_estimation(c: &mut Criterion) {
    let mut group = c.benchmark_group("DelayEstimation");
    group.sample_size(20);

    // (period, total blocks including the two warm-up periods)
    let cases = [(1024, 12), (8192, 12), (8192, 42)];

    for &(period, blocks) in &cases {
        let recording = generate_recording(period, blocks, 123);
        let estimator = DelayEstimator::new(period, 48000).unwrap();

        group.bench_with_input(
            BenchmarkId::new(format!("period_{period}"), blocks),
            &blocks,
            |b, _| {
                b.iter(|| {
                    let result = estimator.estimate(black_box(&recording)).unwrap();
                    black_box(result)
                })
            },
        );
    }

    group.finish();
}

fn bench_estimate_with_planning(c: &mut Criterion) {
    let recording = generate_recording(8192, 12, 480);

    c.bench_function("EstimateDelay_Cold", |b| {
        b.iter(|| {
            let result = estimate_delay(black_box(&recording), 8192, 48000).unwrap();
            black_box(result)
        })
    });
}

criterion_group!(
    benches,
    bench_fft_roundtrip,
    bench_chirp_synthesis,
    bench_delay_estimation,
    bench_estimate_with_planning,
);

criterion_main!(benches);
