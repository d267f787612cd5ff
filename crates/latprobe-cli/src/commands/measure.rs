//! Live loopback measurement.

use super::common::{MeasurementArgs, print_estimate, print_summary, progress_bar};
use clap::Args;
use latprobe_analysis::{ChirpSynthesizer, DelayEstimator, WARMUP_PERIODS, summarize};
use latprobe_io::{
    BackendStreamConfig, CpalBackend, LoopbackRecorder, save_recording,
    write_impulse_response_csv,
};
use std::path::PathBuf;
use std::time::Duration;

/// Play the chirp, record the loopback, and estimate the delay.
#[derive(Args)]
pub struct MeasureArgs {
    #[command(flatten)]
    pub params: MeasurementArgs,

    /// Number of periods to average, recorded after the warm-up periods
    #[arg(long, default_value = "16")]
    pub blocks: usize,

    /// Where to save the recording (.wav for WAV, anything else raw)
    #[arg(short, long, default_value = "recording.bin")]
    pub output: PathBuf,

    /// Input device (index or partial name)
    #[arg(long, value_name = "DEVICE")]
    pub input_device: Option<String>,

    /// Output device (index or partial name)
    #[arg(long, value_name = "DEVICE")]
    pub output_device: Option<String>,

    /// Stream channel count; inputs 0 and 1 are recorded
    #[arg(long, default_value = "2")]
    pub channels: u16,

    /// Buffer size in frames
    #[arg(long, default_value = "512")]
    pub buffer_size: u32,

    /// Seconds allowed beyond the recording length before giving up
    #[arg(long, default_value = "5")]
    pub timeout_margin: u64,

    /// Export the averaged impulse response as CSV
    #[arg(long, value_name = "FILE")]
    pub ir_csv: Option<PathBuf>,
}

/// Run the measure command.
pub fn run(args: MeasureArgs) -> anyhow::Result<()> {
    if args.blocks == 0 {
        anyhow::bail!("--blocks must be at least 1");
    }

    let config = args.params.resolve()?;
    let excitation: Vec<f32> = ChirpSynthesizer::new(config.period, config.duty_cycle)?
        .synthesize()?
        .into_iter()
        .map(|s| s as f32)
        .collect();

    let num_frames = (WARMUP_PERIODS + args.blocks) * config.period;
    let record_secs = num_frames as f64 / f64::from(config.sample_rate);
    let timeout = Duration::from_secs_f64(record_secs) + Duration::from_secs(args.timeout_margin);

    println!(
        "Measuring: period {} @ {} Hz, {} blocks + {} warm-up ({:.2}s)",
        config.period, config.sample_rate, args.blocks, WARMUP_PERIODS, record_secs
    );

    let backend = CpalBackend::new();
    let stream_config = BackendStreamConfig {
        sample_rate: config.sample_rate,
        buffer_size: args.buffer_size,
        channels: args.channels,
        device_name: None,
    };
    let recorder = LoopbackRecorder::new(&backend, stream_config)
        .with_input_device(args.input_device.clone())
        .with_output_device(args.output_device.clone());

    let pb = progress_bar(num_frames as u64);
    let recording = recorder.record_with_progress(&excitation, num_frames, timeout, |n| {
        pb.set_position(n as u64);
    });
    pb.finish_and_clear();
    let recording = recording?;

    save_recording(&args.output, &recording, config.sample_rate)?;
    println!("Saved {}", args.output.display());
    print_summary(&summarize(&recording), config.sample_rate);

    let estimate = DelayEstimator::new(config.period, config.sample_rate)?.estimate(&recording)?;
    print_estimate(&estimate);

    if let Some(path) = &args.ir_csv {
        write_impulse_response_csv(path, &estimate)?;
        println!("Wrote {}", path.display());
    }

    Ok(())
}
