//! Delay estimation from a recorded file.

use super::common::{MeasurementArgs, print_estimate, print_summary};
use clap::Args;
use latprobe_analysis::{DelayEstimator, summarize};
use latprobe_io::recording::is_wav_path;
use latprobe_io::{read_recording, read_wav_frames, write_impulse_response_csv};
use std::path::PathBuf;

/// Estimate the round-trip delay in a recording.
#[derive(Args)]
pub struct EstimateArgs {
    /// Recording of [reference, captured] frames: raw little-endian f32
    /// pairs, or a stereo WAV file
    #[arg(value_name = "RECORDING", default_value = "recording.bin")]
    pub recording: PathBuf,

    #[command(flatten)]
    pub params: MeasurementArgs,

    /// Export the averaged impulse response as CSV
    #[arg(long, value_name = "FILE")]
    pub ir_csv: Option<PathBuf>,
}

/// Run the estimate command.
pub fn run(args: EstimateArgs) -> anyhow::Result<()> {
    let config = args.params.resolve()?;

    // A WAV header knows its own rate; an explicit --sample-rate still wins
    let (recording, sample_rate) = if is_wav_path(&args.recording) {
        let (frames, spec) = read_wav_frames(&args.recording)?;
        let rate = args.params.sample_rate.unwrap_or(spec.sample_rate);
        (frames, rate)
    } else {
        (read_recording(&args.recording)?, config.sample_rate)
    };

    println!("Recording:   {}", args.recording.display());
    print_summary(&summarize(&recording), sample_rate);

    let estimator = DelayEstimator::new(config.period, sample_rate)?;
    let estimate = estimator.estimate(&recording)?;
    print_estimate(&estimate);

    if let Some(path) = &args.ir_csv {
        write_impulse_response_csv(path, &estimate)?;
        println!("Wrote {}", path.display());
    }

    Ok(())
}
