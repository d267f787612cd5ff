//! Chirp excitation generation command.

use super::common::MeasurementArgs;
use clap::Args;
use latprobe_analysis::ChirpSynthesizer;
use latprobe_io::{ArtifactFormat, WavSpec, write_chirp_artifact, write_signal_csv, write_wav};
use std::path::PathBuf;

/// Synthesize one period of the chirp and write it out.
#[derive(Args)]
pub struct GenerateArgs {
    #[command(flatten)]
    pub params: MeasurementArgs,

    /// Write a C++ table (`std::array<float, N> chirp_signal = {...};`)
    #[arg(long, value_name = "FILE")]
    pub cpp: Option<PathBuf>,

    /// Write a Rust table (`pub static CHIRP_SIGNAL: [f32; N] = [...];`)
    #[arg(long, value_name = "FILE")]
    pub rust: Option<PathBuf>,

    /// Write one period as a mono float WAV at the configured sample rate
    #[arg(long, value_name = "FILE")]
    pub wav: Option<PathBuf>,

    /// Write one period as CSV (sample, time_ms, amplitude)
    #[arg(long, value_name = "FILE")]
    pub csv: Option<PathBuf>,
}

/// Run the generate command.
pub fn run(args: GenerateArgs) -> anyhow::Result<()> {
    let config = args.params.resolve()?;
    let synth = ChirpSynthesizer::new(config.period, config.duty_cycle)?;
    let signal = synth.synthesize()?;

    let peak = signal.iter().fold(0.0f64, |m, &s| m.max(s.abs()));
    println!(
        "Chirp: {} samples, duty cycle {}, peak {:.6}",
        signal.len(),
        synth.duty_cycle(),
        peak
    );

    let mut written = 0;
    if let Some(path) = &args.cpp {
        write_chirp_artifact(path, &signal, ArtifactFormat::Cpp)?;
        println!("Wrote {}", path.display());
        written += 1;
    }
    if let Some(path) = &args.rust {
        write_chirp_artifact(path, &signal, ArtifactFormat::Rust)?;
        println!("Wrote {}", path.display());
        written += 1;
    }
    if let Some(path) = &args.wav {
        let samples: Vec<f32> = signal.iter().map(|&s| s as f32).collect();
        write_wav(path, &samples, WavSpec::float(1, config.sample_rate))?;
        println!("Wrote {}", path.display());
        written += 1;
    }
    if let Some(path) = &args.csv {
        write_signal_csv(path, &signal, config.sample_rate)?;
        println!("Wrote {}", path.display());
        written += 1;
    }

    if written == 0 {
        println!("No outputs requested (use --cpp, --rust, --wav, or --csv)");
    }

    Ok(())
}
