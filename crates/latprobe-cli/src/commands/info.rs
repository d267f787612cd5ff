//! Display recording metadata and levels.

use super::common::print_summary;
use clap::Args;
use latprobe_analysis::summarize;
use latprobe_io::recording::is_wav_path;
use latprobe_io::{WavFormat, read_recording, read_wav_frames, read_wav_info};

/// Display recording information.
#[derive(Args)]
pub struct InfoArgs {
    /// Path to the recording (raw f32 pairs or WAV)
    pub file: std::path::PathBuf,

    /// Sample rate for raw recordings, used for the duration
    #[arg(long, default_value_t = latprobe_config::DEFAULT_SAMPLE_RATE)]
    pub sample_rate: u32,
}

/// Run the info command.
pub fn run(args: InfoArgs) -> anyhow::Result<()> {
    println!("File:        {}", args.file.display());

    let (frames, sample_rate) = if is_wav_path(&args.file) {
        let info = read_wav_info(&args.file)?;
        let format_str = match info.format {
            WavFormat::Pcm => "PCM",
            WavFormat::IeeeFloat => "IEEE Float",
        };
        println!("Format:      WAV {} {}-bit", format_str, info.bits_per_sample);
        println!("Channels:    {}", info.channels);
        println!("Sample Rate: {} Hz", info.sample_rate);

        let (frames, _) = read_wav_frames(&args.file)?;
        (frames, info.sample_rate)
    } else {
        println!("Format:      raw f32 LE, 2 channels");
        (read_recording(&args.file)?, args.sample_rate)
    };

    print_summary(&summarize(&frames), sample_rate);

    let file_size = std::fs::metadata(&args.file)?.len();
    println!("File Size:   {}", format_bytes(file_size));

    Ok(())
}

fn format_bytes(bytes: u64) -> String {
    if bytes < 1024 {
        format!("{bytes} B")
    } else if bytes < 1024 * 1024 {
        format!("{:.1} KB", bytes as f64 / 1024.0)
    } else {
        format!("{:.1} MB", bytes as f64 / (1024.0 * 1024.0))
    }
}
