//! Shared CLI helpers used across multiple commands.

use clap::Args;
use indicatif::{ProgressBar, ProgressStyle};
use latprobe_analysis::{DelayEstimate, RecordingSummary};
use latprobe_config::{MeasurementConfig, find_config};
use std::path::PathBuf;

/// Measurement parameters: a config file plus command-line overrides.
#[derive(Args, Debug, Clone, Default)]
pub struct MeasurementArgs {
    /// Config file (.json or .toml). Defaults to ./config.json,
    /// ./config.toml, then the user config file.
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Chirp period and analysis block length in samples (even)
    #[arg(long)]
    pub period: Option<usize>,

    /// Sample rate in Hz
    #[arg(long)]
    pub sample_rate: Option<u32>,

    /// Fraction of the band swept per period, in (0, 1)
    #[arg(long)]
    pub duty_cycle: Option<f64>,
}

impl MeasurementArgs {
    /// Load the config file (if any), apply overrides, and validate.
    pub fn resolve(&self) -> anyhow::Result<MeasurementConfig> {
        let base = match find_config(self.config.as_deref()) {
            Some(path) => {
                tracing::debug!(path = %path.display(), "loading config");
                MeasurementConfig::load(&path)
                    .map_err(|e| anyhow::anyhow!("{}: {}", path.display(), e))?
            }
            None => MeasurementConfig::default(),
        };
        let config = self.apply(base);
        config.validate()?;
        Ok(config)
    }

    /// Apply the command-line overrides to `base`.
    pub fn apply(&self, mut base: MeasurementConfig) -> MeasurementConfig {
        if let Some(period) = self.period {
            base.period = period;
        }
        if let Some(sample_rate) = self.sample_rate {
            base.sample_rate = sample_rate;
        }
        if let Some(duty_cycle) = self.duty_cycle {
            base.duty_cycle = duty_cycle;
        }
        base
    }
}

/// Print the recording shape and per-channel peak level.
pub fn print_summary(summary: &RecordingSummary, sample_rate: u32) {
    println!(
        "Frames:      {} ({:.3}s)",
        summary.frames,
        summary.duration_secs(sample_rate)
    );
    println!(
        "Peak:        reference {:.4}, captured {:.4}",
        summary.peak[0], summary.peak[1]
    );
    if summary.has_silent_channel() {
        println!("Warning:     a channel is silent, check the wiring");
    }
}

/// Print an estimate in the `Delay: N samples, X msec` form plus context.
pub fn print_estimate(estimate: &DelayEstimate) {
    println!(
        "Delay: {} samples, {} msec",
        estimate.delay_samples, estimate.delay_ms
    );
    println!(
        "Impulse:     peak {:.4}, {} blocks averaged",
        estimate.peak_value, estimate.num_blocks
    );
    println!(
        "Window:      delays are measured modulo {} samples ({:.3} msec)",
        estimate.period,
        estimate.max_unambiguous_ms()
    );
    if estimate.degenerate_bins > 0 {
        println!(
            "Note:        {} reference bins had no energy and were skipped",
            estimate.degenerate_bins
        );
    }
}

/// Progress bar in the shared style.
pub fn progress_bar(len: u64) -> ProgressBar {
    let pb = ProgressBar::new(len);
    let template = "[{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({eta})";
    if let Ok(style) = ProgressStyle::default_bar().template(template) {
        pb.set_style(style.progress_chars("##-"));
    }
    pb
}
