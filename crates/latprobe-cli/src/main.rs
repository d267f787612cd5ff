//! latprobe CLI - round-trip audio latency measurement.

mod commands;

use clap::{ArgAction, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "latprobe")]
#[command(author, version, about = "Round-trip audio latency probe", long_about = None)]
struct Cli {
    /// Increase log verbosity (-v debug, -vv trace). RUST_LOG overrides.
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Synthesize the chirp excitation and write it as source, WAV, or CSV
    Generate(commands::generate::GenerateArgs),

    /// Estimate the delay in a recorded [reference, captured] file
    Estimate(commands::estimate::EstimateArgs),

    /// Play the chirp, record the loopback, and estimate the delay
    Measure(commands::measure::MeasureArgs),

    /// List audio devices
    Devices(commands::devices::DevicesArgs),

    /// Show recording length and levels
    Info(commands::info::InfoArgs),

    /// Show or initialize the measurement config
    Config(commands::config::ConfigArgs),
}

fn init_tracing(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| default.into()))
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Generate(args) => commands::generate::run(args),
        Commands::Estimate(args) => commands::estimate::run(args),
        Commands::Measure(args) => commands::measure::run(args),
        Commands::Devices(args) => commands::devices::run(args),
        Commands::Info(args) => commands::info::run(args),
        Commands::Config(args) => commands::config::run(args),
    }
}
