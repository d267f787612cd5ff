//! Measurement config inspection and setup.

use super::common::MeasurementArgs;
use clap::{Args, Subcommand};
use latprobe_config::{MeasurementConfig, ensure_user_config_dir, find_config, user_config_path};
use std::path::PathBuf;

/// Show or initialize the measurement config.
#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    command: ConfigCommand,
}

#[derive(Subcommand)]
enum ConfigCommand {
    /// Print the resolved config and where it came from
    Show {
        #[command(flatten)]
        params: MeasurementArgs,
    },

    /// Write a config file with the default values
    Init {
        /// Target file (.json or .toml). Defaults to the user config file.
        #[arg(value_name = "FILE")]
        path: Option<PathBuf>,

        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

/// Run the config command.
pub fn run(args: ConfigArgs) -> anyhow::Result<()> {
    match args.command {
        ConfigCommand::Show { params } => {
            let source = find_config(params.config.as_deref());
            let config = params.resolve()?;

            match &source {
                Some(path) => println!("# Source: {}", path.display()),
                None => println!("# Source: built-in defaults"),
            }
            println!("# Unambiguous delay window: {:.3} msec", config.period_ms());
            print!("{}", config.to_toml_string()?);
        }

        ConfigCommand::Init { path, force } => {
            let path = match path {
                Some(path) => path,
                None => {
                    ensure_user_config_dir()?;
                    user_config_path()
                }
            };

            if path.exists() && !force {
                anyhow::bail!(
                    "{} already exists (use --force to overwrite)",
                    path.display()
                );
            }

            MeasurementConfig::default().save(&path)?;
            println!("Wrote {}", path.display());
        }
    }

    Ok(())
}
