//! Audio device listing command.

use clap::{Args, Subcommand};
use latprobe_io::{AudioDevice, default_device, list_devices};

/// List and inspect audio devices.
#[derive(Args)]
pub struct DevicesArgs {
    #[command(subcommand)]
    command: Option<DevicesCommand>,
}

#[derive(Subcommand)]
enum DevicesCommand {
    /// List all available audio devices
    List,

    /// Show default device information
    Info,
}

/// Run the devices command.
pub fn run(args: DevicesArgs) -> anyhow::Result<()> {
    match args.command.unwrap_or(DevicesCommand::List) {
        DevicesCommand::List => {
            let devices = list_devices()?;

            if devices.is_empty() {
                println!("No audio devices found.");
                return Ok(());
            }

            println!("Available Audio Devices");
            println!("=======================\n");

            let inputs: Vec<_> = devices.iter().filter(|d| d.is_input).collect();
            if !inputs.is_empty() {
                println!("Input Devices:");
                print_indexed(&inputs);
                println!();
            }

            let outputs: Vec<_> = devices.iter().filter(|d| d.is_output).collect();
            if !outputs.is_empty() {
                println!("Output Devices:");
                print_indexed(&outputs);
                println!();
            }

            println!(
                "Total: {} input(s), {} output(s)",
                inputs.len(),
                outputs.len()
            );
            println!();
            println!("Tip: Use device index or partial name with --input-device/--output-device:");
            println!("  latprobe measure --input-device 0 --output-device 0");
            println!("  latprobe measure --input-device \"USB\" --output-device \"USB\"");
            println!();
            println!("The input needs two channels: input 0 takes the excitation directly,");
            println!("input 1 takes it back through the device under test.");
        }

        DevicesCommand::Info => {
            let (input, output) = default_device()?;

            println!("Default Audio Devices");
            println!("=====================\n");

            print_default("Input", input.as_ref());
            println!();
            print_default("Output", output.as_ref());
        }
    }

    Ok(())
}

fn print_indexed(devices: &[&AudioDevice]) {
    for (idx, device) in devices.iter().enumerate() {
        let duplex = if device.is_input && device.is_output {
            " (duplex)"
        } else {
            ""
        };
        println!(
            "  [{}] {} ({} Hz, {} ch){}",
            idx, device.name, device.default_sample_rate, device.channels, duplex
        );
    }
}

fn print_default(kind: &str, device: Option<&AudioDevice>) {
    match device {
        Some(device) => {
            println!("Default {kind}:");
            println!("  Name: {}", device.name);
            println!("  Sample Rate: {} Hz", device.default_sample_rate);
            println!("  Channels: {}", device.channels);
        }
        None => println!("Default {kind}: None"),
    }
}
