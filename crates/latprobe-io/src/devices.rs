//! Audio device enumeration and lookup via cpal.

use crate::{Error, Result};
use cpal::traits::{DeviceTrait, HostTrait};
use cpal::{Device, Host};

/// Extract device name via `description()` (cpal 0.17+).
pub(crate) fn device_name(device: &Device) -> std::result::Result<String, cpal::DeviceNameError> {
    device.description().map(|d| d.name().to_string())
}

/// Audio device information.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AudioDevice {
    /// Human-readable device name.
    pub name: String,
    /// Whether the device supports audio input.
    pub is_input: bool,
    /// Whether the device supports audio output.
    pub is_output: bool,
    /// Default sample rate in Hz.
    pub default_sample_rate: u32,
    /// Channel count of the default config (input if available, else output).
    pub channels: u16,
}

/// Stream direction used when looking up a device.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Direction {
    Input,
    Output,
}

impl Direction {
    fn label(self) -> &'static str {
        match self {
            Direction::Input => "input",
            Direction::Output => "output",
        }
    }
}

fn describe(device: &Device, direction: Direction) -> Option<AudioDevice> {
    let name = device_name(device).ok()?;
    let (config, is_input, is_output) = match direction {
        Direction::Input => (
            device.default_input_config().ok(),
            true,
            device.default_output_config().is_ok(),
        ),
        Direction::Output => (device.default_output_config().ok(), false, true),
    };

    Some(AudioDevice {
        name,
        is_input,
        is_output,
        default_sample_rate: config.as_ref().map_or(48000, |c| c.sample_rate()),
        channels: config.as_ref().map_or(2, |c| c.channels()),
    })
}

/// List all available audio devices.
///
/// Duplex devices are listed once, as inputs.
pub fn list_devices() -> Result<Vec<AudioDevice>> {
    let host = cpal::default_host();
    let mut devices: Vec<AudioDevice> = Vec::new();

    if let Ok(inputs) = host.input_devices() {
        devices.extend(inputs.filter_map(|d| describe(&d, Direction::Input)));
    }

    if let Ok(outputs) = host.output_devices() {
        for device in outputs {
            if let Some(info) = describe(&device, Direction::Output)
                && !devices.iter().any(|d| d.name == info.name)
            {
                devices.push(info);
            }
        }
    }

    tracing::debug!(count = devices.len(), "enumerated audio devices");
    Ok(devices)
}

/// Get the default `(input, output)` device info.
pub fn default_device() -> Result<(Option<AudioDevice>, Option<AudioDevice>)> {
    let host = cpal::default_host();

    let input = host
        .default_input_device()
        .and_then(|d| describe(&d, Direction::Input));
    let output = host
        .default_output_device()
        .and_then(|d| describe(&d, Direction::Output));

    Ok((input, output))
}

/// Find a device by index, exact name, or case-insensitive partial name.
///
/// `None` selects the host default.
pub(crate) fn find_device(
    host: &Host,
    name_or_index: Option<&str>,
    direction: Direction,
) -> Result<Device> {
    let Some(search) = name_or_index else {
        let device = match direction {
            Direction::Input => host.default_input_device(),
            Direction::Output => host.default_output_device(),
        };
        return device.ok_or(Error::NoDevice);
    };

    let devices: Vec<Device> = match direction {
        Direction::Input => host.input_devices(),
        Direction::Output => host.output_devices(),
    }
    .map_err(|e| Error::Stream(e.to_string()))?
    .collect();

    let names: Vec<Option<String>> = devices.iter().map(|d| device_name(d).ok()).collect();
    let index = select_device(&names, search).map_err(|reason| {
        Error::DeviceNotFound(format!("{} {reason}", direction.label()))
    })?;
    Ok(devices[index].clone())
}

/// Pick a device from its names: numeric index, then exact name, then the
/// first partial match.
fn select_device(names: &[Option<String>], search: &str) -> std::result::Result<usize, String> {
    if let Ok(index) = search.parse::<usize>() {
        return if index < names.len() {
            Ok(index)
        } else {
            Err(format!(
                "device index {index} (only {} devices available)",
                names.len()
            ))
        };
    }

    if let Some(index) = names.iter().position(|n| n.as_deref() == Some(search)) {
        return Ok(index);
    }

    let search_lower = search.to_lowercase();
    let matches: Vec<usize> = names
        .iter()
        .enumerate()
        .filter(|(_, n)| {
            n.as_ref()
                .is_some_and(|n| n.to_lowercase().contains(&search_lower))
        })
        .map(|(i, _)| i)
        .collect();

    match matches.as_slice() {
        [] => Err(format!("no device matching '{search}'")),
        [only] => Ok(*only),
        [first, ..] => {
            tracing::warn!(
                search,
                count = matches.len(),
                "multiple devices match, using the first"
            );
            Ok(*first)
        }
    }
}
