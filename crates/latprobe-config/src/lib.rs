//! Measurement configuration for latprobe.
//!
//! A measurement is described by three numbers: the chirp period (which is
//! also the analysis block length), the sample rate, and the chirp duty cycle.
//! This crate loads them from JSON or TOML files, validates them, and locates
//! the config file to use.
//!
//! # Example
//!
//! ```rust,no_run
//! use latprobe_config::{MeasurementConfig, find_config};
//!
//! // Resolve ./config.json, ./config.toml, or the user config file
//! let config = match find_config(None) {
//!     Some(path) => MeasurementConfig::load(&path).unwrap(),
//!     None => MeasurementConfig::default(),
//! };
//! println!("period {} @ {} Hz", config.period, config.sample_rate);
//!
//! // Override and re-validate
//! let config = config.with_period(4096);
//! config.validate().unwrap();
//! ```

mod error;
mod measurement;

/// Platform-specific paths for configuration.
pub mod paths;

/// Parameter validation.
pub mod validation;

pub use error::ConfigError;
pub use measurement::{
    ConfigFormat, DEFAULT_DUTY_CYCLE, DEFAULT_PERIOD, DEFAULT_SAMPLE_RATE, MeasurementConfig,
};
pub use paths::{ensure_user_config_dir, find_config, user_config_dir, user_config_path};
pub use validation::{ValidationError, ValidationResult};
