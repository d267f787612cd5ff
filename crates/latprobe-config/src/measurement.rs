//! Measurement configuration file format.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::ConfigError;
use crate::validation::{ValidationResult, validate_all};

/// Default chirp period in samples.
pub const DEFAULT_PERIOD: usize = 8192;

/// Default sample rate in Hz.
pub const DEFAULT_SAMPLE_RATE: u32 = 48000;

/// Default chirp duty cycle.
pub const DEFAULT_DUTY_CYCLE: f64 = 0.9;

/// Parameters shared by chirp generation, capture, and delay estimation.
///
/// Stored as JSON or TOML. Missing fields take their defaults, so the
/// two-field JSON written by existing capture setups loads unchanged:
///
/// ```json
/// { "period": 8192, "sample_rate": 44100 }
/// ```
///
/// The equivalent TOML:
///
/// ```toml
/// period = 8192
/// sample_rate = 44100
/// duty_cycle = 0.9
/// ```
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct MeasurementConfig {
    /// Chirp period and analysis block length in samples. Must be even.
    pub period: usize,

    /// Sample rate in Hz.
    pub sample_rate: u32,

    /// Fraction of the frequency range swept per period, in (0, 1).
    pub duty_cycle: f64,
}

impl Default for MeasurementConfig {
    fn default() -> Self {
        Self {
            period: DEFAULT_PERIOD,
            sample_rate: DEFAULT_SAMPLE_RATE,
            duty_cycle: DEFAULT_DUTY_CYCLE,
        }
    }
}

/// Config file formats, chosen by extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    /// `.json`
    Json,
    /// `.toml`
    Toml,
}

impl ConfigFormat {
    /// Detect the format from a path's extension (case-insensitive).
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "json" => Some(ConfigFormat::Json),
            "toml" => Some(ConfigFormat::Toml),
            _ => None,
        }
    }
}

impl MeasurementConfig {
    /// Set the period.
    pub fn with_period(mut self, period: usize) -> Self {
        self.period = period;
        self
    }

    /// Set the sample rate.
    pub fn with_sample_rate(mut self, sample_rate: u32) -> Self {
        self.sample_rate = sample_rate;
        self
    }

    /// Set the duty cycle.
    pub fn with_duty_cycle(mut self, duty_cycle: f64) -> Self {
        self.duty_cycle = duty_cycle;
        self
    }

    /// Check every field, collecting all failures.
    pub fn validate(&self) -> ValidationResult<()> {
        validate_all(self.period, self.sample_rate, self.duty_cycle)
    }

    /// Length of one period in milliseconds.
    ///
    /// This is also the largest delay that can be measured unambiguously.
    pub fn period_ms(&self) -> f64 {
        if self.sample_rate == 0 {
            return 0.0;
        }
        self.period as f64 * 1000.0 / f64::from(self.sample_rate)
    }

    /// Load and validate a config file. The format follows the extension.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let format = ConfigFormat::from_path(path).ok_or_else(|| ConfigError::UnsupportedFormat {
            path: path.to_path_buf(),
        })?;
        let content =
            std::fs::read_to_string(path).map_err(|e| ConfigError::read_file(path, e))?;

        let config = match format {
            ConfigFormat::Json => Self::from_json_str(&content)?,
            ConfigFormat::Toml => Self::from_toml_str(&content)?,
        };
        config.validate()?;
        Ok(config)
    }

    /// Parse from a JSON string (not validated).
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Parse from a TOML string (not validated).
    pub fn from_toml_str(toml_str: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(toml_str)?)
    }

    /// Convert the config to a TOML string.
    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Convert the config to a pretty JSON string.
    pub fn to_json_string(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Save the config. The format follows the extension.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();
        let format = ConfigFormat::from_path(path).ok_or_else(|| ConfigError::UnsupportedFormat {
            path: path.to_path_buf(),
        })?;

        // Ensure parent directory exists
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            std::fs::create_dir_all(parent).map_err(|e| ConfigError::create_dir(parent, e))?;
        }

        let content = match format {
            ConfigFormat::Json => self.to_json_string()?,
            ConfigFormat::Toml => self.to_toml_string()?,
        };
        std::fs::write(path, content).map_err(|e| ConfigError::write_file(path, e))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::ValidationError;

    #[test]
    fn test_defaults() {
        let config = MeasurementConfig::default();
        assert_eq!(config.period, 8192);
        assert_eq!(config.sample_rate, 48000);
        assert_eq!(config.duty_cycle, 0.9);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_two_field_json() {
        let config =
            MeasurementConfig::from_json_str(r#"{"period": 4096, "sample_rate": 44100}"#).unwrap();
        assert_eq!(config.period, 4096);
        assert_eq!(config.sample_rate, 44100);
        assert_eq!(config.duty_cycle, DEFAULT_DUTY_CYCLE);
    }

    #[test]
    fn test_toml_parse() {
        let config = MeasurementConfig::from_toml_str(
            "period = 1024\nsample_rate = 96000\nduty_cycle = 0.5\n",
        )
        .unwrap();
        let expected = MeasurementConfig::default()
            .with_period(1024)
            .with_sample_rate(96000)
            .with_duty_cycle(0.5);
        assert_eq!(config, expected);
    }

    #[test]
    fn test_toml_roundtrip() {
        let config = MeasurementConfig::default().with_period(2048);
        let toml_str = config.to_toml_string().unwrap();
        assert!(toml_str.contains("period = 2048"));
        assert_eq!(MeasurementConfig::from_toml_str(&toml_str).unwrap(), config);
    }

    #[test]
    fn test_json_type_error() {
        let err = MeasurementConfig::from_json_str(r#"{"period": "big"}"#).unwrap_err();
        assert!(matches!(err, ConfigError::JsonParse(_)));
    }

    #[test]
    fn test_validate_rejects_odd_period() {
        let config = MeasurementConfig::default().with_period(1001);
        assert_eq!(config.validate(), Err(ValidationError::OddPeriod(1001)));
    }

    #[test]
    fn test_period_ms() {
        let config = MeasurementConfig::default().with_period(4800);
        assert!((config.period_ms() - 100.0).abs() < 1e-12);
        assert_eq!(config.with_sample_rate(0).period_ms(), 0.0);
    }

    #[test]
    fn test_format_detection() {
        assert_eq!(ConfigFormat::from_path(Path::new("a/config.JSON")), Some(ConfigFormat::Json));
        assert_eq!(ConfigFormat::from_path(Path::new("c.toml")), Some(ConfigFormat::Toml));
        assert_eq!(ConfigFormat::from_path(Path::new("c.yaml")), None);
        assert_eq!(ConfigFormat::from_path(Path::new("config")), None);
    }
}
