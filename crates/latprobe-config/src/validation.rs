//! Measurement parameter validation.
//!
//! The rules match what the analysis routines require: an even, positive
//! period (the chirp spectrum is mirrored around bin `period / 2`), a non-zero
//! sample rate, and a duty cycle strictly inside (0, 1).

use thiserror::Error;

/// Validation error types.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ValidationError {
    /// Period of zero samples.
    #[error("period must be positive")]
    ZeroPeriod,

    /// Odd period.
    #[error("period must be even, got {0}")]
    OddPeriod(usize),

    /// Sample rate of zero.
    #[error("sample_rate must be positive")]
    ZeroSampleRate,

    /// Duty cycle at or outside the (0, 1) boundaries, or not finite.
    #[error("duty_cycle {0} out of range (0, 1)")]
    DutyCycleOutOfRange(f64),

    /// Multiple validation errors.
    #[error("multiple validation errors: {}", .0.iter().map(|e| e.to_string()).collect::<Vec<_>>().join("; "))]
    Multiple(Vec<ValidationError>),
}

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Validate a period.
pub fn validate_period(period: usize) -> ValidationResult<()> {
    if period == 0 {
        Err(ValidationError::ZeroPeriod)
    } else if !period.is_multiple_of(2) {
        Err(ValidationError::OddPeriod(period))
    } else {
        Ok(())
    }
}

/// Validate a sample rate.
pub fn validate_sample_rate(sample_rate: u32) -> ValidationResult<()> {
    if sample_rate == 0 {
        Err(ValidationError::ZeroSampleRate)
    } else {
        Ok(())
    }
}

/// Validate a duty cycle.
pub fn validate_duty_cycle(duty_cycle: f64) -> ValidationResult<()> {
    if duty_cycle.is_finite() && duty_cycle > 0.0 && duty_cycle < 1.0 {
        Ok(())
    } else {
        Err(ValidationError::DutyCycleOutOfRange(duty_cycle))
    }
}

/// Run every check and collect all failures.
///
/// A single failure is returned as-is; several are wrapped in
/// [`ValidationError::Multiple`].
pub fn validate_all(period: usize, sample_rate: u32, duty_cycle: f64) -> ValidationResult<()> {
    let mut errors: Vec<ValidationError> = [
        validate_period(period),
        validate_sample_rate(sample_rate),
        validate_duty_cycle(duty_cycle),
    ]
    .into_iter()
    .filter_map(Result::err)
    .collect();

    if errors.len() > 1 {
        return Err(ValidationError::Multiple(errors));
    }
    errors.pop().map_or(Ok(()), Err)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_period_rules() {
        assert!(validate_period(8192).is_ok());
        assert!(validate_period(2).is_ok());
        assert_eq!(validate_period(0), Err(ValidationError::ZeroPeriod));
        assert_eq!(validate_period(8191), Err(ValidationError::OddPeriod(8191)));
    }

    #[test]
    fn test_sample_rate_rules() {
        assert!(validate_sample_rate(44100).is_ok());
        assert_eq!(validate_sample_rate(0), Err(ValidationError::ZeroSampleRate));
    }

    #[test]
    fn test_duty_cycle_rules() {
        assert!(validate_duty_cycle(0.9).is_ok());
        assert!(validate_duty_cycle(0.0001).is_ok());
        for bad in [0.0, 1.0, -0.1, 2.0] {
            assert_eq!(
                validate_duty_cycle(bad),
                Err(ValidationError::DutyCycleOutOfRange(bad))
            );
        }
        assert!(validate_duty_cycle(f64::NAN).is_err());
    }

    #[test]
    fn test_validate_all_single_error() {
        assert_eq!(validate_all(1024, 0, 0.5), Err(ValidationError::ZeroSampleRate));
        assert!(validate_all(1024, 48000, 0.5).is_ok());
    }

    #[test]
    fn test_validate_all_collects() {
        let err = validate_all(7, 0, 1.5).unwrap_err();
        match &err {
            ValidationError::Multiple(errors) => assert_eq!(errors.len(), 3),
            other => panic!("expected Multiple, got {other:?}"),
        }
        let msg = err.to_string();
        assert!(msg.contains("period must be even, got 7"), "got: {msg}");
        assert!(msg.contains("sample_rate must be positive"), "got: {msg}");
    }
}
