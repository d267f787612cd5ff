//! Error types for chirp synthesis and delay estimation.

use thiserror::Error;

/// Errors returned by the analysis routines.
///
/// All variants are terminal for the call that produced them. Numerical
/// degeneracies inside the deconvolution are not errors; see
/// [`crate::delay`] for how they are handled.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum AnalysisError {
    /// A parameter is outside its valid domain.
    #[error("invalid parameter '{name}': {reason}")]
    InvalidParameter {
        /// Name of the offending parameter.
        name: &'static str,
        /// Description of why the value was rejected.
        reason: String,
    },

    /// The recording is too short for the warm-up plus one analysis block.
    #[error("insufficient data: need at least {required} frames, got {available}")]
    InsufficientData {
        /// Minimum number of frames (`3 * period`).
        required: usize,
        /// Number of frames supplied.
        available: usize,
    },

    /// A NaN or infinite sample was found in the analysed region.
    #[error("non-finite sample at frame {frame}, channel {channel}")]
    NonFiniteSample {
        /// Frame index within the recording.
        frame: usize,
        /// Channel index (0 = reference, 1 = captured).
        channel: usize,
    },
}

impl AnalysisError {
    pub(crate) fn invalid(name: &'static str, reason: impl Into<String>) -> Self {
        AnalysisError::InvalidParameter {
            name,
            reason: reason.into(),
        }
    }
}

/// Convenience result type for analysis operations.
pub type Result<T> = std::result::Result<T, AnalysisError>;

/// Check that `period` is a positive even number.
pub(crate) fn validate_period(period: usize) -> Result<()> {
    if period == 0 {
        return Err(AnalysisError::invalid("period", "must be positive"));
    }
    if !period.is_multiple_of(2) {
        return Err(AnalysisError::invalid(
            "period",
            format!("must be even, got {period}"),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_parameter_display() {
        let err = AnalysisError::invalid("duty_cycle", "must lie in (0, 1)");
        assert_eq!(
            err.to_string(),
            "invalid parameter 'duty_cycle': must lie in (0, 1)"
        );
    }

    #[test]
    fn insufficient_data_display() {
        let err = AnalysisError::InsufficientData {
            required: 3072,
            available: 100,
        };
        let msg = err.to_string();
        assert!(msg.contains("3072"), "got: {msg}");
        assert!(msg.contains("100"), "got: {msg}");
    }

    #[test]
    fn period_validation() {
        assert!(validate_period(1024).is_ok());
        assert!(validate_period(2).is_ok());
        assert!(matches!(
            validate_period(0),
            Err(AnalysisError::InvalidParameter { name: "period", .. })
        ));
        assert!(matches!(
            validate_period(1023),
            Err(AnalysisError::InvalidParameter { name: "period", .. })
        ));
    }
}
