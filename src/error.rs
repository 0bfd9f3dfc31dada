//! Error types for the tickvol crate.
//!
//! Configuration problems fail fast at construction time; shape problems
//! fail the offending tick call and leave the engine state untouched.
//! Near-zero denominators inside the residual builders are damped with a
//! small epsilon instead of surfacing here, and a non-converged solve is
//! not an error: the convergence flag travels on the history entry.

use thiserror::Error;

/// Convenience alias for results in this crate.
pub type Result<T> = std::result::Result<T, TickVolError>;

/// Errors produced by configuration loading and tick calibration.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum TickVolError {
    /// Invalid or unreadable configuration (wrong bounds length, bad JSON,
    /// missing fields). Raised at load or engine construction, never at
    /// tick time.
    #[error("configuration error: {message}")]
    Configuration { message: String },

    /// Strike/observation sequences disagree in length or carry too few
    /// points for interleaved cross-validation.
    #[error("shape mismatch: {message}")]
    ShapeMismatch { message: String },

    /// The solver failed outright (non-finite objective at the start
    /// point, dimension mismatch). Distinct from non-convergence, which is
    /// accepted and recorded.
    #[error("numerical error: {message}")]
    Numerical { message: String },
}

impl TickVolError {
    pub(crate) fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    pub(crate) fn shape(message: impl Into<String>) -> Self {
        Self::ShapeMismatch {
            message: message.into(),
        }
    }

    pub(crate) fn numerical(message: impl Into<String>) -> Self {
        Self::Numerical {
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_includes_message() {
        let err = TickVolError::configuration("bounds must have exactly 5 elements");
        assert!(err.to_string().contains("exactly 5"));

        let err = TickVolError::shape("strikes and variances differ in length");
        assert!(err.to_string().starts_with("shape mismatch"));
    }

    #[test]
    fn error_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<TickVolError>();
    }
}
