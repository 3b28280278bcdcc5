//! Error types for the spectral-continuum library.
//!
//! All fallible operations return `Result<T, ContinuumError>` rather than
//! panicking, providing meaningful diagnostics for configuration mistakes,
//! malformed inputs, and fits that fail to converge.

use thiserror::Error;

/// Convenience type alias for results in this crate.
pub type Result<T> = std::result::Result<T, ContinuumError>;

/// Errors that can occur during continuum estimation.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ContinuumError {
    /// The fitter configuration is unusable (e.g., a profile that requires a
    /// redshift was selected and none was supplied, or an unrecognized
    /// profile name). Detected before any computation starts.
    #[error("configuration error: {message}")]
    Configuration { message: String },

    /// The iteration cap was reached without the pixel mask stabilizing or
    /// every knot freezing. Signals anomalous input data rather than a
    /// transient condition; not retried.
    #[error("continuum fit did not converge within {iterations} iterations")]
    Convergence {
        /// The iteration cap that was exceeded.
        iterations: usize,
    },

    /// Input data is invalid (e.g., mismatched array lengths, wavelengths
    /// not strictly increasing, malformed explicit chunk edges).
    #[error("invalid input: {message}")]
    InvalidInput { message: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn configuration_message_accessible() {
        let err = ContinuumError::Configuration {
            message: "redshift is required".into(),
        };
        match &err {
            ContinuumError::Configuration { message } => {
                assert!(message.contains("redshift"));
            }
            _ => panic!("wrong variant"),
        }
    }

    #[test]
    fn convergence_reports_cap() {
        let err = ContinuumError::Convergence { iterations: 1000 };
        match &err {
            ContinuumError::Convergence { iterations } => assert_eq!(*iterations, 1000),
            _ => panic!("wrong variant"),
        }
    }

    #[test]
    fn error_display_includes_message() {
        let err = ContinuumError::Configuration {
            message: "unknown profile".into(),
        };
        assert!(format!("{err}").contains("unknown profile"));

        let err2 = ContinuumError::Convergence { iterations: 17 };
        assert!(format!("{err2}").contains("17"));

        let err3 = ContinuumError::InvalidInput {
            message: "wavelengths must be strictly increasing".into(),
        };
        assert!(format!("{err3}").contains("strictly increasing"));
    }

    #[test]
    fn error_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<ContinuumError>();
    }
}
