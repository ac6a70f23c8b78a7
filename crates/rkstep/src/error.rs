//! Errors raised by the comparison and convergence drivers.

use rkstep_core::error::{AnalysisError, GridError};
use thiserror::Error;

/// Errors that can occur while running a study.
///
/// `E` is the error type of the derivative function under study.
#[derive(Debug, Error)]
pub enum StudyError<E>
where
    E: std::error::Error + 'static,
{
    /// A grid requested by the configuration could not be built.
    #[error("Invalid time grid: {0}")]
    InvalidGrid(#[from] GridError),

    /// The derivative function failed; the original error is kept unchanged.
    #[error("Derivative evaluation failed: {0}")]
    Derivative(#[source] E),

    /// Error measurement failed.
    #[error("Analysis failed: {0}")]
    Analysis(#[from] AnalysisError),

    /// The plot sink could not write its output.
    #[error("Plot output failed: {0}")]
    Output(#[from] std::io::Error),

    /// Invalid study configuration.
    #[error("Invalid study configuration: {reason} ({parameter} = {value})")]
    InvalidConfiguration {
        /// Description of the configuration error
        reason: String,
        /// Name of the invalid parameter
        parameter: String,
        /// Value that was invalid
        value: String,
    },
}

impl<E> StudyError<E>
where
    E: std::error::Error + 'static,
{
    /// Create an InvalidConfiguration error.
    pub fn invalid_configuration<S1, S2, S3>(reason: S1, parameter: S2, value: S3) -> Self
    where
        S1: Into<String>,
        S2: Into<String>,
        S3: Into<String>,
    {
        Self::InvalidConfiguration {
            reason: reason.into(),
            parameter: parameter.into(),
            value: value.into(),
        }
    }
}

/// Configuration problem detected before any integration runs.
///
/// Converted into [`StudyError::InvalidConfiguration`] by the drivers.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{reason} ({parameter} = {value})")]
pub struct ConfigError {
    /// Description of the configuration error
    pub reason: String,
    /// Name of the invalid parameter
    pub parameter: String,
    /// Value that was invalid
    pub value: String,
}

impl ConfigError {
    pub(crate) fn new(
        reason: impl Into<String>,
        parameter: impl Into<String>,
        value: impl ToString,
    ) -> Self {
        Self {
            reason: reason.into(),
            parameter: parameter.into(),
            value: value.to_string(),
        }
    }
}

impl<E> From<ConfigError> for StudyError<E>
where
    E: std::error::Error + 'static,
{
    fn from(err: ConfigError) -> Self {
        Self::InvalidConfiguration {
            reason: err.reason,
            parameter: err.parameter,
            value: err.value,
        }
    }
}
