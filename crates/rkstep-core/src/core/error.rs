//! Error types for grid construction and integration.
//!
//! Steppers never wrap the derivative function's error: it reaches the
//! caller with its own type. The types here cover the grid precondition,
//! the validating `solve` entry point and the convergence analysis helpers.

use thiserror::Error;

/// Errors raised while building or validating a time grid.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GridError {
    /// The grid has no points.
    ///
    /// At least the initial time is required to anchor the trajectory.
    #[error("Time grid is empty: at least one point is required")]
    Empty,

    /// A grid point is NaN or infinite.
    #[error("Time grid point {index} is not finite")]
    NonFinite {
        /// Position of the offending point
        index: usize,
    },

    /// A grid point is not strictly greater than its predecessor.
    #[error("Time grid is not strictly increasing at index {index}")]
    NotIncreasing {
        /// Position of the first point that fails to increase
        index: usize,
    },

    /// A step differs from the first step beyond tolerance.
    #[error("Time grid is not uniform at index {index}: expected step {expected}, got {actual}")]
    NonUniform {
        /// Position of the first point of the offending step
        index: usize,
        /// Step derived from the first two points
        expected: f64,
        /// Step observed at `index`
        actual: f64,
    },

    /// A requested point count cannot produce a grid.
    #[error("Invalid point count: {count}")]
    InvalidCount {
        /// Requested count
        count: usize,
    },

    /// The interval bounds cannot produce a strictly increasing grid.
    #[error("Invalid interval: start {start} must be finite and less than end {end}")]
    InvalidInterval {
        /// Interval start
        start: f64,
        /// Interval end
        end: f64,
    },
}

impl GridError {
    /// Create a NonFinite error for the point at `index`.
    pub fn non_finite(index: usize) -> Self {
        Self::NonFinite { index }
    }

    /// Create a NotIncreasing error for the point at `index`.
    pub fn not_increasing(index: usize) -> Self {
        Self::NotIncreasing { index }
    }

    /// Create a NonUniform error.
    pub fn non_uniform(index: usize, expected: f64, actual: f64) -> Self {
        Self::NonUniform {
            index,
            expected,
            actual,
        }
    }

    /// Create an InvalidInterval error.
    pub fn invalid_interval(start: f64, end: f64) -> Self {
        Self::InvalidInterval { start, end }
    }
}

/// Errors returned by the validating entry points.
///
/// `E` is the error type of the derivative function.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SolveError<E>
where
    E: std::error::Error + 'static,
{
    /// The supplied time grid violates the stepper precondition.
    #[error("Invalid time grid: {0}")]
    InvalidGrid(#[from] GridError),

    /// The derivative function failed; the original error is kept unchanged.
    #[error("Derivative evaluation failed: {0}")]
    Derivative(#[source] E),
}

impl<E> SolveError<E>
where
    E: std::error::Error + 'static,
{
    /// Returns the derivative function's error, if that is what failed.
    pub fn into_derivative_error(self) -> Option<E> {
        match self {
            Self::Derivative(err) => Some(err),
            Self::InvalidGrid(_) => None,
        }
    }

    /// Returns the grid error, if the grid was rejected.
    pub fn grid_error(&self) -> Option<&GridError> {
        match self {
            Self::InvalidGrid(err) => Some(err),
            Self::Derivative(_) => None,
        }
    }
}

/// Errors raised by the convergence analysis helpers.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AnalysisError {
    /// Two sequences that must align have different lengths.
    #[error("Length mismatch: expected {expected}, got {actual}")]
    LengthMismatch {
        /// Expected length
        expected: usize,
        /// Actual length
        actual: usize,
    },

    /// Not enough samples to estimate a convergence order.
    #[error("Insufficient data: need at least {needed} samples, got {actual}")]
    InsufficientData {
        /// Minimum number of samples
        needed: usize,
        /// Samples provided
        actual: usize,
    },

    /// A step size or error is zero, negative or not finite, so its
    /// logarithm is undefined.
    #[error("Sample {index} is not strictly positive and finite: {value}")]
    NonPositive {
        /// Position of the offending sample
        index: usize,
        /// The offending value
        value: f64,
    },
}

impl AnalysisError {
    /// Create a LengthMismatch error.
    pub fn length_mismatch(expected: usize, actual: usize) -> Self {
        Self::LengthMismatch { expected, actual }
    }
}

/// Result type alias for grid operations.
pub type GridResult<T> = std::result::Result<T, GridError>;

/// Result type alias for convergence analysis.
pub type AnalysisResult<T> = std::result::Result<T, AnalysisError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::convert::Infallible;

    #[derive(Debug, Clone, PartialEq, Error)]
    #[error("domain error at x = {0}")]
    struct DomainError(f64);

    #[test]
    fn test_grid_error_display() {
        assert_eq!(
            GridError::Empty.to_string(),
            "Time grid is empty: at least one point is required"
        );
        assert_eq!(
            GridError::not_increasing(3).to_string(),
            "Time grid is not strictly increasing at index 3"
        );

        let errors = vec![
            GridError::non_finite(0),
            GridError::non_uniform(4, 0.5, 0.75),
            GridError::InvalidCount { count: 0 },
            GridError::invalid_interval(1.0, 0.0),
        ];
        for err in errors {
            assert!(!err.to_string().is_empty());
        }
    }

    #[test]
    fn test_non_uniform_context() {
        if let GridError::NonUniform {
            index,
            expected,
            actual,
        } = GridError::non_uniform(2, 0.1, 0.2)
        {
            assert_eq!(index, 2);
            assert_eq!(expected, 0.1);
            assert_eq!(actual, 0.2);
        } else {
            panic!("Expected NonUniform variant");
        }
    }

    #[test]
    fn test_grid_error_conversion() {
        let err: SolveError<Infallible> = GridError::Empty.into();
        assert!(matches!(err, SolveError::InvalidGrid(GridError::Empty)));
        assert!(err.to_string().contains("Invalid time grid"));
        assert_eq!(err.grid_error(), Some(&GridError::Empty));
    }

    #[test]
    fn test_analysis_error_display() {
        let err = AnalysisError::length_mismatch(20, 19);
        assert_eq!(err.to_string(), "Length mismatch: expected 20, got 19");

        let err = AnalysisError::InsufficientData {
            needed: 2,
            actual: 1,
        };
        assert!(err.to_string().contains("at least 2"));
    }

    #[test]
    fn test_derivative_error_is_kept_verbatim() {
        let err = SolveError::Derivative(DomainError(-1.0));
        assert!(err.to_string().contains("domain error at x = -1"));
        assert_eq!(err.into_derivative_error(), Some(DomainError(-1.0)));
    }
}
