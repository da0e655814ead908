//! Error types for the nrsolve root finder.
//!
//! This module provides a unified error type [`NewtonError`] covering the
//! fatal conditions of a Newton-Raphson run. Exhausting the iteration budget
//! is deliberately absent: it is reported through
//! [`Termination::MaxIterations`](crate::solver::Termination) on a normal
//! result instead.

use thiserror::Error;

/// Result type alias using [`NewtonError`].
pub type Result<T> = std::result::Result<T, NewtonError>;

/// Unified error type for all nrsolve operations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum NewtonError {
    /// Initial guess, residual or Jacobian have inconsistent shapes
    #[error("Dimension mismatch: {message}")]
    DimensionMismatch { message: String },

    /// Matrix is singular, near-singular, or the solve produced non-finite values
    #[error("Singular matrix - linear system has no unique finite solution")]
    SingularMatrix,

    /// The Newton step could not be computed
    #[error("Singular Jacobian at iteration {iteration} - Newton step is undefined or non-finite")]
    SingularJacobian { iteration: usize },

    /// Invalid solver configuration or input value
    #[error("Invalid configuration: {message}")]
    InvalidConfig { message: String },
}

impl NewtonError {
    /// Create a dimension mismatch error
    pub fn dimension_mismatch(message: impl Into<String>) -> Self {
        Self::DimensionMismatch {
            message: message.into(),
        }
    }

    /// Create a singular Jacobian error for the given 1-based iteration
    pub fn singular_jacobian(iteration: usize) -> Self {
        Self::SingularJacobian { iteration }
    }

    /// Create an invalid configuration error
    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfig {
            message: message.into(),
        }
    }

    /// Whether this is a [`NewtonError::DimensionMismatch`].
    pub fn is_dimension_mismatch(&self) -> bool {
        matches!(self, Self::DimensionMismatch { .. })
    }

    /// Whether this is a [`NewtonError::SingularJacobian`].
    pub fn is_singular_jacobian(&self) -> bool {
        matches!(self, Self::SingularJacobian { .. })
    }

    /// Attach the iteration index to a linear-solver singularity.
    ///
    /// [`NewtonError::SingularMatrix`] becomes
    /// [`NewtonError::SingularJacobian`]; every other error passes through.
    pub fn at_iteration(self, iteration: usize) -> Self {
        match self {
            Self::SingularMatrix => Self::singular_jacobian(iteration),
            other => other,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = NewtonError::dimension_mismatch("residual has length 3, expected 2");
        assert_eq!(
            err.to_string(),
            "Dimension mismatch: residual has length 3, expected 2"
        );
        assert!(err.is_dimension_mismatch());

        let err = NewtonError::singular_jacobian(4);
        assert!(err.to_string().contains("iteration 4"));
        assert!(err.is_singular_jacobian());
        assert!(!err.is_dimension_mismatch());
    }

    #[test]
    fn test_at_iteration() {
        assert_eq!(
            NewtonError::SingularMatrix.at_iteration(7),
            NewtonError::SingularJacobian { iteration: 7 }
        );

        let err = NewtonError::dimension_mismatch("matrix is not square");
        assert_eq!(err.clone().at_iteration(2), err);
    }
}
