//! Solver configuration and presets.

use crate::error::{NewtonError, Result};

use super::criterion::Criterion;
use super::{
    STEP_NORM_MAX_ITERATIONS, STEP_NORM_TOLERANCE, SUCCESSIVE_DIFFERENCE_MAX_ITERATIONS,
    SUCCESSIVE_DIFFERENCE_TOLERANCE,
};

/// Configuration for the Newton-Raphson driver.
///
/// Two presets are provided, mirroring the two classic variants of the
/// algorithm. They differ only in defaults:
///
/// | Preset | Criterion | Tolerance | Iteration cap |
/// |--------|-----------|-----------|---------------|
/// | [`SolverConfig::successive_difference`] | `‖x_{k+1} − x_k‖ ≤ tol` | 1e-12 | 1,000,000 |
/// | [`SolverConfig::step_norm`] (default) | `‖y‖ ≤ tol` | 1e-10 | 200 |
#[derive(Debug, Clone, PartialEq)]
pub struct SolverConfig {
    /// Maximum number of Newton updates.
    pub max_iterations: usize,
    /// Convergence tolerance compared against the criterion's distance.
    pub tolerance: f64,
    /// Convergence criterion.
    pub criterion: Criterion,
    /// Record every estimate from the initial guess to the root.
    pub record_all_iterates: bool,
    /// Log a warning when the iteration cap is hit without convergence.
    pub emit_warnings: bool,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self::step_norm()
    }
}

impl SolverConfig {
    /// Create a new configuration with default values (step-norm preset).
    pub fn new() -> Self {
        Self::default()
    }

    /// Successive-difference preset: tolerance 1e-12, cap 1,000,000.
    pub fn successive_difference() -> Self {
        Self {
            max_iterations: SUCCESSIVE_DIFFERENCE_MAX_ITERATIONS,
            tolerance: SUCCESSIVE_DIFFERENCE_TOLERANCE,
            criterion: Criterion::SuccessiveDifference,
            record_all_iterates: false,
            emit_warnings: true,
        }
    }

    /// Step-norm preset: tolerance 1e-10, cap 200.
    pub fn step_norm() -> Self {
        Self {
            max_iterations: STEP_NORM_MAX_ITERATIONS,
            tolerance: STEP_NORM_TOLERANCE,
            criterion: Criterion::StepNorm,
            record_all_iterates: false,
            emit_warnings: true,
        }
    }

    /// Set the maximum number of Newton updates.
    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    /// Set the convergence tolerance.
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Set the convergence criterion.
    pub fn with_criterion(mut self, criterion: Criterion) -> Self {
        self.criterion = criterion;
        self
    }

    /// Enable or disable trajectory recording.
    pub fn with_trajectory(mut self, record_all_iterates: bool) -> Self {
        self.record_all_iterates = record_all_iterates;
        self
    }

    /// Enable or disable the non-convergence warning.
    pub fn with_warnings(mut self, emit_warnings: bool) -> Self {
        self.emit_warnings = emit_warnings;
        self
    }

    /// Check that the configuration can drive a run.
    pub fn validate(&self) -> Result<()> {
        if !self.tolerance.is_finite() || self.tolerance < 0.0 {
            return Err(NewtonError::invalid_config(format!(
                "tolerance must be finite and non-negative, got {}",
                self.tolerance
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_presets() {
        let sd = SolverConfig::successive_difference();
        assert_eq!(sd.tolerance, 1e-12);
        assert_eq!(sd.max_iterations, 1_000_000);
        assert_eq!(sd.criterion, Criterion::SuccessiveDifference);
        assert!(!sd.record_all_iterates);

        let sn = SolverConfig::step_norm();
        assert_eq!(sn.tolerance, 1e-10);
        assert_eq!(sn.max_iterations, 200);
        assert_eq!(sn.criterion, Criterion::StepNorm);
        assert!(sn.emit_warnings);

        assert_eq!(SolverConfig::new(), sn);
    }

    #[test]
    fn test_builder() {
        let config = SolverConfig::step_norm()
            .with_max_iterations(5)
            .with_tolerance(1e-3)
            .with_criterion(Criterion::SuccessiveDifference)
            .with_trajectory(true)
            .with_warnings(false);

        assert_eq!(config.max_iterations, 5);
        assert_eq!(config.tolerance, 1e-3);
        assert_eq!(config.criterion, Criterion::SuccessiveDifference);
        assert!(config.record_all_iterates);
        assert!(!config.emit_warnings);
    }

    #[test]
    fn test_validate() {
        assert!(SolverConfig::new().validate().is_ok());
        assert!(SolverConfig::new().with_tolerance(0.0).validate().is_ok());
        assert!(SolverConfig::new().with_tolerance(-1.0).validate().is_err());
        assert!(SolverConfig::new().with_tolerance(f64::NAN).validate().is_err());
        assert!(SolverConfig::new()
            .with_tolerance(f64::INFINITY)
            .validate()
            .is_err());
    }
}
