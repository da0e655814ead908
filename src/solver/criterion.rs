//! Convergence criteria.

use std::fmt;

use crate::linalg::{distance, norm2};

/// Decides when a Newton iteration has found the root.
///
/// Called once per iteration after the step is applied. `distance` returns a
/// non-negative measure that the driver compares against the tolerance.
pub trait ConvergenceCriterion {
    /// Measure the progress of the step `x -> x_next = x + step`.
    fn distance(&self, x: &[f64], x_next: &[f64], step: &[f64]) -> f64;

    /// Whether the measured distance satisfies `tolerance`.
    fn is_converged(&self, x: &[f64], x_next: &[f64], step: &[f64], tolerance: f64) -> bool {
        self.distance(x, x_next, step) <= tolerance
    }
}

/// The built-in criteria.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Criterion {
    /// `||x_{k+1} - x_k||₂ <= tol`, measured on the stored estimates
    SuccessiveDifference,
    /// `||y||₂ <= tol`, measured on the raw Newton step
    #[default]
    StepNorm,
}

impl ConvergenceCriterion for Criterion {
    fn distance(&self, x: &[f64], x_next: &[f64], step: &[f64]) -> f64 {
        match self {
            Criterion::SuccessiveDifference => distance(x, x_next),
            Criterion::StepNorm => norm2(step),
        }
    }
}

impl fmt::Display for Criterion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Criterion::SuccessiveDifference => write!(f, "successive difference"),
            Criterion::StepNorm => write!(f, "step norm"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_step_norm() {
        let c = Criterion::StepNorm;
        assert_eq!(c.distance(&[0.0, 0.0], &[3.0, 4.0], &[3.0, 4.0]), 5.0);
        assert!(c.is_converged(&[1.0], &[1.0], &[0.0], 0.0));
        assert!(!c.is_converged(&[1.0], &[1.5], &[0.5], 0.1));
    }

    #[test]
    fn test_successive_difference_uses_estimates() {
        // Adding a step below half an ulp leaves the estimate unchanged.
        let x = [1.0];
        let step = [1e-17];
        let x_next = [x[0] + step[0]];
        assert_eq!(x_next[0], 1.0);

        assert_eq!(Criterion::SuccessiveDifference.distance(&x, &x_next, &step), 0.0);
        assert_eq!(Criterion::StepNorm.distance(&x, &x_next, &step), 1e-17);
    }

    #[test]
    fn test_display() {
        assert_eq!(Criterion::SuccessiveDifference.to_string(), "successive difference");
        assert_eq!(Criterion::default(), Criterion::StepNorm);
    }
}
