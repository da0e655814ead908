//! Result of a Newton-Raphson run.

use std::fmt;

/// Why the driver stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Termination {
    /// The convergence criterion was met.
    Converged,
    /// The residual was exactly zero at a regular Jacobian, so the Newton
    /// step was zero.
    ExactRoot,
    /// The iteration cap was reached without convergence.
    MaxIterations,
    /// The caller requested a stop at an iteration boundary.
    Cancelled,
}

impl Termination {
    /// Whether the run found a root.
    pub fn is_converged(self) -> bool {
        matches!(self, Termination::Converged | Termination::ExactRoot)
    }
}

impl fmt::Display for Termination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Termination::Converged => write!(f, "converged"),
            Termination::ExactRoot => write!(f, "exact root"),
            Termination::MaxIterations => write!(f, "maximum iterations reached"),
            Termination::Cancelled => write!(f, "cancelled"),
        }
    }
}

/// Outcome of a solve.
#[derive(Debug, Clone, PartialEq)]
pub struct Solution {
    /// Final estimate (the root when converged, the best effort otherwise).
    pub root: Vec<f64>,
    /// Number of Newton updates applied.
    pub iterations: usize,
    /// Every estimate from the initial guess to `root`, if requested.
    pub trajectory: Option<Vec<Vec<f64>>>,
    /// Why the run stopped.
    pub termination: Termination,
    /// Criterion distance of the last update, `None` if no update was made.
    pub step_norm: Option<f64>,
}

impl Solution {
    /// Whether the run found a root.
    pub fn converged(&self) -> bool {
        self.termination.is_converged()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_termination() {
        assert!(Termination::Converged.is_converged());
        assert!(Termination::ExactRoot.is_converged());
        assert!(!Termination::MaxIterations.is_converged());
        assert!(!Termination::Cancelled.is_converged());
        assert_eq!(
            Termination::MaxIterations.to_string(),
            "maximum iterations reached"
        );
    }
}
