//! Built-in test systems.
//!
//! A small catalogue of square systems with known behaviour, used by the
//! `nrsolve` binary and handy for checking custom providers or solvers.
//!
//! | Problem | System | Behaviour |
//! |---------|--------|-----------|
//! | `linear` | `x − (1, −2, 3.5)` | converges in one update |
//! | `sqrt2` | `x² − 2` | quadratic convergence to √2 |
//! | `circle-line` | `x² + y² − 4, x − y` | converges to (√2, √2) |
//! | `exp` | `eˣ` | no real root, hits the iteration cap |
//! | `singular` | `x − y, x − y` | Jacobian is always singular |

use num_complex::Complex64;

/// Offset of the `linear` problem.
const LINEAR_TARGET: [f64; 3] = [1.0, -2.0, 3.5];

/// A built-in system `f(x) = 0`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
pub enum Problem {
    /// f(x) = x − c in three dimensions
    Linear,
    /// f(x) = x² − 2
    Sqrt2,
    /// Intersection of the circle of radius 2 with the line x = y
    CircleLine,
    /// f(x) = eˣ, which has no real root
    Exp,
    /// f(x, y) = (x − y, x − y)
    Singular,
}

impl Problem {
    /// All problems in the catalogue.
    pub const ALL: [Problem; 5] = [
        Problem::Linear,
        Problem::Sqrt2,
        Problem::CircleLine,
        Problem::Exp,
        Problem::Singular,
    ];

    /// Number of unknowns.
    pub fn dim(self) -> usize {
        match self {
            Problem::Linear => 3,
            Problem::Sqrt2 | Problem::Exp => 1,
            Problem::CircleLine | Problem::Singular => 2,
        }
    }

    /// Default starting point.
    pub fn initial_guess(self) -> Vec<f64> {
        match self {
            Problem::Linear => vec![0.0; 3],
            Problem::Sqrt2 => vec![1.0],
            Problem::CircleLine => vec![1.0, 0.5],
            Problem::Exp => vec![0.0],
            Problem::Singular => vec![2.0, 1.0],
        }
    }

    /// Evaluate `f(x)`.
    pub fn residual(self, x: &[f64]) -> Vec<f64> {
        match self {
            Problem::Linear => x.iter().zip(LINEAR_TARGET).map(|(xi, ci)| xi - ci).collect(),
            Problem::Sqrt2 => vec![x[0] * x[0] - 2.0],
            Problem::CircleLine => vec![x[0] * x[0] + x[1] * x[1] - 4.0, x[0] - x[1]],
            Problem::Exp => vec![x[0].exp()],
            Problem::Singular => vec![x[0] - x[1], x[0] - x[1]],
        }
    }

    /// Evaluate `f(z)` over complex arguments, for complex-step Jacobians.
    pub fn residual_complex(self, z: &[Complex64]) -> Vec<Complex64> {
        match self {
            Problem::Linear => z.iter().zip(LINEAR_TARGET).map(|(zi, ci)| *zi - ci).collect(),
            Problem::Sqrt2 => vec![z[0] * z[0] - 2.0],
            Problem::CircleLine => vec![z[0] * z[0] + z[1] * z[1] - 4.0, z[0] - z[1]],
            Problem::Exp => vec![z[0].exp()],
            Problem::Singular => vec![z[0] - z[1], z[0] - z[1]],
        }
    }

    /// Evaluate the analytic Jacobian `J(x)`.
    pub fn jacobian(self, x: &[f64]) -> Vec<Vec<f64>> {
        match self {
            Problem::Linear => (0..3)
                .map(|i| (0..3).map(|j| if i == j { 1.0 } else { 0.0 }).collect())
                .collect(),
            Problem::Sqrt2 => vec![vec![2.0 * x[0]]],
            Problem::CircleLine => vec![vec![2.0 * x[0], 2.0 * x[1]], vec![1.0, -1.0]],
            Problem::Exp => vec![vec![x[0].exp()]],
            Problem::Singular => vec![vec![1.0, -1.0], vec![1.0, -1.0]],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::jacobian::{ComplexStep, FiniteDifference, JacobianProvider};
    use crate::solver::{NewtonRaphson, SolverConfig, Termination};
    use approx::assert_relative_eq;

    #[test]
    fn test_shapes() {
        for problem in Problem::ALL {
            let x0 = problem.initial_guess();
            assert_eq!(x0.len(), problem.dim());
            assert_eq!(problem.residual(&x0).len(), problem.dim());

            let jac = problem.jacobian(&x0);
            assert_eq!(jac.len(), problem.dim());
            assert!(jac.iter().all(|row| row.len() == problem.dim()));
        }
    }

    #[test]
    fn test_numerical_jacobians_match_analytic() {
        for problem in Problem::ALL {
            let x0 = problem.initial_guess();
            let exact = problem.jacobian(&x0);
            let central = FiniteDifference::central(|x: &[f64]| problem.residual(x)).jacobian(&x0);
            let complex =
                ComplexStep::new(|z: &[Complex64]| problem.residual_complex(z)).jacobian(&x0);

            for i in 0..problem.dim() {
                for j in 0..problem.dim() {
                    assert_relative_eq!(central[i][j], exact[i][j], epsilon = 1e-8);
                    assert_relative_eq!(complex[i][j], exact[i][j], epsilon = 1e-14);
                }
            }
        }
    }

    #[test]
    fn test_complex_residual_agrees_on_reals() {
        let x = [0.75, -1.25, 2.0];
        for problem in Problem::ALL {
            let x = &x[..problem.dim()];
            let real = problem.residual(x);
            let mut cs = ComplexStep::new(|z: &[Complex64]| problem.residual_complex(z));
            assert_eq!(cs.evaluate_real(x), real);
        }
    }

    #[test]
    fn test_catalogue_behaviour() {
        let config = SolverConfig::step_norm().with_warnings(false);

        let linear = NewtonRaphson::with_config(config.clone())
            .solve(
                |x: &[f64]| Problem::Linear.residual(x),
                |x: &[f64]| Problem::Linear.jacobian(x),
                &Problem::Linear.initial_guess(),
            )
            .unwrap();
        assert_eq!(linear.iterations, 1);
        assert_eq!(linear.root, LINEAR_TARGET.to_vec());

        let exp = NewtonRaphson::with_config(config.clone())
            .solve(
                |x: &[f64]| Problem::Exp.residual(x),
                |x: &[f64]| Problem::Exp.jacobian(x),
                &Problem::Exp.initial_guess(),
            )
            .unwrap();
        assert_eq!(exp.termination, Termination::MaxIterations);

        let singular = NewtonRaphson::with_config(config).solve(
            |x: &[f64]| Problem::Singular.residual(x),
            |x: &[f64]| Problem::Singular.jacobian(x),
            &Problem::Singular.initial_guess(),
        );
        assert!(singular.unwrap_err().is_singular_jacobian());
    }
}
