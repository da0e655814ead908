//! # nrsolve
//!
//! Multivariate Newton-Raphson root finding.
//!
//! This library provides:
//! - A Newton-Raphson driver for square systems `f: R^n -> R^n`
//! - Two convergence criteria (successive difference, step norm) with presets
//! - Optional recording of every estimate from the initial guess to the root
//! - Analytic, finite-difference and complex-step Jacobians
//! - A dense LU solver for the Newton step
//!
//! ## Architecture
//!
//! - [`solver`] - The iteration loop, configuration and results
//! - [`jacobian`] - Jacobian providers
//! - [`linalg`] - Dense linear solvers for the Newton step
//! - [`residual`] - Function evaluators
//! - [`problems`] - Built-in test systems
//! - [`error`] - Error types
//!
//! ## Usage
//!
//! ```
//! use nrsolve::{NewtonRaphson, SolverConfig};
//!
//! // x² + y² = 4 and x = y
//! let f = |x: &[f64]| vec![x[0] * x[0] + x[1] * x[1] - 4.0, x[0] - x[1]];
//! let jac = |x: &[f64]| vec![vec![2.0 * x[0], 2.0 * x[1]], vec![1.0, -1.0]];
//!
//! let mut solver = NewtonRaphson::with_config(SolverConfig::step_norm().with_trajectory(true));
//! let solution = solver.solve(f, jac, &[1.0, 0.5]).unwrap();
//!
//! assert!(solution.converged());
//! assert!((solution.root[0] - 2.0_f64.sqrt()).abs() < 1e-10);
//! assert_eq!(solution.trajectory.unwrap().len(), solution.iterations + 1);
//! ```
//!
//! Without an analytic Jacobian, [`NewtonRaphson::solve_numeric`] falls back
//! to central differences.

pub mod error;
pub mod jacobian;
pub mod linalg;
pub mod problems;
pub mod residual;
pub mod solver;

// Re-export main types for convenience
pub use error::{NewtonError, Result};
pub use jacobian::{ComplexStep, Difference, FiniteDifference, JacobianProvider};
pub use linalg::{LinearSolver, LuSolver};
pub use residual::Residual;
pub use solver::{ConvergenceCriterion, Criterion, NewtonRaphson, Solution, SolverConfig, Termination};
