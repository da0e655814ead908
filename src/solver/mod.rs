//! Newton-Raphson driver.
//!
//! This module owns the iteration loop for finding `x` with `f(x) = 0`.
//!
//! ## Iteration
//!
//! Starting from `x₀`, every iteration performs
//!
//! ```text
//! r  = f(x_k)
//! J  = J(x_k)
//! solve J · y = -r
//! x_{k+1} = x_k + y
//! ```
//!
//! and stops once the configured [`Criterion`] reports a distance within the
//! tolerance. Both criteria measure the same quantity in exact arithmetic:
//!
//! - successive difference: `‖x_{k+1} − x_k‖₂`
//! - step norm: `‖y‖₂`
//!
//! The iteration count is the number of updates applied. A residual that is
//! exactly zero ends the run without a further update when the Jacobian is
//! regular there. At a singular Jacobian the update is zero and the run
//! carries on to the cap.
//!
//! ## Failure modes
//!
//! Shape errors and singular Jacobians abort the run. Reaching the iteration
//! cap does not: the best estimate is returned with
//! [`Termination::MaxIterations`] and, unless disabled, a `log` warning.

mod config;
mod criterion;
mod newton;
mod result;

pub use config::SolverConfig;
pub use criterion::{ConvergenceCriterion, Criterion};
pub use newton::NewtonRaphson;
pub use result::{Solution, Termination};

/// Convergence tolerance of the successive-difference preset.
pub const SUCCESSIVE_DIFFERENCE_TOLERANCE: f64 = 1e-12;

/// Iteration cap of the successive-difference preset.
pub const SUCCESSIVE_DIFFERENCE_MAX_ITERATIONS: usize = 1_000_000;

/// Convergence tolerance of the step-norm preset.
pub const STEP_NORM_TOLERANCE: f64 = 1e-10;

/// Iteration cap of the step-norm preset.
pub const STEP_NORM_MAX_ITERATIONS: usize = 200;
