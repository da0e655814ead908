//! Newton-Raphson iteration for systems of nonlinear equations.

use log::{debug, warn};

use crate::error::{NewtonError, Result};
use crate::jacobian::{FiniteDifference, JacobianProvider};
use crate::linalg::{norm2, LinearSolver, LuSolver};
use crate::residual::Residual;

use super::config::SolverConfig;
use super::criterion::ConvergenceCriterion;
use super::result::{Solution, Termination};

/// Newton-Raphson root finder.
///
/// Each iteration evaluates `f(x)` and `J(x)`, solves `J(x)·y = -f(x)` with
/// the configured [`LinearSolver`] and moves to `x + y`. The run ends when the
/// convergence criterion accepts a step, when the residual is exactly zero
/// at a regular Jacobian, or when the iteration cap is reached.
#[derive(Debug, Clone)]
pub struct NewtonRaphson<S = LuSolver> {
    /// Iteration settings
    config: SolverConfig,
    /// Solver for the Newton step
    linear_solver: S,
}

impl Default for NewtonRaphson {
    fn default() -> Self {
        Self::new()
    }
}

impl NewtonRaphson {
    /// Create a new solver with the step-norm preset.
    pub fn new() -> Self {
        Self::with_config(SolverConfig::default())
    }

    /// Create a new solver with a custom configuration.
    pub fn with_config(config: SolverConfig) -> Self {
        Self {
            config,
            linear_solver: LuSolver::new(),
        }
    }
}

impl<S: LinearSolver> NewtonRaphson<S> {
    /// Replace the linear solver used for the Newton step.
    pub fn with_linear_solver<T: LinearSolver>(self, linear_solver: T) -> NewtonRaphson<T> {
        NewtonRaphson {
            config: self.config,
            linear_solver,
        }
    }

    /// Current configuration.
    pub fn config(&self) -> &SolverConfig {
        &self.config
    }

    /// Mutable access to the configuration.
    pub fn config_mut(&mut self) -> &mut SolverConfig {
        &mut self.config
    }

    /// The linear solver in use.
    pub fn linear_solver(&self) -> &S {
        &self.linear_solver
    }

    /// Find a root of `residual` starting from `x0`.
    ///
    /// Fails with [`NewtonError::DimensionMismatch`] when the shapes of `x0`,
    /// `f(x)` and `J(x)` disagree and with [`NewtonError::SingularJacobian`]
    /// when the step cannot be computed. Hitting the iteration cap is not an
    /// error: the returned [`Solution`] carries [`Termination::MaxIterations`].
    pub fn solve<R, J>(&mut self, residual: R, jacobian: J, x0: &[f64]) -> Result<Solution>
    where
        R: Residual,
        J: JacobianProvider,
    {
        let criterion = self.config.criterion;
        self.iterate(residual, jacobian, x0, &criterion, |_| false)
    }

    /// Like [`solve`](Self::solve), with a cooperative stop check.
    ///
    /// `should_stop` receives the number of completed iterations and is
    /// called once per iteration boundary, before any evaluation. Returning
    /// `true` ends the run with [`Termination::Cancelled`] and the current
    /// estimate.
    pub fn solve_with_cancel<R, J, C>(
        &mut self,
        residual: R,
        jacobian: J,
        x0: &[f64],
        should_stop: C,
    ) -> Result<Solution>
    where
        R: Residual,
        J: JacobianProvider,
        C: FnMut(usize) -> bool,
    {
        let criterion = self.config.criterion;
        self.iterate(residual, jacobian, x0, &criterion, should_stop)
    }

    /// Like [`solve`](Self::solve), with a caller-supplied convergence test.
    ///
    /// The configured [`Criterion`](super::Criterion) is ignored; the
    /// tolerance still applies.
    pub fn solve_with_criterion<R, J, K>(
        &mut self,
        residual: R,
        jacobian: J,
        x0: &[f64],
        criterion: &K,
    ) -> Result<Solution>
    where
        R: Residual,
        J: JacobianProvider,
        K: ConvergenceCriterion + ?Sized,
    {
        self.iterate(residual, jacobian, x0, criterion, |_| false)
    }

    /// Find a root without an analytic Jacobian.
    ///
    /// The Jacobian is approximated with central differences of `residual`.
    pub fn solve_numeric<F>(&mut self, residual: F, x0: &[f64]) -> Result<Solution>
    where
        F: Fn(&[f64]) -> Vec<f64>,
    {
        let jacobian = FiniteDifference::central(&residual);
        self.solve(&residual, jacobian, x0)
    }

    fn iterate<R, J, K, C>(
        &mut self,
        mut residual: R,
        mut jacobian: J,
        x0: &[f64],
        criterion: &K,
        mut should_stop: C,
    ) -> Result<Solution>
    where
        R: Residual,
        J: JacobianProvider,
        K: ConvergenceCriterion + ?Sized,
        C: FnMut(usize) -> bool,
    {
        self.config.validate()?;

        let n = x0.len();
        if n == 0 {
            return Err(NewtonError::dimension_mismatch("initial guess is empty"));
        }
        if let Some(i) = x0.iter().position(|v| !v.is_finite()) {
            return Err(NewtonError::invalid_config(format!(
                "initial guess entry {} is not finite ({})",
                i, x0[i]
            )));
        }

        let mut x = x0.to_vec();
        let mut trajectory = self.config.record_all_iterates.then(|| vec![x.clone()]);
        let mut step_norm = None;
        let mut iterations = 0;

        let termination = loop {
            if iterations >= self.config.max_iterations {
                break Termination::MaxIterations;
            }
            if should_stop(iterations) {
                break Termination::Cancelled;
            }

            let r = residual.residual(&x);
            if r.len() != n {
                return Err(NewtonError::dimension_mismatch(format!(
                    "residual has length {}, expected {}",
                    r.len(),
                    n
                )));
            }

            let jm = jacobian.jacobian(&x);
            check_jacobian_shape(&jm, n)?;

            let iteration = iterations + 1;
            let rhs: Vec<f64> = r.iter().map(|v| -v).collect();
            let solved = self.linear_solver.solve(&jm, &rhs);

            // A zero residual is a root only where J is regular. Where J is
            // singular (eˣ after underflow, for one) the step is zero and the
            // estimate stays put.
            if r.iter().all(|&v| v == 0.0) {
                match solved {
                    Ok(_) => break Termination::ExactRoot,
                    Err(NewtonError::SingularMatrix) => {
                        debug!(
                            "newton iter {:>6} | zero residual at a singular jacobian",
                            iteration
                        );
                        iterations = iteration;
                        step_norm = Some(0.0);
                        if let Some(trajectory) = trajectory.as_mut() {
                            trajectory.push(x.clone());
                        }
                        continue;
                    }
                    Err(e) => return Err(e.at_iteration(iteration)),
                }
            }

            let y = solved.map_err(|e| e.at_iteration(iteration))?;
            if y.len() != n {
                return Err(NewtonError::dimension_mismatch(format!(
                    "linear solver returned a step of length {}, expected {}",
                    y.len(),
                    n
                )));
            }

            let x_next: Vec<f64> = x.iter().zip(&y).map(|(xi, yi)| xi + yi).collect();
            if x_next.iter().any(|v| !v.is_finite()) {
                return Err(NewtonError::singular_jacobian(iteration));
            }

            let dist = criterion.distance(&x, &x_next, &y);
            debug!(
                "newton iter {:>6} | r {:>13.6e} | step {:>13.6e}",
                iteration,
                norm2(&r),
                dist
            );

            iterations = iteration;
            step_norm = Some(dist);
            x = x_next;
            if let Some(trajectory) = trajectory.as_mut() {
                trajectory.push(x.clone());
            }

            if dist <= self.config.tolerance {
                break Termination::Converged;
            }
        };

        if termination == Termination::MaxIterations && self.config.emit_warnings {
            warn!(
                "Newton-Raphson did not converge after {} iterations (last step: {:.2e}, tolerance: {:.2e})",
                iterations,
                step_norm.unwrap_or(f64::NAN),
                self.config.tolerance
            );
        }

        Ok(Solution {
            root: x,
            iterations,
            trajectory,
            termination,
            step_norm,
        })
    }
}

/// Check that a Jacobian is `n x n`.
fn check_jacobian_shape(jm: &[Vec<f64>], n: usize) -> Result<()> {
    if jm.len() != n {
        return Err(NewtonError::dimension_mismatch(format!(
            "jacobian has {} rows, expected {}",
            jm.len(),
            n
        )));
    }
    if let Some((i, row)) = jm.iter().enumerate().find(|(_, row)| row.len() != n) {
        return Err(NewtonError::dimension_mismatch(format!(
            "jacobian row {} has length {}, expected {}",
            i,
            row.len(),
            n
        )));
    }
    Ok(())
}
