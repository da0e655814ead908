//! Complex-step Jacobian approximation.
//!
//! For a real-analytic `f`, perturbing one coordinate along the imaginary
//! axis gives
//!
//! ```text
//! f(x + ih·e_j) = f(x) + ih·∂f/∂x_j + O(h²)
//! ```
//!
//! so `Im f(x + ih·e_j) / h` is the j-th Jacobian column with no subtractive
//! cancellation. The step can therefore be tiny (`1e-20` by default) and the
//! result is accurate to machine precision.

use log::trace;
use num_complex::Complex64;

use super::JacobianProvider;

/// Default imaginary step.
pub const DEFAULT_COMPLEX_STEP: f64 = 1e-20;

/// Jacobian by complex-step differentiation.
///
/// Wraps the complex-valued extension of the residual: the same formula as
/// `f`, evaluated over [`Complex64`]. Functions that use `abs`, comparisons or
/// other non-analytic operations on the input do not qualify.
#[derive(Debug, Clone)]
pub struct ComplexStep<G> {
    function: G,
    step: f64,
}

impl<G> ComplexStep<G>
where
    G: FnMut(&[Complex64]) -> Vec<Complex64>,
{
    /// Create a provider with [`DEFAULT_COMPLEX_STEP`].
    pub fn new(function: G) -> Self {
        Self {
            function,
            step: DEFAULT_COMPLEX_STEP,
        }
    }

    /// Override the imaginary step.
    pub fn with_step(mut self, step: f64) -> Self {
        self.step = step;
        self
    }

    /// Evaluate the wrapped function at a real point.
    ///
    /// Handy for deriving the real residual from the same formula.
    pub fn evaluate_real(&mut self, x: &[f64]) -> Vec<f64> {
        let z: Vec<Complex64> = x.iter().map(|&xi| Complex64::new(xi, 0.0)).collect();
        (self.function)(&z).into_iter().map(|v| v.re).collect()
    }
}

impl<G> JacobianProvider for ComplexStep<G>
where
    G: FnMut(&[Complex64]) -> Vec<Complex64>,
{
    fn jacobian(&mut self, x: &[f64]) -> Vec<Vec<f64>> {
        let n = x.len();
        trace!("complex-step jacobian at n={}", n);

        let mut z: Vec<Complex64> = x.iter().map(|&xi| Complex64::new(xi, 0.0)).collect();
        let mut jac: Vec<Vec<f64>> = Vec::new();

        for col in 0..n {
            z[col].im = self.step;
            let fz = (self.function)(&z);
            z[col].im = 0.0;

            if jac.is_empty() {
                jac = vec![vec![0.0; n]; fz.len()];
            }
            for (row, v) in jac.iter_mut().zip(&fz) {
                row[col] = v.im / self.step;
            }
        }

        jac
    }
}
