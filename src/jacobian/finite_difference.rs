//! Finite-difference Jacobian approximation.

use log::trace;

use super::JacobianProvider;
use crate::residual::Residual;

/// Difference scheme used by [`FiniteDifference`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Difference {
    /// `(f(x + h e_j) - f(x)) / h`, `n + 1` evaluations, `O(h)` error
    Forward,
    /// `(f(x + h e_j) - f(x - h e_j)) / 2h`, `2n` evaluations, `O(h²)` error
    Central,
}

impl Difference {
    /// Relative step that balances truncation and rounding error.
    ///
    /// √ε for forward differences, ∛ε for central differences.
    pub fn default_step(self) -> f64 {
        match self {
            Difference::Forward => f64::EPSILON.sqrt(),
            Difference::Central => f64::EPSILON.cbrt(),
        }
    }
}

/// Jacobian approximated by finite differences of a residual function.
///
/// The step for column `j` is `h * max(|x_j|, 1)`, so it scales with the
/// magnitude of the coordinate while staying usable near zero.
#[derive(Debug, Clone)]
pub struct FiniteDifference<R> {
    residual: R,
    scheme: Difference,
    step: f64,
}

impl<R: Residual> FiniteDifference<R> {
    /// Create a provider with the given scheme and its default step.
    pub fn new(residual: R, scheme: Difference) -> Self {
        Self {
            residual,
            scheme,
            step: scheme.default_step(),
        }
    }

    /// Forward differences.
    pub fn forward(residual: R) -> Self {
        Self::new(residual, Difference::Forward)
    }

    /// Central differences.
    pub fn central(residual: R) -> Self {
        Self::new(residual, Difference::Central)
    }

    /// Override the relative step `h`.
    pub fn with_step(mut self, step: f64) -> Self {
        self.step = step;
        self
    }

    /// Difference scheme in use.
    pub fn scheme(&self) -> Difference {
        self.scheme
    }

    /// Recover the wrapped residual function.
    pub fn into_inner(self) -> R {
        self.residual
    }
}

impl<R: Residual> JacobianProvider for FiniteDifference<R> {
    fn jacobian(&mut self, x: &[f64]) -> Vec<Vec<f64>> {
        let n = x.len();
        trace!("finite-difference jacobian ({:?}) at n={}", self.scheme, n);

        let f0 = match self.scheme {
            Difference::Forward => Some(self.residual.residual(x)),
            Difference::Central => None,
        };

        let mut jac: Vec<Vec<f64>> = Vec::new();
        let mut xp = x.to_vec();
        let mut xm = x.to_vec();

        for col in 0..n {
            let xj = x[col];
            let scale = if xj.is_finite() { xj.abs().max(1.0) } else { 1.0 };
            // Use the representable step so that (x + h) - x == h exactly.
            let h = (xj + self.step * scale) - xj;

            xp[col] = xj + h;
            let fp = self.residual.residual(&xp);

            let (fm, width) = match &f0 {
                Some(f0) => (f0.clone(), h),
                None => {
                    let h_back = xj - (xj - h);
                    xm[col] = xj - h_back;
                    let fm = self.residual.residual(&xm);
                    xm[col] = xj;
                    (fm, h + h_back)
                }
            };
            xp[col] = xj;

            if jac.is_empty() {
                jac = vec![vec![0.0; n]; fp.len()];
            }
            for (row, (p, m)) in jac.iter_mut().zip(fp.iter().zip(&fm)) {
                row[col] = (p - m) / width;
            }
        }

        jac
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn system(x: &[f64]) -> Vec<f64> {
        vec![x[0] * x[0] + x[1] - 3.0, x[0].sin() * x[1]]
    }

    fn analytic(x: &[f64]) -> Vec<Vec<f64>> {
        vec![
            vec![2.0 * x[0], 1.0],
            vec![x[0].cos() * x[1], x[0].sin()],
        ]
    }

    #[test]
    fn test_central_matches_analytic() {
        let x = [0.7, -1.3];
        let approx = FiniteDifference::central(system).jacobian(&x);
        let exact = analytic(&x);
        for (row_a, row_e) in approx.iter().zip(&exact) {
            for (a, e) in row_a.iter().zip(row_e) {
                assert_relative_eq!(*a, *e, epsilon = 1e-8);
            }
        }
    }

    #[test]
    fn test_forward_matches_analytic() {
        let x = [2.0, 0.5];
        let approx = FiniteDifference::forward(system).jacobian(&x);
        let exact = analytic(&x);
        for (row_a, row_e) in approx.iter().zip(&exact) {
            for (a, e) in row_a.iter().zip(row_e) {
                assert_relative_eq!(*a, *e, epsilon = 1e-6, max_relative = 1e-6);
            }
        }
    }

    #[test]
    fn test_counts_evaluations() {
        let mut calls = 0usize;
        let counting = |x: &[f64]| {
            calls += 1;
            vec![x[0] + x[1], x[0] - x[1], x[2]]
        };
        let mut fd = FiniteDifference::forward(counting);
        let jac = fd.jacobian(&[1.0, 2.0, 3.0]);
        drop(fd);

        assert_eq!(calls, 4);
        assert_eq!(jac.len(), 3);
        assert!(jac.iter().all(|row| row.len() == 3));
    }

    #[test]
    fn test_default_steps() {
        assert_relative_eq!(Difference::Forward.default_step(), 1.4901161193847656e-8);
        assert!(Difference::Central.default_step() > Difference::Forward.default_step());
        assert_eq!(FiniteDifference::central(system).scheme(), Difference::Central);
    }
}
