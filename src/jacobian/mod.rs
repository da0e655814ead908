//! Jacobian providers.
//!
//! The Newton driver needs `J(x)`, the `n x n` matrix of partial derivatives
//! `J[i][j] = ∂f_i/∂x_j`, once per iteration. It never differentiates on its
//! own; instead it asks a [`JacobianProvider`]. Three kinds are available:
//!
//! | Provider | Source of derivatives | Accuracy |
//! |----------|-----------------------|----------|
//! | closure `FnMut(&[f64]) -> Vec<Vec<f64>>` | closed form, supplied by the caller | exact |
//! | [`FiniteDifference`] | forward or central differences of `f` | `O(h)` / `O(h²)` |
//! | [`ComplexStep`] | `Im f(x + ih·e_j) / h` over a complex extension of `f` | machine precision |
//!
//! Matrices are returned row by row: `jacobian(x)[i][j]`.

mod complex_step;
mod finite_difference;

pub use complex_step::{ComplexStep, DEFAULT_COMPLEX_STEP};
pub use finite_difference::{Difference, FiniteDifference};

/// Source of the Jacobian matrix `J(x)`.
pub trait JacobianProvider {
    /// Evaluate the `n x n` Jacobian at `x`, as rows.
    fn jacobian(&mut self, x: &[f64]) -> Vec<Vec<f64>>;
}

impl<F> JacobianProvider for F
where
    F: FnMut(&[f64]) -> Vec<Vec<f64>>,
{
    fn jacobian(&mut self, x: &[f64]) -> Vec<Vec<f64>> {
        self(x)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_closure_provider() {
        let mut jac = |x: &[f64]| vec![vec![2.0 * x[0], 1.0], vec![0.0, 3.0]];
        assert_eq!(
            jac.jacobian(&[1.5, 0.0]),
            vec![vec![3.0, 1.0], vec![0.0, 3.0]]
        );
    }
}
