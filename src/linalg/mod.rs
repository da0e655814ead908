//! Dense linear algebra for the Newton step.
//!
//! Each Newton iteration solves the dense system
//!
//! ```text
//! J(x) · y = -f(x)
//! ```
//!
//! for the step `y`. The driver only relies on the [`LinearSolver`] trait, so
//! any direct method can be plugged in. [`LuSolver`] is the default: LU
//! decomposition with partial pivoting over a row-major copy of the matrix.
//!
//! Matrices are passed as `&[Vec<f64>]` in row order (`a[row][col]`), the
//! same shape a Jacobian provider returns.

mod lu;

pub use lu::{LuFactors, LuSolver};

use crate::error::Result;

/// Relative pivot threshold below which a matrix is treated as singular.
///
/// A pivot is rejected when `|pivot| <= PIVOT_TOLERANCE * max|a_ij|`.
pub const PIVOT_TOLERANCE: f64 = 1e-14;

/// A dense direct solver for square systems `A x = b`.
pub trait LinearSolver {
    /// Solve `A x = b`.
    ///
    /// Implementations must report singular or ill-conditioned systems as
    /// [`NewtonError::SingularMatrix`](crate::error::NewtonError) and must
    /// never return a solution containing NaN or infinity.
    fn solve(&mut self, a: &[Vec<f64>], b: &[f64]) -> Result<Vec<f64>>;
}

/// Euclidean (2-)norm of a vector.
pub fn norm2(v: &[f64]) -> f64 {
    v.iter().map(|vi| vi * vi).sum::<f64>().sqrt()
}

/// Euclidean distance between two vectors of equal length.
pub fn distance(a: &[f64], b: &[f64]) -> f64 {
    debug_assert_eq!(a.len(), b.len());
    a.iter()
        .zip(b)
        .map(|(ai, bi)| (bi - ai) * (bi - ai))
        .sum::<f64>()
        .sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_norm2() {
        assert_relative_eq!(norm2(&[3.0, 4.0]), 5.0);
        assert_eq!(norm2(&[]), 0.0);
    }

    #[test]
    fn test_distance() {
        assert_relative_eq!(distance(&[1.0, 1.0], &[4.0, 5.0]), 5.0);
        assert_eq!(distance(&[2.0], &[2.0]), 0.0);
    }
}
