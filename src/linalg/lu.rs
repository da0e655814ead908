//! LU decomposition with partial pivoting.

use crate::error::{NewtonError, Result};

use super::{LinearSolver, PIVOT_TOLERANCE};

/// LU factors of a square matrix `P A = L U`.
///
/// `L` (unit diagonal, implicit) is stored below the diagonal and `U` on and
/// above it, in a single row-major buffer.
#[derive(Debug, Clone)]
pub struct LuFactors {
    /// Combined L/U factors (row-major)
    lu: Vec<f64>,
    /// Row permutation: `pivots[i]` is the original row of factored row `i`
    pivots: Vec<usize>,
    /// Matrix dimension
    size: usize,
}

impl LuFactors {
    /// Factor a square matrix given as rows.
    ///
    /// Fails with [`NewtonError::DimensionMismatch`] for empty, non-square or
    /// ragged input and with [`NewtonError::SingularMatrix`] when a pivot is
    /// not larger than `pivot_tolerance` times the largest entry magnitude.
    pub fn factor(a: &[Vec<f64>], pivot_tolerance: f64) -> Result<Self> {
        let n = a.len();
        if n == 0 {
            return Err(NewtonError::dimension_mismatch("matrix is empty"));
        }

        let mut lu = Vec::with_capacity(n * n);
        for (i, row) in a.iter().enumerate() {
            if row.len() != n {
                return Err(NewtonError::dimension_mismatch(format!(
                    "matrix row {} has length {}, expected {}",
                    i,
                    row.len(),
                    n
                )));
            }
            lu.extend_from_slice(row);
        }

        // NaN entries never compare greater, so fold them in explicitly.
        let mut scale = 0.0f64;
        for &v in &lu {
            if !v.is_finite() {
                return Err(NewtonError::SingularMatrix);
            }
            scale = scale.max(v.abs());
        }
        if scale == 0.0 {
            return Err(NewtonError::SingularMatrix);
        }
        let threshold = pivot_tolerance * scale;

        let mut pivots: Vec<usize> = (0..n).collect();

        for k in 0..n {
            // Find pivot
            let mut max_val = lu[k * n + k].abs();
            let mut max_row = k;

            for i in (k + 1)..n {
                let val = lu[i * n + k].abs();
                if val > max_val {
                    max_val = val;
                    max_row = i;
                }
            }

            if max_val <= threshold {
                return Err(NewtonError::SingularMatrix);
            }

            // Swap rows if needed
            if max_row != k {
                pivots.swap(k, max_row);
                for j in 0..n {
                    lu.swap(k * n + j, max_row * n + j);
                }
            }

            // Eliminate
            let pivot = lu[k * n + k];
            for i in (k + 1)..n {
                let factor = lu[i * n + k] / pivot;
                lu[i * n + k] = factor;
                for j in (k + 1)..n {
                    lu[i * n + j] -= factor * lu[k * n + j];
                }
            }
        }

        Ok(Self {
            lu,
            pivots,
            size: n,
        })
    }

    /// Matrix dimension.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Solve `A x = b` with the pre-computed factors.
    pub fn solve(&self, b: &[f64]) -> Result<Vec<f64>> {
        let n = self.size;
        if b.len() != n {
            return Err(NewtonError::dimension_mismatch(format!(
                "right-hand side has length {}, expected {}",
                b.len(),
                n
            )));
        }

        // Apply pivot permutation to b
        let mut x: Vec<f64> = self.pivots.iter().map(|&p| b[p]).collect();

        // Forward substitution (L * y = Pb)
        for i in 0..n {
            for j in 0..i {
                x[i] -= self.lu[i * n + j] * x[j];
            }
        }

        // Back substitution (U * x = y)
        for i in (0..n).rev() {
            for j in (i + 1)..n {
                x[i] -= self.lu[i * n + j] * x[j];
            }
            x[i] /= self.lu[i * n + i];
        }

        if x.iter().any(|v| !v.is_finite()) {
            return Err(NewtonError::SingularMatrix);
        }

        Ok(x)
    }
}

/// Dense direct solver backed by [`LuFactors`].
#[derive(Debug, Clone, Copy)]
pub struct LuSolver {
    /// Relative pivot threshold
    pub pivot_tolerance: f64,
}

impl Default for LuSolver {
    fn default() -> Self {
        Self::new()
    }
}

impl LuSolver {
    /// Create a solver using [`PIVOT_TOLERANCE`].
    pub fn new() -> Self {
        Self {
            pivot_tolerance: PIVOT_TOLERANCE,
        }
    }

    /// Set the relative pivot threshold.
    pub fn with_pivot_tolerance(mut self, pivot_tolerance: f64) -> Self {
        self.pivot_tolerance = pivot_tolerance;
        self
    }
}

impl LinearSolver for LuSolver {
    fn solve(&mut self, a: &[Vec<f64>], b: &[f64]) -> Result<Vec<f64>> {
        LuFactors::factor(a, self.pivot_tolerance)?.solve(b)
    }
}
