//! Function evaluators for the system `f(x) = 0`.

/// A vector-valued function `f: R^n -> R^n` whose root is sought.
///
/// Implemented for every closure `FnMut(&[f64]) -> Vec<f64>`, so most callers
/// never name this trait:
///
/// ```
/// use nrsolve::Residual;
///
/// let mut f = |x: &[f64]| vec![x[0] * x[0] - 2.0];
/// assert_eq!(f.residual(&[2.0]), vec![2.0]);
/// ```
pub trait Residual {
    /// Evaluate `f(x)`.
    fn residual(&mut self, x: &[f64]) -> Vec<f64>;
}

impl<F> Residual for F
where
    F: FnMut(&[f64]) -> Vec<f64>,
{
    fn residual(&mut self, x: &[f64]) -> Vec<f64> {
        self(x)
    }
}
