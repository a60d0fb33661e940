pub(crate) mod bidiag;
pub(crate) mod householder;
pub(crate) mod qr;
pub(crate) mod solve;
pub(crate) mod svd;

pub use qr::QrDecomposition;
pub use solve::Solver;
pub use svd::{SvdDecomposition, SvdSettings};

use num_traits::{Float, Zero};

/// Errors from factorization and solve operations.
///
/// Every fallible constructor and query returns one of these; none are
/// retried or downgraded internally, and a failed call leaves its inputs
/// untouched.
///
/// ```
/// use densefact::{LinalgError, Matrix, QrDecomposition};
///
/// let wide = Matrix::<f64>::zeros(3, 4);
/// assert_eq!(
///     QrDecomposition::new(&wide).unwrap_err(),
///     LinalgError::InvalidShape { rows: 3, cols: 4 },
/// );
/// assert_eq!(
///     QrDecomposition::<f64>::factorize(None).unwrap_err(),
///     LinalgError::NullInput,
/// );
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum LinalgError {
    /// A required matrix or vector argument was absent.
    #[error("required matrix or vector argument is absent")]
    NullInput,
    /// The operation is not defined for a matrix of this shape
    /// (QR of a wide matrix, determinant of a non-square matrix).
    #[error("operation is not defined for a {rows}x{cols} matrix")]
    InvalidShape { rows: usize, cols: usize },
    /// A right-hand side or result buffer has the wrong dimensions.
    #[error("dimension mismatch: expected {expected:?}, got {got:?}")]
    DimensionMismatch {
        /// Expected `(rows, cols)`.
        expected: (usize, usize),
        /// Got `(rows, cols)`.
        got: (usize, usize),
    },
    /// Solve requested on an SVD computed without singular vectors.
    #[error("singular vectors were not computed for this factorization")]
    VectorsNotComputed,
    /// The implicit-shift SVD iteration hit its sweep cap.
    #[error("singular value iteration did not converge within {iterations} sweeps")]
    NonConvergence { iterations: usize },
    /// Back substitution met an exactly zero pivot.
    #[error("matrix is singular")]
    Singular,
}

/// Givens rotation coefficients `(c, s)` with `c*a + s*b = r`, `-s*a + c*b = 0`.
pub(crate) fn givens<R: Float + Zero>(a: R, b: R) -> (R, R) {
    if b == R::zero() {
        (R::one(), R::zero())
    } else if b.abs() > a.abs() {
        let t = a / b;
        let s = R::one() / (R::one() + t * t).sqrt();
        (s * t, s)
    } else {
        let t = b / a;
        let c = R::one() / (R::one() + t * t).sqrt();
        (c, c * t)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn givens_zeroes_second_component() {
        for &(a, b) in &[(3.0_f64, 4.0), (-1.0, 2.0), (5.0, 0.0), (0.0, -2.0)] {
            let (c, s) = givens(a, b);
            assert!((c * c + s * s - 1.0).abs() < 1e-14);
            assert!((c * b - s * a).abs() < 1e-14, "({}, {})", a, b);
        }
    }

    #[test]
    fn error_messages() {
        let e = LinalgError::DimensionMismatch { expected: (3, 1), got: (2, 1) };
        assert_eq!(e.to_string(), "dimension mismatch: expected (3, 1), got (2, 1)");
        assert_eq!(
            LinalgError::InvalidShape { rows: 2, cols: 5 }.to_string(),
            "operation is not defined for a 2x5 matrix"
        );
    }
}
