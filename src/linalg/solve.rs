use alloc::vec;

use crate::linalg::LinalgError;
use crate::traits::LinalgScalar;
use crate::{Matrix, Vector};

/// Linear and least-squares solves against a completed factorization.
///
/// Implementors supply the factored shape and a single-column kernel; the
/// vector/matrix entry points and their buffer-writing variants share one
/// set of checks, performed in order:
///
/// 1. [`ensure_solvable`](Solver::ensure_solvable) (`VectorsNotComputed`,
///    `Singular`),
/// 2. right-hand side rows against `nrows()`,
/// 3. result buffer shape against `(ncols(), rhs columns)`.
///
/// Nothing is written to a result buffer until all three pass. Neither the
/// factorization nor the right-hand side is ever mutated.
///
/// ```
/// use densefact::{Matrix, Solver, Vector};
///
/// let a = Matrix::from_rows(2, 2, &[4.0_f64, 1.0, 2.0, 3.0]);
/// let svd = a.svd(true).unwrap();
///
/// let b = Vector::from_slice(&[1.0, 2.0]);
/// let mut x = Vector::zeros(2);
/// svd.solve_into(&b, &mut x).unwrap();
/// let ax = a.vecmul(&x);
/// assert!((ax[0] - 1.0).abs() < 1e-12);
/// assert!((ax[1] - 2.0).abs() < 1e-12);
/// ```
pub trait Solver<T: LinalgScalar> {
    /// Row count of the factored matrix (the required right-hand side length).
    fn nrows(&self) -> usize;

    /// Column count of the factored matrix (the solution length).
    fn ncols(&self) -> usize;

    /// Whether this factorization can solve at all.
    fn ensure_solvable(&self) -> Result<(), LinalgError> {
        Ok(())
    }

    /// Solve for one column. `rhs` has length `nrows()`, `out` has length
    /// `ncols()`; both are already checked.
    fn solve_column(&self, rhs: &[T], out: &mut [T]) -> Result<(), LinalgError>;

    /// Solve `Ax = b`, allocating `x`.
    fn solve(&self, b: &Vector<T>) -> Result<Vector<T>, LinalgError> {
        self.ensure_solvable()?;
        check_rhs(self.nrows(), b.len(), 1)?;
        let mut x = Vector::from_vec(vec![T::zero(); self.ncols()]);
        self.solve_column(b.as_slice(), x.as_mut_slice())?;
        Ok(x)
    }

    /// Solve `Ax = b` into a caller-supplied `x` of length `ncols()`.
    fn solve_into(&self, b: &Vector<T>, x: &mut Vector<T>) -> Result<(), LinalgError> {
        self.ensure_solvable()?;
        check_rhs(self.nrows(), b.len(), 1)?;
        check_result(self.ncols(), 1, x.len(), 1)?;
        self.solve_column(b.as_slice(), x.as_mut_slice())
    }

    /// Solve `AX = B` column by column, allocating `X`.
    fn solve_matrix(&self, b: &Matrix<T>) -> Result<Matrix<T>, LinalgError> {
        self.ensure_solvable()?;
        check_rhs(self.nrows(), b.nrows(), b.ncols())?;
        let mut x = Matrix::zeros(self.ncols(), b.ncols());
        for j in 0..b.ncols() {
            self.solve_column(b.col_as_slice(j), x.col_as_mut_slice(j))?;
        }
        Ok(x)
    }

    /// Solve `AX = B` into a caller-supplied `X` of shape `ncols() × B.ncols()`.
    fn solve_matrix_into(&self, b: &Matrix<T>, x: &mut Matrix<T>) -> Result<(), LinalgError> {
        self.ensure_solvable()?;
        check_rhs(self.nrows(), b.nrows(), b.ncols())?;
        check_result(self.ncols(), b.ncols(), x.nrows(), x.ncols())?;
        for j in 0..b.ncols() {
            self.solve_column(b.col_as_slice(j), x.col_as_mut_slice(j))?;
        }
        Ok(())
    }
}

fn check_rhs(nrows: usize, rows: usize, cols: usize) -> Result<(), LinalgError> {
    if rows != nrows {
        return Err(LinalgError::DimensionMismatch {
            expected: (nrows, cols),
            got: (rows, cols),
        });
    }
    Ok(())
}

fn check_result(rows: usize, cols: usize, got_rows: usize, got_cols: usize) -> Result<(), LinalgError> {
    if (got_rows, got_cols) != (rows, cols) {
        return Err(LinalgError::DimensionMismatch {
            expected: (rows, cols),
            got: (got_rows, got_cols),
        });
    }
    Ok(())
}
