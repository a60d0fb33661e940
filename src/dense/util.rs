use alloc::vec::Vec;

use crate::traits::Scalar;

use super::vector::Vector;
use super::Matrix;

// ── Map ─────────────────────────────────────────────────────────────

impl<T> Matrix<T> {
    /// Apply a function to every element, producing a new matrix.
    ///
    /// ```
    /// use densefact::Matrix;
    /// let m = Matrix::from_rows(2, 2, &[1.0_f64, 4.0, 9.0, 16.0]);
    /// let r = m.map(|x: f64| x.sqrt());
    /// assert_eq!(r[(0, 1)], 2.0);
    /// assert_eq!(r[(1, 1)], 4.0);
    /// ```
    pub fn map<U>(&self, f: impl Fn(T) -> U) -> Matrix<U>
    where
        T: Copy,
    {
        Matrix {
            data: self.data.iter().map(|&x| f(x)).collect(),
            nrows: self.nrows,
            ncols: self.ncols,
        }
    }
}

// ── Row / Column / Diagonal access ──────────────────────────────────

impl<T: Scalar> Matrix<T> {
    /// Build an `nrows x ncols` matrix with `diag` on the leading diagonal.
    ///
    /// Panics if `diag` is longer than `min(nrows, ncols)`.
    ///
    /// ```
    /// use densefact::Matrix;
    /// let w = Matrix::from_diagonal(3, 2, &[5.0, 2.0]);
    /// assert_eq!(w[(0, 0)], 5.0);
    /// assert_eq!(w[(1, 1)], 2.0);
    /// assert_eq!(w[(2, 1)], 0.0);
    /// ```
    pub fn from_diagonal(nrows: usize, ncols: usize, diag: &[T]) -> Self {
        assert!(
            diag.len() <= nrows.min(ncols),
            "diagonal of length {} does not fit a {}x{} matrix",
            diag.len(),
            nrows,
            ncols,
        );
        let mut m = Self::zeros(nrows, ncols);
        for (i, &d) in diag.iter().enumerate() {
            m[(i, i)] = d;
        }
        m
    }

    /// Extract the leading diagonal.
    pub fn diagonal(&self) -> Vector<T> {
        Vector::from_fn(self.nrows.min(self.ncols), |i| self[(i, i)])
    }

    /// Extract row `i` as a `Vector`.
    pub fn row(&self, i: usize) -> Vector<T> {
        let mut data = Vec::with_capacity(self.ncols);
        for j in 0..self.ncols {
            data.push(self[(i, j)]);
        }
        Vector::from_vec(data)
    }

    /// Extract column `j` as a `Vector`.
    ///
    /// ```
    /// use densefact::Matrix;
    /// let m = Matrix::from_rows(2, 2, &[1.0, 2.0, 3.0, 4.0]);
    /// let c = m.col(1);
    /// assert_eq!(c[0], 2.0);
    /// assert_eq!(c[1], 4.0);
    /// ```
    pub fn col(&self, j: usize) -> Vector<T> {
        Vector::from_slice(self.col_as_slice(j))
    }

    /// Set column `j` from a `Vector`.
    pub fn set_col(&mut self, j: usize, v: &Vector<T>) {
        assert_eq!(v.len(), self.nrows, "vector length mismatch");
        self.col_as_mut_slice(j).copy_from_slice(v.as_slice());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn map_type_change() {
        let m = Matrix::from_rows(2, 2, &[1.0_f64, 2.0, 3.0, 4.0]);
        let rounded = m.map(|x| x as i32);
        assert_eq!(rounded[(0, 0)], 1);
        assert_eq!(rounded[(1, 1)], 4);
    }

    #[test]
    fn from_diagonal_wide() {
        let w = Matrix::from_diagonal(2, 4, &[3.0, 1.0]);
        assert_eq!(w.nrows(), 2);
        assert_eq!(w.ncols(), 4);
        assert_eq!(w[(1, 1)], 1.0);
        assert_eq!(w[(0, 3)], 0.0);
        assert_eq!(w.diagonal().as_slice(), &[3.0, 1.0]);
    }

    #[test]
    fn row_col() {
        let m = Matrix::from_rows(2, 3, &[1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
        assert_eq!(m.row(1).as_slice(), &[4.0, 5.0, 6.0]);
        assert_eq!(m.col(2).as_slice(), &[3.0, 6.0]);
    }

    #[test]
    fn set_col() {
        let mut m = Matrix::<f64>::zeros(2, 2);
        m.set_col(1, &Vector::from_slice(&[7.0, 8.0]));
        assert_eq!(m[(0, 1)], 7.0);
        assert_eq!(m[(1, 1)], 8.0);
    }
}
