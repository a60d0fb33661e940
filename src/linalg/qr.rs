use alloc::vec;
use alloc::vec::Vec;

use log::debug;
use num_traits::Zero;

use crate::linalg::{LinalgError, Solver};
use crate::dense::stable_norm;
use crate::traits::{LinalgScalar, MatrixMut};
use crate::{Matrix, Vector};

/// QR decomposition in place using Householder reflections.
///
/// On return, `a` contains the packed QR factorization:
/// - Upper triangle (including diagonal): R
/// - Lower triangle (excluding diagonal): Householder vectors (scaled)
///
/// `tau` is filled with the Householder scalar factors (length N). A column
/// that is exactly zero gets `tau = 0`, i.e. the identity reflector. Column
/// norms are accumulated with scaling, so entries near the ends of the
/// exponent range are still reduced.
///
/// Each applied reflector maps the pivot column onto `-sigma * e_0` with
/// `sigma = ||x|| * x_0 / |x_0|`, so an already-reduced positive pivot
/// comes out negated: the identity factors to `R = -I`.
///
/// Returns the number of non-trivial reflectors applied; each has
/// determinant `-1`.
pub(crate) fn qr_in_place<T: LinalgScalar>(a: &mut impl MatrixMut<T>, tau: &mut [T]) -> usize {
    let m = a.nrows();
    let n = a.ncols();
    debug_assert!(m >= n, "QR decomposition requires M >= N");
    debug_assert_eq!(tau.len(), n, "tau length must equal N");

    let mut reflections = 0;
    for col in 0..n {
        let norm = stable_norm((col..m).map(|i| *a.get(i, col)));
        if norm == <T::Real as Zero>::zero() {
            tau[col] = T::zero();
            continue;
        }

        let a_col_col = *a.get(col, col);

        // sigma carries the phase of the pivot so v0 = a + sigma never cancels
        let alpha = a_col_col.modulus();
        let sigma = if alpha == <T::Real as Zero>::zero() {
            T::from_real(norm)
        } else {
            T::from_real(norm) * a_col_col.safe_div(T::from_real(alpha))
        };

        let v0 = a_col_col + sigma;
        let tau_val = v0.safe_div(sigma);
        tau[col] = tau_val;

        for i in (col + 1)..m {
            let val = (*a.get(i, col)).safe_div(v0);
            *a.get_mut(i, col) = val;
        }

        // A[col:m, col+1:n] -= tau * v * (v^H * A)
        for j in (col + 1)..n {
            let mut dot = *a.get(col, j);
            for i in (col + 1)..m {
                dot = dot + (*a.get(i, col)).conj() * *a.get(i, j);
            }
            dot = dot * tau_val;

            *a.get_mut(col, j) = *a.get(col, j) - dot;
            for i in (col + 1)..m {
                let vi = *a.get(i, col);
                let old = *a.get(i, j);
                *a.get_mut(i, j) = old - dot * vi;
            }
        }

        *a.get_mut(col, col) = T::zero() - sigma;
        reflections += 1;
    }

    reflections
}

/// QR decomposition of a dense matrix (M >= N).
///
/// Stores the packed Householder vectors, R, and tau scalars. Q is never
/// formed during factorization; `q()` and `thin_q()` materialize it on
/// demand and [`Solver`] applies `Q^H` directly from the packed reflectors.
///
/// Sign convention: R's diagonal is the negated pivot for every column that
/// needed no rotation, so the identity of any order factors to `Q = -I`,
/// `R = -I`.
///
/// # Example
///
/// ```
/// use densefact::{Matrix, Solver, Vector};
///
/// // Least-squares fit: y = c0 + c1*x to points (0,1), (1,2), (2,4)
/// let a = Matrix::from_rows(3, 2, &[
///     1.0_f64, 0.0,
///     1.0, 1.0,
///     1.0, 2.0,
/// ]);
/// let b = Vector::from_slice(&[1.0, 2.0, 4.0]);
/// let x = a.qr().unwrap().solve(&b).unwrap();
/// assert!((x[0] - 5.0 / 6.0).abs() < 1e-10);
/// assert!((x[1] - 3.0 / 2.0).abs() < 1e-10);
/// ```
#[derive(Debug, Clone)]
pub struct QrDecomposition<T> {
    qr: Matrix<T>,
    tau: Vec<T>,
    reflections: usize,
}

impl<T: LinalgScalar> QrDecomposition<T> {
    /// Decompose a matrix.
    ///
    /// Returns `InvalidShape` when `a` has more columns than rows.
    pub fn new(a: &Matrix<T>) -> Result<Self, LinalgError> {
        Self::factorize(Some(a))
    }

    /// Decompose an optional matrix; `None` is rejected with `NullInput`.
    pub fn factorize(a: Option<&Matrix<T>>) -> Result<Self, LinalgError> {
        let a = a.ok_or(LinalgError::NullInput)?;
        let (m, n) = (a.nrows(), a.ncols());
        if m < n {
            return Err(LinalgError::InvalidShape { rows: m, cols: n });
        }
        debug!("QR factorization of {}x{} matrix", m, n);

        let mut qr = a.clone();
        let mut tau = vec![T::zero(); n];
        let reflections = qr_in_place(&mut qr, &mut tau);
        Ok(Self {
            qr,
            tau,
            reflections,
        })
    }

    /// Row count of the factored matrix.
    pub fn nrows(&self) -> usize {
        self.qr.nrows()
    }

    /// Column count of the factored matrix.
    pub fn ncols(&self) -> usize {
        self.qr.ncols()
    }

    /// The upper-triangular R factor (M × N, zero below the leading N × N block).
    ///
    /// ```
    /// use densefact::Matrix;
    /// let a = Matrix::from_rows(3, 3, &[12.0_f64, -51.0, 4.0, 6.0, 167.0, -68.0, -4.0, 24.0, -41.0]);
    /// let r = a.qr().unwrap().r();
    /// assert_eq!(r[(1, 0)], 0.0);
    /// assert_eq!(r[(2, 0)], 0.0);
    /// ```
    pub fn r(&self) -> Matrix<T> {
        let (m, n) = (self.nrows(), self.ncols());
        let mut r = Matrix::zeros(m, n);
        for j in 0..n {
            for i in 0..=j {
                r[(i, j)] = self.qr[(i, j)];
            }
        }
        r
    }

    /// The full orthogonal/unitary Q factor (M × M).
    ///
    /// ```
    /// use densefact::Matrix;
    /// let a = Matrix::from_rows(3, 2, &[1.0_f64, -1.0, 1.0, 4.0, 1.0, 4.0]);
    /// let qr = a.qr().unwrap();
    /// let q = qr.q();
    /// let qtq = q.transpose() * &q;
    /// assert!((qtq[(2, 2)] - 1.0).abs() < 1e-12);
    /// assert!(qtq[(0, 2)].abs() < 1e-12);
    /// ```
    pub fn q(&self) -> Matrix<T> {
        let m = self.nrows();
        let mut q = Matrix::eye(m);
        self.accumulate_q(&mut q);
        q
    }

    /// The thin Q factor (M × N, orthonormal columns).
    pub fn thin_q(&self) -> Matrix<T> {
        let (m, n) = (self.nrows(), self.ncols());
        let mut q = Matrix::zeros(m, n);
        for i in 0..n {
            q[(i, i)] = T::one();
        }
        self.accumulate_q(&mut q);
        q
    }

    /// Apply the reflectors in reverse order to the leading identity columns
    /// of `q`. Columns left of `col` are untouched by `H_col` since their
    /// rows `col..` are already zero.
    fn accumulate_q(&self, q: &mut Matrix<T>) {
        let m = self.nrows();
        let width = q.ncols();
        for col in (0..self.ncols()).rev() {
            let tau_val = self.tau[col];
            if tau_val == T::zero() {
                continue;
            }
            for j in col..width {
                let mut dot = q[(col, j)];
                for i in (col + 1)..m {
                    dot = dot + self.qr[(i, col)].conj() * q[(i, j)];
                }
                dot = dot * tau_val;

                q[(col, j)] = q[(col, j)] - dot;
                for i in (col + 1)..m {
                    q[(i, j)] = q[(i, j)] - dot * self.qr[(i, col)];
                }
            }
        }
    }

    /// `x <- Q^H x`, applying each reflection in factorization order.
    fn apply_qh(&self, x: &mut [T]) {
        let m = self.nrows();
        for col in 0..self.ncols() {
            let tau_val = self.tau[col];
            if tau_val == T::zero() {
                continue;
            }
            let mut dot = x[col];
            for i in (col + 1)..m {
                dot = dot + self.qr[(i, col)].conj() * x[i];
            }
            dot = dot * tau_val;

            x[col] = x[col] - dot;
            for i in (col + 1)..m {
                x[i] = x[i] - dot * self.qr[(i, col)];
            }
        }
    }

    /// Determinant of the factored matrix.
    ///
    /// `det(Q) * prod(diag(R))`, where `det(Q) = (-1)^k` for `k` non-trivial
    /// reflections. Only square factorizations have one; anything else is
    /// `InvalidShape`.
    ///
    /// ```
    /// use densefact::Matrix;
    /// let a = Matrix::from_rows(2, 2, &[4.0_f64, 3.0, 6.0, 3.0]);
    /// let det = a.qr().unwrap().det().unwrap();
    /// assert!((det - (-6.0)).abs() < 1e-12);
    /// ```
    pub fn det(&self) -> Result<T, LinalgError> {
        let (m, n) = (self.nrows(), self.ncols());
        if m != n {
            return Err(LinalgError::InvalidShape { rows: m, cols: n });
        }
        let mut d = T::one();
        for i in 0..n {
            d = d * self.qr[(i, i)];
        }
        if self.reflections % 2 == 1 {
            d = T::zero() - d;
        }
        Ok(d)
    }

    /// Whether every diagonal entry of R is nonzero.
    pub fn is_full_rank(&self) -> bool {
        (0..self.ncols()).all(|i| self.qr[(i, i)] != T::zero())
    }
}

impl<T: LinalgScalar> Solver<T> for QrDecomposition<T> {
    fn nrows(&self) -> usize {
        self.qr.nrows()
    }

    fn ncols(&self) -> usize {
        self.qr.ncols()
    }

    fn ensure_solvable(&self) -> Result<(), LinalgError> {
        if self.is_full_rank() {
            Ok(())
        } else {
            Err(LinalgError::Singular)
        }
    }

    /// `x = R^{-1} Q^H b`; the least-squares solution when M > N.
    fn solve_column(&self, rhs: &[T], out: &mut [T]) -> Result<(), LinalgError> {
        let n = self.ncols();
        let mut qtb = rhs.to_vec();
        self.apply_qh(&mut qtb);

        for i in (0..n).rev() {
            let mut sum = qtb[i];
            for j in (i + 1)..n {
                sum = sum - self.qr[(i, j)] * out[j];
            }
            let pivot = self.qr[(i, i)];
            if pivot == T::zero() {
                return Err(LinalgError::Singular);
            }
            out[i] = sum.safe_div(pivot);
        }
        Ok(())
    }
}

/// Convenience methods on dense matrices.
impl<T: LinalgScalar> Matrix<T> {
    /// QR decomposition using Householder reflections.
    ///
    /// Returns `InvalidShape` if the matrix is wider than tall.
    pub fn qr(&self) -> Result<QrDecomposition<T>, LinalgError> {
        QrDecomposition::new(self)
    }

    /// Solve `Ax = b` (least squares when tall) via QR decomposition.
    ///
    /// ```
    /// use densefact::{Matrix, Vector};
    /// let a = Matrix::from_rows(2, 2, &[2.0_f64, 1.0, 1.0, 3.0]);
    /// let b = Vector::from_slice(&[3.0, 5.0]);
    /// let x = a.solve_qr(&b).unwrap();
    /// assert!((x[0] - 0.8).abs() < 1e-12);
    /// assert!((x[1] - 1.4).abs() < 1e-12);
    /// ```
    pub fn solve_qr(&self, b: &Vector<T>) -> Result<Vector<T>, LinalgError> {
        self.qr()?.solve(b)
    }
}
