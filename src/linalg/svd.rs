use alloc::vec;
use alloc::vec::Vec;

use log::debug;
use num_traits::{Float, One, Zero};

use crate::linalg::bidiag::{bidiagonal_qr, bidiagonalize};
use crate::linalg::{LinalgError, Solver};
use crate::traits::LinalgScalar;
use crate::{Matrix, Vector};

/// Knobs for [`SvdDecomposition::with_settings`].
///
/// ```
/// use densefact::{Matrix, SvdDecomposition, SvdSettings};
///
/// let a = Matrix::from_rows(2, 2, &[3.0_f64, 0.0, 0.0, 4.0]);
/// let settings = SvdSettings { compute_vectors: false, ..SvdSettings::default() };
/// let svd = SvdDecomposition::with_settings(&a, settings).unwrap();
/// assert!(!svd.vectors_computed());
/// assert_eq!(svd.singular_values(), &[4.0, 3.0]);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SvdSettings {
    /// Accumulate U and V. Solving requires them.
    pub compute_vectors: bool,
    /// Sweep budget per dimension; the cap is this times `max(rows, cols)`.
    pub max_iter_per_dim: usize,
}

impl Default for SvdSettings {
    fn default() -> Self {
        Self {
            compute_vectors: true,
            max_iter_per_dim: 30,
        }
    }
}

/// Singular value decomposition of a dense matrix of any shape.
///
/// Computes unitary U (M×M), singular values σ (length min(M,N), sorted
/// descending, non-negative), and unitary V^H (N×N) such that
/// `A = U · W · V^H` with `W` the M×N diagonal of σ.
///
/// Wide matrices are factored through `A^H`, with the roles of U and V
/// swapped on the way out.
///
/// # Example
///
/// ```
/// use densefact::{Matrix, SvdDecomposition};
///
/// let a = Matrix::from_rows(2, 3, &[
///     3.0_f64, 2.0, 2.0,
///     2.0, 3.0, -2.0,
/// ]);
/// let svd = SvdDecomposition::new(&a, true).unwrap();
/// let sigma = svd.singular_values();
/// assert!((sigma[0] - 5.0).abs() < 1e-12);
/// assert!((sigma[1] - 3.0).abs() < 1e-12);
///
/// let recon = &(svd.u().unwrap() * &svd.w()) * svd.vt().unwrap();
/// assert!((recon[(1, 2)] - (-2.0)).abs() < 1e-12);
/// ```
#[derive(Debug, Clone)]
pub struct SvdDecomposition<T: LinalgScalar> {
    u: Option<Matrix<T>>,
    singular_values: Vec<T::Real>,
    vt: Option<Matrix<T>>,
    /// `det(U) · conj(det(V))`; unit modulus.
    phase: T,
    nrows: usize,
    ncols: usize,
}

impl<T: LinalgScalar> SvdDecomposition<T> {
    /// Compute the SVD, with or without singular vectors.
    ///
    /// Returns `Err(NonConvergence)` if the iterative bidiagonal QR
    /// does not converge within the default sweep budget.
    ///
    /// ```
    /// use densefact::{Matrix, SvdDecomposition};
    ///
    /// let a = Matrix::from_rows(3, 2, &[
    ///     1.0_f64, 0.0,
    ///     0.0, 2.0,
    ///     0.0, 0.0,
    /// ]);
    /// let svd = SvdDecomposition::new(&a, true).unwrap();
    /// assert!((svd.singular_values()[0] - 2.0).abs() < 1e-10);
    /// assert!((svd.singular_values()[1] - 1.0).abs() < 1e-10);
    /// ```
    pub fn new(a: &Matrix<T>, compute_vectors: bool) -> Result<Self, LinalgError> {
        Self::with_settings(
            a,
            SvdSettings {
                compute_vectors,
                ..SvdSettings::default()
            },
        )
    }

    /// Decompose an optional matrix; `None` is rejected with `NullInput`.
    pub fn factorize(a: Option<&Matrix<T>>, compute_vectors: bool) -> Result<Self, LinalgError> {
        let a = a.ok_or(LinalgError::NullInput)?;
        Self::new(a, compute_vectors)
    }

    /// Compute the SVD with explicit settings.
    pub fn with_settings(a: &Matrix<T>, settings: SvdSettings) -> Result<Self, LinalgError> {
        let (m, n) = (a.nrows(), a.ncols());
        let compute = settings.compute_vectors;
        debug!(
            "SVD of {}x{} matrix (vectors: {})",
            m, n, compute
        );

        if m.min(n) == 0 {
            return Ok(Self {
                u: compute.then(|| Matrix::eye(m)),
                singular_values: Vec::new(),
                vt: compute.then(|| Matrix::eye(n)),
                phase: T::one(),
                nrows: m,
                ncols: n,
            });
        }

        // Work on a tall copy: A itself, or A^H when wide
        let transposed = m < n;
        let mut work = if transposed { a.adjoint() } else { a.clone() };
        let (rows, cols) = (work.nrows(), work.ncols());

        let (mut u, mut v) = if compute {
            (Matrix::zeros(rows, rows), Matrix::zeros(cols, cols))
        } else {
            (Matrix::zeros(0, 0), Matrix::zeros(0, 0))
        };
        let zero = <T::Real as Zero>::zero();
        let mut diag = vec![zero; cols];
        let mut off_diag = vec![zero; cols - 1];

        let mut phase = bidiagonalize(&mut work, &mut diag, &mut off_diag, &mut u, &mut v, compute, compute);
        let max_iter = settings.max_iter_per_dim.saturating_mul(rows);
        bidiagonal_qr::<T>(
            &mut diag,
            &mut off_diag,
            &mut u,
            &mut v,
            compute,
            compute,
            max_iter,
            &mut phase,
        )?;

        // A^H = U' S V'^H  =>  A = V' S U'^H
        let (u, vt) = match (compute, transposed) {
            (false, _) => (None, None),
            (true, false) => (Some(u), Some(v.adjoint())),
            (true, true) => (Some(v), Some(u.adjoint())),
        };
        if transposed {
            phase = phase.conj();
        }

        Ok(Self {
            u,
            singular_values: diag,
            vt,
            phase,
            nrows: m,
            ncols: n,
        })
    }

    /// Row count of the factored matrix.
    #[inline]
    pub fn nrows(&self) -> usize {
        self.nrows
    }

    /// Column count of the factored matrix.
    #[inline]
    pub fn ncols(&self) -> usize {
        self.ncols
    }

    /// Whether U and V^H were accumulated.
    #[inline]
    pub fn vectors_computed(&self) -> bool {
        self.u.is_some()
    }

    /// The singular values, sorted descending.
    #[inline]
    pub fn singular_values(&self) -> &[T::Real] {
        &self.singular_values
    }

    /// The left singular vectors U (M×M), if computed.
    #[inline]
    pub fn u(&self) -> Option<&Matrix<T>> {
        self.u.as_ref()
    }

    /// The right singular vectors V^H (N×N), if computed.
    /// Rows of V^H are the conjugated right singular vectors.
    #[inline]
    pub fn vt(&self) -> Option<&Matrix<T>> {
        self.vt.as_ref()
    }

    /// The M×N diagonal matrix of singular values.
    pub fn w(&self) -> Matrix<T> {
        let diag: Vec<T> = self.singular_values.iter().map(|&s| T::from_real(s)).collect();
        Matrix::from_diagonal(self.nrows, self.ncols, &diag)
    }

    /// Threshold below which a singular value counts as zero:
    /// `max(M, N) · ε · σ_max`.
    pub fn tolerance(&self) -> T::Real {
        let s_max = self.norm2();
        T::real_from_usize(self.nrows.max(self.ncols)) * T::lepsilon() * s_max
    }

    /// Numerical rank: number of singular values above [`tolerance`](Self::tolerance).
    pub fn rank(&self) -> usize {
        self.rank_with_tolerance(self.tolerance())
    }

    /// Number of singular values strictly above `tol`.
    pub fn rank_with_tolerance(&self, tol: T::Real) -> usize {
        self.singular_values
            .iter()
            .filter(|&&s| !s.is_near_zero(tol))
            .count()
    }

    /// Spectral norm: the largest singular value (zero for an empty matrix).
    pub fn norm2(&self) -> T::Real {
        self.singular_values
            .first()
            .copied()
            .unwrap_or_else(<T::Real as Zero>::zero)
    }

    /// Condition number: σ_max / σ_min.
    ///
    /// Returns infinity if the smallest singular value is zero.
    pub fn condition_number(&self) -> T::Real {
        let (s_max, s_min) = match (self.singular_values.first(), self.singular_values.last()) {
            (Some(&hi), Some(&lo)) => (hi, lo),
            _ => return <T::Real as One>::one(),
        };
        if s_min == <T::Real as Zero>::zero() {
            <T::Real as Float>::infinity()
        } else {
            s_max / s_min
        }
    }

    /// Determinant of the factored matrix (square only).
    ///
    /// Exactly zero when any singular value is at or below the rank
    /// tolerance; otherwise `phase · ∏σ`, where the unit-modulus phase is
    /// tracked through every reflector and sign fix during factorization.
    ///
    /// ```
    /// use densefact::Matrix;
    /// let a = Matrix::from_rows(2, 2, &[0.0_f64, 2.0, 3.0, 0.0]);
    /// let det = a.svd(false).unwrap().det().unwrap();
    /// assert!((det - (-6.0)).abs() < 1e-12);
    /// ```
    pub fn det(&self) -> Result<T, LinalgError> {
        if self.nrows != self.ncols {
            return Err(LinalgError::InvalidShape {
                rows: self.nrows,
                cols: self.ncols,
            });
        }
        let tol = self.tolerance();
        let mut prod = <T::Real as One>::one();
        for &s in &self.singular_values {
            if s.is_near_zero(tol) {
                return Ok(T::zero());
            }
            prod = prod * s;
        }
        Ok(self.phase * T::from_real(prod))
    }
}

impl<T: LinalgScalar> Solver<T> for SvdDecomposition<T> {
    fn nrows(&self) -> usize {
        self.nrows
    }

    fn ncols(&self) -> usize {
        self.ncols
    }

    fn ensure_solvable(&self) -> Result<(), LinalgError> {
        if self.vectors_computed() {
            Ok(())
        } else {
            Err(LinalgError::VectorsNotComputed)
        }
    }

    /// Minimum-norm least-squares solution `x = V Σ⁺ U^H b`; singular values
    /// at or below the tolerance are dropped from Σ⁺.
    fn solve_column(&self, rhs: &[T], out: &mut [T]) -> Result<(), LinalgError> {
        let (u, vt) = match (&self.u, &self.vt) {
            (Some(u), Some(vt)) => (u, vt),
            _ => return Err(LinalgError::VectorsNotComputed),
        };
        let tol = self.tolerance();

        // tmp = Σ⁺ U^H b
        let mut tmp = vec![T::zero(); self.singular_values.len()];
        for (i, &s) in self.singular_values.iter().enumerate() {
            if !s.is_near_zero(tol) {
                let mut dot = T::zero();
                for (&ui, &bi) in u.col_as_slice(i).iter().zip(rhs) {
                    dot = dot + ui.conj() * bi;
                }
                tmp[i] = dot * T::from_real(s).recip();
            }
        }

        // x = V tmp, with V[j, i] = conj(V^H[i, j])
        for (j, x) in out.iter_mut().enumerate() {
            let mut sum = T::zero();
            for (i, &t) in tmp.iter().enumerate() {
                sum = sum + vt[(i, j)].conj() * t;
            }
            *x = sum;
        }
        Ok(())
    }
}

/// Convenience methods on dense matrices.
impl<T: LinalgScalar> Matrix<T> {
    /// Singular value decomposition.
    ///
    /// ```
    /// use densefact::Matrix;
    ///
    /// let a = Matrix::from_rows(3, 2, &[
    ///     1.0_f64, 0.0,
    ///     0.0, 1.0,
    ///     0.0, 0.0,
    /// ]);
    /// let svd = a.svd(true).unwrap();
    /// assert_eq!(svd.singular_values(), &[1.0, 1.0]);
    /// assert_eq!(svd.rank(), 2);
    /// ```
    pub fn svd(&self, compute_vectors: bool) -> Result<SvdDecomposition<T>, LinalgError> {
        SvdDecomposition::new(self, compute_vectors)
    }

    /// Singular values only (no U/V accumulation), descending.
    ///
    /// ```
    /// use densefact::Matrix;
    ///
    /// let a = Matrix::from_rows(2, 2, &[3.0_f64, 0.0, 0.0, 4.0]);
    /// let sv = a.singular_values().unwrap();
    /// assert!((sv[0] - 4.0).abs() < 1e-10);
    /// assert!((sv[1] - 3.0).abs() < 1e-10);
    /// ```
    pub fn singular_values(&self) -> Result<Vec<T::Real>, LinalgError> {
        Ok(SvdDecomposition::new(self, false)?.singular_values)
    }

    /// Minimum-norm least-squares solve of `Ax = b` via SVD.
    pub fn solve_svd(&self, b: &Vector<T>) -> Result<Vector<T>, LinalgError> {
        self.svd(true)?.solve(b)
    }
}

// ── Tests ───────────────────────────────────────────────────────────
