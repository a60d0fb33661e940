use num_traits::{Float, One, Zero};

use crate::traits::LinalgScalar;

use super::vector::Vector;
use super::Matrix;

// ── Scaled L2 accumulation ──────────────────────────────────────────

/// Euclidean norm of a sequence without intermediate overflow or underflow.
///
/// Three sums of squares run side by side: plain, scaled down by
/// `sqrt(min_positive)` and scaled up by its inverse. The first sum that is
/// in range picks the answer, so entries near either end of the exponent
/// range still give a finite, nonzero norm.
pub(crate) fn stable_norm<T: LinalgScalar>(xs: impl IntoIterator<Item = T>) -> T::Real {
    let zero = <T::Real as Zero>::zero();
    let one = <T::Real as One>::one();
    let half_small = <T::Real as Float>::min_positive_value().sqrt();
    let half_big = one / half_small;

    let mut acc = zero;
    let mut acc_small = zero;
    let mut acc_big = zero;
    for x in xs {
        let m = x.modulus();
        let ms = m * half_small;
        let mb = m * half_big;
        acc = acc + m * m;
        acc_small = acc_small + ms * ms;
        acc_big = acc_big + mb * mb;
    }

    if acc_small >= one {
        acc_small.lsqrt() * half_big
    } else if acc_big <= one {
        acc_big.lsqrt() * half_small
    } else {
        acc.lsqrt()
    }
}

// ── Vector norms ────────────────────────────────────────────────────

impl<T: LinalgScalar> Vector<T> {
    /// L2 (Euclidean) norm.
    ///
    /// ```
    /// use densefact::Vector;
    /// let v = Vector::from_slice(&[3.0_f64, 4.0]);
    /// assert!((v.norm() - 5.0).abs() < 1e-12);
    /// ```
    pub fn norm(&self) -> T::Real {
        stable_norm(self.iter().copied())
    }
}

// ── Matrix norms ────────────────────────────────────────────────────

impl<T: LinalgScalar> Matrix<T> {
    /// Frobenius norm: `sqrt(sum |a_ij|^2)`.
    ///
    /// ```
    /// use densefact::Matrix;
    /// let m = Matrix::from_rows(2, 2, &[1.0_f64, 2.0, 3.0, 4.0]);
    /// assert!((m.frobenius_norm() - 30.0_f64.sqrt()).abs() < 1e-12);
    /// ```
    pub fn frobenius_norm(&self) -> T::Real {
        stable_norm(self.as_slice().iter().copied())
    }

    /// Induced 1-norm: maximum absolute column sum.
    pub fn norm_one(&self) -> T::Real {
        let mut best = <T::Real as Zero>::zero();
        for j in 0..self.ncols() {
            let mut s = <T::Real as Zero>::zero();
            for &x in self.col_as_slice(j) {
                s = s + x.modulus();
            }
            best = best.max(s);
        }
        best
    }

    /// Induced infinity-norm: maximum absolute row sum.
    pub fn norm_inf(&self) -> T::Real {
        let mut best = <T::Real as Zero>::zero();
        for i in 0..self.nrows() {
            let mut s = <T::Real as Zero>::zero();
            for j in 0..self.ncols() {
                s = s + self[(i, j)].modulus();
            }
            best = best.max(s);
        }
        best
    }

    /// Largest element modulus.
    pub fn norm_max(&self) -> T::Real {
        self.as_slice()
            .iter()
            .fold(<T::Real as Zero>::zero(), |acc, x| Float::max(acc, x.modulus()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matrix_norms() {
        let m = Matrix::from_rows(2, 2, &[1.0_f64, -2.0, 3.0, 4.0]);
        assert_eq!(m.norm_one(), 6.0);
        assert_eq!(m.norm_inf(), 7.0);
        assert_eq!(m.norm_max(), 4.0);
        assert!((m.frobenius_norm() - 30.0_f64.sqrt()).abs() < 1e-12);
    }

    #[test]
    fn empty_norms_are_zero() {
        let m = Matrix::<f32>::zeros(0, 3);
        assert_eq!(m.norm_one(), 0.0);
        assert_eq!(m.norm_inf(), 0.0);
        assert_eq!(m.frobenius_norm(), 0.0);
    }

    #[test]
    fn norms_survive_extreme_magnitudes() {
        let huge = Vector::from_slice(&[3e160_f64, 4e160]);
        assert!((huge.norm() / 5e160 - 1.0).abs() < 1e-14);

        let tiny = Vector::from_slice(&[3e-170_f64, -4e-170]);
        assert!((tiny.norm() / 5e-170 - 1.0).abs() < 1e-14);

        let m = Matrix::from_rows(2, 2, &[1e160_f64, 1e160, 1e160, 1e160]);
        assert!((m.frobenius_norm() / 2e160 - 1.0).abs() < 1e-14);

        let m = Matrix::from_rows(2, 2, &[1e-170_f64, 1e-170, 1e-170, 1e-170]);
        assert!((m.frobenius_norm() / 2e-170 - 1.0).abs() < 1e-14);

        let s = Vector::from_slice(&[3e30_f32, 4e30]);
        assert!((s.norm() / 5e30 - 1.0).abs() < 1e-6);
    }

    #[test]
    fn stable_norm_of_nothing_is_zero() {
        assert_eq!(stable_norm(core::iter::empty::<f64>()), 0.0);
        assert_eq!(stable_norm([0.0_f64, 0.0]), 0.0);
    }

    #[cfg(feature = "complex")]
    #[test]
    fn complex_vector_norm() {
        use num_complex::Complex;
        let v = Vector::from_slice(&[Complex::new(3.0_f64, 4.0), Complex::new(0.0, 0.0)]);
        assert!((v.norm() - 5.0).abs() < 1e-12);
    }
}
