use core::ops::Range;

use num_traits::Zero;

use crate::dense::stable_norm;
use crate::traits::{LinalgScalar, MatrixMut};

/// Generate an elementary reflector `H = I - tau * v * v^H` with `v[0] = 1`
/// such that `H^H * x = beta * e_0` with `beta` real.
///
/// On entry `v` holds `x`; on return it holds `v` (leading 1 written
/// explicitly). Returns `(tau, beta)`. When `x` is already a real multiple of
/// `e_0`, `tau = 0` and `H = I`.
///
/// The real `beta` is what keeps the bidiagonal real for complex input: the
/// phase of `x[0]` is absorbed into `H`.
pub(crate) fn real_beta_reflector<T: LinalgScalar>(v: &mut [T]) -> (T, T::Real) {
    let zero = <T::Real as Zero>::zero();
    let alpha = v[0];

    if v[1..].iter().all(|&x| x == T::zero()) && alpha.im() == zero {
        v[0] = T::one();
        return (T::zero(), alpha.re());
    }

    let norm = stable_norm(v.iter().copied());
    // beta takes the opposite sign of re(alpha) so alpha - beta never cancels
    let beta = if alpha.re() >= zero { zero - norm } else { norm };

    let beta_t = T::from_real(beta);
    let tau = (beta_t - alpha).safe_div(beta_t);
    let scale = (alpha - beta_t).recip();
    for x in v[1..].iter_mut() {
        *x = *x * scale;
    }
    v[0] = T::one();
    (tau, beta)
}

/// Determinant of `I - tau * v * v^H` for a reflector from [`real_beta_reflector`].
///
/// Unitarity gives `tau * |v|^2 = 2 Re(tau) / |tau|^2 * tau`, so the
/// determinant reduces to `-tau / conj(tau)`; `-1` for real fields.
pub(crate) fn reflector_det<T: LinalgScalar>(tau: T) -> T {
    if tau == T::zero() {
        T::one()
    } else {
        T::zero() - tau.safe_div(tau.conj())
    }
}

/// `A[r0.., cols] <- H^H * A[r0.., cols]` where `H = I - tau * v * v^H`.
pub(crate) fn apply_left_adjoint<T: LinalgScalar>(
    a: &mut impl MatrixMut<T>,
    v: &[T],
    tau: T,
    r0: usize,
    cols: Range<usize>,
) {
    let tau_h = tau.conj();
    for j in cols {
        let mut w = T::zero();
        for (i, &vi) in v.iter().enumerate() {
            w = w + vi.conj() * *a.get(r0 + i, j);
        }
        w = w * tau_h;
        for (i, &vi) in v.iter().enumerate() {
            let cur = *a.get(r0 + i, j);
            *a.get_mut(r0 + i, j) = cur - vi * w;
        }
    }
}

/// `A[rows, c0..] <- A[rows, c0..] * H` where `H = I - tau * v * v^H`.
///
/// Also used to accumulate `U <- U * H` and `V <- V * H`.
pub(crate) fn apply_right<T: LinalgScalar>(
    a: &mut impl MatrixMut<T>,
    v: &[T],
    tau: T,
    c0: usize,
    rows: Range<usize>,
) {
    for r in rows {
        let mut w = T::zero();
        for (j, &vj) in v.iter().enumerate() {
            w = w + *a.get(r, c0 + j) * vj;
        }
        w = w * tau;
        for (j, &vj) in v.iter().enumerate() {
            let cur = *a.get(r, c0 + j);
            *a.get_mut(r, c0 + j) = cur - w * vj.conj();
        }
    }
}
