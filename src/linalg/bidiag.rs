use alloc::vec::Vec;

use log::{debug, trace, warn};
use num_traits::{Float, One, Zero};

use crate::linalg::householder::{apply_left_adjoint, apply_right, real_beta_reflector, reflector_det};
use crate::linalg::{givens, LinalgError};
use crate::traits::{LinalgScalar, MatrixMut};

// ── Householder bidiagonalization ───────────────────────────────────

/// Householder bidiagonalization: reduce an M×N matrix (M ≥ N) to real
/// upper bidiagonal form via unitary transforms.
///
/// On return:
/// - `diag[0..n]` contains the bidiagonal diagonal
/// - `off_diag[0..n-1]` contains the bidiagonal superdiagonal
/// - `u` (M×M) accumulates the left transform, if `compute_u`
/// - `v` (N×N) accumulates the right transform, if `compute_v`
///
/// The result satisfies `A = U · B · V^H` where B = bidiag(diag, off_diag).
/// Every reflector maps onto a real value, so B is real even for complex
/// input; the phases go into U and V.
///
/// Returns `det(U) · conj(det(V))`, tracked whether or not U and V are
/// accumulated, so that `det(A) = phase · det(B)` for square input.
///
/// `a` is overwritten with scratch.
pub(crate) fn bidiagonalize<T: LinalgScalar>(
    a: &mut impl MatrixMut<T>,
    diag: &mut [T::Real],
    off_diag: &mut [T::Real],
    u: &mut impl MatrixMut<T>,
    v: &mut impl MatrixMut<T>,
    compute_u: bool,
    compute_v: bool,
) -> T {
    let m = a.nrows();
    let n = a.ncols();
    debug_assert!(m >= n, "bidiagonalize requires M >= N");
    debug_assert!(diag.len() >= n);
    debug_assert!(off_diag.len() + 1 >= n);

    if compute_u {
        set_identity(u);
    }
    if compute_v {
        set_identity(v);
    }

    let mut phase = T::one();
    let mut scratch: Vec<T> = Vec::with_capacity(m);

    for k in 0..n {
        // ── Left reflector: zero out a[k+1:m, k] ──
        scratch.clear();
        scratch.extend((k..m).map(|i| *a.get(i, k)));
        let (tau, beta) = real_beta_reflector(&mut scratch);
        if tau != T::zero() {
            apply_left_adjoint(a, &scratch, tau, k, (k + 1)..n);
            if compute_u {
                apply_right(u, &scratch, tau, k, 0..m);
            }
            phase = phase * reflector_det(tau);
        }
        diag[k] = beta;

        // ── Right reflector: zero out a[k, k+2:n] ──
        // Runs for the last superdiagonal entry too, where it only rotates
        // a complex entry onto the real axis.
        if k + 1 < n {
            scratch.clear();
            scratch.extend(((k + 1)..n).map(|j| (*a.get(k, j)).conj()));
            let (tau, beta) = real_beta_reflector(&mut scratch);
            if tau != T::zero() {
                apply_right(a, &scratch, tau, k + 1, (k + 1)..m);
                if compute_v {
                    apply_right(v, &scratch, tau, k + 1, 0..n);
                }
                phase = phase * reflector_det(tau).conj();
            }
            off_diag[k] = beta;
        }
    }

    phase
}

fn set_identity<T: LinalgScalar>(q: &mut impl MatrixMut<T>) {
    let (rows, cols) = (q.nrows(), q.ncols());
    for j in 0..cols {
        for i in 0..rows {
            *q.get_mut(i, j) = if i == j { T::one() } else { T::zero() };
        }
    }
}

/// `(col_i, col_j) <- (c·col_i + s·col_j, c·col_j - s·col_i)`.
fn rotate_cols<T: LinalgScalar>(q: &mut impl MatrixMut<T>, i: usize, j: usize, c: T::Real, s: T::Real) {
    let (c, s) = (T::from_real(c), T::from_real(s));
    for row in 0..q.nrows() {
        let qi = *q.get(row, i);
        let qj = *q.get(row, j);
        *q.get_mut(row, i) = c * qi + s * qj;
        *q.get_mut(row, j) = c * qj - s * qi;
    }
}

fn swap_cols<T: LinalgScalar>(q: &mut impl MatrixMut<T>, i: usize, j: usize) {
    for row in 0..q.nrows() {
        let tmp = *q.get(row, i);
        *q.get_mut(row, i) = *q.get(row, j);
        *q.get_mut(row, j) = tmp;
    }
}

// ── Golub-Kahan bidiagonal QR ───────────────────────────────────────

/// Golub-Kahan implicit-shift QR iteration on a real bidiagonal matrix.
///
/// On entry:
/// - `diag[0..n]`: bidiagonal diagonal entries
/// - `off_diag[0..n-1]`: bidiagonal superdiagonal entries
/// - `u`, `v`: unitary matrices to accumulate rotations into
/// - `compute_u`, `compute_v`: whether to actually accumulate
/// - `phase`: running `det(U) · conj(det(V))`; flipped for every sign fix
///
/// On return:
/// - `diag` contains non-negative singular values sorted descending
/// - `off_diag` is zeroed
///
/// Returns the number of sweeps taken, or `NonConvergence` once more than
/// `max_iter` sweeps are needed.
#[allow(clippy::too_many_arguments)]
pub(crate) fn bidiagonal_qr<T: LinalgScalar>(
    diag: &mut [T::Real],
    off_diag: &mut [T::Real],
    u: &mut impl MatrixMut<T>,
    v: &mut impl MatrixMut<T>,
    compute_u: bool,
    compute_v: bool,
    max_iter: usize,
    phase: &mut T,
) -> Result<usize, LinalgError> {
    let n = diag.len();
    let zero = <T::Real as Zero>::zero();
    let eps = T::lepsilon();
    let tiny = <T::Real as Float>::min_positive_value();

    // Bring B to unit scale when its entries sit where the squared terms of
    // the shift would underflow or overflow. Rotations are scale-free, so
    // only the singular values need the factor back.
    let scale = diag
        .iter()
        .chain(off_diag.iter())
        .fold(zero, |acc, &x| acc.max(x.abs()));
    let safe_low = tiny.sqrt().sqrt();
    let safe_high = <T::Real as One>::one() / safe_low;
    let rescale = scale > zero && (scale < safe_low || scale > safe_high);
    if rescale {
        trace!("scaling bidiagonal by 1/{:?}", scale);
        for x in diag.iter_mut().chain(off_diag.iter_mut()) {
            *x = *x / scale;
        }
    }

    let mut bnorm = zero;
    for i in 0..n {
        let e = if i + 1 < n { off_diag[i].abs() } else { zero };
        bnorm = bnorm.max(diag[i].abs() + e);
    }
    let zero_tol = eps * bnorm;

    let mut iter = 0usize;
    let mut hi = n.saturating_sub(1);

    while hi > 0 {
        // Deflation: check if trailing off_diag is negligible
        {
            let threshold = eps * (diag[hi - 1].abs() + diag[hi].abs());
            if off_diag[hi - 1].abs() <= threshold || off_diag[hi - 1].abs() <= tiny {
                trace!("deflated singular value {} after {} sweeps", hi, iter);
                off_diag[hi - 1] = zero;
                hi -= 1;
                continue;
            }
        }

        // Find lo: start of unreduced block
        let mut lo = hi - 1;
        while lo > 0 {
            let threshold = eps * (diag[lo - 1].abs() + diag[lo].abs());
            if off_diag[lo - 1].abs() <= threshold || off_diag[lo - 1].abs() <= tiny {
                off_diag[lo - 1] = zero;
                break;
            }
            lo -= 1;
        }

        iter += 1;
        if iter > max_iter {
            warn!(
                "bidiagonal QR stopped at {} sweeps with {} singular values unconverged",
                max_iter,
                hi + 1
            );
            return Err(LinalgError::NonConvergence { iterations: max_iter });
        }

        // A (numerically) zero diagonal entry breaks the shift; rotate its
        // superdiagonal neighbour out of the block instead.
        if let Some(idx) = (lo..=hi).find(|&i| diag[i].abs() <= zero_tol) {
            diag[idx] = zero;
            if idx < hi {
                // Left rotations on rows (idx, j) push the fill-in at
                // (idx, j) one column right until it falls off the block.
                let mut z = off_diag[idx];
                off_diag[idx] = zero;
                for j in (idx + 1)..=hi {
                    let (c, s) = givens(diag[j], z);
                    diag[j] = c * diag[j] + s * z;
                    if j < hi {
                        z = zero - s * off_diag[j];
                        off_diag[j] = c * off_diag[j];
                    }
                    if compute_u {
                        rotate_cols(u, j, idx, c, s);
                    }
                }
            } else {
                // Trailing zero: right rotations on columns (j, hi) push the
                // fill-in at (j, hi) one row up until it falls off the block.
                let mut z = off_diag[hi - 1];
                off_diag[hi - 1] = zero;
                for j in (lo..hi).rev() {
                    let (c, s) = givens(diag[j], z);
                    diag[j] = c * diag[j] + s * z;
                    if j > lo {
                        z = zero - s * off_diag[j - 1];
                        off_diag[j - 1] = c * off_diag[j - 1];
                    }
                    if compute_v {
                        rotate_cols(v, j, hi, c, s);
                    }
                }
            }
            continue;
        }

        // Wilkinson shift from trailing 2×2 of B^T B
        let d_hi = diag[hi];
        let d_hi1 = diag[hi - 1];
        let e_hi1 = off_diag[hi - 1];
        let e_hi2 = if hi >= 2 && hi - 2 >= lo {
            off_diag[hi - 2]
        } else {
            zero
        };

        let t11 = d_hi1 * d_hi1 + e_hi2 * e_hi2;
        let t12 = d_hi1 * e_hi1;
        let t22 = d_hi * d_hi + e_hi1 * e_hi1;

        let two = <T::Real as One>::one() + <T::Real as One>::one();
        let d = (t11 - t22) / two;
        let sign_d = if d >= zero {
            <T::Real as One>::one()
        } else {
            zero - <T::Real as One>::one()
        };
        let denom = d + sign_d * (d * d + t12 * t12).sqrt();
        let mu = if denom == zero {
            t22
        } else {
            t22 - t12 * t12 / denom
        };

        // Implicit QR chase
        let mut x = diag[lo] * diag[lo] - mu;
        let mut z = diag[lo] * off_diag[lo];

        for k in lo..hi {
            // Right rotation on columns k, k+1 zeroes z
            let (c, s) = givens(x, z);

            if k > lo {
                off_diag[k - 1] = c * x + s * z;
            }

            let dk = diag[k];
            let ek = off_diag[k];
            let dk1 = diag[k + 1];

            diag[k] = c * dk + s * ek;
            off_diag[k] = c * ek - s * dk;
            let bulge = s * dk1;
            diag[k + 1] = c * dk1;

            if compute_v {
                rotate_cols(v, k, k + 1, c, s);
            }

            // Left rotation on rows k, k+1 zeroes the bulge at B[k+1, k]
            let (c2, s2) = givens(diag[k], bulge);

            diag[k] = c2 * diag[k] + s2 * bulge;
            let old_ek = off_diag[k];
            let old_dk1 = diag[k + 1];
            off_diag[k] = c2 * old_ek + s2 * old_dk1;
            diag[k + 1] = c2 * old_dk1 - s2 * old_ek;

            if k + 1 < hi {
                let old_ek1 = off_diag[k + 1];
                // Fill-in at B[k, k+2] drives the next right rotation
                x = off_diag[k];
                z = s2 * old_ek1;
                off_diag[k + 1] = c2 * old_ek1;
            }

            if compute_u {
                rotate_cols(u, k, k + 1, c2, s2);
            }
        }
    }

    debug!("bidiagonal QR converged in {} sweeps", iter);

    if rescale {
        for d in diag.iter_mut() {
            *d = *d * scale;
        }
    }

    // Make all singular values non-negative
    for i in 0..n {
        if diag[i] < zero {
            diag[i] = zero - diag[i];
            *phase = T::zero() - *phase;
            if compute_u {
                for row in 0..u.nrows() {
                    let val = *u.get(row, i);
                    *u.get_mut(row, i) = T::zero() - val;
                }
            }
        }
    }

    // Sort descending; U and V columns move together so the phase is kept
    for i in 0..n {
        let mut max_idx = i;
        for j in (i + 1)..n {
            if diag[j] > diag[max_idx] {
                max_idx = j;
            }
        }
        if max_idx != i {
            diag.swap(i, max_idx);
            if compute_u {
                swap_cols(u, i, max_idx);
            }
            if compute_v {
                swap_cols(v, i, max_idx);
            }
        }
    }

    Ok(iter)
}
