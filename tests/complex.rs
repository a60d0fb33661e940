#![cfg(feature = "complex")]

mod common;

use common::{
    max_abs_diff, normal_equation_residual, random_matrix, random_vector, singular_fixture,
    unitary_defect, vec_max_abs_diff, well_conditioned, RandomScalar,
};
use densefact::{Complex, LinalgError, Matrix, QrDecomposition, Solver, SvdDecomposition, Vector};

type C = Complex<f64>;

fn c(re: f64, im: f64) -> C {
    Complex::new(re, im)
}

const TOL: f64 = 1e-10;

fn assert_complex_near(a: C, b: C, tol: f64, msg: &str) {
    assert!(
        (a.re - b.re).abs() < tol && (a.im - b.im).abs() < tol,
        "{}: {:?} vs {:?}",
        msg,
        a,
        b
    );
}

// ── QR ───────────────────────────────────────────────────────────────

#[test]
fn complex_qr_identity() {
    for &n in &[1usize, 10, 100] {
        let qr = Matrix::<C>::eye(n).qr().unwrap();
        let r = qr.r();
        for i in 0..n {
            assert_eq!(r[(i, i)], c(-1.0, 0.0));
        }
        assert_eq!(qr.det().unwrap(), c(1.0, 0.0));
    }
}

fn qr_reconstructs<T: RandomScalar>(tol: T::Real) {
    for (seed, &(rows, cols)) in [(1, 1), (4, 4), (9, 5), (20, 20), (40, 15)].iter().enumerate() {
        let a = random_matrix::<T>(rows, cols, 10 + seed as u64);
        let qr = a.qr().unwrap();
        let q = qr.q();
        let diff = max_abs_diff(&(&q * &qr.r()), &a);
        assert!(diff < tol, "{}x{}: |QR - A| = {:?}", rows, cols, diff);
        assert!(unitary_defect(&q) < tol, "{}x{}: Q not unitary", rows, cols);
    }
}

#[test]
fn complex_qr_reconstructs_z32() {
    qr_reconstructs::<Complex<f32>>(1e-4);
}

#[test]
fn complex_qr_reconstructs_z64() {
    qr_reconstructs::<C>(1e-12);
}

#[test]
fn complex_qr_det() {
    let a = Matrix::from_rows(2, 2, &[c(1.0, 1.0), c(2.0, 0.0), c(0.0, 1.0), c(1.0, -1.0)]);
    // (1+i)(1-i) - 2i = 2 - 2i
    let det = a.qr().unwrap().det().unwrap();
    assert_complex_near(det, c(2.0, -2.0), TOL, "det");
}

#[test]
fn complex_qr_solve() {
    let a = Matrix::from_rows(2, 2, &[c(2.0, 1.0), c(1.0, -1.0), c(1.0, 0.0), c(3.0, 2.0)]);
    let b = Vector::from_slice(&[c(5.0, 3.0), c(7.0, 4.0)]);
    let x = a.solve_qr(&b).unwrap();
    let ax = &a * &x;
    for i in 0..2 {
        assert_complex_near(ax[i], b[i], TOL, &format!("row {}", i));
    }
}

#[test]
fn complex_qr_least_squares() {
    let a = well_conditioned::<C>(25, 6, 3);
    let b = random_vector::<C>(25, 4);
    let x = QrDecomposition::new(&a).unwrap().solve(&b).unwrap();
    assert!(normal_equation_residual(&a, &x, &b) < 1e-10);
}

#[test]
fn complex_qr_wide_rejected() {
    let a = random_matrix::<C>(2, 3, 5);
    assert_eq!(
        a.qr().unwrap_err(),
        LinalgError::InvalidShape { rows: 2, cols: 3 }
    );
}

// ── SVD ──────────────────────────────────────────────────────────────

#[test]
fn complex_svd_identity() {
    for &n in &[1usize, 10, 100] {
        let eye = Matrix::<C>::eye(n);
        let svd = eye.svd(true).unwrap();
        assert!(svd.singular_values().iter().all(|&s| s == 1.0));
        assert_eq!(svd.u().unwrap(), &eye);
        assert_eq!(svd.vt().unwrap(), &eye);
        assert_eq!(svd.det().unwrap(), c(1.0, 0.0));
    }
}

fn svd_reconstructs<T: RandomScalar>(tol: T::Real) {
    for (seed, &(rows, cols)) in [(1, 1), (1, 3), (5, 5), (9, 4), (4, 9), (20, 20)].iter().enumerate() {
        let a = random_matrix::<T>(rows, cols, 20 + seed as u64);
        let svd = a.svd(true).unwrap();
        let u = svd.u().unwrap();
        let vt = svd.vt().unwrap();
        let diff = max_abs_diff(&(&(u * &svd.w()) * vt), &a);
        assert!(diff < tol, "{}x{}: |U W VT - A| = {:?}", rows, cols, diff);
        assert!(unitary_defect(u) < tol, "{}x{}: U not unitary", rows, cols);
        assert!(unitary_defect(vt) < tol, "{}x{}: VT not unitary", rows, cols);
        for pair in svd.singular_values().windows(2) {
            assert!(pair[0] >= pair[1]);
        }
    }
}

#[test]
fn complex_svd_reconstructs_z32() {
    svd_reconstructs::<Complex<f32>>(1e-3);
}

#[test]
fn complex_svd_reconstructs_z64() {
    svd_reconstructs::<C>(1e-10);
}

#[test]
fn complex_svd_known_values() {
    // diag(3i, -4) has singular values 4 and 3 and determinant -12i
    let a = Matrix::from_rows(2, 2, &[c(0.0, 3.0), c(0.0, 0.0), c(0.0, 0.0), c(-4.0, 0.0)]);
    let svd = a.svd(true).unwrap();
    assert!((svd.singular_values()[0] - 4.0).abs() < TOL);
    assert!((svd.singular_values()[1] - 3.0).abs() < TOL);
    assert_complex_near(svd.det().unwrap(), c(0.0, -12.0), TOL, "det");
}

#[test]
fn complex_svd_det_matches_qr() {
    for (seed, &n) in [2usize, 5, 11].iter().enumerate() {
        let a = random_matrix::<C>(n, n, 40 + seed as u64);
        let d_qr = a.qr().unwrap().det().unwrap();
        for compute in [true, false] {
            let d_svd = a.svd(compute).unwrap().det().unwrap();
            let scale = d_qr.norm().max(1.0);
            assert!(
                (d_qr - d_svd).norm() < 1e-10 * scale,
                "order {}: {} vs {}",
                n,
                d_qr,
                d_svd
            );
        }
    }
}

#[test]
fn complex_svd_rank() {
    let a = random_matrix::<C>(12, 7, 60);
    assert_eq!(a.svd(false).unwrap().rank(), 7);

    let s = singular_fixture::<C>(10).svd(true).unwrap();
    assert_eq!(s.rank(), 9);
    assert_eq!(s.det().unwrap(), c(0.0, 0.0));

    let s = singular_fixture::<Complex<f32>>(10).svd(true).unwrap();
    assert_eq!(s.rank(), 9);
    assert_eq!(s.det().unwrap(), Complex::new(0.0, 0.0));
}

fn svd_solves<T: RandomScalar>(sizes: &[usize], tol: T::Real) {
    for (seed, &n) in sizes.iter().enumerate() {
        let a = well_conditioned::<T>(n, n, 70 + seed as u64);
        let b = random_vector::<T>(n, 80 + seed as u64);
        let bm = random_matrix::<T>(n, 2, 90 + seed as u64);
        let (a0, b0, bm0) = (a.clone(), b.clone(), bm.clone());

        let svd = SvdDecomposition::new(&a, true).unwrap();
        let x = svd.solve(&b).unwrap();
        assert!(vec_max_abs_diff(&(&a * &x), &b) < tol, "order {}", n);

        let xm = svd.solve_matrix(&bm).unwrap();
        assert!(max_abs_diff(&(&a * &xm), &bm) < tol, "order {}", n);

        assert_eq!(a, a0);
        assert_eq!(b, b0);
        assert_eq!(bm, bm0);
    }
}

#[test]
fn complex_svd_solve_z32() {
    svd_solves::<Complex<f32>>(&[1, 3, 10], 1e-4);
}

#[test]
fn complex_svd_solve_z64() {
    svd_solves::<C>(&[1, 3, 10, 40], 1e-10);
}

#[test]
fn complex_svd_least_squares() {
    let a = well_conditioned::<C>(18, 5, 100);
    let b = random_vector::<C>(18, 101);
    let x = a.solve_svd(&b).unwrap();
    assert!(normal_equation_residual(&a, &x, &b) < 1e-10);
}

#[test]
fn complex_svd_without_vectors() {
    let a = random_matrix::<C>(10, 3, 110);
    let svd = a.svd(false).unwrap();
    let b = random_vector::<C>(3, 111);
    assert_eq!(svd.solve(&b).unwrap_err(), LinalgError::VectorsNotComputed);
    let bm = random_matrix::<C>(10, 3, 112);
    assert_eq!(svd.solve_matrix(&bm).unwrap_err(), LinalgError::VectorsNotComputed);
}

// ── Extreme magnitudes ───────────────────────────────────────────────

#[test]
fn complex_factorizations_at_extreme_magnitudes() {
    let base = random_matrix::<C>(6, 4, 120);
    let reference = base.svd(false).unwrap();

    for &scale in &[1e-170_f64, 1e200] {
        let a = &base * c(scale, 0.0);

        let qr = a.qr().unwrap();
        let q = qr.q();
        let diff = max_abs_diff(&(&q * &qr.r()), &a) / scale;
        assert!(diff < 1e-12, "QR at {:e}: {:e}", scale, diff);
        assert!(unitary_defect(&q) < 1e-12);

        let svd = a.svd(true).unwrap();
        assert_eq!(svd.rank(), 4);
        for (s, r) in svd.singular_values().iter().zip(reference.singular_values()) {
            assert!((s / scale - r).abs() < 1e-12, "{:e} vs {:e}", s / scale, r);
        }
        let u = svd.u().unwrap();
        let vt = svd.vt().unwrap();
        let diff = max_abs_diff(&(&(u * &svd.w()) * vt), &a) / scale;
        assert!(diff < 1e-12, "SVD at {:e}: {:e}", scale, diff);
    }
}

#[test]
fn complex_solve_at_extreme_magnitudes() {
    let a = well_conditioned::<C>(5, 5, 121);
    let b = random_vector::<C>(5, 122);
    let x = a.solve_qr(&b).unwrap();

    for &scale in &[1e-170_f64, 1e200] {
        let s = c(scale, 0.0);
        let sa = &a * s;
        let sb = Vector::from_fn(5, |i| b[i] * s);
        assert!(vec_max_abs_diff(&x, &sa.solve_qr(&sb).unwrap()) < 1e-12, "QR at {:e}", scale);
        assert!(vec_max_abs_diff(&x, &sa.solve_svd(&sb).unwrap()) < 1e-12, "SVD at {:e}", scale);
    }
}
