//! Shared fixtures for the integration tests: seeded random matrices and
//! vectors over every supported field, plus comparison helpers.

#![allow(dead_code)]

use densefact::{LinalgScalar, Matrix, Vector};
use num_traits::{Float, Zero};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// A field the fixtures can sample uniformly from `[-1, 1]` (each part, for
/// complex).
pub trait RandomScalar: LinalgScalar {
    fn sample(rng: &mut StdRng) -> Self;
}

impl RandomScalar for f32 {
    fn sample(rng: &mut StdRng) -> Self {
        rng.gen_range(-1.0..1.0)
    }
}

impl RandomScalar for f64 {
    fn sample(rng: &mut StdRng) -> Self {
        rng.gen_range(-1.0..1.0)
    }
}

#[cfg(feature = "complex")]
impl RandomScalar for densefact::Complex<f32> {
    fn sample(rng: &mut StdRng) -> Self {
        densefact::Complex::new(rng.gen_range(-1.0..1.0), rng.gen_range(-1.0..1.0))
    }
}

#[cfg(feature = "complex")]
impl RandomScalar for densefact::Complex<f64> {
    fn sample(rng: &mut StdRng) -> Self {
        densefact::Complex::new(rng.gen_range(-1.0..1.0), rng.gen_range(-1.0..1.0))
    }
}

pub fn random_matrix<T: RandomScalar>(rows: usize, cols: usize, seed: u64) -> Matrix<T> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut m = Matrix::zeros(rows, cols);
    for j in 0..cols {
        for i in 0..rows {
            m[(i, j)] = T::sample(&mut rng);
        }
    }
    m
}

pub fn random_vector<T: RandomScalar>(n: usize, seed: u64) -> Vector<T> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut v = Vector::zeros(n);
    for i in 0..n {
        v[i] = T::sample(&mut rng);
    }
    v
}

/// Random `rows × cols` matrix with `2 · cols` added to its leading diagonal,
/// which keeps it comfortably full column rank.
pub fn well_conditioned<T: RandomScalar>(rows: usize, cols: usize, seed: u64) -> Matrix<T> {
    let mut m = random_matrix::<T>(rows, cols, seed);
    let boost = T::from_real(T::real_from_usize(2 * cols));
    for i in 0..rows.min(cols) {
        m[(i, i)] = m[(i, i)] + boost;
    }
    m
}

/// Ones on the sub- and superdiagonal and in the two corner diagonal
/// entries. Singular for even `n`, with exactly one zero singular value.
pub fn singular_fixture<T: LinalgScalar>(n: usize) -> Matrix<T> {
    let mut m = Matrix::zeros(n, n);
    m[(0, 0)] = T::one();
    m[(n - 1, n - 1)] = T::one();
    for i in 1..n {
        m[(i, i - 1)] = T::one();
        m[(i - 1, i)] = T::one();
    }
    m
}

pub fn max_abs_diff<T: LinalgScalar>(a: &Matrix<T>, b: &Matrix<T>) -> T::Real {
    assert_eq!((a.nrows(), a.ncols()), (b.nrows(), b.ncols()), "shape mismatch");
    a.as_slice()
        .iter()
        .zip(b.as_slice())
        .fold(<T::Real as Zero>::zero(), |acc, (&x, &y)| Float::max(acc, (x - y).modulus()))
}

pub fn vec_max_abs_diff<T: LinalgScalar>(a: &Vector<T>, b: &Vector<T>) -> T::Real {
    assert_eq!(a.len(), b.len(), "length mismatch");
    a.iter()
        .zip(b.iter())
        .fold(<T::Real as Zero>::zero(), |acc, (&x, &y)| Float::max(acc, (x - y).modulus()))
}

/// `max |Q^H Q - I|`.
pub fn unitary_defect<T: LinalgScalar>(q: &Matrix<T>) -> T::Real {
    let qhq = q.adjoint() * q;
    max_abs_diff(&qhq, &Matrix::eye(q.ncols()))
}

/// `max |A^H (A x - b)|`: zero exactly at a least-squares solution.
pub fn normal_equation_residual<T: LinalgScalar>(a: &Matrix<T>, x: &Vector<T>, b: &Vector<T>) -> T::Real {
    let r = &(a * x) - b;
    let g = &a.adjoint() * &r;
    g.iter().fold(<T::Real as Zero>::zero(), |acc, &v| Float::max(acc, v.modulus()))
}
