//! # densefact
//!
//! Dense QR and singular value decompositions over real and complex fields,
//! with linear / least-squares solvers and determinant and rank queries.
//! `no_std` compatible (needs `alloc`).
//!
//! ## Quick start
//!
//! ```
//! use densefact::{Matrix, Solver, Vector};
//!
//! // Solve a linear system Ax = b
//! let a = Matrix::from_rows(3, 3, &[
//!     2.0_f64, 1.0, -1.0,
//!     -3.0, -1.0, 2.0,
//!     -2.0, 1.0, 2.0,
//! ]);
//! let b = Vector::from_slice(&[8.0, -11.0, -3.0]);
//!
//! let x = a.qr().unwrap().solve(&b).unwrap(); // x = [2, 3, -1]
//! assert!((x[0] - 2.0).abs() < 1e-12);
//!
//! let svd = a.svd(true).unwrap();
//! assert_eq!(svd.rank(), 3);
//! assert!((svd.det().unwrap() - (-1.0)).abs() < 1e-12);
//! ```
//!
//! ## Modules
//!
//! - [`dense`]: Heap-allocated `Matrix<T>` with runtime dimensions and
//!   `Vec<T>` column-major storage, plus [`Vector<T>`]. Implements
//!   [`MatrixRef`] / [`MatrixMut`] so the in-place kernels run on it.
//!   Arithmetic operators, transpose / adjoint, and norms.
//!
//! - [`linalg`]: [`QrDecomposition`] (Householder, M ≥ N) and
//!   [`SvdDecomposition`] (Golub-Kahan bidiagonalization + implicit-shift
//!   QR, any shape). Both implement [`Solver`] for vector and matrix
//!   right-hand sides, with allocating and buffer-writing variants. Errors
//!   are reported as [`LinalgError`].
//!
//! - [`traits`]: Element trait hierarchy:
//!   - [`Scalar`]: all matrix elements (`Copy + PartialEq + Debug + Zero + One + Num`)
//!   - [`FloatScalar`]: real floats, used for singular values and tolerances
//!   - [`LinalgScalar`]: real floats and complex numbers, used by decompositions and norms
//!   - [`MatrixRef`] / [`MatrixMut`]: generic read/write access for algorithms
//!
//! ## Complex matrices
//!
//! The `complex` feature (on by default) enables `Complex<f32>` /
//! `Complex<f64>`. QR uses complex Householder reflections; the SVD
//! bidiagonal is kept real so the iteration phase is shared with the real
//! case. Singular values, norms and tolerances are always real.
//!
//! ## Logging
//!
//! Factorizations log through the [`log`] facade: shape at `debug`, sweep
//! counts and deflation at `debug` / `trace`, and an exhausted sweep budget
//! at `warn`. No logger is installed by the crate.
//!
//! ## Cargo features
//!
//! | Feature   | Default  | Description |
//! |-----------|----------|-------------|
//! | `std`     | yes      | Hardware FPU via system libm |
//! | `libm`    | no       | Pure-Rust software float fallback (needed without `std`) |
//! | `complex` | yes      | `Complex<f32>` / `Complex<f64>` support via `num-complex` |

#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

pub mod dense;
pub mod linalg;
pub mod traits;

pub use dense::{Matrix, Matrixf32, Matrixf64, Vector, Vectorf32, Vectorf64};
#[cfg(feature = "complex")]
pub use dense::{Matrixz32, Matrixz64, Vectorz32, Vectorz64};
pub use linalg::{LinalgError, QrDecomposition, Solver, SvdDecomposition, SvdSettings};
pub use traits::{FloatScalar, LinalgScalar, MatrixMut, MatrixRef, Scalar};

#[cfg(feature = "complex")]
pub use num_complex::Complex;
