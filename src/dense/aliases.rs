//! Pre-defined type aliases for the supported scalar fields.

use super::{Matrix, Vector};

/// Dense matrix with `f32` elements.
pub type Matrixf32 = Matrix<f32>;
/// Dense matrix with `f64` elements.
pub type Matrixf64 = Matrix<f64>;

/// Dense vector with `f32` elements.
pub type Vectorf32 = Vector<f32>;
/// Dense vector with `f64` elements.
pub type Vectorf64 = Vector<f64>;

// ── Complex aliases (behind `complex` feature) ──────────────────────

/// Dense matrix with `Complex<f32>` elements.
#[cfg(feature = "complex")]
pub type Matrixz32 = Matrix<num_complex::Complex<f32>>;
/// Dense matrix with `Complex<f64>` elements.
#[cfg(feature = "complex")]
pub type Matrixz64 = Matrix<num_complex::Complex<f64>>;

/// Dense vector with `Complex<f32>` elements.
#[cfg(feature = "complex")]
pub type Vectorz32 = Vector<num_complex::Complex<f32>>;
/// Dense vector with `Complex<f64>` elements.
#[cfg(feature = "complex")]
pub type Vectorz64 = Vector<num_complex::Complex<f64>>;
