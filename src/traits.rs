use core::fmt::Debug;
use num_traits::{Float, Num, NumCast, One, Zero};

#[cfg(feature = "complex")]
use num_complex::Complex;

/// Trait for types that can be used as matrix elements.
///
/// Blanket-implemented for all types satisfying the bounds.
pub trait Scalar: Copy + PartialEq + Debug + Zero + One + Num {}

impl<T: Copy + PartialEq + Debug + Zero + One + Num> Scalar for T {}

/// Trait for real floating-point elements.
///
/// Used for singular values, tolerances and Givens rotation coefficients.
/// Implies `LinalgScalar<Real = Self>` since real floats are their own real type.
pub trait FloatScalar: Scalar + Float + LinalgScalar<Real = Self> {}

impl<T: Scalar + Float + LinalgScalar<Real = T>> FloatScalar for T {}

/// The scalar field the factorizations are generic over.
///
/// Covers real floats (`f32`, `f64`) and, with the `complex` feature,
/// `Complex<f32>` / `Complex<f64>`. Zero and one come from
/// [`num_traits::Zero`] / [`num_traits::One`]; add, multiply and divide from
/// [`num_traits::Num`].
pub trait LinalgScalar: Scalar {
    /// The real component type (`Self` for reals, `T` for `Complex<T>`).
    type Real: FloatScalar;

    /// Absolute value / modulus: `|z|` for complex, `.abs()` for real.
    fn modulus(self) -> Self::Real;

    /// Complex conjugate (identity for reals).
    fn conj(self) -> Self;

    /// Real part.
    fn re(self) -> Self::Real;

    /// Imaginary part (zero for reals).
    fn im(self) -> Self::Real;

    /// Square root.
    fn lsqrt(self) -> Self;

    /// Machine epsilon of the underlying real type.
    fn lepsilon() -> Self::Real;

    /// Promote a real value into `Self`.
    fn from_real(r: Self::Real) -> Self;

    /// Quotient `self / rhs` that stays finite wherever the result is
    /// representable. Plain division for reals; complex division scales by
    /// `|rhs|` instead of forming `|rhs|^2`.
    #[inline]
    fn safe_div(self, rhs: Self) -> Self {
        self / rhs
    }

    /// Multiplicative inverse.
    #[inline]
    fn recip(self) -> Self {
        Self::one().safe_div(self)
    }

    /// Whether `|self| <= tol`.
    #[inline]
    fn is_near_zero(self, tol: Self::Real) -> bool {
        self.modulus() <= tol
    }

    /// A matrix dimension as a real number, for scaling tolerances.
    ///
    /// Saturates at the largest finite value instead of failing.
    #[inline]
    fn real_from_usize(n: usize) -> Self::Real {
        <Self::Real as NumCast>::from(n).unwrap_or_else(<Self::Real as Float>::max_value)
    }
}

/// Real floats delegate straight to `Float`.
macro_rules! impl_linalg_scalar_real {
    ($($t:ty),*) => {
        $(
            impl LinalgScalar for $t {
                type Real = $t;

                #[inline] fn modulus(self) -> $t { Float::abs(self) }
                #[inline] fn conj(self) -> $t { self }
                #[inline] fn re(self) -> $t { self }
                #[inline] fn im(self) -> $t { 0.0 }
                #[inline] fn lsqrt(self) -> $t { Float::sqrt(self) }
                #[inline] fn lepsilon() -> $t { <$t as Float>::epsilon() }
                #[inline] fn from_real(r: $t) -> $t { r }
            }
        )*
    };
}

impl_linalg_scalar_real!(f32, f64);

#[cfg(feature = "complex")]
impl<T: FloatScalar> LinalgScalar for Complex<T> {
    type Real = T;

    #[inline]
    fn modulus(self) -> T {
        self.norm()
    }

    #[inline]
    fn conj(self) -> Self {
        Complex::conj(&self)
    }

    #[inline]
    fn re(self) -> T {
        self.re
    }

    #[inline]
    fn im(self) -> T {
        self.im
    }

    #[inline]
    fn lsqrt(self) -> Self {
        self.sqrt()
    }

    #[inline]
    fn lepsilon() -> T {
        T::epsilon()
    }

    #[inline]
    fn from_real(r: T) -> Self {
        Complex::new(r, T::zero())
    }

    #[inline]
    fn safe_div(self, rhs: Self) -> Self {
        let s = rhs.norm();
        if s == T::zero() {
            return self / rhs;
        }
        self.unscale(s) * Complex::conj(&rhs).unscale(s)
    }
}

/// Read-only access to a matrix-like type.
///
/// Lets the reflector and rotation kernels run on any column-addressable
/// storage, including the scratch copies the factorizations own.
pub trait MatrixRef<T> {
    fn nrows(&self) -> usize;
    fn ncols(&self) -> usize;
    fn get(&self, row: usize, col: usize) -> &T;
}

/// Mutable access to a matrix-like type.
///
/// Extends `MatrixRef` with mutable element access, enabling
/// in-place algorithms (Householder QR, bidiagonalization) to work generically.
pub trait MatrixMut<T>: MatrixRef<T> {
    fn get_mut(&mut self, row: usize, col: usize) -> &mut T;
}
