//! Scalar trait for tensor element types.

use num_complex::Complex;
use std::fmt::Debug;
use std::ops::{Add, AddAssign, Mul, Neg, Sub};

pub use num_complex::Complex64 as c64;

/// Trait for scalar types supported by ndfft.
///
/// Only two element types exist: `f64` for real arrays and [`c64`] for
/// complex ones. Everything a transform or a gradient rule needs from an
/// element is expressed here so tensor kernels can stay generic.
pub trait Scalar:
    Copy
    + Debug
    + Default
    + PartialEq
    + Send
    + Sync
    + 'static
    + Add<Output = Self>
    + Sub<Output = Self>
    + Mul<Output = Self>
    + Neg<Output = Self>
    + AddAssign
{
    /// Whether the type has no imaginary component.
    const IS_REAL: bool;

    /// Returns the additive identity (zero).
    fn zero() -> Self {
        Self::default()
    }

    /// Returns the multiplicative identity (one).
    fn one() -> Self;

    /// Embed a real number.
    fn from_real(value: f64) -> Self;

    /// Complex conjugate (identity for reals).
    fn conj(self) -> Self;

    /// Real part.
    fn re(self) -> f64;

    /// Multiply by a real factor.
    fn scale(self, factor: f64) -> Self;

    fn sin(self) -> Self;

    fn cos(self) -> Self;

    /// Widen to a complex number.
    fn to_c64(self) -> c64;
}

impl Scalar for f64 {
    const IS_REAL: bool = true;

    fn one() -> Self {
        1.0
    }

    fn from_real(value: f64) -> Self {
        value
    }

    fn conj(self) -> Self {
        self
    }

    fn re(self) -> f64 {
        self
    }

    fn scale(self, factor: f64) -> Self {
        self * factor
    }

    fn sin(self) -> Self {
        f64::sin(self)
    }

    fn cos(self) -> Self {
        f64::cos(self)
    }

    fn to_c64(self) -> c64 {
        c64::new(self, 0.0)
    }
}

impl Scalar for c64 {
    const IS_REAL: bool = false;

    fn one() -> Self {
        c64::new(1.0, 0.0)
    }

    fn from_real(value: f64) -> Self {
        c64::new(value, 0.0)
    }

    fn conj(self) -> Self {
        Complex::conj(&self)
    }

    fn re(self) -> f64 {
        self.re
    }

    fn scale(self, factor: f64) -> Self {
        c64::new(self.re * factor, self.im * factor)
    }

    fn sin(self) -> Self {
        Complex::sin(self)
    }

    fn cos(self) -> Self {
        Complex::cos(self)
    }

    fn to_c64(self) -> c64 {
        self
    }
}
