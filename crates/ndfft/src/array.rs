//! Type-erased real or complex array.
//!
//! Transforms move values between the real and complex domains (`rfft`
//! consumes reals and produces complex bins, `irfft` does the reverse), so the
//! differentiation graph stores values as an [`Array`] rather than a tensor of
//! one fixed element type.

use std::fmt;

use crate::error::{FftError, Result};
use crate::scalar::c64;
use crate::tensor::Tensor;

/// Element type of an [`Array`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DType {
    Real,
    Complex,
}

impl DType {
    pub fn name(self) -> &'static str {
        match self {
            DType::Real => "real",
            DType::Complex => "complex",
        }
    }

    /// The type both operands of a binary operation are promoted to.
    pub fn promote(self, other: DType) -> DType {
        if self == DType::Real && other == DType::Real {
            DType::Real
        } else {
            DType::Complex
        }
    }
}

impl fmt::Display for DType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// An n-dimensional array of either `f64` or [`c64`] elements.
#[derive(Debug, Clone, PartialEq)]
pub enum Array {
    Real(Tensor<f64>),
    Complex(Tensor<c64>),
}

/// Apply a type-generic expression to the tensor inside an [`Array`],
/// rewrapping the result in the same variant.
macro_rules! map_array {
    ($array:expr, $t:ident => $body:expr) => {
        match $array {
            $crate::array::Array::Real($t) => $crate::array::Array::Real($body),
            $crate::array::Array::Complex($t) => $crate::array::Array::Complex($body),
        }
    };
}
pub(crate) use map_array;

impl Array {
    /// Real array from column-major data.
    pub fn real(data: Vec<f64>, shape: &[usize]) -> Result<Self> {
        Ok(Array::Real(Tensor::from_vec(data, shape)?))
    }

    /// Complex array from column-major data.
    pub fn complex(data: Vec<c64>, shape: &[usize]) -> Result<Self> {
        Ok(Array::Complex(Tensor::from_vec(data, shape)?))
    }

    pub fn zeros(shape: &[usize], dtype: DType) -> Self {
        match dtype {
            DType::Real => Array::Real(Tensor::zeros(shape)),
            DType::Complex => Array::Complex(Tensor::zeros(shape)),
        }
    }

    pub fn dtype(&self) -> DType {
        match self {
            Array::Real(_) => DType::Real,
            Array::Complex(_) => DType::Complex,
        }
    }

    pub fn is_real(&self) -> bool {
        self.dtype() == DType::Real
    }

    pub fn shape(&self) -> &[usize] {
        match self {
            Array::Real(t) => t.shape(),
            Array::Complex(t) => t.shape(),
        }
    }

    pub fn ndim(&self) -> usize {
        self.shape().len()
    }

    pub fn len(&self) -> usize {
        match self {
            Array::Real(t) => t.len(),
            Array::Complex(t) => t.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn as_real(&self) -> Option<&Tensor<f64>> {
        match self {
            Array::Real(t) => Some(t),
            Array::Complex(_) => None,
        }
    }

    pub fn as_complex(&self) -> Option<&Tensor<c64>> {
        match self {
            Array::Complex(t) => Some(t),
            Array::Real(_) => None,
        }
    }

    /// Borrow the real tensor or fail with a dtype error naming `operation`.
    pub fn expect_real(&self, operation: &'static str) -> Result<&Tensor<f64>> {
        self.as_real().ok_or(FftError::DTypeMismatch {
            operation,
            expected: DType::Real.name(),
            actual: self.dtype().name(),
        })
    }

    /// Complex copy of the data, widening reals.
    pub fn to_complex(&self) -> Tensor<c64> {
        match self {
            Array::Real(t) => t.map(|x| c64::new(x, 0.0)),
            Array::Complex(t) => t.clone(),
        }
    }

    /// Real part of the data.
    pub fn real_part(&self) -> Tensor<f64> {
        match self {
            Array::Real(t) => t.clone(),
            Array::Complex(t) => t.map(|z| z.re),
        }
    }

    /// Convert to `dtype`, dropping imaginary parts when narrowing.
    pub fn cast(&self, dtype: DType) -> Array {
        match dtype {
            DType::Real => Array::Real(self.real_part()),
            DType::Complex => Array::Complex(self.to_complex()),
        }
    }

    /// Every element widened to complex, in column-major order.
    pub fn complex_values(&self) -> Vec<c64> {
        match self {
            Array::Real(t) => t.data().iter().map(|&x| c64::new(x, 0.0)).collect(),
            Array::Complex(t) => t.data().to_vec(),
        }
    }

    /// Value of a one-element real array.
    pub fn scalar_value(&self) -> Result<f64> {
        let t = self.expect_real("scalar_value")?;
        if t.len() != 1 {
            return Err(FftError::LengthMismatch {
                expected: 1,
                actual: t.len(),
            });
        }
        Ok(t.data()[0])
    }
}

impl From<Tensor<f64>> for Array {
    fn from(t: Tensor<f64>) -> Self {
        Array::Real(t)
    }
}

impl From<Tensor<c64>> for Array {
    fn from(t: Tensor<c64>) -> Self {
        Array::Complex(t)
    }
}
