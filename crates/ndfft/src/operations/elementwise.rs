//! Element-wise arithmetic on [`Array`] values.
//!
//! Binary operations promote a real operand to complex when the other one
//! is complex.

use crate::array::{Array, DType, map_array};
use crate::error::{FftError, Result};
use crate::scalar::{Scalar, c64};
use crate::strides::AxisLanes;
use crate::tensor::Tensor;

fn binary(
    a: &Array,
    b: &Array,
    real: impl Fn(f64, f64) -> f64,
    complex: impl Fn(c64, c64) -> c64,
) -> Result<Array> {
    match (a, b) {
        (Array::Real(x), Array::Real(y)) => Ok(Array::Real(x.zip_map(y, real)?)),
        _ => Ok(Array::Complex(
            a.to_complex().zip_map(&b.to_complex(), complex)?,
        )),
    }
}

pub fn add(a: &Array, b: &Array) -> Result<Array> {
    binary(a, b, |x, y| x + y, |x, y| x + y)
}

pub fn mul(a: &Array, b: &Array) -> Result<Array> {
    binary(a, b, |x, y| x * y, |x, y| x * y)
}

pub fn conj(a: &Array) -> Array {
    map_array!(a, t => t.map(Scalar::conj))
}

pub fn sin(a: &Array) -> Array {
    map_array!(a, t => t.map(Scalar::sin))
}

pub fn cos(a: &Array) -> Array {
    map_array!(a, t => t.map(Scalar::cos))
}

/// Multiply every element by a real factor.
pub fn scale(a: &Array, factor: f64) -> Array {
    map_array!(a, t => t.map(|x| x.scale(factor)))
}

/// Multiply the `j`-th slice along `axis` by `weights[j]`.
pub fn scale_along_axis(a: &Array, axis: usize, weights: &[f64]) -> Result<Array> {
    fn apply<T: Scalar>(t: &Tensor<T>, axis: usize, weights: &[f64]) -> Result<Tensor<T>> {
        if axis >= t.ndim() {
            return Err(FftError::AxisOutOfRange {
                axis: axis as isize,
                ndim: t.ndim(),
            });
        }
        if t.shape()[axis] != weights.len() {
            return Err(FftError::LengthMismatch {
                expected: t.shape()[axis],
                actual: weights.len(),
            });
        }
        let lanes = AxisLanes::new(t.shape(), axis);
        let mut out = t.clone();
        let data = out.data_mut();
        for base in lanes.bases() {
            for (j, &w) in weights.iter().enumerate() {
                let k = base + j * lanes.stride;
                data[k] = data[k].scale(w);
            }
        }
        Ok(out)
    }
    Ok(map_array!(a, t => apply(t, axis, weights)?))
}

/// Sum of all elements as a rank-0 array.
pub fn sum(a: &Array) -> Array {
    fn total<T: Scalar>(t: &Tensor<T>) -> T {
        let mut acc = T::zero();
        for &x in t.data() {
            acc += x;
        }
        acc
    }
    map_array!(a, t => Tensor::scalar(total(t)))
}

/// Repeat the single element of `a` over `shape`.
pub fn broadcast(a: &Array, shape: &[usize]) -> Result<Array> {
    if a.len() != 1 {
        return Err(FftError::LengthMismatch {
            expected: 1,
            actual: a.len(),
        });
    }
    Ok(map_array!(a, t => Tensor::filled(shape, t.data()[0])))
}

/// Zero array with the shape and element type of `a`.
pub fn zeros_like(a: &Array) -> Array {
    Array::zeros(a.shape(), a.dtype())
}

/// Convert to `dtype` (real part when narrowing).
pub fn cast(a: &Array, dtype: DType) -> Array {
    if a.dtype() == dtype {
        a.clone()
    } else {
        a.cast(dtype)
    }
}
