//! Crop or zero-pad a tensor to a new shape.
//!
//! The leading corner `[0, min(old, new))` of every axis is kept. Cropping an
//! axis and padding it back are transposes of each other, which is what the
//! gradient of a size-adapted transform relies on.

use crate::error::{FftError, Result};
use crate::scalar::Scalar;
use crate::strides::{cartesian_to_linear, linear_to_cartesian};
use crate::tensor::Tensor;

/// Resize `tensor` to `shape`, cropping or padding with zeros per axis.
///
/// # Examples
///
/// ```
/// use ndfft::Tensor;
/// use ndfft::operations::resize;
///
/// let t = Tensor::from_vec(vec![1.0, 2.0, 3.0], &[3]).unwrap();
/// assert_eq!(resize(&t, &[2]).unwrap().data(), &[1.0, 2.0]);
/// assert_eq!(resize(&t, &[5]).unwrap().data(), &[1.0, 2.0, 3.0, 0.0, 0.0]);
/// ```
pub fn resize<T: Scalar>(tensor: &Tensor<T>, shape: &[usize]) -> Result<Tensor<T>> {
    if shape.len() != tensor.ndim() {
        return Err(FftError::ShapeMismatch {
            expected: tensor.shape().to_vec(),
            actual: shape.to_vec(),
        });
    }
    if shape == tensor.shape() {
        return Ok(tensor.clone());
    }

    let mut out = Tensor::zeros(shape);
    let src_shape = tensor.shape();
    let src_strides = tensor.strides();
    let src = tensor.data();
    for (linear, value) in out.data_mut().iter_mut().enumerate() {
        let idx = linear_to_cartesian(linear, shape);
        if idx.iter().zip(src_shape).all(|(&i, &n)| i < n) {
            *value = src[cartesian_to_linear(&idx, src_strides)];
        }
    }
    Ok(out)
}

/// Resize a single axis to length `n`, leaving the others untouched.
pub fn resize_axis<T: Scalar>(tensor: &Tensor<T>, axis: usize, n: usize) -> Result<Tensor<T>> {
    let mut shape = tensor.shape().to_vec();
    let Some(dim) = shape.get_mut(axis) else {
        return Err(FftError::AxisOutOfRange {
            axis: axis as isize,
            ndim: tensor.ndim(),
        });
    };
    *dim = n;
    resize(tensor, &shape)
}
