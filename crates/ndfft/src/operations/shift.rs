//! Circular shifts along axes.

use crate::error::{FftError, Result};
use crate::scalar::Scalar;
use crate::strides::{cartesian_to_linear, linear_to_cartesian};
use crate::tensor::Tensor;

/// Roll `tensor` circularly: element `i` along `axis` moves to `i + shift`.
///
/// `shifts` pairs an axis with a signed offset. An axis may appear more than
/// once, in which case the offsets add up.
pub fn roll<T: Scalar>(tensor: &Tensor<T>, shifts: &[(usize, isize)]) -> Result<Tensor<T>> {
    let shape = tensor.shape();
    let mut total = vec![0isize; shape.len()];
    for &(axis, shift) in shifts {
        let slot = total.get_mut(axis).ok_or(FftError::AxisOutOfRange {
            axis: axis as isize,
            ndim: shape.len(),
        })?;
        *slot += shift;
    }
    if total.iter().all(|&s| s == 0) || tensor.is_empty() {
        return Ok(tensor.clone());
    }

    let offsets: Vec<usize> = total
        .iter()
        .zip(shape)
        .map(|(&s, &n)| s.rem_euclid(n as isize) as usize)
        .collect();

    let mut out = Tensor::zeros(shape);
    let strides = out.strides().to_vec();
    for (linear, &value) in tensor.data().iter().enumerate() {
        let mut idx = linear_to_cartesian(linear, shape);
        for ((i, &off), &n) in idx.iter_mut().zip(&offsets).zip(shape) {
            *i = (*i + off) % n;
        }
        out.data_mut()[cartesian_to_linear(&idx, &strides)] = value;
    }
    Ok(out)
}

/// Offsets that move the zero-frequency bin to the centre of each axis.
pub fn fftshift_offsets(shape: &[usize], axes: &[usize]) -> Vec<(usize, isize)> {
    axes.iter()
        .map(|&axis| (axis, (shape[axis] / 2) as isize))
        .collect()
}

/// Offsets undoing [`fftshift_offsets`].
pub fn ifftshift_offsets(shape: &[usize], axes: &[usize]) -> Vec<(usize, isize)> {
    axes.iter()
        .map(|&axis| (axis, -((shape[axis] / 2) as isize)))
        .collect()
}
