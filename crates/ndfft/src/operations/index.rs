//! Advanced indexing over leading axes.
//!
//! `select(t, [[i0, i1, ...], [j0, j1, ...]])` gathers the sub-tensors
//! `t[i0, j0, ..], t[i1, j1, ..], ...` into a new leading axis, the way
//! `t[(i0, i1, ...), (j0, j1, ...)]` does for NumPy arrays. [`scatter_add`]
//! is its transpose.

use crate::error::{FftError, Result};
use crate::scalar::Scalar;
use crate::tensor::Tensor;

/// Index positions for the leading `indices.len()` axes of a tensor.
///
/// All index lists must have the same length; that length becomes the first
/// axis of the selection.
fn validate(shape: &[usize], indices: &[Vec<usize>]) -> Result<usize> {
    if indices.is_empty() || indices.len() > shape.len() {
        return Err(FftError::InvalidOperation(format!(
            "cannot index {} leading axes of a rank-{} tensor",
            indices.len(),
            shape.len()
        )));
    }
    let count = indices[0].len();
    for (axis, list) in indices.iter().enumerate() {
        if list.len() != count {
            return Err(FftError::LengthMismatch {
                expected: count,
                actual: list.len(),
            });
        }
        if let Some(&index) = list.iter().find(|&&i| i >= shape[axis]) {
            return Err(FftError::IndexOutOfBounds {
                index,
                dim_size: shape[axis],
            });
        }
    }
    Ok(count)
}

/// Shape of `select(t, indices)` for a tensor of shape `shape`.
pub fn selection_shape(shape: &[usize], indices: &[Vec<usize>]) -> Result<Vec<usize>> {
    let count = validate(shape, indices)?;
    let mut out = vec![count];
    out.extend_from_slice(&shape[indices.len()..]);
    Ok(out)
}

/// Offset of the leading block addressed by position `p` of `indices`.
///
/// The leading axes are the fastest varying ones in column-major order, so
/// every trailing multi-index `r` maps to `offset + r_linear * block`.
fn leading_offset(shape: &[usize], indices: &[Vec<usize>], p: usize) -> usize {
    let mut offset = 0;
    let mut stride = 1;
    for (axis, list) in indices.iter().enumerate() {
        offset += list[p] * stride;
        stride *= shape[axis];
    }
    offset
}

pub fn select<T: Scalar>(tensor: &Tensor<T>, indices: &[Vec<usize>]) -> Result<Tensor<T>> {
    let shape = tensor.shape();
    let out_shape = selection_shape(shape, indices)?;
    let count = out_shape[0];
    let block: usize = shape[..indices.len()].iter().product();
    let trailing: usize = shape[indices.len()..].iter().product();

    let src = tensor.data();
    let mut data = Vec::with_capacity(count * trailing);
    for r in 0..trailing {
        for p in 0..count {
            data.push(src[leading_offset(shape, indices, p) + r * block]);
        }
    }
    Tensor::from_vec(data, &out_shape)
}

/// Accumulate `values` into a zero tensor of `shape` at the selected positions.
///
/// Positions selected more than once receive the sum of their values.
pub fn scatter_add<T: Scalar>(
    values: &Tensor<T>,
    indices: &[Vec<usize>],
    shape: &[usize],
) -> Result<Tensor<T>> {
    let expected = selection_shape(shape, indices)?;
    if values.shape() != expected.as_slice() {
        return Err(FftError::ShapeMismatch {
            expected,
            actual: values.shape().to_vec(),
        });
    }
    let count = expected[0];
    let block: usize = shape[..indices.len()].iter().product();
    let trailing: usize = shape[indices.len()..].iter().product();

    let mut out = Tensor::zeros(shape);
    let dst = out.data_mut();
    let src = values.data();
    for r in 0..trailing {
        for p in 0..count {
            dst[leading_offset(shape, indices, p) + r * block] += src[r * count + p];
        }
    }
    Ok(out)
}
