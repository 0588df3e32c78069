//! Adjoint of the crop/zero-pad step applied before a transform.
//!
//! The kernel resizes every transformed axis to its requested length before
//! transforming. Cropping and zero-padding the leading corner are transposes
//! of each other, so the gradient is brought back to the input's shape by
//! the same operation in the other direction.

use crate::autodiff::{TrackedArray, tracked_resize};
use crate::error::Result;

/// Bring `grad` back to `input_shape`, zero-filling cropped entries and
/// discarding padded ones.
pub fn adjoint_resize(grad: &TrackedArray, input_shape: &[usize]) -> Result<TrackedArray> {
    tracked_resize(grad, input_shape)
}
