//! Adjoint of the zero-frequency shifts.
//!
//! Both shifts are permutations, so the adjoint is the inverse permutation:
//! a roll by the negated offsets along the same axes. Repeated axes are
//! fine here because their offsets simply add.

use crate::autodiff::{TrackedArray, tracked_roll};
use crate::error::Result;
use crate::operations::{fftshift_offsets, ifftshift_offsets};
use crate::transform::{TransformKind, TransformSpec};

/// Offsets applied by the forward shift `kind` on an input of `shape`.
pub fn forward_offsets(
    kind: TransformKind,
    shape: &[usize],
    axes: &[usize],
) -> Vec<(usize, isize)> {
    if kind == TransformKind::IfftShift {
        ifftshift_offsets(shape, axes)
    } else {
        fftshift_offsets(shape, axes)
    }
}

/// Negate every offset, keeping the axis.
pub fn negated(offsets: &[(usize, isize)]) -> Vec<(usize, isize)> {
    offsets.iter().map(|&(axis, shift)| (axis, -shift)).collect()
}

/// Gradient of a shift of kind `kind` resolved as `spec`.
pub fn shift_adjoint(
    kind: TransformKind,
    grad: &TrackedArray,
    spec: &TransformSpec,
) -> Result<TrackedArray> {
    let offsets = forward_offsets(kind, grad.shape(), &spec.axes);
    tracked_roll(grad, &negated(&offsets))
}
