//! Tracked operations.
//!
//! Every operation computes its value eagerly and, when recording is enabled
//! and an input requires gradient, registers a backward function in the
//! thread-local graph. Backward functions are written in terms of these same
//! operations, which is what makes gradients differentiable.
//!
//! Gradients always carry the element type of the value they belong to: a
//! real input receives a real gradient even when the operation's output is
//! complex.

mod elementwise;
mod index;
mod reduce;
mod resize;
mod shift;
mod transform;

use std::rc::Rc;

pub use elementwise::{
    tracked_add, tracked_conj, tracked_cos, tracked_mul, tracked_real, tracked_scale,
    tracked_scale_along_axis, tracked_sin, tracked_to_complex,
};
pub use index::{tracked_scatter_add, tracked_select};
pub use reduce::{tracked_broadcast, tracked_sum};
pub use resize::tracked_resize;
pub use shift::tracked_roll;
pub use transform::{
    TransformBackward, tracked_fft, tracked_fft2, tracked_fftn, tracked_fftshift, tracked_ifft,
    tracked_ifft2, tracked_ifftn, tracked_ifftshift, tracked_irfft, tracked_irfft2,
    tracked_irfftn, tracked_rfft, tracked_rfft2, tracked_rfftn, tracked_transform,
};

use super::graph::{GradFn, NodeId, with_graph};
use super::no_grad::is_grad_enabled;
use super::tensor::TrackedArray;
use crate::array::{Array, DType};
use crate::error::Result;

/// Node of `x` if a new operation on it should be recorded.
pub(crate) fn tracked_input(x: &TrackedArray) -> Option<NodeId> {
    if is_grad_enabled() { x.node_id() } else { None }
}

/// Register `grad_fn` as the producer of `value`.
pub(crate) fn record(value: Array, grad_fn: impl GradFn + 'static) -> TrackedArray {
    let node = with_graph(|g| g.create_node(Rc::new(grad_fn)));
    TrackedArray::from_value_with_node(value, node)
}

/// Convert a gradient to the element type of the value it belongs to.
///
/// Narrowing keeps the real part, which is the gradient with respect to a
/// real input that was used as a complex number.
pub(crate) fn cast_like(grad: &TrackedArray, dtype: DType) -> Result<TrackedArray> {
    match (grad.dtype(), dtype) {
        (DType::Complex, DType::Real) => tracked_real(grad),
        (DType::Real, DType::Complex) => tracked_to_complex(grad),
        _ => Ok(grad.clone()),
    }
}
