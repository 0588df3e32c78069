//! Tracked crop/zero-pad.

use super::{record, tracked_input};
use crate::array::map_array;
use crate::autodiff::graph::{GradFn, NodeId};
use crate::autodiff::tensor::TrackedArray;
use crate::error::Result;
use crate::operations::resize;

/// Cropping and padding are each other's transpose, so the gradient is the
/// output gradient resized back to the input shape.
#[derive(Debug)]
struct ResizeBackward {
    input: NodeId,
    input_shape: Vec<usize>,
}

impl GradFn for ResizeBackward {
    fn backward(&self, grad_output: &TrackedArray) -> Result<Vec<(NodeId, TrackedArray)>> {
        Ok(vec![(
            self.input,
            tracked_resize(grad_output, &self.input_shape)?,
        )])
    }

    fn inputs(&self) -> Vec<NodeId> {
        vec![self.input]
    }

    fn name(&self) -> &'static str {
        "resize"
    }
}

/// Resize `x` to `shape`, keeping the leading corner of every axis.
pub fn tracked_resize(x: &TrackedArray, shape: &[usize]) -> Result<TrackedArray> {
    if x.shape() == shape {
        return Ok(x.clone());
    }
    let value = map_array!(x.value(), t => resize(t, shape)?);
    Ok(match tracked_input(x) {
        Some(input) => record(
            value,
            ResizeBackward {
                input,
                input_shape: x.shape().to_vec(),
            },
        ),
        None => TrackedArray::new(value),
    })
}
