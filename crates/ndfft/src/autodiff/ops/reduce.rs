//! Tracked reductions.

use super::{record, tracked_input};
use crate::autodiff::graph::{GradFn, NodeId};
use crate::autodiff::tensor::TrackedArray;
use crate::error::Result;
use crate::operations::elementwise as ew;

#[derive(Debug)]
struct SumBackward {
    input: NodeId,
    input_shape: Vec<usize>,
}

impl GradFn for SumBackward {
    fn backward(&self, grad_output: &TrackedArray) -> Result<Vec<(NodeId, TrackedArray)>> {
        Ok(vec![(
            self.input,
            tracked_broadcast(grad_output, &self.input_shape)?,
        )])
    }

    fn inputs(&self) -> Vec<NodeId> {
        vec![self.input]
    }

    fn name(&self) -> &'static str {
        "sum"
    }
}

/// Sum of all elements as a rank-0 array.
pub fn tracked_sum(x: &TrackedArray) -> Result<TrackedArray> {
    let value = ew::sum(x.value());
    Ok(match tracked_input(x) {
        Some(input) => record(
            value,
            SumBackward {
                input,
                input_shape: x.shape().to_vec(),
            },
        ),
        None => TrackedArray::new(value),
    })
}

#[derive(Debug)]
struct BroadcastBackward {
    input: NodeId,
    input_shape: Vec<usize>,
}

impl GradFn for BroadcastBackward {
    fn backward(&self, grad_output: &TrackedArray) -> Result<Vec<(NodeId, TrackedArray)>> {
        let total = tracked_sum(grad_output)?;
        let grad = if self.input_shape.is_empty() {
            total
        } else {
            tracked_broadcast(&total, &self.input_shape)?
        };
        Ok(vec![(self.input, grad)])
    }

    fn inputs(&self) -> Vec<NodeId> {
        vec![self.input]
    }

    fn name(&self) -> &'static str {
        "broadcast"
    }
}

/// Repeat the single element of `x` over `shape`.
pub fn tracked_broadcast(x: &TrackedArray, shape: &[usize]) -> Result<TrackedArray> {
    let value = ew::broadcast(x.value(), shape)?;
    Ok(match tracked_input(x) {
        Some(input) => record(
            value,
            BroadcastBackward {
                input,
                input_shape: x.shape().to_vec(),
            },
        ),
        None => TrackedArray::new(value),
    })
}
