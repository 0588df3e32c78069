//! Tracked gather/scatter over leading axes.

use super::{record, tracked_input};
use crate::array::map_array;
use crate::autodiff::graph::{GradFn, NodeId};
use crate::autodiff::tensor::TrackedArray;
use crate::error::Result;
use crate::operations::{scatter_add, select};

#[derive(Debug)]
struct SelectBackward {
    input: NodeId,
    input_shape: Vec<usize>,
    indices: Vec<Vec<usize>>,
}

impl GradFn for SelectBackward {
    fn backward(&self, grad_output: &TrackedArray) -> Result<Vec<(NodeId, TrackedArray)>> {
        let grad = tracked_scatter_add(grad_output, &self.indices, &self.input_shape)?;
        Ok(vec![(self.input, grad)])
    }

    fn inputs(&self) -> Vec<NodeId> {
        vec![self.input]
    }

    fn name(&self) -> &'static str {
        "select"
    }
}

/// Gather `x[indices[0][p], indices[1][p], ..]` for every position `p`.
///
/// # Examples
///
/// ```
/// use ndfft::Array;
/// use ndfft::autodiff::{TrackedArray, tracked_select};
///
/// let x = TrackedArray::new(Array::real((0..8).map(f64::from).collect(), &[2, 2, 2]).unwrap());
/// let picked = tracked_select(&x, &[vec![0, 1], vec![1, 0], vec![0, 1]]).unwrap();
/// assert_eq!(picked.value().as_real().unwrap().data(), &[2.0, 5.0]);
/// ```
pub fn tracked_select(x: &TrackedArray, indices: &[Vec<usize>]) -> Result<TrackedArray> {
    let value = map_array!(x.value(), t => select(t, indices)?);
    Ok(match tracked_input(x) {
        Some(input) => record(
            value,
            SelectBackward {
                input,
                input_shape: x.shape().to_vec(),
                indices: indices.to_vec(),
            },
        ),
        None => TrackedArray::new(value),
    })
}

#[derive(Debug)]
struct ScatterAddBackward {
    input: NodeId,
    indices: Vec<Vec<usize>>,
}

impl GradFn for ScatterAddBackward {
    fn backward(&self, grad_output: &TrackedArray) -> Result<Vec<(NodeId, TrackedArray)>> {
        Ok(vec![(self.input, tracked_select(grad_output, &self.indices)?)])
    }

    fn inputs(&self) -> Vec<NodeId> {
        vec![self.input]
    }

    fn name(&self) -> &'static str {
        "scatter_add"
    }
}

/// Transpose of [`tracked_select`]: accumulate `x` into zeros of `shape`.
pub fn tracked_scatter_add(
    x: &TrackedArray,
    indices: &[Vec<usize>],
    shape: &[usize],
) -> Result<TrackedArray> {
    let value = map_array!(x.value(), t => scatter_add(t, indices, shape)?);
    Ok(match tracked_input(x) {
        Some(input) => record(
            value,
            ScatterAddBackward {
                input,
                indices: indices.to_vec(),
            },
        ),
        None => TrackedArray::new(value),
    })
}
