//! Tracked circular shift.

use super::{record, tracked_input};
use crate::array::map_array;
use crate::autodiff::graph::{GradFn, NodeId};
use crate::autodiff::tensor::TrackedArray;
use crate::error::Result;
use crate::operations::roll;

#[derive(Debug)]
struct RollBackward {
    input: NodeId,
    shifts: Vec<(usize, isize)>,
}

impl GradFn for RollBackward {
    fn backward(&self, grad_output: &TrackedArray) -> Result<Vec<(NodeId, TrackedArray)>> {
        let undo: Vec<(usize, isize)> = self.shifts.iter().map(|&(a, s)| (a, -s)).collect();
        Ok(vec![(self.input, tracked_roll(grad_output, &undo)?)])
    }

    fn inputs(&self) -> Vec<NodeId> {
        vec![self.input]
    }

    fn name(&self) -> &'static str {
        "roll"
    }
}

/// Roll `x` by signed offsets, one `(axis, shift)` pair at a time.
pub fn tracked_roll(x: &TrackedArray, shifts: &[(usize, isize)]) -> Result<TrackedArray> {
    let value = map_array!(x.value(), t => roll(t, shifts)?);
    Ok(match tracked_input(x) {
        Some(input) => record(
            value,
            RollBackward {
                input,
                shifts: shifts.to_vec(),
            },
        ),
        None => TrackedArray::new(value),
    })
}
