//! Tracked element-wise operations.
//!
//! Gradient convention: for a real loss `L` and a complex value `z = x + iy`
//! the gradient is `dL/dx + i dL/dy`. For a holomorphic map `w = f(z)` this
//! gives `grad_z = conj(f'(z)) * grad_w`.

use super::{cast_like, record, tracked_input};
use crate::array::{Array, DType};
use crate::autodiff::graph::{GradFn, NodeId};
use crate::autodiff::no_grad::is_grad_enabled;
use crate::autodiff::tensor::TrackedArray;
use crate::error::Result;
use crate::operations::elementwise as ew;

/// Backward function for `a + b`.
#[derive(Debug)]
struct AddBackward {
    lhs: Option<(NodeId, DType)>,
    rhs: Option<(NodeId, DType)>,
}

impl GradFn for AddBackward {
    fn backward(&self, grad_output: &TrackedArray) -> Result<Vec<(NodeId, TrackedArray)>> {
        let mut grads = Vec::with_capacity(2);
        for (id, dtype) in self.lhs.iter().chain(self.rhs.iter()) {
            grads.push((*id, cast_like(grad_output, *dtype)?));
        }
        Ok(grads)
    }

    fn inputs(&self) -> Vec<NodeId> {
        self.lhs.iter().chain(self.rhs.iter()).map(|&(id, _)| id).collect()
    }

    fn name(&self) -> &'static str {
        "add"
    }
}

/// Element-wise sum, promoting to complex if either side is complex.
pub fn tracked_add(a: &TrackedArray, b: &TrackedArray) -> Result<TrackedArray> {
    let value = ew::add(a.value(), b.value())?;
    let lhs = tracked_input(a).map(|id| (id, a.dtype()));
    let rhs = tracked_input(b).map(|id| (id, b.dtype()));
    if lhs.is_none() && rhs.is_none() {
        return Ok(TrackedArray::new(value));
    }
    Ok(record(value, AddBackward { lhs, rhs }))
}

/// Backward function for `a * b`.
///
/// Both operands are kept as tracked arrays so that the product rule stays
/// connected to them when the backward pass is recorded.
#[derive(Debug)]
struct MulBackward {
    lhs: TrackedArray,
    rhs: TrackedArray,
}

impl GradFn for MulBackward {
    fn backward(&self, grad_output: &TrackedArray) -> Result<Vec<(NodeId, TrackedArray)>> {
        let mut grads = Vec::with_capacity(2);
        if let Some(id) = self.lhs.node_id() {
            let g = tracked_mul(grad_output, &tracked_conj(&self.rhs)?)?;
            grads.push((id, cast_like(&g, self.lhs.dtype())?));
        }
        if let Some(id) = self.rhs.node_id() {
            let g = tracked_mul(grad_output, &tracked_conj(&self.lhs)?)?;
            grads.push((id, cast_like(&g, self.rhs.dtype())?));
        }
        Ok(grads)
    }

    fn inputs(&self) -> Vec<NodeId> {
        self.lhs.node_id().into_iter().chain(self.rhs.node_id()).collect()
    }

    fn name(&self) -> &'static str {
        "mul"
    }
}

/// Element-wise product, promoting to complex if either side is complex.
pub fn tracked_mul(a: &TrackedArray, b: &TrackedArray) -> Result<TrackedArray> {
    let value = ew::mul(a.value(), b.value())?;
    if !is_grad_enabled() || (!a.requires_grad() && !b.requires_grad()) {
        return Ok(TrackedArray::new(value));
    }
    Ok(record(
        value,
        MulBackward {
            lhs: a.clone(),
            rhs: b.clone(),
        },
    ))
}

/// Backward functions whose gradient is a fixed linear map of `grad_output`.
#[derive(Debug)]
enum LinearBackward {
    Conj { input: NodeId },
    Real { input: NodeId },
    ToComplex { input: NodeId },
    Scale { input: NodeId, factor: f64 },
    ScaleAlongAxis {
        input: NodeId,
        axis: usize,
        weights: Vec<f64>,
    },
}

impl GradFn for LinearBackward {
    fn backward(&self, grad_output: &TrackedArray) -> Result<Vec<(NodeId, TrackedArray)>> {
        let grad = match self {
            LinearBackward::Conj { .. } => tracked_conj(grad_output)?,
            LinearBackward::Real { .. } => tracked_to_complex(grad_output)?,
            LinearBackward::ToComplex { .. } => tracked_real(grad_output)?,
            LinearBackward::Scale { factor, .. } => tracked_scale(grad_output, *factor)?,
            LinearBackward::ScaleAlongAxis { axis, weights, .. } => {
                tracked_scale_along_axis(grad_output, *axis, weights)?
            }
        };
        Ok(vec![(self.input(), grad)])
    }

    fn inputs(&self) -> Vec<NodeId> {
        vec![self.input()]
    }

    fn name(&self) -> &'static str {
        match self {
            LinearBackward::Conj { .. } => "conj",
            LinearBackward::Real { .. } => "real",
            LinearBackward::ToComplex { .. } => "to_complex",
            LinearBackward::Scale { .. } => "scale",
            LinearBackward::ScaleAlongAxis { .. } => "scale_along_axis",
        }
    }
}

impl LinearBackward {
    fn input(&self) -> NodeId {
        match self {
            LinearBackward::Conj { input }
            | LinearBackward::Real { input }
            | LinearBackward::ToComplex { input }
            | LinearBackward::Scale { input, .. }
            | LinearBackward::ScaleAlongAxis { input, .. } => *input,
        }
    }
}

fn unary(
    x: &TrackedArray,
    value: Array,
    grad_fn: impl FnOnce(NodeId) -> LinearBackward,
) -> TrackedArray {
    match tracked_input(x) {
        Some(id) => record(value, grad_fn(id)),
        None => TrackedArray::new(value),
    }
}

/// Complex conjugate. Real arrays pass through unchanged.
pub fn tracked_conj(x: &TrackedArray) -> Result<TrackedArray> {
    if x.dtype() == DType::Real {
        return Ok(x.clone());
    }
    Ok(unary(x, ew::conj(x.value()), |input| LinearBackward::Conj {
        input,
    }))
}

/// Real part. Real arrays pass through unchanged.
pub fn tracked_real(x: &TrackedArray) -> Result<TrackedArray> {
    if x.dtype() == DType::Real {
        return Ok(x.clone());
    }
    let value = ew::cast(x.value(), DType::Real);
    Ok(unary(x, value, |input| LinearBackward::Real { input }))
}

/// Widen a real array to complex. Complex arrays pass through unchanged.
pub fn tracked_to_complex(x: &TrackedArray) -> Result<TrackedArray> {
    if x.dtype() == DType::Complex {
        return Ok(x.clone());
    }
    let value = ew::cast(x.value(), DType::Complex);
    Ok(unary(x, value, |input| LinearBackward::ToComplex { input }))
}

/// Multiply by a real constant.
pub fn tracked_scale(x: &TrackedArray, factor: f64) -> Result<TrackedArray> {
    let value = ew::scale(x.value(), factor);
    Ok(unary(x, value, |input| LinearBackward::Scale { input, factor }))
}

/// Multiply slice `j` along `axis` by the real constant `weights[j]`.
pub fn tracked_scale_along_axis(
    x: &TrackedArray,
    axis: usize,
    weights: &[f64],
) -> Result<TrackedArray> {
    let value = ew::scale_along_axis(x.value(), axis, weights)?;
    Ok(unary(x, value, |input| LinearBackward::ScaleAlongAxis {
        input,
        axis,
        weights: weights.to_vec(),
    }))
}

#[derive(Debug)]
enum Trig {
    Sin,
    Cos,
}

/// Backward function for `sin(x)` and `cos(x)`.
#[derive(Debug)]
struct TrigBackward {
    op: Trig,
    input: TrackedArray,
}

impl GradFn for TrigBackward {
    fn backward(&self, grad_output: &TrackedArray) -> Result<Vec<(NodeId, TrackedArray)>> {
        let Some(id) = self.input.node_id() else {
            return Ok(Vec::new());
        };
        // d sin = cos, d cos = -sin
        let derivative = match self.op {
            Trig::Sin => tracked_cos(&self.input)?,
            Trig::Cos => tracked_scale(&tracked_sin(&self.input)?, -1.0)?,
        };
        let grad = tracked_mul(grad_output, &tracked_conj(&derivative)?)?;
        Ok(vec![(id, cast_like(&grad, self.input.dtype())?)])
    }

    fn inputs(&self) -> Vec<NodeId> {
        self.input.node_id().into_iter().collect()
    }

    fn name(&self) -> &'static str {
        match self.op {
            Trig::Sin => "sin",
            Trig::Cos => "cos",
        }
    }
}

fn trig(x: &TrackedArray, op: Trig, value: Array) -> TrackedArray {
    if tracked_input(x).is_none() {
        return TrackedArray::new(value);
    }
    record(
        value,
        TrigBackward {
            op,
            input: x.clone(),
        },
    )
}

pub fn tracked_sin(x: &TrackedArray) -> Result<TrackedArray> {
    Ok(trig(x, Trig::Sin, ew::sin(x.value())))
}

pub fn tracked_cos(x: &TrackedArray) -> Result<TrackedArray> {
    Ok(trig(x, Trig::Cos, ew::cos(x.value())))
}
