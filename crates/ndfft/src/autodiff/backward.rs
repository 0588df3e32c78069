//! Backward pass execution for reverse-mode automatic differentiation.

use tracing::debug;

use super::gradients::Gradients;
use super::graph::with_graph;
use super::no_grad::NoGradGuard;
use super::tensor::TrackedArray;
use crate::array::DType;
use crate::error::{FftError, Result};
use crate::tensor::Tensor;

/// Options controlling a backward pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BackwardOptions {
    /// Record the backward pass itself, making the returned gradients
    /// differentiable.
    pub create_graph: bool,
}

impl BackwardOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn create_graph(mut self, create_graph: bool) -> Self {
        self.create_graph = create_graph;
        self
    }
}

/// Execute backward pass from a scalar loss.
///
/// Computes gradients for all leaf nodes that require_grad.
///
/// # Errors
/// Returns error if:
/// - Loss is not a scalar (len != 1)
/// - Loss is complex
/// - Loss is not in the computation graph
///
/// # Example
///
/// ```
/// use ndfft::{Array, Normalization};
/// use ndfft::autodiff::{
///     TrackedArray, backward, clear_graph, tracked_fft, tracked_real, tracked_sum,
/// };
///
/// clear_graph();
/// let x = TrackedArray::leaf(Array::real(vec![1.0, 0.0, 0.0, 0.0], &[4]).unwrap());
/// let y = tracked_fft(&x, None, None, Normalization::Unnormalized).unwrap();
/// let loss = tracked_sum(&tracked_real(&y).unwrap()).unwrap();
///
/// let grads = backward(&loss).unwrap();
/// let grad_x = grads.wrt(&x).unwrap();
/// assert_eq!(grad_x.shape(), &[4]);
/// ```
pub fn backward(loss: &TrackedArray) -> Result<Gradients> {
    backward_with(loss, BackwardOptions::default())
}

/// Execute backward pass with explicit options.
///
/// With `create_graph` set, every backward function runs through tracked
/// operations that register new nodes, so a second call to
/// [`backward`] on a loss built from the returned gradients yields second
/// derivatives.
pub fn backward_with(loss: &TrackedArray, options: BackwardOptions) -> Result<Gradients> {
    if loss.len() != 1 {
        return Err(FftError::InvalidOperation(format!(
            "backward() requires scalar loss, got {} elements",
            loss.len()
        )));
    }
    if loss.dtype() != DType::Real {
        return Err(FftError::InvalidOperation(
            "backward() requires a real loss".to_string(),
        ));
    }
    let loss_node_id = loss.node_id().ok_or_else(|| {
        FftError::InvalidOperation(
            "backward() called on array not in computation graph".to_string(),
        )
    })?;

    let _guard = (!options.create_graph).then(NoGradGuard::new);

    let topo_order = with_graph(|graph| graph.topological_order(loss_node_id))?;
    debug!(
        nodes = topo_order.len(),
        create_graph = options.create_graph,
        "backward pass"
    );

    let mut gradients = Gradients::new();
    let seed = TrackedArray::new(Tensor::<f64>::ones(loss.shape()));
    gradients.accumulate(loss_node_id, seed)?;

    for node_id in topo_order {
        let Some(grad_output) = gradients.remove(node_id) else {
            continue;
        };
        // The handle is cloned out so the graph is not borrowed while the
        // backward function records new nodes.
        match with_graph(|graph| graph.grad_fn_handle(node_id)) {
            Some(grad_fn) => {
                for (input_id, input_grad) in grad_fn.backward(&grad_output)? {
                    gradients.accumulate(input_id, input_grad)?;
                }
            }
            None => gradients.accumulate(node_id, grad_output)?,
        }
    }

    Ok(gradients)
}
