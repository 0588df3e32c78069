//! TrackedArray - array with gradient tracking for automatic differentiation.

use std::rc::Rc;

use super::graph::{NodeId, with_graph};
use crate::array::{Array, DType};
use crate::scalar::c64;
use crate::tensor::Tensor;

/// An array that may participate in the computation graph.
///
/// The value is shared, never mutated, so cloning a tracked array is cheap
/// and every clone refers to the same graph node.
///
/// # Example
///
/// ```
/// use ndfft::Array;
/// use ndfft::autodiff::{TrackedArray, clear_graph};
///
/// clear_graph();
/// let x = TrackedArray::leaf(Array::real(vec![1.0, 2.0], &[2]).unwrap());
/// assert!(x.requires_grad());
///
/// let c = TrackedArray::new(Array::real(vec![1.0, 2.0], &[2]).unwrap());
/// assert!(!c.requires_grad());
/// ```
#[derive(Debug, Clone)]
pub struct TrackedArray {
    value: Rc<Array>,
    node: Option<NodeId>,
}

impl TrackedArray {
    /// Create a constant that does not require gradient.
    pub fn new(value: impl Into<Array>) -> Self {
        Self {
            value: Rc::new(value.into()),
            node: None,
        }
    }

    /// Create a leaf that requires gradient.
    ///
    /// Registers in the thread-local computation graph.
    pub fn leaf(value: impl Into<Array>) -> Self {
        let node = with_graph(|g| g.create_leaf());
        Self {
            value: Rc::new(value.into()),
            node: Some(node),
        }
    }

    /// Create from a value and the node that produced it (used by tracked ops).
    pub fn from_value_with_node(value: Array, node: NodeId) -> Self {
        Self {
            value: Rc::new(value),
            node: Some(node),
        }
    }

    pub fn value(&self) -> &Array {
        &self.value
    }

    pub fn node_id(&self) -> Option<NodeId> {
        self.node
    }

    pub fn requires_grad(&self) -> bool {
        self.node.is_some()
    }

    pub fn shape(&self) -> &[usize] {
        self.value.shape()
    }

    pub fn ndim(&self) -> usize {
        self.value.ndim()
    }

    pub fn len(&self) -> usize {
        self.value.len()
    }

    pub fn is_empty(&self) -> bool {
        self.value.is_empty()
    }

    pub fn dtype(&self) -> DType {
        self.value.dtype()
    }

    /// Detach from the computation graph, sharing the value.
    pub fn detach(&self) -> Self {
        Self {
            value: Rc::clone(&self.value),
            node: None,
        }
    }
}

impl From<Tensor<f64>> for TrackedArray {
    fn from(t: Tensor<f64>) -> Self {
        TrackedArray::new(t)
    }
}

impl From<Tensor<c64>> for TrackedArray {
    fn from(t: Tensor<c64>) -> Self {
        TrackedArray::new(t)
    }
}
