//! Gradient storage container.

use std::collections::HashMap;

use super::graph::NodeId;
use super::ops::tracked_add;
use super::tensor::TrackedArray;
use crate::error::Result;

/// Container for accumulated gradients.
///
/// Stores gradients keyed by NodeId. Contributions reaching the same node
/// along several paths are summed with a tracked addition, so the sum is
/// itself part of the graph when the backward pass is being recorded.
#[derive(Debug, Default)]
pub struct Gradients {
    grads: HashMap<NodeId, TrackedArray>,
}

impl Gradients {
    /// Create empty gradient container.
    pub fn new() -> Self {
        Self::default()
    }

    /// Accumulate gradient for a node.
    ///
    /// If gradient already exists, adds to it (for multiple paths).
    pub fn accumulate(&mut self, id: NodeId, grad: TrackedArray) -> Result<()> {
        let total = match self.grads.remove(&id) {
            Some(existing) => tracked_add(&existing, &grad)?,
            None => grad,
        };
        self.grads.insert(id, total);
        Ok(())
    }

    pub fn get(&self, id: NodeId) -> Option<&TrackedArray> {
        self.grads.get(&id)
    }

    /// Gradient with respect to `x`, if `x` is tracked and received one.
    pub fn wrt(&self, x: &TrackedArray) -> Option<&TrackedArray> {
        x.node_id().and_then(|id| self.get(id))
    }

    /// Remove and return gradient (for passing to backward functions).
    pub fn remove(&mut self, id: NodeId) -> Option<TrackedArray> {
        self.grads.remove(&id)
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.grads.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.grads.len()
    }

    pub fn is_empty(&self) -> bool {
        self.grads.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&NodeId, &TrackedArray)> {
        self.grads.iter()
    }
}
