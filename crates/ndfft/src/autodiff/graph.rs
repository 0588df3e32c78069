//! Computation graph for reverse-mode automatic differentiation.

use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt::Debug;
use std::rc::Rc;

use petgraph::algo::toposort;
use petgraph::graph::{DiGraph, NodeIndex};

use super::tensor::TrackedArray;
use crate::error::{FftError, Result};

/// Unique identifier for a node in the computation graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
    /// Get the internal index.
    pub fn index(&self) -> usize {
        self.0
    }

    #[cfg(test)]
    pub(crate) fn new_for_test(index: usize) -> Self {
        Self(index)
    }
}

/// Backward function of one recorded operation.
///
/// `backward` receives the gradient of the operation's output and returns
/// the gradients of its tracked inputs. Implementations build their result
/// from tracked operations, so when the engine records the backward pass the
/// returned gradients are themselves differentiable.
pub trait GradFn: Debug {
    /// Compute VJP: given grad_output, return gradients for each input.
    fn backward(&self, grad_output: &TrackedArray) -> Result<Vec<(NodeId, TrackedArray)>>;

    /// Input node IDs (for topological sort).
    fn inputs(&self) -> Vec<NodeId>;

    /// Operation name used in diagnostics.
    fn name(&self) -> &'static str;
}

/// A node in the computation graph.
#[derive(Debug)]
pub struct Node {
    id: NodeId,
    /// Backward function (None for leaf nodes).
    grad_fn: Option<Rc<dyn GradFn>>,
}

impl Node {
    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn grad_fn(&self) -> Option<&dyn GradFn> {
        self.grad_fn.as_deref()
    }

    pub fn is_leaf(&self) -> bool {
        self.grad_fn.is_none()
    }
}

/// Thread-local computation graph.
///
/// Nodes are appended as tracked operations run and are only removed by
/// [`ComputationGraph::clear`]. Backward functions are reference counted so
/// the engine can run them without holding a borrow of the graph, which lets
/// them record new nodes.
#[derive(Default)]
pub struct ComputationGraph {
    nodes: Vec<Node>,
}

impl ComputationGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a leaf node (input array with requires_grad=true).
    pub fn create_leaf(&mut self) -> NodeId {
        self.push(None)
    }

    /// Create a computed node with backward function.
    pub fn create_node(&mut self, grad_fn: Rc<dyn GradFn>) -> NodeId {
        self.push(Some(grad_fn))
    }

    fn push(&mut self, grad_fn: Option<Rc<dyn GradFn>>) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node { id, grad_fn });
        id
    }

    pub fn get_node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.index())
    }

    /// Shared handle to the backward function of `id`.
    pub fn grad_fn_handle(&self, id: NodeId) -> Option<Rc<dyn GradFn>> {
        self.get_node(id).and_then(|n| n.grad_fn.clone())
    }

    pub fn clear(&mut self) {
        self.nodes.clear();
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Nodes reachable from `start`, each listed before all of its inputs.
    pub fn topological_order(&self, start: NodeId) -> Result<Vec<NodeId>> {
        let mut dag: DiGraph<NodeId, ()> = DiGraph::new();
        let mut index: HashMap<NodeId, NodeIndex> = HashMap::new();
        let mut stack = vec![start];
        index.insert(start, dag.add_node(start));

        while let Some(id) = stack.pop() {
            let from = index[&id];
            let Some(grad_fn) = self.get_node(id).and_then(Node::grad_fn) else {
                continue;
            };
            for input in grad_fn.inputs() {
                let to = match index.get(&input) {
                    Some(&to) => to,
                    None => {
                        let to = dag.add_node(input);
                        index.insert(input, to);
                        stack.push(input);
                        to
                    }
                };
                dag.update_edge(from, to, ());
            }
        }

        let order = toposort(&dag, None).map_err(|cycle| {
            FftError::InvalidOperation(format!(
                "computation graph has a cycle through node {}",
                dag[cycle.node_id()].index()
            ))
        })?;
        Ok(order.into_iter().map(|ix| dag[ix]).collect())
    }
}

impl Debug for ComputationGraph {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ComputationGraph")
            .field("num_nodes", &self.nodes.len())
            .finish()
    }
}

thread_local! {
    static GRAPH: RefCell<ComputationGraph> = RefCell::new(ComputationGraph::new());
}

/// Access the thread-local computation graph.
///
/// The closure must not call back into tracked operations.
pub fn with_graph<R>(f: impl FnOnce(&mut ComputationGraph) -> R) -> R {
    GRAPH.with(|g| f(&mut g.borrow_mut()))
}

/// Clear the thread-local computation graph.
///
/// Tracked arrays created before the call must not be used afterwards.
pub fn clear_graph() {
    with_graph(|g| g.clear());
}
