//! Reverse-mode automatic differentiation for transform pipelines.
//!
//! Tape-based, PyTorch-style API with a thread-local computation graph.
//! Transform nodes delegate their backward step to the adjoint registry;
//! every other node carries the VJP of a small element-wise or indexing
//! primitive.
//!
//! # Architecture
//!
//! ```text
//! TrackedArray  ──registers in──►  ComputationGraph (thread_local)
//!      │                                  │
//!      ▼                                  ▼
//!  Rc<Array>                      Vec<Node { Rc<dyn GradFn> }>
//!                                         │
//!                         ┌───────────────┴──────────────┐
//!                         ▼                              ▼
//!                 TransformBackward             TrigBackward, ...
//!                         │
//!                         ▼
//!                 adjoint::registry()  ──calls──►  tracked_transform
//! ```
//!
//! # Example
//!
//! ```
//! use ndfft::{Array, Normalization};
//! use ndfft::autodiff::{
//!     BackwardOptions, TrackedArray, backward, backward_with, clear_graph, tracked_fft,
//!     tracked_real, tracked_sin, tracked_sum,
//! };
//!
//! clear_graph();
//! let x = TrackedArray::leaf(Array::real(vec![0.1, 0.2, 0.3, 0.4], &[4]).unwrap());
//!
//! // L(x) = sum(real(sin(fft(x))))
//! let y = tracked_fft(&x, None, None, Normalization::Unnormalized).unwrap();
//! let loss = tracked_sum(&tracked_real(&tracked_sin(&y).unwrap()).unwrap()).unwrap();
//!
//! // Keep the backward pass in the graph to differentiate it again.
//! let grads = backward_with(&loss, BackwardOptions::new().create_graph(true)).unwrap();
//! let dx = grads.wrt(&x).unwrap();
//! let second = backward(&tracked_sum(dx).unwrap()).unwrap();
//! assert_eq!(second.wrt(&x).unwrap().shape(), &[4]);
//! ```
//!
//! # Design Notes
//!
//! - Thread-local computation graph (no `Arc`, uses `Rc`)
//! - Gradient accumulation for multiple paths to same node
//! - Recording is suspended during a plain [`backward`] and kept on with
//!   [`BackwardOptions::create_graph`]

mod backward;
mod gradients;
mod graph;
mod no_grad;
mod ops;
mod tensor;

pub use backward::{BackwardOptions, backward, backward_with};
pub use gradients::Gradients;
pub use graph::{ComputationGraph, GradFn, Node, NodeId, clear_graph, with_graph};
pub use no_grad::{NoGradGuard, is_grad_enabled, no_grad};
pub use ops::{
    TransformBackward, tracked_add, tracked_broadcast, tracked_conj, tracked_cos, tracked_fft,
    tracked_fft2, tracked_fftn, tracked_fftshift, tracked_ifft, tracked_ifft2, tracked_ifftn,
    tracked_ifftshift, tracked_irfft, tracked_irfft2, tracked_irfftn, tracked_mul, tracked_real,
    tracked_resize, tracked_rfft, tracked_rfft2, tracked_rfftn, tracked_roll, tracked_scale,
    tracked_scale_along_axis, tracked_scatter_add, tracked_select, tracked_sin, tracked_sum,
    tracked_to_complex, tracked_transform,
};
pub use tensor::TrackedArray;
