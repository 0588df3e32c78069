//! Untracked tensor operations.
//!
//! These are the value-level kernels behind the tracked primitives in
//! [`crate::autodiff`]:
//!
//! ```text
//! resize       crop / zero-pad to a target shape
//! shift        circular roll (fftshift, ifftshift)
//! elementwise  add, mul, conj, sin, cos, scaling, sum, broadcast
//! index        select / scatter_add over leading axes
//! ```

pub mod elementwise;
mod index;
mod resize;
mod shift;

pub use index::{scatter_add, select, selection_shape};
pub use resize::{resize, resize_axis};
pub use shift::{fftshift_offsets, ifftshift_offsets, roll};
