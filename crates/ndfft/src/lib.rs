//! ndfft - differentiable multidimensional discrete Fourier transforms
//!
//! This crate provides the gradient (vector-Jacobian product) rules of the
//! NumPy-style DFT family inside a small reverse-mode autodiff engine:
//! `fft`, `ifft`, `rfft`, `irfft` in 1-D, 2-D and N-D form, plus `fftshift`
//! and `ifftshift`. Requested lengths may crop or zero-pad the input, and
//! every rule is itself built from differentiable operations, so second
//! derivatives come for free.
//!
//! # Architecture
//!
//! ```text
//! Level 1: Tracked API (autodiff module)
//!     → tracked_fft .. tracked_irfftn, tracked_fftshift, backward
//!
//! Level 2: Adjoint rules (adjoint module)
//!     → registry: TransformKind → AdjointRule
//!     → size (crop/pad), hermitian (half-spectrum weights), shift
//!
//! Level 3: Kernels (kernel, operations modules)
//!     → rustfft-backed transforms, resize, roll, element-wise ops
//! ```
//!
//! # Example
//!
//! ```
//! use ndfft::{Array, Normalization};
//! use ndfft::autodiff::{TrackedArray, backward, clear_graph, tracked_real, tracked_rfft, tracked_sum};
//!
//! clear_graph();
//!
//! // Column-major 4x4 real input, transformed along the last axis with n = 6
//! let data: Vec<f64> = (0..16).map(|i| f64::from(i) / 10.0).collect();
//! let x = TrackedArray::leaf(Array::real(data, &[4, 4]).unwrap());
//! let y = tracked_rfft(&x, Some(6), None, Normalization::Unnormalized).unwrap();
//! assert_eq!(y.shape(), &[4, 4]);
//!
//! let loss = tracked_sum(&tracked_real(&y).unwrap()).unwrap();
//! let grads = backward(&loss).unwrap();
//! assert_eq!(grads.wrt(&x).unwrap().shape(), &[4, 4]);
//! ```

pub mod adjoint;
pub mod array;
pub mod autodiff;
pub mod error;
pub mod kernel;
pub mod operations;
pub mod random;
pub mod scalar;
pub mod strides;
pub mod tensor;
pub mod transform;

pub use array::{Array, DType};
pub use error::{FftError, Result};
pub use scalar::{Scalar, c64};
pub use tensor::Tensor;
pub use transform::{Normalization, TransformKind, TransformSpec};
