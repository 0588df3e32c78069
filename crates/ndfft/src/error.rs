//! Error types for ndfft.

use thiserror::Error;

/// Errors that can occur in transform, tensor and differentiation operations.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FftError {
    /// Requested transform length is not positive.
    #[error("invalid transform size {size} for axis {axis}")]
    InvalidSize { axis: usize, size: usize },

    /// The gradient of a transform over repeated axes was requested.
    #[error("gradient is not defined for repeated transform axes {axes:?}")]
    UnsupportedAxes { axes: Vec<usize> },

    /// A known but unsupported gradient configuration.
    #[error("not implemented: {0}")]
    NotImplemented(String),

    /// Axis outside of `-ndim..ndim`.
    #[error("axis {axis} is out of range for tensor with {ndim} dimensions")]
    AxisOutOfRange { axis: isize, ndim: usize },

    /// Sizes and axes were both given with different lengths.
    #[error("shape and axes have different lengths: {sizes} sizes for {axes} axes")]
    SizeAxesMismatch { sizes: usize, axes: usize },

    /// Two shapes that must agree do not.
    #[error("shape mismatch: expected {expected:?}, got {actual:?}")]
    ShapeMismatch {
        expected: Vec<usize>,
        actual: Vec<usize>,
    },

    /// Data length does not match the product of the shape.
    #[error("length mismatch: expected {expected} elements, got {actual}")]
    LengthMismatch { expected: usize, actual: usize },

    /// Element type not accepted by the operation.
    #[error("{operation} expects a {expected} array, got {actual}")]
    DTypeMismatch {
        operation: &'static str,
        expected: &'static str,
        actual: &'static str,
    },

    /// Index out of bounds.
    #[error("index out of bounds: index {index} is out of range for dimension {dim_size}")]
    IndexOutOfBounds { index: usize, dim_size: usize },

    /// Normalization mode string not recognised.
    #[error("unknown normalization mode {0:?}")]
    UnknownNormalization(String),

    /// Misuse of the differentiation engine.
    #[error("invalid operation: {0}")]
    InvalidOperation(String),
}

/// Result type used throughout the crate.
pub type Result<T> = std::result::Result<T, FftError>;
