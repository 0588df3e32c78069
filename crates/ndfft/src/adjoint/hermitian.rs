//! Bookkeeping for half-spectrum (Hermitian) storage.
//!
//! A real signal of length `n` has `m = n / 2 + 1` stored bins. Bin 0 and,
//! for even `n`, bin `n / 2` are their own mirror images; every other stored
//! bin also stands for the omitted bin `n - k`. The weight of a bin is the
//! number of full-spectrum bins it represents.

use crate::error::{FftError, Result};
use crate::kernel::half_len;
use crate::transform::{TransformKind, TransformSpec};

/// Per-bin multiplicities for a length-`n` real signal.
///
/// ```
/// use ndfft::adjoint::hermitian::weights;
///
/// assert_eq!(weights(6), vec![1.0, 2.0, 2.0, 1.0]);
/// assert_eq!(weights(5), vec![1.0, 2.0, 2.0]);
/// ```
pub fn weights(n: usize) -> Vec<f64> {
    let m = half_len(n);
    (0..m)
        .map(|k| if k == 0 || 2 * k == n { 1.0 } else { 2.0 })
        .collect()
}

/// Reciprocals of [`weights`].
pub fn inverse_weights(n: usize) -> Vec<f64> {
    weights(n).into_iter().map(|w| 1.0 / w).collect()
}

/// Real-family gradients are only provided for even lengths on the
/// half-spectrum axis.
pub fn check_even_length(kind: TransformKind, spec: &TransformSpec) -> Result<()> {
    match spec.last_size() {
        Some(n) if n % 2 == 0 => Ok(()),
        Some(n) => Err(FftError::NotImplemented(format!(
            "gradient of {kind} with odd length {n} on the half-spectrum axis"
        ))),
        None => Err(FftError::InvalidOperation(format!("{kind} has no axes"))),
    }
}
