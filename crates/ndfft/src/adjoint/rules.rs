//! One rule per transform family.
//!
//! Each rule undoes the forward call step by step in reverse order: the
//! normalization, the transform itself (through its inverse kind, which is
//! the adjoint up to a factor of `N`), then the crop/pad of the input.

use super::hermitian::{check_even_length, inverse_weights, weights};
use super::shift::shift_adjoint;
use super::size::adjoint_resize;
use super::{AdjointRule, InputInfo};
use crate::array::DType;
use crate::autodiff::{
    TrackedArray, tracked_real, tracked_scale, tracked_scale_along_axis, tracked_to_complex,
    tracked_transform,
};
use crate::error::{FftError, Result};
use crate::transform::{Normalization, TransformKind, TransformSpec};

/// Gradients through a transform that visits an axis twice are not provided.
fn check_unique_axes(spec: &TransformSpec) -> Result<()> {
    if spec.repeated_axes().is_empty() {
        Ok(())
    } else {
        Err(FftError::UnsupportedAxes {
            axes: spec.axes.clone(),
        })
    }
}

fn cast_to(grad: &TrackedArray, dtype: DType) -> Result<TrackedArray> {
    match dtype {
        DType::Real => tracked_real(grad),
        DType::Complex => tracked_to_complex(grad),
    }
}

/// Multiply by `factor` unless the transform is orthonormal.
fn unnormalized_scale(
    grad: TrackedArray,
    spec: &TransformSpec,
    factor: f64,
) -> Result<TrackedArray> {
    match spec.norm {
        Normalization::Unnormalized => tracked_scale(&grad, factor),
        Normalization::Orthonormal => Ok(grad),
    }
}

fn half_spectrum_axis(spec: &TransformSpec) -> Result<(usize, usize)> {
    spec.last_axis()
        .zip(spec.last_size())
        .ok_or_else(|| FftError::InvalidOperation("real transform without axes".to_string()))
}

/// `fft`, `fft2`, `fftn`: `N * ifftn(g)`.
#[derive(Debug)]
pub struct ComplexForwardRule(pub TransformKind);

impl AdjointRule for ComplexForwardRule {
    fn vjp(
        &self,
        grad: &TrackedArray,
        spec: &TransformSpec,
        input: &InputInfo,
    ) -> Result<TrackedArray> {
        check_unique_axes(spec)?;
        let back = tracked_transform(self.0.inverse(), grad, spec.clone())?;
        let back = unnormalized_scale(back, spec, spec.n_total() as f64)?;
        cast_to(&adjoint_resize(&back, &input.shape)?, input.dtype)
    }
}

/// `ifft`, `ifft2`, `ifftn`: `fftn(g) / N`.
#[derive(Debug)]
pub struct ComplexInverseRule(pub TransformKind);

impl AdjointRule for ComplexInverseRule {
    fn vjp(
        &self,
        grad: &TrackedArray,
        spec: &TransformSpec,
        input: &InputInfo,
    ) -> Result<TrackedArray> {
        check_unique_axes(spec)?;
        let back = tracked_transform(self.0.inverse(), grad, spec.clone())?;
        let back = unnormalized_scale(back, spec, 1.0 / spec.n_total() as f64)?;
        cast_to(&adjoint_resize(&back, &input.shape)?, input.dtype)
    }
}

/// `rfft`, `rfft2`, `rfftn`: `N * irfftn(g / w)`.
///
/// The inverse real transform counts every interior bin twice through its
/// implied mirror, so those bins are halved first. The result is real.
#[derive(Debug)]
pub struct RealForwardRule(pub TransformKind);

impl AdjointRule for RealForwardRule {
    fn vjp(
        &self,
        grad: &TrackedArray,
        spec: &TransformSpec,
        input: &InputInfo,
    ) -> Result<TrackedArray> {
        check_unique_axes(spec)?;
        check_even_length(self.0, spec)?;
        let (axis, n) = half_spectrum_axis(spec)?;
        let weighted = tracked_scale_along_axis(grad, axis, &inverse_weights(n))?;
        let back = tracked_transform(self.0.inverse(), &weighted, spec.clone())?;
        let back = unnormalized_scale(back, spec, spec.n_total() as f64)?;
        cast_to(&adjoint_resize(&back, &input.shape)?, input.dtype)
    }
}

/// `irfft`, `irfft2`, `irfftn`: `rfftn(g) * w / N`.
#[derive(Debug)]
pub struct RealInverseRule(pub TransformKind);

impl AdjointRule for RealInverseRule {
    fn vjp(
        &self,
        grad: &TrackedArray,
        spec: &TransformSpec,
        input: &InputInfo,
    ) -> Result<TrackedArray> {
        check_unique_axes(spec)?;
        check_even_length(self.0, spec)?;
        let (axis, n) = half_spectrum_axis(spec)?;
        let grad = tracked_real(grad)?;
        let spectrum = tracked_transform(self.0.inverse(), &grad, spec.clone())?;
        let back = tracked_scale_along_axis(&spectrum, axis, &weights(n))?;
        let back = unnormalized_scale(back, spec, 1.0 / spec.n_total() as f64)?;
        cast_to(&adjoint_resize(&back, &input.shape)?, input.dtype)
    }
}

/// `fftshift`, `ifftshift`: roll back.
#[derive(Debug)]
pub struct ShiftRule(pub TransformKind);

impl AdjointRule for ShiftRule {
    fn vjp(
        &self,
        grad: &TrackedArray,
        spec: &TransformSpec,
        input: &InputInfo,
    ) -> Result<TrackedArray> {
        cast_to(&shift_adjoint(self.0, grad, spec)?, input.dtype)
    }
}
