//! Tracked transforms.
//!
//! Each entry point resolves its arguments into a [`TransformSpec`], runs the
//! kernel and, if the input is tracked, binds a [`TransformBackward`] that
//! hands the output gradient to the adjoint registry.

use super::{record, tracked_input};
use crate::adjoint::{InputInfo, registry};
use crate::autodiff::graph::{GradFn, NodeId};
use crate::autodiff::tensor::TrackedArray;
use crate::error::Result;
use crate::kernel;
use crate::transform::{Normalization, TransformKind, TransformSpec};

/// Backward function bound to one forward transform call.
///
/// Holds everything the adjoint rule needs by value, so the node outlives
/// neither its input value nor the forward call's arguments.
#[derive(Debug, Clone)]
pub struct TransformBackward {
    pub kind: TransformKind,
    pub spec: TransformSpec,
    pub input: InputInfo,
    input_id: NodeId,
}

impl GradFn for TransformBackward {
    fn backward(&self, grad_output: &TrackedArray) -> Result<Vec<(NodeId, TrackedArray)>> {
        let grad = registry().apply(self.kind, grad_output, &self.spec, &self.input)?;
        Ok(vec![(self.input_id, grad)])
    }

    fn inputs(&self) -> Vec<NodeId> {
        vec![self.input_id]
    }

    fn name(&self) -> &'static str {
        self.kind.name()
    }
}

/// Apply `kind` with an already resolved `spec`.
///
/// Adjoint rules call this for their inner transforms, which is how their
/// own work becomes differentiable.
pub fn tracked_transform(
    kind: TransformKind,
    x: &TrackedArray,
    spec: TransformSpec,
) -> Result<TrackedArray> {
    let value = kernel::apply(kind, x.value(), &spec)?;
    Ok(match tracked_input(x) {
        Some(input_id) => record(
            value,
            TransformBackward {
                kind,
                spec,
                input: InputInfo::of(x.value()),
                input_id,
            },
        ),
        None => TrackedArray::new(value),
    })
}

fn resolve_and_apply(
    kind: TransformKind,
    x: &TrackedArray,
    sizes: Option<&[usize]>,
    axes: Option<&[isize]>,
    norm: Normalization,
) -> Result<TrackedArray> {
    let spec = TransformSpec::resolve(kind, x.shape(), sizes, axes, norm)?;
    tracked_transform(kind, x, spec)
}

fn one_axis(
    kind: TransformKind,
    x: &TrackedArray,
    n: Option<usize>,
    axis: Option<isize>,
    norm: Normalization,
) -> Result<TrackedArray> {
    let sizes = n.map(|n| [n]);
    let axes = axis.map(|a| [a]);
    resolve_and_apply(
        kind,
        x,
        sizes.as_ref().map(|s| &s[..]),
        axes.as_ref().map(|a| &a[..]),
        norm,
    )
}

/// One-dimensional DFT along `axis` (default: last), cropped or padded to `n`.
pub fn tracked_fft(
    x: &TrackedArray,
    n: Option<usize>,
    axis: Option<isize>,
    norm: Normalization,
) -> Result<TrackedArray> {
    one_axis(TransformKind::Fft, x, n, axis, norm)
}

/// Inverse of [`tracked_fft`].
pub fn tracked_ifft(
    x: &TrackedArray,
    n: Option<usize>,
    axis: Option<isize>,
    norm: Normalization,
) -> Result<TrackedArray> {
    one_axis(TransformKind::Ifft, x, n, axis, norm)
}

/// DFT of a real signal, keeping the `n/2 + 1` non-negative frequency bins.
pub fn tracked_rfft(
    x: &TrackedArray,
    n: Option<usize>,
    axis: Option<isize>,
    norm: Normalization,
) -> Result<TrackedArray> {
    one_axis(TransformKind::Rfft, x, n, axis, norm)
}

/// Real signal of length `n` (default `2 * (m - 1)`) from `m` half-spectrum bins.
pub fn tracked_irfft(
    x: &TrackedArray,
    n: Option<usize>,
    axis: Option<isize>,
    norm: Normalization,
) -> Result<TrackedArray> {
    one_axis(TransformKind::Irfft, x, n, axis, norm)
}

pub fn tracked_fft2(
    x: &TrackedArray,
    s: Option<&[usize]>,
    axes: Option<&[isize]>,
    norm: Normalization,
) -> Result<TrackedArray> {
    resolve_and_apply(TransformKind::Fft2, x, s, axes, norm)
}

pub fn tracked_ifft2(
    x: &TrackedArray,
    s: Option<&[usize]>,
    axes: Option<&[isize]>,
    norm: Normalization,
) -> Result<TrackedArray> {
    resolve_and_apply(TransformKind::Ifft2, x, s, axes, norm)
}

pub fn tracked_rfft2(
    x: &TrackedArray,
    s: Option<&[usize]>,
    axes: Option<&[isize]>,
    norm: Normalization,
) -> Result<TrackedArray> {
    resolve_and_apply(TransformKind::Rfft2, x, s, axes, norm)
}

pub fn tracked_irfft2(
    x: &TrackedArray,
    s: Option<&[usize]>,
    axes: Option<&[isize]>,
    norm: Normalization,
) -> Result<TrackedArray> {
    resolve_and_apply(TransformKind::Irfft2, x, s, axes, norm)
}

/// N-dimensional DFT over `axes` (default: all, or the last `s.len()`).
///
/// # Examples
///
/// ```
/// use ndfft::{Array, Normalization};
/// use ndfft::autodiff::{TrackedArray, tracked_fftn};
///
/// let x = TrackedArray::new(Array::real(vec![1.0; 8], &[2, 2, 2]).unwrap());
/// let y = tracked_fftn(&x, None, None, Normalization::Unnormalized).unwrap();
/// let bins = y.value().as_complex().unwrap();
/// assert_eq!(bins.data()[0].re, 8.0);
/// assert!(bins.data()[1..].iter().all(|z| z.norm() < 1e-12));
/// ```
pub fn tracked_fftn(
    x: &TrackedArray,
    s: Option<&[usize]>,
    axes: Option<&[isize]>,
    norm: Normalization,
) -> Result<TrackedArray> {
    resolve_and_apply(TransformKind::Fftn, x, s, axes, norm)
}

pub fn tracked_ifftn(
    x: &TrackedArray,
    s: Option<&[usize]>,
    axes: Option<&[isize]>,
    norm: Normalization,
) -> Result<TrackedArray> {
    resolve_and_apply(TransformKind::Ifftn, x, s, axes, norm)
}

pub fn tracked_rfftn(
    x: &TrackedArray,
    s: Option<&[usize]>,
    axes: Option<&[isize]>,
    norm: Normalization,
) -> Result<TrackedArray> {
    resolve_and_apply(TransformKind::Rfftn, x, s, axes, norm)
}

pub fn tracked_irfftn(
    x: &TrackedArray,
    s: Option<&[usize]>,
    axes: Option<&[isize]>,
    norm: Normalization,
) -> Result<TrackedArray> {
    resolve_and_apply(TransformKind::Irfftn, x, s, axes, norm)
}

/// Move the zero-frequency bin to the centre of each axis in `axes`
/// (default: all).
pub fn tracked_fftshift(x: &TrackedArray, axes: Option<&[isize]>) -> Result<TrackedArray> {
    resolve_and_apply(
        TransformKind::FftShift,
        x,
        None,
        axes,
        Normalization::default(),
    )
}

/// Inverse of [`tracked_fftshift`].
pub fn tracked_ifftshift(x: &TrackedArray, axes: Option<&[isize]>) -> Result<TrackedArray> {
    resolve_and_apply(
        TransformKind::IfftShift,
        x,
        None,
        axes,
        Normalization::default(),
    )
}
