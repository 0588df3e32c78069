//! Forward transform kernel backed by `rustfft`.
//!
//! Multi-axis transforms are computed one axis at a time: each axis is first
//! cropped or zero-padded to its requested length, then every lane along it
//! is transformed in place. Normalization is applied once at the end with
//! `N` equal to the product of all requested lengths.
//!
//! Real transforms keep only the non-negative half of the spectrum along the
//! last listed axis: `n / 2 + 1` bins for a length-`n` signal.

use std::cell::RefCell;
use std::sync::Arc;

use rustfft::{Fft, FftPlanner};
use tracing::trace;

use crate::array::Array;
use crate::error::{FftError, Result};
use crate::operations::{fftshift_offsets, ifftshift_offsets, resize_axis, roll};
use crate::scalar::{Scalar, c64};
use crate::strides::AxisLanes;
use crate::tensor::Tensor;
use crate::transform::{TransformFamily, TransformKind, TransformSpec};

thread_local! {
    static PLANNER: RefCell<FftPlanner<f64>> = RefCell::new(FftPlanner::new());
}

fn plan(n: usize, inverse: bool) -> Arc<dyn Fft<f64>> {
    PLANNER.with(|planner| {
        let mut planner = planner.borrow_mut();
        if inverse {
            planner.plan_fft_inverse(n)
        } else {
            planner.plan_fft_forward(n)
        }
    })
}

/// Number of half-spectrum bins of a length-`n` real signal.
pub fn half_len(n: usize) -> usize {
    n / 2 + 1
}

/// Rewrite every lane along `axis`, producing lanes of length `out_len`.
fn map_lanes<A: Scalar, B: Scalar>(
    input: &Tensor<A>,
    axis: usize,
    out_len: usize,
    mut f: impl FnMut(&[A], &mut [B]),
) -> Result<Tensor<B>> {
    let mut out_shape = input.shape().to_vec();
    out_shape[axis] = out_len;
    let mut out = Tensor::zeros(&out_shape);

    let src_lanes = AxisLanes::new(input.shape(), axis);
    let dst_lanes = AxisLanes::new(&out_shape, axis);
    let src = input.data();
    let mut lane_in = vec![A::zero(); src_lanes.len];
    let mut lane_out = vec![B::zero(); out_len];

    let dst = out.data_mut();
    for (src_base, dst_base) in src_lanes.bases().zip(dst_lanes.bases()) {
        for (j, slot) in lane_in.iter_mut().enumerate() {
            *slot = src[src_base + j * src_lanes.stride];
        }
        f(&lane_in, &mut lane_out);
        for (j, &value) in lane_out.iter().enumerate() {
            dst[dst_base + j * dst_lanes.stride] = value;
        }
    }
    Ok(out)
}

/// Unscaled complex transform of `axis` after resizing it to `n`.
fn c2c_axis(input: &Tensor<c64>, axis: usize, n: usize, inverse: bool) -> Result<Tensor<c64>> {
    let resized = resize_axis(input, axis, n)?;
    let fft = plan(n, inverse);
    map_lanes(&resized, axis, n, |lane, out| {
        out.copy_from_slice(lane);
        fft.process(out);
    })
}

/// Unscaled real-to-half-spectrum transform of `axis` after resizing it to `n`.
fn r2c_axis(input: &Tensor<f64>, axis: usize, n: usize) -> Result<Tensor<c64>> {
    let resized = resize_axis(input, axis, n)?;
    let fft = plan(n, false);
    let mut buffer = vec![c64::new(0.0, 0.0); n];
    map_lanes(&resized, axis, half_len(n), |lane, out| {
        for (b, &x) in buffer.iter_mut().zip(lane) {
            *b = c64::new(x, 0.0);
        }
        fft.process(&mut buffer);
        out.copy_from_slice(&buffer[..out.len()]);
    })
}

/// Unscaled half-spectrum-to-real transform producing `n` samples along `axis`.
///
/// The input lane is cropped or zero-padded to `n / 2 + 1` bins and extended
/// to the full spectrum by conjugate symmetry. Imaginary parts of the DC bin
/// and, for even `n`, the Nyquist bin do not contribute.
fn c2r_axis(input: &Tensor<c64>, axis: usize, n: usize) -> Result<Tensor<f64>> {
    let m = half_len(n);
    let resized = resize_axis(input, axis, m)?;
    let fft = plan(n, true);
    let mut buffer = vec![c64::new(0.0, 0.0); n];
    map_lanes(&resized, axis, n, |lane, out| {
        for (k, slot) in buffer.iter_mut().enumerate() {
            *slot = if k < m { lane[k] } else { lane[n - k].conj() };
        }
        fft.process(&mut buffer);
        for (o, b) in out.iter_mut().zip(&buffer) {
            *o = b.re;
        }
    })
}

fn scaled<T: Scalar>(tensor: Tensor<T>, factor: f64) -> Tensor<T> {
    if factor == 1.0 {
        tensor
    } else {
        tensor.map(|x| x.scale(factor))
    }
}

/// `(axis, length)` pairs of `spec`, in listed order.
fn axis_sizes(spec: &TransformSpec) -> Result<Vec<(usize, usize)>> {
    if spec.axes.len() != spec.sizes.len() {
        return Err(FftError::SizeAxesMismatch {
            sizes: spec.sizes.len(),
            axes: spec.axes.len(),
        });
    }
    Ok(spec.axes.iter().copied().zip(spec.sizes.iter().copied()).collect())
}

/// Split off the half-spectrum axis of a real transform.
fn split_half_axis(pairs: &[(usize, usize)]) -> Result<(&(usize, usize), &[(usize, usize)])> {
    pairs
        .split_last()
        .ok_or_else(|| FftError::InvalidOperation("real transform without axes".to_string()))
}

/// Complex forward transform over `spec.axes`.
pub fn fftn(input: &Array, spec: &TransformSpec) -> Result<Tensor<c64>> {
    let mut data = input.to_complex();
    for &(axis, n) in axis_sizes(spec)?.iter().rev() {
        data = c2c_axis(&data, axis, n, false)?;
    }
    Ok(scaled(data, spec.norm.forward_scale(spec.n_total())))
}

/// Complex inverse transform over `spec.axes`.
pub fn ifftn(input: &Array, spec: &TransformSpec) -> Result<Tensor<c64>> {
    let mut data = input.to_complex();
    for &(axis, n) in axis_sizes(spec)?.iter().rev() {
        data = c2c_axis(&data, axis, n, true)?;
    }
    Ok(scaled(data, spec.norm.inverse_scale(spec.n_total())))
}

/// Real forward transform: half spectrum along the last axis, full complex
/// transforms along the others.
pub fn rfftn(input: &Tensor<f64>, spec: &TransformSpec) -> Result<Tensor<c64>> {
    let pairs = axis_sizes(spec)?;
    let (&(half_axis, half_n), rest) = split_half_axis(&pairs)?;
    let mut data = r2c_axis(input, half_axis, half_n)?;
    for &(axis, n) in rest {
        data = c2c_axis(&data, axis, n, false)?;
    }
    Ok(scaled(data, spec.norm.forward_scale(spec.n_total())))
}

/// Real inverse transform: complex inverses along all but the last axis, then
/// a half-spectrum-to-real inverse along it.
pub fn irfftn(input: &Array, spec: &TransformSpec) -> Result<Tensor<f64>> {
    let pairs = axis_sizes(spec)?;
    let (&(half_axis, half_n), rest) = split_half_axis(&pairs)?;
    let mut data = input.to_complex();
    for &(axis, n) in rest {
        data = c2c_axis(&data, axis, n, true)?;
    }
    let real = c2r_axis(&data, half_axis, half_n)?;
    Ok(scaled(real, spec.norm.inverse_scale(spec.n_total())))
}

/// Evaluate transform `kind` on `input` with resolved parameters.
///
/// # Errors
///
/// Whatever [`TransformSpec::validate`] rejects for `kind` and the input
/// rank. Real forward transforms reject complex input with `DTypeMismatch`.
pub fn apply(kind: TransformKind, input: &Array, spec: &TransformSpec) -> Result<Array> {
    spec.validate(kind, input.ndim())?;
    trace!(
        kind = %kind,
        axes = ?spec.axes,
        sizes = ?spec.sizes,
        norm = %spec.norm,
        "forward transform"
    );
    let out = match kind.family() {
        TransformFamily::ComplexForward => Array::Complex(fftn(input, spec)?),
        TransformFamily::ComplexInverse => Array::Complex(ifftn(input, spec)?),
        TransformFamily::RealForward => {
            Array::Complex(rfftn(input.expect_real(kind.name())?, spec)?)
        }
        TransformFamily::RealInverse => Array::Real(irfftn(input, spec)?),
        TransformFamily::Shift => {
            let offsets = if kind == TransformKind::FftShift {
                fftshift_offsets(input.shape(), &spec.axes)
            } else {
                ifftshift_offsets(input.shape(), &spec.axes)
            };
            match input {
                Array::Real(t) => Array::Real(roll(t, &offsets)?),
                Array::Complex(t) => Array::Complex(roll(t, &offsets)?),
            }
        }
    };
    Ok(out)
}
