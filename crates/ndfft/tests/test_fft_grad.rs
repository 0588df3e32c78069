//! Gradient checks for the transform family.
//!
//! Every transform is checked through `to_scalar(T(x)) = sum(real(sin(T(x))))`
//! against central differences, once for the first derivative and once for
//! `to_scalar(grad(...))`, which exercises the second derivative.

mod common;

use common::{
    check_both_orders, check_grads, crandn, eval_untracked, grad_of, randn, to_scalar,
};
use ndfft::autodiff::{
    TrackedArray, backward, clear_graph, tracked_fft, tracked_fft2, tracked_fftn,
    tracked_fftshift, tracked_ifft, tracked_ifft2, tracked_ifftn, tracked_ifftshift,
    tracked_irfft, tracked_irfft2, tracked_irfftn, tracked_rfft, tracked_rfft2, tracked_rfftn,
    tracked_select, tracked_transform,
};
use ndfft::{Array, DType, FftError, Normalization, Result, TransformKind, TransformSpec};

const UNNORM: Normalization = Normalization::Unnormalized;
const ORTHO: Normalization = Normalization::Orthonormal;

type OneAxis = fn(&TrackedArray, Option<usize>, Option<isize>, Normalization) -> Result<TrackedArray>;
type MultiAxis =
    fn(&TrackedArray, Option<&[usize]>, Option<&[isize]>, Normalization) -> Result<TrackedArray>;

/// Half-spectrum input for the inverse real transforms: `rfft*` of a real array.
fn hermitian_1d(x: Array) -> Array {
    eval_untracked(|x| tracked_rfft(x, None, None, UNNORM), x)
}

fn hermitian_2d(x: Array) -> Array {
    eval_untracked(|x| tracked_rfft2(x, None, None, UNNORM), x)
}

fn hermitian_nd(x: Array) -> Array {
    eval_untracked(|x| tracked_rfftn(x, None, None, UNNORM), x)
}

// ---------------------------------------------------------------------------
// 1-D transforms

#[test]
fn test_fft() {
    let mat = randn(&[5, 5], 1, 1.0);
    check_both_orders(|x| to_scalar(&tracked_fft(x, None, None, UNNORM)?), &mat);
}

#[test]
fn test_fft_ortho() {
    let mat = randn(&[5, 5], 2, 1.0);
    check_both_orders(|x| to_scalar(&tracked_fft(x, None, None, ORTHO)?), &mat);
}

#[test]
fn test_fft_axis() {
    let mat = randn(&[5, 5], 3, 1.0);
    check_both_orders(|x| to_scalar(&tracked_fft(x, None, Some(0), UNNORM)?), &mat);
}

#[test]
fn test_fft_complex_input() {
    let mat = crandn(&[5, 5], 4, 10.0);
    check_both_orders(|x| to_scalar(&tracked_fft(x, None, None, UNNORM)?), &mat);
}

#[test]
fn test_ifft_complex_input() {
    let mat = crandn(&[5, 5], 5, 10.0);
    check_both_orders(|x| to_scalar(&tracked_ifft(x, None, None, UNNORM)?), &mat);
}

#[test]
fn test_fft_ortho_complex_input() {
    let mat = crandn(&[5, 4], 13, 10.0);
    check_both_orders(|x| to_scalar(&tracked_fft(x, None, Some(0), ORTHO)?), &mat);
}

#[test]
fn test_ifft() {
    let mat = randn(&[5, 5], 6, 1.0);
    check_both_orders(|x| to_scalar(&tracked_ifft(x, None, None, UNNORM)?), &mat);
}

#[test]
fn test_ifft_ortho() {
    let mat = randn(&[5, 5], 7, 1.0);
    check_both_orders(|x| to_scalar(&tracked_ifft(x, None, Some(-2), ORTHO)?), &mat);
}

#[test]
fn test_rfft() {
    let mat = randn(&[4, 4], 8, 10.0);
    check_both_orders(|x| to_scalar(&tracked_rfft(x, None, None, UNNORM)?), &mat);
}

#[test]
fn test_rfft_ortho() {
    let mat = randn(&[4, 4], 9, 10.0);
    check_both_orders(|x| to_scalar(&tracked_rfft(x, None, None, ORTHO)?), &mat);
}

#[test]
fn test_rfft_axes() {
    let mat = randn(&[4, 4], 10, 10.0);
    check_both_orders(|x| to_scalar(&tracked_rfft(x, None, Some(0), UNNORM)?), &mat);
}

#[test]
fn test_irfft() {
    let mat = hermitian_1d(randn(&[4, 4], 11, 10.0));
    check_both_orders(|x| to_scalar(&tracked_irfft(x, None, None, UNNORM)?), &mat);
}

#[test]
fn test_irfft_ortho() {
    let mat = hermitian_1d(randn(&[4, 4], 12, 10.0));
    check_both_orders(|x| to_scalar(&tracked_irfft(x, None, None, ORTHO)?), &mat);
}

// ---------------------------------------------------------------------------
// Truncation and padding along one axis

fn check_fft_n_on(fft_fun: OneAxis, mat: Array, n: usize) {
    let fun = move |x: &TrackedArray| to_scalar(&fft_fun(x, Some(n), None, UNNORM)?);

    clear_graph();
    let g = grad_of(&fun, &TrackedArray::new(mat.clone())).unwrap();
    assert_eq!(g.shape(), mat.shape());

    check_both_orders(fun, &mat);
}

fn check_fft_n(fft_fun: OneAxis, inverse_real: bool, d: usize, delta: isize) {
    let n = (d as isize + delta) as usize;
    let mut mat = randn(&[d, d], 20 + n as u64, 1.0);
    if inverse_real {
        mat = hermitian_1d(mat);
    }
    check_fft_n_on(fft_fun, mat, n);
}

#[test]
fn test_fft_n_smaller() {
    check_fft_n(tracked_fft, false, 5, -2);
}

#[test]
fn test_fft_n_bigger() {
    check_fft_n(tracked_fft, false, 5, 2);
}

#[test]
fn test_ifft_n_smaller() {
    check_fft_n(tracked_ifft, false, 5, -2);
}

#[test]
fn test_ifft_n_bigger() {
    check_fft_n(tracked_ifft, false, 5, 2);
}

#[test]
fn test_rfft_n_smaller() {
    check_fft_n(tracked_rfft, false, 4, -2);
}

#[test]
fn test_rfft_n_bigger() {
    check_fft_n(tracked_rfft, false, 4, 2);
}

#[test]
fn test_irfft_n_smaller() {
    check_fft_n(tracked_irfft, true, 4, -2);
}

#[test]
fn test_irfft_n_bigger() {
    check_fft_n(tracked_irfft, true, 4, 2);
}

#[test]
fn test_fft_n_complex_input() {
    for (seed, n) in [(30, 3), (31, 7)] {
        check_fft_n_on(tracked_fft, crandn(&[5, 5], seed, 10.0), n);
    }
}

#[test]
fn test_ifft_n_complex_input() {
    for (seed, n) in [(32, 3), (33, 7)] {
        check_fft_n_on(tracked_ifft, crandn(&[5, 5], seed, 10.0), n);
    }
}

#[test]
fn test_rfft_4x4_padded_to_6() {
    clear_graph();
    let mat = randn(&[4, 4], 30, 1.0);
    let x = TrackedArray::leaf(mat.clone());
    let y = tracked_rfft(&x, Some(6), None, UNNORM).unwrap();
    assert_eq!(y.shape(), &[4, 4]);
    let grads = backward(&to_scalar(&y).unwrap()).unwrap();
    let g = grads.wrt(&x).unwrap();
    assert_eq!(g.shape(), &[4, 4]);
    assert_eq!(g.dtype(), DType::Real);

    check_grads(
        |x| to_scalar(&tracked_rfft(x, Some(6), None, UNNORM)?),
        &mat,
    )
    .unwrap();
}

// ---------------------------------------------------------------------------
// Sizes and axes on a cube: s = [D + 2, D - 2], axes = [0, 2]

fn check_fft_s_on(fft_fun: MultiAxis, mat: Array, d: usize) {
    let s = [d + 2, d - 2];
    let axes = [0isize, 2];
    let fun = move |x: &TrackedArray| to_scalar(&fft_fun(x, Some(&s), Some(&axes), UNNORM)?);
    check_both_orders(fun, &mat);
}

fn check_fft_s(fft_fun: MultiAxis, hermitian: Option<fn(Array) -> Array>, d: usize) {
    let mut mat = randn(&[d, d, d], 40 + d as u64, 10.0);
    if let Some(make_hermitian) = hermitian {
        mat = make_hermitian(mat);
    }
    check_fft_s_on(fft_fun, mat, d);
}

#[test]
fn test_fft2_s() {
    check_fft_s(tracked_fft2, None, 5);
}

#[test]
fn test_ifft2_s() {
    check_fft_s(tracked_ifft2, None, 5);
}

#[test]
fn test_fftn_s() {
    check_fft_s(tracked_fftn, None, 5);
}

#[test]
fn test_ifftn_s() {
    check_fft_s(tracked_ifftn, None, 5);
}

#[test]
fn test_complex_input_s() {
    let funs: [MultiAxis; 4] = [tracked_fft2, tracked_ifft2, tracked_fftn, tracked_ifftn];
    for (seed, fft_fun) in (60..).zip(funs) {
        check_fft_s_on(fft_fun, crandn(&[5, 5, 5], seed, 10.0), 5);
    }
}

#[test]
fn test_rfft2_s() {
    check_fft_s(tracked_rfft2, None, 4);
}

#[test]
fn test_irfft2_s() {
    check_fft_s(tracked_irfft2, Some(hermitian_2d as fn(Array) -> Array), 4);
}

#[test]
fn test_rfftn_s() {
    check_fft_s(tracked_rfftn, None, 4);
}

#[test]
fn test_irfftn_s() {
    check_fft_s(tracked_irfftn, Some(hermitian_nd as fn(Array) -> Array), 4);
}

// ---------------------------------------------------------------------------
// 2-D and N-D transforms with default arguments

#[test]
fn test_fft2() {
    let mat = randn(&[5, 5], 50, 10.0);
    check_both_orders(|x| to_scalar(&tracked_fft2(x, None, None, UNNORM)?), &mat);
}

#[test]
fn test_ifft2() {
    let mat = randn(&[5, 5], 51, 1.0);
    check_both_orders(|x| to_scalar(&tracked_ifft2(x, None, None, UNNORM)?), &mat);
}

#[test]
fn test_fft2_complex_input() {
    let mat = crandn(&[5, 4], 70, 10.0);
    check_both_orders(|x| to_scalar(&tracked_fft2(x, None, None, UNNORM)?), &mat);
}

#[test]
fn test_ifft2_complex_input() {
    let mat = crandn(&[5, 4], 71, 10.0);
    check_both_orders(|x| to_scalar(&tracked_ifft2(x, None, None, UNNORM)?), &mat);
}

#[test]
fn test_fftn_complex_input() {
    let mat = crandn(&[3, 4, 5], 72, 10.0);
    check_both_orders(|x| to_scalar(&tracked_fftn(x, None, None, UNNORM)?), &mat);
}

#[test]
fn test_ifftn_complex_input() {
    let mat = crandn(&[3, 4, 5], 73, 10.0);
    check_both_orders(|x| to_scalar(&tracked_ifftn(x, None, None, ORTHO)?), &mat);
}

#[test]
fn test_fftn() {
    let mat = randn(&[5, 5], 52, 10.0);
    check_both_orders(|x| to_scalar(&tracked_fftn(x, None, None, UNNORM)?), &mat);
}

#[test]
fn test_fftn_ortho() {
    let mat = randn(&[3, 4, 5], 53, 1.0);
    check_both_orders(|x| to_scalar(&tracked_fftn(x, None, None, ORTHO)?), &mat);
}

#[test]
fn test_ifftn() {
    let mat = randn(&[5, 5], 54, 1.0);
    check_both_orders(|x| to_scalar(&tracked_ifftn(x, None, None, UNNORM)?), &mat);
}

#[test]
fn test_rfft2() {
    let mat = randn(&[4, 4], 55, 10.0);
    check_both_orders(|x| to_scalar(&tracked_rfft2(x, None, None, UNNORM)?), &mat);
}

#[test]
fn test_irfft2() {
    let mat = hermitian_2d(randn(&[4, 4], 56, 10.0));
    check_both_orders(|x| to_scalar(&tracked_irfft2(x, None, None, UNNORM)?), &mat);
}

#[test]
fn test_rfftn() {
    let mat = randn(&[4, 4, 4], 57, 10.0);
    check_both_orders(|x| to_scalar(&tracked_rfftn(x, None, None, UNNORM)?), &mat);
}

#[test]
fn test_rfftn_ortho() {
    let mat = randn(&[4, 4, 4], 58, 10.0);
    check_both_orders(|x| to_scalar(&tracked_rfftn(x, None, None, ORTHO)?), &mat);
}

#[test]
fn test_rfftn_axes() {
    let mat = randn(&[4, 4, 4], 59, 10.0);
    check_both_orders(
        |x| to_scalar(&tracked_rfftn(x, None, Some(&[0, 2]), UNNORM)?),
        &mat,
    );
}

#[test]
fn test_irfftn() {
    let mat = hermitian_nd(randn(&[4, 4, 4], 60, 10.0));
    check_both_orders(|x| to_scalar(&tracked_irfftn(x, None, None, UNNORM)?), &mat);
}

#[test]
fn test_irfftn_ortho() {
    let mat = hermitian_nd(randn(&[4, 4, 4], 61, 10.0));
    check_both_orders(|x| to_scalar(&tracked_irfftn(x, None, None, ORTHO)?), &mat);
}

// ---------------------------------------------------------------------------
// Output subsets

fn subset() -> Vec<Vec<usize>> {
    vec![vec![0, 1, 0], vec![3, 3, 2]]
}

#[test]
fn test_rfftn_subset() {
    let mat = randn(&[4, 4, 4], 70, 10.0);
    check_both_orders(
        |x| {
            let y = tracked_rfftn(x, None, None, UNNORM)?;
            to_scalar(&tracked_select(&y, &subset())?)
        },
        &mat,
    );
}

#[test]
fn test_irfftn_subset() {
    let mat = hermitian_nd(randn(&[4, 4, 4], 71, 10.0));
    check_both_orders(
        |x| {
            let y = tracked_irfftn(x, None, None, UNNORM)?;
            to_scalar(&tracked_select(&y, &subset())?)
        },
        &mat,
    );
}

// ---------------------------------------------------------------------------
// Unsupported cases

#[test]
fn test_rfftn_odd_not_implemented() {
    let mat = randn(&[5, 5, 5], 80, 10.0);
    let fun = |x: &TrackedArray| to_scalar(&tracked_rfftn(x, None, None, UNNORM)?);
    for _ in 0..2 {
        let err = check_grads(fun, &mat).unwrap_err();
        assert!(matches!(err, FftError::NotImplemented(_)), "got {err:?}");
    }
}

#[test]
fn test_irfft_odd_not_implemented() {
    let mat = hermitian_1d(randn(&[4, 4], 81, 10.0));
    let fun = |x: &TrackedArray| to_scalar(&tracked_irfft(x, Some(5), None, UNNORM)?);
    let err = check_grads(fun, &mat).unwrap_err();
    assert!(matches!(err, FftError::NotImplemented(_)));
}

#[test]
fn test_repeated_axes_unsupported() {
    let mat = randn(&[5, 5, 5], 82, 10.0);
    let funs: [MultiAxis; 4] = [tracked_fft2, tracked_ifft2, tracked_fftn, tracked_ifftn];
    for fft_fun in funs {
        clear_graph();
        let x = TrackedArray::leaf(mat.clone());
        // the forward pass is still computed, last listed size applied last
        let y = fft_fun(&x, Some(&[7, 3]), Some(&[0, 0]), UNNORM).unwrap();
        assert_eq!(y.shape(), &[7, 5, 5]);
        let err = backward(&to_scalar(&y).unwrap()).unwrap_err();
        assert_eq!(err, FftError::UnsupportedAxes { axes: vec![0, 0] });
    }
}

#[test]
fn test_invalid_size() {
    let x = TrackedArray::new(randn(&[4, 4], 83, 1.0));
    let err = tracked_fft2(&x, Some(&[4, 0]), None, UNNORM).unwrap_err();
    assert_eq!(err, FftError::InvalidSize { axis: 1, size: 0 });
}

#[test]
fn test_axis_out_of_range() {
    let x = TrackedArray::new(randn(&[4, 4], 84, 1.0));
    let err = tracked_fft(&x, None, Some(2), UNNORM).unwrap_err();
    assert_eq!(err, FftError::AxisOutOfRange { axis: 2, ndim: 2 });
}

#[test]
fn test_hand_built_spec_without_axes() {
    let x = TrackedArray::leaf(randn(&[4, 4], 85, 1.0));
    for kind in [TransformKind::Rfftn, TransformKind::Irfftn, TransformKind::Ifftn] {
        let spec = TransformSpec {
            axes: vec![],
            sizes: vec![],
            norm: UNNORM,
        };
        let err = tracked_transform(kind, &x, spec).unwrap_err();
        assert!(matches!(err, FftError::InvalidOperation(_)), "{kind}: {err}");
    }
    let spec = TransformSpec {
        axes: vec![0, 1],
        sizes: vec![4],
        norm: UNNORM,
    };
    let err = tracked_transform(TransformKind::Fftn, &x, spec).unwrap_err();
    assert_eq!(err, FftError::SizeAxesMismatch { sizes: 1, axes: 2 });
}

#[test]
fn test_rfft_rejects_complex_input() {
    let x = TrackedArray::new(Array::zeros(&[4], DType::Complex));
    let err = tracked_rfft(&x, None, None, UNNORM).unwrap_err();
    assert!(matches!(err, FftError::DTypeMismatch { .. }));
}

// ---------------------------------------------------------------------------
// Shifts

#[test]
fn test_fftshift() {
    let mat = randn(&[5, 5], 90, 10.0);
    check_both_orders(|x| to_scalar(&tracked_fftshift(x, None)?), &mat);
}

#[test]
fn test_fftshift_even() {
    let mat = randn(&[4, 4], 91, 10.0);
    check_both_orders(|x| to_scalar(&tracked_fftshift(x, None)?), &mat);
}

#[test]
fn test_fftshift_axes() {
    let mat = randn(&[5, 5], 92, 10.0);
    check_both_orders(|x| to_scalar(&tracked_fftshift(x, Some(&[1]))?), &mat);
}

#[test]
fn test_ifftshift() {
    let mat = randn(&[5, 5], 93, 1.0);
    check_both_orders(|x| to_scalar(&tracked_ifftshift(x, None)?), &mat);
}

#[test]
fn test_ifftshift_even() {
    let mat = randn(&[4, 4], 94, 1.0);
    check_both_orders(|x| to_scalar(&tracked_ifftshift(x, None)?), &mat);
}

#[test]
fn test_ifftshift_axes() {
    let mat = randn(&[5, 5], 95, 1.0);
    check_both_orders(|x| to_scalar(&tracked_ifftshift(x, Some(&[1]))?), &mat);
}

#[test]
fn test_shift_then_fft_chain() {
    let mat = randn(&[4, 5], 96, 10.0);
    check_both_orders(
        |x| {
            let y = tracked_fftshift(&tracked_fft2(x, None, None, UNNORM)?, None)?;
            to_scalar(&tracked_ifftshift(&y, Some(&[0]))?)
        },
        &mat,
    );
}
