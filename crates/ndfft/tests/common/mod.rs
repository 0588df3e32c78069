//! Shared helpers for finite-difference gradient checks.

#![allow(dead_code)]

use approx::assert_relative_eq;
use ndfft::autodiff::{
    BackwardOptions, TrackedArray, backward, backward_with, clear_graph, tracked_real,
    tracked_sin, tracked_sum,
};
use ndfft::operations::elementwise::scale;
use ndfft::{Array, DType, Result, c64};
use rand::SeedableRng;
use rand::rngs::StdRng;

/// Central-difference step.
pub const EPS: f64 = 1e-6;

/// Absolute and relative tolerance of gradient comparisons.
pub const TOL: f64 = 1e-4;

/// `sum(real(sin(x)))`: a real scalar that depends on every entry of `x`.
pub fn to_scalar(x: &TrackedArray) -> Result<TrackedArray> {
    tracked_sum(&tracked_real(&tracked_sin(x)?)?)
}

/// Gradient of `fun` at `x`, recorded so that it can be differentiated again.
///
/// An untracked `x` is promoted to a fresh leaf first.
pub fn grad_of<F>(fun: &F, x: &TrackedArray) -> Result<TrackedArray>
where
    F: Fn(&TrackedArray) -> Result<TrackedArray>,
{
    let x = if x.requires_grad() {
        x.clone()
    } else {
        TrackedArray::leaf(x.value().clone())
    };
    let loss = fun(&x)?;
    let grads = backward_with(&loss, BackwardOptions::new().create_graph(true))?;
    Ok(grads
        .wrt(&x)
        .cloned()
        .unwrap_or_else(|| TrackedArray::new(Array::zeros(x.shape(), x.dtype()))))
}

/// `x -> to_scalar(grad fun(x))`, whose gradient involves second derivatives
/// of `fun`.
pub fn d_fun<F>(fun: F) -> impl Fn(&TrackedArray) -> Result<TrackedArray>
where
    F: Fn(&TrackedArray) -> Result<TrackedArray>,
{
    move |x| to_scalar(&grad_of(&fun, x)?)
}

fn evaluate<F>(fun: &F, x: Array) -> Result<f64>
where
    F: Fn(&TrackedArray) -> Result<TrackedArray>,
{
    clear_graph();
    fun(&TrackedArray::new(x))?.value().scalar_value()
}

fn perturbed(x: &Array, i: usize, delta: c64) -> Array {
    match x {
        Array::Real(t) => {
            let mut t = t.clone();
            t.data_mut()[i] += delta.re;
            Array::Real(t)
        }
        Array::Complex(t) => {
            let mut t = t.clone();
            t.data_mut()[i] += delta;
            Array::Complex(t)
        }
    }
}

/// Compute numerical gradient using central difference.
///
/// For complex entries the real and imaginary parts are perturbed
/// separately, giving `dL/dx + i dL/dy`.
pub fn numerical_gradient<F>(fun: &F, x: &Array, eps: f64) -> Result<Vec<c64>>
where
    F: Fn(&TrackedArray) -> Result<TrackedArray>,
{
    let directions: &[c64] = match x.dtype() {
        DType::Real => &[c64::new(1.0, 0.0)],
        DType::Complex => &[c64::new(1.0, 0.0), c64::new(0.0, 1.0)],
    };
    let mut grad = vec![c64::new(0.0, 0.0); x.len()];
    for (i, slot) in grad.iter_mut().enumerate() {
        for &d in directions {
            let plus = evaluate(fun, perturbed(x, i, d * eps))?;
            let minus = evaluate(fun, perturbed(x, i, -d * eps))?;
            *slot += d * ((plus - minus) / (2.0 * eps));
        }
    }
    Ok(grad)
}

/// Compare the gradient of `fun` at `x` with central differences.
///
/// Errors raised while computing the analytic gradient are returned; a
/// mismatch panics.
pub fn check_grads<F>(fun: F, x: &Array) -> Result<()>
where
    F: Fn(&TrackedArray) -> Result<TrackedArray>,
{
    clear_graph();
    let leaf = TrackedArray::leaf(x.clone());
    let loss = fun(&leaf)?;
    let grads = backward(&loss)?;
    let analytic = match grads.wrt(&leaf) {
        Some(g) => {
            assert_eq!(g.shape(), x.shape(), "gradient shape");
            assert_eq!(g.dtype(), x.dtype(), "gradient element type");
            g.value().complex_values()
        }
        None => vec![c64::new(0.0, 0.0); x.len()],
    };

    let numerical = numerical_gradient(&fun, x, EPS)?;
    for (a, n) in analytic.iter().zip(&numerical) {
        assert_relative_eq!(a.re, n.re, epsilon = TOL, max_relative = TOL);
        assert_relative_eq!(a.im, n.im, epsilon = TOL, max_relative = TOL);
    }
    Ok(())
}

/// First and second order checks of `fun` at `x`.
pub fn check_both_orders<F>(fun: F, x: &Array)
where
    F: Fn(&TrackedArray) -> Result<TrackedArray> + Clone,
{
    check_grads(fun.clone(), x).unwrap();
    check_grads(d_fun(fun), x).unwrap();
}

fn seeded(shape: &[usize], dtype: DType, seed: u64, divisor: f64) -> Array {
    let x = Array::randn_with_rng(shape, dtype, &mut StdRng::seed_from_u64(seed));
    scale(&x, 1.0 / divisor)
}

/// Seeded standard normal real array, divided by `divisor`.
pub fn randn(shape: &[usize], seed: u64, divisor: f64) -> Array {
    seeded(shape, DType::Real, seed, divisor)
}

/// Seeded complex normal array with `E|z|^2 = 1`, divided by `divisor`.
pub fn crandn(shape: &[usize], seed: u64, divisor: f64) -> Array {
    seeded(shape, DType::Complex, seed, divisor)
}

/// Value of `fun` on an untracked input.
pub fn eval_untracked<F>(fun: F, x: Array) -> Array
where
    F: Fn(&TrackedArray) -> Result<TrackedArray>,
{
    fun(&TrackedArray::new(x)).unwrap().value().clone()
}
