//! Random array construction.
//!
//! Gradient checks evaluate transforms at random points; everything here
//! accepts an explicit RNG so callers can seed it.

use rand::Rng;
use rand_distr::StandardNormal;

use crate::array::{Array, DType};
use crate::scalar::{Scalar, c64};
use crate::tensor::Tensor;

/// Types that can be sampled from a standard normal distribution.
pub trait RandomNormal: Scalar {
    fn sample_normal<R: Rng>(rng: &mut R) -> Self;
}

impl RandomNormal for f64 {
    fn sample_normal<R: Rng>(rng: &mut R) -> Self {
        rng.sample(StandardNormal)
    }
}

impl RandomNormal for c64 {
    fn sample_normal<R: Rng>(rng: &mut R) -> Self {
        // independent N(0, 1/2) parts so that E|z|^2 = 1
        let scale = std::f64::consts::FRAC_1_SQRT_2;
        c64::new(
            rng.sample::<f64, _>(StandardNormal) * scale,
            rng.sample::<f64, _>(StandardNormal) * scale,
        )
    }
}

impl<ElT: RandomNormal> Tensor<ElT> {
    /// Standard normal tensor drawn from `rng`.
    ///
    /// # Example
    ///
    /// ```
    /// use ndfft::Tensor;
    /// use rand::SeedableRng;
    /// use rand::rngs::StdRng;
    ///
    /// let t1: Tensor<f64> = Tensor::randn_with_rng(&[2, 3], &mut StdRng::seed_from_u64(42));
    /// let t2: Tensor<f64> = Tensor::randn_with_rng(&[2, 3], &mut StdRng::seed_from_u64(42));
    /// assert_eq!(t1, t2);
    /// ```
    pub fn randn_with_rng<R: Rng>(shape: &[usize], rng: &mut R) -> Self {
        let len: usize = shape.iter().product();
        let data: Vec<ElT> = (0..len).map(|_| ElT::sample_normal(rng)).collect();
        Self::from_vec(data, shape).expect("data length matches shape")
    }
}

impl Array {
    /// Standard normal array of the given element type.
    pub fn randn_with_rng<R: Rng>(shape: &[usize], dtype: DType, rng: &mut R) -> Self {
        match dtype {
            DType::Real => Array::Real(Tensor::randn_with_rng(shape, rng)),
            DType::Complex => Array::Complex(Tensor::randn_with_rng(shape, rng)),
        }
    }
}
