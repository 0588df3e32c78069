//! Dense n-dimensional tensor.

use crate::error::{FftError, Result};
use crate::scalar::Scalar;
use crate::strides::{cartesian_to_linear, compute_strides};

/// A dense n-dimensional tensor stored in column-major order.
///
/// A tensor with an empty shape is a scalar holding exactly one element.
#[derive(Debug, Clone, PartialEq)]
pub struct Tensor<ElT: Scalar> {
    data: Vec<ElT>,
    shape: Vec<usize>,
    strides: Vec<usize>,
}

impl<ElT: Scalar> Tensor<ElT> {
    /// Create a zero-initialized tensor.
    ///
    /// # Examples
    ///
    /// ```
    /// use ndfft::Tensor;
    ///
    /// let t: Tensor<f64> = Tensor::zeros(&[2, 3, 4]);
    /// assert_eq!(t.shape(), &[2, 3, 4]);
    /// assert_eq!(t.len(), 24);
    /// ```
    pub fn zeros(shape: &[usize]) -> Self {
        Self::filled(shape, ElT::zero())
    }

    /// Create a tensor filled with ones.
    pub fn ones(shape: &[usize]) -> Self {
        Self::filled(shape, ElT::one())
    }

    /// Create a tensor with every element set to `value`.
    pub fn filled(shape: &[usize], value: ElT) -> Self {
        let len: usize = shape.iter().product();
        Self {
            data: vec![value; len],
            shape: shape.to_vec(),
            strides: compute_strides(shape),
        }
    }

    /// Create tensor from column-major data and shape.
    ///
    /// # Errors
    ///
    /// Returns `FftError::LengthMismatch` if data length doesn't match shape.
    ///
    /// # Examples
    ///
    /// ```
    /// use ndfft::Tensor;
    ///
    /// let t = Tensor::from_vec(vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0], &[2, 3]).unwrap();
    /// assert_eq!(t.get(&[1, 0]), Some(&2.0)); // column-major
    /// assert_eq!(t.get(&[0, 1]), Some(&3.0));
    /// ```
    pub fn from_vec(data: Vec<ElT>, shape: &[usize]) -> Result<Self> {
        let expected: usize = shape.iter().product();
        if data.len() != expected {
            return Err(FftError::LengthMismatch {
                expected,
                actual: data.len(),
            });
        }
        Ok(Self {
            data,
            shape: shape.to_vec(),
            strides: compute_strides(shape),
        })
    }

    /// Create a rank-0 tensor.
    pub fn scalar(value: ElT) -> Self {
        Self {
            data: vec![value],
            shape: Vec::new(),
            strides: Vec::new(),
        }
    }

    #[inline]
    pub fn shape(&self) -> &[usize] {
        &self.shape
    }

    #[inline]
    pub fn ndim(&self) -> usize {
        self.shape.len()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    #[inline]
    pub fn strides(&self) -> &[usize] {
        &self.strides
    }

    #[inline]
    pub fn data(&self) -> &[ElT] {
        &self.data
    }

    #[inline]
    pub fn data_mut(&mut self) -> &mut [ElT] {
        &mut self.data
    }

    /// Consume the tensor and return its column-major data.
    pub fn into_data(self) -> Vec<ElT> {
        self.data
    }

    #[inline]
    pub fn get_linear(&self, i: usize) -> Option<&ElT> {
        self.data.get(i)
    }

    /// Get element by cartesian indices.
    ///
    /// Returns `None` if indices are out of bounds or of the wrong rank.
    pub fn get(&self, indices: &[usize]) -> Option<&ElT> {
        if !self.in_bounds(indices) {
            return None;
        }
        self.data.get(cartesian_to_linear(indices, &self.strides))
    }

    /// Set element by cartesian indices.
    pub fn set(&mut self, indices: &[usize], value: ElT) -> Result<()> {
        for (&index, &dim_size) in indices.iter().zip(self.shape.iter()) {
            if index >= dim_size {
                return Err(FftError::IndexOutOfBounds { index, dim_size });
            }
        }
        if indices.len() != self.ndim() {
            return Err(FftError::ShapeMismatch {
                expected: self.shape.clone(),
                actual: indices.to_vec(),
            });
        }
        let linear = cartesian_to_linear(indices, &self.strides);
        self.data[linear] = value;
        Ok(())
    }

    /// Apply `f` to every element.
    pub fn map<U: Scalar>(&self, f: impl Fn(ElT) -> U) -> Tensor<U> {
        Tensor {
            data: self.data.iter().map(|&x| f(x)).collect(),
            shape: self.shape.clone(),
            strides: self.strides.clone(),
        }
    }

    /// Combine two tensors of identical shape element by element.
    pub fn zip_map<U: Scalar, V: Scalar>(
        &self,
        other: &Tensor<U>,
        f: impl Fn(ElT, U) -> V,
    ) -> Result<Tensor<V>> {
        if self.shape != other.shape {
            return Err(FftError::ShapeMismatch {
                expected: self.shape.clone(),
                actual: other.shape.clone(),
            });
        }
        Ok(Tensor {
            data: self
                .data
                .iter()
                .zip(other.data.iter())
                .map(|(&a, &b)| f(a, b))
                .collect(),
            shape: self.shape.clone(),
            strides: self.strides.clone(),
        })
    }

    fn in_bounds(&self, indices: &[usize]) -> bool {
        indices.len() == self.ndim()
            && indices
                .iter()
                .zip(self.shape.iter())
                .all(|(&idx, &dim)| idx < dim)
    }
}
