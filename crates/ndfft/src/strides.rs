//! Column-major index arithmetic.
//!
//! All tensors in this crate store their elements in column-major (Fortran)
//! order, so the first axis is the contiguous one.

/// Compute column-major strides from shape.
///
/// For shape [d0, d1, d2, ...], returns strides [1, d0, d0*d1, ...].
///
/// # Examples
///
/// ```
/// use ndfft::strides::compute_strides;
///
/// assert_eq!(compute_strides(&[3, 4, 5]), vec![1, 3, 12]);
/// assert_eq!(compute_strides(&[5]), vec![1]);
/// assert!(compute_strides(&[]).is_empty());
/// ```
pub fn compute_strides(shape: &[usize]) -> Vec<usize> {
    let mut strides = Vec::with_capacity(shape.len());
    let mut stride = 1;
    for &dim in shape {
        strides.push(stride);
        stride *= dim;
    }
    strides
}

/// Convert cartesian indices to a linear offset.
#[inline]
pub fn cartesian_to_linear(indices: &[usize], strides: &[usize]) -> usize {
    indices
        .iter()
        .zip(strides.iter())
        .map(|(&idx, &stride)| idx * stride)
        .sum()
}

/// Convert a linear offset to cartesian indices.
pub fn linear_to_cartesian(mut linear: usize, shape: &[usize]) -> Vec<usize> {
    let mut indices = Vec::with_capacity(shape.len());
    for &dim in shape {
        indices.push(linear % dim);
        linear /= dim;
    }
    indices
}

/// One-dimensional lanes of a tensor along a single axis.
///
/// A lane is the sequence of `len` elements that differ only in their index
/// along `axis`. Element `j` of the lane starting at `base` lives at
/// `base + j * stride`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AxisLanes {
    /// Distance between consecutive lane elements.
    pub stride: usize,
    /// Number of elements in each lane.
    pub len: usize,
    inner: usize,
    outer: usize,
}

impl AxisLanes {
    /// Describe the lanes of `shape` along `axis`.
    ///
    /// `axis` must be a valid axis of `shape`.
    pub fn new(shape: &[usize], axis: usize) -> Self {
        let inner: usize = shape[..axis].iter().product();
        let outer: usize = shape[axis + 1..].iter().product();
        Self {
            stride: inner,
            len: shape[axis],
            inner,
            outer,
        }
    }

    /// Number of lanes.
    pub fn count(&self) -> usize {
        self.inner * self.outer
    }

    /// Linear offsets of the first element of each lane.
    pub fn bases(&self) -> impl Iterator<Item = usize> + '_ {
        let block = self.inner * self.len;
        (0..self.outer).flat_map(move |o| (0..self.inner).map(move |i| o * block + i))
    }
}
