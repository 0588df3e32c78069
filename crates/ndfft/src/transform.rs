//! Transform call signatures and their resolution into a [`TransformSpec`].
//!
//! Every public transform accepts some combination of an optional length
//! (`n` / `s`), an optional axis list and a [`Normalization`]. Resolution
//! applies the NumPy defaults once, at forward-call time, so gradient rules
//! only ever see explicit, non-negative axes and explicit lengths.
//!
//! | family           | default axes                                   |
//! |------------------|------------------------------------------------|
//! | `fft`, `ifft`, `rfft`, `irfft` | last axis                        |
//! | `*2`             | last two axes                                  |
//! | `*n`             | all axes, or the last `len(s)` when `s` is given |
//! | shifts           | all axes                                       |

use std::fmt;
use std::str::FromStr;

use crate::error::{FftError, Result};

/// Scaling convention of a forward/inverse transform pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Normalization {
    /// Forward transform unscaled, inverse scaled by `1/N`.
    #[default]
    Unnormalized,
    /// Both directions scaled by `1/sqrt(N)`.
    Orthonormal,
}

impl Normalization {
    /// Factor applied after an unscaled forward transform of `n` points.
    pub fn forward_scale(self, n: usize) -> f64 {
        match self {
            Normalization::Unnormalized => 1.0,
            Normalization::Orthonormal => 1.0 / (n as f64).sqrt(),
        }
    }

    /// Factor applied after an unscaled inverse transform of `n` points.
    pub fn inverse_scale(self, n: usize) -> f64 {
        match self {
            Normalization::Unnormalized => 1.0 / n as f64,
            Normalization::Orthonormal => 1.0 / (n as f64).sqrt(),
        }
    }
}

impl FromStr for Normalization {
    type Err = FftError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "backward" | "unnormalized" => Ok(Normalization::Unnormalized),
            "ortho" | "orthonormal" => Ok(Normalization::Orthonormal),
            other => Err(FftError::UnknownNormalization(other.to_string())),
        }
    }
}

impl fmt::Display for Normalization {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Normalization::Unnormalized => "unnormalized",
            Normalization::Orthonormal => "orthonormal",
        })
    }
}

/// How many axes a transform entry point covers by default.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rank {
    One,
    Two,
    N,
}

/// Group of transforms sharing one adjoint rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TransformFamily {
    ComplexForward,
    ComplexInverse,
    RealForward,
    RealInverse,
    Shift,
}

/// Closed set of differentiable transform primitives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TransformKind {
    Fft,
    Ifft,
    Rfft,
    Irfft,
    Fft2,
    Ifft2,
    Rfft2,
    Irfft2,
    Fftn,
    Ifftn,
    Rfftn,
    Irfftn,
    FftShift,
    IfftShift,
}

impl TransformKind {
    pub const ALL: [TransformKind; 14] = [
        TransformKind::Fft,
        TransformKind::Ifft,
        TransformKind::Rfft,
        TransformKind::Irfft,
        TransformKind::Fft2,
        TransformKind::Ifft2,
        TransformKind::Rfft2,
        TransformKind::Irfft2,
        TransformKind::Fftn,
        TransformKind::Ifftn,
        TransformKind::Rfftn,
        TransformKind::Irfftn,
        TransformKind::FftShift,
        TransformKind::IfftShift,
    ];

    pub fn name(self) -> &'static str {
        match self {
            TransformKind::Fft => "fft",
            TransformKind::Ifft => "ifft",
            TransformKind::Rfft => "rfft",
            TransformKind::Irfft => "irfft",
            TransformKind::Fft2 => "fft2",
            TransformKind::Ifft2 => "ifft2",
            TransformKind::Rfft2 => "rfft2",
            TransformKind::Irfft2 => "irfft2",
            TransformKind::Fftn => "fftn",
            TransformKind::Ifftn => "ifftn",
            TransformKind::Rfftn => "rfftn",
            TransformKind::Irfftn => "irfftn",
            TransformKind::FftShift => "fftshift",
            TransformKind::IfftShift => "ifftshift",
        }
    }

    pub fn family(self) -> TransformFamily {
        use TransformKind::*;
        match self {
            Fft | Fft2 | Fftn => TransformFamily::ComplexForward,
            Ifft | Ifft2 | Ifftn => TransformFamily::ComplexInverse,
            Rfft | Rfft2 | Rfftn => TransformFamily::RealForward,
            Irfft | Irfft2 | Irfftn => TransformFamily::RealInverse,
            FftShift | IfftShift => TransformFamily::Shift,
        }
    }

    pub fn rank(self) -> Rank {
        use TransformKind::*;
        match self {
            Fft | Ifft | Rfft | Irfft => Rank::One,
            Fft2 | Ifft2 | Rfft2 | Irfft2 => Rank::Two,
            Fftn | Ifftn | Rfftn | Irfftn | FftShift | IfftShift => Rank::N,
        }
    }

    /// The transform of the same rank running in the opposite direction.
    pub fn inverse(self) -> TransformKind {
        use TransformKind::*;
        match self {
            Fft => Ifft,
            Ifft => Fft,
            Rfft => Irfft,
            Irfft => Rfft,
            Fft2 => Ifft2,
            Ifft2 => Fft2,
            Rfft2 => Irfft2,
            Irfft2 => Rfft2,
            Fftn => Ifftn,
            Ifftn => Fftn,
            Rfftn => Irfftn,
            Irfftn => Rfftn,
            FftShift => IfftShift,
            IfftShift => FftShift,
        }
    }
}

impl fmt::Display for TransformKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Resolved parameters of one forward transform call.
///
/// `axes[i]` is transformed to length `sizes[i]`. For the real families the
/// last entry of `sizes` is the full signal length, not the number of
/// half-spectrum bins.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransformSpec {
    pub axes: Vec<usize>,
    pub sizes: Vec<usize>,
    pub norm: Normalization,
}

impl TransformSpec {
    /// Resolve user arguments against an input of shape `shape`.
    ///
    /// # Errors
    ///
    /// - `AxisOutOfRange` for an axis outside `-ndim..ndim`
    /// - `SizeAxesMismatch` when `sizes` and `axes` disagree in length, or
    ///   when a 1-D entry point receives more than one axis
    /// - `InvalidSize` for a zero length, given or defaulted
    ///
    /// # Examples
    ///
    /// ```
    /// use ndfft::{Normalization, TransformKind, TransformSpec};
    ///
    /// let spec = TransformSpec::resolve(
    ///     TransformKind::Irfftn,
    ///     &[4, 4, 3],
    ///     None,
    ///     None,
    ///     Normalization::Unnormalized,
    /// )
    /// .unwrap();
    /// assert_eq!(spec.axes, vec![0, 1, 2]);
    /// assert_eq!(spec.sizes, vec![4, 4, 4]);
    /// ```
    pub fn resolve(
        kind: TransformKind,
        shape: &[usize],
        sizes: Option<&[usize]>,
        axes: Option<&[isize]>,
        norm: Normalization,
    ) -> Result<Self> {
        let ndim = shape.len();
        let axes: Vec<usize> = match axes {
            Some(axes) => axes
                .iter()
                .map(|&a| normalize_axis(a, ndim))
                .collect::<Result<_>>()?,
            None => default_axes(kind.rank(), ndim, sizes.map(<[usize]>::len))?,
        };

        if kind.rank() == Rank::One && axes.len() != 1 {
            return Err(FftError::SizeAxesMismatch {
                sizes: 1,
                axes: axes.len(),
            });
        }

        let sizes = match sizes {
            Some(sizes) => {
                if sizes.len() != axes.len() {
                    return Err(FftError::SizeAxesMismatch {
                        sizes: sizes.len(),
                        axes: axes.len(),
                    });
                }
                sizes.to_vec()
            }
            None => {
                let mut sizes: Vec<usize> = axes.iter().map(|&a| shape[a]).collect();
                if kind.family() == TransformFamily::RealInverse {
                    if let (Some(last), Some(&axis)) = (sizes.last_mut(), axes.last()) {
                        *last = 2 * shape[axis].saturating_sub(1);
                    }
                }
                sizes
            }
        };

        let spec = Self { axes, sizes, norm };
        spec.validate(kind, ndim)?;
        Ok(spec)
    }

    /// Check a spec against the kind it is used with and the input rank.
    ///
    /// Specs built by [`resolve`](Self::resolve) always pass; this guards
    /// specs assembled by hand.
    pub fn validate(&self, kind: TransformKind, ndim: usize) -> Result<()> {
        if self.sizes.len() != self.axes.len() {
            return Err(FftError::SizeAxesMismatch {
                sizes: self.sizes.len(),
                axes: self.axes.len(),
            });
        }
        if let Some(&axis) = self.axes.iter().find(|&&a| a >= ndim) {
            return Err(FftError::AxisOutOfRange {
                axis: axis as isize,
                ndim,
            });
        }
        if kind.family() != TransformFamily::Shift {
            if self.axes.is_empty() {
                return Err(FftError::InvalidOperation(format!(
                    "{kind} needs at least one axis"
                )));
            }
            let zero = self.axes.iter().zip(&self.sizes).find(|&(_, &n)| n == 0);
            if let Some((&axis, &size)) = zero {
                return Err(FftError::InvalidSize { axis, size });
            }
        }
        Ok(())
    }

    /// Product of the transformed lengths.
    pub fn n_total(&self) -> usize {
        self.sizes.iter().product()
    }

    /// Axis holding the half spectrum of a real transform.
    pub fn last_axis(&self) -> Option<usize> {
        self.axes.last().copied()
    }

    /// Full signal length along [`last_axis`](Self::last_axis).
    pub fn last_size(&self) -> Option<usize> {
        self.sizes.last().copied()
    }

    /// Axes listed more than once, in first-repeat order.
    pub fn repeated_axes(&self) -> Vec<usize> {
        let mut seen = Vec::with_capacity(self.axes.len());
        let mut repeated = Vec::new();
        for &axis in &self.axes {
            if seen.contains(&axis) {
                if !repeated.contains(&axis) {
                    repeated.push(axis);
                }
            } else {
                seen.push(axis);
            }
        }
        repeated
    }
}

/// Map a possibly negative axis onto `0..ndim`.
pub fn normalize_axis(axis: isize, ndim: usize) -> Result<usize> {
    let n = ndim as isize;
    let resolved = if axis < 0 { axis + n } else { axis };
    if (0..n).contains(&resolved) {
        Ok(resolved as usize)
    } else {
        Err(FftError::AxisOutOfRange { axis, ndim })
    }
}

fn default_axes(rank: Rank, ndim: usize, given_sizes: Option<usize>) -> Result<Vec<usize>> {
    let count = match rank {
        Rank::One => 1,
        Rank::Two => 2,
        Rank::N => given_sizes.unwrap_or(ndim),
    };
    if count > ndim {
        return Err(FftError::AxisOutOfRange {
            axis: -(count as isize),
            ndim,
        });
    }
    Ok((ndim - count..ndim).collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resolve(
        kind: TransformKind,
        shape: &[usize],
        sizes: Option<&[usize]>,
        axes: Option<&[isize]>,
    ) -> Result<TransformSpec> {
        TransformSpec::resolve(kind, shape, sizes, axes, Normalization::Unnormalized)
    }

    #[test]
    fn test_normalization_from_str() {
        assert_eq!("ortho".parse::<Normalization>().unwrap(), Normalization::Orthonormal);
        assert_eq!("backward".parse::<Normalization>().unwrap(), Normalization::Unnormalized);
        assert!(matches!(
            "forward".parse::<Normalization>(),
            Err(FftError::UnknownNormalization(_))
        ));
        assert_eq!(Normalization::default(), Normalization::Unnormalized);
    }

    #[test]
    fn test_default_axes_by_rank() {
        let shape = [5, 6, 7];
        assert_eq!(resolve(TransformKind::Fft, &shape, None, None).unwrap().axes, vec![2]);
        assert_eq!(resolve(TransformKind::Fft2, &shape, None, None).unwrap().axes, vec![1, 2]);
        assert_eq!(
            resolve(TransformKind::Fftn, &shape, None, None).unwrap().axes,
            vec![0, 1, 2]
        );
        let spec = resolve(TransformKind::Fftn, &shape, Some(&[3, 3]), None).unwrap();
        assert_eq!(spec.axes, vec![1, 2]);
        assert_eq!(spec.sizes, vec![3, 3]);
    }

    #[test]
    fn test_negative_axis_and_default_size() {
        let spec = resolve(TransformKind::Ifft, &[4, 9], None, Some(&[-2])).unwrap();
        assert_eq!(spec.axes, vec![0]);
        assert_eq!(spec.sizes, vec![4]);
    }

    #[test]
    fn test_irfft_default_length() {
        let spec = resolve(TransformKind::Irfft, &[4, 3], None, None).unwrap();
        assert_eq!(spec.sizes, vec![4]);
        let spec = resolve(TransformKind::Irfft2, &[4, 3], None, None).unwrap();
        assert_eq!(spec.sizes, vec![4, 4]);
    }

    #[test]
    fn test_invalid_sizes() {
        assert_eq!(
            resolve(TransformKind::Fft, &[4], Some(&[0]), None),
            Err(FftError::InvalidSize { axis: 0, size: 0 })
        );
        // a single half-spectrum bin implies a zero-length signal
        assert!(matches!(
            resolve(TransformKind::Irfft, &[1], None, None),
            Err(FftError::InvalidSize { .. })
        ));
    }

    #[test]
    fn test_argument_mismatches() {
        assert!(matches!(
            resolve(TransformKind::Fftn, &[4, 4], Some(&[4]), Some(&[0, 1])),
            Err(FftError::SizeAxesMismatch { .. })
        ));
        assert!(matches!(
            resolve(TransformKind::Fft, &[4, 4], None, Some(&[2])),
            Err(FftError::AxisOutOfRange { axis: 2, ndim: 2 })
        ));
        assert!(matches!(
            resolve(TransformKind::Fft2, &[4], None, None),
            Err(FftError::AxisOutOfRange { .. })
        ));
    }

    #[test]
    fn test_validate_hand_built_spec() {
        let spec = |axes: Vec<usize>, sizes: Vec<usize>| TransformSpec {
            axes,
            sizes,
            norm: Normalization::Unnormalized,
        };
        assert!(matches!(
            spec(vec![], vec![]).validate(TransformKind::Rfftn, 2),
            Err(FftError::InvalidOperation(_))
        ));
        assert!(spec(vec![], vec![]).validate(TransformKind::FftShift, 2).is_ok());
        assert_eq!(
            spec(vec![0, 1], vec![4]).validate(TransformKind::Fftn, 2),
            Err(FftError::SizeAxesMismatch { sizes: 1, axes: 2 })
        );
        assert_eq!(
            spec(vec![3], vec![4]).validate(TransformKind::Fft, 2),
            Err(FftError::AxisOutOfRange { axis: 3, ndim: 2 })
        );
        assert_eq!(
            spec(vec![1], vec![0]).validate(TransformKind::Ifft, 2),
            Err(FftError::InvalidSize { axis: 1, size: 0 })
        );
    }

    #[test]
    fn test_repeated_axes_are_kept() {
        let spec = resolve(TransformKind::Fftn, &[5, 5, 5], Some(&[7, 3]), Some(&[0, 0])).unwrap();
        assert_eq!(spec.axes, vec![0, 0]);
        assert_eq!(spec.repeated_axes(), vec![0]);
        assert_eq!(spec.n_total(), 21);
    }

    #[test]
    fn test_kind_inverse_is_involution() {
        for kind in TransformKind::ALL {
            assert_eq!(kind.inverse().inverse(), kind);
            assert_eq!(kind.inverse().rank(), kind.rank());
        }
    }

    #[test]
    fn test_scales() {
        assert_eq!(Normalization::Unnormalized.forward_scale(16), 1.0);
        assert_eq!(Normalization::Unnormalized.inverse_scale(16), 1.0 / 16.0);
        assert_eq!(Normalization::Orthonormal.forward_scale(16), 0.25);
        assert_eq!(Normalization::Orthonormal.inverse_scale(16), 0.25);
    }
}
