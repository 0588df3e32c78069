//! Adjoint rules of the transform primitives.
//!
//! A rule maps the gradient of a transform's output to the gradient of its
//! input, given the resolved [`TransformSpec`] of the forward call and the
//! shape and element type of the input. Rules never touch array data
//! directly: they are compositions of tracked primitives (inverse
//! transforms, constant scalings, crop/pad, rolls), so differentiating a
//! rule again gives second derivatives.
//!
//! # Gradient convention
//!
//! For a real loss `L` and a complex entry `z = x + iy`, the gradient is
//! `dL/dx + i dL/dy`. Under this convention the VJP of a linear map `A` is
//! `A^H g`, and the gradient with respect to a real input is the real part of
//! the gradient with respect to its complex embedding.
//!
//! # Families
//!
//! | family           | kinds                      | adjoint                                  |
//! |------------------|----------------------------|------------------------------------------|
//! | complex forward  | `fft`, `fft2`, `fftn`      | `N * ifftn(g)`, resized                  |
//! | complex inverse  | `ifft`, `ifft2`, `ifftn`   | `fftn(g) / N`, resized                   |
//! | real forward     | `rfft`, `rfft2`, `rfftn`   | `N * irfftn(g / w)`, resized             |
//! | real inverse     | `irfft`, `irfft2`, `irfftn`| `rfftn(g) * w / N`, resized              |
//! | shift            | `fftshift`, `ifftshift`    | roll by the negated offsets              |
//!
//! `N` is the product of the transformed lengths and `w` the Hermitian bin
//! weights of [`hermitian::weights`]. With orthonormal scaling the factors of
//! `N` drop out.

pub mod hermitian;
mod rules;
pub mod shift;
pub mod size;

use std::collections::HashMap;
use std::fmt::Debug;
use std::sync::OnceLock;

use tracing::{debug, trace};

pub use rules::{
    ComplexForwardRule, ComplexInverseRule, RealForwardRule, RealInverseRule, ShiftRule,
};

use crate::array::{Array, DType};
use crate::autodiff::TrackedArray;
use crate::error::{FftError, Result};
use crate::transform::{TransformFamily, TransformKind, TransformSpec};

/// What a rule needs to know about the forward call's input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputInfo {
    pub shape: Vec<usize>,
    pub dtype: DType,
}

impl InputInfo {
    pub fn of(array: &Array) -> Self {
        Self {
            shape: array.shape().to_vec(),
            dtype: array.dtype(),
        }
    }
}

/// Vector-Jacobian product of one transform family.
///
/// Implementations are stateless and must return a gradient with
/// `input.shape` and `input.dtype`.
pub trait AdjointRule: Debug + Send + Sync {
    fn vjp(
        &self,
        grad: &TrackedArray,
        spec: &TransformSpec,
        input: &InputInfo,
    ) -> Result<TrackedArray>;
}

/// Immutable mapping from every [`TransformKind`] to its rule.
#[derive(Debug)]
pub struct AdjointRegistry {
    rules: HashMap<TransformKind, Box<dyn AdjointRule>>,
}

impl AdjointRegistry {
    fn build() -> Self {
        let rules: HashMap<TransformKind, Box<dyn AdjointRule>> = TransformKind::ALL
            .iter()
            .map(|&kind| (kind, rule_for(kind)))
            .collect();
        debug!(rules = rules.len(), "adjoint registry built");
        Self { rules }
    }

    pub fn rule(&self, kind: TransformKind) -> Option<&dyn AdjointRule> {
        self.rules.get(&kind).map(|rule| rule.as_ref())
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Run the rule of `kind` and check the gradient against the input.
    ///
    /// # Errors
    ///
    /// Whatever the rule raises (`UnsupportedAxes`, `NotImplemented`, ...),
    /// and `ShapeMismatch` if the produced gradient does not have the input's
    /// shape.
    pub fn apply(
        &self,
        kind: TransformKind,
        grad: &TrackedArray,
        spec: &TransformSpec,
        input: &InputInfo,
    ) -> Result<TrackedArray> {
        trace!(
            kind = %kind,
            axes = ?spec.axes,
            sizes = ?spec.sizes,
            norm = %spec.norm,
            "applying adjoint rule"
        );
        let rule = self
            .rule(kind)
            .ok_or_else(|| FftError::NotImplemented(format!("no adjoint rule for {kind}")))?;
        let out = rule.vjp(grad, spec, input)?;
        if out.shape() != input.shape.as_slice() {
            return Err(FftError::ShapeMismatch {
                expected: input.shape.clone(),
                actual: out.shape().to_vec(),
            });
        }
        Ok(out)
    }
}

fn rule_for(kind: TransformKind) -> Box<dyn AdjointRule> {
    match kind.family() {
        TransformFamily::ComplexForward => Box::new(ComplexForwardRule(kind)),
        TransformFamily::ComplexInverse => Box::new(ComplexInverseRule(kind)),
        TransformFamily::RealForward => Box::new(RealForwardRule(kind)),
        TransformFamily::RealInverse => Box::new(RealInverseRule(kind)),
        TransformFamily::Shift => Box::new(ShiftRule(kind)),
    }
}

/// The process-wide registry, built on first use.
pub fn registry() -> &'static AdjointRegistry {
    static REGISTRY: OnceLock<AdjointRegistry> = OnceLock::new();
    REGISTRY.get_or_init(AdjointRegistry::build)
}
