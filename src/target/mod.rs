//! Target functions to be minimized.
//!
//! A target is a pure, deterministic map from a fixed-length real vector to
//! a scalar score. Lower scores are better for every target in this crate.
//!
//! # Variants
//!
//! - [`Quadratic`]: convex bowl `Σ xᵢ²`, the sanity check
//! - [`Polynomial`]: univariate quartic with a shallow and a deep basin
//! - [`Multimodal`]: Rastrigin bowl with a lattice of local minima
//!
//! Targets are shared across a run as `Arc<dyn TargetFunction>` and looked
//! up by name through the [`TargetRegistry`].

mod functions;
mod registry;

pub use functions::{Multimodal, Polynomial, Quadratic};
pub use registry::TargetRegistry;

use crate::error::TargetError;

/// A real-valued objective over vectors of length [`dimension`](Self::dimension).
///
/// Implementors supply [`value`](Self::value); the provided
/// [`evaluate`](Self::evaluate) checks the input length first. Both must be
/// pure so that distinct candidates can be evaluated concurrently.
///
/// # Implementing
///
/// ```
/// use u_genopt::target::TargetFunction;
///
/// struct Abs;
///
/// impl TargetFunction for Abs {
///     fn name(&self) -> &str { "Abs" }
///     fn dimension(&self) -> usize { 1 }
///     fn value(&self, x: &[f64]) -> f64 { x[0].abs() }
/// }
///
/// assert_eq!(Abs.evaluate(&[-2.0]), Ok(2.0));
/// assert!(Abs.evaluate(&[1.0, 2.0]).is_err());
/// ```
pub trait TargetFunction: Send + Sync {
    /// Display name, also the registry key.
    fn name(&self) -> &str;

    /// Required genotype length (at least 1).
    fn dimension(&self) -> usize;

    /// Raw score of `x`. Callers guarantee `x.len() == self.dimension()`.
    fn value(&self, x: &[f64]) -> f64;

    /// Scores `x`, failing when its length differs from the dimension or the
    /// score is NaN.
    ///
    /// Override this for targets that can reject individual genotypes.
    fn evaluate(&self, x: &[f64]) -> Result<f64, TargetError> {
        let expected = self.dimension();
        if x.len() != expected {
            return Err(TargetError::DimensionMismatch {
                expected,
                actual: x.len(),
            });
        }
        let score = self.value(x);
        if score.is_nan() {
            return Err(TargetError::NotANumber);
        }
        Ok(score)
    }
}

impl std::fmt::Debug for dyn TargetFunction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TargetFunction")
            .field("name", &self.name())
            .field("dimension", &self.dimension())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Nan;

    impl TargetFunction for Nan {
        fn name(&self) -> &str {
            "Nan"
        }
        fn dimension(&self) -> usize {
            2
        }
        fn value(&self, _x: &[f64]) -> f64 {
            f64::NAN
        }
    }

    #[test]
    fn test_evaluate_rejects_wrong_length() {
        assert_eq!(
            Nan.evaluate(&[1.0]),
            Err(TargetError::DimensionMismatch {
                expected: 2,
                actual: 1
            })
        );
    }

    #[test]
    fn test_evaluate_rejects_nan() {
        assert_eq!(Nan.evaluate(&[1.0, 2.0]), Err(TargetError::NotANumber));
    }

    #[test]
    fn test_debug_shows_name_and_dimension() {
        let target: &dyn TargetFunction = &Nan;
        let text = format!("{target:?}");
        assert!(text.contains("Nan"));
        assert!(text.contains('2'));
    }
}
