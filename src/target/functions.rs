//! Built-in target functions.

use std::f64::consts::PI;

use super::TargetFunction;

/// Quadratic bowl: f(x) = Σxᵢ²
///
/// Convex, separable, single minimum 0 at the origin. Dimension 1 by default.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Quadratic {
    dimension: usize,
}

impl Quadratic {
    /// Creates a quadratic bowl of the given dimension (at least 1).
    pub fn with_dimension(dimension: usize) -> Self {
        Self {
            dimension: dimension.max(1),
        }
    }
}

impl Default for Quadratic {
    fn default() -> Self {
        Self::with_dimension(1)
    }
}

impl TargetFunction for Quadratic {
    fn name(&self) -> &str {
        "Quadratic"
    }

    fn dimension(&self) -> usize {
        self.dimension
    }

    fn value(&self, x: &[f64]) -> f64 {
        x.iter().map(|xi| xi * xi).sum()
    }
}

/// Quartic polynomial: f(x) = x⁴ − 4x² + x
///
/// Univariate with two basins: the global minimum near x ≈ −1.47
/// (f ≈ −5.44) and a shallower local minimum near x ≈ 1.35 (f ≈ −2.62).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Polynomial;

impl TargetFunction for Polynomial {
    fn name(&self) -> &str {
        "Polynomial"
    }

    fn dimension(&self) -> usize {
        1
    }

    fn value(&self, x: &[f64]) -> f64 {
        let x = x[0];
        let x2 = x * x;
        x2 * x2 - 4.0 * x2 + x
    }
}

/// Rastrigin bowl: f(x) = 10n + Σ(xᵢ² − 10cos(2πxᵢ))
///
/// Highly multimodal with local minima near every integer lattice point.
/// Global minimum 0 at the origin. Dimension 2 by default.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Multimodal {
    dimension: usize,
}

impl Multimodal {
    /// Creates a Rastrigin bowl of the given dimension (at least 1).
    pub fn with_dimension(dimension: usize) -> Self {
        Self {
            dimension: dimension.max(1),
        }
    }
}

impl Default for Multimodal {
    fn default() -> Self {
        Self::with_dimension(2)
    }
}

impl TargetFunction for Multimodal {
    fn name(&self) -> &str {
        "Multimodal"
    }

    fn dimension(&self) -> usize {
        self.dimension
    }

    fn value(&self, x: &[f64]) -> f64 {
        let n = x.len() as f64;
        10.0 * n
            + x.iter()
                .map(|&xi| xi * xi - 10.0 * (2.0 * PI * xi).cos())
                .sum::<f64>()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quadratic_minimum_at_origin() {
        let q = Quadratic::default();
        assert_eq!(q.dimension(), 1);
        assert_eq!(q.evaluate(&[0.0]), Ok(0.0));
        assert_eq!(q.evaluate(&[-3.0]), Ok(9.0));
    }

    #[test]
    fn test_quadratic_dimension_floor() {
        assert_eq!(Quadratic::with_dimension(0).dimension(), 1);
        let q = Quadratic::with_dimension(3);
        assert_eq!(q.evaluate(&[1.0, 2.0, 2.0]), Ok(9.0));
    }

    #[test]
    fn test_polynomial_has_two_basins() {
        let p = Polynomial;
        let deep = p.value(&[-1.473]);
        let shallow = p.value(&[1.347]);
        let ridge = p.value(&[0.126]);
        assert!((deep - -5.444).abs() < 1e-2, "deep basin value {deep}");
        assert!((shallow - -2.619).abs() < 1e-2, "shallow basin value {shallow}");
        assert!(ridge > shallow && ridge > deep);
    }

    #[test]
    fn test_multimodal_global_and_local_minima() {
        let m = Multimodal::default();
        assert_eq!(m.dimension(), 2);
        assert!(m.value(&[0.0, 0.0]).abs() < 1e-12);

        // Near (1, 0) lies a local minimum, worse than the origin but better
        // than the ridge at (0.5, 0).
        let local = m.value(&[0.995, 0.0]);
        let ridge = m.value(&[0.5, 0.0]);
        assert!(local > 0.0 && local < ridge);
    }

    #[test]
    fn test_targets_are_deterministic() {
        let m = Multimodal::with_dimension(3);
        let x = [0.3, -1.7, 2.2];
        assert_eq!(m.value(&x), m.value(&x));
    }
}
