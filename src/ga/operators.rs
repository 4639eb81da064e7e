//! Real-valued genetic operators.
//!
//! Initialization, crossover and mutation for fixed-length `f64`
//! genotypes. The engine picks one policy per step from [`RunConfig`];
//! each policy is an enum so it can be swapped without touching the loop.
//!
//! # Crossover
//!
//! - [`Crossover::Blend`] (BLX-α): Eshelman & Schaffer (1993)
//! - [`Crossover::Arithmetic`]: random convex combination
//! - [`Crossover::Uniform`]: per-gene coin flip
//! - [`Crossover::SinglePoint`]: prefix of one parent, suffix of the other
//!
//! # Mutation
//!
//! - [`Mutation::Gaussian`]: add `mx · N(0, 1)`
//! - [`Mutation::Uniform`]: add a uniform delta in `[-mx, mx]`
//!
//! [`RunConfig`]: super::RunConfig

use rand::Rng;
use rand_distr::StandardNormal;

/// Whether `lo..=hi` can be sampled uniformly without the width overflowing.
pub(crate) fn is_sampleable(lo: f64, hi: f64) -> bool {
    lo <= hi && ((hi - lo) / (1.0 - f64::EPSILON)).is_finite()
}

/// Per-dimension box `[start - space, start + space]`.
#[derive(Debug, Clone, PartialEq)]
pub struct Bounds {
    lower: Vec<f64>,
    upper: Vec<f64>,
}

impl Bounds {
    /// Builds the box centered on `center` with half-widths `half_width`.
    ///
    /// # Panics
    /// Panics if the slices differ in length or a half-width is negative.
    pub fn around(center: &[f64], half_width: &[f64]) -> Self {
        assert_eq!(
            center.len(),
            half_width.len(),
            "center and half-width must have equal length"
        );
        assert!(
            half_width.iter().all(|&w| w >= 0.0),
            "half-widths must be non-negative"
        );
        let lower = center.iter().zip(half_width).map(|(c, w)| c - w).collect();
        let upper = center.iter().zip(half_width).map(|(c, w)| c + w).collect();
        Self { lower, upper }
    }

    pub fn dimension(&self) -> usize {
        self.lower.len()
    }

    pub fn lower(&self) -> &[f64] {
        &self.lower
    }

    pub fn upper(&self) -> &[f64] {
        &self.upper
    }

    /// Index of the first interval too wide to sample, if any.
    pub fn first_overflow(&self) -> Option<usize> {
        self.lower
            .iter()
            .zip(&self.upper)
            .position(|(&lo, &hi)| !is_sampleable(lo, hi))
    }

    /// Draws a genotype uniformly from the box.
    ///
    /// Intervals reported by [`Bounds::first_overflow`] yield their lower end.
    pub fn sample<R: Rng>(&self, rng: &mut R) -> Vec<f64> {
        self.lower
            .iter()
            .zip(&self.upper)
            .map(|(&lo, &hi)| {
                if is_sampleable(lo, hi) {
                    rng.random_range(lo..=hi)
                } else {
                    lo
                }
            })
            .collect()
    }

    /// Clamps gene `index` into its interval.
    pub fn clamp(&self, index: usize, value: f64) -> f64 {
        value.clamp(self.lower[index], self.upper[index])
    }

    /// Clamps every gene into its interval.
    pub fn clamp_all(&self, genes: &mut [f64]) {
        for (i, gene) in genes.iter_mut().enumerate() {
            *gene = self.clamp(i, *gene);
        }
    }

    pub fn contains(&self, genes: &[f64]) -> bool {
        genes.len() == self.dimension()
            && genes
                .iter()
                .zip(self.lower.iter().zip(&self.upper))
                .all(|(g, (lo, hi))| lo <= g && g <= hi)
    }
}

/// What happens to genes that leave the search box.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum BoundPolicy {
    /// Recombined and mutated genes are clamped back into
    /// `start ± space`. Genes that no operator touched are left as is.
    #[default]
    Clamp,

    /// The search box only shapes generation 0.
    Unbounded,
}

/// Recombination of two parents into one offspring.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Crossover {
    /// BLX-α: each gene uniform in `[lo - α·d, hi + α·d]` where `lo`, `hi`
    /// are the parents' genes and `d = hi - lo`.
    Blend { alpha: f64 },

    /// `λ·p1 + (1-λ)·p2` with a single `λ ~ U[0, 1]` for the whole vector.
    Arithmetic,

    /// Each gene copied from either parent with probability 1/2.
    Uniform,

    /// Genes `[0, k)` from parent 1, `[k, n)` from parent 2, `k ∈ [1, n)`.
    ///
    /// One-dimensional genotypes have no cut point and copy parent 1.
    SinglePoint,
}

impl Default for Crossover {
    fn default() -> Self {
        Crossover::Blend { alpha: 0.5 }
    }
}

impl Crossover {
    /// Produces one offspring from two equal-length parents.
    ///
    /// # Panics
    /// Panics if the parents differ in length.
    pub fn recombine<R: Rng>(&self, parent1: &[f64], parent2: &[f64], rng: &mut R) -> Vec<f64> {
        assert_eq!(
            parent1.len(),
            parent2.len(),
            "parents must have equal length"
        );
        let n = parent1.len();

        match *self {
            Crossover::Blend { alpha } => parent1
                .iter()
                .zip(parent2)
                .map(|(&a, &b)| {
                    let lo = a.min(b);
                    let hi = a.max(b);
                    let range = hi - lo;
                    if range.is_nan() || range < 1e-15 {
                        return lo;
                    }
                    let (from, to) = (lo - alpha * range, hi + alpha * range);
                    if is_sampleable(from, to) {
                        rng.random_range(from..=to)
                    } else {
                        lo
                    }
                })
                .collect(),
            Crossover::Arithmetic => {
                let lambda: f64 = rng.random();
                parent1
                    .iter()
                    .zip(parent2)
                    .map(|(&a, &b)| lambda * a + (1.0 - lambda) * b)
                    .collect()
            }
            Crossover::Uniform => parent1
                .iter()
                .zip(parent2)
                .map(|(&a, &b)| if rng.random_bool(0.5) { a } else { b })
                .collect(),
            Crossover::SinglePoint => {
                if n < 2 {
                    return parent1.to_vec();
                }
                let point = rng.random_range(1..n);
                let mut child = parent1.to_vec();
                child[point..].copy_from_slice(&parent2[point..]);
                child
            }
        }
    }
}

/// Shape of the perturbation added to a mutated gene.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Mutation {
    /// `magnitude · N(0, 1)`.
    #[default]
    Gaussian,

    /// Uniform in `[-magnitude, magnitude]`.
    Uniform,
}

impl Mutation {
    /// Draws one perturbation. Zero magnitude always yields 0.
    pub fn perturbation<R: Rng>(&self, magnitude: f64, rng: &mut R) -> f64 {
        if magnitude == 0.0 {
            return 0.0;
        }
        match self {
            Mutation::Gaussian => {
                let z: f64 = rng.sample(StandardNormal);
                magnitude * z
            }
            Mutation::Uniform => {
                let u: f64 = rng.random_range(-1.0..=1.0);
                magnitude * u
            }
        }
    }

    /// Mutates each gene independently with probability `rate`.
    ///
    /// Mutated genes are clamped into `bounds` when given. Returns the number
    /// of genes the rate gate selected, whether or not their value changed;
    /// the count is diagnostic only and the engine ignores it.
    pub fn apply<R: Rng>(
        &self,
        genes: &mut [f64],
        rate: f64,
        magnitude: f64,
        bounds: Option<&Bounds>,
        rng: &mut R,
    ) -> usize {
        let mut mutated = 0;
        for (i, gene) in genes.iter_mut().enumerate() {
            if rng.random_range(0.0..1.0) < rate {
                mutated += 1;
                let value = *gene + self.perturbation(magnitude, rng);
                *gene = match bounds {
                    Some(b) => b.clamp(i, value),
                    None => value,
                };
            }
        }
        mutated
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::create_rng;

    #[test]
    fn test_bounds_around_and_sample() {
        let bounds = Bounds::around(&[1.0, -2.0], &[0.5, 0.0]);
        assert_eq!(bounds.lower(), &[0.5, -2.0]);
        assert_eq!(bounds.upper(), &[1.5, -2.0]);

        let mut rng = create_rng(1);
        for _ in 0..200 {
            let genes = bounds.sample(&mut rng);
            assert!(bounds.contains(&genes), "{genes:?} escaped {bounds:?}");
            assert_eq!(genes[1], -2.0);
        }
    }

    #[test]
    fn test_bounds_clamp_all() {
        let bounds = Bounds::around(&[0.0, 0.0], &[1.0, 2.0]);
        let mut genes = vec![5.0, -3.0];
        bounds.clamp_all(&mut genes);
        assert_eq!(genes, vec![1.0, -2.0]);
        assert!(!bounds.contains(&[0.0]));
    }

    #[test]
    #[should_panic(expected = "half-widths must be non-negative")]
    fn test_bounds_negative_width_panics() {
        Bounds::around(&[0.0], &[-1.0]);
    }

    #[test]
    fn test_blend_stays_in_extended_range() {
        let mut rng = create_rng(3);
        let cx = Crossover::Blend { alpha: 0.5 };
        for _ in 0..500 {
            let child = cx.recombine(&[0.0, 4.0], &[2.0, 4.0], &mut rng);
            assert!((-1.0..=3.0).contains(&child[0]), "gene 0 = {}", child[0]);
            assert_eq!(child[1], 4.0);
        }
    }

    #[test]
    fn test_arithmetic_between_parents() {
        let mut rng = create_rng(4);
        for _ in 0..200 {
            let child = Crossover::Arithmetic.recombine(&[-1.0, 10.0], &[1.0, 20.0], &mut rng);
            assert!((-1.0..=1.0).contains(&child[0]));
            assert!((10.0..=20.0).contains(&child[1]));
        }
    }

    #[test]
    fn test_uniform_picks_parent_genes() {
        let mut rng = create_rng(5);
        let p1 = [1.0, 2.0, 3.0, 4.0];
        let p2 = [-1.0, -2.0, -3.0, -4.0];
        for _ in 0..100 {
            let child = Crossover::Uniform.recombine(&p1, &p2, &mut rng);
            for (i, g) in child.iter().enumerate() {
                assert!(*g == p1[i] || *g == p2[i]);
            }
        }
    }

    #[test]
    fn test_single_point_prefix_suffix() {
        let mut rng = create_rng(6);
        let p1 = [1.0, 1.0, 1.0, 1.0];
        let p2 = [2.0, 2.0, 2.0, 2.0];
        for _ in 0..100 {
            let child = Crossover::SinglePoint.recombine(&p1, &p2, &mut rng);
            assert_eq!(child[0], 1.0);
            assert_eq!(child[3], 2.0);
            assert!(child.windows(2).all(|w| w[0] <= w[1]));
        }
        assert_eq!(
            Crossover::SinglePoint.recombine(&[7.0], &[8.0], &mut rng),
            vec![7.0]
        );
    }

    #[test]
    fn test_zero_rate_never_mutates() {
        let mut rng = create_rng(7);
        let original = vec![0.5, -0.25, 3.0];
        let mut genes = original.clone();
        for _ in 0..100 {
            let n = Mutation::Gaussian.apply(&mut genes, 0.0, 1.0, None, &mut rng);
            assert_eq!(n, 0);
        }
        assert_eq!(genes, original);
    }

    #[test]
    fn test_zero_magnitude_is_noop() {
        let mut rng = create_rng(8);
        let original = vec![0.5, -0.25, 3.0];
        for mutation in [Mutation::Gaussian, Mutation::Uniform] {
            let mut genes = original.clone();
            let n = mutation.apply(&mut genes, 1.0, 0.0, None, &mut rng);
            assert_eq!(n, 3);
            assert_eq!(genes, original);
        }
    }

    #[test]
    fn test_full_rate_changes_every_gene() {
        let mut rng = create_rng(9);
        let original = vec![0.0; 8];
        let mut genes = original.clone();
        Mutation::Gaussian.apply(&mut genes, 1.0, 0.5, None, &mut rng);
        assert!(genes.iter().zip(&original).all(|(a, b)| a != b));
    }

    #[test]
    fn test_uniform_mutation_within_magnitude() {
        let mut rng = create_rng(10);
        for _ in 0..500 {
            let delta = Mutation::Uniform.perturbation(0.2, &mut rng);
            assert!((-0.2..=0.2).contains(&delta));
        }
    }

    #[test]
    fn test_wide_intervals_do_not_panic() {
        let mut rng = create_rng(12);
        let bounds = Bounds::around(&[0.0, 0.0], &[1.0, 1e308]);
        assert_eq!(bounds.first_overflow(), Some(1));
        let genes = bounds.sample(&mut rng);
        assert!((-1.0..=1.0).contains(&genes[0]));
        assert_eq!(genes[1], -1e308);

        let blend = Crossover::Blend { alpha: 0.5 };
        for _ in 0..50 {
            let child = blend.recombine(&[-1e308], &[1e308], &mut rng);
            assert_eq!(child, vec![-1e308]);
            let child = blend.recombine(&[f64::NEG_INFINITY], &[0.0], &mut rng);
            assert_eq!(child, vec![f64::NEG_INFINITY]);
        }

        for _ in 0..200 {
            let delta = Mutation::Uniform.perturbation(f64::MAX, &mut rng);
            assert!(delta.is_finite());
        }
    }

    #[test]
    fn test_mutation_clamped_to_bounds() {
        let mut rng = create_rng(11);
        let bounds = Bounds::around(&[0.0], &[0.1]);
        for _ in 0..200 {
            let mut genes = vec![0.0];
            Mutation::Gaussian.apply(&mut genes, 1.0, 10.0, Some(&bounds), &mut rng);
            assert!(bounds.contains(&genes));
        }
    }
}
