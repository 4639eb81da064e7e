//! Generation history recorded by a run.
//!
//! A [`GenerationHistory`] is appended to while a run is in progress and is
//! frozen behind an `Arc` once the run completes. Generation 0 is the
//! initial population; generation `n` is the population after the `n`th
//! reproduction cycle.

use serde::{Deserialize, Serialize};

use crate::solution::Solution;

/// One population snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Generation {
    index: usize,
    solutions: Vec<Solution>,
}

impl Generation {
    pub(crate) fn new(index: usize, solutions: Vec<Solution>) -> Self {
        Self { index, solutions }
    }

    /// Position of this generation in the run (0 = initial population).
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn solutions(&self) -> &[Solution] {
        &self.solutions
    }

    pub fn len(&self) -> usize {
        self.solutions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.solutions.is_empty()
    }

    /// The solution with the lowest fitness; the earliest one wins ties.
    pub fn best(&self) -> Option<&Solution> {
        self.solutions.iter().reduce(|best, s| {
            if s.fitness() < best.fitness() {
                s
            } else {
                best
            }
        })
    }

    /// Arithmetic mean of the fitness values, `None` when empty.
    pub fn mean_fitness(&self) -> Option<f64> {
        if self.solutions.is_empty() {
            return None;
        }
        let total: f64 = self.solutions.iter().map(Solution::fitness).sum();
        Some(total / self.solutions.len() as f64)
    }

    /// Fitness values in population order.
    pub fn fitness_values(&self) -> Vec<f64> {
        self.solutions.iter().map(Solution::fitness).collect()
    }
}

/// Ordered generations of one run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationHistory {
    target: String,
    generations: Vec<Generation>,
}

impl GenerationHistory {
    pub(crate) fn with_capacity(target: impl Into<String>, capacity: usize) -> Self {
        Self {
            target: target.into(),
            generations: Vec::with_capacity(capacity),
        }
    }

    pub(crate) fn push(&mut self, generation: Generation) {
        debug_assert_eq!(generation.index(), self.generations.len());
        self.generations.push(generation);
    }

    /// Name of the target the run optimized.
    pub fn target(&self) -> &str {
        &self.target
    }

    /// Number of generations, including generation 0.
    pub fn len(&self) -> usize {
        self.generations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.generations.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Generation> {
        self.generations.get(index)
    }

    pub fn first(&self) -> Option<&Generation> {
        self.generations.first()
    }

    pub fn last(&self) -> Option<&Generation> {
        self.generations.last()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Generation> {
        self.generations.iter()
    }

    pub fn generations(&self) -> &[Generation] {
        &self.generations
    }

    /// Population size, taken from generation 0.
    pub fn population_size(&self) -> usize {
        self.generations.first().map_or(0, Generation::len)
    }

    /// Best fitness of each generation, in generation order.
    ///
    /// This is the fitness-over-generations curve front ends plot.
    pub fn best_fitness_curve(&self) -> Vec<f64> {
        self.generations
            .iter()
            .filter_map(|g| g.best().map(Solution::fitness))
            .collect()
    }

    /// Best solution seen in any generation.
    pub fn best(&self) -> Option<&Solution> {
        self.generations
            .iter()
            .filter_map(Generation::best)
            .reduce(|best, s| if s.fitness() < best.fitness() { s } else { best })
    }
}

impl<'a> IntoIterator for &'a GenerationHistory {
    type Item = &'a Generation;
    type IntoIter = std::slice::Iter<'a, Generation>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::target::Quadratic;

    fn generation(index: usize, xs: &[f64]) -> Generation {
        let target = Quadratic::default();
        let solutions = xs
            .iter()
            .map(|&x| Solution::evaluate(vec![x], &target).unwrap())
            .collect();
        Generation::new(index, solutions)
    }

    #[test]
    fn test_generation_best_and_mean() {
        let g = generation(0, &[3.0, -1.0, 2.0]);
        assert_eq!(g.best().map(Solution::fitness), Some(1.0));
        let mean = g.mean_fitness().unwrap();
        assert!((mean - 14.0 / 3.0).abs() < 1e-12);
        assert_eq!(g.fitness_values(), vec![9.0, 1.0, 4.0]);
    }

    #[test]
    fn test_best_prefers_earliest_on_tie() {
        let g = generation(0, &[2.0, -1.0, 1.0]);
        assert_eq!(g.best().map(|s| s.genes()[0]), Some(-1.0));
    }

    #[test]
    fn test_empty_generation() {
        let g = Generation::new(0, Vec::new());
        assert!(g.is_empty());
        assert!(g.best().is_none());
        assert!(g.mean_fitness().is_none());
    }

    #[test]
    fn test_history_curve_and_best() {
        let mut history = GenerationHistory::with_capacity("Quadratic", 3);
        history.push(generation(0, &[3.0, 2.0]));
        history.push(generation(1, &[0.5, 4.0]));
        history.push(generation(2, &[1.0, 1.5]));

        assert_eq!(history.len(), 3);
        assert_eq!(history.target(), "Quadratic");
        assert_eq!(history.population_size(), 2);
        assert_eq!(history.best_fitness_curve(), vec![4.0, 0.25, 1.0]);
        assert_eq!(history.best().map(Solution::fitness), Some(0.25));
        assert_eq!(history.last().map(Generation::index), Some(2));
        assert_eq!((&history).into_iter().count(), 3);
    }
}
