//! Evaluated candidate solutions.

use serde::{Deserialize, Serialize};

use crate::error::TargetError;
use crate::target::TargetFunction;

/// A genotype together with the fitness its target assigned to it.
///
/// Solutions are only created through [`Solution::evaluate`], so the cached
/// fitness always equals `target.evaluate(genes)` and is never observed
/// before evaluation. Lower fitness is better.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Solution {
    genes: Vec<f64>,
    fitness: f64,
}

impl Solution {
    /// Evaluates `genes` against `target`.
    pub fn evaluate(genes: Vec<f64>, target: &dyn TargetFunction) -> Result<Self, TargetError> {
        let fitness = target.evaluate(&genes)?;
        Ok(Self { genes, fitness })
    }

    pub fn genes(&self) -> &[f64] {
        &self.genes
    }

    pub fn fitness(&self) -> f64 {
        self.fitness
    }

    pub fn dimension(&self) -> usize {
        self.genes.len()
    }
}
