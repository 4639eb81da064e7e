//! Run configuration.
//!
//! [`RunConfig`] holds everything one run of the GA needs: the target, the
//! search box, the hyperparameters and the operator policies. It is built
//! once, passed whole into [`GeneticAlgorithm::run`], and validated there in
//! a single step.
//!
//! [`GeneticAlgorithm::run`]: super::GeneticAlgorithm::run

use std::sync::Arc;

use super::operators::{is_sampleable, BoundPolicy, Bounds, Crossover, Mutation};
use super::selection::Selection;
use crate::error::ConfigError;
use crate::target::TargetFunction;

/// Configuration for one GA run.
///
/// # Defaults
///
/// ```
/// use std::sync::Arc;
/// use u_genopt::ga::RunConfig;
/// use u_genopt::target::Multimodal;
///
/// let config = RunConfig::new(Arc::new(Multimodal::default()));
/// assert_eq!(config.population_size, 10);
/// assert_eq!(config.max_generations, 100);
/// assert_eq!(config.starting_values, vec![0.0, 0.0]);
/// assert_eq!(config.search_space, vec![1.0, 1.0]);
/// ```
///
/// # Builder Pattern
///
/// ```
/// use std::sync::Arc;
/// use u_genopt::ga::{RunConfig, Selection};
/// use u_genopt::target::Quadratic;
///
/// let config = RunConfig::new(Arc::new(Quadratic::default()))
///     .with_population_size(20)
///     .with_max_generations(50)
///     .with_crossover_rate(0.7)
///     .with_mutation_rate(0.1)
///     .with_mutation_magnitude(0.2)
///     .with_search_space(vec![5.0])
///     .with_selection(Selection::Rank)
///     .with_seed(42);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone)]
pub struct RunConfig {
    /// Function to minimize.
    pub target: Arc<dyn TargetFunction>,

    /// Probability that a parent pair is recombined (0.0–1.0).
    ///
    /// Otherwise the offspring is a copy of the first parent.
    pub crossover_rate: f64,

    /// Per-gene probability of mutation (0.0–1.0).
    pub mutation_rate: f64,

    /// Scale of the perturbation applied to a mutated gene.
    pub mutation_magnitude: f64,

    /// Number of solutions in every generation.
    pub population_size: usize,

    /// Center of the search box; one value per target dimension.
    pub starting_values: Vec<f64>,

    /// Half-width of the search box; one value per target dimension.
    pub search_space: Vec<f64>,

    /// Number of reproduction cycles after generation 0.
    pub max_generations: usize,

    /// Parent selection strategy.
    pub selection: Selection,

    /// Recombination operator.
    pub crossover: Crossover,

    /// Perturbation shape.
    pub mutation: Mutation,

    /// Whether offspring are clamped into the search box.
    pub bounds: BoundPolicy,

    /// Random seed for reproducibility. `None` uses a random seed.
    pub seed: Option<u64>,

    /// Whether to evaluate a generation in parallel.
    ///
    /// Only effective with the `parallel` feature.
    pub parallel: bool,
}

impl RunConfig {
    /// Creates a configuration for `target` with default hyperparameters,
    /// starting values of 0 and a search space of 1 in every dimension.
    pub fn new(target: Arc<dyn TargetFunction>) -> Self {
        let dimension = target.dimension();
        Self {
            target,
            crossover_rate: 0.7,
            mutation_rate: 0.8,
            mutation_magnitude: 0.2,
            population_size: 10,
            starting_values: vec![0.0; dimension],
            search_space: vec![1.0; dimension],
            max_generations: 100,
            selection: Selection::default(),
            crossover: Crossover::default(),
            mutation: Mutation::default(),
            bounds: BoundPolicy::default(),
            seed: None,
            parallel: false,
        }
    }

    /// Replaces the target. Starting values and search space are kept; call
    /// [`validate`](Self::validate) to check they still fit.
    pub fn with_target(mut self, target: Arc<dyn TargetFunction>) -> Self {
        self.target = target;
        self
    }

    pub fn with_crossover_rate(mut self, rate: f64) -> Self {
        self.crossover_rate = rate;
        self
    }

    pub fn with_mutation_rate(mut self, rate: f64) -> Self {
        self.mutation_rate = rate;
        self
    }

    pub fn with_mutation_magnitude(mut self, magnitude: f64) -> Self {
        self.mutation_magnitude = magnitude;
        self
    }

    pub fn with_population_size(mut self, n: usize) -> Self {
        self.population_size = n;
        self
    }

    pub fn with_starting_values(mut self, values: Vec<f64>) -> Self {
        self.starting_values = values;
        self
    }

    pub fn with_search_space(mut self, space: Vec<f64>) -> Self {
        self.search_space = space;
        self
    }

    pub fn with_max_generations(mut self, n: usize) -> Self {
        self.max_generations = n;
        self
    }

    pub fn with_selection(mut self, selection: Selection) -> Self {
        self.selection = selection;
        self
    }

    pub fn with_crossover(mut self, crossover: Crossover) -> Self {
        self.crossover = crossover;
        self
    }

    pub fn with_mutation(mut self, mutation: Mutation) -> Self {
        self.mutation = mutation;
        self
    }

    pub fn with_bounds(mut self, bounds: BoundPolicy) -> Self {
        self.bounds = bounds;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Validates the configuration.
    ///
    /// Dimension mismatches report the expected and actual lengths.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let expected = self.target.dimension();
        check_vector("starting values", &self.starting_values, expected)?;
        check_vector("search space", &self.search_space, expected)?;
        if let Some((index, &value)) = self
            .search_space
            .iter()
            .enumerate()
            .find(|(_, w)| **w < 0.0)
        {
            return Err(ConfigError::NegativeSearchSpace { index, value });
        }
        let bounds = Bounds::around(&self.starting_values, &self.search_space);
        if let Some(index) = bounds.first_overflow() {
            return Err(ConfigError::RangeOverflow {
                field: "search space",
                index,
            });
        }

        check_rate("crossover rate", self.crossover_rate)?;
        check_rate("mutation rate", self.mutation_rate)?;
        if !(self.mutation_magnitude >= 0.0 && self.mutation_magnitude.is_finite()) {
            return Err(ConfigError::NegativeMagnitude(self.mutation_magnitude));
        }
        if !is_sampleable(-self.mutation_magnitude, self.mutation_magnitude) {
            return Err(ConfigError::RangeOverflow {
                field: "mutation magnitude",
                index: 0,
            });
        }
        if self.population_size < 2 {
            return Err(ConfigError::PopulationTooSmall(self.population_size));
        }
        if self.max_generations == 0 {
            return Err(ConfigError::NoGenerations);
        }
        if let Crossover::Blend { alpha } = self.crossover {
            if !(alpha >= 0.0 && alpha.is_finite()) {
                return Err(ConfigError::Parse {
                    field: "blend alpha",
                    input: alpha.to_string(),
                });
            }
        }
        self.selection.validate()
    }
}

fn check_vector(field: &'static str, values: &[f64], expected: usize) -> Result<(), ConfigError> {
    if values.len() != expected {
        return Err(ConfigError::DimensionMismatch {
            field,
            expected,
            actual: values.len(),
        });
    }
    match values.iter().position(|v| !v.is_finite()) {
        Some(index) => Err(ConfigError::NonFinite { field, index }),
        None => Ok(()),
    }
}

fn check_rate(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::RateOutOfRange { field, value })
    }
}
