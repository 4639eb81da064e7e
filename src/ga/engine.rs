//! GA generational loop.
//!
//! [`GeneticAlgorithm`] orchestrates one run at a time:
//! initialization → evaluation → selection → crossover → mutation →
//! replacement → repeat, recording every generation. A completed history
//! is stored and published to the registered observers; a failed run
//! publishes nothing.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, RwLock};

use rand::Rng;
use tracing::instrument;

use super::config::RunConfig;
use super::operators::{BoundPolicy, Bounds};
use crate::algorithm::{Algorithm, RunObserver};
use crate::error::RunError;
use crate::history::{Generation, GenerationHistory};
use crate::random::rng_from;
use crate::solution::Solution;
use crate::target::TargetFunction;

/// Lifecycle of the engine.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum EngineState {
    /// No run has been attempted yet.
    #[default]
    Idle,
    /// A run is in progress; further runs are rejected with [`RunError::Busy`].
    Running,
    /// The last run completed and its history was published.
    Completed,
    /// The last run failed; the previously published history is unchanged.
    Failed,
}

/// Generational genetic algorithm over real-valued genotypes.
///
/// The engine is shareable across threads; [`run`](Self::run) takes `&self`
/// and rejects a second concurrent call with [`RunError::Busy`].
///
/// # Usage
///
/// ```
/// use std::sync::Arc;
/// use u_genopt::ga::{GeneticAlgorithm, RunConfig};
/// use u_genopt::target::Quadratic;
///
/// let ga = GeneticAlgorithm::new();
/// let config = RunConfig::new(Arc::new(Quadratic::default()))
///     .with_population_size(20)
///     .with_max_generations(30)
///     .with_seed(42);
///
/// let history = ga.run(config).unwrap();
/// assert_eq!(history.len(), 31);
/// assert!(ga.generations().is_some());
/// ```
#[derive(Default)]
pub struct GeneticAlgorithm {
    state: Mutex<EngineState>,
    history: RwLock<Option<Arc<GenerationHistory>>>,
    observers: RwLock<Vec<Arc<dyn RunObserver>>>,
}

impl GeneticAlgorithm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> EngineState {
        *lock(&self.state)
    }

    /// Runs the GA to completion.
    pub fn run(&self, config: RunConfig) -> Result<Arc<GenerationHistory>, RunError> {
        self.run_with_cancel(config, None)
    }

    /// Runs the GA with an optional cancellation token.
    ///
    /// If `cancel` is `Some` and the flag is set to `true`, the run stops
    /// before the next reproduction cycle and fails with
    /// [`RunError::Cancelled`]; nothing is published.
    #[instrument(
        level = "info",
        skip(self, config, cancel),
        fields(
            target = config.target.name(),
            population = config.population_size,
            generations = config.max_generations
        )
    )]
    pub fn run_with_cancel(
        &self,
        config: RunConfig,
        cancel: Option<Arc<AtomicBool>>,
    ) -> Result<Arc<GenerationHistory>, RunError> {
        let guard = self.begin()?;

        let outcome = config
            .validate()
            .map_err(RunError::from)
            .and_then(|()| evolve(&config, cancel.as_deref()));

        match outcome {
            Ok(history) => {
                let history = Arc::new(history);
                *self
                    .history
                    .write()
                    .unwrap_or_else(PoisonError::into_inner) = Some(history.clone());
                guard.finish(EngineState::Completed);

                tracing::info!(
                    generations = history.len(),
                    best_fitness = history.best().map(Solution::fitness),
                    "run complete"
                );
                self.notify(&history);
                Ok(history)
            }
            Err(err) => {
                guard.finish(EngineState::Failed);
                tracing::warn!(error = %err, "run failed");
                Err(err)
            }
        }
    }

    /// Registers an observer for future run completions.
    pub fn add_observer(&self, observer: Arc<dyn RunObserver>) {
        self.observers
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .push(observer);
    }

    /// History of the most recent successful run.
    pub fn generations(&self) -> Option<Arc<GenerationHistory>> {
        self.history
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Final generation of the most recent successful run.
    pub fn last_generation(&self) -> Option<Generation> {
        self.generations().and_then(|h| h.last().cloned())
    }

    fn begin(&self) -> Result<RunGuard<'_>, RunError> {
        let mut state = lock(&self.state);
        if *state == EngineState::Running {
            tracing::warn!("run rejected, engine busy");
            return Err(RunError::Busy);
        }
        *state = EngineState::Running;
        Ok(RunGuard {
            state: &self.state,
            finished: false,
        })
    }

    fn notify(&self, history: &Arc<GenerationHistory>) {
        // Snapshot so observers may register further observers or start runs.
        let observers: Vec<_> = self
            .observers
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone();
        for observer in observers {
            observer.on_run_complete(history.clone());
        }
    }
}

impl Algorithm for GeneticAlgorithm {
    type Config = RunConfig;

    fn name(&self) -> &str {
        "Genetic Algorithm"
    }

    fn add_observer(&self, observer: Arc<dyn RunObserver>) {
        GeneticAlgorithm::add_observer(self, observer)
    }

    fn run(&self, config: RunConfig) -> Result<Arc<GenerationHistory>, RunError> {
        GeneticAlgorithm::run(self, config)
    }

    fn generations(&self) -> Option<Arc<GenerationHistory>> {
        GeneticAlgorithm::generations(self)
    }
}

impl std::fmt::Debug for GeneticAlgorithm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeneticAlgorithm")
            .field("state", &self.state())
            .field("generations", &self.generations().map(|h| h.len()))
            .field(
                "observers",
                &self
                    .observers
                    .read()
                    .unwrap_or_else(PoisonError::into_inner)
                    .len(),
            )
            .finish()
    }
}

/// Leaves the `Running` state when the run ends, including by panic.
struct RunGuard<'a> {
    state: &'a Mutex<EngineState>,
    finished: bool,
}

impl RunGuard<'_> {
    fn finish(mut self, state: EngineState) {
        *lock(self.state) = state;
        self.finished = true;
    }
}

impl Drop for RunGuard<'_> {
    fn drop(&mut self) {
        if !self.finished {
            *lock(self.state) = EngineState::Failed;
        }
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Runs the generational loop for a validated configuration.
fn evolve(config: &RunConfig, cancel: Option<&AtomicBool>) -> Result<GenerationHistory, RunError> {
    let target = config.target.as_ref();
    let mut rng = rng_from(config.seed);
    let bounds = Bounds::around(&config.starting_values, &config.search_space);
    let clamp = match config.bounds {
        BoundPolicy::Clamp => Some(&bounds),
        BoundPolicy::Unbounded => None,
    };

    let mut history = GenerationHistory::with_capacity(target.name(), config.max_generations + 1);

    // 1. Initialize and evaluate generation 0
    let genotypes = (0..config.population_size)
        .map(|_| bounds.sample(&mut rng))
        .collect();
    let mut population = evaluate_population(target, genotypes, 0, config.parallel)?;
    log_generation(0, &population);

    // 2. Reproduction cycles
    for generation in 1..=config.max_generations {
        if cancel.is_some_and(|flag| flag.load(Ordering::Relaxed)) {
            return Err(RunError::Cancelled { generation });
        }

        let offspring = (0..config.population_size)
            .map(|_| breed(&population, config, clamp, &mut rng))
            .collect();
        let next = evaluate_population(target, offspring, generation, config.parallel)?;
        log_generation(generation, &next);

        // Replacement: offspring take over wholesale
        let parents = std::mem::replace(&mut population, next);
        history.push(Generation::new(generation - 1, parents));
    }

    history.push(Generation::new(config.max_generations, population));
    Ok(history)
}

/// Produces one offspring genotype from the current population.
fn breed<R: Rng>(
    population: &[Solution],
    config: &RunConfig,
    clamp: Option<&Bounds>,
    rng: &mut R,
) -> Vec<f64> {
    // Selection
    let p1 = config.selection.select(population, rng);
    let p2 = config.selection.select(population, rng);

    // Crossover
    let mut child = if rng.random_range(0.0..1.0) < config.crossover_rate {
        let mut child = config
            .crossover
            .recombine(population[p1].genes(), population[p2].genes(), rng);
        if let Some(bounds) = clamp {
            bounds.clamp_all(&mut child);
        }
        child
    } else {
        population[p1].genes().to_vec()
    };

    // Mutation
    config.mutation.apply(
        &mut child,
        config.mutation_rate,
        config.mutation_magnitude,
        clamp,
        rng,
    );
    child
}

#[cfg(feature = "parallel")]
fn evaluate_population(
    target: &dyn TargetFunction,
    genotypes: Vec<Vec<f64>>,
    generation: usize,
    parallel: bool,
) -> Result<Vec<Solution>, RunError> {
    use rayon::prelude::*;

    let evaluate = |genes: Vec<f64>| {
        Solution::evaluate(genes, target).map_err(|source| RunError::Evaluation { generation, source })
    };
    if parallel {
        genotypes.into_par_iter().map(evaluate).collect()
    } else {
        genotypes.into_iter().map(evaluate).collect()
    }
}

#[cfg(not(feature = "parallel"))]
fn evaluate_population(
    target: &dyn TargetFunction,
    genotypes: Vec<Vec<f64>>,
    generation: usize,
    _parallel: bool,
) -> Result<Vec<Solution>, RunError> {
    genotypes
        .into_iter()
        .map(|genes| {
            Solution::evaluate(genes, target)
                .map_err(|source| RunError::Evaluation { generation, source })
        })
        .collect()
}

fn log_generation(generation: usize, population: &[Solution]) {
    if tracing::enabled!(tracing::Level::DEBUG) {
        let best = population
            .iter()
            .map(Solution::fitness)
            .fold(f64::INFINITY, f64::min);
        let mean =
            population.iter().map(Solution::fitness).sum::<f64>() / population.len() as f64;
        tracing::debug!(generation, best, mean, "generation evaluated");
    }
}

// ============================================================================
// Tests
// ============================================================================
