//! Command-line front end.
//!
//! Parses the run inputs (target name, rates, population size, starting
//! values, search space, generation budget) into a [`RunConfig`], runs the
//! engine, and optionally exports the history as JSON.

use std::path::PathBuf;
use std::sync::Arc;

use clap::{Args, Parser, Subcommand};
use thiserror::Error;

use crate::error::{ConfigError, ExportError, RunError};
use crate::export;
use crate::ga::{BoundPolicy, GeneticAlgorithm, RunConfig, Selection};
use crate::history::GenerationHistory;
use crate::target::TargetRegistry;

#[derive(Parser, Debug)]
#[command(name = "genopt")]
#[command(author, version, about = "Real-valued genetic algorithm optimizer", long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Log every generation
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Optimize a registered target function
    Run(RunArgs),
    /// List registered target functions and their dimensions
    Targets,
}

#[derive(Args, Debug, Clone)]
pub struct RunArgs {
    /// Target function name, see `genopt targets`
    #[arg(short, long, default_value = "Quadratic")]
    pub target: String,

    /// Crossover rate in [0, 1]
    #[arg(long, default_value_t = 0.7)]
    pub cr: f64,

    /// Per-gene mutation rate in [0, 1]
    #[arg(long, default_value_t = 0.8)]
    pub mr: f64,

    /// Mutation magnitude, at least 0
    #[arg(long, default_value_t = 0.2)]
    pub mx: f64,

    /// Population size, at least 2
    #[arg(short, long = "pop-size", default_value_t = 10)]
    pub pop_size: usize,

    /// Comma-separated starting values, one per dimension (default all 0)
    #[arg(short, long, value_name = "LIST", allow_hyphen_values = true)]
    pub starting_values: Option<String>,

    /// Comma-separated search-space half-widths, one per dimension (default all 1)
    #[arg(long, value_name = "LIST")]
    pub search_space: Option<String>,

    /// Number of generations after the initial population
    #[arg(short = 'g', long = "max-gen", default_value_t = 100)]
    pub max_gen: usize,

    /// Parent selection: tournament[:k], roulette or rank
    #[arg(long, default_value = "tournament:3")]
    pub selection: Selection,

    /// Let mutation leave the search space
    #[arg(long)]
    pub unbounded: bool,

    /// Random seed for a reproducible run
    #[arg(long)]
    pub seed: Option<u64>,

    /// Evaluate each generation in parallel
    #[arg(long)]
    pub parallel: bool,

    /// Write the generation history as JSON to this file
    #[arg(short, long, value_name = "FILE")]
    pub export: Option<PathBuf>,
}

/// Anything that stops the command-line run.
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Run(#[from] RunError),

    #[error("export failed: {0}")]
    Export(#[from] ExportError),
}

impl RunArgs {
    /// Resolves the target and turns the arguments into a run configuration.
    pub fn build_config(&self, registry: &TargetRegistry) -> Result<RunConfig, ConfigError> {
        let target = registry.get(&self.target)?;
        let dimension = target.dimension();

        let mut config = RunConfig::new(target)
            .with_crossover_rate(self.cr)
            .with_mutation_rate(self.mr)
            .with_mutation_magnitude(self.mx)
            .with_population_size(self.pop_size)
            .with_max_generations(self.max_gen)
            .with_selection(self.selection)
            .with_parallel(self.parallel);

        if let Some(input) = &self.starting_values {
            config = config.with_starting_values(parse_vector("starting values", input, dimension)?);
        }
        if let Some(input) = &self.search_space {
            config = config.with_search_space(parse_vector("search space", input, dimension)?);
        }
        if self.unbounded {
            config = config.with_bounds(BoundPolicy::Unbounded);
        }
        if let Some(seed) = self.seed {
            config = config.with_seed(seed);
        }
        Ok(config)
    }
}

/// Parses a comma-separated list of decimals of exactly `expected` entries.
pub fn parse_vector(
    field: &'static str,
    input: &str,
    expected: usize,
) -> Result<Vec<f64>, ConfigError> {
    let values = input
        .split(',')
        .map(|raw| {
            raw.trim().parse::<f64>().map_err(|_| ConfigError::Parse {
                field,
                input: raw.trim().to_string(),
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    if values.len() != expected {
        return Err(ConfigError::DimensionMismatch {
            field,
            expected,
            actual: values.len(),
        });
    }
    Ok(values)
}

/// Runs the configured optimization on `ga` and exports the result if asked.
pub fn execute(
    args: &RunArgs,
    registry: &TargetRegistry,
    ga: &GeneticAlgorithm,
) -> Result<Arc<GenerationHistory>, CliError> {
    let config = args.build_config(registry)?;
    let history = ga.run(config)?;
    if let Some(path) = &args.export {
        export::save_json(&history, path)?;
    }
    Ok(history)
}

/// Human-readable summary of a completed run.
pub fn report(history: &GenerationHistory) -> String {
    let mut out = format!(
        "target: {}\ngenerations: {} (population {})\n",
        history.target(),
        history.len(),
        history.population_size()
    );
    if let Some(last) = history.last() {
        if let (Some(best), Some(mean)) = (last.best(), last.mean_fitness()) {
            out.push_str(&format!(
                "final generation: best {:.6} at {:?}, mean {:.6}\n",
                best.fitness(),
                best.genes(),
                mean
            ));
        }
    }
    if let Some(best) = history.best() {
        out.push_str(&format!(
            "best overall: {:.6} at {:?}\n",
            best.fitness(),
            best.genes()
        ));
    }
    out
}

/// One line per registered target: name and dimension.
pub fn list_targets(registry: &TargetRegistry) -> Vec<String> {
    registry
        .names()
        .into_iter()
        .filter_map(|name| {
            let target = registry.get(&name).ok()?;
            Some(format!("{name} (dimension {})", target.dimension()))
        })
        .collect()
}
