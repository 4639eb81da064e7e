//! Real-valued genetic algorithm optimizer.
//!
//! Minimizes continuous target functions over fixed-length `f64` vectors
//! with a classic generational GA, recording every generation for later
//! inspection:
//!
//! - **Targets** ([`target`]): pure objectives with a declared dimension:
//!   [`Quadratic`](target::Quadratic), [`Polynomial`](target::Polynomial),
//!   [`Multimodal`](target::Multimodal), looked up by name in a
//!   [`TargetRegistry`](target::TargetRegistry).
//! - **Engine** ([`ga`]): [`GeneticAlgorithm`](ga::GeneticAlgorithm) runs a
//!   [`RunConfig`](ga::RunConfig) through selection, crossover, mutation and
//!   replacement, one run at a time.
//! - **History** ([`history`]): the immutable per-generation record of
//!   [`Solution`](solution::Solution)s, published to
//!   [`RunObserver`](algorithm::RunObserver)s on completion.
//! - **Front ends**: JSON [`export`] and the [`cli`] behind the `genopt`
//!   binary.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use u_genopt::ga::{GeneticAlgorithm, RunConfig};
//! use u_genopt::history::GenerationHistory;
//! use u_genopt::target::Quadratic;
//!
//! let ga = GeneticAlgorithm::new();
//! ga.add_observer(Arc::new(|history: Arc<GenerationHistory>| {
//!     println!("best per generation: {:?}", history.best_fitness_curve());
//! }));
//!
//! let config = RunConfig::new(Arc::new(Quadratic::default()))
//!     .with_search_space(vec![5.0])
//!     .with_population_size(20)
//!     .with_max_generations(50)
//!     .with_mutation_rate(0.1)
//!     .with_seed(42);
//! let history = ga.run(config).unwrap();
//! assert_eq!(history.len(), 51);
//! ```

pub mod algorithm;
pub mod cli;
pub mod error;
pub mod export;
pub mod ga;
pub mod history;
pub mod random;
pub mod solution;
pub mod target;

pub use algorithm::{Algorithm, ChannelObserver, RunObserver};
pub use error::{ConfigError, ExportError, RunError, TargetError};
