//! Genetic Algorithm engine.
//!
//! A generational GA over fixed-length real vectors. Callers describe a run
//! with a [`RunConfig`] and hand it to [`GeneticAlgorithm::run`], which
//! returns (and publishes to observers) the full generation history.
//!
//! # Key Types
//!
//! - [`RunConfig`]: Target, search box, rates and operator policies
//! - [`GeneticAlgorithm`]: Executes the generational loop, one run at a time
//! - [`EngineState`]: Idle / Running / Completed / Failed
//!
//! # Policies
//!
//! - [`Selection`]: tournament (default, k = 3), roulette, rank
//! - [`Crossover`]: BLX-α blend (default, α = 0.5), arithmetic, uniform, single-point
//! - [`Mutation`]: Gaussian (default) or uniform perturbation scaled by `mx`
//! - [`BoundPolicy`]: clamp to the search box (default) or unbounded
//!
//! # References
//!
//! - Holland (1975), *Adaptation in Natural and Artificial Systems*
//! - Goldberg (1989), *Genetic Algorithms in Search, Optimization, and Machine Learning*
//! - Eshelman & Schaffer (1993), "Real-Coded Genetic Algorithms and Interval-Schemata"

mod config;
mod engine;
pub mod operators;
mod selection;

pub use config::RunConfig;
pub use engine::{EngineState, GeneticAlgorithm};
pub use operators::{BoundPolicy, Bounds, Crossover, Mutation};
pub use selection::Selection;
