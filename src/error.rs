//! Error types for u-genopt.
//!
//! Every fallible operation in the crate reports one of these enums.
//! Configuration and busy errors are raised before any generation is
//! produced; evaluation errors abort a run in progress.

use thiserror::Error;

/// Failure of a single target-function evaluation.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum TargetError {
    /// The genotype length does not match the target dimension.
    #[error("genotype has {actual} genes but the target expects {expected}")]
    DimensionMismatch { expected: usize, actual: usize },

    /// The target produced NaN, which cannot be ranked.
    #[error("target returned NaN")]
    NotANumber,

    /// Target-specific failure.
    #[error("target evaluation failed: {0}")]
    Failed(String),
}

/// Invalid run configuration.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ConfigError {
    /// A per-dimension vector does not match the target dimension.
    #[error("{field} has length {actual}, expected {expected} (target dimension)")]
    DimensionMismatch {
        field: &'static str,
        expected: usize,
        actual: usize,
    },

    /// A probability lies outside `[0, 1]`.
    #[error("{field} must be in [0, 1], got {value}")]
    RateOutOfRange { field: &'static str, value: f64 },

    #[error("mutation magnitude must be non-negative, got {0}")]
    NegativeMagnitude(f64),

    #[error("population size must be at least 2, got {0}")]
    PopulationTooSmall(usize),

    #[error("max generations must be at least 1")]
    NoGenerations,

    #[error("search space half-width at index {index} must be non-negative, got {value}")]
    NegativeSearchSpace { index: usize, value: f64 },

    /// A sampling interval derived from the configuration overflows `f64`.
    #[error("{field} at index {index} spans an interval too wide to sample")]
    RangeOverflow { field: &'static str, index: usize },

    #[error("{field} contains a non-finite value at index {index}")]
    NonFinite { field: &'static str, index: usize },

    #[error("tournament size must be at least 1")]
    InvalidTournamentSize,

    /// No target is registered under the requested name.
    #[error("unknown target '{name}', available: {}", .available.join(", "))]
    UnknownTarget { name: String, available: Vec<String> },

    /// User input could not be parsed.
    #[error("cannot parse {field} from '{input}'")]
    Parse { field: &'static str, input: String },
}

/// Failure of a whole optimization run.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum RunError {
    #[error("invalid configuration: {0}")]
    Configuration(#[from] ConfigError),

    /// Another run is still in progress on the same engine.
    #[error("a run is already in progress")]
    Busy,

    /// The target failed on a genotype; the partial history was discarded.
    #[error("evaluation failed in generation {generation}: {source}")]
    Evaluation {
        generation: usize,
        #[source]
        source: TargetError,
    },

    #[error("run cancelled before generation {generation}")]
    Cancelled { generation: usize },
}

/// Failure while exporting a generation history.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Json(#[from] serde_json::Error),
}
