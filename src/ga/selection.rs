//! Parent selection strategies.
//!
//! Selection determines which solutions are chosen as parents for
//! crossover. Different strategies provide different selection pressure.
//!
//! # References
//!
//! - Blickle & Thiele (1996), "A Comparison of Selection Schemes used in
//!   Evolutionary Algorithms"
//! - Goldberg & Deb (1991), "A Comparative Analysis of Selection Schemes
//!   Used in Genetic Algorithms"

use std::fmt;
use std::str::FromStr;

use rand::Rng;

use crate::error::ConfigError;
use crate::solution::Solution;

/// Selection strategy for choosing parents.
///
/// All strategies assume **minimization** (lower fitness = better). When two
/// candidates are equally fit, the one earlier in the population wins.
///
/// # Examples
///
/// ```
/// use u_genopt::ga::Selection;
///
/// // Tournament with size 3 (moderate selection pressure)
/// let sel = Selection::Tournament(3);
///
/// // Parsed from command-line text
/// let sel: Selection = "roulette".parse().unwrap();
/// assert_eq!(sel, Selection::Roulette);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selection {
    /// Tournament selection: pick `k` solutions at random, select the best.
    ///
    /// Higher `k` = stronger selection pressure.
    /// - k=2: light pressure (good for diversity)
    /// - k=3-5: moderate pressure (typical default)
    /// - k>5: strong pressure (risk of premature convergence)
    Tournament(usize),

    /// Fitness-proportionate (roulette wheel) selection.
    ///
    /// Since we minimize, weights are `max_fitness - fitness + ε`.
    ///
    /// **Warning**: Susceptible to super-individual dominance when
    /// fitness variance is high.
    Roulette,

    /// Linear rank selection: weight `n - rank`, best rank 0.
    ///
    /// Reference: Baker (1985), "Adaptive Selection Methods for Genetic
    /// Algorithms"
    Rank,
}

impl Default for Selection {
    fn default() -> Self {
        Selection::Tournament(3)
    }
}

impl Selection {
    /// Select a parent index from the population.
    ///
    /// # Panics
    /// Panics if `population` is empty.
    pub fn select<R: Rng>(&self, population: &[Solution], rng: &mut R) -> usize {
        assert!(
            !population.is_empty(),
            "cannot select from empty population"
        );

        match self {
            Selection::Tournament(k) => tournament(population, *k, rng),
            Selection::Roulette => roulette(population, rng),
            Selection::Rank => rank(population, rng),
        }
    }

    pub(crate) fn validate(&self) -> Result<(), ConfigError> {
        match self {
            Selection::Tournament(0) => Err(ConfigError::InvalidTournamentSize),
            _ => Ok(()),
        }
    }
}

impl fmt::Display for Selection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Selection::Tournament(k) => write!(f, "tournament:{k}"),
            Selection::Roulette => f.write_str("roulette"),
            Selection::Rank => f.write_str("rank"),
        }
    }
}

/// Parses `tournament`, `tournament:K`, `roulette` or `rank`.
impl FromStr for Selection {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parse_error = || ConfigError::Parse {
            field: "selection",
            input: s.to_string(),
        };
        let lower = s.trim().to_ascii_lowercase();
        match lower.split_once(':') {
            Some(("tournament", k)) => {
                let k = k.trim().parse().map_err(|_| parse_error())?;
                Ok(Selection::Tournament(k))
            }
            Some(_) => Err(parse_error()),
            None => match lower.as_str() {
                "tournament" => Ok(Selection::default()),
                "roulette" => Ok(Selection::Roulette),
                "rank" => Ok(Selection::Rank),
                _ => Err(parse_error()),
            },
        }
    }
}

/// Tournament selection: pick k random solutions, return the best.
fn tournament<R: Rng>(population: &[Solution], k: usize, rng: &mut R) -> usize {
    let k = k.max(1);
    let n = population.len();

    let mut best_idx = rng.random_range(0..n);
    for _ in 1..k {
        let idx = rng.random_range(0..n);
        let (challenger, holder) = (population[idx].fitness(), population[best_idx].fitness());
        if challenger < holder || (challenger == holder && idx < best_idx) {
            best_idx = idx;
        }
    }
    best_idx
}

/// Roulette wheel selection using inverse fitness transformation.
///
/// weight_i = max_fitness - fitness_i + epsilon, scanned in population order.
fn roulette<R: Rng>(population: &[Solution], rng: &mut R) -> usize {
    let n = population.len();
    if n == 1 {
        return 0;
    }

    let max_fitness = population
        .iter()
        .map(Solution::fitness)
        .fold(f64::NEG_INFINITY, f64::max);

    let epsilon = 1e-10;

    let weights: Vec<f64> = population
        .iter()
        .map(|s| {
            let w = max_fitness - s.fitness() + epsilon;
            if w > 0.0 && w.is_finite() {
                w
            } else {
                epsilon
            }
        })
        .collect();

    let total: f64 = weights.iter().sum();
    if !(total > 0.0 && total.is_finite()) {
        return rng.random_range(0..n);
    }

    let threshold = rng.random_range(0.0..total);
    let mut cumulative = 0.0;
    for (i, &w) in weights.iter().enumerate() {
        cumulative += w;
        if cumulative > threshold {
            return i;
        }
    }

    n - 1 // floating-point fallback
}

/// Rank-based selection using linear ranking.
///
/// The sort is stable, so equally fit solutions keep population order.
fn rank<R: Rng>(population: &[Solution], rng: &mut R) -> usize {
    let n = population.len();
    if n == 1 {
        return 0;
    }

    let mut order: Vec<usize> = (0..n).collect();
    order.sort_by(|&a, &b| {
        population[a]
            .fitness()
            .partial_cmp(&population[b].fitness())
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    // weight_i = n - rank_i
    let total: f64 = (n * (n + 1)) as f64 / 2.0;
    let threshold = rng.random_range(0.0..total);
    let mut cumulative = 0.0;

    for (rank, &original_idx) in order.iter().enumerate() {
        cumulative += (n - rank) as f64;
        if cumulative > threshold {
            return original_idx;
        }
    }

    order[n - 1]
}
