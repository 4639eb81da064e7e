//! JSON export of a generation history.
//!
//! The document lists, per generation, the fitness of every solution plus
//! the best and mean fitness:
//!
//! ```json
//! {
//!   "target": "Quadratic",
//!   "population_size": 2,
//!   "generations": [
//!     { "generation": 0, "best_fitness": 0.25, "mean_fitness": 2.125, "fitness": [4.0, 0.25] }
//!   ]
//! }
//! ```

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::error::ExportError;
use crate::history::GenerationHistory;

#[derive(Debug, Serialize)]
struct HistoryReport<'a> {
    target: &'a str,
    population_size: usize,
    generations: Vec<GenerationReport>,
}

#[derive(Debug, Serialize)]
struct GenerationReport {
    generation: usize,
    best_fitness: Option<f64>,
    mean_fitness: Option<f64>,
    fitness: Vec<f64>,
}

impl<'a> From<&'a GenerationHistory> for HistoryReport<'a> {
    fn from(history: &'a GenerationHistory) -> Self {
        Self {
            target: history.target(),
            population_size: history.population_size(),
            generations: history
                .iter()
                .map(|g| GenerationReport {
                    generation: g.index(),
                    best_fitness: g.best().map(|s| s.fitness()),
                    mean_fitness: g.mean_fitness(),
                    fitness: g.fitness_values(),
                })
                .collect(),
        }
    }
}

/// Renders the history as pretty-printed JSON.
pub fn to_json(history: &GenerationHistory) -> Result<String, ExportError> {
    Ok(serde_json::to_string_pretty(&HistoryReport::from(history))?)
}

/// Writes the history as JSON to `writer`.
pub fn write_json<W: Write>(history: &GenerationHistory, writer: W) -> Result<(), ExportError> {
    serde_json::to_writer_pretty(writer, &HistoryReport::from(history))?;
    Ok(())
}

/// Writes the history to `path`, replacing any other extension with
/// `.json`. Returns the path actually written.
pub fn save_json(history: &GenerationHistory, path: impl AsRef<Path>) -> Result<PathBuf, ExportError> {
    let path = json_path(path.as_ref());
    let mut writer = BufWriter::new(File::create(&path)?);
    write_json(history, &mut writer)?;
    writer.flush()?;
    tracing::info!(path = %path.display(), generations = history.len(), "history exported");
    Ok(path)
}

fn json_path(path: &Path) -> PathBuf {
    let is_json = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
    if is_json {
        path.to_path_buf()
    } else {
        path.with_extension("json")
    }
}
