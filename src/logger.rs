//! # Progress Logging
//!
//! Solvers push one [`ProgressRecord`] per generation or step into a
//! [`Logger`]. The solver never looks at what the logger does with it, so
//! the same run can be kept in memory, forwarded to `tracing`, or handed to
//! any closure.
//!
//! ## Example
//!
//! ```rust
//! use optsim::individual::Individual;
//! use optsim::logger::{History, Logger, ProgressRecord};
//!
//! let mut history = History::new();
//! history.record(ProgressRecord::new(1, 3.0, 2.5, Individual::ones(3)));
//! assert_eq!(history.len(), 1);
//!
//! let mut seen = Vec::new();
//! let mut closure = |record: ProgressRecord| seen.push(record.step);
//! closure.record(ProgressRecord::new(7, 1.0, 1.0, Individual::zeros(3)));
//! assert_eq!(seen, vec![7]);
//! ```

use tracing::info;

use crate::individual::Individual;

/// A snapshot of solver progress after one iteration.
///
/// `secondary_fitness` is the population average for the genetic algorithm
/// and the current-solution fitness for simulated annealing.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct ProgressRecord {
    pub step: usize,
    pub best_fitness: f64,
    pub secondary_fitness: f64,
    pub best_individual: Individual,
}

impl ProgressRecord {
    pub fn new(
        step: usize,
        best_fitness: f64,
        secondary_fitness: f64,
        best_individual: Individual,
    ) -> Self {
        Self {
            step,
            best_fitness,
            secondary_fitness,
            best_individual,
        }
    }
}

/// Receives progress records from a running solver.
pub trait Logger {
    fn record(&mut self, record: ProgressRecord);
}

impl<F> Logger for F
where
    F: FnMut(ProgressRecord),
{
    fn record(&mut self, record: ProgressRecord) {
        self(record)
    }
}

/// Keeps every record in memory, in arrival order.
#[derive(Debug, Clone, Default)]
pub struct History {
    records: Vec<ProgressRecord>,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn records(&self) -> &[ProgressRecord] {
        &self.records
    }

    pub fn into_records(self) -> Vec<ProgressRecord> {
        self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn last(&self) -> Option<&ProgressRecord> {
        self.records.last()
    }

    /// Best fitness of every record, in order.
    pub fn best_fitness_series(&self) -> Vec<f64> {
        self.records.iter().map(|r| r.best_fitness).collect()
    }

    /// Secondary fitness of every record, in order.
    pub fn secondary_fitness_series(&self) -> Vec<f64> {
        self.records.iter().map(|r| r.secondary_fitness).collect()
    }
}

impl Logger for History {
    fn record(&mut self, record: ProgressRecord) {
        self.records.push(record);
    }
}

/// Emits every record as an `info` event.
#[derive(Debug, Clone)]
pub struct TracingLogger {
    label: String,
}

impl TracingLogger {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
        }
    }
}

impl Logger for TracingLogger {
    fn record(&mut self, record: ProgressRecord) {
        info!(
            solver = %self.label,
            step = record.step,
            best_fitness = record.best_fitness,
            secondary_fitness = format_args!("{:.2}", record.secondary_fitness),
            best = %record.best_individual,
            "progress"
        );
    }
}
