//! # GaOptions
//!
//! The `GaOptions` struct represents the configuration options for the
//! genetic algorithm: population size, per-gene mutation rate, number of
//! generations, and tournament size.
//!
//! ## Example
//!
//! ```rust
//! use optsim::evolution::GaOptions;
//!
//! // Create a new GaOptions instance with custom parameters
//! let custom_options = GaOptions::new(20, 0.01, 30);
//!
//! // Or through the builder
//! let built = GaOptions::builder()
//!     .pop_size(20)
//!     .mutation_rate(0.01)
//!     .generations(30)
//!     .build();
//! assert_eq!(custom_options, built);
//!
//! // Create a new GaOptions instance with default parameters
//! let default_options = GaOptions::default();
//! assert_eq!(default_options.get_pop_size(), 50);
//! ```
//!
//! Options are plain data; the solver validates them when it is built.

use crate::error::{ensure_probability, OptimError, Result};
use crate::selection::DEFAULT_TOURNAMENT_SIZE;

#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct GaOptions {
    pop_size: usize,
    mutation_rate: f64,
    generations: usize,
    tournament_size: usize,
}

impl GaOptions {
    pub fn new(pop_size: usize, mutation_rate: f64, generations: usize) -> Self {
        Self {
            pop_size,
            mutation_rate,
            generations,
            tournament_size: DEFAULT_TOURNAMENT_SIZE,
        }
    }

    pub fn get_pop_size(&self) -> usize {
        self.pop_size
    }

    pub fn get_mutation_rate(&self) -> f64 {
        self.mutation_rate
    }

    pub fn get_generations(&self) -> usize {
        self.generations
    }

    pub fn get_tournament_size(&self) -> usize {
        self.tournament_size
    }

    /// Sets the population size.
    pub fn set_pop_size(&mut self, pop_size: usize) {
        self.pop_size = pop_size;
    }

    /// Sets the per-gene mutation rate.
    pub fn set_mutation_rate(&mut self, mutation_rate: f64) {
        self.mutation_rate = mutation_rate;
    }

    /// Sets the number of generations.
    pub fn set_generations(&mut self, generations: usize) {
        self.generations = generations;
    }

    /// Checks the options on their own, independent of any problem.
    ///
    /// # Errors
    ///
    /// Returns an error if the mutation rate is not a probability, the
    /// tournament size is 0, or the population cannot host a tournament.
    pub fn validate(&self) -> Result<()> {
        ensure_probability("Mutation rate", self.mutation_rate)?;
        if self.tournament_size == 0 {
            return Err(OptimError::Configuration(
                "Tournament size must be at least 1".to_string(),
            ));
        }
        if self.pop_size < self.tournament_size {
            return Err(OptimError::Configuration(format!(
                "Population size must be at least {} for tournament selection, got {}",
                self.tournament_size, self.pop_size
            )));
        }
        Ok(())
    }

    /// Returns a builder for creating a `GaOptions` instance.
    pub fn builder() -> GaOptionsBuilder {
        GaOptionsBuilder::default()
    }
}

impl Default for GaOptions {
    fn default() -> Self {
        Self {
            pop_size: 50,
            mutation_rate: 0.01,
            generations: 100,
            tournament_size: DEFAULT_TOURNAMENT_SIZE,
        }
    }
}

/// Builder for `GaOptions`.
#[derive(Debug, Clone, Default)]
pub struct GaOptionsBuilder {
    pop_size: Option<usize>,
    mutation_rate: Option<f64>,
    generations: Option<usize>,
    tournament_size: Option<usize>,
}

impl GaOptionsBuilder {
    /// Sets the population size.
    pub fn pop_size(mut self, value: usize) -> Self {
        self.pop_size = Some(value);
        self
    }

    /// Sets the per-gene mutation rate.
    pub fn mutation_rate(mut self, value: f64) -> Self {
        self.mutation_rate = Some(value);
        self
    }

    /// Sets the number of generations.
    pub fn generations(mut self, value: usize) -> Self {
        self.generations = Some(value);
        self
    }

    /// Sets the tournament size.
    pub fn tournament_size(mut self, value: usize) -> Self {
        self.tournament_size = Some(value);
        self
    }

    /// Builds the `GaOptions` instance.
    pub fn build(self) -> GaOptions {
        let defaults = GaOptions::default();
        GaOptions {
            pop_size: self.pop_size.unwrap_or(defaults.pop_size),
            mutation_rate: self.mutation_rate.unwrap_or(defaults.mutation_rate),
            generations: self.generations.unwrap_or(defaults.generations),
            tournament_size: self.tournament_size.unwrap_or(defaults.tournament_size),
        }
    }
}
