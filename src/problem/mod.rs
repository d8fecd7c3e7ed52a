//! # Problem Trait
//!
//! The `Problem` trait defines the four capabilities every solver relies on:
//! creating a random individual, evaluating it, mutating it, and crossing two
//! individuals over. Problems are stateless with respect to individuals, so
//! `evaluate` is a pure function of the genome and the problem parameters.
//!
//! ## Example
//!
//! ```rust
//! use optsim::individual::Individual;
//! use optsim::problem::{OneMax, Problem};
//! use optsim::rng::RandomNumberGenerator;
//!
//! let problem = OneMax::new(8).unwrap();
//! let mut rng = RandomNumberGenerator::from_seed(3);
//!
//! let ind = problem.create_individual(&mut rng);
//! assert_eq!(ind.len(), 8);
//! assert_eq!(problem.evaluate(&Individual::ones(8)), 8.0);
//!
//! let (a, b) = problem.crossover(&ind, &Individual::zeros(8), &mut rng).unwrap();
//! assert_eq!(a.len(), 8);
//! assert_eq!(b.len(), 8);
//! ```

pub mod knapsack;
pub mod onemax;
pub mod operators;

use std::fmt::Debug;

use crate::error::Result;
use crate::individual::Individual;
use crate::rng::RandomNumberGenerator;

pub use knapsack::{Item, Knapsack};
pub use onemax::OneMax;

/// A binary optimization problem that the solvers can work on.
///
/// Implementors only have to describe their size and fitness function; the
/// representation-level operators default to uniform random creation,
/// independent bit-flip mutation and single-point crossover.
pub trait Problem: Debug + Send + Sync {
    /// Short human-readable name, used in logs.
    fn name(&self) -> &str;

    /// Number of genes in every individual of this problem.
    fn size(&self) -> usize;

    /// Fitness of `individual`. Always non-negative.
    fn evaluate(&self, individual: &Individual) -> f64;

    /// Best fitness any individual can reach, when it is known up front.
    ///
    /// The RL environment uses this as its termination test.
    fn max_fitness(&self) -> Option<f64> {
        None
    }

    /// Returns a uniformly random individual of length `size()`.
    fn create_individual(&self, rng: &mut RandomNumberGenerator) -> Individual {
        Individual::random(self.size(), rng)
    }

    /// Flips each gene independently with probability `rate`.
    ///
    /// # Errors
    ///
    /// Returns an error if `rate` is not in `[0, 1]` or the individual has
    /// the wrong length.
    fn mutate(
        &self,
        individual: &Individual,
        rate: f64,
        rng: &mut RandomNumberGenerator,
    ) -> Result<Individual> {
        individual.ensure_len(self.size())?;
        operators::bit_flip_mutation(individual, rate, rng)
    }

    /// Single-point crossover producing two complementary children.
    ///
    /// # Errors
    ///
    /// Returns an error if the parents do not both have `size()` genes, or
    /// if the problem is too small to pick a cut point.
    fn crossover(
        &self,
        parent1: &Individual,
        parent2: &Individual,
        rng: &mut RandomNumberGenerator,
    ) -> Result<(Individual, Individual)> {
        parent1.ensure_len(self.size())?;
        parent2.ensure_len(self.size())?;
        operators::single_point_crossover(parent1, parent2, rng)
    }
}

impl<P: Problem + ?Sized> Problem for Box<P> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn size(&self) -> usize {
        (**self).size()
    }

    fn evaluate(&self, individual: &Individual) -> f64 {
        (**self).evaluate(individual)
    }

    fn max_fitness(&self) -> Option<f64> {
        (**self).max_fitness()
    }

    fn create_individual(&self, rng: &mut RandomNumberGenerator) -> Individual {
        (**self).create_individual(rng)
    }

    fn mutate(
        &self,
        individual: &Individual,
        rate: f64,
        rng: &mut RandomNumberGenerator,
    ) -> Result<Individual> {
        (**self).mutate(individual, rate, rng)
    }

    fn crossover(
        &self,
        parent1: &Individual,
        parent2: &Individual,
        rng: &mut RandomNumberGenerator,
    ) -> Result<(Individual, Individual)> {
        (**self).crossover(parent1, parent2, rng)
    }
}
