//! Variation operators shared by every binary problem.

use crate::error::{ensure_probability, OptimError, Result};
use crate::individual::Individual;
use crate::rng::RandomNumberGenerator;

/// Flips each gene independently with probability `rate`.
///
/// With `rate = 0` the result is an exact copy of `individual`.
pub fn bit_flip_mutation(
    individual: &Individual,
    rate: f64,
    rng: &mut RandomNumberGenerator,
) -> Result<Individual> {
    ensure_probability("Mutation rate", rate)?;

    let genes = individual
        .genes()
        .iter()
        .map(|&gene| if rng.chance(rate) { 1 - gene } else { gene })
        .collect();

    Ok(Individual::from_genes_unchecked(genes))
}

/// Single-point crossover with a cut drawn uniformly from `1..len`.
///
/// The first child takes `parent1`'s prefix and `parent2`'s suffix, the
/// second child the other way round.
pub fn single_point_crossover(
    parent1: &Individual,
    parent2: &Individual,
    rng: &mut RandomNumberGenerator,
) -> Result<(Individual, Individual)> {
    if parent1.len() != parent2.len() {
        return Err(OptimError::LengthMismatch {
            expected: parent1.len(),
            found: parent2.len(),
        });
    }

    let size = parent1.len();
    if size < 2 {
        return Err(OptimError::Crossover(format!(
            "Single-point crossover needs at least 2 genes, got {}",
            size
        )));
    }

    let cut = rng.index_in(1, size);
    Ok((splice(parent1, parent2, cut), splice(parent2, parent1, cut)))
}

/// `head[..cut]` followed by `tail[cut..]`.
pub fn splice(head: &Individual, tail: &Individual, cut: usize) -> Individual {
    let genes = head.genes()[..cut]
        .iter()
        .chain(&tail.genes()[cut..])
        .copied()
        .collect();
    Individual::from_genes_unchecked(genes)
}
