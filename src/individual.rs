//! # Individual
//!
//! An `Individual` is a candidate solution: a fixed-length string of binary
//! genes. It is immutable once built; the variation operators in
//! [`crate::problem::operators`] always return fresh individuals.
//!
//! ## Example
//!
//! ```rust
//! use optsim::individual::Individual;
//!
//! let ind = Individual::from_genes(vec![1, 0, 1, 1]).unwrap();
//! assert_eq!(ind.len(), 4);
//! assert_eq!(ind.count_ones(), 3);
//! assert_eq!(ind.to_string(), "1011");
//!
//! assert!(Individual::from_genes(vec![0, 2]).is_err());
//! ```

use std::fmt;

use crate::error::{OptimError, Result};
use crate::rng::RandomNumberGenerator;

/// A fixed-length binary genome.
///
/// Individuals hash by their genes, which lets them key the Q-table directly
/// when used as environment states.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "Vec<u8>", into = "Vec<u8>"))]
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Individual {
    genes: Vec<u8>,
}

impl Individual {
    /// Builds an individual from raw genes, rejecting anything outside {0, 1}.
    pub fn from_genes(genes: Vec<u8>) -> Result<Self> {
        if let Some((position, &gene)) = genes.iter().enumerate().find(|&(_, &g)| g > 1) {
            return Err(OptimError::InvalidGene { position, gene });
        }
        Ok(Self { genes })
    }

    /// Draws a uniformly random individual of the given length.
    pub fn random(size: usize, rng: &mut RandomNumberGenerator) -> Self {
        Self {
            genes: (0..size).map(|_| rng.bit()).collect(),
        }
    }

    /// An individual with every gene set to 0.
    pub fn zeros(size: usize) -> Self {
        Self {
            genes: vec![0; size],
        }
    }

    /// An individual with every gene set to 1.
    pub fn ones(size: usize) -> Self {
        Self {
            genes: vec![1; size],
        }
    }

    /// Only reachable from crate operators that preserve the 0/1 invariant.
    pub(crate) fn from_genes_unchecked(genes: Vec<u8>) -> Self {
        debug_assert!(genes.iter().all(|&g| g <= 1));
        Self { genes }
    }

    pub fn genes(&self) -> &[u8] {
        &self.genes
    }

    pub fn len(&self) -> usize {
        self.genes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.genes.is_empty()
    }

    /// Number of genes set to 1.
    pub fn count_ones(&self) -> usize {
        self.genes.iter().filter(|&&g| g == 1).count()
    }

    /// Returns a copy with the gene at `index` flipped.
    ///
    /// An out-of-range index yields an unchanged copy.
    pub fn with_flipped(&self, index: usize) -> Self {
        let mut genes = self.genes.clone();
        if let Some(gene) = genes.get_mut(index) {
            *gene = 1 - *gene;
        }
        Self { genes }
    }

    /// Fails with `LengthMismatch` unless the individual has `expected` genes.
    pub fn ensure_len(&self, expected: usize) -> Result<()> {
        if self.len() != expected {
            return Err(OptimError::LengthMismatch {
                expected,
                found: self.len(),
            });
        }
        Ok(())
    }
}

impl fmt::Display for Individual {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for gene in &self.genes {
            write!(f, "{}", gene)?;
        }
        Ok(())
    }
}

impl TryFrom<Vec<u8>> for Individual {
    type Error = OptimError;

    fn try_from(genes: Vec<u8>) -> Result<Self> {
        Self::from_genes(genes)
    }
}

impl From<Individual> for Vec<u8> {
    fn from(individual: Individual) -> Self {
        individual.genes
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_gene_reports_position() {
        match Individual::from_genes(vec![0, 1, 3, 0]) {
            Err(OptimError::InvalidGene { position, gene }) => {
                assert_eq!(position, 2);
                assert_eq!(gene, 3);
            }
            other => panic!("Expected InvalidGene error, got {:?}", other),
        }
    }

    #[test]
    fn test_random_has_requested_length() {
        let mut rng = RandomNumberGenerator::from_seed(11);
        let ind = Individual::random(37, &mut rng);
        assert_eq!(ind.len(), 37);
        assert!(ind.genes().iter().all(|&g| g <= 1));
    }

    #[test]
    fn test_with_flipped() {
        let ind = Individual::zeros(3);
        let flipped = ind.with_flipped(1);
        assert_eq!(flipped.genes(), &[0, 1, 0]);
        assert_eq!(ind.genes(), &[0, 0, 0]);
        assert_eq!(ind.with_flipped(5), ind);
    }

    #[test]
    fn test_ensure_len() {
        let ind = Individual::ones(4);
        assert!(ind.ensure_len(4).is_ok());
        assert!(matches!(
            ind.ensure_len(5),
            Err(OptimError::LengthMismatch {
                expected: 5,
                found: 4
            })
        ));
    }
}
