use crate::error::{OptimError, Result};
use crate::individual::Individual;

use super::Problem;

/// OneMax: maximize the number of ones in a bitstring.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OneMax {
    size: usize,
}

impl OneMax {
    /// Creates a OneMax instance over `size` genes.
    ///
    /// # Errors
    ///
    /// Returns an error if `size` is 0.
    pub fn new(size: usize) -> Result<Self> {
        if size == 0 {
            return Err(OptimError::Configuration(
                "OneMax size must be greater than 0".to_string(),
            ));
        }
        Ok(Self { size })
    }
}

impl Problem for OneMax {
    fn name(&self) -> &str {
        "onemax"
    }

    fn size(&self) -> usize {
        self.size
    }

    fn evaluate(&self, individual: &Individual) -> f64 {
        individual.count_ones() as f64
    }

    fn max_fitness(&self) -> Option<f64> {
        Some(self.size as f64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::RandomNumberGenerator;

    #[test]
    fn test_extremes() {
        let problem = OneMax::new(12).unwrap();
        assert_eq!(problem.evaluate(&Individual::ones(12)), 12.0);
        assert_eq!(problem.evaluate(&Individual::zeros(12)), 0.0);
        assert_eq!(problem.max_fitness(), Some(12.0));
    }

    #[test]
    fn test_counts_ones() {
        let problem = OneMax::new(5).unwrap();
        let ind = Individual::from_genes(vec![1, 0, 1, 1, 0]).unwrap();
        assert_eq!(problem.evaluate(&ind), 3.0);
    }

    #[test]
    fn test_zero_size_rejected() {
        assert!(matches!(OneMax::new(0), Err(OptimError::Configuration(_))));
    }

    #[test]
    fn test_mutate_rejects_wrong_length() {
        let problem = OneMax::new(4).unwrap();
        let mut rng = RandomNumberGenerator::from_seed(0);
        assert!(matches!(
            problem.mutate(&Individual::ones(3), 0.5, &mut rng),
            Err(OptimError::LengthMismatch { .. })
        ));
    }

    #[test]
    fn test_size_one_cannot_cross() {
        let problem = OneMax::new(1).unwrap();
        let mut rng = RandomNumberGenerator::from_seed(0);
        let ind = problem.create_individual(&mut rng);
        assert!(matches!(
            problem.crossover(&ind, &ind, &mut rng),
            Err(OptimError::Crossover(_))
        ));
    }
}
