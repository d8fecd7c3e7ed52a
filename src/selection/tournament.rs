use crate::error::{OptimError, Result};
use crate::individual::Individual;
use crate::rng::RandomNumberGenerator;

/// Tournament size used by the genetic algorithm unless configured otherwise.
pub const DEFAULT_TOURNAMENT_SIZE: usize = 3;

/// A selection strategy that selects individuals through tournament selection.
///
/// Each tournament samples `tournament_size` distinct individuals uniformly
/// without replacement and keeps the fittest. Ties go to the contestant
/// drawn first.
///
/// # Examples
///
/// ```
/// use optsim::selection::TournamentSelection;
/// use optsim::rng::RandomNumberGenerator;
///
/// let fitness = vec![0.5, 0.8, 0.3, 0.9, 0.1];
/// let mut rng = RandomNumberGenerator::from_seed(1);
///
/// let selection = TournamentSelection::default();
/// let winner = selection.select_index(&fitness, &mut rng).unwrap();
/// assert!(winner < fitness.len());
///
/// // A full-size tournament always finds the global best.
/// let everyone = TournamentSelection::new(5).unwrap();
/// assert_eq!(everyone.select_index(&fitness, &mut rng).unwrap(), 3);
/// ```
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TournamentSelection {
    tournament_size: usize,
}

impl TournamentSelection {
    /// Creates a new TournamentSelection strategy with the specified tournament size.
    ///
    /// # Errors
    ///
    /// Returns an error if `tournament_size` is 0.
    pub fn new(tournament_size: usize) -> Result<Self> {
        if tournament_size < 1 {
            return Err(OptimError::Configuration(
                "Tournament size must be at least 1".to_string(),
            ));
        }

        Ok(Self { tournament_size })
    }

    pub fn tournament_size(&self) -> usize {
        self.tournament_size
    }

    /// Fails unless a population of `population_size` can host a tournament.
    pub fn ensure_population(&self, population_size: usize) -> Result<()> {
        if population_size < self.tournament_size {
            return Err(OptimError::Configuration(format!(
                "Population size {} is too small for a tournament of {} distinct individuals",
                population_size, self.tournament_size
            )));
        }
        Ok(())
    }

    /// Runs a single tournament and returns the index of the winner.
    pub fn select_index(&self, fitness: &[f64], rng: &mut RandomNumberGenerator) -> Result<usize> {
        if fitness.is_empty() {
            return Err(OptimError::EmptyPopulation);
        }
        self.ensure_population(fitness.len())?;

        let participants = rng.sample_distinct(fitness.len(), self.tournament_size);

        let mut best_idx = participants[0];
        for &idx in &participants[1..] {
            if fitness[idx] > fitness[best_idx] {
                best_idx = idx;
            }
        }

        Ok(best_idx)
    }

    /// Runs a single tournament over `population` and returns the winner.
    ///
    /// # Errors
    ///
    /// Returns an error if `fitness` does not have one entry per individual,
    /// or if the population is smaller than the tournament.
    pub fn select<'a>(
        &self,
        population: &'a [Individual],
        fitness: &[f64],
        rng: &mut RandomNumberGenerator,
    ) -> Result<&'a Individual> {
        if population.len() != fitness.len() {
            return Err(OptimError::Configuration(format!(
                "Fitness has {} entries for a population of {}",
                fitness.len(),
                population.len()
            )));
        }

        let winner = self.select_index(fitness, rng)?;
        Ok(&population[winner])
    }
}

impl Default for TournamentSelection {
    fn default() -> Self {
        Self {
            tournament_size: DEFAULT_TOURNAMENT_SIZE,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_zero_size_rejected() {
        assert!(matches!(
            TournamentSelection::new(0),
            Err(OptimError::Configuration(_))
        ));
    }

    #[test]
    fn test_population_too_small() {
        let selection = TournamentSelection::default();
        let mut rng = RandomNumberGenerator::from_seed(0);
        let result = selection.select_index(&[1.0, 2.0], &mut rng);
        match result {
            Err(OptimError::Configuration(msg)) => assert!(msg.contains("too small")),
            other => panic!("Expected Configuration error, got {:?}", other),
        }
    }

    #[test]
    fn test_empty_population() {
        let selection = TournamentSelection::default();
        let mut rng = RandomNumberGenerator::from_seed(0);
        assert!(matches!(
            selection.select_index(&[], &mut rng),
            Err(OptimError::EmptyPopulation)
        ));
    }

    #[test]
    fn test_worst_two_never_win_size_three() {
        // With three distinct contestants out of five, the two weakest can never win.
        let selection = TournamentSelection::default();
        let mut rng = RandomNumberGenerator::from_seed(5);
        let fitness = vec![0.1, 0.2, 0.3, 0.4, 0.5];
        let mut winners = HashSet::new();
        for _ in 0..500 {
            winners.insert(selection.select_index(&fitness, &mut rng).unwrap());
        }
        assert!(!winners.contains(&0));
        assert!(!winners.contains(&1));
        assert!(winners.contains(&4));
    }

    #[test]
    fn test_ties_resolve_to_a_top_contestant() {
        let selection = TournamentSelection::new(3).unwrap();
        let mut rng = RandomNumberGenerator::from_seed(8);
        let fitness = vec![2.0, 2.0, 2.0];
        for _ in 0..50 {
            let winner = selection.select_index(&fitness, &mut rng).unwrap();
            assert!(winner < 3);
        }
    }

    #[test]
    fn test_select_checks_lengths() {
        let selection = TournamentSelection::default();
        let mut rng = RandomNumberGenerator::from_seed(0);
        let population = vec![Individual::zeros(2); 4];
        assert!(selection.select(&population, &[1.0; 3], &mut rng).is_err());
        assert!(selection.select(&population, &[1.0; 4], &mut rng).is_ok());
    }
}
