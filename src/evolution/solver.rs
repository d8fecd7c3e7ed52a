use tracing::{debug, info};

use super::options::GaOptions;
use crate::{
    error::{OptimError, OptionExt, Result},
    individual::Individual,
    logger::{Logger, ProgressRecord},
    problem::Problem,
    rng::RandomNumberGenerator,
    selection::TournamentSelection,
};

/// Represents the result of an evolution, containing an individual and its fitness.
#[derive(Debug, Clone, PartialEq)]
pub struct EvolutionResult {
    /// The fittest individual of the final population.
    pub individual: Individual,
    /// Its fitness.
    pub fitness: f64,
}

/// Summary of one evaluated population.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GenerationStats {
    /// Index of the first individual reaching the best fitness.
    pub best_index: usize,
    pub best_fitness: f64,
    pub average_fitness: f64,
}

impl GenerationStats {
    /// Computes best (first occurrence) and mean fitness.
    ///
    /// # Errors
    ///
    /// Returns `EmptyPopulation` if `fitness` is empty.
    pub fn from_fitness(fitness: &[f64]) -> Result<Self> {
        let (best_index, best_fitness) =
            first_max(fitness).ok_or_else_optim(|| OptimError::EmptyPopulation)?;
        let average_fitness = fitness.iter().sum::<f64>() / fitness.len() as f64;

        Ok(Self {
            best_index,
            best_fitness,
            average_fitness,
        })
    }
}

fn first_max(values: &[f64]) -> Option<(usize, f64)> {
    values
        .iter()
        .copied()
        .enumerate()
        .fold(None, |best, (idx, value)| match best {
            Some((_, best_value)) if value <= best_value => best,
            _ => Some((idx, value)),
        })
}

/// Generational genetic algorithm with tournament selection, single-point
/// crossover, bit-flip mutation and single-individual elitism.
///
/// # Examples
///
/// ```rust
/// use optsim::evolution::{GaOptions, GeneticSolver};
/// use optsim::logger::History;
/// use optsim::problem::OneMax;
/// use optsim::rng::RandomNumberGenerator;
///
/// let problem = OneMax::new(16).unwrap();
/// let options = GaOptions::new(20, 0.01, 10);
/// let mut solver = GeneticSolver::new(problem, options).unwrap();
///
/// let mut history = History::new();
/// let mut rng = RandomNumberGenerator::from_seed(42);
/// let result = solver.solve(&mut history, &mut rng).unwrap();
///
/// assert_eq!(history.len(), 10);
/// assert_eq!(result.individual.len(), 16);
/// ```
#[derive(Debug, Clone)]
pub struct GeneticSolver<P: Problem> {
    problem: P,
    options: GaOptions,
    selection: TournamentSelection,
    population: Vec<Individual>,
}

impl<P: Problem> GeneticSolver<P> {
    /// Creates a new `GeneticSolver` for `problem`.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - the options are invalid (see [`GaOptions::validate`])
    /// - the problem has fewer than 2 genes, so crossover has no cut point
    pub fn new(problem: P, options: GaOptions) -> Result<Self> {
        options.validate()?;
        if problem.size() < 2 {
            return Err(OptimError::Configuration(format!(
                "Genetic algorithm needs a problem size of at least 2 for crossover, got {}",
                problem.size()
            )));
        }
        let selection = TournamentSelection::new(options.get_tournament_size())?;

        Ok(Self {
            problem,
            options,
            selection,
            population: Vec::new(),
        })
    }

    pub fn problem(&self) -> &P {
        &self.problem
    }

    pub fn options(&self) -> &GaOptions {
        &self.options
    }

    /// The current population; empty until initialized.
    pub fn population(&self) -> &[Individual] {
        &self.population
    }

    /// Replaces the population with `pop_size` fresh random individuals.
    pub fn initialize_population(&mut self, rng: &mut RandomNumberGenerator) {
        self.population = (0..self.options.get_pop_size())
            .map(|_| self.problem.create_individual(rng))
            .collect();
    }

    fn evaluate_population(&self) -> Vec<f64> {
        self.population
            .iter()
            .map(|individual| self.problem.evaluate(individual))
            .collect()
    }

    /// Builds the next population from the current one.
    ///
    /// The elite is copied verbatim, then pairs of tournament winners are
    /// crossed and mutated until `pop_size` is reached; a surplus second
    /// child is dropped.
    fn breed(
        &self,
        fitness: &[f64],
        elite: &Individual,
        rng: &mut RandomNumberGenerator,
    ) -> Result<Vec<Individual>> {
        let pop_size = self.options.get_pop_size();
        let rate = self.options.get_mutation_rate();

        let mut next = Vec::with_capacity(pop_size + 1);
        next.push(elite.clone());

        while next.len() < pop_size {
            let parent1 = self.selection.select(&self.population, fitness, rng)?;
            let parent2 = self.selection.select(&self.population, fitness, rng)?;

            let (child1, child2) = self.problem.crossover(parent1, parent2, rng)?;

            next.push(self.problem.mutate(&child1, rate, rng)?);
            next.push(self.problem.mutate(&child2, rate, rng)?);
        }

        next.truncate(pop_size);
        Ok(next)
    }

    /// Runs a single generation: evaluate, record, and replace the population.
    ///
    /// # Errors
    ///
    /// Returns `EmptyPopulation` if the population was never initialized.
    pub fn advance<L>(
        &mut self,
        generation: usize,
        logger: &mut L,
        rng: &mut RandomNumberGenerator,
    ) -> Result<GenerationStats>
    where
        L: Logger + ?Sized,
    {
        let fitness = self.evaluate_population();
        let stats = GenerationStats::from_fitness(&fitness)?;
        let elite = self.population[stats.best_index].clone();

        debug!(
            generation,
            best_fitness = stats.best_fitness,
            average_fitness = stats.average_fitness,
            "Generation evaluated"
        );
        logger.record(ProgressRecord::new(
            generation,
            stats.best_fitness,
            stats.average_fitness,
            elite.clone(),
        ));

        self.population = self.breed(&fitness, &elite, rng)?;
        Ok(stats)
    }

    /// The fittest individual of the current population, re-evaluated.
    ///
    /// # Errors
    ///
    /// Returns `EmptyPopulation` if the population was never initialized.
    pub fn fittest(&self) -> Result<EvolutionResult> {
        let fitness = self.evaluate_population();
        let (best_index, best_fitness) =
            first_max(&fitness).ok_or_else_optim(|| OptimError::EmptyPopulation)?;

        Ok(EvolutionResult {
            individual: self.population[best_index].clone(),
            fitness: best_fitness,
        })
    }

    /// Evolves a fresh population for the configured number of generations.
    ///
    /// One progress record per generation (1-indexed) goes to `logger`.
    ///
    /// # Returns
    ///
    /// The fittest individual of the final population.
    pub fn solve<L>(
        &mut self,
        logger: &mut L,
        rng: &mut RandomNumberGenerator,
    ) -> Result<EvolutionResult>
    where
        L: Logger + ?Sized,
    {
        info!(
            problem = self.problem.name(),
            size = self.problem.size(),
            pop_size = self.options.get_pop_size(),
            generations = self.options.get_generations(),
            "Starting genetic algorithm"
        );

        self.initialize_population(rng);

        for generation in 1..=self.options.get_generations() {
            self.advance(generation, logger, rng)?;
        }

        let result = self.fittest()?;
        info!(best_fitness = result.fitness, "Genetic algorithm complete");
        Ok(result)
    }
}
