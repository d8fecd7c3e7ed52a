use tracing::{debug, info};

use super::options::SaOptions;
use crate::error::{OptimError, Result};
use crate::individual::Individual;
use crate::logger::{Logger, ProgressRecord};
use crate::problem::Problem;
use crate::rng::RandomNumberGenerator;

/// Result of a simulated annealing run.
#[derive(Debug, Clone, PartialEq)]
pub struct AnnealingResult {
    /// The best solution found.
    pub best: Individual,

    /// Fitness of the best solution.
    pub best_fitness: f64,

    /// Number of steps performed.
    pub steps: usize,

    /// Temperature when the run stopped.
    pub final_temperature: f64,

    /// Number of accepted moves, improving or not.
    pub accepted_moves: usize,
}

#[derive(Debug, Clone)]
struct AnnealingState {
    current_solution: Individual,
    current_fitness: f64,
    best_solution: Individual,
    best_fitness: f64,
    temperature: f64,
    step: usize,
    accepted_moves: usize,
}

/// A simulated annealing solver.
///
/// Simulated annealing walks a single trajectory, always accepting better
/// neighbors and accepting worse ones with probability
/// `exp(delta / temperature)`, which shrinks as the temperature cools.
///
/// # Examples
///
/// ```rust
/// use optsim::annealing::{SaOptions, SimulatedAnnealing};
/// use optsim::logger::History;
/// use optsim::problem::OneMax;
/// use optsim::rng::RandomNumberGenerator;
///
/// let problem = OneMax::new(10).unwrap();
/// let mut solver = SimulatedAnnealing::new(problem, SaOptions::default()).unwrap();
///
/// let mut history = History::new();
/// let mut rng = RandomNumberGenerator::from_seed(7);
/// let result = solver.solve(&mut history, &mut rng).unwrap();
///
/// assert_eq!(history.len(), result.steps);
/// assert!(result.best_fitness <= 10.0);
/// ```
#[derive(Debug, Clone)]
pub struct SimulatedAnnealing<P: Problem> {
    problem: P,
    options: SaOptions,
    state: Option<AnnealingState>,
}

impl<P: Problem> SimulatedAnnealing<P> {
    /// Creates a new simulated annealing solver.
    ///
    /// # Errors
    ///
    /// Returns an error if the options are invalid (see
    /// [`SaOptions::validate`]) or the problem has no genes.
    pub fn new(problem: P, options: SaOptions) -> Result<Self> {
        options.validate()?;
        if problem.size() == 0 {
            return Err(OptimError::Configuration(
                "Simulated annealing needs a problem with at least one gene".to_string(),
            ));
        }
        Ok(Self {
            problem,
            options,
            state: None,
        })
    }

    pub fn problem(&self) -> &P {
        &self.problem
    }

    pub fn options(&self) -> &SaOptions {
        &self.options
    }

    /// Current temperature; the initial one before the run starts.
    pub fn temperature(&self) -> f64 {
        self.state
            .as_ref()
            .map_or(self.options.initial_temp, |s| s.temperature)
    }

    /// Steps performed so far.
    pub fn step(&self) -> usize {
        self.state.as_ref().map_or(0, |s| s.step)
    }

    pub fn current_solution(&self) -> Option<&Individual> {
        self.state.as_ref().map(|s| &s.current_solution)
    }

    pub fn current_fitness(&self) -> Option<f64> {
        self.state.as_ref().map(|s| s.current_fitness)
    }

    pub fn best_solution(&self) -> Option<&Individual> {
        self.state.as_ref().map(|s| &s.best_solution)
    }

    pub fn best_fitness(&self) -> Option<f64> {
        self.state.as_ref().map(|s| s.best_fitness)
    }

    /// Starts a fresh trajectory from a random individual at the initial temperature.
    pub fn start(&mut self, rng: &mut RandomNumberGenerator) {
        let initial = self.problem.create_individual(rng);
        let fitness = self.problem.evaluate(&initial);

        self.state = Some(AnnealingState {
            current_solution: initial.clone(),
            current_fitness: fitness,
            best_solution: initial,
            best_fitness: fitness,
            temperature: self.options.initial_temp,
            step: 0,
            accepted_moves: 0,
        });
    }

    /// Whether another step is allowed by the temperature floor and step budget.
    pub fn is_running(&self) -> bool {
        self.state.as_ref().is_some_and(|s| {
            s.temperature > self.options.min_temp && s.step < self.options.max_steps
        })
    }

    /// Performs one annealing step, recording progress to `logger`.
    ///
    /// # Returns
    ///
    /// `false` without doing anything once the run is over.
    ///
    /// # Errors
    ///
    /// Returns an error if [`start`](Self::start) was never called.
    pub fn anneal_step<L>(
        &mut self,
        logger: &mut L,
        rng: &mut RandomNumberGenerator,
    ) -> Result<bool>
    where
        L: Logger + ?Sized,
    {
        if self.state.is_none() {
            return Err(OptimError::Other(
                "Simulated annealing step requested before start".to_string(),
            ));
        }
        if !self.is_running() {
            return Ok(false);
        }

        let rate = 1.0 / self.problem.size() as f64;
        let Some(state) = self.state.as_mut() else {
            return Ok(false);
        };

        state.step += 1;

        let neighbor = self.problem.mutate(&state.current_solution, rate, rng)?;
        let neighbor_fitness = self.problem.evaluate(&neighbor);
        let delta = neighbor_fitness - state.current_fitness;

        // Only worsening or sideways moves reach the exponential, so its exponent is <= 0.
        let accept = delta > 0.0 || rng.chance((delta / state.temperature).exp());

        if accept {
            state.current_solution = neighbor;
            state.current_fitness = neighbor_fitness;
            state.accepted_moves += 1;

            if state.current_fitness > state.best_fitness {
                state.best_solution = state.current_solution.clone();
                state.best_fitness = state.current_fitness;
            }
        }

        logger.record(ProgressRecord::new(
            state.step,
            state.best_fitness,
            state.current_fitness,
            state.best_solution.clone(),
        ));

        state.temperature *= self.options.cooling_rate;
        Ok(true)
    }

    /// Runs a full annealing schedule from a fresh random start.
    pub fn solve<L>(
        &mut self,
        logger: &mut L,
        rng: &mut RandomNumberGenerator,
    ) -> Result<AnnealingResult>
    where
        L: Logger + ?Sized,
    {
        info!(
            problem = self.problem.name(),
            initial_temp = self.options.initial_temp,
            max_steps = self.options.max_steps,
            "Starting simulated annealing"
        );

        self.start(rng);
        while self.anneal_step(logger, rng)? {}

        let state = self.state.as_ref().ok_or_else(|| {
            OptimError::Other("Simulated annealing finished without a state".to_string())
        })?;
        debug!(
            steps = state.step,
            accepted_moves = state.accepted_moves,
            final_temperature = state.temperature,
            "Annealing schedule exhausted"
        );
        info!(best_fitness = state.best_fitness, "Simulated annealing complete");

        Ok(AnnealingResult {
            best: state.best_solution.clone(),
            best_fitness: state.best_fitness,
            steps: state.step,
            final_temperature: state.temperature,
            accepted_moves: state.accepted_moves,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logger::History;
    use crate::problem::OneMax;

    fn solver(options: SaOptions) -> SimulatedAnnealing<OneMax> {
        SimulatedAnnealing::new(OneMax::new(16).unwrap(), options).unwrap()
    }

    #[test]
    fn test_step_before_start() {
        let mut sa = solver(SaOptions::default());
        let mut history = History::new();
        let mut rng = RandomNumberGenerator::from_seed(0);
        assert!(sa.anneal_step(&mut history, &mut rng).is_err());
        assert_eq!(sa.temperature(), 100.0);
        assert_eq!(sa.step(), 0);
    }

    #[test]
    fn test_stops_at_step_budget() {
        let mut sa = solver(SaOptions::new(100.0, 0.99, 0.01, 25));
        let mut history = History::new();
        let mut rng = RandomNumberGenerator::from_seed(1);
        let result = sa.solve(&mut history, &mut rng).unwrap();
        assert_eq!(result.steps, 25);
        assert_eq!(history.len(), 25);
        assert!(!sa.is_running());
    }

    #[test]
    fn test_stops_at_min_temperature() {
        // 1.0 * 0.5^n <= 0.1 first holds at n = 4.
        let mut sa = solver(SaOptions::new(1.0, 0.5, 0.1, 1000));
        let mut history = History::new();
        let mut rng = RandomNumberGenerator::from_seed(2);
        let result = sa.solve(&mut history, &mut rng).unwrap();
        assert_eq!(result.steps, 4);
        assert_eq!(result.final_temperature, 0.0625);
    }

    #[test]
    fn test_temperature_strictly_decreases() {
        let mut sa = solver(SaOptions::new(10.0, 0.9, 0.01, 500));
        let mut history = History::new();
        let mut rng = RandomNumberGenerator::from_seed(3);
        sa.start(&mut rng);

        let mut previous = sa.temperature();
        while sa.anneal_step(&mut history, &mut rng).unwrap() {
            let now = sa.temperature();
            assert!(now < previous);
            previous = now;
        }
        assert!(sa.temperature() <= 0.01 || sa.step() == 500);
    }

    #[test]
    fn test_best_tracks_history() {
        let mut sa = solver(SaOptions::default());
        let mut history = History::new();
        let mut rng = RandomNumberGenerator::from_seed(4);
        let result = sa.solve(&mut history, &mut rng).unwrap();

        let last = history.last().unwrap();
        assert_eq!(last.best_fitness, result.best_fitness);
        assert_eq!(last.best_individual, result.best);
        assert_eq!(sa.problem().evaluate(&result.best), result.best_fitness);
        assert!(result.accepted_moves <= result.steps);
    }

    #[test]
    fn test_rejects_invalid_options() {
        let result = SimulatedAnnealing::new(
            OneMax::new(4).unwrap(),
            SaOptions::new(100.0, 1.5, 0.01, 10),
        );
        assert!(matches!(result, Err(OptimError::Configuration(_))));
    }
}
