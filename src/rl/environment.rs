use std::fmt::Debug;
use std::hash::Hash;

use crate::error::{OptimError, Result};
use crate::individual::Individual;
use crate::problem::{OneMax, Problem};
use crate::rng::RandomNumberGenerator;

/// Outcome of a single environment step.
#[derive(Debug, Clone, PartialEq)]
pub struct Transition<S> {
    pub next_state: S,
    pub reward: f64,
    pub done: bool,
}

/// A reinforcement-learning environment with discrete, index-valued actions.
pub trait Environment {
    type State: Clone + Eq + Hash + Debug;

    /// Starts a new episode and returns its initial state.
    fn reset(&mut self, rng: &mut RandomNumberGenerator) -> Self::State;

    /// Applies `action` to the current state.
    fn step(&mut self, action: usize) -> Result<Transition<Self::State>>;
}

/// Exposes a [`Problem`] as an environment whose actions flip single genes.
///
/// The reward of a step is the change in fitness it caused, and an episode
/// is done once the problem's maximum fitness is reached. There is no step
/// limit here; callers bound their own episodes.
///
/// # Examples
///
/// ```rust
/// use optsim::problem::OneMax;
/// use optsim::rl::{Environment, OneMaxEnv};
/// use optsim::rng::RandomNumberGenerator;
///
/// let mut env = OneMaxEnv::new(OneMax::new(4).unwrap());
/// let mut rng = RandomNumberGenerator::from_seed(1);
///
/// let state = env.reset(&mut rng);
/// let before = state.count_ones() as f64;
///
/// let transition = env.step(0).unwrap();
/// let after = transition.next_state.count_ones() as f64;
/// assert_eq!(transition.reward, after - before);
/// ```
#[derive(Debug, Clone)]
pub struct ProblemEnv<P: Problem> {
    problem: P,
    state: Option<Individual>,
    current_fitness: f64,
}

/// OneMax wrapped as an environment.
pub type OneMaxEnv = ProblemEnv<OneMax>;

impl<P: Problem> ProblemEnv<P> {
    pub fn new(problem: P) -> Self {
        Self {
            problem,
            state: None,
            current_fitness: 0.0,
        }
    }

    pub fn problem(&self) -> &P {
        &self.problem
    }

    /// The current state, or `None` before the first reset.
    pub fn state(&self) -> Option<&Individual> {
        self.state.as_ref()
    }

    pub fn current_fitness(&self) -> f64 {
        self.current_fitness
    }

    /// Every gene index, in order.
    pub fn action_space(&self) -> Vec<usize> {
        (0..self.problem.size()).collect()
    }

    fn is_terminal(&self, fitness: f64) -> bool {
        self.problem.max_fitness() == Some(fitness)
    }
}

impl<P: Problem> Environment for ProblemEnv<P> {
    type State = Individual;

    fn reset(&mut self, rng: &mut RandomNumberGenerator) -> Individual {
        let state = self.problem.create_individual(rng);
        self.current_fitness = self.problem.evaluate(&state);
        self.state = Some(state.clone());
        state
    }

    /// Flips gene `action`; out-of-range actions leave the state unchanged.
    ///
    /// # Errors
    ///
    /// Returns an error if called before [`reset`](Environment::reset).
    fn step(&mut self, action: usize) -> Result<Transition<Individual>> {
        let current = self.state.as_ref().ok_or_else(|| {
            OptimError::Environment("step called before reset".to_string())
        })?;

        let next_state = current.with_flipped(action);
        let new_fitness = self.problem.evaluate(&next_state);
        let reward = new_fitness - self.current_fitness;
        let done = self.is_terminal(new_fitness);

        self.state = Some(next_state.clone());
        self.current_fitness = new_fitness;

        Ok(Transition {
            next_state,
            reward,
            done,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::problem::{Item, Knapsack};

    #[test]
    fn test_step_before_reset() {
        let mut env = OneMaxEnv::new(OneMax::new(3).unwrap());
        assert!(matches!(env.step(0), Err(OptimError::Environment(_))));
    }

    #[test]
    fn test_reset_records_fitness() {
        let mut env = OneMaxEnv::new(OneMax::new(8).unwrap());
        let mut rng = RandomNumberGenerator::from_seed(5);
        let state = env.reset(&mut rng);
        assert_eq!(env.state(), Some(&state));
        assert_eq!(env.current_fitness(), state.count_ones() as f64);
        assert_eq!(env.action_space(), (0..8).collect::<Vec<_>>());
    }

    #[test]
    fn test_flip_rewards_and_termination() {
        let mut env = OneMaxEnv::new(OneMax::new(3).unwrap());
        let mut rng = RandomNumberGenerator::from_seed(6);
        env.reset(&mut rng);

        // Drive the state to all ones, one gene at a time.
        for action in 0..3 {
            let before = env.state().unwrap().genes()[action];
            let transition = env.step(action).unwrap();
            if before == 1 {
                assert_eq!(transition.reward, -1.0);
                env.step(action).unwrap();
            } else {
                assert_eq!(transition.reward, 1.0);
            }
        }
        assert_eq!(env.state(), Some(&Individual::ones(3)));
        assert_eq!(env.current_fitness(), 3.0);

        let away = env.step(1).unwrap();
        assert!(!away.done);
        assert_eq!(away.reward, -1.0);
        let back = env.step(1).unwrap();
        assert!(back.done);
        assert_eq!(back.reward, 1.0);
    }

    #[test]
    fn test_out_of_range_action_is_a_no_op() {
        let mut env = OneMaxEnv::new(OneMax::new(4).unwrap());
        let mut rng = RandomNumberGenerator::from_seed(7);
        let state = env.reset(&mut rng);
        let transition = env.step(99).unwrap();
        assert_eq!(transition.next_state, state);
        assert_eq!(transition.reward, 0.0);
    }

    #[test]
    fn test_unknown_optimum_never_terminates() {
        let problem =
            Knapsack::with_items(vec![Item { weight: 1, value: 1 }; 2], 10).unwrap();
        let mut env = ProblemEnv::new(problem);
        let mut rng = RandomNumberGenerator::from_seed(8);
        env.reset(&mut rng);
        for action in [0, 1, 0, 1, 0, 1] {
            assert!(!env.step(action).unwrap().done);
        }
    }
}
