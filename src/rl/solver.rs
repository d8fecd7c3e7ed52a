use tracing::{debug, info};

use super::environment::Environment;
use super::q_table::QTable;
use crate::error::{ensure_probability, OptimError, OptionExt, Result};
use crate::rng::RandomNumberGenerator;

/// Epsilon is multiplied by this factor every [`DECAY_INTERVAL`] episodes.
pub const EPSILON_DECAY: f64 = 0.99;

/// Epsilon never decays below this floor.
pub const MIN_EPSILON: f64 = 0.01;

/// Episodes between two epsilon decays.
pub const DECAY_INTERVAL: usize = 100;

/// Hyperparameters of the Q-learning solver.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct RlOptions {
    /// Learning rate in (0, 1].
    pub alpha: f64,
    /// Discount factor in [0, 1].
    pub gamma: f64,
    /// Initial exploration probability in [0, 1].
    pub epsilon: f64,
    /// Maximum number of states the Q-table may hold; `None` for no limit.
    pub state_limit: Option<usize>,
}

impl Default for RlOptions {
    fn default() -> Self {
        Self {
            alpha: 0.1,
            gamma: 0.9,
            epsilon: 0.1,
            state_limit: Some(1 << 16),
        }
    }
}

impl RlOptions {
    pub fn builder() -> RlOptionsBuilder {
        RlOptionsBuilder {
            options: Self::default(),
        }
    }

    /// Validates the hyperparameters.
    ///
    /// # Errors
    ///
    /// Returns an error if `alpha` is not in (0, 1], or `gamma` or `epsilon`
    /// are not in [0, 1].
    pub fn validate(&self) -> Result<()> {
        ensure_probability("Learning rate", self.alpha)?;
        if self.alpha == 0.0 {
            return Err(OptimError::Configuration(
                "Learning rate must be greater than 0.0".to_string(),
            ));
        }
        ensure_probability("Discount factor", self.gamma)?;
        ensure_probability("Exploration rate", self.epsilon)?;
        Ok(())
    }
}

/// Builder for `RlOptions`, starting from the defaults.
#[derive(Debug, Clone)]
pub struct RlOptionsBuilder {
    options: RlOptions,
}

impl RlOptionsBuilder {
    pub fn alpha(mut self, value: f64) -> Self {
        self.options.alpha = value;
        self
    }

    pub fn gamma(mut self, value: f64) -> Self {
        self.options.gamma = value;
        self
    }

    pub fn epsilon(mut self, value: f64) -> Self {
        self.options.epsilon = value;
        self
    }

    pub fn state_limit(mut self, value: Option<usize>) -> Self {
        self.options.state_limit = value;
        self
    }

    pub fn build(self) -> RlOptions {
        self.options
    }
}

/// Summary of a training run.
#[derive(Debug, Clone, PartialEq)]
pub struct TrainingReport {
    pub episodes: usize,
    /// Sum of rewards collected in each episode.
    pub episode_rewards: Vec<f64>,
    /// Exploration rate after the last decay.
    pub final_epsilon: f64,
    /// Number of states in the Q-table after training.
    pub states: usize,
}

/// A greedy walk through the environment.
#[derive(Debug, Clone, PartialEq)]
pub struct Rollout<S> {
    pub final_state: S,
    /// Every visited state, starting with the reset state.
    pub path: Vec<S>,
}

impl<S> Rollout<S> {
    /// Number of transitions taken.
    pub fn steps(&self) -> usize {
        self.path.len().saturating_sub(1)
    }
}

/// Tabular Q-learning with epsilon-greedy exploration.
///
/// # Examples
///
/// ```rust
/// use optsim::problem::OneMax;
/// use optsim::rl::{OneMaxEnv, QLearningSolver, RlOptions};
/// use optsim::rng::RandomNumberGenerator;
///
/// let env = OneMaxEnv::new(OneMax::new(4).unwrap());
/// let actions = env.action_space();
/// let options = RlOptions::builder().alpha(0.5).epsilon(0.2).build();
/// let mut solver = QLearningSolver::new(env, actions, options).unwrap();
///
/// let mut rng = RandomNumberGenerator::from_seed(9);
/// let report = solver.train(50, 8, &mut rng).unwrap();
/// assert_eq!(report.episodes, 50);
///
/// let rollout = solver.solve(8, &mut rng).unwrap();
/// assert!(rollout.steps() <= 8);
/// assert_eq!(rollout.path.last(), Some(&rollout.final_state));
/// ```
#[derive(Debug, Clone)]
pub struct QLearningSolver<E: Environment> {
    env: E,
    q_table: QTable<E::State>,
    options: RlOptions,
    epsilon: f64,
}

impl<E: Environment> QLearningSolver<E> {
    /// Creates a solver over `env` with the declared action set.
    ///
    /// # Errors
    ///
    /// Returns an error if the options are invalid or the action set is
    /// empty or has duplicates.
    pub fn new(env: E, actions: Vec<usize>, options: RlOptions) -> Result<Self> {
        options.validate()?;
        let q_table = QTable::new(actions, options.state_limit)?;

        Ok(Self {
            env,
            q_table,
            epsilon: options.epsilon,
            options,
        })
    }

    pub fn env(&self) -> &E {
        &self.env
    }

    pub fn env_mut(&mut self) -> &mut E {
        &mut self.env
    }

    pub fn q_table(&self) -> &QTable<E::State> {
        &self.q_table
    }

    pub fn options(&self) -> &RlOptions {
        &self.options
    }

    /// Current exploration rate.
    pub fn epsilon(&self) -> f64 {
        self.epsilon
    }

    /// `Q(state, action)`, creating the state's row if needed.
    pub fn q_value(&mut self, state: &E::State, action: usize) -> Result<f64> {
        self.q_table.value(state, action)
    }

    /// Epsilon-greedy action choice.
    ///
    /// Explores with probability epsilon; otherwise returns the best known
    /// action for `state`, creating its row first if unseen.
    pub fn choose_action(
        &mut self,
        state: &E::State,
        rng: &mut RandomNumberGenerator,
    ) -> Result<usize> {
        if rng.chance(self.epsilon) {
            return rng.choose(self.q_table.actions()).ok_or_else_optim(|| {
                OptimError::Configuration("Action set is empty".to_string())
            });
        }
        self.q_table.best_action(state)
    }

    /// One-step Q-learning update:
    /// `Q(s,a) += alpha * (reward + gamma * max Q(s',·) - Q(s,a))`.
    pub fn update(
        &mut self,
        state: &E::State,
        action: usize,
        reward: f64,
        next_state: &E::State,
    ) -> Result<()> {
        let old_q = self.q_table.value(state, action)?;
        let max_next_q = self.q_table.max_value(next_state)?;

        let target = reward + self.options.gamma * max_next_q;
        let new_q = old_q + self.options.alpha * (target - old_q);
        self.q_table.set(state, action, new_q)
    }

    fn decay_epsilon(&mut self) {
        self.epsilon = (self.epsilon * EPSILON_DECAY).max(MIN_EPSILON);
    }

    /// Trains for `episodes` episodes of at most `max_steps` steps each.
    ///
    /// Epsilon decays after every episode whose index is a multiple of
    /// [`DECAY_INTERVAL`], starting with episode 0.
    pub fn train(
        &mut self,
        episodes: usize,
        max_steps: usize,
        rng: &mut RandomNumberGenerator,
    ) -> Result<TrainingReport> {
        info!(episodes, max_steps, epsilon = self.epsilon, "Training Q-learning agent");

        let mut episode_rewards = Vec::with_capacity(episodes);
        for episode in 0..episodes {
            let mut state = self.env.reset(rng);
            let mut total_reward = 0.0;

            for _ in 0..max_steps {
                let action = self.choose_action(&state, rng)?;
                let transition = self.env.step(action)?;

                self.update(&state, action, transition.reward, &transition.next_state)?;

                state = transition.next_state;
                total_reward += transition.reward;

                if transition.done {
                    break;
                }
            }
            episode_rewards.push(total_reward);

            if episode % DECAY_INTERVAL == 0 {
                self.decay_epsilon();
                debug!(episode, epsilon = self.epsilon, "Decayed exploration rate");
            }
        }

        info!(states = self.q_table.len(), "Training complete");
        Ok(TrainingReport {
            episodes,
            episode_rewards,
            final_epsilon: self.epsilon,
            states: self.q_table.len(),
        })
    }

    /// Greedy walk of at most `max_steps` transitions from a fresh reset.
    ///
    /// Exploration is switched off for the walk and restored afterwards,
    /// whether or not the walk succeeds.
    pub fn solve(
        &mut self,
        max_steps: usize,
        rng: &mut RandomNumberGenerator,
    ) -> Result<Rollout<E::State>> {
        let original_epsilon = self.epsilon;
        self.epsilon = 0.0;
        let rollout = self.greedy_rollout(max_steps, rng);
        self.epsilon = original_epsilon;
        rollout
    }

    fn greedy_rollout(
        &mut self,
        max_steps: usize,
        rng: &mut RandomNumberGenerator,
    ) -> Result<Rollout<E::State>> {
        let mut state = self.env.reset(rng);
        let mut path = vec![state.clone()];

        for _ in 0..max_steps {
            let action = self.choose_action(&state, rng)?;
            let transition = self.env.step(action)?;
            state = transition.next_state;
            path.push(state.clone());
            if transition.done {
                break;
            }
        }

        Ok(Rollout {
            final_state: state,
            path,
        })
    }
}
