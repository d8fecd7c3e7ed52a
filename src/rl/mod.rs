//! # Reinforcement Learning
//!
//! A [`Problem`](crate::problem::Problem) seen as a decision process: the
//! state is the current individual, an action flips one gene, and the reward
//! is the resulting change in fitness. [`QLearningSolver`] learns a tabular
//! policy over any [`Environment`] with index-valued actions.
//!
//! The Q-table grows with every distinct state visited, so tabular learning
//! is only practical for small problems; [`RlOptions::state_limit`] bounds it.

pub mod environment;
pub mod q_table;
pub mod solver;

pub use environment::{Environment, OneMaxEnv, ProblemEnv, Transition};
pub use q_table::QTable;
pub use solver::{QLearningSolver, RlOptions, RlOptionsBuilder, Rollout, TrainingReport};
