//! # Simulated Annealing
//!
//! Single-trajectory search over a [`Problem`](crate::problem::Problem) with
//! geometric cooling and Metropolis acceptance of worsening moves.

pub mod options;
pub mod solver;

pub use options::{SaOptions, SaOptionsBuilder};
pub use solver::{AnnealingResult, SimulatedAnnealing};
