pub mod annealing;
pub mod error;
pub mod evolution;
pub mod individual;
pub mod logger;
pub mod problem;
pub mod rl;
pub mod rng;
pub mod selection;

// Re-export commonly used types for convenience
pub use annealing::{SaOptions, SimulatedAnnealing};
pub use error::{OptimError, OptionExt, Result, ResultExt};
pub use evolution::{GaOptions, GeneticSolver};
pub use individual::Individual;
pub use logger::{History, Logger, ProgressRecord, TracingLogger};
pub use problem::{Knapsack, OneMax, Problem};
pub use rl::{Environment, OneMaxEnv, ProblemEnv, QLearningSolver, RlOptions};
pub use rng::RandomNumberGenerator;
