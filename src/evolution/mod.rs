pub mod options;
pub mod solver;

pub use options::{GaOptions, GaOptionsBuilder};
pub use solver::{EvolutionResult, GenerationStats, GeneticSolver};
