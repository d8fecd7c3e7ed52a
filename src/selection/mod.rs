pub mod tournament;

pub use tournament::{TournamentSelection, DEFAULT_TOURNAMENT_SIZE};
