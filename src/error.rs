//! # Error Types
//!
//! This module defines the error type shared by every problem, solver and
//! environment in the crate. Errors are domain-validation failures: bad
//! options rejected at construction, or mismatched inputs rejected at the
//! first offending call.
//!
//! ## Examples
//!
//! Using the `Result` type:
//!
//! ```rust
//! use optsim::error::{OptimError, Result};
//!
//! fn check_rate(rate: f64) -> Result<f64> {
//!     if !(0.0..=1.0).contains(&rate) {
//!         return Err(OptimError::Configuration(format!(
//!             "Mutation rate must be between 0.0 and 1.0, got {}",
//!             rate
//!         )));
//!     }
//!     Ok(rate)
//! }
//!
//! assert!(check_rate(0.5).is_ok());
//! assert!(check_rate(1.5).is_err());
//! ```
//!
//! Using the `OptionExt` trait to convert `Option` to `Result`:
//!
//! ```rust
//! use optsim::error::{OptimError, OptionExt};
//!
//! fn first_gene(genes: &[u8]) -> optsim::error::Result<u8> {
//!     genes.first().copied().ok_or_else_optim(|| OptimError::EmptyPopulation)
//! }
//!
//! assert!(first_gene(&[]).is_err());
//! ```

use std::error::Error as StdError;
use std::fmt;
use thiserror::Error;

/// Represents errors that can occur while building or running a solver.
#[derive(Error, Debug)]
pub enum OptimError {
    /// An invalid option or parameter was supplied.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Two genomes (or a genome and a problem) disagree on length.
    #[error("Length mismatch: expected {expected} genes, found {found}")]
    LengthMismatch { expected: usize, found: usize },

    /// A gene outside {0, 1} was supplied.
    #[error("Invalid gene {gene} at position {position}: genes must be 0 or 1")]
    InvalidGene { position: usize, gene: u8 },

    /// Crossover is impossible for the given genomes.
    #[error("Crossover error: {0}")]
    Crossover(String),

    /// An operation required a non-empty population.
    #[error("Empty population error: Cannot operate on an empty population")]
    EmptyPopulation,

    /// The environment was driven out of order.
    #[error("Environment error: {0}")]
    Environment(String),

    /// An action outside the declared action set was used.
    #[error("Unknown action {0}: not part of the declared action set")]
    UnknownAction(usize),

    /// The Q-table reached its state limit.
    #[error("State space exhausted: the Q-table is limited to {0} states")]
    StateSpaceExhausted(usize),

    /// NaN or infinite values were encountered.
    #[error("Invalid numeric value: {0}")]
    InvalidNumericValue(String),

    /// An I/O operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A generic error with a custom message.
    #[error("{0}")]
    Other(String),
}

/// A specialized Result type for solver operations.
pub type Result<T> = std::result::Result<T, OptimError>;

/// Extension trait for Result to add context to errors.
///
/// ## Examples
///
/// ```rust
/// use optsim::error::ResultExt;
/// use std::fs::File;
///
/// fn open_history(path: &str) -> optsim::error::Result<()> {
///     File::open(path).context("Failed to open history file")?;
///     Ok(())
/// }
///
/// assert!(open_history("/definitely/not/here.json").is_err());
/// ```
pub trait ResultExt<T, E> {
    /// Converts the error to an `OptimError` prefixed with `context`.
    fn context<C>(self, context: C) -> Result<T>
    where
        C: fmt::Display + Send + Sync + 'static;
}

impl<T, E> ResultExt<T, E> for std::result::Result<T, E>
where
    E: StdError + Send + Sync + 'static,
{
    fn context<C>(self, context: C) -> Result<T>
    where
        C: fmt::Display + Send + Sync + 'static,
    {
        self.map_err(|e| OptimError::Other(format!("{}: {}", context, e)))
    }
}

/// Extension trait for Option to convert to Result with a custom error.
pub trait OptionExt<T> {
    /// Converts an `Option<T>` to a `Result<T, OptimError>` using `err_fn` for `None`.
    fn ok_or_else_optim<F>(self, err_fn: F) -> Result<T>
    where
        F: FnOnce() -> OptimError;
}

impl<T> OptionExt<T> for Option<T> {
    fn ok_or_else_optim<F>(self, err_fn: F) -> Result<T>
    where
        F: FnOnce() -> OptimError,
    {
        self.ok_or_else(err_fn)
    }
}

/// Checks that a probability lies in `[0, 1]`.
pub(crate) fn ensure_probability(name: &str, value: f64) -> Result<()> {
    if !value.is_finite() {
        return Err(OptimError::InvalidNumericValue(format!(
            "{} must be finite, got {}",
            name, value
        )));
    }
    if !(0.0..=1.0).contains(&value) {
        return Err(OptimError::Configuration(format!(
            "{} must be between 0.0 and 1.0, got {}",
            name, value
        )));
    }
    Ok(())
}
