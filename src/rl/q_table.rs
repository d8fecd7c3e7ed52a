use std::collections::{HashMap, HashSet};
use std::hash::Hash;

use crate::error::{OptimError, OptionExt, Result};

/// Tabular action-value estimates.
///
/// Rows are created zero-filled, one entry per declared action, the first
/// time a state is touched through [`QTable::row_or_insert`]. Read-only
/// lookups never create rows. With a state limit set, touching a new state
/// once the limit is reached fails instead of growing the table.
///
/// # Examples
///
/// ```rust
/// use optsim::rl::QTable;
///
/// let mut table: QTable<&str> = QTable::new(vec![0, 1, 2], None).unwrap();
/// assert!(table.row(&"start").is_none());
///
/// table.set(&"start", 2, 1.5).unwrap();
/// assert_eq!(table.row(&"start"), Some(&[0.0, 0.0, 1.5][..]));
/// assert_eq!(table.best_action(&"start").unwrap(), 2);
/// ```
#[derive(Debug, Clone)]
pub struct QTable<S> {
    actions: Vec<usize>,
    positions: HashMap<usize, usize>,
    rows: HashMap<S, Vec<f64>>,
    state_limit: Option<usize>,
}

impl<S> QTable<S>
where
    S: Clone + Eq + Hash,
{
    /// Creates an empty table over the declared `actions`.
    ///
    /// # Errors
    ///
    /// Returns an error if `actions` is empty or contains duplicates, or if
    /// `state_limit` is `Some(0)`.
    pub fn new(actions: Vec<usize>, state_limit: Option<usize>) -> Result<Self> {
        if actions.is_empty() {
            return Err(OptimError::Configuration(
                "Action set cannot be empty".to_string(),
            ));
        }
        let unique: HashSet<_> = actions.iter().collect();
        if unique.len() != actions.len() {
            return Err(OptimError::Configuration(
                "Action set cannot contain duplicates".to_string(),
            ));
        }
        if state_limit == Some(0) {
            return Err(OptimError::Configuration(
                "State limit must be greater than 0".to_string(),
            ));
        }

        let positions = actions
            .iter()
            .enumerate()
            .map(|(position, &action)| (action, position))
            .collect();

        Ok(Self {
            actions,
            positions,
            rows: HashMap::new(),
            state_limit,
        })
    }

    /// The declared action set, in declaration order.
    pub fn actions(&self) -> &[usize] {
        &self.actions
    }

    /// Number of states with a row.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn contains(&self, state: &S) -> bool {
        self.rows.contains_key(state)
    }

    /// The row of `state`, if it has been touched.
    pub fn row(&self, state: &S) -> Option<&[f64]> {
        self.rows.get(state).map(Vec::as_slice)
    }

    fn position(&self, action: usize) -> Result<usize> {
        self.positions
            .get(&action)
            .copied()
            .ok_or(OptimError::UnknownAction(action))
    }

    /// Returns the row of `state`, creating a zero-filled one if needed.
    ///
    /// # Errors
    ///
    /// Returns `StateSpaceExhausted` if a new row would exceed the state limit.
    pub fn row_or_insert(&mut self, state: &S) -> Result<&mut [f64]> {
        if !self.rows.contains_key(state) {
            if let Some(limit) = self.state_limit {
                if self.rows.len() >= limit {
                    return Err(OptimError::StateSpaceExhausted(limit));
                }
            }
            self.rows.insert(state.clone(), vec![0.0; self.actions.len()]);
        }

        self.rows
            .get_mut(state)
            .map(Vec::as_mut_slice)
            .ok_or_else_optim(|| OptimError::Other("Q-table row vanished".to_string()))
    }

    /// `Q(state, action)`, touching the state.
    pub fn value(&mut self, state: &S, action: usize) -> Result<f64> {
        let position = self.position(action)?;
        Ok(self.row_or_insert(state)?[position])
    }

    /// Overwrites `Q(state, action)`, touching the state.
    pub fn set(&mut self, state: &S, action: usize, value: f64) -> Result<()> {
        let position = self.position(action)?;
        self.row_or_insert(state)?[position] = value;
        Ok(())
    }

    /// `max_a Q(state, a)`, touching the state.
    pub fn max_value(&mut self, state: &S) -> Result<f64> {
        let row = self.row_or_insert(state)?;
        Ok(row.iter().copied().fold(f64::NEG_INFINITY, f64::max))
    }

    /// The action with the highest value; ties go to the earliest declared action.
    pub fn best_action(&mut self, state: &S) -> Result<usize> {
        let row = self.row_or_insert(state)?;

        let mut best = 0;
        for (position, &value) in row.iter().enumerate().skip(1) {
            if value > row[best] {
                best = position;
            }
        }

        Ok(self.actions[best])
    }
}
