use crate::error::{OptimError, Result};
use crate::individual::Individual;
use crate::rng::RandomNumberGenerator;

use super::Problem;

/// Capacity ratio used when none is given.
pub const DEFAULT_CAPACITY_RATIO: f64 = 0.5;

/// Randomly generated weights and values are drawn from `1..=MAX_ITEM_SCORE`.
const MAX_ITEM_SCORE: u32 = 20;

/// Average item weight used to derive the capacity from the ratio.
const CAPACITY_PER_ITEM: f64 = 10.0;

/// A single knapsack item.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Item {
    pub weight: u32,
    pub value: u32,
}

/// 0/1 Knapsack: maximize total value without exceeding the weight capacity.
///
/// Gene `i` set to 1 means item `i` is packed. Overweight selections score
/// exactly 0 rather than failing; the penalty is part of the fitness.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct Knapsack {
    items: Vec<Item>,
    capacity: u64,
}

impl Knapsack {
    /// Generates `size` random items and a capacity of
    /// `floor(size * 10 * capacity_ratio)`.
    ///
    /// # Errors
    ///
    /// Returns an error if `size` is 0 or `capacity_ratio` is negative or not finite.
    pub fn random(
        size: usize,
        capacity_ratio: f64,
        rng: &mut RandomNumberGenerator,
    ) -> Result<Self> {
        if !capacity_ratio.is_finite() || capacity_ratio < 0.0 {
            return Err(OptimError::Configuration(format!(
                "Capacity ratio must be a non-negative number, got {}",
                capacity_ratio
            )));
        }

        let items = (0..size)
            .map(|_| Item {
                weight: random_score(rng),
                value: random_score(rng),
            })
            .collect();
        let capacity = (size as f64 * CAPACITY_PER_ITEM * capacity_ratio).floor() as u64;

        Self::with_items(items, capacity)
    }

    /// Builds an instance from explicit items and capacity.
    ///
    /// # Errors
    ///
    /// Returns an error if `items` is empty.
    pub fn with_items(items: Vec<Item>, capacity: u64) -> Result<Self> {
        if items.is_empty() {
            return Err(OptimError::Configuration(
                "Knapsack needs at least one item".to_string(),
            ));
        }
        Ok(Self { items, capacity })
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn capacity(&self) -> u64 {
        self.capacity
    }

    /// Total weight and value of the packed items.
    pub fn totals(&self, individual: &Individual) -> (u64, u64) {
        self.items
            .iter()
            .zip(individual.genes())
            .filter(|&(_, &gene)| gene == 1)
            .fold((0, 0), |(weight, value), (item, _)| {
                (weight + u64::from(item.weight), value + u64::from(item.value))
            })
    }
}

fn random_score(rng: &mut RandomNumberGenerator) -> u32 {
    rng.index_in(1, MAX_ITEM_SCORE as usize + 1) as u32
}

impl Problem for Knapsack {
    fn name(&self) -> &str {
        "knapsack"
    }

    fn size(&self) -> usize {
        self.items.len()
    }

    fn evaluate(&self, individual: &Individual) -> f64 {
        let (weight, value) = self.totals(individual);
        if weight > self.capacity {
            return 0.0;
        }
        value as f64
    }
}
