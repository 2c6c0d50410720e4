//! 0/1 knapsack optimizer.
//!
//! Bottom-up dynamic programming over a single table indexed by capacity.
//! Each item is folded in with a descending capacity sweep, so `table[w -
//! weight]` still holds the value from before this item was considered and
//! no item can be taken twice.
//!
//! The optimizer is integer-only and visits items in the order given, which
//! keeps the result a pure function of its inputs across machines.

use crate::error::SolveError;

/// Incremental knapsack table for a fixed capacity.
///
/// ```
/// use knapsack_offchain::knapsack::Knapsack;
///
/// let mut ks = Knapsack::new(10).unwrap();
/// ks.insert(10, 5);
/// ks.insert(7, 3);
/// ks.insert(1, 1);
/// assert_eq!(ks.best(), 18);
/// ```
#[derive(Debug, Clone)]
pub struct Knapsack {
    table: Vec<u128>,
}

impl Knapsack {
    /// Allocate a zeroed table for capacities `0..=max_weight`.
    pub fn new(max_weight: u64) -> Result<Self, SolveError> {
        let len = usize::try_from(max_weight)
            .ok()
            .and_then(|w| w.checked_add(1))
            .ok_or(SolveError::CapacityTooLarge(max_weight))?;
        Ok(Self {
            table: vec![0; len],
        })
    }

    pub fn max_weight(&self) -> u64 {
        (self.table.len() - 1) as u64
    }

    /// Fold one item into the table.
    pub fn insert(&mut self, value: u64, weight: u64) {
        let max_weight = self.table.len() - 1;
        let weight = match usize::try_from(weight) {
            Ok(w) if w <= max_weight => w,
            // Heavier than the whole capacity: never selectable.
            _ => return,
        };
        let value = u128::from(value);
        for w in (weight..=max_weight).rev() {
            let candidate = self.table[w - weight] + value;
            if candidate > self.table[w] {
                self.table[w] = candidate;
            }
        }
    }

    /// Best total value achievable within the full capacity.
    pub fn best(&self) -> u128 {
        self.table[self.table.len() - 1]
    }
}

/// Maximum total value of a subset of items whose total weight is at most
/// `max_weight`, each item used at most once.
pub fn solve(values: &[u64], weights: &[u64], max_weight: u64) -> Result<u128, SolveError> {
    if values.len() != weights.len() {
        return Err(SolveError::LengthMismatch {
            values: values.len(),
            weights: weights.len(),
        });
    }

    let mut knapsack = Knapsack::new(max_weight)?;
    for (value, weight) in values.iter().zip(weights) {
        knapsack.insert(*value, *weight);
    }
    Ok(knapsack.best())
}
