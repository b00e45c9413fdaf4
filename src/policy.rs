//! Move selection.
//!
//! The controller hands a policy the current board and the legal points for
//! the side to move; the policy picks one. Only a uniform random policy ships.

use crate::board::{Board, CellState, Point};

pub trait Policy {
    /// Pick one of `legal`, or `None` when it is empty.
    fn select(&mut self, board: &Board, color: CellState, legal: &[Point]) -> Option<Point>;
}

/// Picks uniformly among the legal points.
pub struct RandomPolicy {
    rng: fastrand::Rng,
}

impl Default for RandomPolicy {
    fn default() -> Self {
        Self::new()
    }
}

impl RandomPolicy {
    /// Seeded from the process entropy source.
    pub fn new() -> Self {
        Self {
            rng: fastrand::Rng::new(),
        }
    }

    /// Reproducible sequence for a given seed.
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: fastrand::Rng::with_seed(seed),
        }
    }
}

impl Policy for RandomPolicy {
    fn select(&mut self, _board: &Board, _color: CellState, legal: &[Point]) -> Option<Point> {
        if legal.is_empty() {
            return None;
        }
        Some(legal[self.rng.usize(..legal.len())])
    }
}
