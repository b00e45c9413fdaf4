//! Per-match move record and hand order.

use crate::board::{CellState, Point};
use crate::constants::FIRST_MOVE_SENTINEL;

/// Whether this agent moved first or second in the match.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum HandOrder {
    EarlyHand,
    LateHand,
}

/// Ordered moves of both sides for the current match.
///
/// Append-only within a match. The hand order is fixed by the first enemy
/// entry observed and is not re-derived afterwards.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MoveHistory {
    self_moves: Vec<Point>,
    enemy_moves: Vec<Point>,
    hand_order: Option<HandOrder>,
}

impl MoveHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn self_moves(&self) -> &[Point] {
        &self.self_moves
    }

    pub fn enemy_moves(&self) -> &[Point] {
        &self.enemy_moves
    }

    /// `None` until the first enemy entry has been seen.
    pub fn hand_order(&self) -> Option<HandOrder> {
        self.hand_order
    }

    /// Total number of recorded stones.
    pub fn len(&self) -> usize {
        self.self_moves.len() + self.enemy_moves.len()
    }

    pub fn is_empty(&self) -> bool {
        self.self_moves.is_empty() && self.enemy_moves.is_empty()
    }

    /// Whether an enemy entry (real move or sentinel) has been seen this match.
    pub fn has_seen_enemy(&self) -> bool {
        self.hand_order.is_some()
    }

    /// Record the first enemy entry of a match and derive the hand order.
    ///
    /// A sentinel means no real move exists yet: both sides are cleared and
    /// the agent is early hand. Later calls are ignored.
    pub fn observe_first_enemy(&mut self, p: Point) {
        if self.hand_order.is_some() {
            return;
        }
        if p == FIRST_MOVE_SENTINEL {
            self.self_moves.clear();
            self.enemy_moves.clear();
            self.hand_order = Some(HandOrder::EarlyHand);
        } else {
            self.hand_order = Some(HandOrder::LateHand);
        }
    }

    /// Append a placed stone to the side owning `color`. `Empty` is ignored.
    pub fn push(&mut self, color: CellState, p: Point) {
        match color {
            CellState::Mine => self.self_moves.push(p),
            CellState::Enemy => self.enemy_moves.push(p),
            CellState::Empty => {}
        }
    }

    /// Forget everything, including the hand order, for a new match.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sentinel_sets_early_hand_and_clears() {
        let mut history = MoveHistory::new();
        history.push(CellState::Mine, Point::new(1, 1));
        history.observe_first_enemy(FIRST_MOVE_SENTINEL);
        assert!(history.is_empty());
        assert_eq!(history.hand_order(), Some(HandOrder::EarlyHand));
    }

    #[test]
    fn test_real_first_move_is_late_hand() {
        let mut history = MoveHistory::new();
        history.observe_first_enemy(Point::new(4, 4));
        assert_eq!(history.hand_order(), Some(HandOrder::LateHand));
    }

    #[test]
    fn test_hand_order_is_set_once() {
        let mut history = MoveHistory::new();
        history.observe_first_enemy(Point::new(4, 4));
        history.push(CellState::Enemy, Point::new(4, 4));
        history.observe_first_enemy(FIRST_MOVE_SENTINEL);
        assert_eq!(history.hand_order(), Some(HandOrder::LateHand));
        assert_eq!(history.enemy_moves(), &[Point::new(4, 4)]);
    }

    #[test]
    fn test_push_by_side() {
        let mut history = MoveHistory::new();
        history.push(CellState::Enemy, Point::new(0, 0));
        history.push(CellState::Mine, Point::new(1, 0));
        history.push(CellState::Empty, Point::new(2, 0));
        assert_eq!(history.len(), 2);
        assert_eq!(history.self_moves(), &[Point::new(1, 0)]);

        history.reset();
        assert!(history.is_empty());
        assert_eq!(history.hand_order(), None);
    }
}
