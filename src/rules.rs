//! NoGo legality.
//!
//! NoGo is Go without captures: a move is legal only if, after placement,
//! the new stone's group still has a liberty and no adjacent opposing group
//! has lost its last one. Legality is defined on the post-placement board, so
//! [`is_legal`] places the stone provisionally and rolls it back before
//! returning.

use crate::board::{Board, CellState, Group, Point};
use crate::constants::{CELLS, N};

/// `Mine <-> Enemy`; `Empty` maps to `Empty`.
#[inline]
pub fn opposite_color(color: CellState) -> CellState {
    color.opposite()
}

/// Number of empty orthogonal neighbours of a single point.
pub fn point_liberties(board: &Board, p: Point) -> usize {
    Board::neighbors(p)
        .filter(|&n| board.at(n) == Some(CellState::Empty))
        .count()
}

/// Number of distinct empty cells adjacent to any stone of `group`.
///
/// A liberty shared by two members is counted once.
pub fn group_liberties(board: &Board, group: &Group) -> usize {
    let mut seen = [false; CELLS];
    let mut libs = 0;
    for &stone in &group.stones {
        for n in Board::neighbors(stone) {
            let i = n.y as usize * N + n.x as usize;
            if !seen[i] && board.at(n) == Some(CellState::Empty) {
                seen[i] = true;
                libs += 1;
            }
        }
    }
    libs
}

/// Liberties of the group holding the stone at `p`; 0 for an empty point.
fn liberties_at(board: &Board, p: Point) -> usize {
    board
        .group_at(p)
        .map_or(0, |group| group_liberties(board, &group))
}

/// Whether some opposing group next to `p` has no liberties, assuming a
/// `color` stone already stands on `p`.
fn captures_after_placement(board: &Board, p: Point, color: CellState) -> bool {
    let enemy = opposite_color(color);
    Board::neighbors(p)
        .filter(|&n| board.at(n) == Some(enemy))
        .any(|n| liberties_at(board, n) == 0)
}

/// Whether placing `color` at `(x, y)` would leave an adjacent opposing group
/// without liberties.
///
/// Returns false for occupied or off-board points and for `Empty`. The board
/// is unchanged on return.
pub fn would_capture(board: &mut Board, x: i32, y: i32, color: CellState) -> bool {
    let p = Point::new(x, y);
    if !color.is_stone() || board.at(p) != Some(CellState::Empty) {
        return false;
    }
    board.set(p, color);
    let captures = captures_after_placement(board, p, color);
    board.set(p, CellState::Empty);
    captures
}

/// Whether `color` may play at `(x, y)`.
///
/// Illegal if `color` is `Empty`, the point is off the board or occupied,
/// the placed stone's group has no liberties (suicide), or an adjacent
/// opposing group would be captured. The board is unchanged on return.
pub fn is_legal(board: &mut Board, x: i32, y: i32, color: CellState) -> bool {
    let p = Point::new(x, y);
    if !color.is_stone() || board.at(p) != Some(CellState::Empty) {
        return false;
    }
    board.set(p, color);
    let legal = liberties_at(board, p) > 0 && !captures_after_placement(board, p, color);
    board.set(p, CellState::Empty);
    legal
}

/// All points where `color` may legally play, row by row.
pub fn legal_moves(board: &mut Board, color: CellState) -> Vec<Point> {
    Board::points()
        .filter(|p| is_legal(board, p.x, p.y, color))
        .collect()
}
