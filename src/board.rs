//! Fixed-size NoGo board.
//!
//! The board only stores cell states. Groups are derived on demand by flood
//! fill and never cached, so they cannot go stale after a placement. Legality
//! lives in [`crate::rules`].

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::constants::{CELLS, DIRECTIONS, N};

/// State of a single cell, seen from this agent's side.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum CellState {
    #[default]
    Empty,
    /// A stone placed by this agent.
    Mine,
    /// A stone placed by the opponent.
    Enemy,
}

impl CellState {
    /// `Mine <-> Enemy`; `Empty` stays `Empty`.
    pub fn opposite(self) -> Self {
        match self {
            CellState::Mine => CellState::Enemy,
            CellState::Enemy => CellState::Mine,
            CellState::Empty => CellState::Empty,
        }
    }

    pub fn is_stone(self) -> bool {
        self != CellState::Empty
    }
}

/// A board coordinate. Signed so the wire sentinel `(-1, -1)` is representable.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub fn is_on_board(self) -> bool {
        in_border(self.x, self.y)
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Whether `(x, y)` lies inside `[0, N)` on both axes.
#[inline]
pub fn in_border(x: i32, y: i32) -> bool {
    x >= 0 && y >= 0 && (x as usize) < N && (y as usize) < N
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BoardError {
    #[error("point ({x}, {y}) is outside the {n}x{n} board", n = N)]
    OutOfRange { x: i32, y: i32 },
}

/// A maximal set of same-coloured, 4-connected stones.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Group {
    pub color: CellState,
    pub stones: Vec<Point>,
}

impl Group {
    pub fn len(&self) -> usize {
        self.stones.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stones.is_empty()
    }

    pub fn contains(&self, p: Point) -> bool {
        self.stones.contains(&p)
    }
}

#[derive(Clone, PartialEq, Eq)]
pub struct Board {
    cells: [CellState; CELLS],
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl Board {
    pub fn new() -> Self {
        Self {
            cells: [CellState::Empty; CELLS],
        }
    }

    fn idx(x: i32, y: i32) -> usize {
        y as usize * N + x as usize
    }

    /// State of the cell at `(x, y)`.
    ///
    /// # Errors
    /// [`BoardError::OutOfRange`] if the point is off the board.
    pub fn get(&self, x: i32, y: i32) -> Result<CellState, BoardError> {
        if !in_border(x, y) {
            return Err(BoardError::OutOfRange { x, y });
        }
        Ok(self.cells[Self::idx(x, y)])
    }

    /// Cell state at `p`, treating off-board points as `None`.
    #[inline]
    pub fn at(&self, p: Point) -> Option<CellState> {
        self.get(p.x, p.y).ok()
    }

    /// Overwrite the cell at `p`. Off-board points are ignored.
    ///
    /// No legality check is done here: the same call serves provisional
    /// placement during a probe and committing an already validated move.
    pub fn set(&mut self, p: Point, color: CellState) {
        if p.is_on_board() {
            self.cells[Self::idx(p.x, p.y)] = color;
        }
    }

    pub fn reset(&mut self) {
        self.cells = [CellState::Empty; CELLS];
    }

    /// Number of stones of `color` on the board (`Empty` counts empty cells).
    pub fn count(&self, color: CellState) -> usize {
        self.cells.iter().filter(|&&c| c == color).count()
    }

    /// All on-board points, row by row.
    pub fn points() -> impl Iterator<Item = Point> {
        (0..N as i32).flat_map(|y| (0..N as i32).map(move |x| Point::new(x, y)))
    }

    /// On-board orthogonal neighbours of `p`.
    pub fn neighbors(p: Point) -> impl Iterator<Item = Point> {
        DIRECTIONS
            .into_iter()
            .map(move |(dx, dy)| Point::new(p.x + dx, p.y + dy))
            .filter(|q| q.is_on_board())
    }

    /// The group containing the stone at `start`, or `None` if the point is
    /// empty or off the board.
    pub fn group_at(&self, start: Point) -> Option<Group> {
        let color = self.at(start).filter(|c| c.is_stone())?;
        let mut stack = vec![start];
        let mut visited = [false; CELLS];
        let mut stones = Vec::new();

        while let Some(p) = stack.pop() {
            let i = Self::idx(p.x, p.y);
            if visited[i] {
                continue;
            }
            visited[i] = true;
            stones.push(p);
            for n in Self::neighbors(p) {
                if !visited[Self::idx(n.x, n.y)] && self.at(n) == Some(color) {
                    stack.push(n);
                }
            }
        }
        Some(Group { color, stones })
    }
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Board\n{self}")
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for y in 0..N as i32 {
            for x in 0..N as i32 {
                let ch = match self.cells[Self::idx(x, y)] {
                    CellState::Mine => 'X',
                    CellState::Enemy => 'O',
                    CellState::Empty => '.',
                };
                write!(f, "{ch} ")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
