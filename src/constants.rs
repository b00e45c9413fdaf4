//! Board dimensions and protocol literals.
//!
//! # Board Size Configuration
//!
//! The board size is controlled by Cargo features:
//! - `board9x9` (default): 9x9 board
//! - `board13x13`: 13x13 board
//!
//! ```sh
//! cargo build                                               # 9x9 (default)
//! cargo build --no-default-features --features board13x13   # 13x13
//! ```

use crate::board::Point;

// =============================================================================
// Board Geometry
// =============================================================================

/// Board size (NxN). NoGo matches are played on 9x9.
#[cfg(feature = "board9x9")]
pub const N: usize = 9;

#[cfg(feature = "board13x13")]
pub const N: usize = 13;

// Compile-time check: exactly one board size feature must be enabled
#[cfg(all(feature = "board9x9", feature = "board13x13"))]
compile_error!("Cannot enable both 'board9x9' and 'board13x13' features at the same time");

#[cfg(not(any(feature = "board9x9", feature = "board13x13")))]
compile_error!("Must enable exactly one board size feature: 'board9x9' or 'board13x13'");

/// Number of cells on the board.
pub const CELLS: usize = N * N;

/// Offsets to the 4 orthogonal neighbours, as `(dx, dy)`.
/// Order: West, North, East, South.
pub const DIRECTIONS: [(i32, i32); 4] = [(-1, 0), (0, -1), (1, 0), (0, 1)];

// =============================================================================
// Protocol Literals
// =============================================================================

/// Coordinate sent as the first opponent move when this agent moves first.
pub const FIRST_MOVE_SENTINEL: Point = Point { x: -1, y: -1 };

/// Line written after every response in long-running mode so the host keeps
/// the process alive for the next turn.
pub const KEEP_RUNNING_CMD: &str = ">>>BOTZONE_REQUEST_KEEP_RUNNING<<<";
