//! Alpha-NoGo: a NoGo agent for turn-based judge platforms.
//!
//! NoGo is played like Go on a 9x9 board, except that capturing is illegal:
//! a move must leave every group on the board, friend or foe, with at least
//! one liberty.
//!
//! ## Modules
//!
//! - [`constants`] - Board dimensions and protocol literals
//! - [`board`] - Cell grid and derived groups
//! - [`rules`] - Legality probing and liberty counting
//! - [`history`] - Per-match move record and hand order
//! - [`protocol`] - Judge wire format and the batch / incremental readers
//! - [`policy`] - Move selection
//! - [`controller`] - Turn loop tying the above together
//! - [`ffi`] - C ABI for embedding the protocol core
//!
//! ## Example
//!
//! ```
//! use alpha_nogo::board::{Board, CellState, Point};
//! use alpha_nogo::rules::is_legal;
//!
//! let mut board = Board::new();
//! board.set(Point::new(1, 0), CellState::Enemy);
//! board.set(Point::new(0, 1), CellState::Enemy);
//!
//! // Playing into the corner would be suicide
//! assert!(!is_legal(&mut board, 0, 0, CellState::Mine));
//! ```

pub mod board;
pub mod constants;
pub mod controller;
pub mod ffi;
pub mod history;
pub mod policy;
pub mod protocol;
pub mod rules;
