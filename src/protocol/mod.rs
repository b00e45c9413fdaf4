//! Judge protocol: wire types and the two turn readers.
//!
//! The host judge talks line-delimited JSON. In stateless (batch) mode every
//! invocation receives the whole match transcript:
//!
//! ```json
//! {"requests": [{"x": -1, "y": -1}, {"x": 2, "y": 3}], "responses": [{"x": 4, "y": 4}]}
//! ```
//!
//! In long-running mode the first message has the same shape and every later
//! one is a bare move `{"x": 5, "y": 1}`. Each turn is answered with
//! `{"response": {"x": .., "y": ..}}`.
//!
//! Both readers leave the sink and [`MoveHistory`] reflecting every move up to
//! and including the newest opponent move. A message is fully validated
//! before the first move is applied.

mod batch;
mod incremental;

pub use batch::BatchReplay;
pub use incremental::Incremental;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::board::{Board, CellState, Point};
use crate::history::MoveHistory;

/// Full match transcript: opponent moves and this agent's earlier replies.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnRequest {
    pub requests: Vec<Point>,
    #[serde(default)]
    pub responses: Vec<Point>,
}

/// One turn's answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnResponse {
    pub response: Point,
}

/// A long-running message: either a full transcript or a single move.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum IncomingMessage {
    Transcript(TurnRequest),
    Move(Point),
}

/// How the host runs the process.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum RunMode {
    /// One process per turn; the full transcript is replayed every time.
    Batch,
    /// One process per match; only the newest move is sent after turn one.
    #[default]
    LongRunning,
}

/// Capability to place stones, implemented by [`Board`] and by test doubles.
pub trait MoveSink {
    fn apply_move(&mut self, point: Point, color: CellState);

    /// Drop all stones before a full replay. Sinks that do not own a board
    /// (e.g. a foreign callback) leave this as a no-op.
    fn reset(&mut self) {}
}

impl MoveSink for Board {
    fn apply_move(&mut self, point: Point, color: CellState) {
        self.set(point, color);
    }

    fn reset(&mut self) {
        Board::reset(self);
    }
}

/// A strategy that turns one judge message into board and history updates.
pub trait ProtocolReader {
    fn read_turn(
        &mut self,
        input: &str,
        history: &mut MoveHistory,
        sink: &mut dyn MoveSink,
    ) -> Result<(), ProtocolError>;
}

/// Reader matching the host's run mode.
pub fn reader_for(mode: RunMode) -> Box<dyn ProtocolReader> {
    match mode {
        RunMode::Batch => Box::new(BatchReplay::new()),
        RunMode::LongRunning => Box::new(Incremental::new()),
    }
}

#[derive(Debug, Error)]
pub enum ProtocolError {
    #[error("malformed judge message: {0}")]
    Json(#[from] serde_json::Error),

    #[error("transcript has {requests} requests and {responses} responses")]
    Transcript { requests: usize, responses: usize },

    #[error("move {0} is outside the board")]
    OutOfRange(Point),

    #[error("first-move sentinel at opponent entry {0}; only the first entry may be a sentinel")]
    MisplacedSentinel(usize),

    #[error("point {0} is already occupied")]
    Occupied(Point),
}

impl ProtocolError {
    pub fn exit_code(&self) -> ExitCode {
        match self {
            ProtocolError::Json(_) | ProtocolError::Transcript { .. } => {
                ExitCode::JsonParsingError
            }
            ProtocolError::OutOfRange(_) | ProtocolError::MisplacedSentinel(_) => {
                ExitCode::InvalidMove
            }
            ProtocolError::Occupied(_) => ExitCode::InvalidBoard,
        }
    }
}

/// Status codes shared by the process exit and the C API.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    Ok = 0,
    JsonParsingError = -1,
    InvalidBoardSize = -2,
    InvalidBoard = -3,
    InvalidMove = -4,
}

impl ExitCode {
    pub fn as_i32(self) -> i32 {
        self as i32
    }
}
