//! Turn loop: read one judge message, pick a move, answer.
//!
//! ```text
//! AwaitingInput -> Deciding -> Emitting -> AwaitingInput   (long-running)
//!                                       -> Terminated      (batch, or end of input)
//! ```

use std::io::{self, BufRead, Write};

use log::{debug, info};
use thiserror::Error;

use crate::board::{Board, CellState, Point};
use crate::constants::KEEP_RUNNING_CMD;
use crate::history::MoveHistory;
use crate::policy::Policy;
use crate::protocol::{ExitCode, ProtocolError, ProtocolReader, RunMode, TurnResponse, reader_for};
use crate::rules::legal_moves;

/// Everything known about the match in progress.
#[derive(Debug, Clone, Default)]
pub struct MatchState {
    pub board: Board,
    pub history: MoveHistory,
    /// Completed protocol reads so far.
    pub turn: usize,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum TurnPhase {
    AwaitingInput,
    Deciding,
    Emitting,
    Terminated,
}

#[derive(Debug, Error)]
pub enum ControllerError {
    #[error(transparent)]
    Protocol(#[from] ProtocolError),

    #[error("i/o error: {0}")]
    Io(#[from] io::Error),

    #[error("failed to encode response: {0}")]
    Encode(serde_json::Error),

    #[error("no legal move available")]
    NoLegalMove,

    #[error("policy chose illegal move {0}")]
    IllegalMove(Point),
}

impl ControllerError {
    pub fn exit_code(&self) -> ExitCode {
        match self {
            ControllerError::Protocol(e) => e.exit_code(),
            ControllerError::Io(_) | ControllerError::Encode(_) => ExitCode::JsonParsingError,
            ControllerError::NoLegalMove | ControllerError::IllegalMove(_) => ExitCode::InvalidMove,
        }
    }
}

/// Owns the match state and drives one turn at a time.
pub struct TurnController {
    mode: RunMode,
    reader: Box<dyn ProtocolReader>,
    policy: Box<dyn Policy>,
    state: MatchState,
    phase: TurnPhase,
}

impl TurnController {
    /// Controller reading with the strategy matching `mode`.
    pub fn new(mode: RunMode, policy: Box<dyn Policy>) -> Self {
        Self {
            mode,
            reader: reader_for(mode),
            policy,
            state: MatchState::default(),
            phase: TurnPhase::AwaitingInput,
        }
    }

    pub fn mode(&self) -> RunMode {
        self.mode
    }

    pub fn phase(&self) -> TurnPhase {
        self.phase
    }

    pub fn state(&self) -> &MatchState {
        &self.state
    }

    /// Apply one judge message and return the new turn index.
    pub fn read_input(&mut self, line: &str) -> Result<usize, ControllerError> {
        let MatchState {
            board,
            history,
            turn,
        } = &mut self.state;
        self.reader.read_turn(line, history, board)?;
        *turn += 1;
        Ok(*turn)
    }

    /// Ask the policy for a move among the legal points for this agent.
    pub fn decide(&mut self) -> Result<Point, ControllerError> {
        let legal = legal_moves(&mut self.state.board, CellState::Mine);
        debug!("{} legal moves", legal.len());
        let choice = self
            .policy
            .select(&self.state.board, CellState::Mine, &legal)
            .ok_or(ControllerError::NoLegalMove)?;
        if !legal.contains(&choice) {
            return Err(ControllerError::IllegalMove(choice));
        }
        Ok(choice)
    }

    /// Commit this agent's move to the board and history.
    pub fn commit(&mut self, p: Point) -> TurnResponse {
        self.state.board.set(p, CellState::Mine);
        self.state.history.push(CellState::Mine, p);
        TurnResponse { response: p }
    }

    /// Read, decide and commit one turn.
    pub fn play_turn(&mut self, line: &str) -> Result<TurnResponse, ControllerError> {
        self.phase = TurnPhase::AwaitingInput;
        let turn = self.read_input(line)?;

        self.phase = TurnPhase::Deciding;
        let choice = self.decide()?;

        self.phase = TurnPhase::Emitting;
        info!("turn {turn}: playing {choice}");
        Ok(self.commit(choice))
    }

    /// Serve turns until the input ends, or after one turn in batch mode.
    ///
    /// Any error is fatal: the phase becomes `Terminated` and the error is
    /// returned for the caller to map to an exit code.
    pub fn run<R: BufRead, W: Write>(&mut self, input: R, mut output: W) -> Result<(), ControllerError> {
        let result = self.serve(input, &mut output);
        self.phase = TurnPhase::Terminated;
        result
    }

    fn serve<R: BufRead, W: Write>(&mut self, input: R, output: &mut W) -> Result<(), ControllerError> {
        for line in input.lines() {
            let line = line?;
            let line = line.trim();
            if line.is_empty() {
                continue;
            }

            let response = self.play_turn(line)?;
            let encoded = serde_json::to_string(&response).map_err(ControllerError::Encode)?;
            writeln!(output, "{encoded}")?;

            match self.mode {
                RunMode::Batch => {
                    output.flush()?;
                    return Ok(());
                }
                RunMode::LongRunning => {
                    writeln!(output, "{KEEP_RUNNING_CMD}")?;
                    output.flush()?;
                    self.phase = TurnPhase::AwaitingInput;
                }
            }
        }
        info!("input closed after {} turns", self.state.turn);
        Ok(())
    }
}
