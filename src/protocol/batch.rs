//! Stateless reader: rebuild the whole match from the transcript.

use std::collections::HashSet;

use log::debug;

use super::{MoveSink, ProtocolError, ProtocolReader, TurnRequest};
use crate::board::{CellState, Point};
use crate::constants::FIRST_MOVE_SENTINEL;
use crate::history::MoveHistory;

/// Replays the full transcript on every call, discarding earlier state.
#[derive(Debug, Default, Clone)]
pub struct BatchReplay;

impl BatchReplay {
    pub fn new() -> Self {
        Self
    }
}

impl ProtocolReader for BatchReplay {
    fn read_turn(
        &mut self,
        input: &str,
        history: &mut MoveHistory,
        sink: &mut dyn MoveSink,
    ) -> Result<(), ProtocolError> {
        let transcript: TurnRequest = serde_json::from_str(input)?;
        replay(&transcript, history, sink)
    }
}

/// Check that a transcript can come from an alternating match on this board.
fn validate(transcript: &TurnRequest) -> Result<(), ProtocolError> {
    let requests = transcript.requests.len();
    let responses = transcript.responses.len();
    if requests == 0 || responses + 1 != requests {
        return Err(ProtocolError::Transcript {
            requests,
            responses,
        });
    }

    let mut occupied = HashSet::with_capacity(requests + responses);
    for (i, &p) in transcript.requests.iter().enumerate() {
        if p == FIRST_MOVE_SENTINEL {
            if i == 0 {
                continue;
            }
            return Err(ProtocolError::MisplacedSentinel(i));
        }
        check_vacant(p, &mut occupied)?;
    }
    for &p in &transcript.responses {
        check_vacant(p, &mut occupied)?;
    }
    Ok(())
}

fn check_vacant(p: Point, occupied: &mut HashSet<Point>) -> Result<(), ProtocolError> {
    if !p.is_on_board() {
        return Err(ProtocolError::OutOfRange(p));
    }
    if !occupied.insert(p) {
        return Err(ProtocolError::Occupied(p));
    }
    Ok(())
}

/// Validate `transcript`, then rebuild `history` and `sink` from it in the
/// order the moves were played.
///
/// A leading sentinel starts the match with this agent to move; it is not a
/// stone and is never applied.
pub(crate) fn replay(
    transcript: &TurnRequest,
    history: &mut MoveHistory,
    sink: &mut dyn MoveSink,
) -> Result<(), ProtocolError> {
    validate(transcript)?;

    sink.reset();
    history.reset();
    history.observe_first_enemy(transcript.requests[0]);

    for (i, &enemy) in transcript.requests.iter().enumerate() {
        if enemy != FIRST_MOVE_SENTINEL {
            apply(enemy, CellState::Enemy, history, sink);
        }
        if let Some(&mine) = transcript.responses.get(i) {
            apply(mine, CellState::Mine, history, sink);
        }
    }
    Ok(())
}

pub(crate) fn apply(
    p: Point,
    color: CellState,
    history: &mut MoveHistory,
    sink: &mut dyn MoveSink,
) {
    debug!("apply {color:?} at {p}");
    history.push(color, p);
    sink.apply_move(p, color);
}
