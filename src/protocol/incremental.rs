//! Long-running reader: apply only the newest opponent move.

use log::warn;

use super::batch::{apply, replay};
use super::{IncomingMessage, MoveSink, ProtocolError, ProtocolReader};
use crate::board::{CellState, Point};
use crate::constants::FIRST_MOVE_SENTINEL;
use crate::history::MoveHistory;

/// Applies one move per call on top of state kept from earlier calls.
///
/// The host's first message carries the transcript shape; it is replayed
/// like a batch request. Every later message is a bare move.
#[derive(Debug, Default, Clone)]
pub struct Incremental {
    calls: usize,
}

impl Incremental {
    pub fn new() -> Self {
        Self::default()
    }

    fn apply_single(
        &self,
        p: Point,
        history: &mut MoveHistory,
        sink: &mut dyn MoveSink,
    ) -> Result<(), ProtocolError> {
        if p == FIRST_MOVE_SENTINEL {
            if history.has_seen_enemy() {
                return Err(ProtocolError::MisplacedSentinel(history.enemy_moves().len()));
            }
            history.observe_first_enemy(p);
            return Ok(());
        }
        if !p.is_on_board() {
            return Err(ProtocolError::OutOfRange(p));
        }
        if history.self_moves().contains(&p) || history.enemy_moves().contains(&p) {
            return Err(ProtocolError::Occupied(p));
        }

        history.observe_first_enemy(p);
        apply(p, CellState::Enemy, history, sink);
        Ok(())
    }
}

impl ProtocolReader for Incremental {
    fn read_turn(
        &mut self,
        input: &str,
        history: &mut MoveHistory,
        sink: &mut dyn MoveSink,
    ) -> Result<(), ProtocolError> {
        let message: IncomingMessage = serde_json::from_str(input)?;
        match message {
            IncomingMessage::Transcript(transcript) => {
                if self.calls > 0 {
                    warn!("full transcript on call {}, replaying from scratch", self.calls + 1);
                }
                replay(&transcript, history, sink)?;
            }
            IncomingMessage::Move(p) => self.apply_single(p, history, sink)?,
        }
        self.calls += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::history::HandOrder;
    use crate::protocol::tests::RecordingSink;

    #[test]
    fn test_first_transcript_then_bare_moves() {
        let mut reader = Incremental::new();
        let mut history = MoveHistory::new();
        let mut sink = RecordingSink::default();

        reader
            .read_turn(r#"{"requests":[{"x":2,"y":2}],"responses":[]}"#, &mut history, &mut sink)
            .unwrap();
        assert_eq!(history.hand_order(), Some(HandOrder::LateHand));

        // Our reply is committed by the controller, not the reader
        history.push(CellState::Mine, Point::new(0, 0));
        sink.apply_move(Point::new(0, 0), CellState::Mine);

        reader
            .read_turn(r#"{"x":6,"y":6}"#, &mut history, &mut sink)
            .unwrap();
        assert_eq!(history.enemy_moves(), &[Point::new(2, 2), Point::new(6, 6)]);
        assert_eq!(history.self_moves(), &[Point::new(0, 0)]);
        assert_eq!(sink.moves.len(), 3);
        assert_eq!(sink.resets, 1);
    }

    #[test]
    fn test_bare_sentinel_on_first_call() {
        let mut reader = Incremental::new();
        let mut history = MoveHistory::new();
        let mut sink = RecordingSink::default();
        reader
            .read_turn(r#"{"x":-1,"y":-1}"#, &mut history, &mut sink)
            .unwrap();
        assert!(history.is_empty());
        assert_eq!(history.hand_order(), Some(HandOrder::EarlyHand));
        assert!(sink.moves.is_empty());
    }

    #[test]
    fn test_late_sentinel_is_rejected() {
        let mut reader = Incremental::new();
        let mut history = MoveHistory::new();
        let mut sink = RecordingSink::default();
        reader
            .read_turn(r#"{"x":3,"y":3}"#, &mut history, &mut sink)
            .unwrap();
        let err = reader
            .read_turn(r#"{"x":-1,"y":-1}"#, &mut history, &mut sink)
            .unwrap_err();
        assert!(matches!(err, ProtocolError::MisplacedSentinel(1)));
        assert_eq!(sink.moves.len(), 1);
    }

    #[test]
    fn test_rejects_without_touching_state() {
        let mut reader = Incremental::new();
        let mut history = MoveHistory::new();
        let mut sink = RecordingSink::default();
        reader
            .read_turn(r#"{"x":3,"y":3}"#, &mut history, &mut sink)
            .unwrap();
        let before = history.clone();

        for input in [r#"{"x":3,"y":3}"#, r#"{"x":3,"y":99}"#, r#"{"x":"a"}"#, "not json"] {
            assert!(reader.read_turn(input, &mut history, &mut sink).is_err());
        }
        assert_eq!(history, before);
        assert_eq!(sink.moves.len(), 1);
    }
}
