//! C ABI for embedding the rule and protocol core.
//!
//! A host creates a session, then feeds judge messages through
//! [`nogo_receive_all`] (full transcript) or [`nogo_receive_once`] (one
//! long-running message). Every stone the message implies is reported through
//! the callback; the host owns its own board.
//!
//! The exported colour convention is `Enemy = -1, Empty = 0, Self = 1`.
//! Internally colours are sign-free [`CellState`] values, translated here.
//!
//! ```c
//! typedef struct { int x; int y; } NogoPoint;
//! typedef void (*NogoBoardCallback)(NogoPoint p, int color);
//!
//! NogoSession *nogo_session_new(void);
//! void nogo_session_free(NogoSession *session);
//! int nogo_receive_all(NogoSession *session, const char *json, NogoBoardCallback cb);
//! int nogo_receive_once(NogoSession *session, const char *json, NogoBoardCallback cb);
//! int nogo_hand_order(const NogoSession *session);
//! ```

use std::ffi::{CStr, c_char, c_int};

use log::error;

use crate::board::{CellState, Point};
use crate::history::{HandOrder, MoveHistory};
use crate::protocol::{BatchReplay, ExitCode, Incremental, MoveSink, ProtocolReader};

#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct NogoPoint {
    pub x: c_int,
    pub y: c_int,
}

impl From<Point> for NogoPoint {
    fn from(p: Point) -> Self {
        Self { x: p.x, y: p.y }
    }
}

/// Cell colour as seen across the C boundary.
#[repr(i32)]
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum NogoBoardState {
    Enemy = -1,
    Empty = 0,
    SelfSide = 1,
}

impl From<CellState> for NogoBoardState {
    fn from(c: CellState) -> Self {
        match c {
            CellState::Enemy => NogoBoardState::Enemy,
            CellState::Empty => NogoBoardState::Empty,
            CellState::Mine => NogoBoardState::SelfSide,
        }
    }
}

impl From<NogoBoardState> for CellState {
    fn from(c: NogoBoardState) -> Self {
        match c {
            NogoBoardState::Enemy => CellState::Enemy,
            NogoBoardState::Empty => CellState::Empty,
            NogoBoardState::SelfSide => CellState::Mine,
        }
    }
}

pub type NogoBoardCallback = Option<extern "C" fn(NogoPoint, NogoBoardState)>;

/// Opaque per-match state handed to C callers.
#[derive(Default)]
pub struct NogoSession {
    history: MoveHistory,
    batch: BatchReplay,
    incremental: Incremental,
    turn: usize,
}

struct CallbackSink(extern "C" fn(NogoPoint, NogoBoardState));

impl MoveSink for CallbackSink {
    fn apply_move(&mut self, point: Point, color: CellState) {
        (self.0)(point.into(), color.into());
    }
}

#[derive(Copy, Clone)]
enum Strategy {
    Batch,
    Incremental,
}

/// Shared body of the two receive entry points.
///
/// # Safety
/// `session` must come from [`nogo_session_new`] and `json` must be null or a
/// valid NUL-terminated string.
unsafe fn receive(
    session: *mut NogoSession,
    json: *const c_char,
    cb: NogoBoardCallback,
    strategy: Strategy,
) -> c_int {
    // SAFETY: the caller guarantees `session` is null or a live session.
    let Some(session) = (unsafe { session.as_mut() }) else {
        return ExitCode::InvalidBoard.as_i32();
    };
    let Some(cb) = cb else {
        return ExitCode::InvalidBoard.as_i32();
    };
    if json.is_null() {
        return ExitCode::JsonParsingError.as_i32();
    }
    // SAFETY: non-null and NUL-terminated per the contract above.
    let Ok(input) = (unsafe { CStr::from_ptr(json) }).to_str() else {
        return ExitCode::JsonParsingError.as_i32();
    };

    let mut sink = CallbackSink(cb);
    let reader: &mut dyn ProtocolReader = match strategy {
        Strategy::Batch => &mut session.batch,
        Strategy::Incremental => &mut session.incremental,
    };
    match reader.read_turn(input, &mut session.history, &mut sink) {
        Ok(()) => {
            session.turn += 1;
            c_int::try_from(session.turn).unwrap_or(c_int::MAX)
        }
        Err(e) => {
            error!("{e}");
            e.exit_code().as_i32()
        }
    }
}

/// Allocate a session. Release it with [`nogo_session_free`].
#[unsafe(no_mangle)]
pub extern "C" fn nogo_session_new() -> *mut NogoSession {
    Box::into_raw(Box::default())
}

/// Release a session. Null is ignored.
///
/// # Safety
/// `session` must come from [`nogo_session_new`] and not be used afterwards.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn nogo_session_free(session: *mut NogoSession) {
    if !session.is_null() {
        // SAFETY: allocated by `nogo_session_new` and freed exactly once.
        drop(unsafe { Box::from_raw(session) });
    }
}

/// Replay a full transcript, calling `cb` once per placed stone in play
/// order. Returns the turn index, or a negative exit code.
///
/// # Safety
/// See [`receive`].
#[unsafe(no_mangle)]
pub unsafe extern "C" fn nogo_receive_all(
    session: *mut NogoSession,
    json: *const c_char,
    cb: NogoBoardCallback,
) -> c_int {
    unsafe { receive(session, json, cb, Strategy::Batch) }
}

/// Apply one long-running message, calling `cb` for the new stone. Returns
/// the turn index, or a negative exit code.
///
/// # Safety
/// See [`receive`].
#[unsafe(no_mangle)]
pub unsafe extern "C" fn nogo_receive_once(
    session: *mut NogoSession,
    json: *const c_char,
    cb: NogoBoardCallback,
) -> c_int {
    unsafe { receive(session, json, cb, Strategy::Incremental) }
}

/// `0` early hand, `1` late hand, `-1` not known yet (or null session).
///
/// # Safety
/// `session` must be null or come from [`nogo_session_new`].
#[unsafe(no_mangle)]
pub unsafe extern "C" fn nogo_hand_order(session: *const NogoSession) -> c_int {
    // SAFETY: the caller guarantees `session` is null or a live session.
    match unsafe { session.as_ref() }.and_then(|s| s.history.hand_order()) {
        Some(HandOrder::EarlyHand) => 0,
        Some(HandOrder::LateHand) => 1,
        None => -1,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::ffi::CString;

    thread_local! {
        static SEEN: RefCell<Vec<(NogoPoint, NogoBoardState)>> = const { RefCell::new(Vec::new()) };
    }

    extern "C" fn record(p: NogoPoint, color: NogoBoardState) {
        SEEN.with(|seen| seen.borrow_mut().push((p, color)));
    }

    fn take_seen() -> Vec<(NogoPoint, NogoBoardState)> {
        SEEN.with(|seen| std::mem::take(&mut *seen.borrow_mut()))
    }

    #[test]
    fn test_color_translation() {
        assert_eq!(NogoBoardState::from(CellState::Mine) as i32, 1);
        assert_eq!(NogoBoardState::from(CellState::Enemy) as i32, -1);
        assert_eq!(CellState::from(NogoBoardState::SelfSide), CellState::Mine);
    }

    #[test]
    fn test_receive_all_reports_every_stone() {
        take_seen();
        let session = nogo_session_new();
        let json = CString::new(
            r#"{"requests":[{"x":3,"y":3},{"x":5,"y":5}],"responses":[{"x":4,"y":4}]}"#,
        )
        .unwrap();
        let turn = unsafe { nogo_receive_all(session, json.as_ptr(), Some(record)) };
        assert_eq!(turn, 1);
        assert_eq!(
            take_seen(),
            vec![
                (NogoPoint { x: 3, y: 3 }, NogoBoardState::Enemy),
                (NogoPoint { x: 4, y: 4 }, NogoBoardState::SelfSide),
                (NogoPoint { x: 5, y: 5 }, NogoBoardState::Enemy),
            ]
        );
        assert_eq!(unsafe { nogo_hand_order(session) }, 1);
        unsafe { nogo_session_free(session) };
    }

    #[test]
    fn test_receive_once_and_errors() {
        take_seen();
        let session = nogo_session_new();
        assert_eq!(unsafe { nogo_hand_order(session) }, -1);

        let first = CString::new(r#"{"requests":[{"x":-1,"y":-1}],"responses":[]}"#).unwrap();
        assert_eq!(unsafe { nogo_receive_once(session, first.as_ptr(), Some(record)) }, 1);
        assert_eq!(unsafe { nogo_hand_order(session) }, 0);
        assert!(take_seen().is_empty());

        let next = CString::new(r#"{"x":2,"y":6}"#).unwrap();
        assert_eq!(unsafe { nogo_receive_once(session, next.as_ptr(), Some(record)) }, 2);
        assert_eq!(take_seen(), vec![(NogoPoint { x: 2, y: 6 }, NogoBoardState::Enemy)]);

        let bad = CString::new("{").unwrap();
        assert_eq!(
            unsafe { nogo_receive_once(session, bad.as_ptr(), Some(record)) },
            ExitCode::JsonParsingError.as_i32()
        );
        assert_eq!(
            unsafe { nogo_receive_once(session, next.as_ptr(), None) },
            ExitCode::InvalidBoard.as_i32()
        );
        assert_eq!(
            unsafe { nogo_receive_once(std::ptr::null_mut(), next.as_ptr(), Some(record)) },
            ExitCode::InvalidBoard.as_i32()
        );
        unsafe { nogo_session_free(session) };
    }
}
