//! Engine error taxonomy
//!
//! Unrecognized triggers and degenerate emotion vectors are recovered inside
//! the engine and only logged; they never appear here.

use thiserror::Error;

use crate::types::SnapshotReason;

/// Errors surfaced to engine callers
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    /// Invalid difficulty rating, malformed DISC split, bad persona parameters.
    /// No partial profile is ever created.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// Gate counter violation or mutation of a terminal session.
    /// The session stays in its last valid state.
    #[error("invalid state transition in session {session_id} at turn {turn_index}: {reason}")]
    InvalidStateTransition {
        session_id: String,
        turn_index: u32,
        reason: String,
    },

    /// Snapshot could not be stored, read or validated
    #[error("snapshot error: {0}")]
    Snapshot(SnapshotReason),
}

impl EngineError {
    pub fn configuration(msg: impl Into<String>) -> Self {
        EngineError::Configuration(msg.into())
    }

    pub fn invalid_transition(
        session_id: impl Into<String>,
        turn_index: u32,
        reason: impl Into<String>,
    ) -> Self {
        EngineError::InvalidStateTransition {
            session_id: session_id.into(),
            turn_index,
            reason: reason.into(),
        }
    }
}

impl From<SnapshotReason> for EngineError {
    fn from(reason: SnapshotReason) -> Self {
        EngineError::Snapshot(reason)
    }
}

/// Objection gate counter violations.
///
/// The gate has no session context; `CallSession` wraps these into
/// [`EngineError::InvalidStateTransition`].
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateError {
    #[error("all {total} objections already raised")]
    AllObjectionsRaised { total: u8 },

    #[error("cannot resolve: {resolved} resolved of {raised} raised")]
    NothingToResolve { raised: u8, resolved: u8 },

    #[error("objection counters out of range: raised={raised} resolved={resolved} total={total}")]
    CountersOutOfRange { raised: u8, resolved: u8, total: u8 },
}
