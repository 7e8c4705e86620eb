//! Persisted session state
//!
//! A snapshot is everything needed to resume a session between turns (or
//! after a restart) given the same profile. It is also what an external
//! renderer reads to color the prospect's output.

use serde::{Deserialize, Serialize};
use crate::types::{EmotionVector, GateState, ProspectProfile, SessionPhase, TerminalReason};

/// Between-turn session state
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    pub session_id: String,
    /// Seven buckets, summing to 100
    pub emotions: EmotionVector,
    pub gate_state: GateState,
    pub raised_count: u8,
    pub resolved_count: u8,
    pub early_close_attempts: u32,
    /// Early-close penalties waiting for the next emotion update
    pub pending_penalties: u32,
    pub consecutive_poor_turns: u32,
    pub turn_index: u32,
    /// Seconds of representative talk time left
    pub patience_remaining: u32,
    pub phase: SessionPhase,
    pub terminal_reason: TerminalReason,
}

/// On-disk wrapper: profile + snapshot plus integrity digest.
///
/// The profile travels with the snapshot so a file alone is enough to resume.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SnapshotEnvelope {
    /// When this file was written (Unix timestamp)
    pub saved_at_unix: i64,
    /// Hex SHA-256 of the compact JSON of `(profile, snapshot)`
    pub digest: String,
    pub profile: ProspectProfile,
    pub snapshot: SessionSnapshot,
}

/// Reason codes for snapshot storage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[allow(non_camel_case_types)]
pub enum SnapshotReason {
    /// Snapshot successfully stored
    R300_SNAPSHOT_STORED,
    /// Snapshot does not belong to this profile/session
    R301_SNAPSHOT_MISMATCH,
    /// Emotion vector does not sum to 100
    R302_SNAPSHOT_VECTOR_INVALID,
    /// Serialization error
    R303_SNAPSHOT_SERIALIZE_ERROR,
    /// Storage error
    R304_SNAPSHOT_STORAGE_ERROR,
    /// Digest mismatch (corrupt or tampered)
    R305_SNAPSHOT_DIGEST_MISMATCH,
}

impl SnapshotReason {
    /// Get code string
    pub fn code(&self) -> &'static str {
        match self {
            Self::R300_SNAPSHOT_STORED => "R300_SNAPSHOT_STORED",
            Self::R301_SNAPSHOT_MISMATCH => "R301_SNAPSHOT_MISMATCH",
            Self::R302_SNAPSHOT_VECTOR_INVALID => "R302_SNAPSHOT_VECTOR_INVALID",
            Self::R303_SNAPSHOT_SERIALIZE_ERROR => "R303_SNAPSHOT_SERIALIZE_ERROR",
            Self::R304_SNAPSHOT_STORAGE_ERROR => "R304_SNAPSHOT_STORAGE_ERROR",
            Self::R305_SNAPSHOT_DIGEST_MISMATCH => "R305_SNAPSHOT_DIGEST_MISMATCH",
        }
    }

    /// Get description
    pub fn description(&self) -> &'static str {
        match self {
            Self::R300_SNAPSHOT_STORED => "Snapshot successfully stored",
            Self::R301_SNAPSHOT_MISMATCH => "Snapshot does not match the profile",
            Self::R302_SNAPSHOT_VECTOR_INVALID => "Emotion vector is not normalized",
            Self::R303_SNAPSHOT_SERIALIZE_ERROR => "Failed to serialize snapshot",
            Self::R304_SNAPSHOT_STORAGE_ERROR => "Failed to store snapshot",
            Self::R305_SNAPSHOT_DIGEST_MISMATCH => "Digest mismatch (corrupt or tampered)",
        }
    }
}

impl std::fmt::Display for SnapshotReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.code(), self.description())
    }
}
