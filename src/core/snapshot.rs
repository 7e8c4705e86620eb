//! Snapshot store: session state persisted as digest-checked JSON
//!
//! Files are `<dir>/<session_id>_t<turn>.json`. Each holds a
//! [`SnapshotEnvelope`]: the profile, the between-turn snapshot and a SHA-256
//! digest over both, so a single file is enough to resume a call.

use sha2::{Digest, Sha256};
use std::path::Path;
use tracing::{debug, warn};

use crate::types::{ProspectProfile, SessionSnapshot, SnapshotEnvelope, SnapshotReason};

/// Hex digest over the compact JSON of `(profile, snapshot)`
pub fn snapshot_digest(
    profile: &ProspectProfile,
    snapshot: &SessionSnapshot,
) -> Result<String, SnapshotReason> {
    let bytes = serde_json::to_vec(&(profile, snapshot))
        .map_err(|_| SnapshotReason::R303_SNAPSHOT_SERIALIZE_ERROR)?;
    Ok(sha256(&bytes).iter().map(|b| format!("{:02x}", b)).collect())
}

/// Wrap a snapshot in a digest-stamped envelope
pub fn seal_snapshot(
    profile: &ProspectProfile,
    snapshot: &SessionSnapshot,
) -> Result<SnapshotEnvelope, SnapshotReason> {
    Ok(SnapshotEnvelope {
        saved_at_unix: chrono::Utc::now().timestamp(),
        digest: snapshot_digest(profile, snapshot)?,
        profile: profile.clone(),
        snapshot: snapshot.clone(),
    })
}

/// Save snapshot to JSON file, returning its path
pub fn save_snapshot(
    profile: &ProspectProfile,
    snapshot: &SessionSnapshot,
    dir: &str,
) -> Result<String, SnapshotReason> {
    let filename = format!("{}/{}_t{}.json", dir, snapshot.session_id, snapshot.turn_index);
    let envelope = seal_snapshot(profile, snapshot)?;

    let json = serde_json::to_string_pretty(&envelope)
        .map_err(|_| SnapshotReason::R303_SNAPSHOT_SERIALIZE_ERROR)?;

    std::fs::create_dir_all(dir)
        .map_err(|_| SnapshotReason::R304_SNAPSHOT_STORAGE_ERROR)?;

    std::fs::write(&filename, json)
        .map_err(|_| SnapshotReason::R304_SNAPSHOT_STORAGE_ERROR)?;

    debug!(path = %filename, "{}", SnapshotReason::R300_SNAPSHOT_STORED);
    Ok(filename)
}

/// Load snapshot envelope from JSON file (no validation)
pub fn load_snapshot(path: impl AsRef<Path>) -> Result<SnapshotEnvelope, SnapshotReason> {
    let json = std::fs::read_to_string(path)
        .map_err(|_| SnapshotReason::R304_SNAPSHOT_STORAGE_ERROR)?;

    serde_json::from_str(&json)
        .map_err(|_| SnapshotReason::R303_SNAPSHOT_SERIALIZE_ERROR)
}

/// Load and validate: digest must match and the emotion vector must sum to 100
pub fn load_and_validate_snapshot(path: impl AsRef<Path>) -> Result<SnapshotEnvelope, SnapshotReason> {
    let path = path.as_ref();
    let envelope = load_snapshot(path)?;
    if let Err(reason) = validate_envelope(&envelope) {
        warn!(path = %path.display(), %reason, "snapshot rejected");
        return Err(reason);
    }
    Ok(envelope)
}

/// Integrity and consistency checks on an envelope
pub fn validate_envelope(envelope: &SnapshotEnvelope) -> Result<(), SnapshotReason> {
    if snapshot_digest(&envelope.profile, &envelope.snapshot)? != envelope.digest {
        return Err(SnapshotReason::R305_SNAPSHOT_DIGEST_MISMATCH);
    }
    if !envelope.snapshot.emotions.is_normalized() {
        return Err(SnapshotReason::R302_SNAPSHOT_VECTOR_INVALID);
    }
    if envelope.snapshot.raised_count > envelope.profile.objection_count() {
        return Err(SnapshotReason::R301_SNAPSHOT_MISMATCH);
    }
    Ok(())
}

/// SHA-256 helper
fn sha256(data: &[u8]) -> [u8; 32] {
    let mut hasher = Sha256::new();
    hasher.update(data);
    let result = hasher.finalize();
    let mut hash = [0u8; 32];
    hash.copy_from_slice(&result);
    hash
}

// =============================================================================
// TESTS
// =============================================================================
