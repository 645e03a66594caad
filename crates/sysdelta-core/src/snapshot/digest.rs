//! Content digest for snapshots.
//!
//! SHA256 over the canonical JSON serialization. Modules are held in a
//! `BTreeMap`, so module order never affects the digest; issue, feature,
//! analyzer and threshold order does.

use crate::errors::Result;
use crate::snapshot::Snapshot;
use sha2::{Digest, Sha256};

/// Compute the content digest of a snapshot.
///
/// ## Returns
///
/// Hex-encoded SHA256 digest (64 characters)
///
/// ## Errors
///
/// Returns `DeltaError::Serialization` if JSON serialization fails.
pub fn compute_snapshot_digest(snapshot: &Snapshot) -> Result<String> {
    let canonical = serde_json::to_string(snapshot)?;
    Ok(hash_string(&canonical))
}

fn hash_string(input: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(input.as_bytes());
    hex::encode(hasher.finalize())
}
