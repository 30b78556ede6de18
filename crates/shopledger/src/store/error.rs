//! Store error types.

use thiserror::Error;

/// Errors surfaced by the external record store.
///
/// Failures are reported once to the caller; nothing in the core
/// retries automatically.
#[derive(Error, Debug)]
pub enum StoreError {
    /// The backend rejected or failed the request (network, outage,
    /// constraint violation — the collaborator's message is passed
    /// through).
    #[error("store request failed: {0}")]
    Backend(String),

    /// A stored blob could not be serialized for the wire.
    #[error("failed to encode record: {0}")]
    Encode(#[from] serde_json::Error),
}
