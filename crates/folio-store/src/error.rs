//! Error types for version store operations.

use folio_types::{OwnerId, VersionId};
use thiserror::Error;

/// Errors that can occur during version store operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The owner has no log, or the log has no record with this id.
    #[error("version {version} not found for owner {owner}")]
    VersionNotFound { owner: OwnerId, version: VersionId },

    /// The document stored for `expected` names a different owner, e.g. two
    /// ids that collide on a case-insensitive filesystem.
    #[error("version document for {expected} belongs to {found}")]
    OwnerMismatch { expected: OwnerId, found: OwnerId },

    /// The tree handed to a snapshot cannot be stored as a root.
    #[error("invalid snapshot: {reason}")]
    InvalidSnapshot { reason: String },

    /// A stored tree failed to decode (corrupt persisted data).
    #[error("codec error: {0}")]
    Codec(#[from] folio_codec::CodecError),

    /// A stored document is not valid JSON or has the wrong shape.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// I/O error during file-based store operations.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// A lock guarding store state was poisoned by a panicking writer.
    #[error("lock poisoned: {0}")]
    LockPoisoned(String),
}

/// Convenience type alias for store operations.
pub type Result<T> = std::result::Result<T, StoreError>;
