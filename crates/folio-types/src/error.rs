use thiserror::Error;

/// Errors produced by type operations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypeError {
    #[error("invalid version id: {0}")]
    InvalidVersionId(String),

    #[error("owner id must not be empty")]
    EmptyOwnerId,

    #[error("blob reference must not be empty")]
    EmptyBlobRef,
}
