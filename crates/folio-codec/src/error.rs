//! Error types for the codec crate.

/// Errors that can occur while encoding or decoding a tree.
#[derive(Debug, thiserror::Error)]
pub enum CodecError {
    /// The input violates a structural invariant of the tree.
    #[error("malformed tree at {path}: {reason}")]
    MalformedTree { path: String, reason: String },

    /// The input is not valid JSON or does not match the transport shape.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

impl CodecError {
    pub(crate) fn malformed(path: &str, reason: impl Into<String>) -> Self {
        Self::MalformedTree {
            path: path.to_string(),
            reason: reason.into(),
        }
    }
}

/// Convenience alias for codec results.
pub type CodecResult<T> = Result<T, CodecError>;
