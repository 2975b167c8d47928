//! Error types for namespace tree operations.

use thiserror::Error;

/// Errors that can occur while resolving or mutating a namespace tree.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TreeError {
    /// The path does not resolve to a node.
    #[error("path not found: {path}")]
    NotFound { path: String },

    /// The operation violates the tree's contract (e.g. inserting under a file).
    #[error("invalid operation on {path}: {reason}")]
    InvalidOperation { path: String, reason: String },

    /// A node name is empty or contains the path separator.
    #[error("invalid node name {name:?}: {reason}")]
    InvalidName { name: String, reason: String },
}

impl TreeError {
    pub(crate) fn not_found(path: &str) -> Self {
        Self::NotFound {
            path: path.to_string(),
        }
    }
}

/// Convenience alias for tree results.
pub type TreeResult<T> = Result<T, TreeError>;
