//! Per-node committed/uncommitted status.

use std::fmt;

use folio_tree::{resolve, walk, Node};

/// Whether a path exists in the baseline.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum NodeStatus {
    Committed,
    Uncommitted,
}

impl NodeStatus {
    pub fn is_committed(self) -> bool {
        self == Self::Committed
    }
}

impl fmt::Display for NodeStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Committed => write!(f, "committed"),
            Self::Uncommitted => write!(f, "uncommitted"),
        }
    }
}

/// Status of `path` against `baseline`.
///
/// Committed iff the path resolves in the baseline. With no baseline (nothing
/// saved yet) every path is uncommitted. Content is not compared.
pub fn node_status(path: &str, baseline: Option<&Node>) -> NodeStatus {
    match baseline.and_then(|root| resolve(root, path)) {
        Some(_) => NodeStatus::Committed,
        None => NodeStatus::Uncommitted,
    }
}

/// A live node's path together with its status.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StatusEntry {
    pub path: String,
    pub status: NodeStatus,
}

/// Status of every node of `live`, in pre-order.
pub fn annotate(live: &Node, baseline: Option<&Node>) -> Vec<StatusEntry> {
    let mut entries = Vec::new();
    walk(live, |path, _node| {
        entries.push(StatusEntry {
            path: path.to_string(),
            status: node_status(path, baseline),
        });
    });
    entries
}
