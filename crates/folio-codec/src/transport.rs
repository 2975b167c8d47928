//! Serializable transport form of a tree node.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Kind discriminator in the transport form.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransportKind {
    File,
    Folder,
}

/// A node as it crosses a process or storage boundary.
///
/// Unlike [`folio_tree::Node`] this type does not enforce the tree's
/// invariants; [`crate::decode`] checks them on the way back in.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransportNode {
    pub name: String,
    pub kind: TransportKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub blob_ref: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub children: Option<IndexMap<String, TransportNode>>,
}

impl TransportNode {
    pub fn file(name: impl Into<String>, blob_ref: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: TransportKind::File,
            blob_ref: Some(blob_ref.into()),
            children: None,
        }
    }

    pub fn folder(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: TransportKind::Folder,
            blob_ref: None,
            children: Some(IndexMap::new()),
        }
    }

    /// Append a child keyed by its own name (builder style, for tests and
    /// hand-built documents).
    pub fn with_child(mut self, child: TransportNode) -> Self {
        self.children
            .get_or_insert_with(IndexMap::new)
            .insert(child.name.clone(), child);
        self
    }
}
