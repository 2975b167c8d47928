//! Namespace tree for Folio.
//!
//! A per-owner trie of folders and files, addressed by slash-delimited paths
//! of node names. The tree is a strict ownership hierarchy: every folder owns
//! its children outright, there are no parent pointers, and traversal state
//! (the current path) is threaded through the walk instead of stored on nodes.
//!
//! # Key Types
//!
//! - [`Node`] -- Closed union of [`FileNode`] and [`FolderNode`]
//! - [`NamespaceTree`] -- Owns the Root and implements resolve/insert/delete/search
//! - [`SearchHit`] -- A prefix-search match with its full path
//!
//! # Invariants
//!
//! 1. Sibling names are unique; insertion renames on collision, never overwrites.
//! 2. A file never carries children; a folder's children are all valid nodes.
//! 3. Resolution is purely name-based and case-sensitive.

pub mod error;
pub mod naming;
pub mod node;
pub mod path;
pub mod tree;
pub mod walk;

pub use error::{TreeError, TreeResult};
pub use naming::unique_name;
pub use node::{FileNode, FolderNode, Node, NodeKind, ROOT_NAME};
pub use path::{join, resolve, resolve_mut, segments, split_parent};
pub use tree::{NamespaceTree, SearchHit};
pub use walk::walk;
