//! The per-owner namespace tree.
//!
//! [`NamespaceTree`] owns a single Root folder and implements the path-based
//! operations on it. All operations are synchronous and mutate the tree in
//! place; the tree is meant to be owned by one session at a time.

use tracing::debug;

use crate::error::{TreeError, TreeResult};
use crate::naming::unique_name;
use crate::node::{Node, NodeKind};
use crate::path::{self, split_parent};
use crate::walk::walk;

/// A prefix-search match: the node and its full path from Root.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SearchHit<'a> {
    pub node: &'a Node,
    pub path: String,
}

/// A trie of folders and files rooted at a single Root folder.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NamespaceTree {
    root: Node,
}

impl NamespaceTree {
    /// Create a tree holding only an empty Root.
    pub fn new() -> Self {
        Self { root: Node::root() }
    }

    /// Wrap an existing root, e.g. one decoded from a stored document.
    ///
    /// The root must be a folder.
    pub fn from_root(root: Node) -> TreeResult<Self> {
        if root.is_file() {
            return Err(TreeError::InvalidOperation {
                path: root.name().to_string(),
                reason: "tree root must be a folder".into(),
            });
        }
        Ok(Self { root })
    }

    pub fn root(&self) -> &Node {
        &self.root
    }

    pub fn into_root(self) -> Node {
        self.root
    }

    /// Resolve a path to its node.
    ///
    /// The empty path and the bare Root name both resolve to Root.
    pub fn resolve(&self, path: &str) -> TreeResult<&Node> {
        path::resolve(&self.root, path).ok_or_else(|| TreeError::not_found(path))
    }

    pub fn resolve_mut(&mut self, path: &str) -> TreeResult<&mut Node> {
        path::resolve_mut(&mut self.root, path).ok_or_else(|| TreeError::not_found(path))
    }

    pub fn contains(&self, path: &str) -> bool {
        path::resolve(&self.root, path).is_some()
    }

    /// Insert `node` under the folder at `parent_path`.
    ///
    /// The node is renamed if its name is already taken by a sibling (see
    /// [`unique_name`]); the name it was stored under is returned.
    pub fn try_insert(&mut self, parent_path: &str, mut node: Node) -> TreeResult<String> {
        let parent = self.resolve_mut(parent_path)?;
        let folder = match parent {
            Node::Folder(folder) => folder,
            Node::File(_) => {
                return Err(TreeError::InvalidOperation {
                    path: parent_path.to_string(),
                    reason: "cannot insert under a file".into(),
                })
            }
        };

        let requested = node.name().to_string();
        let resolved = unique_name(&requested, node.kind(), folder.child_names());
        if resolved != requested {
            debug!(parent = parent_path, %requested, %resolved, "renamed on collision");
            node.set_name(resolved.clone());
        }
        folder.insert_unchecked(node);
        debug!(parent = parent_path, name = %resolved, "node inserted");
        Ok(resolved)
    }

    /// Insert `node` under `parent_path`; `false` if the parent is missing
    /// or is a file.
    pub fn insert(&mut self, parent_path: &str, node: Node) -> bool {
        self.try_insert(parent_path, node).is_ok()
    }

    /// Direct children of the folder at `path`, in insertion order.
    ///
    /// Empty when the path does not resolve, names a file, or names an
    /// empty folder.
    pub fn list_children(&self, path: &str) -> Vec<&Node> {
        match path::resolve(&self.root, path) {
            Some(Node::Folder(folder)) => folder.children().collect(),
            _ => Vec::new(),
        }
    }

    /// Detach and return the node at `path` together with its subtree.
    ///
    /// The Root itself cannot be removed: it has no parent to remove it from.
    pub fn remove(&mut self, path: &str) -> TreeResult<Node> {
        let (parent_path, leaf) = split_parent(path).ok_or_else(|| TreeError::not_found(path))?;
        let parent = path::resolve_mut(&mut self.root, &parent_path)
            .ok_or_else(|| TreeError::not_found(path))?;
        let removed = parent
            .as_folder_mut()
            .and_then(|folder| folder.remove_child(leaf))
            .ok_or_else(|| TreeError::not_found(path))?;
        debug!(
            path,
            kind = %removed.kind(),
            nodes = removed.node_count(),
            "node removed"
        );
        Ok(removed)
    }

    /// Remove the node at `path`; `false` if nothing was there.
    pub fn delete(&mut self, path: &str) -> bool {
        self.remove(path).is_ok()
    }

    /// Case-insensitive search for nodes whose own name starts with `prefix`.
    ///
    /// Results come in pre-order: a matching folder precedes its children.
    pub fn search_by_prefix(&self, prefix: &str) -> Vec<SearchHit<'_>> {
        let needle = prefix.to_lowercase();
        let mut hits = Vec::new();
        walk(&self.root, |path, node| {
            if node.name().to_lowercase().starts_with(&needle) {
                hits.push(SearchHit {
                    node,
                    path: path.to_string(),
                });
            }
        });
        hits
    }

    /// Full paths of every node in pre-order, Root first.
    pub fn paths(&self) -> Vec<String> {
        let mut out = Vec::new();
        walk(&self.root, |path, _node| out.push(path.to_string()));
        out
    }

    /// Number of nodes including Root.
    pub fn len(&self) -> usize {
        self.root.node_count()
    }

    /// `true` when Root has no children.
    pub fn is_empty(&self) -> bool {
        self.root.children().next().is_none()
    }

    /// Kind of the node at `path`, if any.
    pub fn kind_of(&self, path: &str) -> Option<NodeKind> {
        path::resolve(&self.root, path).map(Node::kind)
    }
}

impl Default for NamespaceTree {
    fn default() -> Self {
        Self::new()
    }
}
