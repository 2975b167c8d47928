use std::fmt;

use folio_types::BlobRef;
use indexmap::IndexMap;

use crate::error::{TreeError, TreeResult};
use crate::path::SEPARATOR;

/// Name of the single top-level folder every owner's tree starts from.
pub const ROOT_NAME: &str = "root";

/// The two kinds of node in a namespace tree.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum NodeKind {
    File,
    Folder,
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::File => write!(f, "file"),
            Self::Folder => write!(f, "folder"),
        }
    }
}

/// A leaf node pointing at an externally stored blob.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FileNode {
    name: String,
    blob_ref: BlobRef,
}

impl FileNode {
    pub fn new(name: impl Into<String>, blob_ref: BlobRef) -> TreeResult<Self> {
        let name = name.into();
        validate_name(&name)?;
        Ok(Self { name, blob_ref })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn blob_ref(&self) -> &BlobRef {
        &self.blob_ref
    }
}

/// A folder owning an insertion-ordered mapping of uniquely named children.
///
/// The mapping key always equals the child's own name. Children can only be
/// added through [`FolderNode::add_child`] (which rejects duplicates) or
/// through the tree's collision-safe insertion.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FolderNode {
    name: String,
    children: IndexMap<String, Node>,
}

impl FolderNode {
    pub fn new(name: impl Into<String>) -> TreeResult<Self> {
        let name = name.into();
        validate_name(&name)?;
        Ok(Self {
            name,
            children: IndexMap::new(),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Direct children in insertion order.
    pub fn children(&self) -> impl Iterator<Item = &Node> + '_ {
        self.children.values()
    }

    /// Names of the direct children in insertion order.
    pub fn child_names(&self) -> impl Iterator<Item = &str> + '_ {
        self.children.keys().map(String::as_str)
    }

    pub fn child(&self, name: &str) -> Option<&Node> {
        self.children.get(name)
    }

    pub fn child_mut(&mut self, name: &str) -> Option<&mut Node> {
        self.children.get_mut(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.children.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.children.len()
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    /// Append a child under its current name.
    ///
    /// Fails with [`TreeError::InvalidOperation`] if a sibling already has
    /// that name. Use [`crate::NamespaceTree::try_insert`] for
    /// collision-safe renaming instead.
    pub fn add_child(&mut self, child: Node) -> TreeResult<()> {
        if self.children.contains_key(child.name()) {
            return Err(TreeError::InvalidOperation {
                path: self.name.clone(),
                reason: format!("a child named {:?} already exists", child.name()),
            });
        }
        self.children.insert(child.name().to_string(), child);
        Ok(())
    }

    /// Insert under a name the caller has already made unique.
    pub(crate) fn insert_unchecked(&mut self, child: Node) {
        debug_assert!(!self.children.contains_key(child.name()));
        self.children.insert(child.name().to_string(), child);
    }

    /// Remove a child, keeping the remaining siblings in order.
    pub(crate) fn remove_child(&mut self, name: &str) -> Option<Node> {
        self.children.shift_remove(name)
    }
}

/// A file or folder entity in the namespace tree.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Node {
    File(FileNode),
    Folder(FolderNode),
}

impl Node {
    /// Create a file node.
    pub fn file(name: impl Into<String>, blob_ref: BlobRef) -> TreeResult<Self> {
        FileNode::new(name, blob_ref).map(Self::File)
    }

    /// Create an empty folder node.
    pub fn folder(name: impl Into<String>) -> TreeResult<Self> {
        FolderNode::new(name).map(Self::Folder)
    }

    /// Create an empty Root folder.
    pub fn root() -> Self {
        Self::Folder(FolderNode {
            name: ROOT_NAME.to_string(),
            children: IndexMap::new(),
        })
    }

    pub fn name(&self) -> &str {
        match self {
            Self::File(f) => &f.name,
            Self::Folder(f) => &f.name,
        }
    }

    pub fn kind(&self) -> NodeKind {
        match self {
            Self::File(_) => NodeKind::File,
            Self::Folder(_) => NodeKind::Folder,
        }
    }

    pub fn is_file(&self) -> bool {
        matches!(self, Self::File(_))
    }

    pub fn is_folder(&self) -> bool {
        matches!(self, Self::Folder(_))
    }

    /// The blob reference, present only on files.
    pub fn blob_ref(&self) -> Option<&BlobRef> {
        match self {
            Self::File(f) => Some(&f.blob_ref),
            Self::Folder(_) => None,
        }
    }

    pub fn as_file(&self) -> Option<&FileNode> {
        match self {
            Self::File(f) => Some(f),
            Self::Folder(_) => None,
        }
    }

    pub fn as_folder(&self) -> Option<&FolderNode> {
        match self {
            Self::Folder(f) => Some(f),
            Self::File(_) => None,
        }
    }

    pub fn as_folder_mut(&mut self) -> Option<&mut FolderNode> {
        match self {
            Self::Folder(f) => Some(f),
            Self::File(_) => None,
        }
    }

    /// Direct children in insertion order; always empty for files.
    pub fn children(&self) -> impl Iterator<Item = &Node> + '_ {
        self.as_folder().into_iter().flat_map(|f| f.children.values())
    }

    /// Every blob reference in this subtree, in pre-order.
    ///
    /// Callers use this after removing a subtree to tell the blob
    /// collaborator which physical blobs are no longer referenced.
    pub fn blob_refs(&self) -> Vec<&BlobRef> {
        let mut refs = Vec::new();
        collect_blob_refs(self, &mut refs);
        refs
    }

    /// Number of nodes in this subtree, including `self`.
    pub fn node_count(&self) -> usize {
        1 + self.children().map(Node::node_count).sum::<usize>()
    }

    pub(crate) fn set_name(&mut self, name: String) {
        match self {
            Self::File(f) => f.name = name,
            Self::Folder(f) => f.name = name,
        }
    }
}

fn collect_blob_refs<'a>(node: &'a Node, out: &mut Vec<&'a BlobRef>) {
    match node {
        Node::File(f) => out.push(&f.blob_ref),
        Node::Folder(f) => {
            for child in f.children.values() {
                collect_blob_refs(child, out);
            }
        }
    }
}

/// Names must be non-empty and must not contain the path separator.
pub(crate) fn validate_name(name: &str) -> TreeResult<()> {
    if name.is_empty() {
        return Err(TreeError::InvalidName {
            name: name.to_string(),
            reason: "name is empty".into(),
        });
    }
    if name.contains(SEPARATOR) {
        return Err(TreeError::InvalidName {
            name: name.to_string(),
            reason: format!("name contains {SEPARATOR:?}"),
        });
    }
    Ok(())
}
