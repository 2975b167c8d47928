use std::sync::Arc;

use chrono::Local;
use folio_diff::{annotate, changes_summary, node_status, ChangesSummary, NodeStatus, StatusEntry};
use folio_store::{VersionRecord, VersionStore};
use folio_tree::{NamespaceTree, Node, SearchHit};
use folio_types::{BlobRef, OwnerId, VersionId};
use tracing::{debug, info};

use crate::error::SdkResult;

/// An owner's working session.
///
/// Holds the live tree being edited and a baseline: an independent copy of
/// the owner's current saved version (or none before the first commit).
/// Status and change queries compare the two.
pub struct Folio {
    owner: OwnerId,
    store: Arc<dyn VersionStore>,
    tree: NamespaceTree,
    baseline: Option<VersionRecord>,
}

impl Folio {
    /// Open a session, starting from the owner's current version.
    ///
    /// An owner with nothing saved starts with an empty root.
    pub fn open(store: Arc<dyn VersionStore>, owner: OwnerId) -> SdkResult<Self> {
        let baseline = store.load_current(&owner)?;
        let tree = tree_from(baseline.as_ref())?;
        debug!(%owner, has_baseline = baseline.is_some(), "session opened");
        Ok(Self {
            owner,
            store,
            tree,
            baseline,
        })
    }

    /// Open a session whose live tree is `tree` instead of the saved version.
    ///
    /// Used to resume uncommitted work kept outside the store.
    pub fn resume(
        store: Arc<dyn VersionStore>,
        owner: OwnerId,
        tree: NamespaceTree,
    ) -> SdkResult<Self> {
        let baseline = store.load_current(&owner)?;
        Ok(Self {
            owner,
            store,
            tree,
            baseline,
        })
    }

    pub fn owner(&self) -> &OwnerId {
        &self.owner
    }

    pub fn tree(&self) -> &NamespaceTree {
        &self.tree
    }

    pub fn baseline(&self) -> Option<&VersionRecord> {
        self.baseline.as_ref()
    }

    fn baseline_root(&self) -> Option<&Node> {
        self.baseline.as_ref().map(|r| &r.tree)
    }

    // ---- Tree operations ----

    /// Create a folder under `parent`; returns the name actually used.
    pub fn create_folder(&mut self, parent: &str, name: &str) -> SdkResult<String> {
        let node = Node::folder(name)?;
        Ok(self.tree.try_insert(parent, node)?)
    }

    /// Add a file under `parent`; returns the name actually used.
    pub fn add_file(&mut self, parent: &str, name: &str, blob: BlobRef) -> SdkResult<String> {
        let node = Node::file(name, blob)?;
        Ok(self.tree.try_insert(parent, node)?)
    }

    /// Remove the subtree at `path`.
    ///
    /// Returns the blob references that were under it so the caller can
    /// release the underlying content.
    pub fn remove(&mut self, path: &str) -> SdkResult<Vec<BlobRef>> {
        let removed = self.tree.remove(path)?;
        Ok(removed.blob_refs().into_iter().cloned().collect())
    }

    pub fn list(&self, path: &str) -> Vec<&Node> {
        self.tree.list_children(path)
    }

    pub fn search(&self, prefix: &str) -> Vec<SearchHit<'_>> {
        self.tree.search_by_prefix(prefix)
    }

    // ---- Status ----

    pub fn status(&self, path: &str) -> NodeStatus {
        node_status(path, self.baseline_root())
    }

    /// Status of every node in the live tree.
    pub fn annotate(&self) -> Vec<StatusEntry> {
        annotate(self.tree.root(), self.baseline_root())
    }

    pub fn changes(&self) -> ChangesSummary {
        changes_summary(self.tree.root(), self.baseline_root())
    }

    // ---- Versions ----

    /// Save the live tree as a new version and make it the baseline.
    ///
    /// A missing or blank message becomes `Snapshot at <local time>`.
    pub fn commit(&mut self, message: Option<&str>) -> SdkResult<VersionRecord> {
        let message = match message {
            Some(m) if !m.trim().is_empty() => m.to_string(),
            _ => default_message(),
        };
        let record = self
            .store
            .save_snapshot(&self.owner, self.tree.root(), Some(message.as_str()))?;
        info!(owner = %self.owner, version = %record.id, "committed");
        self.baseline = Some(record.clone());
        Ok(record)
    }

    /// All saved versions, newest first.
    pub fn history(&self) -> SdkResult<Vec<VersionRecord>> {
        Ok(self.store.list_versions(&self.owner)?)
    }

    /// Restore `version` and replace both live tree and baseline with it.
    ///
    /// Uncommitted edits in the live tree are discarded.
    pub fn checkout(&mut self, version: &VersionId) -> SdkResult<VersionRecord> {
        let record = self.store.restore_version(&self.owner, version)?;
        self.tree = NamespaceTree::from_root(record.tree.clone())?;
        self.baseline = Some(record.clone());
        info!(owner = %self.owner, %version, "checked out");
        Ok(record)
    }

    /// Re-read the current version from the store, discarding live edits.
    pub fn reload(&mut self) -> SdkResult<()> {
        let baseline = self.store.load_current(&self.owner)?;
        self.tree = tree_from(baseline.as_ref())?;
        self.baseline = baseline;
        Ok(())
    }

    pub fn into_tree(self) -> NamespaceTree {
        self.tree
    }
}

fn tree_from(record: Option<&VersionRecord>) -> SdkResult<NamespaceTree> {
    match record {
        Some(r) => Ok(NamespaceTree::from_root(r.tree.clone())?),
        None => Ok(NamespaceTree::new()),
    }
}

fn default_message() -> String {
    format!("Snapshot at {}", Local::now().format("%Y-%m-%d %H:%M:%S"))
}
