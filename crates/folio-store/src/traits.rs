//! The [`VersionStore`] trait.

use folio_tree::Node;
use folio_types::{OwnerId, VersionId};

use crate::error::Result;
use crate::record::VersionRecord;

/// Persistence for per-owner version logs.
///
/// Each call is atomic from the caller's point of view: a concurrent reader
/// sees the log either before or after a save or restore, never in between.
/// Owners are fully isolated; an owner with no saved state reads as empty.
pub trait VersionStore: Send + Sync {
    /// The owner's current record, or `None` if nothing was ever saved.
    fn load_current(&self, owner: &OwnerId) -> Result<Option<VersionRecord>>;

    /// Deep-copy `tree` into a new record, append it, and make it current.
    ///
    /// `tree` must be a folder (the root of a namespace). The returned record
    /// is durably visible to later calls before this returns.
    fn save_snapshot(
        &self,
        owner: &OwnerId,
        tree: &Node,
        message: Option<&str>,
    ) -> Result<VersionRecord>;

    /// All records, newest first. Empty for an unknown owner.
    fn list_versions(&self, owner: &OwnerId) -> Result<Vec<VersionRecord>>;

    /// Make the record with `version` current again.
    ///
    /// History is not modified. Fails with
    /// [`StoreError::VersionNotFound`](crate::StoreError::VersionNotFound)
    /// when the owner or the id is unknown.
    fn restore_version(&self, owner: &OwnerId, version: &VersionId) -> Result<VersionRecord>;

    /// Look up a single record without changing `current`.
    fn get_version(&self, owner: &OwnerId, version: &VersionId) -> Result<Option<VersionRecord>> {
        Ok(self
            .list_versions(owner)?
            .into_iter()
            .find(|r| &r.id == version))
    }

    /// Number of records in the owner's log.
    fn version_count(&self, owner: &OwnerId) -> Result<usize> {
        Ok(self.list_versions(owner)?.len())
    }
}

/// Reject trees that cannot serve as a namespace root.
pub(crate) fn check_snapshot(tree: &Node) -> Result<()> {
    if tree.is_folder() {
        Ok(())
    } else {
        Err(crate::StoreError::InvalidSnapshot {
            reason: format!("snapshot root {:?} is a file", tree.name()),
        })
    }
}
