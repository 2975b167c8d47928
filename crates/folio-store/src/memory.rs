//! In-memory version store for tests and embedding.
//!
//! [`InMemoryVersionStore`] keeps one [`VersionLog`] per owner in a `HashMap`
//! behind a `RwLock`. Trees are deep-copied on the way in and out, so callers
//! can keep mutating their live tree after a save.

use std::collections::HashMap;
use std::sync::RwLock;

use folio_tree::Node;
use folio_types::{OwnerId, VersionId};
use tracing::info;

use crate::error::{Result, StoreError};
use crate::record::{VersionLog, VersionRecord};
use crate::traits::{check_snapshot, VersionStore};

/// An in-memory implementation of [`VersionStore`].
///
/// Data is lost when the store is dropped.
#[derive(Debug, Default)]
pub struct InMemoryVersionStore {
    logs: RwLock<HashMap<OwnerId, VersionLog>>,
}

impl InMemoryVersionStore {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Owners that have saved at least one snapshot.
    pub fn owners(&self) -> Result<Vec<OwnerId>> {
        let logs = self
            .logs
            .read()
            .map_err(|e| StoreError::LockPoisoned(e.to_string()))?;
        let mut owners: Vec<OwnerId> = logs.keys().cloned().collect();
        owners.sort();
        Ok(owners)
    }
}

impl VersionStore for InMemoryVersionStore {
    fn load_current(&self, owner: &OwnerId) -> Result<Option<VersionRecord>> {
        let logs = self
            .logs
            .read()
            .map_err(|e| StoreError::LockPoisoned(e.to_string()))?;
        Ok(logs.get(owner).and_then(|log| log.current().cloned()))
    }

    fn save_snapshot(
        &self,
        owner: &OwnerId,
        tree: &Node,
        message: Option<&str>,
    ) -> Result<VersionRecord> {
        check_snapshot(tree)?;
        let record = VersionRecord::new(tree.clone(), message);

        let mut logs = self
            .logs
            .write()
            .map_err(|e| StoreError::LockPoisoned(e.to_string()))?;
        logs.entry(owner.clone()).or_default().append(record.clone());

        info!(%owner, version = %record.id, "snapshot saved");
        Ok(record)
    }

    fn list_versions(&self, owner: &OwnerId) -> Result<Vec<VersionRecord>> {
        let logs = self
            .logs
            .read()
            .map_err(|e| StoreError::LockPoisoned(e.to_string()))?;
        Ok(logs.get(owner).map(VersionLog::newest_first).unwrap_or_default())
    }

    fn restore_version(&self, owner: &OwnerId, version: &VersionId) -> Result<VersionRecord> {
        let mut logs = self
            .logs
            .write()
            .map_err(|e| StoreError::LockPoisoned(e.to_string()))?;
        let record = logs
            .get_mut(owner)
            .and_then(|log| log.restore(version))
            .ok_or_else(|| StoreError::VersionNotFound {
                owner: owner.clone(),
                version: *version,
            })?;

        info!(%owner, %version, "version restored");
        Ok(record)
    }

    fn get_version(&self, owner: &OwnerId, version: &VersionId) -> Result<Option<VersionRecord>> {
        let logs = self
            .logs
            .read()
            .map_err(|e| StoreError::LockPoisoned(e.to_string()))?;
        Ok(logs.get(owner).and_then(|log| log.get(version).cloned()))
    }

    fn version_count(&self, owner: &OwnerId) -> Result<usize> {
        let logs = self
            .logs
            .read()
            .map_err(|e| StoreError::LockPoisoned(e.to_string()))?;
        Ok(logs.get(owner).map_or(0, VersionLog::len))
    }
}
