//! On-disk JSON shape of an owner's version log.
//!
//! ```json
//! {
//!   "ownerId": "alice",
//!   "current": { "id": "...", "tree": { ... }, "timestamp": "...", "message": "v1" },
//!   "versions": [ { "id": "...", "tree": { ... }, "timestamp": "..." } ]
//! }
//! ```
//!
//! Trees are stored in the transport form produced by `folio-codec` and are
//! decoded (and validated) when the document is loaded.

use chrono::{DateTime, Utc};
use folio_codec::TransportNode;
use folio_types::{OwnerId, VersionId};
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::record::{VersionLog, VersionRecord};

/// A [`VersionRecord`] as persisted.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredRecord {
    pub id: VersionId,
    pub tree: TransportNode,
    pub timestamp: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl StoredRecord {
    pub fn from_record(record: &VersionRecord) -> Self {
        Self {
            id: record.id,
            tree: folio_codec::encode(&record.tree),
            timestamp: record.timestamp,
            message: record.message.clone(),
        }
    }

    /// Decode the stored tree. Fails with a codec error on corrupt data.
    pub fn into_record(self) -> Result<VersionRecord> {
        Ok(VersionRecord {
            id: self.id,
            tree: folio_codec::decode(self.tree)?,
            timestamp: self.timestamp,
            message: self.message.filter(|m| !m.trim().is_empty()),
        })
    }
}

/// Everything persisted for one owner.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OwnerDocument {
    pub owner_id: OwnerId,
    #[serde(default)]
    pub current: Option<StoredRecord>,
    #[serde(default)]
    pub versions: Vec<StoredRecord>,
}

impl OwnerDocument {
    pub fn from_log(owner: &OwnerId, log: &VersionLog) -> Self {
        Self {
            owner_id: owner.clone(),
            current: log.current().map(StoredRecord::from_record),
            versions: log.versions().iter().map(StoredRecord::from_record).collect(),
        }
    }

    pub fn into_log(self) -> Result<VersionLog> {
        let current = self.current.map(StoredRecord::into_record).transpose()?;
        let versions = self
            .versions
            .into_iter()
            .map(StoredRecord::into_record)
            .collect::<Result<Vec<_>>>()?;
        Ok(VersionLog::from_parts(current, versions))
    }
}
