//! Version records and the per-owner log that orders them.

use chrono::{DateTime, Utc};
use folio_tree::Node;
use folio_types::VersionId;

/// An immutable snapshot of an owner's namespace tree.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct VersionRecord {
    /// Unique, time-ordered identifier.
    pub id: VersionId,
    /// Deep copy of the root folder at save time.
    pub tree: Node,
    /// When the snapshot was taken.
    pub timestamp: DateTime<Utc>,
    /// Optional commit message. Never `Some("")`.
    pub message: Option<String>,
}

impl VersionRecord {
    /// Capture `tree` now, with a fresh id.
    ///
    /// Empty or whitespace-only messages are stored as `None`; any other
    /// message is kept exactly as given.
    pub fn new(tree: Node, message: Option<&str>) -> Self {
        Self {
            id: VersionId::new(),
            tree,
            timestamp: Utc::now(),
            message: normalize_message(message),
        }
    }

    /// The message, or an empty string when none was given.
    pub fn message_or_empty(&self) -> &str {
        self.message.as_deref().unwrap_or("")
    }
}

fn normalize_message(message: Option<&str>) -> Option<String> {
    message
        .filter(|m| !m.trim().is_empty())
        .map(str::to_string)
}

/// Append-only list of records plus a movable `current` pointer.
///
/// `current` is a copy of one record from `versions`: the last one saved, or
/// the last one restored. Restoring never appends or removes entries.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct VersionLog {
    current: Option<VersionRecord>,
    versions: Vec<VersionRecord>,
}

impl VersionLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild a log from persisted parts.
    pub fn from_parts(current: Option<VersionRecord>, versions: Vec<VersionRecord>) -> Self {
        Self { current, versions }
    }

    pub fn current(&self) -> Option<&VersionRecord> {
        self.current.as_ref()
    }

    /// Records in save order (oldest first).
    pub fn versions(&self) -> &[VersionRecord] {
        &self.versions
    }

    /// Records newest first, as returned to callers.
    pub fn newest_first(&self) -> Vec<VersionRecord> {
        self.versions.iter().rev().cloned().collect()
    }

    pub fn get(&self, id: &VersionId) -> Option<&VersionRecord> {
        self.versions.iter().find(|r| &r.id == id)
    }

    /// Append `record` and make it current.
    pub fn append(&mut self, record: VersionRecord) {
        self.current = Some(record.clone());
        self.versions.push(record);
    }

    /// Point `current` at the record with `id`.
    ///
    /// Returns the restored record, or `None` when `id` is not in the log (in
    /// which case nothing changes).
    pub fn restore(&mut self, id: &VersionId) -> Option<VersionRecord> {
        let record = self.get(id)?.clone();
        self.current = Some(record.clone());
        Some(record)
    }

    pub fn len(&self) -> usize {
        self.versions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.versions.is_empty()
    }

    pub fn into_parts(self) -> (Option<VersionRecord>, Vec<VersionRecord>) {
        (self.current, self.versions)
    }
}
