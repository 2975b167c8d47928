//! File-backed version store.
//!
//! One JSON [`OwnerDocument`] per owner under a single directory. Writes go to
//! a temporary file in the same directory which is synced and then renamed
//! over the old document, so readers only ever see a complete document.
//! Read-modify-write sequences hold an in-process mutex and an exclusive
//! advisory lock on `<dir>/<owner>.lock`, so saves and restores from separate
//! processes sharing the directory never overwrite each other's records.

use std::fmt::Write as _;
use std::fs::{self, File, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

use folio_tree::Node;
use folio_types::{OwnerId, VersionId};
use fs2::FileExt;
use tempfile::NamedTempFile;
use tracing::{debug, info, warn};

use crate::document::OwnerDocument;
use crate::error::{Result, StoreError};
use crate::record::{VersionLog, VersionRecord};
use crate::traits::{check_snapshot, VersionStore};

const DOCUMENT_EXT: &str = "json";
const LOCK_EXT: &str = "lock";

/// Exclusive lock on an owner's lock file, released on drop.
struct OwnerLock {
    file: File,
}

impl OwnerLock {
    fn acquire(path: &Path) -> Result<Self> {
        let file = OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(false)
            .open(path)?;
        FileExt::lock_exclusive(&file)?;
        Ok(Self { file })
    }
}

impl Drop for OwnerLock {
    fn drop(&mut self) {
        if let Err(e) = FileExt::unlock(&self.file) {
            warn!(error = %e, "failed to release owner lock");
        }
    }
}

/// A [`VersionStore`] that keeps each owner's log in `<dir>/<owner>.json`.
#[derive(Debug)]
pub struct FileVersionStore {
    dir: PathBuf,
    pretty: bool,
    write_lock: Mutex<()>,
}

impl FileVersionStore {
    /// Open (creating if needed) a store rooted at `dir`.
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        debug!(dir = %dir.display(), "opened file version store");
        Ok(Self {
            dir,
            pretty: false,
            write_lock: Mutex::new(()),
        })
    }

    /// Write documents as indented JSON.
    pub fn with_pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of the document holding `owner`'s log.
    pub fn document_path(&self, owner: &OwnerId) -> PathBuf {
        self.dir.join(format!("{}.{DOCUMENT_EXT}", file_stem(owner)))
    }

    fn lock_path(&self, owner: &OwnerId) -> PathBuf {
        self.dir.join(format!("{}.{LOCK_EXT}", file_stem(owner)))
    }

    /// Serialize a read-modify-write of `owner`'s document against this
    /// process and every other process using the same directory.
    fn lock(&self, owner: &OwnerId) -> Result<(MutexGuard<'_, ()>, OwnerLock)> {
        let guard = self
            .write_lock
            .lock()
            .map_err(|e| StoreError::LockPoisoned(e.to_string()))?;
        let file_lock = OwnerLock::acquire(&self.lock_path(owner))?;
        Ok((guard, file_lock))
    }

    fn read_log(&self, owner: &OwnerId) -> Result<Option<VersionLog>> {
        let path = self.document_path(owner);
        let text = match fs::read_to_string(&path) {
            Ok(text) => text,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        let document: OwnerDocument = serde_json::from_str(&text).map_err(|e| {
            warn!(path = %path.display(), error = %e, "corrupt version document");
            e
        })?;
        if &document.owner_id != owner {
            warn!(
                path = %path.display(),
                stored = %document.owner_id,
                "version document belongs to another owner"
            );
            return Err(StoreError::OwnerMismatch {
                expected: owner.clone(),
                found: document.owner_id,
            });
        }
        let log = document.into_log().map_err(|e| {
            warn!(path = %path.display(), error = %e, "undecodable tree in version document");
            e
        })?;
        Ok(Some(log))
    }

    fn write_log(&self, owner: &OwnerId, log: &VersionLog) -> Result<()> {
        let document = OwnerDocument::from_log(owner, log);
        let bytes = if self.pretty {
            serde_json::to_vec_pretty(&document)?
        } else {
            serde_json::to_vec(&document)?
        };

        let path = self.document_path(owner);
        let mut tmp = NamedTempFile::new_in(&self.dir)?;
        tmp.write_all(&bytes)?;
        tmp.as_file().sync_all()?;
        tmp.persist(&path).map_err(|e| StoreError::Io(e.error))?;

        debug!(path = %path.display(), bytes = bytes.len(), "wrote version document");
        Ok(())
    }
}

impl VersionStore for FileVersionStore {
    fn load_current(&self, owner: &OwnerId) -> Result<Option<VersionRecord>> {
        Ok(self
            .read_log(owner)?
            .and_then(|log| log.current().cloned()))
    }

    fn save_snapshot(
        &self,
        owner: &OwnerId,
        tree: &Node,
        message: Option<&str>,
    ) -> Result<VersionRecord> {
        check_snapshot(tree)?;
        let _locks = self.lock(owner)?;

        let mut log = self.read_log(owner)?.unwrap_or_default();
        let record = VersionRecord::new(tree.clone(), message);
        log.append(record.clone());
        self.write_log(owner, &log)?;

        info!(%owner, version = %record.id, "snapshot saved");
        Ok(record)
    }

    fn list_versions(&self, owner: &OwnerId) -> Result<Vec<VersionRecord>> {
        Ok(self
            .read_log(owner)?
            .map(|log| log.newest_first())
            .unwrap_or_default())
    }

    fn restore_version(&self, owner: &OwnerId, version: &VersionId) -> Result<VersionRecord> {
        let _locks = self.lock(owner)?;

        let not_found = || StoreError::VersionNotFound {
            owner: owner.clone(),
            version: *version,
        };
        let mut log = self.read_log(owner)?.ok_or_else(not_found)?;
        let record = log.restore(version).ok_or_else(not_found)?;
        self.write_log(owner, &log)?;

        info!(%owner, %version, "version restored");
        Ok(record)
    }

    fn version_count(&self, owner: &OwnerId) -> Result<usize> {
        Ok(self.read_log(owner)?.map_or(0, |log| log.len()))
    }
}

/// File-name-safe form of an owner id.
///
/// ASCII alphanumerics, `-` and `_` pass through; every other byte
/// (including `.` so ids cannot form `..`) is written as `%XX`.
pub fn file_stem(owner: &OwnerId) -> String {
    let mut out = String::with_capacity(owner.as_str().len());
    for byte in owner.as_str().bytes() {
        if byte.is_ascii_alphanumeric() || byte == b'-' || byte == b'_' {
            out.push(byte as char);
        } else {
            let _ = write!(out, "%{byte:02X}");
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use folio_types::BlobRef;

    fn owner(s: &str) -> OwnerId {
        OwnerId::new(s).unwrap()
    }

    fn root_with(name: &str) -> Node {
        let mut root = Node::root();
        root.as_folder_mut()
            .unwrap()
            .add_child(Node::file(name, BlobRef::new("blob-1").unwrap()).unwrap())
            .unwrap();
        root
    }

    fn temp_store() -> (tempfile::TempDir, FileVersionStore) {
        let dir = tempfile::tempdir().unwrap();
        let store = FileVersionStore::open(dir.path().join("versions")).unwrap();
        (dir, store)
    }

    #[test]
    fn empty_store_reads_empty() {
        let (_dir, store) = temp_store();
        let alice = owner("alice");
        assert!(store.load_current(&alice).unwrap().is_none());
        assert!(store.list_versions(&alice).unwrap().is_empty());
        assert!(!store.document_path(&alice).exists());
    }

    #[test]
    fn save_and_reload_across_instances() {
        let (dir, store) = temp_store();
        let alice = owner("alice");
        let v1 = store.save_snapshot(&alice, &root_with("a.txt"), Some("v1")).unwrap();
        let v2 = store.save_snapshot(&alice, &root_with("b.txt"), None).unwrap();
        drop(store);

        let reopened = FileVersionStore::open(dir.path().join("versions")).unwrap();
        let current = reopened.load_current(&alice).unwrap().unwrap();
        assert_eq!(current, v2);

        let listed = reopened.list_versions(&alice).unwrap();
        assert_eq!(listed, vec![v2, v1]);
    }

    #[test]
    fn restore_persists_current_only() {
        let (_dir, store) = temp_store();
        let alice = owner("alice");
        let v1 = store.save_snapshot(&alice, &root_with("a.txt"), None).unwrap();
        store.save_snapshot(&alice, &root_with("b.txt"), None).unwrap();

        store.restore_version(&alice, &v1.id).unwrap();
        assert_eq!(store.load_current(&alice).unwrap().unwrap().id, v1.id);
        assert_eq!(store.version_count(&alice).unwrap(), 2);
        assert_eq!(
            store.get_version(&alice, &v1.id).unwrap().unwrap().tree,
            root_with("a.txt")
        );
    }

    #[test]
    fn restore_for_unknown_owner_is_not_found() {
        let (_dir, store) = temp_store();
        assert!(matches!(
            store.restore_version(&owner("ghost"), &VersionId::new()),
            Err(StoreError::VersionNotFound { .. })
        ));
    }

    #[test]
    fn owners_get_separate_documents() {
        let (_dir, store) = temp_store();
        let alice = owner("alice");
        let bob = owner("bob");
        store.save_snapshot(&alice, &root_with("a.txt"), None).unwrap();

        assert!(store.document_path(&alice).exists());
        assert!(!store.document_path(&bob).exists());
        assert!(store.list_versions(&bob).unwrap().is_empty());
    }

    #[test]
    fn unparseable_document_is_serialization_error() {
        let (_dir, store) = temp_store();
        let alice = owner("alice");
        fs::write(store.document_path(&alice), "{ not json").unwrap();
        assert!(matches!(
            store.load_current(&alice),
            Err(StoreError::Serialization(_))
        ));
    }

    #[test]
    fn malformed_tree_is_codec_error() {
        let (_dir, store) = temp_store();
        let alice = owner("alice");
        let text = r#"{"ownerId":"alice","current":{
            "id":"0190a6f2-0000-7000-8000-000000000000",
            "tree":{"name":"root","kind":"folder","blobRef":"x"},
            "timestamp":"2024-01-01T00:00:00Z"}}"#;
        fs::write(store.document_path(&alice), text).unwrap();
        assert!(matches!(
            store.load_current(&alice),
            Err(StoreError::Codec(_))
        ));
    }

    #[test]
    fn pretty_documents_are_indented() {
        let (_dir, store) = temp_store();
        let store = store.with_pretty(true);
        let alice = owner("alice");
        store.save_snapshot(&alice, &root_with("a.txt"), None).unwrap();
        let text = fs::read_to_string(store.document_path(&alice)).unwrap();
        assert!(text.contains("\n  \"ownerId\""));
    }

    #[test]
    fn owner_ids_are_escaped_for_file_names() {
        assert_eq!(file_stem(&owner("alice_01-x")), "alice_01-x");
        assert_eq!(file_stem(&owner("a/b")), "a%2Fb");
        assert_eq!(file_stem(&owner("..")), "%2E%2E");
        assert_eq!(file_stem(&owner("a@b.c")), "a%40b%2Ec");
    }

    #[test]
    fn no_temp_files_left_behind() {
        let (_dir, store) = temp_store();
        let alice = owner("alice");
        for name in ["a", "b", "c"] {
            store.save_snapshot(&alice, &root_with(name), None).unwrap();
        }
        let mut names: Vec<String> = fs::read_dir(store.dir())
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        names.sort();
        assert_eq!(names, vec!["alice.json", "alice.lock"]);
    }

    #[test]
    fn separate_instances_on_one_directory_keep_every_save() {
        use std::sync::Arc;

        let dir = tempfile::tempdir().unwrap();
        let handles: Vec<_> = (0..2)
            .map(|t| {
                let store = Arc::new(FileVersionStore::open(dir.path()).unwrap());
                std::thread::spawn(move || {
                    let alice = owner("alice");
                    for i in 0..25 {
                        let name = format!("t{t}-{i}");
                        store.save_snapshot(&alice, &root_with(&name), None).unwrap();
                    }
                })
            })
            .collect();
        for h in handles {
            h.join().unwrap();
        }

        let store = FileVersionStore::open(dir.path()).unwrap();
        assert_eq!(store.version_count(&owner("alice")).unwrap(), 50);
    }

    #[test]
    fn document_of_another_owner_is_rejected() {
        let (_dir, store) = temp_store();
        let alice = owner("alice");
        let bob = owner("bob");
        store
            .save_snapshot(&bob, &root_with("secret.txt"), Some("bob secret"))
            .unwrap();
        fs::copy(store.document_path(&bob), store.document_path(&alice)).unwrap();

        assert!(matches!(
            store.load_current(&alice),
            Err(StoreError::OwnerMismatch { ref expected, ref found })
                if expected == &alice && found == &bob
        ));
        assert!(matches!(
            store.save_snapshot(&alice, &root_with("a.txt"), None),
            Err(StoreError::OwnerMismatch { .. })
        ));
        assert_eq!(store.version_count(&bob).unwrap(), 1);
    }
}
