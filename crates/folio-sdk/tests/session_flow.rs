//! End-to-end session flow against both store backends.

use std::sync::Arc;

use folio_sdk::{
    BlobRef, BlobResolver, FileVersionStore, Folio, FolioConfig, InMemoryVersionStore, NodeStatus,
    OwnerId, VersionStore,
};

fn blob(s: &str) -> BlobRef {
    BlobRef::new(s).unwrap()
}

fn alice() -> OwnerId {
    OwnerId::new("alice").unwrap()
}

fn run_flow(store: Arc<dyn VersionStore>) {
    let mut folio = Folio::open(Arc::clone(&store), alice()).unwrap();

    // Build and commit a first version.
    folio.create_folder("root", "docs").unwrap();
    folio.add_file("root/docs", "report.pdf", blob("abc123")).unwrap();
    let v1 = folio.commit(Some("first")).unwrap();

    let hits = folio.search("rep");
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].path, "root/docs/report.pdf");
    assert_eq!(hits[0].node.name(), "report.pdf");

    // Edit: swap one file for another and check the summary.
    folio.add_file("root/docs", "summary.md", blob("s1")).unwrap();
    let removed = folio.remove("root/docs/report.pdf").unwrap();
    assert_eq!(removed, vec![blob("abc123")]);

    assert_eq!(folio.status("root/docs/summary.md"), NodeStatus::Uncommitted);
    let changes = folio.changes();
    assert_eq!(changes.added, vec!["root/docs/summary.md"]);
    assert_eq!(changes.removed, vec!["root/docs/report.pdf"]);

    let v2 = folio.commit(None).unwrap();
    assert!(folio.changes().is_empty());

    // History is newest first.
    let ids: Vec<_> = folio.history().unwrap().iter().map(|r| r.id).collect();
    assert_eq!(ids, vec![v2.id, v1.id]);

    // Checkout brings back the first tree without dropping history.
    folio.checkout(&v1.id).unwrap();
    assert!(folio.tree().contains("root/docs/report.pdf"));
    assert!(!folio.tree().contains("root/docs/summary.md"));
    assert!(folio.changes().is_empty());
    assert_eq!(folio.history().unwrap().len(), 2);

    // A new session sees the restored version as current.
    let reopened = Folio::open(Arc::clone(&store), alice()).unwrap();
    assert_eq!(reopened.baseline().unwrap().id, v1.id);
    assert!(reopened.tree().contains("root/docs/report.pdf"));

    // Another owner sees nothing.
    let bob = Folio::open(store, OwnerId::new("bob").unwrap()).unwrap();
    assert!(bob.tree().is_empty());
    assert!(bob.history().unwrap().is_empty());
}

#[test]
fn flow_with_memory_store() {
    run_flow(Arc::new(InMemoryVersionStore::new()));
}

#[test]
fn flow_with_file_store() {
    let dir = tempfile::tempdir().unwrap();
    let store = FileVersionStore::open(dir.path().join("versions")).unwrap();
    run_flow(Arc::new(store));
}

#[test]
fn checkout_unknown_version_fails_and_keeps_state() {
    let store: Arc<dyn VersionStore> = Arc::new(InMemoryVersionStore::new());
    let mut folio = Folio::open(store, alice()).unwrap();
    folio.add_file("root", "a.txt", blob("1")).unwrap();
    folio.commit(None).unwrap();

    assert!(folio.checkout(&folio_sdk::VersionId::new()).is_err());
    assert!(folio.tree().contains("root/a.txt"));
}

#[test]
fn config_drives_store_and_resolver() {
    let dir = tempfile::tempdir().unwrap();
    let text = format!(
        "data_dir = {:?}\nowner = \"alice\"\nblob_base_url = \"https://cdn.test/files\"\n",
        dir.path().display().to_string()
    );
    let config = FolioConfig::from_toml(&text).unwrap();

    let store = FileVersionStore::open(config.versions_dir())
        .unwrap()
        .with_pretty(config.pretty);
    let mut folio = Folio::open(Arc::new(store), config.owner_id().unwrap()).unwrap();
    folio.add_file("root", "a.pdf", blob("xyz")).unwrap();
    folio.commit(None).unwrap();
    assert!(config.versions_dir().join("alice.json").exists());

    let resolver = config.blob_resolver().unwrap().unwrap();
    let node = folio.tree().resolve("root/a.pdf").unwrap();
    assert_eq!(
        resolver.url(node.blob_ref().unwrap()).unwrap(),
        "https://cdn.test/files/xyz"
    );
}
