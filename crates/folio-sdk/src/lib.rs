//! High-level SDK for Folio.
//!
//! Binds an owner, a [`VersionStore`] and a live namespace tree into a
//! [`Folio`] session. This is the main entry point for applications
//! embedding Folio.

pub mod blob;
pub mod config;
pub mod error;
pub mod session;

pub use blob::{BlobResolver, UrlTemplateResolver};
pub use config::FolioConfig;
pub use error::{SdkError, SdkResult};
pub use session::Folio;

// Re-export key types
pub use folio_diff::{ChangesSummary, NodeStatus, StatusEntry};
pub use folio_store::{FileVersionStore, InMemoryVersionStore, VersionRecord, VersionStore};
pub use folio_tree::{NamespaceTree, Node, NodeKind, SearchHit};
pub use folio_types::{BlobRef, OwnerId, VersionId};
