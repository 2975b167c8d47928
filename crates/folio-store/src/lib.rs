//! Version store for Folio.
//!
//! Turns a namespace tree into an immutable [`VersionRecord`], appends it to a
//! per-owner [`VersionLog`], and restores earlier records as the owner's
//! `current` tree. The log itself is append-only: restoring moves `current`
//! without touching history.
//!
//! # Architecture
//!
//! - [`VersionStore`] is the persistence contract. Every method is keyed by
//!   [`folio_types::OwnerId`] and is atomic from the caller's point of view.
//! - [`VersionLog`] holds the log/current bookkeeping so every backend shares
//!   the same save and restore semantics.
//! - Trees cross the storage boundary through `folio-codec`; a stored document
//!   that fails to decode is reported as corrupt, never repaired.
//!
//! # Modules
//!
//! - [`error`] -- Error types for store operations
//! - [`record`] -- [`VersionRecord`] and [`VersionLog`]
//! - [`traits`] -- The [`VersionStore`] trait
//! - [`document`] -- On-disk JSON shape of an owner's log
//! - [`memory`] -- In-memory [`InMemoryVersionStore`] for tests and embedding
//! - [`file`] -- [`FileVersionStore`], one JSON document per owner

pub mod document;
pub mod error;
pub mod file;
pub mod memory;
pub mod record;
pub mod traits;

pub use document::{OwnerDocument, StoredRecord};
pub use error::{Result, StoreError};
pub use file::FileVersionStore;
pub use memory::InMemoryVersionStore;
pub use record::{VersionLog, VersionRecord};
pub use traits::VersionStore;
