//! Foundation types for Folio.
//!
//! Every other Folio crate depends on `folio-types`. The types here are small
//! newtypes that keep owner identities, version identifiers and blob
//! references from being mixed up with each other or with node names.
//!
//! # Key Types
//!
//! - [`OwnerId`] -- Identity of the account that owns a namespace tree
//! - [`VersionId`] -- Time-ordered identifier of a version record (UUID v7)
//! - [`BlobRef`] -- Opaque reference to a physically stored blob

pub mod blob;
pub mod error;
pub mod owner;
pub mod version;

pub use blob::BlobRef;
pub use error::TypeError;
pub use owner::OwnerId;
pub use version::VersionId;
