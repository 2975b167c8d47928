//! Tree codec for Folio.
//!
//! Converts the in-memory namespace tree into a flat, order-preserving
//! transport form that can be embedded in a schemaless document store or
//! written as JSON, and back again.
//!
//! # Transport Shape
//!
//! ```json
//! {
//!   "name": "root",
//!   "kind": "folder",
//!   "children": {
//!     "report.pdf": { "name": "report.pdf", "kind": "file", "blobRef": "abc123" }
//!   }
//! }
//! ```
//!
//! Children keys keep insertion order end to end (`indexmap` in memory,
//! `preserve_order` in `serde_json`). Decoding is strict: structurally
//! invalid input is rejected with [`CodecError::MalformedTree`], never
//! repaired.

pub mod codec;
pub mod error;
pub mod transport;

pub use codec::{decode, encode, from_json, from_value, to_json, to_json_pretty, to_value};
pub use error::{CodecError, CodecResult};
pub use transport::{TransportKind, TransportNode};
