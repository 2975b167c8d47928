//! Status and change summaries for Folio.
//!
//! Compares a live namespace tree with a baseline, normally the owner's
//! current saved version. Comparison is by path only: a node whose path
//! exists in the baseline counts as committed even if its blob changed.
//!
//! # Key Types
//!
//! - [`NodeStatus`] / [`node_status`] -- Per-path committed check
//! - [`StatusEntry`] / [`annotate`] -- Status for every node of a live tree
//! - [`ChangesSummary`] / [`changes_summary`] -- Added and removed paths

pub mod changes;
pub mod status;

pub use changes::{changes_summary, collect_paths, ChangesSummary};
pub use status::{annotate, node_status, NodeStatus, StatusEntry};
