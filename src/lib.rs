//! Spreadsheet-backed concept hierarchy management
//!
//! A hierarchy is a labelled tree of concepts (categories → sections →
//! topics → entries) held in memory, imported from and exported to a flat
//! tabular form.

pub mod domain;
pub use domain::{Config, Hierarchy, Node, NodeId, NodeKind, StoreError};

/// Tabular parsing, export, and file round-tripping for hierarchies.
pub mod storage;
pub use storage::{Cell, ImportError, Table};
