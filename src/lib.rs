//! kgraph: an in-memory labeled property graph store
//!
//! The store keeps nodes keyed by an externally supplied id, edges in an
//! append-only arena, a per-node adjacency list, and an exact-match property
//! index. It answers three kinds of queries:
//!
//! - nodes by (property key, value)
//! - edges touching a node
//! - minimum-hop path between two nodes, treating edges as undirected
//!
//! ## Example Usage
//!
//! ```rust
//! use kgraph::GraphStore;
//!
//! let mut store = GraphStore::new();
//! store.add_node("1", "Person");
//! store.add_node("2", "Person");
//! store.add_node("3", "Company");
//!
//! store.set_node_property("1", "name", "Alice").unwrap();
//! store.add_edge("1", "2", "knows").unwrap();
//! store.add_edge("2", "3", "works_at").unwrap();
//!
//! let alices = store.find_nodes_by_property("name", &"Alice".into());
//! assert_eq!(alices[0].id.as_str(), "1");
//!
//! let path = store.shortest_path("1", "3").unwrap();
//! assert_eq!(path.len(), 3);
//! ```
//!
//! Mutations that name an unknown node return an error and leave the store
//! unchanged; callers that only care about the happy path can ignore it.
//! `GraphStore` does no internal locking. Share it behind a single
//! reader-writer lock if several threads need it.

#![allow(missing_docs)]
#![warn(clippy::all)]

pub mod algo;
pub mod graph;
pub mod index;
pub mod loader;

// Re-export main types for convenience
pub use graph::{
    Edge, EdgeId, EdgeType, GraphConfig, GraphError, GraphResult, GraphStatistics, GraphStore,
    Label, Node, NodeId, PropertyMap, PropertyValue,
};

pub use index::{IndexMode, PropertyIndex};

pub use algo::PathResult;

pub use loader::{
    load_path, Dataset, EdgeRecord, LoadReport, LoaderError, LoaderResult, NodeRecord,
};

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Get version string
pub fn version() -> &'static str {
    VERSION
}
