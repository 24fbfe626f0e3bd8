//! Core graph store implementation
//!
//! This module implements the labeled property graph data model:
//! - Nodes with an external id, one label and insertion-ordered properties
//! - Edges between existing nodes, undirected for traversal
//! - Parallel edges and self-loops
//! - In-memory storage with an adjacency list and a property index

pub mod edge;
pub mod node;
pub mod property;
pub mod store;
pub mod types;

// Re-export main types
pub use edge::Edge;
pub use node::Node;
pub use property::{PropertyMap, PropertyValue};
pub use store::{GraphConfig, GraphError, GraphResult, GraphStatistics, GraphStore};
pub use types::{EdgeId, EdgeType, Label, NodeId};
