//! Edge implementation for the property graph
//!
//! Endpoints are stored in the order they were given, but traversal treats
//! every edge as undirected.

use super::types::{EdgeId, EdgeType, NodeId};
use serde::{Deserialize, Serialize};
use std::fmt;

/// An edge in the property graph
///
/// Edges have:
/// - An arena position (`id`)
/// - A start and an end node
/// - A label (relationship type)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Edge {
    /// Position of this edge in the store's edge arena
    pub id: EdgeId,

    /// First endpoint, as given at creation
    pub start: NodeId,

    /// Second endpoint, as given at creation
    pub end: NodeId,

    /// Type of relationship (e.g., "knows", "works_at")
    pub edge_type: EdgeType,
}

impl Edge {
    /// Create a new edge
    pub fn new(
        id: EdgeId,
        start: impl Into<NodeId>,
        end: impl Into<NodeId>,
        edge_type: impl Into<EdgeType>,
    ) -> Self {
        Edge {
            id,
            start: start.into(),
            end: end.into(),
            edge_type: edge_type.into(),
        }
    }

    /// Check if this edge connects two specific nodes (in either direction)
    pub fn connects(&self, node1: &NodeId, node2: &NodeId) -> bool {
        (&self.start == node1 && &self.end == node2)
            || (&self.start == node2 && &self.end == node1)
    }

    /// Check if `node` is one of this edge's endpoints
    pub fn touches(&self, node: &NodeId) -> bool {
        &self.start == node || &self.end == node
    }

    /// The endpoint across from `node`
    ///
    /// Anything that is not the start maps to the start, so a self-loop
    /// yields `node` back.
    pub fn other_end(&self, node: &NodeId) -> &NodeId {
        if &self.start == node {
            &self.end
        } else {
            &self.start
        }
    }

    /// Check whether both endpoints are the same node
    pub fn is_self_loop(&self) -> bool {
        self.start == self.end
    }
}

impl fmt::Display for Edge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Edge(start={}, end={}, label={})",
            self.start, self.end, self.edge_type
        )
    }
}

impl PartialEq for Edge {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Edge {}

impl std::hash::Hash for Edge {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}
