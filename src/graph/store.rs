//! In-memory graph storage implementation
//!
//! Nodes live in an insertion-ordered map keyed by their external id, edges
//! in an append-only arena addressed by [`EdgeId`]. Adjacency lists and the
//! property index refer back into those two containers instead of holding
//! copies, so a property write is visible through every path that reaches
//! the node.

use super::edge::Edge;
use super::node::Node;
use super::property::PropertyValue;
use super::types::{EdgeId, EdgeType, Label, NodeId};
use crate::index::{IndexMode, PropertyIndex};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use thiserror::Error;
use tracing::debug;

/// Errors that can occur during graph operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GraphError {
    #[error("Node {0} not found")]
    NodeNotFound(NodeId),

    #[error("Invalid edge: start node {0} does not exist")]
    InvalidEdgeStart(NodeId),

    #[error("Invalid edge: end node {0} does not exist")]
    InvalidEdgeEnd(NodeId),
}

pub type GraphResult<T> = Result<T, GraphError>;

/// Tuning knobs for a [`GraphStore`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GraphConfig {
    /// How the property index handles overwritten values
    pub index_mode: IndexMode,
    /// Initial capacity reserved for nodes
    pub node_capacity: usize,
    /// Initial capacity reserved for edges
    pub edge_capacity: usize,
}

impl Default for GraphConfig {
    fn default() -> Self {
        Self {
            index_mode: IndexMode::History,
            node_capacity: 1024,
            edge_capacity: 4096,
        }
    }
}

/// Summary counters for a store
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphStatistics {
    pub node_count: usize,
    pub edge_count: usize,
    /// Property keys present in the index
    pub indexed_keys: usize,
    /// (key, value, node) entries in the index, stale ones included
    pub index_entries: usize,
    /// Largest adjacency list length (self-loops count twice)
    pub max_degree: usize,
}

/// In-memory graph storage
///
/// - nodes: NodeId -> Node (insertion ordered)
/// - edges: arena of every edge ever added, indexed by EdgeId
/// - adjacency: NodeId -> Vec<EdgeId> (edges touching the node, both ends)
/// - property_index: key -> value -> Vec<NodeId>
#[derive(Debug)]
pub struct GraphStore {
    /// Node storage
    nodes: IndexMap<NodeId, Node>,

    /// Edge arena (append-only)
    edges: Vec<Edge>,

    /// Incident edges for each node, in insertion order
    adjacency: HashMap<NodeId, Vec<EdgeId>>,

    /// Property index for exact-match lookups
    property_index: PropertyIndex,

    config: GraphConfig,
}

impl GraphStore {
    /// Create a new empty graph store
    pub fn new() -> Self {
        Self::with_config(GraphConfig::default())
    }

    /// Create a new empty graph store with explicit settings
    pub fn with_config(config: GraphConfig) -> Self {
        GraphStore {
            nodes: IndexMap::with_capacity(config.node_capacity),
            edges: Vec::with_capacity(config.edge_capacity),
            adjacency: HashMap::with_capacity(config.node_capacity),
            property_index: PropertyIndex::new(config.index_mode),
            config,
        }
    }

    pub fn config(&self) -> &GraphConfig {
        &self.config
    }

    /// Insert a node with no properties
    ///
    /// Idempotent by id: if `id` is already present the existing node is left
    /// untouched (label included) and `false` is returned.
    pub fn add_node(&mut self, id: impl Into<NodeId>, label: impl Into<Label>) -> bool {
        let id = id.into();
        if self.nodes.contains_key(&id) {
            debug!("Node {} already exists, keeping original", id);
            return false;
        }

        self.adjacency.insert(id.clone(), Vec::new());
        self.nodes.insert(id.clone(), Node::new(id, label));
        true
    }

    /// Get a node by ID
    pub fn get_node(&self, id: &str) -> Option<&Node> {
        self.nodes.get(id)
    }

    /// Check if a node exists
    pub fn has_node(&self, id: &str) -> bool {
        self.nodes.contains_key(id)
    }

    /// Set a property on a node and record it in the property index
    ///
    /// Unknown nodes are rejected with [`GraphError::NodeNotFound`] and the
    /// store is left unchanged.
    pub fn set_node_property(
        &mut self,
        node_id: &str,
        key: impl Into<String>,
        value: impl Into<PropertyValue>,
    ) -> GraphResult<()> {
        let key = key.into();
        let value = value.into();

        let node = match self.nodes.get_mut(node_id) {
            Some(node) => node,
            None => {
                debug!("Ignoring property {} on unknown node {}", key, node_id);
                return Err(GraphError::NodeNotFound(NodeId::new(node_id)));
            }
        };

        let previous = node.set_property(key.clone(), value.clone());
        let id = node.id.clone();
        self.property_index
            .insert(&key, value, id, previous.as_ref());

        Ok(())
    }

    /// Create an edge between two existing nodes
    ///
    /// The edge is recorded in the adjacency list of both endpoints, twice
    /// against the same node for a self-loop. Parallel edges are allowed.
    /// If either endpoint is unknown nothing is stored.
    pub fn add_edge(
        &mut self,
        start: &str,
        end: &str,
        edge_type: impl Into<EdgeType>,
    ) -> GraphResult<EdgeId> {
        // Validate nodes exist
        let start = match self.nodes.get(start) {
            Some(node) => node.id.clone(),
            None => {
                debug!("Dropping edge {} -> {}: unknown start node", start, end);
                return Err(GraphError::InvalidEdgeStart(NodeId::new(start)));
            }
        };
        let end = match self.nodes.get(end) {
            Some(node) => node.id.clone(),
            None => {
                debug!("Dropping edge {} -> {}: unknown end node", start, end);
                return Err(GraphError::InvalidEdgeEnd(NodeId::new(end)));
            }
        };

        let edge_id = EdgeId::new(self.edges.len());

        // Update adjacency lists
        for endpoint in [&start, &end] {
            self.adjacency
                .entry(endpoint.clone())
                .or_default()
                .push(edge_id);
        }

        self.edges.push(Edge::new(edge_id, start, end, edge_type));
        Ok(edge_id)
    }

    /// Get an edge by ID
    pub fn get_edge(&self, id: EdgeId) -> Option<&Edge> {
        self.edges.get(id.index())
    }

    /// Nodes ever indexed under `key = value`, in index order
    ///
    /// With the default [`IndexMode::History`] this includes nodes whose
    /// current value for `key` has since changed, and a node indexed twice
    /// under the same pair is returned twice.
    pub fn find_nodes_by_property(&self, key: &str, value: &PropertyValue) -> Vec<&Node> {
        self.property_index
            .get(key, value)
            .iter()
            .filter_map(|id| self.nodes.get(id))
            .collect()
    }

    /// Edges touching a node, in the order they were added
    ///
    /// Empty for unknown nodes. A self-loop shows up twice.
    pub fn find_edges_by_node(&self, node_id: &str) -> Vec<&Edge> {
        self.edge_ids_of(node_id)
            .iter()
            .filter_map(|id| self.edges.get(id.index()))
            .collect()
    }

    /// Edge ids touching a node, in adjacency order
    pub(crate) fn edge_ids_of(&self, node_id: &str) -> &[EdgeId] {
        self.adjacency
            .get(node_id)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Nodes across every edge touching `node_id`, in adjacency order
    pub fn neighbors(&self, node_id: &str) -> Vec<&NodeId> {
        let id = NodeId::new(node_id);
        self.find_edges_by_node(node_id)
            .into_iter()
            .map(|edge| edge.other_end(&id))
            .collect()
    }

    /// Minimum-hop path between two nodes over the undirected view
    ///
    /// `None` when either node is unknown or they are not connected. Use
    /// [`crate::algo::shortest_path`] to tell the two apart.
    pub fn shortest_path(&self, start: &str, end: &str) -> Option<Vec<NodeId>> {
        crate::algo::shortest_path(self, start, end)
            .ok()
            .flatten()
            .map(|result| result.path)
    }

    /// All nodes, in insertion order
    pub fn nodes(&self) -> impl Iterator<Item = &Node> {
        self.nodes.values()
    }

    /// All edges, in insertion order
    pub fn edges(&self) -> impl Iterator<Item = &Edge> {
        self.edges.iter()
    }

    /// Get total number of nodes
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Get total number of edges
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn property_index(&self) -> &PropertyIndex {
        &self.property_index
    }

    /// Compute summary counters
    pub fn statistics(&self) -> GraphStatistics {
        GraphStatistics {
            node_count: self.node_count(),
            edge_count: self.edge_count(),
            indexed_keys: self.property_index.keys().count(),
            index_entries: self.property_index.entry_count(),
            max_degree: self.adjacency.values().map(Vec::len).max().unwrap_or(0),
        }
    }
}

impl Default for GraphStore {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for GraphStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Nodes:")?;
        for node in self.nodes() {
            writeln!(f, "{}", node)?;
        }
        writeln!(f)?;
        write!(f, "Edges:")?;
        for edge in self.edges() {
            write!(f, "\n{}", edge)?;
        }
        Ok(())
    }
}
