//! JSON dataset loading
//!
//! A dataset is a list of node records followed by a list of edge records:
//!
//! ```json
//! {
//!   "nodes": [{"id": "1", "label": "Person", "properties": {"name": "Alice"}}],
//!   "edges": [{"start_node": "1", "end_node": "2", "label": "knows"}]
//! }
//! ```
//!
//! Every node (and its properties, in the order given) is applied before any
//! edge, so edges may reference nodes that appear later in the node list.
//! Edges naming an id that is not in the node list are dropped.

use crate::graph::{GraphConfig, GraphStore, PropertyMap};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Errors that can occur while reading a dataset
#[derive(Error, Debug)]
pub enum LoaderError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid dataset: {0}")]
    Json(#[from] serde_json::Error),
}

pub type LoaderResult<T> = Result<T, LoaderError>;

/// A node as it appears in a dataset
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeRecord {
    pub id: String,
    pub label: String,
    #[serde(default)]
    pub properties: PropertyMap,
}

/// An edge as it appears in a dataset
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EdgeRecord {
    pub start_node: String,
    pub end_node: String,
    pub label: String,
}

/// A full dataset: nodes first, then edges
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    #[serde(default)]
    pub nodes: Vec<NodeRecord>,
    #[serde(default)]
    pub edges: Vec<EdgeRecord>,
}

/// What happened while applying a dataset to a store
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoadReport {
    /// Node records that created a new node
    pub nodes_added: usize,
    /// Node records whose id already existed (their label is ignored)
    pub nodes_skipped: usize,
    /// Property writes applied
    pub properties_set: usize,
    pub edges_added: usize,
    /// Edge records naming an unknown node
    pub edges_dropped: usize,
}

impl Dataset {
    pub fn from_json_str(json: &str) -> LoaderResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_reader(reader: impl Read) -> LoaderResult<Self> {
        Ok(serde_json::from_reader(reader)?)
    }

    pub fn from_path(path: impl AsRef<Path>) -> LoaderResult<Self> {
        let path = path.as_ref();
        debug!("Reading dataset from {:?}", path);
        let file = File::open(path)?;
        Self::from_reader(BufReader::new(file))
    }

    /// Apply this dataset to `store`: all nodes and properties, then edges
    pub fn load_into(&self, store: &mut GraphStore) -> LoadReport {
        let mut report = LoadReport::default();

        for record in &self.nodes {
            if store.add_node(record.id.as_str(), record.label.as_str()) {
                report.nodes_added += 1;
            } else {
                report.nodes_skipped += 1;
            }

            // Properties of a repeated record still land on the existing node
            for (key, value) in &record.properties {
                if store
                    .set_node_property(&record.id, key.as_str(), value.clone())
                    .is_ok()
                {
                    report.properties_set += 1;
                }
            }
        }

        for record in &self.edges {
            match store.add_edge(&record.start_node, &record.end_node, record.label.as_str()) {
                Ok(_) => report.edges_added += 1,
                Err(e) => {
                    warn!(
                        "Dropping edge {} -> {} ({}): {}",
                        record.start_node, record.end_node, record.label, e
                    );
                    report.edges_dropped += 1;
                }
            }
        }

        info!(
            "Loaded {} nodes, {} properties, {} edges ({} dropped)",
            report.nodes_added, report.properties_set, report.edges_added, report.edges_dropped
        );
        report
    }
}

/// Read the dataset at `path` into a fresh store
pub fn load_path(
    path: impl AsRef<Path>,
    config: GraphConfig,
) -> LoaderResult<(GraphStore, LoadReport)> {
    let dataset = Dataset::from_path(path)?;
    let mut store = GraphStore::with_config(config);
    let report = dataset.load_into(&mut store);
    Ok((store, report))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::PropertyValue;

    const SAMPLE: &str = r#"{
        "nodes": [
            {"id": "1", "label": "Person", "properties": {"name": "Alice", "age": 30}},
            {"id": "2", "label": "Person", "properties": {"name": "Bob"}},
            {"id": "3", "label": "Company"}
        ],
        "edges": [
            {"start_node": "1", "end_node": "2", "label": "knows"},
            {"start_node": "2", "end_node": "3", "label": "works_at"},
            {"start_node": "3", "end_node": "9", "label": "owns"}
        ]
    }"#;

    #[test]
    fn test_parse_dataset() {
        let dataset = Dataset::from_json_str(SAMPLE).unwrap();
        assert_eq!(dataset.nodes.len(), 3);
        assert_eq!(dataset.edges.len(), 3);
        assert!(dataset.nodes[2].properties.is_empty());

        let keys: Vec<&str> = dataset.nodes[0].properties.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["name", "age"]);
        assert_eq!(
            dataset.nodes[0].properties.get("age"),
            Some(&PropertyValue::Integer(30))
        );
    }

    #[test]
    fn test_load_into() {
        let dataset = Dataset::from_json_str(SAMPLE).unwrap();
        let mut store = GraphStore::new();
        let report = dataset.load_into(&mut store);

        assert_eq!(
            report,
            LoadReport {
                nodes_added: 3,
                nodes_skipped: 0,
                properties_set: 3,
                edges_added: 2,
                edges_dropped: 1,
            }
        );
        assert_eq!(store.node_count(), 3);
        assert_eq!(store.edge_count(), 2);
        assert_eq!(store.find_edges_by_node("3").len(), 1);
    }

    #[test]
    fn test_edges_can_reference_later_nodes() {
        let json = r#"{
            "nodes": [{"id": "a", "label": "X"}, {"id": "b", "label": "X"}],
            "edges": [{"start_node": "b", "end_node": "a", "label": "rel"}]
        }"#;
        let mut store = GraphStore::new();
        let report = Dataset::from_json_str(json).unwrap().load_into(&mut store);
        assert_eq!(report.edges_added, 1);
    }

    #[test]
    fn test_duplicate_node_record() {
        let json = r#"{
            "nodes": [
                {"id": "1", "label": "Person", "properties": {"name": "Alice"}},
                {"id": "1", "label": "Robot", "properties": {"name": "Alicia"}}
            ]
        }"#;
        let mut store = GraphStore::new();
        let report = Dataset::from_json_str(json).unwrap().load_into(&mut store);

        assert_eq!(report.nodes_added, 1);
        assert_eq!(report.nodes_skipped, 1);
        assert_eq!(report.properties_set, 2);

        let node = store.get_node("1").unwrap();
        assert_eq!(node.label.as_str(), "Person");
        assert_eq!(node.get_property("name").unwrap().as_string(), Some("Alicia"));
    }

    #[test]
    fn test_invalid_json() {
        let err = Dataset::from_json_str("{\"nodes\": [").unwrap_err();
        assert!(matches!(err, LoaderError::Json(_)));

        let err = Dataset::from_json_str(r#"{"nodes": [{"id": "1"}]}"#).unwrap_err();
        assert!(matches!(err, LoaderError::Json(_)));
    }

    #[test]
    fn test_missing_file() {
        let err = Dataset::from_path("/definitely/not/here/dataset.json").unwrap_err();
        assert!(matches!(err, LoaderError::Io(_)));
    }
}
