//! Loading datasets from disk and reproducing the report output

use kgraph::{load_path, Dataset, GraphConfig, IndexMode, LoaderError};
use std::io::Write;
use tempfile::NamedTempFile;

const DATASET: &str = r#"{
    "nodes": [
        {"id": "1", "label": "Person", "properties": {"name": "Alice"}},
        {"id": "2", "label": "Person", "properties": {"name": "Bob"}},
        {"id": "3", "label": "Company", "properties": {"name": "Acme"}},
        {"id": "4", "label": "Person", "properties": {"name": "Carol"}}
    ],
    "edges": [
        {"start_node": "1", "end_node": "2", "label": "knows"},
        {"start_node": "2", "end_node": "3", "label": "works_at"},
        {"start_node": "3", "end_node": "4", "label": "works_at"},
        {"start_node": "4", "end_node": "5", "label": "knows"}
    ]
}"#;

fn write_dataset(contents: &str) -> anyhow::Result<NamedTempFile> {
    let mut file = NamedTempFile::new()?;
    file.write_all(contents.as_bytes())?;
    file.flush()?;
    Ok(file)
}

#[test]
fn test_load_path() -> anyhow::Result<()> {
    let file = write_dataset(DATASET)?;
    let (store, report) = load_path(file.path(), GraphConfig::default())?;

    assert_eq!(report.nodes_added, 4);
    assert_eq!(report.properties_set, 4);
    assert_eq!(report.edges_added, 3);
    assert_eq!(report.edges_dropped, 1);

    assert_eq!(store.node_count(), 4);
    assert_eq!(store.edge_count(), 3);
    assert!(store.find_edges_by_node("5").is_empty());
    Ok(())
}

#[test]
fn test_loaded_store_dump() -> anyhow::Result<()> {
    let file = write_dataset(DATASET)?;
    let (store, _) = load_path(file.path(), GraphConfig::default())?;

    let expected = "\
Nodes:
Node(id=1, label=Person, properties={name: \"Alice\"})
Node(id=2, label=Person, properties={name: \"Bob\"})
Node(id=3, label=Company, properties={name: \"Acme\"})
Node(id=4, label=Person, properties={name: \"Carol\"})

Edges:
Edge(start=1, end=2, label=knows)
Edge(start=2, end=3, label=works_at)
Edge(start=3, end=4, label=works_at)";
    assert_eq!(store.to_string(), expected);
    Ok(())
}

#[test]
fn test_loaded_store_queries() -> anyhow::Result<()> {
    let file = write_dataset(DATASET)?;
    let (store, _) = load_path(file.path(), GraphConfig::default())?;

    let alices = store.find_nodes_by_property("name", &"Alice".into());
    assert_eq!(alices.len(), 1);
    assert_eq!(alices[0].to_string(), "Node(id=1, label=Person, properties={name: \"Alice\"})");

    let path: Vec<String> = store
        .shortest_path("1", "4")
        .unwrap_or_default()
        .iter()
        .map(|id| id.to_string())
        .collect();
    assert_eq!(path.join(" -> "), "1 -> 2 -> 3 -> 4");
    Ok(())
}

#[test]
fn test_load_with_current_index_mode() -> anyhow::Result<()> {
    let file = write_dataset(
        r#"{"nodes": [
            {"id": "1", "label": "Person", "properties": {"name": "Alice"}},
            {"id": "1", "label": "Person", "properties": {"name": "Alicia"}}
        ]}"#,
    )?;
    let config = GraphConfig {
        index_mode: IndexMode::Current,
        ..GraphConfig::default()
    };
    let (store, report) = load_path(file.path(), config)?;

    assert_eq!(report.nodes_skipped, 1);
    assert!(store.find_nodes_by_property("name", &"Alice".into()).is_empty());
    assert_eq!(store.find_nodes_by_property("name", &"Alicia".into()).len(), 1);
    Ok(())
}

#[test]
fn test_malformed_dataset_file() -> anyhow::Result<()> {
    let file = write_dataset(r#"{"nodes": [{"id": 1, "label": "Person"}]}"#)?;
    let err = Dataset::from_path(file.path()).unwrap_err();
    assert!(matches!(err, LoaderError::Json(_)));
    Ok(())
}

#[test]
fn test_integer_property_out_of_range() -> anyhow::Result<()> {
    let file = write_dataset(
        r#"{"nodes": [{"id": "1", "label": "Counter", "properties": {"n": 18446744073709551615}}]}"#,
    )?;
    let err = load_path(file.path(), GraphConfig::default()).unwrap_err();
    assert!(matches!(err, LoaderError::Json(_)));
    assert!(err.to_string().contains("out of range"));

    let file = write_dataset(
        r#"{"nodes": [{"id": "1", "label": "Counter", "properties": {"n": 9223372036854775807}}]}"#,
    )?;
    let (store, _) = load_path(file.path(), GraphConfig::default())?;
    assert_eq!(
        store.find_nodes_by_property("n", &kgraph::PropertyValue::Integer(i64::MAX)).len(),
        1
    );
    Ok(())
}
