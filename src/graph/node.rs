//! Node implementation for the property graph

use super::property::{fmt_properties, PropertyMap, PropertyValue};
use super::types::{Label, NodeId};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A node in the property graph
///
/// Nodes have:
/// - An externally supplied, unique ID
/// - A single label
/// - Properties (key-value pairs, insertion ordered)
///
/// Property writes go through [`GraphStore::set_node_property`] so the
/// property index stays in step; a `Node` is only handed out by shared
/// reference.
///
/// [`GraphStore::set_node_property`]: super::GraphStore::set_node_property
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Node {
    /// Unique identifier for this node
    pub id: NodeId,

    /// Category of this node
    pub label: Label,

    /// Properties associated with this node
    pub properties: PropertyMap,
}

impl Node {
    /// Create a new node with an empty property set
    pub fn new(id: impl Into<NodeId>, label: impl Into<Label>) -> Self {
        Node {
            id: id.into(),
            label: label.into(),
            properties: PropertyMap::new(),
        }
    }

    /// Set a property value, returning the value it replaced
    pub(crate) fn set_property(
        &mut self,
        key: impl Into<String>,
        value: impl Into<PropertyValue>,
    ) -> Option<PropertyValue> {
        self.properties.insert(key.into(), value.into())
    }

    /// Get a property value
    pub fn get_property(&self, key: &str) -> Option<&PropertyValue> {
        self.properties.get(key)
    }

    /// Check if property exists
    pub fn has_property(&self, key: &str) -> bool {
        self.properties.contains_key(key)
    }

    /// Check if node carries a specific label
    pub fn has_label(&self, label: &Label) -> bool {
        &self.label == label
    }

    /// Get number of properties
    pub fn property_count(&self) -> usize {
        self.properties.len()
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Node(id={}, label={}, properties=", self.id, self.label)?;
        fmt_properties(&self.properties, f)?;
        write!(f, ")")
    }
}

impl PartialEq for Node {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Node {}

impl std::hash::Hash for Node {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_node() {
        let node = Node::new("1", "Person");
        assert_eq!(node.id, NodeId::new("1"));
        assert!(node.has_label(&Label::new("Person")));
        assert_eq!(node.property_count(), 0);
    }

    #[test]
    fn test_node_properties() {
        let mut node = Node::new("4", "Person");

        assert!(node.set_property("name", "Alice").is_none());
        node.set_property("age", 30i64);
        node.set_property("active", true);

        assert_eq!(node.get_property("name").unwrap().as_string(), Some("Alice"));
        assert_eq!(node.get_property("age").unwrap().as_integer(), Some(30));
        assert_eq!(node.get_property("active").unwrap().as_boolean(), Some(true));
        assert_eq!(node.property_count(), 3);

        // Overwrite hands back the previous value
        let old = node.set_property("name", "Alicia");
        assert_eq!(old, Some(PropertyValue::from("Alice")));
        assert_eq!(node.property_count(), 3);
        assert!(!node.has_property("email"));
    }

    #[test]
    fn test_node_display() {
        let mut node = Node::new("1", "Person");
        assert_eq!(node.to_string(), "Node(id=1, label=Person, properties={})");

        node.set_property("name", "Alice");
        node.set_property("age", 30i64);
        assert_eq!(
            node.to_string(),
            "Node(id=1, label=Person, properties={name: \"Alice\", age: 30})"
        );
    }

    #[test]
    fn test_node_equality() {
        let node1 = Node::new("7", "Person");
        let node2 = Node::new("7", "Company");
        let node3 = Node::new("8", "Person");

        assert_eq!(node1, node2); // Same ID
        assert_ne!(node1, node3); // Different ID
    }
}
