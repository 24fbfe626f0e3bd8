//! Hash based (key, value) -> node property index

use crate::graph::{NodeId, PropertyValue};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// How the index treats a property value that gets overwritten
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IndexMode {
    /// Append-only: every (key, value) a node ever held keeps its entry,
    /// and setting the same value twice records the node twice.
    #[default]
    History,
    /// Strict: a node is listed only under its current value, at most once.
    Current,
}

/// Index from property key and value to the nodes holding that pair
#[derive(Debug, Clone, Default)]
pub struct PropertyIndex {
    /// Key -> Value -> NodeIds in insertion order
    index: HashMap<String, HashMap<PropertyValue, Vec<NodeId>>>,
    mode: IndexMode,
}

impl PropertyIndex {
    pub fn new(mode: IndexMode) -> Self {
        Self {
            index: HashMap::new(),
            mode,
        }
    }

    pub fn mode(&self) -> IndexMode {
        self.mode
    }

    /// Record that `node_id` now holds `key = value`
    ///
    /// `previous` is the value the node held for `key` before this write;
    /// only `Current` mode looks at it.
    pub fn insert(
        &mut self,
        key: &str,
        value: PropertyValue,
        node_id: NodeId,
        previous: Option<&PropertyValue>,
    ) {
        if self.mode == IndexMode::Current {
            if let Some(old) = previous {
                if old == &value {
                    return;
                }
                self.retract(key, old, &node_id);
            }
        }

        self.index
            .entry(key.to_string())
            .or_default()
            .entry(value)
            .or_default()
            .push(node_id);
    }

    /// Remove every entry for `node_id` under `key = value`
    pub fn retract(&mut self, key: &str, value: &PropertyValue, node_id: &NodeId) {
        if let Some(values) = self.index.get_mut(key) {
            if let Some(nodes) = values.get_mut(value) {
                nodes.retain(|id| id != node_id);
                if nodes.is_empty() {
                    values.remove(value);
                }
            }
            if values.is_empty() {
                self.index.remove(key);
            }
        }
    }

    /// Nodes recorded under `key = value`, in the order they were indexed
    pub fn get(&self, key: &str, value: &PropertyValue) -> &[NodeId] {
        self.index
            .get(key)
            .and_then(|values| values.get(value))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Property keys that have at least one entry
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.index.keys().map(String::as_str)
    }

    /// Total number of recorded (key, value, node) entries
    pub fn entry_count(&self) -> usize {
        self.index
            .values()
            .flat_map(|values| values.values())
            .map(Vec::len)
            .sum()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }
}
