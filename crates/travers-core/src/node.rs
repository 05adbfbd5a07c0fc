//! Node (vertex) types

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Property map shared by nodes and relationships
pub type PropertyMap = BTreeMap<String, serde_json::Value>;

/// Unique identifier for a node, assigned by the graph store
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(pub u64);

impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for NodeId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

/// A node in the graph
///
/// Nodes are owned by the graph store; the traversal only reads them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    /// Unique identifier
    pub id: NodeId,

    /// Labels (e.g. "Person", "Movie")
    #[serde(default)]
    pub labels: Vec<String>,

    /// Arbitrary properties
    #[serde(default)]
    pub properties: PropertyMap,
}

impl Node {
    /// Create a node without labels or properties
    pub fn new(id: impl Into<NodeId>) -> Self {
        Self {
            id: id.into(),
            labels: Vec::new(),
            properties: PropertyMap::new(),
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        let label = label.into();
        if !self.labels.contains(&label) {
            self.labels.push(label);
        }
        self
    }

    pub fn with_property(
        mut self,
        key: impl Into<String>,
        value: impl Into<serde_json::Value>,
    ) -> Self {
        self.properties.insert(key.into(), value.into());
        self
    }

    /// Check if node carries a specific label
    pub fn has_label(&self, label: &str) -> bool {
        self.labels.iter().any(|l| l == label)
    }

    /// Get a property value
    pub fn property(&self, key: &str) -> Option<&serde_json::Value> {
        self.properties.get(key)
    }

    /// Whether `key` is present and equal to `value`
    pub fn has_property(&self, key: &str, value: &serde_json::Value) -> bool {
        self.properties.get(key) == Some(value)
    }
}
