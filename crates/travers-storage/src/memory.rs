//! In-memory graph backend

use crate::error::{StorageError, StorageResult};
use async_trait::async_trait;
use std::collections::{BTreeMap, HashMap};
use std::sync::{RwLock, RwLockReadGuard};
use travers_core::{Direction, GraphAccess, Node, NodeId, Relationship, RelationshipId};

#[derive(Default)]
struct GraphData {
    nodes: BTreeMap<NodeId, Node>,
    relationships: BTreeMap<RelationshipId, Relationship>,
    /// Incident relationships per node, in insertion order
    adjacency: HashMap<NodeId, Vec<RelationshipId>>,
}

/// In-memory graph store
///
/// Reads take a shared lock, so any number of traversals may run
/// concurrently. Nodes are enumerated in id order.
pub struct MemoryGraph {
    data: RwLock<GraphData>,
}

impl MemoryGraph {
    pub fn new() -> Self {
        Self {
            data: RwLock::new(GraphData::default()),
        }
    }

    fn read(&self) -> StorageResult<RwLockReadGuard<'_, GraphData>> {
        self.data
            .read()
            .map_err(|e| StorageError::Database(format!("Lock error: {}", e)))
    }

    /// Load a node
    pub fn add_node(&self, node: Node) -> StorageResult<()> {
        let mut data = self
            .data
            .write()
            .map_err(|e| StorageError::Database(format!("Lock error: {}", e)))?;
        if data.nodes.contains_key(&node.id) {
            return Err(StorageError::DuplicateNode(node.id));
        }
        data.adjacency.entry(node.id).or_default();
        data.nodes.insert(node.id, node);
        Ok(())
    }

    /// Load a relationship; both endpoints must already be present
    pub fn add_relationship(&self, relationship: Relationship) -> StorageResult<()> {
        let mut data = self
            .data
            .write()
            .map_err(|e| StorageError::Database(format!("Lock error: {}", e)))?;
        if data.relationships.contains_key(&relationship.id) {
            return Err(StorageError::DuplicateRelationship(relationship.id));
        }
        for endpoint in [relationship.start, relationship.end] {
            if !data.nodes.contains_key(&endpoint) {
                return Err(StorageError::DanglingRelationship {
                    relationship: relationship.id,
                    node: endpoint,
                });
            }
        }

        data.adjacency
            .entry(relationship.start)
            .or_default()
            .push(relationship.id);
        if relationship.end != relationship.start {
            data.adjacency
                .entry(relationship.end)
                .or_default()
                .push(relationship.id);
        }
        data.relationships.insert(relationship.id, relationship);
        Ok(())
    }

    pub fn node_count(&self) -> StorageResult<usize> {
        Ok(self.read()?.nodes.len())
    }

    pub fn relationship_count(&self) -> StorageResult<usize> {
        Ok(self.read()?.relationships.len())
    }

    pub fn nodes(&self) -> StorageResult<Vec<Node>> {
        Ok(self.read()?.nodes.values().cloned().collect())
    }

    pub fn relationships(&self) -> StorageResult<Vec<Relationship>> {
        Ok(self.read()?.relationships.values().cloned().collect())
    }
}

impl Default for MemoryGraph {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl GraphAccess for MemoryGraph {
    async fn find_nodes(
        &self,
        label: &str,
        key: &str,
        value: &serde_json::Value,
    ) -> travers_core::Result<Vec<Node>> {
        let data = self.read()?;
        Ok(data
            .nodes
            .values()
            .filter(|n| n.has_label(label) && n.has_property(key, value))
            .cloned()
            .collect())
    }

    async fn relationships_of(
        &self,
        node: NodeId,
        direction: Direction,
    ) -> travers_core::Result<Vec<(Relationship, NodeId)>> {
        let data = self.read()?;
        let ids = match data.adjacency.get(&node) {
            Some(ids) => ids,
            None => return Ok(Vec::new()),
        };
        Ok(ids
            .iter()
            .filter_map(|id| data.relationships.get(id))
            .filter(|rel| direction.matches(rel, node))
            .filter_map(|rel| rel.other_node(node).map(|other| (rel.clone(), other)))
            .collect())
    }

    async fn node(&self, id: NodeId) -> travers_core::Result<Option<Node>> {
        Ok(self.read()?.nodes.get(&id).cloned())
    }
}
