//! JSON graph fixtures

use crate::error::StorageResult;
use crate::memory::MemoryGraph;
use serde::{Deserialize, Serialize};
use std::path::Path;
use travers_core::{Node, Relationship};

/// Serialized graph: `{ "nodes": [...], "relationships": [...] }`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GraphFixture {
    #[serde(default)]
    pub nodes: Vec<Node>,

    #[serde(default)]
    pub relationships: Vec<Relationship>,
}

impl GraphFixture {
    pub fn from_json(json: &str) -> StorageResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load(path: impl AsRef<Path>) -> StorageResult<Self> {
        let path = path.as_ref();
        tracing::debug!("Loading graph fixture from {:?}", path);
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    pub fn save(&self, path: impl AsRef<Path>) -> StorageResult<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }
}

impl MemoryGraph {
    /// Build a graph from a fixture, nodes first
    pub fn from_fixture(fixture: GraphFixture) -> StorageResult<Self> {
        let graph = MemoryGraph::new();
        let (nodes, relationships) = (fixture.nodes.len(), fixture.relationships.len());
        for node in fixture.nodes {
            graph.add_node(node)?;
        }
        for relationship in fixture.relationships {
            graph.add_relationship(relationship)?;
        }
        tracing::debug!(
            "Loaded {} nodes and {} relationships",
            nodes,
            relationships
        );
        Ok(graph)
    }

    /// Load a graph from a JSON fixture file
    pub fn load_json(path: impl AsRef<Path>) -> StorageResult<Self> {
        Self::from_fixture(GraphFixture::load(path)?)
    }

    pub fn to_fixture(&self) -> StorageResult<GraphFixture> {
        Ok(GraphFixture {
            nodes: self.nodes()?,
            relationships: self.relationships()?,
        })
    }
}
