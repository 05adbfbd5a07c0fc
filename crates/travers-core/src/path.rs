//! Paths produced during traversal

use crate::node::{Node, NodeId};
use crate::relationship::{Relationship, RelationshipId};
use std::sync::Arc;

/// An alternating sequence of nodes and relationships from a start node
///
/// Invariant: `nodes.len() == relationships.len() + 1`, so a path is never
/// empty and `relationships[i]` connects `nodes[i]` to `nodes[i + 1]`.
#[derive(Debug, Clone, PartialEq)]
pub struct Path {
    nodes: Vec<Arc<Node>>,
    relationships: Vec<Arc<Relationship>>,
}

impl Path {
    /// A zero-length path holding only the start node
    pub fn new(start: impl Into<Arc<Node>>) -> Self {
        Self {
            nodes: vec![start.into()],
            relationships: Vec::new(),
        }
    }

    /// A new path one step longer, ending at `node` via `relationship`
    pub fn extend(&self, relationship: Arc<Relationship>, node: Arc<Node>) -> Self {
        let mut nodes = Vec::with_capacity(self.nodes.len() + 1);
        nodes.extend(self.nodes.iter().cloned());
        nodes.push(node);

        let mut relationships = Vec::with_capacity(self.relationships.len() + 1);
        relationships.extend(self.relationships.iter().cloned());
        relationships.push(relationship);

        Self {
            nodes,
            relationships,
        }
    }

    pub fn start_node(&self) -> &Arc<Node> {
        &self.nodes[0]
    }

    pub fn end_node(&self) -> &Arc<Node> {
        &self.nodes[self.nodes.len() - 1]
    }

    pub fn last_relationship(&self) -> Option<&Arc<Relationship>> {
        self.relationships.last()
    }

    /// Number of relationships traversed
    pub fn length(&self) -> u32 {
        u32::try_from(self.relationships.len()).unwrap_or(u32::MAX)
    }

    pub fn nodes(&self) -> &[Arc<Node>] {
        &self.nodes
    }

    pub fn relationships(&self) -> &[Arc<Relationship>] {
        &self.relationships
    }

    pub fn contains_node(&self, id: NodeId) -> bool {
        self.nodes.iter().any(|n| n.id == id)
    }

    pub fn contains_relationship(&self, id: RelationshipId) -> bool {
        self.relationships.iter().any(|r| r.id == id)
    }
}

impl std::fmt::Display for Path {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({})", self.nodes[0].id)?;
        for (rel, pair) in self.relationships.iter().zip(self.nodes.windows(2)) {
            let (from, to) = (&pair[0], &pair[1]);
            if rel.start == from.id {
                write!(f, "-[{},{}]->({})", rel.rel_type, rel.id, to.id)?;
            } else {
                write!(f, "<-[{},{}]-({})", rel.rel_type, rel.id, to.id)?;
            }
        }
        Ok(())
    }
}
