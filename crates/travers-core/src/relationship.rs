//! Relationship (edge) types

use crate::node::{NodeId, PropertyMap};
use serde::{Deserialize, Serialize};

/// Unique identifier for a relationship, assigned by the graph store
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RelationshipId(pub u64);

impl std::fmt::Display for RelationshipId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for RelationshipId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

/// Direction for relationship expansion
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Outgoing,
    Incoming,
    #[default]
    Both,
}

impl Direction {
    /// Whether a relationship touching `node` is followed in this direction
    pub fn matches(&self, relationship: &Relationship, node: NodeId) -> bool {
        match self {
            Direction::Outgoing => relationship.start == node,
            Direction::Incoming => relationship.end == node,
            Direction::Both => relationship.start == node || relationship.end == node,
        }
    }
}

impl std::str::FromStr for Direction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "outgoing" | "out" => Ok(Self::Outgoing),
            "incoming" | "in" => Ok(Self::Incoming),
            "both" => Ok(Self::Both),
            other => Err(format!("unknown direction: {}", other)),
        }
    }
}

/// A directed, typed relationship between two nodes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Relationship {
    /// Unique identifier
    pub id: RelationshipId,

    /// Start node
    pub start: NodeId,

    /// End node
    pub end: NodeId,

    /// Relationship type (e.g. "ACTED_IN")
    #[serde(rename = "type")]
    pub rel_type: String,

    /// Arbitrary properties
    #[serde(default)]
    pub properties: PropertyMap,
}

impl Relationship {
    pub fn new(
        id: impl Into<RelationshipId>,
        start: impl Into<NodeId>,
        end: impl Into<NodeId>,
        rel_type: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            start: start.into(),
            end: end.into(),
            rel_type: rel_type.into(),
            properties: PropertyMap::new(),
        }
    }

    pub fn with_property(
        mut self,
        key: impl Into<String>,
        value: impl Into<serde_json::Value>,
    ) -> Self {
        self.properties.insert(key.into(), value.into());
        self
    }

    /// The node on the other side of `node`, if `node` is an endpoint
    pub fn other_node(&self, node: NodeId) -> Option<NodeId> {
        if self.start == node {
            Some(self.end)
        } else if self.end == node {
            Some(self.start)
        } else {
            None
        }
    }

    /// Check if this relationship has any of the given types (empty = any)
    pub fn has_type_in(&self, types: &[String]) -> bool {
        types.is_empty() || types.iter().any(|t| *t == self.rel_type)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_other_node() {
        let rel = Relationship::new(1, 10, 20, "ACTED_IN");
        assert_eq!(rel.other_node(NodeId(10)), Some(NodeId(20)));
        assert_eq!(rel.other_node(NodeId(20)), Some(NodeId(10)));
        assert_eq!(rel.other_node(NodeId(30)), None);
    }

    #[test]
    fn test_self_loop_other_node() {
        let rel = Relationship::new(1, 5, 5, "KNOWS");
        assert_eq!(rel.other_node(NodeId(5)), Some(NodeId(5)));
    }

    #[test]
    fn test_direction_matches() {
        let rel = Relationship::new(1, 10, 20, "ACTED_IN");
        assert!(Direction::Outgoing.matches(&rel, NodeId(10)));
        assert!(!Direction::Outgoing.matches(&rel, NodeId(20)));
        assert!(Direction::Incoming.matches(&rel, NodeId(20)));
        assert!(Direction::Both.matches(&rel, NodeId(20)));
        assert_eq!("in".parse::<Direction>(), Ok(Direction::Incoming));
        assert!("sideways".parse::<Direction>().is_err());
    }

    #[test]
    fn test_type_filter() {
        let rel = Relationship::new(1, 10, 20, "ACTED_IN");
        assert!(rel.has_type_in(&[]));
        assert!(rel.has_type_in(&["DIRECTED".into(), "ACTED_IN".into()]));
        assert!(!rel.has_type_in(&["DIRECTED".into()]));
    }

    #[test]
    fn test_relationship_json_uses_type_key() {
        let rel: Relationship =
            serde_json::from_str(r#"{"id": 1, "start": 2, "end": 3, "type": "ACTED_IN"}"#)
                .unwrap();
        assert_eq!(rel.rel_type, "ACTED_IN");
        assert!(rel.properties.is_empty());
    }
}
