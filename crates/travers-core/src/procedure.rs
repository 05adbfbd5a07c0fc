//! Procedure surface: `travers.findCoActors`

use crate::error::Result;
use crate::graph::GraphAccess;
use crate::node::{Node, NodeId, PropertyMap};
use crate::query::{Finder, RelatedNodes, RelatedQuery};
use serde::{Deserialize, Serialize};

/// Registered procedure name
pub const FIND_CO_ACTORS: &str = "travers.findCoActors";

/// Label of actor nodes
pub const PERSON: &str = "Person";

/// Property holding an actor's name
pub const NAME_KEY: &str = "name";

/// Caller-facing view of a node
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeRecord {
    pub id: NodeId,
    pub labels: Vec<String>,
    pub properties: PropertyMap,
}

impl NodeRecord {
    pub fn name(&self) -> Option<&str> {
        self.properties.get(NAME_KEY).and_then(|v| v.as_str())
    }
}

impl From<&Node> for NodeRecord {
    fn from(node: &Node) -> Self {
        Self {
            id: node.id,
            labels: node.labels.clone(),
            properties: node.properties.clone(),
        }
    }
}

/// One procedure output row: `{node: NodeRecord}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NodeWrapper {
    pub node: NodeRecord,
}

impl From<&Node> for NodeWrapper {
    fn from(node: &Node) -> Self {
        Self { node: node.into() }
    }
}

/// People within two hops of the actor named `actor_name`
pub fn co_actors_query(actor_name: &str) -> RelatedQuery {
    RelatedQuery::new(actor_name)
        .with_label(PERSON)
        .with_key(NAME_KEY)
        .with_depth(1, 2)
}

impl<'g, G> Finder<'g, G>
where
    G: GraphAccess + ?Sized + 'g,
{
    /// Traverses from the Person with the given name and returns all co-actors
    pub async fn find_co_actors(&self, actor_name: &str) -> Result<RelatedNodes<'g, G>> {
        self.find_related(&co_actors_query(actor_name)).await
    }
}

impl<'g, G> RelatedNodes<'g, G>
where
    G: GraphAccess + ?Sized + 'g,
{
    /// Pull the next node as a procedure row
    pub async fn next_row(&mut self) -> Result<Option<NodeWrapper>> {
        Ok(self.next().await?.map(|node| NodeWrapper::from(node.as_ref())))
    }

    /// Pull at most `limit` procedure rows
    pub async fn rows(mut self, limit: usize) -> Result<Vec<NodeWrapper>> {
        let mut rows = Vec::new();
        while rows.len() < limit {
            match self.next_row().await? {
                Some(row) => rows.push(row),
                None => break,
            }
        }
        Ok(rows)
    }
}
