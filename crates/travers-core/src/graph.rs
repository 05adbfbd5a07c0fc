//! Read-only graph access trait

use crate::error::Result;
use crate::node::{Node, NodeId};
use crate::relationship::{Direction, Relationship};
use async_trait::async_trait;
use std::sync::Arc;

/// Read-only view of a graph store
///
/// All backends implement this trait. Implementations must be safe under
/// concurrent reads; the traversal never writes. "No matches" is an empty
/// `Vec`, never an error.
#[async_trait]
pub trait GraphAccess: Send + Sync {
    /// All nodes carrying `label` whose property `key` equals `value`, in store order
    async fn find_nodes(
        &self,
        label: &str,
        key: &str,
        value: &serde_json::Value,
    ) -> Result<Vec<Node>>;

    /// Relationships incident to `node` in `direction`, each paired with the
    /// node on the other side
    async fn relationships_of(
        &self,
        node: NodeId,
        direction: Direction,
    ) -> Result<Vec<(Relationship, NodeId)>>;

    /// Get a node by id
    async fn node(&self, id: NodeId) -> Result<Option<Node>>;
}

#[async_trait]
impl<G: GraphAccess + ?Sized> GraphAccess for Arc<G> {
    async fn find_nodes(
        &self,
        label: &str,
        key: &str,
        value: &serde_json::Value,
    ) -> Result<Vec<Node>> {
        (**self).find_nodes(label, key, value).await
    }

    async fn relationships_of(
        &self,
        node: NodeId,
        direction: Direction,
    ) -> Result<Vec<(Relationship, NodeId)>> {
        (**self).relationships_of(node, direction).await
    }

    async fn node(&self, id: NodeId) -> Result<Option<Node>> {
        (**self).node(id).await
    }
}
