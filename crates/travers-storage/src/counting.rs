//! Call-counting decorator for any graph backend

use async_trait::async_trait;
use serde::Serialize;
use std::sync::atomic::{AtomicUsize, Ordering};
use travers_core::{Direction, GraphAccess, Node, NodeId, Relationship};

/// Snapshot of backend calls made through a [`CountingGraph`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CallCounts {
    pub find_nodes: usize,
    pub relationships_of: usize,
    pub node: usize,
}

impl CallCounts {
    pub fn total(&self) -> usize {
        self.find_nodes + self.relationships_of + self.node
    }
}

/// Wraps a backend and counts every read issued against it
pub struct CountingGraph<G> {
    inner: G,
    find_nodes: AtomicUsize,
    relationships_of: AtomicUsize,
    node: AtomicUsize,
}

impl<G> CountingGraph<G> {
    pub fn new(inner: G) -> Self {
        Self {
            inner,
            find_nodes: AtomicUsize::new(0),
            relationships_of: AtomicUsize::new(0),
            node: AtomicUsize::new(0),
        }
    }

    pub fn inner(&self) -> &G {
        &self.inner
    }

    pub fn counts(&self) -> CallCounts {
        CallCounts {
            find_nodes: self.find_nodes.load(Ordering::Relaxed),
            relationships_of: self.relationships_of.load(Ordering::Relaxed),
            node: self.node.load(Ordering::Relaxed),
        }
    }

    pub fn reset(&self) {
        self.find_nodes.store(0, Ordering::Relaxed);
        self.relationships_of.store(0, Ordering::Relaxed);
        self.node.store(0, Ordering::Relaxed);
    }
}

#[async_trait]
impl<G: GraphAccess> GraphAccess for CountingGraph<G> {
    async fn find_nodes(
        &self,
        label: &str,
        key: &str,
        value: &serde_json::Value,
    ) -> travers_core::Result<Vec<Node>> {
        self.find_nodes.fetch_add(1, Ordering::Relaxed);
        self.inner.find_nodes(label, key, value).await
    }

    async fn relationships_of(
        &self,
        node: NodeId,
        direction: Direction,
    ) -> travers_core::Result<Vec<(Relationship, NodeId)>> {
        self.relationships_of.fetch_add(1, Ordering::Relaxed);
        self.inner.relationships_of(node, direction).await
    }

    async fn node(&self, id: NodeId) -> travers_core::Result<Option<Node>> {
        self.node.fetch_add(1, Ordering::Relaxed);
        self.inner.node(id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::MemoryGraph;
    use std::sync::Arc;
    use travers_core::{Finder, RelatedQuery};

    /// One movie with `actors` people in its cast, plus the start actor
    fn big_cast(actors: u64) -> MemoryGraph {
        let graph = MemoryGraph::new();
        graph
            .add_node(Node::new(0).with_label("Person").with_property("name", "Lead"))
            .unwrap();
        graph
            .add_node(Node::new(1).with_label("Movie").with_property("title", "Epic"))
            .unwrap();
        graph
            .add_relationship(Relationship::new(0, 0, 1, "ACTED_IN"))
            .unwrap();
        for i in 0..actors {
            let id = i + 2;
            graph
                .add_node(
                    Node::new(id)
                        .with_label("Person")
                        .with_property("name", format!("Extra {}", i)),
                )
                .unwrap();
            graph
                .add_relationship(Relationship::new(id, id, 1, "ACTED_IN"))
                .unwrap();
        }
        graph
    }

    #[tokio::test]
    async fn test_first_result_does_not_explore_whole_graph() {
        let graph = CountingGraph::new(big_cast(200));
        let size = graph.inner().node_count().unwrap();

        let mut related = Finder::new(&graph)
            .without_logging()
            .find_co_actors("Lead")
            .await
            .unwrap();
        assert!(related.next().await.unwrap().is_some());

        let counts = graph.counts();
        assert!(counts.total() < size, "{:?}", counts);
        assert_eq!(counts.find_nodes, 1);
        assert_eq!(counts.relationships_of, 2);
        assert_eq!(counts.node, 2);
    }

    #[tokio::test]
    async fn test_full_drain_visits_every_extra() {
        let graph = CountingGraph::new(big_cast(20));
        let rows = Finder::new(&graph)
            .without_logging()
            .find_co_actors("Lead")
            .await
            .unwrap()
            .rows(usize::MAX)
            .await
            .unwrap();
        assert_eq!(rows.len(), 20);
        assert_eq!(graph.counts().node, 21);

        graph.reset();
        assert_eq!(graph.counts(), CallCounts::default());
    }

    #[tokio::test]
    async fn test_concurrent_traversals_share_graph() {
        let graph = Arc::new(big_cast(30));
        let runs = (0..8).map(|_| {
            let graph = graph.clone();
            async move {
                Finder::new(graph.as_ref())
                    .without_logging()
                    .find_related(&RelatedQuery::new("Lead"))
                    .await?
                    .collect()
                    .await
            }
        });

        let results = spawn_all(runs).await;
        for result in results {
            assert_eq!(result.unwrap().len(), 30);
        }
    }

    async fn spawn_all<F, T>(futures: impl IntoIterator<Item = F>) -> Vec<T>
    where
        F: std::future::Future<Output = T> + Send + 'static,
        T: Send + 'static,
    {
        let handles: Vec<_> = futures.into_iter().map(tokio::spawn).collect();
        let mut results = Vec::new();
        for handle in handles {
            results.push(handle.await.unwrap());
        }
        results
    }
}
