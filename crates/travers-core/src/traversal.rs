//! Graph traversal engine
//!
//! A [`TraversalDescription`] fixes order, uniqueness, expansion filters,
//! evaluators and observers; [`TraversalDescription::traverse`] starts a lazy
//! [`Traverser`] cursor from one node. Each pull explores only as far as the
//! next included path, so a caller that stops early never pays for the rest
//! of the graph.
//!
//! Distinct paths reaching the same node are all visited; if several qualify
//! the node is yielded once per path. Use [`Uniqueness::NodeGlobal`] to visit
//! every node at most once instead.

use crate::cancel::CancellationToken;
use crate::error::{Error, Result};
use crate::evaluator::{Evaluator, EvaluatorChain};
use crate::graph::GraphAccess;
use crate::node::{Node, NodeId};
use crate::observer::PathObserver;
use crate::path::Path;
use crate::relationship::{Direction, Relationship};
use futures::Stream;
use serde::{Deserialize, Serialize};
use std::collections::{HashSet, VecDeque};
use std::sync::Arc;

/// Expansion order
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TraversalOrder {
    /// LIFO: children of the latest path are explored before its siblings
    #[default]
    DepthFirst,
    /// FIFO: all paths of depth `n` before any of depth `n + 1`
    BreadthFirst,
}

impl std::str::FromStr for TraversalOrder {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "depth" | "depth_first" | "dfs" => Ok(Self::DepthFirst),
            "breadth" | "breadth_first" | "bfs" => Ok(Self::BreadthFirst),
            other => Err(format!("unknown traversal order: {}", other)),
        }
    }
}

/// Which repeated visits a traversal refuses
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Uniqueness {
    /// Anything goes; only the depth bound stops cycles
    None,
    /// A relationship appears at most once within a single path
    #[default]
    RelationshipPath,
    /// A node appears at most once within a single path
    NodePath,
    /// A node is visited at most once per traversal
    NodeGlobal,
}

impl std::str::FromStr for Uniqueness {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().replace('-', "_").as_str() {
            "none" => Ok(Self::None),
            "relationship_path" => Ok(Self::RelationshipPath),
            "node_path" => Ok(Self::NodePath),
            "node_global" => Ok(Self::NodeGlobal),
            other => Err(format!("unknown uniqueness: {}", other)),
        }
    }
}

/// Traversal statistics
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TraversalStats {
    pub paths_visited: usize,
    pub paths_yielded: usize,
    pub paths_pruned: usize,
    pub relationships_expanded: usize,
    pub max_depth_reached: u32,
}

/// Immutable traversal configuration
#[derive(Clone, Default)]
pub struct TraversalDescription {
    order: TraversalOrder,
    uniqueness: Uniqueness,
    direction: Direction,
    relationship_types: Vec<String>,
    evaluators: EvaluatorChain,
    observers: Vec<Arc<dyn PathObserver>>,
    cancellation: Option<CancellationToken>,
}

impl TraversalDescription {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn depth_first(mut self) -> Self {
        self.order = TraversalOrder::DepthFirst;
        self
    }

    pub fn breadth_first(mut self) -> Self {
        self.order = TraversalOrder::BreadthFirst;
        self
    }

    pub fn order(mut self, order: TraversalOrder) -> Self {
        self.order = order;
        self
    }

    pub fn uniqueness(mut self, uniqueness: Uniqueness) -> Self {
        self.uniqueness = uniqueness;
        self
    }

    pub fn direction(mut self, direction: Direction) -> Self {
        self.direction = direction;
        self
    }

    /// Only expand relationships of this type (repeatable; none = all types)
    pub fn relationship_type(mut self, rel_type: impl Into<String>) -> Self {
        self.relationship_types.push(rel_type.into());
        self
    }

    /// Replace the evaluator chain
    pub fn evaluators(mut self, chain: EvaluatorChain) -> Self {
        self.evaluators = chain;
        self
    }

    /// Append an evaluator to the current chain
    pub fn evaluator(mut self, evaluator: impl Evaluator + 'static) -> Self {
        self.evaluators.push(Arc::new(evaluator));
        self
    }

    pub fn observer(mut self, observer: Arc<dyn PathObserver>) -> Self {
        self.observers.push(observer);
        self
    }

    pub fn cancellation(mut self, token: CancellationToken) -> Self {
        self.cancellation = Some(token);
        self
    }

    pub fn chain(&self) -> &EvaluatorChain {
        &self.evaluators
    }

    /// Start a lazy traversal from `start`
    pub fn traverse<'g, G>(&self, graph: &'g G, start: impl Into<Arc<Node>>) -> Traverser<'g, G>
    where
        G: GraphAccess + ?Sized,
    {
        let start = start.into();
        tracing::debug!(
            "Starting traversal: start={}, order={:?}, uniqueness={:?}, depth={:?}",
            start.id,
            self.order,
            self.uniqueness,
            self.evaluators.depth()
        );

        let mut frontier = VecDeque::new();
        frontier.push_back(Branch::Start(start));

        Traverser {
            graph,
            description: self.clone(),
            frontier,
            pending: None,
            visited: HashSet::new(),
            state: TraverserState::Start,
            stats: TraversalStats::default(),
        }
    }
}

impl std::fmt::Debug for TraversalDescription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TraversalDescription")
            .field("order", &self.order)
            .field("uniqueness", &self.uniqueness)
            .field("direction", &self.direction)
            .field("relationship_types", &self.relationship_types)
            .field("evaluators", &self.evaluators)
            .field("observers", &self.observers.len())
            .field("cancellable", &self.cancellation.is_some())
            .finish()
    }
}

/// Lifecycle of a [`Traverser`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TraverserState {
    /// Frontier holds only the start node
    Start,
    Exploring,
    /// Frontier empty, or the traversal failed; no further paths
    Exhausted,
}

/// Unexplored frontier entry; the end node is fetched only when popped
enum Branch {
    Start(Arc<Node>),
    Step {
        parent: Arc<Path>,
        relationship: Arc<Relationship>,
        node: NodeId,
    },
}

/// Lazy cursor over the paths a traversal includes
///
/// All traversal state lives in the cursor, so it survives suspension at
/// every graph call and concurrent cursors never share anything mutable.
pub struct Traverser<'g, G: ?Sized> {
    graph: &'g G,
    description: TraversalDescription,
    frontier: VecDeque<Branch>,
    /// Included-and-continued path whose children are fetched on the next pull
    pending: Option<Arc<Path>>,
    visited: HashSet<NodeId>,
    state: TraverserState,
    stats: TraversalStats,
}

impl<'g, G> Traverser<'g, G>
where
    G: GraphAccess + ?Sized + 'g,
{
    pub fn state(&self) -> TraverserState {
        self.state
    }

    pub fn stats(&self) -> &TraversalStats {
        &self.stats
    }

    /// Pull the next included path
    ///
    /// Returns `Ok(None)` once exhausted. After an error the cursor is
    /// exhausted; paths already returned stay valid.
    pub async fn next(&mut self) -> Result<Option<Path>> {
        if self.state == TraverserState::Exhausted {
            return Ok(None);
        }
        self.state = TraverserState::Exploring;

        match self.advance().await {
            Ok(Some(path)) => Ok(Some(path)),
            Ok(None) => {
                self.exhaust();
                tracing::debug!(
                    "Traversal exhausted: visited {} paths, yielded {}, expanded {} relationships",
                    self.stats.paths_visited,
                    self.stats.paths_yielded,
                    self.stats.relationships_expanded
                );
                Ok(None)
            }
            Err(e) => {
                self.exhaust();
                tracing::debug!("Traversal aborted: {}", e);
                Err(e)
            }
        }
    }

    /// Drain the cursor
    pub async fn collect(mut self) -> Result<Vec<Path>> {
        let mut paths = Vec::new();
        while let Some(path) = self.next().await? {
            paths.push(path);
        }
        Ok(paths)
    }

    /// Adapt the cursor into a `Stream`
    pub fn into_stream(self) -> impl Stream<Item = Result<Path>> + 'g {
        futures::stream::try_unfold(self, |mut traverser| async move {
            let next = traverser.next().await?;
            Ok::<_, Error>(next.map(|path| (path, traverser)))
        })
    }

    fn exhaust(&mut self) {
        self.state = TraverserState::Exhausted;
        self.frontier.clear();
        self.pending = None;
    }

    async fn advance(&mut self) -> Result<Option<Path>> {
        loop {
            // Checked before any graph read, including the deferred expansion
            if let Some(token) = &self.description.cancellation {
                if token.is_cancelled() {
                    return Err(Error::Cancelled {
                        visited: self.stats.paths_visited,
                    });
                }
            }

            if let Some(parent) = self.pending.take() {
                self.expand(parent).await?;
            }

            let branch = match self.pop() {
                Some(branch) => branch,
                None => return Ok(None),
            };

            let path = match self.materialize(branch).await? {
                Some(path) => path,
                None => continue,
            };

            self.stats.paths_visited += 1;
            self.stats.max_depth_reached = self.stats.max_depth_reached.max(path.length());

            for observer in &self.description.observers {
                observer.on_path_visited(&path);
            }

            let evaluation = self.description.evaluators.evaluate(&path)?;

            if evaluation.continues {
                if evaluation.include {
                    self.pending = Some(Arc::new(path.clone()));
                } else {
                    self.pending = Some(Arc::new(path));
                    continue;
                }
            } else {
                self.stats.paths_pruned += 1;
                tracing::trace!("Pruned at {}", path);
                if !evaluation.include {
                    continue;
                }
            }

            self.stats.paths_yielded += 1;
            tracing::trace!("Yielding {}", path);
            return Ok(Some(path));
        }
    }

    fn pop(&mut self) -> Option<Branch> {
        match self.description.order {
            TraversalOrder::DepthFirst => self.frontier.pop_back(),
            TraversalOrder::BreadthFirst => self.frontier.pop_front(),
        }
    }

    /// Turn a frontier entry into a path, or `None` if it must be skipped
    async fn materialize(&mut self, branch: Branch) -> Result<Option<Path>> {
        match branch {
            Branch::Start(node) => {
                self.visited.insert(node.id);
                Ok(Some(Path::new(node)))
            }
            Branch::Step {
                parent,
                relationship,
                node,
            } => {
                if self.description.uniqueness == Uniqueness::NodeGlobal
                    && !self.visited.insert(node)
                {
                    return Ok(None);
                }
                match self.graph.node(node).await? {
                    Some(end) => Ok(Some(parent.extend(relationship, Arc::new(end)))),
                    None => {
                        tracing::warn!(
                            "Skipping relationship {} to missing node {}",
                            relationship.id,
                            node
                        );
                        Ok(None)
                    }
                }
            }
        }
    }

    async fn expand(&mut self, parent: Arc<Path>) -> Result<()> {
        let end = parent.end_node().id;
        let relationships = self
            .graph
            .relationships_of(end, self.description.direction)
            .await?;
        self.stats.relationships_expanded += relationships.len();

        let uniqueness = self.description.uniqueness;
        let types = &self.description.relationship_types;
        let children: Vec<Branch> = relationships
            .into_iter()
            .filter(|(rel, _)| rel.has_type_in(types))
            .filter(|(rel, other)| match uniqueness {
                Uniqueness::RelationshipPath => !parent.contains_relationship(rel.id),
                Uniqueness::NodePath => !parent.contains_node(*other),
                Uniqueness::None | Uniqueness::NodeGlobal => true,
            })
            .map(|(rel, other)| Branch::Step {
                parent: parent.clone(),
                relationship: Arc::new(rel),
                node: other,
            })
            .collect();

        match self.description.order {
            // Reversed so the first relationship the store reports is explored first
            TraversalOrder::DepthFirst => self.frontier.extend(children.into_iter().rev()),
            TraversalOrder::BreadthFirst => self.frontier.extend(children),
        }
        Ok(())
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::evaluator::{DepthRangeEvaluator, Evaluation, LabelEvaluator, LoggingEvaluator};
    use crate::node::Node;
    use crate::observer::tests::{FailingSink, RecordingSink};
    use crate::observer::PathLogger;
    use async_trait::async_trait;
    use std::collections::BTreeMap;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Minimal in-crate graph double
    #[derive(Default)]
    pub(crate) struct TestGraph {
        pub(crate) nodes: BTreeMap<NodeId, Node>,
        pub(crate) relationships: Vec<Relationship>,
        calls: AtomicUsize,
        pub(crate) fail_expanding: Option<NodeId>,
    }

    impl TestGraph {
        pub(crate) fn with_node(mut self, id: u64, label: &str, name: &str) -> Self {
            self.nodes.insert(
                NodeId(id),
                Node::new(id).with_label(label).with_property("name", name),
            );
            self
        }

        pub(crate) fn with_rel(mut self, start: u64, end: u64) -> Self {
            let id = self.relationships.len() as u64 + 100;
            self.relationships
                .push(Relationship::new(id, start, end, "ACTED_IN"));
            self
        }

        pub(crate) fn start(&self, id: u64) -> Node {
            self.nodes[&NodeId(id)].clone()
        }

        pub(crate) fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl GraphAccess for TestGraph {
        async fn find_nodes(
            &self,
            label: &str,
            key: &str,
            value: &serde_json::Value,
        ) -> Result<Vec<Node>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(self
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
        ) -> Result<Vec<(Relationship, NodeId)>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail_expanding == Some(node) {
                return Err(Error::GraphAccess("store unavailable".into()));
            }
            Ok(self
                .relationships
                .iter()
                .filter(|r| direction.matches(r, node))
                .filter_map(|r| r.other_node(node).map(|other| (r.clone(), other)))
                .collect())
        }

        async fn node(&self, id: NodeId) -> Result<Option<Node>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(self.nodes.get(&id).cloned())
        }
    }

    /// A -M- B -N- C, with people on even positions
    pub(crate) fn chain_graph() -> TestGraph {
        TestGraph::default()
            .with_node(1, "Person", "A")
            .with_node(2, "Movie", "M")
            .with_node(3, "Person", "B")
            .with_node(4, "Movie", "N")
            .with_node(5, "Person", "C")
            .with_rel(1, 2)
            .with_rel(3, 2)
            .with_rel(3, 4)
            .with_rel(5, 4)
    }

    fn names(paths: &[Path]) -> Vec<String> {
        paths
            .iter()
            .map(|p| p.end_node().property("name").unwrap().as_str().unwrap().to_string())
            .collect()
    }

    fn co_actor_description(min: u32, max: u32) -> TraversalDescription {
        TraversalDescription::new()
            .depth_first()
            .evaluators(
                EvaluatorChain::any()
                    .with(DepthRangeEvaluator::new(min, max).unwrap())
                    .with(LabelEvaluator::new("Person")),
            )
    }

    #[tokio::test]
    async fn test_depth_bounds_respected() {
        let graph = chain_graph();
        for (min, max) in [(0, 0), (0, 2), (1, 2), (2, 4), (3, 3), (0, 10)] {
            let paths = TraversalDescription::new()
                .evaluator(DepthRangeEvaluator::new(min, max).unwrap())
                .traverse(&graph, graph.start(1))
                .collect()
                .await
                .unwrap();
            assert!(!paths.is_empty() || min > 4);
            for path in &paths {
                assert!(path.length() >= min && path.length() <= max, "{}", path);
            }
        }
    }

    #[tokio::test]
    async fn test_co_actors_scenario() {
        let graph = chain_graph();
        let paths = co_actor_description(1, 2)
            .traverse(&graph, graph.start(1))
            .collect()
            .await
            .unwrap();

        assert_eq!(names(&paths), vec!["B"]);
        assert_eq!(paths[0].length(), 2);
    }

    #[tokio::test]
    async fn test_no_match_is_empty_not_error() {
        let graph = TestGraph::default()
            .with_node(1, "Person", "A")
            .with_node(2, "Movie", "M")
            .with_rel(1, 2);
        let paths = co_actor_description(1, 2)
            .traverse(&graph, graph.start(1))
            .collect()
            .await
            .unwrap();
        assert!(paths.is_empty());
    }

    #[tokio::test]
    async fn test_isolated_start_node() {
        let graph = TestGraph::default().with_node(1, "Person", "A");
        let mut traverser = co_actor_description(1, 2).traverse(&graph, graph.start(1));
        assert_eq!(traverser.state(), TraverserState::Start);
        assert!(traverser.next().await.unwrap().is_none());
        assert_eq!(traverser.state(), TraverserState::Exhausted);
        assert!(traverser.next().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_duplicates_via_distinct_paths() {
        // A acted in M1 and M2 with B
        let graph = TestGraph::default()
            .with_node(1, "Person", "A")
            .with_node(2, "Movie", "M1")
            .with_node(3, "Movie", "M2")
            .with_node(4, "Person", "B")
            .with_rel(1, 2)
            .with_rel(1, 3)
            .with_rel(4, 2)
            .with_rel(4, 3);
        let paths = co_actor_description(1, 2)
            .traverse(&graph, graph.start(1))
            .collect()
            .await
            .unwrap();
        assert_eq!(names(&paths), vec!["B", "B"]);

        let unique = co_actor_description(1, 2)
            .uniqueness(Uniqueness::NodeGlobal)
            .traverse(&graph, graph.start(1))
            .collect()
            .await
            .unwrap();
        assert_eq!(names(&unique), vec!["B"]);
    }

    #[tokio::test]
    async fn test_depth_first_order() {
        // Root 1 with children 2 and 3; 2 has child 4
        let graph = TestGraph::default()
            .with_node(1, "Person", "root")
            .with_node(2, "Person", "left")
            .with_node(3, "Person", "right")
            .with_node(4, "Person", "left-child")
            .with_rel(1, 2)
            .with_rel(1, 3)
            .with_rel(2, 4);
        let dfs = TraversalDescription::new()
            .depth_first()
            .traverse(&graph, graph.start(1))
            .collect()
            .await
            .unwrap();
        assert_eq!(names(&dfs), vec!["root", "left", "left-child", "right"]);

        let bfs = TraversalDescription::new()
            .breadth_first()
            .traverse(&graph, graph.start(1))
            .collect()
            .await
            .unwrap();
        assert_eq!(names(&bfs), vec!["root", "left", "right", "left-child"]);
    }

    #[tokio::test]
    async fn test_path_length_grows_by_one() {
        let graph = chain_graph();
        let paths = TraversalDescription::new()
            .traverse(&graph, graph.start(1))
            .collect()
            .await
            .unwrap();
        assert_eq!(paths.len(), 5);
        for path in &paths {
            assert_eq!(path.nodes().len(), path.relationships().len() + 1);
            for (rel, pair) in path.relationships().iter().zip(path.nodes().windows(2)) {
                assert_eq!(rel.other_node(pair[0].id), Some(pair[1].id));
            }
        }
    }

    #[tokio::test]
    async fn test_prune_stops_expansion() {
        let graph = chain_graph();
        let paths = TraversalDescription::new()
            .evaluator(|path: &Path| -> Result<Evaluation> {
                if path.end_node().has_label("Movie") {
                    Ok(Evaluation::INCLUDE_AND_PRUNE)
                } else {
                    Ok(Evaluation::EXCLUDE_AND_CONTINUE)
                }
            })
            .traverse(&graph, graph.start(1))
            .collect()
            .await
            .unwrap();
        assert_eq!(names(&paths), vec!["M"]);
    }

    #[tokio::test]
    async fn test_early_termination() {
        // One movie with fifty actors
        let mut graph = TestGraph::default()
            .with_node(1, "Person", "A")
            .with_node(2, "Movie", "M")
            .with_rel(1, 2);
        for id in 3..53 {
            graph = graph.with_node(id, "Person", &format!("P{}", id)).with_rel(id, 2);
        }
        let total = graph.nodes.len() + graph.relationships.len();

        let mut traverser = co_actor_description(1, 2).traverse(&graph, graph.start(1));
        let first = traverser.next().await.unwrap();
        assert!(first.is_some());
        assert!(graph.calls() < total, "{} calls", graph.calls());
        assert!(graph.calls() <= 5);
    }

    #[tokio::test]
    async fn test_graph_error_aborts_after_yielded_paths() {
        let mut graph = chain_graph();
        graph.fail_expanding = Some(NodeId(3));

        let mut traverser = TraversalDescription::new().traverse(&graph, graph.start(1));
        let mut yielded = Vec::new();
        let err = loop {
            match traverser.next().await {
                Ok(Some(path)) => yielded.push(path),
                Ok(None) => panic!("expected failure"),
                Err(e) => break e,
            }
        };

        assert!(matches!(err, Error::GraphAccess(_)));
        assert_eq!(names(&yielded), vec!["A", "M", "B"]);
        assert_eq!(traverser.state(), TraverserState::Exhausted);
        assert!(traverser.next().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_evaluator_error_aborts() {
        let graph = chain_graph();
        let result = TraversalDescription::new()
            .evaluator(|path: &Path| -> Result<Evaluation> {
                if path.length() == 2 {
                    Err(Error::Evaluator("bad path".into()))
                } else {
                    Ok(Evaluation::INCLUDE_AND_CONTINUE)
                }
            })
            .traverse(&graph, graph.start(1))
            .collect()
            .await;
        assert!(matches!(result, Err(Error::Evaluator(_))));
    }

    #[tokio::test]
    async fn test_cancellation() {
        let graph = chain_graph();
        let token = CancellationToken::new();
        let mut traverser = TraversalDescription::new()
            .cancellation(token.clone())
            .traverse(&graph, graph.start(1));

        assert!(traverser.next().await.unwrap().is_some());
        token.cancel();
        assert!(matches!(
            traverser.next().await,
            Err(Error::Cancelled { visited: 1 })
        ));
        assert!(traverser.next().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_cancelled_between_pulls_reads_nothing() {
        let graph = chain_graph();
        let token = CancellationToken::new();
        let mut traverser = TraversalDescription::new()
            .cancellation(token.clone())
            .traverse(&graph, graph.start(1));

        assert!(traverser.next().await.unwrap().is_some());
        let calls = graph.calls();
        token.cancel();
        assert!(matches!(
            traverser.next().await,
            Err(Error::Cancelled { visited: 1 })
        ));
        assert_eq!(graph.calls(), calls);
    }

    #[tokio::test]
    async fn test_cancelled_with_only_pending_expansion_left() {
        // Isolated start: after it is yielded only its expansion remains
        let graph = TestGraph::default().with_node(1, "Person", "A");
        let token = CancellationToken::new();
        let mut traverser = TraversalDescription::new()
            .cancellation(token.clone())
            .traverse(&graph, graph.start(1));

        assert!(traverser.next().await.unwrap().is_some());
        token.cancel();
        assert!(matches!(
            traverser.next().await,
            Err(Error::Cancelled { visited: 1 })
        ));
        assert_eq!(graph.calls(), 0);
    }

    #[tokio::test]
    async fn test_logging_evaluator_does_not_change_results() {
        let graph = chain_graph();
        let sink = Arc::new(RecordingSink::default());
        let logger = || LoggingEvaluator::new(PathLogger::new(sink.clone()));

        let chains = [
            (
                EvaluatorChain::all()
                    .with(DepthRangeEvaluator::new(1, 2).unwrap())
                    .with(LabelEvaluator::new("Person")),
                EvaluatorChain::all()
                    .with(DepthRangeEvaluator::new(1, 2).unwrap())
                    .with(LabelEvaluator::new("Person"))
                    .with(logger()),
            ),
            (
                EvaluatorChain::any().with(DepthRangeEvaluator::new(1, 2).unwrap()),
                EvaluatorChain::any()
                    .with(DepthRangeEvaluator::new(1, 2).unwrap())
                    .with(logger()),
            ),
        ];

        for (plain, logged) in chains {
            let expected = TraversalDescription::new()
                .evaluators(plain)
                .traverse(&graph, graph.start(1))
                .collect()
                .await
                .unwrap();
            let actual = TraversalDescription::new()
                .evaluators(logged)
                .traverse(&graph, graph.start(1))
                .collect()
                .await
                .unwrap();
            assert!(!expected.is_empty());
            assert_eq!(names(&actual), names(&expected));
        }
        assert!(!sink.messages().is_empty());
    }

    #[tokio::test]
    async fn test_failing_log_sink_does_not_abort() {
        let graph = chain_graph();
        let expected = co_actor_description(1, 4)
            .traverse(&graph, graph.start(1))
            .collect()
            .await
            .unwrap();

        let mut traverser = co_actor_description(1, 4)
            .observer(Arc::new(PathLogger::new(Arc::new(FailingSink))))
            .traverse(&graph, graph.start(1));
        let mut actual = Vec::new();
        while let Some(path) = traverser.next().await.unwrap() {
            actual.push(path);
        }

        assert_eq!(names(&actual), names(&expected));
        assert_eq!(names(&actual), vec!["B", "C"]);
        assert_eq!(traverser.state(), TraverserState::Exhausted);
    }

    #[tokio::test]
    async fn test_observer_sees_every_visited_path() {
        let graph = chain_graph();
        let sink = Arc::new(RecordingSink::default());
        let mut traverser = co_actor_description(1, 2)
            .observer(Arc::new(PathLogger::new(sink.clone())))
            .traverse(&graph, graph.start(1));
        while traverser.next().await.unwrap().is_some() {}

        // A, A-M, A-M-B: one record each, regardless of inclusion
        assert_eq!(sink.messages().len(), traverser.stats().paths_visited);
        assert_eq!(sink.messages().len(), 3);
        assert_eq!(sink.messages()[0], "(1)");
    }

    #[tokio::test]
    async fn test_relationship_type_and_direction_filters() {
        let mut graph = chain_graph();
        graph
            .relationships
            .push(Relationship::new(999, 1, 5, "KNOWS"));

        let known = TraversalDescription::new()
            .relationship_type("KNOWS")
            .traverse(&graph, graph.start(1))
            .collect()
            .await
            .unwrap();
        assert_eq!(names(&known), vec!["A", "C"]);

        let incoming = TraversalDescription::new()
            .direction(Direction::Incoming)
            .traverse(&graph, graph.start(1))
            .collect()
            .await
            .unwrap();
        assert_eq!(names(&incoming), vec!["A"]);
    }

    #[tokio::test]
    async fn test_idempotent() {
        let graph = chain_graph();
        let description = co_actor_description(0, 4);
        let first = description.traverse(&graph, graph.start(1)).collect().await.unwrap();
        let second = description.traverse(&graph, graph.start(1)).collect().await.unwrap();
        assert_eq!(names(&first), names(&second));
    }

    #[tokio::test]
    async fn test_into_stream() {
        use futures::TryStreamExt;

        let graph = chain_graph();
        let paths: Vec<Path> = co_actor_description(0, 4)
            .traverse(&graph, graph.start(1))
            .into_stream()
            .try_collect()
            .await
            .unwrap();
        assert_eq!(names(&paths), vec!["A", "B", "C"]);
    }
}
