//! Query façade: resolve a start node, configure the engine, stream matches

use crate::cancel::CancellationToken;
use crate::error::{Error, Result};
use crate::evaluator::{DepthRangeEvaluator, EvaluatorChain, LabelEvaluator};
use crate::graph::GraphAccess;
use crate::limits::{
    validate_label, validate_property_key, validate_relationship_types,
    validate_traversal_depth,
};
use crate::node::Node;
use crate::observer::{PathLogger, PathObserver};
use crate::relationship::Direction;
use crate::traversal::{
    TraversalDescription, TraversalOrder, TraversalStats, Traverser, Uniqueness,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// How to pick the start node when several match the lookup
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StartSelection {
    /// First node in store order (not guaranteed stable across stores)
    #[default]
    First,
    /// Node with the lowest id
    LowestId,
}

/// Related-node query (follows the TraversalDescription builder pattern)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RelatedQuery {
    /// Property value identifying the start node
    pub start: serde_json::Value,

    /// Label the start node must carry (None = same as `label`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_label: Option<String>,

    /// Property key matched against `start`
    #[serde(default = "default_key")]
    pub key: String,

    /// Label result nodes must carry
    #[serde(default = "default_label")]
    pub label: String,

    /// Minimum path length of a result
    #[serde(default = "default_min_depth")]
    pub min_depth: u32,

    /// Maximum path length of a result
    #[serde(default = "default_max_depth")]
    pub max_depth: u32,

    #[serde(default)]
    pub direction: Direction,

    /// Relationship types to follow (empty = all types)
    #[serde(default)]
    pub relationship_types: Vec<String>,

    #[serde(default)]
    pub order: TraversalOrder,

    #[serde(default)]
    pub uniqueness: Uniqueness,

    #[serde(default)]
    pub start_selection: StartSelection,
}

fn default_key() -> String {
    "name".to_string()
}

fn default_label() -> String {
    "Person".to_string()
}

fn default_min_depth() -> u32 {
    1
}

fn default_max_depth() -> u32 {
    2
}

impl RelatedQuery {
    /// Query starting from the node whose `name` equals `start`
    pub fn new(start: impl Into<serde_json::Value>) -> Self {
        Self {
            start: start.into(),
            start_label: None,
            key: default_key(),
            label: default_label(),
            min_depth: default_min_depth(),
            max_depth: default_max_depth(),
            direction: Direction::default(),
            relationship_types: Vec::new(),
            order: TraversalOrder::default(),
            uniqueness: Uniqueness::default(),
            start_selection: StartSelection::default(),
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    pub fn with_start_label(mut self, label: impl Into<String>) -> Self {
        self.start_label = Some(label.into());
        self
    }

    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = key.into();
        self
    }

    pub fn with_depth(mut self, min: u32, max: u32) -> Self {
        self.min_depth = min;
        self.max_depth = max;
        self
    }

    pub fn with_direction(mut self, direction: Direction) -> Self {
        self.direction = direction;
        self
    }

    pub fn with_relationship_type(mut self, rel_type: impl Into<String>) -> Self {
        self.relationship_types.push(rel_type.into());
        self
    }

    pub fn with_order(mut self, order: TraversalOrder) -> Self {
        self.order = order;
        self
    }

    pub fn with_uniqueness(mut self, uniqueness: Uniqueness) -> Self {
        self.uniqueness = uniqueness;
        self
    }

    pub fn with_start_selection(mut self, selection: StartSelection) -> Self {
        self.start_selection = selection;
        self
    }

    /// Label used for the start lookup
    pub fn start_label(&self) -> &str {
        self.start_label.as_deref().unwrap_or(&self.label)
    }

    pub fn validate(&self) -> Result<()> {
        validate_label(&self.label)?;
        validate_label(self.start_label())?;
        validate_property_key(&self.key)?;
        validate_traversal_depth(self.max_depth)?;
        validate_relationship_types(&self.relationship_types)?;
        Ok(())
    }

    /// Engine configuration: depth range OR-composed with the label filter
    pub fn description(&self) -> Result<TraversalDescription> {
        let chain = EvaluatorChain::any()
            .with(DepthRangeEvaluator::new(self.min_depth, self.max_depth)?)
            .with(LabelEvaluator::new(&self.label));

        let mut description = TraversalDescription::new()
            .order(self.order)
            .uniqueness(self.uniqueness)
            .direction(self.direction)
            .evaluators(chain);
        for rel_type in &self.relationship_types {
            description = description.relationship_type(rel_type);
        }
        Ok(description)
    }
}

/// Entry point for related-node queries against one graph
///
/// Every visited path is logged through a [`PathLogger`] unless disabled.
pub struct Finder<'g, G: ?Sized> {
    graph: &'g G,
    logger: Option<PathLogger>,
    observers: Vec<Arc<dyn PathObserver>>,
    cancellation: Option<CancellationToken>,
}

impl<'g, G> Finder<'g, G>
where
    G: GraphAccess + ?Sized + 'g,
{
    pub fn new(graph: &'g G) -> Self {
        Self {
            graph,
            logger: Some(PathLogger::default()),
            observers: Vec::new(),
            cancellation: None,
        }
    }

    pub fn with_logger(mut self, logger: PathLogger) -> Self {
        self.logger = Some(logger);
        self
    }

    pub fn without_logging(mut self) -> Self {
        self.logger = None;
        self
    }

    pub fn with_observer(mut self, observer: Arc<dyn PathObserver>) -> Self {
        self.observers.push(observer);
        self
    }

    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancellation = Some(token);
        self
    }

    /// Resolve the start node of `query`
    pub async fn find_start(&self, query: &RelatedQuery) -> Result<Node> {
        let label = query.start_label();
        let candidates = self.graph.find_nodes(label, &query.key, &query.start).await?;
        if candidates.len() > 1 {
            tracing::debug!(
                "{} nodes match :{}({} = {}), selecting by {:?}",
                candidates.len(),
                label,
                query.key,
                query.start,
                query.start_selection
            );
        }

        let start = match query.start_selection {
            StartSelection::First => candidates.into_iter().next(),
            StartSelection::LowestId => candidates.into_iter().min_by_key(|n| n.id),
        };
        start.ok_or_else(|| Error::not_found(label, &query.key, &query.start))
    }

    /// Lazily find nodes related to the start node of `query`
    ///
    /// Fails with [`Error::NotFound`] before traversing if no start node matches.
    pub async fn find_related(&self, query: &RelatedQuery) -> Result<RelatedNodes<'g, G>> {
        query.validate()?;
        let mut description = query.description()?;
        let start = self.find_start(query).await?;

        tracing::debug!(
            "Finding :{} nodes related to {} within depth {}..={}",
            query.label,
            start.id,
            query.min_depth,
            query.max_depth
        );

        if let Some(logger) = &self.logger {
            description = description.observer(Arc::new(logger.clone()));
        }
        for observer in &self.observers {
            description = description.observer(observer.clone());
        }
        if let Some(token) = &self.cancellation {
            description = description.cancellation(token.clone());
        }

        Ok(RelatedNodes {
            traverser: description.traverse(self.graph, start),
        })
    }
}

/// Lazy sequence of related nodes, one per matching path
pub struct RelatedNodes<'g, G: ?Sized> {
    traverser: Traverser<'g, G>,
}

impl<'g, G> RelatedNodes<'g, G>
where
    G: GraphAccess + ?Sized + 'g,
{
    pub async fn next(&mut self) -> Result<Option<Arc<Node>>> {
        Ok(self
            .traverser
            .next()
            .await?
            .map(|path| path.end_node().clone()))
    }

    /// Pull at most `limit` nodes
    pub async fn take(mut self, limit: usize) -> Result<Vec<Arc<Node>>> {
        let mut nodes = Vec::new();
        while nodes.len() < limit {
            match self.next().await? {
                Some(node) => nodes.push(node),
                None => break,
            }
        }
        Ok(nodes)
    }

    pub async fn collect(self) -> Result<Vec<Arc<Node>>> {
        self.take(usize::MAX).await
    }

    pub fn stats(&self) -> &TraversalStats {
        self.traverser.stats()
    }
}
