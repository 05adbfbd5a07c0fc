//! Travers Core - Bounded graph traversal engine
//!
//! This crate provides the data model, the read-only graph access trait,
//! composable path evaluators and the lazy depth-first traversal engine,
//! plus the query façade built on top of them.

pub mod cancel;
pub mod error;
pub mod evaluator;
pub mod graph;
pub mod limits;
pub mod node;
pub mod observer;
pub mod path;
pub mod procedure;
pub mod query;
pub mod relationship;
pub mod traversal;

pub use cancel::CancellationToken;
pub use error::{Error, Result};
pub use evaluator::{
    Composition, DepthRange, DepthRangeEvaluator, Evaluation, Evaluator, EvaluatorChain,
    LabelEvaluator, LoggingEvaluator,
};
pub use graph::GraphAccess;
pub use limits::ValidationError;
pub use node::{Node, NodeId, PropertyMap};
pub use observer::{LogSink, PathLogger, PathObserver, TracingSink};
pub use path::Path;
pub use procedure::{co_actors_query, NodeRecord, NodeWrapper, FIND_CO_ACTORS};
pub use query::{Finder, RelatedNodes, RelatedQuery, StartSelection};
pub use relationship::{Direction, Relationship, RelationshipId};
pub use traversal::{
    TraversalDescription, TraversalOrder, TraversalStats, Traverser, TraverserState, Uniqueness,
};
