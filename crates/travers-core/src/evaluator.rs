//! Path evaluators and their composition
//!
//! An evaluator looks at the path walked so far and decides two independent
//! things: whether the path's end node belongs in the results, and whether
//! the traversal should keep expanding past it.

use crate::error::Result;
use crate::limits::{validate_depth_range, ValidationError};
use crate::observer::PathLogger;
use crate::path::Path;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Decision for one path: include its end node? continue past it?
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Evaluation {
    pub include: bool,
    pub continues: bool,
}

impl Evaluation {
    pub const INCLUDE_AND_CONTINUE: Self = Self::of(true, true);
    pub const INCLUDE_AND_PRUNE: Self = Self::of(true, false);
    pub const EXCLUDE_AND_CONTINUE: Self = Self::of(false, true);
    pub const EXCLUDE_AND_PRUNE: Self = Self::of(false, false);

    pub const fn of(include: bool, continues: bool) -> Self {
        Self { include, continues }
    }
}

/// A decision function over paths
pub trait Evaluator: Send + Sync {
    fn evaluate(&self, path: &Path) -> Result<Evaluation>;

    /// Depth envelope this evaluator imposes, if it is a depth evaluator.
    ///
    /// Inside an [`EvaluatorChain`], evaluators that report a range bound the
    /// whole traversal instead of voting.
    fn depth_range(&self) -> Option<DepthRange> {
        None
    }

    /// Whether this evaluator's decision counts inside an [`EvaluatorChain`].
    ///
    /// Non-voting evaluators still see every path but cannot change the result.
    fn votes(&self) -> bool {
        true
    }
}

impl<F> Evaluator for F
where
    F: Fn(&Path) -> Result<Evaluation> + Send + Sync,
{
    fn evaluate(&self, path: &Path) -> Result<Evaluation> {
        self(path)
    }
}

/// Inclusive depth bounds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DepthRange {
    pub min: u32,
    pub max: u32,
}

impl DepthRange {
    pub fn new(min: u32, max: u32) -> std::result::Result<Self, ValidationError> {
        validate_depth_range(min, max)?;
        Ok(Self { min, max })
    }

    pub const fn unbounded() -> Self {
        Self {
            min: 0,
            max: u32::MAX,
        }
    }

    pub fn contains(&self, depth: u32) -> bool {
        self.min <= depth && depth <= self.max
    }

    /// Whether a path of `depth` may be extended without leaving the range
    pub fn allows_expansion(&self, depth: u32) -> bool {
        depth < self.max
    }

    /// Tightest range satisfying both; may be empty (`min > max`)
    pub fn intersect(&self, other: &DepthRange) -> DepthRange {
        DepthRange {
            min: self.min.max(other.min),
            max: self.max.min(other.max),
        }
    }
}

impl Default for DepthRange {
    fn default() -> Self {
        Self::unbounded()
    }
}

/// How the votes of several evaluators are combined
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Composition {
    /// Include if any includes; continue if any continues
    #[default]
    Any,
    /// Include if all include; continue if all continue
    All,
}

impl Composition {
    fn combine(&self, acc: Evaluation, next: Evaluation) -> Evaluation {
        match self {
            Composition::Any => {
                Evaluation::of(acc.include || next.include, acc.continues || next.continues)
            }
            Composition::All => {
                Evaluation::of(acc.include && next.include, acc.continues && next.continues)
            }
        }
    }
}

/// Ordered evaluators combined under one [`Composition`]
///
/// A chain without voting evaluators includes and continues everything. Every
/// evaluator other than a depth evaluator is consulted for every path (no
/// short-circuit), so side-effecting evaluators see each path exactly once.
#[derive(Clone, Default)]
pub struct EvaluatorChain {
    composition: Composition,
    evaluators: Vec<Arc<dyn Evaluator>>,
    depth: DepthRange,
}

impl EvaluatorChain {
    pub fn new(composition: Composition) -> Self {
        Self {
            composition,
            evaluators: Vec::new(),
            depth: DepthRange::unbounded(),
        }
    }

    /// OR-composition on both axes
    pub fn any() -> Self {
        Self::new(Composition::Any)
    }

    /// AND-composition on both axes
    pub fn all() -> Self {
        Self::new(Composition::All)
    }

    pub fn push(&mut self, evaluator: Arc<dyn Evaluator>) {
        if let Some(range) = evaluator.depth_range() {
            self.depth = self.depth.intersect(&range);
        }
        self.evaluators.push(evaluator);
    }

    pub fn with(mut self, evaluator: impl Evaluator + 'static) -> Self {
        self.push(Arc::new(evaluator));
        self
    }

    pub fn composition(&self) -> Composition {
        self.composition
    }

    /// Effective depth envelope of the chain
    pub fn depth(&self) -> DepthRange {
        self.depth
    }

    pub fn len(&self) -> usize {
        self.evaluators.len()
    }

    pub fn is_empty(&self) -> bool {
        self.evaluators.is_empty()
    }
}

impl Evaluator for EvaluatorChain {
    fn evaluate(&self, path: &Path) -> Result<Evaluation> {
        let mut decision: Option<Evaluation> = None;
        for evaluator in &self.evaluators {
            if evaluator.depth_range().is_some() {
                continue;
            }
            let vote = evaluator.evaluate(path)?;
            if evaluator.votes() {
                decision = Some(match decision {
                    Some(acc) => self.composition.combine(acc, vote),
                    None => vote,
                });
            }
        }
        let decision = decision.unwrap_or(Evaluation::INCLUDE_AND_CONTINUE);

        let depth = path.length();
        Ok(Evaluation::of(
            decision.include && self.depth.contains(depth),
            decision.continues && self.depth.allows_expansion(depth),
        ))
    }
}

impl std::fmt::Debug for EvaluatorChain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EvaluatorChain")
            .field("composition", &self.composition)
            .field("evaluators", &self.evaluators.len())
            .field("depth", &self.depth)
            .finish()
    }
}

/// Keeps paths within `[min, max]` and stops expanding at `max`
///
/// In a chain it never votes: it only contributes the depth envelope that
/// bounds the other evaluators' decisions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DepthRangeEvaluator {
    range: DepthRange,
}

impl DepthRangeEvaluator {
    pub fn new(min: u32, max: u32) -> std::result::Result<Self, ValidationError> {
        Ok(Self {
            range: DepthRange::new(min, max)?,
        })
    }
}

impl Evaluator for DepthRangeEvaluator {
    /// Standalone decision, used only outside an [`EvaluatorChain`]: include
    /// the in-range paths, continue below `max`.
    fn evaluate(&self, path: &Path) -> Result<Evaluation> {
        let depth = path.length();
        Ok(Evaluation::of(
            self.range.contains(depth),
            self.range.allows_expansion(depth),
        ))
    }

    fn depth_range(&self) -> Option<DepthRange> {
        Some(self.range)
    }
}

/// Includes paths whose end node carries a label; always continues
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelEvaluator {
    label: String,
}

impl LabelEvaluator {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
        }
    }
}

impl Evaluator for LabelEvaluator {
    fn evaluate(&self, path: &Path) -> Result<Evaluation> {
        if path.end_node().has_label(&self.label) {
            Ok(Evaluation::INCLUDE_AND_CONTINUE)
        } else {
            Ok(Evaluation::EXCLUDE_AND_CONTINUE)
        }
    }
}

/// Logs every path it sees without taking part in the decision
///
/// Inside a chain it does not vote. Used on its own it answers
/// exclude+continue. Prefer registering a [`PathLogger`] as an observer on
/// the traversal.
#[derive(Debug, Clone, Default)]
pub struct LoggingEvaluator {
    logger: PathLogger,
}

impl LoggingEvaluator {
    pub fn new(logger: PathLogger) -> Self {
        Self { logger }
    }
}

impl Evaluator for LoggingEvaluator {
    fn evaluate(&self, path: &Path) -> Result<Evaluation> {
        self.logger.record(path);
        Ok(Evaluation::EXCLUDE_AND_CONTINUE)
    }

    fn votes(&self) -> bool {
        false
    }
}
