//! Error types for Travers Core

use crate::limits::ValidationError;
use thiserror::Error;

/// Result type alias using Travers' Error
pub type Result<T> = std::result::Result<T, Error>;

/// Travers error types
#[derive(Error, Debug)]
pub enum Error {
    /// No node matched the start lookup; the traversal never started
    #[error("No starting node matches :{label}({key} = {value})")]
    NotFound {
        label: String,
        key: String,
        value: String,
    },

    /// The graph backend failed while the traversal was reading from it
    #[error("Graph access error: {0}")]
    GraphAccess(String),

    /// A user-supplied evaluator faulted
    #[error("Evaluator error: {0}")]
    Evaluator(String),

    #[error("Traversal cancelled after visiting {visited} paths")]
    Cancelled { visited: usize },

    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl Error {
    /// Create a `NotFound` error for a start lookup
    pub fn not_found(
        label: impl Into<String>,
        key: impl Into<String>,
        value: &serde_json::Value,
    ) -> Self {
        let value = match value {
            serde_json::Value::String(s) => s.clone(),
            other => other.to_string(),
        };
        Self::NotFound {
            label: label.into(),
            key: key.into(),
            value,
        }
    }

    /// Whether retrying with the same input could succeed
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::GraphAccess(_))
    }
}
