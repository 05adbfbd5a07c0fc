//! Storage error types

use thiserror::Error;
use travers_core::{NodeId, RelationshipId};

/// Result type alias for storage operations
pub type StorageResult<T> = std::result::Result<T, StorageError>;

/// Storage-specific error types
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Database error: {0}")]
    Database(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Duplicate node: {0}")]
    DuplicateNode(NodeId),

    #[error("Duplicate relationship: {0}")]
    DuplicateRelationship(RelationshipId),

    #[error("Relationship {relationship} references missing node {node}")]
    DanglingRelationship {
        relationship: RelationshipId,
        node: NodeId,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<StorageError> for travers_core::Error {
    fn from(e: StorageError) -> Self {
        travers_core::Error::GraphAccess(e.to_string())
    }
}
