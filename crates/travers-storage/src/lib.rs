//! Travers Storage - Graph backends for the traversal engine
//!
//! This crate provides read-only implementations of
//! [`travers_core::GraphAccess`].

pub mod counting;
pub mod error;
pub mod fixture;
pub mod memory;

pub use counting::{CallCounts, CountingGraph};
pub use error::{StorageError, StorageResult};
pub use fixture::GraphFixture;
pub use memory::MemoryGraph;
