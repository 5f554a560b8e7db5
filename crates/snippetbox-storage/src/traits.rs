//! Storage trait definitions
//!
//! - SnippetStore: the three operations the handler layer consumes
//! - Storage: SnippetStore plus lifecycle management

use async_trait::async_trait;

use crate::error::StorageError;
use crate::types::{NewSnippet, Snippet, SnippetId};

/// Snippet persistence
///
/// Handlers depend on this trait rather than a concrete backend so a test
/// double can stand in for the database.
#[async_trait]
pub trait SnippetStore: Send + Sync {
    /// Insert a new snippet
    ///
    /// The store stamps `created` with the current UTC instant and sets
    /// `expires` to `created + expires_days` days.
    ///
    /// # Errors
    /// * `StorageError::InvalidData` - `expires_days` out of range
    /// * `StorageError::Query` - Database error
    async fn insert(&self, snippet: NewSnippet) -> Result<SnippetId, StorageError>;

    /// Get a live snippet by ID
    ///
    /// # Errors
    /// * `StorageError::NotFound` - No row with this id, or it has expired
    /// * `StorageError::Query` - Database error
    async fn get(&self, id: SnippetId) -> Result<Snippet, StorageError>;

    /// List up to `LATEST_LIMIT` live snippets in ascending id order
    ///
    /// Returns an empty vector when nothing is live.
    ///
    /// # Errors
    /// * `StorageError::Query` - Database error (no partial results)
    async fn latest(&self) -> Result<Vec<Snippet>, StorageError>;
}

/// Combined storage interface with lifecycle management
#[async_trait]
pub trait Storage: SnippetStore {
    /// Short backend identifier ("sqlite", "postgres", "memory")
    fn backend_name(&self) -> &'static str;

    /// Initialize storage (schema setup)
    ///
    /// Must be called before any other operations. Idempotent.
    ///
    /// # Errors
    /// * `StorageError::Migration` - Schema setup failed
    async fn initialize(&self) -> Result<(), StorageError>;

    /// Check storage health and connectivity
    ///
    /// # Errors
    /// * `StorageError::Connection` - Backend unreachable or schema missing
    async fn health_check(&self) -> Result<(), StorageError>;

    /// Close storage connections
    ///
    /// Safe to call more than once. No other operations should follow.
    async fn close(&self) -> Result<(), StorageError>;
}
