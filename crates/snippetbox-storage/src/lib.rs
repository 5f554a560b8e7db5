//! Storage layer for snippetbox
//!
//! Persists snippets (a titled text blob with creation and expiry
//! timestamps) and exposes the three operations the web handlers need:
//! insert, get a live snippet by id, and list the latest live snippets.
//!
//! # Supported Backends
//!
//! - **SQLite** (feature: `sqlite`, default) - Embedded database via sqlx
//! - **PostgreSQL** (feature: `postgres`) - Networked database via sqlx
//! - **Memory** (feature: `memory`, default) - In-process store for tests
//!
//! # Architecture
//!
//! All backends implement the same traits:
//! - [`SnippetStore`] - insert / get / latest
//! - [`Storage`] - Lifecycle management (initialize, health check, close)
//!
//! Expired snippets stay in the table but are never returned by reads.
//!
//! # Examples
//!
//! ```no_run
//! use snippetbox_storage::{create_storage, NewSnippet, SnippetStore, StorageConfig};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = StorageConfig::from_url("sqlite:///var/lib/snippetbox/snippets.db")?;
//! let storage = create_storage(&config).await?;
//!
//! let id = storage.insert(NewSnippet::new("O snail", "Climb Mount Fuji", 7)).await?;
//! let snippet = storage.get(id).await?;
//! assert_eq!(snippet.title, "O snail");
//! # Ok(())
//! # }
//! ```

mod config;
mod error;
mod traits;
mod types;

pub mod backends;

// Re-exports
pub use config::{BackendType, ConfigError, StorageConfig};
pub use error::{BoxedError, StorageError};
pub use traits::{SnippetStore, Storage};
pub use types::{NewSnippet, Snippet, SnippetId, EXPIRES_YEARS, LATEST_LIMIT};

use std::sync::Arc;

/// Create storage from configuration
///
/// Builds the configured backend and initializes its schema.
///
/// # Errors
///
/// Returns `StorageError::InvalidConnectionString` if the backend type
/// is not compiled in (missing feature flag).
pub async fn create_storage(config: &StorageConfig) -> Result<Arc<dyn Storage>, StorageError> {
    let storage: Arc<dyn Storage> = match config.backend {
        #[cfg(feature = "sqlite")]
        BackendType::Sqlite => {
            Arc::new(backends::sqlite::SqliteStorage::new(&config.connection_string).await?)
        }
        #[cfg(not(feature = "sqlite"))]
        BackendType::Sqlite => {
            return Err(StorageError::InvalidConnectionString(
                "SQLite backend not compiled in (enable 'sqlite' feature)".into(),
            ))
        }
        #[cfg(feature = "postgres")]
        BackendType::Postgres => Arc::new(
            backends::postgres::PostgresStorage::with_pool_size(
                &config.connection_string,
                config.pool_size,
            )
            .await?,
        ),
        #[cfg(not(feature = "postgres"))]
        BackendType::Postgres => {
            return Err(StorageError::InvalidConnectionString(
                "PostgreSQL backend not compiled in (enable 'postgres' feature)".into(),
            ))
        }
        #[cfg(feature = "memory")]
        BackendType::Memory => Arc::new(backends::memory::MemoryStorage::new()),
        #[cfg(not(feature = "memory"))]
        BackendType::Memory => {
            return Err(StorageError::InvalidConnectionString(
                "memory backend not compiled in (enable 'memory' feature)".into(),
            ))
        }
    };

    storage.initialize().await?;
    tracing::info!(backend = storage.backend_name(), "snippet storage ready");
    Ok(storage)
}
