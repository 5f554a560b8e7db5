//! SQLite storage backend implementation using sqlx
//!
//! # Architecture
//!
//! - **migrations**: SQL schema in `migrations/sqlite/` (applied via sqlx)
//! - **snippet_store**: insert / get / latest queries
//!
//! # Connection Management
//!
//! Uses sqlx's SqlitePool for async database operations without blocking
//! the Tokio runtime. Connections borrowed for a query go back to the pool
//! when the future completes, including on early error returns.
//!
//! # Timestamps
//!
//! `created` and `expires` are stored as UTC unix microseconds. Liveness
//! filters compare integers, so there is no dependence on SQLite's text
//! date formats.
//!
//! # Security
//!
//! All queries use sqlx's prepared statement bindings (`bind()`) to prevent
//! SQL injection. User-provided data is never interpolated into query strings.

use async_trait::async_trait;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use std::str::FromStr;
use std::time::Duration;

use crate::error::StorageError;
use crate::traits::{SnippetStore, Storage};
use crate::types::{NewSnippet, Snippet, SnippetId};

mod snippet_store;

/// Embedded SQLite migrations
static MIGRATIONS: sqlx::migrate::Migrator = sqlx::migrate!("migrations/sqlite");

/// SQLite storage backend
///
/// # Examples
///
/// ```no_run
/// use snippetbox_storage::backends::sqlite::SqliteStorage;
/// use snippetbox_storage::Storage;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// // In-memory database for testing
/// let storage = SqliteStorage::new(":memory:").await?;
/// storage.initialize().await?;
///
/// // File-based database for production
/// let storage = SqliteStorage::new("/var/lib/snippetbox/snippets.db").await?;
/// storage.initialize().await?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct SqliteStorage {
    pool: SqlitePool,
}

impl SqliteStorage {
    /// Create a new SQLite storage backend
    ///
    /// # Arguments
    ///
    /// * `path` - Database path or `:memory:` for in-memory database
    ///
    /// # Pool Configuration
    ///
    /// - min_connections: 1 - also keeps a shared in-memory database alive
    /// - max_connections: 5 - SQLite is single-writer
    /// - acquire_timeout: 30s
    /// - idle_timeout: 10min
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Connection` if the database connection fails.
    pub async fn new(path: &str) -> Result<Self, StorageError> {
        let options = if path == ":memory:" {
            SqliteConnectOptions::from_str("sqlite::memory:")
                .map_err(|e| StorageError::connection("invalid SQLite URL", e))?
        } else {
            SqliteConnectOptions::from_str(&format!("sqlite://{}?mode=rwc", path))
                .map_err(|e| StorageError::connection("invalid SQLite URL", e))?
        }
        .journal_mode(sqlx::sqlite::SqliteJournalMode::Wal)
        .synchronous(sqlx::sqlite::SqliteSynchronous::Normal)
        .foreign_keys(true);

        let pool = SqlitePoolOptions::new()
            .min_connections(1)
            .max_connections(5)
            .acquire_timeout(Duration::from_secs(30))
            .idle_timeout(Duration::from_secs(600))
            .connect_with(options)
            .await
            .map_err(|e| StorageError::connection("failed to create SQLite pool", e))?;

        tracing::info!(path, "opened SQLite pool");
        Ok(Self { pool })
    }

    /// Wrap an existing pool
    ///
    /// The caller keeps ownership of pool policy; `initialize()` must still
    /// be called before use.
    pub fn from_pool(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Get a reference to the connection pool
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

#[async_trait]
impl SnippetStore for SqliteStorage {
    async fn insert(&self, snippet: NewSnippet) -> Result<SnippetId, StorageError> {
        self.insert_impl(snippet).await
    }

    async fn get(&self, id: SnippetId) -> Result<Snippet, StorageError> {
        self.get_impl(id).await
    }

    async fn latest(&self) -> Result<Vec<Snippet>, StorageError> {
        self.latest_impl().await
    }
}

#[async_trait]
impl Storage for SqliteStorage {
    fn backend_name(&self) -> &'static str {
        "sqlite"
    }

    async fn initialize(&self) -> Result<(), StorageError> {
        MIGRATIONS
            .run(self.pool())
            .await
            .map_err(|e| StorageError::migration("failed to run SQLite migrations", e))
    }

    async fn health_check(&self) -> Result<(), StorageError> {
        sqlx::query("SELECT 1")
            .execute(self.pool())
            .await
            .map_err(|e| StorageError::connection("health check: database connection failed", e))?;

        let table_exists: bool = sqlx::query_scalar(
            r#"
            SELECT EXISTS (
                SELECT 1 FROM sqlite_master
                WHERE type = 'table' AND name = 'snippets'
            )
            "#,
        )
        .fetch_one(self.pool())
        .await
        .map_err(|e| StorageError::connection("health check: failed to verify schema", e))?;

        if !table_exists {
            return Err(StorageError::connection(
                "health check: schema not initialized (snippets table missing)",
                std::io::Error::new(
                    std::io::ErrorKind::NotFound,
                    "schema not initialized - call initialize() first",
                ),
            ));
        }

        Ok(())
    }

    async fn close(&self) -> Result<(), StorageError> {
        self.pool.close().await;
        Ok(())
    }
}
