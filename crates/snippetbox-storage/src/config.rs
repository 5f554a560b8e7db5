//! Storage configuration
//!
//! A single connection URL selects the backend:
//!
//! | URL | backend | connection string |
//! |---|---|---|
//! | `sqlite://:memory:` | SQLite, in-memory | `:memory:` |
//! | `sqlite:///var/lib/snippetbox/snippets.db` | SQLite file, absolute | `/var/lib/snippetbox/snippets.db` |
//! | `sqlite://data/snippets.db` | SQLite file, relative to the working dir | `data/snippets.db` |
//! | `postgres://web:pass@db/snippetbox?pool_size=20` | PostgreSQL | URL without the query |
//! | `memory://` | in-process store | empty |

use serde::{Deserialize, Serialize};
use thiserror::Error;
use url::Url;

/// Errors that can occur when parsing storage configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Invalid URL format
    #[error("Invalid URL format: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// Unsupported URL scheme
    #[error("Unsupported URL scheme: {0}. Supported schemes: sqlite, postgres, memory")]
    UnsupportedScheme(String),

    /// `sqlite://` URL without a database path
    #[error("SQLite URL has no database path: {0}")]
    MissingPath(String),

    /// Invalid pool size
    #[error("Invalid pool size: {0}")]
    InvalidPoolSize(String),

    /// `pool_size` given for a backend that has no configurable pool
    #[error("pool_size is only supported for postgres, not {0:?}")]
    PoolSizeNotSupported(BackendType),
}

/// Storage backend type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackendType {
    /// SQLite backend
    Sqlite,
    /// PostgreSQL backend
    Postgres,
    /// In-process map, for tests and local development
    Memory,
}

/// Storage configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Backend type
    pub backend: BackendType,

    /// File path for SQLite, connection URL for PostgreSQL, empty for memory
    pub connection_string: String,

    /// Maximum pool connections (PostgreSQL only)
    pub pool_size: Option<u32>,
}

const SQLITE_MEMORY: &str = ":memory:";

impl StorageConfig {
    /// Parse a connection URL into storage configuration
    ///
    /// See the module docs for the accepted forms. SQLite paths keep their
    /// leading `/`, so `sqlite:///abs/path` stays absolute.
    ///
    /// # Errors
    ///
    /// - `ConfigError::InvalidUrl` if the URL cannot be parsed
    /// - `ConfigError::UnsupportedScheme` for anything but sqlite/postgres/memory
    /// - `ConfigError::MissingPath` for a SQLite URL with no path
    /// - `ConfigError::InvalidPoolSize` if `pool_size` is not a positive integer
    /// - `ConfigError::PoolSizeNotSupported` if `pool_size` is set on a
    ///   non-PostgreSQL URL
    pub fn from_url(url: &str) -> Result<Self, ConfigError> {
        // `:memory:` is not a valid URL authority, so match it before parsing
        if url == "sqlite://:memory:" || url == "sqlite::memory:" {
            return Ok(Self::sqlite_memory());
        }

        let parsed = Url::parse(url)?;
        let backend = match parsed.scheme() {
            "sqlite" => BackendType::Sqlite,
            "postgres" | "postgresql" => BackendType::Postgres,
            "memory" => BackendType::Memory,
            scheme => return Err(ConfigError::UnsupportedScheme(scheme.to_string())),
        };

        let pool_size = pool_size_param(&parsed)?;
        if pool_size.is_some() && backend != BackendType::Postgres {
            return Err(ConfigError::PoolSizeNotSupported(backend));
        }

        let connection_string = match backend {
            BackendType::Sqlite => sqlite_path(&parsed, url)?,
            BackendType::Postgres => {
                let mut conn_url = parsed;
                conn_url.set_query(None);
                conn_url.to_string()
            }
            BackendType::Memory => String::new(),
        };

        Ok(Self {
            backend,
            connection_string,
            pool_size,
        })
    }

    /// Create in-memory SQLite configuration for testing
    #[must_use]
    pub fn sqlite_memory() -> Self {
        Self::sqlite_file(SQLITE_MEMORY)
    }

    /// Create file-based SQLite configuration
    #[must_use]
    pub fn sqlite_file(path: &str) -> Self {
        Self {
            backend: BackendType::Sqlite,
            connection_string: path.to_string(),
            pool_size: None,
        }
    }

    /// Create configuration for the in-memory store
    #[must_use]
    pub fn memory() -> Self {
        Self {
            backend: BackendType::Memory,
            connection_string: String::new(),
            pool_size: None,
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self::sqlite_memory()
    }
}

/// `sqlite:///abs` has no host and an absolute path; `sqlite://rel/x.db`
/// parses `rel` as the host, which is really the first path segment.
fn sqlite_path(parsed: &Url, original: &str) -> Result<String, ConfigError> {
    let path = match parsed.host_str().filter(|h| !h.is_empty()) {
        Some(first_segment) => format!("{}{}", first_segment, parsed.path()),
        None => parsed.path().to_string(),
    };

    if path.is_empty() || path == "/" {
        return Err(ConfigError::MissingPath(original.to_string()));
    }
    Ok(path)
}

fn pool_size_param(parsed: &Url) -> Result<Option<u32>, ConfigError> {
    let Some((_, value)) = parsed.query_pairs().find(|(key, _)| key == "pool_size") else {
        return Ok(None);
    };

    match value.parse::<u32>() {
        Ok(size) if size > 0 => Ok(Some(size)),
        _ => Err(ConfigError::InvalidPoolSize(value.into_owned())),
    }
}
