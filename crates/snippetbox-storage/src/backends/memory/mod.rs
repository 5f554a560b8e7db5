//! In-memory storage backend
//!
//! Keeps snippets in a `BTreeMap` keyed by id. Intended as a test double for
//! handler code and for running without a database; nothing survives a
//! restart. Liveness and ordering follow the SQL backends exactly.

use std::collections::BTreeMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use crate::error::StorageError;
use crate::traits::{SnippetStore, Storage};
use crate::types::{NewSnippet, Snippet, SnippetId, LATEST_LIMIT};

#[derive(Debug, Default)]
struct Inner {
    snippets: BTreeMap<SnippetId, Snippet>,
    last_id: i64,
}

/// In-memory storage backend
#[derive(Debug, Default)]
pub struct MemoryStorage {
    inner: RwLock<Inner>,
}

impl MemoryStorage {
    /// Create an empty store; the first inserted snippet gets id 1
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored snippets, expired ones included
    pub async fn len(&self) -> usize {
        self.inner.read().await.snippets.len()
    }

    /// True when nothing has been inserted, expired snippets included
    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[async_trait]
impl SnippetStore for MemoryStorage {
    async fn insert(&self, snippet: NewSnippet) -> Result<SnippetId, StorageError> {
        let (created, expires) = snippet.timestamps_at(Utc::now())?;

        let mut inner = self.inner.write().await;
        inner.last_id += 1;
        let id = SnippetId::new(inner.last_id);
        inner.snippets.insert(
            id,
            Snippet {
                id,
                title: snippet.title,
                content: snippet.content,
                created,
                expires,
            },
        );

        tracing::debug!(%id, expires_days = snippet.expires_days, "inserted snippet");
        Ok(id)
    }

    async fn get(&self, id: SnippetId) -> Result<Snippet, StorageError> {
        let now = Utc::now();
        self.inner
            .read()
            .await
            .snippets
            .get(&id)
            .filter(|s| s.is_live_at(now))
            .cloned()
            .ok_or_else(|| StorageError::snippet_not_found(id))
    }

    async fn latest(&self) -> Result<Vec<Snippet>, StorageError> {
        let now = Utc::now();
        let snippets: Vec<Snippet> = self
            .inner
            .read()
            .await
            .snippets
            .values()
            .filter(|s| s.is_live_at(now))
            .take(LATEST_LIMIT)
            .cloned()
            .collect();

        tracing::debug!(count = snippets.len(), "listed latest snippets");
        Ok(snippets)
    }
}

#[async_trait]
impl Storage for MemoryStorage {
    fn backend_name(&self) -> &'static str {
        "memory"
    }

    async fn initialize(&self) -> Result<(), StorageError> {
        Ok(())
    }

    async fn health_check(&self) -> Result<(), StorageError> {
        Ok(())
    }

    async fn close(&self) -> Result<(), StorageError> {
        Ok(())
    }
}
