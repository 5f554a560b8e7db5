//! Snippet queries for SQLite

use chrono::{DateTime, Utc};
use sqlx::FromRow;

use super::SqliteStorage;
use crate::error::StorageError;
use crate::types::{NewSnippet, Snippet, SnippetId, LATEST_LIMIT};

/// Raw `snippets` row, mapped by column name
#[derive(Debug, FromRow)]
struct SnippetRow {
    id: i64,
    title: String,
    content: String,
    created: i64,
    expires: i64,
}

impl TryFrom<SnippetRow> for Snippet {
    type Error = StorageError;

    fn try_from(row: SnippetRow) -> Result<Self, Self::Error> {
        Ok(Snippet {
            id: SnippetId::new(row.id),
            title: row.title,
            content: row.content,
            created: from_micros("created", row.created)?,
            expires: from_micros("expires", row.expires)?,
        })
    }
}

fn from_micros(column: &str, micros: i64) -> Result<DateTime<Utc>, StorageError> {
    DateTime::from_timestamp_micros(micros).ok_or_else(|| {
        StorageError::InvalidData(format!("invalid {} timestamp: {}", column, micros))
    })
}

impl SqliteStorage {
    pub(super) async fn insert_impl(&self, snippet: NewSnippet) -> Result<SnippetId, StorageError> {
        let (created, expires) = snippet.timestamps_at(Utc::now())?;

        let result = sqlx::query(
            r#"
            INSERT INTO snippets (title, content, created, expires)
            VALUES (?, ?, ?, ?)
            "#,
        )
        .bind(&snippet.title)
        .bind(&snippet.content)
        .bind(created.timestamp_micros())
        .bind(expires.timestamp_micros())
        .execute(self.pool())
        .await
        .map_err(|e| StorageError::query("failed to insert snippet", e))?;

        let id = SnippetId::new(result.last_insert_rowid());
        tracing::debug!(%id, expires_days = snippet.expires_days, "inserted snippet");
        Ok(id)
    }

    pub(super) async fn get_impl(&self, id: SnippetId) -> Result<Snippet, StorageError> {
        let row: Option<SnippetRow> = sqlx::query_as(
            r#"
            SELECT id, title, content, created, expires
            FROM snippets
            WHERE expires > ? AND id = ?
            "#,
        )
        .bind(Utc::now().timestamp_micros())
        .bind(id.get())
        .fetch_optional(self.pool())
        .await
        .map_err(|e| StorageError::query("failed to get snippet", e))?;

        match row {
            Some(row) => Snippet::try_from(row),
            None => {
                tracing::debug!(%id, "snippet not found or expired");
                Err(StorageError::snippet_not_found(id))
            }
        }
    }

    pub(super) async fn latest_impl(&self) -> Result<Vec<Snippet>, StorageError> {
        let rows: Vec<SnippetRow> = sqlx::query_as(
            r#"
            SELECT id, title, content, created, expires
            FROM snippets
            WHERE expires > ?
            ORDER BY id
            LIMIT ?
            "#,
        )
        .bind(Utc::now().timestamp_micros())
        .bind(LATEST_LIMIT as i64)
        .fetch_all(self.pool())
        .await
        .map_err(|e| StorageError::query("failed to list latest snippets", e))?;

        let snippets = rows
            .into_iter()
            .map(Snippet::try_from)
            .collect::<Result<Vec<_>, _>>()?;

        tracing::debug!(count = snippets.len(), "listed latest snippets");
        Ok(snippets)
    }
}
