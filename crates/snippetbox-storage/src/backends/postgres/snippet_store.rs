//! Snippet queries for PostgreSQL

use chrono::{DateTime, Utc};
use sqlx::postgres::PgRow;
use sqlx::Row;

use super::PostgresStorage;
use crate::error::StorageError;
use crate::types::{NewSnippet, Snippet, SnippetId, LATEST_LIMIT};

fn snippet_from_row(row: &PgRow) -> Result<Snippet, sqlx::Error> {
    Ok(Snippet {
        id: SnippetId::new(row.try_get("id")?),
        title: row.try_get("title")?,
        content: row.try_get("content")?,
        created: row.try_get::<DateTime<Utc>, _>("created")?,
        expires: row.try_get::<DateTime<Utc>, _>("expires")?,
    })
}

impl PostgresStorage {
    pub(crate) async fn insert_impl(&self, snippet: NewSnippet) -> Result<SnippetId, StorageError> {
        let (created, expires) = snippet.timestamps_at(Utc::now())?;

        let id: i64 = sqlx::query_scalar(
            r#"
            INSERT INTO snippets (title, content, created, expires)
            VALUES ($1, $2, $3, $4)
            RETURNING id
            "#,
        )
        .bind(&snippet.title)
        .bind(&snippet.content)
        .bind(created)
        .bind(expires)
        .fetch_one(self.pool())
        .await
        .map_err(|e| StorageError::query("insert snippet failed", e))?;

        let id = SnippetId::new(id);
        tracing::debug!(%id, expires_days = snippet.expires_days, "inserted snippet");
        Ok(id)
    }

    pub(crate) async fn get_impl(&self, id: SnippetId) -> Result<Snippet, StorageError> {
        let row = sqlx::query(
            r#"
            SELECT id, title, content, created, expires
            FROM snippets
            WHERE expires > $1 AND id = $2
            "#,
        )
        .bind(Utc::now())
        .bind(id.get())
        .fetch_optional(self.pool())
        .await
        .map_err(|e| StorageError::query("get snippet failed", e))?
        .ok_or_else(|| {
            tracing::debug!(%id, "snippet not found or expired");
            StorageError::snippet_not_found(id)
        })?;

        snippet_from_row(&row).map_err(|e| StorageError::query("decode snippet row failed", e))
    }

    pub(crate) async fn latest_impl(&self) -> Result<Vec<Snippet>, StorageError> {
        let rows = sqlx::query(
            r#"
            SELECT id, title, content, created, expires
            FROM snippets
            WHERE expires > $1
            ORDER BY id
            LIMIT $2
            "#,
        )
        .bind(Utc::now())
        .bind(LATEST_LIMIT as i64)
        .fetch_all(self.pool())
        .await
        .map_err(|e| StorageError::query("list latest snippets failed", e))?;

        let snippets = rows
            .iter()
            .map(snippet_from_row)
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| StorageError::query("decode snippet row failed", e))?;

        tracing::debug!(count = snippets.len(), "listed latest snippets");
        Ok(snippets)
    }
}
