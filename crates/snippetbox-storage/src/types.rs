//! Domain types for storage layer

use chrono::{DateTime, Datelike, TimeDelta, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::RangeInclusive;

use crate::error::StorageError;

/// Maximum number of snippets returned by `SnippetStore::latest`
pub const LATEST_LIMIT: usize = 10;

/// Calendar years an `expires` timestamp may fall in
///
/// Narrower than chrono's range so that every backend can store the value;
/// PostgreSQL `TIMESTAMPTZ` stops at 4713 BC.
pub const EXPIRES_YEARS: RangeInclusive<i32> = 1..=9999;

/// Strongly-typed snippet identifier
///
/// Wraps the auto-increment surrogate key assigned by the store on insert.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SnippetId(i64);

impl SnippetId {
    /// Create a new SnippetId from a raw key
    pub fn new(id: i64) -> Self {
        Self(id)
    }

    /// Get the raw key
    pub fn get(self) -> i64 {
        self.0
    }
}

impl fmt::Display for SnippetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for SnippetId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

/// A stored snippet
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snippet {
    pub id: SnippetId,
    pub title: String,
    pub content: String,
    /// Set by the store at insert time
    pub created: DateTime<Utc>,
    /// `created` plus the requested number of days
    pub expires: DateTime<Utc>,
}

impl Snippet {
    /// Whether the snippet is still visible at `now`
    ///
    /// A snippet is live only while `expires` is strictly after `now`.
    pub fn is_live_at(&self, now: DateTime<Utc>) -> bool {
        self.expires > now
    }
}

/// Insert payload for a new snippet
///
/// Title and content are passed through as-is; any emptiness or length
/// rules belong to the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewSnippet {
    pub title: String,
    pub content: String,
    /// Days from now until expiry. Zero or negative yields an expired row.
    pub expires_days: i64,
}

impl NewSnippet {
    /// Build an insert payload expiring `expires_days` days after insert
    pub fn new(title: impl Into<String>, content: impl Into<String>, expires_days: i64) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
            expires_days,
        }
    }

    /// Compute the `(created, expires)` pair for an insert happening at `now`
    ///
    /// # Errors
    ///
    /// Returns `StorageError::InvalidData` if `expires_days` pushes the
    /// expiry outside [`EXPIRES_YEARS`].
    pub fn timestamps_at(
        &self,
        now: DateTime<Utc>,
    ) -> Result<(DateTime<Utc>, DateTime<Utc>), StorageError> {
        let expires = TimeDelta::try_days(self.expires_days)
            .and_then(|delta| now.checked_add_signed(delta))
            .filter(|expires| EXPIRES_YEARS.contains(&expires.year()))
            .ok_or_else(|| {
                StorageError::InvalidData(format!(
                    "expires_days out of range: {}",
                    self.expires_days
                ))
            })?;
        Ok((now, expires))
    }
}
