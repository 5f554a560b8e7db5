//! Shared test harness for storage backends
//!
//! Generic test functions that every backend must pass so that handler
//! code sees identical behavior regardless of the database behind it.
//!
//! # Usage
//!
//! ```ignore
//! use snippetbox_storage::backends::sqlite::SqliteStorage;
//!
//! #[tokio::test]
//! async fn sqlite_passes_all_tests() {
//!     let storage = SqliteStorage::new(":memory:").await.unwrap();
//!     storage.initialize().await.unwrap();
//!     common::run_all_tests(&storage).await;
//! }
//! ```
//!
//! # Adding Tests for New Backends
//!
//! 1. Create a new test file (e.g., `tests/mysql_backend.rs`)
//! 2. Initialize a fresh, empty storage backend
//! 3. Call `run_all_tests(&storage).await`

pub mod snippet_store_tests;

use snippetbox_storage::Storage;

/// Run all storage trait tests
///
/// `storage` must be freshly initialized and empty.
pub async fn run_all_tests<S: Storage>(storage: &S) {
    println!("Running SnippetStore tests...");
    snippet_store_tests::run_all(storage).await;

    println!("Running lifecycle tests...");
    storage
        .health_check()
        .await
        .expect("health check should succeed after the suite");

    println!("All storage tests passed!");
}
