//! SnippetStore trait test suite

use chrono::{Duration, Utc};
use snippetbox_storage::{NewSnippet, SnippetId, Storage, StorageError, LATEST_LIMIT};
use std::collections::BTreeSet;

/// Run all SnippetStore tests
///
/// Order matters: the first two tests rely on the store starting empty.
pub async fn run_all<S: Storage>(storage: &S) {
    test_latest_empty_store(storage).await;
    test_first_insert_scenario(storage).await;
    test_latest_caps_at_ten_smallest_ids(storage).await;
    test_expired_insert_is_not_found(storage).await;
    test_negative_expiry_hidden_from_latest(storage).await;
    test_get_nonexistent_snippet(storage).await;
    test_insert_then_get_round_trip(storage).await;
    test_get_is_idempotent(storage).await;
    test_empty_title_and_content_accepted(storage).await;
    test_unstorable_expiry_rejected_before_insert(storage).await;
    test_latest_invariants(storage).await;
}

/// Latest on an empty store is an empty list, not an error
pub async fn test_latest_empty_store<S: Storage>(storage: &S) {
    let latest = storage
        .latest()
        .await
        .expect("latest should succeed on an empty store");
    assert!(latest.is_empty(), "expected no snippets, got {:?}", latest);
}

/// Insert("Title A", "Body A", 7) on a fresh store yields id 1
pub async fn test_first_insert_scenario<S: Storage>(storage: &S) {
    let id = storage
        .insert(NewSnippet::new("Title A", "Body A", 7))
        .await
        .expect("insert should succeed");
    assert_eq!(id, SnippetId::new(1));

    let snippet = storage.get(id).await.expect("get should succeed");
    assert_eq!(snippet.id, id);
    assert_eq!(snippet.title, "Title A");
    assert_eq!(snippet.content, "Body A");
    assert_eq!(snippet.expires - snippet.created, Duration::days(7));
}

/// Twelve live inserts: latest returns exactly ten, the smallest live ids
pub async fn test_latest_caps_at_ten_smallest_ids<S: Storage>(storage: &S) {
    let before: Vec<SnippetId> = storage
        .latest()
        .await
        .expect("latest should succeed")
        .into_iter()
        .map(|s| s.id)
        .collect();
    assert!(
        before.len() < LATEST_LIMIT,
        "precondition: fewer than {} live snippets, got {}",
        LATEST_LIMIT,
        before.len()
    );

    let mut live: BTreeSet<SnippetId> = before.into_iter().collect();
    for i in 0..12 {
        let id = storage
            .insert(NewSnippet::new(format!("cap {i}"), "body", 3))
            .await
            .expect("insert should succeed");
        live.insert(id);
    }

    let latest = storage.latest().await.expect("latest should succeed");
    let ids: Vec<SnippetId> = latest.iter().map(|s| s.id).collect();
    let expected: Vec<SnippetId> = live.into_iter().take(LATEST_LIMIT).collect();

    assert_eq!(ids.len(), LATEST_LIMIT);
    assert_eq!(ids, expected);
}

/// A snippet inserted already expired cannot be fetched
pub async fn test_expired_insert_is_not_found<S: Storage>(storage: &S) {
    let id = storage
        .insert(NewSnippet::new("stale", "already gone", -1))
        .await
        .expect("insert with negative expiry should succeed");

    let result = storage.get(id).await;
    assert!(
        matches!(result, Err(StorageError::NotFound { .. })),
        "should return NotFound for expired snippet, got: {:?}",
        result
    );
}

/// Expired snippets never appear in latest
pub async fn test_negative_expiry_hidden_from_latest<S: Storage>(storage: &S) {
    let expired = storage
        .insert(NewSnippet::new("zero day", "expires immediately", 0))
        .await
        .expect("insert should succeed");

    let latest = storage.latest().await.expect("latest should succeed");
    assert!(
        latest.iter().all(|s| s.id != expired),
        "expired snippet {} must not be listed",
        expired
    );
}

/// Get on an id that was never assigned is NotFound
pub async fn test_get_nonexistent_snippet<S: Storage>(storage: &S) {
    let result = storage.get(SnippetId::new(i64::MAX)).await;
    match result {
        Err(err) => assert!(err.is_not_found(), "expected NotFound, got: {:?}", err),
        Ok(snippet) => panic!("expected NotFound, got: {:?}", snippet),
    }

    let result = storage.get(SnippetId::new(-5)).await;
    assert!(matches!(result, Err(StorageError::NotFound { .. })));
}

/// Inserted fields come back unchanged and timestamps are store-assigned
pub async fn test_insert_then_get_round_trip<S: Storage>(storage: &S) {
    let before = Utc::now() - Duration::seconds(1);
    let id = storage
        .insert(NewSnippet::new(
            "Over the wintry forest",
            "winds howl in rage\nwith no leaves to blow.\n– Natsume Soseki",
            365,
        ))
        .await
        .expect("insert should succeed");
    let after = Utc::now() + Duration::seconds(1);

    let snippet = storage.get(id).await.expect("get should succeed");
    assert_eq!(snippet.id, id);
    assert_eq!(snippet.title, "Over the wintry forest");
    assert_eq!(
        snippet.content,
        "winds howl in rage\nwith no leaves to blow.\n– Natsume Soseki"
    );
    assert!(
        snippet.created >= before && snippet.created <= after,
        "created {} should be close to insert time",
        snippet.created
    );
    assert!(snippet.expires > snippet.created);
    assert_eq!(snippet.expires - snippet.created, Duration::days(365));
}

/// Repeated gets with no intervening writes return equal values
pub async fn test_get_is_idempotent<S: Storage>(storage: &S) {
    let id = storage
        .insert(NewSnippet::new("same", "every time", 2))
        .await
        .expect("insert should succeed");

    let first = storage.get(id).await.expect("first get should succeed");
    let second = storage.get(id).await.expect("second get should succeed");
    assert_eq!(first, second);
}

/// No validation of title/content happens in the store
pub async fn test_empty_title_and_content_accepted<S: Storage>(storage: &S) {
    let id = storage
        .insert(NewSnippet::new("", "", 1))
        .await
        .expect("empty strings are the caller's concern");

    let snippet = storage.get(id).await.expect("get should succeed");
    assert!(snippet.title.is_empty());
    assert!(snippet.content.is_empty());
}

/// Latest is bounded, strictly ascending and only contains live snippets
pub async fn test_latest_invariants<S: Storage>(storage: &S) {
    let now = Utc::now();
    let latest = storage.latest().await.expect("latest should succeed");

    assert!(latest.len() <= LATEST_LIMIT);
    assert!(
        latest.windows(2).all(|w| w[0].id < w[1].id),
        "ids must be strictly ascending: {:?}",
        latest.iter().map(|s| s.id).collect::<Vec<_>>()
    );
    assert!(latest.iter().all(|s| s.is_live_at(now)));
}

/// Expiries outside the supported years fail the same way on every backend
pub async fn test_unstorable_expiry_rejected_before_insert<S: Storage>(storage: &S) {
    let before = storage.latest().await.expect("latest should succeed");

    for days in [-3_000_000, 3_000_000] {
        let result = storage
            .insert(NewSnippet::new("far off", "x", days))
            .await;
        assert!(
            matches!(result, Err(StorageError::InvalidData(_))),
            "{} days should be InvalidData, got: {:?}",
            days,
            result
        );
    }

    let after = storage.latest().await.expect("latest should succeed");
    assert_eq!(before, after, "rejected inserts must not write rows");
}
