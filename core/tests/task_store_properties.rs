mod common;

use common::{memory_store, seeded_store, store_with, task, today, tomorrow, yesterday};
use pretty_assertions::assert_eq;
use taskflow_core::api::{BlobStore, Priority, StatusFilter, StoreError, TaskStats, DEFAULT_TASKS_KEY};
use taskflow_core::store::{decode_collection, encode_collection};

#[tokio::test]
async fn missing_blob_loads_as_empty() {
    let (_, store) = memory_store();
    assert!(store.load().await.is_empty());
    assert!(store.try_load().await.unwrap().is_empty());
}

#[tokio::test]
async fn store_of_load_is_identity() {
    let (blob, store) = memory_store();
    store.insert(task("1", Priority::High).with_due_date(tomorrow())).await.unwrap();
    store.insert(task("2", Priority::Low).with_description("notes")).await.unwrap();

    let before = blob.get(DEFAULT_TASKS_KEY).await.unwrap().unwrap();
    let reencoded = encode_collection(&store.load().await).unwrap();
    assert_eq!(reencoded, before);
    assert_eq!(decode_collection(&reencoded).unwrap(), store.load().await);
}

#[tokio::test]
async fn insert_appends_at_end() {
    let store = store_with(&[task("1", Priority::Low), task("2", Priority::Medium)]).await;
    let new_task = task("3", Priority::High);

    let returned = store.insert(new_task.clone()).await.unwrap();
    let loaded = store.load().await;

    assert_eq!(returned, loaded);
    assert_eq!(loaded.len(), 3);
    assert_eq!(loaded.last(), Some(&new_task));
}

#[tokio::test]
async fn update_of_absent_id_is_not_found_and_changes_nothing() {
    let store = store_with(&[task("1", Priority::Low)]).await;
    let before = store.load().await;

    let err = store
        .update_by_id("missing", task("missing", Priority::High))
        .await
        .unwrap_err();
    assert!(matches!(err, StoreError::NotFound { ref id } if id == "missing"));
    assert_eq!(store.load().await, before);
}

#[tokio::test]
async fn update_replaces_the_whole_record() {
    let original = task("1", Priority::Low)
        .with_description("keep me?")
        .with_due_date(tomorrow());
    let store = store_with(&[task("0", Priority::Medium), original, task("2", Priority::Medium)]).await;

    // No description, no due date: the update must not merge them back in.
    let replacement = task("1", Priority::High).with_completed(true);
    store.update_by_id("1", replacement.clone()).await.unwrap();

    let loaded = store.load().await;
    assert_eq!(loaded[1], replacement);
    assert_eq!(loaded[0].id, "0");
    assert_eq!(loaded[2].id, "2");
}

#[tokio::test]
async fn update_may_change_id_when_caller_asks() {
    let store = store_with(&[task("1", Priority::Low)]).await;
    store.update_by_id("1", task("99", Priority::Low)).await.unwrap();

    assert!(store.get_by_id("1").await.is_none());
    assert!(store.get_by_id("99").await.is_some());
}

#[tokio::test]
async fn delete_is_idempotent() {
    let store = store_with(&[task("1", Priority::Low), task("2", Priority::High)]).await;
    let before = store.load().await;

    store.delete_by_id("absent").await.unwrap();
    assert_eq!(store.load().await, before);

    let once = store.delete_by_id("1").await.unwrap();
    let twice = store.delete_by_id("1").await.unwrap();
    assert_eq!(once, twice);
    assert_eq!(store.load().await, vec![task("2", Priority::High)]);
}

#[tokio::test]
async fn clear_then_load_is_empty_with_zero_stats() {
    let (blob, store) = memory_store();
    store.insert(task("1", Priority::Low)).await.unwrap();

    assert!(store.clear_all().await.unwrap().is_empty());
    assert!(store.load().await.is_empty());
    assert_eq!(store.stats(today()).await, TaskStats::default());
    assert_eq!(blob.get(DEFAULT_TASKS_KEY).await.unwrap(), None);

    // Clearing an already-empty store still succeeds.
    assert!(store.clear_all().await.unwrap().is_empty());
}

#[tokio::test]
async fn stats_example_from_the_dashboard() {
    let store = store_with(&[
        task("1", Priority::Medium).with_due_date(yesterday()),
        task("2", Priority::Medium).with_due_date(tomorrow()),
        task("3", Priority::Medium)
            .with_due_date(yesterday())
            .with_completed(true),
    ])
    .await;

    assert_eq!(
        store.stats(today()).await,
        TaskStats {
            total: 3,
            completed: 1,
            pending: 2,
            overdue: 1,
        }
    );
    assert_eq!(store.completed_count().await, 1);
}

#[tokio::test]
async fn priority_filter_keeps_order() {
    let store = store_with(&[
        task("1", Priority::High),
        task("2", Priority::Low),
        task("3", Priority::High),
        task("4", Priority::Medium),
        task("5", Priority::High),
    ])
    .await;

    let ids: Vec<_> = store
        .by_priority(Priority::High)
        .await
        .into_iter()
        .map(|t| t.id)
        .collect();
    assert_eq!(ids, vec!["1", "3", "5"]);
    assert!(store_with(&[]).await.by_priority(Priority::Low).await.is_empty());
}

#[tokio::test]
async fn status_filter_splits_pending_and_completed() {
    let store = store_with(&[
        task("1", Priority::Low).with_completed(true),
        task("2", Priority::Low),
        task("3", Priority::Low).with_completed(true),
    ])
    .await;

    let ids = |tasks: Vec<taskflow_core::api::Task>| tasks.into_iter().map(|t| t.id).collect::<Vec<_>>();
    assert_eq!(ids(store.by_status(StatusFilter::Completed).await), vec!["1", "3"]);
    assert_eq!(ids(store.by_status(StatusFilter::Pending).await), vec!["2"]);
    assert_eq!(store.by_status(StatusFilter::All).await.len(), 3);
}

#[tokio::test]
async fn malformed_blob_degrades_reads_to_empty() {
    let store = seeded_store("{\"not\": \"a list\"}");

    assert!(store.load().await.is_empty());
    assert_eq!(store.stats(today()).await, TaskStats::default());
    assert!(store.by_priority(Priority::Medium).await.is_empty());
    assert_eq!(store.completed_count().await, 0);
    assert!(matches!(
        store.try_load().await,
        Err(StoreError::MalformedData(_))
    ));
}

#[tokio::test]
async fn legacy_records_with_unknown_priority_and_extra_fields_load() {
    let store = seeded_store(
        r#"[{"id":"1","title":"old","priority":"urgent","completed":false,
             "createdAt":"2024-01-01T00:00:00.000Z","tags":["x"]}]"#,
    );

    let tasks = store.load().await;
    assert_eq!(tasks.len(), 1);
    assert_eq!(tasks[0].priority, Priority::Medium);
    assert_eq!(tasks[0].description, "");
}

#[tokio::test]
async fn odd_fields_in_one_record_do_not_cost_the_others() {
    let store = seeded_store(
        r#"[
            {"id":"1","title":"Pay rent","priority":"high","completed":false,
             "createdAt":"2024-05-01T08:00:00.000Z","dueDate":"2024-05-03T00:00:00.000Z"},
            {"id":"2","title":"Dentist","description":null,"completed":null,
             "createdAt":"2024-05-01T08:00:00.000Z","dueDate":"May 3"}
        ]"#,
    );

    let loaded = store.try_load().await.unwrap();
    assert_eq!(loaded.len(), 2);
    assert_eq!(loaded[1].description, "");
    assert_eq!(loaded[1].due_date, None);

    let tasks = store.insert(task("3", Priority::Low)).await.unwrap();
    let ids: Vec<&str> = tasks.iter().map(|t| t.id.as_str()).collect();
    assert_eq!(ids, vec!["1", "2", "3"]);
    assert_eq!(store.load().await, tasks);
}

#[tokio::test]
async fn no_op_write_keeps_foreign_timestamps_observably_unchanged() {
    let store = seeded_store(
        r#"[{"id":"1","title":"Sync","createdAt":"2024-05-01T08:00:00.123456Z",
             "dueDate":"2024-05-01T10:00:00+02:00"}]"#,
    );
    let before = store.load().await;

    store.delete_by_id("absent").await.unwrap();

    assert_eq!(store.load().await, before);
    assert!(store
        .export_json()
        .await
        .unwrap()
        .contains("2024-05-01T08:00:00.123456Z"));
}
