use chrono::{Duration, TimeZone, Utc};
use pretty_assertions::assert_eq;

use taskflow_core::api::{AppConfig, Priority, StorageBackend, Task, TaskStats, TaskStore};
use taskflow_plugins::factory::build_task_store;
use taskflow_plugins::storage::FileBlobStore;

fn file_config(dir: &std::path::Path) -> AppConfig {
    let mut cfg = AppConfig::default();
    cfg.storage.backend = StorageBackend::File;
    cfg.storage.data_dir = dir.to_string_lossy().to_string();
    cfg
}

#[tokio::test]
async fn collection_survives_a_new_store_instance() {
    let dir = tempfile::tempdir().unwrap();
    let cfg = file_config(dir.path());
    let created = Utc.with_ymd_and_hms(2024, 5, 1, 8, 0, 0).unwrap();

    let first = build_task_store(&cfg).unwrap();
    first
        .insert(Task::new("1", "Water plants", created).with_priority(Priority::High))
        .await
        .unwrap();
    first
        .insert(Task::new("2", "File taxes", created).with_due_date(created + Duration::days(1)))
        .await
        .unwrap();
    first.toggle_completed("1").await.unwrap();

    let second = build_task_store(&cfg).unwrap();
    let tasks = second.load().await;
    assert_eq!(tasks, first.load().await);
    assert_eq!(
        second.stats(created + Duration::days(2)).await,
        TaskStats {
            total: 2,
            completed: 1,
            pending: 1,
            overdue: 1,
        }
    );
}

#[tokio::test]
async fn on_disk_format_matches_the_wire_schema() {
    let dir = tempfile::tempdir().unwrap();
    let blob = std::sync::Arc::new(FileBlobStore::new(dir.path()));
    let store = TaskStore::new(blob.clone());
    let created = Utc.with_ymd_and_hms(2024, 5, 1, 8, 0, 0).unwrap();

    store
        .insert(Task::new("1714550400000", "Call dentist", created).with_description("before noon"))
        .await
        .unwrap();

    let raw = std::fs::read_to_string(blob.path_for(store.key())).unwrap();
    let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(
        value,
        serde_json::json!([{
            "id": "1714550400000",
            "title": "Call dentist",
            "description": "before noon",
            "priority": "medium",
            "completed": false,
            "createdAt": "2024-05-01T08:00:00.000Z"
        }])
    );
}

#[tokio::test]
async fn corrupt_file_reads_empty_and_is_replaced_on_next_insert() {
    let dir = tempfile::tempdir().unwrap();
    let blob = FileBlobStore::new(dir.path());
    std::fs::write(blob.path_for("@taskflow_tasks"), "[{\"id\": ").unwrap();
    let store = TaskStore::new(std::sync::Arc::new(blob));

    assert!(store.load().await.is_empty());

    let created = Utc.with_ymd_and_hms(2024, 5, 1, 8, 0, 0).unwrap();
    store.insert(Task::new("1", "fresh", created)).await.unwrap();
    assert_eq!(store.try_load().await.unwrap().len(), 1);
}

#[tokio::test]
async fn clear_all_deletes_the_file() {
    let dir = tempfile::tempdir().unwrap();
    let blob = std::sync::Arc::new(FileBlobStore::new(dir.path()));
    let store = TaskStore::new(blob.clone());
    let created = Utc.with_ymd_and_hms(2024, 5, 1, 8, 0, 0).unwrap();

    store.insert(Task::new("1", "x", created)).await.unwrap();
    assert!(blob.path_for(store.key()).exists());

    store.clear_all().await.unwrap();
    assert!(!blob.path_for(store.key()).exists());
    assert!(store.load().await.is_empty());
}

#[tokio::test]
async fn non_utf8_file_is_replaced_on_next_insert() {
    let dir = tempfile::tempdir().unwrap();
    let blob = FileBlobStore::new(dir.path());
    std::fs::write(blob.path_for("@taskflow_tasks"), [0xff, 0xfe, b'[', b']']).unwrap();
    let store = TaskStore::new(std::sync::Arc::new(blob));

    assert!(store.load().await.is_empty());

    let created = Utc.with_ymd_and_hms(2024, 5, 1, 8, 0, 0).unwrap();
    let tasks = store.insert(Task::new("1", "fresh", created)).await.unwrap();
    assert_eq!(tasks.len(), 1);
    assert_eq!(store.try_load().await.unwrap(), tasks);
}
