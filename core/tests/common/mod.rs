use std::sync::Arc;

use chrono::{DateTime, Duration, TimeZone, Utc};
use taskflow_core::api::{MemoryBlobStore, Priority, Task, TaskStore, DEFAULT_TASKS_KEY};

pub fn today() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 5, 10, 12, 0, 0).unwrap()
}

pub fn yesterday() -> DateTime<Utc> {
    today() - Duration::days(1)
}

pub fn tomorrow() -> DateTime<Utc> {
    today() + Duration::days(1)
}

pub fn task(id: &str, priority: Priority) -> Task {
    Task::new(id, format!("task {id}"), yesterday() - Duration::days(3)).with_priority(priority)
}

pub fn memory_store() -> (Arc<MemoryBlobStore>, TaskStore) {
    let blob = Arc::new(MemoryBlobStore::new());
    (blob.clone(), TaskStore::new(blob))
}

pub fn seeded_store(blob: &str) -> TaskStore {
    TaskStore::new(Arc::new(MemoryBlobStore::with_entry(DEFAULT_TASKS_KEY, blob)))
}

pub async fn store_with(tasks: &[Task]) -> TaskStore {
    let (_, store) = memory_store();
    for t in tasks {
        store.insert(t.clone()).await.unwrap();
    }
    store
}
