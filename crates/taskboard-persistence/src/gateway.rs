use crate::serialization::JsonSerializer;
use crate::traits::{KeyValueStore, Serializer};
use taskboard_core::{TaskboardResult, DEFAULT_STORAGE_KEY};
use taskboard_domain::Task;

/// Reads and writes the whole task list as one serialized value under one key.
///
/// There are no partial writes: `save` always replaces the entire blob.
pub struct StorageGateway<S> {
    store: S,
    key: String,
    serializer: JsonSerializer,
}

impl<S: KeyValueStore> StorageGateway<S> {
    pub fn new(store: S) -> Self {
        Self::with_key(store, DEFAULT_STORAGE_KEY)
    }

    pub fn with_key(store: S, key: impl Into<String>) -> Self {
        Self {
            store,
            key: key.into(),
            serializer: JsonSerializer,
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Every stored task in stored order. Nothing stored means no tasks.
    pub async fn load(&self) -> TaskboardResult<Vec<Task>> {
        let Some(raw) = self.store.get(&self.key).await? else {
            return Ok(Vec::new());
        };
        if raw.trim().is_empty() {
            return Ok(Vec::new());
        }
        // A stored `null` reads as an empty board
        let tasks: Option<Vec<Task>> = self.serializer.deserialize(raw.as_bytes())?;
        Ok(tasks.unwrap_or_default())
    }

    pub async fn save(&self, tasks: Vec<Task>) -> TaskboardResult<()> {
        let count = tasks.len();
        let bytes = self.serializer.serialize(&tasks)?;
        let raw = String::from_utf8(bytes)
            .map_err(|e| taskboard_core::TaskboardError::Serialization(e.to_string()))?;
        self.store.set(&self.key, raw).await?;
        tracing::debug!("Saved {} tasks under '{}'", count, self.key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;
    use taskboard_domain::{ChecklistItem, TaskStatus};

    #[tokio::test]
    async fn test_nothing_stored_is_empty() {
        let gateway = StorageGateway::new(MemoryStore::new());
        assert!(gateway.load().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_blank_and_null_blobs_are_empty() {
        let gateway = StorageGateway::new(MemoryStore::with_entry("tasks", ""));
        assert!(gateway.load().await.unwrap().is_empty());

        let gateway = StorageGateway::new(MemoryStore::with_entry("tasks", "null"));
        assert!(gateway.load().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_loads_blob_with_missing_fields() {
        let blob = r#"[
            {"id":1700000000001,"text":"Buy milk","status":"inprogress","description":"",
             "checklist":[{"id":1700000000002,"text":"A","completed":true}],
             "images":[{"id":1700000000003.25,"data":"data:image/png;base64,AA==","name":"a.png"}],
             "comments":[{"id":1700000000004,"text":"hi","date":"3/14/2025, 9:05:07 AM"}]},
            {"id":1700000000005,"text":"Legacy","status":"done"}
        ]"#;
        let gateway = StorageGateway::new(MemoryStore::with_entry("tasks", blob));

        let tasks = gateway.load().await.unwrap();
        assert_eq!(tasks.len(), 2);
        assert_eq!(tasks[0].status, TaskStatus::InProgress);
        assert!(tasks[0].checklist[0].completed);
        assert_eq!(tasks[0].images[0].id, 1700000000003.25);
        assert_eq!(tasks[0].comments[0].date, "3/14/2025, 9:05:07 AM");
        assert!(tasks[1].checklist.is_empty());
    }

    #[tokio::test]
    async fn test_save_load_is_idempotent() {
        let gateway = StorageGateway::new(MemoryStore::new());
        let mut task = Task::new(1, "A".to_string());
        task.checklist.push(ChecklistItem::new(2, "x".to_string()));
        gateway.save(vec![task, Task::new(3, "B".to_string())]).await.unwrap();

        let first_blob = gateway.store().get("tasks").await.unwrap();
        let loaded = gateway.load().await.unwrap();
        gateway.save(loaded.clone()).await.unwrap();
        let second_blob = gateway.store().get("tasks").await.unwrap();

        assert_eq!(first_blob, second_blob);
        assert_eq!(gateway.load().await.unwrap(), loaded);
    }

    #[tokio::test]
    async fn test_custom_key() {
        let gateway = StorageGateway::with_key(MemoryStore::new(), "work");
        gateway.save(vec![Task::new(1, "A".to_string())]).await.unwrap();
        assert!(gateway.store().get("tasks").await.unwrap().is_none());
        assert!(gateway.store().get("work").await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_stored_field_names() {
        let gateway = StorageGateway::new(MemoryStore::new());
        gateway.save(vec![Task::new(7, "A".to_string())]).await.unwrap();
        let blob = gateway.store().get("tasks").await.unwrap().unwrap();
        assert_eq!(
            blob,
            r#"[{"id":7,"text":"A","status":"todo","description":"","checklist":[],"images":[],"comments":[]}]"#
        );
    }
}
