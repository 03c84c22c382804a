use crate::traits::KeyValueStore;
use async_trait::async_trait;
use std::collections::HashMap;
use taskboard_core::TaskboardResult;
use tokio::sync::RwLock;

/// In-process store for tests and embedding.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RwLock<HashMap<String, String>>,
    writes: RwLock<usize>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-populated with one entry.
    pub fn with_entry(key: &str, value: impl Into<String>) -> Self {
        let mut entries = HashMap::new();
        entries.insert(key.to_string(), value.into());
        Self {
            entries: RwLock::new(entries),
            writes: RwLock::new(0),
        }
    }

    /// How many times `set` was called.
    pub async fn write_count(&self) -> usize {
        *self.writes.read().await
    }
}

#[async_trait]
impl KeyValueStore for MemoryStore {
    async fn get(&self, key: &str) -> TaskboardResult<Option<String>> {
        Ok(self.entries.read().await.get(key).cloned())
    }

    async fn set(&self, key: &str, value: String) -> TaskboardResult<()> {
        self.entries.write().await.insert(key.to_string(), value);
        *self.writes.write().await += 1;
        Ok(())
    }
}
