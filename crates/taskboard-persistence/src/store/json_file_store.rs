use crate::store::atomic_writer::AtomicWriter;
use crate::traits::KeyValueStore;
use async_trait::async_trait;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use taskboard_core::{TaskboardError, TaskboardResult};

/// Key-value store kept as one JSON object of string values on disk.
///
/// Every `get` reads the file and every `set` rewrites it atomically, so the
/// file is the only state; several processes may share it.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub async fn exists(&self) -> bool {
        tokio::fs::try_exists(&self.path).await.unwrap_or(false)
    }

    async fn read_entries(&self) -> TaskboardResult<BTreeMap<String, String>> {
        let Some(bytes) = AtomicWriter::read_if_exists(&self.path).await? else {
            return Ok(BTreeMap::new());
        };
        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(BTreeMap::new());
        }
        serde_json::from_slice(&bytes).map_err(|e| {
            TaskboardError::Serialization(format!("{}: {}", self.path.display(), e))
        })
    }
}

#[async_trait]
impl KeyValueStore for JsonFileStore {
    async fn get(&self, key: &str) -> TaskboardResult<Option<String>> {
        let mut entries = self.read_entries().await?;
        Ok(entries.remove(key))
    }

    async fn set(&self, key: &str, value: String) -> TaskboardResult<()> {
        let mut entries = self.read_entries().await?;
        entries.insert(key.to_string(), value);
        let bytes = serde_json::to_vec_pretty(&entries)
            .map_err(|e| TaskboardError::Serialization(e.to_string()))?;
        AtomicWriter::write_atomic(&self.path, &bytes).await?;
        tracing::debug!("Stored key '{}' in {}", key, self.path.display());
        Ok(())
    }
}
