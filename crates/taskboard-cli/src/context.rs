use std::path::PathBuf;
use taskboard_core::AppConfig;
use taskboard_persistence::{JsonFileStore, TaskRepository};

/// Where the board lives: the explicit file, then the configured one, then
/// the platform data directory.
pub fn resolve_store_path(file: Option<PathBuf>, config: &AppConfig) -> anyhow::Result<PathBuf> {
    file.or_else(|| config.effective_default_file())
        .ok_or_else(|| anyhow::anyhow!("No store file given and no data directory found"))
}

pub fn open_repository(path: PathBuf, config: &AppConfig) -> TaskRepository<JsonFileStore> {
    tracing::debug!("Using store {}", path.display());
    TaskRepository::with_config(JsonFileStore::new(path), config)
}
