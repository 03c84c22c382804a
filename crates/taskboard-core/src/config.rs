use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const DEFAULT_STORAGE_KEY: &str = "tasks";
/// Close to what `toLocaleString()` prints for en-US, e.g. `3/14/2025, 9:05:07 AM`.
pub const DEFAULT_COMMENT_DATE_FORMAT: &str = "%-m/%-d/%Y, %-I:%M:%S %p";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Key the task list is stored under
    #[serde(default)]
    pub storage_key: Option<String>,
    /// Store file used when none is given on the command line
    #[serde(default)]
    pub default_file: Option<PathBuf>,
    /// chrono format string for comment timestamps
    #[serde(default)]
    pub comment_date_format: Option<String>,
}

impl AppConfig {
    pub fn config_path() -> Option<PathBuf> {
        #[cfg(target_os = "macos")]
        {
            dirs::home_dir().map(|home| home.join(".config/taskboard/config.toml"))
        }
        #[cfg(not(target_os = "macos"))]
        {
            dirs::config_dir().map(|config| config.join("taskboard").join("config.toml"))
        }
    }

    pub fn load() -> Self {
        match Self::config_path() {
            Some(path) => Self::load_from(&path),
            None => Self::default(),
        }
    }

    /// Read a config file, falling back to defaults if it is missing or malformed.
    pub fn load_from(path: &Path) -> Self {
        if !path.exists() {
            return Self::default();
        }
        std::fs::read_to_string(path)
            .ok()
            .and_then(|content| toml::from_str(&content).ok())
            .unwrap_or_default()
    }

    pub fn effective_storage_key(&self) -> &str {
        self.storage_key
            .as_deref()
            .filter(|key| !key.trim().is_empty())
            .unwrap_or(DEFAULT_STORAGE_KEY)
    }

    pub fn effective_comment_date_format(&self) -> &str {
        self.comment_date_format
            .as_deref()
            .unwrap_or(DEFAULT_COMMENT_DATE_FORMAT)
    }

    pub fn effective_default_file(&self) -> Option<PathBuf> {
        self.default_file.clone().or_else(|| {
            dirs::data_dir().map(|data| data.join("taskboard").join("store.json"))
        })
    }
}
