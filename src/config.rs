use crate::error::{KanbanError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tokio::fs;

/// Settings read from `config.toml`; every field is optional in the file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct KanbanConfig {
    /// Key the board snapshot is stored under
    pub storage_key: String,
    /// Suggested file name for exported snapshots
    pub export_file_name: String,
}

impl KanbanConfig {
    pub const DEFAULT_STORAGE_KEY: &'static str = "kanban_mini_v1";
    pub const DEFAULT_EXPORT_FILE_NAME: &'static str = "kanban_board.json";

    /// Loads the config at `path`, falling back to defaults if the file is absent
    pub async fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path).await?;
        Self::from_toml(&contents)
    }

    pub fn from_toml(contents: &str) -> Result<Self> {
        toml::from_str(contents).map_err(|e| KanbanError::ConfigError(e.to_string()))
    }
}

impl Default for KanbanConfig {
    fn default() -> Self {
        Self {
            storage_key: Self::DEFAULT_STORAGE_KEY.to_string(),
            export_file_name: Self::DEFAULT_EXPORT_FILE_NAME.to_string(),
        }
    }
}
