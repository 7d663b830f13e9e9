use crate::{
    error::{KanbanError, Result},
    storage::Storage,
};
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::fs;

/// File-based storage: one JSON file per key under `<project>/.kanban`
pub struct FileStorage {
    root_path: PathBuf,
}

impl FileStorage {
    const KANBAN_DIR: &'static str = ".kanban";
    const CONFIG_FILE: &'static str = "config.toml";

    /// Creates a new FileStorage instance for the given project root
    pub fn new(project_root: impl AsRef<Path>) -> Self {
        Self {
            root_path: project_root.as_ref().join(Self::KANBAN_DIR),
        }
    }

    pub fn root_path(&self) -> &Path {
        &self.root_path
    }

    /// Location of the optional `config.toml`
    pub fn config_file(&self) -> PathBuf {
        self.root_path.join(Self::CONFIG_FILE)
    }

    fn key_file(&self, key: &str) -> Result<PathBuf> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-' || c == '.')
            && !key.starts_with('.');
        if !valid {
            return Err(KanbanError::StorageError(format!(
                "invalid storage key: {:?}",
                key
            )));
        }
        Ok(self.root_path.join(format!("{}.json", key)))
    }

    async fn ensure_directory_exists(&self, path: &Path) -> Result<()> {
        if !path.exists() {
            fs::create_dir_all(path).await?;
        }
        Ok(())
    }
}

#[async_trait]
impl Storage for FileStorage {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        let file_path = self.key_file(key)?;

        if !file_path.exists() {
            return Ok(None);
        }

        let contents = fs::read_to_string(&file_path).await?;
        Ok(Some(contents))
    }

    async fn set(&self, key: &str, value: &str) -> Result<()> {
        let file_path = self.key_file(key)?;
        self.ensure_directory_exists(&self.root_path).await?;

        fs::write(file_path, value).await?;
        Ok(())
    }
}
