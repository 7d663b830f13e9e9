use thiserror::Error;

pub type Result<T> = std::result::Result<T, KanbanError>;

#[derive(Debug, Error)]
pub enum KanbanError {
    #[error("Import failed: {0}")]
    ImportFailed(String),

    #[error("Storage error: {0}")]
    StorageError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

impl KanbanError {
    /// Builds the import validation failure for a given reason
    pub fn import(reason: impl Into<String>) -> Self {
        Self::ImportFailed(reason.into())
    }
}
