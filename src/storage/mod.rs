use crate::error::Result;
use async_trait::async_trait;

#[cfg(feature = "file-storage")]
pub mod file_storage;
pub mod memory_storage;

#[cfg(feature = "file-storage")]
pub use file_storage::FileStorage;
pub use memory_storage::MemoryStorage;

/// Durable key-value store for serialized board snapshots
#[async_trait]
pub trait Storage: Send + Sync {
    /// Reads the value stored under `key`, `None` if nothing was ever written
    async fn get(&self, key: &str) -> Result<Option<String>>;

    /// Replaces the value stored under `key`
    async fn set(&self, key: &str, value: &str) -> Result<()>;
}
