//! FileStorage trait 定義

use async_trait::async_trait;

use super::{StorageError, StoredFileName};

/// Write-once storage for uploaded files.
#[async_trait]
pub trait FileStorage: Send + Sync {
    /// Store `bytes` under exactly `name`.
    ///
    /// Must fail with [`StorageError::AlreadyExists`] instead of overwriting
    /// an existing file.
    async fn store(&self, name: &StoredFileName, bytes: &[u8]) -> Result<(), StorageError>;
}
