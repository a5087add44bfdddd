//! Disk-backed file storage.
//!
//! Files land directly in the upload directory, which the HTTP layer serves
//! back verbatim under `/uploads`.

use std::{io::ErrorKind, path::PathBuf};

use async_trait::async_trait;
use tokio::{fs, io::AsyncWriteExt};

use crate::domain::{FileStorage, StorageError, StoredFileName};

/// Stores uploads as plain files in one directory.
#[derive(Debug, Clone)]
pub struct DiskFileStorage {
    root: PathBuf,
}

impl DiskFileStorage {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    #[cfg(test)]
    pub(crate) fn root(&self) -> &std::path::Path {
        &self.root
    }

    /// Create the upload directory if it does not exist yet.
    pub async fn ensure_root(&self) -> Result<(), StorageError> {
        fs::create_dir_all(&self.root)
            .await
            .map_err(|e| StorageError::Io(format!("{}: {}", self.root.display(), e)))
    }
}

#[async_trait]
impl FileStorage for DiskFileStorage {
    async fn store(&self, name: &StoredFileName, bytes: &[u8]) -> Result<(), StorageError> {
        let path = self.root.join(name.as_str());

        let mut file = match fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&path)
            .await
        {
            Ok(file) => file,
            Err(e) if e.kind() == ErrorKind::AlreadyExists => {
                return Err(StorageError::AlreadyExists(name.to_string()));
            }
            Err(e) => return Err(StorageError::Io(format!("{}: {}", path.display(), e))),
        };

        file.write_all(bytes)
            .await
            .map_err(|e| StorageError::Io(format!("{}: {}", path.display(), e)))?;
        file.flush()
            .await
            .map_err(|e| StorageError::Io(format!("{}: {}", path.display(), e)))?;

        tracing::debug!("Stored {} bytes at {}", bytes.len(), path.display());
        Ok(())
    }
}
