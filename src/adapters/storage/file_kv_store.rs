//! File-backed Key/Value Store
//!
//! Stores each key as `<data_dir>/<key>.json`. Writes go to a temporary file
//! that is renamed into place, so a crash mid-write never leaves a torn
//! record behind.

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::fs;

use crate::ports::{KeyValueStore, StorageError};

const EXTENSION: &str = "json";

/// Key/value store keeping one JSON file per key.
#[derive(Debug, Clone)]
pub struct FileKeyValueStore {
    base_path: PathBuf,
    quota_bytes: Option<u64>,
}

impl FileKeyValueStore {
    /// Create a store rooted at `base_path`.
    ///
    /// The directory is created on first write.
    pub fn new<P: AsRef<Path>>(base_path: P) -> Self {
        Self {
            base_path: base_path.as_ref().to_path_buf(),
            quota_bytes: None,
        }
    }

    /// Limit the total size of stored values.
    pub fn with_quota(mut self, quota_bytes: Option<u64>) -> Self {
        self.quota_bytes = quota_bytes;
        self
    }

    /// Root directory of the store.
    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    fn file_path(&self, key: &str) -> Result<PathBuf, StorageError> {
        validate_key(key)?;
        Ok(self.base_path.join(format!("{}.{}", key, EXTENSION)))
    }

    /// Bytes used by every key except `excluded`.
    async fn used_bytes_excluding(&self, excluded: &Path) -> Result<u64, StorageError> {
        let mut total = 0;
        let mut entries = match fs::read_dir(&self.base_path).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(0),
            Err(e) => return Err(e.into()),
        };
        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            if path == excluded || path.extension().and_then(|e| e.to_str()) != Some(EXTENSION) {
                continue;
            }
            total += entry.metadata().await?.len();
        }
        Ok(total)
    }
}

/// Keys become file names, so only a conservative character set is allowed.
pub(crate) fn validate_key(key: &str) -> Result<(), StorageError> {
    let valid = !key.is_empty()
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
    if valid {
        Ok(())
    } else {
        Err(StorageError::Unavailable(format!("invalid key '{}'", key)))
    }
}

#[async_trait]
impl KeyValueStore for FileKeyValueStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let path = self.file_path(key)?;
        match fs::read_to_string(&path).await {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(StorageError::Io(format!("failed to read {}: {}", key, e))),
        }
    }

    async fn put(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let path = self.file_path(key)?;

        if let Some(limit) = self.quota_bytes {
            let needed = self.used_bytes_excluding(&path).await? + value.len() as u64;
            if needed > limit {
                return Err(StorageError::QuotaExceeded { needed, limit });
            }
        }

        fs::create_dir_all(&self.base_path)
            .await
            .map_err(|e| StorageError::Io(format!("failed to create directory: {}", e)))?;

        let temp_path = path.with_extension("tmp");
        fs::write(&temp_path, value)
            .await
            .map_err(|e| StorageError::Io(format!("failed to write temporary file: {}", e)))?;

        // Rename is atomic on the same filesystem
        fs::rename(&temp_path, &path)
            .await
            .map_err(|e| StorageError::Io(format!("failed to rename file: {}", e)))?;

        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<(), StorageError> {
        let path = self.file_path(key)?;
        match fs::remove_file(&path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(StorageError::Io(format!("failed to remove {}: {}", key, e))),
        }
    }

    async fn keys(&self) -> Result<Vec<String>, StorageError> {
        let mut keys = Vec::new();
        let mut entries = match fs::read_dir(&self.base_path).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(keys),
            Err(e) => return Err(e.into()),
        };
        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            if path.extension().and_then(|e| e.to_str()) != Some(EXTENSION) {
                continue;
            }
            if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                keys.push(stem.to_string());
            }
        }
        keys.sort();
        Ok(keys)
    }
}
