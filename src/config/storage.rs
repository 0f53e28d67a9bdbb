//! Storage configuration

use serde::Deserialize;
use std::path::PathBuf;

use super::error::ValidationError;

/// Where persisted records live.
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    /// One JSON file per key under `data_dir`
    #[default]
    File,
    /// Process memory only
    Memory,
}

/// Storage configuration
#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    #[serde(default)]
    pub backend: StorageBackend,

    /// Directory for the file backend
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,

    /// Total bytes the store may hold; unlimited when absent
    pub quota_bytes: Option<u64>,
}

impl StorageConfig {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.backend == StorageBackend::File && self.data_dir.as_os_str().is_empty() {
            return Err(ValidationError::MissingRequired("storage.data_dir"));
        }
        if self.quota_bytes == Some(0) {
            return Err(ValidationError::InvalidQuota);
        }
        Ok(())
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: StorageBackend::default(),
            data_dir: default_data_dir(),
            quota_bytes: None,
        }
    }
}

fn default_data_dir() -> PathBuf {
    PathBuf::from("./data")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_storage_defaults() {
        let config = StorageConfig::default();
        assert_eq!(config.backend, StorageBackend::File);
        assert_eq!(config.data_dir, PathBuf::from("./data"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_empty_data_dir_only_matters_for_file_backend() {
        let mut config = StorageConfig {
            data_dir: PathBuf::new(),
            ..Default::default()
        };
        assert!(config.validate().is_err());

        config.backend = StorageBackend::Memory;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_zero_quota_is_invalid() {
        let config = StorageConfig {
            quota_bytes: Some(0),
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(ValidationError::InvalidQuota));
    }

    #[test]
    fn test_backend_deserialization() {
        let config: StorageConfig =
            serde_json::from_str(r#"{"backend": "memory", "quota_bytes": 5242880}"#).unwrap();
        assert_eq!(config.backend, StorageBackend::Memory);
        assert_eq!(config.quota_bytes, Some(5_242_880));
    }
}
