//! Key/value store port - the durable client storage slot.
//!
//! Values are opaque strings (JSON envelopes in practice). The store is
//! process-wide: concurrent writers to the same key overwrite each other and
//! the last write wins.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::foundation::ErrorCode;

/// Errors raised by storage adapters.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StorageError {
    /// Writing would exceed the configured quota.
    #[error("storage quota exceeded: {needed} bytes needed, {limit} bytes allowed")]
    QuotaExceeded { needed: u64, limit: u64 },

    /// The underlying medium failed.
    #[error("storage I/O error: {0}")]
    Io(String),

    /// A value could not be encoded for storage.
    #[error("failed to serialize {key}: {reason}")]
    Serialization { key: String, reason: String },

    /// A stored value exists but cannot be used.
    #[error("record {key} is unreadable: {reason}")]
    Corrupt { key: String, reason: String },

    /// The store refused the operation (e.g. injected failure, invalid key).
    #[error("storage unavailable: {0}")]
    Unavailable(String),
}

impl StorageError {
    /// Stable error code for this error.
    pub fn code(&self) -> ErrorCode {
        match self {
            StorageError::QuotaExceeded { .. } => ErrorCode::QuotaExceeded,
            _ => ErrorCode::StorageFailed,
        }
    }
}

impl From<std::io::Error> for StorageError {
    fn from(err: std::io::Error) -> Self {
        StorageError::Io(err.to_string())
    }
}

/// Durable string storage keyed by name.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Reads a value. Absent keys yield `Ok(None)`.
    async fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Writes a value, replacing any previous one.
    async fn put(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Removes a value. Removing an absent key succeeds.
    async fn remove(&self, key: &str) -> Result<(), StorageError>;

    /// Lists the stored keys in ascending order.
    async fn keys(&self) -> Result<Vec<String>, StorageError>;
}
