//! Profile repository port - the user record holding the committed profile.

use async_trait::async_trait;

use super::StorageError;
use crate::domain::profile::UserRecord;

/// Storage key of the user record.
pub const USER_KEY: &str = "user";

/// Reads and writes the user record.
#[async_trait]
pub trait ProfileRepository: Send + Sync {
    /// Loads the user record, `Ok(None)` when none has been written.
    ///
    /// # Errors
    ///
    /// `StorageError::Corrupt` when a record exists but cannot be read.
    async fn load(&self) -> Result<Option<UserRecord>, StorageError>;

    /// Replaces the user record.
    async fn save(&self, record: &UserRecord) -> Result<(), StorageError>;
}
