//! Session store port - one persisted SessionRecord per slot.

use async_trait::async_trait;

use super::StorageError;
use crate::domain::session::{SessionRecord, SessionSlot};

/// Reads, writes and deletes session records.
///
/// Slots are independent: writing the doctor slot never touches the general
/// one.
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Loads the record in a slot.
    ///
    /// # Errors
    ///
    /// `StorageError::Corrupt` when a record exists but cannot be read.
    async fn load(&self, slot: SessionSlot) -> Result<Option<SessionRecord>, StorageError>;

    /// Writes a record into its role's slot.
    async fn save(&self, record: &SessionRecord) -> Result<(), StorageError>;

    /// Deletes the record in a slot. Idempotent.
    async fn delete(&self, slot: SessionSlot) -> Result<(), StorageError>;
}
