//! SessionStore backed by a KeyValueStore.

use async_trait::async_trait;
use std::sync::Arc;

use super::envelope::{RecordCodec, SESSION_RECORD_KIND};
use crate::domain::session::{SessionRecord, SessionSlot};
use crate::ports::{KeyValueStore, SessionStore, StorageError};

/// Stores each slot under its own key (`session`, `doctor-session`).
pub struct KvSessionStore {
    store: Arc<dyn KeyValueStore>,
    codec: Arc<RecordCodec>,
}

impl KvSessionStore {
    pub fn new(store: Arc<dyn KeyValueStore>, codec: Arc<RecordCodec>) -> Self {
        Self { store, codec }
    }
}

#[async_trait]
impl SessionStore for KvSessionStore {
    async fn load(&self, slot: SessionSlot) -> Result<Option<SessionRecord>, StorageError> {
        let key = slot.storage_key();
        let Some(raw) = self.store.get(key).await? else {
            return Ok(None);
        };

        let corrupt = |reason: String| {
            tracing::warn!(key, reason = %reason, "Stored session record is unreadable");
            StorageError::Corrupt {
                key: key.to_string(),
                reason,
            }
        };

        let record = self
            .codec
            .decode::<SessionRecord>(SESSION_RECORD_KIND, &raw)
            .map_err(|e| corrupt(e.to_string()))?
            .value;

        if record.slot() != slot {
            return Err(corrupt(format!("{} session stored in the {} slot", record.role, slot)));
        }
        Ok(Some(record))
    }

    async fn save(&self, record: &SessionRecord) -> Result<(), StorageError> {
        let key = record.slot().storage_key();
        let raw = self
            .codec
            .encode(SESSION_RECORD_KIND, record)
            .map_err(|e| StorageError::Serialization {
                key: key.to_string(),
                reason: e.to_string(),
            })?;
        self.store.put(key, &raw).await
    }

    async fn delete(&self, slot: SessionSlot) -> Result<(), StorageError> {
        self.store.remove(slot.storage_key()).await
    }
}
