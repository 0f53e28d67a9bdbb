//! DraftStore backed by a KeyValueStore.

use async_trait::async_trait;
use std::sync::Arc;

use super::envelope::{RecordCodec, WIZARD_STATE_KIND};
use crate::domain::wizard::WizardState;
use crate::ports::{DraftStore, KeyValueStore, StorageError, DRAFT_KEY};

/// Stores the wizard state under the `draft-progress` key.
pub struct KvDraftStore {
    store: Arc<dyn KeyValueStore>,
    codec: Arc<RecordCodec>,
}

impl KvDraftStore {
    pub fn new(store: Arc<dyn KeyValueStore>, codec: Arc<RecordCodec>) -> Self {
        Self { store, codec }
    }
}

#[async_trait]
impl DraftStore for KvDraftStore {
    async fn load(&self) -> Option<WizardState> {
        let raw = match self.store.get(DRAFT_KEY).await {
            Ok(Some(raw)) => raw,
            Ok(None) => return None,
            Err(e) => {
                tracing::warn!(key = DRAFT_KEY, error = %e, "Failed to read draft, starting empty");
                return None;
            }
        };

        match self.codec.decode::<WizardState>(WIZARD_STATE_KIND, &raw) {
            Ok(decoded) => {
                if decoded.was_migrated() {
                    tracing::warn!(
                        key = DRAFT_KEY,
                        from = decoded.stored_version,
                        to = decoded.current_version,
                        "Migrated stored draft to current schema"
                    );
                }
                Some(decoded.value)
            }
            Err(e) => {
                tracing::warn!(key = DRAFT_KEY, reason = %e, "Discarding unreadable draft");
                None
            }
        }
    }

    async fn save(&self, state: &WizardState) -> Result<(), StorageError> {
        let raw = self
            .codec
            .encode(WIZARD_STATE_KIND, state)
            .map_err(|e| StorageError::Serialization {
                key: DRAFT_KEY.to_string(),
                reason: e.to_string(),
            })?;
        self.store.put(DRAFT_KEY, &raw).await
    }

    async fn clear(&self) -> Result<(), StorageError> {
        self.store.remove(DRAFT_KEY).await
    }
}
