//! ProfileRepository backed by a KeyValueStore.

use async_trait::async_trait;
use std::sync::Arc;

use super::envelope::{RecordCodec, USER_RECORD_KIND};
use crate::domain::profile::UserRecord;
use crate::domain::wizard::StepValidator;
use crate::ports::{KeyValueStore, ProfileRepository, StorageError, USER_KEY};

/// Stores the user record under the `user` key.
pub struct KvProfileRepository {
    store: Arc<dyn KeyValueStore>,
    codec: Arc<RecordCodec>,
}

impl KvProfileRepository {
    pub fn new(store: Arc<dyn KeyValueStore>, codec: Arc<RecordCodec>) -> Self {
        Self { store, codec }
    }
}

#[async_trait]
impl ProfileRepository for KvProfileRepository {
    async fn load(&self) -> Result<Option<UserRecord>, StorageError> {
        let Some(raw) = self.store.get(USER_KEY).await? else {
            return Ok(None);
        };

        match self.codec.decode::<UserRecord>(USER_RECORD_KIND, &raw) {
            Ok(decoded) => {
                if decoded.was_migrated() {
                    tracing::warn!(
                        key = USER_KEY,
                        from = decoded.stored_version,
                        to = decoded.current_version,
                        "Migrated stored user record to current schema"
                    );
                }
                if let Some(reason) = out_of_range(&decoded.value) {
                    tracing::warn!(key = USER_KEY, reason = %reason, "Stored user record breaks profile ranges");
                    return Err(StorageError::Corrupt {
                        key: USER_KEY.to_string(),
                        reason,
                    });
                }
                Ok(Some(decoded.value))
            }
            Err(e) => {
                tracing::warn!(key = USER_KEY, reason = %e, "Stored user record is unreadable");
                Err(StorageError::Corrupt {
                    key: USER_KEY.to_string(),
                    reason: e.to_string(),
                })
            }
        }
    }

    async fn save(&self, record: &UserRecord) -> Result<(), StorageError> {
        let raw = self
            .codec
            .encode(USER_RECORD_KIND, record)
            .map_err(|e| StorageError::Serialization {
                key: USER_KEY.to_string(),
                reason: e.to_string(),
            })?;
        self.store.put(USER_KEY, &raw).await
    }
}

/// Describes the out-of-range fields of the committed profile, if any.
fn out_of_range(record: &UserRecord) -> Option<String> {
    let profile = record.profile_data.as_ref()?;
    let report = StepValidator::validate_ranges(&profile.to_form());
    if report.is_valid() {
        return None;
    }
    let fields: Vec<String> = report
        .errors()
        .iter()
        .map(|(field, message)| format!("{}: {}", field, message))
        .collect();
    Some(fields.join(", "))
}
