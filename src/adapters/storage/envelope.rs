//! Versioned record envelope.
//!
//! Every persisted value is wrapped as
//!
//! ```json
//! { "kind": "wizard-state", "schema_version": 2, "checksum": "<sha256 hex>", "payload": { ... } }
//! ```
//!
//! Decoding parses the envelope, checks kind and checksum, runs the payload
//! through the upcaster chain and finally deserializes it. Values without an
//! envelope are records written by the web client and are treated as
//! schema version 1.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use sha2::{Digest, Sha256};
use std::sync::Arc;
use thiserror::Error;

use super::legacy::{UserRecordV1ToV2, WizardStateV1ToV2};
use crate::domain::foundation::{UpcastError, UpcasterRegistry};

/// Record kind of the persisted WizardState.
pub const WIZARD_STATE_KIND: &str = "wizard-state";
/// Record kind of the persisted UserRecord.
pub const USER_RECORD_KIND: &str = "user-record";
/// Record kind of a persisted SessionRecord.
pub const SESSION_RECORD_KIND: &str = "session-record";

/// Version assumed for values that carry no envelope.
const LEGACY_VERSION: u32 = 1;

/// Reasons a stored value cannot be decoded.
#[derive(Debug, Error)]
pub enum EnvelopeError {
    #[error("value is not valid JSON: {0}")]
    Malformed(#[source] serde_json::Error),

    #[error("expected a {expected} record, found {found}")]
    WrongKind { expected: String, found: String },

    #[error("checksum mismatch: stored {stored}, computed {computed}")]
    ChecksumMismatch { stored: String, computed: String },

    #[error("migration failed: {0}")]
    Upcast(#[from] UpcastError),

    #[error("payload does not match the current schema: {0}")]
    Payload(#[source] serde_json::Error),

    #[error("failed to encode payload: {0}")]
    Encode(#[source] serde_json::Error),
}

#[derive(Debug, Serialize, Deserialize)]
struct Envelope {
    kind: String,
    schema_version: u32,
    checksum: String,
    payload: JsonValue,
}

/// A decoded record and the version it was stored at.
#[derive(Debug, Clone, PartialEq)]
pub struct Decoded<T> {
    pub value: T,
    pub stored_version: u32,
    pub current_version: u32,
}

impl<T> Decoded<T> {
    /// True when the record went through at least one upcaster.
    pub fn was_migrated(&self) -> bool {
        self.stored_version < self.current_version
    }
}

/// Encodes and decodes envelopes for the known record kinds.
pub struct RecordCodec {
    registry: UpcasterRegistry,
}

impl RecordCodec {
    /// Codec with every record kind and upcaster registered.
    pub fn new() -> Self {
        let mut registry = UpcasterRegistry::new();
        registry.register(Arc::new(WizardStateV1ToV2));
        registry.set_current_version(WIZARD_STATE_KIND, 2);
        registry.register(Arc::new(UserRecordV1ToV2));
        registry.set_current_version(USER_RECORD_KIND, 2);
        registry.set_current_version(SESSION_RECORD_KIND, 1);
        Self { registry }
    }

    /// Codec over a caller-supplied registry.
    pub fn with_registry(registry: UpcasterRegistry) -> Self {
        Self { registry }
    }

    /// Current schema version of a kind.
    pub fn current_version(&self, kind: &str) -> u32 {
        self.registry.current_version(kind)
    }

    /// Wraps a value in an envelope at the kind's current version.
    pub fn encode<T: Serialize>(&self, kind: &str, value: &T) -> Result<String, EnvelopeError> {
        let payload = serde_json::to_value(value).map_err(EnvelopeError::Encode)?;
        let envelope = Envelope {
            kind: kind.to_string(),
            schema_version: self.current_version(kind),
            checksum: checksum(&payload)?,
            payload,
        };
        serde_json::to_string(&envelope).map_err(EnvelopeError::Encode)
    }

    /// Unwraps, verifies and migrates a stored value.
    pub fn decode<T: DeserializeOwned>(
        &self,
        kind: &str,
        raw: &str,
    ) -> Result<Decoded<T>, EnvelopeError> {
        let value: JsonValue = serde_json::from_str(raw).map_err(EnvelopeError::Malformed)?;

        let (stored_version, payload) = if is_envelope(&value) {
            let envelope: Envelope =
                serde_json::from_value(value).map_err(EnvelopeError::Malformed)?;
            if envelope.kind != kind {
                return Err(EnvelopeError::WrongKind {
                    expected: kind.to_string(),
                    found: envelope.kind,
                });
            }
            let computed = checksum(&envelope.payload)?;
            if computed != envelope.checksum {
                return Err(EnvelopeError::ChecksumMismatch {
                    stored: envelope.checksum,
                    computed,
                });
            }
            (envelope.schema_version, envelope.payload)
        } else {
            (LEGACY_VERSION, value)
        };

        let current_version = self.current_version(kind);
        let payload = self
            .registry
            .upcast_to_current(kind, stored_version, payload)?;
        let value = serde_json::from_value(payload).map_err(EnvelopeError::Payload)?;

        Ok(Decoded {
            value,
            stored_version,
            current_version,
        })
    }
}

impl Default for RecordCodec {
    fn default() -> Self {
        Self::new()
    }
}

fn is_envelope(value: &JsonValue) -> bool {
    value.get("kind").map_or(false, JsonValue::is_string)
        && value.get("schema_version").map_or(false, JsonValue::is_u64)
        && value.get("checksum").map_or(false, JsonValue::is_string)
        && value.get("payload").is_some()
}

/// Lowercase hex SHA-256 of the payload's JSON text.
///
/// `serde_json` maps keep keys sorted, so the text is canonical.
fn checksum(payload: &JsonValue) -> Result<String, EnvelopeError> {
    let canonical = serde_json::to_string(payload).map_err(EnvelopeError::Encode)?;
    let mut hasher = Sha256::new();
    hasher.update(canonical.as_bytes());
    Ok(format!("{:x}", hasher.finalize()))
}
