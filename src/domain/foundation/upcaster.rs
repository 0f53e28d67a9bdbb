//! Record upcaster infrastructure for persisted-schema evolution.
//!
//! Persisted records carry a `kind` and a `schema_version`. When the stored
//! version is older than the current one, the registry chains single-step
//! upcasters (v1 → v2 → ...) over the raw JSON payload before it is
//! deserialized into a typed value.
//!
//! # Example
//!
//! ```ignore
//! struct DraftV1ToV2;
//!
//! impl Upcaster for DraftV1ToV2 {
//!     fn kind(&self) -> &str { "draft-progress" }
//!     fn source_version(&self) -> u32 { 1 }
//!
//!     fn upcast(&self, mut payload: serde_json::Value) -> Result<serde_json::Value, UpcastError> {
//!         payload["connectedDeviceIds"] = payload["connectedDevices"].take();
//!         Ok(payload)
//!     }
//! }
//! ```

use serde_json::Value as JsonValue;
use std::collections::HashMap;
use std::sync::Arc;
use thiserror::Error;

/// Errors that can occur during record upcasting.
#[derive(Debug, Error)]
pub enum UpcastError {
    /// Required field is missing from the source record.
    #[error("missing required field: {0}")]
    MissingField(String),

    /// Field value is invalid or cannot be converted.
    #[error("invalid field value: {0}")]
    InvalidValue(String),

    /// No upcaster path exists from source to target version.
    #[error("incompatible version transition for {kind}: v{from} → v{to}")]
    IncompatibleVersions { kind: String, from: u32, to: u32 },

    /// Record was written by a newer schema than this build understands.
    #[error("{kind} record has schema v{found}, newest supported is v{current}")]
    FromNewerVersion { kind: String, found: u32, current: u32 },

    /// JSON serialization/deserialization error during transformation.
    #[error("JSON transformation error: {0}")]
    JsonError(#[from] serde_json::Error),
}

/// Transforms a record payload from one schema version to the next.
///
/// Upcasters must be deterministic and must not touch storage; they only
/// rewrite the JSON value handed to them.
pub trait Upcaster: Send + Sync {
    /// Record kind this upcaster applies to (e.g. "draft-progress").
    fn kind(&self) -> &str;

    /// Version this upcaster reads. It produces `source_version() + 1`.
    fn source_version(&self) -> u32;

    /// Transform the payload from source to target schema.
    fn upcast(&self, payload: JsonValue) -> Result<JsonValue, UpcastError>;
}

/// Registry that manages and chains record upcasters.
pub struct UpcasterRegistry {
    upcasters: HashMap<(String, u32), Arc<dyn Upcaster>>,
    current_versions: HashMap<String, u32>,
}

impl UpcasterRegistry {
    /// Creates a new empty registry.
    pub fn new() -> Self {
        Self {
            upcasters: HashMap::new(),
            current_versions: HashMap::new(),
        }
    }

    /// Registers an upcaster for a specific version step.
    pub fn register(&mut self, upcaster: Arc<dyn Upcaster>) {
        self.upcasters.insert(
            (upcaster.kind().to_string(), upcaster.source_version()),
            upcaster,
        );
    }

    /// Sets the current version for a record kind.
    pub fn set_current_version(&mut self, kind: impl Into<String>, version: u32) {
        self.current_versions.insert(kind.into(), version);
    }

    /// Returns the current version for a record kind (1 when never set).
    pub fn current_version(&self, kind: &str) -> u32 {
        self.current_versions.get(kind).copied().unwrap_or(1)
    }

    /// Upcasts a payload stored at `version` to the current version of `kind`.
    ///
    /// # Errors
    ///
    /// - `FromNewerVersion` if the record is newer than the current version
    /// - `IncompatibleVersions` if a step in the chain has no upcaster
    /// - any error returned by an individual upcaster
    pub fn upcast_to_current(
        &self,
        kind: &str,
        version: u32,
        payload: JsonValue,
    ) -> Result<JsonValue, UpcastError> {
        let target = self.current_version(kind);

        if version > target {
            return Err(UpcastError::FromNewerVersion {
                kind: kind.to_string(),
                found: version,
                current: target,
            });
        }

        let mut current_version = version;
        let mut current = payload;

        while current_version < target {
            let upcaster = self
                .upcasters
                .get(&(kind.to_string(), current_version))
                .ok_or_else(|| UpcastError::IncompatibleVersions {
                    kind: kind.to_string(),
                    from: current_version,
                    to: target,
                })?;

            current = upcaster.upcast(current)?;
            current_version += 1;
        }

        Ok(current)
    }
}

impl Default for UpcasterRegistry {
    fn default() -> Self {
        Self::new()
    }
}
