//! Storage Adapters
//!
//! Key/value stores and the record-level adapters built on top of them.
//!
//! ## Available Adapters
//!
//! - **FileKeyValueStore** - One JSON file per key (production)
//! - **InMemoryKeyValueStore** - Shared in-memory map (testing/development)
//! - **KvDraftStore**, **KvProfileRepository**, **KvSessionStore** - typed
//!   records in versioned envelopes over any `KeyValueStore`
//!
//! ## Usage
//!
//! ```ignore
//! use adapters::storage::{shared_codec, FileKeyValueStore, KvDraftStore};
//!
//! let kv = Arc::new(FileKeyValueStore::new("./data"));
//! let drafts = KvDraftStore::new(kv, shared_codec());
//! ```

mod envelope;
mod file_kv_store;
mod in_memory_kv_store;
mod kv_draft_store;
mod kv_profile_repository;
mod kv_session_store;
mod legacy;

use once_cell::sync::Lazy;
use std::sync::Arc;

pub use envelope::{
    Decoded, EnvelopeError, RecordCodec, SESSION_RECORD_KIND, USER_RECORD_KIND,
    WIZARD_STATE_KIND,
};
pub use file_kv_store::FileKeyValueStore;
pub use in_memory_kv_store::InMemoryKeyValueStore;
pub use kv_draft_store::KvDraftStore;
pub use kv_profile_repository::KvProfileRepository;
pub use kv_session_store::KvSessionStore;
pub use legacy::{UserRecordV1ToV2, WizardStateV1ToV2};

static CODEC: Lazy<Arc<RecordCodec>> = Lazy::new(|| Arc::new(RecordCodec::new()));

/// Process-wide codec with every record kind registered.
pub fn shared_codec() -> Arc<RecordCodec> {
    Arc::clone(&CODEC)
}
