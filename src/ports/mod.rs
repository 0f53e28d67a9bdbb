//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! ## Storage Ports
//!
//! - `KeyValueStore` - Durable string slots (the browser-storage analogue)
//! - `DraftStore` - The single in-progress wizard state
//! - `ProfileRepository` - The user record and committed profile
//! - `SessionStore` - Per-slot session records
//!
//! ## Interaction Ports
//!
//! - `Notifier` - User-facing notices
//! - `DeviceLinker` - Device connection
//! - `ProfileSubmitter` - Profile submission

mod device_linker;
mod draft_store;
mod key_value_store;
mod notifier;
mod operation;
mod profile_repository;
mod profile_submitter;
mod session_store;

pub use device_linker::DeviceLinker;
pub use draft_store::{DraftStore, DRAFT_KEY};
pub use key_value_store::{KeyValueStore, StorageError};
pub use notifier::{Notice, NoticeLevel, Notifier};
pub use operation::OperationError;
pub use profile_repository::{ProfileRepository, USER_KEY};
pub use profile_submitter::ProfileSubmitter;
pub use session_store::SessionStore;
