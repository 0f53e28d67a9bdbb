//! Draft Store port - persistence of the single in-progress wizard state.

use async_trait::async_trait;

use super::StorageError;
use crate::domain::wizard::WizardState;

/// Storage key of the draft slot.
pub const DRAFT_KEY: &str = "draft-progress";

/// Reads and writes the one draft slot.
///
/// There is exactly one slot; `save` overwrites it.
#[async_trait]
pub trait DraftStore: Send + Sync {
    /// Loads the persisted wizard state.
    ///
    /// Unreadable, corrupt or unmigratable records yield `None`; the reason is
    /// logged, never returned.
    async fn load(&self) -> Option<WizardState>;

    /// Persists the wizard state.
    ///
    /// A failure is reported to the caller, which keeps working in memory.
    async fn save(&self, state: &WizardState) -> Result<(), StorageError>;

    /// Removes the draft. Idempotent.
    async fn clear(&self) -> Result<(), StorageError>;
}
