//! Profile submitter port - hands a finished draft to the profile service.

use async_trait::async_trait;

use super::OperationError;
use crate::domain::profile::ProfileDraft;

/// Submits a validated draft.
///
/// Persisting the committed profile is the caller's job; the submitter only
/// models the round trip to whatever service accepts the profile.
#[async_trait]
pub trait ProfileSubmitter: Send + Sync {
    async fn submit(&self, draft: &ProfileDraft) -> Result<(), OperationError>;
}
