//! The home surface's "Complete Your Profile" prompt.

use std::sync::Arc;

use crate::domain::foundation::Timestamp;
use crate::ports::{ProfileRepository, StorageError};

/// Title of the prompt.
pub const PROMPT_TITLE: &str = "Complete Your Profile";

/// Decides whether to show the completion prompt and records dismissal.
pub struct ProfilePrompt {
    profiles: Arc<dyn ProfileRepository>,
}

impl ProfilePrompt {
    pub fn new(profiles: Arc<dyn ProfileRepository>) -> Self {
        Self { profiles }
    }

    /// True unless the profile is complete or the prompt was dismissed.
    ///
    /// A missing or unreadable record prompts.
    pub async fn should_prompt(&self) -> bool {
        match self.profiles.load().await {
            Ok(record) => record.unwrap_or_default().should_prompt_completion(),
            Err(e) => {
                tracing::warn!(error = %e, "Prompting for profile completion without a readable record");
                true
            }
        }
    }

    /// Remembers that the user closed the prompt.
    pub async fn dismiss(&self) -> Result<(), StorageError> {
        let mut record = match self.profiles.load().await {
            Ok(record) => record.unwrap_or_default(),
            Err(StorageError::Corrupt { .. }) => Default::default(),
            Err(e) => return Err(e),
        };
        if record.profile_prompt_dismissed {
            return Ok(());
        }
        record.profile_prompt_dismissed = true;
        record.updated_at = Some(Timestamp::now());
        self.profiles.save(&record).await
    }
}
