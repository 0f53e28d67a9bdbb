//! Session configuration

use serde::Deserialize;

use super::error::ValidationError;

/// Session configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SessionConfig {
    /// Seconds after which a session record no longer authorizes; never
    /// when absent
    pub max_age_secs: Option<u64>,
}

impl SessionConfig {
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.max_age_secs == Some(0) {
            return Err(ValidationError::InvalidMaxAge);
        }
        Ok(())
    }
}
