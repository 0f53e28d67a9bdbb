//! Fixed-delay profile submitter.

use async_trait::async_trait;
use std::time::Duration;

use crate::domain::profile::ProfileDraft;
use crate::ports::{OperationError, ProfileSubmitter};

/// Default submit delay.
pub const DEFAULT_SUBMIT_DELAY: Duration = Duration::from_millis(2000);

/// Profile submitter that succeeds after a fixed delay.
#[derive(Debug, Clone)]
pub struct SimulatedProfileSubmitter {
    delay: Duration,
    failure: Option<String>,
}

impl SimulatedProfileSubmitter {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            failure: None,
        }
    }

    /// Makes every submission fail after the delay with `reason`.
    pub fn failing_with(mut self, reason: impl Into<String>) -> Self {
        self.failure = Some(reason.into());
        self
    }
}

impl Default for SimulatedProfileSubmitter {
    fn default() -> Self {
        Self::new(DEFAULT_SUBMIT_DELAY)
    }
}

#[async_trait]
impl ProfileSubmitter for SimulatedProfileSubmitter {
    async fn submit(&self, _draft: &ProfileDraft) -> Result<(), OperationError> {
        tracing::debug!(delay_ms = self.delay.as_millis() as u64, "Submitting profile");
        tokio::time::sleep(self.delay).await;

        match &self.failure {
            Some(reason) => Err(OperationError::failed("profile submit", reason.clone())),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::time::Instant;

    #[tokio::test(start_paused = true)]
    async fn submit_waits_for_the_delay() {
        let submitter = SimulatedProfileSubmitter::default();
        let started = Instant::now();

        submitter.submit(&ProfileDraft::new()).await.unwrap();

        assert!(started.elapsed() >= DEFAULT_SUBMIT_DELAY);
    }

    #[tokio::test(start_paused = true)]
    async fn injected_failure_is_returned() {
        let submitter = SimulatedProfileSubmitter::new(Duration::ZERO).failing_with("offline");

        let err = submitter.submit(&ProfileDraft::new()).await.unwrap_err();

        assert_eq!(err, OperationError::failed("profile submit", "offline"));
    }
}
