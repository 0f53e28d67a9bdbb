//! Fixed-delay device linker.
//!
//! There is no real device integration: connecting waits for the configured
//! delay and then succeeds, unless a failure was injected for that device.

use async_trait::async_trait;
use std::collections::HashSet;
use std::time::Duration;

use crate::domain::foundation::DeviceId;
use crate::ports::{DeviceLinker, OperationError};

/// Default connect delay.
pub const DEFAULT_CONNECT_DELAY: Duration = Duration::from_millis(1000);

/// Device linker that succeeds after a fixed delay.
#[derive(Debug, Clone)]
pub struct SimulatedDeviceLinker {
    delay: Duration,
    failing: HashSet<DeviceId>,
    fail_all: bool,
}

impl SimulatedDeviceLinker {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            failing: HashSet::new(),
            fail_all: false,
        }
    }

    /// Makes connecting this device fail after the delay.
    pub fn with_failing_device(mut self, device: DeviceId) -> Self {
        self.failing.insert(device);
        self
    }

    /// Makes every connection fail after the delay.
    pub fn failing_all(mut self) -> Self {
        self.fail_all = true;
        self
    }

    fn should_fail(&self, device: &DeviceId) -> bool {
        self.fail_all || self.failing.contains(device)
    }
}

impl Default for SimulatedDeviceLinker {
    fn default() -> Self {
        Self::new(DEFAULT_CONNECT_DELAY)
    }
}

#[async_trait]
impl DeviceLinker for SimulatedDeviceLinker {
    async fn connect(&self, device: &DeviceId) -> Result<(), OperationError> {
        tracing::debug!(device = %device, delay_ms = self.delay.as_millis() as u64, "Connecting device");
        tokio::time::sleep(self.delay).await;

        if self.should_fail(device) {
            return Err(OperationError::failed(
                "device connect",
                format!("{} did not respond", device),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::time::Instant;

    fn device(id: &str) -> DeviceId {
        DeviceId::new(id).unwrap()
    }

    #[tokio::test(start_paused = true)]
    async fn connect_waits_for_the_delay() {
        let linker = SimulatedDeviceLinker::default();
        let started = Instant::now();

        linker.connect(&device("watch")).await.unwrap();

        assert!(started.elapsed() >= DEFAULT_CONNECT_DELAY);
    }

    #[tokio::test(start_paused = true)]
    async fn injected_failure_is_per_device() {
        let linker = SimulatedDeviceLinker::new(Duration::from_millis(10))
            .with_failing_device(device("bp"));

        assert!(linker.connect(&device("watch")).await.is_ok());
        let err = linker.connect(&device("bp")).await.unwrap_err();
        assert!(matches!(err, OperationError::Failed { .. }));
    }

    #[tokio::test(start_paused = true)]
    async fn failing_devices_accumulate_and_survive_clone() {
        let linker = SimulatedDeviceLinker::new(Duration::ZERO)
            .with_failing_device(device("bp"))
            .with_failing_device(device("glucose"));
        let copy = linker.clone();

        assert!(copy.connect(&device("bp")).await.is_err());
        assert!(copy.connect(&device("glucose")).await.is_err());
        assert!(copy.connect(&device("watch")).await.is_ok());
    }

    #[tokio::test(start_paused = true)]
    async fn failing_all_fails_every_device() {
        let linker = SimulatedDeviceLinker::new(Duration::ZERO).failing_all();
        assert!(linker.connect(&device("scale")).await.is_err());
    }
}
