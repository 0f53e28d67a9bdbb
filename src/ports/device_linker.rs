//! Device linker port - connects a wearable or health-data integration.

use async_trait::async_trait;

use super::OperationError;
use crate::domain::foundation::DeviceId;

/// Links devices to the profile.
///
/// Disconnecting is local and immediate, so only connection goes through
/// the port.
#[async_trait]
pub trait DeviceLinker: Send + Sync {
    /// Connects a device. Resolves when the device is linked or the attempt
    /// fails.
    async fn connect(&self, device: &DeviceId) -> Result<(), OperationError>;
}
