//! Wizard configuration

use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;

/// Longest simulated delay accepted.
pub const MAX_DELAY_MS: u64 = 60_000;

/// Wizard configuration
#[derive(Debug, Clone, Deserialize)]
pub struct WizardConfig {
    /// Simulated device-connect delay
    #[serde(default = "default_device_connect_delay")]
    pub device_connect_delay_ms: u64,

    /// Simulated profile-submit delay
    #[serde(default = "default_submit_delay")]
    pub submit_delay_ms: u64,

    /// Save the draft after every change
    #[serde(default = "default_autosave")]
    pub autosave: bool,
}

impl WizardConfig {
    pub fn device_connect_delay(&self) -> Duration {
        Duration::from_millis(self.device_connect_delay_ms)
    }

    pub fn submit_delay(&self) -> Duration {
        Duration::from_millis(self.submit_delay_ms)
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.device_connect_delay_ms > MAX_DELAY_MS {
            return Err(ValidationError::DelayTooLong {
                name: "wizard.device_connect_delay_ms",
                max: MAX_DELAY_MS,
            });
        }
        if self.submit_delay_ms > MAX_DELAY_MS {
            return Err(ValidationError::DelayTooLong {
                name: "wizard.submit_delay_ms",
                max: MAX_DELAY_MS,
            });
        }
        Ok(())
    }
}

impl Default for WizardConfig {
    fn default() -> Self {
        Self {
            device_connect_delay_ms: default_device_connect_delay(),
            submit_delay_ms: default_submit_delay(),
            autosave: default_autosave(),
        }
    }
}

fn default_device_connect_delay() -> u64 {
    1000
}

fn default_submit_delay() -> u64 {
    2000
}

fn default_autosave() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wizard_defaults() {
        let config = WizardConfig::default();
        assert_eq!(config.device_connect_delay(), Duration::from_secs(1));
        assert_eq!(config.submit_delay(), Duration::from_secs(2));
        assert!(config.autosave);
    }

    #[test]
    fn test_overlong_delay_is_invalid() {
        let config = WizardConfig {
            submit_delay_ms: 60_001,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ValidationError::DelayTooLong { name: "wizard.submit_delay_ms", .. })
        ));
    }
}
