//! Feature flags configuration

use serde::Deserialize;

use crate::domain::routing::AccessPolicy;

/// Feature flags for the access policy and login redirects
#[derive(Debug, Clone, Deserialize)]
pub struct FeatureFlags {
    /// Require a general session for the caregiver dashboards
    #[serde(default)]
    pub gate_caregiver_routes: bool,

    /// Send users back to the page they asked for after login
    #[serde(default = "default_honor_return_to")]
    pub honor_return_to: bool,
}

impl FeatureFlags {
    pub fn access_policy(&self) -> AccessPolicy {
        AccessPolicy::new(self.gate_caregiver_routes)
    }
}

impl Default for FeatureFlags {
    fn default() -> Self {
        Self {
            gate_caregiver_routes: false,
            honor_return_to: default_honor_return_to(),
        }
    }
}

fn default_honor_return_to() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_feature_flags_defaults() {
        let flags = FeatureFlags::default();
        assert!(!flags.gate_caregiver_routes);
        assert!(flags.honor_return_to);
    }

    #[test]
    fn test_feature_flags_deserialization() {
        let flags: FeatureFlags = serde_json::from_str(r#"{"gate_caregiver_routes": true}"#).unwrap();
        assert!(flags.gate_caregiver_routes);
        assert!(flags.honor_return_to);
        assert!(flags.access_policy().gate_caregiver_routes);
    }
}
