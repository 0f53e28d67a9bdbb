//! Catalogs of linkable devices and health-data integrations.

use crate::domain::foundation::DeviceId;

/// Static description of a linkable device.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeviceDescriptor {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
}

/// Devices offered on the wizard's device-linking step.
pub const WIZARD_DEVICES: &[DeviceDescriptor] = &[
    DeviceDescriptor {
        id: "watch",
        name: "Smartwatch / Fitness Tracker",
        description: "Track steps, heart rate, and activity",
    },
    DeviceDescriptor {
        id: "bp",
        name: "Blood Pressure Monitor",
        description: "Monitor blood pressure readings",
    },
    DeviceDescriptor {
        id: "glucose",
        name: "Glucose Monitor",
        description: "Track blood sugar levels",
    },
    DeviceDescriptor {
        id: "scale",
        name: "Smart Scale",
        description: "Monitor weight and BMI",
    },
    DeviceDescriptor {
        id: "googlefit",
        name: "Google Fit",
        description: "Sync data from Google Fit",
    },
    DeviceDescriptor {
        id: "apple",
        name: "Apple Health",
        description: "Sync data from Apple Health",
    },
];

/// Integrations offered on the profile editor.
pub const EDITOR_INTEGRATIONS: &[DeviceDescriptor] = &[
    DeviceDescriptor {
        id: "apple-health",
        name: "Apple Health",
        description: "Sync steps, heart rate, sleep, and activity data",
    },
    DeviceDescriptor {
        id: "google-fit",
        name: "Google Fit",
        description: "Import fitness and wellness data from Google",
    },
    DeviceDescriptor {
        id: "fitbit",
        name: "Fitbit",
        description: "Connect your Fitbit tracker or smartwatch",
    },
    DeviceDescriptor {
        id: "garmin",
        name: "Garmin Connect",
        description: "Sync data from Garmin watches and devices",
    },
    DeviceDescriptor {
        id: "samsung-health",
        name: "Samsung Health",
        description: "Import health data from Samsung devices",
    },
    DeviceDescriptor {
        id: "withings",
        name: "Withings",
        description: "Connect smart scales and health monitors",
    },
    DeviceDescriptor {
        id: "strava",
        name: "Strava",
        description: "Sync running and cycling activities",
    },
    DeviceDescriptor {
        id: "myfitnesspal",
        name: "MyFitnessPal",
        description: "Track nutrition and calorie intake",
    },
];

/// Looks a device up in both catalogs.
pub fn find_device(id: &DeviceId) -> Option<&'static DeviceDescriptor> {
    WIZARD_DEVICES
        .iter()
        .chain(EDITOR_INTEGRATIONS.iter())
        .find(|d| d.id == id.as_str())
}

/// Display name for a device, falling back to its id.
pub fn display_name(id: &DeviceId) -> String {
    find_device(id)
        .map(|d| d.name.to_string())
        .unwrap_or_else(|| id.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_ids_are_valid_device_ids() {
        for d in WIZARD_DEVICES.iter().chain(EDITOR_INTEGRATIONS) {
            assert!(DeviceId::new(d.id).is_ok(), "{}", d.id);
        }
    }

    #[test]
    fn finds_devices_in_either_catalog() {
        assert_eq!(find_device(&DeviceId::new("bp").unwrap()).unwrap().name, "Blood Pressure Monitor");
        assert_eq!(find_device(&DeviceId::new("fitbit").unwrap()).unwrap().name, "Fitbit");
    }

    #[test]
    fn unknown_device_displays_its_id() {
        assert_eq!(display_name(&DeviceId::new("oura").unwrap()), "oura");
    }
}
