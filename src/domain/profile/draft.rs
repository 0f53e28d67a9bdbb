//! ProfileDraft - the working, not-yet-committed profile.
//!
//! The draft mirrors the wizard's form: every field is optional because it is
//! mutated keystroke by keystroke. Range rules are enforced by the step
//! validator, not by construction, so a half-typed value can be held and
//! corrected.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use super::{Alcohol, Bmi, Condition, Diet, ExerciseFrequency, Gender, Smoking};
use crate::domain::foundation::DeviceId;

/// Default nightly sleep shown on the habits step.
pub const DEFAULT_SLEEP_HOURS: f64 = 7.0;

/// Default daily water goal shown on the habits step.
pub const DEFAULT_WATER_GOAL_LITERS: f64 = 2.0;

/// Step 1 fields.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PersonalInfo {
    pub full_name: Option<String>,
    pub gender: Option<Gender>,
    pub age: Option<i32>,
    pub caregiver_id: Option<String>,
    pub doctor_id: Option<String>,
}

/// Step 2 fields.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct HealthInfo {
    pub conditions: BTreeSet<Condition>,
    pub condition_other: Option<String>,
    pub family_history: Option<String>,
    pub weight_kg: Option<f64>,
    pub height_cm: Option<f64>,
}

/// Step 3 fields.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DailyHabits {
    pub exercise_frequency: Option<ExerciseFrequency>,
    pub sleep_hours: Option<f64>,
    pub water_goal_liters: Option<f64>,
    pub diet: Option<Diet>,
    pub smoking: Option<Smoking>,
    pub alcohol: Option<Alcohol>,
}

impl DailyHabits {
    /// Fills in the slider defaults (sleep 7 h, water 2 L) where unset.
    ///
    /// Returns true if anything changed.
    pub fn apply_defaults(&mut self) -> bool {
        let mut changed = false;
        if self.sleep_hours.is_none() {
            self.sleep_hours = Some(DEFAULT_SLEEP_HOURS);
            changed = true;
        }
        if self.water_goal_liters.is_none() {
            self.water_goal_liters = Some(DEFAULT_WATER_GOAL_LITERS);
            changed = true;
        }
        changed
    }
}

/// The in-progress profile owned by the wizard.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProfileDraft {
    pub personal: PersonalInfo,
    pub health: HealthInfo,
    pub habits: DailyHabits,
    pub connected_device_ids: BTreeSet<DeviceId>,
}

impl ProfileDraft {
    /// Creates an empty draft.
    pub fn new() -> Self {
        Self::default()
    }

    /// True when nothing has been entered yet.
    pub fn is_blank(&self) -> bool {
        *self == Self::default()
    }

    /// Derived BMI, present only when both weight and height are.
    pub fn bmi(&self) -> Option<Bmi> {
        Bmi::compute(self.health.weight_kg, self.health.height_cm)
    }

    /// Connects or disconnects a device.
    ///
    /// Connecting an already-connected device (or disconnecting an absent
    /// one) is a no-op. Returns true if the set changed.
    pub fn toggle_device(&mut self, device: DeviceId, connect: bool) -> bool {
        if connect {
            self.connected_device_ids.insert(device)
        } else {
            self.connected_device_ids.remove(&device)
        }
    }

    /// Returns true if the device is connected.
    pub fn is_connected(&self, device: &DeviceId) -> bool {
        self.connected_device_ids.contains(device)
    }

    /// Adds or removes a condition checkbox.
    pub fn set_condition(&mut self, condition: Condition, checked: bool) {
        if checked {
            self.health.conditions.insert(condition);
        } else {
            self.health.conditions.remove(&condition);
        }
    }
}
