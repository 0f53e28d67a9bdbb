//! Profile module - draft and committed health profiles.
//!
//! The draft is what the wizard edits; the committed profile is what
//! completion (or the profile editor) writes into the user record.

mod bmi;
mod committed;
mod device;
mod draft;
mod macros;
mod vocabulary;

pub use bmi::{Bmi, BmiBand};
pub use committed::{CommittedProfile, ProfileSection, UserRecord};
pub use device::{
    display_name as device_display_name, find_device, DeviceDescriptor, EDITOR_INTEGRATIONS,
    WIZARD_DEVICES,
};
pub use draft::{
    DailyHabits, HealthInfo, PersonalInfo, ProfileDraft, DEFAULT_SLEEP_HOURS,
    DEFAULT_WATER_GOAL_LITERS,
};
pub use vocabulary::{Alcohol, Condition, Diet, ExerciseFrequency, Gender, Smoking};
