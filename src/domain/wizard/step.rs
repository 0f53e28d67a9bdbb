//! WizardStep enum representing the five wizard pages.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::foundation::ValidationError;

/// The five wizard pages, persisted as their 1-based number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum WizardStep {
    PersonalInfo = 1,
    HealthInfo = 2,
    DailyHabits = 3,
    DeviceLinking = 4,
    Review = 5,
}

impl WizardStep {
    pub const FIRST: WizardStep = WizardStep::PersonalInfo;
    pub const LAST: WizardStep = WizardStep::Review;

    /// Returns all steps in order.
    pub fn all() -> &'static [WizardStep] {
        &[
            WizardStep::PersonalInfo,
            WizardStep::HealthInfo,
            WizardStep::DailyHabits,
            WizardStep::DeviceLinking,
            WizardStep::Review,
        ]
    }

    /// Returns the 1-based step number.
    pub fn number(&self) -> u8 {
        *self as u8
    }

    /// Parses a 1-based step number.
    pub fn from_number(n: u8) -> Result<Self, ValidationError> {
        match n {
            1 => Ok(WizardStep::PersonalInfo),
            2 => Ok(WizardStep::HealthInfo),
            3 => Ok(WizardStep::DailyHabits),
            4 => Ok(WizardStep::DeviceLinking),
            5 => Ok(WizardStep::Review),
            other => Err(ValidationError::out_of_range("step", 1, 5, i32::from(other))),
        }
    }

    /// Returns the step for any number, clamped into 1..=5.
    pub fn clamped(n: i64) -> Self {
        let n = n.clamp(1, 5) as u8;
        Self::from_number(n).unwrap_or(WizardStep::FIRST)
    }

    /// Returns the next step, if any.
    pub fn next(&self) -> Option<WizardStep> {
        Self::from_number(self.number() + 1).ok()
    }

    /// Returns the previous step, if any.
    pub fn previous(&self) -> Option<WizardStep> {
        self.number()
            .checked_sub(1)
            .and_then(|n| Self::from_number(n).ok())
    }

    /// Returns the page title.
    pub fn display_name(&self) -> &'static str {
        match self {
            WizardStep::PersonalInfo => "Personal Info",
            WizardStep::HealthInfo => "Health Info",
            WizardStep::DailyHabits => "Daily Habits",
            WizardStep::DeviceLinking => "Device Linking",
            WizardStep::Review => "Review",
        }
    }

    /// Progress through the wizard as a percentage (20 per step).
    pub fn progress_percent(&self) -> u8 {
        self.number() * 20
    }
}

impl Default for WizardStep {
    fn default() -> Self {
        WizardStep::FIRST
    }
}

impl fmt::Display for WizardStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

impl TryFrom<u8> for WizardStep {
    type Error = ValidationError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::from_number(value)
    }
}

impl From<WizardStep> for u8 {
    fn from(step: WizardStep) -> Self {
        step.number()
    }
}
