//! Step Validator - per-step field rules for the profile wizard.
//!
//! Validation is pure: it reads the draft and returns a report. Messages are
//! the short corrective text shown inline at the field.

use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

use super::WizardStep;
use crate::domain::profile::ProfileDraft;

pub const AGE_MIN: i32 = 1;
pub const AGE_MAX: i32 = 120;
pub const WEIGHT_MIN_KG: f64 = 20.0;
pub const WEIGHT_MAX_KG: f64 = 300.0;
pub const HEIGHT_MIN_CM: f64 = 50.0;
pub const HEIGHT_MAX_CM: f64 = 250.0;
pub const SLEEP_MAX_HOURS: f64 = 12.0;
pub const WATER_MAX_LITERS: f64 = 4.0;
pub const FULL_NAME_MIN_CHARS: usize = 2;

/// Validated fields, ordered as they appear on the form.
///
/// The ordering decides which field receives focus first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Field {
    FullName,
    Gender,
    Age,
    WeightKg,
    HeightCm,
    SleepHours,
    WaterGoalLiters,
}

impl Field {
    /// Returns the form key of the field.
    pub fn key(&self) -> &'static str {
        match self {
            Field::FullName => "fullName",
            Field::Gender => "gender",
            Field::Age => "age",
            Field::WeightKg => "weightKg",
            Field::HeightCm => "heightCm",
            Field::SleepHours => "sleepHours",
            Field::WaterGoalLiters => "waterGoalLiters",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Outcome of validating one step.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ValidationReport {
    errors: BTreeMap<Field, String>,
}

impl ValidationReport {
    /// True when no field failed.
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Field to message mapping.
    pub fn errors(&self) -> &BTreeMap<Field, String> {
        &self.errors
    }

    /// Message for one field, if it failed.
    pub fn message(&self, field: Field) -> Option<&str> {
        self.errors.get(&field).map(String::as_str)
    }

    /// The field that should receive focus.
    pub fn first_invalid_field(&self) -> Option<Field> {
        self.errors.keys().next().copied()
    }

    fn fail(&mut self, field: Field, message: &str) {
        self.errors.entry(field).or_insert_with(|| message.to_string());
    }

    fn check(&mut self, field: Field, message: Option<&str>) {
        if let Some(message) = message {
            self.fail(field, message);
        }
    }
}

/// A step that failed during whole-draft validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepFailure {
    pub step: WizardStep,
    pub report: ValidationReport,
}

/// Evaluates the per-step rules.
pub struct StepValidator;

impl StepValidator {
    /// Validates the fields owned by one step.
    ///
    /// Device linking and review carry no rules.
    pub fn validate(step: WizardStep, draft: &ProfileDraft) -> ValidationReport {
        let mut report = ValidationReport::default();
        match step {
            WizardStep::PersonalInfo => Self::personal(draft, &mut report),
            WizardStep::HealthInfo => Self::health(draft, &mut report),
            WizardStep::DailyHabits => Self::habits(draft, &mut report),
            WizardStep::DeviceLinking | WizardStep::Review => {}
        }
        report
    }

    /// Validates every step, returning the first one that fails.
    pub fn validate_all(draft: &ProfileDraft) -> Result<(), StepFailure> {
        for step in WizardStep::all() {
            let report = Self::validate(*step, draft);
            if !report.is_valid() {
                return Err(StepFailure {
                    step: *step,
                    report,
                });
            }
        }
        Ok(())
    }

    /// Range-checks the values a stored profile holds.
    ///
    /// Absent fields pass, so a partly filled legacy profile is accepted.
    pub fn validate_ranges(draft: &ProfileDraft) -> ValidationReport {
        let mut report = ValidationReport::default();
        if let Some(age) = draft.personal.age {
            report.check(Field::Age, age_message(age));
        }
        if let Some(w) = draft.health.weight_kg {
            report.check(Field::WeightKg, weight_message(w));
        }
        if let Some(c) = draft.health.height_cm {
            report.check(Field::HeightCm, height_message(c));
        }
        Self::habits(draft, &mut report);
        report
    }

    fn personal(draft: &ProfileDraft, report: &mut ValidationReport) {
        let p = &draft.personal;
        match p.full_name.as_deref().map(str::trim) {
            None | Some("") => report.fail(Field::FullName, "Full name is required"),
            Some(name) if name.chars().count() < FULL_NAME_MIN_CHARS => {
                report.fail(Field::FullName, "Minimum 2 characters")
            }
            Some(_) => {}
        }

        if p.gender.is_none() {
            report.fail(Field::Gender, "Please select gender");
        }

        match p.age {
            None => report.fail(Field::Age, "Age is required"),
            Some(age) => report.check(Field::Age, age_message(age)),
        }
    }

    fn health(draft: &ProfileDraft, report: &mut ValidationReport) {
        let h = &draft.health;
        match h.weight_kg.filter(|w| w.is_finite()) {
            None => report.fail(Field::WeightKg, "Weight is required"),
            Some(w) => report.check(Field::WeightKg, weight_message(w)),
        }

        match h.height_cm.filter(|c| c.is_finite()) {
            None => report.fail(Field::HeightCm, "Height is required"),
            Some(c) => report.check(Field::HeightCm, height_message(c)),
        }
    }

    // Sleep and water are optional; only present values are range-checked.
    fn habits(draft: &ProfileDraft, report: &mut ValidationReport) {
        let d = &draft.habits;
        if let Some(sleep) = d.sleep_hours {
            if sleep.is_nan() || sleep < 0.0 {
                report.fail(Field::SleepHours, "Cannot be negative");
            } else if sleep > SLEEP_MAX_HOURS {
                report.fail(Field::SleepHours, "Maximum 12 hours");
            }
        }
        if let Some(water) = d.water_goal_liters {
            if water.is_nan() || water < 0.0 {
                report.fail(Field::WaterGoalLiters, "Cannot be negative");
            } else if water > WATER_MAX_LITERS {
                report.fail(Field::WaterGoalLiters, "Maximum 4 liters");
            }
        }
    }
}

fn age_message(age: i32) -> Option<&'static str> {
    if age < AGE_MIN {
        Some("Minimum is 1")
    } else if age > AGE_MAX {
        Some("Maximum is 120")
    } else {
        None
    }
}

// NaN fails both comparisons, so it is reported as below the minimum.
fn weight_message(w: f64) -> Option<&'static str> {
    if w > WEIGHT_MAX_KG {
        Some("Maximum 300kg")
    } else if w >= WEIGHT_MIN_KG {
        None
    } else {
        Some("Minimum 20kg")
    }
}

fn height_message(c: f64) -> Option<&'static str> {
    if c > HEIGHT_MAX_CM {
        Some("Maximum 250cm")
    } else if c >= HEIGHT_MIN_CM {
        None
    } else {
        Some("Minimum 50cm")
    }
}
