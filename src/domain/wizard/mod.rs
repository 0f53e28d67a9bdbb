//! Wizard module - steps, persisted wizard state and step validation.

mod state;
mod step;
mod validator;

pub use state::{WizardPhase, WizardState};
pub use step::WizardStep;
pub use validator::{
    Field, StepFailure, StepValidator, ValidationReport, AGE_MAX, AGE_MIN, HEIGHT_MAX_CM,
    HEIGHT_MIN_CM, SLEEP_MAX_HOURS, WATER_MAX_LITERS, WEIGHT_MAX_KG, WEIGHT_MIN_KG,
};
