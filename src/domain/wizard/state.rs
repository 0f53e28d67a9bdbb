//! WizardState and the wizard's lifecycle phase.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::WizardStep;
use crate::domain::foundation::StateMachine;
use crate::domain::profile::ProfileDraft;

/// What the Draft Store persists: the current page plus the draft.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WizardState {
    pub current_step: WizardStep,
    #[serde(default)]
    pub draft: ProfileDraft,
}

impl WizardState {
    /// Creates a state at step 1 with an empty draft.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a state at the given step.
    pub fn at(step: WizardStep, draft: ProfileDraft) -> Self {
        let mut state = Self {
            current_step: WizardStep::FIRST,
            draft,
        };
        state.move_to(step);
        state
    }

    /// Moves to a step, filling in that step's defaults on arrival.
    ///
    /// Returns true if the draft changed as a result.
    pub fn move_to(&mut self, step: WizardStep) -> bool {
        self.current_step = step;
        match step {
            WizardStep::DailyHabits => self.draft.habits.apply_defaults(),
            _ => false,
        }
    }
}

/// Lifecycle of a wizard instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WizardPhase {
    /// Steps are being filled in.
    Editing,
    /// The simulated submission is in flight.
    Submitting,
    /// The profile was committed and the draft cleared.
    Completed,
}

impl StateMachine for WizardPhase {
    fn can_transition_to(&self, target: &Self) -> bool {
        use WizardPhase::*;
        matches!(
            (self, target),
            (Editing, Submitting) | (Submitting, Editing) | (Submitting, Completed)
        )
    }

    fn valid_transitions(&self) -> Vec<Self> {
        use WizardPhase::*;
        match self {
            Editing => vec![Submitting],
            Submitting => vec![Editing, Completed],
            Completed => vec![],
        }
    }
}

impl fmt::Display for WizardPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            WizardPhase::Editing => "editing",
            WizardPhase::Submitting => "submitting",
            WizardPhase::Completed => "completed",
        };
        f.write_str(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_state_starts_at_step_one() {
        let state = WizardState::new();
        assert_eq!(state.current_step, WizardStep::PersonalInfo);
        assert!(state.draft.is_blank());
    }

    #[test]
    fn arriving_at_habits_fills_sleep_and_water_defaults() {
        let mut state = WizardState::new();
        assert!(state.move_to(WizardStep::DailyHabits));
        assert_eq!(state.draft.habits.sleep_hours, Some(7.0));
        assert_eq!(state.draft.habits.water_goal_liters, Some(2.0));
        assert!(!state.move_to(WizardStep::DailyHabits));
    }

    #[test]
    fn restored_state_at_habits_gets_defaults() {
        let state = WizardState::at(WizardStep::DailyHabits, ProfileDraft::new());
        assert_eq!(state.draft.habits.sleep_hours, Some(7.0));
    }

    #[test]
    fn other_steps_leave_draft_untouched() {
        let mut state = WizardState::new();
        assert!(!state.move_to(WizardStep::Review));
        assert!(state.draft.is_blank());
    }

    #[test]
    fn serializes_with_camel_case_keys() {
        let json = serde_json::to_value(WizardState::new()).unwrap();
        assert_eq!(json["currentStep"], 1);
    }

    #[test]
    fn phase_transitions() {
        assert!(WizardPhase::Editing.can_transition_to(&WizardPhase::Submitting));
        assert!(WizardPhase::Submitting.can_transition_to(&WizardPhase::Editing));
        assert!(!WizardPhase::Editing.can_transition_to(&WizardPhase::Completed));
        assert!(WizardPhase::Completed.is_terminal());
        assert!(WizardPhase::Completed.transition_to(WizardPhase::Editing).is_err());
    }
}
