//! WizardController - drives the five-step profile-completion wizard.
//!
//! The controller owns the `WizardState`. Every mutation is followed by a
//! save through the Draft Store so a reload at any step boundary loses
//! nothing. Storage failures never block the user: they are logged, kept as
//! a warning and the wizard continues in memory.

use std::sync::Arc;
use thiserror::Error;

use super::ViewScope;
use crate::domain::foundation::{DeviceId, ErrorCode, StateMachine, Timestamp};
use crate::domain::profile::{device_display_name, Bmi, ProfileDraft, UserRecord};
use crate::domain::routing::Route;
use crate::domain::wizard::{
    StepFailure, StepValidator, ValidationReport, WizardPhase, WizardState, WizardStep,
};
use crate::ports::{
    DeviceLinker, DraftStore, Notice, Notifier, OperationError, ProfileRepository,
    ProfileSubmitter, StorageError,
};

/// Text shown when the host asks whether leaving is fine.
pub const LEAVE_WARNING: &str = "You have unsaved changes. Are you sure you want to leave?";

/// Errors returned by wizard operations.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum WizardError {
    /// Completion was requested while a step still has invalid fields.
    #[error("{step} has invalid fields")]
    Incomplete {
        step: WizardStep,
        report: ValidationReport,
    },

    /// The operation does not apply in the current phase.
    #[error("cannot {operation} while {phase}")]
    InvalidPhase {
        operation: &'static str,
        phase: WizardPhase,
    },

    /// Completion is only offered on the review step.
    #[error("cannot complete from {0}")]
    NotOnReview(WizardStep),

    #[error(transparent)]
    Operation(#[from] OperationError),

    #[error(transparent)]
    Storage(#[from] StorageError),
}

impl WizardError {
    pub fn code(&self) -> ErrorCode {
        match self {
            WizardError::Incomplete { .. } => ErrorCode::ValidationFailed,
            WizardError::InvalidPhase { .. } | WizardError::NotOnReview(_) => {
                ErrorCode::InvalidStateTransition
            }
            WizardError::Operation(e) => e.code(),
            WizardError::Storage(e) => e.code(),
        }
    }

    /// Short corrective text for the user. Never contains technical detail.
    pub fn user_message(&self) -> String {
        match self {
            WizardError::Incomplete { report, .. } => report
                .first_invalid_field()
                .and_then(|f| report.message(f))
                .unwrap_or("Please review the highlighted fields")
                .to_string(),
            WizardError::InvalidPhase { .. } => "This profile has already been submitted".into(),
            WizardError::NotOnReview(_) => "Review your answers before completing".into(),
            WizardError::Operation(OperationError::Cancelled) => "Cancelled".into(),
            WizardError::Operation(OperationError::Failed { .. }) => {
                "Something went wrong. Please try again.".into()
            }
            WizardError::Storage(StorageError::QuotaExceeded { .. }) => {
                "Storage is full. Free some space and try again.".into()
            }
            WizardError::Storage(_) => "Could not save your progress. Please try again.".into(),
        }
    }
}

/// Result of asking to move forward.
#[derive(Debug, Clone, PartialEq)]
pub enum StepOutcome {
    /// The current step validated; the wizard is now on this step.
    Moved(WizardStep),
    /// The current step has errors; the wizard stayed put.
    Blocked(ValidationReport),
}

/// Result of a successful completion.
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionResult {
    pub record: UserRecord,
    pub redirect_to: Route,
}

/// Ports the controller talks to.
#[derive(Clone)]
pub struct WizardPorts {
    pub drafts: Arc<dyn DraftStore>,
    pub profiles: Arc<dyn ProfileRepository>,
    pub linker: Arc<dyn DeviceLinker>,
    pub submitter: Arc<dyn ProfileSubmitter>,
    pub notifier: Arc<dyn Notifier>,
}

/// Controller for one wizard view.
pub struct WizardController {
    state: WizardState,
    phase: WizardPhase,
    failure: Option<StepFailure>,
    restored: bool,
    storage_error: Option<StorageError>,
    autosave: bool,
    scope: ViewScope,
    ports: WizardPorts,
}

impl WizardController {
    /// Enters the wizard, restoring a saved draft if there is one.
    pub async fn enter(ports: WizardPorts, scope: ViewScope, autosave: bool) -> Self {
        let restored = ports.drafts.load().await;
        let was_restored = restored.is_some();
        let state = match restored {
            Some(saved) => WizardState::at(saved.current_step, saved.draft),
            None => WizardState::new(),
        };

        if was_restored {
            tracing::debug!(step = state.current_step.number(), "Restored saved draft");
        }

        Self {
            state,
            phase: WizardPhase::Editing,
            failure: None,
            restored: was_restored,
            storage_error: None,
            autosave,
            scope,
            ports,
        }
    }

    pub fn state(&self) -> &WizardState {
        &self.state
    }

    pub fn draft(&self) -> &ProfileDraft {
        &self.state.draft
    }

    pub fn current_step(&self) -> WizardStep {
        self.state.current_step
    }

    pub fn phase(&self) -> WizardPhase {
        self.phase
    }

    /// True when entering picked up a saved draft.
    pub fn was_restored(&self) -> bool {
        self.restored
    }

    /// Errors from the last validation, if it failed.
    pub fn errors(&self) -> Option<&ValidationReport> {
        self.failure
            .as_ref()
            .map(|f| &f.report)
            .filter(|r| !r.is_valid())
    }

    /// Derived BMI for the health step.
    pub fn bmi(&self) -> Option<Bmi> {
        self.state.draft.bmi()
    }

    /// The last persistence failure, cleared by the next successful save.
    pub fn storage_warning(&self) -> Option<&StorageError> {
        self.storage_error.as_ref()
    }

    /// Applies a field edit and saves.
    ///
    /// If a step already shows errors that step is re-evaluated, so a
    /// corrected field clears its message.
    pub async fn update(&mut self, edit: impl FnOnce(&mut ProfileDraft)) {
        if self.phase != WizardPhase::Editing {
            return;
        }
        edit(&mut self.state.draft);
        if let Some(failure) = self.failure.as_mut() {
            failure.report = StepValidator::validate(failure.step, &self.state.draft);
        }
        self.autosave().await;
    }

    /// Validates the current step and advances if it passes.
    pub async fn next(&mut self) -> Result<StepOutcome, WizardError> {
        self.require_editing("go to the next step")?;

        let step = self.state.current_step;
        let report = StepValidator::validate(step, &self.state.draft);
        if !report.is_valid() {
            self.failure = Some(StepFailure {
                step,
                report: report.clone(),
            });
            return Ok(StepOutcome::Blocked(report));
        }

        self.failure = None;
        let target = self.state.current_step.next().unwrap_or(WizardStep::LAST);
        self.state.move_to(target);
        self.autosave().await;
        Ok(StepOutcome::Moved(target))
    }

    /// Steps back without validating. Stays on step 1.
    pub async fn back(&mut self) -> WizardStep {
        if self.phase == WizardPhase::Editing {
            let target = self.state.current_step.previous().unwrap_or(WizardStep::FIRST);
            self.failure = None;
            self.state.move_to(target);
            self.autosave().await;
        }
        self.state.current_step
    }

    /// Jumps straight to a step (the review page's "Edit" links).
    pub async fn jump_to(&mut self, step: WizardStep) -> WizardStep {
        if self.phase == WizardPhase::Editing {
            self.failure = None;
            self.state.move_to(step);
            self.autosave().await;
        }
        self.state.current_step
    }

    /// Connects or disconnects a device locally, without going through the
    /// linker.
    pub async fn toggle_device(&mut self, device: DeviceId, connect: bool) -> bool {
        if self.phase != WizardPhase::Editing {
            return false;
        }
        let changed = self.state.draft.toggle_device(device, connect);
        if changed {
            self.autosave().await;
        }
        changed
    }

    /// Connects a device through the linker.
    ///
    /// On failure the draft is unchanged and an error notice is shown. A
    /// cancelled attempt changes nothing and shows nothing.
    pub async fn connect_device(&mut self, device: DeviceId) -> Result<(), WizardError> {
        self.require_editing("connect a device")?;
        if self.state.draft.is_connected(&device) {
            return Ok(());
        }

        let linker = Arc::clone(&self.ports.linker);
        match self.scope.run(linker.connect(&device)).await {
            Ok(()) => {
                self.state.draft.toggle_device(device, true);
                self.autosave().await;
                self.notify(Notice::success("Device connected successfully! ✓")).await;
                Ok(())
            }
            Err(OperationError::Cancelled) => {
                tracing::debug!(device = %device, "Device connect cancelled");
                Err(OperationError::Cancelled.into())
            }
            Err(e) => {
                tracing::warn!(device = %device, error = %e, "Device connect failed");
                self.notify(
                    Notice::error(format!("Could not connect {}", device_display_name(&device)))
                        .with_description("Please try again."),
                )
                .await;
                Err(e.into())
            }
        }
    }

    /// Saves the current state and tells the caller to leave.
    ///
    /// Saves even when autosave is off.
    pub async fn save_and_exit(&mut self) -> Result<Route, WizardError> {
        self.require_editing("save")?;
        match self.persist().await {
            Ok(()) => {
                self.notify(
                    Notice::success("Progress saved")
                        .with_description("You can continue later from the same device."),
                )
                .await;
                Ok(Route::Home)
            }
            Err(e) => {
                self.notify(
                    Notice::error("Could not save progress")
                        .with_description("Your answers are kept while this page stays open."),
                )
                .await;
                Err(e.into())
            }
        }
    }

    /// Validates every step, submits, commits the profile and clears the draft.
    ///
    /// An invalid draft leaves the current step where it is and reports the
    /// first failing step.
    pub async fn complete(&mut self) -> Result<CompletionResult, WizardError> {
        self.require_editing("complete the profile")?;
        if self.state.current_step != WizardStep::Review {
            return Err(WizardError::NotOnReview(self.state.current_step));
        }

        if let Err(failure) = StepValidator::validate_all(&self.state.draft) {
            let err = WizardError::Incomplete {
                step: failure.step,
                report: failure.report.clone(),
            };
            self.failure = Some(failure);
            return Err(err);
        }
        self.failure = None;

        self.transition(WizardPhase::Submitting);
        match self.submit_and_commit().await {
            Ok(record) => {
                self.transition(WizardPhase::Completed);
                tracing::info!(
                    devices = self.state.draft.connected_device_ids.len(),
                    "Profile completed"
                );
                self.notify(
                    Notice::success("Profile Complete! 🎉")
                        .with_description("Your health journey starts now"),
                )
                .await;
                Ok(CompletionResult {
                    record,
                    redirect_to: Route::Home,
                })
            }
            Err(e) => {
                self.transition(WizardPhase::Editing);
                if !matches!(e, WizardError::Operation(OperationError::Cancelled)) {
                    self.notify(
                        Notice::error("Could not complete profile")
                            .with_description("Please try again."),
                    )
                    .await;
                }
                Err(e)
            }
        }
    }

    /// The text to confirm with before leaving, if leaving would lose edits.
    pub fn needs_leave_confirmation(&self) -> Option<&'static str> {
        let has_edits =
            !self.state.draft.is_blank() || self.state.current_step != WizardStep::FIRST;
        (self.phase != WizardPhase::Completed && has_edits).then_some(LEAVE_WARNING)
    }

    /// Closes the view; pending operations are cancelled.
    pub fn leave(&self) {
        self.scope.close();
    }

    async fn submit_and_commit(&mut self) -> Result<UserRecord, WizardError> {
        let submitter = Arc::clone(&self.ports.submitter);
        self.scope.run(submitter.submit(&self.state.draft)).await?;

        let mut record = match self.ports.profiles.load().await {
            Ok(existing) => existing.unwrap_or_default(),
            Err(StorageError::Corrupt { reason, .. }) => {
                tracing::warn!(reason = %reason, "Replacing unreadable user record");
                UserRecord::default()
            }
            Err(e) => {
                tracing::warn!(error = %e, "Failed to load user record");
                return Err(e.into());
            }
        };

        record.commit_draft(&self.state.draft, Timestamp::now());
        if let Err(e) = self.ports.profiles.save(&record).await {
            tracing::warn!(error = %e, "Failed to save committed profile");
            return Err(e.into());
        }

        if let Err(e) = self.ports.drafts.clear().await {
            tracing::warn!(error = %e, "Profile committed but draft could not be cleared");
        }
        Ok(record)
    }

    fn require_editing(&self, operation: &'static str) -> Result<(), WizardError> {
        if self.phase == WizardPhase::Editing {
            Ok(())
        } else {
            Err(WizardError::InvalidPhase {
                operation,
                phase: self.phase,
            })
        }
    }

    fn transition(&mut self, target: WizardPhase) {
        match self.phase.transition_to(target) {
            Ok(phase) => self.phase = phase,
            Err(e) => tracing::error!(error = %e, "Rejected wizard phase transition"),
        }
    }

    async fn autosave(&mut self) {
        if self.autosave {
            // Failure is recorded in storage_warning; the edit stays in memory.
            let _ = self.persist().await;
        }
    }

    async fn persist(&mut self) -> Result<(), StorageError> {
        match self.ports.drafts.save(&self.state).await {
            Ok(()) => {
                self.storage_error = None;
                Ok(())
            }
            Err(e) => {
                tracing::warn!(error = %e, "Failed to save draft, continuing in memory");
                self.storage_error = Some(e.clone());
                Err(e)
            }
        }
    }

    async fn notify(&self, notice: Notice) {
        self.ports.notifier.notify(notice).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::notify::RecordingNotifier;
    use crate::adapters::simulated::{SimulatedDeviceLinker, SimulatedProfileSubmitter};
    use crate::adapters::storage::{
        InMemoryKeyValueStore, KvDraftStore, KvProfileRepository, RecordCodec,
    };
    use crate::domain::profile::Gender;
    use crate::domain::wizard::Field;
    use crate::ports::{KeyValueStore, DRAFT_KEY};
    use std::time::Duration;

    struct Fixture {
        kv: InMemoryKeyValueStore,
        notifier: RecordingNotifier,
        ports: WizardPorts,
    }

    fn fixture_with(linker: SimulatedDeviceLinker, submitter: SimulatedProfileSubmitter) -> Fixture {
        let kv = InMemoryKeyValueStore::new();
        let codec = Arc::new(RecordCodec::new());
        let notifier = RecordingNotifier::new();
        let ports = WizardPorts {
            drafts: Arc::new(KvDraftStore::new(Arc::new(kv.clone()), codec.clone())),
            profiles: Arc::new(KvProfileRepository::new(Arc::new(kv.clone()), codec)),
            linker: Arc::new(linker),
            submitter: Arc::new(submitter),
            notifier: Arc::new(notifier.clone()),
        };
        Fixture {
            kv,
            notifier,
            ports,
        }
    }

    fn fixture() -> Fixture {
        fixture_with(
            SimulatedDeviceLinker::new(Duration::from_millis(1000)),
            SimulatedProfileSubmitter::new(Duration::from_millis(2000)),
        )
    }

    async fn enter(f: &Fixture) -> WizardController {
        WizardController::enter(f.ports.clone(), ViewScope::new(), true).await
    }

    async fn fill_personal(wizard: &mut WizardController) {
        wizard
            .update(|d| {
                d.personal.full_name = Some("Sam Carter".into());
                d.personal.gender = Some(Gender::Other);
                d.personal.age = Some(45);
            })
            .await;
    }

    async fn fill_health(wizard: &mut WizardController) {
        wizard
            .update(|d| {
                d.health.weight_kg = Some(70.0);
                d.health.height_cm = Some(175.0);
            })
            .await;
    }

    #[tokio::test]
    async fn fresh_wizard_starts_at_step_one() {
        let f = fixture();
        let wizard = enter(&f).await;
        assert_eq!(wizard.current_step(), WizardStep::PersonalInfo);
        assert!(!wizard.was_restored());
        assert_eq!(wizard.phase(), WizardPhase::Editing);
    }

    #[tokio::test]
    async fn next_with_invalid_step_stays_and_reports() {
        let f = fixture();
        let mut wizard = enter(&f).await;
        wizard.update(|d| d.personal.age = Some(0)).await;

        let outcome = wizard.next().await.unwrap();

        let StepOutcome::Blocked(report) = outcome else {
            panic!("expected blocked");
        };
        assert_eq!(report.message(Field::Age), Some("Minimum is 1"));
        assert_eq!(wizard.current_step(), WizardStep::PersonalInfo);
        assert!(wizard.errors().is_some());
    }

    #[tokio::test]
    async fn correcting_a_field_refreshes_errors() {
        let f = fixture();
        let mut wizard = enter(&f).await;
        fill_personal(&mut wizard).await;
        wizard.update(|d| d.personal.age = Some(121)).await;
        wizard.next().await.unwrap();
        assert_eq!(wizard.errors().unwrap().message(Field::Age), Some("Maximum is 120"));

        wizard.update(|d| d.personal.age = Some(45)).await;

        assert!(wizard.errors().is_none());
    }

    async fn blocked_on(
        f: &Fixture,
        step: WizardStep,
        edit: impl FnOnce(&mut ProfileDraft),
    ) -> ValidationReport {
        let mut wizard = enter(f).await;
        fill_personal(&mut wizard).await;
        fill_health(&mut wizard).await;
        wizard.jump_to(step).await;
        wizard.update(edit).await;

        let outcome = wizard.next().await.unwrap();

        assert_eq!(wizard.current_step(), step);
        assert_eq!(f.kv.len().await, 1);
        match outcome {
            StepOutcome::Blocked(report) => report,
            StepOutcome::Moved(to) => panic!("moved to {} from {}", to, step),
        }
    }

    #[tokio::test]
    async fn next_is_blocked_on_health_step_with_bad_measurements() {
        let f = fixture();

        let report = blocked_on(&f, WizardStep::HealthInfo, |d| d.health.weight_kg = None).await;
        assert_eq!(report.message(Field::WeightKg), Some("Weight is required"));

        let report = blocked_on(&f, WizardStep::HealthInfo, |d| d.health.weight_kg = Some(19.9)).await;
        assert_eq!(report.message(Field::WeightKg), Some("Minimum 20kg"));

        let report = blocked_on(&f, WizardStep::HealthInfo, |d| d.health.height_cm = Some(251.0)).await;
        assert_eq!(report.message(Field::HeightCm), Some("Maximum 250cm"));

        let report = blocked_on(&f, WizardStep::HealthInfo, |d| d.health.height_cm = None).await;
        assert_eq!(report.message(Field::HeightCm), Some("Height is required"));
    }

    #[tokio::test]
    async fn next_is_blocked_on_habits_step_with_out_of_range_values() {
        let f = fixture();

        let report = blocked_on(&f, WizardStep::DailyHabits, |d| d.habits.sleep_hours = Some(13.0)).await;
        assert_eq!(report.message(Field::SleepHours), Some("Maximum 12 hours"));

        let report = blocked_on(&f, WizardStep::DailyHabits, |d| {
            d.habits.water_goal_liters = Some(-0.25)
        })
        .await;
        assert_eq!(report.message(Field::WaterGoalLiters), Some("Cannot be negative"));
    }

    #[tokio::test]
    async fn errors_from_failed_completion_survive_unrelated_edits() {
        let f = fixture();
        let mut wizard = enter(&f).await;
        fill_personal(&mut wizard).await;
        fill_health(&mut wizard).await;
        wizard.update(|d| d.health.weight_kg = Some(5.0)).await;
        wizard.jump_to(WizardStep::Review).await;
        assert!(wizard.complete().await.is_err());

        wizard.update(|d| d.personal.full_name = Some("Sam Carter Jr".into())).await;

        let errors = wizard.errors().unwrap();
        assert_eq!(errors.message(Field::WeightKg), Some("Minimum 20kg"));
        assert_eq!(wizard.current_step(), WizardStep::Review);

        wizard.update(|d| d.health.weight_kg = Some(70.0)).await;
        assert!(wizard.errors().is_none());
    }

    #[tokio::test]
    async fn next_advances_and_arriving_at_habits_applies_defaults() {
        let f = fixture();
        let mut wizard = enter(&f).await;
        fill_personal(&mut wizard).await;
        assert_eq!(wizard.next().await.unwrap(), StepOutcome::Moved(WizardStep::HealthInfo));
        fill_health(&mut wizard).await;
        assert_eq!(wizard.next().await.unwrap(), StepOutcome::Moved(WizardStep::DailyHabits));

        assert_eq!(wizard.draft().habits.sleep_hours, Some(7.0));
        assert_eq!(wizard.draft().habits.water_goal_liters, Some(2.0));
    }

    #[tokio::test]
    async fn next_on_review_stays_on_review() {
        let f = fixture();
        let mut wizard = enter(&f).await;
        wizard.jump_to(WizardStep::Review).await;
        assert_eq!(wizard.next().await.unwrap(), StepOutcome::Moved(WizardStep::Review));
    }

    #[tokio::test]
    async fn back_never_validates_and_floors_at_one() {
        let f = fixture();
        let mut wizard = enter(&f).await;
        wizard.jump_to(WizardStep::HealthInfo).await;

        assert_eq!(wizard.back().await, WizardStep::PersonalInfo);
        assert_eq!(wizard.back().await, WizardStep::PersonalInfo);
    }

    #[tokio::test]
    async fn every_change_is_saved() {
        let f = fixture();
        let mut wizard = enter(&f).await;
        fill_personal(&mut wizard).await;
        wizard.next().await.unwrap();

        let restored = enter(&f).await;

        assert!(restored.was_restored());
        assert_eq!(restored.current_step(), WizardStep::HealthInfo);
        assert_eq!(restored.draft().personal.age, Some(45));
    }

    #[tokio::test]
    async fn autosave_off_only_saves_on_save_and_exit() {
        let f = fixture();
        let mut wizard = WizardController::enter(f.ports.clone(), ViewScope::new(), false).await;
        fill_personal(&mut wizard).await;
        assert!(f.kv.get(DRAFT_KEY).await.unwrap().is_none());

        assert_eq!(wizard.save_and_exit().await.unwrap(), Route::Home);

        assert!(f.kv.get(DRAFT_KEY).await.unwrap().is_some());
        assert_eq!(f.notifier.titles(), vec!["Progress saved"]);
    }

    #[tokio::test]
    async fn storage_failure_keeps_working_in_memory() {
        let f = fixture();
        let mut wizard = enter(&f).await;
        f.kv.set_fail_writes(true);

        fill_personal(&mut wizard).await;

        assert_eq!(wizard.draft().personal.age, Some(45));
        assert!(wizard.storage_warning().is_some());
        assert_eq!(wizard.next().await.unwrap(), StepOutcome::Moved(WizardStep::HealthInfo));

        f.kv.set_fail_writes(false);
        wizard.back().await;
        assert!(wizard.storage_warning().is_none());
    }

    #[tokio::test]
    async fn save_and_exit_failure_is_reported() {
        let f = fixture();
        let mut wizard = enter(&f).await;
        f.kv.set_fail_writes(true);

        let err = wizard.save_and_exit().await.unwrap_err();

        assert_eq!(err.code(), ErrorCode::StorageFailed);
        assert_eq!(f.notifier.last().unwrap().title, "Could not save progress");
    }

    #[tokio::test(start_paused = true)]
    async fn connect_device_links_after_delay() {
        let f = fixture();
        let mut wizard = enter(&f).await;
        let watch = DeviceId::new("watch").unwrap();

        wizard.connect_device(watch.clone()).await.unwrap();

        assert!(wizard.draft().is_connected(&watch));
        assert_eq!(f.notifier.titles(), vec!["Device connected successfully! ✓"]);
    }

    #[tokio::test(start_paused = true)]
    async fn failed_connect_leaves_draft_unchanged() {
        let bp = DeviceId::new("bp").unwrap();
        let f = fixture_with(
            SimulatedDeviceLinker::new(Duration::from_millis(1000)).with_failing_device(bp.clone()),
            SimulatedProfileSubmitter::default(),
        );
        let mut wizard = enter(&f).await;

        let err = wizard.connect_device(bp.clone()).await.unwrap_err();

        assert_eq!(err.code(), ErrorCode::OperationFailed);
        assert!(!wizard.draft().is_connected(&bp));
        assert_eq!(f.notifier.last().unwrap().title, "Could not connect Blood Pressure Monitor");
    }

    #[tokio::test(start_paused = true)]
    async fn leaving_cancels_connect() {
        let f = fixture();
        let scope = ViewScope::new();
        let mut wizard = WizardController::enter(f.ports.clone(), scope.clone(), true).await;
        let closer = scope.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(500)).await;
            closer.close();
        });

        let err = wizard.connect_device(DeviceId::new("scale").unwrap()).await.unwrap_err();

        assert_eq!(err, WizardError::Operation(OperationError::Cancelled));
        assert!(wizard.draft().connected_device_ids.is_empty());
        assert!(f.notifier.notices().is_empty());
    }

    #[tokio::test]
    async fn toggle_device_round_trips() {
        let f = fixture();
        let mut wizard = enter(&f).await;
        let fitbit = DeviceId::new("fitbit").unwrap();

        assert!(wizard.toggle_device(fitbit.clone(), true).await);
        assert!(wizard.toggle_device(fitbit, false).await);

        assert!(wizard.draft().connected_device_ids.is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn complete_commits_profile_and_clears_draft() {
        let f = fixture();
        let mut wizard = enter(&f).await;
        fill_personal(&mut wizard).await;
        fill_health(&mut wizard).await;
        wizard.jump_to(WizardStep::Review).await;

        let result = wizard.complete().await.unwrap();

        assert!(result.record.profile_completed);
        assert_eq!(result.redirect_to, Route::Home);
        assert_eq!(wizard.phase(), WizardPhase::Completed);
        assert!(f.kv.get(DRAFT_KEY).await.unwrap().is_none());
        assert!(wizard.needs_leave_confirmation().is_none());
        assert_eq!(f.notifier.last().unwrap().title, "Profile Complete! 🎉");
    }

    #[tokio::test]
    async fn complete_with_invalid_step_reports_it_and_stays() {
        let f = fixture();
        let mut wizard = enter(&f).await;
        fill_personal(&mut wizard).await;
        wizard.jump_to(WizardStep::Review).await;

        let err = wizard.complete().await.unwrap_err();

        let WizardError::Incomplete { step, .. } = &err else {
            panic!("expected incomplete");
        };
        assert_eq!(*step, WizardStep::HealthInfo);
        assert_eq!(err.user_message(), "Weight is required");
        assert_eq!(wizard.current_step(), WizardStep::Review);
        assert_eq!(wizard.phase(), WizardPhase::Editing);
    }

    #[tokio::test(start_paused = true)]
    async fn failed_submit_keeps_draft_and_allows_retry() {
        let f = fixture_with(
            SimulatedDeviceLinker::default(),
            SimulatedProfileSubmitter::new(Duration::from_millis(10)).failing_with("offline"),
        );
        let mut wizard = enter(&f).await;
        fill_personal(&mut wizard).await;
        fill_health(&mut wizard).await;
        wizard.jump_to(WizardStep::Review).await;

        let err = wizard.complete().await.unwrap_err();

        assert_eq!(err.code(), ErrorCode::OperationFailed);
        assert_eq!(wizard.phase(), WizardPhase::Editing);
        assert!(f.kv.get(DRAFT_KEY).await.unwrap().is_some());
        assert_eq!(f.notifier.last().unwrap().title, "Could not complete profile");
    }

    #[tokio::test(start_paused = true)]
    async fn completed_wizard_rejects_further_work() {
        let f = fixture();
        let mut wizard = enter(&f).await;
        fill_personal(&mut wizard).await;
        fill_health(&mut wizard).await;
        wizard.jump_to(WizardStep::Review).await;
        wizard.complete().await.unwrap();

        let err = wizard.next().await.unwrap_err();

        assert_eq!(err.code(), ErrorCode::InvalidStateTransition);
        assert!(wizard.complete().await.is_err());
    }

    #[tokio::test]
    async fn complete_is_only_offered_on_review() {
        let f = fixture();
        let mut wizard = enter(&f).await;
        fill_personal(&mut wizard).await;
        fill_health(&mut wizard).await;

        let err = wizard.complete().await.unwrap_err();

        assert_eq!(err, WizardError::NotOnReview(WizardStep::PersonalInfo));
        assert_eq!(wizard.phase(), WizardPhase::Editing);
    }

    #[tokio::test]
    async fn leave_confirmation_only_with_edits() {
        let f = fixture();
        let mut wizard = enter(&f).await;
        assert!(wizard.needs_leave_confirmation().is_none());

        wizard.update(|d| d.personal.full_name = Some("S".into())).await;

        assert_eq!(wizard.needs_leave_confirmation(), Some(LEAVE_WARNING));
    }
}
