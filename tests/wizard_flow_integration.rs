//! Integration tests for the profile-completion flow.
//!
//! These tests drive the public API end to end over file-backed storage:
//! 1. A user fills in part of the wizard and the process goes away
//! 2. A new controller over the same directory resumes where they stopped
//! 3. Completion commits the profile, clears the draft and stops the prompt
//! 4. The session gate protects the doctor portal and login returns there

use std::sync::Arc;
use tempfile::TempDir;

use healthtrack::adapters::notify::RecordingNotifier;
use healthtrack::adapters::storage::{
    shared_codec, FileKeyValueStore, KvProfileRepository, KvSessionStore,
};
use healthtrack::adapters::WizardWiring;
use healthtrack::application::{
    AuthHandler, LoginCommand, ProfileEditor, ProfilePrompt, SessionGate, StepOutcome, ViewScope,
    WizardController,
};
use healthtrack::config::AppConfig;
use healthtrack::domain::foundation::DeviceId;
use healthtrack::domain::profile::{Condition, Gender, ProfileSection};
use healthtrack::domain::routing::{AccessPolicy, Route, RouteDecision};
use healthtrack::domain::session::{LoginForm, Role};
use healthtrack::domain::wizard::{WizardPhase, WizardStep};
use healthtrack::ports::{KeyValueStore, ProfileRepository, DRAFT_KEY};

// =============================================================================
// Test Infrastructure
// =============================================================================

/// Everything a fresh "page load" over one data directory needs.
struct App {
    config: AppConfig,
    store: Arc<FileKeyValueStore>,
    notifier: RecordingNotifier,
}

impl App {
    fn open(dir: &TempDir) -> Self {
        Self {
            config: AppConfig::default(),
            store: Arc::new(FileKeyValueStore::new(dir.path())),
            notifier: RecordingNotifier::new(),
        }
    }

    fn profiles(&self) -> Arc<KvProfileRepository> {
        Arc::new(KvProfileRepository::new(self.store.clone(), shared_codec()))
    }

    fn sessions(&self) -> Arc<KvSessionStore> {
        Arc::new(KvSessionStore::new(self.store.clone(), shared_codec()))
    }

    async fn wizard(&self) -> WizardController {
        WizardWiring::new(
            &self.config.wizard,
            self.store.clone(),
            Arc::new(self.notifier.clone()),
        )
        .enter(ViewScope::new())
        .await
    }

    fn gate(&self) -> SessionGate {
        SessionGate::new(
            self.sessions(),
            Arc::new(self.notifier.clone()),
            AccessPolicy::default(),
        )
    }
}

// =============================================================================
// Wizard
// =============================================================================

#[tokio::test(start_paused = true)]
async fn wizard_survives_reload_and_completes() {
    let dir = TempDir::new().unwrap();

    // First visit: personal and health info, then the page goes away.
    {
        let app = App::open(&dir);
        let mut wizard = app.wizard().await;
        wizard
            .update(|d| {
                d.personal.full_name = Some("Sam Carter".to_string());
                d.personal.gender = Some(Gender::Other);
                d.personal.age = Some(45);
            })
            .await;
        assert_eq!(wizard.next().await.unwrap(), StepOutcome::Moved(WizardStep::HealthInfo));
        wizard
            .update(|d| {
                d.health.weight_kg = Some(70.0);
                d.health.height_cm = Some(175.0);
                d.set_condition(Condition::Hypertension, true);
            })
            .await;
        assert_eq!(wizard.bmi().unwrap().band().label(), "Normal");
        assert_eq!(wizard.next().await.unwrap(), StepOutcome::Moved(WizardStep::DailyHabits));
        wizard.leave();
    }

    // Second visit over the same directory.
    let app = App::open(&dir);
    let mut wizard = app.wizard().await;
    assert!(wizard.was_restored());
    assert_eq!(wizard.current_step(), WizardStep::DailyHabits);
    assert_eq!(wizard.draft().habits.sleep_hours, Some(7.0));
    assert!(wizard.draft().health.conditions.contains(&Condition::Hypertension));

    assert_eq!(wizard.next().await.unwrap(), StepOutcome::Moved(WizardStep::DeviceLinking));
    wizard.connect_device(DeviceId::new("watch").unwrap()).await.unwrap();
    assert_eq!(wizard.next().await.unwrap(), StepOutcome::Moved(WizardStep::Review));

    let result = wizard.complete().await.unwrap();

    assert_eq!(result.redirect_to, Route::Home);
    assert_eq!(wizard.phase(), WizardPhase::Completed);
    assert!(app.store.get(DRAFT_KEY).await.unwrap().is_none());
    assert!(!dir.path().join("draft-progress.json").exists());

    let record = app.profiles().load().await.unwrap().unwrap();
    assert!(record.profile_completed);
    let profile = record.profile_data.unwrap();
    assert!(profile.connected_device_ids.contains(&DeviceId::new("watch").unwrap()));
    assert_eq!(profile.habits.water_goal_liters, Some(2.0));

    assert!(!ProfilePrompt::new(app.profiles()).should_prompt().await);
    assert_eq!(
        app.notifier.titles(),
        vec!["Device connected successfully! ✓", "Profile Complete! 🎉"]
    );
}

#[tokio::test]
async fn legacy_draft_from_web_app_is_resumed() {
    let dir = TempDir::new().unwrap();
    std::fs::write(
        dir.path().join("draft-progress.json"),
        r#"{"form":{"fullName":"Ada","gender":"Female","age":"45","chronic":["Asthma"],"waterGoalL":1.5},"step":3,"connectedDevices":["bp"]}"#,
    )
    .unwrap();

    let app = App::open(&dir);
    let wizard = app.wizard().await;

    assert!(wizard.was_restored());
    assert_eq!(wizard.current_step(), WizardStep::DailyHabits);
    assert_eq!(wizard.draft().personal.age, Some(45));
    assert!(wizard.draft().health.conditions.contains(&Condition::Asthma));
    assert_eq!(wizard.draft().habits.water_goal_liters, Some(1.5));
    assert_eq!(wizard.draft().habits.sleep_hours, Some(7.0));
    assert!(wizard.draft().is_connected(&DeviceId::new("bp").unwrap()));
}

#[tokio::test]
async fn corrupt_draft_starts_a_new_wizard() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("draft-progress.json"), "{ truncated").unwrap();

    let app = App::open(&dir);
    let wizard = app.wizard().await;

    assert!(!wizard.was_restored());
    assert_eq!(wizard.current_step(), WizardStep::PersonalInfo);
    assert!(wizard.draft().is_blank());
}

// =============================================================================
// Profile editor
// =============================================================================

#[tokio::test]
async fn editor_saves_sections_into_the_user_record() {
    let dir = TempDir::new().unwrap();
    let app = App::open(&dir);
    let prompt = ProfilePrompt::new(app.profiles());
    assert!(prompt.should_prompt().await);

    let mut editor = ProfileEditor::open(app.profiles(), Arc::new(app.notifier.clone())).await;
    editor.update(|d| {
        d.health.weight_kg = Some(82.0);
        d.health.height_cm = Some(180.0);
    });
    editor.save_section(ProfileSection::Health).await.unwrap();

    let reopened = ProfileEditor::open(app.profiles(), Arc::new(app.notifier.clone())).await;
    assert_eq!(reopened.form().health.weight_kg, Some(82.0));
    assert_eq!(reopened.bmi().unwrap().value(), 25.3);
    assert!(!prompt.should_prompt().await);
}

// =============================================================================
// Session gate
// =============================================================================

#[tokio::test]
async fn doctor_portal_requires_login_and_returns_after_it() {
    let dir = TempDir::new().unwrap();
    let app = App::open(&dir);
    let gate = app.gate();

    let decision = gate.guard("/doctor/patient/p-7").await;
    let RouteDecision::Redirect { to, return_to, .. } = decision else {
        panic!("expected redirect, got {:?}", decision);
    };
    assert_eq!(to, Route::DoctorLogin);
    assert_eq!(app.notifier.titles(), vec!["Please login to access doctor portal"]);

    let auth = AuthHandler::new(app.sessions(), AccessPolicy::default(), true);
    let login = auth
        .login(LoginCommand {
            role: Role::Doctor,
            form: LoginForm::new("DOC-42", "hunter2"),
            display_name: Some("Dr. Rivera".to_string()),
            return_to,
        })
        .await
        .unwrap();
    assert_eq!(login.redirect_to, "/doctor/patient/p-7");

    assert_eq!(
        gate.guard(&login.redirect_to).await,
        RouteDecision::Allow(Route::DoctorPatient("p-7".to_string()))
    );

    auth.logout(Role::Doctor).await.unwrap();
    assert!(matches!(
        gate.guard("/doctor/dashboard").await,
        RouteDecision::Redirect { .. }
    ));
}

#[tokio::test]
async fn session_record_never_contains_the_password() {
    let dir = TempDir::new().unwrap();
    let app = App::open(&dir);
    let auth = AuthHandler::new(app.sessions(), AccessPolicy::default(), true);

    auth.login(LoginCommand {
        role: Role::Patient,
        form: LoginForm::new("sam@example.com", "correct horse battery"),
        display_name: None,
        return_to: None,
    })
    .await
    .unwrap();

    let raw = std::fs::read_to_string(dir.path().join("session.json")).unwrap();
    assert!(!raw.contains("correct horse battery"));
}
