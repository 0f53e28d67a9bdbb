//! ProfileEditor - section-by-section editing of the committed profile.

use std::sync::Arc;
use thiserror::Error;

use crate::domain::foundation::{DeviceId, ErrorCode, Timestamp};
use crate::domain::profile::{Bmi, CommittedProfile, ProfileDraft, ProfileSection, UserRecord};
use crate::domain::wizard::{StepValidator, ValidationReport, WizardStep};
use crate::ports::{Notice, Notifier, ProfileRepository, StorageError};

/// Errors returned when saving an editor section.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EditorError {
    /// The section holds values outside the profile rules. Nothing was written.
    #[error("{section} has invalid fields")]
    Invalid {
        section: ProfileSection,
        report: ValidationReport,
    },

    #[error(transparent)]
    Storage(#[from] StorageError),
}

impl EditorError {
    pub fn code(&self) -> ErrorCode {
        match self {
            EditorError::Invalid { .. } => ErrorCode::ValidationFailed,
            EditorError::Storage(e) => e.code(),
        }
    }

    pub fn user_message(&self) -> String {
        match self {
            EditorError::Invalid { report, .. } => report
                .first_invalid_field()
                .and_then(|f| report.message(f))
                .unwrap_or("Please review the highlighted fields")
                .to_string(),
            EditorError::Storage(_) => "Failed to save profile. Try again.".to_string(),
        }
    }
}

/// Editor over the stored user record.
///
/// The form starts from the committed profile with habit defaults filled in.
/// Each section is saved or reverted on its own.
pub struct ProfileEditor {
    profiles: Arc<dyn ProfileRepository>,
    notifier: Arc<dyn Notifier>,
    form: ProfileDraft,
    report: Option<ValidationReport>,
}

impl ProfileEditor {
    /// Opens the editor. An unreadable record opens with defaults.
    pub async fn open(profiles: Arc<dyn ProfileRepository>, notifier: Arc<dyn Notifier>) -> Self {
        let form = Self::stored_form(profiles.as_ref()).await;
        Self {
            profiles,
            notifier,
            form,
            report: None,
        }
    }

    pub fn form(&self) -> &ProfileDraft {
        &self.form
    }

    pub fn bmi(&self) -> Option<Bmi> {
        self.form.bmi()
    }

    /// Field errors from the last rejected save.
    pub fn errors(&self) -> Option<&ValidationReport> {
        self.report.as_ref()
    }

    /// Applies a field edit to the form. Nothing is saved.
    pub fn update(&mut self, edit: impl FnOnce(&mut ProfileDraft)) {
        edit(&mut self.form);
    }

    /// Writes one section of the form into the user record.
    ///
    /// The section is validated with the rules of its wizard step first. An
    /// invalid section is not written.
    pub async fn save_section(&mut self, section: ProfileSection) -> Result<UserRecord, EditorError> {
        let result = match self.validate(section) {
            Ok(()) => self.commit(section).await.map_err(EditorError::from),
            Err(e) => Err(e),
        };
        let notice = match &result {
            Ok(_) => Notice::success("Saved")
                .with_description(format!("{} updated successfully", section)),
            Err(e @ EditorError::Invalid { .. }) => {
                tracing::debug!(section = %section, "Rejected invalid profile section");
                Notice::error("Error").with_description(e.user_message())
            }
            Err(e) => {
                tracing::warn!(section = %section, error = %e, "Failed to save profile section");
                Notice::error("Error").with_description(e.user_message())
            }
        };
        self.notifier.notify(notice).await;
        result
    }

    /// Puts one section of the form back to the stored values.
    pub async fn revert_section(&mut self, section: ProfileSection) {
        let stored = Self::stored_form(self.profiles.as_ref()).await;
        let profile = CommittedProfile::from_draft(&stored, Timestamp::now());
        profile.restore_section(section, &mut self.form);
        self.notifier
            .notify(Notice::info("Reverted").with_description(format!("{} reverted", section)))
            .await;
    }

    /// Connects or disconnects an integration and saves it right away.
    ///
    /// The rest of the form is left unsaved.
    pub async fn toggle_device(&mut self, device: DeviceId, connect: bool) -> Result<(), StorageError> {
        if !self.form.toggle_device(device, connect) {
            return Ok(());
        }

        let mut record = self.stored_record().await?;
        let now = Timestamp::now();
        let profile = record
            .profile_data
            .get_or_insert_with(|| CommittedProfile::from_draft(&ProfileDraft::default(), now));
        profile.connected_device_ids = self.form.connected_device_ids.clone();
        profile.last_updated = now;
        record.updated_at = Some(now);

        self.profiles.save(&record).await.map_err(|e| {
            tracing::warn!(error = %e, "Failed to save device connection");
            e
        })
    }

    fn validate(&mut self, section: ProfileSection) -> Result<(), EditorError> {
        self.report = None;
        let Some(step) = section_step(section) else {
            return Ok(());
        };
        let report = StepValidator::validate(step, &self.form);
        if report.is_valid() {
            return Ok(());
        }
        self.report = Some(report.clone());
        Err(EditorError::Invalid { section, report })
    }

    async fn commit(&self, section: ProfileSection) -> Result<UserRecord, StorageError> {
        let mut record = self.stored_record().await?;
        record.commit_section(section, &self.form, Timestamp::now());
        self.profiles.save(&record).await?;
        Ok(record)
    }

    // The editor opened an unreadable record with defaults, so saving replaces it.
    async fn stored_record(&self) -> Result<UserRecord, StorageError> {
        match self.profiles.load().await {
            Ok(record) => Ok(record.unwrap_or_default()),
            Err(StorageError::Corrupt { reason, .. }) => {
                tracing::warn!(reason = %reason, "Replacing unreadable user record");
                Ok(UserRecord::default())
            }
            Err(e) => Err(e),
        }
    }

    async fn stored_form(profiles: &dyn ProfileRepository) -> ProfileDraft {
        let profile = match profiles.load().await {
            Ok(record) => record.and_then(|r| r.profile_data),
            Err(e) => {
                tracing::warn!(error = %e, "Opening profile editor with defaults");
                None
            }
        };
        match profile {
            Some(profile) => profile.to_form(),
            None => {
                let mut form = ProfileDraft::default();
                form.habits.apply_defaults();
                form
            }
        }
    }
}

fn section_step(section: ProfileSection) -> Option<WizardStep> {
    match section {
        ProfileSection::Personal => Some(WizardStep::PersonalInfo),
        ProfileSection::Health => Some(WizardStep::HealthInfo),
        ProfileSection::Habits => Some(WizardStep::DailyHabits),
        ProfileSection::Devices => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::notify::RecordingNotifier;
    use crate::adapters::storage::{InMemoryKeyValueStore, KvProfileRepository, RecordCodec};
    use crate::domain::profile::Gender;
    use crate::domain::wizard::Field;
    use crate::ports::{KeyValueStore, USER_KEY};

    struct Fixture {
        kv: InMemoryKeyValueStore,
        profiles: Arc<KvProfileRepository>,
        notifier: RecordingNotifier,
    }

    impl Fixture {
        fn new() -> Self {
            let kv = InMemoryKeyValueStore::new();
            let profiles = Arc::new(KvProfileRepository::new(
                Arc::new(kv.clone()),
                Arc::new(RecordCodec::new()),
            ));
            Self {
                kv,
                profiles,
                notifier: RecordingNotifier::new(),
            }
        }

        async fn open(&self) -> ProfileEditor {
            ProfileEditor::open(self.profiles.clone(), Arc::new(self.notifier.clone())).await
        }

        async fn seed(&self) {
            let mut draft = ProfileDraft::new();
            draft.personal.full_name = Some("Sam Carter".to_string());
            draft.personal.gender = Some(Gender::Female);
            draft.personal.age = Some(45);
            draft.health.weight_kg = Some(70.0);
            draft.health.height_cm = Some(175.0);
            let mut record = UserRecord::default();
            record.commit_draft(&draft, Timestamp::now());
            self.profiles.save(&record).await.unwrap();
        }
    }

    #[tokio::test]
    async fn opens_with_defaults_when_nothing_is_stored() {
        let f = Fixture::new();
        let editor = f.open().await;
        assert_eq!(editor.form().habits.sleep_hours, Some(7.0));
        assert_eq!(editor.form().habits.water_goal_liters, Some(2.0));
        assert!(editor.bmi().is_none());
    }

    #[tokio::test]
    async fn opens_stored_profile() {
        let f = Fixture::new();
        f.seed().await;
        let editor = f.open().await;
        assert_eq!(editor.form().personal.age, Some(45));
        assert_eq!(editor.bmi().unwrap().value(), 22.9);
    }

    #[tokio::test]
    async fn unreadable_record_opens_with_defaults() {
        let f = Fixture::new();
        f.kv.put(USER_KEY, "][").await.unwrap();
        let mut editor = f.open().await;
        assert!(editor.form().personal.full_name.is_none());

        editor.save_section(ProfileSection::Habits).await.unwrap();

        let stored = f.profiles.load().await.unwrap().unwrap();
        assert_eq!(stored.profile_data.unwrap().habits.sleep_hours, Some(7.0));
    }

    #[tokio::test]
    async fn save_section_only_writes_that_section() {
        let f = Fixture::new();
        f.seed().await;
        let mut editor = f.open().await;
        editor.update(|d| {
            d.personal.age = Some(46);
            d.health.weight_kg = Some(80.0);
        });

        let record = editor.save_section(ProfileSection::Personal).await.unwrap();

        let profile = record.profile_data.unwrap();
        assert_eq!(profile.personal.age, Some(46));
        assert_eq!(profile.health.weight_kg, Some(70.0));
        assert!(record.profile_completed);
        let notice = f.notifier.last().unwrap();
        assert_eq!(notice.title, "Saved");
        assert_eq!(notice.description.as_deref(), Some("Personal updated successfully"));
    }

    #[tokio::test]
    async fn out_of_range_sections_are_not_written() {
        let f = Fixture::new();
        f.seed().await;
        let mut editor = f.open().await;
        editor.update(|d| {
            d.personal.age = Some(0);
            d.health.weight_kg = Some(5.0);
            d.health.height_cm = Some(900.0);
        });

        let personal = editor.save_section(ProfileSection::Personal).await.unwrap_err();
        let health = editor.save_section(ProfileSection::Health).await.unwrap_err();

        assert_eq!(personal.code(), ErrorCode::ValidationFailed);
        assert_eq!(personal.user_message(), "Minimum is 1");
        assert!(matches!(health, EditorError::Invalid { section: ProfileSection::Health, .. }));
        let errors = editor.errors().unwrap();
        assert_eq!(errors.message(Field::WeightKg), Some("Minimum 20kg"));
        assert_eq!(errors.message(Field::HeightCm), Some("Maximum 250cm"));

        let stored = f.profiles.load().await.unwrap().unwrap().profile_data.unwrap();
        assert_eq!(stored.personal.age, Some(45));
        assert_eq!(stored.health.weight_kg, Some(70.0));
        assert_eq!(stored.health.height_cm, Some(175.0));
        let notice = f.notifier.last().unwrap();
        assert_eq!(notice.title, "Error");
        assert_eq!(notice.description.as_deref(), Some("Minimum 20kg"));
    }

    #[tokio::test]
    async fn incomplete_personal_section_is_rejected_on_first_save() {
        let f = Fixture::new();
        let mut editor = f.open().await;
        editor.update(|d| d.personal.full_name = Some("Sam".into()));

        let err = editor.save_section(ProfileSection::Personal).await.unwrap_err();

        assert_eq!(err.user_message(), "Please select gender");
        assert_eq!(f.profiles.load().await.unwrap(), None);
    }

    #[tokio::test]
    async fn failed_save_shows_error_notice() {
        let f = Fixture::new();
        let mut editor = f.open().await;
        f.kv.set_fail_writes(true);

        assert!(editor.save_section(ProfileSection::Habits).await.is_err());

        let notice = f.notifier.last().unwrap();
        assert_eq!(notice.title, "Error");
        assert_eq!(notice.description.as_deref(), Some("Failed to save profile. Try again."));
    }

    #[tokio::test]
    async fn revert_restores_stored_section_only() {
        let f = Fixture::new();
        f.seed().await;
        let mut editor = f.open().await;
        editor.update(|d| {
            d.personal.age = Some(99);
            d.health.weight_kg = Some(120.0);
        });

        editor.revert_section(ProfileSection::Health).await;

        assert_eq!(editor.form().health.weight_kg, Some(70.0));
        assert_eq!(editor.form().personal.age, Some(99));
        assert_eq!(f.notifier.titles(), vec!["Reverted"]);
    }

    #[tokio::test]
    async fn device_toggle_saves_immediately() {
        let f = Fixture::new();
        f.seed().await;
        let mut editor = f.open().await;
        let fitbit = DeviceId::new("fitbit").unwrap();

        editor.toggle_device(fitbit.clone(), true).await.unwrap();

        let stored = f.profiles.load().await.unwrap().unwrap();
        assert!(stored.profile_data.unwrap().connected_device_ids.contains(&fitbit));

        editor.toggle_device(fitbit, false).await.unwrap();
        let stored = f.profiles.load().await.unwrap().unwrap();
        assert!(stored.profile_data.unwrap().connected_device_ids.is_empty());
    }
}
