//! CommittedProfile and the user record that embeds it.
//!
//! A committed profile is what a finished wizard (or the profile editor)
//! writes. It supersedes the draft: once written, the draft slot is cleared.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

use super::{DailyHabits, HealthInfo, PersonalInfo, ProfileDraft};
use crate::domain::foundation::{DeviceId, Timestamp};

/// Editable sections of a committed profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProfileSection {
    Personal,
    Health,
    Habits,
    Devices,
}

impl ProfileSection {
    /// Returns all sections in editor order.
    pub fn all() -> &'static [ProfileSection] {
        &[
            ProfileSection::Personal,
            ProfileSection::Health,
            ProfileSection::Habits,
            ProfileSection::Devices,
        ]
    }

    /// Returns the tab title.
    pub fn display_name(&self) -> &'static str {
        match self {
            ProfileSection::Personal => "Personal",
            ProfileSection::Health => "Health",
            ProfileSection::Habits => "Habits",
            ProfileSection::Devices => "Devices",
        }
    }
}

impl fmt::Display for ProfileSection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// Finalized profile data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommittedProfile {
    #[serde(default)]
    pub personal: PersonalInfo,
    #[serde(default)]
    pub health: HealthInfo,
    #[serde(default)]
    pub habits: DailyHabits,
    #[serde(default)]
    pub connected_device_ids: BTreeSet<DeviceId>,
    pub last_updated: Timestamp,
}

impl CommittedProfile {
    /// Creates a committed profile from a finished draft.
    pub fn from_draft(draft: &ProfileDraft, now: Timestamp) -> Self {
        Self {
            personal: draft.personal.clone(),
            health: draft.health.clone(),
            habits: draft.habits.clone(),
            connected_device_ids: draft.connected_device_ids.clone(),
            last_updated: now,
        }
    }

    /// Overlays a draft onto this profile.
    ///
    /// Present draft values replace stored ones; absent draft values leave the
    /// stored value alone. Condition and device sets are replaced wholesale.
    pub fn merge_draft(&mut self, draft: &ProfileDraft, now: Timestamp) {
        let p = &draft.personal;
        overlay(&mut self.personal.full_name, &p.full_name);
        overlay(&mut self.personal.gender, &p.gender);
        overlay(&mut self.personal.age, &p.age);
        overlay(&mut self.personal.caregiver_id, &p.caregiver_id);
        overlay(&mut self.personal.doctor_id, &p.doctor_id);

        let h = &draft.health;
        self.health.conditions = h.conditions.clone();
        overlay(&mut self.health.condition_other, &h.condition_other);
        overlay(&mut self.health.family_history, &h.family_history);
        overlay(&mut self.health.weight_kg, &h.weight_kg);
        overlay(&mut self.health.height_cm, &h.height_cm);

        let d = &draft.habits;
        overlay(&mut self.habits.exercise_frequency, &d.exercise_frequency);
        overlay(&mut self.habits.sleep_hours, &d.sleep_hours);
        overlay(&mut self.habits.water_goal_liters, &d.water_goal_liters);
        overlay(&mut self.habits.diet, &d.diet);
        overlay(&mut self.habits.smoking, &d.smoking);
        overlay(&mut self.habits.alcohol, &d.alcohol);

        self.connected_device_ids = draft.connected_device_ids.clone();
        self.last_updated = now;
    }

    /// Replaces one section with the values held by an editor form.
    pub fn apply_section(&mut self, section: ProfileSection, form: &ProfileDraft, now: Timestamp) {
        match section {
            ProfileSection::Personal => self.personal = form.personal.clone(),
            ProfileSection::Health => self.health = form.health.clone(),
            ProfileSection::Habits => self.habits = form.habits.clone(),
            ProfileSection::Devices => {
                self.connected_device_ids = form.connected_device_ids.clone()
            }
        }
        self.last_updated = now;
    }

    /// Copies one section of this profile into an editor form.
    pub fn restore_section(&self, section: ProfileSection, form: &mut ProfileDraft) {
        match section {
            ProfileSection::Personal => form.personal = self.personal.clone(),
            ProfileSection::Health => form.health = self.health.clone(),
            ProfileSection::Habits => {
                form.habits = self.habits.clone();
                form.habits.apply_defaults();
            }
            ProfileSection::Devices => form.connected_device_ids = self.connected_device_ids.clone(),
        }
    }

    /// Returns the profile as an editable form, with habit defaults filled in.
    pub fn to_form(&self) -> ProfileDraft {
        let mut form = ProfileDraft {
            personal: self.personal.clone(),
            health: self.health.clone(),
            habits: self.habits.clone(),
            connected_device_ids: self.connected_device_ids.clone(),
        };
        form.habits.apply_defaults();
        form
    }
}

fn overlay<T: Clone>(target: &mut Option<T>, source: &Option<T>) {
    if source.is_some() {
        target.clone_from(source);
    }
}

/// The broader user record the committed profile lives in.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct UserRecord {
    pub name: Option<String>,
    pub email: Option<String>,
    pub profile_completed: bool,
    pub profile_data: Option<CommittedProfile>,
    pub profile_prompt_dismissed: bool,
    pub updated_at: Option<Timestamp>,
}

impl UserRecord {
    /// Merges a finished draft into the record and marks the profile complete.
    pub fn commit_draft(&mut self, draft: &ProfileDraft, now: Timestamp) {
        match self.profile_data.as_mut() {
            Some(existing) => existing.merge_draft(draft, now),
            None => self.profile_data = Some(CommittedProfile::from_draft(draft, now)),
        }
        if self.name.is_none() {
            self.name.clone_from(&draft.personal.full_name);
        }
        self.profile_completed = true;
        self.updated_at = Some(now);
    }

    /// Saves one section from an editor form and marks the profile complete.
    pub fn commit_section(&mut self, section: ProfileSection, form: &ProfileDraft, now: Timestamp) {
        match self.profile_data.as_mut() {
            Some(existing) => existing.apply_section(section, form, now),
            None => {
                let mut profile = CommittedProfile::from_draft(&ProfileDraft::default(), now);
                profile.apply_section(section, form, now);
                self.profile_data = Some(profile);
            }
        }
        self.profile_completed = true;
        self.updated_at = Some(now);
    }

    /// True when the home surface should prompt for profile completion.
    pub fn should_prompt_completion(&self) -> bool {
        !self.profile_completed && !self.profile_prompt_dismissed
    }
}
