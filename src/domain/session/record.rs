//! SessionRecord - the local "is logged in" marker.
//!
//! A session record is a presence check, not a verified credential. It is
//! written at login, read on every gated route entry and deleted at logout.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::domain::foundation::{SessionId, SubjectId, Timestamp, ValidationError};

/// Who a session belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Patient,
    Caregiver,
    Doctor,
}

impl Role {
    /// Returns all roles.
    pub fn all() -> &'static [Role] {
        &[Role::Patient, Role::Caregiver, Role::Doctor]
    }

    /// Storage slot the role's session lives in.
    pub fn slot(&self) -> SessionSlot {
        match self {
            Role::Doctor => SessionSlot::Doctor,
            Role::Patient | Role::Caregiver => SessionSlot::General,
        }
    }

    /// Landing path after login.
    pub fn home_path(&self) -> &'static str {
        match self {
            Role::Patient => "/home",
            Role::Caregiver => "/caregiver",
            Role::Doctor => "/doctor/dashboard",
        }
    }

    /// Login surface for the role.
    pub fn login_path(&self) -> &'static str {
        self.slot().login_path()
    }

    fn as_str(&self) -> &'static str {
        match self {
            Role::Patient => "patient",
            Role::Caregiver => "caregiver",
            Role::Doctor => "doctor",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "patient" | "user" => Ok(Role::Patient),
            "caregiver" => Ok(Role::Caregiver),
            "doctor" => Ok(Role::Doctor),
            other => Err(ValidationError::invalid_format(
                "role",
                format!("unknown role '{}'", other),
            )),
        }
    }
}

/// Independent persisted session slots.
///
/// Doctor and general-user sessions never share a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionSlot {
    General,
    Doctor,
}

impl SessionSlot {
    /// Returns all slots.
    pub fn all() -> &'static [SessionSlot] {
        &[SessionSlot::General, SessionSlot::Doctor]
    }

    /// Storage key of the slot.
    pub fn storage_key(&self) -> &'static str {
        match self {
            SessionSlot::General => "session",
            SessionSlot::Doctor => "doctor-session",
        }
    }

    /// Where an unauthorized visitor is sent.
    pub fn login_path(&self) -> &'static str {
        match self {
            SessionSlot::General => "/login",
            SessionSlot::Doctor => "/doctor/login",
        }
    }

    /// Notice shown when access is denied.
    pub fn denial_notice(&self) -> &'static str {
        match self {
            SessionSlot::General => "Please login to continue",
            SessionSlot::Doctor => "Please login to access doctor portal",
        }
    }
}

impl fmt::Display for SessionSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.storage_key())
    }
}

/// Persisted login marker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionRecord {
    pub session_id: SessionId,
    pub subject_id: SubjectId,
    pub display_name: String,
    pub role: Role,
    pub authenticated: bool,
    pub issued_at: Timestamp,
}

impl SessionRecord {
    /// Creates an authenticated session issued at `now`.
    ///
    /// The display name falls back to the subject id when blank.
    pub fn issue(
        role: Role,
        subject_id: SubjectId,
        display_name: impl Into<String>,
        now: Timestamp,
    ) -> Self {
        let display_name = display_name.into().trim().to_string();
        let display_name = if display_name.is_empty() {
            subject_id.to_string()
        } else {
            display_name
        };
        Self {
            session_id: SessionId::new(),
            subject_id,
            display_name,
            role,
            authenticated: true,
            issued_at: now,
        }
    }

    /// Slot this record belongs in.
    pub fn slot(&self) -> SessionSlot {
        self.role.slot()
    }

    /// True when the record is older than `max_age_secs` at `now`.
    ///
    /// Without a maximum age, records never expire.
    pub fn is_expired(&self, now: Timestamp, max_age_secs: Option<u64>) -> bool {
        match max_age_secs {
            None => false,
            Some(max) => {
                let age = now.duration_since(&self.issued_at).num_seconds();
                age > i64::try_from(max).unwrap_or(i64::MAX)
            }
        }
    }
}
