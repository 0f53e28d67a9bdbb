//! AuthHandler - login, logout and sign-up.
//!
//! No credential is verified: login checks the form is filled in and writes
//! a session record in the role's slot. The password never leaves the form.

use std::sync::Arc;
use thiserror::Error;

use crate::domain::foundation::{ErrorCode, SubjectId, Timestamp, ValidationError};
use crate::domain::routing::{AccessPolicy, Route};
use crate::domain::session::{CredentialError, LoginForm, Role, SessionRecord, SessionSlot, SignUpForm};
use crate::ports::{SessionStore, StorageError};

/// Errors from login, logout and the session gate.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AuthError {
    #[error("no session in slot {0}")]
    NotLoggedIn(SessionSlot),

    #[error("session in slot {0} is not authenticated")]
    NotAuthenticated(SessionSlot),

    #[error("session in slot {0} has expired")]
    Expired(SessionSlot),

    #[error(transparent)]
    InvalidForm(#[from] CredentialError),

    #[error("invalid subject id: {0}")]
    InvalidSubject(#[from] ValidationError),

    #[error(transparent)]
    Storage(#[from] StorageError),
}

impl AuthError {
    pub fn code(&self) -> ErrorCode {
        match self {
            AuthError::NotLoggedIn(_) | AuthError::NotAuthenticated(_) => ErrorCode::Unauthorized,
            AuthError::Expired(_) => ErrorCode::SessionExpired,
            AuthError::InvalidForm(_) => ErrorCode::ValidationFailed,
            AuthError::InvalidSubject(e) => ErrorCode::from(e),
            AuthError::Storage(e) => e.code(),
        }
    }

    /// Short corrective text for the user.
    pub fn user_message(&self) -> String {
        match self {
            AuthError::NotLoggedIn(slot) | AuthError::NotAuthenticated(slot) => {
                slot.denial_notice().to_string()
            }
            AuthError::Expired(_) => "Your session has expired. Please login again.".to_string(),
            AuthError::InvalidForm(e) => e.to_string(),
            AuthError::InvalidSubject(_) => "ID is required".to_string(),
            AuthError::Storage(_) => "Could not sign you in. Please try again.".to_string(),
        }
    }
}

/// Command to log in.
#[derive(Debug)]
pub struct LoginCommand {
    pub role: Role,
    pub form: LoginForm,
    /// Shown in the header; falls back to the identifier.
    pub display_name: Option<String>,
    /// Location the user originally asked for.
    pub return_to: Option<String>,
}

/// Result of a successful login.
#[derive(Debug, Clone, PartialEq)]
pub struct LoginResult {
    pub session: SessionRecord,
    pub redirect_to: String,
}

/// Handler for login, logout and sign-up.
pub struct AuthHandler {
    sessions: Arc<dyn SessionStore>,
    policy: AccessPolicy,
    honor_return_to: bool,
}

impl AuthHandler {
    pub fn new(sessions: Arc<dyn SessionStore>, policy: AccessPolicy, honor_return_to: bool) -> Self {
        Self {
            sessions,
            policy,
            honor_return_to,
        }
    }

    pub async fn login(&self, cmd: LoginCommand) -> Result<LoginResult, AuthError> {
        cmd.form.validate()?;
        let subject = SubjectId::new(cmd.form.identifier.as_str())?;
        let display_name = cmd.display_name.unwrap_or_default();

        let session = SessionRecord::issue(cmd.role, subject, display_name, Timestamp::now());
        self.sessions.save(&session).await?;

        let redirect_to = self
            .return_destination(cmd.role, cmd.return_to.as_deref())
            .unwrap_or_else(|| cmd.role.home_path().to_string());

        tracing::info!(role = %cmd.role, slot = %session.slot(), "Logged in");
        Ok(LoginResult {
            session,
            redirect_to,
        })
    }

    /// Deletes the role's session and returns the path to navigate to.
    pub async fn logout(&self, role: Role) -> Result<String, AuthError> {
        self.sessions.delete(role.slot()).await?;
        tracing::info!(role = %role, "Logged out");
        Ok(match role {
            Role::Doctor => role.login_path().to_string(),
            Role::Patient | Role::Caregiver => Route::Landing.path(),
        })
    }

    /// Checks the sign-up form. Account creation itself is not modeled.
    pub fn sign_up(&self, form: &SignUpForm) -> Result<Route, AuthError> {
        form.validate()?;
        Ok(Route::Home)
    }

    // A carried location is only used if it names a real page the new
    // session can open.
    fn return_destination(&self, role: Role, return_to: Option<&str>) -> Option<String> {
        if !self.honor_return_to {
            return None;
        }
        let route = Route::parse(return_to?)?;
        if route.is_login_surface() {
            return None;
        }
        match self.policy.required_slot(&route) {
            Some(slot) if slot != role.slot() => None,
            _ => Some(route.path()),
        }
    }
}
