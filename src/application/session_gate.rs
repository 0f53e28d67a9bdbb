//! SessionGate - decides whether a route may be entered.
//!
//! The gate is a presence check on the stored session record, not a
//! security boundary: nothing is signed and, unless a maximum age is
//! configured, nothing expires.

use std::sync::Arc;

use super::AuthError;
use crate::domain::foundation::Timestamp;
use crate::domain::routing::{AccessPolicy, Resolved, Route, RouteDecision};
use crate::domain::session::{SessionRecord, SessionSlot};
use crate::ports::{Notice, Notifier, SessionStore, StorageError};

const EXPIRED_NOTICE: &str = "Your session has expired. Please login again.";

/// Route guard backed by the session store.
pub struct SessionGate {
    sessions: Arc<dyn SessionStore>,
    notifier: Arc<dyn Notifier>,
    policy: AccessPolicy,
    max_age_secs: Option<u64>,
}

impl SessionGate {
    pub fn new(
        sessions: Arc<dyn SessionStore>,
        notifier: Arc<dyn Notifier>,
        policy: AccessPolicy,
    ) -> Self {
        Self {
            sessions,
            notifier,
            policy,
            max_age_secs: None,
        }
    }

    /// Treats records older than `max_age_secs` as unauthorized.
    pub fn with_max_age(mut self, max_age_secs: Option<u64>) -> Self {
        self.max_age_secs = max_age_secs;
        self
    }

    /// Returns the slot's session if it is present, readable, authenticated
    /// and not expired.
    ///
    /// An expired record is deleted.
    pub async fn check(&self, slot: SessionSlot) -> Result<SessionRecord, AuthError> {
        let record = match self.sessions.load(slot).await {
            Ok(Some(record)) => record,
            Ok(None) => return Err(AuthError::NotLoggedIn(slot)),
            Err(StorageError::Corrupt { .. }) => return Err(AuthError::NotAuthenticated(slot)),
            Err(e) => return Err(e.into()),
        };

        if !record.authenticated {
            return Err(AuthError::NotAuthenticated(slot));
        }

        if record.is_expired(Timestamp::now(), self.max_age_secs) {
            if let Err(e) = self.sessions.delete(slot).await {
                tracing::warn!(slot = %slot, error = %e, "Failed to delete expired session");
            }
            return Err(AuthError::Expired(slot));
        }

        Ok(record)
    }

    /// True only for a present, parseable, authenticated session.
    pub async fn is_authorized(&self, slot: SessionSlot) -> bool {
        self.check(slot).await.is_ok()
    }

    /// Decides what happens when `path` is entered.
    ///
    /// A denied entry emits a notice and redirects to the slot's login
    /// surface, carrying the requested path.
    pub async fn guard(&self, path: &str) -> RouteDecision {
        let route = match Route::resolve(path) {
            Resolved::Page(route) => route,
            Resolved::Alias(target) => {
                return RouteDecision::Redirect {
                    to: target,
                    notice: None,
                    return_to: None,
                }
            }
            Resolved::NotFound => {
                tracing::debug!(path, "No route matches");
                return RouteDecision::NotFound;
            }
        };

        let Some(slot) = self.policy.required_slot(&route) else {
            return RouteDecision::Allow(route);
        };

        match self.check(slot).await {
            Ok(_) => RouteDecision::Allow(route),
            Err(e) => {
                tracing::info!(path, slot = %slot, reason = %e, "Route entry denied");
                let notice = match e {
                    AuthError::Expired(_) => EXPIRED_NOTICE,
                    _ => slot.denial_notice(),
                };
                self.notifier.notify(Notice::error(notice)).await;

                let login = match slot {
                    SessionSlot::Doctor => Route::DoctorLogin,
                    SessionSlot::General => Route::Login,
                };
                RouteDecision::Redirect {
                    to: login,
                    notice: Some(notice.to_string()),
                    return_to: Some(route.path()),
                }
            }
        }
    }
}
