//! Which routes require which session slot.

use super::Route;
use crate::domain::session::SessionSlot;

/// Route-to-slot access rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AccessPolicy {
    /// Gate the caregiver dashboards behind the general session slot.
    pub gate_caregiver_routes: bool,
}

impl AccessPolicy {
    pub fn new(gate_caregiver_routes: bool) -> Self {
        Self {
            gate_caregiver_routes,
        }
    }

    /// The slot that must hold an authenticated session, if any.
    ///
    /// General user pages are reachable without a session.
    pub fn required_slot(&self, route: &Route) -> Option<SessionSlot> {
        match route {
            Route::DoctorDashboard | Route::DoctorPatient(_) => Some(SessionSlot::Doctor),
            Route::CaregiverDashboard | Route::CaregiverPatient(_) if self.gate_caregiver_routes => {
                Some(SessionSlot::General)
            }
            _ => None,
        }
    }
}

/// What the caller should do with a navigation request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteDecision {
    /// Render the page.
    Allow(Route),
    /// Navigate elsewhere.
    Redirect {
        to: Route,
        /// User-facing notice to show, if any.
        notice: Option<String>,
        /// Originally requested path, carried so login can return to it.
        return_to: Option<String>,
    },
    /// Render the not-found surface.
    NotFound,
}

impl RouteDecision {
    /// The path the caller ends up on, or `None` for not-found.
    pub fn destination(&self) -> Option<String> {
        match self {
            RouteDecision::Allow(route) => Some(route.path()),
            RouteDecision::Redirect { to, .. } => Some(to.path()),
            RouteDecision::NotFound => None,
        }
    }
}
