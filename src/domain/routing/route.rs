//! Route table for the application's deep-linkable paths.

use std::fmt;

/// A page the application can render.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Route {
    Landing,
    Login,
    SignUp,
    Home,
    Ranking,
    History,
    Notifications,
    ProfileComplete,
    ProfileEdit,
    DoctorLogin,
    DoctorDashboard,
    DoctorPatient(String),
    CaregiverDashboard,
    CaregiverPatient(String),
}

/// Outcome of looking a path up in the route table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolved {
    /// The path renders a page.
    Page(Route),
    /// The path is an alias that redirects to another page.
    Alias(Route),
    /// Nothing matches.
    NotFound,
}

impl Route {
    /// Looks a path up, ignoring any query string, fragment and trailing slash.
    pub fn resolve(path: &str) -> Resolved {
        let path = path.split(['?', '#']).next().unwrap_or_default();
        let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();

        let page = match segments.as_slice() {
            [] => Route::Landing,
            ["login"] => Route::Login,
            ["signup"] => Route::SignUp,
            ["home"] => Route::Home,
            ["ranking"] => Route::Ranking,
            ["history"] => Route::History,
            ["notifications"] => Route::Notifications,
            ["profile", "complete"] => Route::ProfileComplete,
            ["profile", "edit"] => Route::ProfileEdit,
            ["doctor", "login"] => Route::DoctorLogin,
            ["doctor", "dashboard"] => Route::DoctorDashboard,
            ["doctor", "patient", id] => Route::DoctorPatient((*id).to_string()),
            ["caregiver"] => Route::CaregiverDashboard,
            ["caregiver", "patient", id] => Route::CaregiverPatient((*id).to_string()),

            ["profile"] => return Resolved::Alias(Route::ProfileEdit),
            ["settings"] | ["terms"] | ["partners"] => return Resolved::Alias(Route::Home),
            _ => return Resolved::NotFound,
        };
        Resolved::Page(page)
    }

    /// Parses a path that must name a page directly or through an alias.
    pub fn parse(path: &str) -> Option<Route> {
        match Self::resolve(path) {
            Resolved::Page(route) | Resolved::Alias(route) => Some(route),
            Resolved::NotFound => None,
        }
    }

    /// Canonical path of the page.
    pub fn path(&self) -> String {
        match self {
            Route::Landing => "/".to_string(),
            Route::Login => "/login".to_string(),
            Route::SignUp => "/signup".to_string(),
            Route::Home => "/home".to_string(),
            Route::Ranking => "/ranking".to_string(),
            Route::History => "/history".to_string(),
            Route::Notifications => "/notifications".to_string(),
            Route::ProfileComplete => "/profile/complete".to_string(),
            Route::ProfileEdit => "/profile/edit".to_string(),
            Route::DoctorLogin => "/doctor/login".to_string(),
            Route::DoctorDashboard => "/doctor/dashboard".to_string(),
            Route::DoctorPatient(id) => format!("/doctor/patient/{}", id),
            Route::CaregiverDashboard => "/caregiver".to_string(),
            Route::CaregiverPatient(id) => format!("/caregiver/patient/{}", id),
        }
    }

    /// True for login and sign-up surfaces.
    pub fn is_login_surface(&self) -> bool {
        matches!(self, Route::Login | Route::SignUp | Route::DoctorLogin)
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}
