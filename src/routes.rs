//! Navigation targets.
//!
//! Flows return a [`Route`] instead of navigating themselves; the front end
//! decides how to get there. Unknown ids are still valid routes: resolving
//! them to a "not found" view is the page's job.

#[cfg(test)]
#[path = "routes_test.rs"]
mod routes_test;

use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Route {
    Home,
    Events,
    EventDetails(i64),
    Challenges,
    Colleges,
    CollegeDetails(i64),
    Payment(i64),
    RegistrationSuccess(i64),
    Login,
    SignUp,
    Profile,
    Dashboard,
}

impl Route {
    #[must_use]
    pub fn path(&self) -> String {
        match self {
            Self::Home => "/".to_owned(),
            Self::Events => "/events".to_owned(),
            Self::EventDetails(id) => format!("/events/{id}"),
            Self::Challenges => "/challenges".to_owned(),
            Self::Colleges => "/colleges".to_owned(),
            Self::CollegeDetails(id) => format!("/colleges/{id}"),
            Self::Payment(id) => format!("/payment/{id}"),
            Self::RegistrationSuccess(id) => format!("/registration-success/{id}"),
            Self::Login => "/login".to_owned(),
            Self::SignUp => "/signup".to_owned(),
            Self::Profile => "/profile".to_owned(),
            Self::Dashboard => "/dashboard".to_owned(),
        }
    }

    /// Recognize a path. Returns `None` for paths with no page (the
    /// catch-all "not found" view) and for non-numeric ids.
    #[must_use]
    pub fn parse(path: &str) -> Option<Self> {
        let trimmed = path.split(['?', '#']).next().unwrap_or_default();
        let segments: Vec<&str> = trimmed.split('/').filter(|s| !s.is_empty()).collect();
        let route = match segments.as_slice() {
            [] => Self::Home,
            ["events"] => Self::Events,
            ["events", id] => Self::EventDetails(id.parse().ok()?),
            ["challenges"] => Self::Challenges,
            ["colleges"] => Self::Colleges,
            ["colleges", id] => Self::CollegeDetails(id.parse().ok()?),
            ["payment", id] => Self::Payment(id.parse().ok()?),
            ["registration-success", id] => Self::RegistrationSuccess(id.parse().ok()?),
            ["login"] => Self::Login,
            ["signup"] => Self::SignUp,
            ["profile"] => Self::Profile,
            ["dashboard"] => Self::Dashboard,
            _ => return None,
        };
        Some(route)
    }

    /// Pages that render only for a signed-in user.
    #[must_use]
    pub fn requires_auth(&self) -> bool {
        matches!(self, Self::Profile | Self::Dashboard)
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}
