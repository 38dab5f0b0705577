//! Shared auth route-guard helpers.
//!
//! SYSTEM CONTEXT
//! ==============
//! Every protected page applies the same unauthenticated redirect behavior:
//! wait while the session is hydrating, then render or go to `/login`.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use crate::routes::Route;
use crate::state::auth::AuthState;

/// Outcome of guarding a protected page.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Guard {
    /// Session still hydrating; render a spinner.
    Pending,
    Allow,
    Redirect(Route),
}

/// True once auth has loaded and no user is present.
#[must_use]
pub fn should_redirect_unauth(state: &AuthState) -> bool {
    !state.loading && state.user.is_none()
}

/// Decide what a protected page renders for the given auth state.
#[must_use]
pub fn guard(state: &AuthState) -> Guard {
    if state.loading {
        Guard::Pending
    } else if should_redirect_unauth(state) {
        Guard::Redirect(Route::Login)
    } else {
        Guard::Allow
    }
}

/// Guard a navigation: public routes always pass.
#[must_use]
pub fn guard_route(route: Route, state: &AuthState) -> Guard {
    if route.requires_auth() { guard(state) } else { Guard::Allow }
}
