use super::*;
use crate::net::types::User;

fn signed_in() -> AuthState {
    let user = User { id: 7, email: "asha@example.com".to_owned(), username: "asha".to_owned(), college_id: Some(2) };
    AuthState { user: Some(user), loading: false }
}

fn signed_out() -> AuthState {
    AuthState { user: None, loading: false }
}

fn hydrating() -> AuthState {
    AuthState { user: None, loading: true }
}

#[test]
fn hydrating_session_renders_spinner() {
    assert!(!should_redirect_unauth(&hydrating()));
    assert_eq!(guard(&hydrating()), Guard::Pending);
}

#[test]
fn signed_out_visitor_goes_to_login() {
    assert!(should_redirect_unauth(&signed_out()));
    assert_eq!(guard(&signed_out()), Guard::Redirect(Route::Login));
}

#[test]
fn signed_in_user_sees_protected_page() {
    assert_eq!(guard(&signed_in()), Guard::Allow);
}

#[test]
fn public_pages_ignore_auth_state() {
    for route in [Route::Events, Route::Colleges, Route::EventDetails(3)] {
        assert_eq!(guard_route(route, &signed_out()), Guard::Allow);
        assert_eq!(guard_route(route, &hydrating()), Guard::Allow);
    }
}

#[test]
fn protected_pages_redirect_when_signed_out() {
    assert_eq!(guard_route(Route::Profile, &signed_out()), Guard::Redirect(Route::Login));
    assert_eq!(guard_route(Route::Payment(1), &signed_in()), Guard::Allow);
}
