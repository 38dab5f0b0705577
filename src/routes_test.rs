use super::*;

#[test]
fn path_formats_parameterized_routes() {
    assert_eq!(Route::Payment(1).path(), "/payment/1");
    assert_eq!(Route::RegistrationSuccess(3).path(), "/registration-success/3");
    assert_eq!(Route::EventDetails(42).to_string(), "/events/42");
}

#[test]
fn parse_round_trips_every_route() {
    let routes = [
        Route::Home,
        Route::Events,
        Route::EventDetails(1),
        Route::Challenges,
        Route::Colleges,
        Route::CollegeDetails(9),
        Route::Payment(2),
        Route::RegistrationSuccess(2),
        Route::Login,
        Route::SignUp,
        Route::Profile,
        Route::Dashboard,
    ];
    for route in routes {
        assert_eq!(Route::parse(&route.path()), Some(route), "{route}");
    }
}

#[test]
fn parse_ignores_query_and_trailing_slash() {
    assert_eq!(Route::parse("/events/5/?ref=search"), Some(Route::EventDetails(5)));
}

#[test]
fn parse_unknown_path_is_none() {
    assert_eq!(Route::parse("/games/tetris"), None);
    assert_eq!(Route::parse("/events/abc"), None);
}

#[test]
fn only_account_pages_require_auth() {
    assert!(Route::Profile.requires_auth());
    assert!(Route::Dashboard.requires_auth());
    assert!(!Route::Events.requires_auth());
    assert!(!Route::Payment(1).requires_auth());
}
