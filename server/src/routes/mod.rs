//! Router assembly.
//!
//! SYSTEM CONTEXT
//! ==============
//! Binds the JSON API under `/api` plus a `/healthz` probe. Browser
//! front ends run on the dev servers listed in [`ALLOWED_ORIGINS`]; every
//! other origin is refused by CORS.

pub mod admin;
pub mod auth;
pub mod catalog;
pub mod registrations;


use axum::Router;
use axum::http::{HeaderValue, StatusCode};
use axum::routing::{get, post};
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::state::AppState;

pub const ALLOWED_ORIGINS: [&str; 2] = ["http://localhost:8080", "http://localhost:5173"];

fn cors() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(AllowOrigin::list(ALLOWED_ORIGINS.map(HeaderValue::from_static)))
        .allow_methods(Any)
        .allow_headers(Any)
}

/// Build the full application router.
pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/api/auth/register", post(auth::register))
        .route("/api/auth/login", post(auth::login))
        .route("/api/auth/me", get(auth::me))
        .route("/api/auth/logout", post(auth::logout))
        .route("/api/colleges", get(catalog::list_colleges))
        .route("/api/colleges/{id}", get(catalog::get_college))
        .route("/api/colleges/{id}/events", get(catalog::college_events))
        .route("/api/events", get(catalog::list_events))
        .route("/api/events/{id}", get(catalog::get_event))
        .route("/api/challenges", get(catalog::list_challenges))
        .route("/api/admin/colleges/pending", get(admin::pending_colleges))
        .route("/api/admin/colleges/{id}/approve", post(admin::approve_college))
        .route("/api/register-event", post(registrations::register_event))
        .route("/healthz", get(healthz))
        .layer(cors())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn healthz() -> StatusCode {
    StatusCode::OK
}
