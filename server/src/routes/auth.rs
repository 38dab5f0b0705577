//! Auth routes: email/password sign-up and sign-in, bearer sessions.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use axum::extract::rejection::JsonRejection;
use axum::extract::{FromRef, State};
use axum::http::StatusCode;
use axum::http::header::AUTHORIZATION;
use axum::response::Json;
use eventify::net::types::{AuthResponse, LoginRequest, RegisterRequest, User};

use crate::error::HttpError;
use crate::services::session;
use crate::services::users::{self, UserError};
use crate::state::AppState;

pub const UNAUTHORIZED_MESSAGE: &str = "Missing or invalid session";

pub(crate) fn user_error_to_http(e: UserError) -> HttpError {
    match e {
        UserError::MissingCredentials | UserError::InvalidEmail | UserError::EmailTaken | UserError::UsernameTaken => {
            HttpError::bad_request(e.to_string())
        }
        UserError::InvalidCredentials => HttpError::unauthorized(e.to_string()),
        UserError::Database(db) => db.into(),
        UserError::Hash(err) => {
            tracing::error!(error = %err, "password hashing failed");
            HttpError::internal()
        }
    }
}

/// Unwrap a JSON body, answering malformed input in the `{ error }` shape.
pub(crate) fn json_body<T>(body: Result<Json<T>, JsonRejection>) -> Result<T, HttpError> {
    body.map(|Json(v)| v).map_err(|rejection| HttpError::bad_request(rejection.body_text()))
}

// =============================================================================
// AUTH EXTRACTOR
// =============================================================================

/// Authenticated user extracted from the `Authorization: Bearer` header.
/// Use as a handler parameter to require authentication.
pub struct AuthUser {
    pub user: User,
    pub token: String,
}

impl<S> axum::extract::FromRequestParts<S> for AuthUser
where
    AppState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = HttpError;

    async fn from_request_parts(parts: &mut axum::http::request::Parts, state: &S) -> Result<Self, Self::Rejection> {
        let token = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .and_then(session::parse_bearer)
            .ok_or_else(|| HttpError::unauthorized(UNAUTHORIZED_MESSAGE))?
            .to_owned();

        let app_state = AppState::from_ref(state);
        let user = session::validate_session(&app_state.pool, &token)
            .await?
            .ok_or_else(|| HttpError::unauthorized(UNAUTHORIZED_MESSAGE))?;

        Ok(Self { user, token })
    }
}

// =============================================================================
// HANDLERS
// =============================================================================

/// `POST /api/auth/register`: create an account and sign in.
pub async fn register(
    State(state): State<AppState>,
    body: Result<Json<RegisterRequest>, JsonRejection>,
) -> Result<Json<AuthResponse>, HttpError> {
    let req = json_body(body)?;
    let response = users::register(&state.pool, &req, state.session_ttl)
        .await
        .map_err(user_error_to_http)?;
    Ok(Json(response))
}

/// `POST /api/auth/login`: exchange credentials for a session token.
pub async fn login(
    State(state): State<AppState>,
    body: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<Json<AuthResponse>, HttpError> {
    let req = json_body(body)?;
    let response = users::login(&state.pool, &req.email, &req.password, state.session_ttl)
        .await
        .map_err(user_error_to_http)?;
    Ok(Json(response))
}

/// `GET /api/auth/me`: return current user.
pub async fn me(auth: AuthUser) -> Json<User> {
    Json(auth.user)
}

/// `POST /api/auth/logout`: delete the presented session.
pub async fn logout(State(state): State<AppState>, auth: AuthUser) -> Result<StatusCode, HttpError> {
    session::delete_session(&state.pool, &auth.token).await?;
    Ok(StatusCode::NO_CONTENT)
}
