//! `POST /api/register-event`: record a paid registration.

use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::response::Json;
use eventify::net::types::{RegisterEventRequest, SuccessBody};

use crate::error::HttpError;
use crate::routes::auth::{AuthUser, json_body};
use crate::services::registration::{self, RegistrationError};
use crate::state::AppState;

pub(crate) fn registration_error_to_http(e: RegistrationError) -> HttpError {
    match e {
        RegistrationError::InvalidSubject => HttpError::bad_request(e.to_string()),
        RegistrationError::NotFound(_) => HttpError::not_found(e.to_string()),
        RegistrationError::Database(db) => db.into(),
    }
}

pub async fn register_event(
    State(state): State<AppState>,
    auth: AuthUser,
    body: Result<Json<RegisterEventRequest>, JsonRejection>,
) -> Result<Json<SuccessBody>, HttpError> {
    let req = json_body(body)?;
    registration::register(&state.pool, auth.user.id, &req)
        .await
        .map_err(registration_error_to_http)?;
    Ok(Json(SuccessBody { success: true }))
}
