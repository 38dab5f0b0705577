//! HTTP error responses.
//!
//! ERROR HANDLING
//! ==============
//! Every failing endpoint answers with a status code and an
//! `{ "error": message }` body, the shape the client surfaces verbatim in
//! toasts. Database failures are logged here and reported with a generic
//! message so SQL details never leave the server.

#[cfg(test)]
#[path = "error_test.rs"]
mod error_test;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use eventify::net::types::ErrorBody;

pub const INTERNAL_ERROR_MESSAGE: &str = "Internal server error";

/// An error ready to be rendered as a JSON response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpError {
    pub status: StatusCode,
    pub message: String,
}

impl HttpError {
    #[must_use]
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self { status, message: message.into() }
    }

    #[must_use]
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    #[must_use]
    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new(StatusCode::UNAUTHORIZED, message)
    }

    #[must_use]
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, message)
    }

    #[must_use]
    pub fn internal() -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_ERROR_MESSAGE)
    }
}

impl From<sqlx::Error> for HttpError {
    fn from(e: sqlx::Error) -> Self {
        tracing::error!(error = %e, "database error");
        Self::internal()
    }
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        (self.status, Json(ErrorBody { error: self.message })).into_response()
    }
}
