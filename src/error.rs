//! Error types shared by the REST client and persisted client state.
//!
//! ERROR HANDLING
//! ==============
//! Collaborator failures are surfaced to the user verbatim, so the `Display`
//! output of [`ApiError::Status`] is the backend's own message and nothing
//! else. Callers roll local state back and show a destructive toast.

#[cfg(test)]
#[path = "error_test.rs"]
mod error_test;

/// Fallback message when a failing response carries no readable `error` body.
pub const DEFAULT_API_ERROR: &str = "API request failed";

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("network error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("{message}")]
    Status { status: u16, message: String },
    #[error("unexpected response body: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("not found")]
    NotFound,
}

impl ApiError {
    /// Build a status error from a response body, preferring its `error` field.
    #[must_use]
    pub fn from_body(status: u16, body: &str) -> Self {
        let message = serde_json::from_str::<crate::net::types::ErrorBody>(body)
            .map(|b| b.error)
            .unwrap_or_else(|_| DEFAULT_API_ERROR.to_owned());
        Self::Status { status, message }
    }

    /// HTTP status code, when the failure came from a response.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            Self::NotFound => Some(404),
            Self::Http(e) => e.status().map(|s| s.as_u16()),
            Self::Decode(_) => None,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("storage io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("storage encode error: {0}")]
    Encode(#[from] serde_json::Error),
}
