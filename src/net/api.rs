//! REST client for the Eventify backend.
//!
//! SYSTEM CONTEXT
//! ==============
//! Flows never talk HTTP directly. They depend on [`AuthApi`],
//! [`RegistrationApi`] and [`Collection`], which [`ApiClient`] implements
//! over `reqwest`. The bearer token is read from the injected local
//! [`Storage`] on every request; this client never writes storage, so the
//! Auth Session Cache stays the only owner of the credential pair.
//!
//! ERROR HANDLING
//! ==============
//! Non-2xx responses become [`ApiError::Status`] carrying the backend's
//! `error` message, except 404 which maps to [`ApiError::NotFound`].
//! `get_by_id` turns `NotFound` into `Ok(None)`.

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use std::sync::Arc;

use async_trait::async_trait;
use reqwest::header::AUTHORIZATION;
use reqwest::{Method, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;

use super::types::{
    AuthResponse, Challenge, College, Event, LoginRequest, RegisterEventRequest, RegisterRequest, SuccessBody, User,
};
use crate::catalog::Collection;
use crate::config::ClientConfig;
use crate::error::ApiError;
use crate::storage::{AUTH_TOKEN_KEY, Storage};

// =============================================================================
// COLLABORATOR TRAITS
// =============================================================================

/// Remote authentication collaborator.
#[async_trait]
pub trait AuthApi: Send + Sync {
    /// # Errors
    ///
    /// Returns the backend's rejection (e.g. "Invalid credentials").
    async fn login(&self, email: &str, password: &str) -> Result<AuthResponse, ApiError>;

    /// # Errors
    ///
    /// Returns the backend's rejection (e.g. "Email already exists").
    async fn register(&self, email: &str, password: &str, username: Option<&str>) -> Result<AuthResponse, ApiError>;

    /// Invalidate the current bearer token server-side.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails; callers treat this as best-effort.
    async fn logout(&self) -> Result<(), ApiError>;

    /// # Errors
    ///
    /// Returns an error if the token is missing, expired or the request fails.
    async fn current_user(&self) -> Result<User, ApiError>;
}

/// Records a completed registration for an event or challenge.
#[async_trait]
pub trait RegistrationApi: Send + Sync {
    /// # Errors
    ///
    /// Returns an error if the user is not signed in or the backend rejects
    /// the registration.
    async fn register_for(&self, request: RegisterEventRequest) -> Result<(), ApiError>;
}

// =============================================================================
// CLIENT
// =============================================================================

/// HTTP client bound to one backend base URL.
#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    storage: Arc<dyn Storage>,
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient").field("base_url", &self.base_url).finish_non_exhaustive()
    }
}

impl ApiClient {
    #[must_use]
    pub fn new(base_url: impl Into<String>, storage: Arc<dyn Storage>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_owned();
        Self { http: reqwest::Client::new(), base_url, storage }
    }

    #[must_use]
    pub fn from_config(config: &ClientConfig, storage: Arc<dyn Storage>) -> Self {
        Self::new(config.api_base_url.clone(), storage)
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Events hosted by one college, from `/colleges/{id}/events`.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::NotFound`] for an unknown college.
    pub async fn college_events(&self, college_id: i64) -> Result<Vec<Event>, ApiError> {
        self.get_json(&college_events_path(college_id)).await
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let builder = self.http.request(method, endpoint(&self.base_url, path));
        match self.storage.get_item(AUTH_TOKEN_KEY) {
            Some(token) if !token.is_empty() => builder.header(AUTHORIZATION, bearer_header(&token)),
            _ => builder,
        }
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        send_json(self.request(Method::GET, path)).await
    }

    async fn get_optional<T: DeserializeOwned>(&self, path: &str) -> Result<Option<T>, ApiError> {
        match self.get_json(path).await {
            Ok(value) => Ok(Some(value)),
            Err(ApiError::NotFound) => Ok(None),
            Err(e) => Err(e),
        }
    }
}

async fn send_json<T: DeserializeOwned>(builder: RequestBuilder) -> Result<T, ApiError> {
    let response = builder.send().await?;
    let status = response.status();
    let body = response.text().await?;
    if !status.is_success() {
        return Err(status_error(status, &body));
    }
    Ok(serde_json::from_str(&body)?)
}

async fn send_empty(builder: RequestBuilder) -> Result<(), ApiError> {
    let response = builder.send().await?;
    let status = response.status();
    if status.is_success() {
        return Ok(());
    }
    let body = response.text().await.unwrap_or_default();
    Err(status_error(status, &body))
}

fn status_error(status: StatusCode, body: &str) -> ApiError {
    if status == StatusCode::NOT_FOUND {
        return ApiError::NotFound;
    }
    ApiError::from_body(status.as_u16(), body)
}

fn endpoint(base_url: &str, path: &str) -> String {
    format!("{}/{}", base_url.trim_end_matches('/'), path.trim_start_matches('/'))
}

fn bearer_header(token: &str) -> String {
    format!("Bearer {token}")
}

fn college_events_path(college_id: i64) -> String {
    format!("/colleges/{college_id}/events")
}

#[async_trait]
impl AuthApi for ApiClient {
    async fn login(&self, email: &str, password: &str) -> Result<AuthResponse, ApiError> {
        let body = LoginRequest { email: email.to_owned(), password: password.to_owned() };
        send_json(self.request(Method::POST, "/auth/login").json(&body)).await
    }

    async fn register(&self, email: &str, password: &str, username: Option<&str>) -> Result<AuthResponse, ApiError> {
        let body = RegisterRequest {
            email: email.to_owned(),
            password: password.to_owned(),
            username: username.map(str::to_owned),
            college_id: None,
        };
        send_json(self.request(Method::POST, "/auth/register").json(&body)).await
    }

    async fn logout(&self) -> Result<(), ApiError> {
        send_empty(self.request(Method::POST, "/auth/logout")).await
    }

    async fn current_user(&self) -> Result<User, ApiError> {
        self.get_json("/auth/me").await
    }
}

#[async_trait]
impl RegistrationApi for ApiClient {
    async fn register_for(&self, request: RegisterEventRequest) -> Result<(), ApiError> {
        let ack: SuccessBody = send_json(self.request(Method::POST, "/register-event").json(&request)).await?;
        if ack.success {
            Ok(())
        } else {
            Err(ApiError::Status { status: 200, message: crate::error::DEFAULT_API_ERROR.to_owned() })
        }
    }
}

#[async_trait]
impl Collection<Event> for ApiClient {
    async fn get_all(&self) -> Result<Vec<Event>, ApiError> {
        self.get_json("/events").await
    }

    async fn get_by_id(&self, id: i64) -> Result<Option<Event>, ApiError> {
        self.get_optional(&format!("/events/{id}")).await
    }
}

#[async_trait]
impl Collection<College> for ApiClient {
    async fn get_all(&self) -> Result<Vec<College>, ApiError> {
        self.get_json("/colleges").await
    }

    async fn get_by_id(&self, id: i64) -> Result<Option<College>, ApiError> {
        self.get_optional(&format!("/colleges/{id}")).await
    }
}

/// The backend has no single-challenge endpoint; lookups filter the list.
#[async_trait]
impl Collection<Challenge> for ApiClient {
    async fn get_all(&self) -> Result<Vec<Challenge>, ApiError> {
        self.get_json("/challenges").await
    }

    async fn get_by_id(&self, id: i64) -> Result<Option<Challenge>, ApiError> {
        let all: Vec<Challenge> = self.get_json("/challenges").await?;
        Ok(all.into_iter().find(|c| c.id == id))
    }
}
