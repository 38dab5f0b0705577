//! Public catalog routes: colleges, events, challenges.

use axum::extract::{Path, State};
use axum::response::Json;
use eventify::net::types::{Challenge, College, Event};

use crate::error::HttpError;
use crate::services::catalog::{self, CatalogError};
use crate::state::AppState;

pub(crate) fn catalog_error_to_http(e: CatalogError) -> HttpError {
    match e {
        CatalogError::NotFound(_) => HttpError::not_found(e.to_string()),
        CatalogError::Database(db) => db.into(),
    }
}

/// `GET /api/colleges`
pub async fn list_colleges(State(state): State<AppState>) -> Result<Json<Vec<College>>, HttpError> {
    catalog::list_colleges(&state.pool).await.map(Json).map_err(catalog_error_to_http)
}

/// `GET /api/colleges/{id}`
pub async fn get_college(State(state): State<AppState>, Path(id): Path<i64>) -> Result<Json<College>, HttpError> {
    catalog::get_college(&state.pool, id).await.map(Json).map_err(catalog_error_to_http)
}

/// `GET /api/colleges/{id}/events`
pub async fn college_events(State(state): State<AppState>, Path(id): Path<i64>) -> Result<Json<Vec<Event>>, HttpError> {
    catalog::college_events(&state.pool, id).await.map(Json).map_err(catalog_error_to_http)
}

/// `GET /api/events`
pub async fn list_events(State(state): State<AppState>) -> Result<Json<Vec<Event>>, HttpError> {
    catalog::list_events(&state.pool).await.map(Json).map_err(catalog_error_to_http)
}

/// `GET /api/events/{id}`
pub async fn get_event(State(state): State<AppState>, Path(id): Path<i64>) -> Result<Json<Event>, HttpError> {
    catalog::get_event(&state.pool, id).await.map(Json).map_err(catalog_error_to_http)
}

/// `GET /api/challenges`
pub async fn list_challenges(State(state): State<AppState>) -> Result<Json<Vec<Challenge>>, HttpError> {
    catalog::list_challenges(&state.pool).await.map(Json).map_err(catalog_error_to_http)
}
