//! College approval routes. Any signed-in user may call these; there is no
//! separate admin role.

use axum::extract::{Path, State};
use axum::response::Json;
use eventify::net::types::{PendingCollege, SuccessBody};

use crate::error::HttpError;
use crate::routes::auth::AuthUser;
use crate::routes::catalog::catalog_error_to_http;
use crate::services::catalog;
use crate::state::AppState;

/// `GET /api/admin/colleges/pending`
pub async fn pending_colleges(
    State(state): State<AppState>,
    _auth: AuthUser,
) -> Result<Json<Vec<PendingCollege>>, HttpError> {
    catalog::pending_colleges(&state.pool).await.map(Json).map_err(catalog_error_to_http)
}

/// `POST /api/admin/colleges/{id}/approve`
pub async fn approve_college(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<i64>,
) -> Result<Json<SuccessBody>, HttpError> {
    catalog::approve_college(&state.pool, id).await.map_err(catalog_error_to_http)?;
    tracing::info!(college_id = id, approved_by = auth.user.id, "approval recorded");
    Ok(Json(SuccessBody { success: true }))
}
