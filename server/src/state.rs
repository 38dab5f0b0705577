//! Shared application state.
//!
//! DESIGN
//! ======
//! `AppState` is injected into Axum handlers via the `State` extractor. It
//! holds the database pool and the session lifetime; everything else lives
//! in Postgres.

#[cfg(test)]
#[path = "state_test.rs"]
mod state_test;

use sqlx::PgPool;

const DEFAULT_SESSION_TTL_DAYS: i64 = 7;

/// Session lifetime in days from `SESSION_TTL_DAYS`, defaulting to a week.
/// Non-positive values fall back to the default.
pub(crate) fn session_ttl_days() -> i64 {
    std::env::var("SESSION_TTL_DAYS")
        .ok()
        .and_then(|v| v.parse::<i64>().ok())
        .filter(|days| *days > 0)
        .unwrap_or(DEFAULT_SESSION_TTL_DAYS)
}

/// Shared application state. Clone is required by Axum; `PgPool` is a
/// handle.
#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub session_ttl: time::Duration,
}

impl AppState {
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool, session_ttl: time::Duration::days(session_ttl_days()) }
    }
}

// =============================================================================
// TEST HELPERS
// =============================================================================
