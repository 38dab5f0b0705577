//! Database initialization, migrations, and first-run seeding.
//!
//! SYSTEM CONTEXT
//! ==============
//! Startup uses this module to create the shared SQLx pool and enforce schema
//! migrations before accepting API traffic. An empty catalog is seeded once
//! so a fresh install has colleges and events to browse.

pub mod seed;


use std::time::Duration;

use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;

const DEFAULT_DB_MAX_CONNECTIONS: u32 = 5;
const DEFAULT_DB_ACQUIRE_TIMEOUT_SECS: u64 = 10;

fn pool_setting<T: std::str::FromStr>(name: &str, default: T) -> T {
    std::env::var(name).ok().and_then(|v| v.trim().parse().ok()).unwrap_or(default)
}

fn db_max_connections() -> u32 {
    pool_setting("DB_MAX_CONNECTIONS", DEFAULT_DB_MAX_CONNECTIONS).max(1)
}

fn db_acquire_timeout() -> Duration {
    Duration::from_secs(pool_setting("DB_ACQUIRE_TIMEOUT_SECS", DEFAULT_DB_ACQUIRE_TIMEOUT_SECS))
}

/// Connect to Postgres and bring the schema up to date.
///
/// # Errors
///
/// Fails when the database is unreachable or a migration does not apply.
pub async fn init_pool(database_url: &str) -> Result<PgPool, sqlx::Error> {
    let max_connections = db_max_connections();
    let pool = PgPoolOptions::new()
        .max_connections(max_connections)
        .acquire_timeout(db_acquire_timeout())
        .connect(database_url)
        .await?;
    tracing::debug!(max_connections, "database pool ready");

    sqlx::migrate!("src/db/migrations").run(&pool).await?;

    Ok(pool)
}
