//! Email/password accounts.
//!
//! DESIGN
//! ======
//! Emails are normalized (trimmed, lowercased) before every lookup so the
//! same address cannot register twice in different casing. Usernames
//! default to the email's local part when the client omits one.
//!
//! ERROR HANDLING
//! ==============
//! Unique-constraint races on insert map to the same user-facing errors as
//! the pre-check, so concurrent sign-ups see "Email already exists" rather
//! than a 500.

use eventify::forms::normalize_email;
use eventify::net::types::{AuthResponse, RegisterRequest, User};
use sqlx::{PgPool, Row};

use crate::services::{password, session};

#[derive(Debug, thiserror::Error)]
pub enum UserError {
    #[error("Email and password are required")]
    MissingCredentials,
    #[error("Please enter a valid email address")]
    InvalidEmail,
    #[error("Email already exists")]
    EmailTaken,
    #[error("Username already exists")]
    UsernameTaken,
    #[error("Invalid credentials")]
    InvalidCredentials,
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error(transparent)]
    Hash(#[from] password::HashError),
}

/// Username used when the client does not send one.
#[must_use]
pub fn default_username(email: &str) -> &str {
    email.split_once('@').map_or(email, |(local, _)| local)
}

fn user_from_row(r: &sqlx::postgres::PgRow) -> User {
    User { id: r.get("id"), email: r.get("email"), username: r.get("username"), college_id: r.get("college_id") }
}

fn map_unique_violation(e: sqlx::Error) -> UserError {
    if let sqlx::Error::Database(db) = &e {
        if db.is_unique_violation() {
            return match db.constraint() {
                Some("users_email_key") => UserError::EmailTaken,
                _ => UserError::UsernameTaken,
            };
        }
    }
    UserError::Database(e)
}

/// Create an account and open a session for it.
///
/// # Errors
///
/// Returns a validation error for blank or malformed input,
/// [`UserError::EmailTaken`] / [`UserError::UsernameTaken`] for duplicates,
/// or a database error.
pub async fn register(pool: &PgPool, req: &RegisterRequest, ttl: time::Duration) -> Result<AuthResponse, UserError> {
    if req.email.trim().is_empty() || req.password.is_empty() {
        return Err(UserError::MissingCredentials);
    }
    let email = normalize_email(&req.email).ok_or(UserError::InvalidEmail)?;
    let username = req
        .username
        .as_deref()
        .map(str::trim)
        .filter(|u| !u.is_empty())
        .unwrap_or_else(|| default_username(&email))
        .to_owned();

    let exists = sqlx::query("SELECT 1 FROM users WHERE email = $1")
        .bind(&email)
        .fetch_optional(pool)
        .await?
        .is_some();
    if exists {
        return Err(UserError::EmailTaken);
    }

    let password_hash = password::hash_password(&req.password)?;
    let row = sqlx::query(
        r"INSERT INTO users (email, username, password_hash, college_id)
          VALUES ($1, $2, $3, $4)
          RETURNING id, email, username, college_id",
    )
    .bind(&email)
    .bind(&username)
    .bind(&password_hash)
    .bind(req.college_id)
    .fetch_one(pool)
    .await
    .map_err(map_unique_violation)?;
    let user = user_from_row(&row);

    let access_token = session::create_session(pool, user.id, ttl).await?;
    tracing::info!(user_id = user.id, "user registered");
    Ok(AuthResponse { access_token, user })
}

/// Verify credentials and open a session.
///
/// # Errors
///
/// Returns [`UserError::InvalidCredentials`] for an unknown email or wrong
/// password, or a database error.
pub async fn login(pool: &PgPool, email: &str, password: &str, ttl: time::Duration) -> Result<AuthResponse, UserError> {
    let Some(email) = normalize_email(email) else {
        return Err(UserError::InvalidCredentials);
    };

    let row = sqlx::query("SELECT id, email, username, college_id, password_hash FROM users WHERE email = $1")
        .bind(&email)
        .fetch_optional(pool)
        .await?
        .ok_or(UserError::InvalidCredentials)?;

    let stored: String = row.get("password_hash");
    if !password::verify_password(password, &stored) {
        return Err(UserError::InvalidCredentials);
    }

    let user = user_from_row(&row);
    let access_token = session::create_session(pool, user.id, ttl).await?;
    Ok(AuthResponse { access_token, user })
}

#[cfg(test)]
#[path = "users_test.rs"]
mod tests;
