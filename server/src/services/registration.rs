//! Paid registrations for events and challenges.
//!
//! The participant counter and the registration row change in one
//! transaction; an unknown subject rolls both back.

use eventify::net::types::RegisterEventRequest;
use sqlx::PgPool;

#[derive(Debug, thiserror::Error)]
pub enum RegistrationError {
    #[error("Exactly one of event_id or challenge_id is required")]
    InvalidSubject,
    #[error("{0} not found")]
    NotFound(&'static str),
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// What a registration points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Subject {
    Event(i64),
    Challenge(i64),
}

impl TryFrom<&RegisterEventRequest> for Subject {
    type Error = RegistrationError;

    fn try_from(req: &RegisterEventRequest) -> Result<Self, Self::Error> {
        match (req.event_id, req.challenge_id) {
            (Some(id), None) => Ok(Self::Event(id)),
            (None, Some(id)) => Ok(Self::Challenge(id)),
            _ => Err(RegistrationError::InvalidSubject),
        }
    }
}

/// Record a completed registration and bump the subject's participants.
///
/// # Errors
///
/// Returns [`RegistrationError::InvalidSubject`] unless exactly one id is
/// set, [`RegistrationError::NotFound`] for an unknown subject, or a
/// database error.
pub async fn register(pool: &PgPool, user_id: i64, req: &RegisterEventRequest) -> Result<(), RegistrationError> {
    let subject = Subject::try_from(req)?;
    let mut tx = pool.begin().await?;

    let (update, label, id) = match subject {
        Subject::Event(id) => ("UPDATE events SET participants = participants + 1 WHERE id = $1", "Event", id),
        Subject::Challenge(id) => {
            ("UPDATE challenges SET participants = participants + 1 WHERE id = $1", "Challenge", id)
        }
    };
    let updated = sqlx::query(update).bind(id).execute(&mut *tx).await?;
    if updated.rows_affected() == 0 {
        return Err(RegistrationError::NotFound(label));
    }

    sqlx::query(
        r"INSERT INTO registrations (user_id, event_id, challenge_id, payment_status)
          VALUES ($1, $2, $3, 'completed')",
    )
    .bind(user_id)
    .bind(req.event_id)
    .bind(req.challenge_id)
    .execute(&mut *tx)
    .await?;

    tx.commit().await?;
    tracing::info!(user_id, ?subject, "registration recorded");
    Ok(())
}

#[cfg(test)]
#[path = "registration_test.rs"]
mod tests;
