//! College, event, and challenge queries plus college approval.
//!
//! DESIGN
//! ======
//! List endpoints only expose approved rows. Single-item lookups return the
//! row regardless of approval, which lets a college preview its own page
//! before an admin signs off. Events and challenges carry their college's
//! name via a join.

use eventify::net::types::{Challenge, College, Event, PendingCollege};
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};
use time::format_description::well_known::Rfc3339;

#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("{0} not found")]
    NotFound(&'static str),
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

const COLLEGE_COLUMNS: &str = "id, name, short_name, location, state, website, email, phone, logo_url, \
     description, established_year, college_type, affiliation";

const EVENT_SELECT: &str = "SELECT e.id, e.title, e.description, e.organizer, e.date, e.location, e.price, \
     e.image, e.category, e.participants, e.college_id, c.name AS college_name \
     FROM events e LEFT JOIN colleges c ON c.id = e.college_id";

/// Split the stored `|`-separated rules column.
#[must_use]
pub fn split_rules(rules: Option<&str>) -> Vec<String> {
    rules
        .filter(|r| !r.is_empty())
        .map(|r| r.split('|').map(str::to_owned).collect())
        .unwrap_or_default()
}

fn college_from_row(r: &PgRow) -> College {
    College {
        id: r.get("id"),
        name: r.get("name"),
        short_name: r.get("short_name"),
        location: r.get("location"),
        state: r.get("state"),
        website: r.get("website"),
        email: r.get("email"),
        phone: r.get("phone"),
        logo_url: r.get("logo_url"),
        description: r.get("description"),
        established_year: r.get("established_year"),
        college_type: r.get("college_type"),
        affiliation: r.get("affiliation"),
    }
}

fn event_from_row(r: &PgRow) -> Event {
    Event {
        id: r.get("id"),
        title: r.get("title"),
        description: r.get("description"),
        organizer: r.get("organizer"),
        date: r.get("date"),
        location: r.get("location"),
        price: r.get("price"),
        image: r.get("image"),
        category: r.get("category"),
        participants: r.get("participants"),
        college_id: r.get("college_id"),
        college_name: r.get("college_name"),
    }
}

fn challenge_from_row(r: &PgRow) -> Challenge {
    let rules: Option<String> = r.get("rules");
    Challenge {
        id: r.get("id"),
        title: r.get("title"),
        description: r.get("description"),
        short_description: r.get("short_description"),
        category: r.get("category"),
        deadline: r.get("deadline"),
        participants: r.get("participants"),
        status: r.get("status"),
        rules: split_rules(rules.as_deref()),
        prizes: r.get("prizes"),
        price: r.get("price"),
        college_id: r.get("college_id"),
        college_name: r.get("college_name"),
    }
}

// =============================================================================
// COLLEGES
// =============================================================================

/// Approved colleges in insertion order.
///
/// # Errors
///
/// Returns a database error if the query fails.
pub async fn list_colleges(pool: &PgPool) -> Result<Vec<College>, CatalogError> {
    let rows = sqlx::query(&format!("SELECT {COLLEGE_COLUMNS} FROM colleges WHERE approved ORDER BY id"))
        .fetch_all(pool)
        .await?;
    Ok(rows.iter().map(college_from_row).collect())
}

/// # Errors
///
/// Returns [`CatalogError::NotFound`] for an unknown id.
pub async fn get_college(pool: &PgPool, id: i64) -> Result<College, CatalogError> {
    sqlx::query(&format!("SELECT {COLLEGE_COLUMNS} FROM colleges WHERE id = $1"))
        .bind(id)
        .fetch_optional(pool)
        .await?
        .map(|r| college_from_row(&r))
        .ok_or(CatalogError::NotFound("College"))
}

/// Approved events hosted by one college.
///
/// # Errors
///
/// Returns [`CatalogError::NotFound`] if the college does not exist.
pub async fn college_events(pool: &PgPool, college_id: i64) -> Result<Vec<Event>, CatalogError> {
    let college_exists = sqlx::query("SELECT 1 FROM colleges WHERE id = $1")
        .bind(college_id)
        .fetch_optional(pool)
        .await?
        .is_some();
    if !college_exists {
        return Err(CatalogError::NotFound("College"));
    }

    let rows = sqlx::query(&format!("{EVENT_SELECT} WHERE e.college_id = $1 AND e.approved ORDER BY e.id"))
        .bind(college_id)
        .fetch_all(pool)
        .await?;
    Ok(rows.iter().map(event_from_row).collect())
}

/// Colleges awaiting approval, oldest first.
///
/// # Errors
///
/// Returns a database error if the query fails.
pub async fn pending_colleges(pool: &PgPool) -> Result<Vec<PendingCollege>, CatalogError> {
    let rows = sqlx::query(
        "SELECT id, name, short_name, location, state, created_at FROM colleges WHERE NOT approved ORDER BY created_at, id",
    )
    .fetch_all(pool)
    .await?;

    Ok(rows
        .iter()
        .map(|r| {
            let created_at: time::OffsetDateTime = r.get("created_at");
            PendingCollege {
                id: r.get("id"),
                name: r.get("name"),
                short_name: r.get("short_name"),
                location: r.get("location"),
                state: r.get("state"),
                created_at: created_at.format(&Rfc3339).unwrap_or_default(),
            }
        })
        .collect())
}

/// Mark a college approved. Approving twice is a no-op.
///
/// # Errors
///
/// Returns [`CatalogError::NotFound`] for an unknown id.
pub async fn approve_college(pool: &PgPool, id: i64) -> Result<(), CatalogError> {
    let result = sqlx::query("UPDATE colleges SET approved = TRUE WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;
    if result.rows_affected() == 0 {
        return Err(CatalogError::NotFound("College"));
    }
    tracing::info!(college_id = id, "college approved");
    Ok(())
}

// =============================================================================
// EVENTS
// =============================================================================

/// Approved events with their college names.
///
/// # Errors
///
/// Returns a database error if the query fails.
pub async fn list_events(pool: &PgPool) -> Result<Vec<Event>, CatalogError> {
    let rows = sqlx::query(&format!("{EVENT_SELECT} WHERE e.approved ORDER BY e.id"))
        .fetch_all(pool)
        .await?;
    Ok(rows.iter().map(event_from_row).collect())
}

/// # Errors
///
/// Returns [`CatalogError::NotFound`] for an unknown id.
pub async fn get_event(pool: &PgPool, id: i64) -> Result<Event, CatalogError> {
    sqlx::query(&format!("{EVENT_SELECT} WHERE e.id = $1"))
        .bind(id)
        .fetch_optional(pool)
        .await?
        .map(|r| event_from_row(&r))
        .ok_or(CatalogError::NotFound("Event"))
}

// =============================================================================
// CHALLENGES
// =============================================================================

/// Approved challenges with rules split into a list.
///
/// # Errors
///
/// Returns a database error if the query fails.
pub async fn list_challenges(pool: &PgPool) -> Result<Vec<Challenge>, CatalogError> {
    let rows = sqlx::query(
        r"SELECT ch.id, ch.title, ch.description, ch.short_description, ch.category, ch.deadline,
                 ch.participants, ch.status, ch.rules, ch.prizes, ch.price, ch.college_id,
                 c.name AS college_name
          FROM challenges ch
          LEFT JOIN colleges c ON c.id = ch.college_id
          WHERE ch.approved
          ORDER BY ch.id",
    )
    .fetch_all(pool)
    .await?;
    Ok(rows.iter().map(challenge_from_row).collect())
}

#[cfg(test)]
#[path = "catalog_test.rs"]
mod tests;
