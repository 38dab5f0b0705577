//! First-run catalog seeding.
//!
//! DESIGN
//! ======
//! Seeding only runs when the `colleges` table is empty, so restarts never
//! duplicate rows. The college list is the same one the client ships for
//! offline browsing; each of the first five colleges gets the same three
//! sample events.

#[cfg(test)]
#[path = "seed_test.rs"]
mod tests;

use eventify::catalog::sample;
use sqlx::{PgPool, Row};

/// Number of seeded colleges that receive sample events.
pub const COLLEGES_WITH_EVENTS: usize = 5;

/// Event template copied into each of the first seeded colleges.
#[derive(Debug, Clone, Copy)]
pub struct SampleEvent {
    pub title: &'static str,
    pub description: &'static str,
    pub organizer: &'static str,
    pub date: &'static str,
    pub location: &'static str,
    pub price: f64,
    pub image: &'static str,
    pub category: &'static str,
}

pub const SAMPLE_EVENTS: [SampleEvent; 3] = [
    SampleEvent {
        title: "Tech Innovation Summit 2024",
        description: "Annual technology conference featuring latest innovations in AI, ML, and Web3",
        organizer: "Tech Society",
        date: "March 15, 2024",
        location: "Main Auditorium",
        price: 2999.0,
        image: "https://images.unsplash.com/photo-1540575467063-178a50c2df87",
        category: "Technology",
    },
    SampleEvent {
        title: "Cultural Fest 2024",
        description: "Annual cultural festival with music, dance, and art competitions",
        organizer: "Cultural Committee",
        date: "April 20, 2024",
        location: "Campus Grounds",
        price: 1500.0,
        image: "https://images.unsplash.com/photo-1559136555-9303baea8ebd",
        category: "Cultural",
    },
    SampleEvent {
        title: "Hackathon 2024",
        description: "48-hour coding competition to solve real-world problems",
        organizer: "Programming Club",
        date: "May 10, 2024",
        location: "Computer Center",
        price: 999.0,
        image: "https://images.unsplash.com/photo-1504384308090-c894fdcc538d",
        category: "Technology",
    },
];

/// Seed colleges and sample events if no colleges exist yet.
/// Returns whether anything was inserted.
///
/// # Errors
///
/// Returns a database error if any insert fails; the whole seed is rolled
/// back in that case.
pub async fn seed_if_empty(pool: &PgPool) -> Result<bool, sqlx::Error> {
    let count: i64 = sqlx::query("SELECT COUNT(*) AS n FROM colleges")
        .fetch_one(pool)
        .await?
        .get("n");
    if count > 0 {
        return Ok(false);
    }

    let mut tx = pool.begin().await?;
    let mut college_ids = Vec::new();
    for college in sample::colleges() {
        let row = sqlx::query(
            r"INSERT INTO colleges
                  (name, short_name, location, state, website, email, phone, logo_url,
                   description, established_year, college_type, affiliation, approved)
              VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, TRUE)
              RETURNING id",
        )
        .bind(&college.name)
        .bind(&college.short_name)
        .bind(&college.location)
        .bind(&college.state)
        .bind(&college.website)
        .bind(&college.email)
        .bind(&college.phone)
        .bind(&college.logo_url)
        .bind(&college.description)
        .bind(college.established_year)
        .bind(&college.college_type)
        .bind(&college.affiliation)
        .fetch_one(&mut *tx)
        .await?;
        college_ids.push(row.get::<i64, _>("id"));
    }

    for college_id in college_ids.iter().take(COLLEGES_WITH_EVENTS) {
        for event in &SAMPLE_EVENTS {
            sqlx::query(
                r"INSERT INTO events
                      (title, description, organizer, date, location, price, image, category,
                       college_id, approved)
                  VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, TRUE)",
            )
            .bind(event.title)
            .bind(event.description)
            .bind(event.organizer)
            .bind(event.date)
            .bind(event.location)
            .bind(event.price)
            .bind(event.image)
            .bind(event.category)
            .bind(college_id)
            .execute(&mut *tx)
            .await?;
        }
    }

    tx.commit().await?;
    tracing::info!(colleges = college_ids.len(), "seeded empty catalog");
    Ok(true)
}
