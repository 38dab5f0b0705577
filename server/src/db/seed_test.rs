use super::*;

#[test]
fn sample_events_cover_technology_and_culture() {
    let titles: Vec<_> = SAMPLE_EVENTS.iter().map(|e| e.title).collect();
    assert_eq!(titles, ["Tech Innovation Summit 2024", "Cultural Fest 2024", "Hackathon 2024"]);
    assert!(SAMPLE_EVENTS.iter().all(|e| e.price > 0.0));
}

#[test]
fn enough_seed_colleges_for_sample_events() {
    assert!(sample::colleges().len() >= COLLEGES_WITH_EVENTS);
}

#[cfg(feature = "live-db-tests")]
#[tokio::test]
#[ignore = "requires TEST_DATABASE_URL/live Postgres"]
async fn seeds_once() {
    let pool = crate::state::test_helpers::integration_pool().await;

    assert!(seed_if_empty(&pool).await.unwrap());
    assert!(!seed_if_empty(&pool).await.unwrap());

    let colleges: i64 = sqlx::query("SELECT COUNT(*) AS n FROM colleges WHERE approved")
        .fetch_one(&pool)
        .await
        .unwrap()
        .get("n");
    let events: i64 = sqlx::query("SELECT COUNT(*) AS n FROM events WHERE approved")
        .fetch_one(&pool)
        .await
        .unwrap()
        .get("n");
    assert_eq!(usize::try_from(colleges).unwrap(), sample::colleges().len());
    assert_eq!(usize::try_from(events).unwrap(), COLLEGES_WITH_EVENTS * SAMPLE_EVENTS.len());
}
