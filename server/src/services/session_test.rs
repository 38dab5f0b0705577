use super::*;

// =============================================================================
// bytes_to_hex
// =============================================================================

#[test]
fn bytes_to_hex_empty() {
    assert_eq!(bytes_to_hex(&[]), "");
}

#[test]
fn bytes_to_hex_leading_zero() {
    assert_eq!(bytes_to_hex(&[0x0a]), "0a");
}

#[test]
fn bytes_to_hex_multi_byte() {
    assert_eq!(bytes_to_hex(&[0xde, 0xad, 0xbe, 0xef]), "deadbeef");
}

// =============================================================================
// generate_token
// =============================================================================

#[test]
fn generate_token_is_64_hex_chars() {
    let token = generate_token();
    assert_eq!(token.len(), 64);
    assert!(token.chars().all(|c| c.is_ascii_hexdigit()));
}

#[test]
fn generate_token_two_calls_differ() {
    assert_ne!(generate_token(), generate_token());
}

// =============================================================================
// parse_bearer
// =============================================================================

#[test]
fn parse_bearer_accepts_any_case_scheme() {
    assert_eq!(parse_bearer("Bearer abc"), Some("abc"));
    assert_eq!(parse_bearer("bearer  abc "), Some("abc"));
}

#[test]
fn parse_bearer_rejects_other_schemes_and_blank_tokens() {
    assert_eq!(parse_bearer("Basic abc"), None);
    assert_eq!(parse_bearer("Bearer "), None);
    assert_eq!(parse_bearer("abc"), None);
}

// =============================================================================
// LIVE DB
// =============================================================================

#[cfg(feature = "live-db-tests")]
async fn insert_user(pool: &PgPool) -> i64 {
    sqlx::query("INSERT INTO users (email, username, password_hash) VALUES ('s@x.io', 's', 'x$y') RETURNING id")
        .fetch_one(pool)
        .await
        .expect("insert user")
        .get("id")
}

#[cfg(feature = "live-db-tests")]
#[tokio::test]
#[ignore = "requires TEST_DATABASE_URL/live Postgres"]
async fn session_round_trip_and_delete() {
    let pool = crate::state::test_helpers::integration_pool().await;
    let user_id = insert_user(&pool).await;

    let token = create_session(&pool, user_id, time::Duration::days(7)).await.unwrap();
    let user = validate_session(&pool, &token).await.unwrap().expect("valid session");
    assert_eq!(user.id, user_id);
    assert_eq!(user.email, "s@x.io");

    delete_session(&pool, &token).await.unwrap();
    assert!(validate_session(&pool, &token).await.unwrap().is_none());
}

#[cfg(feature = "live-db-tests")]
#[tokio::test]
#[ignore = "requires TEST_DATABASE_URL/live Postgres"]
async fn expired_session_does_not_validate() {
    let pool = crate::state::test_helpers::integration_pool().await;
    let user_id = insert_user(&pool).await;

    let token = create_session(&pool, user_id, time::Duration::seconds(-1)).await.unwrap();
    assert!(validate_session(&pool, &token).await.unwrap().is_none());
}
