//! Shared wire DTOs for the client/server boundary.
//!
//! DESIGN
//! ======
//! The backend serializes exactly these types, so the JSON contract has a
//! single definition. Field names follow the REST payloads the browser app
//! already consumes (`short_name`, `college_id`, `shortDescription`).

#[cfg(test)]
#[path = "types_test.rs"]
mod types_test;

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};

/// A signed-in user as returned by the auth endpoints and persisted under
/// the `user` storage key.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    #[serde(deserialize_with = "deserialize_i64_from_number")]
    pub id: i64,
    pub email: String,
    pub username: String,
    /// College the user belongs to, if they picked one at sign-up.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub college_id: Option<i64>,
}

/// Body returned by `/api/auth/login` and `/api/auth/register`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthResponse {
    /// Opaque bearer token.
    pub access_token: String,
    pub user: User,
}

/// Credentials posted to `/api/auth/login`.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Payload posted to `/api/auth/register`.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    /// Defaults to the local part of the email when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub college_id: Option<i64>,
}

/// A student event listed by a college.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Event {
    #[serde(deserialize_with = "deserialize_i64_from_number")]
    pub id: i64,
    pub title: String,
    pub description: String,
    pub organizer: String,
    /// Free-form display date (e.g. `"Dec 15-17, 2023"`).
    pub date: String,
    pub location: String,
    /// Registration fee in rupees.
    #[serde(default)]
    pub price: f64,
    #[serde(default)]
    pub image: Option<String>,
    pub category: String,
    #[serde(default, deserialize_with = "deserialize_i64_from_number")]
    pub participants: i64,
    #[serde(default)]
    pub college_id: Option<i64>,
    #[serde(default)]
    pub college_name: Option<String>,
}

/// A college or university hosting events.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct College {
    #[serde(deserialize_with = "deserialize_i64_from_number")]
    pub id: i64,
    pub name: String,
    pub short_name: String,
    pub location: String,
    pub state: String,
    #[serde(default)]
    pub website: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub logo_url: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub established_year: Option<i32>,
    /// Engineering, University, Science & Research, ...
    #[serde(default)]
    pub college_type: Option<String>,
    #[serde(default)]
    pub affiliation: Option<String>,
}

/// A skill challenge students can register for.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Challenge {
    #[serde(deserialize_with = "deserialize_i64_from_number")]
    pub id: i64,
    pub title: String,
    pub description: String,
    #[serde(rename = "shortDescription", default)]
    pub short_description: Option<String>,
    pub category: String,
    pub deadline: String,
    #[serde(default, deserialize_with = "deserialize_i64_from_number")]
    pub participants: i64,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub rules: Vec<String>,
    #[serde(default)]
    pub prizes: Option<String>,
    #[serde(default)]
    pub price: f64,
    #[serde(default)]
    pub college_id: Option<i64>,
    #[serde(default)]
    pub college_name: Option<String>,
}

/// Payload posted to `/api/register-event`. Exactly one id is set.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegisterEventRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub event_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub challenge_id: Option<i64>,
}

/// A college awaiting admin approval.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingCollege {
    #[serde(deserialize_with = "deserialize_i64_from_number")]
    pub id: i64,
    pub name: String,
    pub short_name: String,
    pub location: String,
    pub state: String,
    /// ISO 8601 creation timestamp.
    pub created_at: String,
}

/// Error body returned by every failing backend endpoint.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

/// Generic `{ "success": bool }` acknowledgement.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuccessBody {
    pub success: bool,
}

fn deserialize_i64_from_number<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    match value {
        serde_json::Value::Number(number) => {
            if let Some(int) = number.as_i64() {
                return Ok(int);
            }
            #[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation)]
            if let Some(float) = number.as_f64()
                && float.is_finite()
                && float.fract() == 0.0
                && float >= i64::MIN as f64
                && float <= i64::MAX as f64
            {
                return Ok(float as i64);
            }
            Err(D::Error::custom("expected integer-compatible number"))
        }
        _ => Err(D::Error::custom("expected number")),
    }
}
