//! Password hashing.
//!
//! Stored form is an Argon2id PHC string (`$argon2id$v=19$...`), which
//! carries its own salt and cost parameters.

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;

#[derive(Debug, thiserror::Error)]
#[error("password hashing failed: {0}")]
pub struct HashError(#[from] argon2::password_hash::Error);

/// Hash `password` with a fresh random salt.
///
/// # Errors
///
/// Returns [`HashError`] if Argon2 rejects the input.
pub fn hash_password(password: &str) -> Result<String, HashError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(HashError::from)
}

/// Check `password` against a stored hash. Malformed hashes never verify.
#[must_use]
pub fn verify_password(password: &str, stored: &str) -> bool {
    let Ok(parsed) = PasswordHash::new(stored) else {
        tracing::warn!("stored password hash is not a PHC string");
        return false;
    };
    Argon2::default().verify_password(password.as_bytes(), &parsed).is_ok()
}

#[cfg(test)]
#[path = "password_test.rs"]
mod tests;
