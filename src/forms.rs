//! Client-side form validation.
//!
//! ERROR HANDLING
//! ==============
//! Validation runs before any network call. Failures carry the exact text
//! shown to the user and never change session or flow state.

#[cfg(test)]
#[path = "forms_test.rs"]
mod forms_test;

use serde::{Deserialize, Serialize};

pub const MIN_TEAM_SIZE: u8 = 1;
pub const MAX_TEAM_SIZE: u8 = 4;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FormError {
    #[error("Please fill in all fields")]
    MissingFields,
    #[error("Passwords do not match")]
    PasswordMismatch,
    #[error("Please enter a valid email address")]
    InvalidEmail,
    #[error("Team size must be between 1 and 4")]
    TeamSize,
}

/// Lowercased, trimmed email if it has a non-empty local part and domain.
#[must_use]
pub fn normalize_email(email: &str) -> Option<String> {
    let normalized = email.trim().to_ascii_lowercase();
    let (local, domain) = normalized.split_once('@')?;
    if local.is_empty() || domain.is_empty() || domain.contains('@') {
        return None;
    }
    Some(normalized)
}

fn all_filled(fields: &[&str]) -> bool {
    fields.iter().all(|f| !f.trim().is_empty())
}

// =============================================================================
// AUTH FORMS
// =============================================================================

#[derive(Clone, Debug, Default)]
pub struct SignInForm {
    pub email: String,
    pub password: String,
}

impl SignInForm {
    /// # Errors
    ///
    /// Returns [`FormError::MissingFields`] if either field is blank.
    pub fn validate(&self) -> Result<(), FormError> {
        if !all_filled(&[self.email.as_str(), self.password.as_str()]) {
            return Err(FormError::MissingFields);
        }
        Ok(())
    }
}

#[derive(Clone, Debug, Default)]
pub struct SignUpForm {
    pub name: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
}

impl SignUpForm {
    /// # Errors
    ///
    /// Returns the first validation failure: blank fields, then mismatched
    /// passwords.
    pub fn validate(&self) -> Result<(), FormError> {
        if !all_filled(&[self.name.as_str(), self.email.as_str(), self.password.as_str(), self.confirm_password.as_str()]) {
            return Err(FormError::MissingFields);
        }
        if self.password != self.confirm_password {
            return Err(FormError::PasswordMismatch);
        }
        Ok(())
    }
}

// =============================================================================
// REGISTRATION FORM
// =============================================================================

/// Details collected by the registration modal. Starts empty for every
/// subject.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistrationForm {
    pub name: String,
    pub email: String,
    pub phone_number: String,
    pub team_size: u8,
}

impl Default for RegistrationForm {
    fn default() -> Self {
        Self { name: String::new(), email: String::new(), phone_number: String::new(), team_size: MIN_TEAM_SIZE }
    }
}

impl RegistrationForm {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.name.is_empty() && self.email.is_empty() && self.phone_number.is_empty()
    }

    /// # Errors
    ///
    /// Returns an error for blank fields, a malformed email, or a team size
    /// outside 1..=4.
    pub fn validate(&self) -> Result<(), FormError> {
        if !all_filled(&[self.name.as_str(), self.email.as_str(), self.phone_number.as_str()]) {
            return Err(FormError::MissingFields);
        }
        if normalize_email(&self.email).is_none() {
            return Err(FormError::InvalidEmail);
        }
        if !(MIN_TEAM_SIZE..=MAX_TEAM_SIZE).contains(&self.team_size) {
            return Err(FormError::TeamSize);
        }
        Ok(())
    }
}

// =============================================================================
// CARD DETAILS
// =============================================================================

/// Card fields on the payment page. Only presence is checked; nothing here
/// is sent anywhere.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct CardDetails {
    pub card_number: String,
    pub card_holder: String,
    pub expiry_date: String,
    pub cvv: String,
}

impl CardDetails {
    /// # Errors
    ///
    /// Returns [`FormError::MissingFields`] if any field is blank.
    pub fn validate(&self) -> Result<(), FormError> {
        if !all_filled(&[self.card_number.as_str(), self.card_holder.as_str(), self.expiry_date.as_str(), self.cvv.as_str()]) {
            return Err(FormError::MissingFields);
        }
        Ok(())
    }

    /// Last four digits for receipts.
    #[must_use]
    pub fn last4(&self) -> String {
        let digits: Vec<char> = self.card_number.chars().filter(char::is_ascii_digit).collect();
        digits[digits.len().saturating_sub(4)..].iter().collect()
    }
}

impl std::fmt::Debug for CardDetails {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CardDetails")
            .field("card_number", &format_args!("**** {}", self.last4()))
            .field("card_holder", &self.card_holder)
            .finish_non_exhaustive()
    }
}
