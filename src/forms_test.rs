use super::*;

fn filled_registration() -> RegistrationForm {
    RegistrationForm {
        name: "Asha Rao".to_owned(),
        email: "asha@example.com".to_owned(),
        phone_number: "+91 98765 43210".to_owned(),
        team_size: 2,
    }
}

// =============================================================================
// normalize_email
// =============================================================================

#[test]
fn normalize_email_lowercases_and_trims() {
    assert_eq!(normalize_email("  Asha@Example.COM "), Some("asha@example.com".to_owned()));
}

#[test]
fn normalize_email_rejects_malformed() {
    assert_eq!(normalize_email("asha"), None);
    assert_eq!(normalize_email("@example.com"), None);
    assert_eq!(normalize_email("asha@"), None);
    assert_eq!(normalize_email("a@b@c"), None);
}

// =============================================================================
// SignInForm / SignUpForm
// =============================================================================

#[test]
fn sign_in_requires_both_fields() {
    let form = SignInForm { email: "a@b.c".to_owned(), password: "  ".to_owned() };
    assert_eq!(form.validate(), Err(FormError::MissingFields));
}

#[test]
fn sign_up_reports_mismatched_passwords() {
    let form = SignUpForm {
        name: "Asha".to_owned(),
        email: "a@b.c".to_owned(),
        password: "secret1".to_owned(),
        confirm_password: "secret2".to_owned(),
    };
    let err = form.validate().unwrap_err();
    assert_eq!(err, FormError::PasswordMismatch);
    assert_eq!(err.to_string(), "Passwords do not match");
}

#[test]
fn sign_up_missing_fields_checked_before_mismatch() {
    let form = SignUpForm { password: "x".to_owned(), ..SignUpForm::default() };
    assert_eq!(form.validate().unwrap_err().to_string(), "Please fill in all fields");
}

// =============================================================================
// RegistrationForm
// =============================================================================

#[test]
fn registration_form_starts_empty_for_individual() {
    let form = RegistrationForm::default();
    assert!(form.is_empty());
    assert_eq!(form.team_size, 1);
}

#[test]
fn registration_form_valid() {
    assert_eq!(filled_registration().validate(), Ok(()));
}

#[test]
fn registration_form_rejects_bad_email() {
    let form = RegistrationForm { email: "not-an-email".to_owned(), ..filled_registration() };
    assert_eq!(form.validate(), Err(FormError::InvalidEmail));
}

#[test]
fn registration_form_rejects_team_of_five() {
    let form = RegistrationForm { team_size: 5, ..filled_registration() };
    assert_eq!(form.validate(), Err(FormError::TeamSize));
    let form = RegistrationForm { team_size: 0, ..filled_registration() };
    assert_eq!(form.validate(), Err(FormError::TeamSize));
}

// =============================================================================
// CardDetails
// =============================================================================

#[test]
fn card_details_require_every_field() {
    let card = CardDetails { card_number: "4242 4242 4242 4242".to_owned(), ..CardDetails::default() };
    assert_eq!(card.validate(), Err(FormError::MissingFields));
}

#[test]
fn card_debug_masks_number() {
    let card = CardDetails {
        card_number: "4242 4242 4242 1234".to_owned(),
        card_holder: "Asha Rao".to_owned(),
        expiry_date: "12/27".to_owned(),
        cvv: "123".to_owned(),
    };
    let debug = format!("{card:?}");
    assert!(debug.contains("**** 1234"));
    assert!(!debug.contains("4242"));
}

#[test]
fn last4_handles_short_numbers() {
    let card = CardDetails { card_number: "12".to_owned(), ..CardDetails::default() };
    assert_eq!(card.last4(), "12");
}
