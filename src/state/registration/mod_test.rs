use super::*;
use crate::catalog::sample;
use crate::error::ApiError;
use crate::net::api::AuthApi;
use crate::net::types::{AuthResponse, User};
use crate::storage::{AUTH_TOKEN_KEY, MemoryStorage, USER_KEY};
use crate::toast::ToastLog;

struct NoAuthApi;

#[async_trait::async_trait]
impl AuthApi for NoAuthApi {
    async fn login(&self, _email: &str, _password: &str) -> Result<AuthResponse, ApiError> {
        Err(ApiError::NotFound)
    }

    async fn register(&self, _email: &str, _password: &str, _username: Option<&str>) -> Result<AuthResponse, ApiError> {
        Err(ApiError::NotFound)
    }

    async fn logout(&self) -> Result<(), ApiError> {
        Ok(())
    }

    async fn current_user(&self) -> Result<User, ApiError> {
        Err(ApiError::NotFound)
    }
}

fn auth(signed_in: bool) -> Arc<AuthSession> {
    let local = Arc::new(MemoryStorage::new());
    if signed_in {
        let user = User { id: 9, email: "asha@example.com".to_owned(), username: "asha".to_owned(), college_id: None };
        local.set_item(AUTH_TOKEN_KEY, "tok").unwrap();
        local.set_item(USER_KEY, &serde_json::to_string(&user).unwrap()).unwrap();
    }
    let session = AuthSession::new(Arc::new(NoAuthApi), local, Arc::new(ToastLog::new()));
    session.hydrate();
    Arc::new(session)
}

fn subjects() -> Vec<RegistrationSubject> {
    sample::events().iter().map(RegistrationSubject::from).collect()
}

fn hackathon() -> RegistrationSubject {
    subjects().remove(0)
}

fn flow(signed_in: bool) -> (RegistrationFlow, Arc<MemoryStorage>) {
    let session_storage = Arc::new(MemoryStorage::new());
    (RegistrationFlow::new(auth(signed_in), session_storage.clone()), session_storage)
}

fn fill(form: &mut RegistrationForm) {
    form.name = "Asha Rao".to_owned();
    form.email = "asha@example.com".to_owned();
    form.phone_number = "9876543210".to_owned();
    form.team_size = 3;
}

// =============================================================================
// SubjectRef
// =============================================================================

#[test]
fn subject_ref_round_trips_through_session_storage_format() {
    assert_eq!(SubjectRef::event(1).to_string(), "event:1");
    assert_eq!("challenge:3".parse::<SubjectRef>().unwrap(), SubjectRef::challenge(3));
    assert_eq!("12".parse::<SubjectRef>().unwrap(), SubjectRef::event(12));
    assert!("game:1".parse::<SubjectRef>().is_err());
    assert!("event:abc".parse::<SubjectRef>().is_err());
}

#[test]
fn subject_ref_builds_backend_payload() {
    assert_eq!(SubjectRef::challenge(4).to_request(), RegisterEventRequest { event_id: None, challenge_id: Some(4) });
}

#[test]
fn challenge_projection_uses_deadline_and_host() {
    let challenge = Challenge {
        id: 4,
        title: "Code Sprint".to_owned(),
        description: "Solve five problems".to_owned(),
        short_description: None,
        category: "Coding".to_owned(),
        deadline: "Mar 1, 2024".to_owned(),
        participants: 12,
        status: "Open".to_owned(),
        rules: vec![],
        prizes: None,
        price: 99.0,
        college_id: Some(1),
        college_name: Some("IIT Delhi".to_owned()),
    };
    let subject = RegistrationSubject::from(&challenge);
    assert_eq!(subject.subject_ref(), SubjectRef::challenge(4));
    assert_eq!(subject.date, "Mar 1, 2024");
    assert_eq!(subject.organizer, "IIT Delhi");
    assert_eq!(subject.proceed_label(), "Proceed to Payment (₹99)");
}

#[test]
fn find_subject_matches_kind_and_id() {
    let challenge = Challenge {
        id: 1,
        title: "Code Sprint".to_owned(),
        description: String::new(),
        short_description: None,
        category: "Coding".to_owned(),
        deadline: "Mar 1, 2024".to_owned(),
        participants: 0,
        status: "Open".to_owned(),
        rules: vec![],
        prizes: None,
        price: 99.0,
        college_id: None,
        college_name: None,
    };
    let subjects: Vec<RegistrationSubject> = std::iter::once(RegistrationSubject::from(&challenge))
        .chain(sample::events().iter().map(RegistrationSubject::from))
        .collect();

    assert_eq!(find_subject(&subjects, SubjectRef::event(1)).unwrap().title, "National Hackathon 2023");
    assert_eq!(find_subject(&subjects, SubjectRef::challenge(1)).unwrap().title, "Code Sprint");
    assert!(find_subject(&subjects, SubjectRef::challenge(99)).is_none());
}

// =============================================================================
// RegistrationFlow
// =============================================================================

#[test]
fn signed_out_register_redirects_to_login_and_never_opens_form() {
    let (mut flow, session_storage) = flow(false);
    flow.open_details(hackathon()).unwrap();

    let outcome = flow.register_now().unwrap();

    assert_eq!(outcome, RegisterOutcome::Redirect(Route::Login));
    assert!(matches!(flow.phase(), RegistrationPhase::DetailsOpen { .. }));
    assert!(flow.form_mut().is_none());
    assert_eq!(session_storage.get_item(PENDING_REGISTRATION_KEY).as_deref(), Some("event:1"));
}

#[test]
fn signed_in_register_opens_empty_form_for_subject() {
    let (mut flow, _) = flow(true);
    flow.open_details(hackathon()).unwrap();

    assert_eq!(flow.register_now().unwrap(), RegisterOutcome::FormOpened);

    let RegistrationPhase::RegistrationFormOpen { subject, form } = flow.phase() else {
        panic!("expected form to be open, got {:?}", flow.phase());
    };
    assert_eq!(subject.title, "National Hackathon 2023");
    assert!(form.is_empty());
}

#[test]
fn submitting_valid_form_goes_to_payment() {
    let (mut flow, _) = flow(true);
    flow.open_details(hackathon()).unwrap();
    flow.register_now().unwrap();
    fill(flow.form_mut().unwrap());

    assert_eq!(flow.submit().unwrap(), Route::Payment(1));
    assert_eq!(Route::Payment(1).path(), "/payment/1");
    assert!(matches!(flow.phase(), RegistrationPhase::PaymentPending { subject } if subject.id == 1));
}

#[test]
fn submitting_blank_form_keeps_it_open() {
    let (mut flow, _) = flow(true);
    flow.open_details(hackathon()).unwrap();
    flow.register_now().unwrap();

    let err = flow.submit().unwrap_err();

    assert!(matches!(err, FlowError::Form(FormError::MissingFields)));
    assert!(flow.form_mut().is_some());
}

#[test]
fn resume_pending_reopens_form_after_sign_in() {
    let (mut flow, session_storage) = flow(true);
    session_storage.set_item(PENDING_REGISTRATION_KEY, "event:3").unwrap();

    let resumed = flow.resume_pending(subjects()).unwrap();

    assert_eq!(resumed, Some(SubjectRef::event(3)));
    assert_eq!(flow.phase().subject().map(|s| s.title.as_str()), Some("Design Festival 2023"));
    assert!(flow.form_mut().is_some());
    assert!(session_storage.get_item(PENDING_REGISTRATION_KEY).is_none());
}

#[test]
fn resume_pending_waits_for_sign_in() {
    let (mut flow, session_storage) = flow(false);
    session_storage.set_item(PENDING_REGISTRATION_KEY, "event:3").unwrap();

    assert_eq!(flow.resume_pending(subjects()).unwrap(), None);
    assert_eq!(flow.phase(), &RegistrationPhase::Browsing);
    assert!(session_storage.get_item(PENDING_REGISTRATION_KEY).is_some());
}

#[test]
fn resume_pending_consumes_unknown_subject() {
    let (mut flow, session_storage) = flow(true);
    session_storage.set_item(PENDING_REGISTRATION_KEY, "event:99").unwrap();

    assert_eq!(flow.resume_pending(subjects()).unwrap(), None);
    assert!(session_storage.is_empty());
}

#[test]
fn cancel_steps_back_without_side_effects() {
    let (mut flow, session_storage) = flow(true);
    flow.open_details(hackathon()).unwrap();
    flow.register_now().unwrap();

    flow.cancel();
    assert!(matches!(flow.phase(), RegistrationPhase::DetailsOpen { .. }));
    flow.cancel();
    assert_eq!(flow.phase(), &RegistrationPhase::Browsing);
    assert!(session_storage.is_empty());
}

#[test]
fn register_without_details_is_invalid() {
    let (mut flow, _) = flow(true);
    let err = flow.register_now().unwrap_err();
    assert_eq!(err.to_string(), "cannot register while browsing");
}
