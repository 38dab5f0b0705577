use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};

use super::*;
use crate::net::types::{Challenge, RegisterEventRequest};
use crate::state::registration::SubjectKind;
use crate::toast::ToastLog;

fn card() -> CardDetails {
    CardDetails {
        card_number: "4242 4242 4242 4242".to_owned(),
        card_holder: "Asha Rao".to_owned(),
        expiry_date: "12/27".to_owned(),
        cvv: "123".to_owned(),
    }
}

#[derive(Default)]
struct RecordingApi {
    requests: Mutex<Vec<RegisterEventRequest>>,
    reject: bool,
}

#[async_trait::async_trait]
impl RegistrationApi for RecordingApi {
    async fn register_for(&self, request: RegisterEventRequest) -> Result<(), ApiError> {
        self.requests.lock().unwrap().push(request);
        if self.reject {
            return Err(ApiError::Status { status: 401, message: "Missing bearer token".to_owned() });
        }
        Ok(())
    }
}

struct FlagProcessor {
    delay: Duration,
    done: Arc<AtomicBool>,
}

#[async_trait::async_trait]
impl PaymentProcessor for FlagProcessor {
    async fn process(&self, _payment: &PaymentRequest) -> Result<(), PaymentError> {
        tokio::time::sleep(self.delay).await;
        self.done.store(true, Ordering::SeqCst);
        Ok(())
    }
}

/// Challenge 1 listed ahead of the featured events, sharing event 1's id.
fn mixed_subjects() -> Vec<RegistrationSubject> {
    let challenge = Challenge {
        id: 1,
        title: "Code Sprint".to_owned(),
        description: "Solve five problems".to_owned(),
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
    std::iter::once(RegistrationSubject::from(&challenge)).chain(featured_subjects()).collect()
}

// =============================================================================
// OrderSummary
// =============================================================================

#[test]
fn hackathon_total_includes_two_percent_fee() {
    let checkout = Checkout::resolve(SubjectRef::event(1), &featured_subjects()).unwrap();
    let summary = checkout.summary();
    assert_eq!(format_rupees(summary.registration_fee), "₹499.00");
    assert_eq!(format_rupees(summary.processing_fee), "₹9.98");
    assert_eq!(format_rupees(summary.total), "₹508.98");
}

#[test]
fn summary_lines_are_in_display_order() {
    let lines = OrderSummary::for_price(299.0).lines();
    let labels: Vec<&str> = lines.iter().map(|(label, _)| *label).collect();
    assert_eq!(labels, vec!["Registration Fee", "Processing Fee", "Total"]);
    assert_eq!(lines[2].1, "₹304.98");
}

#[test]
fn unknown_subject_redirects_to_events() {
    assert_eq!(Checkout::resolve(SubjectRef::event(6), &featured_subjects()).unwrap_err(), Route::Events);
}

// =============================================================================
// pay
// =============================================================================

#[tokio::test(start_paused = true)]
async fn simulated_payment_navigates_to_success_after_delay() {
    let checkout = Checkout::resolve(SubjectRef::event(1), &featured_subjects()).unwrap();
    let toasts = ToastLog::new();
    let processor = SimulatedProcessor { delay: Duration::from_secs(2) };

    let started = tokio::time::Instant::now();
    let route = checkout.pay(&card(), &processor, &toasts).await.unwrap();

    assert_eq!(route, Route::RegistrationSuccess(1));
    assert!(started.elapsed() >= Duration::from_secs(2));
    assert_eq!(toasts.toasts()[0].title, "Processing Payment");
}

#[tokio::test]
async fn blank_card_fails_before_processing() {
    let checkout = Checkout::resolve(SubjectRef::event(2), &featured_subjects()).unwrap();
    let toasts = ToastLog::new();
    let api = Arc::new(RecordingApi::default());
    let processor = BackendProcessor::new(api.clone());

    let err = checkout.pay(&CardDetails::default(), &processor, &toasts).await.unwrap_err();

    assert!(matches!(err, PaymentError::Form(FormError::MissingFields)));
    assert!(api.requests.lock().unwrap().is_empty());
    assert!(toasts.last().unwrap().is_destructive());
}

#[tokio::test]
async fn backend_processor_records_event_registration() {
    let checkout = Checkout::resolve(SubjectRef::event(3), &featured_subjects()).unwrap();
    let api = Arc::new(RecordingApi::default());
    let processor = BackendProcessor::new(api.clone());

    let route = checkout.pay(&card(), &processor, &ToastLog::new()).await.unwrap();

    assert_eq!(route, Route::RegistrationSuccess(3));
    let requests = api.requests.lock().unwrap();
    assert_eq!(requests.as_slice(), &[RegisterEventRequest { event_id: Some(3), challenge_id: None }]);
}

#[tokio::test]
async fn backend_rejection_is_surfaced_verbatim() {
    let checkout = Checkout::resolve(SubjectRef::event(3), &featured_subjects()).unwrap();
    let api = Arc::new(RecordingApi { reject: true, ..RecordingApi::default() });
    let toasts = ToastLog::new();

    let err = checkout.pay(&card(), &BackendProcessor::new(api), &toasts).await.unwrap_err();

    assert_eq!(err.to_string(), "Missing bearer token");
    let toast = toasts.last().unwrap();
    assert_eq!(toast.title, "Payment failed");
    assert_eq!(toast.description, "Missing bearer token");
}

// =============================================================================
// spawn_payment
// =============================================================================

#[tokio::test(start_paused = true)]
async fn spawned_payment_joins_with_success_route() {
    let checkout = Checkout::resolve(SubjectRef::event(2), &featured_subjects()).unwrap();
    let guard = spawn_payment(
        checkout,
        card(),
        Arc::new(SimulatedProcessor::default()),
        Arc::new(ToastLog::new()),
    );
    assert_eq!(guard.join().await.unwrap().unwrap(), Route::RegistrationSuccess(2));
}

#[tokio::test(start_paused = true)]
async fn leaving_the_page_aborts_processing() {
    let checkout = Checkout::resolve(SubjectRef::event(1), &featured_subjects()).unwrap();
    let done = Arc::new(AtomicBool::new(false));
    let processor = FlagProcessor { delay: Duration::from_secs(2), done: done.clone() };

    let guard = spawn_payment(checkout, card(), Arc::new(processor), Arc::new(ToastLog::new()));
    tokio::time::sleep(Duration::from_millis(500)).await;
    drop(guard);
    tokio::time::sleep(Duration::from_secs(5)).await;

    assert!(!done.load(Ordering::SeqCst));
}

// =============================================================================
// resolve
// =============================================================================

#[test]
fn resolve_matches_kind_when_ids_collide() {
    let subjects = mixed_subjects();

    let event = Checkout::resolve(SubjectRef::event(1), &subjects).unwrap();
    assert_eq!(event.subject().kind, SubjectKind::Event);
    assert_eq!(format_rupees(event.summary().registration_fee), "₹499.00");

    let challenge = Checkout::resolve(SubjectRef::challenge(1), &subjects).unwrap();
    assert_eq!(challenge.subject().title, "Code Sprint");
    assert_eq!(format_rupees(challenge.summary().registration_fee), "₹99.00");
}

#[test]
fn resolve_unknown_challenge_redirects_to_events() {
    assert_eq!(Checkout::resolve(SubjectRef::challenge(2), &mixed_subjects()).unwrap_err(), Route::Events);
}
