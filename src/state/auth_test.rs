use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use super::*;
use crate::storage::MemoryStorage;
use crate::toast::{ToastLog, ToastVariant};

fn alice() -> User {
    User { id: 1, email: "alice@example.com".to_owned(), username: "alice".to_owned(), college_id: None }
}

#[derive(Default)]
struct MockAuthApi {
    reject_with: Mutex<Option<String>>,
    fail_logout: bool,
    login_calls: AtomicUsize,
    logout_calls: AtomicUsize,
    last_username: Mutex<Option<String>>,
}

impl MockAuthApi {
    fn rejecting(message: &str) -> Self {
        Self { reject_with: Mutex::new(Some(message.to_owned())), ..Self::default() }
    }

    fn respond(&self, email: &str, username: Option<&str>) -> Result<AuthResponse, ApiError> {
        if let Some(message) = self.reject_with.lock().unwrap().clone() {
            return Err(ApiError::Status { status: 401, message });
        }
        let username = username.map_or_else(|| email.split('@').next().unwrap_or_default().to_owned(), str::to_owned);
        Ok(AuthResponse {
            access_token: "tok-123".to_owned(),
            user: User { id: 1, email: email.to_owned(), username, college_id: None },
        })
    }
}

#[async_trait::async_trait]
impl AuthApi for MockAuthApi {
    async fn login(&self, email: &str, _password: &str) -> Result<AuthResponse, ApiError> {
        self.login_calls.fetch_add(1, Ordering::SeqCst);
        self.respond(email, None)
    }

    async fn register(&self, email: &str, _password: &str, username: Option<&str>) -> Result<AuthResponse, ApiError> {
        *self.last_username.lock().unwrap() = username.map(str::to_owned);
        self.respond(email, username)
    }

    async fn logout(&self) -> Result<(), ApiError> {
        self.logout_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_logout {
            return Err(ApiError::Status { status: 500, message: "boom".to_owned() });
        }
        Ok(())
    }

    async fn current_user(&self) -> Result<User, ApiError> {
        Ok(alice())
    }
}

struct Harness {
    api: Arc<MockAuthApi>,
    storage: Arc<MemoryStorage>,
    toasts: Arc<ToastLog>,
    session: AuthSession,
}

fn harness(api: MockAuthApi) -> Harness {
    let api = Arc::new(api);
    let storage = Arc::new(MemoryStorage::new());
    let toasts = Arc::new(ToastLog::new());
    let session = AuthSession::new(api.clone(), storage.clone(), toasts.clone());
    Harness { api, storage, toasts, session }
}

fn store_pair(storage: &MemoryStorage) {
    storage.set_item(AUTH_TOKEN_KEY, "tok-1").unwrap();
    storage.set_item(USER_KEY, &serde_json::to_string(&alice()).unwrap()).unwrap();
}

// =============================================================================
// hydrate
// =============================================================================

#[test]
fn new_session_is_loading_without_user() {
    let h = harness(MockAuthApi::default());
    assert_eq!(h.session.snapshot(), AuthState { user: None, loading: true });
}

#[test]
fn hydrate_restores_stored_pair() {
    let h = harness(MockAuthApi::default());
    store_pair(&h.storage);
    h.session.hydrate();
    assert_eq!(h.session.user(), Some(alice()));
    assert!(!h.session.loading());
    assert_eq!(h.session.token().as_deref(), Some("tok-1"));
}

#[test]
fn hydrate_empty_storage_finishes_loading() {
    let h = harness(MockAuthApi::default());
    h.session.hydrate();
    assert_eq!(h.session.snapshot(), AuthState { user: None, loading: false });
}

#[test]
fn hydrate_lone_token_clears_both_keys() {
    let h = harness(MockAuthApi::default());
    h.storage.set_item(AUTH_TOKEN_KEY, "tok-1").unwrap();
    h.session.hydrate();
    assert!(h.session.user().is_none());
    assert!(h.storage.is_empty());
}

#[test]
fn hydrate_corrupt_user_clears_both_keys() {
    let h = harness(MockAuthApi::default());
    h.storage.set_item(AUTH_TOKEN_KEY, "tok-1").unwrap();
    h.storage.set_item(USER_KEY, "{not json").unwrap();
    h.session.hydrate();
    assert!(h.session.user().is_none());
    assert!(!h.session.loading());
    assert!(h.storage.is_empty());
}

// =============================================================================
// sign_in / sign_up
// =============================================================================

#[tokio::test]
async fn sign_in_persists_both_keys_and_toasts() {
    let h = harness(MockAuthApi::default());
    h.session.hydrate();

    let user = h.session.sign_in("alice@example.com", "secret").await.unwrap();

    assert_eq!(user.username, "alice");
    assert_eq!(h.session.user(), Some(user.clone()));
    assert_eq!(h.storage.get_item(AUTH_TOKEN_KEY).as_deref(), Some("tok-123"));
    let stored: User = serde_json::from_str(&h.storage.get_item(USER_KEY).unwrap()).unwrap();
    assert_eq!(stored, user);
    let toast = h.toasts.last().unwrap();
    assert_eq!(toast.title, "Signed in successfully");
    assert_eq!(toast.description, "Welcome back!");
}

#[tokio::test]
async fn sign_in_rejection_keeps_user_and_shows_message() {
    let h = harness(MockAuthApi::rejecting("Invalid credentials"));
    h.session.hydrate();

    let err = h.session.sign_in("alice@example.com", "wrong").await.unwrap_err();

    assert!(matches!(err, AuthError::Api(_)));
    assert!(h.session.user().is_none());
    assert!(h.storage.is_empty());
    let toast = h.toasts.last().unwrap();
    assert_eq!(toast.variant, ToastVariant::Destructive);
    assert_eq!(toast.title, "Sign in failed");
    assert_eq!(toast.description, "Invalid credentials");
}

#[tokio::test]
async fn sign_up_forwards_username_and_welcomes() {
    let h = harness(MockAuthApi::default());
    h.session.hydrate();

    let profile = SignUpProfile { username: Some("asha".to_owned()) };
    let user = h.session.sign_up("asha@example.com", "secret", profile).await.unwrap();

    assert_eq!(user.username, "asha");
    assert_eq!(h.api.last_username.lock().unwrap().as_deref(), Some("asha"));
    assert_eq!(h.toasts.last().unwrap().description, "Welcome to Eventify!");
}

#[tokio::test]
async fn sign_up_rejection_uses_registration_failed_title() {
    let h = harness(MockAuthApi::rejecting("Email already exists"));
    h.session.hydrate();

    let result = h.session.sign_up("alice@example.com", "secret", SignUpProfile::default()).await;

    assert!(result.is_err());
    let toast = h.toasts.last().unwrap();
    assert_eq!(toast.title, "Registration failed");
    assert_eq!(toast.description, "Email already exists");
}

#[tokio::test]
async fn sign_in_with_blank_form_never_calls_backend() {
    let h = harness(MockAuthApi::default());
    h.session.hydrate();

    let form = SignInForm { email: "alice@example.com".to_owned(), password: String::new() };
    let err = h.session.sign_in_with_form(&form).await.unwrap_err();

    assert!(matches!(err, AuthError::Form(FormError::MissingFields)));
    assert_eq!(h.api.login_calls.load(Ordering::SeqCst), 0);
    let toast = h.toasts.last().unwrap();
    assert_eq!(toast.title, "Error");
    assert_eq!(toast.description, "Please fill in all fields");
}

#[tokio::test]
async fn sign_up_with_form_rejects_mismatched_passwords() {
    let h = harness(MockAuthApi::default());
    h.session.hydrate();

    let form = SignUpForm {
        name: "Asha".to_owned(),
        email: "asha@example.com".to_owned(),
        password: "one".to_owned(),
        confirm_password: "two".to_owned(),
    };
    let err = h.session.sign_up_with_form(&form).await.unwrap_err();

    assert_eq!(err.to_string(), "Passwords do not match");
    assert!(h.session.user().is_none());
}

// =============================================================================
// sign_out
// =============================================================================

#[tokio::test]
async fn sign_out_clears_storage_and_user() {
    let h = harness(MockAuthApi::default());
    store_pair(&h.storage);
    h.session.hydrate();

    h.session.sign_out().await;

    assert!(h.storage.get_item(AUTH_TOKEN_KEY).is_none());
    assert!(h.storage.get_item(USER_KEY).is_none());
    assert!(h.session.user().is_none());
    assert_eq!(h.api.logout_calls.load(Ordering::SeqCst), 1);
    assert_eq!(h.toasts.last().unwrap().title, "Signed out");
}

#[tokio::test]
async fn sign_out_survives_remote_failure() {
    let h = harness(MockAuthApi { fail_logout: true, ..MockAuthApi::default() });
    store_pair(&h.storage);
    h.session.hydrate();

    h.session.sign_out().await;

    assert!(h.storage.is_empty());
    assert!(h.session.user().is_none());
}

#[tokio::test]
async fn subscribers_observe_sign_in() {
    let h = harness(MockAuthApi::default());
    h.session.hydrate();
    let mut rx = h.session.subscribe();

    h.session.sign_in("alice@example.com", "secret").await.unwrap();

    assert!(rx.has_changed().unwrap());
    assert_eq!(rx.borrow_and_update().user.as_ref().map(|u| u.id), Some(1));
}
