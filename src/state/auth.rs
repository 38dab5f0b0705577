//! Auth Session Cache: the signed-in user for the lifetime of the app.
//!
//! SYSTEM CONTEXT
//! ==============
//! One [`AuthSession`] is created at startup and shared as
//! `Arc<AuthSession>` with every consumer (route guards, the registration
//! flow, the CLI). Consumers read [`AuthState`] snapshots or subscribe to
//! changes; only `sign_in`, `sign_up` and `sign_out` mutate it.
//!
//! DESIGN
//! ======
//! The token and user are persisted under `authToken` and `user` in local
//! storage. Both keys are always written together and cleared together, so
//! "token present implies user present" holds for anything reading storage.
//! Hydration repairs a store where only one key survived.
//!
//! ERROR HANDLING
//! ==============
//! Failures never leave partial state. Validation and collaborator errors
//! are reported with a destructive toast and returned to the caller; the
//! previous user is kept.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use std::sync::Arc;

use tokio::sync::watch;

use crate::error::{ApiError, StorageError};
use crate::forms::{FormError, SignInForm, SignUpForm};
use crate::net::api::AuthApi;
use crate::net::types::{AuthResponse, User};
use crate::storage::{AUTH_TOKEN_KEY, Storage, USER_KEY};
use crate::toast::{Toast, Toaster};

/// Authentication state tracking the current user and loading status.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AuthState {
    pub user: Option<User>,
    pub loading: bool,
}

/// Optional profile data collected at sign-up.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SignUpProfile {
    pub username: Option<String>,
}

#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error(transparent)]
    Form(#[from] FormError),
    #[error(transparent)]
    Api(#[from] ApiError),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

pub struct AuthSession {
    api: Arc<dyn AuthApi>,
    storage: Arc<dyn Storage>,
    toaster: Arc<dyn Toaster>,
    state: watch::Sender<AuthState>,
}

impl std::fmt::Debug for AuthSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthSession").field("state", &*self.state.borrow()).finish_non_exhaustive()
    }
}

impl AuthSession {
    /// New session in the loading state. Call [`AuthSession::hydrate`] once.
    #[must_use]
    pub fn new(api: Arc<dyn AuthApi>, storage: Arc<dyn Storage>, toaster: Arc<dyn Toaster>) -> Self {
        let (state, _) = watch::channel(AuthState { user: None, loading: true });
        Self { api, storage, toaster, state }
    }

    /// Restore the user persisted by a previous run.
    ///
    /// A lone token, a lone user, or an unparseable user record is treated
    /// as signed out and both keys are removed.
    pub fn hydrate(&self) {
        let token = self.storage.get_item(AUTH_TOKEN_KEY);
        let stored_user = self.storage.get_item(USER_KEY);

        let user = match (token, stored_user) {
            (Some(_), Some(raw)) => match serde_json::from_str::<User>(&raw) {
                Ok(user) => Some(user),
                Err(e) => {
                    tracing::warn!(error = %e, "stored user is corrupt; clearing session");
                    None
                }
            },
            (None, None) => None,
            _ => {
                tracing::warn!("stored session incomplete; clearing session");
                None
            }
        };

        if user.is_none() {
            self.clear_storage();
        }
        self.state.send_replace(AuthState { user, loading: false });
    }

    #[must_use]
    pub fn snapshot(&self) -> AuthState {
        self.state.borrow().clone()
    }

    #[must_use]
    pub fn user(&self) -> Option<User> {
        self.state.borrow().user.clone()
    }

    #[must_use]
    pub fn loading(&self) -> bool {
        self.state.borrow().loading
    }

    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.state.borrow().user.is_some()
    }

    /// Persisted bearer token, if signed in.
    #[must_use]
    pub fn token(&self) -> Option<String> {
        self.storage.get_item(AUTH_TOKEN_KEY)
    }

    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<AuthState> {
        self.state.subscribe()
    }

    // =========================================================================
    // MUTATIONS
    // =========================================================================

    /// # Errors
    ///
    /// Returns the collaborator's rejection or a storage failure. The
    /// current user is left unchanged.
    pub async fn sign_in(&self, email: &str, password: &str) -> Result<User, AuthError> {
        let result = match self.api.login(email, password).await {
            Ok(response) => self.accept(response),
            Err(e) => Err(e.into()),
        };
        match result {
            Ok(user) => {
                self.toaster.toast(Toast::info("Signed in successfully", "Welcome back!"));
                Ok(user)
            }
            Err(e) => {
                tracing::warn!(error = %e, "sign in failed");
                self.toaster.toast(Toast::destructive("Sign in failed", e.to_string()));
                Err(e)
            }
        }
    }

    /// # Errors
    ///
    /// Returns the collaborator's rejection or a storage failure. The
    /// current user is left unchanged.
    pub async fn sign_up(&self, email: &str, password: &str, profile: SignUpProfile) -> Result<User, AuthError> {
        let result = match self.api.register(email, password, profile.username.as_deref()).await {
            Ok(response) => self.accept(response),
            Err(e) => Err(e.into()),
        };
        match result {
            Ok(user) => {
                self.toaster.toast(Toast::info("Account created successfully", "Welcome to Eventify!"));
                Ok(user)
            }
            Err(e) => {
                tracing::warn!(error = %e, "sign up failed");
                self.toaster.toast(Toast::destructive("Registration failed", e.to_string()));
                Err(e)
            }
        }
    }

    /// Validate the login form, then sign in.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::Form`] without calling the backend when the form
    /// is incomplete, otherwise whatever [`AuthSession::sign_in`] returns.
    pub async fn sign_in_with_form(&self, form: &SignInForm) -> Result<User, AuthError> {
        self.validated(form.validate())?;
        self.sign_in(form.email.trim(), &form.password).await
    }

    /// Validate the sign-up form, then create the account with the entered
    /// name as username.
    ///
    /// # Errors
    ///
    /// Returns [`AuthError::Form`] without calling the backend when the form
    /// is invalid, otherwise whatever [`AuthSession::sign_up`] returns.
    pub async fn sign_up_with_form(&self, form: &SignUpForm) -> Result<User, AuthError> {
        self.validated(form.validate())?;
        let profile = SignUpProfile { username: Some(form.name.trim().to_owned()) };
        self.sign_up(form.email.trim(), &form.password, profile).await
    }

    /// Sign out. The remote logout is best-effort; local state is always
    /// cleared.
    pub async fn sign_out(&self) {
        if self.token().is_some() {
            if let Err(e) = self.api.logout().await {
                tracing::warn!(error = %e, "remote logout failed; clearing local session anyway");
            }
        }
        self.clear_storage();
        self.state.send_modify(|state| {
            state.user = None;
            state.loading = false;
        });
        self.toaster.toast(Toast::info("Signed out", "You have been signed out successfully"));
    }

    // =========================================================================
    // INTERNALS
    // =========================================================================

    fn validated(&self, result: Result<(), FormError>) -> Result<(), AuthError> {
        result.map_err(|e| {
            self.toaster.toast(Toast::destructive("Error", e.to_string()));
            AuthError::Form(e)
        })
    }

    /// Persist the credential pair, then publish the user. A failed write
    /// clears both keys and leaves the published user untouched.
    fn accept(&self, response: AuthResponse) -> Result<User, AuthError> {
        let AuthResponse { access_token, user } = response;
        let encoded = serde_json::to_string(&user).map_err(StorageError::from)?;
        let written = self
            .storage
            .set_item(AUTH_TOKEN_KEY, &access_token)
            .and_then(|()| self.storage.set_item(USER_KEY, &encoded));
        if let Err(e) = written {
            self.clear_storage();
            return Err(e.into());
        }
        self.state.send_modify(|state| {
            state.user = Some(user.clone());
            state.loading = false;
        });
        Ok(user)
    }

    fn clear_storage(&self) {
        for key in [AUTH_TOKEN_KEY, USER_KEY] {
            if let Err(e) = self.storage.remove_item(key) {
                tracing::warn!(key, error = %e, "failed to clear stored session");
            }
        }
    }
}
