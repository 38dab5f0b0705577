//! Registration Session: from viewing an offering to a confirmed seat.
//!
//! SYSTEM CONTEXT
//! ==============
//! A registration spans independently rendered pages with no server-side
//! session. [`RegistrationFlow`] covers the listing page (details dialog and
//! registration modal); [`checkout`] covers the payment page and
//! [`confirmation`] the success page. Pages hand off through routes that
//! carry only the subject id, so each later page re-resolves the subject
//! from its own list.
//!
//! DESIGN
//! ======
//! `Browsing -> DetailsOpen -> RegistrationFormOpen -> PaymentPending`.
//! "Register Now" while signed out never opens the form: the subject is
//! stashed in session storage and the caller is sent to the login page.
//! After sign-in, [`RegistrationFlow::resume_pending`] reopens the form for
//! the stashed subject. Cancelling persists nothing.

#[cfg(test)]
#[path = "mod_test.rs"]
mod mod_test;

pub mod checkout;
pub mod confirmation;

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use crate::error::StorageError;
use crate::forms::{FormError, RegistrationForm};
use crate::net::types::{Challenge, Event, RegisterEventRequest};
use crate::routes::Route;
use crate::state::auth::AuthSession;
use crate::storage::{PENDING_REGISTRATION_KEY, Storage};

// =============================================================================
// SUBJECTS
// =============================================================================

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SubjectKind {
    Event,
    Challenge,
}

impl SubjectKind {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Event => "event",
            Self::Challenge => "challenge",
        }
    }
}

/// Identity of a subject, stored in session storage as `event:1`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SubjectRef {
    pub kind: SubjectKind,
    pub id: i64,
}

impl SubjectRef {
    #[must_use]
    pub fn event(id: i64) -> Self {
        Self { kind: SubjectKind::Event, id }
    }

    #[must_use]
    pub fn challenge(id: i64) -> Self {
        Self { kind: SubjectKind::Challenge, id }
    }

    /// Backend payload recording a registration for this subject.
    #[must_use]
    pub fn to_request(self) -> RegisterEventRequest {
        match self.kind {
            SubjectKind::Event => RegisterEventRequest { event_id: Some(self.id), challenge_id: None },
            SubjectKind::Challenge => RegisterEventRequest { event_id: None, challenge_id: Some(self.id) },
        }
    }
}

impl fmt::Display for SubjectRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.kind.as_str(), self.id)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid subject reference: {0}")]
pub struct ParseSubjectRefError(String);

impl FromStr for SubjectRef {
    type Err = ParseSubjectRefError;

    /// Accepts `event:1`, `challenge:3`, and a bare id as an event.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ParseSubjectRefError(s.to_owned());
        let (kind, id) = match s.trim().split_once(':') {
            Some(("event", id)) => (SubjectKind::Event, id),
            Some(("challenge", id)) => (SubjectKind::Challenge, id),
            Some(_) => return Err(invalid()),
            None => (SubjectKind::Event, s.trim()),
        };
        let id = id.parse().map_err(|_| invalid())?;
        Ok(Self { kind, id })
    }
}

/// Event or challenge projected to the fields the registration pages show.
#[derive(Clone, Debug, PartialEq)]
pub struct RegistrationSubject {
    pub kind: SubjectKind,
    pub id: i64,
    pub title: String,
    pub description: String,
    pub organizer: String,
    pub date: String,
    pub location: String,
    pub participants: i64,
    pub price: f64,
}

impl RegistrationSubject {
    #[must_use]
    pub fn subject_ref(&self) -> SubjectRef {
        SubjectRef { kind: self.kind, id: self.id }
    }

    /// Label on the modal's submit button, e.g. `Proceed to Payment (₹499)`.
    #[must_use]
    pub fn proceed_label(&self) -> String {
        format!("Proceed to Payment (₹{})", self.price)
    }
}

impl From<&Event> for RegistrationSubject {
    fn from(event: &Event) -> Self {
        Self {
            kind: SubjectKind::Event,
            id: event.id,
            title: event.title.clone(),
            description: event.description.clone(),
            organizer: event.organizer.clone(),
            date: event.date.clone(),
            location: event.location.clone(),
            participants: event.participants,
            price: event.price,
        }
    }
}

/// Challenges have no venue or organizer of their own; the hosting college
/// stands in for both and the deadline for the date.
impl From<&Challenge> for RegistrationSubject {
    fn from(challenge: &Challenge) -> Self {
        let host = challenge.college_name.clone().unwrap_or_else(|| "Online".to_owned());
        Self {
            kind: SubjectKind::Challenge,
            id: challenge.id,
            title: challenge.title.clone(),
            description: challenge.description.clone(),
            organizer: host.clone(),
            date: challenge.deadline.clone(),
            location: host,
            participants: challenge.participants,
            price: challenge.price,
        }
    }
}

/// Look up `wanted` by kind and id; an event and a challenge may share an id.
#[must_use]
pub fn find_subject(subjects: &[RegistrationSubject], wanted: SubjectRef) -> Option<RegistrationSubject> {
    subjects.iter().find(|s| s.subject_ref() == wanted).cloned()
}

// =============================================================================
// FLOW
// =============================================================================

#[derive(Clone, Debug, PartialEq)]
pub enum RegistrationPhase {
    Browsing,
    DetailsOpen { subject: RegistrationSubject },
    RegistrationFormOpen { subject: RegistrationSubject, form: RegistrationForm },
    PaymentPending { subject: RegistrationSubject },
}

impl RegistrationPhase {
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Browsing => "browsing",
            Self::DetailsOpen { .. } => "details open",
            Self::RegistrationFormOpen { .. } => "registration form open",
            Self::PaymentPending { .. } => "payment pending",
        }
    }

    #[must_use]
    pub fn subject(&self) -> Option<&RegistrationSubject> {
        match self {
            Self::Browsing => None,
            Self::DetailsOpen { subject }
            | Self::RegistrationFormOpen { subject, .. }
            | Self::PaymentPending { subject } => Some(subject),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum FlowError {
    #[error("cannot {action} while {phase}")]
    InvalidTransition { action: &'static str, phase: &'static str },
    #[error(transparent)]
    Form(#[from] FormError),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Result of pressing "Register Now".
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RegisterOutcome {
    FormOpened,
    /// Signed out: the subject was stashed and the caller must navigate.
    Redirect(Route),
}

pub struct RegistrationFlow {
    auth: Arc<AuthSession>,
    session_storage: Arc<dyn Storage>,
    phase: RegistrationPhase,
}

impl fmt::Debug for RegistrationFlow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegistrationFlow").field("phase", &self.phase).finish_non_exhaustive()
    }
}

impl RegistrationFlow {
    #[must_use]
    pub fn new(auth: Arc<AuthSession>, session_storage: Arc<dyn Storage>) -> Self {
        Self { auth, session_storage, phase: RegistrationPhase::Browsing }
    }

    #[must_use]
    pub fn phase(&self) -> &RegistrationPhase {
        &self.phase
    }

    /// Subject stashed by a signed-out "Register Now", if any.
    #[must_use]
    pub fn pending(&self) -> Option<SubjectRef> {
        let raw = self.session_storage.get_item(PENDING_REGISTRATION_KEY)?;
        match raw.parse() {
            Ok(subject) => Some(subject),
            Err(e) => {
                tracing::warn!(error = %e, "ignoring malformed pending registration");
                None
            }
        }
    }

    /// Show a subject's details. Replaces any subject already open.
    ///
    /// # Errors
    ///
    /// Returns [`FlowError::InvalidTransition`] while the registration form
    /// is open or payment is pending.
    pub fn open_details(&mut self, subject: RegistrationSubject) -> Result<(), FlowError> {
        match self.phase {
            RegistrationPhase::Browsing | RegistrationPhase::DetailsOpen { .. } => {
                self.phase = RegistrationPhase::DetailsOpen { subject };
                Ok(())
            }
            _ => Err(self.invalid("open details")),
        }
    }

    /// "Register Now" on the open subject.
    ///
    /// # Errors
    ///
    /// Returns [`FlowError::InvalidTransition`] unless details are open, or
    /// a storage error if the pending subject cannot be stashed.
    pub fn register_now(&mut self) -> Result<RegisterOutcome, FlowError> {
        let RegistrationPhase::DetailsOpen { subject } = &self.phase else {
            return Err(self.invalid("register"));
        };

        if !self.auth.is_authenticated() {
            let subject_ref = subject.subject_ref();
            self.session_storage.set_item(PENDING_REGISTRATION_KEY, &subject_ref.to_string())?;
            tracing::info!(subject = %subject_ref, "registration requires sign-in; stashed pending subject");
            return Ok(RegisterOutcome::Redirect(Route::Login));
        }

        let subject = subject.clone();
        self.phase = RegistrationPhase::RegistrationFormOpen { subject, form: RegistrationForm::default() };
        Ok(RegisterOutcome::FormOpened)
    }

    /// Reopen the registration form for a subject stashed before sign-in.
    ///
    /// Runs on every page mount. Does nothing while signed out or when
    /// nothing is stashed. The stash is consumed once a signed-in user
    /// resumes it, even if `subjects` no longer contains the subject.
    ///
    /// # Errors
    ///
    /// Returns a storage error if the stash cannot be cleared.
    pub fn resume_pending<I>(&mut self, subjects: I) -> Result<Option<SubjectRef>, FlowError>
    where
        I: IntoIterator<Item = RegistrationSubject>,
    {
        if !self.auth.is_authenticated() {
            return Ok(None);
        }
        if !matches!(self.phase, RegistrationPhase::Browsing | RegistrationPhase::DetailsOpen { .. }) {
            return Ok(None);
        }
        let Some(pending) = self.pending() else {
            return Ok(None);
        };
        self.session_storage.remove_item(PENDING_REGISTRATION_KEY)?;

        let Some(subject) = subjects.into_iter().find(|s| s.subject_ref() == pending) else {
            tracing::warn!(subject = %pending, "pending registration subject no longer listed");
            return Ok(None);
        };
        self.phase = RegistrationPhase::RegistrationFormOpen { subject, form: RegistrationForm::default() };
        Ok(Some(pending))
    }

    /// Registration form being edited, while open.
    pub fn form_mut(&mut self) -> Option<&mut RegistrationForm> {
        match &mut self.phase {
            RegistrationPhase::RegistrationFormOpen { form, .. } => Some(form),
            _ => None,
        }
    }

    /// Submit the registration form and move on to payment.
    ///
    /// The route carries only the id; the subject's kind stays in the
    /// `PaymentPending` phase for callers resolving the payment page.
    ///
    /// # Errors
    ///
    /// Returns [`FlowError::Form`] with the form left open when validation
    /// fails, or [`FlowError::InvalidTransition`] if the form is not open.
    pub fn submit(&mut self) -> Result<Route, FlowError> {
        let RegistrationPhase::RegistrationFormOpen { subject, form } = &self.phase else {
            return Err(self.invalid("submit"));
        };
        form.validate()?;
        let subject = subject.clone();
        let route = Route::Payment(subject.id);
        tracing::info!(subject = %subject.subject_ref(), team_size = form.team_size, "registration submitted");
        self.phase = RegistrationPhase::PaymentPending { subject };
        Ok(route)
    }

    /// Close the topmost dialog. Nothing is persisted.
    pub fn cancel(&mut self) {
        self.phase = match std::mem::replace(&mut self.phase, RegistrationPhase::Browsing) {
            RegistrationPhase::RegistrationFormOpen { subject, .. } => RegistrationPhase::DetailsOpen { subject },
            RegistrationPhase::DetailsOpen { .. } | RegistrationPhase::Browsing => RegistrationPhase::Browsing,
            pending @ RegistrationPhase::PaymentPending { .. } => pending,
        };
    }

    fn invalid(&self, action: &'static str) -> FlowError {
        FlowError::InvalidTransition { action, phase: self.phase.name() }
    }
}
