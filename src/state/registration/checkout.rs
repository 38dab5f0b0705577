//! Payment page: order summary, card entry and payment processing.
//!
//! DESIGN
//! ======
//! The page re-resolves its subject (kind and id) from its own list; unknown ones
//! send the user back to the events list. Processing sits behind
//! [`PaymentProcessor`] so the simulated delay and a real backend call are
//! interchangeable. [`spawn_payment`] ties the in-flight payment to a
//! [`TaskGuard`], so leaving the page aborts it before it can navigate.

#[cfg(test)]
#[path = "checkout_test.rs"]
mod checkout_test;

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;

use super::{RegistrationSubject, SubjectRef};
use crate::catalog::sample;
use crate::error::ApiError;
use crate::forms::{CardDetails, FormError};
use crate::net::api::RegistrationApi;
use crate::routes::Route;
use crate::toast::{Toast, Toaster};
use crate::util::task::TaskGuard;

/// Processing fee charged on top of the registration fee.
pub const PROCESSING_FEE_RATE: f64 = 0.02;

/// Amount in rupees with two decimals, e.g. `₹508.98`.
#[must_use]
pub fn format_rupees(amount: f64) -> String {
    format!("₹{amount:.2}")
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct OrderSummary {
    pub registration_fee: f64,
    pub processing_fee: f64,
    pub total: f64,
}

impl OrderSummary {
    #[must_use]
    pub fn for_price(price: f64) -> Self {
        Self { registration_fee: price, processing_fee: price * PROCESSING_FEE_RATE, total: price * (1.0 + PROCESSING_FEE_RATE) }
    }

    /// `(label, amount)` rows in display order.
    #[must_use]
    pub fn lines(&self) -> [(&'static str, String); 3] {
        [
            ("Registration Fee", format_rupees(self.registration_fee)),
            ("Processing Fee", format_rupees(self.processing_fee)),
            ("Total", format_rupees(self.total)),
        ]
    }
}

/// Subjects the payment and confirmation pages can resolve.
#[must_use]
pub fn featured_subjects() -> Vec<RegistrationSubject> {
    sample::featured_events().iter().map(RegistrationSubject::from).collect()
}

// =============================================================================
// PROCESSING
// =============================================================================

#[derive(Debug, thiserror::Error)]
pub enum PaymentError {
    #[error(transparent)]
    Form(#[from] FormError),
    #[error(transparent)]
    Api(#[from] ApiError),
}

/// What gets charged. Card data beyond the last four digits never leaves
/// the page.
#[derive(Clone, Debug, PartialEq)]
pub struct PaymentRequest {
    pub subject: SubjectRef,
    pub amount: f64,
    pub card_last4: String,
}

#[async_trait]
pub trait PaymentProcessor: Send + Sync {
    /// # Errors
    ///
    /// Returns an error if the payment is not accepted.
    async fn process(&self, payment: &PaymentRequest) -> Result<(), PaymentError>;
}

/// Accepts every payment after a fixed delay.
#[derive(Clone, Copy, Debug)]
pub struct SimulatedProcessor {
    pub delay: Duration,
}

impl Default for SimulatedProcessor {
    fn default() -> Self {
        Self { delay: Duration::from_secs(2) }
    }
}

#[async_trait]
impl PaymentProcessor for SimulatedProcessor {
    async fn process(&self, payment: &PaymentRequest) -> Result<(), PaymentError> {
        tracing::debug!(subject = %payment.subject, delay_ms = self.delay.as_millis(), "simulating payment");
        tokio::time::sleep(self.delay).await;
        Ok(())
    }
}

/// Records the registration with the backend instead of charging a card.
#[derive(Clone)]
pub struct BackendProcessor {
    api: Arc<dyn RegistrationApi>,
}

impl BackendProcessor {
    #[must_use]
    pub fn new(api: Arc<dyn RegistrationApi>) -> Self {
        Self { api }
    }
}

#[async_trait]
impl PaymentProcessor for BackendProcessor {
    async fn process(&self, payment: &PaymentRequest) -> Result<(), PaymentError> {
        self.api.register_for(payment.subject.to_request()).await?;
        Ok(())
    }
}

// =============================================================================
// CHECKOUT
// =============================================================================

#[derive(Clone, Debug, PartialEq)]
pub struct Checkout {
    subject: RegistrationSubject,
    summary: OrderSummary,
}

impl Checkout {
    /// Resolve the subject for `/payment/{id}`. Events and challenges
    /// share id ranges, so the lookup matches on kind as well.
    ///
    /// # Errors
    ///
    /// Returns [`Route::Events`] when no subject matches.
    pub fn resolve(subject: SubjectRef, subjects: &[RegistrationSubject]) -> Result<Self, Route> {
        let subject = super::find_subject(subjects, subject).ok_or(Route::Events)?;
        let summary = OrderSummary::for_price(subject.price);
        Ok(Self { subject, summary })
    }

    #[must_use]
    pub fn subject(&self) -> &RegistrationSubject {
        &self.subject
    }

    #[must_use]
    pub fn summary(&self) -> &OrderSummary {
        &self.summary
    }

    /// Validate the card, process the payment and return the success route.
    ///
    /// # Errors
    ///
    /// Returns [`PaymentError::Form`] before processing starts if a card
    /// field is blank, or the processor's error.
    pub async fn pay(
        &self,
        card: &CardDetails,
        processor: &dyn PaymentProcessor,
        toaster: &dyn Toaster,
    ) -> Result<Route, PaymentError> {
        if let Err(e) = card.validate() {
            toaster.toast(Toast::destructive("Error", e.to_string()));
            return Err(e.into());
        }

        toaster.toast(Toast::info("Processing Payment", "Please wait while we process your payment..."));
        let payment = PaymentRequest {
            subject: self.subject.subject_ref(),
            amount: self.summary.total,
            card_last4: card.last4(),
        };
        if let Err(e) = processor.process(&payment).await {
            tracing::warn!(subject = %payment.subject, error = %e, "payment failed");
            toaster.toast(Toast::destructive("Payment failed", e.to_string()));
            return Err(e);
        }
        tracing::info!(subject = %payment.subject, amount = payment.amount, "payment completed");
        Ok(Route::RegistrationSuccess(self.subject.id))
    }
}

/// Run [`Checkout::pay`] in the background. Dropping the guard (leaving the
/// page) aborts processing, so no navigation happens afterwards.
#[must_use]
pub fn spawn_payment(
    checkout: Checkout,
    card: CardDetails,
    processor: Arc<dyn PaymentProcessor>,
    toaster: Arc<dyn Toaster>,
) -> TaskGuard<Result<Route, PaymentError>> {
    TaskGuard::new(tokio::spawn(async move { checkout.pay(&card, processor.as_ref(), toaster.as_ref()).await }))
}
