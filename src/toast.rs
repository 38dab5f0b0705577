//! Transient user notifications.
//!
//! SYSTEM CONTEXT
//! ==============
//! Auth and registration flows report outcomes as toasts instead of returning
//! display strings, so every front end (terminal, browser, tests) decides how
//! to surface them by supplying a [`Toaster`].

#[cfg(test)]
#[path = "toast_test.rs"]
mod toast_test;

use std::sync::Mutex;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ToastVariant {
    #[default]
    Default,
    /// Failure styling; the description carries the error message.
    Destructive,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Toast {
    pub title: String,
    pub description: String,
    pub variant: ToastVariant,
}

impl Toast {
    #[must_use]
    pub fn info(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self { title: title.into(), description: description.into(), variant: ToastVariant::Default }
    }

    #[must_use]
    pub fn destructive(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self { title: title.into(), description: description.into(), variant: ToastVariant::Destructive }
    }

    #[must_use]
    pub fn is_destructive(&self) -> bool {
        self.variant == ToastVariant::Destructive
    }
}

/// Sink for toasts.
pub trait Toaster: Send + Sync {
    fn toast(&self, toast: Toast);
}

/// Records every toast in order.
#[derive(Debug, Default)]
pub struct ToastLog {
    toasts: Mutex<Vec<Toast>>,
}

impl ToastLog {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of all toasts seen so far.
    #[must_use]
    pub fn toasts(&self) -> Vec<Toast> {
        self.toasts.lock().unwrap_or_else(std::sync::PoisonError::into_inner).clone()
    }

    #[must_use]
    pub fn last(&self) -> Option<Toast> {
        self.toasts
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .last()
            .cloned()
    }

    /// Remove and return all recorded toasts.
    pub fn drain(&self) -> Vec<Toast> {
        std::mem::take(&mut *self.toasts.lock().unwrap_or_else(std::sync::PoisonError::into_inner))
    }
}

impl Toaster for ToastLog {
    fn toast(&self, toast: Toast) {
        self.toasts
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .push(toast);
    }
}

/// Forwards toasts to `tracing`.
#[derive(Clone, Copy, Debug, Default)]
pub struct TracingToaster;

impl Toaster for TracingToaster {
    fn toast(&self, toast: Toast) {
        match toast.variant {
            ToastVariant::Default => tracing::info!(title = %toast.title, "{}", toast.description),
            ToastVariant::Destructive => tracing::warn!(title = %toast.title, "{}", toast.description),
        }
    }
}
