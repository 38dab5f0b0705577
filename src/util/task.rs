//! Background task handles that cancel on teardown.

use tokio::task::JoinHandle;

/// Owns a spawned task and aborts it when dropped, so a timer started by a
/// page never fires after the page is gone.
#[derive(Debug)]
pub struct TaskGuard<T> {
    handle: Option<JoinHandle<T>>,
}

impl<T> TaskGuard<T> {
    #[must_use]
    pub fn new(handle: JoinHandle<T>) -> Self {
        Self { handle: Some(handle) }
    }

    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.handle.as_ref().is_none_or(JoinHandle::is_finished)
    }

    pub fn abort(&self) {
        if let Some(handle) = &self.handle {
            handle.abort();
        }
    }

    /// Wait for the task. Returns `None` if it was aborted or panicked.
    /// Dropping the returned future still aborts the task.
    pub async fn join(mut self) -> Option<T> {
        let result = self.handle.as_mut()?.await;
        self.handle = None;
        match result {
            Ok(value) => Some(value),
            Err(e) => {
                if e.is_panic() {
                    tracing::error!(error = %e, "background task panicked");
                }
                None
            }
        }
    }
}

impl<T> Drop for TaskGuard<T> {
    fn drop(&mut self) {
        self.abort();
    }
}
