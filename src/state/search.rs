//! Search Coordinator: debounced search across events and colleges.
//!
//! DESIGN
//! ======
//! Input updates [`SearchState::query`] immediately. Queries shorter than the
//! minimum clear the results and close the dropdown without touching the
//! catalog. Longer queries arm a debounce timer; each keystroke aborts the
//! previous timer so a burst of typing produces one evaluation with the
//! final text.
//!
//! Every input bumps a generation counter. An evaluation captures the
//! generation it was issued for and its results are applied only if that
//! generation is still current, so a slow fetch for an old query can never
//! overwrite a newer one. The check and the state write happen under the
//! same `watch` lock as the bump.
//!
//! ERROR HANDLING
//! ==============
//! A failed fetch is logged and shown as an empty result set. Raw errors
//! never reach the dropdown.

#[cfg(test)]
#[path = "search_test.rs"]
mod search_test;

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use tokio::sync::watch;

use crate::catalog::{Collection, college_matches, event_matches};
use crate::config::SearchConfig;
use crate::net::types::{College, Event};
use crate::routes::Route;
use crate::util::task::TaskGuard;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ResultKind {
    Event,
    College,
}

/// One dropdown row. Lives only as long as the query that produced it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SearchResult {
    pub id: i64,
    pub title: String,
    pub kind: ResultKind,
    pub description: Option<String>,
    pub location: Option<String>,
    pub date: Option<String>,
}

impl SearchResult {
    #[must_use]
    pub fn route(&self) -> Route {
        match self.kind {
            ResultKind::Event => Route::EventDetails(self.id),
            ResultKind::College => Route::CollegeDetails(self.id),
        }
    }
}

impl From<&Event> for SearchResult {
    fn from(event: &Event) -> Self {
        Self {
            id: event.id,
            title: event.title.clone(),
            kind: ResultKind::Event,
            description: Some(event.description.clone()),
            location: Some(event.location.clone()),
            date: Some(event.date.clone()),
        }
    }
}

impl From<&College> for SearchResult {
    fn from(college: &College) -> Self {
        Self {
            id: college.id,
            title: college.name.clone(),
            kind: ResultKind::College,
            description: college.description.clone(),
            location: Some(format!("{}, {}", college.location, college.state)),
            date: None,
        }
    }
}

/// What the search box and dropdown render.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SearchState {
    pub query: String,
    pub results: Vec<SearchResult>,
    pub open: bool,
}

/// Filter both lists, keep at most `limit` of each, events first.
#[must_use]
pub fn merge_results(events: &[Event], colleges: &[College], query: &str, limit: usize) -> Vec<SearchResult> {
    let events = events.iter().filter(|e| event_matches(e, query)).take(limit).map(SearchResult::from);
    let colleges = colleges.iter().filter(|c| college_matches(c, query)).take(limit).map(SearchResult::from);
    events.chain(colleges).collect()
}

// =============================================================================
// COORDINATOR
// =============================================================================

struct Shared {
    events: Arc<dyn Collection<Event>>,
    colleges: Arc<dyn Collection<College>>,
    config: SearchConfig,
    generation: AtomicU64,
    state: watch::Sender<SearchState>,
}

pub struct SearchCoordinator {
    shared: Arc<Shared>,
    pending: Mutex<Option<TaskGuard<()>>>,
}

impl std::fmt::Debug for SearchCoordinator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SearchCoordinator")
            .field("state", &*self.shared.state.borrow())
            .field("generation", &self.shared.generation.load(Ordering::SeqCst))
            .finish_non_exhaustive()
    }
}

impl SearchCoordinator {
    #[must_use]
    pub fn new(
        events: Arc<dyn Collection<Event>>,
        colleges: Arc<dyn Collection<College>>,
        config: SearchConfig,
    ) -> Self {
        let (state, _) = watch::channel(SearchState::default());
        let shared = Shared { events, colleges, config, generation: AtomicU64::new(0), state };
        Self { shared: Arc::new(shared), pending: Mutex::new(None) }
    }

    #[must_use]
    pub fn snapshot(&self) -> SearchState {
        self.shared.state.borrow().clone()
    }

    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<SearchState> {
        self.shared.state.subscribe()
    }

    /// Handle a keystroke. Must be called from within a Tokio runtime.
    pub fn set_query(&self, query: impl Into<String>) {
        let query = query.into();
        self.cancel_pending();

        let short = query.trim().chars().count() < self.shared.config.min_query_len;
        let generation = self.shared.update(|state| {
            state.query.clone_from(&query);
            if short {
                state.results.clear();
                state.open = false;
            }
        });
        if short {
            return;
        }

        let shared = Arc::clone(&self.shared);
        let handle = tokio::spawn(async move {
            tokio::time::sleep(shared.config.debounce).await;
            // Detached so a later keystroke aborts only the timer; the
            // in-flight fetch finishes and is discarded by generation.
            tokio::spawn(async move { shared.evaluate(generation, query).await });
        });
        *self.lock_pending() = Some(TaskGuard::new(handle));
    }

    /// Evaluate the current query now, skipping the debounce (Enter key).
    pub async fn search_now(&self) {
        self.cancel_pending();
        let query = self.shared.state.borrow().query.clone();
        if query.trim().chars().count() < self.shared.config.min_query_len {
            return;
        }
        let generation = self.shared.update(|_| {});
        self.shared.evaluate(generation, query).await;
    }

    /// Navigate to a result: clears the query and closes the dropdown.
    pub fn select(&self, result: &SearchResult) -> Route {
        self.cancel_pending();
        self.shared.update(|state| *state = SearchState::default());
        result.route()
    }

    /// Outside click: close the dropdown, keep the query. A pending timer or
    /// in-flight fetch does not reopen it.
    pub fn dismiss(&self) {
        self.cancel_pending();
        self.shared.state.send_if_modified(|state| {
            self.shared.generation.fetch_add(1, Ordering::SeqCst);
            std::mem::replace(&mut state.open, false)
        });
    }

    fn cancel_pending(&self) {
        if let Some(timer) = self.lock_pending().take() {
            timer.abort();
        }
    }

    fn lock_pending(&self) -> std::sync::MutexGuard<'_, Option<TaskGuard<()>>> {
        self.pending.lock().unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}

impl Drop for SearchCoordinator {
    fn drop(&mut self) {
        // Invalidate any in-flight evaluation; the timer guard aborts itself.
        self.shared.generation.fetch_add(1, Ordering::SeqCst);
    }
}

impl Shared {
    /// Apply `f` and issue a new generation under the state lock.
    fn update(&self, f: impl FnOnce(&mut SearchState)) -> u64 {
        let mut generation = 0;
        self.state.send_modify(|state| {
            generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
            f(state);
        });
        generation
    }

    async fn evaluate(&self, generation: u64, query: String) {
        let (events, colleges) = tokio::join!(self.events.get_all(), self.colleges.get_all());
        let results = match (events, colleges) {
            (Ok(events), Ok(colleges)) => merge_results(&events, &colleges, query.trim(), self.config.per_kind_limit),
            (Err(e), _) | (_, Err(e)) => {
                tracing::warn!(error = %e, query = %query, "search fetch failed");
                Vec::new()
            }
        };

        let applied = self.state.send_if_modified(|state| {
            if self.generation.load(Ordering::SeqCst) != generation {
                return false;
            }
            state.results = results;
            state.open = true;
            true
        });
        if !applied {
            tracing::debug!(generation, query = %query, "discarding stale search results");
        }
    }
}
