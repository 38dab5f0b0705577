//! Read-only catalog access and filtering.
//!
//! DESIGN
//! ======
//! Pages and the Search Coordinator read events, colleges and challenges
//! through [`Collection`], so the same flow runs against the REST client or
//! an in-memory [`StaticCollection`]. Filtering is a flat case-insensitive
//! substring match; there is no relevance ranking and input order is kept.


pub mod sample;

use std::collections::BTreeSet;

use async_trait::async_trait;

use crate::error::ApiError;
use crate::net::types::{Challenge, College, Event};

/// Value of the category/location selects that disables the constraint.
pub const ALL: &str = "All";

// =============================================================================
// COLLECTIONS
// =============================================================================

/// Data-access facade over one entity kind.
#[async_trait]
pub trait Collection<T: Send>: Send + Sync {
    /// # Errors
    ///
    /// Returns an error if the backing source cannot be read.
    async fn get_all(&self) -> Result<Vec<T>, ApiError>;

    /// Look up one entity. Unknown ids are `Ok(None)`.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing source cannot be read.
    async fn get_by_id(&self, id: i64) -> Result<Option<T>, ApiError>;
}

/// Entities addressable by numeric id.
pub trait Identified {
    fn id(&self) -> i64;
}

impl Identified for Event {
    fn id(&self) -> i64 {
        self.id
    }
}

impl Identified for College {
    fn id(&self) -> i64 {
        self.id
    }
}

impl Identified for Challenge {
    fn id(&self) -> i64 {
        self.id
    }
}

/// Collection over a fixed in-memory list.
#[derive(Clone, Debug, Default)]
pub struct StaticCollection<T> {
    items: Vec<T>,
}

impl<T> StaticCollection<T> {
    #[must_use]
    pub fn new(items: Vec<T>) -> Self {
        Self { items }
    }

    #[must_use]
    pub fn items(&self) -> &[T] {
        &self.items
    }
}

#[async_trait]
impl<T> Collection<T> for StaticCollection<T>
where
    T: Identified + Clone + Send + Sync,
{
    async fn get_all(&self) -> Result<Vec<T>, ApiError> {
        Ok(self.items.clone())
    }

    async fn get_by_id(&self, id: i64) -> Result<Option<T>, ApiError> {
        Ok(self.items.iter().find(|item| item.id() == id).cloned())
    }
}

// =============================================================================
// SEARCH PREDICATES
// =============================================================================

fn contains_ci(haystack: &str, needle_lower: &str) -> bool {
    haystack.to_lowercase().contains(needle_lower)
}

/// Dropdown search: title, description, category or location.
#[must_use]
pub fn event_matches(event: &Event, query: &str) -> bool {
    let needle = query.to_lowercase();
    [&event.title, &event.description, &event.category, &event.location]
        .into_iter()
        .any(|field| contains_ci(field, &needle))
}

/// Dropdown search: name, short name, location, state or type.
#[must_use]
pub fn college_matches(college: &College, query: &str) -> bool {
    let needle = query.to_lowercase();
    [&college.name, &college.short_name, &college.location, &college.state]
        .into_iter()
        .any(|field| contains_ci(field, &needle))
        || college.college_type.as_deref().is_some_and(|t| contains_ci(t, &needle))
}

// =============================================================================
// PAGE FILTERS
// =============================================================================

/// Filters on the Events page.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EventFilter {
    /// Matched against title, organizer and category.
    pub term: String,
    /// Exact category, or [`ALL`].
    pub category: String,
    /// Exact location, or [`ALL`].
    pub location: String,
}

impl Default for EventFilter {
    fn default() -> Self {
        Self { term: String::new(), category: ALL.to_owned(), location: ALL.to_owned() }
    }
}

impl EventFilter {
    #[must_use]
    pub fn matches(&self, event: &Event) -> bool {
        let needle = self.term.to_lowercase();
        let term_ok = needle.is_empty()
            || [&event.title, &event.organizer, &event.category]
                .into_iter()
                .any(|field| contains_ci(field, &needle));
        term_ok && select_matches(&self.category, &event.category) && select_matches(&self.location, &event.location)
    }

    #[must_use]
    pub fn apply<'a>(&self, events: &'a [Event]) -> Vec<&'a Event> {
        events.iter().filter(|e| self.matches(e)).collect()
    }
}

fn select_matches(selected: &str, value: &str) -> bool {
    selected.is_empty() || selected == ALL || selected == value
}

/// Filters on the Colleges page. Empty state/type means no constraint.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CollegeFilter {
    pub term: String,
    pub state: String,
    pub college_type: String,
}

impl CollegeFilter {
    #[must_use]
    pub fn matches(&self, college: &College) -> bool {
        let needle = self.term.to_lowercase();
        let term_ok = [&college.name, &college.short_name, &college.location]
            .into_iter()
            .any(|field| contains_ci(field, &needle));
        let state_ok = self.state.is_empty() || college.state == self.state;
        let type_ok = self.college_type.is_empty() || college.college_type.as_deref() == Some(self.college_type.as_str());
        term_ok && state_ok && type_ok
    }

    #[must_use]
    pub fn apply<'a>(&self, colleges: &'a [College]) -> Vec<&'a College> {
        colleges.iter().filter(|c| self.matches(c)).collect()
    }
}

/// Distinct values offered by the Colleges page selects.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CollegeFacets {
    pub states: Vec<String>,
    pub types: Vec<String>,
}

/// Sorted distinct states and college types. Colleges without a type are
/// skipped for the type facet.
#[must_use]
pub fn college_facets(colleges: &[College]) -> CollegeFacets {
    let states: BTreeSet<&str> = colleges.iter().map(|c| c.state.as_str()).collect();
    let types: BTreeSet<&str> = colleges
        .iter()
        .filter_map(|c| c.college_type.as_deref())
        .filter(|t| !t.is_empty())
        .collect();
    CollegeFacets {
        states: states.into_iter().map(str::to_owned).collect(),
        types: types.into_iter().map(str::to_owned).collect(),
    }
}
