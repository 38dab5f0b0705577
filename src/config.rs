//! Client configuration loaded from environment variables.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_API_URL: &str = "http://localhost:5000/api";
const DEFAULT_SEARCH_DEBOUNCE_MS: u64 = 300;
const DEFAULT_PAYMENT_DELAY_MS: u64 = 2000;
const STATE_DIR_NAME: &str = ".eventify";

/// Queries shorter than this clear the dropdown without touching the catalog.
pub const MIN_QUERY_LEN: usize = 2;
/// Each result kind is truncated to this many entries.
pub const PER_KIND_LIMIT: usize = 5;

pub(crate) fn env_parse<T>(key: &str, default: T) -> T
where
    T: std::str::FromStr + Copy,
{
    std::env::var(key)
        .ok()
        .and_then(|v| v.trim().parse::<T>().ok())
        .unwrap_or(default)
}

/// Top-level client settings.
#[derive(Clone, Debug)]
pub struct ClientConfig {
    /// REST base URL, without a trailing slash.
    pub api_base_url: String,
    pub search_debounce: Duration,
    pub payment_delay: Duration,
    /// Directory holding the file-backed local and session storage.
    pub state_dir: PathBuf,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_URL.to_owned(),
            search_debounce: Duration::from_millis(DEFAULT_SEARCH_DEBOUNCE_MS),
            payment_delay: Duration::from_millis(DEFAULT_PAYMENT_DELAY_MS),
            state_dir: PathBuf::from(STATE_DIR_NAME),
        }
    }
}

impl ClientConfig {
    /// Load from `EVENTIFY_API_URL`, `EVENTIFY_SEARCH_DEBOUNCE_MS`,
    /// `EVENTIFY_PAYMENT_DELAY_MS` and `EVENTIFY_STATE_DIR`.
    #[must_use]
    pub fn from_env() -> Self {
        let api_base_url = std::env::var("EVENTIFY_API_URL")
            .ok()
            .map(|url| normalize_base_url(&url))
            .filter(|url| !url.is_empty())
            .unwrap_or_else(|| DEFAULT_API_URL.to_owned());

        let state_dir = std::env::var("EVENTIFY_STATE_DIR")
            .ok()
            .filter(|dir| !dir.trim().is_empty())
            .map_or_else(default_state_dir, PathBuf::from);

        Self {
            api_base_url,
            search_debounce: Duration::from_millis(env_parse(
                "EVENTIFY_SEARCH_DEBOUNCE_MS",
                DEFAULT_SEARCH_DEBOUNCE_MS,
            )),
            payment_delay: Duration::from_millis(env_parse("EVENTIFY_PAYMENT_DELAY_MS", DEFAULT_PAYMENT_DELAY_MS)),
            state_dir,
        }
    }

    #[must_use]
    pub fn search(&self) -> SearchConfig {
        SearchConfig { debounce: self.search_debounce, ..SearchConfig::default() }
    }
}

/// Tuning for the Search Coordinator.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SearchConfig {
    pub debounce: Duration,
    pub min_query_len: usize,
    pub per_kind_limit: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            debounce: Duration::from_millis(DEFAULT_SEARCH_DEBOUNCE_MS),
            min_query_len: MIN_QUERY_LEN,
            per_kind_limit: PER_KIND_LIMIT,
        }
    }
}

fn normalize_base_url(url: &str) -> String {
    url.trim().trim_end_matches('/').to_owned()
}

fn default_state_dir() -> PathBuf {
    std::env::var("HOME")
        .map(|home| PathBuf::from(home).join(STATE_DIR_NAME))
        .unwrap_or_else(|_| PathBuf::from(STATE_DIR_NAME))
}
