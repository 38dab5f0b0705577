use super::*;

// =============================================================================
// env_parse: unique env var names avoid races with parallel tests.
// =============================================================================

#[test]
fn env_parse_reads_valid_value() {
    let key = "__TEST_EVENTIFY_PARSE_OK_311__";
    unsafe { std::env::set_var(key, " 450 ") };
    assert_eq!(env_parse(key, 300_u64), 450);
    unsafe { std::env::remove_var(key) };
}

#[test]
fn env_parse_falls_back_on_garbage() {
    let key = "__TEST_EVENTIFY_PARSE_BAD_312__";
    unsafe { std::env::set_var(key, "soon") };
    assert_eq!(env_parse(key, 300_u64), 300);
    unsafe { std::env::remove_var(key) };
}

#[test]
fn env_parse_unset_returns_default() {
    assert_eq!(env_parse("__TEST_EVENTIFY_SURELY_UNSET_313__", 7_usize), 7);
}

// =============================================================================
// defaults
// =============================================================================

#[test]
fn default_config_matches_browser_app() {
    let config = ClientConfig::default();
    assert_eq!(config.api_base_url, "http://localhost:5000/api");
    assert_eq!(config.search_debounce, Duration::from_millis(300));
    assert_eq!(config.payment_delay, Duration::from_millis(2000));
}

#[test]
fn search_config_carries_debounce() {
    let config = ClientConfig { search_debounce: Duration::from_millis(50), ..ClientConfig::default() };
    let search = config.search();
    assert_eq!(search.debounce, Duration::from_millis(50));
    assert_eq!(search.min_query_len, 2);
    assert_eq!(search.per_kind_limit, 5);
}

#[test]
fn normalize_base_url_strips_trailing_slashes() {
    assert_eq!(normalize_base_url(" http://api.test/api// "), "http://api.test/api");
}
