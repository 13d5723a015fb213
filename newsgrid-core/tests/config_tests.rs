use std::time::Duration;

use newsgrid_core::{AppConfig, DEFAULT_ENDPOINT, DEFAULT_QUERY};

#[test]
fn defaults_match_the_dashboard() {
    let config = AppConfig::default();
    assert_eq!(config.ui.default_query, DEFAULT_QUERY);
    assert_eq!(config.ui.summary_rows, 3);

    let fetch = config.feed.to_fetch_config();
    assert_eq!(fetch.endpoint, DEFAULT_ENDPOINT);
    assert_eq!(fetch.cache_ttl, Duration::from_secs(300));
    assert_eq!(fetch.request_timeout, Duration::from_secs(5));
    assert_eq!(fetch.locale.ceid, "JP:ja");
}

#[test]
fn partial_file_keeps_remaining_defaults() {
    let config = AppConfig::from_json(
        r#"{ "feed": { "cache_ttl_seconds": 60, "hl": "en-US", "gl": "US", "ceid": "US:en" } }"#,
    )
    .unwrap();

    let fetch = config.feed.to_fetch_config();
    assert_eq!(fetch.cache_ttl, Duration::from_secs(60));
    assert_eq!(fetch.locale.hl, "en-US");
    assert_eq!(fetch.request_timeout, Duration::from_secs(5));
    assert_eq!(config.ui.default_query, DEFAULT_QUERY);
}

#[test]
fn invalid_json_is_an_error() {
    assert!(AppConfig::from_json("{ not json").is_err());
}

#[test]
fn load_from_reads_a_file() {
    let mut path = std::env::temp_dir();
    path.push(format!(
        "newsgrid_config_{}.json",
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap()
            .as_nanos()
    ));
    std::fs::write(&path, r#"{ "ui": { "default_query": "Tesla" } }"#).unwrap();

    let config = AppConfig::load_from(&path).unwrap();
    assert_eq!(config.ui.default_query, "Tesla");

    let _ = std::fs::remove_file(&path);
}
