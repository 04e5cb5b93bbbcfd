use cdnsight_domain::config::{
    CliOverrides, Config, BLOCKLIST_REFRESH_INTERVAL, HEADER_GRACE_PERIOD,
};
use std::time::Duration;

#[test]
fn test_config_default_values() {
    let config = Config::default();

    assert_eq!(config.feed.url, "https://hayahora.futbol/estado/data.json");
    assert_eq!(config.feed.request_timeout_secs, 30);
    assert_eq!(config.resolver.endpoints.len(), 3);
    assert_eq!(
        config.resolver.endpoints[0],
        "https://cloudflare-dns.com/dns-query"
    );
    assert_eq!(config.resolver.request_timeout_secs, 5);
    assert!(config.storage.enabled);
    assert_eq!(config.storage.path, "cdnsight.db");
    assert_eq!(config.logging.level, "info");
    assert!(config.validate().is_ok());
}

#[test]
fn test_fixed_intervals() {
    assert_eq!(BLOCKLIST_REFRESH_INTERVAL, Duration::from_secs(1800));
    assert!(HEADER_GRACE_PERIOD < Duration::from_millis(100));
}

#[test]
fn test_partial_toml_keeps_defaults() {
    let config = Config::from_toml(
        r#"
        [logging]
        level = "debug"

        [resolver]
        endpoints = ["https://dns.google/resolve"]
        "#,
    )
    .unwrap();

    assert_eq!(config.logging.level, "debug");
    assert_eq!(config.resolver.endpoints, vec!["https://dns.google/resolve"]);
    assert_eq!(config.resolver.request_timeout_secs, 5);
    assert_eq!(config.feed.url, "https://hayahora.futbol/estado/data.json");
}

#[test]
fn test_invalid_toml_is_parse_error() {
    let err = Config::from_toml("[feed\nurl = 1").unwrap_err();
    assert!(err.to_string().starts_with("Failed to parse config"));
}

#[test]
fn test_validate_rejects_empty_feed_url() {
    let mut config = Config::default();
    config.feed.url = "  ".to_string();
    assert!(config.validate().is_err());
}

#[test]
fn test_validate_rejects_too_many_resolvers() {
    let mut config = Config::default();
    config
        .resolver
        .endpoints
        .push("https://doh.example/dns-query".to_string());

    let err = config.validate().unwrap_err();
    assert!(err.to_string().contains("At most 3"));
}

#[test]
fn test_validate_rejects_no_resolvers() {
    let mut config = Config::default();
    config.resolver.endpoints.clear();
    assert!(config.validate().is_err());
}

#[test]
fn test_cli_overrides_win() {
    let config = Config::load(
        None,
        CliOverrides {
            database_path: Some("/tmp/tabs.db".to_string()),
            no_storage: true,
            log_level: Some("trace".to_string()),
            feed_url: Some("http://127.0.0.1:9000/data.json".to_string()),
        },
    )
    .unwrap();

    assert_eq!(config.storage.path, "/tmp/tabs.db");
    assert!(!config.storage.enabled);
    assert_eq!(config.logging.level, "trace");
    assert_eq!(config.feed.url, "http://127.0.0.1:9000/data.json");
}

#[test]
fn test_load_missing_file_is_read_error() {
    let err = Config::load(Some("/nonexistent/cdnsight.toml"), CliOverrides::default())
        .unwrap_err();
    assert!(err.to_string().contains("/nonexistent/cdnsight.toml"));
}
