//! Tests for the full validation pipeline.

use super::*;

#[test]
fn default_config_validates() {
    assert!(validate(&ParleyConfig::default()).is_ok());
}

#[test]
fn catches_missing_scheme() {
    let mut config = ParleyConfig::default();
    config.backend.base_url = "claude.ai".into();
    let err = validate(&config).unwrap_err().to_string();
    assert!(err.contains("backend.base_url"));
}

#[test]
fn catches_trailing_slash() {
    let mut config = ParleyConfig::default();
    config.backend.base_url = "https://claude.ai/".into();
    let err = validate(&config).unwrap_err().to_string();
    assert!(err.contains("must not end with '/'"));
}

#[test]
fn catches_proxy_without_scheme() {
    let mut config = ParleyConfig::default();
    config.backend.proxy = "127.0.0.1:7890".into();
    let err = validate(&config).unwrap_err().to_string();
    assert!(err.contains("backend.proxy"));
}

#[test]
fn catches_timeouts_out_of_range() {
    let mut config = ParleyConfig::default();
    config.backend.connect_timeout_secs = 0;
    config.backend.request_timeout_secs = 5;
    let err = validate(&config).unwrap_err().to_string();
    assert!(err.contains("backend.connect_timeout_secs"));
    assert!(err.contains("backend.request_timeout_secs"));
}

#[test]
fn catches_empty_model() {
    let mut config = ParleyConfig::default();
    config.session.model = "  ".into();
    let err = validate(&config).unwrap_err().to_string();
    assert!(err.contains("session.model"));
}

#[test]
fn collects_multiple_errors() {
    let mut config = ParleyConfig::default();
    config.backend.base_url = String::new();
    config.session.locale = String::new();
    let err = validate(&config).unwrap_err().to_string();
    assert!(err.contains("backend.base_url"));
    assert!(err.contains("session.locale"));
    assert!(err.contains("; "));
}
