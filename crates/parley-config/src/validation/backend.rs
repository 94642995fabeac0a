use crate::schema::ParleyConfig;

use super::helpers::{validate_http_url, validate_range};

/// Validate backend transport constraints.
pub(crate) fn validate_backend(errors: &mut Vec<String>, config: &ParleyConfig) {
    let backend = &config.backend;

    validate_http_url(errors, "backend.base_url", &backend.base_url);
    if backend.base_url.ends_with('/') {
        errors.push("backend.base_url must not end with '/'".into());
    }
    if !backend.proxy.is_empty() && !backend.proxy.contains("://") {
        errors.push(format!("backend.proxy = {:?} has no scheme", backend.proxy));
    }
    validate_range(
        errors,
        "backend.connect_timeout_secs",
        backend.connect_timeout_secs,
        1,
        120,
    );
    validate_range(
        errors,
        "backend.request_timeout_secs",
        backend.request_timeout_secs,
        10,
        3600,
    );
}
