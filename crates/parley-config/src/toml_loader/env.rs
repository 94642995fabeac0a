//! Environment variable overrides for credentials and the backend URL.

use tracing::debug;

use crate::schema::ParleyConfig;

pub const ENV_SESSION_KEY: &str = "PARLEY_SESSION_KEY";
pub const ENV_SESSION_DATA: &str = "PARLEY_SESSION_DATA";
pub const ENV_BASE_URL: &str = "PARLEY_BASE_URL";

/// Apply overrides from the process environment.
pub fn apply_env_overrides(config: &mut ParleyConfig) {
    apply_overrides_from(config, |key| std::env::var(key).ok());
}

/// Apply overrides from an arbitrary lookup. Empty values are ignored.
pub fn apply_overrides_from(config: &mut ParleyConfig, lookup: impl Fn(&str) -> Option<String>) {
    let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

    if let Some(key) = get(ENV_SESSION_KEY) {
        debug!("session key taken from {ENV_SESSION_KEY}");
        config.backend.session_key = key;
    }
    if let Some(data) = get(ENV_SESSION_DATA) {
        debug!("session data taken from {ENV_SESSION_DATA}");
        config.backend.session_data = data;
    }
    if let Some(url) = get(ENV_BASE_URL) {
        debug!(base_url = %url, "base url taken from {ENV_BASE_URL}");
        config.backend.base_url = url;
    }
}
