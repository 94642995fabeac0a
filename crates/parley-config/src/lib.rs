//! Parley configuration system.
//!
//! TOML-based configuration for the backend transport, the session
//! defaults, and logging. All sections use serde defaults so partial
//! configs work out of the box; secrets may come from the environment.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use parley_config::{load_config, config_to_json};
//!
//! let config = load_config(None).expect("failed to load config");
//! println!("{}", config_to_json(&config));
//! ```

pub mod schema;
pub mod toml_loader;
pub mod validation;

pub use schema::{
    BackendConfig, LogLevel, LoggingConfig, ParleyConfig, ReasoningSetting, SessionSettings,
    CONFIG_SCHEMA_VERSION,
};

use std::path::Path;

use parley_common::ConfigError;

/// Load config from `path`, or from the platform default path when `None`.
///
/// Environment overrides are applied after the file is read, then the
/// result is validated.
pub fn load_config(path: Option<&Path>) -> Result<ParleyConfig, ConfigError> {
    let mut config = match path {
        Some(path) => {
            if !path.exists() {
                return Err(ConfigError::FileNotFound(path.to_path_buf()));
            }
            toml_loader::load_from_path(path)?
        }
        None => toml_loader::load_default()?,
    };

    toml_loader::apply_env_overrides(&mut config);
    validation::validate(&config)?;
    Ok(config)
}

/// Serialize a config to a pretty-printed JSON string with secrets redacted.
pub fn config_to_json(config: &ParleyConfig) -> String {
    let mut redacted = config.clone();
    if !redacted.backend.session_key.is_empty() {
        redacted.backend.session_key = "[REDACTED]".into();
    }
    if !redacted.backend.session_data.is_empty() {
        redacted.backend.session_data = "[REDACTED]".into();
    }
    serde_json::to_string_pretty(&redacted)
        .unwrap_or_else(|e| format!("{{\"error\": \"failed to serialize config: {e}\"}}"))
}
