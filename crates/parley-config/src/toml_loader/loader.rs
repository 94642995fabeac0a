//! Reading a config file, or the default one.

use std::path::Path;

use parley_common::ConfigError;
use tracing::{info, warn};

use super::paths::{create_default_config, default_config_path};
use crate::schema::ParleyConfig;
use crate::validation;

/// Parse the TOML file at `path`. Missing fields take their defaults.
///
/// A config that fails validation is still returned; the problems are
/// logged so a half-edited file does not stop the process here.
pub fn load_from_path(path: &Path) -> Result<ParleyConfig, ConfigError> {
    let text = std::fs::read_to_string(path)
        .map_err(|e| ConfigError::ParseError(format!("cannot read {}: {e}", path.display())))?;
    let config = parse(&text)?;

    if let Err(e) = validation::validate(&config) {
        warn!(path = %path.display(), "config has invalid values: {e}");
    }
    info!(path = %path.display(), "config loaded");
    Ok(config)
}

/// Load `<config dir>/parley/config.toml`, writing the commented template
/// there first if no file exists yet.
pub fn load_default() -> Result<ParleyConfig, ConfigError> {
    let path = default_config_path()?;
    if !path.exists() {
        info!(path = %path.display(), "no config file, writing template");
        create_default_config(&path)?;
        return Ok(ParleyConfig::default());
    }
    load_from_path(&path)
}

pub(crate) fn parse(text: &str) -> Result<ParleyConfig, ConfigError> {
    toml::from_str(text).map_err(|e| ConfigError::ParseError(format!("invalid TOML: {e}")))
}
