//! Where the config file lives, and writing the initial one.

use std::path::{Path, PathBuf};

use parley_common::ConfigError;
use tracing::info;

use super::template::default_config_toml;

/// Directory under the platform config dir that holds `config.toml`.
pub const APP_DIR: &str = "parley";
pub const CONFIG_FILE: &str = "config.toml";

/// `<platform config dir>/parley/config.toml`.
pub fn default_config_path() -> Result<PathBuf, ConfigError> {
    dirs::config_dir()
        .map(|dir| dir.join(APP_DIR).join(CONFIG_FILE))
        .ok_or_else(|| ConfigError::ParseError("no platform config directory".into()))
}

/// Write the commented template to `path`, creating parent directories.
pub fn create_default_config(path: &Path) -> Result<(), ConfigError> {
    let io_err = |what: &str, p: &Path, e: std::io::Error| {
        ConfigError::ParseError(format!("cannot {what} {}: {e}", p.display()))
    };

    if let Some(dir) = path.parent() {
        std::fs::create_dir_all(dir).map_err(|e| io_err("create", dir, e))?;
    }
    std::fs::write(path, default_config_toml()).map_err(|e| io_err("write", path, e))?;

    info!(path = %path.display(), "default config written");
    Ok(())
}
