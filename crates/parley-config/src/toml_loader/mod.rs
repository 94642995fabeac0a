//! Config file discovery, parsing and environment overrides.

mod env;
mod loader;
mod paths;
mod template;


pub use env::{
    apply_env_overrides, apply_overrides_from, ENV_BASE_URL, ENV_SESSION_DATA, ENV_SESSION_KEY,
};
pub use loader::{load_default, load_from_path};
pub use paths::{create_default_config, default_config_path, APP_DIR, CONFIG_FILE};
