use serde::{Deserialize, Serialize};

/// Log level.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum LogLevel {
    Debug,
    #[default]
    Info,
    Warning,
    Error,
}

impl LogLevel {
    /// `tracing` filter directive for the parley crates at this level.
    pub fn directive(self) -> &'static str {
        match self {
            LogLevel::Debug => "parley_cli=debug,parley_core=debug,parley_config=debug",
            LogLevel::Info => "parley_cli=info,parley_core=info,parley_config=info",
            LogLevel::Warning => "parley_cli=warn,parley_core=warn,parley_config=warn",
            LogLevel::Error => "parley_cli=error,parley_core=error,parley_config=error",
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: LogLevel,
}
