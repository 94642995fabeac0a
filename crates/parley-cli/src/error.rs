use parley_common::ConfigError;
use parley_core::SessionError;

#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error("config error: {0}")]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Session(#[from] SessionError),
    #[error("{0}")]
    Input(String),
}

impl CliError {
    /// Process exit status: 2 for rate limiting, 1 for everything else.
    pub fn exit_status(&self) -> u8 {
        match self {
            CliError::Session(SessionError::RateLimited) => 2,
            _ => 1,
        }
    }
}
