//! Command-line arguments and their mapping onto a session config.

use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use parley_config::{ParleyConfig, ReasoningSetting};
use parley_core::{ReasoningMode, SessionConfig};

#[derive(Debug, Parser)]
#[command(
    name = "parley",
    version,
    about = "Send a prompt through a session-based chat backend and print an OpenAI-style reply"
)]
pub struct Args {
    /// Config file (default: <config dir>/parley/config.toml).
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// tracing filter directive, e.g. `parley_core=debug`.
    #[arg(long)]
    pub log_level: Option<String>,

    /// Model to request; append `-think` for extended reasoning.
    #[arg(short, long)]
    pub model: Option<String>,

    /// Print one aggregated response instead of streaming chunks.
    #[arg(long)]
    pub no_stream: bool,

    /// Text file sent inline as conversation context.
    #[arg(long, value_name = "PATH")]
    pub context_file: Option<PathBuf>,

    /// Attachment as a `data:<type>;base64,<payload>` URI.
    #[arg(long = "attach", value_name = "DATA_URI")]
    pub attach: Vec<String>,

    /// Attachment read from a local file.
    #[arg(long = "attach-file", value_name = "PATH")]
    pub attach_file: Vec<PathBuf>,

    /// Leave the conversation on the backend afterwards.
    #[arg(long)]
    pub keep: bool,

    /// Prompt text, or `-` to read it from stdin.
    pub prompt: String,
}

impl Args {
    pub fn streaming(&self, config: &ParleyConfig) -> bool {
        config.session.stream && !self.no_stream
    }

    pub fn delete_after(&self, config: &ParleyConfig) -> bool {
        config.session.delete_after_completion && !self.keep
    }
}

fn reasoning_mode(setting: ReasoningSetting) -> Option<ReasoningMode> {
    match setting {
        ReasoningSetting::Unset => None,
        ReasoningSetting::Off => Some(ReasoningMode::Off),
        ReasoningSetting::Extended => Some(ReasoningMode::Extended),
    }
}

/// Build the core session config from the file config, with an optional
/// model override from the command line.
pub fn session_config(config: &ParleyConfig, model: Option<&str>) -> SessionConfig {
    let backend = &config.backend;
    let session = &config.session;

    let mut out = SessionConfig::new(backend.session_key.clone())
        .with_base_url(backend.base_url.clone())
        .with_model(model.unwrap_or(session.model.as_str()))
        .with_reasoning(reasoning_mode(session.reasoning))
        .with_locale(session.locale.clone(), session.timezone.clone())
        .with_timeouts(
            Duration::from_secs(u64::from(backend.connect_timeout_secs)),
            Duration::from_secs(u64::from(backend.request_timeout_secs)),
        )
        .with_user_agent(backend.user_agent.clone());

    if !backend.session_data.is_empty() {
        out = out.with_session_data(backend.session_data.clone());
    }
    if !backend.proxy.is_empty() {
        out = out.with_proxy(backend.proxy.clone());
    }
    out
}
