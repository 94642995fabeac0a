//! parley: send one prompt through a session-based chat backend and print
//! the reply as OpenAI chat-completion output on stdout.
//!
//! Logs go to stderr so stdout carries only the wire format.

mod cli;
mod error;
mod input;

use std::process::ExitCode;

use clap::Parser;
use parley_config::ParleyConfig;
use parley_core::{DeliveryMode, OpenAiSink, SessionClient, TranslateOutcome};
use tokio_util::sync::CancellationToken;
use tracing::{error, info, warn};

use crate::cli::{session_config, Args};
use crate::error::CliError;

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();

    let config = match parley_config::load_config(args.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("parley: {}", CliError::from(e));
            return ExitCode::FAILURE;
        }
    };

    let fallback = config.logging.level.directive();
    let filter = match args.log_level {
        Some(ref directive) => tracing_subscriber::EnvFilter::try_new(directive)
            .unwrap_or_else(|_| fallback.into()),
        None => fallback.into(),
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    if config.backend.session_key.is_empty() {
        error!("no session key configured; set backend.session_key or PARLEY_SESSION_KEY");
        return ExitCode::FAILURE;
    }

    let cancel = CancellationToken::new();
    let ctrl_c = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("interrupted");
            ctrl_c.cancel();
        }
    });

    match run(&args, &config, &cancel).await {
        Ok(TranslateOutcome::Completed) => ExitCode::SUCCESS,
        Ok(TranslateOutcome::BackendError(message)) => {
            error!(message = %message, "backend reported an error");
            ExitCode::FAILURE
        }
        Ok(TranslateOutcome::Cancelled) => ExitCode::FAILURE,
        Err(e) => {
            error!(error = %e, "request failed");
            ExitCode::from(e.exit_status())
        }
    }
}

/// One full conversation: inputs are read before anything touches the
/// backend, and the conversation is deleted on every path once created.
async fn run(
    args: &Args,
    config: &ParleyConfig,
    cancel: &CancellationToken,
) -> Result<TranslateOutcome, CliError> {
    let prompt = input::read_prompt(&args.prompt).await?;
    let context = match args.context_file {
        Some(ref path) => Some(input::read_context(path).await?),
        None => None,
    };
    let mut attachments = args.attach.clone();
    for path in &args.attach_file {
        attachments.push(input::file_data_uri(path).await?);
    }

    let mut client = SessionClient::new(session_config(config, args.model.as_deref()))?;
    client.resolve_tenant().await?;
    let conversation_id = client.create_conversation().await?;

    let result = converse(
        &mut client,
        &conversation_id,
        &prompt,
        context,
        &attachments,
        args.streaming(config),
        cancel,
    )
    .await;

    if args.delete_after(config) {
        if let Err(e) = client.delete_conversation(&conversation_id).await {
            warn!(conversation_id = %conversation_id, error = %e, "failed to delete conversation");
        }
    } else {
        info!(conversation_id = %conversation_id, "keeping conversation");
    }

    result
}

async fn converse(
    client: &mut SessionClient,
    conversation_id: &str,
    prompt: &str,
    context: Option<String>,
    attachments: &[String],
    streaming: bool,
    cancel: &CancellationToken,
) -> Result<TranslateOutcome, CliError> {
    if let Some(context) = context {
        client.set_inline_context(context);
    }
    if !attachments.is_empty() {
        let refs = client.upload_attachments(attachments).await?;
        info!(count = refs.len(), "attachments uploaded");
    }

    let mode = DeliveryMode::from_stream_flag(streaming);
    let model = client.config().model.clone();
    let mut sink = OpenAiSink::new(tokio::io::stdout(), mode, model);
    let outcome = client
        .send_message(conversation_id, prompt, &mut sink, cancel)
        .await?;
    Ok(outcome)
}
