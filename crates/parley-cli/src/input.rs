//! Reading the prompt, context file and attachment files.

use std::path::Path;

use base64::Engine;
use tokio::io::AsyncReadExt;

use crate::error::CliError;

/// The prompt argument, or stdin when it is `-`.
pub async fn read_prompt(arg: &str) -> Result<String, CliError> {
    if arg != "-" {
        return Ok(arg.to_string());
    }

    let mut prompt = String::new();
    tokio::io::stdin()
        .read_to_string(&mut prompt)
        .await
        .map_err(|e| CliError::Input(format!("failed to read prompt from stdin: {e}")))?;

    let prompt = prompt.trim_end();
    if prompt.is_empty() {
        return Err(CliError::Input("empty prompt on stdin".into()));
    }
    Ok(prompt.to_string())
}

pub async fn read_context(path: &Path) -> Result<String, CliError> {
    tokio::fs::read_to_string(path)
        .await
        .map_err(|e| CliError::Input(format!("failed to read {}: {e}", path.display())))
}

/// Content type guessed from the file extension.
pub fn content_type_for(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase)
        .unwrap_or_default();
    match ext.as_str() {
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "pdf" => "application/pdf",
        "txt" | "md" => "text/plain",
        "json" => "application/json",
        _ => "application/octet-stream",
    }
}

/// Read a file and encode it as a base64 data URI.
pub async fn file_data_uri(path: &Path) -> Result<String, CliError> {
    let bytes = tokio::fs::read(path)
        .await
        .map_err(|e| CliError::Input(format!("failed to read {}: {e}", path.display())))?;
    Ok(format!(
        "data:{};base64,{}",
        content_type_for(path),
        base64::engine::general_purpose::STANDARD.encode(bytes)
    ))
}
