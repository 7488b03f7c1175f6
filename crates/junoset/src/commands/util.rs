//! Shared helpers for command handlers.

use std::io::{IsTerminal, Read};
use std::path::Path;

use junoset_core::SystemConfig;

use crate::error::CliError;

fn is_stdin(path: &Path) -> bool {
    path.as_os_str() == "-"
}

/// Read a whole file, or stdin for `-`.
pub fn read_text(path: &Path) -> Result<String, CliError> {
    if is_stdin(path) {
        let mut text = String::new();
        std::io::stdin().read_to_string(&mut text)?;
        return Ok(text);
    }
    Ok(std::fs::read_to_string(path)?)
}

/// Load a model file, choosing the decoder by extension. YAML is the
/// fallback and also accepts JSON.
pub fn read_model(path: &Path) -> Result<SystemConfig, CliError> {
    let model_err = |reason: String| CliError::ModelFile {
        path: path.display().to_string(),
        reason,
    };

    let text = read_text(path).map_err(|e| model_err(e.to_string()))?;
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase);

    let config = match extension.as_deref() {
        Some("json") => serde_json::from_str(&text).map_err(|e| model_err(e.to_string()))?,
        Some("toml") => toml::from_str(&text).map_err(|e| model_err(e.to_string()))?,
        _ if text.trim().is_empty() => SystemConfig::default(),
        _ => serde_yaml::from_str(&text).map_err(|e| model_err(e.to_string()))?,
    };
    tracing::debug!(path = %path.display(), "model loaded");
    Ok(config)
}

/// Prompt for confirmation, auto-approving if `--yes` was passed.
pub fn confirm(message: &str, yes_flag: bool) -> Result<bool, CliError> {
    if yes_flag {
        return Ok(true);
    }
    if !std::io::stdin().is_terminal() {
        return Err(CliError::NonInteractiveRequiresYes {
            action: message.trim_end_matches('?').into(),
        });
    }
    dialoguer::Confirm::new()
        .with_prompt(message)
        .default(false)
        .interact()
        .map_err(|e| CliError::Io(std::io::Error::other(e)))
}
