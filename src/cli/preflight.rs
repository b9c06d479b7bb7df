//! Pre-flight checks before expensive operations.
//!
//! Validates that required tools and configuration are available
//! before starting operations that would otherwise fail midway.

use crate::backend::api_base;
use crate::config::Settings;
use crate::error::{RecapError, Result};
use std::process::Command;

/// Requirements for different operations.
#[derive(Debug, Clone, Copy)]
pub enum Operation {
    /// Fetching transcripts requires yt-dlp.
    Fetch,
    /// Summarizing requires a valid backend configuration.
    Summarize,
}

/// Run pre-flight checks for the given operation.
///
/// Returns Ok(()) if all checks pass, or an error describing what's missing.
pub fn check(operation: Operation, settings: &Settings) -> Result<()> {
    match operation {
        Operation::Fetch => {
            check_tool("yt-dlp")?;
        }
        Operation::Summarize => {
            check_backend(settings)?;
        }
    }
    Ok(())
}

/// Check that the backend host and default model are usable.
fn check_backend(settings: &Settings) -> Result<()> {
    api_base(settings.backend.host())?;
    if settings.backend.default_model.trim().is_empty() {
        return Err(RecapError::Config(
            "backend.default_model is empty. Set it in the config file or via DEFAULT_MODEL"
                .to_string(),
        ));
    }
    Ok(())
}

/// Check if an external tool is available.
pub(crate) fn check_tool(name: &str) -> Result<()> {
    match Command::new(name).arg("--version").output() {
        Ok(output) if output.status.success() => Ok(()),
        Ok(_) => Err(RecapError::ToolNotFound(format!(
            "{} is installed but not working correctly",
            name
        ))),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            Err(RecapError::ToolNotFound(name.to_string()))
        }
        Err(e) => Err(RecapError::ToolNotFound(format!("{}: {}", name, e))),
    }
}
