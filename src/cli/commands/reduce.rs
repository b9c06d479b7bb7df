//! Reduce command implementation.

use crate::cli::preflight::{self, Operation};
use crate::cli::Output;
use crate::config::Settings;
use crate::pipeline::Pipeline;
use crate::summarizer::Summarizer;
use anyhow::Result;
use std::path::Path;

/// Run the reduce command against an existing summary directory.
pub async fn run_reduce(
    playlist: &str,
    model: Option<String>,
    output: Option<String>,
    settings: &Settings,
) -> Result<()> {
    if let Err(e) = preflight::check(Operation::Summarize, settings) {
        Output::error(&format!("{}", e));
        Output::info("Run 'recap doctor' for detailed diagnostics.");
        return Err(e.into());
    }

    let summaries_dir = output
        .map(|d| Settings::expand_path(&d))
        .unwrap_or_else(|| settings.summaries_dir());
    let output_dir = summaries_dir.join(playlist);

    let summarizer = Summarizer::from_settings(settings, model.as_deref())?;
    reduce_and_report(&Pipeline::new(summarizer), &output_dir).await
}

/// Produce the playlist digest, print it and report where it was saved.
pub(super) async fn reduce_and_report(pipeline: &Pipeline, output_dir: &Path) -> Result<()> {
    let spinner = Output::spinner("Summarizing the summaries...");
    let digest = pipeline.reduce(output_dir).await;
    spinner.finish_and_clear();

    let digest = match digest {
        Ok(d) => d,
        Err(e) => {
            Output::error(&format!("Failed to summarize the summaries: {}", e));
            return Err(e.into());
        }
    };

    if digest.sources.is_empty() {
        Output::warning("No summaries found; the digest was generated from empty input.");
    }

    println!("{}", digest.content);
    println!();
    Output::success(&format!("Summary saved to {}", digest.path.display()));
    Output::kv("Summaries combined", &digest.sources.len().to_string());

    Ok(())
}
