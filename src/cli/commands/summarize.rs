//! Summarize command implementation.

use super::reduce::reduce_and_report;
use crate::cli::output::truncate_name;
use crate::cli::preflight::{self, Operation};
use crate::cli::Output;
use crate::config::Settings;
use crate::library::{list_playlists, list_transcripts};
use crate::pipeline::{BatchEvent, BatchResult, Pipeline, VideoOutcome};
use crate::summarizer::Summarizer;
use anyhow::{anyhow, Result};
use std::path::Path;

/// Run the summarize command.
pub async fn run_summarize(
    playlist: Option<&str>,
    transcripts_dir: Option<String>,
    model: Option<String>,
    output: Option<String>,
    videos: &[String],
    reduce: bool,
    settings: &Settings,
) -> Result<()> {
    if let Err(e) = preflight::check(Operation::Summarize, settings) {
        Output::error(&format!("{}", e));
        Output::info("Run 'recap doctor' for detailed diagnostics.");
        return Err(e.into());
    }

    let transcripts_dir = transcripts_dir
        .map(|d| Settings::expand_path(&d))
        .unwrap_or_else(|| settings.transcripts_dir());
    if !transcripts_dir.exists() {
        Output::error(&format!(
            "Directory {} does not exist",
            transcripts_dir.display()
        ));
        return Err(anyhow!("Transcripts directory not found"));
    }

    let playlists = list_playlists(&transcripts_dir)?;
    if playlists.is_empty() {
        Output::error(&format!(
            "No playlists found in {}",
            transcripts_dir.display()
        ));
        return Err(anyhow!("No playlists found"));
    }

    let playlist = match playlist {
        Some(p) if playlists.iter().any(|name| name == p) => p,
        other => {
            if let Some(p) = other {
                Output::error(&format!("Playlist '{}' not found", p));
            } else {
                Output::error("No playlist given. Available playlists:");
            }
            for name in &playlists {
                Output::list_item(name);
            }
            return Err(anyhow!("No playlist selected"));
        }
    };

    let playlist_dir = transcripts_dir.join(playlist);
    let available = list_transcripts(&playlist_dir)?;
    if available.is_empty() {
        Output::error(&format!(
            "No transcript files found in {}",
            playlist_dir.display()
        ));
        return Err(anyhow!("No transcripts found"));
    }

    let selected = select_videos(&available, videos)?;

    let model = model.unwrap_or_else(|| settings.backend.default_model.clone());
    let spinner = Output::spinner(&format!("Initializing summarizer with model '{}'...", model));
    let summarizer = match Summarizer::from_settings(settings, Some(&model)) {
        Ok(s) => {
            spinner.finish_and_clear();
            Output::success("Summarizer initialized");
            s
        }
        Err(e) => {
            spinner.finish_and_clear();
            Output::error(&format!("Error initializing summarizer: {}", e));
            return Err(e.into());
        }
    };
    let pipeline = Pipeline::new(summarizer);

    let summaries_dir = output
        .map(|d| Settings::expand_path(&d))
        .unwrap_or_else(|| settings.summaries_dir());
    let output_dir = summaries_dir.join(playlist);

    let result = run_batch(&pipeline, &playlist_dir, &selected, &output_dir).await;
    print_batch_summary(&result);

    if reduce {
        if result.succeeded == 0 {
            Output::warning("No videos were summarized; skipping the playlist digest.");
        } else {
            println!();
            reduce_and_report(&pipeline, &output_dir).await?;
        }
    }

    Ok(())
}

/// Resolve the requested videos against the available transcripts.
///
/// An empty request selects everything; unknown names are an error.
fn select_videos(available: &[String], requested: &[String]) -> Result<Vec<String>> {
    if requested.is_empty() {
        return Ok(available.to_vec());
    }

    let unknown: Vec<&str> = requested
        .iter()
        .filter(|v| !available.contains(v))
        .map(String::as_str)
        .collect();
    if !unknown.is_empty() {
        return Err(anyhow!("Unknown transcript(s): {}", unknown.join(", ")));
    }

    Ok(requested.to_vec())
}

async fn run_batch(
    pipeline: &Pipeline,
    playlist_dir: &Path,
    selected: &[String],
    output_dir: &Path,
) -> BatchResult {
    let total = selected.len();
    let pb = Output::progress_bar(
        total as u64,
        &format!("Summarizing {} video{}", total, if total > 1 { "s" } else { "" }),
    );

    let result = pipeline
        .summarize_batch_with(playlist_dir, selected, output_dir, |event| match event {
            BatchEvent::Started { index, total, video } => {
                pb.set_message(format!(
                    "Summarizing {} ({}/{})",
                    truncate_name(video, 40),
                    index,
                    total
                ));
            }
            BatchEvent::Finished(report) => {
                match &report.outcome {
                    VideoOutcome::Skipped { .. } => {
                        pb.println(format!("  Skipping {} (already exists)", report.video));
                    }
                    VideoOutcome::Failed { error } => {
                        pb.println(format!("  ✗ Failed to summarize {}: {}", report.video, error));
                    }
                    VideoOutcome::Summarized { .. } => {}
                }
                pb.inc(1);
            }
        })
        .await;

    pb.finish_and_clear();
    result
}

fn print_batch_summary(result: &BatchResult) {
    println!();
    Output::success("Summary complete!");
    Output::kv("Successful", &result.succeeded.to_string());
    if result.skipped() > 0 {
        Output::kv("Already summarized", &result.skipped().to_string());
    }
    if result.failed > 0 {
        Output::kv("Failed", &result.failed.to_string());
        for (video, error) in result.failures() {
            Output::list_item(&format!("{}: {}", video, error));
        }
    }
    Output::kv("Output directory", &result.output_dir.display().to_string());
}
