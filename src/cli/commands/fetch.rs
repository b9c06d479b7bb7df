//! Fetch command implementation.

use crate::cli::preflight::{self, Operation};
use crate::cli::Output;
use crate::config::Settings;
use crate::source::{fetch_playlist, playlist_id, FetchEvent, FetchOutcome, YoutubeSource};
use anyhow::Result;

/// Run the fetch command.
pub async fn run_fetch(
    playlist_url: &str,
    output: Option<String>,
    force: bool,
    settings: &Settings,
) -> Result<()> {
    if let Err(e) = preflight::check(Operation::Fetch, settings) {
        Output::error(&format!("{}", e));
        Output::info("Run 'recap doctor' for detailed diagnostics.");
        return Err(e.into());
    }

    let output_dir = match output.filter(|o| !o.is_empty()) {
        Some(dir) => Settings::expand_path(&dir),
        None => settings.transcripts_dir().join(playlist_id(playlist_url)?),
    };

    Output::info(&format!("Fetching playlist: {}", playlist_url));
    let source = YoutubeSource::with_languages(&settings.youtube.subtitle_langs);

    let spinner = Output::spinner("Fetching video list...");
    let mut progress: Option<indicatif::ProgressBar> = None;

    let result = fetch_playlist(&source, playlist_url, &output_dir, force, |event| match event {
        FetchEvent::Listed { total } => {
            spinner.finish_and_clear();
            Output::info(&format!("Found {} videos", total));
            progress = Some(Output::progress_bar(total as u64, "Fetching transcripts"));
        }
        FetchEvent::Finished(report) => {
            if let Some(pb) = &progress {
                match &report.outcome {
                    FetchOutcome::Saved { path } => {
                        pb.println(format!("  Saved {}", path.display()));
                    }
                    FetchOutcome::Skipped { .. } => {
                        pb.println(format!("  Skipped {} (already fetched)", report.video.title));
                    }
                    FetchOutcome::Failed { error } => {
                        pb.println(format!("  Failed {}: {}", report.video.title, error));
                    }
                }
                pb.inc(1);
            }
        }
    })
    .await;

    spinner.finish_and_clear();
    if let Some(pb) = progress {
        pb.finish_and_clear();
    }
    let result = result?;

    println!();
    Output::success(&format!(
        "Playlist fetched: {} saved, {} skipped, {} failed",
        result.saved, result.skipped, result.failed
    ));
    Output::kv("Output directory", &result.output_dir.display().to_string());

    Ok(())
}
