//! List command implementation.

use crate::cli::Output;
use crate::config::Settings;
use crate::library::{list_playlists, list_transcripts};
use crate::pipeline::{summary_path, DIGEST_FILE};
use anyhow::Result;
use std::path::Path;

/// Summary state of one playlist.
struct PlaylistStatus {
    /// Transcript names with whether each has a summary artifact.
    transcripts: Vec<(String, bool)>,
    digest: bool,
}

/// Run the list command.
pub fn run_list(
    playlist: Option<&str>,
    transcripts_dir: Option<String>,
    output: Option<String>,
    settings: &Settings,
) -> Result<()> {
    let transcripts_dir = transcripts_dir
        .map(|d| Settings::expand_path(&d))
        .unwrap_or_else(|| settings.transcripts_dir());

    let Some(playlist) = playlist else {
        let playlists = list_playlists(&transcripts_dir)?;
        if playlists.is_empty() {
            Output::info("No playlists fetched yet. Use 'recap fetch <playlist url>' to add one.");
            return Ok(());
        }

        Output::header(&format!("Playlists ({})", playlists.len()));
        println!();
        for name in &playlists {
            let count = list_transcripts(&transcripts_dir.join(name))?.len();
            Output::list_item(&format!("{} ({} transcripts)", name, count));
        }
        return Ok(());
    };

    let summaries_dir = output
        .map(|d| Settings::expand_path(&d))
        .unwrap_or_else(|| settings.summaries_dir());
    let status = playlist_status(
        &transcripts_dir.join(playlist),
        &summaries_dir.join(playlist),
    )?;

    let total = status.transcripts.len();
    Output::header(&format!("{} ({} transcripts)", playlist, total));
    println!();

    for (name, done) in &status.transcripts {
        Output::transcript_item(name, *done);
    }

    let summarized = status.transcripts.iter().filter(|(_, done)| *done).count();
    println!();
    Output::kv("Summarized", &format!("{}/{}", summarized, total));
    Output::kv("Digest", if status.digest { "present" } else { "missing" });

    Ok(())
}

fn playlist_status(playlist_dir: &Path, output_dir: &Path) -> Result<PlaylistStatus> {
    let transcripts = list_transcripts(playlist_dir)?
        .into_iter()
        .map(|name| {
            let done = summary_path(output_dir, &name).exists();
            (name, done)
        })
        .collect();

    Ok(PlaylistStatus {
        transcripts,
        digest: output_dir.join(DIGEST_FILE).is_file(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_reads_given_summary_directory() {
        let transcripts = tempfile::tempdir().unwrap();
        let custom = tempfile::tempdir().unwrap();
        std::fs::write(transcripts.path().join("a.txt"), "a").unwrap();
        std::fs::write(transcripts.path().join("b.txt"), "b").unwrap();
        std::fs::write(custom.path().join("a.txt.summary.md"), "sum").unwrap();
        std::fs::write(custom.path().join("summary.md"), "digest").unwrap();

        let status = playlist_status(transcripts.path(), custom.path()).unwrap();

        assert_eq!(
            status.transcripts,
            vec![("a.txt".to_string(), true), ("b.txt".to_string(), false)]
        );
        assert!(status.digest);
    }

    #[test]
    fn test_status_without_summaries() {
        let transcripts = tempfile::tempdir().unwrap();
        std::fs::write(transcripts.path().join("a.txt"), "a").unwrap();

        let status =
            playlist_status(transcripts.path(), &transcripts.path().join("missing")).unwrap();

        assert_eq!(status.transcripts, vec![("a.txt".to_string(), false)]);
        assert!(!status.digest);
    }
}
