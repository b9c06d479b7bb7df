//! Playlist fetch flow: one transcript file per video.

use super::{transcript_filename, TranscriptSource, Video};
use crate::error::Result;
use crate::pipeline::stage_file;
use std::path::{Path, PathBuf};
use tracing::{info, instrument, warn};

/// Outcome of fetching one video's transcript.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchOutcome {
    Saved { path: PathBuf },
    /// Transcript file already present and `force` was not set.
    Skipped { path: PathBuf },
    Failed { error: String },
}

/// Per-video entry of a [`FetchResult`].
#[derive(Debug, Clone)]
pub struct FetchReport {
    pub video: Video,
    pub outcome: FetchOutcome,
}

/// Progress notifications emitted while fetching.
#[derive(Debug)]
pub enum FetchEvent<'a> {
    /// The playlist listing returned `total` videos.
    Listed { total: usize },
    Finished(&'a FetchReport),
}

/// Aggregate result of a playlist fetch.
#[derive(Debug, Clone)]
pub struct FetchResult {
    pub output_dir: PathBuf,
    pub saved: usize,
    pub skipped: usize,
    pub failed: usize,
    pub reports: Vec<FetchReport>,
}

/// Fetch every transcript of a playlist into `output_dir`.
///
/// Listing the playlist is fatal on failure; a failing video is recorded and
/// the remaining videos are still fetched.
#[instrument(skip(source, on_event), fields(output_dir = %output_dir.display()))]
pub async fn fetch_playlist<F>(
    source: &dyn TranscriptSource,
    playlist_url: &str,
    output_dir: &Path,
    force: bool,
    mut on_event: F,
) -> Result<FetchResult>
where
    F: FnMut(FetchEvent<'_>),
{
    std::fs::create_dir_all(output_dir)?;

    let videos = source.list_videos(playlist_url).await?;
    on_event(FetchEvent::Listed {
        total: videos.len(),
    });

    let mut result = FetchResult {
        output_dir: output_dir.to_path_buf(),
        saved: 0,
        skipped: 0,
        failed: 0,
        reports: Vec::with_capacity(videos.len()),
    };

    for video in videos {
        let path = output_dir.join(transcript_filename(&video));

        let outcome = if path.exists() && !force {
            result.skipped += 1;
            FetchOutcome::Skipped { path }
        } else {
            match fetch_one(source, &video, &path).await {
                Ok(()) => {
                    info!("Transcript for {} saved to {}", video.title, path.display());
                    result.saved += 1;
                    FetchOutcome::Saved { path }
                }
                Err(e) => {
                    warn!("Failed to fetch transcript for {}: {}", video.title, e);
                    result.failed += 1;
                    FetchOutcome::Failed {
                        error: e.to_string(),
                    }
                }
            }
        };

        let report = FetchReport { video, outcome };
        on_event(FetchEvent::Finished(&report));
        result.reports.push(report);
    }

    Ok(result)
}

async fn fetch_one(source: &dyn TranscriptSource, video: &Video, path: &Path) -> Result<()> {
    let transcript = source.fetch_transcript(video).await?;
    let staged = stage_file(path, &transcript)?;
    staged.persist(path).map_err(|e| e.error)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RecapError;
    use async_trait::async_trait;

    struct FakeSource {
        videos: Vec<Video>,
    }

    #[async_trait]
    impl TranscriptSource for FakeSource {
        async fn list_videos(&self, playlist_url: &str) -> Result<Vec<Video>> {
            if playlist_url.is_empty() {
                return Err(RecapError::VideoSource("no playlist".to_string()));
            }
            Ok(self.videos.clone())
        }

        async fn fetch_transcript(&self, video: &Video) -> Result<String> {
            if video.url == "broken" {
                return Err(RecapError::TranscriptUnavailable(video.url.clone()));
            }
            Ok(format!("transcript of {}", video.title))
        }
    }

    fn source() -> FakeSource {
        FakeSource {
            videos: vec![
                Video::new("id1", "Intro: basics"),
                Video::new("broken", "No captions"),
                Video::new("id3", "Wrap up"),
            ],
        }
    }

    #[tokio::test]
    async fn test_fetch_writes_sanitized_files_and_isolates_failures() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("PL1");

        let mut listed = None;
        let result = fetch_playlist(&source(), "https://x/playlist?list=PL1", &out, false, |e| {
            if let FetchEvent::Listed { total } = e {
                listed = Some(total);
            }
        })
        .await
        .unwrap();

        assert_eq!(listed, Some(3));
        assert_eq!((result.saved, result.skipped, result.failed), (2, 0, 1));
        assert_eq!(
            std::fs::read_to_string(out.join("Intro- basics (id1).txt")).unwrap(),
            "transcript of Intro: basics"
        );
        assert!(out.join("Wrap up (id3).txt").exists());
        assert!(!out.join("No captions (broken).txt").exists());
    }

    #[tokio::test]
    async fn test_existing_transcripts_are_skipped_unless_forced() {
        let dir = tempfile::tempdir().unwrap();
        let existing = dir.path().join("Wrap up (id3).txt");
        std::fs::write(&existing, "edited").unwrap();

        let result = fetch_playlist(&source(), "url", dir.path(), false, |_| {})
            .await
            .unwrap();
        assert_eq!(result.skipped, 1);
        assert_eq!(std::fs::read_to_string(&existing).unwrap(), "edited");

        let result = fetch_playlist(&source(), "url", dir.path(), true, |_| {})
            .await
            .unwrap();
        assert_eq!(result.skipped, 0);
        assert_eq!(
            std::fs::read_to_string(&existing).unwrap(),
            "transcript of Wrap up"
        );
    }

    #[tokio::test]
    async fn test_no_temp_files_left_behind() {
        let dir = tempfile::tempdir().unwrap();
        let existing = dir.path().join("Wrap up (id3).txt");
        std::fs::write(&existing, "edited").unwrap();

        fetch_playlist(&source(), "url", dir.path(), true, |_| {})
            .await
            .unwrap();

        let mut names: Vec<String> = std::fs::read_dir(dir.path())
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        names.sort();
        assert_eq!(names, vec!["Intro- basics (id1).txt", "Wrap up (id3).txt"]);
        assert_eq!(
            std::fs::read_to_string(&existing).unwrap(),
            "transcript of Wrap up"
        );
    }

    #[tokio::test]
    async fn test_listing_failure_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let err = fetch_playlist(&source(), "", dir.path(), false, |_| {})
            .await
            .unwrap_err();
        assert!(matches!(err, RecapError::VideoSource(_)));
    }
}
