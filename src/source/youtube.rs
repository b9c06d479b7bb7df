//! YouTube source implementation.

use super::{vtt_to_text, TranscriptSource, Video};
use crate::error::{RecapError, Result};
use async_trait::async_trait;
use regex::Regex;
use std::path::{Path, PathBuf};
use tracing::{debug, info, instrument};

/// YouTube transcript source backed by yt-dlp.
pub struct YoutubeSource {
    video_id_regex: Regex,
    subtitle_langs: String,
}

impl YoutubeSource {
    pub fn new() -> Self {
        Self::with_languages("en.*,en")
    }

    /// Create a source requesting captions in the given yt-dlp language list.
    pub fn with_languages(subtitle_langs: &str) -> Self {
        // Matches various YouTube URL formats and bare video IDs
        let video_id_regex = Regex::new(
            r"(?x)
            (?:
                (?:https?://)?
                (?:www\.)?
                (?:youtube\.com/watch\?v=|youtu\.be/|youtube\.com/embed/|youtube\.com/v/|youtube\.com/shorts/)
                ([a-zA-Z0-9_-]{11})
            )
            |
            ^([a-zA-Z0-9_-]{11})$
        ",
        )
        .expect("Invalid regex");

        Self {
            video_id_regex,
            subtitle_langs: subtitle_langs.to_string(),
        }
    }

    /// Extract video ID from a YouTube URL or bare ID.
    fn extract_video_id(&self, input: &str) -> Option<String> {
        let caps = self.video_id_regex.captures(input.trim())?;

        caps.get(1)
            .or_else(|| caps.get(2))
            .map(|m| m.as_str().to_string())
    }

    /// Parse `yt-dlp --flat-playlist --dump-json` output, one JSON object per line.
    fn parse_playlist(&self, stdout: &str) -> Vec<Video> {
        let mut videos = Vec::new();

        for line in stdout.lines() {
            if line.trim().is_empty() {
                continue;
            }

            let Ok(json) = serde_json::from_str::<serde_json::Value>(line) else {
                debug!("Skipping unparsable yt-dlp line");
                continue;
            };

            let id = json["id"]
                .as_str()
                .or_else(|| json["url"].as_str())
                .map(|s| self.extract_video_id(s).unwrap_or_else(|| s.to_string()));

            if let Some(id) = id {
                let title = json["title"].as_str().unwrap_or("Unknown Title");
                videos.push(Video::new(id, title));
            }
        }

        videos
    }

    async fn run_ytdlp(args: &[&str]) -> Result<std::process::Output> {
        tokio::process::Command::new("yt-dlp")
            .args(args)
            .output()
            .await
            .map_err(|e| {
                if e.kind() == std::io::ErrorKind::NotFound {
                    RecapError::ToolNotFound("yt-dlp".to_string())
                } else {
                    RecapError::VideoSource(format!("Failed to run yt-dlp: {}", e))
                }
            })
    }
}

impl Default for YoutubeSource {
    fn default() -> Self {
        Self::new()
    }
}

/// First `.vtt` file in `dir`, by name.
fn find_caption_file(dir: &Path) -> Result<Option<PathBuf>> {
    let mut captions: Vec<PathBuf> = std::fs::read_dir(dir)?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| path.extension().is_some_and(|ext| ext == "vtt"))
        .collect();
    captions.sort();
    Ok(captions.into_iter().next())
}

#[async_trait]
impl TranscriptSource for YoutubeSource {
    #[instrument(skip(self))]
    async fn list_videos(&self, playlist_url: &str) -> Result<Vec<Video>> {
        let output = Self::run_ytdlp(&[
            "--dump-json",
            "--no-download",
            "--no-warnings",
            "--flat-playlist",
            playlist_url,
        ])
        .await?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(RecapError::VideoSource(format!(
                "Failed to list videos: {}",
                stderr.trim()
            )));
        }

        let videos = self.parse_playlist(&String::from_utf8_lossy(&output.stdout));
        info!("Found {} videos", videos.len());
        Ok(videos)
    }

    #[instrument(skip(self), fields(video_id = %video.url))]
    async fn fetch_transcript(&self, video: &Video) -> Result<String> {
        let temp_dir = tempfile::tempdir()?;
        let template = temp_dir.path().join("%(id)s.%(ext)s");
        let template = template.to_string_lossy();
        let url = format!("https://www.youtube.com/watch?v={}", video.url);

        let output = Self::run_ytdlp(&[
            "--skip-download",
            "--write-subs",
            "--write-auto-subs",
            "--sub-langs",
            self.subtitle_langs.as_str(),
            "--sub-format",
            "vtt",
            "--no-warnings",
            "--output",
            template.as_ref(),
            url.as_str(),
        ])
        .await?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(RecapError::VideoSource(format!(
                "Failed to fetch captions for {}: {}",
                video.url,
                stderr.trim()
            )));
        }

        let caption_path = find_caption_file(temp_dir.path())?.ok_or_else(|| {
            RecapError::TranscriptUnavailable(format!(
                "No captions in '{}' for {}",
                self.subtitle_langs, video.url
            ))
        })?;

        let vtt = tokio::fs::read_to_string(&caption_path).await?;
        let text = vtt_to_text(&vtt);
        if text.is_empty() {
            return Err(RecapError::TranscriptUnavailable(format!(
                "Captions for {} are empty",
                video.url
            )));
        }

        Ok(text)
    }
}
