//! Transcript sources.
//!
//! A source lists the videos of a playlist and fetches the transcript of each
//! one. Transcripts are stored as `<sanitized title> (<video id>).txt` in one
//! directory per playlist.

mod captions;
mod fetch;
mod youtube;

pub use captions::vtt_to_text;
pub use fetch::{fetch_playlist, FetchEvent, FetchOutcome, FetchReport, FetchResult};
pub use youtube::YoutubeSource;

use crate::error::{RecapError, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use url::Url;

/// Maximum length of a sanitized title, leaving room for the id and extension.
const MAX_TITLE_LEN: usize = 200;

/// One playlist entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Video {
    /// Platform identifier (the YouTube video id).
    pub url: String,
    /// Display title, not filesystem-safe.
    pub title: String,
}

impl Video {
    pub fn new(url: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            title: title.into(),
        }
    }
}

/// Trait for transcript providers.
#[async_trait]
pub trait TranscriptSource: Send + Sync {
    /// List the videos of a playlist, in playlist order.
    async fn list_videos(&self, playlist_url: &str) -> Result<Vec<Video>>;

    /// Fetch the full transcript text of a video.
    async fn fetch_transcript(&self, video: &Video) -> Result<String>;
}

/// Make a title safe to use as a file name on common filesystems.
pub fn sanitize_filename(title: &str) -> String {
    let sanitized: String = title
        .chars()
        .filter_map(|c| match c {
            ':' | '|' | '/' | '\\' => Some('-'),
            '<' | '>' | '"' | '?' | '*' => None,
            c => Some(c),
        })
        .collect();

    let trimmed = sanitized.trim_matches(|c| c == ' ' || c == '.');
    let truncated: String = trimmed.chars().take(MAX_TITLE_LEN).collect();

    if truncated.is_empty() {
        "untitled".to_string()
    } else {
        truncated
    }
}

/// File name under which a video's transcript is stored.
pub fn transcript_filename(video: &Video) -> String {
    format!("{} ({}).txt", sanitize_filename(&video.title), video.url)
}

/// Extract the playlist id (`list` query parameter) from a playlist URL.
pub fn playlist_id(playlist_url: &str) -> Result<String> {
    let url = Url::parse(playlist_url.trim())
        .map_err(|e| RecapError::InvalidInput(format!("Invalid playlist URL '{}': {}", playlist_url, e)))?;

    url.query_pairs()
        .find(|(key, value)| key == "list" && !value.is_empty())
        .map(|(_, value)| value.into_owned())
        .ok_or_else(|| {
            RecapError::InvalidInput(format!(
                "Playlist URL has no 'list' parameter: {}",
                playlist_url
            ))
        })
}
