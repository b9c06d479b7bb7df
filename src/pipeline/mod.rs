//! Two-stage summarization pipeline.
//!
//! The map stage turns transcript files into one `<name>.summary.md` artifact
//! each, skipping artifacts that already exist. The reduce stage concatenates
//! every artifact in an output directory and summarizes them once more into
//! `summary.md`.

mod map;
mod reduce;

pub use map::BatchEvent;
pub use reduce::list_summary_artifacts;

use crate::error::Result;
use crate::summarizer::Summarizer;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Suffix appended to a transcript file name to form its summary artifact.
pub const SUMMARY_SUFFIX: &str = ".summary.md";

/// File name of the playlist digest inside an output directory.
pub const DIGEST_FILE: &str = "summary.md";

/// Path of the summary artifact for transcript file `video`.
pub fn summary_path(output_dir: &Path, video: &str) -> PathBuf {
    output_dir.join(format!("{}{}", video, SUMMARY_SUFFIX))
}

/// Drives both pipeline stages with one summarizer.
pub struct Pipeline {
    summarizer: Summarizer,
}

impl Pipeline {
    pub fn new(summarizer: Summarizer) -> Self {
        Self { summarizer }
    }

    pub fn summarizer(&self) -> &Summarizer {
        &self.summarizer
    }
}

/// Outcome of one video in a batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VideoOutcome {
    /// A new artifact was written.
    Summarized { output: PathBuf },
    /// The artifact already existed; no backend call was made.
    Skipped { output: PathBuf },
    /// Summarization or writing failed.
    Failed { error: String },
}

impl VideoOutcome {
    pub fn is_success(&self) -> bool {
        !matches!(self, VideoOutcome::Failed { .. })
    }
}

/// Per-video entry of a [`BatchResult`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VideoReport {
    /// Transcript file name as selected by the caller.
    pub video: String,
    pub outcome: VideoOutcome,
}

/// Aggregate result of the map stage.
#[derive(Debug, Clone)]
pub struct BatchResult {
    /// Directory holding the summary artifacts.
    pub output_dir: PathBuf,
    /// Videos summarized or skipped because already summarized.
    pub succeeded: usize,
    /// Videos that failed.
    pub failed: usize,
    /// One report per selected video, in processing order.
    pub reports: Vec<VideoReport>,
}

impl BatchResult {
    fn new(output_dir: &Path) -> Self {
        Self {
            output_dir: output_dir.to_path_buf(),
            succeeded: 0,
            failed: 0,
            reports: Vec::new(),
        }
    }

    fn record(&mut self, report: VideoReport) {
        if report.outcome.is_success() {
            self.succeeded += 1;
        } else {
            self.failed += 1;
        }
        self.reports.push(report);
    }

    /// Total number of videos processed.
    pub fn total(&self) -> usize {
        self.reports.len()
    }

    /// Number of videos skipped because their artifact already existed.
    pub fn skipped(&self) -> usize {
        self.reports
            .iter()
            .filter(|r| matches!(r.outcome, VideoOutcome::Skipped { .. }))
            .count()
    }

    /// Failed videos with their error messages.
    pub fn failures(&self) -> impl Iterator<Item = (&str, &str)> {
        self.reports.iter().filter_map(|r| match &r.outcome {
            VideoOutcome::Failed { error } => Some((r.video.as_str(), error.as_str())),
            _ => None,
        })
    }
}

/// The reduce stage output.
#[derive(Debug, Clone)]
pub struct PlaylistDigest {
    /// Where the digest was written.
    pub path: PathBuf,
    /// The digest text.
    pub content: String,
    /// Artifacts that were concatenated, in concatenation order.
    pub sources: Vec<PathBuf>,
}

/// Write `content` to a temporary file next to `path`, returning it unpersisted.
pub(crate) fn stage_file(path: &Path, content: &str) -> Result<tempfile::NamedTempFile> {
    let dir = path.parent().unwrap_or(Path::new("."));
    std::fs::create_dir_all(dir)?;

    let mut file = tempfile::NamedTempFile::new_in(dir)?;
    file.write_all(content.as_bytes())?;
    file.as_file().sync_all()?;
    Ok(file)
}
