//! Reduce stage: the playlist digest.

use super::{stage_file, Pipeline, PlaylistDigest, DIGEST_FILE, SUMMARY_SUFFIX};
use crate::error::{RecapError, Result};
use std::path::{Path, PathBuf};
use tracing::{info, instrument};

/// List the summary artifacts of `output_dir`, sorted by file name.
pub fn list_summary_artifacts(output_dir: &Path) -> Result<Vec<PathBuf>> {
    let entries = std::fs::read_dir(output_dir).map_err(|e| RecapError::from_io(e, output_dir))?;

    let mut artifacts = Vec::new();
    for entry in entries {
        let entry = entry?;
        let name = entry.file_name();
        let is_artifact = name
            .to_str()
            .is_some_and(|n| n.ends_with(SUMMARY_SUFFIX));

        if is_artifact && entry.file_type()?.is_file() {
            artifacts.push(entry.path());
        }
    }

    artifacts.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    Ok(artifacts)
}

impl Pipeline {
    /// Summarize all artifacts in `output_dir` into `summary.md`.
    ///
    /// The digest is always recomputed and replaces any previous one. With no
    /// artifacts the summarizer is called with empty content. On failure the
    /// previous digest is left in place.
    #[instrument(skip(self), fields(output_dir = %output_dir.display()))]
    pub async fn reduce(&self, output_dir: &Path) -> Result<PlaylistDigest> {
        let sources = list_summary_artifacts(output_dir)?;
        info!("Reducing {} summaries", sources.len());

        let mut summaries = Vec::with_capacity(sources.len());
        for path in &sources {
            let text = tokio::fs::read_to_string(path)
                .await
                .map_err(|e| RecapError::from_io(e, path))?;
            summaries.push(text);
        }

        let content = self.summarizer.summarize(&summaries.join("\n")).await?;

        let path = output_dir.join(DIGEST_FILE);
        let staged = stage_file(&path, &content)?;
        staged.persist(&path).map_err(|e| RecapError::Io(e.error))?;
        info!("Digest written to {}", path.display());

        Ok(PlaylistDigest {
            path,
            content,
            sources,
        })
    }
}
