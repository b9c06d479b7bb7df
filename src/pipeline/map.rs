//! Map stage: one summary artifact per transcript file.

use super::{stage_file, summary_path, BatchResult, Pipeline, VideoOutcome, VideoReport};
use crate::error::Result;
use std::path::Path;
use tracing::{info, instrument, warn};

/// Progress notifications emitted while a batch runs.
#[derive(Debug)]
pub enum BatchEvent<'a> {
    /// Processing of `video` (1-based `index` of `total`) is starting.
    Started {
        index: usize,
        total: usize,
        video: &'a str,
    },
    /// A video finished with the given report.
    Finished(&'a VideoReport),
}

impl Pipeline {
    /// Summarize the selected transcripts of `transcript_dir` into `output_dir`.
    ///
    /// Videos are processed one at a time in the given order. A video whose
    /// artifact already exists is counted as a success without calling the
    /// backend. A failing video is recorded and the batch continues.
    pub async fn summarize_batch(
        &self,
        transcript_dir: &Path,
        videos: &[String],
        output_dir: &Path,
    ) -> BatchResult {
        self.summarize_batch_with(transcript_dir, videos, output_dir, |_| {})
            .await
    }

    /// Same as [`Pipeline::summarize_batch`], reporting progress to `on_event`.
    #[instrument(skip_all, fields(total = videos.len(), output_dir = %output_dir.display()))]
    pub async fn summarize_batch_with<F>(
        &self,
        transcript_dir: &Path,
        videos: &[String],
        output_dir: &Path,
        mut on_event: F,
    ) -> BatchResult
    where
        F: FnMut(BatchEvent<'_>),
    {
        let total = videos.len();
        let mut result = BatchResult::new(output_dir);

        for (i, video) in videos.iter().enumerate() {
            on_event(BatchEvent::Started {
                index: i + 1,
                total,
                video: video.as_str(),
            });

            let outcome = self.summarize_video(transcript_dir, video, output_dir).await;
            let report = VideoReport {
                video: video.clone(),
                outcome,
            };

            on_event(BatchEvent::Finished(&report));
            result.record(report);
        }

        info!(
            "Batch complete: {} succeeded, {} failed",
            result.succeeded, result.failed
        );
        result
    }

    async fn summarize_video(
        &self,
        transcript_dir: &Path,
        video: &str,
        output_dir: &Path,
    ) -> VideoOutcome {
        let output = summary_path(output_dir, video);

        if output.exists() {
            info!("Skipping {} (already summarized)", video);
            return VideoOutcome::Skipped { output };
        }

        let summary = match self
            .summarizer
            .summarize_file(&transcript_dir.join(video))
            .await
        {
            Ok(summary) => summary,
            Err(e) => {
                warn!("Failed to summarize {}: {}", video, e);
                return VideoOutcome::Failed {
                    error: e.to_string(),
                };
            }
        };

        match write_new_artifact(&output, &summary) {
            Ok(true) => {
                info!("Summarized {}", video);
                VideoOutcome::Summarized { output }
            }
            Ok(false) => {
                info!("Skipping {} (artifact appeared during summarization)", video);
                VideoOutcome::Skipped { output }
            }
            Err(e) => {
                warn!("Failed to write summary for {}: {}", video, e);
                VideoOutcome::Failed {
                    error: e.to_string(),
                }
            }
        }
    }
}

/// Atomically create `path` with `content`, never replacing an existing file.
///
/// Returns `false` if the path already exists.
fn write_new_artifact(path: &Path, content: &str) -> Result<bool> {
    let staged = stage_file(path, content)?;
    match staged.persist_noclobber(path) {
        Ok(_) => Ok(true),
        Err(e) if e.error.kind() == std::io::ErrorKind::AlreadyExists => Ok(false),
        Err(e) => Err(e.error.into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::completion::testing::StubClient;
    use crate::summarizer::Summarizer;
    use std::path::PathBuf;
    use std::sync::Arc;

    fn pipeline(stub: Arc<StubClient>) -> Pipeline {
        Pipeline::new(Summarizer::new(stub, "test-model").unwrap())
    }

    fn write_transcripts(dir: &Path, files: &[(&str, &str)]) -> Vec<String> {
        files
            .iter()
            .map(|(name, text)| {
                std::fs::write(dir.join(name), text).unwrap();
                name.to_string()
            })
            .collect()
    }

    #[tokio::test]
    async fn test_summarizes_each_selected_transcript() {
        let transcripts = tempfile::tempdir().unwrap();
        let out = tempfile::tempdir().unwrap();
        let output_dir = out.path().join("playlist");
        let videos = write_transcripts(
            transcripts.path(),
            &[("A.txt", "alpha text"), ("B.txt", "beta text")],
        );

        let result = pipeline(Arc::new(StubClient::new()))
            .summarize_batch(transcripts.path(), &videos, &output_dir)
            .await;

        assert_eq!(result.succeeded, 2);
        assert_eq!(result.failed, 0);
        assert_eq!(result.output_dir, output_dir);
        assert_eq!(
            std::fs::read_to_string(output_dir.join("A.txt.summary.md")).unwrap(),
            "sum:alpha text"
        );
        assert_eq!(
            std::fs::read_to_string(output_dir.join("B.txt.summary.md")).unwrap(),
            "sum:beta text"
        );
    }

    #[tokio::test]
    async fn test_existing_artifact_is_skipped_and_untouched() {
        let transcripts = tempfile::tempdir().unwrap();
        let out = tempfile::tempdir().unwrap();
        let videos = write_transcripts(
            transcripts.path(),
            &[("A.txt", "alpha"), ("B.txt", "beta")],
        );
        std::fs::write(out.path().join("A.txt.summary.md"), "hand-edited summary").unwrap();

        let stub = Arc::new(StubClient::new());
        let result = pipeline(stub.clone())
            .summarize_batch(transcripts.path(), &videos, out.path())
            .await;

        assert_eq!(result.succeeded, 2);
        assert_eq!(result.skipped(), 1);
        assert_eq!(
            std::fs::read_to_string(out.path().join("A.txt.summary.md")).unwrap(),
            "hand-edited summary"
        );

        let calls = stub.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].content, "beta");
    }

    #[tokio::test]
    async fn test_rerun_makes_no_backend_calls() {
        let transcripts = tempfile::tempdir().unwrap();
        let out = tempfile::tempdir().unwrap();
        let videos = write_transcripts(transcripts.path(), &[("A.txt", "alpha")]);

        let stub = Arc::new(StubClient::new());
        let pipeline = pipeline(stub.clone());
        pipeline
            .summarize_batch(transcripts.path(), &videos, out.path())
            .await;
        let second = pipeline
            .summarize_batch(transcripts.path(), &videos, out.path())
            .await;

        assert_eq!(stub.calls().len(), 1);
        assert_eq!(second.succeeded, 1);
        assert_eq!(
            second.reports[0].outcome,
            VideoOutcome::Skipped {
                output: out.path().join("A.txt.summary.md")
            }
        );
    }

    #[tokio::test]
    async fn test_partial_failures_are_isolated() {
        let transcripts = tempfile::tempdir().unwrap();
        let out = tempfile::tempdir().unwrap();
        let videos = write_transcripts(
            transcripts.path(),
            &[
                ("1.txt", "ok one"),
                ("2.txt", "FAIL two"),
                ("3.txt", "ok three"),
                ("4.txt", "FAIL four"),
                ("5.txt", "ok five"),
            ],
        );

        let stub = Arc::new(StubClient::failing_on("FAIL"));
        let result = pipeline(stub.clone())
            .summarize_batch(transcripts.path(), &videos, out.path())
            .await;

        assert_eq!(stub.calls().len(), 5);
        assert_eq!(result.succeeded, 3);
        assert_eq!(result.failed, 2);

        let failed: Vec<&str> = result.failures().map(|(video, _)| video).collect();
        assert_eq!(failed, vec!["2.txt", "4.txt"]);

        for video in ["1.txt", "3.txt", "5.txt"] {
            assert!(summary_path(out.path(), video).exists());
        }
        for video in ["2.txt", "4.txt"] {
            assert!(!summary_path(out.path(), video).exists());
        }
    }

    #[tokio::test]
    async fn test_missing_transcript_is_a_failure() {
        let transcripts = tempfile::tempdir().unwrap();
        let out = tempfile::tempdir().unwrap();
        let mut videos = write_transcripts(transcripts.path(), &[("A.txt", "alpha")]);
        videos.insert(0, "gone.txt".to_string());

        let result = pipeline(Arc::new(StubClient::new()))
            .summarize_batch(transcripts.path(), &videos, out.path())
            .await;

        assert_eq!(result.succeeded, 1);
        assert_eq!(result.failed, 1);
        let (video, error) = result.failures().next().unwrap();
        assert_eq!(video, "gone.txt");
        assert!(error.contains("gone.txt"));
    }

    #[tokio::test]
    async fn test_events_follow_selection_order() {
        let transcripts = tempfile::tempdir().unwrap();
        let out = tempfile::tempdir().unwrap();
        let videos = write_transcripts(
            transcripts.path(),
            &[("c.txt", "c"), ("a.txt", "a"), ("b.txt", "b")],
        );

        let mut started = Vec::new();
        let mut finished = Vec::new();
        let result = pipeline(Arc::new(StubClient::new()))
            .summarize_batch_with(transcripts.path(), &videos, out.path(), |event| match event {
                BatchEvent::Started { index, total, video } => {
                    started.push((index, total, video.to_string()))
                }
                BatchEvent::Finished(report) => finished.push(report.video.clone()),
            })
            .await;

        assert_eq!(
            started,
            vec![
                (1, 3, "c.txt".to_string()),
                (2, 3, "a.txt".to_string()),
                (3, 3, "b.txt".to_string()),
            ]
        );
        assert_eq!(finished, videos);
        let reported: Vec<&str> = result.reports.iter().map(|r| r.video.as_str()).collect();
        assert_eq!(reported, vec!["c.txt", "a.txt", "b.txt"]);
    }

    #[tokio::test]
    async fn test_no_temp_files_left_behind() {
        let transcripts = tempfile::tempdir().unwrap();
        let out = tempfile::tempdir().unwrap();
        let videos = write_transcripts(transcripts.path(), &[("A.txt", "alpha")]);

        pipeline(Arc::new(StubClient::new()))
            .summarize_batch(transcripts.path(), &videos, out.path())
            .await;

        let entries: Vec<PathBuf> = std::fs::read_dir(out.path())
            .unwrap()
            .map(|e| e.unwrap().path())
            .collect();
        assert_eq!(entries, vec![out.path().join("A.txt.summary.md")]);
    }

    #[test]
    fn test_write_new_artifact_does_not_clobber() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("x.summary.md");

        assert!(write_new_artifact(&path, "first").unwrap());
        assert!(!write_new_artifact(&path, "second").unwrap());
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "first");
    }
}
