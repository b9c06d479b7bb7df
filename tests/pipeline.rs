//! Map and reduce over a small playlist through the public API.

use async_trait::async_trait;
use recap::completion::CompletionClient;
use recap::pipeline::{summary_path, Pipeline, VideoOutcome};
use recap::summarizer::Summarizer;
use recap::{RecapError, Result};
use std::sync::Arc;

struct EchoClient;

#[async_trait]
impl CompletionClient for EchoClient {
    async fn generate(&self, _system_prompt: &str, _model: &str, content: &str) -> Result<String> {
        if content.contains("FAIL") {
            return Err(RecapError::GenerationFailed("refused".to_string()));
        }
        Ok(format!("sum:{}", content))
    }
}

fn pipeline() -> Pipeline {
    Pipeline::new(Summarizer::new(Arc::new(EchoClient), "test-model").unwrap())
}

#[tokio::test]
async fn summarizes_playlist_then_digest() {
    let transcripts = tempfile::tempdir().unwrap();
    let summaries = tempfile::tempdir().unwrap();
    let output = summaries.path().join("PL123");
    std::fs::write(transcripts.path().join("A.txt"), "<A>").unwrap();
    std::fs::write(transcripts.path().join("B.txt"), "<B>").unwrap();

    let videos = vec!["A.txt".to_string(), "B.txt".to_string()];
    let pipeline = pipeline();
    let result = pipeline
        .summarize_batch(transcripts.path(), &videos, &output)
        .await;

    assert_eq!((result.succeeded, result.failed), (2, 0));
    assert_eq!(
        std::fs::read_to_string(summary_path(&output, "A.txt")).unwrap(),
        "sum:<A>"
    );
    assert_eq!(
        std::fs::read_to_string(summary_path(&output, "B.txt")).unwrap(),
        "sum:<B>"
    );

    let digest = pipeline.reduce(&output).await.unwrap();
    assert_eq!(digest.content, "sum:sum:<A>\nsum:<B>");
    assert_eq!(
        std::fs::read_to_string(output.join("summary.md")).unwrap(),
        "sum:sum:<A>\nsum:<B>"
    );
}

#[tokio::test]
async fn rerun_resumes_after_failure() {
    let transcripts = tempfile::tempdir().unwrap();
    let output = tempfile::tempdir().unwrap();
    std::fs::write(transcripts.path().join("A.txt"), "<A>").unwrap();
    std::fs::write(transcripts.path().join("B.txt"), "FAIL").unwrap();

    let videos = vec!["A.txt".to_string(), "B.txt".to_string()];
    let first = pipeline()
        .summarize_batch(transcripts.path(), &videos, output.path())
        .await;
    assert_eq!((first.succeeded, first.failed), (1, 1));
    assert!(!summary_path(output.path(), "B.txt").exists());

    std::fs::write(transcripts.path().join("B.txt"), "<B>").unwrap();
    let second = pipeline()
        .summarize_batch(transcripts.path(), &videos, output.path())
        .await;

    assert_eq!((second.succeeded, second.failed), (2, 0));
    assert!(matches!(
        second.reports[0].outcome,
        VideoOutcome::Skipped { .. }
    ));
    assert!(matches!(
        second.reports[1].outcome,
        VideoOutcome::Summarized { .. }
    ));
}
