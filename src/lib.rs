//! Recap - Playlist Transcript Summarization
//!
//! A CLI tool for downloading the transcripts of a video playlist and
//! summarizing them with a local (or any OpenAI-compatible) LLM.
//!
//! # Overview
//!
//! Recap allows you to:
//! - Fetch the captions of every video in a YouTube playlist as text files
//! - Summarize each transcript into its own Markdown file
//! - Reduce all summaries of a playlist into a single digest
//!
//! Summarization is resumable: summaries that already exist are never
//! recomputed, and one failing video does not stop the batch.
//!
//! # Architecture
//!
//! - `config` - Settings and prompt templates
//! - `backend` - Client configuration for the completion backend
//! - `completion` - Text generation abstraction
//! - `summarizer` - Summarization with a fixed prompt and model
//! - `pipeline` - Map stage (per video) and reduce stage (playlist digest)
//! - `source` - Playlist listing and transcript fetching
//! - `library` - Transcript directories on disk
//!
//! # Example
//!
//! ```rust,no_run
//! use recap::config::Settings;
//! use recap::pipeline::Pipeline;
//! use recap::summarizer::Summarizer;
//! use std::path::Path;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let settings = Settings::load()?;
//!     let pipeline = Pipeline::new(Summarizer::from_settings(&settings, None)?);
//!
//!     let videos = recap::library::list_transcripts(Path::new("transcripts/PL123"))?;
//!     let result = pipeline
//!         .summarize_batch(Path::new("transcripts/PL123"), &videos, Path::new("summaries/PL123"))
//!         .await;
//!     println!("{} succeeded, {} failed", result.succeeded, result.failed);
//!
//!     let digest = pipeline.reduce(&result.output_dir).await?;
//!     println!("{}", digest.content);
//!
//!     Ok(())
//! }
//! ```

pub mod backend;
pub mod cli;
pub mod completion;
pub mod config;
pub mod error;
pub mod library;
pub mod pipeline;
pub mod source;
pub mod summarizer;

pub use error::{RecapError, Result};
