//! Prompt templates for Recap.
//!
//! Prompts can be customized by placing TOML files in the custom prompts directory.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Collection of all prompt templates.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
#[derive(Default)]
pub struct Prompts {
    pub summary: SummaryPrompts,
}

/// Prompt used for every summarization call, per video and for the playlist digest.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SummaryPrompts {
    pub system: String,
}

impl Default for SummaryPrompts {
    fn default() -> Self {
        Self {
            system: r#"You are an expert at summarizing spoken content. You receive the transcript of a video (or a collection of earlier summaries) and write a clear, faithful summary in Markdown.

A good summary:
- Opens with one or two sentences stating what the content is about
- Lists the key points, arguments and conclusions as concise bullet points
- Keeps concrete facts, numbers, names and recommendations that matter
- Groups related points under short headings when the content covers several topics
- Leaves out filler: greetings, sponsor reads, subscription requests, sign-offs

Rules:
- Only use information present in the input; never invent details
- Write in the same language as the input
- Do not mention that you are summarizing a transcript"#
                .to_string(),
        }
    }
}

impl Prompts {
    /// Load prompts, overriding defaults from `summary.toml` in the custom directory.
    pub fn load(custom_dir: Option<&str>) -> crate::error::Result<Self> {
        let mut prompts = Prompts::default();

        if let Some(dir) = custom_dir {
            let custom_path = PathBuf::from(shellexpand::tilde(dir).to_string());

            let summary_path = custom_path.join("summary.toml");
            if summary_path.exists() {
                let content = std::fs::read_to_string(&summary_path)?;
                prompts.summary = toml::from_str(&content)?;
            }
        }

        Ok(prompts)
    }
}
