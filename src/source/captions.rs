//! WebVTT caption flattening.

use regex::Regex;
use std::sync::OnceLock;

fn tag_regex() -> &'static Regex {
    static TAGS: OnceLock<Regex> = OnceLock::new();
    TAGS.get_or_init(|| Regex::new(r"<[^>]*>").expect("Invalid regex"))
}

/// Flatten a WebVTT caption file into plain text, one caption line per line.
///
/// Drops the header, cue identifiers, timing lines, comments and markup.
/// Auto-generated captions repeat each line across rolling cues, so
/// consecutive duplicates are collapsed.
pub fn vtt_to_text(vtt: &str) -> String {
    let mut lines: Vec<String> = Vec::new();
    let mut in_header = true;
    let mut in_note = false;

    for raw in vtt.lines() {
        let line = raw.trim();

        if in_header {
            // Header runs until the first blank line.
            if line.is_empty() {
                in_header = false;
            }
            continue;
        }

        if line.is_empty() {
            in_note = false;
            continue;
        }
        if in_note {
            continue;
        }
        if line.starts_with("NOTE") || line.starts_with("STYLE") || line.starts_with("REGION") {
            in_note = true;
            continue;
        }
        if line.contains("-->") || line.chars().all(|c| c.is_ascii_digit()) {
            continue;
        }

        let text = decode_entities(&tag_regex().replace_all(line, ""));
        let text = text.trim();
        if text.is_empty() || lines.last().is_some_and(|last| last == text) {
            continue;
        }

        lines.push(text.to_string());
    }

    lines.join("\n")
}

fn decode_entities(text: &str) -> String {
    text.replace("&nbsp;", " ")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&amp;", "&")
}
