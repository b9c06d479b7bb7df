//! On-disk transcript library: playlists and their transcript files.

use crate::error::{RecapError, Result};
use std::path::Path;

/// Transcript file extension.
pub const TRANSCRIPT_EXTENSION: &str = "txt";

/// Names of the playlist directories under `transcripts_dir`, sorted.
pub fn list_playlists(transcripts_dir: &Path) -> Result<Vec<String>> {
    list_entries(transcripts_dir, |file_type, _| file_type.is_dir())
}

/// Names of the transcript files in `playlist_dir`, sorted.
pub fn list_transcripts(playlist_dir: &Path) -> Result<Vec<String>> {
    list_entries(playlist_dir, |file_type, name| {
        file_type.is_file()
            && Path::new(name)
                .extension()
                .is_some_and(|ext| ext == TRANSCRIPT_EXTENSION)
    })
}

fn list_entries<F>(dir: &Path, keep: F) -> Result<Vec<String>>
where
    F: Fn(&std::fs::FileType, &str) -> bool,
{
    let entries = std::fs::read_dir(dir).map_err(|e| RecapError::from_io(e, dir))?;

    let mut names = Vec::new();
    for entry in entries {
        let entry = entry?;
        let Some(name) = entry.file_name().to_str().map(str::to_string) else {
            continue;
        };
        if keep(&entry.file_type()?, &name) {
            names.push(name);
        }
    }

    names.sort();
    Ok(names)
}
