//! Output document: load/save with atomic writes

use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::models::{PipelineOutput, TranscriptResult};

/// Default output file name, relative to the working directory
pub const DEFAULT_OUTPUT_FILENAME: &str = "simplified_transcripts.json";

fn temp_path(path: &Path, file_name: &std::ffi::OsStr) -> PathBuf {
    let mut temp_name = OsString::from(file_name);
    temp_name.push(".tmp");
    path.with_file_name(temp_name)
}

/// Save all simplified transcripts as one pretty-printed JSON array
///
/// Written to a temp file next to `path` and renamed into place, so readers never see a
/// partially written document. Missing parent directories are created.
pub fn write_transcripts(path: &Path, transcripts: &[TranscriptResult]) -> Result<()> {
    let file_name = path
        .file_name()
        .with_context(|| format!("Output path has no file name: {}", path.display()))?;

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        if !parent.exists() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create output directory {}", parent.display())
            })?;
        }
    }

    let json =
        serde_json::to_string_pretty(transcripts).context("Failed to serialize transcripts")?;

    let temp = temp_path(path, file_name);
    fs::write(&temp, json)
        .with_context(|| format!("Failed to write temp file {}", temp.display()))?;
    fs::rename(&temp, path)
        .with_context(|| format!("Failed to move output into place at {}", path.display()))?;

    Ok(())
}

/// Load a document previously written by [`write_transcripts`]
pub fn read_transcripts(path: &Path) -> Result<PipelineOutput> {
    let json = fs::read_to_string(path)
        .with_context(|| format!("Failed to open output file: {}", path.display()))?;
    serde_json::from_str(&json)
        .with_context(|| format!("Failed to parse output file: {}", path.display()))
}
