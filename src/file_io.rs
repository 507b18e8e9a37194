//! Reading input records and writing enriched output.
//!
//! Output is written to a temporary file next to the destination and renamed
//! into place, so a failed run never leaves a truncated document behind.

use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::models::{EnrichedRecord, InputRecord};

/// Loads the input file (a JSON array of traceroute results).
///
/// # Errors
///
/// Fails if the file cannot be read or is not a JSON array of records.
pub async fn read_records(path: &Path) -> Result<Vec<InputRecord>> {
    let bytes = tokio::fs::read(path)
        .await
        .with_context(|| format!("Failed to read input file: {}", path.display()))?;

    serde_json::from_slice(&bytes)
        .with_context(|| format!("Failed to parse input file: {}", path.display()))
}

/// Serializes records as a pretty-printed (2-space) JSON array.
pub fn render_records(records: &[EnrichedRecord]) -> Result<Vec<u8>> {
    serde_json::to_vec_pretty(records).context("Failed to serialize enriched records")
}

/// Writes `records` to `path` atomically.
///
/// # Errors
///
/// Fails if serialization fails or the file cannot be written or renamed into place.
pub async fn write_records(path: &Path, records: &[EnrichedRecord]) -> Result<()> {
    let buffer = render_records(records)?;
    let path = path.to_path_buf();

    tokio::task::spawn_blocking(move || persist_atomically(&path, &buffer))
        .await
        .context("Output writer task failed")?
}

fn persist_atomically(path: &Path, contents: &[u8]) -> Result<()> {
    let dir = parent_dir(path);
    let mut tmp = tempfile::NamedTempFile::new_in(&dir)
        .with_context(|| format!("Failed to create temporary file in {}", dir.display()))?;

    tmp.write_all(contents)
        .and_then(|_| tmp.as_file().sync_all())
        .with_context(|| format!("Failed to write output for {}", path.display()))?;

    tmp.persist(path)
        .with_context(|| format!("Failed to write output file: {}", path.display()))?;
    Ok(())
}

fn parent_dir(path: &Path) -> PathBuf {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    }
}
