use std::fs;
use std::path::Path;
use std::time::UNIX_EPOCH;

use crate::entry::{ArEntry, DEFAULT_MODE};

/// Builds an [`ArEntry`] describing the file at `path`, stored under
/// `name` in the archive.
///
/// The entry carries the file's size (0 for anything that is not a
/// regular file) and modification time, with uid/gid 0 and
/// [`DEFAULT_MODE`]. Only metadata is touched; the file itself is not
/// opened.
pub fn entry_from_path<P: AsRef<Path>>(path: P, name: impl Into<String>) -> std::io::Result<ArEntry> {
    let meta = fs::metadata(path.as_ref())?;
    let length = if meta.is_file() { meta.len() } else { 0 };
    let last_modified = meta
        .modified()
        .ok()
        .and_then(|t| t.duration_since(UNIX_EPOCH).ok())
        .map(|d| d.as_secs())
        .unwrap_or(0);

    Ok(ArEntry::with_metadata(name, length, 0, 0, DEFAULT_MODE, last_modified))
}
