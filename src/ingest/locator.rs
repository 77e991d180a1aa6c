use crate::ingest::errors::IngestError;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Finds the transaction export inside `folder`.
///
/// A file qualifies when its name starts with `pattern` and ends with `extension`,
/// both compared case-insensitively. Only the folder itself is searched, not its
/// subfolders.
///
/// When several files qualify the first one reported by the operating system wins.
/// Directory listing order differs between platforms and file systems and is not
/// sorted here, so keep a single export in the input folder.
///
/// # Errors
/// - `FolderNotFound` if `folder` does not exist.
/// - `FileNotFound` if no file in it qualifies.
pub fn locate_file(folder: &Path, pattern: &str, extension: &str) -> Result<PathBuf, IngestError> {
    debug!("Input argument - folder: {}", folder.display());
    debug!("Input argument - pattern: {pattern}");
    debug!("Input argument - extension: {extension}");

    let entries = fs::read_dir(folder).map_err(|error| match error.kind() {
        ErrorKind::NotFound => IngestError::folder_not_found(folder),
        _ => IngestError::io(folder, error)
    })?;

    let pattern_lower = pattern.to_lowercase();
    let extension_lower = extension.to_lowercase();
    let mut inspected = 0usize;

    for entry in entries {
        let entry = entry.map_err(|error| IngestError::io(folder, error))?;
        inspected += 1;

        let name = entry.file_name().to_string_lossy().to_lowercase();

        if name.starts_with(&pattern_lower) && name.ends_with(&extension_lower) && entry.path().is_file() {
            let path = entry.path();
            debug!("Selected file: {}", path.display());

            return Ok(path)
        }
    }

    debug!("Number of entries inspected in folder: {inspected}");

    Err(IngestError::file_not_found(folder, pattern, extension))
}
