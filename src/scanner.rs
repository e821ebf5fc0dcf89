use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, trace};

use crate::rename::SourceEntry;

#[derive(Error, Debug)]
pub enum ScannerError {
    #[error("Path does not exist: {0}")]
    PathNotFound(PathBuf),

    #[error("Permission denied: {0}")]
    PermissionDenied(PathBuf),

    #[error("Failed to read directory: {0}")]
    IoError(#[from] std::io::Error),
}

/// Turn user-supplied paths into batch entries
///
/// Files are kept in the order given. A directory contributes its direct,
/// non-hidden files sorted by name; subdirectories are not descended into.
/// Relative paths are resolved against the current directory, so every
/// entry has a parent folder.
pub fn collect_sources(paths: &[PathBuf]) -> Result<Vec<SourceEntry>, ScannerError> {
    let mut entries = Vec::new();

    for path in paths {
        let path = &absolute(path)?;
        let metadata = fs::metadata(path).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => ScannerError::PathNotFound(path.clone()),
            std::io::ErrorKind::PermissionDenied => ScannerError::PermissionDenied(path.clone()),
            _ => ScannerError::IoError(e),
        })?;

        if metadata.is_dir() {
            entries.extend(scan_folder(path)?);
        } else {
            trace!(path = ?path, "Adding file");
            entries.push(SourceEntry::new(path.clone()));
        }
    }

    debug!(count = entries.len(), "Sources collected");

    Ok(entries)
}

fn absolute(path: &Path) -> Result<PathBuf, ScannerError> {
    if path.is_absolute() {
        return Ok(path.to_path_buf());
    }
    Ok(env::current_dir()?.join(path))
}

/// Direct files of a folder, one level deep
pub fn scan_folder(target: &Path) -> Result<Vec<SourceEntry>, ScannerError> {
    debug!(path = ?target, "Scanning folder");

    let read_dir = fs::read_dir(target).map_err(|e| {
        if e.kind() == std::io::ErrorKind::PermissionDenied {
            ScannerError::PermissionDenied(target.to_path_buf())
        } else {
            ScannerError::IoError(e)
        }
    })?;

    let mut files = Vec::new();

    for entry in read_dir {
        let entry = entry?;
        let path = entry.path();

        if !path.is_file() {
            trace!(path = ?path, "Skipping non-file");
            continue;
        }

        let hidden = path
            .file_name()
            .map(|n| n.to_string_lossy().starts_with('.'))
            .unwrap_or(true);
        if hidden {
            trace!(path = ?path, "Skipping hidden file");
            continue;
        }

        files.push(path);
    }

    files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));

    Ok(files.into_iter().map(SourceEntry::new).collect())
}
