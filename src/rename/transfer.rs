use std::fs;
use std::io;
use std::path::Path;

use tracing::{debug, warn};

/// Filesystem operations the executor performs
///
/// `FsTransfer` is the real implementation; tests substitute their own to
/// inject failures.
pub trait Transfer {
    /// Whether something already occupies `path`
    fn exists(&self, path: &Path) -> bool;

    /// Copy `from` to `to`, leaving the source in place
    fn copy(&self, from: &Path, to: &Path) -> io::Result<()>;

    /// Move `from` to `to`
    fn move_file(&self, from: &Path, to: &Path) -> io::Result<()>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct FsTransfer;

impl Transfer for FsTransfer {
    fn exists(&self, path: &Path) -> bool {
        // symlink_metadata so a dangling link still counts as taken
        fs::symlink_metadata(path).is_ok()
    }

    fn copy(&self, from: &Path, to: &Path) -> io::Result<()> {
        fs::copy(from, to).map(|_| ())
    }

    fn move_file(&self, from: &Path, to: &Path) -> io::Result<()> {
        match fs::rename(from, to) {
            Ok(()) => Ok(()),
            Err(rename_err) => {
                // Typically a cross-volume move; fall back to copy + delete
                debug!(error = %rename_err, "Rename failed, copying instead");
                if let Err(copy_err) = fs::copy(from, to) {
                    debug!(error = %copy_err, "Fallback copy failed");
                    return Err(rename_err);
                }
                fs::remove_file(from).map_err(|e| {
                    warn!(source = ?from, error = %e, "Copied but could not remove source");
                    io::Error::new(
                        e.kind(),
                        format!("copied to destination but could not remove source: {}", e),
                    )
                })
            }
        }
    }
}
