use std::collections::HashSet;
use std::path::{Path, PathBuf};

use tracing::trace;

/// Default upper bound for `_<n>` suffixes tried per entry
pub const DEFAULT_MAX_COLLISION_SUFFIX: usize = 10_000;

/// Destination paths reserved by earlier entries of the current batch
///
/// Keys are case-folded while the disk check in `resolve_destination` is
/// exact. Two entries of one batch whose names differ only by case are
/// therefore treated as colliding even on a case-sensitive volume: the
/// later one gets a numbered suffix rather than risking an overwrite on a
/// case-insensitive one.
#[derive(Debug, Default)]
pub struct ClaimedPaths {
    keys: HashSet<String>,
}

impl ClaimedPaths {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, path: &Path) -> bool {
        self.keys.contains(&claim_key(path))
    }

    /// Returns false if the path was already claimed
    pub fn claim(&mut self, path: &Path) -> bool {
        self.keys.insert(claim_key(path))
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}

fn claim_key(path: &Path) -> String {
    path.to_string_lossy().to_lowercase()
}

/// File name from a base name and optional extension
pub fn file_name(base: &str, extension: Option<&str>) -> String {
    match extension {
        Some(ext) => format!("{}.{}", base, ext),
        None => base.to_string(),
    }
}

/// Find a free destination for `base` in `folder` and claim it
///
/// Tries `base.ext`, then `base_1.ext`, `base_2.ext`, ... up to `limit`.
/// `occupied` reports whether a candidate is taken on disk. Returns
/// `None` when every candidate up to the bound is taken.
pub fn resolve_destination<F>(
    folder: &Path,
    base: &str,
    extension: Option<&str>,
    claimed: &mut ClaimedPaths,
    limit: usize,
    occupied: F,
) -> Option<PathBuf>
where
    F: Fn(&Path) -> bool,
{
    let mut candidate = folder.join(file_name(base, extension));
    let mut n = 0usize;

    loop {
        if !claimed.contains(&candidate) && !occupied(&candidate) {
            claimed.claim(&candidate);
            return Some(candidate);
        }

        trace!(candidate = ?candidate, "Destination taken");

        n += 1;
        if n > limit {
            return None;
        }

        let numbered = format!("{}_{}", base, n);
        candidate = folder.join(file_name(&numbered, extension));
    }
}
