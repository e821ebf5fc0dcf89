use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

use once_cell::sync::Lazy;
use tracing::debug;

use super::errors::BatchError;

/// Destination folders with a batch currently writing to them
static ACTIVE_DESTINATIONS: Lazy<Mutex<HashSet<PathBuf>>> = Lazy::new(|| Mutex::new(HashSet::new()));

fn active() -> MutexGuard<'static, HashSet<PathBuf>> {
    // A panicking holder cannot leave the set half-updated
    ACTIVE_DESTINATIONS
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner())
}

/// Marks a destination folder as owned by one batch until dropped
#[derive(Debug)]
pub struct DestinationGuard {
    key: PathBuf,
}

impl DestinationGuard {
    pub fn acquire(folder: &Path) -> Result<Self, BatchError> {
        let key = fs::canonicalize(folder).unwrap_or_else(|_| folder.to_path_buf());

        if !active().insert(key.clone()) {
            return Err(BatchError::DestinationBusy(folder.to_path_buf()));
        }

        debug!(folder = ?key, "Destination acquired");
        Ok(Self { key })
    }
}

impl Drop for DestinationGuard {
    fn drop(&mut self) {
        active().remove(&self.key);
        debug!(folder = ?self.key, "Destination released");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_second_acquire_is_busy() {
        let dir = tempdir().unwrap();

        let first = DestinationGuard::acquire(dir.path()).unwrap();
        let second = DestinationGuard::acquire(dir.path());
        assert!(matches!(second, Err(BatchError::DestinationBusy(_))));

        drop(first);
        assert!(DestinationGuard::acquire(dir.path()).is_ok());
    }

    #[test]
    fn test_distinct_folders_do_not_conflict() {
        let a = tempdir().unwrap();
        let b = tempdir().unwrap();

        let _ga = DestinationGuard::acquire(a.path()).unwrap();
        let _gb = DestinationGuard::acquire(b.path()).unwrap();
    }

    #[test]
    fn test_equivalent_paths_share_a_guard() {
        let dir = tempdir().unwrap();
        std::fs::create_dir(dir.path().join("sub")).unwrap();

        let _g = DestinationGuard::acquire(&dir.path().join("sub")).unwrap();
        let dotted = dir.path().join("sub").join("..").join("sub");
        assert!(matches!(
            DestinationGuard::acquire(&dotted),
            Err(BatchError::DestinationBusy(_))
        ));
    }
}
