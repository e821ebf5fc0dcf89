use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tracing::{debug, info, warn};

use super::collision::{resolve_destination, ClaimedPaths, DEFAULT_MAX_COLLISION_SUFFIX};
use super::errors::{BatchError, ItemError};
use super::guard::DestinationGuard;
use super::policy::compute_base_name;
use super::transfer::{FsTransfer, Transfer};
use super::types::{
    BatchResult, ErrorPolicy, ItemOutcome, ItemResult, PlanTarget, PlannedItem, RenameConfig,
    RenamePlan, SourceEntry, TransferMode,
};

/// Cooperative cancellation flag, checked between entries
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// Options that shape execution but not naming
#[derive(Debug, Clone, Copy)]
pub struct ExecuteOptions {
    pub error_policy: ErrorPolicy,
    pub max_collision_suffix: usize,
}

impl Default for ExecuteOptions {
    fn default() -> Self {
        Self {
            error_policy: ErrorPolicy::Continue,
            max_collision_suffix: DEFAULT_MAX_COLLISION_SUFFIX,
        }
    }
}

/// Emitted once per attempted entry, in input order
#[derive(Debug, Clone, PartialEq)]
pub struct ProgressEvent {
    /// Entries attempted so far, including this one
    pub completed: usize,
    pub total: usize,
    pub source: PathBuf,
    pub status: ProgressStatus,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ProgressStatus {
    Succeeded(PathBuf),
    Failed(String),
}

impl ProgressEvent {
    /// `completed / total`, in `[0, 1]`
    pub fn fraction(&self) -> f64 {
        if self.total == 0 {
            return 1.0;
        }
        self.completed as f64 / self.total as f64
    }
}

/// Runs a batch: names every entry, resolves collisions, transfers files
#[derive(Debug, Clone, Default)]
pub struct BatchExecutor<T = FsTransfer> {
    transfer: T,
    options: ExecuteOptions,
}

impl BatchExecutor<FsTransfer> {
    pub fn new() -> Self {
        Self::default()
    }
}

impl<T: Transfer> BatchExecutor<T> {
    pub fn with_transfer(transfer: T) -> Self {
        Self {
            transfer,
            options: ExecuteOptions::default(),
        }
    }

    pub fn with_options(mut self, options: ExecuteOptions) -> Self {
        self.options = options;
        self
    }

    pub fn options(&self) -> &ExecuteOptions {
        &self.options
    }

    /// Resolve every destination without transferring anything
    pub fn plan(
        &self,
        entries: &[SourceEntry],
        config: &RenameConfig,
        mode: TransferMode,
    ) -> Result<RenamePlan, BatchError> {
        let folder = config
            .resolve_destination(entries)
            .ok_or(BatchError::NoDestination)?;
        validate_destination(&folder)?;

        Ok(self.build_plan(entries, config, mode, folder))
    }

    /// Run the whole batch
    ///
    /// Only destination problems are returned as `Err`; per-entry failures
    /// are recorded in the result. `on_progress` is called once per
    /// attempted entry, never for skipped ones.
    pub fn execute<F>(
        &self,
        entries: &[SourceEntry],
        config: &RenameConfig,
        mode: TransferMode,
        cancel: &CancelToken,
        mut on_progress: F,
    ) -> Result<BatchResult, BatchError>
    where
        F: FnMut(ProgressEvent),
    {
        if entries.is_empty() {
            debug!("Empty batch, nothing to do");
            return Ok(BatchResult::empty(mode));
        }

        let folder = config
            .resolve_destination(entries)
            .ok_or(BatchError::NoDestination)?;
        validate_destination(&folder)?;
        let _guard = DestinationGuard::acquire(&folder)?;

        info!(
            count = entries.len(),
            mode = mode.description(),
            folder = ?folder,
            "Starting batch"
        );

        let plan = self.build_plan(entries, config, mode, folder);
        let result = self.run_plan(plan, mode, cancel, &mut on_progress);

        info!(
            succeeded = result.succeeded(),
            failed = result.failed(),
            skipped = result.skipped(),
            cancelled = result.cancelled,
            "Batch finished"
        );

        Ok(result)
    }

    fn build_plan(
        &self,
        entries: &[SourceEntry],
        config: &RenameConfig,
        mode: TransferMode,
        folder: PathBuf,
    ) -> RenamePlan {
        let mut claimed = ClaimedPaths::new();
        let mut moved: HashMap<&Path, usize> = HashMap::new();
        let limit = self.options.max_collision_suffix;

        let items = entries
            .iter()
            .enumerate()
            .map(|(index, entry)| {
                // A file can only be moved once
                if mode == TransferMode::Move {
                    if let Some(&first) = moved.get(entry.path.as_path()) {
                        warn!(source = ?entry.path, first, "Duplicate source");
                        return PlannedItem {
                            entry: entry.clone(),
                            target: PlanTarget::Duplicate { first },
                        };
                    }
                    moved.insert(entry.path.as_path(), index);
                }

                let base = compute_base_name(entry, index, config);

                // A file being moved does not collide with itself
                let occupied = |candidate: &Path| {
                    if mode == TransferMode::Move && candidate == entry.path.as_path() {
                        return false;
                    }
                    self.transfer.exists(candidate)
                };

                let target = match resolve_destination(
                    &folder,
                    &base,
                    entry.extension.as_deref(),
                    &mut claimed,
                    limit,
                    occupied,
                ) {
                    Some(path) => {
                        debug!(source = ?entry.path, destination = ?path, "Planned");
                        PlanTarget::Resolved(path)
                    }
                    None => {
                        warn!(source = ?entry.path, limit, "No free destination name");
                        PlanTarget::Exhausted { limit }
                    }
                };

                PlannedItem {
                    entry: entry.clone(),
                    target,
                }
            })
            .collect();

        RenamePlan {
            destination_folder: folder,
            items,
        }
    }

    fn run_plan<F>(
        &self,
        plan: RenamePlan,
        mode: TransferMode,
        cancel: &CancelToken,
        on_progress: &mut F,
    ) -> BatchResult
    where
        F: FnMut(ProgressEvent),
    {
        let total = plan.len();
        let mut items = Vec::with_capacity(total);
        let mut cancelled = false;
        let mut aborted = false;

        for (index, planned) in plan.items.into_iter().enumerate() {
            if !cancelled && !aborted && cancel.is_cancelled() {
                info!(remaining = total - index, "Batch cancelled");
                cancelled = true;
            }

            if cancelled || aborted {
                items.push(ItemResult {
                    source: planned.entry.path,
                    outcome: ItemOutcome::Skipped,
                });
                continue;
            }

            let (status, outcome) = match self.perform(&planned, mode) {
                Ok(path) => (
                    ProgressStatus::Succeeded(path.clone()),
                    ItemOutcome::Success(path),
                ),
                Err(err) => {
                    warn!(source = ?planned.entry.path, error = %err, "Entry failed");
                    if self.options.error_policy == ErrorPolicy::Abort {
                        info!("Stopping batch after first failure");
                        aborted = true;
                    }
                    (ProgressStatus::Failed(err.to_string()), ItemOutcome::Failure(err))
                }
            };

            on_progress(ProgressEvent {
                completed: index + 1,
                total,
                source: planned.entry.path.clone(),
                status,
            });

            items.push(ItemResult {
                source: planned.entry.path,
                outcome,
            });
        }

        BatchResult {
            mode,
            destination_folder: Some(plan.destination_folder),
            items,
            cancelled,
        }
    }

    fn perform(&self, planned: &PlannedItem, mode: TransferMode) -> Result<PathBuf, ItemError> {
        let source = &planned.entry.path;

        let destination = match &planned.target {
            PlanTarget::Resolved(path) => path,
            PlanTarget::Exhausted { limit } => {
                return Err(ItemError::CollisionExhausted { limit: *limit })
            }
            PlanTarget::Duplicate { first } => {
                return Err(ItemError::DuplicateSource { first: *first })
            }
        };

        if mode == TransferMode::Move && destination == source {
            debug!(path = ?source, "Already in place");
            return Ok(destination.clone());
        }

        let attempt = match mode {
            TransferMode::Copy => self.transfer.copy(source, destination),
            TransferMode::Move => self.transfer.move_file(source, destination),
        };

        match attempt {
            Ok(()) => {
                info!(
                    "{}: {} -> {}",
                    mode.description(),
                    planned.entry.file_name(),
                    destination.display()
                );
                Ok(destination.clone())
            }
            Err(e) if !self.transfer.exists(source) => Err(ItemError::SourceUnreadable { source: e }),
            Err(e) => Err(ItemError::TransferFailed {
                mode,
                to: destination.clone(),
                source: e,
            }),
        }
    }
}

/// Destination must exist, be a directory, and accept new files
fn validate_destination(folder: &Path) -> Result<(), BatchError> {
    let metadata = fs::metadata(folder).map_err(|e| match e.kind() {
        ErrorKind::PermissionDenied => BatchError::DestinationNotWritable {
            path: folder.to_path_buf(),
            source: e,
        },
        _ => BatchError::DestinationNotFound(folder.to_path_buf()),
    })?;

    if !metadata.is_dir() {
        return Err(BatchError::DestinationNotADirectory(folder.to_path_buf()));
    }

    tempfile::tempfile_in(folder).map_err(|e| BatchError::DestinationNotWritable {
        path: folder.to_path_buf(),
        source: e,
    })?;

    Ok(())
}
