mod collision;
mod errors;
mod executor;
mod guard;
mod policy;
mod transfer;
mod types;
mod worker;

pub use collision::{resolve_destination, ClaimedPaths, DEFAULT_MAX_COLLISION_SUFFIX};
pub use errors::{BatchError, ItemError};
pub use executor::{BatchExecutor, CancelToken, ExecuteOptions, ProgressEvent, ProgressStatus};
pub use policy::{apply_capitalization, compute_base_name, sequence_number};
pub use transfer::{FsTransfer, Transfer};
pub use types::{
    BatchResult, Capitalization, ErrorPolicy, ItemOutcome, ItemResult, PlanTarget, PlannedItem,
    RenameConfig, RenamePlan, SourceEntry, TransferMode,
};
pub use worker::{spawn_batch, BatchEvent, BatchHandle};
