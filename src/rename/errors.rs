use std::path::PathBuf;
use thiserror::Error;

use super::types::TransferMode;

/// Errors that stop a batch before any file is touched
#[derive(Error, Debug)]
pub enum BatchError {
    #[error("No destination folder: none configured and the first source has no parent")]
    NoDestination,

    #[error("Destination folder not found: {0}")]
    DestinationNotFound(PathBuf),

    #[error("Destination is not a directory: {0}")]
    DestinationNotADirectory(PathBuf),

    #[error("Destination folder is not writable: {path}")]
    DestinationNotWritable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Another batch is already writing to {0}")]
    DestinationBusy(PathBuf),

    #[error("Batch worker stopped without reporting a result")]
    WorkerLost,
}

/// Errors recorded against a single entry; the batch carries on
#[derive(Error, Debug)]
pub enum ItemError {
    #[error("Source is unreadable: {source}")]
    SourceUnreadable {
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to {} to {}: {source}", .mode.description(), .to.display())]
    TransferFailed {
        mode: TransferMode,
        to: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("No free destination name within {limit} numbered suffixes")]
    CollisionExhausted { limit: usize },

    #[error("Source already moved by entry {}", .first + 1)]
    DuplicateSource { first: usize },
}
