mod codes;

pub use codes::ExitCode;

use crate::rename::BatchError;
use crate::report::ReportError;
use crate::scanner::ScannerError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Source not found: {path}")]
    SourceNotFound { path: PathBuf },

    #[error("Permission denied: {path}")]
    PermissionDenied { path: PathBuf },

    #[error("Destination folder not found: {path}")]
    DestinationNotFound { path: PathBuf },

    #[error("Destination is not a directory: {path}")]
    NotADirectory { path: PathBuf },

    #[error("No destination folder could be determined")]
    NoDestination,

    #[error("Destination folder is busy: {path}")]
    DestinationBusy { path: PathBuf },

    #[error("{failed} of {total} files failed")]
    PartialFailure { failed: usize, total: usize },

    #[error("Cancelled after {completed} files")]
    Cancelled { completed: usize, skipped: usize },

    #[error("Report error: {message}")]
    ReportError { message: String },

    #[error("{0}")]
    Other(String),
}

impl AppError {
    pub fn exit_code(&self) -> ExitCode {
        match self {
            AppError::SourceNotFound { .. } => ExitCode::SourceNotFound,
            AppError::PermissionDenied { .. } => ExitCode::PermissionError,
            AppError::DestinationNotFound { .. } => ExitCode::DestinationNotFound,
            AppError::NotADirectory { .. } => ExitCode::DestinationNotFound,
            AppError::NoDestination => ExitCode::DestinationNotFound,
            AppError::DestinationBusy { .. } => ExitCode::DestinationBusy,
            AppError::PartialFailure { .. } => ExitCode::PartialFailure,
            AppError::Cancelled { .. } => ExitCode::Cancelled,
            AppError::ReportError { .. } => ExitCode::ReportError,
            AppError::Other(_) => ExitCode::GeneralError,
        }
    }

    pub fn detailed_message(&self) -> String {
        match self {
            AppError::SourceNotFound { path } => {
                format!(
                    "The specified source does not exist:\n  {}\n\n\
                     Please verify the path and try again.",
                    path.display()
                )
            }

            AppError::PermissionDenied { path } => {
                format!(
                    "Permission denied when accessing:\n  {}\n\n\
                     Please check file permissions or run with appropriate privileges.",
                    path.display()
                )
            }

            AppError::DestinationNotFound { path } => {
                format!(
                    "The destination folder does not exist:\n  {}\n\n\
                     Create it first or pass a different --dest.",
                    path.display()
                )
            }

            AppError::NotADirectory { path } => {
                format!(
                    "The destination is not a directory:\n  {}\n\n\
                     Please provide a folder path for --dest.",
                    path.display()
                )
            }

            AppError::NoDestination => String::from(
                "No destination folder was given and none could be derived \
                 from the first source.\n\n\
                 Pass --dest or set RENOMBRATOR_DESTINATION.",
            ),

            AppError::DestinationBusy { path } => {
                format!(
                    "Another batch is already writing to:\n  {}\n\n\
                     Wait for it to finish and try again.",
                    path.display()
                )
            }

            AppError::PartialFailure { failed, total } => {
                format!(
                    "{} of {} files could not be processed.\n\
                     The remaining files were processed normally; see the messages above.",
                    failed, total
                )
            }

            AppError::Cancelled { completed, skipped } => {
                format!(
                    "Batch cancelled.\n\
                     - {} files were processed and remain in place\n\
                     - {} files were skipped",
                    completed, skipped
                )
            }

            AppError::ReportError { message } => {
                format!(
                    "Failed to write the batch report:\n  {}\n\n\
                     The files themselves were processed.",
                    message
                )
            }

            AppError::Other(message) => message.clone(),
        }
    }
}

impl From<ScannerError> for AppError {
    fn from(err: ScannerError) -> Self {
        match err {
            ScannerError::PathNotFound(path) => AppError::SourceNotFound { path },
            ScannerError::PermissionDenied(path) => AppError::PermissionDenied { path },
            ScannerError::IoError(e) => AppError::Other(format!("I/O error: {}", e)),
        }
    }
}

impl From<BatchError> for AppError {
    fn from(err: BatchError) -> Self {
        match err {
            BatchError::NoDestination => AppError::NoDestination,
            BatchError::DestinationNotFound(path) => AppError::DestinationNotFound { path },
            BatchError::DestinationNotADirectory(path) => AppError::NotADirectory { path },
            BatchError::DestinationNotWritable { path, .. } => AppError::PermissionDenied { path },
            BatchError::DestinationBusy(path) => AppError::DestinationBusy { path },
            BatchError::WorkerLost => AppError::Other(BatchError::WorkerLost.to_string()),
        }
    }
}

impl From<ReportError> for AppError {
    fn from(err: ReportError) -> Self {
        AppError::ReportError {
            message: err.to_string(),
        }
    }
}
