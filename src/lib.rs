pub mod config;
pub mod error;
pub mod logging;
pub mod rename;
pub mod report;
pub mod scanner;

pub use config::{settings_from_env, EnvSettings};
pub use error::{AppError, ExitCode};
pub use rename::{
    compute_base_name, spawn_batch, BatchError, BatchEvent, BatchExecutor, BatchHandle,
    BatchResult, CancelToken, Capitalization, ErrorPolicy, ExecuteOptions, ItemError, ItemOutcome,
    ProgressEvent, RenameConfig, RenamePlan, SourceEntry, TransferMode,
};
pub use report::{write_report, BatchReport, ReportError};
pub use scanner::{collect_sources, scan_folder, ScannerError};
