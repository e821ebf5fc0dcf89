use std::fs::{self, File};
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::rename::{BatchResult, ItemOutcome, TransferMode};

pub const REPORT_VERSION: &str = "1.0";

#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    #[error("Failed to write report file: {0}")]
    WriteError(#[from] std::io::Error),

    #[error("Failed to serialize report: {0}")]
    SerializeError(#[from] serde_json::Error),
}

/// Serialized summary of one finished batch
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchReport {
    /// Schema version for compatibility
    pub version: String,

    pub executed_at: DateTime<Utc>,

    pub mode: ReportMode,

    pub destination_folder: Option<PathBuf>,

    pub tool_version: String,

    pub cancelled: bool,

    pub succeeded: usize,
    pub failed: usize,
    pub skipped: usize,

    pub items: Vec<ReportItem>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ReportMode {
    Copy,
    Move,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ReportStatus {
    Success,
    Failure,
    Skipped,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportItem {
    pub source: PathBuf,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub destination: Option<PathBuf>,

    pub status: ReportStatus,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

impl From<TransferMode> for ReportMode {
    fn from(mode: TransferMode) -> Self {
        match mode {
            TransferMode::Copy => ReportMode::Copy,
            TransferMode::Move => ReportMode::Move,
        }
    }
}

impl BatchReport {
    pub fn from_result(result: &BatchResult) -> Self {
        let items = result
            .items
            .iter()
            .map(|item| {
                let (destination, status, reason) = match &item.outcome {
                    ItemOutcome::Success(path) => (Some(path.clone()), ReportStatus::Success, None),
                    ItemOutcome::Failure(err) => (None, ReportStatus::Failure, Some(err.to_string())),
                    ItemOutcome::Skipped => (None, ReportStatus::Skipped, None),
                };
                ReportItem {
                    source: item.source.clone(),
                    destination,
                    status,
                    reason,
                }
            })
            .collect();

        Self {
            version: REPORT_VERSION.to_string(),
            executed_at: Utc::now(),
            mode: result.mode.into(),
            destination_folder: result.destination_folder.clone(),
            tool_version: env!("CARGO_PKG_VERSION").to_string(),
            cancelled: result.cancelled,
            succeeded: result.succeeded(),
            failed: result.failed(),
            skipped: result.skipped(),
            items,
        }
    }

    pub fn generate_filename(&self) -> String {
        let timestamp = self.executed_at.format("%Y%m%d-%H%M%S");
        format!("renombrator-report-{}.json", timestamp)
    }
}

/// Write a JSON report for a finished batch into `dir`
pub fn write_report(result: &BatchResult, dir: &Path) -> Result<PathBuf, ReportError> {
    let report = BatchReport::from_result(result);
    write_report_file(&report, dir)
}

pub fn write_report_file(report: &BatchReport, dir: &Path) -> Result<PathBuf, ReportError> {
    let file_path = dir.join(report.generate_filename());

    if file_path.exists() {
        warn!("Report file already exists: {:?}", file_path);
        let unique_filename = format!(
            "renombrator-report-{}-{}.json",
            report.executed_at.format("%Y%m%d-%H%M%S"),
            report.executed_at.timestamp_subsec_millis()
        );
        return write_to_path(report, &dir.join(unique_filename));
    }

    write_to_path(report, &file_path)
}

fn write_to_path(report: &BatchReport, path: &Path) -> Result<PathBuf, ReportError> {
    let temp_path = path.with_extension("json.tmp");

    {
        let file = File::create(&temp_path)?;
        let writer = BufWriter::new(file);
        serde_json::to_writer_pretty(writer, report)?;
    }

    fs::rename(&temp_path, path)?;

    info!("Report written to: {:?}", path);

    Ok(path.to_path_buf())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rename::{ItemError, ItemResult};
    use tempfile::tempdir;

    fn create_test_result() -> BatchResult {
        BatchResult {
            mode: TransferMode::Move,
            destination_folder: Some(PathBuf::from("/out")),
            items: vec![
                ItemResult {
                    source: PathBuf::from("/in/a.txt"),
                    outcome: ItemOutcome::Success(PathBuf::from("/out/a_001.txt")),
                },
                ItemResult {
                    source: PathBuf::from("/in/b.txt"),
                    outcome: ItemOutcome::Failure(ItemError::CollisionExhausted { limit: 5 }),
                },
                ItemResult {
                    source: PathBuf::from("/in/c.txt"),
                    outcome: ItemOutcome::Skipped,
                },
            ],
            cancelled: true,
        }
    }

    #[test]
    fn test_generate_filename() {
        let mut report = BatchReport::from_result(&create_test_result());
        report.executed_at = DateTime::parse_from_rfc3339("2026-01-15T10:30:45Z")
            .unwrap()
            .with_timezone(&Utc);

        assert_eq!(
            report.generate_filename(),
            "renombrator-report-20260115-103045.json"
        );
    }

    #[test]
    fn test_report_content() {
        let dir = tempdir().unwrap();
        let path = write_report(&create_test_result(), dir.path()).unwrap();
        let content = fs::read_to_string(&path).unwrap();

        let report: BatchReport = serde_json::from_str(&content).unwrap();

        assert_eq!(report.version, REPORT_VERSION);
        assert_eq!(report.mode, ReportMode::Move);
        assert!(report.cancelled);
        assert_eq!((report.succeeded, report.failed, report.skipped), (1, 1, 1));
        assert_eq!(report.items[0].status, ReportStatus::Success);
        assert_eq!(
            report.items[0].destination.as_deref(),
            Some(Path::new("/out/a_001.txt"))
        );
        assert!(report.items[1].reason.as_deref().unwrap().contains("5"));
        assert_eq!(report.items[2].status, ReportStatus::Skipped);
    }

    #[test]
    fn test_status_serialization() {
        assert_eq!(
            serde_json::to_string(&ReportStatus::Skipped).unwrap(),
            "\"skipped\""
        );
        assert_eq!(serde_json::to_string(&ReportMode::Copy).unwrap(), "\"copy\"");
    }

    #[test]
    fn test_atomic_write() {
        let dir = tempdir().unwrap();
        let path = write_report(&create_test_result(), dir.path()).unwrap();

        assert!(path.exists());
        assert!(!path.with_extension("json.tmp").exists());
    }
}
