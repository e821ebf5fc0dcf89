use std::path::{Path, PathBuf};

use super::ItemError;

/// One input file of a batch
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceEntry {
    /// Full path to the source file
    pub path: PathBuf,
    /// File name without its extension
    pub base_name: String,
    /// Text after the last dot, if any
    pub extension: Option<String>,
}

impl SourceEntry {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();

        let base_name = path
            .file_stem()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_default();

        let extension = path
            .extension()
            .map(|e| e.to_string_lossy().to_string())
            .filter(|e| !e.is_empty());

        Self {
            path,
            base_name,
            extension,
        }
    }

    /// Original file name, for display
    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default()
    }
}

/// Case transform applied to the wrapped base name
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Capitalization {
    #[default]
    None,
    FirstLetter,
    AllUpper,
    AllLower,
}

/// Naming policy for one batch
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenameConfig {
    pub capitalization: Capitalization,
    pub add_numbering: bool,
    pub prefix: String,
    pub suffix: String,
    pub clear_names: bool,
    pub custom_base_name: String,
    pub destination_folder: Option<PathBuf>,
}

impl RenameConfig {
    /// Destination folder, falling back to the parent of the first entry
    pub fn resolve_destination(&self, entries: &[SourceEntry]) -> Option<PathBuf> {
        if let Some(folder) = &self.destination_folder {
            return Some(folder.clone());
        }

        entries
            .first()
            .and_then(|e| e.path.parent())
            .filter(|p| !p.as_os_str().is_empty())
            .map(Path::to_path_buf)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TransferMode {
    /// Keep the source in place
    #[default]
    Copy,
    /// Remove the source after transfer
    Move,
}

impl TransferMode {
    pub fn description(&self) -> &'static str {
        match self {
            TransferMode::Copy => "copy",
            TransferMode::Move => "move",
        }
    }
}

/// What to do once an entry fails
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ErrorPolicy {
    /// Record the failure and carry on with the next entry
    #[default]
    Continue,
    /// Stop at the first failure; remaining entries are skipped
    Abort,
}

/// Where a planned entry will land
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlanTarget {
    Resolved(PathBuf),
    /// No free name was found within the retry bound
    Exhausted { limit: usize },
    /// Same source as an earlier entry of a move batch
    Duplicate { first: usize },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedItem {
    pub entry: SourceEntry,
    pub target: PlanTarget,
}

impl PlannedItem {
    pub fn destination(&self) -> Option<&Path> {
        match &self.target {
            PlanTarget::Resolved(path) => Some(path),
            PlanTarget::Exhausted { .. } | PlanTarget::Duplicate { .. } => None,
        }
    }
}

/// Ordered destinations for a batch, computed before any transfer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenamePlan {
    pub destination_folder: PathBuf,
    pub items: Vec<PlannedItem>,
}

impl RenamePlan {
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }
}

/// Outcome of a single entry
#[derive(Debug)]
pub enum ItemOutcome {
    Success(PathBuf),
    Failure(ItemError),
    /// Not attempted because the batch stopped early
    Skipped,
}

impl ItemOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, ItemOutcome::Success(_))
    }

    pub fn is_failure(&self) -> bool {
        matches!(self, ItemOutcome::Failure(_))
    }

    pub fn is_skipped(&self) -> bool {
        matches!(self, ItemOutcome::Skipped)
    }
}

#[derive(Debug)]
pub struct ItemResult {
    pub source: PathBuf,
    pub outcome: ItemOutcome,
}

/// Result of a batch, in input order
#[derive(Debug)]
pub struct BatchResult {
    pub mode: TransferMode,
    pub destination_folder: Option<PathBuf>,
    pub items: Vec<ItemResult>,
    /// Cancellation was observed before every entry was attempted
    pub cancelled: bool,
}

impl BatchResult {
    pub fn empty(mode: TransferMode) -> Self {
        Self {
            mode,
            destination_folder: None,
            items: Vec::new(),
            cancelled: false,
        }
    }

    pub fn succeeded(&self) -> usize {
        self.items.iter().filter(|i| i.outcome.is_success()).count()
    }

    pub fn failed(&self) -> usize {
        self.items.iter().filter(|i| i.outcome.is_failure()).count()
    }

    pub fn skipped(&self) -> usize {
        self.items.iter().filter(|i| i.outcome.is_skipped()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_source_entry_splits_last_extension() {
        let entry = SourceEntry::new("/photos/archive.tar.gz");
        assert_eq!(entry.base_name, "archive.tar");
        assert_eq!(entry.extension.as_deref(), Some("gz"));
        assert_eq!(entry.file_name(), "archive.tar.gz");
    }

    #[test]
    fn test_source_entry_without_extension() {
        let entry = SourceEntry::new("/photos/README");
        assert_eq!(entry.base_name, "README");
        assert_eq!(entry.extension, None);

        let dotfile = SourceEntry::new("/photos/.hidden");
        assert_eq!(dotfile.base_name, ".hidden");
        assert_eq!(dotfile.extension, None);
    }

    #[test]
    fn test_trailing_dot_has_no_extension() {
        let entry = SourceEntry::new("/photos/file.");
        assert_eq!(entry.base_name, "file");
        assert_eq!(entry.extension, None);
    }

    #[test]
    fn test_resolve_destination_prefers_configured_folder() {
        let entries = vec![SourceEntry::new("/in/a.txt")];
        let config = RenameConfig {
            destination_folder: Some(PathBuf::from("/out")),
            ..Default::default()
        };
        assert_eq!(
            config.resolve_destination(&entries),
            Some(PathBuf::from("/out"))
        );
    }

    #[test]
    fn test_resolve_destination_falls_back_to_first_parent() {
        let entries = vec![
            SourceEntry::new("/first/a.txt"),
            SourceEntry::new("/second/b.txt"),
        ];
        let config = RenameConfig::default();
        assert_eq!(
            config.resolve_destination(&entries),
            Some(PathBuf::from("/first"))
        );
        assert_eq!(config.resolve_destination(&[]), None);
    }

    #[test]
    fn test_bare_file_name_has_no_parent_folder() {
        let entries = vec![SourceEntry::new("a.txt")];
        assert_eq!(RenameConfig::default().resolve_destination(&entries), None);
    }

    #[test]
    fn test_batch_result_counts() {
        let result = BatchResult {
            mode: TransferMode::Copy,
            destination_folder: None,
            items: vec![
                ItemResult {
                    source: PathBuf::from("/a"),
                    outcome: ItemOutcome::Success(PathBuf::from("/out/a")),
                },
                ItemResult {
                    source: PathBuf::from("/b"),
                    outcome: ItemOutcome::Failure(ItemError::CollisionExhausted { limit: 3 }),
                },
                ItemResult {
                    source: PathBuf::from("/c"),
                    outcome: ItemOutcome::Skipped,
                },
            ],
            cancelled: true,
        };

        assert_eq!(result.len(), 3);
        assert_eq!(result.succeeded(), 1);
        assert_eq!(result.failed(), 1);
        assert_eq!(result.skipped(), 1);
    }
}
