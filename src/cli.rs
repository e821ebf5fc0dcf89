use clap::{Parser, ValueEnum};
use std::path::PathBuf;

use renombrator::rename::{Capitalization, ErrorPolicy, RenameConfig, TransferMode};

#[derive(Parser, Debug)]
#[command(name = "renombrator")]
#[command(author, version, about, long_about = None)]
#[command(about = "Batch copy or move files under new, collision-free names")]
pub struct Args {
    /// Files to process; a folder adds its direct files
    #[arg(required = true, value_name = "SOURCES")]
    pub sources: Vec<PathBuf>,

    /// Destination folder (defaults to the first source's folder)
    #[arg(short = 'o', long = "dest", value_name = "DIR")]
    pub destination: Option<PathBuf>,

    /// Text inserted before each name
    #[arg(short, long, default_value = "")]
    pub prefix: String,

    /// Text appended after each name
    #[arg(short, long, default_value = "")]
    pub suffix: String,

    /// Case transform for the new name
    #[arg(short, long = "case", value_enum, default_value_t = CaseArg::None)]
    pub case: CaseArg,

    /// Append a zero-padded sequence number
    #[arg(short, long)]
    pub number: bool,

    /// Discard original names; use --base-name or the sequence number
    #[arg(long)]
    pub clear_names: bool,

    /// Replacement name used with --clear-names
    #[arg(short, long, default_value = "", requires = "clear_names")]
    pub base_name: String,

    /// Move files instead of copying them
    #[arg(short = 'm', long = "move")]
    pub move_files: bool,

    /// Show the planned names without touching the filesystem
    #[arg(short, long)]
    pub dry: bool,

    /// Stop at the first failed file instead of continuing
    #[arg(long)]
    pub stop_on_error: bool,

    /// Write a JSON report into the destination folder
    #[arg(long)]
    pub report: bool,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaseArg {
    /// Keep the name as is
    None,
    /// Uppercase the first letter
    First,
    /// UPPERCASE everything
    Upper,
    /// lowercase everything
    Lower,
}

impl From<CaseArg> for Capitalization {
    fn from(arg: CaseArg) -> Self {
        match arg {
            CaseArg::None => Capitalization::None,
            CaseArg::First => Capitalization::FirstLetter,
            CaseArg::Upper => Capitalization::AllUpper,
            CaseArg::Lower => Capitalization::AllLower,
        }
    }
}

impl Args {
    /// Naming policy; `fallback_destination` applies when `--dest` is absent
    pub fn rename_config(&self, fallback_destination: Option<PathBuf>) -> RenameConfig {
        RenameConfig {
            capitalization: self.case.into(),
            add_numbering: self.number,
            prefix: self.prefix.clone(),
            suffix: self.suffix.clone(),
            clear_names: self.clear_names,
            custom_base_name: self.base_name.clone(),
            destination_folder: self.destination.clone().or(fallback_destination),
        }
    }

    pub fn mode(&self) -> TransferMode {
        if self.move_files {
            TransferMode::Move
        } else {
            TransferMode::Copy
        }
    }

    pub fn error_policy(&self) -> ErrorPolicy {
        if self.stop_on_error {
            ErrorPolicy::Abort
        } else {
            ErrorPolicy::Continue
        }
    }
}
