use std::io::{self, Write};
use std::path::Path;

use renombrator::rename::{BatchResult, ItemOutcome, PlanTarget, RenamePlan, TransferMode};

fn name_of(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| path.display().to_string())
}

/// Display the planned names without executing anything
pub fn display_dry_run(
    plan: &RenamePlan,
    mode: TransferMode,
    writer: &mut impl Write,
) -> io::Result<()> {
    writeln!(writer)?;
    writeln!(writer, "========================================")?;
    writeln!(writer, "              DRY RUN")?;
    writeln!(writer, "========================================")?;
    writeln!(writer)?;
    writeln!(writer, "Mode:        {}", mode.description())?;
    writeln!(writer, "Destination: {}", plan.destination_folder.display())?;
    writeln!(writer, "Files:       {}", plan.len())?;
    writeln!(writer)?;

    if plan.is_empty() {
        writeln!(writer, "No files to process.")?;
        return Ok(());
    }

    writeln!(writer, "Planned changes:")?;
    writeln!(writer)?;

    let mut unresolved = 0;
    let mut duplicates = 0;
    for (i, item) in plan.items.iter().enumerate() {
        writeln!(writer, "  {}. {}", i + 1, item.entry.file_name())?;
        match &item.target {
            PlanTarget::Resolved(dest) => writeln!(writer, "     To: {}", name_of(dest))?,
            PlanTarget::Exhausted { .. } => {
                unresolved += 1;
                writeln!(writer, "     [!] No free name available")?;
            }
            PlanTarget::Duplicate { first } => {
                duplicates += 1;
                writeln!(writer, "     [!] Same file as entry {}", first + 1)?;
            }
        }
    }

    writeln!(writer)?;
    writeln!(writer, "----------------------------------------")?;
    writeln!(writer, "Summary:")?;
    writeln!(
        writer,
        "  {} files would be {}",
        plan.len() - unresolved - duplicates,
        past_tense(mode)
    )?;
    if unresolved > 0 {
        writeln!(writer, "  {} files have no free name", unresolved)?;
    }
    if duplicates > 0 {
        writeln!(writer, "  {} files are listed more than once", duplicates)?;
    }

    writeln!(writer)?;
    writeln!(writer, "Run without --dry to apply these changes.")?;

    Ok(())
}

/// Display execution results
pub fn display_execution_result(result: &BatchResult, writer: &mut impl Write) -> io::Result<()> {
    writeln!(writer)?;

    if result.is_empty() {
        writeln!(writer, "No files to process.")?;
        return Ok(());
    }

    writeln!(
        writer,
        "Successfully {} {} of {} files.",
        past_tense(result.mode),
        result.succeeded(),
        result.len()
    )?;

    let failed = result.failed();
    if failed > 0 {
        writeln!(writer, "  {} files failed:", failed)?;
        for item in &result.items {
            if let ItemOutcome::Failure(err) = &item.outcome {
                writeln!(writer, "    - {}: {}", name_of(&item.source), err)?;
            }
        }
    }

    let skipped = result.skipped();
    if skipped > 0 {
        writeln!(writer, "  {} files were skipped.", skipped)?;
    }

    Ok(())
}

fn past_tense(mode: TransferMode) -> &'static str {
    match mode {
        TransferMode::Copy => "copied",
        TransferMode::Move => "moved",
    }
}
