mod cli;
mod output;
mod progress;

use clap::Parser;
use cli::Args;
use output::{display_dry_run, display_execution_result};
use progress::Progress;
use renombrator::rename::{spawn_batch, BatchExecutor, BatchResult, ExecuteOptions};
use renombrator::{collect_sources, logging, settings_from_env, write_report, AppError};
use tracing::{debug, error, info, warn};

fn main() {
    // Load .env file if present (silently ignore if not found)
    let _ = dotenvy::dotenv();

    let args = Args::parse();

    logging::init(args.verbose);

    if let Err(e) = run(args) {
        error!("{}", e);
        eprintln!("\nError: {}", e.detailed_message());
        std::process::exit(e.exit_code().into());
    }
}

fn run(args: Args) -> Result<(), AppError> {
    let settings = settings_from_env();
    debug!(?settings, "Environment settings loaded");

    let config = args.rename_config(settings.destination.clone());
    let mode = args.mode();
    let executor = BatchExecutor::new().with_options(ExecuteOptions {
        error_policy: args.error_policy(),
        max_collision_suffix: settings.max_collision_suffix,
    });
    let mut progress = Progress::new(args.verbose > 0);

    // Step 1: Collect sources
    let entries = collect_sources(&args.sources)?;
    info!("Collected {} source files", entries.len());

    if entries.is_empty() {
        display_execution_result(&BatchResult::empty(mode), &mut std::io::stdout())
            .map_err(|e| AppError::Other(format!("Failed to display output: {}", e)))?;
        return Ok(());
    }

    // Step 2: Dry run shows the plan only
    if args.dry {
        let plan = executor.plan(&entries, &config, mode)?;
        display_dry_run(&plan, mode, &mut std::io::stdout())
            .map_err(|e| AppError::Other(format!("Failed to display output: {}", e)))?;
        return Ok(());
    }

    // Step 3: Run the batch on a worker, render progress here
    let destination = config.resolve_destination(&entries);
    let handle = spawn_batch(executor, entries, config, mode);

    let cancel = handle.cancel_token();
    if let Err(e) = ctrlc::set_handler(move || {
        eprintln!("\nReceived SIGINT. Finishing the current file...");
        cancel.cancel();
    }) {
        warn!("Could not install Ctrl-C handler: {}", e);
    }

    // Banner only once the destination has been accepted
    let mut started = false;
    let result = handle.wait_with(|event| {
        if !started {
            progress.batch_start(event.total, mode.description(), destination.as_deref());
            started = true;
        }
        progress.item(event)
    })?;

    display_execution_result(&result, &mut std::io::stdout())
        .map_err(|e| AppError::Other(format!("Failed to display output: {}", e)))?;

    // Step 4: Optional report
    let mut report_error = None;
    if args.report {
        if let Some(dir) = &result.destination_folder {
            match write_report(&result, dir) {
                Ok(path) => progress.report_written(&path),
                Err(e) => {
                    progress.warn(&format!("Failed to write report: {}", e));
                    report_error = Some(e);
                }
            }
        }
    }

    if result.cancelled {
        return Err(AppError::Cancelled {
            completed: result.succeeded() + result.failed(),
            skipped: result.skipped(),
        });
    }

    if result.failed() > 0 {
        return Err(AppError::PartialFailure {
            failed: result.failed(),
            total: result.len(),
        });
    }

    match report_error {
        Some(e) => Err(e.into()),
        None => Ok(()),
    }
}
