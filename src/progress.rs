//! Progress output for user-facing status updates.
//!
//! Renders the worker's progress events on the main thread. In verbose
//! mode output is suppressed since tracing already covers every file.

use colored::Colorize;
use std::io::{self, IsTerminal, Write};
use std::path::Path;

use renombrator::rename::{ProgressEvent, ProgressStatus};

/// Progress reporter for user-facing output
pub struct Progress {
    writer: Box<dyn Write>,
    /// When true, all output is suppressed (verbose mode uses tracing instead)
    silent: bool,
    colors_enabled: bool,
}

/// Check if we should use colors in output
fn should_use_colors() -> bool {
    if std::env::var("NO_COLOR").is_ok() {
        return false;
    }
    if std::env::var("FORCE_COLOR").is_ok() {
        return true;
    }
    io::stderr().is_terminal()
}

impl Progress {
    /// Reporter on stderr; silent when tracing output is enabled
    pub fn new(verbose: bool) -> Self {
        let colors_enabled = should_use_colors();
        if !colors_enabled {
            colored::control::set_override(false);
        }
        Self {
            writer: Box::new(io::stderr()),
            silent: verbose,
            colors_enabled,
        }
    }

    /// Create a progress reporter with a custom writer (for testing)
    #[cfg(test)]
    pub fn with_writer(writer: Box<dyn Write>) -> Self {
        Self {
            writer,
            silent: false,
            colors_enabled: false,
        }
    }

    pub fn batch_start(&mut self, total: usize, action: &str, destination: Option<&Path>) {
        if self.silent {
            return;
        }
        let target = destination
            .map(|d| format!(" into {}", d.display()))
            .unwrap_or_default();
        let line = format!("Processing {} files ({}){}", total, action, target);
        if self.colors_enabled {
            let _ = writeln!(self.writer, "{}", line.bold());
        } else {
            let _ = writeln!(self.writer, "{}", line);
        }
    }

    /// Report one finished entry: [current/total] from -> to
    pub fn item(&mut self, event: &ProgressEvent) {
        if self.silent {
            return;
        }
        let counter = format!("[{}/{}]", event.completed, event.total);
        let from = display_name(&event.source);

        match &event.status {
            ProgressStatus::Succeeded(to) => {
                let to = display_name(to);
                if self.colors_enabled {
                    let _ = writeln!(
                        self.writer,
                        "{} {} {} {}",
                        counter.cyan(),
                        from.dimmed(),
                        "→".cyan(),
                        to
                    );
                } else {
                    let _ = writeln!(self.writer, "{} {} -> {}", counter, from, to);
                }
            }
            ProgressStatus::Failed(reason) => {
                if self.colors_enabled {
                    let _ = writeln!(
                        self.writer,
                        "{} {} {} {}",
                        counter.cyan(),
                        from,
                        "✗".red().bold(),
                        reason.red()
                    );
                } else {
                    let _ = writeln!(self.writer, "{} {} FAILED: {}", counter, from, reason);
                }
            }
        }
    }

    /// Report a non-fatal problem
    pub fn warn(&mut self, message: &str) {
        if self.silent {
            return;
        }
        if self.colors_enabled {
            let _ = writeln!(self.writer, "{} {}", "!".yellow().bold(), message.yellow());
        } else {
            let _ = writeln!(self.writer, "Warning: {}", message);
        }
    }

    pub fn report_written(&mut self, path: &Path) {
        if self.silent {
            return;
        }
        let line = format!("Report saved to: {}", path.display());
        if self.colors_enabled {
            let _ = writeln!(self.writer, "{}", line.dimmed());
        } else {
            let _ = writeln!(self.writer, "{}", line);
        }
    }
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| path.display().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use std::sync::{Arc, Mutex};

    struct TestWriter(Arc<Mutex<Vec<u8>>>);

    impl Write for TestWriter {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().write(buf)
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    fn create_test_progress() -> (Progress, Arc<Mutex<Vec<u8>>>) {
        let buffer = Arc::new(Mutex::new(Vec::new()));
        let progress = Progress::with_writer(Box::new(TestWriter(buffer.clone())));
        (progress, buffer)
    }

    fn output(buffer: &Arc<Mutex<Vec<u8>>>) -> String {
        String::from_utf8(buffer.lock().unwrap().clone()).unwrap()
    }

    #[test]
    fn test_item_progress() {
        let (mut progress, buffer) = create_test_progress();

        progress.item(&ProgressEvent {
            completed: 1,
            total: 2,
            source: PathBuf::from("/in/a.txt"),
            status: ProgressStatus::Succeeded(PathBuf::from("/out/A_001.txt")),
        });
        progress.item(&ProgressEvent {
            completed: 2,
            total: 2,
            source: PathBuf::from("/in/b.txt"),
            status: ProgressStatus::Failed("denied".to_string()),
        });

        let output = output(&buffer);
        assert!(output.contains("[1/2] a.txt -> A_001.txt"));
        assert!(output.contains("[2/2] b.txt FAILED: denied"));
    }

    #[test]
    fn test_batch_start() {
        let (mut progress, buffer) = create_test_progress();

        progress.batch_start(3, "copy", Some(Path::new("/out")));

        assert!(output(&buffer).contains("Processing 3 files (copy) into /out"));
    }
}
