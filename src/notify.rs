//! User-facing notices.
//!
//! Notices are distinct from logging: they are the messages a user of the
//! command line tool is meant to read (completion, skipped files, failed
//! listings), while `log`/`tracing` output is diagnostic.

use crate::progress::ProgressReporter;
use std::sync::Arc;

/// Receives user-facing notices from the download pipeline.
pub trait Notifier: Send + Sync {
    /// A successful, terminal notice (e.g., a completed download).
    fn info(&self, message: &str);
    /// A non-fatal problem (failed listing, skipped file, no content).
    fn warn(&self, message: &str);
}

/// Prints notices to the console with emoji markers.
///
/// Completion notices go to stdout, warnings to stderr. When attached to a
/// progress display, each notice is printed with the display suspended.
#[derive(Clone, Default)]
pub struct ConsoleNotifier {
    progress: Option<Arc<dyn ProgressReporter>>,
}

impl ConsoleNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_progress(progress: Arc<dyn ProgressReporter>) -> Self {
        Self {
            progress: Some(progress),
        }
    }

    fn emit(&self, mut print: impl FnMut()) {
        match &self.progress {
            Some(progress) => progress.suspend(&mut print),
            None => print(),
        }
    }
}

impl Notifier for ConsoleNotifier {
    fn info(&self, message: &str) {
        self.emit(|| println!("\n\u{1F4E6} {}", message));
    }

    fn warn(&self, message: &str) {
        self.emit(|| eprintln!("\u{26A0}\u{FE0F}  {}", message));
    }
}

/// Discards every notice.
#[derive(Debug, Clone, Copy, Default)]
pub struct SilentNotifier;

impl Notifier for SilentNotifier {
    fn info(&self, _message: &str) {}
    fn warn(&self, _message: &str) {}
}
