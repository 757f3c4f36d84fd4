// src/progress.rs

//! Defines a trait for reporting progress of long-running operations.
#[cfg(feature = "progress")]
use indicatif::{ProgressBar, ProgressStyle};
#[cfg(feature = "progress")]
use std::time::Duration;

/// A trait for reporting progress, abstracting over specific implementations like `indicatif`.
///
/// A run first shows an indeterminate spinner while the tree is resolved
/// ([`start_spinner`](ProgressReporter::start_spinner)), then switches to a
/// bounded bar once the number of files is known
/// ([`set_length`](ProgressReporter::set_length)) and advances it once per
/// completed fetch.
///
/// # Examples
///
/// ```
/// use github_dlr::progress::ProgressReporter;
/// use std::sync::atomic::{AtomicU64, Ordering};
///
/// // A mock reporter that counts completed items.
/// #[derive(Default)]
/// struct Counter {
///     done: AtomicU64,
/// }
/// impl ProgressReporter for Counter {
///     fn start_spinner(&self, _msg: String) {}
///     fn set_length(&self, _len: u64) {}
///     fn inc(&self, delta: u64) {
///         self.done.fetch_add(delta, Ordering::SeqCst);
///     }
///     fn set_message(&self, _msg: String) {}
///     fn finish(&self) {}
/// }
///
/// let reporter = Counter::default();
/// reporter.inc(1);
/// reporter.inc(1);
/// assert_eq!(reporter.done.load(Ordering::SeqCst), 2);
/// ```
pub trait ProgressReporter: Send + Sync {
    /// Shows an indeterminate "working" indicator with a message.
    fn start_spinner(&self, msg: String);
    /// Sets the total number of items to process and resets the position.
    fn set_length(&self, len: u64);
    /// Advances the position by `delta` items.
    fn inc(&self, delta: u64);
    /// Sets a descriptive message for the current operation (e.g., "Downloading a.txt").
    fn set_message(&self, msg: String);
    /// Finishes the progress reporting, hiding the progress bar.
    fn finish(&self);
    /// Runs `print` with the display hidden, so console output does not
    /// tear a bar that is being drawn.
    fn suspend(&self, print: &mut dyn FnMut()) {
        print();
    }
}

/// A `ProgressReporter` that does nothing.
///
/// This is used as a default or in non-interactive environments where a progress
/// bar is not desired.
pub struct NoOpProgress;

impl ProgressReporter for NoOpProgress {
    fn start_spinner(&self, _msg: String) {}
    fn set_length(&self, _len: u64) {}
    fn inc(&self, _delta: u64) {}
    fn set_message(&self, _msg: String) {}
    fn finish(&self) {}
}

/// An implementation of `ProgressReporter` using the `indicatif` crate.
#[cfg(feature = "progress")]
#[derive(Clone)]
pub struct IndicatifProgress {
    bar: ProgressBar,
}

#[cfg(feature = "progress")]
impl IndicatifProgress {
    /// Creates a new progress bar with a default style.
    pub fn new() -> Self {
        Self {
            bar: ProgressBar::new(0),
        }
    }

    fn spinner_style() -> ProgressStyle {
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
    }

    fn bar_style() -> ProgressStyle {
        ProgressStyle::default_bar()
            .template(
                "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({percent}%) {msg}",
            )
            .map(|style| style.progress_chars("#>-"))
            .unwrap_or_else(|_| ProgressStyle::default_bar())
    }
}

#[cfg(feature = "progress")]
impl Default for IndicatifProgress {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(feature = "progress")]
impl ProgressReporter for IndicatifProgress {
    fn start_spinner(&self, msg: String) {
        self.bar.set_style(Self::spinner_style());
        self.bar.set_message(msg);
        self.bar.enable_steady_tick(Duration::from_millis(100));
    }

    fn set_length(&self, len: u64) {
        self.bar.set_style(Self::bar_style());
        self.bar.set_message(String::new());
        self.bar.set_length(len);
        self.bar.set_position(0);
    }

    fn inc(&self, delta: u64) {
        self.bar.inc(delta);
    }

    fn set_message(&self, msg: String) {
        self.bar.set_message(msg);
    }

    fn finish(&self) {
        self.bar.finish_and_clear();
    }

    fn suspend(&self, print: &mut dyn FnMut()) {
        self.bar.suspend(print);
    }
}
