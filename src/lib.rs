//! `github-dlr` is a library and command-line tool for downloading a single
//! folder (or file) of a GitHub repository without cloning it.
//!
//! A run is a three-stage pipeline:
//! 1.  **Normalize**: Turn a web URL such as
//!     `https://github.com/owner/repo/tree/main/docs` into a
//!     [`RepoLocation`](github::RepoLocation).
//! 2.  **Resolve**: Walk the folder through the GitHub contents API into a flat,
//!     ordered list of files ([`TreeResolver`](github::TreeResolver)).
//! 3.  **Fetch**: Download every file concurrently, mirroring the folder
//!     structure on disk ([`FetchExecutor`](fetch::FetchExecutor)).
//!
//! Failed listings and failed files are reported and counted; they never abort
//! the run. Only an invalid URL (and local failures on the destination folder)
//! do.
//!
//! # Example: Library Usage
//!
//! ```no_run
//! use github_dlr::{run, CancellationToken, ConfigBuilder};
//!
//! # async fn example() -> github_dlr::errors::Result<()> {
//! let config = ConfigBuilder::new()
//!     .url("https://github.com/rust-lang/cargo/tree/master/src/doc")
//!     .output_dir("downloads")
//!     .ignore_extensions(vec![".png".to_string()])
//!     .build()?;
//!
//! let report = run(&config, &CancellationToken::new(), None).await?;
//! println!("{} files written to {}", report.downloaded, report.destination.display());
//! # Ok(())
//! # }
//! ```
//!
//! Outside of an async context, [`download`] runs the same pipeline on its own
//! runtime.

pub mod cancellation;
pub mod cli;
pub mod config;
pub mod constants;
pub mod core_types;
pub mod credentials;
pub mod downloader;
pub mod errors;
pub mod fetch;
pub mod filtering;
pub mod github;
pub mod notify;
pub mod prelude;
pub mod progress;
pub mod signal;

// Re-export key public types for easier use as a library
pub use cancellation::CancellationToken;
pub use config::{Config, ConfigBuilder};
pub use core_types::{DownloadKind, DownloadReport, FileDescriptor};
pub use downloader::Downloader;

use crate::errors::{Error, Result};
use crate::notify::ConsoleNotifier;
use crate::progress::ProgressReporter;
use std::path::Path;
use std::sync::Arc;

/// Executes a download run as configured.
///
/// This mirrors the command-line execution: the access token is read from
/// the environment variable named in `config`, notices are printed to the
/// console, and `progress` (if any) shows a spinner while the tree is being
/// resolved and a bar while files download.
///
/// # Errors
/// See [`Downloader::download`].
pub async fn run(
    config: &Config,
    token: &CancellationToken,
    progress: Option<Arc<dyn ProgressReporter>>,
) -> Result<DownloadReport> {
    let mut downloader = Downloader::new(config)?.with_cancellation(token.clone());
    if let Some(progress) = progress {
        // Notices printed mid-batch must not tear the bar.
        downloader = downloader
            .with_notifier(Arc::new(ConsoleNotifier::with_progress(Arc::clone(&progress))))
            .with_progress(progress);
    }
    downloader
        .download(&config.url, &config.output_dir, &config.ignore_extensions)
        .await
}

/// Blocking convenience wrapper: downloads `github_path` into `output_dir`.
///
/// Runs the pipeline on a current-thread runtime; do not call it from inside
/// an async context.
///
/// # Examples
///
/// ```no_run
/// let report = github_dlr::download(
///     "https://github.com/rust-lang/cargo/tree/master/src/doc",
///     "downloads",
///     &[".png".to_string()],
/// )?;
/// assert!(report.downloaded > 0);
/// # Ok::<(), github_dlr::errors::Error>(())
/// ```
pub fn download(
    github_path: &str,
    output_dir: impl AsRef<Path>,
    ignore_extensions: &[String],
) -> Result<DownloadReport> {
    let config = ConfigBuilder::new()
        .url(github_path)
        .output_dir(output_dir.as_ref())
        .ignore_extensions(ignore_extensions.to_vec())
        .build()?;

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(Error::Runtime)?;
    runtime.block_on(run(&config, &CancellationToken::new(), None))
}
