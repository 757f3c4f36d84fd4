//! Defines application-specific error types.
//!
//! Only a handful of conditions abort a download run: an unusable source URL,
//! an invalid configuration, a local I/O failure on the destination root, or a
//! user interrupt. Remote failures (listing or file) are not errors at this
//! level; they are carried as values (`ListingFailure`, `DownloadOutcome`) so
//! that one bad node never terminates the batch.

use thiserror::Error;

/// Errors that abort a `github-dlr` run.
#[derive(Error, Debug)]
pub enum Error {
    /// The source URL is not a GitHub folder/file URL or lacks required path segments.
    #[error("Invalid GitHub URL '{url}': {reason}")]
    InvalidUrl {
        /// The URL as provided by the caller.
        url: String,
        /// Why the URL was rejected.
        reason: String,
    },

    /// Error occurring while creating or cleaning up the destination directory.
    #[error("I/O error accessing path '{path}': {source}")]
    Io {
        /// The path that caused the I/O error.
        path: String,
        /// The underlying `std::io::Error`.
        #[source]
        source: std::io::Error,
    },

    /// The HTTP client could not be constructed.
    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),

    /// Invalid configuration settings or combinations.
    #[error("Invalid configuration: {0}")]
    Config(#[from] ConfigError),

    /// The async runtime backing the blocking API could not be started.
    #[error("Failed to start async runtime: {0}")]
    Runtime(#[source] std::io::Error),

    /// The operation was cancelled by the user (e.g., Ctrl+C).
    #[error("Operation cancelled by user (Ctrl+C)")]
    Interrupted,
}

/// Configuration problems detected while building a `Config`.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    /// A required option was not provided.
    #[error("missing required option '{0}'")]
    Missing(String),
    /// An option was given a value outside its allowed range or format.
    #[error("invalid value for '{option}': {reason}")]
    InvalidValue {
        /// The option name as shown on the command line.
        option: String,
        /// Why the value was rejected.
        reason: String,
    },
}

/// A `Result` alias using the crate's [`Error`] type.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Helper function to create an `Error::Io` with path context.
pub fn io_error_with_path<P: AsRef<std::path::Path>>(source: std::io::Error, path: P) -> Error {
    Error::Io {
        path: path.as_ref().display().to_string(),
        source,
    }
}

impl Error {
    /// Convenience constructor for [`Error::InvalidUrl`].
    pub(crate) fn invalid_url(url: &str, reason: impl Into<String>) -> Self {
        Error::InvalidUrl {
            url: url.to_string(),
            reason: reason.into(),
        }
    }
}
