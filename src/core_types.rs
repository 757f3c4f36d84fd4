//! Defines core data structures used throughout the download pipeline.
//!
//! The pipeline is one-shot: a listing is resolved into [`ResolvedNode`]s,
//! every [`FileDescriptor`] is consumed by exactly one fetch, and the
//! resulting [`DownloadOutcome`]s are folded into a [`DownloadReport`].

use std::fmt;
use std::path::{Component, Path, PathBuf};

/// A file reachable from the requested directory.
///
/// # Examples
///
/// ```
/// use github_dlr::core_types::FileDescriptor;
/// use std::path::Path;
///
/// let descriptor = FileDescriptor {
///     relative_path: "src/main.rs".to_string(),
///     download_url: "https://raw.githubusercontent.com/o/r/main/src/main.rs".to_string(),
/// };
/// assert_eq!(
///     descriptor.local_path(Path::new("out")),
///     Some(Path::new("out").join("src").join("main.rs"))
/// );
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileDescriptor {
    /// Slash-joined path relative to the download root, built by prefixing
    /// ancestor directory names during resolution.
    pub relative_path: String,
    /// Direct URL to the file's raw bytes.
    pub download_url: String,
}

impl FileDescriptor {
    /// Maps the relative path under `root`.
    ///
    /// Returns `None` if the path is empty or would escape `root` (`..`,
    /// absolute or drive-prefixed components).
    pub fn local_path(&self, root: &Path) -> Option<PathBuf> {
        let mut local = root.to_path_buf();
        let mut pushed_any = false;
        for component in Path::new(&self.relative_path).components() {
            match component {
                Component::Normal(part) => {
                    local.push(part);
                    pushed_any = true;
                }
                Component::CurDir => {}
                Component::ParentDir | Component::RootDir | Component::Prefix(_) => return None,
            }
        }
        pushed_any.then_some(local)
    }
}

/// Metadata returned when the listing endpoint points at a single file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SingleFile {
    /// The file name.
    pub name: String,
    /// Direct URL to the file's raw bytes.
    pub download_url: String,
}

/// One entry of a directory listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListingEntry {
    /// A regular file.
    File { name: String, download_url: String },
    /// A sub-directory, expanded by fetching `listing_url`.
    Directory { name: String, listing_url: String },
}

/// A listing request that could not be turned into entries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingFailure {
    /// The listing endpoint that failed.
    pub url: String,
    /// HTTP status code, if a response was received.
    pub status: Option<u16>,
    /// Human-readable reason (status reason phrase, transport or decode error).
    pub reason: String,
}

impl fmt::Display for ListingFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.status {
            Some(status) => write!(
                f,
                "Failed to fetch content from '{}': {} {}",
                self.url, status, self.reason
            ),
            None => write!(f, "Failed to fetch content from '{}': {}", self.url, self.reason),
        }
    }
}

/// An element of a resolved tree, in listing order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolvedNode {
    File(FileDescriptor),
    Failure(ListingFailure),
}

/// The result of resolving the initial listing endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// The endpoint denoted a single file; no tree walk was needed.
    SingleFile(SingleFile),
    /// The endpoint denoted a directory, flattened depth-first.
    Tree(Vec<ResolvedNode>),
}

/// The outcome of a single fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DownloadOutcome {
    /// The file was written in full.
    Downloaded { destination: PathBuf, bytes: u64 },
    /// The fetch failed; the failure has already been reported.
    Failed { download_url: String, reason: String },
    /// The fetch was never started because the run was cancelled.
    Skipped,
}

impl DownloadOutcome {
    /// Returns `true` if the file was written.
    pub fn is_success(&self) -> bool {
        matches!(self, DownloadOutcome::Downloaded { .. })
    }
}

/// What a run ended up downloading.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DownloadKind {
    /// A single file written directly into the output directory.
    File,
    /// A folder written under `<output_dir>/<target>`.
    Folder,
    /// Nothing downloadable was found; the destination folder was removed.
    NoContent,
}

/// Terminal report of a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadReport {
    pub kind: DownloadKind,
    /// Leaf name of the requested path.
    pub target: String,
    /// Repository name.
    pub repo: String,
    /// Where the file or folder was written (or would have been).
    pub destination: PathBuf,
    /// Number of files written.
    pub downloaded: usize,
    /// Number of files whose fetch failed.
    pub failed: usize,
    /// Number of listing requests that failed during resolution.
    pub listing_failures: usize,
}

impl DownloadReport {
    /// Returns `true` if every resolved file was downloaded and no listing failed.
    pub fn is_complete(&self) -> bool {
        self.kind != DownloadKind::NoContent && self.failed == 0 && self.listing_failures == 0
    }
}
