//! Downloads individual files to disk.
//!
//! Every failure a fetch can run into (transport, HTTP status, local
//! filesystem, unsafe destination) is a [`FetchError`]. The executor reports it
//! to the notifier and turns it into a [`DownloadOutcome::Failed`], so a bad
//! file never aborts the batch it belongs to.
//!
//! Bodies are streamed into a hidden staging file in the destination
//! directory and renamed into place once complete, so a failed download
//! never touches an existing file of the same name.

use crate::core_types::{DownloadOutcome, FileDescriptor};
use crate::notify::Notifier;
use futures::StreamExt;
use reqwest::{Client, Response, StatusCode};
use std::path::Path;
use std::sync::Arc;
use thiserror::Error;
use tokio::fs;
use tokio::io::AsyncWriteExt;

/// Why a single file could not be downloaded.
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("server responded with {0}")]
    Status(StatusCode),
    #[error("I/O error accessing path '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("refusing to write '{0}' outside the download root")]
    UnsafePath(String),
}

fn io_error(path: &Path) -> impl FnOnce(std::io::Error) -> FetchError {
    let path = path.display().to_string();
    move |source| FetchError::Io { path, source }
}

/// Streams raw file contents to disk.
///
/// Raw download URLs are fetched without the API token.
pub struct FetchExecutor {
    client: Client,
    notifier: Arc<dyn Notifier>,
}

impl FetchExecutor {
    pub fn new(client: Client, notifier: Arc<dyn Notifier>) -> Self {
        Self { client, notifier }
    }

    /// Downloads `download_url` to `destination`, creating missing parent
    /// directories.
    ///
    /// Never fails: errors are reported and returned as
    /// [`DownloadOutcome::Failed`]. A partially received body is discarded
    /// and an existing file at `destination` is left as it was.
    #[tracing::instrument(level = "debug", skip(self, destination), fields(destination = %destination.display()))]
    pub async fn fetch(&self, download_url: &str, destination: &Path) -> DownloadOutcome {
        match self.try_fetch(download_url, destination).await {
            Ok(bytes) => {
                log::debug!("Wrote {} bytes to '{}'", bytes, destination.display());
                DownloadOutcome::Downloaded {
                    destination: destination.to_path_buf(),
                    bytes,
                }
            }
            Err(e) => self.failed(download_url, e),
        }
    }

    /// Downloads a resolved file to its place under `root`.
    pub async fn fetch_into(&self, descriptor: &FileDescriptor, root: &Path) -> DownloadOutcome {
        match descriptor.local_path(root) {
            Some(destination) => self.fetch(&descriptor.download_url, &destination).await,
            None => self.failed(
                &descriptor.download_url,
                FetchError::UnsafePath(descriptor.relative_path.clone()),
            ),
        }
    }

    fn failed(&self, download_url: &str, error: FetchError) -> DownloadOutcome {
        log::warn!("Failed to download {}: {}", download_url, error);
        self.notifier.warn(&format!(
            "Failed to download '{}'. Skipping this file!",
            download_url
        ));
        DownloadOutcome::Failed {
            download_url: download_url.to_string(),
            reason: error.to_string(),
        }
    }

    async fn try_fetch(&self, download_url: &str, destination: &Path) -> Result<u64, FetchError> {
        log::debug!("Downloading file from: {}", download_url);
        let response = self.client.get(download_url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status));
        }

        let parent = destination
            .parent()
            .filter(|parent| !parent.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."));
        // `create_dir_all` treats a directory created concurrently by a
        // sibling fetch as success.
        fs::create_dir_all(parent).await.map_err(io_error(parent))?;

        // The body is staged next to `destination` so that an existing file
        // is only replaced once the new one is complete.
        let mut builder = tempfile::Builder::new();
        builder.prefix(".github-dlr-").suffix(".part");
        // Staging files are private by default; downloads get the usual mode
        // (still subject to the umask).
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            builder.permissions(std::fs::Permissions::from_mode(0o644));
        }
        let staging = builder.tempfile_in(parent).map_err(io_error(parent))?;
        let (file, staging_path) = staging.into_parts();
        let mut file = fs::File::from_std(file);

        let written = match write_body(response, &mut file, &staging_path).await {
            Ok(written) => written,
            Err(e) => {
                drop(file);
                log::debug!("Discarding partial download '{}'", staging_path.display());
                // Dropping the `TempPath` deletes the staged file.
                drop(staging_path);
                return Err(e);
            }
        };
        drop(file);

        staging_path
            .persist(destination)
            .map_err(|e| io_error(destination)(e.error))?;
        Ok(written)
    }
}

async fn write_body(
    response: Response,
    file: &mut fs::File,
    destination: &Path,
) -> Result<u64, FetchError> {
    let mut stream = response.bytes_stream();
    let mut written = 0u64;
    while let Some(chunk) = stream.next().await {
        let chunk = chunk?;
        file.write_all(&chunk)
            .await
            .map_err(io_error(destination))?;
        written += chunk.len() as u64;
    }
    file.flush().await.map_err(io_error(destination))?;
    Ok(written)
}
