//! Composes URL normalization, tree resolution and fetching into a run.

use crate::cancellation::CancellationToken;
use crate::config::Config;
use crate::constants::{GITHUB_ACCEPT, RESOLVING_MESSAGE, USER_AGENT};
use crate::core_types::{
    DownloadKind, DownloadOutcome, DownloadReport, Resolution, ResolvedNode, SingleFile,
};
use crate::credentials::{CredentialProvider, EnvCredentials};
use crate::errors::{io_error_with_path, Error, Result};
use crate::fetch::FetchExecutor;
use crate::filtering::IgnoreFilter;
use crate::github::{RepoLocation, TreeResolver};
use crate::notify::{ConsoleNotifier, Notifier};
use crate::progress::{NoOpProgress, ProgressReporter};
use futures::stream::{self, StreamExt};
use reqwest::header::{self, HeaderMap, HeaderValue};
use reqwest::Client;
use std::path::Path;
use std::sync::Arc;
use walkdir::WalkDir;

/// Downloads a GitHub folder or file to local storage.
///
/// The collaborators (credentials, notifier, progress, cancellation) default
/// to the environment token, console notices, no progress display and a
/// token that is never cancelled; each can be replaced with a `with_*`
/// method.
pub struct Downloader {
    client: Client,
    api_base: String,
    concurrency: Option<usize>,
    max_depth: Option<usize>,
    credentials: Arc<dyn CredentialProvider>,
    notifier: Arc<dyn Notifier>,
    progress: Arc<dyn ProgressReporter>,
    token: CancellationToken,
}

impl Downloader {
    /// Creates a downloader from `config`.
    ///
    /// # Errors
    /// Returns `Error::Http` if the HTTP client cannot be built.
    pub fn new(config: &Config) -> Result<Self> {
        Ok(Self {
            client: build_reqwest_client()?,
            api_base: config.api_base.clone(),
            concurrency: config.concurrency,
            max_depth: config.max_depth,
            credentials: Arc::new(EnvCredentials::new(config.token_env_var.clone())),
            notifier: Arc::new(ConsoleNotifier::new()),
            progress: Arc::new(NoOpProgress),
            token: CancellationToken::new(),
        })
    }

    pub fn with_credentials(mut self, credentials: Arc<dyn CredentialProvider>) -> Self {
        self.credentials = credentials;
        self
    }

    pub fn with_notifier(mut self, notifier: Arc<dyn Notifier>) -> Self {
        self.notifier = notifier;
        self
    }

    pub fn with_progress(mut self, progress: Arc<dyn ProgressReporter>) -> Self {
        self.progress = progress;
        self
    }

    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.token = token;
        self
    }

    /// Downloads the folder or file behind `url` into `output_dir`.
    ///
    /// A folder lands in `output_dir/<target>/` with its structure mirrored;
    /// a single file is written directly to `output_dir/<target>`. Files whose
    /// names end with one of `ignore_extensions` are skipped.
    ///
    /// Failed listings and failed files are reported through the notifier
    /// and counted in the returned report; they never abort the run. If no
    /// file ends up on disk, the folder created for the download is removed
    /// and the report kind is [`DownloadKind::NoContent`].
    ///
    /// # Errors
    /// * [`Error::InvalidUrl`] before any I/O if `url` cannot be normalized.
    /// * [`Error::Io`] if the destination folder cannot be created.
    /// * [`Error::Interrupted`] if the cancellation token fires.
    pub async fn download(
        &self,
        url: &str,
        output_dir: &Path,
        ignore_extensions: &[String],
    ) -> Result<DownloadReport> {
        let location = RepoLocation::normalize(url)?;
        let listing_url = location.listing_url(&self.api_base);
        let filter = IgnoreFilter::new(ignore_extensions.iter().cloned());
        log::info!(
            "Resolving '{}' in {}/{} on branch {}",
            location.listing_path(),
            location.owner,
            location.repo,
            location.branch
        );

        let resolver = TreeResolver::new(self.client.clone(), Arc::clone(&self.credentials))
            .with_max_depth(self.max_depth);
        self.progress.start_spinner(RESOLVING_MESSAGE.to_string());
        let resolution = match resolver.resolve(&listing_url, &filter, &self.token).await {
            Ok(resolution) => resolution,
            Err(e) => {
                self.progress.finish();
                return Err(e);
            }
        };

        let executor = FetchExecutor::new(self.client.clone(), Arc::clone(&self.notifier));
        let report = match resolution {
            Resolution::SingleFile(file) => {
                Ok(self.download_file(&executor, &location, file, output_dir).await)
            }
            Resolution::Tree(nodes) => {
                self.download_tree(&executor, &location, nodes, output_dir)
                    .await
            }
        };
        self.progress.finish();

        let report = report?;
        self.announce(&report, output_dir, &listing_url);
        Ok(report)
    }

    async fn download_file(
        &self,
        executor: &FetchExecutor,
        location: &RepoLocation,
        file: SingleFile,
        output_dir: &Path,
    ) -> DownloadReport {
        let destination = output_dir.join(&location.target);
        self.progress.set_length(1);
        self.progress.set_message(format!("Downloading {}", file.name));
        let outcome = executor.fetch(&file.download_url, &destination).await;
        self.progress.inc(1);

        let downloaded = usize::from(outcome.is_success());
        DownloadReport {
            kind: DownloadKind::File,
            target: location.target.clone(),
            repo: location.repo.clone(),
            destination,
            downloaded,
            failed: 1 - downloaded,
            listing_failures: 0,
        }
    }

    async fn download_tree(
        &self,
        executor: &FetchExecutor,
        location: &RepoLocation,
        nodes: Vec<ResolvedNode>,
        output_dir: &Path,
    ) -> Result<DownloadReport> {
        let root = output_dir.join(&location.target);
        let created_root = !root.exists();
        tokio::fs::create_dir_all(&root)
            .await
            .map_err(|e| io_error_with_path(e, &root))?;

        let mut files = Vec::with_capacity(nodes.len());
        let mut listing_failures = 0;
        for node in nodes {
            match node {
                ResolvedNode::File(descriptor) => files.push(descriptor),
                ResolvedNode::Failure(failure) => {
                    log::warn!("{}", failure);
                    self.notifier.warn(&failure.to_string());
                    listing_failures += 1;
                }
            }
        }

        self.progress.set_length(files.len() as u64);
        let limit = self.concurrency.unwrap_or(files.len()).max(1);
        let root_dir = root.as_path();
        let outcomes: Vec<DownloadOutcome> = stream::iter(files)
            .map(|descriptor| async move {
                if self.token.is_cancelled() {
                    return DownloadOutcome::Skipped;
                }
                self.progress
                    .set_message(format!("Downloading {}", descriptor.relative_path));
                let outcome = executor.fetch_into(&descriptor, root_dir).await;
                self.progress.inc(1);
                outcome
            })
            .buffer_unordered(limit)
            .collect()
            .await;

        if self.token.is_cancelled() {
            return Err(Error::Interrupted);
        }

        let downloaded = outcomes.iter().filter(|o| o.is_success()).count();
        let failed = outcomes.len() - downloaded;
        if failed > 0 {
            log::warn!("{} of {} files could not be downloaded", failed, outcomes.len());
        }

        if created_root {
            prune_empty_dirs(&root);
        } else if downloaded == 0 {
            // Only succeeds if the pre-existing folder is empty.
            if let Err(e) = std::fs::remove_dir(&root) {
                log::debug!("Leaving '{}' in place: {}", root.display(), e);
            }
        }

        Ok(DownloadReport {
            kind: if downloaded == 0 {
                DownloadKind::NoContent
            } else {
                DownloadKind::Folder
            },
            target: location.target.clone(),
            repo: location.repo.clone(),
            destination: root,
            downloaded,
            failed,
            listing_failures,
        })
    }

    fn announce(&self, report: &DownloadReport, output_dir: &Path, listing_url: &str) {
        match report.kind {
            DownloadKind::File if report.downloaded == 0 => {}
            DownloadKind::File => self.notifier.info(&format!(
                "Downloaded '{}' file from repo '{}' {}",
                report.target,
                report.repo,
                destination_phrase(output_dir)
            )),
            DownloadKind::Folder => self.notifier.info(&format!(
                "Downloaded '{}' folder from repo '{}' {}",
                report.target,
                report.repo,
                destination_phrase(output_dir)
            )),
            DownloadKind::NoContent => self
                .notifier
                .warn(&format!("No content found in '{}'.", listing_url)),
        }
    }
}

/// Builds a `reqwest` client with default headers for GitHub API interaction.
fn build_reqwest_client() -> Result<Client> {
    let mut headers = HeaderMap::new();
    headers.insert(header::ACCEPT, HeaderValue::from_static(GITHUB_ACCEPT));
    headers.insert(header::USER_AGENT, HeaderValue::from_static(USER_AGENT));
    Ok(Client::builder().default_headers(headers).build()?)
}

/// Removes every empty directory under `root`, `root` included.
fn prune_empty_dirs(root: &Path) {
    for entry in WalkDir::new(root)
        .contents_first(true)
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_dir())
    {
        // Fails, as intended, for directories that still hold files.
        if std::fs::remove_dir(entry.path()).is_ok() {
            log::debug!("Removed empty directory '{}'", entry.path().display());
        }
    }
}

fn destination_phrase(output_dir: &Path) -> String {
    if output_dir.as_os_str().is_empty() || output_dir == Path::new(".") {
        "to current directory.".to_string()
    } else {
        format!("to '{}'.", output_dir.display())
    }
}
