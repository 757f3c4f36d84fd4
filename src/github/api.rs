//! Resolves a GitHub contents API endpoint into a flat list of files.

use super::listing::{parse_listing, Listing};
use crate::cancellation::CancellationToken;
use crate::constants::GITHUB_ACCESS_TOKEN_KEY;
use crate::core_types::{FileDescriptor, ListingEntry, ListingFailure, Resolution, ResolvedNode};
use crate::credentials::CredentialProvider;
use crate::errors::{Error, Result};
use crate::filtering::IgnoreFilter;
use reqwest::{Client, Response, StatusCode};
use serde_json::Value;
use std::sync::Arc;

/// A directory whose entries are still being walked.
struct Frame {
    /// Relative path of the directory from the download root ("" for the root).
    prefix: String,
    depth: usize,
    entries: std::vec::IntoIter<ListingEntry>,
}

/// Walks a remote directory tree through the contents API.
///
/// Listing requests carry a bearer token when the credential provider has
/// one. A failing listing never aborts the walk: it becomes a
/// [`ResolvedNode::Failure`] in place of the subtree it would have produced.
pub struct TreeResolver {
    client: Client,
    credentials: Arc<dyn CredentialProvider>,
    max_depth: Option<usize>,
}

impl TreeResolver {
    pub fn new(client: Client, credentials: Arc<dyn CredentialProvider>) -> Self {
        Self {
            client,
            credentials,
            max_depth: None,
        }
    }

    /// Limits how many directory levels below the requested one are walked.
    /// Deeper directories are reported as listing failures.
    pub fn with_max_depth(mut self, max_depth: Option<usize>) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Resolves `listing_url` into either a single file or a flattened tree.
    ///
    /// Files are emitted in listing order, depth-first: a directory's files
    /// appear before the files of its later siblings. Each file's
    /// `relative_path` is prefixed with the names of the directories above
    /// it. Files whose names match `filter` are skipped at every depth.
    ///
    /// # Errors
    /// Only returns [`Error::Interrupted`], when `token` is cancelled.
    #[tracing::instrument(level = "debug", skip(self, filter, token))]
    pub async fn resolve(
        &self,
        listing_url: &str,
        filter: &IgnoreFilter,
        token: &CancellationToken,
    ) -> Result<Resolution> {
        if token.is_cancelled() {
            return Err(Error::Interrupted);
        }

        let mut nodes = Vec::new();
        let mut stack = match self.fetch_listing(listing_url).await {
            Ok(Listing::Single(file)) => return Ok(Resolution::SingleFile(file)),
            Ok(Listing::Entries(entries)) => vec![Frame {
                prefix: String::new(),
                depth: 0,
                entries: entries.into_iter(),
            }],
            Err(failure) => return Ok(Resolution::Tree(vec![ResolvedNode::Failure(failure)])),
        };

        while let Some(frame) = stack.last_mut() {
            let Some(entry) = frame.entries.next() else {
                stack.pop();
                continue;
            };
            let depth = frame.depth;
            let prefix = frame.prefix.clone();

            match entry {
                ListingEntry::File { name, download_url } => {
                    if filter.is_ignored(&name) {
                        log::debug!("Ignoring '{}' (matches an ignored extension)", name);
                        continue;
                    }
                    nodes.push(ResolvedNode::File(FileDescriptor {
                        relative_path: join_relative(&prefix, &name),
                        download_url,
                    }));
                }
                ListingEntry::Directory { name, listing_url } => {
                    let child_prefix = join_relative(&prefix, &name);
                    if let Some(max_depth) = self.max_depth {
                        if depth >= max_depth {
                            log::warn!("Not descending into '{}': depth limit reached", child_prefix);
                            nodes.push(ResolvedNode::Failure(ListingFailure {
                                url: listing_url,
                                status: None,
                                reason: format!(
                                    "maximum depth of {} exceeded at '{}'",
                                    max_depth, child_prefix
                                ),
                            }));
                            continue;
                        }
                    }

                    if token.is_cancelled() {
                        return Err(Error::Interrupted);
                    }
                    match self.fetch_listing(&listing_url).await {
                        Ok(Listing::Entries(entries)) => stack.push(Frame {
                            prefix: child_prefix,
                            depth: depth + 1,
                            entries: entries.into_iter(),
                        }),
                        Ok(Listing::Single(file)) => {
                            // A directory entry whose listing turned out to be a file.
                            if !filter.is_ignored(&file.name) {
                                nodes.push(ResolvedNode::File(FileDescriptor {
                                    relative_path: child_prefix,
                                    download_url: file.download_url,
                                }));
                            }
                        }
                        Err(failure) => nodes.push(ResolvedNode::Failure(failure)),
                    }
                }
            }
        }

        Ok(Resolution::Tree(nodes))
    }

    /// Fetches and decodes one listing endpoint.
    async fn fetch_listing(&self, url: &str) -> Result<Listing, ListingFailure> {
        log::debug!("Fetching directory contents from: {}", url);
        let failure = |status: Option<StatusCode>, reason: String| ListingFailure {
            url: url.to_string(),
            status: status.map(|s| s.as_u16()),
            reason,
        };

        let mut request = self.client.get(url);
        if let Some(access_token) = self.credentials.token() {
            request = request.bearer_auth(access_token);
        }
        let response = request
            .send()
            .await
            .map_err(|e| failure(None, e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let reason = if is_rate_limited(&response) {
                log::warn!("GitHub API rate limit exceeded while fetching {}", url);
                format!(
                    "API rate limit exceeded (set {} to raise the limit)",
                    GITHUB_ACCESS_TOKEN_KEY
                )
            } else {
                status.canonical_reason().unwrap_or("Unknown").to_string()
            };
            return Err(failure(Some(status), reason));
        }

        let body: Value = response
            .json()
            .await
            .map_err(|e| failure(Some(status), format!("invalid listing body: {}", e)))?;
        parse_listing(body).map_err(|e| failure(Some(status), e.to_string()))
    }
}

/// GitHub signals an exhausted quota with 403 or 429 and a zero remaining count.
fn is_rate_limited(response: &Response) -> bool {
    let remaining_is_zero = response
        .headers()
        .get("x-ratelimit-remaining")
        .and_then(|value| value.to_str().ok())
        .is_some_and(|value| value.trim() == "0");
    match response.status() {
        StatusCode::TOO_MANY_REQUESTS => true,
        StatusCode::FORBIDDEN => remaining_is_zero,
        _ => false,
    }
}

fn join_relative(prefix: &str, name: &str) -> String {
    if prefix.is_empty() {
        name.to_string()
    } else {
        format!("{}/{}", prefix, name)
    }
}
