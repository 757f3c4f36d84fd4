//! Handles parsing of GitHub folder and file URLs.

use crate::constants::GITHUB_URL_PREFIX;
use crate::errors::{Error, Result};
use ::url::Url;
use percent_encoding::{percent_decode_str, utf8_percent_encode, AsciiSet, CONTROLS};

/// Characters escaped in one segment of the contents API path.
const PATH_SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'/')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}');

/// Characters escaped in the `ref` query value.
const QUERY_VALUE: &AsciiSet = &PATH_SEGMENT.add(b'&').add(b'=').add(b'+');

/// The components of a GitHub folder or file URL.
///
/// Derived once per run from a URL of the form
/// `https://github.com/<owner>/<repo>/tree/<branch>/<path...>/<target>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoLocation {
    /// The repository owner (user or organization).
    pub owner: String,
    /// The repository name.
    pub repo: String,
    /// The branch, tag or commit. Always a single path segment.
    pub branch: String,
    /// The final path segment of the URL: the folder or file to download.
    /// Percent-escapes are decoded, so this is also the local name.
    pub target: String,
    /// The directory containing `target`, slash-joined and decoded. Empty if
    /// `target` sits directly under the branch root.
    pub target_path: String,
}

impl RepoLocation {
    /// Parses a GitHub URL into its constituent parts.
    ///
    /// The path is split on `/`: segment 1 is the owner, 2 the repository,
    /// 3 the ref type (`tree` or `blob`, only required to be present), 4 the
    /// branch, the last segment the target and everything in between the
    /// target path.
    ///
    /// # Errors
    /// Returns [`Error::InvalidUrl`] if the URL is not under `https://github.com/`
    /// or has fewer than five path segments.
    ///
    /// # Examples
    /// ```
    /// use github_dlr::github::RepoLocation;
    ///
    /// let location =
    ///     RepoLocation::normalize("https://github.com/rust-lang/cargo/tree/master/src/cargo/core")
    ///         .unwrap();
    /// assert_eq!(location.owner, "rust-lang");
    /// assert_eq!(location.repo, "cargo");
    /// assert_eq!(location.branch, "master");
    /// assert_eq!(location.target, "core");
    /// assert_eq!(location.target_path, "src/cargo");
    /// assert_eq!(location.listing_path(), "src/cargo/core");
    ///
    /// assert!(RepoLocation::normalize("https://gitlab.com/user/repo/tree/main/src").is_err());
    /// ```
    pub fn normalize(github_url: &str) -> Result<Self> {
        let github_url = github_url.trim();
        if !github_url.to_lowercase().starts_with(GITHUB_URL_PREFIX) {
            return Err(Error::invalid_url(github_url, "Not a valid Github URL"));
        }

        let parsed = Url::parse(github_url)
            .map_err(|e| Error::invalid_url(github_url, e.to_string()))?;
        let segments: Vec<&str> = parsed.path().trim_end_matches('/').split('/').collect();

        // ["", owner, repo, "tree", branch, ..., target]
        if segments.len() < 6 {
            return Err(Error::invalid_url(
                github_url,
                "expected https://github.com/<owner>/<repo>/tree/<branch>/<path>",
            ));
        }
        if segments[1..5].iter().any(|segment| segment.is_empty()) {
            return Err(Error::invalid_url(
                github_url,
                "owner, repository, ref type and branch must not be empty",
            ));
        }

        let last = segments.len() - 1;
        let target = segments[last];
        if target.is_empty() {
            return Err(Error::invalid_url(github_url, "missing target path segment"));
        }

        let decode = |segment: &str| -> Result<String> {
            percent_decode_str(segment)
                .decode_utf8()
                .map(|decoded| decoded.into_owned())
                .map_err(|e| Error::invalid_url(github_url, e.to_string()))
        };

        let target = decode(target)?;
        if target.contains(['/', '\\']) {
            return Err(Error::invalid_url(github_url, "target must be a single path segment"));
        }

        Ok(Self {
            owner: segments[1].to_string(),
            repo: segments[2].to_string(),
            branch: decode(segments[4])?,
            target,
            target_path: segments[5..last]
                .iter()
                .map(|segment| decode(*segment))
                .collect::<Result<Vec<_>>>()?
                .join("/"),
        })
    }

    /// The repository path handed to the contents API: `target` alone when
    /// the target path is empty, `target_path/target` otherwise.
    pub fn listing_path(&self) -> String {
        if self.target_path.is_empty() {
            self.target.clone()
        } else {
            format!("{}/{}", self.target_path, self.target)
        }
    }

    /// Builds the initial contents API endpoint for this location, pinned to
    /// `branch` through the `ref` query parameter. Path segments and the
    /// branch are percent-encoded again.
    pub fn listing_url(&self, api_base: &str) -> String {
        let path = self
            .listing_path()
            .split('/')
            .map(|segment| utf8_percent_encode(segment, PATH_SEGMENT).to_string())
            .collect::<Vec<_>>()
            .join("/");
        format!(
            "{}/repos/{}/{}/contents/{}?ref={}",
            api_base.trim_end_matches('/'),
            self.owner,
            self.repo,
            path,
            utf8_percent_encode(&self.branch, QUERY_VALUE)
        )
    }
}
