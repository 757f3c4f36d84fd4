// src/config/builder.rs

use super::{validation::validate_config, Config};
use crate::cli::Cli;
use crate::constants::{DEFAULT_API_BASE, GITHUB_ACCESS_TOKEN_KEY};
use crate::errors::Result;
use std::path::PathBuf;

/// A builder for creating a [`Config`] programmatically.
///
/// # Examples
///
/// ```
/// use github_dlr::ConfigBuilder;
///
/// let config = ConfigBuilder::new()
///     .url("https://github.com/rust-lang/cargo/tree/master/src/doc")
///     .output_dir("downloads")
///     .ignore_extensions(vec![".png".to_string()])
///     .concurrency(8)
///     .build()
///     .unwrap();
///
/// assert_eq!(config.concurrency, Some(8));
/// assert_eq!(config.output_dir, std::path::PathBuf::from("downloads"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct ConfigBuilder {
    url: Option<String>,
    output_dir: Option<PathBuf>,
    ignore_extensions: Option<Vec<String>>,
    api_base: Option<String>,
    concurrency: Option<usize>,
    max_depth: Option<usize>,
    token_env_var: Option<String>,
}

impl ConfigBuilder {
    /// Creates a new `ConfigBuilder` with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a `ConfigBuilder` from parsed command-line arguments.
    pub fn from_cli(cli: Cli) -> Self {
        Self {
            url: Some(cli.github_path),
            // An empty -o means the current directory.
            output_dir: cli.output.filter(|dir| !dir.is_empty()).map(PathBuf::from),
            ignore_extensions: cli.ignore_extensions,
            api_base: cli.api_url,
            concurrency: cli.concurrency,
            max_depth: cli.max_depth,
            token_env_var: None,
        }
    }

    /// Sets the GitHub folder or file URL.
    pub fn url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    /// Sets the destination directory. Defaults to the current directory.
    pub fn output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = Some(dir.into());
        self
    }

    /// Sets the file name suffixes to skip.
    pub fn ignore_extensions(mut self, extensions: Vec<String>) -> Self {
        self.ignore_extensions = Some(extensions);
        self
    }

    /// Sets the GitHub REST API base URL. Defaults to `https://api.github.com`.
    pub fn api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = Some(api_base.into());
        self
    }

    /// Caps the number of simultaneous file downloads.
    pub fn concurrency(mut self, limit: usize) -> Self {
        self.concurrency = Some(limit);
        self
    }

    /// Caps the directory depth walked below the target.
    pub fn max_depth(mut self, depth: usize) -> Self {
        self.max_depth = Some(depth);
        self
    }

    /// Sets the environment variable the access token is read from.
    pub fn token_env_var(mut self, name: impl Into<String>) -> Self {
        self.token_env_var = Some(name.into());
        self
    }

    /// Consumes the builder and produces a validated [`Config`].
    ///
    /// # Errors
    /// Returns `Error::Config` if the URL is missing or a setting is out of range.
    pub fn build(self) -> Result<Config> {
        let config = Config {
            url: self.url.unwrap_or_default(),
            output_dir: self.output_dir.unwrap_or_else(|| PathBuf::from(".")),
            ignore_extensions: self.ignore_extensions.unwrap_or_default(),
            api_base: self
                .api_base
                .unwrap_or_else(|| DEFAULT_API_BASE.to_string()),
            concurrency: self.concurrency,
            max_depth: self.max_depth,
            token_env_var: self
                .token_env_var
                .unwrap_or_else(|| GITHUB_ACCESS_TOKEN_KEY.to_string()),
        };
        validate_config(&config)?;
        Ok(config)
    }
}
