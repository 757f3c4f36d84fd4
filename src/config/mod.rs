//! Defines the core `Config` struct for a download run.
//!
//! This module consolidates all the settings parsed and validated from the CLI
//! (or set programmatically through [`ConfigBuilder`]), making them available
//! to the download pipeline in a structured and type-safe manner.

use crate::constants::{DEFAULT_API_BASE, GITHUB_ACCESS_TOKEN_KEY};
use std::path::PathBuf;

pub use builder::ConfigBuilder;
mod builder;
mod validation;

/// Settings for a single download run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// The GitHub folder or file URL to download.
    pub url: String,
    /// Directory the target folder (or file) is written into.
    pub output_dir: PathBuf,
    /// File name suffixes to skip while walking the tree.
    pub ignore_extensions: Vec<String>,
    /// Base URL of the GitHub REST API.
    pub api_base: String,
    /// Maximum number of simultaneous file downloads. `None` means no limit.
    pub concurrency: Option<usize>,
    /// Maximum directory depth walked below the target. `None` means no limit.
    pub max_depth: Option<usize>,
    /// Environment variable holding the access token.
    pub token_env_var: String,
}

impl Config {
    /// Creates a `Config` with default settings for `url`.
    ///
    /// This function is hidden from public documentation and is intended for
    /// use in tests and doc tests only.
    #[doc(hidden)]
    pub fn new_for_test(url: &str) -> Self {
        Self {
            url: url.to_string(),
            output_dir: PathBuf::from("."),
            ignore_extensions: Vec::new(),
            api_base: DEFAULT_API_BASE.to_string(),
            concurrency: None,
            max_depth: None,
            token_env_var: GITHUB_ACCESS_TOKEN_KEY.to_string(),
        }
    }
}
