//! Supplies the optional access token attached to listing requests.
//!
//! A token raises the GitHub API rate limit and grants access to private
//! repositories. It is only ever sent to the listing endpoint, never to raw
//! download URLs.

use crate::constants::GITHUB_ACCESS_TOKEN_KEY;
use std::env;

/// A source of bearer tokens for the GitHub API.
///
/// # Examples
///
/// ```
/// use github_dlr::credentials::{CredentialProvider, StaticToken};
///
/// let provider = StaticToken::new("ghp_example");
/// assert_eq!(provider.token().as_deref(), Some("ghp_example"));
/// ```
pub trait CredentialProvider: Send + Sync {
    /// Returns the token to send, or `None` for anonymous requests.
    fn token(&self) -> Option<String>;
}

/// Reads the token from an environment variable on every request.
#[derive(Debug, Clone)]
pub struct EnvCredentials {
    key: String,
}

impl EnvCredentials {
    /// Creates a provider reading the named variable.
    pub fn new(key: impl Into<String>) -> Self {
        Self { key: key.into() }
    }
}

impl Default for EnvCredentials {
    fn default() -> Self {
        Self::new(GITHUB_ACCESS_TOKEN_KEY)
    }
}

impl CredentialProvider for EnvCredentials {
    fn token(&self) -> Option<String> {
        env::var(&self.key).ok().filter(|token| !token.trim().is_empty())
    }
}

/// A fixed token, or none at all.
#[derive(Debug, Clone, Default)]
pub struct StaticToken(Option<String>);

impl StaticToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(Some(token.into()))
    }

    /// A provider that never authenticates.
    pub fn anonymous() -> Self {
        Self(None)
    }
}

impl CredentialProvider for StaticToken {
    fn token(&self) -> Option<String> {
        self.0.clone()
    }
}
