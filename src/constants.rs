// src/constants.rs

/// Only URLs under this prefix (compared case-insensitively) are accepted.
pub const GITHUB_URL_PREFIX: &str = "https://github.com/";

/// Base URL of the GitHub REST API.
pub const DEFAULT_API_BASE: &str = "https://api.github.com";

/// Environment variable holding the optional access token for listing requests.
pub const GITHUB_ACCESS_TOKEN_KEY: &str = "GITHUB_ACCESS_TOKEN";

/// `Accept` header sent with every request.
pub const GITHUB_ACCEPT: &str = "application/vnd.github.v3+json";

/// GitHub rejects requests without a user agent.
pub const USER_AGENT: &str = concat!("github-dlr/", env!("CARGO_PKG_VERSION"));

/// Message shown while the repository tree is being resolved.
pub const RESOLVING_MESSAGE: &str = "Extracting the repository content information";
