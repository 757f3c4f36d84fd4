// src/github/mod.rs
//! Talks to GitHub: URL parsing and contents API tree resolution.
//!
//! This module provides functionality to:
//! - Parse a GitHub folder/file URL into a [`RepoLocation`].
//! - Decode contents API listings into typed entries.
//! - Walk a remote directory tree into a flat list of downloadable files.

mod api;
mod listing;
mod url;

pub use api::TreeResolver;
pub use url::RepoLocation;
