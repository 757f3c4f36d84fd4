//! Decodes GitHub contents API responses into typed listings.

use crate::core_types::{ListingEntry, SingleFile};
use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

/// Represents a file or directory item from the GitHub Contents API.
#[derive(Deserialize, Debug)]
struct ContentItem {
    name: String,
    #[serde(rename = "type")]
    item_type: String,
    /// Self-referencing listing URL; only used for directories.
    url: Option<String>,
    /// Raw content URL; only used for files.
    download_url: Option<String>,
}

/// A decoded listing response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Listing {
    /// The endpoint returned a single object: the target is a file.
    Single(SingleFile),
    /// The endpoint returned an array: the target is a directory.
    Entries(Vec<ListingEntry>),
}

/// Why a listing body could not be decoded.
#[derive(Error, Debug)]
pub(crate) enum ListingDecodeError {
    #[error("malformed listing entry: {0}")]
    Json(#[from] serde_json::Error),
    #[error("'{0}' has no download URL")]
    MissingDownloadUrl(String),
    #[error("expected a JSON object or array")]
    UnexpectedBody,
}

/// Converts a contents API body into a [`Listing`].
///
/// The API returns a single object if the path is a file, or an array for a
/// directory. Array entries other than `file` and `dir` (symlinks,
/// submodules) are skipped, as are entries missing the URL their type needs.
pub(crate) fn parse_listing(body: Value) -> Result<Listing, ListingDecodeError> {
    if body.is_object() {
        let item: ContentItem = serde_json::from_value(body)?;
        let download_url = item
            .download_url
            .ok_or_else(|| ListingDecodeError::MissingDownloadUrl(item.name.clone()))?;
        return Ok(Listing::Single(SingleFile {
            name: item.name,
            download_url,
        }));
    }

    if !body.is_array() {
        return Err(ListingDecodeError::UnexpectedBody);
    }

    let items: Vec<ContentItem> = serde_json::from_value(body)?;
    let mut entries = Vec::with_capacity(items.len());
    for item in items {
        match (item.item_type.as_str(), item.download_url, item.url) {
            ("file", Some(download_url), _) => entries.push(ListingEntry::File {
                name: item.name,
                download_url,
            }),
            ("dir", _, Some(listing_url)) => entries.push(ListingEntry::Directory {
                name: item.name,
                listing_url,
            }),
            ("file", None, _) => {
                log::warn!("Skipping file with no download_url: {}", item.name)
            }
            ("dir", _, None) => {
                log::warn!("Skipping directory with no listing url: {}", item.name)
            }
            (other, _, _) => log::debug!("Skipping '{}' of type '{}'", item.name, other),
        }
    }
    Ok(Listing::Entries(entries))
}
