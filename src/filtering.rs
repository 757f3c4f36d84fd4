// src/filtering.rs

/// Skips files whose names end with any of the configured suffixes.
///
/// Matching is a plain, case-sensitive suffix test on the file name, so both
/// `"md"` and `".md"` exclude `README.md`. Only file entries are filtered;
/// directories are always traversed.
///
/// # Examples
///
/// ```
/// use github_dlr::filtering::IgnoreFilter;
///
/// let filter = IgnoreFilter::new([".md", ".lock"]);
/// assert!(filter.is_ignored("README.md"));
/// assert!(filter.is_ignored("Cargo.lock"));
/// assert!(!filter.is_ignored("main.rs"));
///
/// assert!(!IgnoreFilter::default().is_ignored("README.md"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IgnoreFilter {
    suffixes: Vec<String>,
}

impl IgnoreFilter {
    /// Builds a filter from a list of suffixes. Empty suffixes are dropped,
    /// since they would match every file.
    pub fn new<I, S>(suffixes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            suffixes: suffixes
                .into_iter()
                .map(Into::into)
                .filter(|s: &String| !s.is_empty())
                .collect(),
        }
    }

    /// Returns `true` if the file `name` should be left out of the download.
    pub fn is_ignored(&self, name: &str) -> bool {
        self.suffixes.iter().any(|suffix| name.ends_with(suffix.as_str()))
    }

    pub fn is_empty(&self) -> bool {
        self.suffixes.is_empty()
    }
}
