//! Convenient re-exports for library usage.
//!
//! # Example
//!
//! ```no_run
//! use github_dlr::prelude::*;
//! use std::sync::Arc;
//! # async fn example() -> Result<()> {
//!
//! let config = ConfigBuilder::new()
//!     .url("https://github.com/rust-lang/cargo/tree/master/src/doc")
//!     .build()?;
//! let report = Downloader::new(&config)?
//!     .with_notifier(Arc::new(SilentNotifier))
//!     .download(&config.url, &config.output_dir, &config.ignore_extensions)
//!     .await?;
//! assert_eq!(report.kind, DownloadKind::Folder);
//! # Ok(())
//! # }
//! ```

pub use crate::cancellation::CancellationToken;
pub use crate::config::{Config, ConfigBuilder};
pub use crate::core_types::{DownloadKind, DownloadReport, FileDescriptor};
pub use crate::credentials::{CredentialProvider, EnvCredentials, StaticToken};
pub use crate::downloader::Downloader;
pub use crate::errors::{Error, Result};
pub use crate::filtering::IgnoreFilter;
pub use crate::notify::{ConsoleNotifier, Notifier, SilentNotifier};
pub use crate::progress::ProgressReporter;
pub use crate::{download, run};
