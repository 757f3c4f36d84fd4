// tests/download_pipeline.rs

mod common;

use common::{
    dir_entry, file_entry, listing_url, mount_listing, mount_listing_status, mount_raw,
    mount_raw_status, RecordingNotifier,
};
use github_dlr::credentials::StaticToken;
use github_dlr::errors::Error;
use github_dlr::{Config, DownloadKind, DownloadReport, Downloader};
use serde_json::json;
use std::fs;
use std::path::Path;
use std::sync::Arc;
use tempfile::{tempdir, TempDir};
use wiremock::MockServer;

const FOLDER_URL: &str = "https://github.com/owner/repo/tree/main/docs";

struct Harness {
    server: MockServer,
    temp: TempDir,
    notifier: Arc<RecordingNotifier>,
}

impl Harness {
    async fn start() -> Self {
        Self {
            server: MockServer::start().await,
            temp: tempdir().expect("failed to create temp dir"),
            notifier: Arc::new(RecordingNotifier::default()),
        }
    }

    fn out(&self) -> &Path {
        self.temp.path()
    }

    fn config(&self, url: &str) -> Config {
        Config {
            api_base: self.server.uri(),
            output_dir: self.out().to_path_buf(),
            ..Config::new_for_test(url)
        }
    }

    fn downloader(&self, config: &Config, token: StaticToken) -> Downloader {
        Downloader::new(config)
            .expect("client should build")
            .with_credentials(Arc::new(token))
            .with_notifier(self.notifier.clone())
    }

    async fn run(&self, config: &Config) -> Result<DownloadReport, Error> {
        self.downloader(config, StaticToken::anonymous())
            .download(&config.url, &config.output_dir, &config.ignore_extensions)
            .await
    }
}

#[tokio::test]
async fn test_folder_is_mirrored_on_disk() -> anyhow::Result<()> {
    let h = Harness::start().await;
    mount_listing(
        &h.server,
        "docs",
        json!([file_entry(&h.server, "docs/a.txt"), dir_entry(&h.server, "docs/sub")]),
    )
    .await;
    mount_listing(&h.server, "docs/sub", json!([file_entry(&h.server, "docs/sub/b.txt")])).await;
    mount_raw(&h.server, "docs/a.txt", b"alpha").await;
    mount_raw(&h.server, "docs/sub/b.txt", b"beta").await;

    let report = h.run(&h.config(FOLDER_URL)).await?;

    assert_eq!(report.kind, DownloadKind::Folder);
    assert_eq!(report.downloaded, 2);
    assert!(report.is_complete());
    assert_eq!(report.destination, h.out().join("docs"));
    assert_eq!(fs::read_to_string(h.out().join("docs/a.txt"))?, "alpha");
    assert_eq!(fs::read_to_string(h.out().join("docs/sub/b.txt"))?, "beta");
    assert_eq!(
        h.notifier.infos(),
        vec![format!(
            "Downloaded 'docs' folder from repo 'repo' to '{}'.",
            h.out().display()
        )]
    );
    assert!(h.notifier.warnings().is_empty());
    Ok(())
}

#[tokio::test]
async fn test_one_failed_file_does_not_stop_the_others() -> anyhow::Result<()> {
    let h = Harness::start().await;
    mount_listing(
        &h.server,
        "docs",
        json!([
            file_entry(&h.server, "docs/one.txt"),
            file_entry(&h.server, "docs/two.txt"),
            file_entry(&h.server, "docs/three.txt"),
        ]),
    )
    .await;
    mount_raw(&h.server, "docs/one.txt", b"1").await;
    mount_raw_status(&h.server, "docs/two.txt", 500).await;
    mount_raw(&h.server, "docs/three.txt", b"3").await;

    let report = h.run(&h.config(FOLDER_URL)).await?;

    assert_eq!(report.kind, DownloadKind::Folder);
    assert_eq!(report.downloaded, 2);
    assert_eq!(report.failed, 1);
    assert!(!report.is_complete());
    assert!(h.out().join("docs/one.txt").exists());
    assert!(!h.out().join("docs/two.txt").exists());
    assert!(h.out().join("docs/three.txt").exists());

    let warnings = h.notifier.warnings();
    assert_eq!(warnings.len(), 1, "{:?}", warnings);
    assert!(warnings[0].contains("docs/two.txt"));
    assert!(warnings[0].ends_with("Skipping this file!"));
    Ok(())
}

#[tokio::test]
async fn test_everything_ignored_leaves_no_folder_behind() -> anyhow::Result<()> {
    let h = Harness::start().await;
    mount_listing(
        &h.server,
        "docs",
        json!([file_entry(&h.server, "docs/a.md"), dir_entry(&h.server, "docs/sub")]),
    )
    .await;
    mount_listing(&h.server, "docs/sub", json!([file_entry(&h.server, "docs/sub/b.md")])).await;

    let config = Config {
        ignore_extensions: vec![".md".to_string()],
        ..h.config(FOLDER_URL)
    };
    let report = h.run(&config).await?;

    assert_eq!(report.kind, DownloadKind::NoContent);
    assert_eq!(report.downloaded, 0);
    assert!(!h.out().join("docs").exists());
    assert_eq!(
        h.notifier.warnings(),
        vec![format!("No content found in '{}'.", listing_url(&h.server, "docs"))]
    );
    assert!(h.notifier.infos().is_empty());
    Ok(())
}

#[tokio::test]
async fn test_pre_existing_folder_is_never_removed() -> anyhow::Result<()> {
    let h = Harness::start().await;
    fs::create_dir_all(h.out().join("docs"))?;
    fs::write(h.out().join("docs/keep.txt"), "mine")?;
    mount_listing(&h.server, "docs", json!([])).await;

    let report = h.run(&h.config(FOLDER_URL)).await?;

    assert_eq!(report.kind, DownloadKind::NoContent);
    assert_eq!(fs::read_to_string(h.out().join("docs/keep.txt"))?, "mine");
    Ok(())
}

#[tokio::test]
async fn test_single_file_is_written_next_to_the_output_dir() -> anyhow::Result<()> {
    let h = Harness::start().await;
    mount_listing(
        &h.server,
        "README.md",
        json!({
            "name": "README.md",
            "type": "file",
            "download_url": format!("{}{}", h.server.uri(), common::raw_path("README.md")),
        }),
    )
    .await;
    mount_raw(&h.server, "README.md", b"# Hello").await;

    let report = h
        .run(&h.config("https://github.com/owner/repo/blob/main/README.md"))
        .await?;

    assert_eq!(report.kind, DownloadKind::File);
    assert_eq!(report.destination, h.out().join("README.md"));
    assert!(h.out().join("README.md").is_file());
    assert_eq!(fs::read_to_string(h.out().join("README.md"))?, "# Hello");
    assert_eq!(
        h.notifier.infos(),
        vec![format!(
            "Downloaded 'README.md' file from repo 'repo' to '{}'.",
            h.out().display()
        )]
    );
    Ok(())
}

#[tokio::test]
async fn test_concurrent_files_share_a_parent_directory() -> anyhow::Result<()> {
    let h = Harness::start().await;
    let names: Vec<String> = (0..8).map(|i| format!("docs/shared/file{}.txt", i)).collect();
    mount_listing(&h.server, "docs", json!([dir_entry(&h.server, "docs/shared")])).await;
    mount_listing(
        &h.server,
        "docs/shared",
        json!(names.iter().map(|n| file_entry(&h.server, n)).collect::<Vec<_>>()),
    )
    .await;
    for name in &names {
        mount_raw(&h.server, name, name.as_bytes()).await;
    }

    let report = h.run(&h.config(FOLDER_URL)).await?;

    assert_eq!(report.downloaded, names.len());
    for name in &names {
        assert_eq!(fs::read_to_string(h.out().join(name))?, *name);
    }
    assert!(h.notifier.warnings().is_empty());
    Ok(())
}

#[tokio::test]
async fn test_sequential_downloads_with_concurrency_one() -> anyhow::Result<()> {
    let h = Harness::start().await;
    mount_listing(
        &h.server,
        "docs",
        json!([file_entry(&h.server, "docs/a.txt"), file_entry(&h.server, "docs/b.txt")]),
    )
    .await;
    mount_raw(&h.server, "docs/a.txt", b"a").await;
    mount_raw(&h.server, "docs/b.txt", b"b").await;

    let config = Config {
        concurrency: Some(1),
        ..h.config(FOLDER_URL)
    };
    let report = h.run(&config).await?;

    assert_eq!(report.downloaded, 2);
    assert!(h.out().join("docs/a.txt").exists());
    assert!(h.out().join("docs/b.txt").exists());
    Ok(())
}

#[tokio::test]
async fn test_missing_folder_reports_listing_failure() -> anyhow::Result<()> {
    let h = Harness::start().await;
    mount_listing_status(&h.server, "docs", 404).await;

    let report = h.run(&h.config(FOLDER_URL)).await?;

    assert_eq!(report.kind, DownloadKind::NoContent);
    assert_eq!(report.listing_failures, 1);
    assert!(!h.out().join("docs").exists());

    let warnings = h.notifier.warnings();
    assert_eq!(warnings.len(), 2, "{:?}", warnings);
    assert!(warnings[0].contains("404"));
    assert!(warnings[0].contains("Not Found"));
    assert!(warnings[1].starts_with("No content found in"));
    Ok(())
}

#[tokio::test]
async fn test_token_is_sent_to_the_api_but_not_to_raw_downloads() -> anyhow::Result<()> {
    let h = Harness::start().await;
    mount_listing(&h.server, "docs", json!([file_entry(&h.server, "docs/a.txt")])).await;
    mount_raw(&h.server, "docs/a.txt", b"a").await;

    let config = h.config(FOLDER_URL);
    let report = h
        .downloader(&config, StaticToken::new("s3cret"))
        .download(&config.url, &config.output_dir, &config.ignore_extensions)
        .await?;
    assert_eq!(report.downloaded, 1);

    let requests = h
        .server
        .received_requests()
        .await
        .expect("request recording is enabled by default");
    assert_eq!(requests.len(), 2);
    for request in &requests {
        let authorization = request.headers.get("authorization");
        if request.url.path().starts_with("/repos/") {
            assert_eq!(
                authorization.and_then(|v| v.to_str().ok()),
                Some("Bearer s3cret")
            );
        } else {
            assert!(authorization.is_none(), "raw download carried a token");
        }
    }
    Ok(())
}

#[tokio::test]
async fn test_invalid_url_fails_before_any_request() {
    let h = Harness::start().await;

    let result = h.run(&h.config("https://github.com/owner/repo")).await;

    assert!(matches!(result, Err(Error::InvalidUrl { .. })));
    let requests = h.server.received_requests().await.unwrap_or_default();
    assert!(requests.is_empty());
    assert!(fs::read_dir(h.out()).map(|mut d| d.next().is_none()).unwrap_or(true));
}

#[tokio::test]
async fn test_entry_escaping_the_root_is_counted_as_failed() -> anyhow::Result<()> {
    let h = Harness::start().await;
    let escape_url = format!("{}{}", h.server.uri(), common::raw_path("escape.txt"));
    mount_listing(
        &h.server,
        "docs",
        json!([
            file_entry(&h.server, "docs/a.txt"),
            {
                "name": "../../escape.txt",
                "type": "file",
                "url": listing_url(&h.server, "escape.txt"),
                "download_url": escape_url.clone(),
            },
        ]),
    )
    .await;
    mount_raw(&h.server, "docs/a.txt", b"a").await;
    mount_raw(&h.server, "escape.txt", b"escaped").await;

    let output_dir = h.out().join("nested").join("out");
    let config = Config {
        output_dir: output_dir.clone(),
        ..h.config(FOLDER_URL)
    };
    let report = h.run(&config).await?;

    assert_eq!(report.kind, DownloadKind::Folder);
    assert_eq!(report.downloaded, 1);
    assert_eq!(report.failed, 1);
    assert!(output_dir.join("docs/a.txt").exists());
    assert!(!h.out().join("nested/escape.txt").exists());
    assert!(!h.out().join("escape.txt").exists());

    let warnings = h.notifier.warnings();
    assert_eq!(
        warnings,
        vec![format!("Failed to download '{}'. Skipping this file!", escape_url)]
    );
    let requests = h.server.received_requests().await.unwrap_or_default();
    assert!(requests
        .iter()
        .all(|request| request.url.path() != common::raw_path("escape.txt")));
    Ok(())
}
