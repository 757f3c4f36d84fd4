// tests/common.rs

#![allow(dead_code)] // Each integration test uses a different subset of these helpers.

use github_dlr::notify::Notifier;
use serde_json::{json, Value};
use std::process::Command;
use std::sync::Mutex;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// The branch every mocked listing is pinned to.
pub const BRANCH: &str = "main";

// Helper function to get the binary command
pub fn github_dlr_cmd() -> Command {
    Command::new(assert_cmd::cargo::cargo_bin!("github-dlr"))
}

/// A notifier that keeps every notice for later assertions.
#[derive(Default)]
pub struct RecordingNotifier {
    infos: Mutex<Vec<String>>,
    warnings: Mutex<Vec<String>>,
}

impl RecordingNotifier {
    pub fn infos(&self) -> Vec<String> {
        self.infos.lock().unwrap().clone()
    }

    pub fn warnings(&self) -> Vec<String> {
        self.warnings.lock().unwrap().clone()
    }
}

impl Notifier for RecordingNotifier {
    fn info(&self, message: &str) {
        self.infos.lock().unwrap().push(message.to_string());
    }

    fn warn(&self, message: &str) {
        self.warnings.lock().unwrap().push(message.to_string());
    }
}

/// Path of the contents API listing for `repo_path` in `owner/repo`.
pub fn contents_path(repo_path: &str) -> String {
    format!("/repos/owner/repo/contents/{}", repo_path)
}

/// Full listing URL for `repo_path`, as the API would put in a `url` field.
pub fn listing_url(server: &MockServer, repo_path: &str) -> String {
    format!("{}{}?ref={}", server.uri(), contents_path(repo_path), BRANCH)
}

/// Path of the raw download for `repo_path`.
pub fn raw_path(repo_path: &str) -> String {
    format!("/raw/owner/repo/{}/{}", BRANCH, repo_path)
}

/// A `"file"` entry of a directory listing.
pub fn file_entry(server: &MockServer, repo_path: &str) -> Value {
    let name = repo_path.rsplit('/').next().unwrap_or(repo_path);
    json!({
        "name": name,
        "path": repo_path,
        "type": "file",
        "url": listing_url(server, repo_path),
        "download_url": format!("{}{}", server.uri(), raw_path(repo_path)),
    })
}

/// A `"dir"` entry of a directory listing.
pub fn dir_entry(server: &MockServer, repo_path: &str) -> Value {
    let name = repo_path.rsplit('/').next().unwrap_or(repo_path);
    json!({
        "name": name,
        "path": repo_path,
        "type": "dir",
        "url": listing_url(server, repo_path),
        "download_url": null,
    })
}

/// Serves `body` as the listing of `repo_path`.
pub async fn mount_listing(server: &MockServer, repo_path: &str, body: Value) {
    Mock::given(method("GET"))
        .and(path(contents_path(repo_path)))
        .and(query_param("ref", BRANCH))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}

/// Answers the listing of `repo_path` with a bare status code.
pub async fn mount_listing_status(server: &MockServer, repo_path: &str, status: u16) {
    Mock::given(method("GET"))
        .and(path(contents_path(repo_path)))
        .respond_with(ResponseTemplate::new(status))
        .mount(server)
        .await;
}

/// Serves `content` as the raw bytes of `repo_path`.
pub async fn mount_raw(server: &MockServer, repo_path: &str, content: &[u8]) {
    Mock::given(method("GET"))
        .and(path(raw_path(repo_path)))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(content.to_vec()))
        .mount(server)
        .await;
}

/// Answers the raw download of `repo_path` with a bare status code.
pub async fn mount_raw_status(server: &MockServer, repo_path: &str, status: u16) {
    Mock::given(method("GET"))
        .and(path(raw_path(repo_path)))
        .respond_with(ResponseTemplate::new(status))
        .mount(server)
        .await;
}
