//! Bulk retrieval of raw feature files from the dataset archive.
//!
//! The archive exposes a generated directory-index page; this module scrapes
//! the anchor links off that page, keeps only links inside the configured
//! base URL, and downloads each file that is not already present locally.

use regex::Regex;
use reqwest::Url;
use std::path::{Path, PathBuf};

/// Download error types.
#[derive(Debug)]
pub enum DownloadError {
    /// Configuration error
    Config(String),
    /// Network/HTTP error
    Network(String),
    /// Server returned an error response
    Server { status: u16, url: String },
    /// File system error
    Io(String),
}

impl std::fmt::Display for DownloadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DownloadError::Config(msg) => write!(f, "Download config error: {msg}"),
            DownloadError::Network(msg) => write!(f, "Download network error: {msg}"),
            DownloadError::Server { status, url } => {
                write!(f, "Server error ({status}) for {url}")
            }
            DownloadError::Io(msg) => write!(f, "Download IO error: {msg}"),
        }
    }
}

impl std::error::Error for DownloadError {}

/// Outcome of fetching one archive entry.
#[derive(Debug)]
pub enum FetchOutcome {
    /// File written to disk
    Downloaded { path: PathBuf, bytes: u64 },
    /// Destination already exists, nothing fetched
    SkippedExisting { path: PathBuf },
    /// The link resolved to another index page, not a file
    NotAFile { url: String },
}

/// Extract absolute same-base links from a directory-index page.
///
/// Relative `href`s are resolved against `base`; links pointing outside the
/// base URL (parent-directory links, external sites) are dropped.
pub fn extract_links(base: &Url, html: &str) -> Vec<Url> {
    // Index pages are server-generated; anchors always use double quotes.
    let href = Regex::new(r#"href="([^"]+)""#).expect("static regex");

    href.captures_iter(html)
        .filter_map(|cap| {
            let target = cap.get(1)?.as_str();
            if target == "../" || target == "/" {
                return None;
            }
            base.join(target).ok()
        })
        .filter(|url| url.as_str().starts_with(base.as_str()))
        .collect()
}

/// Async client for mirroring the dataset archive.
pub struct ArchiveClient {
    client: reqwest::Client,
    base_url: Url,
}

impl ArchiveClient {
    /// Create a client for the given archive index URL.
    ///
    /// `accept_invalid_certs` matches the archive host's long-expired
    /// certificate chain; it is off unless the config enables it.
    pub fn new(base_url: &str, accept_invalid_certs: bool) -> Result<Self, DownloadError> {
        let base_url = Url::parse(base_url)
            .map_err(|e| DownloadError::Config(format!("Invalid base URL '{base_url}': {e}")))?;

        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(60))
            .user_agent(concat!("engagement-prep/", env!("CARGO_PKG_VERSION")))
            .danger_accept_invalid_certs(accept_invalid_certs)
            .build()
            .map_err(|e| DownloadError::Config(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self { client, base_url })
    }

    /// The archive index URL this client mirrors.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Fetch the index page and return the file links it carries.
    pub async fn fetch_links(&self) -> Result<Vec<Url>, DownloadError> {
        let response = self
            .client
            .get(self.base_url.clone())
            .send()
            .await
            .map_err(|e| DownloadError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(DownloadError::Server {
                status: status.as_u16(),
                url: self.base_url.to_string(),
            });
        }

        let html = response
            .text()
            .await
            .map_err(|e| DownloadError::Network(e.to_string()))?;

        Ok(extract_links(&self.base_url, &html))
    }

    /// Download one archive entry to `dest`, skipping existing files.
    pub async fn download_file(&self, url: &Url, dest: &Path) -> Result<FetchOutcome, DownloadError> {
        if dest.exists() {
            return Ok(FetchOutcome::SkippedExisting {
                path: dest.to_path_buf(),
            });
        }

        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(|e| DownloadError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(DownloadError::Server {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        // Index pages come back as HTML; only opaque payloads are files.
        let is_html = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(|v| v.contains("text/html"))
            .unwrap_or(false);
        if is_html {
            return Ok(FetchOutcome::NotAFile {
                url: url.to_string(),
            });
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| DownloadError::Network(e.to_string()))?;

        if let Some(parent) = dest.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| DownloadError::Io(format!("{}: {e}", parent.display())))?;
        }
        std::fs::write(dest, &bytes)
            .map_err(|e| DownloadError::Io(format!("{}: {e}", dest.display())))?;

        Ok(FetchOutcome::Downloaded {
            path: dest.to_path_buf(),
            bytes: bytes.len() as u64,
        })
    }

    /// Mirror every file linked from the index page into `dest_dir`.
    ///
    /// Per-file failures are collected alongside successes so one bad link
    /// does not abort the run.
    pub async fn mirror(&self, dest_dir: &Path) -> Result<Vec<Result<FetchOutcome, DownloadError>>, DownloadError> {
        let links = self.fetch_links().await?;

        let mut outcomes = Vec::with_capacity(links.len());
        for link in links {
            let filename = link
                .path_segments()
                .and_then(|segments| segments.last())
                .filter(|name| !name.is_empty())
                .unwrap_or("index")
                .to_string();
            let dest = dest_dir.join(filename);
            outcomes.push(self.download_file(&link, &dest).await);
        }

        Ok(outcomes)
    }
}

/// Blocking archive client for use in synchronous contexts.
pub struct BlockingArchiveClient {
    inner: ArchiveClient,
    runtime: tokio::runtime::Runtime,
}

impl BlockingArchiveClient {
    /// Create a new blocking archive client.
    pub fn new(base_url: &str, accept_invalid_certs: bool) -> Result<Self, DownloadError> {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(|e| DownloadError::Config(format!("Failed to create runtime: {e}")))?;

        Ok(Self {
            inner: ArchiveClient::new(base_url, accept_invalid_certs)?,
            runtime,
        })
    }

    /// Fetch the index page and return the file links it carries.
    pub fn fetch_links(&self) -> Result<Vec<Url>, DownloadError> {
        self.runtime.block_on(self.inner.fetch_links())
    }

    /// Download one archive entry to `dest`, skipping existing files.
    pub fn download_file(&self, url: &Url, dest: &Path) -> Result<FetchOutcome, DownloadError> {
        self.runtime.block_on(self.inner.download_file(url, dest))
    }

    /// Mirror every file linked from the index page into `dest_dir`.
    pub fn mirror(&self, dest_dir: &Path) -> Result<Vec<Result<FetchOutcome, DownloadError>>, DownloadError> {
        self.runtime.block_on(self.inner.mirror(dest_dir))
    }
}
