//! Raster download with a filename-keyed local cache.
//!
//! A URL resolves to `<cache_dir>/<last path segment>`. An existing file under
//! that name is reused as-is; otherwise the body is streamed into a temporary
//! file in the cache directory and renamed into place once the transfer
//! completed with a success status.
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Duration;

use reqwest::Url;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Errors encountered while resolving a raster URL to a local file
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("HTTP request failed with status: {0}")]
    Status(u16),
    #[error("Invalid URL {url}: {reason}")]
    InvalidUrl { url: String, reason: String },
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to move download into the cache: {0}")]
    Persist(#[from] tempfile::PersistError),
}

/// Source of raster bytes
pub trait Transport {
    /// Stream the resource at `url` into `sink` and return the number of bytes written.
    /// A non-success status must be reported as `FetchError::Status`.
    fn download(&self, url: &str, sink: &mut dyn Write) -> Result<u64, FetchError>;
}

/// Blocking HTTP transport
pub struct HttpTransport {
    client: reqwest::blocking::Client,
}

impl HttpTransport {
    /// `None` disables the request timeout entirely
    pub fn new(timeout: Option<Duration>) -> Result<Self, FetchError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .build()?;
        Ok(Self { client })
    }
}

impl Transport for HttpTransport {
    fn download(&self, url: &str, sink: &mut dyn Write) -> Result<u64, FetchError> {
        debug!("Downloading from: {}", url);
        let mut response = self.client.get(url).send()?;
        if !response.status().is_success() {
            return Err(FetchError::Status(response.status().as_u16()));
        }
        Ok(std::io::copy(&mut response, sink)?)
    }
}

/// Name a URL's raster gets in the cache: its final path segment
pub fn cache_file_name(url: &str) -> Result<String, FetchError> {
    let parsed = Url::parse(url).map_err(|e| FetchError::InvalidUrl {
        url: url.to_string(),
        reason: e.to_string(),
    })?;
    parsed
        .path_segments()
        .and_then(|segments| segments.last())
        .filter(|name| !name.is_empty())
        .map(str::to_string)
        .ok_or_else(|| FetchError::InvalidUrl {
            url: url.to_string(),
            reason: "no file name in path".to_string(),
        })
}

/// Resolves raster URLs to local files through the cache directory
pub struct Fetcher<T: Transport = HttpTransport> {
    cache_dir: PathBuf,
    transport: T,
}

impl<T: Transport> Fetcher<T> {
    pub fn new(cache_dir: impl Into<PathBuf>, transport: T) -> Self {
        Self {
            cache_dir: cache_dir.into(),
            transport,
        }
    }

    pub fn cache_dir(&self) -> &Path {
        &self.cache_dir
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Local path a URL is (or would be) cached under
    pub fn cached_path(&self, url: &str) -> Result<PathBuf, FetchError> {
        Ok(self.cache_dir.join(cache_file_name(url)?))
    }

    /// Resolve `url` to a local file, downloading it on a cache miss
    pub fn try_fetch(&self, url: &str) -> Result<PathBuf, FetchError> {
        fs::create_dir_all(&self.cache_dir)?;
        let path = self.cached_path(url)?;
        if path.is_file() {
            debug!("Using cached raster: {}", path.display());
            return Ok(path);
        }

        let mut partial = tempfile::Builder::new()
            .prefix(".partial-")
            .tempfile_in(&self.cache_dir)?;
        let bytes = self.transport.download(url, partial.as_file_mut())?;
        partial.persist(&path)?;
        info!("Downloaded {} ({} bytes) to {}", url, bytes, path.display());
        Ok(path)
    }

    /// Like `try_fetch`, but any failure is logged and reported as `None`
    pub fn fetch(&self, url: &str) -> Option<PathBuf> {
        match self.try_fetch(url) {
            Ok(path) => Some(path),
            Err(e) => {
                warn!("Skipping {}: {}", url, e);
                None
            }
        }
    }
}
