//! Map fetcher with progress reporting.
//!
//! Provides:
//! - Download with a per-chunk progress callback
//! - A single manual redirect hop (301/302)
//! - Atomic file operations (temp file → final)

use crate::config::NetworkConfig;
use crate::error::{Result, TmxError};
use crate::network::client::HttpClient;
use crate::platform;
use async_trait::async_trait;
use futures::StreamExt;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tokio::io::AsyncWriteExt;
use tracing::{debug, info, warn};

/// Progress information for a download.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DownloadProgress {
    /// Bytes downloaded so far.
    pub bytes_downloaded: u64,
    /// Total bytes (if the server announced a non-zero length).
    pub total_bytes: Option<u64>,
}

impl DownloadProgress {
    pub fn new(bytes_downloaded: u64, total_bytes: Option<u64>) -> Self {
        Self {
            bytes_downloaded,
            total_bytes,
        }
    }

    /// Fraction of the payload received, when the total is known.
    pub fn fraction(&self) -> Option<f64> {
        self.total_bytes
            .filter(|&total| total > 0)
            .map(|total| (self.bytes_downloaded as f64 / total as f64).min(1.0))
    }
}

/// Retrieves a remote resource to a local path.
#[async_trait]
pub trait Fetcher: Send + Sync {
    /// Download `url` to `destination`, reporting progress as bytes arrive.
    ///
    /// Returns only after the destination file is fully written and closed.
    /// An existing file at `destination` is replaced.
    async fn fetch(
        &self,
        url: &str,
        destination: &Path,
        on_progress: &mut (dyn FnMut(DownloadProgress) + Send),
    ) -> Result<u64>;
}

/// Fetcher backed by reqwest.
pub struct HttpFetcher {
    http: Arc<HttpClient>,
    /// Temp file suffix.
    temp_suffix: String,
}

impl HttpFetcher {
    /// Create a fetcher, optionally bounding each request with a timeout.
    pub fn new(timeout: Option<Duration>) -> Result<Self> {
        Ok(Self::with_client(Arc::new(HttpClient::with_timeout(timeout)?)))
    }

    /// Create a fetcher with a custom HTTP client.
    pub fn with_client(http: Arc<HttpClient>) -> Self {
        Self {
            http,
            temp_suffix: NetworkConfig::DOWNLOAD_TEMP_SUFFIX.to_string(),
        }
    }

    async fn do_fetch(
        &self,
        url: &str,
        temp_path: &Path,
        on_progress: &mut (dyn FnMut(DownloadProgress) + Send),
    ) -> Result<u64> {
        let mut response = self.http.get(url).await?;
        info!("Download response status: {}", response.status());

        // Exactly one hop; whatever the second request returns is the payload.
        if HttpClient::is_followed_redirect(response.status()) {
            let target = HttpClient::redirect_target(&response)?;
            info!("Redirect to: {}", target);
            response = self.http.get(&target).await?;
            info!("Redirect response status: {}", response.status());
        }

        let status = response.status();
        if !status.is_success() {
            warn!(
                "Response status {} from {} is saved as map data",
                status,
                response.url()
            );
        }

        let total_bytes = response.content_length().filter(|&len| len > 0);
        let mut file = tokio::fs::File::create(temp_path)
            .await
            .map_err(|e| TmxError::Io {
                message: format!("Failed to create temp file: {}", e),
                path: Some(temp_path.to_path_buf()),
                source: Some(e),
            })?;

        let mut bytes_downloaded: u64 = 0;
        on_progress(DownloadProgress::new(0, total_bytes));

        // A stalled body hits the same request timeout as the headers
        let payload_url = response.url().to_string();
        let mut stream = response.bytes_stream();
        while let Some(chunk_result) = stream.next().await {
            let chunk = chunk_result
                .map_err(|e| TmxError::from_request(e, &payload_url, self.http.timeout()))?;

            file.write_all(&chunk).await.map_err(|e| TmxError::Io {
                message: format!("Failed to write to temp file: {}", e),
                path: Some(temp_path.to_path_buf()),
                source: Some(e),
            })?;

            bytes_downloaded += chunk.len() as u64;
            debug!("Downloaded {} / {:?} bytes", bytes_downloaded, total_bytes);
            on_progress(DownloadProgress::new(bytes_downloaded, total_bytes));
        }

        // Ensure data is flushed to disk before the handle is closed
        file.flush().await.map_err(|e| TmxError::Io {
            message: format!("Failed to flush temp file: {}", e),
            path: Some(temp_path.to_path_buf()),
            source: Some(e),
        })?;
        file.sync_all().await.map_err(|e| TmxError::io_with_path(e, temp_path))?;
        drop(file);

        Ok(bytes_downloaded)
    }
}

#[async_trait]
impl Fetcher for HttpFetcher {
    async fn fetch(
        &self,
        url: &str,
        destination: &Path,
        on_progress: &mut (dyn FnMut(DownloadProgress) + Send),
    ) -> Result<u64> {
        if let Some(parent) = destination.parent() {
            platform::ensure_dir(parent)?;
        }

        let temp_path = PathBuf::from(format!(
            "{}{}",
            destination.display(),
            self.temp_suffix
        ));

        match self.do_fetch(url, &temp_path, on_progress).await {
            Ok(bytes) => {
                // Atomic move from temp to final destination
                tokio::fs::rename(&temp_path, destination)
                    .await
                    .map_err(|e| {
                        let _ = std::fs::remove_file(&temp_path);
                        TmxError::Io {
                            message: format!(
                                "Failed to move download to final destination: {}",
                                e
                            ),
                            path: Some(destination.to_path_buf()),
                            source: Some(e),
                        }
                    })?;

                info!("Downloaded {} bytes to {}", bytes, destination.display());
                Ok(bytes)
            }
            Err(e) => {
                // Cleanup temp file on error
                let _ = tokio::fs::remove_file(&temp_path).await;
                Err(e)
            }
        }
    }
}
