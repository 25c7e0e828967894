//! HTTP client wrapper.
//!
//! Provides a wrapper around reqwest with:
//! - Automatic redirects disabled, so callers decide how many hops to follow
//! - Optional whole-request timeout
//! - User-agent management

use crate::config::NetworkConfig;
use crate::error::{Result, TmxError};
use reqwest::{header, redirect, Client, Response, StatusCode};
use std::time::Duration;
use tracing::debug;
use url::Url;

/// HTTP client used by the fetcher.
pub struct HttpClient {
    client: Client,
    timeout: Option<Duration>,
}

impl HttpClient {
    /// Create a new HTTP client without a request timeout.
    pub fn new() -> Result<Self> {
        Self::with_timeout(None)
    }

    /// Create a new HTTP client, optionally bounding every request.
    pub fn with_timeout(timeout: Option<Duration>) -> Result<Self> {
        let mut builder = Client::builder()
            .redirect(redirect::Policy::none())
            .user_agent(NetworkConfig::USER_AGENT);
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        let client = builder.build().map_err(|e| TmxError::Network {
            message: format!("Failed to create HTTP client: {}", e),
            cause: None,
        })?;

        Ok(Self { client, timeout })
    }

    /// Configured request timeout.
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    /// Make a GET request. Redirect responses are returned as-is.
    pub async fn get(&self, url: &str) -> Result<Response> {
        debug!("GET {}", url);
        self.client
            .get(url)
            .send()
            .await
            .map_err(|e| TmxError::from_request(e, url, self.timeout))
    }

    /// Whether the status is one of the redirects the fetcher follows.
    pub fn is_followed_redirect(status: StatusCode) -> bool {
        status == StatusCode::MOVED_PERMANENTLY || status == StatusCode::FOUND
    }

    /// Resolve the `Location` header of a redirect against the request URL.
    pub fn redirect_target(response: &Response) -> Result<String> {
        let request_url = response.url().as_str().to_string();
        let location = response
            .headers()
            .get(header::LOCATION)
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| TmxError::DownloadFailed {
                url: request_url.clone(),
                message: format!("{} redirect without a Location header", response.status()),
            })?;

        let base = Url::parse(&request_url).map_err(|e| TmxError::DownloadFailed {
            url: request_url.clone(),
            message: format!("Invalid request URL: {}", e),
        })?;
        let target = base.join(location).map_err(|e| TmxError::DownloadFailed {
            url: request_url.clone(),
            message: format!("Invalid redirect location {:?}: {}", location, e),
        })?;

        Ok(target.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_creation() {
        let client = HttpClient::new().unwrap();
        assert!(client.timeout().is_none());

        let client = HttpClient::with_timeout(Some(Duration::from_secs(5))).unwrap();
        assert_eq!(client.timeout(), Some(Duration::from_secs(5)));
    }

    #[test]
    fn test_followed_redirects() {
        assert!(HttpClient::is_followed_redirect(StatusCode::MOVED_PERMANENTLY));
        assert!(HttpClient::is_followed_redirect(StatusCode::FOUND));
        assert!(!HttpClient::is_followed_redirect(StatusCode::TEMPORARY_REDIRECT));
        assert!(!HttpClient::is_followed_redirect(StatusCode::OK));
    }
}
