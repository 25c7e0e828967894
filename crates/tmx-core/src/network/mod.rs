//! Network utilities for fetching map files.
//!
//! This module provides:
//! - HTTP client with manual redirect handling and an optional timeout
//! - Streaming fetcher with progress reporting

mod client;
mod download;

pub use client::HttpClient;
pub use download::{DownloadProgress, Fetcher, HttpFetcher};
