//! Error types for feed fetching.

use std::path::PathBuf;

use super::FeedKind;

/// Error raised by the ingestion collaborator.
///
/// Network and credential failures are reported to the caller as-is; nothing is
/// retried.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("Failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    #[error("Invalid DONKI URL {url}: {message}")]
    InvalidUrl { url: String, message: String },

    #[error("{feed} request failed: {source}")]
    Http {
        feed: FeedKind,
        #[source]
        source: reqwest::Error,
    },

    #[error("{feed} feed rejected the API key (HTTP {status})")]
    InvalidCredentials { feed: FeedKind, status: u16 },

    #[error("{feed} feed returned HTTP {status}")]
    Status { feed: FeedKind, status: u16 },

    #[error("{feed} feed is not valid JSON: {source}")]
    Json {
        feed: FeedKind,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to read {} feed from {}: {}", .feed, .path.display(), .source)]
    Io {
        feed: FeedKind,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
