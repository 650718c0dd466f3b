//! Error types for the wikiscout crate

use thiserror::Error;

/// Result type for wikiscout operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for wikiscout operations
#[derive(Debug, Error)]
pub enum Error {
    /// HTTP client error
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Article could not be fetched
    #[error("Fetch error: {0}")]
    Fetch(String),

    /// Fetched HTML does not have the expected structure
    #[error("Extraction error: {0}")]
    Extraction(String),

    /// Frequency store error
    #[error("Store error: {0}")]
    Store(String),

    /// Crawl error
    #[error("Crawl error: {0}")]
    Crawl(String),

    /// Other errors
    #[error("{0}")]
    Other(String),
}
