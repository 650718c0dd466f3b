//! Error types for article fetching

use std::path::PathBuf;

use crate::error::Error as CrateError;
use thiserror::Error;

/// Error type for fetch operations
#[derive(Debug, Error)]
pub enum FetchError {
    /// Transport-level failure talking to the wiki
    #[error("network error fetching '{phrase}' from {url}: {source}")]
    Network {
        /// Phrase the fetch was for
        phrase: String,
        /// URL the request was sent to
        url: String,
        /// Underlying client error
        #[source]
        source: reqwest::Error,
    },

    /// The wiki answered with a non-success status
    #[error("request for '{phrase}' to {url} returned status {status}")]
    Status {
        /// Phrase the fetch was for
        phrase: String,
        /// URL the request was sent to
        url: String,
        /// HTTP status code
        status: u16,
    },

    /// The base URL and phrase do not combine into a valid URL
    #[error("invalid article URL for phrase '{phrase}': {source}")]
    InvalidUrl {
        /// Phrase the fetch was for
        phrase: String,
        /// Underlying parse error
        #[source]
        source: url::ParseError,
    },

    /// No local file matched the phrase
    #[error("no local file found for phrase '{phrase}' in {}", dir.display())]
    MissingLocalFile {
        /// Phrase the lookup was for
        phrase: String,
        /// Directory that was searched
        dir: PathBuf,
    },

    /// A matching local file could not be read
    #[error("error reading local file {}: {source}", path.display())]
    FileRead {
        /// Path of the unreadable file
        path: PathBuf,
        /// Underlying IO error
        #[source]
        source: std::io::Error,
    },
}

impl From<FetchError> for CrateError {
    fn from(err: FetchError) -> Self {
        match err {
            FetchError::Network { source, .. } => CrateError::Http(source),
            _ => CrateError::Fetch(err.to_string()),
        }
    }
}
