//! Error types for the crawler module

use crate::error::Error as CrateError;
use crate::fetch::FetchError;
use crate::frequency::StoreError;
use thiserror::Error;

/// Error type for crawl-wide failures.
///
/// Per-article failures never surface here; they are recorded in the crawl
/// report and the traversal moves on.
#[derive(Debug, Error)]
pub enum CrawlError {
    /// The seed article could not be fetched, so no queue was ever built
    #[error("cannot fetch seed article: {0}")]
    Seed(#[source] FetchError),

    /// The frequency index could not be read or written
    #[error("frequency store failure: {0}")]
    Store(#[from] StoreError),
}

impl From<CrawlError> for CrateError {
    fn from(err: CrawlError) -> Self {
        CrateError::Crawl(err.to_string())
    }
}
