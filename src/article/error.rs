//! Error types for article content extraction

use crate::error::Error as CrateError;
use thiserror::Error;

/// Error type for content extraction operations
#[derive(Debug, Error)]
pub enum ExtractError {
    /// The main content region is missing from the page
    #[error("main content region not found for article '{title}'")]
    MissingContentRegion {
        /// Title of the offending article
        title: String,
    },

    /// No paragraph element inside the content region
    #[error("no paragraph found in article '{title}'")]
    NoParagraph {
        /// Title of the offending article
        title: String,
    },

    /// No table elements inside the content region
    #[error("no tables found in article '{title}'")]
    NoTables {
        /// Title of the offending article
        title: String,
    },

    /// Requested table index is outside the valid range
    #[error("table index {index} out of bounds for article '{title}': expected 1..={count}")]
    TableIndexOutOfBounds {
        /// Title of the offending article
        title: String,
        /// 1-based index that was requested
        index: usize,
        /// Number of tables actually present
        count: usize,
    },

    /// The selected table parsed to zero data rows
    #[error("no data in table {index} of article '{title}'")]
    EmptyTable {
        /// Title of the offending article
        title: String,
        /// 1-based index of the selected table
        index: usize,
    },

    /// The selected table's markup could not be shaped into a grid
    #[error("malformed table markup in article '{title}': {reason}")]
    MalformedTable {
        /// Title of the offending article
        title: String,
        /// What stopped the grid from being built
        reason: String,
    },
}

impl From<ExtractError> for CrateError {
    fn from(err: ExtractError) -> Self {
        CrateError::Extraction(err.to_string())
    }
}
