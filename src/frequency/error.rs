//! Error types for the frequency store

use crate::error::Error as CrateError;
use thiserror::Error;

/// Error type for frequency store operations
#[derive(Debug, Error)]
pub enum StoreError {
    /// IO error reading or writing the store file
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The merged map could not be serialized
    #[error("serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}

impl From<StoreError> for CrateError {
    fn from(err: StoreError) -> Self {
        CrateError::Store(err.to_string())
    }
}
