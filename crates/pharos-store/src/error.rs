//! Error type for the storage trait abstractions.

use thiserror::Error;

/// Errors raised by [`crate::storage_traits::MetadataStore`] and
/// [`crate::storage_traits::RegisterPageStore`] implementations.
#[derive(Error, Debug)]
pub enum StoreError {
    /// No item at the given partition/sort key.
    #[error("not found: pk={pk}, sk={sk}")]
    NotFound { pk: String, sk: String },

    /// The backend (network, disk, database) failed.
    #[error("storage backend error: {0}")]
    Backend(String),

    /// The stored bytes could not be (de)serialized into the expected shape.
    #[error("serialization error: {0}")]
    Serialization(String),
}

impl From<serde_json::Error> for StoreError {
    fn from(err: serde_json::Error) -> Self {
        StoreError::Serialization(err.to_string())
    }
}
