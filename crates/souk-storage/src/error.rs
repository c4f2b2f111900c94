//! Storage error types.

use thiserror::Error;

/// Errors that can occur when reading or writing a device store.
#[derive(Error, Debug)]
pub enum StorageError {
    /// Failed to serialize or deserialize a stored value.
    #[error("Serialization error: {0}")]
    Serialize(#[from] serde_json::Error),

    /// The backend could not complete the operation.
    #[error("Store operation failed: {0}")]
    Backend(String),
}
