//! Typed key-value store over a pluggable byte backend.

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::StorageError;

/// Byte-oriented device storage.
///
/// Implementations are shared freely across threads. Concurrent writers to
/// the same key race last-writer-wins, matching the browser storage this
/// mirrors; no backend is expected to merge payloads.
pub trait StorageBackend: Send + Sync {
    /// Read the raw bytes stored under `key`.
    fn load(&self, key: &str) -> Result<Option<Vec<u8>>, StorageError>;

    /// Write `bytes` under `key`, replacing any previous value.
    fn save(&self, key: &str, bytes: &[u8]) -> Result<(), StorageError>;

    /// Remove `key`. Succeeds when the key does not exist.
    fn remove(&self, key: &str) -> Result<(), StorageError>;

    /// Whether `key` currently holds a value.
    fn contains(&self, key: &str) -> Result<bool, StorageError> {
        Ok(self.load(key)?.is_some())
    }
}

/// Type-safe store with automatic JSON serialization.
pub struct Store<B: StorageBackend> {
    backend: B,
}

impl<B: StorageBackend> Store<B> {
    /// Create a store over the given backend.
    pub fn new(backend: B) -> Self {
        Self { backend }
    }

    /// Get a value and deserialize it.
    ///
    /// Returns `None` if the key doesn't exist.
    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, StorageError> {
        match self.backend.load(key)? {
            Some(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
            None => Ok(None),
        }
    }

    /// Serialize a value and store it.
    pub fn set<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> Result<(), StorageError> {
        let bytes = serde_json::to_vec(value)?;
        self.backend.save(key, &bytes)
    }

    /// Delete a value. No-op when the key is absent.
    pub fn delete(&self, key: &str) -> Result<(), StorageError> {
        self.backend.remove(key)
    }

    /// Check if a key exists.
    pub fn contains(&self, key: &str) -> Result<bool, StorageError> {
        self.backend.contains(key)
    }

    /// Borrow the underlying backend.
    pub fn backend(&self) -> &B {
        &self.backend
    }
}
