//! In-memory storage backend.

use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

use crate::error::StorageError;
use crate::kv::StorageBackend;

/// Volatile backend for tests and ephemeral sessions.
///
/// Clones share the same underlying map, so several stores can point at one
/// logical device the way multiple tabs share browser storage.
#[derive(Clone, Default)]
pub struct MemoryBackend {
    entries: Arc<RwLock<HashMap<String, Vec<u8>>>>,
}

impl MemoryBackend {
    /// Create an empty backend.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored keys.
    pub fn len(&self) -> usize {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Whether the backend holds no keys.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl StorageBackend for MemoryBackend {
    fn load(&self, key: &str) -> Result<Option<Vec<u8>>, StorageError> {
        Ok(self
            .entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(key)
            .cloned())
    }

    fn save(&self, key: &str, bytes: &[u8]) -> Result<(), StorageError> {
        self.entries
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key.to_string(), bytes.to_vec());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.entries
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(key);
        Ok(())
    }

    fn contains(&self, key: &str) -> Result<bool, StorageError> {
        Ok(self
            .entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .contains_key(key))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_save_and_load() {
        let backend = MemoryBackend::new();
        backend.save("a", b"one").unwrap();
        assert_eq!(backend.load("a").unwrap(), Some(b"one".to_vec()));
    }

    #[test]
    fn test_clones_share_entries() {
        let backend = MemoryBackend::new();
        let view = backend.clone();

        backend.save("shared", b"yes").unwrap();
        assert_eq!(view.load("shared").unwrap(), Some(b"yes".to_vec()));

        view.remove("shared").unwrap();
        assert_eq!(backend.load("shared").unwrap(), None);
    }

    #[test]
    fn test_len() {
        let backend = MemoryBackend::new();
        assert!(backend.is_empty());
        backend.save("a", b"1").unwrap();
        backend.save("b", b"2").unwrap();
        assert_eq!(backend.len(), 2);
    }
}
