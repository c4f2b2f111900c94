//! File-backed storage.

use std::fs;
use std::io;
use std::path::PathBuf;

use crate::error::StorageError;
use crate::kv::StorageBackend;

/// One file per key under a root directory.
///
/// Writes land in a temporary sibling first and are renamed into place, so a
/// crash mid-write never leaves a truncated value behind.
#[derive(Clone)]
pub struct FileBackend {
    root: PathBuf,
}

impl FileBackend {
    /// Open a backend rooted at `root`, creating the directory if needed.
    pub fn open(root: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let root = root.into();
        fs::create_dir_all(&root).map_err(|e| StorageError::Backend(e.to_string()))?;
        Ok(Self { root })
    }

    /// Directory this backend stores files under.
    pub fn root(&self) -> &PathBuf {
        &self.root
    }

    // Keys map to file names; anything outside [A-Za-z0-9_-] is replaced so
    // a key can never escape the root directory.
    fn path_for(&self, key: &str) -> PathBuf {
        let name: String = key
            .chars()
            .map(|c| {
                if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                    c
                } else {
                    '_'
                }
            })
            .collect();
        self.root.join(format!("{}.json", name))
    }
}

impl StorageBackend for FileBackend {
    fn load(&self, key: &str) -> Result<Option<Vec<u8>>, StorageError> {
        match fs::read(self.path_for(key)) {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(StorageError::Backend(e.to_string())),
        }
    }

    fn save(&self, key: &str, bytes: &[u8]) -> Result<(), StorageError> {
        let path = self.path_for(key);
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, bytes).map_err(|e| StorageError::Backend(e.to_string()))?;
        fs::rename(&tmp, &path).map_err(|e| StorageError::Backend(e.to_string()))
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        match fs::remove_file(self.path_for(key)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(StorageError::Backend(e.to_string())),
        }
    }
}
