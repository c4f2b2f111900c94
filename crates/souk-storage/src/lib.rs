//! Device-local persistence for Souk storefronts.
//!
//! This crate provides the byte-oriented [`StorageBackend`] trait with
//! in-memory and file-based implementations, plus [`Store`], a typed layer
//! on top with automatic JSON serialization. The cart and other client-side
//! state persist through it under well-known keys.
//!
//! # Example
//!
//! ```rust
//! use souk_storage::{MemoryBackend, StorageError, Store};
//!
//! fn main() -> Result<(), StorageError> {
//!     let store = Store::new(MemoryBackend::new());
//!
//!     store.set("greeting", "marhaba")?;
//!     let value: Option<String> = store.get("greeting")?;
//!     assert_eq!(value.as_deref(), Some("marhaba"));
//!
//!     store.delete("greeting")?;
//!     assert!(!store.contains("greeting")?);
//!     Ok(())
//! }
//! ```

mod error;
mod file;
mod kv;
mod memory;

pub use error::StorageError;
pub use file::FileBackend;
pub use kv::{StorageBackend, Store};
pub use memory::MemoryBackend;

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::{FileBackend, MemoryBackend, StorageBackend, StorageError, Store};
}
