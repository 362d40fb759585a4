//! MinLabs Storage Layer
//!
//! Local key-value persistence for widget state. Every value is an opaque
//! string stored under a single key and always read and written whole.

mod database;
mod error;
mod memory;
mod migrations;

use std::sync::Arc;

pub use database::Database;
pub use error::StorageError;
pub use memory::MemoryStorage;

pub type Result<T> = std::result::Result<T, StorageError>;

/// Browser-style local storage: string keys mapped to string values.
pub trait KeyValueStore: Send + Sync {
    /// Read the value stored under `key`, if any.
    fn get_item(&self, key: &str) -> Result<Option<String>>;

    /// Overwrite the value stored under `key`.
    fn set_item(&self, key: &str, value: &str) -> Result<()>;

    /// Remove `key`. Removing an absent key is not an error.
    fn remove_item(&self, key: &str) -> Result<()>;
}

/// Shared handle to a storage backend.
pub type SharedStorage = Arc<dyn KeyValueStore>;
