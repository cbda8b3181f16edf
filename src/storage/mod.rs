//! Key-value persistence for session state.
//!
//! Values are JSON documents keyed by string, mirroring browser local
//! storage. Two backends ship:
//!
//! ```text
//! JsonFileStore   one JSON object on disk, rewritten atomically per change
//! MemoryStore     HashMap behind a mutex, for tests and embedding
//! ```

pub mod local;
pub mod memory;

use async_trait::async_trait;
use serde::{Serialize, de::DeserializeOwned};

use crate::error::Result;

// Re-export for convenience
pub use local::JsonFileStore;
pub use memory::MemoryStore;

/// Trait for key-value storage backends.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Raw value for a key, or `None` if unset.
    async fn get(&self, key: &str) -> Result<Option<serde_json::Value>>;

    /// Insert or replace a value.
    async fn set(&self, key: &str, value: serde_json::Value) -> Result<()>;

    /// Remove a key. Removing a missing key is not an error.
    async fn remove(&self, key: &str) -> Result<()>;

    /// All keys currently set, ascending.
    async fn keys(&self) -> Result<Vec<String>>;
}

/// Typed helpers over any [`KeyValueStore`].
#[async_trait]
pub trait KeyValueStoreExt: KeyValueStore {
    /// Read and deserialize a value.
    async fn get_json<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>> {
        match self.get(key).await? {
            Some(value) => Ok(Some(serde_json::from_value(value)?)),
            None => Ok(None),
        }
    }

    /// Serialize and store a value.
    async fn set_json<T: Serialize + Sync + ?Sized>(&self, key: &str, value: &T) -> Result<()> {
        let value = serde_json::to_value(value)?;
        self.set(key, value).await
    }
}

impl<S: KeyValueStore + ?Sized> KeyValueStoreExt for S {}
