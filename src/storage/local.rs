//! Local filesystem key-value store.
//!
//! The whole store is a single JSON object:
//!
//! ```text
//! {
//!   "sessionUser": { ... },
//!   "accounts": [ ... ]
//! }
//! ```
//!
//! Every change rewrites the file atomically (temp file, then rename). A
//! missing, blank or unparsable file reads as an empty store and is replaced
//! on the next write.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde_json::{Map, Value};
use tokio::io::AsyncWriteExt;
use tokio::sync::Mutex;

use crate::error::{AppError, Result};
use crate::storage::KeyValueStore;

/// JSON file backed store.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    // Serializes read-modify-write cycles within this process
    lock: Mutex<()>,
}

impl JsonFileStore {
    /// Create a store backed by the given file. The file is created on the
    /// first write.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Ensure parent directory exists.
    async fn ensure_dir(&self) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await?;
        }
        Ok(())
    }

    /// Write bytes atomically (write to temp, then rename).
    async fn write_bytes(&self, bytes: &[u8]) -> Result<()> {
        self.ensure_dir().await?;

        let tmp = self.path.with_extension("tmp");
        let mut file = tokio::fs::File::create(&tmp).await?;
        file.write_all(bytes).await?;
        file.flush().await?;
        drop(file);

        tokio::fs::rename(&tmp, &self.path).await?;
        Ok(())
    }

    /// Read the stored object, empty if the file doesn't exist.
    async fn read_map(&self) -> Result<Map<String, Value>> {
        let bytes = match tokio::fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Map::new()),
            Err(e) => return Err(AppError::Io(e)),
        };
        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(Map::new());
        }
        match serde_json::from_slice(&bytes) {
            Ok(Value::Object(map)) => Ok(map),
            Ok(other) => {
                log::warn!(
                    "{} holds {} instead of a JSON object; starting empty",
                    self.path.display(),
                    json_kind(&other)
                );
                Ok(Map::new())
            }
            Err(e) => {
                log::warn!("{} is unreadable ({}); starting empty", self.path.display(), e);
                Ok(Map::new())
            }
        }
    }

    async fn write_map(&self, map: &Map<String, Value>) -> Result<()> {
        let bytes = serde_json::to_vec_pretty(map)?;
        self.write_bytes(&bytes).await
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[async_trait]
impl KeyValueStore for JsonFileStore {
    async fn get(&self, key: &str) -> Result<Option<Value>> {
        let _guard = self.lock.lock().await;
        Ok(self.read_map().await?.remove(key))
    }

    async fn set(&self, key: &str, value: Value) -> Result<()> {
        let _guard = self.lock.lock().await;
        let mut map = self.read_map().await?;
        map.insert(key.to_string(), value);
        self.write_map(&map).await?;
        log::debug!("Stored '{}' in {}", key, self.path.display());
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<()> {
        let _guard = self.lock.lock().await;
        let mut map = self.read_map().await?;
        if map.remove(key).is_some() {
            self.write_map(&map).await?;
            log::debug!("Removed '{}' from {}", key, self.path.display());
        }
        Ok(())
    }

    async fn keys(&self) -> Result<Vec<String>> {
        let _guard = self.lock.lock().await;
        let mut keys: Vec<String> = self.read_map().await?.into_iter().map(|(k, _)| k).collect();
        keys.sort();
        Ok(keys)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::KeyValueStoreExt;
    use serde_json::json;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_set_and_get() {
        let tmp = TempDir::new().unwrap();
        let store = JsonFileStore::new(tmp.path().join("session.json"));

        store.set("theme", json!("dark")).await.unwrap();
        assert_eq!(store.get("theme").await.unwrap(), Some(json!("dark")));
        assert!(store.get("missing").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_read_nonexistent_is_empty() {
        let tmp = TempDir::new().unwrap();
        let store = JsonFileStore::new(tmp.path().join("nope.json"));

        assert!(store.keys().await.unwrap().is_empty());
        store.remove("anything").await.unwrap();
        assert!(!store.path().exists());
    }

    #[tokio::test]
    async fn test_persists_across_instances() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("nested").join("store.json");

        JsonFileStore::new(&path)
            .set_json("count", &3)
            .await
            .unwrap();

        let reopened = JsonFileStore::new(&path);
        let count: Option<u32> = reopened.get_json("count").await.unwrap();
        assert_eq!(count, Some(3));
        assert!(!path.with_extension("tmp").exists());
    }

    #[tokio::test]
    async fn test_remove_and_keys() {
        let tmp = TempDir::new().unwrap();
        let store = JsonFileStore::new(tmp.path().join("store.json"));

        store.set("b", json!(2)).await.unwrap();
        store.set("a", json!(1)).await.unwrap();
        assert_eq!(store.keys().await.unwrap(), vec!["a", "b"]);

        store.remove("a").await.unwrap();
        assert_eq!(store.keys().await.unwrap(), vec!["b"]);
    }

    #[tokio::test]
    async fn test_non_object_file_reads_as_empty() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("store.json");
        tokio::fs::write(&path, "[1, 2]").await.unwrap();

        let store = JsonFileStore::new(&path);
        assert!(store.get("x").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_truncated_file_is_replaced_on_write() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("store.json");
        tokio::fs::write(&path, "{truncated").await.unwrap();

        let store = JsonFileStore::new(&path);
        assert!(store.keys().await.unwrap().is_empty());
        store.remove("sessionUser").await.unwrap();

        store.set("theme", json!("dark")).await.unwrap();
        let reopened = JsonFileStore::new(&path);
        assert_eq!(reopened.keys().await.unwrap(), vec!["theme"]);
    }
}
