//! The storage port: a minimal async key-value surface behind which every collection is
//! persisted. Production uses [`FileStorage`] (one JSON file per key); tests and
//! embedders can substitute [`MemoryStorage`].

use crate::Result;
use anyhow::Context;
use async_trait::async_trait;
use std::collections::BTreeMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::sync::Mutex;

/// A durable string-keyed store of string values.
///
/// Implementations provide no locking and no transactions: `set` replaces the whole
/// value, and the last read-modify-write against a key wins. Callers are expected to
/// await one mutation before issuing the next.
#[async_trait]
pub trait Storage: Send + Sync {
    /// Returns the stored value for `key`, or `None` when the key has never been
    /// written.
    async fn get(&self, key: &str) -> Result<Option<String>>;

    /// Replaces the stored value for `key` in full.
    async fn set(&self, key: &str, value: &str) -> Result<()>;

    /// Deletes `key`. Removing an absent key is not an error.
    async fn remove(&self, key: &str) -> Result<()>;
}

/// Stores each key as `<key>.json` inside a data directory.
#[derive(Debug, Clone)]
pub struct FileStorage {
    root: PathBuf,
}

impl FileStorage {
    /// Creates a `FileStorage` rooted at `root`. The directory must already exist; see
    /// [`Home`](crate::Home) which creates it.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.root.join(format!("{key}.json"))
    }
}

#[async_trait]
impl Storage for FileStorage {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        let path = self.path_for(key);
        match tokio::fs::read_to_string(&path).await {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => {
                Err(e).with_context(|| format!("Unable to read file {}", path.display()))
            }
        }
    }

    async fn set(&self, key: &str, value: &str) -> Result<()> {
        let path = self.path_for(key);
        tokio::fs::write(&path, value)
            .await
            .with_context(|| format!("Unable to write to {}", path.display()))
    }

    async fn remove(&self, key: &str) -> Result<()> {
        let path = self.path_for(key);
        match tokio::fs::remove_file(&path).await {
            Ok(_) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e).with_context(|| format!("Unable to remove {}", path.display())),
        }
    }
}

/// An in-memory `Storage` for tests and ephemeral use.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    values: Mutex<BTreeMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Storage for MemoryStorage {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.values.lock().await.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> Result<()> {
        self.values
            .lock()
            .await
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<()> {
        self.values.lock().await.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_file_storage_round_trip() {
        let dir = TempDir::new().unwrap();
        let storage = FileStorage::new(dir.path());

        assert_eq!(storage.get("transactions_v1").await.unwrap(), None);

        storage.set("transactions_v1", "[]").await.unwrap();
        assert_eq!(
            storage.get("transactions_v1").await.unwrap().as_deref(),
            Some("[]")
        );

        storage.set("transactions_v1", "[1,2]").await.unwrap();
        assert_eq!(
            storage.get("transactions_v1").await.unwrap().as_deref(),
            Some("[1,2]")
        );
    }

    #[tokio::test]
    async fn test_file_storage_remove_is_idempotent() {
        let dir = TempDir::new().unwrap();
        let storage = FileStorage::new(dir.path());

        storage.set("plots_v1", "[]").await.unwrap();
        storage.remove("plots_v1").await.unwrap();
        assert_eq!(storage.get("plots_v1").await.unwrap(), None);

        // A second remove of the same key is a no-op, not an error.
        storage.remove("plots_v1").await.unwrap();
    }

    #[tokio::test]
    async fn test_file_storage_read_error_propagates() {
        let dir = TempDir::new().unwrap();
        let storage = FileStorage::new(dir.path().join("does-not-exist"));
        // A missing parent directory fails writes; the error carries the path.
        let err = storage.set("inventory_v1", "[]").await.unwrap_err();
        assert!(err.to_string().contains("inventory_v1.json"));
    }

    #[tokio::test]
    async fn test_memory_storage() {
        let storage = MemoryStorage::new();
        assert_eq!(storage.get("season_start_v1").await.unwrap(), None);
        storage.set("season_start_v1", "\"2024-03-01\"").await.unwrap();
        assert_eq!(
            storage.get("season_start_v1").await.unwrap().as_deref(),
            Some("\"2024-03-01\"")
        );
        storage.remove("season_start_v1").await.unwrap();
        assert_eq!(storage.get("season_start_v1").await.unwrap(), None);
    }
}
