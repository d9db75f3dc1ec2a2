use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::KeyValueStore;
use crate::error::StoreError;

/// Whole-map JSON file. The file is read once on open and rewritten after
/// every mutation while the write lock is held.
pub struct FileStore {
    path: PathBuf,
    entries: RwLock<BTreeMap<String, String>>,
}

impl FileStore {
    pub async fn open(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let path = path.as_ref().to_path_buf();
        let entries = match tokio::fs::read(&path).await {
            Ok(bytes) if bytes.is_empty() => BTreeMap::new(),
            Ok(bytes) => serde_json::from_slice(&bytes).map_err(|err| {
                StoreError::Unavailable(format!("{} is not a valid store file: {}", path.display(), err))
            })?,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => BTreeMap::new(),
            Err(err) => {
                return Err(StoreError::Unavailable(format!(
                    "Failed to read {}: {}",
                    path.display(),
                    err
                )))
            }
        };

        tracing::info!("Opened store at {} ({} keys)", path.display(), entries.len());

        Ok(Self {
            path,
            entries: RwLock::new(entries),
        })
    }

    async fn flush(&self, entries: &BTreeMap<String, String>) -> Result<(), StoreError> {
        let bytes = serde_json::to_vec_pretty(entries)
            .map_err(|err| StoreError::Unavailable(format!("Failed to encode store: {}", err)))?;

        let tmp = self.path.with_extension("tmp");
        tokio::fs::write(&tmp, bytes)
            .await
            .map_err(|err| StoreError::Unavailable(format!("Failed to write {}: {}", tmp.display(), err)))?;
        tokio::fs::rename(&tmp, &self.path)
            .await
            .map_err(|err| StoreError::Unavailable(format!("Failed to replace {}: {}", self.path.display(), err)))
    }
}

#[async_trait]
impl KeyValueStore for FileStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.entries.read().await.get(key).cloned())
    }

    async fn set(&self, key: &str, value: String) -> Result<(), StoreError> {
        let mut entries = self.entries.write().await;
        let previous = entries.insert(key.to_string(), value);
        if let Err(err) = self.flush(&entries).await {
            match previous {
                Some(previous) => entries.insert(key.to_string(), previous),
                None => entries.remove(key),
            };
            return Err(err);
        }
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<(), StoreError> {
        let mut entries = self.entries.write().await;
        if let Some(previous) = entries.remove(key) {
            if let Err(err) = self.flush(&entries).await {
                entries.insert(key.to_string(), previous);
                return Err(err);
            }
        }
        Ok(())
    }

    async fn get_all_keys(&self) -> Result<Vec<String>, StoreError> {
        Ok(self.entries.read().await.keys().cloned().collect())
    }
}
