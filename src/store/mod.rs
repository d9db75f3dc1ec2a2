mod file;
pub mod keys;
mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

use async_trait::async_trait;

use crate::error::StoreError;

/// String-keyed persistent storage. Values are plain strings for scalars
/// and JSON-encoded strings for lists and objects.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    async fn set(&self, key: &str, value: String) -> Result<(), StoreError>;

    async fn remove(&self, key: &str) -> Result<(), StoreError>;

    async fn get_all_keys(&self) -> Result<Vec<String>, StoreError>;

    async fn multi_get(&self, keys: &[String]) -> Result<Vec<(String, Option<String>)>, StoreError> {
        let mut entries = Vec::with_capacity(keys.len());
        for key in keys {
            entries.push((key.clone(), self.get(key).await?));
        }
        Ok(entries)
    }
}

/// Reads a JSON-encoded value. Absent or undecodable entries read as
/// `T::default()`; only store failures are errors.
pub async fn read_json<T>(store: &dyn KeyValueStore, key: &str) -> Result<T, StoreError>
where
    T: serde::de::DeserializeOwned + Default,
{
    let Some(raw) = store.get(key).await? else {
        return Ok(T::default());
    };
    match serde_json::from_str(&raw) {
        Ok(value) => Ok(value),
        Err(err) => {
            tracing::warn!("Ignoring malformed {} entry: {}", key, err);
            Ok(T::default())
        }
    }
}

/// Reads a value that is about to be rewritten. Absence reads as
/// `T::default()`, but an entry that exists and fails to decode is an error
/// so the caller never overwrites it.
pub async fn read_json_for_update<T>(store: &dyn KeyValueStore, key: &str) -> Result<T, StoreError>
where
    T: serde::de::DeserializeOwned + Default,
{
    let Some(raw) = store.get(key).await? else {
        return Ok(T::default());
    };
    serde_json::from_str(&raw).map_err(|err| StoreError::Corrupt {
        key: key.to_string(),
        reason: err.to_string(),
    })
}

pub async fn write_json<T>(store: &dyn KeyValueStore, key: &str, value: &T) -> Result<(), StoreError>
where
    T: serde::Serialize + ?Sized,
{
    let encoded = serde_json::to_string(value)
        .map_err(|err| StoreError::Unavailable(format!("Failed to encode {}: {}", key, err)))?;
    store.set(key, encoded).await
}
