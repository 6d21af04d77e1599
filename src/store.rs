//! Key-value store for client-side preferences
//!
//! Values are JSON documents addressed by key. [`FjallStore`] keeps them on
//! disk between runs; [`MemoryStore`] lives for one process.

use std::collections::HashMap;
use std::path::Path;
use std::sync::Mutex;

use fjall::Keyspace;
use serde_json::Value;
use tokio::task;

use crate::{NightSkyError, Result};

/// Get/set JSON values by key. Each call is atomic on its own.
pub trait PreferenceStore {
    async fn get(&self, key: &str) -> Result<Option<Value>>;
    async fn set(&self, key: &str, value: Value) -> Result<()>;
}

pub struct FjallStore {
    _db: fjall::Database,
    store: Keyspace,
}

fn get_from_store(store: Keyspace, key: Vec<u8>) -> Result<Option<Vec<u8>>> {
    Ok(store
        .get(key)
        .map_err(|e| NightSkyError::store(format!("read failed: {e}")))?
        .map(|v| v.to_vec()))
}

impl FjallStore {
    /// Open (or create) the store under `path`.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let db = fjall::Database::builder(&path)
            .open()
            .map_err(|e| NightSkyError::store(format!("failed to open store: {e}")))?;
        let items = db
            .keyspace("preferences", fjall::KeyspaceCreateOptions::default)
            .map_err(|e| NightSkyError::store(format!("failed to open keyspace: {e}")))?;
        Ok(FjallStore {
            _db: db,
            store: items,
        })
    }
}

impl PreferenceStore for FjallStore {
    #[tracing::instrument(name = "query_store", level = "debug", skip(self))]
    async fn get(&self, key: &str) -> Result<Option<Value>> {
        let store = self.store.clone();
        let key_bytes = key.as_bytes().to_vec();

        let maybe_bytes = task::spawn_blocking(move || get_from_store(store, key_bytes))
            .await
            .map_err(|e| NightSkyError::store(format!("store task failed: {e}")))??;

        match maybe_bytes {
            Some(bytes) => {
                tracing::debug!("Key found");
                let value = serde_json::from_slice(&bytes).map_err(|e| {
                    NightSkyError::store(format!("value under '{key}' is not JSON: {e}"))
                })?;
                Ok(Some(value))
            }
            None => {
                tracing::debug!("Key not found");
                Ok(None)
            }
        }
    }

    #[tracing::instrument(name = "put_store", level = "debug", skip(self))]
    async fn set(&self, key: &str, value: Value) -> Result<()> {
        let store = self.store.clone();
        let key = key.as_bytes().to_vec();
        let bytes = serde_json::to_vec(&value)
            .map_err(|e| NightSkyError::store(format!("failed to encode value: {e}")))?;

        task::spawn_blocking(move || store.insert(key, bytes))
            .await
            .map_err(|e| NightSkyError::store(format!("store task failed: {e}")))?
            .map_err(|e| NightSkyError::store(format!("write failed: {e}")))?;
        Ok(())
    }
}

/// In-process store, for tests and one-shot runs.
#[derive(Debug, Default)]
pub struct MemoryStore {
    values: Mutex<HashMap<String, Value>>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, HashMap<String, Value>>> {
        self.values
            .lock()
            .map_err(|_| NightSkyError::store("memory store lock poisoned"))
    }
}

impl PreferenceStore for MemoryStore {
    async fn get(&self, key: &str) -> Result<Option<Value>> {
        Ok(self.lock()?.get(key).cloned())
    }

    async fn set(&self, key: &str, value: Value) -> Result<()> {
        self.lock()?.insert(key.to_string(), value);
        Ok(())
    }
}
