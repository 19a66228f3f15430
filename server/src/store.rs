//! Key-value storage for game records
//!
//! The server treats its store as an external collaborator that maps string
//! keys to structured JSON values. Two backends are provided:
//! - [`MemoryStore`] keeps records in process memory and is used by default
//!   and in tests
//! - [`FileStore`] writes one `<key>.json` file per game into a data
//!   directory so games survive a restart
//!
//! Neither backend coordinates a read-modify-write sequence across requests.
//! Concurrent writes to the same key are last-write-wins.

use async_trait::async_trait;
use log::debug;
use serde_json::Value;
use std::collections::HashMap;
use std::io::ErrorKind;
use std::path::PathBuf;
use tokio::sync::RwLock;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("invalid store key: {0:?}")]
    InvalidKey(String),
    #[error("i/o error for key {key}: {source}")]
    Io {
        key: String,
        #[source]
        source: std::io::Error,
    },
    #[error("record for key {key} is not valid JSON: {source}")]
    Decode {
        key: String,
        #[source]
        source: serde_json::Error,
    },
}

pub type StoreResult<T> = Result<T, StoreError>;

/// Get/set of JSON values by string key
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Returns `Ok(None)` when nothing is stored under `key`.
    async fn get_json(&self, key: &str) -> StoreResult<Option<Value>>;

    async fn set_json(&self, key: &str, value: &Value) -> StoreResult<()>;
}

/// Process-local store backed by a map
#[derive(Debug, Default)]
pub struct MemoryStore {
    records: RwLock<HashMap<String, Value>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    #[cfg(test)]
    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    #[cfg(test)]
    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }
}

#[async_trait]
impl KeyValueStore for MemoryStore {
    async fn get_json(&self, key: &str) -> StoreResult<Option<Value>> {
        Ok(self.records.read().await.get(key).cloned())
    }

    async fn set_json(&self, key: &str, value: &Value) -> StoreResult<()> {
        self.records
            .write()
            .await
            .insert(key.to_string(), value.clone());
        Ok(())
    }
}

/// Directory-backed store holding one pretty-printed JSON file per key
///
/// Keys are restricted to ASCII letters, digits, `-` and `_` so that an
/// identifier supplied by a caller can never name a file outside the
/// data directory.
#[derive(Debug, Clone)]
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    /// Opens a store rooted at `root`, creating the directory if needed.
    pub async fn open(root: impl Into<PathBuf>) -> StoreResult<Self> {
        let root = root.into();
        tokio::fs::create_dir_all(&root)
            .await
            .map_err(|source| StoreError::Io {
                key: root.display().to_string(),
                source,
            })?;
        debug!("File store opened at {}", root.display());
        Ok(Self { root })
    }

    #[cfg(test)]
    pub fn root(&self) -> &std::path::Path {
        &self.root
    }

    fn path_for(&self, key: &str) -> StoreResult<PathBuf> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
        if !valid {
            return Err(StoreError::InvalidKey(key.to_string()));
        }
        Ok(self.root.join(format!("{}.json", key)))
    }
}

#[async_trait]
impl KeyValueStore for FileStore {
    async fn get_json(&self, key: &str) -> StoreResult<Option<Value>> {
        let path = self.path_for(key)?;
        let bytes = match tokio::fs::read(&path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(source) => {
                return Err(StoreError::Io {
                    key: key.to_string(),
                    source,
                })
            }
        };

        serde_json::from_slice(&bytes)
            .map(Some)
            .map_err(|source| StoreError::Decode {
                key: key.to_string(),
                source,
            })
    }

    async fn set_json(&self, key: &str, value: &Value) -> StoreResult<()> {
        let path = self.path_for(key)?;
        let bytes = serde_json::to_vec_pretty(value).map_err(|source| StoreError::Decode {
            key: key.to_string(),
            source,
        })?;

        tokio::fs::write(&path, bytes)
            .await
            .map_err(|source| StoreError::Io {
                key: key.to_string(),
                source,
            })
    }
}
