//! Client-side key-value persistence: plain JSON blobs, overwritten
//! wholesale on each update, no versioning.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;

use parking_lot::RwLock;
use serde::de::DeserializeOwned;
use serde::Serialize;

pub const KEY_USER_INFO: &str = "userInfo";
pub const KEY_COLLECTIONS: &str = "collections";
pub const KEY_COLLECTIONS_LOAD_TIME: &str = "collectionsLoadTime";
pub const KEY_TODAY_SENTENCE: &str = "todaySentence";

struct Inner {
    entries: HashMap<String, serde_json::Value>,
    path: Option<PathBuf>,
}

#[derive(Clone)]
pub struct LocalStore {
    inner: Arc<RwLock<Inner>>,
}

impl LocalStore {
    pub fn in_memory() -> Self {
        Self {
            inner: Arc::new(RwLock::new(Inner {
                entries: HashMap::new(),
                path: None,
            })),
        }
    }

    /// File-backed store under the platform data directory.
    pub fn open_default() -> Self {
        let path = dirs::data_local_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("com.daily-sentence.app")
            .join("cache.json");
        Self::open(path)
    }

    pub fn open(path: PathBuf) -> Self {
        let entries = std::fs::read(&path)
            .ok()
            .and_then(|bytes| serde_json::from_slice(&bytes).ok())
            .unwrap_or_default();

        Self {
            inner: Arc::new(RwLock::new(Inner {
                entries,
                path: Some(path),
            })),
        }
    }

    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let inner = self.inner.read();
        inner
            .entries
            .get(key)
            .and_then(|value| serde_json::from_value(value.clone()).ok())
    }

    pub fn set<T: Serialize>(&self, key: &str, value: &T) {
        let serialized = match serde_json::to_value(value) {
            Ok(serialized) => serialized,
            Err(err) => {
                tracing::warn!(error = %err, key, "cache value not serializable");
                return;
            }
        };

        let mut inner = self.inner.write();
        inner.entries.insert(key.to_string(), serialized);
        persist(&inner);
    }

    pub fn remove(&self, key: &str) {
        let mut inner = self.inner.write();
        inner.entries.remove(key);
        persist(&inner);
    }

    pub fn clear(&self) {
        let mut inner = self.inner.write();
        inner.entries.clear();
        persist(&inner);
    }
}

fn persist(inner: &Inner) {
    let Some(path) = &inner.path else {
        return;
    };

    if let Some(parent) = path.parent() {
        if let Err(err) = std::fs::create_dir_all(parent) {
            tracing::warn!(error = %err, "cache directory create failed");
            return;
        }
    }

    match serde_json::to_vec(&inner.entries) {
        Ok(bytes) => {
            if let Err(err) = std::fs::write(path, bytes) {
                tracing::warn!(error = %err, "cache write failed");
            }
        }
        Err(err) => tracing::warn!(error = %err, "cache serialize failed"),
    }
}
