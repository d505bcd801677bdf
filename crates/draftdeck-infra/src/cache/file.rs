//! JSON file-backed cache that survives restarts.
//!
//! The whole map lives in one file, loaded on first access. Every write
//! replaces the file via a temporary sibling and a rename, so a crash never
//! leaves a half-written cache behind.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;

use draftdeck_core::ports::{Cache, CacheError};

#[derive(Debug, Clone, Serialize, Deserialize)]
struct StoredEntry {
    value: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    expires_at_ms: Option<i64>,
}

impl StoredEntry {
    fn is_expired(&self, now_ms: i64) -> bool {
        self.expires_at_ms.is_some_and(|exp| now_ms > exp)
    }
}

type Entries = HashMap<String, StoredEntry>;

pub struct FileCache {
    path: PathBuf,
    entries: Mutex<Option<Entries>>,
}

impl FileCache {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            entries: Mutex::new(None),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn load(&self) -> Entries {
        let raw = match tokio::fs::read_to_string(&self.path).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Entries::new(),
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "Cannot read cache file");
                return Entries::new();
            }
        };

        serde_json::from_str(&raw).unwrap_or_else(|e| {
            tracing::warn!(
                path = %self.path.display(),
                error = %e,
                "Discarding corrupt cache file"
            );
            Entries::new()
        })
    }

    async fn persist(&self, entries: &Entries) -> Result<(), CacheError> {
        let json =
            serde_json::to_vec(entries).map_err(|e| CacheError::Serialization(e.to_string()))?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| CacheError::Connection(e.to_string()))?;
        }

        let tmp = self.path.with_extension("tmp");
        tokio::fs::write(&tmp, json)
            .await
            .map_err(|e| CacheError::Operation(e.to_string()))?;
        tokio::fs::rename(&tmp, &self.path)
            .await
            .map_err(|e| CacheError::Operation(e.to_string()))
    }

    /// Run `f` against the loaded map. Returns whether `f` changed it.
    async fn with_entries<R>(
        &self,
        f: impl FnOnce(&mut Entries) -> (R, bool),
    ) -> Result<R, CacheError> {
        let mut guard = self.entries.lock().await;
        if guard.is_none() {
            *guard = Some(self.load().await);
        }
        let entries = guard.get_or_insert_with(Entries::new);

        let (result, dirty) = f(entries);
        if dirty {
            self.persist(entries).await?;
        }
        Ok(result)
    }
}

#[async_trait]
impl Cache for FileCache {
    async fn get(&self, key: &str) -> Option<String> {
        let now_ms = Utc::now().timestamp_millis();
        let result = self
            .with_entries(|entries| match entries.get(key) {
                Some(entry) if entry.is_expired(now_ms) => {
                    entries.remove(key);
                    (None, true)
                }
                Some(entry) => (Some(entry.value.clone()), false),
                None => (None, false),
            })
            .await;

        match result {
            Ok(value) => value,
            Err(e) => {
                tracing::warn!(key, error = %e, "Failed to drop expired cache entry");
                None
            }
        }
    }

    async fn set(&self, key: &str, value: &str, ttl: Option<Duration>) -> Result<(), CacheError> {
        let expires_at_ms = ttl.map(|d| {
            let ms = i64::try_from(d.as_millis()).unwrap_or(i64::MAX);
            Utc::now().timestamp_millis().saturating_add(ms)
        });
        let entry = StoredEntry {
            value: value.to_string(),
            expires_at_ms,
        };

        self.with_entries(|entries| {
            entries.insert(key.to_string(), entry);
            ((), true)
        })
        .await
    }

    async fn delete(&self, key: &str) -> Result<(), CacheError> {
        self.with_entries(|entries| ((), entries.remove(key).is_some()))
            .await
    }

    async fn exists(&self, key: &str) -> bool {
        self.get(key).await.is_some()
    }
}
