//! Link previews with a timestamped client-side cache.
//!
//! Entries live under `link_preview_<url>` as `{data, timestamp}` where the
//! timestamp is in epoch milliseconds. Expiry is checked on read; an expired
//! or unreadable entry is removed and reported as a miss.

use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::domain::{LinkPreview, validate_source_url};
use crate::error::ImportError;
use crate::ports::{Cache, CacheError, Clock, LinkPreviewApi};

pub const LINK_PREVIEW_KEY_PREFIX: &str = "link_preview_";

/// Default lifetime of a cached preview.
pub const DEFAULT_PREVIEW_TTL: Duration = Duration::from_secs(24 * 60 * 60);

#[derive(Debug, Serialize, Deserialize)]
struct CachedPreview {
    data: LinkPreview,
    timestamp: i64,
}

/// Timestamped preview cache over any [`Cache`] backend.
pub struct LinkPreviewCache {
    cache: Arc<dyn Cache>,
    clock: Arc<dyn Clock>,
    ttl: Duration,
}

impl LinkPreviewCache {
    pub fn new(cache: Arc<dyn Cache>, clock: Arc<dyn Clock>, ttl: Duration) -> Self {
        Self { cache, clock, ttl }
    }

    fn key(url: &str) -> String {
        format!("{}{}", LINK_PREVIEW_KEY_PREFIX, url)
    }

    pub async fn get(&self, url: &str) -> Option<LinkPreview> {
        let key = Self::key(url);
        let raw = self.cache.get(&key).await?;

        let entry: CachedPreview = match serde_json::from_str(&raw) {
            Ok(entry) => entry,
            Err(e) => {
                tracing::debug!(url, error = %e, "Dropping unreadable preview entry");
                self.evict(&key).await;
                return None;
            }
        };

        let age_ms = self.clock.now().timestamp_millis() - entry.timestamp;
        if age_ms > self.ttl.as_millis() as i64 {
            tracing::debug!(url, age_ms, "Preview entry expired");
            self.evict(&key).await;
            return None;
        }
        Some(entry.data)
    }

    pub async fn set(&self, url: &str, data: &LinkPreview) -> Result<(), CacheError> {
        let entry = CachedPreview {
            data: data.clone(),
            timestamp: self.clock.now().timestamp_millis(),
        };
        let value =
            serde_json::to_string(&entry).map_err(|e| CacheError::Serialization(e.to_string()))?;
        self.cache.set(&Self::key(url), &value, None).await
    }

    async fn evict(&self, key: &str) {
        if let Err(e) = self.cache.delete(key).await {
            tracing::warn!(key, error = %e, "Failed to evict preview entry");
        }
    }
}

/// Resolves link previews, consulting the cache before the backend.
pub struct LinkPreviewService {
    api: Arc<dyn LinkPreviewApi>,
    cache: LinkPreviewCache,
}

impl LinkPreviewService {
    pub fn new(api: Arc<dyn LinkPreviewApi>, cache: LinkPreviewCache) -> Self {
        Self { api, cache }
    }

    /// Preview for `url`. Invalid URLs are rejected before any request.
    pub async fn preview(&self, url: &str) -> Result<LinkPreview, ImportError> {
        validate_source_url(url)?;
        let url = url.trim();

        if let Some(cached) = self.cache.get(url).await {
            return Ok(cached);
        }

        let preview = self.api.link_preview(url).await?;
        if let Err(e) = self.cache.set(url, &preview).await {
            tracing::warn!(url, error = %e, "Failed to cache link preview");
        }
        Ok(preview)
    }
}
