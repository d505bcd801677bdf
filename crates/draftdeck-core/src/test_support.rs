//! Scripted fakes for the core's ports.

use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};
use tokio::sync::{Notify, RwLock};

use crate::domain::{LinkPreview, Post, PostQuery, PostType, SourcePage, SourceQuery, SourceRef};
use crate::error::ApiError;
use crate::ports::{
    BlogApi, Cache, CacheError, Clock, LinkPreviewApi, PostPatch, PostUpdate, SourceApi,
};

pub fn post(id: &str, content: &str) -> Post {
    Post {
        id: id.to_string(),
        title: format!("Post {id}"),
        content: content.to_string(),
        created_at: "2026-01-01T00:00:00Z".to_string(),
        updated_at: "2026-01-01T00:00:00Z".to_string(),
        ..Default::default()
    }
}

enum ScriptedFetch {
    Ready(Result<Vec<Post>, ApiError>),
    Gated(Arc<Notify>, Vec<Post>),
}

/// Content service fake. Unscripted calls succeed with empty results.
#[derive(Default)]
pub struct FakeBlogApi {
    fetches: Mutex<VecDeque<ScriptedFetch>>,
    fetch_queries: Mutex<Vec<PostQuery>>,
    update_results: Mutex<VecDeque<Result<PostPatch, ApiError>>>,
    updates: Mutex<Vec<(String, PostUpdate)>>,
    source_pages: Mutex<VecDeque<Result<SourcePage, ApiError>>>,
    source_queries: Mutex<Vec<SourceQuery>>,
    generations: Mutex<Vec<(Vec<PostType>, SourceRef)>>,
    previews: Mutex<HashMap<String, LinkPreview>>,
    preview_calls: Mutex<Vec<String>>,
}

impl FakeBlogApi {
    pub fn push_fetch(&self, result: Result<Vec<Post>, ApiError>) {
        self.fetches
            .lock()
            .unwrap()
            .push_back(ScriptedFetch::Ready(result));
    }

    /// Script a fetch that resolves only after the returned gate is notified.
    pub fn push_gated_fetch(&self, posts: Vec<Post>) -> Arc<Notify> {
        let gate = Arc::new(Notify::new());
        self.fetches
            .lock()
            .unwrap()
            .push_back(ScriptedFetch::Gated(gate.clone(), posts));
        gate
    }

    pub fn push_update(&self, result: Result<PostPatch, ApiError>) {
        self.update_results.lock().unwrap().push_back(result);
    }

    pub fn push_sources(&self, result: Result<SourcePage, ApiError>) {
        self.source_pages.lock().unwrap().push_back(result);
    }

    pub fn set_preview(&self, url: &str, preview: LinkPreview) {
        self.previews
            .lock()
            .unwrap()
            .insert(url.to_string(), preview);
    }

    pub fn fetch_queries(&self) -> Vec<PostQuery> {
        self.fetch_queries.lock().unwrap().clone()
    }

    pub fn updates(&self) -> Vec<(String, PostUpdate)> {
        self.updates.lock().unwrap().clone()
    }

    pub fn source_queries(&self) -> Vec<SourceQuery> {
        self.source_queries.lock().unwrap().clone()
    }

    pub fn generations(&self) -> Vec<(Vec<PostType>, SourceRef)> {
        self.generations.lock().unwrap().clone()
    }

    pub fn preview_calls(&self) -> Vec<String> {
        self.preview_calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl BlogApi for FakeBlogApi {
    async fn fetch_posts(&self, query: &PostQuery) -> Result<Vec<Post>, ApiError> {
        let scripted = {
            self.fetch_queries.lock().unwrap().push(query.clone());
            self.fetches.lock().unwrap().pop_front()
        };
        match scripted {
            None => Ok(Vec::new()),
            Some(ScriptedFetch::Ready(result)) => result,
            Some(ScriptedFetch::Gated(gate, posts)) => {
                gate.notified().await;
                Ok(posts)
            }
        }
    }

    async fn update_post(&self, id: &str, update: &PostUpdate) -> Result<PostPatch, ApiError> {
        self.updates
            .lock()
            .unwrap()
            .push((id.to_string(), update.clone()));
        self.update_results
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(PostPatch::default()))
    }
}

#[async_trait]
impl SourceApi for FakeBlogApi {
    async fn list_sources(&self, query: &SourceQuery) -> Result<SourcePage, ApiError> {
        self.source_queries.lock().unwrap().push(query.clone());
        self.source_pages
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(SourcePage::default()))
    }

    async fn generate_content(
        &self,
        post_types: &[PostType],
        source: &SourceRef,
    ) -> Result<(), ApiError> {
        self.generations
            .lock()
            .unwrap()
            .push((post_types.to_vec(), source.clone()));
        Ok(())
    }
}

#[async_trait]
impl LinkPreviewApi for FakeBlogApi {
    async fn link_preview(&self, url: &str) -> Result<LinkPreview, ApiError> {
        self.preview_calls.lock().unwrap().push(url.to_string());
        self.previews
            .lock()
            .unwrap()
            .get(url)
            .cloned()
            .ok_or_else(|| ApiError::Status {
                status: 404,
                detail: "no preview".to_string(),
            })
    }
}

/// Clock that only moves when told to.
pub struct ManualClock {
    now: Mutex<DateTime<Utc>>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self {
            now: Mutex::new(Utc.with_ymd_and_hms(2026, 1, 1, 12, 0, 0).unwrap()),
        }
    }

    pub fn advance(&self, by: chrono::Duration) {
        *self.now.lock().unwrap() += by;
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        *self.now.lock().unwrap()
    }
}

/// Plain map cache without expiry handling.
#[derive(Default)]
pub struct MapCache {
    store: RwLock<HashMap<String, String>>,
}

impl MapCache {
    pub async fn raw(&self, key: &str) -> Option<String> {
        self.store.read().await.get(key).cloned()
    }
}

#[async_trait]
impl Cache for MapCache {
    async fn get(&self, key: &str) -> Option<String> {
        self.store.read().await.get(key).cloned()
    }

    async fn set(&self, key: &str, value: &str, _ttl: Option<Duration>) -> Result<(), CacheError> {
        self.store
            .write()
            .await
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<(), CacheError> {
        self.store.write().await.remove(key);
        Ok(())
    }

    async fn exists(&self, key: &str) -> bool {
        self.store.read().await.contains_key(key)
    }
}
