//! Application state - the composition root.

use std::sync::Arc;

use draftdeck_core::PostStore;
use draftdeck_core::editor::EditorSurface;
use draftdeck_core::ports::{BlogApi, Cache, SystemClock};
use draftdeck_core::preview::{LinkPreviewCache, LinkPreviewService};
use draftdeck_core::sources::SourceImporter;
use draftdeck_infra::{FileCache, HttpBlogApi, InMemoryCache};

use crate::config::AppConfig;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub api: Arc<HttpBlogApi>,
    pub store: Arc<PostStore>,
    pub previews: Arc<LinkPreviewService>,
    pub importer: Arc<SourceImporter>,
}

impl AppState {
    pub fn new(config: &AppConfig) -> anyhow::Result<Self> {
        let api = Arc::new(HttpBlogApi::new(&config.api)?);

        let cache: Arc<dyn Cache> = match &config.cache_path {
            Some(path) => {
                tracing::info!(path = %path.display(), "Using file cache");
                Arc::new(FileCache::new(path))
            }
            None => {
                tracing::info!("CACHE_PATH not set. Using in-memory cache.");
                Arc::new(InMemoryCache::new())
            }
        };

        let store = Arc::new(PostStore::new(api.clone(), config.store.clone()));
        let previews = Arc::new(LinkPreviewService::new(
            api.clone(),
            LinkPreviewCache::new(cache, Arc::new(SystemClock), config.preview_ttl),
        ));
        let importer = Arc::new(SourceImporter::new(
            api.clone(),
            store.clone(),
            config.refresh_delay,
        ));

        tracing::info!("Application state initialized");

        Ok(Self {
            api,
            store,
            previews,
            importer,
        })
    }

    /// Editor bound to the shared store.
    pub fn editor(&self) -> EditorSurface {
        let api: Arc<dyn BlogApi> = self.api.clone();
        EditorSurface::new(self.store.clone(), api)
    }
}
