//! Post store - the single source of truth for posts, the current selection,
//! pagination and edit history.
//!
//! The store is shared as `Arc<PostStore>` and mutated only through its
//! methods. Network calls never hold the state lock, and list fetches carry a
//! sequence number so a superseded response cannot overwrite newer state.
//! Failures are recorded in [`StoreSnapshot::error`] instead of being
//! returned.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use tokio::sync::RwLock;

use crate::domain::{
    DEFAULT_PAGE_SIZE, EditHistory, HistoryEntry, MarkdownExport, Pagination, Post, PostField,
    PostFilters, PostQuery, PostStatus,
};
use crate::ports::{BlogApi, Clock, PostUpdate, SystemClock};

const FETCH_ERROR: &str = "Failed to fetch posts";

/// Store configuration.
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// Page size used by `load_more` and the initial fetch.
    pub page_size: u32,
    /// Maximum undo depth (`None` = unbounded).
    pub history_limit: Option<usize>,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            history_limit: None,
        }
    }
}

/// Point-in-time copy of the store state for views.
#[derive(Debug, Clone, Default)]
pub struct StoreSnapshot {
    pub posts: Vec<Post>,
    pub current_post: Option<Post>,
    pub filters: PostFilters,
    pub pagination: Pagination,
    pub is_loading: bool,
    pub error: Option<String>,
    pub content_updated: bool,
    pub can_undo: bool,
    pub can_redo: bool,
}

#[derive(Debug, Default)]
struct StoreState {
    posts: Vec<Post>,
    current: Option<Post>,
    filters: PostFilters,
    pagination: Pagination,
    loading: bool,
    error: Option<String>,
    content_updated: bool,
    history: EditHistory,
}

#[derive(Debug, Clone, Copy)]
enum PersistAction {
    Save,
    Publish,
    Reject,
}

impl PersistAction {
    fn verb(&self) -> &'static str {
        match self {
            PersistAction::Save => "save",
            PersistAction::Publish => "publish",
            PersistAction::Reject => "reject",
        }
    }

    fn target(&self, current: PostStatus) -> PostStatus {
        match self {
            PersistAction::Save => current,
            PersistAction::Publish => PostStatus::Published,
            PersistAction::Reject => PostStatus::Rejected,
        }
    }
}

/// State container for posts and the editing session.
pub struct PostStore {
    api: Arc<dyn BlogApi>,
    clock: Arc<dyn Clock>,
    config: StoreConfig,
    state: RwLock<StoreState>,
    fetch_seq: AtomicU64,
}

impl PostStore {
    pub fn new(api: Arc<dyn BlogApi>, config: StoreConfig) -> Self {
        Self::with_clock(api, Arc::new(SystemClock), config)
    }

    pub fn with_clock(api: Arc<dyn BlogApi>, clock: Arc<dyn Clock>, config: StoreConfig) -> Self {
        let state = StoreState {
            pagination: Pagination {
                limit: config.page_size,
                ..Default::default()
            },
            history: EditHistory::new(config.history_limit),
            ..Default::default()
        };
        Self {
            api,
            clock,
            config,
            state: RwLock::new(state),
            fetch_seq: AtomicU64::new(0),
        }
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    // ---- Fetching ----

    /// Fetch a filtered page. `skip == 0` replaces the list, otherwise the
    /// page is appended.
    pub async fn fetch_posts(&self, filters: PostFilters, skip: u32, limit: u32) {
        self.fetch_window(filters, skip, limit, limit).await;
    }

    /// Fetch `skip..skip + limit`, leaving `page_limit` as the size of
    /// later `load_more` pages.
    async fn fetch_window(&self, filters: PostFilters, skip: u32, limit: u32, page_limit: u32) {
        let seq = self.fetch_seq.fetch_add(1, Ordering::SeqCst) + 1;
        {
            let mut state = self.state.write().await;
            state.loading = true;
            state.filters = filters.clone();
        }

        let query = PostQuery::new(filters, skip, limit);
        tracing::debug!(seq, skip, limit, "Fetching posts");
        let result = self.api.fetch_posts(&query).await;

        let mut state = self.state.write().await;
        if self.fetch_seq.load(Ordering::SeqCst) != seq {
            tracing::debug!(seq, "Discarding stale post list response");
            return;
        }
        state.loading = false;

        match result {
            Ok(posts) => {
                let received = posts.len();
                if skip == 0 {
                    state.posts = posts;
                } else {
                    state.posts.extend(posts);
                }
                state.pagination = Pagination {
                    skip,
                    limit: page_limit,
                    total_posts: state.posts.len() as u32,
                    has_reached_end: (received as u32) < limit,
                };
                state.error = None;
                tracing::debug!(received, total = state.posts.len(), "Posts loaded");
            }
            Err(e) => {
                tracing::warn!(error = %e, skip, limit, "Failed to fetch posts");
                state.posts.clear();
                state.pagination.total_posts = 0;
                state.error = Some(FETCH_ERROR.to_string());
            }
        }
    }

    /// Fetch the next page with the active filters.
    ///
    /// Returns `false` without fetching while a fetch is in flight or once
    /// the end of the list has been reached.
    pub async fn load_more(&self) -> bool {
        let (filters, skip, limit) = {
            let state = self.state.read().await;
            if state.loading || state.pagination.has_reached_end {
                return false;
            }
            (
                state.filters.clone(),
                state.posts.len() as u32,
                state.pagination.limit,
            )
        };
        self.fetch_posts(filters, skip, limit).await;
        true
    }

    /// Re-fetch everything loaded so far with the active filters. The page
    /// size used by `load_more` is unchanged.
    pub async fn refresh(&self) {
        let (filters, window, page_limit) = {
            let state = self.state.read().await;
            let page_limit = state.pagination.limit;
            let loaded = state.posts.len() as u32;
            (state.filters.clone(), page_limit.max(loaded), page_limit)
        };
        self.fetch_window(filters, 0, window, page_limit).await;
    }

    // ---- Selection and editing ----

    /// Switch the current post. Always resets the edit history.
    pub async fn set_current_post(&self, post: Option<Post>) {
        let mut state = self.state.write().await;
        tracing::debug!(post_id = ?post.as_ref().map(|p| p.id.as_str()), "Selecting post");
        state.current = post;
        state.history.clear();
        state.content_updated = false;
    }

    pub async fn update_content(&self, text: impl Into<String>) {
        self.update_field(PostField::Content, text.into()).await;
    }

    pub async fn update_twitter_post(&self, text: impl Into<String>) {
        self.update_field(PostField::TwitterPost, text.into()).await;
    }

    pub async fn update_linkedin_post(&self, text: impl Into<String>) {
        self.update_field(PostField::LinkedinPost, text.into()).await;
    }

    /// Replace one text field of the current post, recording its previous
    /// value for undo.
    pub async fn update_field(&self, field: PostField, text: String) {
        let mut guard = self.state.write().await;
        let state = &mut *guard;
        let Some(post) = state.current.as_mut() else {
            tracing::warn!(?field, "Ignoring edit: no post selected");
            return;
        };

        let previous = post.replace_field(field, text);
        state.history.record(HistoryEntry::new(field, previous));
        post.updated_at = self.clock.now().to_rfc3339();
        state.content_updated = true;
    }

    pub async fn undo(&self) {
        self.step(true).await;
    }

    pub async fn redo(&self) {
        self.step(false).await;
    }

    async fn step(&self, backwards: bool) {
        let mut guard = self.state.write().await;
        let state = &mut *guard;
        let Some(post) = state.current.as_mut() else {
            tracing::warn!(backwards, "Ignoring undo/redo: no post selected");
            return;
        };

        let live = |field: PostField| post.field(field).to_string();
        let entry = if backwards {
            state.history.undo(live)
        } else {
            state.history.redo(live)
        };
        let Some(entry) = entry else {
            return;
        };

        post.replace_field(entry.field, entry.value);
        post.updated_at = self.clock.now().to_rfc3339();
        state.content_updated = true;
    }

    /// Fill in lazily fetched platform variants on the post with `post_id`.
    /// Variants already present locally are kept. Does not touch the edit
    /// history.
    pub async fn apply_thread_variants(
        &self,
        post_id: &str,
        twitter_post: Option<String>,
        linkedin_post: Option<String>,
    ) {
        let mut guard = self.state.write().await;
        let state = &mut *guard;
        let targets = state
            .current
            .iter_mut()
            .chain(state.posts.iter_mut())
            .filter(|p| p.id == post_id);
        for post in targets {
            if post.twitter_post.is_none() {
                post.twitter_post = twitter_post.clone();
            }
            if post.linkedin_post.is_none() {
                post.linkedin_post = linkedin_post.clone();
            }
        }
    }

    // ---- Persistence ----

    pub async fn save_post(&self) {
        self.persist(PersistAction::Save).await;
    }

    pub async fn publish_post(&self) {
        self.persist(PersistAction::Publish).await;
    }

    pub async fn reject_post(&self) {
        self.persist(PersistAction::Reject).await;
    }

    async fn persist(&self, action: PersistAction) {
        let (id, update) = {
            let mut state = self.state.write().await;
            let Some(post) = state.current.as_ref() else {
                tracing::warn!(action = action.verb(), "Ignoring persist: no post selected");
                return;
            };

            let target = action.target(post.status);
            if !post.status.can_transition_to(target) {
                let message = format!("Cannot {} a {} post", action.verb(), post.status);
                tracing::warn!(post_id = %post.id, %target, "{}", message);
                state.error = Some(message);
                return;
            }
            (post.id.clone(), PostUpdate::from_post(post, target))
        };

        tracing::info!(
            post_id = %id,
            status = %update.status,
            action = action.verb(),
            "Persisting post"
        );

        match self.api.update_post(&id, &update).await {
            Ok(patch) => {
                {
                    let mut guard = self.state.write().await;
                    let state = &mut *guard;
                    if let Some(current) = state.current.as_mut().filter(|p| p.id == id) {
                        patch.apply_to(current);
                        if patch.status.is_none() {
                            current.status = update.status;
                        }
                        let merged = current.clone();
                        if let Some(entry) = state.posts.iter_mut().find(|p| p.id == id) {
                            *entry = merged;
                        }
                    }
                    state.content_updated = false;
                    state.error = None;
                }
                self.refresh().await;
            }
            Err(e) => {
                tracing::warn!(post_id = %id, error = %e, action = action.verb(), "Persist failed");
                let mut state = self.state.write().await;
                state.error = Some(format!("Failed to {} post", action.verb()));
            }
        }
    }

    /// Markdown export of the current blog content.
    pub async fn download_markdown(&self) -> Option<MarkdownExport> {
        let state = self.state.read().await;
        match state.current.as_ref() {
            Some(post) => Some(post.to_markdown_export()),
            None => {
                tracing::warn!("Ignoring markdown export: no post selected");
                None
            }
        }
    }

    pub async fn clear_error(&self) {
        self.state.write().await.error = None;
    }

    // ---- Accessors ----

    pub async fn snapshot(&self) -> StoreSnapshot {
        let state = self.state.read().await;
        StoreSnapshot {
            posts: state.posts.clone(),
            current_post: state.current.clone(),
            filters: state.filters.clone(),
            pagination: state.pagination,
            is_loading: state.loading,
            error: state.error.clone(),
            content_updated: state.content_updated,
            can_undo: state.history.can_undo(),
            can_redo: state.history.can_redo(),
        }
    }

    pub async fn current_post(&self) -> Option<Post> {
        self.state.read().await.current.clone()
    }

    /// Text of `field` on the current post.
    pub async fn current_field(&self, field: PostField) -> Option<String> {
        let state = self.state.read().await;
        state.current.as_ref().map(|p| p.field(field).to_string())
    }

    pub async fn posts(&self) -> Vec<Post> {
        self.state.read().await.posts.clone()
    }

    pub async fn filters(&self) -> PostFilters {
        self.state.read().await.filters.clone()
    }

    pub async fn pagination(&self) -> Pagination {
        self.state.read().await.pagination
    }

    pub async fn error(&self) -> Option<String> {
        self.state.read().await.error.clone()
    }

    pub async fn is_loading(&self) -> bool {
        self.state.read().await.loading
    }

    pub async fn content_updated(&self) -> bool {
        self.state.read().await.content_updated
    }

    pub async fn can_undo(&self) -> bool {
        self.state.read().await.history.can_undo()
    }

    pub async fn can_redo(&self) -> bool {
        self.state.read().await.history.can_redo()
    }
}
