//! Editor surface - a headless tabbed markdown editor bound to the post store.
//!
//! The surface keeps only render-local state (active tab, overlay, command
//! picker, pending selection). Text always lives in the [`PostStore`]; every
//! change is committed there and the view re-renders from the store.

mod commands;
mod picker;
mod selection;

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::domain::{PostField, PostFilters, PostQuery};
use crate::ports::BlogApi;
use crate::store::PostStore;

pub use commands::{
    Expansion, SLASH_COMMANDS, SlashCommand, expand_at_caret, filter_commands, match_suffix,
    replace_range,
};
pub use picker::CommandPicker;
pub use selection::{Selection, SelectionHolder};

use commands::byte_offset;

/// Platform buffer shown by the editor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum EditorTab {
    #[default]
    Blog,
    Twitter,
    Linkedin,
}

impl EditorTab {
    pub fn field(&self) -> PostField {
        match self {
            EditorTab::Blog => PostField::Content,
            EditorTab::Twitter => PostField::TwitterPost,
            EditorTab::Linkedin => PostField::LinkedinPost,
        }
    }
}

/// Modal views layered over the editor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Overlay {
    #[default]
    None,
    Canvas,
    Detail,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Char(char),
    ArrowUp,
    ArrowDown,
    Tab,
    Enter,
    Escape,
    Other,
}

/// A key press; `modifier` is Ctrl or Cmd depending on the platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyPress {
    pub key: Key,
    pub modifier: bool,
}

impl KeyPress {
    pub fn plain(key: Key) -> Self {
        Self {
            key,
            modifier: false,
        }
    }

    pub fn with_modifier(c: char) -> Self {
        Self {
            key: Key::Char(c),
            modifier: true,
        }
    }
}

/// Whether the host should suppress its default handling of a key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyOutcome {
    PreventDefault,
    Ignored,
}

/// Lazy load of the Twitter/LinkedIn variants for a post.
///
/// Produced by [`EditorSurface::select_tab`]. Only the fetch from the most
/// recent tab switch is applied; earlier ones resolve into nothing.
pub struct VariantFetch {
    api: Arc<dyn BlogApi>,
    store: Arc<PostStore>,
    latest: Arc<AtomicU64>,
    seq: u64,
    post_id: String,
    thread_id: String,
}

impl VariantFetch {
    pub fn post_id(&self) -> &str {
        &self.post_id
    }

    /// Fetch and merge the variants. Returns whether anything was applied.
    pub async fn run(self) -> bool {
        let query = PostQuery::new(PostFilters::default().with_thread(&self.thread_id), 0, 1);
        let result = self.api.fetch_posts(&query).await;

        if self.latest.load(Ordering::SeqCst) != self.seq {
            tracing::debug!(
                seq = self.seq,
                thread_id = %self.thread_id,
                "Discarding stale variant fetch"
            );
            return false;
        }

        match result {
            Ok(posts) => {
                let Some(found) = posts.into_iter().next() else {
                    tracing::debug!(thread_id = %self.thread_id, "No variants for thread");
                    return false;
                };
                self.store
                    .apply_thread_variants(&self.post_id, found.twitter_post, found.linkedin_post)
                    .await;
                true
            }
            Err(e) => {
                tracing::warn!(
                    thread_id = %self.thread_id,
                    error = %e,
                    "Failed to fetch thread variants"
                );
                false
            }
        }
    }
}

pub struct EditorSurface {
    store: Arc<PostStore>,
    api: Arc<dyn BlogApi>,
    tab: EditorTab,
    overlay: Overlay,
    picker: CommandPicker,
    selection: SelectionHolder,
    tab_seq: Arc<AtomicU64>,
}

impl EditorSurface {
    pub fn new(store: Arc<PostStore>, api: Arc<dyn BlogApi>) -> Self {
        Self {
            store,
            api,
            tab: EditorTab::default(),
            overlay: Overlay::default(),
            picker: CommandPicker::default(),
            selection: SelectionHolder::default(),
            tab_seq: Arc::new(AtomicU64::new(0)),
        }
    }

    pub fn tab(&self) -> EditorTab {
        self.tab
    }

    pub fn overlay(&self) -> Overlay {
        self.overlay
    }

    pub fn picker(&self) -> &CommandPicker {
        &self.picker
    }

    pub fn open_overlay(&mut self, overlay: Overlay) {
        self.overlay = overlay;
    }

    /// Text of the active tab's buffer.
    pub async fn text(&self) -> String {
        self.store
            .current_field(self.tab.field())
            .await
            .unwrap_or_default()
    }

    /// Switch tabs. For Twitter/LinkedIn with a missing variant, returns the
    /// fetch the host should run to load it.
    pub async fn select_tab(&mut self, tab: EditorTab) -> Option<VariantFetch> {
        self.tab = tab;
        self.overlay = Overlay::None;
        self.picker.close();
        let seq = self.tab_seq.fetch_add(1, Ordering::SeqCst) + 1;

        if tab == EditorTab::Blog {
            return None;
        }

        let post = self.store.current_post().await?;
        if !post.field(tab.field()).is_empty() {
            return None;
        }
        let Some(thread_id) = post.thread_id.clone() else {
            tracing::debug!(post_id = %post.id, ?tab, "No thread id; skipping variant fetch");
            return None;
        };

        Some(VariantFetch {
            api: self.api.clone(),
            store: self.store.clone(),
            latest: self.tab_seq.clone(),
            seq,
            post_id: post.id,
            thread_id,
        })
    }

    /// Change event from the text field. `caret` is a char offset into `text`.
    ///
    /// Expands a completed slash trigger, drives the command picker, commits
    /// the result to the store and records the selection to restore.
    /// Returns the command that was expanded, if any.
    pub async fn handle_input(
        &mut self,
        text: String,
        caret: usize,
    ) -> Option<&'static SlashCommand> {
        let scroll_top = self.selection.last().scroll_top;

        if let Some(expansion) = expand_at_caret(&text, caret) {
            self.picker.close();
            self.commit(expansion.text, Selection::caret(expansion.caret, scroll_top))
                .await;
            return Some(expansion.command);
        }

        self.track_picker(&text, caret);
        self.commit(text, Selection::caret(caret, scroll_top)).await;
        None
    }

    fn track_picker(&mut self, text: &str, caret: usize) {
        let before = &text[..byte_offset(text, caret)];

        if let Some(anchor) = self.picker.anchor() {
            let query = (anchor < caret)
                .then(|| &before[byte_offset(before, anchor)..])
                .and_then(|typed| typed.strip_prefix('/'));
            match query {
                Some(query) if !query.chars().any(char::is_whitespace) => {
                    self.picker.set_query(query)
                }
                _ => self.picker.close(),
            }
            if self.picker.is_open() {
                return;
            }
        }

        if before.ends_with('/') {
            self.picker.open(caret - 1);
        }
    }

    async fn commit(&mut self, text: String, selection: Selection) {
        self.selection.record(selection);
        self.store.update_field(self.tab.field(), text).await;
    }

    /// Selection or scroll change without a text change. Moving the caret
    /// to or before the picker's `/` closes the picker.
    pub fn record_selection(&mut self, start: usize, end: usize, scroll_top: u32) {
        if self.picker.anchor().is_some_and(|anchor| start.min(end) <= anchor) {
            self.picker.close();
        }
        self.selection.record(Selection {
            start,
            end,
            scroll_top,
        });
    }

    /// Second phase of caret restoration. Call after the view shows the new
    /// text; returns the selection to apply, once.
    pub fn take_pending_selection(&mut self, rendered_len: usize) -> Option<Selection> {
        self.selection.take(rendered_len)
    }

    pub fn outside_click(&mut self) {
        self.picker.close();
    }

    pub async fn handle_key(&mut self, press: KeyPress) -> KeyOutcome {
        if press.modifier {
            return match press.key {
                Key::Char(c) if c.eq_ignore_ascii_case(&'z') => {
                    self.picker.close();
                    self.store.undo().await;
                    KeyOutcome::PreventDefault
                }
                Key::Char(c) if c.eq_ignore_ascii_case(&'y') => {
                    self.picker.close();
                    self.store.redo().await;
                    KeyOutcome::PreventDefault
                }
                _ => KeyOutcome::Ignored,
            };
        }

        if !self.picker.is_open() {
            return KeyOutcome::Ignored;
        }

        match press.key {
            Key::ArrowDown | Key::Tab => self.picker.cycle(true),
            Key::ArrowUp => self.picker.cycle(false),
            Key::Escape => self.picker.close(),
            Key::Enter => self.confirm_picker().await,
            Key::Char(_) | Key::Other => return KeyOutcome::Ignored,
        }
        KeyOutcome::PreventDefault
    }

    /// Insert the highlighted command in place of the typed `/query`.
    async fn confirm_picker(&mut self) {
        let (Some(anchor), Some(command)) = (self.picker.anchor(), self.picker.highlighted())
        else {
            self.picker.close();
            return;
        };
        self.picker.close();

        let last = self.selection.last();
        let text = self.text().await;
        let expansion = replace_range(&text, anchor, last.end.max(anchor), command);
        self.commit(expansion.text, Selection::caret(expansion.caret, last.scroll_top))
            .await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::StoreConfig;
    use crate::test_support::{FakeBlogApi, post};

    async fn surface_with(content: &str) -> (EditorSurface, Arc<PostStore>, Arc<FakeBlogApi>) {
        let api = Arc::new(FakeBlogApi::default());
        let store = Arc::new(PostStore::new(api.clone(), StoreConfig::default()));
        store.set_current_post(Some(post("p1", content))).await;
        (EditorSurface::new(store.clone(), api.clone()), store, api)
    }

    #[tokio::test]
    async fn test_slash_trigger_expands_and_places_caret() {
        let (mut surface, store, _) = surface_with("Title\n").await;

        let fired = surface.handle_input("Title\n/h2".to_string(), 9).await;

        assert_eq!(fired.map(|c| c.trigger), Some("/h2"));
        assert_eq!(store.current_post().await.unwrap().content, "Title\n## ");
        assert_eq!(surface.take_pending_selection(9), Some(Selection::caret(9, 0)));
        assert!(!surface.picker().is_open());
    }

    #[tokio::test]
    async fn test_bare_slash_opens_picker_and_typing_filters() {
        let (mut surface, _, _) = surface_with("").await;

        surface.handle_input("/".to_string(), 1).await;
        assert_eq!(surface.picker().anchor(), Some(0));
        assert_eq!(surface.picker().matches().len(), SLASH_COMMANDS.len());

        surface.handle_input("/ta".to_string(), 3).await;
        let triggers: Vec<_> = surface.picker().matches().iter().map(|c| c.trigger).collect();
        assert_eq!(triggers, vec!["/table"]);

        surface.handle_input("/ta ".to_string(), 4).await;
        assert!(!surface.picker().is_open());
    }

    #[tokio::test]
    async fn test_picker_enter_inserts_highlighted() {
        let (mut surface, store, _) = surface_with("").await;
        surface.handle_input("see /".to_string(), 5).await;
        surface.handle_input("see /i".to_string(), 6).await;

        // "/i" lists /italic then /img.
        assert_eq!(
            surface.handle_key(KeyPress::plain(Key::ArrowDown)).await,
            KeyOutcome::PreventDefault
        );
        surface.handle_key(KeyPress::plain(Key::Enter)).await;

        assert_eq!(store.current_post().await.unwrap().content, "see ![]()");
        assert_eq!(surface.take_pending_selection(9), Some(Selection::caret(9, 0)));
        assert!(!surface.picker().is_open());
    }

    #[tokio::test]
    async fn test_scroll_offset_carried_into_next_commit() {
        let (mut surface, _, _) = surface_with("hello").await;

        surface.record_selection(2, 5, 40);
        surface.handle_input("hello!".to_string(), 6).await;

        assert_eq!(surface.take_pending_selection(6), Some(Selection::caret(6, 40)));
        assert_eq!(surface.take_pending_selection(6), None);
    }

    #[tokio::test]
    async fn test_recorded_range_is_clamped_on_restore() {
        let (mut surface, _, _) = surface_with("hello world").await;

        surface.record_selection(3, 11, 7);
        let restored = surface.take_pending_selection(5).unwrap();

        assert_eq!(
            restored,
            Selection {
                start: 3,
                end: 5,
                scroll_top: 7
            }
        );
    }

    #[tokio::test]
    async fn test_caret_moved_before_slash_closes_picker() {
        let (mut surface, store, _) = surface_with("").await;
        surface.handle_input("see /".to_string(), 5).await;
        surface.handle_input("see /i".to_string(), 6).await;
        assert!(surface.picker().is_open());

        surface.record_selection(5, 5, 0);
        assert!(surface.picker().is_open());

        surface.record_selection(1, 1, 0);
        assert!(!surface.picker().is_open());
        assert_eq!(surface.handle_key(KeyPress::plain(Key::Enter)).await, KeyOutcome::Ignored);
        assert_eq!(store.current_post().await.unwrap().content, "see /i");
    }

    #[tokio::test]
    async fn test_escape_and_outside_click_close_picker() {
        let (mut surface, _, _) = surface_with("").await;

        surface.handle_input("/".to_string(), 1).await;
        surface.handle_key(KeyPress::plain(Key::Escape)).await;
        assert!(!surface.picker().is_open());

        surface.handle_input("//".to_string(), 2).await;
        assert!(surface.picker().is_open());
        surface.outside_click();
        assert!(!surface.picker().is_open());
        assert_eq!(surface.handle_key(KeyPress::plain(Key::Enter)).await, KeyOutcome::Ignored);
    }

    #[tokio::test]
    async fn test_shortcuts_undo_and_redo_active_field() {
        let (mut surface, store, _) = surface_with("blog").await;
        surface.select_tab(EditorTab::Linkedin).await;

        surface.handle_input("hello".to_string(), 5).await;
        assert_eq!(
            surface.handle_key(KeyPress::with_modifier('z')).await,
            KeyOutcome::PreventDefault
        );
        assert_eq!(surface.text().await, "");
        assert_eq!(store.current_post().await.unwrap().content, "blog");

        assert_eq!(
            surface.handle_key(KeyPress::with_modifier('Y')).await,
            KeyOutcome::PreventDefault
        );
        assert_eq!(surface.text().await, "hello");
        assert_eq!(surface.handle_key(KeyPress::with_modifier('b')).await, KeyOutcome::Ignored);
    }

    #[tokio::test]
    async fn test_select_tab_resets_overlay_and_fetches_variant() {
        let (mut surface, store, api) = surface_with("blog").await;
        let mut with_thread = post("p1", "blog");
        with_thread.thread_id = Some("t-1".into());
        store.set_current_post(Some(with_thread)).await;

        let mut variants = post("p1", "");
        variants.twitter_post = Some("thread tweet".into());
        api.push_fetch(Ok(vec![variants]));

        surface.open_overlay(Overlay::Canvas);
        let fetch = surface.select_tab(EditorTab::Twitter).await.unwrap();
        assert_eq!(surface.overlay(), Overlay::None);
        assert!(fetch.run().await);

        assert_eq!(surface.text().await, "thread tweet");
        let pairs = api.fetch_queries()[0].to_query_pairs();
        assert!(pairs.contains(&("thread_id".to_string(), "t-1".to_string())));
        assert!(pairs.contains(&("limit".to_string(), "1".to_string())));
    }

    #[tokio::test]
    async fn test_stale_variant_fetch_is_discarded() {
        let (mut surface, store, api) = surface_with("blog").await;
        let mut with_thread = post("p1", "blog");
        with_thread.thread_id = Some("t-1".into());
        store.set_current_post(Some(with_thread)).await;

        let first = surface.select_tab(EditorTab::Twitter).await.unwrap();
        let second = surface.select_tab(EditorTab::Linkedin).await.unwrap();

        let mut latest = post("p1", "");
        latest.linkedin_post = Some("linkedin copy".into());
        api.push_fetch(Ok(vec![latest]));
        let mut stale = post("p1", "");
        stale.twitter_post = Some("stale tweet".into());
        api.push_fetch(Ok(vec![stale]));

        assert!(second.run().await);
        assert!(!first.run().await);

        let current = store.current_post().await.unwrap();
        assert_eq!(current.linkedin_post.as_deref(), Some("linkedin copy"));
        assert!(current.twitter_post.is_none());
    }

    #[tokio::test]
    async fn test_blog_tab_and_missing_thread_skip_fetch() {
        let (mut surface, _, api) = surface_with("blog").await;

        assert!(surface.select_tab(EditorTab::Blog).await.is_none());
        assert!(surface.select_tab(EditorTab::Twitter).await.is_none());
        assert!(api.fetch_queries().is_empty());
    }
}
