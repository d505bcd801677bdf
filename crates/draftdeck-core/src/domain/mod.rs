//! Domain entities - posts, filters, history and sources.

mod filters;
mod history;
mod post;
mod source;

pub use filters::{DEFAULT_PAGE_SIZE, Pagination, PostFilters, PostQuery, StatusFilter};
pub use history::{EditHistory, HistoryEntry};
pub use post::{
    MarkdownExport, MediaItem, Post, PostField, PostSource, PostStatus, TweetRef, UrlItem,
};
pub use source::{
    LinkPreview, PostType, SourceItem, SourcePage, SourceQuery, SourceRef, validate_source_url,
};
