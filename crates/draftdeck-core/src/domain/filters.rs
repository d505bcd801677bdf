use serde::{Deserialize, Serialize};

use super::post::PostStatus;

/// Default page size for post listing.
pub const DEFAULT_PAGE_SIZE: u32 = 200;

/// Status selector of the sidebar. `All` exists only in the UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum StatusFilter {
    #[default]
    All,
    Only(PostStatus),
}

impl From<PostStatus> for StatusFilter {
    fn from(status: PostStatus) -> Self {
        StatusFilter::Only(status)
    }
}

/// Filters applied to `GET /blogs/details`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PostFilters {
    pub status: StatusFilter,
    pub search: Option<String>,
    pub category: Option<String>,
    pub tags: Vec<String>,
    pub thread_id: Option<String>,
}

impl PostFilters {
    pub fn with_status(mut self, status: impl Into<StatusFilter>) -> Self {
        self.status = status.into();
        self
    }

    pub fn with_thread(mut self, thread_id: impl Into<String>) -> Self {
        self.thread_id = Some(thread_id.into());
        self
    }
}

/// A filtered page request.
#[derive(Debug, Clone, PartialEq)]
pub struct PostQuery {
    pub filters: PostFilters,
    pub skip: u32,
    pub limit: u32,
}

impl PostQuery {
    pub fn new(filters: PostFilters, skip: u32, limit: u32) -> Self {
        Self {
            filters,
            skip,
            limit,
        }
    }

    /// Query-string pairs in request order. A status of `All` is left out.
    pub fn to_query_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = Vec::new();
        let f = &self.filters;

        if let StatusFilter::Only(status) = f.status {
            pairs.push(("status".to_string(), status.as_str().to_string()));
        }
        if let Some(search) = f.search.as_deref().filter(|s| !s.trim().is_empty()) {
            pairs.push(("search".to_string(), search.trim().to_string()));
        }
        if let Some(category) = &f.category {
            pairs.push(("blog_category".to_string(), category.clone()));
        }
        for tag in &f.tags {
            pairs.push(("tags".to_string(), tag.clone()));
        }
        if let Some(thread_id) = &f.thread_id {
            pairs.push(("thread_id".to_string(), thread_id.clone()));
        }
        pairs.push(("skip".to_string(), self.skip.to_string()));
        pairs.push(("limit".to_string(), self.limit.to_string()));
        pairs
    }
}

/// Infinite-scroll cursor over the post list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination {
    pub skip: u32,
    pub limit: u32,
    pub total_posts: u32,
    pub has_reached_end: bool,
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            skip: 0,
            limit: DEFAULT_PAGE_SIZE,
            total_posts: 0,
            has_reached_end: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keys(query: &PostQuery) -> Vec<String> {
        query.to_query_pairs().into_iter().map(|(k, _)| k).collect()
    }

    #[test]
    fn test_all_status_is_not_forwarded() {
        let query = PostQuery::new(PostFilters::default(), 0, 200);
        assert!(!keys(&query).contains(&"status".to_string()));
    }

    #[test]
    fn test_concrete_status_is_forwarded() {
        let query = PostQuery::new(PostFilters::default().with_status(PostStatus::Draft), 0, 50);
        let pairs = query.to_query_pairs();

        assert!(pairs.contains(&("status".to_string(), "draft".to_string())));
        assert!(pairs.contains(&("limit".to_string(), "50".to_string())));
    }

    #[test]
    fn test_blank_search_is_dropped_and_tags_repeat() {
        let filters = PostFilters {
            search: Some("   ".into()),
            tags: vec!["rust".into(), "rust".into()],
            ..Default::default()
        };
        let query = PostQuery::new(filters, 200, 200);

        assert_eq!(keys(&query), vec!["tags", "tags", "skip", "limit"]);
    }
}
