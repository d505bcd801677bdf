//! Content service ports.

use async_trait::async_trait;

use crate::domain::{
    LinkPreview, Post, PostQuery, PostStatus, PostType, SourcePage, SourceQuery, SourceRef,
};
use crate::error::ApiError;

/// Editable fields sent when persisting a post.
#[derive(Debug, Clone, PartialEq)]
pub struct PostUpdate {
    pub title: Option<String>,
    pub content: String,
    pub status: PostStatus,
    pub category: Option<String>,
    pub tags: Vec<String>,
}

impl PostUpdate {
    pub fn from_post(post: &Post, status: PostStatus) -> Self {
        Self {
            title: (!post.title.is_empty()).then(|| post.title.clone()),
            content: post.content.clone(),
            status,
            category: post.category.clone(),
            tags: post.tags.clone(),
        }
    }
}

/// Fields the server echoed back after an update. Absent fields are kept.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PostPatch {
    pub title: Option<String>,
    pub content: Option<String>,
    pub twitter_post: Option<String>,
    pub linkedin_post: Option<String>,
    pub status: Option<PostStatus>,
    pub category: Option<String>,
    pub tags: Option<Vec<String>>,
    pub updated_at: Option<String>,
}

impl PostPatch {
    pub fn apply_to(&self, post: &mut Post) {
        if let Some(title) = &self.title {
            post.title = title.clone();
        }
        if let Some(content) = &self.content {
            post.content = content.clone();
        }
        if self.twitter_post.is_some() {
            post.twitter_post = self.twitter_post.clone();
        }
        if self.linkedin_post.is_some() {
            post.linkedin_post = self.linkedin_post.clone();
        }
        if let Some(status) = self.status {
            post.status = status;
        }
        if self.category.is_some() {
            post.category = self.category.clone();
        }
        if let Some(tags) = &self.tags {
            post.tags = tags.clone();
        }
        if let Some(updated_at) = &self.updated_at {
            post.updated_at = updated_at.clone();
        }
    }
}

/// Blog listing and persistence.
#[async_trait]
pub trait BlogApi: Send + Sync {
    /// Fetch one filtered page of posts.
    async fn fetch_posts(&self, query: &PostQuery) -> Result<Vec<Post>, ApiError>;

    /// Persist the editable fields of a post.
    async fn update_post(&self, id: &str, update: &PostUpdate) -> Result<PostPatch, ApiError>;
}

/// Source listing and content generation.
#[async_trait]
pub trait SourceApi: Send + Sync {
    async fn list_sources(&self, query: &SourceQuery) -> Result<SourcePage, ApiError>;

    /// Ask the backend to generate posts. Generation finishes asynchronously
    /// on the server.
    async fn generate_content(
        &self,
        post_types: &[PostType],
        source: &SourceRef,
    ) -> Result<(), ApiError>;
}

/// Link preview lookup.
#[async_trait]
pub trait LinkPreviewApi: Send + Sync {
    async fn link_preview(&self, url: &str) -> Result<LinkPreview, ApiError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_patch_keeps_absent_fields() {
        let mut post = Post::new("p1", "Title", "local");
        post.tags = vec!["a".into()];

        PostPatch {
            status: Some(PostStatus::Published),
            content: Some("server".into()),
            ..Default::default()
        }
        .apply_to(&mut post);

        assert_eq!(post.status, PostStatus::Published);
        assert_eq!(post.content, "server");
        assert_eq!(post.title, "Title");
        assert_eq!(post.tags, vec!["a"]);
    }

    #[test]
    fn test_update_omits_empty_title() {
        let post = Post::new("p1", "", "body");
        let update = PostUpdate::from_post(&post, PostStatus::Rejected);

        assert_eq!(update.title, None);
        assert_eq!(update.status, PostStatus::Rejected);
    }
}
