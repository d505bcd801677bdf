//! Data Transfer Objects - request/response types for the content service.

use serde::{Deserialize, Serialize};

/// Blog record as stored by the backend.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct BlogRecord {
    #[serde(alias = "_id")]
    pub id: String,
    pub title: Option<String>,
    pub content: String,
    pub twitter_post: Option<String>,
    pub linkedin_post: Option<String>,
    pub status: Option<String>,
    pub blog_category: Option<String>,
    pub tags: Vec<String>,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
    pub thread_id: Option<String>,
}

/// Originating tweet attached to a blog.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TweetRecord {
    #[serde(alias = "tweet_id", alias = "_id")]
    pub id: Option<String>,
    pub text: Option<String>,
    pub author_name: Option<String>,
    pub author_username: Option<String>,
    pub thread_id: Option<String>,
    pub created_at: Option<String>,
}

/// Media item attached to a blog's source.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct MediaRecord {
    pub url: String,
    #[serde(alias = "type")]
    pub media_type: Option<String>,
}

/// URL attached to a blog's source.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct UrlRecord {
    pub url: String,
    pub title: Option<String>,
}

/// One entry of `GET /blogs/details`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct BlogEnvelope {
    pub blog: BlogRecord,
    pub tweet: Option<TweetRecord>,
    pub urls: Vec<UrlRecord>,
    pub media: Vec<MediaRecord>,
}

/// Body of `PUT /blogs/{id}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateBlogRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    pub content: String,
    pub status: String,
    pub blog_category: Option<String>,
    pub tags: Vec<String>,
}

/// Item of `GET /sources`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceRecord {
    #[serde(alias = "_id")]
    pub id: String,
    #[serde(rename = "type")]
    pub source_type: String,
    pub source_identifier: Option<String>,
    pub title: Option<String>,
    pub content: Option<String>,
    pub url: Option<String>,
    pub created_at: Option<String>,
}

/// Page returned by `GET /sources`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SourcesResponse {
    pub items: Vec<SourceRecord>,
    pub total: u64,
    pub page: u64,
    pub size: u64,
}

/// Body of `POST /content/generate`. Exactly one of `tweet_id` / `url` is set.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateContentRequest {
    pub post_types: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tweet_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

/// Preview payload inside `GET /api/link-preview`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LinkPreviewData {
    pub title: Option<String>,
    pub description: Option<String>,
    pub image: Option<String>,
    pub force_title: Option<String>,
    pub absolute_image: Option<String>,
    pub url: Option<String>,
}
