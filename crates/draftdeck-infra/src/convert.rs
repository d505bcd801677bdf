//! Conversions between content service wire types and domain types.

use draftdeck_core::domain::{
    LinkPreview, MediaItem, Post, PostSource, PostStatus, PostType, SourceItem, SourcePage,
    SourceRef, TweetRef, UrlItem,
};
use draftdeck_core::ports::{PostPatch, PostUpdate};
use draftdeck_shared::dto::{
    BlogEnvelope, BlogRecord, GenerateContentRequest, LinkPreviewData, SourceRecord,
    SourcesResponse, UpdateBlogRequest,
};

fn parse_status(raw: Option<&str>) -> Option<PostStatus> {
    let raw = raw?;
    match raw.parse() {
        Ok(status) => Some(status),
        Err(e) => {
            tracing::warn!(status = raw, "{}", e);
            None
        }
    }
}

/// Flatten a `{blog, tweet, urls, media}` envelope into a post.
pub fn post_from_envelope(envelope: BlogEnvelope) -> Post {
    let BlogEnvelope {
        blog,
        tweet,
        urls,
        media,
    } = envelope;

    let thread_id = blog.thread_id.clone().or_else(|| {
        tweet
            .as_ref()
            .and_then(|t| t.thread_id.clone().or_else(|| t.id.clone()))
    });

    let source = (tweet.is_some() || !urls.is_empty() || !media.is_empty()).then(|| PostSource {
        tweet: tweet.map(|t| TweetRef {
            id: t.id,
            text: t.text,
            author_name: t.author_name,
            author_username: t.author_username,
        }),
        media: media
            .into_iter()
            .map(|m| MediaItem {
                url: m.url,
                media_type: m.media_type,
            })
            .collect(),
        urls: urls
            .into_iter()
            .map(|u| UrlItem {
                url: u.url,
                title: u.title,
            })
            .collect(),
    });

    Post {
        id: blog.id,
        title: blog.title.unwrap_or_default(),
        content: blog.content,
        twitter_post: blog.twitter_post,
        linkedin_post: blog.linkedin_post,
        status: parse_status(blog.status.as_deref()).unwrap_or_default(),
        category: blog.blog_category,
        tags: blog.tags,
        created_at: blog.created_at.unwrap_or_default(),
        updated_at: blog.updated_at.unwrap_or_default(),
        thread_id,
        source,
    }
}

/// Server echo of an update, as a patch over the local post.
pub fn patch_from_record(record: BlogRecord) -> PostPatch {
    PostPatch {
        title: record.title,
        content: Some(record.content).filter(|c| !c.is_empty()),
        twitter_post: record.twitter_post,
        linkedin_post: record.linkedin_post,
        status: parse_status(record.status.as_deref()),
        category: record.blog_category,
        tags: Some(record.tags).filter(|t| !t.is_empty()),
        updated_at: record.updated_at,
    }
}

pub fn update_request(update: &PostUpdate) -> UpdateBlogRequest {
    UpdateBlogRequest {
        title: update.title.clone(),
        content: update.content.clone(),
        status: update.status.as_str().to_string(),
        blog_category: update.category.clone(),
        tags: update.tags.clone(),
    }
}

pub fn generate_request(post_types: &[PostType], source: &SourceRef) -> GenerateContentRequest {
    let (tweet_id, url) = match source {
        SourceRef::Tweet(id) => (Some(id.clone()), None),
        SourceRef::Url(url) => (None, Some(url.clone())),
    };
    GenerateContentRequest {
        post_types: post_types.iter().map(|t| t.as_str().to_string()).collect(),
        tweet_id,
        url,
    }
}

fn source_item(record: SourceRecord) -> SourceItem {
    SourceItem {
        id: record.id,
        source_type: record.source_type,
        source_identifier: record.source_identifier,
        title: record.title,
        content: record.content,
        url: record.url,
        created_at: record.created_at,
    }
}

pub fn source_page(response: SourcesResponse) -> SourcePage {
    SourcePage {
        items: response.items.into_iter().map(source_item).collect(),
        total: response.total,
        page: response.page,
        size: response.size,
    }
}

pub fn link_preview(data: LinkPreviewData) -> LinkPreview {
    LinkPreview {
        title: data.title,
        description: data.description,
        image: data.image,
        force_title: data.force_title,
        absolute_image: data.absolute_image,
        url: data.url,
    }
}
