use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Publication state of a post.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PostStatus {
    #[default]
    Draft,
    Published,
    Scheduled,
    Archived,
    Rejected,
    Deleted,
}

impl PostStatus {
    pub const ALL: [PostStatus; 6] = [
        PostStatus::Draft,
        PostStatus::Published,
        PostStatus::Scheduled,
        PostStatus::Archived,
        PostStatus::Rejected,
        PostStatus::Deleted,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PostStatus::Draft => "draft",
            PostStatus::Published => "published",
            PostStatus::Scheduled => "scheduled",
            PostStatus::Archived => "archived",
            PostStatus::Rejected => "rejected",
            PostStatus::Deleted => "deleted",
        }
    }

    /// Published and rejected posts are closed for editing.
    pub fn is_terminal(&self) -> bool {
        matches!(self, PostStatus::Published | PostStatus::Rejected)
    }

    /// Whether a persist action may move a post from `self` to `target`.
    ///
    /// Saving with an unchanged status counts as a transition.
    pub fn can_transition_to(&self, target: PostStatus) -> bool {
        if self.is_terminal() {
            return false;
        }
        match target {
            PostStatus::Rejected => true,
            PostStatus::Published => *self == PostStatus::Draft,
            other => other == *self,
        }
    }
}

impl fmt::Display for PostStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PostStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PostStatus::ALL
            .into_iter()
            .find(|status| status.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown post status '{}'", s))
    }
}

/// One of the three editable text bodies of a post.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PostField {
    Content,
    TwitterPost,
    LinkedinPost,
}

/// Tweet a post was generated from.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TweetRef {
    pub id: Option<String>,
    pub text: Option<String>,
    pub author_name: Option<String>,
    pub author_username: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MediaItem {
    pub url: String,
    pub media_type: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UrlItem {
    pub url: String,
    pub title: Option<String>,
}

/// Source material linked to a post.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PostSource {
    pub tweet: Option<TweetRef>,
    pub media: Vec<MediaItem>,
    pub urls: Vec<UrlItem>,
}

/// Post entity - a content item with blog, Twitter and LinkedIn bodies.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Post {
    pub id: String,
    pub title: String,
    pub content: String,
    pub twitter_post: Option<String>,
    pub linkedin_post: Option<String>,
    pub status: PostStatus,
    pub category: Option<String>,
    pub tags: Vec<String>,
    pub created_at: String,
    pub updated_at: String,
    pub thread_id: Option<String>,
    pub source: Option<PostSource>,
}

impl Post {
    /// Create a draft post with the given id and blog content.
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        content: impl Into<String>,
    ) -> Self {
        let now = chrono::Utc::now().to_rfc3339();
        Self {
            id: id.into(),
            title: title.into(),
            content: content.into(),
            created_at: now.clone(),
            updated_at: now,
            ..Default::default()
        }
    }

    /// Current text of `field`; absent variants read as empty.
    pub fn field(&self, field: PostField) -> &str {
        match field {
            PostField::Content => &self.content,
            PostField::TwitterPost => self.twitter_post.as_deref().unwrap_or(""),
            PostField::LinkedinPost => self.linkedin_post.as_deref().unwrap_or(""),
        }
    }

    /// Replace `field`, returning the previous text.
    pub fn replace_field(&mut self, field: PostField, text: String) -> String {
        match field {
            PostField::Content => std::mem::replace(&mut self.content, text),
            PostField::TwitterPost => self.twitter_post.replace(text).unwrap_or_default(),
            PostField::LinkedinPost => self.linkedin_post.replace(text).unwrap_or_default(),
        }
    }

    /// Markdown export of the blog body.
    pub fn to_markdown_export(&self) -> MarkdownExport {
        MarkdownExport {
            file_name: format!("{}.md", slugify(&self.title).unwrap_or_else(|| "post".into())),
            contents: self.content.clone(),
        }
    }
}

/// Blog content ready to be written to a local file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkdownExport {
    pub file_name: String,
    pub contents: String,
}

fn slugify(title: &str) -> Option<String> {
    let mut slug = String::with_capacity(title.len());
    for ch in title.chars() {
        if ch.is_alphanumeric() {
            slug.extend(ch.to_lowercase());
        } else if !slug.is_empty() && !slug.ends_with('-') {
            slug.push('-');
        }
    }
    let slug = slug.trim_end_matches('-');
    (!slug.is_empty()).then(|| slug.to_string())
}
