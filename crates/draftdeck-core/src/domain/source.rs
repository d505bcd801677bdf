use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::ImportError;

/// Platform variant the backend can generate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PostType {
    Blog,
    Twitter,
    Linkedin,
}

impl PostType {
    pub fn as_str(&self) -> &'static str {
        match self {
            PostType::Blog => "blog",
            PostType::Twitter => "twitter",
            PostType::Linkedin => "linkedin",
        }
    }
}

/// Material a generation request starts from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceRef {
    Tweet(String),
    Url(String),
}

/// An ingested source that can seed a new post.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SourceItem {
    pub id: String,
    pub source_type: String,
    pub source_identifier: Option<String>,
    pub title: Option<String>,
    pub content: Option<String>,
    pub url: Option<String>,
    pub created_at: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SourcePage {
    pub items: Vec<SourceItem>,
    pub total: u64,
    pub page: u64,
    pub size: u64,
}

/// Parameters of `GET /sources`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceQuery {
    pub source_type: Option<String>,
    pub source_identifier: Option<String>,
    pub skip: u32,
    pub limit: u32,
}

impl Default for SourceQuery {
    fn default() -> Self {
        Self {
            source_type: None,
            source_identifier: None,
            skip: 0,
            limit: 20,
        }
    }
}

impl SourceQuery {
    pub fn to_query_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = Vec::new();
        if let Some(source_type) = &self.source_type {
            pairs.push(("type".to_string(), source_type.clone()));
        }
        if let Some(identifier) = &self.source_identifier {
            pairs.push(("source_identifier".to_string(), identifier.clone()));
        }
        pairs.push(("skip".to_string(), self.skip.to_string()));
        pairs.push(("limit".to_string(), self.limit.to_string()));
        pairs
    }
}

/// Link preview metadata.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LinkPreview {
    pub title: Option<String>,
    pub description: Option<String>,
    pub image: Option<String>,
    pub force_title: Option<String>,
    pub absolute_image: Option<String>,
    pub url: Option<String>,
}

/// Accept only absolute http(s) URLs with a host.
pub fn validate_source_url(raw: &str) -> Result<Url, ImportError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(ImportError::InvalidUrl("URL is required".to_string()));
    }

    let parsed =
        Url::parse(trimmed).map_err(|e| ImportError::InvalidUrl(format!("{}: {}", trimmed, e)))?;
    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(ImportError::InvalidUrl(format!(
            "{}: only http and https links are supported",
            trimmed
        )));
    }
    if parsed.host_str().is_none_or(str::is_empty) {
        return Err(ImportError::InvalidUrl(format!("{}: missing host", trimmed)));
    }
    Ok(parsed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_accepts_https() {
        let url = validate_source_url(" https://example.com/post?id=1 ").unwrap();
        assert_eq!(url.host_str(), Some("example.com"));
    }

    #[test]
    fn test_validate_rejects_bad_input() {
        for raw in ["", "example.com", "ftp://example.com/file", "javascript:alert(1)"] {
            assert!(
                matches!(validate_source_url(raw), Err(ImportError::InvalidUrl(_))),
                "{raw} should be rejected"
            );
        }
    }

    #[test]
    fn test_source_query_pairs() {
        let query = SourceQuery {
            source_type: Some("tweet".into()),
            ..Default::default()
        };
        assert_eq!(
            query.to_query_pairs(),
            vec![
                ("type".to_string(), "tweet".to_string()),
                ("skip".to_string(), "0".to_string()),
                ("limit".to_string(), "20".to_string()),
            ]
        );
    }
}
