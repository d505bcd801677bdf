//! HTTP client for the content service.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use url::Url;

use draftdeck_core::domain::{
    LinkPreview, Post, PostQuery, PostType, SourcePage, SourceQuery, SourceRef,
};
use draftdeck_core::error::ApiError;
use draftdeck_core::ports::{BlogApi, LinkPreviewApi, PostPatch, PostUpdate, SourceApi};
use draftdeck_shared::dto::{BlogEnvelope, BlogRecord, SourcesResponse};
use draftdeck_shared::{ErrorBody, LinkPreviewEnvelope};

use crate::convert;

/// Content service connection configuration.
#[derive(Debug, Clone)]
pub struct HttpApiConfig {
    /// Base URL of the service (e.g., http://127.0.0.1:8000)
    pub base_url: String,
    /// Per-request timeout
    pub timeout: Duration,
}

impl Default for HttpApiConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:8000".to_string(),
            timeout: Duration::from_secs(30),
        }
    }
}

impl HttpApiConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            base_url: std::env::var("API_BASE_URL").unwrap_or(defaults.base_url),
            timeout: std::env::var("API_TIMEOUT_SECS")
                .ok()
                .and_then(|s| s.parse().ok())
                .map(Duration::from_secs)
                .unwrap_or(defaults.timeout),
        }
    }
}

/// reqwest-backed implementation of the content service ports.
///
/// Every call is a single attempt; retrying is left to the user.
pub struct HttpBlogApi {
    client: Client,
    base: Url,
}

impl HttpBlogApi {
    pub fn new(config: &HttpApiConfig) -> Result<Self, ApiError> {
        let base = Url::parse(&config.base_url)
            .map_err(|e| ApiError::InvalidUrl(format!("{}: {}", config.base_url, e)))?;
        if base.cannot_be_a_base() {
            return Err(ApiError::InvalidUrl(config.base_url.clone()));
        }

        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| ApiError::Network(e.to_string()))?;

        tracing::info!(base_url = %base, "Content service client ready");
        Ok(Self { client, base })
    }

    /// Base URL extended with `segments`, each percent-encoded.
    fn url_for(&self, segments: &[&str]) -> Url {
        let mut url = self.base.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    fn url_with_query(&self, segments: &[&str], pairs: &[(String, String)]) -> Url {
        let mut url = self.url_for(segments);
        if !pairs.is_empty() {
            url.query_pairs_mut().extend_pairs(pairs);
        }
        url
    }

    pub(crate) fn posts_url(&self, query: &PostQuery) -> Url {
        self.url_with_query(&["blogs", "details"], &query.to_query_pairs())
    }

    pub(crate) fn sources_url(&self, query: &SourceQuery) -> Url {
        self.url_with_query(&["sources"], &query.to_query_pairs())
    }

    pub(crate) fn preview_url(&self, target: &str) -> Url {
        self.url_with_query(
            &["api", "link-preview"],
            &[("url".to_string(), target.to_string())],
        )
    }

    async fn send_json<T: DeserializeOwned>(request: RequestBuilder) -> Result<T, ApiError> {
        let response = request
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let detail = serde_json::from_str::<ErrorBody>(&body)
                .ok()
                .and_then(|b| b.message())
                .or_else(|| status.canonical_reason().map(str::to_string))
                .unwrap_or_default();
            return Err(ApiError::Status {
                status: status.as_u16(),
                detail,
            });
        }

        response
            .json::<T>()
            .await
            .map_err(|e| ApiError::Decode(e.to_string()))
    }
}

#[async_trait]
impl BlogApi for HttpBlogApi {
    async fn fetch_posts(&self, query: &PostQuery) -> Result<Vec<Post>, ApiError> {
        let url = self.posts_url(query);
        tracing::debug!(%url, "GET blogs");

        let envelopes: Vec<BlogEnvelope> = Self::send_json(self.client.get(url)).await?;
        Ok(envelopes
            .into_iter()
            .map(convert::post_from_envelope)
            .collect())
    }

    async fn update_post(&self, id: &str, update: &PostUpdate) -> Result<PostPatch, ApiError> {
        let url = self.url_for(&["blogs", id]);
        tracing::debug!(%url, status = %update.status, "PUT blog");

        let body = convert::update_request(update);
        let record: BlogRecord = Self::send_json(self.client.put(url).json(&body)).await?;
        Ok(convert::patch_from_record(record))
    }
}

#[async_trait]
impl SourceApi for HttpBlogApi {
    async fn list_sources(&self, query: &SourceQuery) -> Result<SourcePage, ApiError> {
        let url = self.sources_url(query);
        tracing::debug!(%url, "GET sources");

        let response: SourcesResponse = Self::send_json(self.client.get(url)).await?;
        Ok(convert::source_page(response))
    }

    async fn generate_content(
        &self,
        post_types: &[PostType],
        source: &SourceRef,
    ) -> Result<(), ApiError> {
        let url = self.url_for(&["content", "generate"]);
        let body = convert::generate_request(post_types, source);

        // The response body is informational only.
        let _: serde_json::Value = Self::send_json(self.client.post(url).json(&body)).await?;
        Ok(())
    }
}

#[async_trait]
impl LinkPreviewApi for HttpBlogApi {
    async fn link_preview(&self, url: &str) -> Result<LinkPreview, ApiError> {
        let endpoint = self.preview_url(url);
        let envelope: LinkPreviewEnvelope = Self::send_json(self.client.get(endpoint)).await?;
        Ok(convert::link_preview(envelope.data))
    }
}
