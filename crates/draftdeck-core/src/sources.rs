//! Source import - listing ingested sources and triggering generation.

use std::sync::Arc;
use std::time::Duration;

use crate::domain::{PostType, SourcePage, SourceQuery, SourceRef, validate_source_url};
use crate::error::ImportError;
use crate::ports::SourceApi;
use crate::store::PostStore;

/// Default wait between a generation request and the post list refresh.
pub const DEFAULT_REFRESH_DELAY: Duration = Duration::from_secs(5);

pub struct SourceImporter {
    api: Arc<dyn SourceApi>,
    store: Arc<PostStore>,
    refresh_delay: Duration,
}

impl SourceImporter {
    pub fn new(api: Arc<dyn SourceApi>, store: Arc<PostStore>, refresh_delay: Duration) -> Self {
        Self {
            api,
            store,
            refresh_delay,
        }
    }

    pub async fn list_sources(&self, query: &SourceQuery) -> Result<SourcePage, ImportError> {
        Ok(self.api.list_sources(query).await?)
    }

    pub async fn generate_from_tweet(
        &self,
        tweet_id: &str,
        post_types: &[PostType],
    ) -> Result<(), ImportError> {
        let tweet_id = tweet_id.trim();
        if tweet_id.is_empty() {
            return Err(ImportError::Validation("tweet id is required".to_string()));
        }
        if !tweet_id.bytes().all(|b| b.is_ascii_digit()) {
            return Err(ImportError::Validation(format!(
                "{tweet_id}: tweet ids are numeric"
            )));
        }
        self.generate(post_types, SourceRef::Tweet(tweet_id.to_string()))
            .await
    }

    /// Generate from a custom web source. The URL is validated locally first.
    pub async fn generate_from_url(
        &self,
        url: &str,
        post_types: &[PostType],
    ) -> Result<(), ImportError> {
        let url = validate_source_url(url)?;
        self.generate(post_types, SourceRef::Url(url.to_string()))
            .await
    }

    async fn generate(
        &self,
        post_types: &[PostType],
        source: SourceRef,
    ) -> Result<(), ImportError> {
        if post_types.is_empty() {
            return Err(ImportError::Validation(
                "select at least one post type".to_string(),
            ));
        }

        tracing::info!(?source, ?post_types, "Requesting content generation");
        self.api.generate_content(post_types, &source).await?;

        // Generation completes server-side; pick up the results after a delay.
        tokio::time::sleep(self.refresh_delay).await;
        self.store.refresh().await;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::StoreConfig;
    use crate::domain::SourceItem;
    use crate::test_support::{FakeBlogApi, post};

    fn importer(api: &Arc<FakeBlogApi>) -> (SourceImporter, Arc<PostStore>) {
        let store = Arc::new(PostStore::new(api.clone(), StoreConfig::default()));
        (
            SourceImporter::new(api.clone(), store.clone(), Duration::ZERO),
            store,
        )
    }

    #[tokio::test]
    async fn test_generate_from_tweet_refreshes_posts() {
        let api = Arc::new(FakeBlogApi::default());
        api.push_fetch(Ok(vec![post("generated", "text")]));
        let (importer, store) = importer(&api);

        importer
            .generate_from_tweet("12345", &[PostType::Blog, PostType::Twitter])
            .await
            .unwrap();

        let generations = api.generations();
        assert_eq!(generations.len(), 1);
        assert_eq!(generations[0].0, vec![PostType::Blog, PostType::Twitter]);
        assert_eq!(generations[0].1, SourceRef::Tweet("12345".into()));
        assert_eq!(store.posts().await.len(), 1);
    }

    #[tokio::test]
    async fn test_invalid_url_sends_nothing() {
        let api = Arc::new(FakeBlogApi::default());
        let (importer, _) = importer(&api);

        let result = importer
            .generate_from_url("www.example.com", &[PostType::Blog])
            .await;

        assert!(matches!(result, Err(ImportError::InvalidUrl(_))));
        assert!(api.generations().is_empty());
        assert!(api.fetch_queries().is_empty());
    }

    #[tokio::test]
    async fn test_non_numeric_tweet_id_sends_nothing() {
        let api = Arc::new(FakeBlogApi::default());
        let (importer, _) = importer(&api);

        let result = importer
            .generate_from_tweet("www.example.com/post", &[PostType::Blog])
            .await;

        assert!(matches!(result, Err(ImportError::Validation(_))));
        assert!(api.generations().is_empty());
        assert!(api.fetch_queries().is_empty());
    }

    #[tokio::test]
    async fn test_empty_post_types_rejected() {
        let api = Arc::new(FakeBlogApi::default());
        let (importer, _) = importer(&api);

        let result = importer
            .generate_from_url("https://example.com/article", &[])
            .await;
        assert!(matches!(result, Err(ImportError::Validation(_))));
    }

    #[tokio::test]
    async fn test_list_sources_passes_query() {
        let api = Arc::new(FakeBlogApi::default());
        api.push_sources(Ok(SourcePage {
            items: vec![SourceItem {
                id: "s1".into(),
                source_type: "tweet".into(),
                ..Default::default()
            }],
            total: 1,
            page: 1,
            size: 20,
        }));
        let (importer, _) = importer(&api);

        let query = SourceQuery {
            source_type: Some("tweet".into()),
            source_identifier: Some("rustlang".into()),
            ..Default::default()
        };
        let page = importer.list_sources(&query).await.unwrap();

        assert_eq!(page.items[0].id, "s1");
        assert_eq!(api.source_queries(), vec![query]);
    }
}
