//! Fetch → normalize → label, with failures contained at this boundary.
//!
//! [`AggregationPipeline`] is the only entry point callers use. Every public
//! method returns a plain ordered list: upstream errors are logged with the
//! feed they belong to and degrade to an empty list for that request alone.
//! Internally each run produces a [`FetchOutcome`] so logs can tell "nothing
//! matched" from "the provider failed".

use crate::catalog::{self, DEFAULT_LABEL};
use crate::client::ArticleSearchClient;
use crate::error::SearchError;
use crate::models::NormalizedArticle;
use crate::normalize::normalize_all;
use crate::retrieval::{RetrievalMode, RetrievalStrategy};
use futures::future::join_all;
use std::fmt;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, error, info, instrument};

/// Label of the top-stories feed.
pub const TRENDING_LABEL: &str = "Trending";

/// Which feed a caller asked for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Feed {
    /// General technology news, labelled [`DEFAULT_LABEL`].
    Latest,
    /// Current technology top stories, labelled [`TRENDING_LABEL`].
    Trending,
    /// A catalog category identifier (unknown ids are allowed).
    Category(String),
}

impl fmt::Display for Feed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Feed::Latest => f.write_str("latest"),
            Feed::Trending => f.write_str("trending"),
            Feed::Category(id) => write!(f, "category:{id}"),
        }
    }
}

/// Result of one pipeline run before it is flattened for callers.
#[derive(Debug)]
pub enum FetchOutcome {
    Articles(Vec<NormalizedArticle>),
    /// The provider answered but nothing usable survived normalization.
    NoMatches,
    UpstreamFailed(SearchError),
}

impl FetchOutcome {
    /// The plain list callers see; failures and empty results look the same.
    pub fn into_articles(self) -> Vec<NormalizedArticle> {
        match self {
            FetchOutcome::Articles(articles) => articles,
            FetchOutcome::NoMatches | FetchOutcome::UpstreamFailed(_) => Vec::new(),
        }
    }
}

/// Stateless orchestrator; cheap to clone and safe to share across requests.
#[derive(Debug, Clone)]
pub struct AggregationPipeline {
    retrieval: RetrievalStrategy,
}

impl AggregationPipeline {
    pub fn new(client: Arc<dyn ArticleSearchClient>) -> Self {
        Self {
            retrieval: RetrievalStrategy::new(client),
        }
    }

    /// Articles for a category, or the general feed when `category` is `None`.
    ///
    /// # Arguments
    ///
    /// * `category` - A catalog identifier such as `"iot"`. Unknown
    ///   identifiers are searched verbatim under the `Tech` label.
    ///
    /// # Returns
    ///
    /// The normalized, labelled articles. Upstream failures are logged and
    /// yield an empty list, the same as a search with no matches.
    pub async fn fetch(&self, category: Option<&str>) -> Vec<NormalizedArticle> {
        let feed = match category {
            Some(id) => Feed::Category(id.to_string()),
            None => Feed::Latest,
        };
        self.fetch_feed(&feed).await.into_articles()
    }

    /// Current technology top stories labelled "Trending".
    pub async fn fetch_trending(&self) -> Vec<NormalizedArticle> {
        self.fetch_feed(&Feed::Trending).await.into_articles()
    }

    /// Every catalog category fetched concurrently, keyed by display label.
    ///
    /// A failing category contributes an empty list and does not affect the others.
    pub async fn fetch_all_categories(&self) -> Vec<(&'static str, Vec<NormalizedArticle>)> {
        let runs = catalog::entries().iter().map(|entry| async move {
            let articles = self.fetch(Some(entry.id)).await;
            (entry.label, articles)
        });
        join_all(runs).await
    }

    /// Run one feed and report how it went.
    #[instrument(level = "info", skip_all, fields(feed = %feed))]
    pub async fn fetch_feed(&self, feed: &Feed) -> FetchOutcome {
        let t0 = Instant::now();

        let resolved;
        let (mode, label) = match feed {
            Feed::Latest => (RetrievalMode::Broad, DEFAULT_LABEL.to_string()),
            Feed::Trending => (RetrievalMode::TopStories, TRENDING_LABEL.to_string()),
            Feed::Category(id) => {
                resolved = catalog::resolve(id);
                (RetrievalMode::Category(&resolved), resolved.label.clone())
            }
        };

        let outcome = match self.retrieval.retrieve(mode).await {
            Err(e) => FetchOutcome::UpstreamFailed(e),
            Ok(retrieved) => {
                let raw_count = retrieved.records.len();
                let articles = normalize_all(&retrieved.records, &label);
                let dropped = raw_count - articles.len();
                if dropped > 0 {
                    debug!(dropped, "Dropped records missing title or url");
                }
                info!(
                    path = %retrieved.path,
                    label = %label,
                    raw = raw_count,
                    kept = articles.len(),
                    elapsed_ms = t0.elapsed().as_millis() as u64,
                    "Feed fetched"
                );
                if articles.is_empty() {
                    FetchOutcome::NoMatches
                } else {
                    FetchOutcome::Articles(articles)
                }
            }
        };

        if let FetchOutcome::UpstreamFailed(e) = &outcome {
            error!(
                feed = %feed,
                label = %label,
                quota_exhausted = e.is_quota_exhausted(),
                elapsed_ms = t0.elapsed().as_millis() as u64,
                error = %e,
                "Upstream search failed; returning empty list"
            );
        }
        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::mock::{MockSearchClient, record, records};
    use crate::models::RawArticle;

    fn pipeline(mock: &Arc<MockSearchClient>) -> AggregationPipeline {
        AggregationPipeline::new(mock.clone())
    }

    #[tokio::test]
    async fn test_iot_thin_primary_uses_fallback_records() {
        let mut fallback = records("f", 6);
        fallback.insert(2, RawArticle {
            title: Some("no url".to_string()),
            ..Default::default()
        });
        fallback.push(RawArticle {
            title: Some("also no url".to_string()),
            url: Some(String::new()),
            ..Default::default()
        });
        assert_eq!(fallback.len(), 8);
        let mock = Arc::new(MockSearchClient::new(Ok(records("p", 3)), Ok(fallback)));

        let articles = pipeline(&mock).fetch(Some("iot")).await;

        assert_eq!(articles.len(), 6);
        assert!(articles.iter().all(|a| a.category == "IoT"));
        assert!(articles.iter().all(|a| a.title.starts_with("f-")));
        assert_eq!(mock.top_stories_calls(), 1);
    }

    #[tokio::test]
    async fn test_upstream_failure_degrades_to_empty_list() {
        let mock = Arc::new(MockSearchClient::failing());

        let articles = pipeline(&mock).fetch(Some("blockchain")).await;

        assert!(articles.is_empty());
    }

    #[tokio::test]
    async fn test_outcome_distinguishes_failure_from_no_matches() {
        let failing = Arc::new(MockSearchClient::failing());
        let outcome = pipeline(&failing).fetch_feed(&Feed::Latest).await;
        assert!(matches!(outcome, FetchOutcome::UpstreamFailed(_)));

        let empty = Arc::new(MockSearchClient::new(Ok(vec![RawArticle::default()]), Ok(vec![])));
        let outcome = pipeline(&empty).fetch_feed(&Feed::Latest).await;
        assert!(matches!(outcome, FetchOutcome::NoMatches));
    }

    #[tokio::test]
    async fn test_provider_order_is_preserved() {
        let raws = vec![record("zeta"), record("alpha"), record("mu"), record("beta"), record("pi")];
        let mock = Arc::new(MockSearchClient::new(Ok(raws), Ok(vec![])));

        let articles = pipeline(&mock).fetch(Some("robotics")).await;

        let titles: Vec<_> = articles.iter().map(|a| a.title.as_str()).collect();
        assert_eq!(titles, ["zeta", "alpha", "mu", "beta", "pi"]);
    }

    #[tokio::test]
    async fn test_label_injected_over_provider_category() {
        let mut raws = records("p", 5);
        for raw in &mut raws {
            raw.category = Some("Cybersecurity".to_string());
        }
        let mock = Arc::new(MockSearchClient::new(Ok(raws), Ok(vec![])));

        let articles = pipeline(&mock).fetch(Some("cybersecurity")).await;

        assert_eq!(articles.len(), 5);
        assert!(articles.iter().all(|a| a.category == "Networking"));
    }

    #[tokio::test]
    async fn test_unscoped_feed_is_labelled_tech() {
        let mock = Arc::new(MockSearchClient::new(Ok(records("b", 2)), Ok(vec![])));

        let articles = pipeline(&mock).fetch(None).await;

        assert_eq!(articles.len(), 2);
        assert!(articles.iter().all(|a| a.category == "Tech"));
        assert_eq!(mock.top_stories_calls(), 0);
    }

    #[tokio::test]
    async fn test_unknown_category_uses_raw_query_and_tech_label() {
        let mock = Arc::new(MockSearchClient::new(Ok(records("x", 5)), Ok(vec![])));

        let articles = pipeline(&mock).fetch(Some("foo")).await;

        assert!(articles.iter().all(|a| a.category == "Tech"));
        let params = mock.last_relevant.lock().unwrap().clone().unwrap();
        assert_eq!(params.query, "foo");
    }

    #[tokio::test]
    async fn test_trending_uses_top_stories() {
        let mock = Arc::new(MockSearchClient::new(Ok(vec![]), Ok(records("t", 4))));

        let articles = pipeline(&mock).fetch_trending().await;

        assert_eq!(articles.len(), 4);
        assert!(articles.iter().all(|a| a.category == "Trending"));
        assert_eq!(mock.relevant_calls(), 0);
    }

    #[tokio::test]
    async fn test_fetch_all_categories_covers_catalog() {
        let mock = Arc::new(MockSearchClient::new(Ok(records("p", 5)), Ok(vec![])));

        let results = pipeline(&mock).fetch_all_categories().await;

        assert_eq!(results.len(), catalog::entries().len());
        let (label, articles) = &results[6];
        assert_eq!(*label, "Networking");
        assert!(articles.iter().all(|a| a.category == "Networking"));
        assert_eq!(mock.relevant_calls(), catalog::entries().len());
    }

    #[tokio::test]
    async fn test_fetch_all_categories_isolates_failures() {
        let broken = catalog::resolve("cybersecurity").query;
        let mock = Arc::new(
            MockSearchClient::new(Ok(records("p", 5)), Ok(vec![]))
                .with_relevant_for(&broken, Err("down".to_string())),
        );

        let results = pipeline(&mock).fetch_all_categories().await;

        assert_eq!(results.len(), catalog::entries().len());
        let (empty, filled): (Vec<_>, Vec<_>) =
            results.iter().partition(|(_, articles)| articles.is_empty());
        assert_eq!(empty.len(), 1);
        assert_eq!(empty[0].0, "Networking");
        assert_eq!(filled.len(), catalog::entries().len() - 1);
        assert!(filled.iter().all(|(_, articles)| articles.len() == 5));
        assert_eq!(mock.top_stories_calls(), 0);
    }
}
