//! Query construction and the two-tier retrieval strategy.
//!
//! Three modes sit on top of the [`ArticleSearchClient`]:
//!
//! 1. **Broad**: one relevance search for general technology news.
//! 2. **Top stories**: one top-stories search in the technology classification.
//! 3. **Category**: a relevance search with the category's curated query. When
//!    it yields fewer than [`MIN_PRIMARY_RESULTS`] records, a single top-stories
//!    search keyed on the bare category identifier runs instead, and its
//!    records replace the primary ones.
//!
//! Upstream failures are returned to the caller untouched.

use crate::catalog::{ResolvedCategory, or_query};
use crate::client::{ArticleSearchClient, RelevantQuery, SortBy, TopStoriesQuery};
use crate::error::SearchError;
use crate::models::RawArticle;
use crate::utils::since_date;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, info, instrument};

pub const PAGE_SIZE: u32 = 20;
pub const RECENCY_DAYS: i64 = 30;
/// Primary searches returning fewer records than this trigger the fallback.
pub const MIN_PRIMARY_RESULTS: usize = 5;
pub const LANGUAGE: &str = "en";
pub const REGION: &str = "us";
pub const CLASSIFICATION: &str = "technology";

/// Terms of the unscoped relevance search.
const BROAD_TERMS: &[&str] = &[
    "technology",
    "tech industry",
    "software",
    "startups",
    "gadgets",
    "artificial intelligence",
];

/// What to retrieve.
#[derive(Debug, Clone, Copy)]
pub enum RetrievalMode<'a> {
    Broad,
    TopStories,
    Category(&'a ResolvedCategory),
}

/// Which search produced the records.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RetrievalPath {
    Broad,
    TopStories,
    Primary,
    Fallback,
}

impl fmt::Display for RetrievalPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RetrievalPath::Broad => "broad",
            RetrievalPath::TopStories => "top_stories",
            RetrievalPath::Primary => "primary",
            RetrievalPath::Fallback => "fallback",
        };
        f.write_str(name)
    }
}

/// Raw records plus the search they came from.
#[derive(Debug)]
pub struct Retrieved {
    pub records: Vec<RawArticle>,
    pub path: RetrievalPath,
}

/// Runs searches against a shared [`ArticleSearchClient`].
#[derive(Clone)]
pub struct RetrievalStrategy {
    client: Arc<dyn ArticleSearchClient>,
}

impl fmt::Debug for RetrievalStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RetrievalStrategy").finish_non_exhaustive()
    }
}

fn relevant(query: String) -> RelevantQuery {
    RelevantQuery {
        query,
        language: LANGUAGE.to_string(),
        sort_by: SortBy::Relevancy,
        since: since_date(RECENCY_DAYS),
        page_size: PAGE_SIZE,
    }
}

fn top_stories(keyword: &str) -> TopStoriesQuery {
    TopStoriesQuery {
        query: keyword.to_string(),
        classification: CLASSIFICATION.to_string(),
        language: LANGUAGE.to_string(),
        region: REGION.to_string(),
        page_size: PAGE_SIZE,
    }
}

impl RetrievalStrategy {
    pub fn new(client: Arc<dyn ArticleSearchClient>) -> Self {
        Self { client }
    }

    /// Run the searches for `mode`.
    pub async fn retrieve(&self, mode: RetrievalMode<'_>) -> Result<Retrieved, SearchError> {
        match mode {
            RetrievalMode::Broad => {
                let records = self.client.search_relevant(&relevant(or_query(BROAD_TERMS))).await?;
                Ok(Retrieved {
                    records,
                    path: RetrievalPath::Broad,
                })
            }
            RetrievalMode::TopStories => {
                let records = self.client.search_top_stories(&top_stories("")).await?;
                Ok(Retrieved {
                    records,
                    path: RetrievalPath::TopStories,
                })
            }
            RetrievalMode::Category(category) => self.retrieve_category(category).await,
        }
    }

    #[instrument(level = "info", skip_all, fields(category = %category.id))]
    async fn retrieve_category(
        &self,
        category: &ResolvedCategory,
    ) -> Result<Retrieved, SearchError> {
        let primary = self
            .client
            .search_relevant(&relevant(category.query.clone()))
            .await?;

        if primary.len() >= MIN_PRIMARY_RESULTS {
            debug!(count = primary.len(), "Primary search sufficient");
            return Ok(Retrieved {
                records: primary,
                path: RetrievalPath::Primary,
            });
        }

        info!(
            primary_count = primary.len(),
            threshold = MIN_PRIMARY_RESULTS,
            "Primary search too thin; falling back to top stories"
        );
        let records = self
            .client
            .search_top_stories(&top_stories(&category.id))
            .await?;
        Ok(Retrieved {
            records,
            path: RetrievalPath::Fallback,
        })
    }
}
