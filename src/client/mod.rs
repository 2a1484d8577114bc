//! The article search capability consumed by the retrieval layer.
//!
//! [`ArticleSearchClient`] has two query modes:
//!
//! | Mode | Method | Provider endpoint |
//! |------|--------|-------------------|
//! | Broad relevance over a recency window | [`ArticleSearchClient::search_relevant`] | `/v2/everything` |
//! | Current top stories in a classification | [`ArticleSearchClient::search_top_stories`] | `/v2/top-headlines` |
//!
//! The process builds one client at start-up and shares it behind an `Arc`;
//! implementations must be safe for concurrent use.

use crate::error::SearchError;
use crate::models::RawArticle;
use async_trait::async_trait;
use chrono::NaiveDate;

pub mod newsapi;

#[cfg(test)]
pub mod mock;

/// Result ordering for relevance searches. Only relevance ranking is used.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortBy {
    Relevancy,
}

impl SortBy {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortBy::Relevancy => "relevancy",
        }
    }
}

/// Parameters of a broad relevance search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelevantQuery {
    pub query: String,
    pub language: String,
    pub sort_by: SortBy,
    /// Oldest publication date to include.
    pub since: NaiveDate,
    pub page_size: u32,
}

/// Parameters of a top-stories search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TopStoriesQuery {
    /// Keyword filter; empty means no keyword.
    pub query: String,
    /// Provider classification, e.g. `technology`.
    pub classification: String,
    pub language: String,
    /// Two-letter country code.
    pub region: String,
    pub page_size: u32,
}

/// A search provider returning raw article records.
#[async_trait]
pub trait ArticleSearchClient: Send + Sync {
    /// Relevance-ranked search over recent articles.
    async fn search_relevant(&self, params: &RelevantQuery)
    -> Result<Vec<RawArticle>, SearchError>;

    /// Current top stories within a classification.
    async fn search_top_stories(
        &self,
        params: &TopStoriesQuery,
    ) -> Result<Vec<RawArticle>, SearchError>;
}
