//! NewsAPI v2 implementation of [`ArticleSearchClient`].
//!
//! Both query modes are plain `GET` requests authenticated with the
//! `X-Api-Key` header. The HTTP client carries a request timeout so a
//! stalled upstream cannot hold a caller indefinitely.
//!
//! # Error mapping
//!
//! - Non-2xx with a provider envelope → [`SearchError::Provider`]
//! - Non-2xx without one → [`SearchError::Status`] (body truncated)
//! - 2xx with `status: "error"` → [`SearchError::Provider`]
//! - Body that is not an envelope → [`SearchError::Decode`]
//! - Client-side timeout → [`SearchError::Timeout`]

use super::{ArticleSearchClient, RelevantQuery, TopStoriesQuery};
use crate::error::SearchError;
use crate::models::{RawArticle, SearchResponse};
use crate::utils::truncate_for_log;
use async_trait::async_trait;
use std::fmt;
use std::time::{Duration, Instant};
use tracing::{debug, instrument, warn};
use url::Url;

const EVERYTHING_PATH: &str = "/v2/everything";
const TOP_HEADLINES_PATH: &str = "/v2/top-headlines";

/// HTTP client for the NewsAPI service.
pub struct NewsApiClient {
    http: reqwest::Client,
    api_key: String,
    base_url: Url,
    timeout: Duration,
}

impl fmt::Debug for NewsApiClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NewsApiClient")
            .field("base_url", &self.base_url.as_str())
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl NewsApiClient {
    /// Build a client for `base_url` (scheme and host; any path is ignored).
    pub fn new(api_key: String, base_url: Url, timeout: Duration) -> Result<Self, SearchError> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("tech_news_feed/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            http,
            api_key,
            base_url,
            timeout,
        })
    }

    fn classify(&self, e: reqwest::Error) -> SearchError {
        if e.is_timeout() {
            SearchError::Timeout(self.timeout.as_secs())
        } else {
            SearchError::Transport(e)
        }
    }

    async fn get_articles(
        &self,
        path: &str,
        params: &[(&str, String)],
    ) -> Result<Vec<RawArticle>, SearchError> {
        let url = self
            .base_url
            .join(path)
            .map_err(|e| SearchError::Decode(format!("bad endpoint {path}: {e}")))?;

        let t0 = Instant::now();
        let response = self
            .http
            .get(url)
            .header("X-Api-Key", &self.api_key)
            .query(params)
            .send()
            .await
            .map_err(|e| self.classify(e))?;

        let status = response.status();
        let body = response.text().await.map_err(|e| self.classify(e))?;
        let elapsed_ms = t0.elapsed().as_millis();
        let envelope = serde_json::from_str::<SearchResponse>(&body);

        if !status.is_success() {
            warn!(status = status.as_u16(), elapsed_ms, "Provider returned an error status");
            return Err(match envelope {
                Ok(SearchResponse {
                    code: Some(code),
                    message,
                    ..
                }) => SearchError::Provider {
                    status: status.as_u16(),
                    code,
                    message: message.unwrap_or_default(),
                },
                _ => SearchError::Status {
                    status: status.as_u16(),
                    body: truncate_for_log(&body, 300),
                },
            });
        }

        let envelope = envelope.map_err(|e| SearchError::Decode(e.to_string()))?;
        if envelope.status != "ok" {
            return Err(SearchError::Provider {
                status: status.as_u16(),
                code: envelope.code.unwrap_or_else(|| "unknown".to_string()),
                message: envelope.message.unwrap_or_default(),
            });
        }

        let total_results = envelope.total_results;
        let records = envelope.into_records();
        debug!(
            count = records.len(),
            total_results = ?total_results,
            elapsed_ms,
            "Provider page received"
        );
        Ok(records)
    }
}

#[async_trait]
impl ArticleSearchClient for NewsApiClient {
    #[instrument(level = "debug", skip_all, fields(page_size = params.page_size))]
    async fn search_relevant(
        &self,
        params: &RelevantQuery,
    ) -> Result<Vec<RawArticle>, SearchError> {
        let query = [
            ("q", params.query.clone()),
            ("language", params.language.clone()),
            ("sortBy", params.sort_by.as_str().to_string()),
            ("from", params.since.format("%Y-%m-%d").to_string()),
            ("pageSize", params.page_size.to_string()),
        ];
        self.get_articles(EVERYTHING_PATH, &query).await
    }

    #[instrument(level = "debug", skip_all, fields(classification = %params.classification))]
    async fn search_top_stories(
        &self,
        params: &TopStoriesQuery,
    ) -> Result<Vec<RawArticle>, SearchError> {
        let mut query = Vec::with_capacity(5);
        if !params.query.is_empty() {
            query.push(("q", params.query.clone()));
        }
        query.push(("category", params.classification.clone()));
        query.push(("language", params.language.clone()));
        query.push(("country", params.region.clone()));
        query.push(("pageSize", params.page_size.to_string()));
        self.get_articles(TOP_HEADLINES_PATH, &query).await
    }
}
