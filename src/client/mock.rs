//! Scripted [`ArticleSearchClient`] for tests.

use super::{ArticleSearchClient, RelevantQuery, TopStoriesQuery};
use crate::error::SearchError;
use crate::models::RawArticle;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Canned answer for one query mode. `Err` carries the body of a simulated 503.
pub type Scripted = Result<Vec<RawArticle>, String>;

#[derive(Debug)]
pub struct MockSearchClient {
    relevant: Scripted,
    top_stories: Scripted,
    /// Relevance answers keyed on the exact query text, checked first.
    relevant_by_query: HashMap<String, Scripted>,
    pub relevant_calls: AtomicUsize,
    pub top_stories_calls: AtomicUsize,
    pub last_relevant: Mutex<Option<RelevantQuery>>,
    pub last_top_stories: Mutex<Option<TopStoriesQuery>>,
}

impl MockSearchClient {
    pub fn new(relevant: Scripted, top_stories: Scripted) -> Self {
        Self {
            relevant,
            top_stories,
            relevant_by_query: HashMap::new(),
            relevant_calls: AtomicUsize::new(0),
            top_stories_calls: AtomicUsize::new(0),
            last_relevant: Mutex::new(None),
            last_top_stories: Mutex::new(None),
        }
    }

    /// Both modes fail.
    pub fn failing() -> Self {
        Self::new(Err("down".to_string()), Err("down".to_string()))
    }

    /// Answer relevance searches for exactly `query` with `script`.
    pub fn with_relevant_for(mut self, query: &str, script: Scripted) -> Self {
        self.relevant_by_query.insert(query.to_string(), script);
        self
    }

    pub fn relevant_calls(&self) -> usize {
        self.relevant_calls.load(Ordering::SeqCst)
    }

    pub fn top_stories_calls(&self) -> usize {
        self.top_stories_calls.load(Ordering::SeqCst)
    }

    fn answer(script: &Scripted) -> Result<Vec<RawArticle>, SearchError> {
        script.clone().map_err(|body| SearchError::Status { status: 503, body })
    }
}

#[async_trait]
impl ArticleSearchClient for MockSearchClient {
    async fn search_relevant(
        &self,
        params: &RelevantQuery,
    ) -> Result<Vec<RawArticle>, SearchError> {
        self.relevant_calls.fetch_add(1, Ordering::SeqCst);
        *self.last_relevant.lock().unwrap() = Some(params.clone());
        let script = self
            .relevant_by_query
            .get(&params.query)
            .unwrap_or(&self.relevant);
        Self::answer(script)
    }

    async fn search_top_stories(
        &self,
        params: &TopStoriesQuery,
    ) -> Result<Vec<RawArticle>, SearchError> {
        self.top_stories_calls.fetch_add(1, Ordering::SeqCst);
        *self.last_top_stories.lock().unwrap() = Some(params.clone());
        Self::answer(&self.top_stories)
    }
}

/// A valid raw record with the given title.
pub fn record(title: &str) -> RawArticle {
    RawArticle {
        title: Some(title.to_string()),
        url: Some(format!("https://news.example.com/{}", title.replace(' ', "-"))),
        ..Default::default()
    }
}

/// `n` valid raw records titled `{prefix}-0..n`.
pub fn records(prefix: &str, n: usize) -> Vec<RawArticle> {
    (0..n).map(|i| record(&format!("{prefix}-{i}"))).collect()
}
