//! Data models for provider records and the articles this service emits.
//!
//! This module defines the core data structures used throughout the application:
//! - [`RawArticle`]: A record as returned by the search provider, every field optional
//! - [`RawSource`]: The nested publisher object inside a raw record
//! - [`SearchResponse`]: The provider's JSON envelope around a page of records
//! - [`NormalizedArticle`]: The stable shape served to callers
//!
//! Raw records use the provider's camelCase keys (`urlToImage`, `publishedAt`),
//! hence the `rename_all` attributes.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

/// The publisher object nested inside a raw record.
///
/// Either level may be missing: a record can carry no `source` at all, or a
/// `source` with no `name`.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
pub struct RawSource {
    /// Provider-side identifier of the publisher, often null.
    #[serde(default)]
    pub id: Option<String>,
    /// Human readable publisher name.
    #[serde(default)]
    pub name: Option<String>,
}

/// An article record as supplied by the search provider.
///
/// The shape is not under our control, so nothing is assumed present.
/// A record is only usable once it has passed through
/// [`crate::normalize::normalize`].
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RawArticle {
    #[serde(default)]
    pub source: Option<RawSource>,
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub url_to_image: Option<String>,
    /// ISO-8601 timestamp, kept exactly as the provider wrote it.
    #[serde(default)]
    pub published_at: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
    /// Some providers tag records with their own category. Never copied to output.
    #[serde(default)]
    pub category: Option<String>,
}

/// The provider's response envelope.
///
/// A successful page looks like
/// `{"status": "ok", "totalResults": 42, "articles": [...]}`; a refusal looks like
/// `{"status": "error", "code": "apiKeyInvalid", "message": "..."}`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResponse {
    pub status: String,
    #[serde(default)]
    pub total_results: Option<u64>,
    /// Records are decoded one at a time by [`SearchResponse::into_records`],
    /// so a single malformed record cannot sink the page. `null` means none.
    #[serde(default)]
    pub articles: Option<Vec<Value>>,
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

impl SearchResponse {
    /// Decode each record of the page, skipping the ones that do not fit
    /// [`RawArticle`] (wrong-typed fields, non-object entries).
    ///
    /// # Returns
    ///
    /// The decodable records in provider order. An absent or `null`
    /// `articles` array yields an empty list.
    pub fn into_records(self) -> Vec<RawArticle> {
        self.articles
            .unwrap_or_default()
            .into_iter()
            .enumerate()
            .filter_map(|(index, value)| match serde_json::from_value::<RawArticle>(value) {
                Ok(record) => Some(record),
                Err(e) => {
                    debug!(index, error = %e, "Dropped undecodable record");
                    None
                }
            })
            .collect()
    }
}

/// An article in the canonical output shape.
///
/// `title` and `url` are always non-empty and `id` always equals `url`.
/// `category` is the display label of the feed that produced the article,
/// assigned by the pipeline.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
pub struct NormalizedArticle {
    /// Publisher name, or `"Unknown Source"`.
    pub source: String,
    /// Byline, or `"Unknown Author"`.
    pub authors: String,
    pub title: String,
    /// Provider description, or `"No description available"`.
    pub summary: String,
    /// Identity key; same value as `url`.
    pub id: String,
    pub url: String,
    /// Image URL, empty when the provider has none.
    pub image: String,
    /// Publication timestamp as supplied upstream, empty when unknown.
    pub date: String,
    /// Article body excerpt, or `"No content available"`.
    pub body: String,
    pub category: String,
}
