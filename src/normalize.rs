//! Conversion of raw provider records into [`NormalizedArticle`]s.
//!
//! Records without a title or URL are dropped. Every other missing field
//! gets a fixed placeholder (or an empty string for image and date). The
//! `category` field is left empty here; the pipeline stamps the display
//! label afterwards.

use crate::models::{NormalizedArticle, RawArticle};

pub const UNKNOWN_SOURCE: &str = "Unknown Source";
pub const UNKNOWN_AUTHOR: &str = "Unknown Author";
pub const NO_DESCRIPTION: &str = "No description available";
pub const NO_CONTENT: &str = "No content available";

/// The field as supplied, unless it is absent or whitespace-only.
fn present(field: &Option<String>) -> Option<&str> {
    field.as_deref().filter(|s| !s.trim().is_empty())
}

fn or_default(field: &Option<String>, default: &str) -> String {
    present(field).unwrap_or(default).to_string()
}

/// Normalize one raw record.
///
/// Values are copied verbatim; whitespace is only considered when deciding
/// whether a field is present at all.
///
/// # Arguments
///
/// * `raw` - A provider record, possibly missing any field.
///
/// # Returns
///
/// `None` when the title or URL is absent or blank. Otherwise the article
/// with placeholders filled in and an empty `category`.
pub fn normalize(raw: &RawArticle) -> Option<NormalizedArticle> {
    let title = present(&raw.title)?;
    let url = present(&raw.url)?;

    let source = raw
        .source
        .as_ref()
        .and_then(|s| present(&s.name))
        .unwrap_or(UNKNOWN_SOURCE)
        .to_string();

    Some(NormalizedArticle {
        source,
        authors: or_default(&raw.author, UNKNOWN_AUTHOR),
        title: title.to_string(),
        summary: or_default(&raw.description, NO_DESCRIPTION),
        id: url.to_string(),
        url: url.to_string(),
        image: or_default(&raw.url_to_image, ""),
        date: or_default(&raw.published_at, ""),
        body: or_default(&raw.content, NO_CONTENT),
        category: String::new(),
    })
}

/// Normalize a page of records in order, stamping `label` on each survivor.
pub fn normalize_all(raws: &[RawArticle], label: &str) -> Vec<NormalizedArticle> {
    raws.iter()
        .filter_map(normalize)
        .map(|mut article| {
            article.category = label.to_string();
            article
        })
        .collect()
}
