//! JSON rendering of the personalized digest.
//!
//! Produces the same items as the text report, with each article's derived
//! category attached, for consumption by other tools.
//!
//! # Output Shape
//!
//! ```text
//! {
//!   "generated_at": "2025-05-20T12:00:00Z",
//!   "preferences": ["sports"],
//!   "count": 1,
//!   "items": [
//!     { "category": "sports", "title": "...", "link": "...",
//!       "summary": null, "publish_date": "2025-05-19T08:00:00+05:30" }
//!   ]
//! }
//! ```

use crate::categorize::classify;
use crate::filter::Preferences;
use crate::models::{Article, Category};
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Serialized form of one run's results.
#[derive(Debug, Serialize)]
pub struct Digest<'a> {
    /// When the digest was filtered.
    pub generated_at: DateTime<Utc>,
    /// The labels the operator asked for.
    pub preferences: Vec<&'a str>,
    /// Number of items.
    pub count: usize,
    /// The selected articles.
    pub items: Vec<DigestItem<'a>>,
}

/// An article paired with its derived category.
#[derive(Debug, Serialize)]
pub struct DigestItem<'a> {
    pub category: Category,
    #[serde(flatten)]
    pub article: &'a Article,
}

/// Render articles as a pretty-printed JSON [`Digest`].
///
/// # Errors
///
/// Returns the `serde_json` error if serialization fails.
pub fn render(
    articles: &[Article],
    preferences: &Preferences,
    generated_at: DateTime<Utc>,
) -> Result<String, serde_json::Error> {
    let digest = Digest {
        generated_at,
        preferences: preferences.labels().collect(),
        count: articles.len(),
        items: articles
            .iter()
            .map(|article| DigestItem {
                category: classify(article),
                article,
            })
            .collect(),
    };
    serde_json::to_string_pretty(&digest)
}
