//! Recency and preference filtering of the combined corpus.
//!
//! An article survives when it is at most seven days old (or undated) and its
//! derived category is one the operator asked for. Survivors keep their input
//! order and duplicates are not collapsed.

use crate::categorize::classify;
use crate::models::Article;
use chrono::{DateTime, Duration, Utc};
use std::collections::BTreeSet;
use tracing::{debug, info, instrument};

/// Maximum age of a dated article. Exactly this old is still kept.
pub const MAX_AGE_DAYS: i64 = 7;

/// The operator's chosen category labels, trimmed and lowercased.
///
/// Labels are not validated against the known categories; an unknown label
/// simply never matches.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Preferences {
    labels: BTreeSet<String>,
}

impl Preferences {
    /// Parse a comma-separated line of labels as typed by the operator.
    pub fn parse(line: &str) -> Self {
        line.split(',').collect()
    }

    /// Whether `label` is one of the preferred labels, ignoring case and
    /// surrounding whitespace.
    pub fn contains(&self, label: &str) -> bool {
        self.labels.contains(&normalize(label))
    }

    /// Preferred labels in sorted order, blanks excluded.
    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.labels
            .iter()
            .map(String::as_str)
            .filter(|l| !l.is_empty())
    }
}

impl<S: AsRef<str>> FromIterator<S> for Preferences {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            labels: iter.into_iter().map(|l| normalize(l.as_ref())).collect(),
        }
    }
}

fn normalize(label: &str) -> String {
    label.trim().to_lowercase()
}

/// Keep the articles that are recent enough and match a preferred category.
///
/// # Arguments
///
/// * `articles` - The combined corpus, in source order
/// * `preferences` - Labels the operator asked for
/// * `now` - Reference time for the recency check
///
/// # Returns
///
/// The surviving articles in their original order.
#[instrument(level = "info", skip_all, fields(total = articles.len()))]
pub fn select(
    articles: Vec<Article>,
    preferences: &Preferences,
    now: DateTime<Utc>,
) -> Vec<Article> {
    let selected: Vec<Article> = articles
        .into_iter()
        .filter(|article| is_recent(article, now))
        .filter(|article| preferences.contains(classify(article).as_str()))
        .collect();

    info!(selected = selected.len(), "Filtered corpus");
    selected
}

/// Whether an article is undated or no older than [`MAX_AGE_DAYS`].
pub fn is_recent(article: &Article, now: DateTime<Utc>) -> bool {
    match article.publish_date {
        None => true,
        Some(published) => {
            let age = now.signed_duration_since(published.with_timezone(&Utc));
            let recent = age <= Duration::days(MAX_AGE_DAYS);
            if !recent {
                debug!(
                    title = %article.title,
                    age_hours = age.num_hours(),
                    "Dropping stale article"
                );
            }
            recent
        }
    }
}
