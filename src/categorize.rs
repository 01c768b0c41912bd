//! Keyword-based topic classification.
//!
//! A title is matched against an ordered table of keyword sets. The first
//! category with a keyword occurring anywhere in the title (ignoring case)
//! wins, so overlapping keywords always resolve the same way.

use crate::models::{Article, Category};

/// Keyword sets in precedence order. `General` has no keywords and is only
/// reached when nothing above it matches.
const CATEGORY_KEYWORDS: &[(Category, &[&str])] = &[
    (
        Category::Politics,
        &["government", "election", "political", "policy", "DMK", "ADMK", "BJP", "TVK"],
    ),
    (
        Category::Sports,
        &["football", "basketball", "sports", "cricket", "player", "team", "out", "goal"],
    ),
    (
        Category::Health,
        &["health", "virus", "pandemic", "covid", "medicine", "infection"],
    ),
    (
        Category::Technology,
        &["technology", "tech", "AI", "innovation", "software", "tesla", "hardware"],
    ),
    (Category::General, &[]),
];

/// Derive the topic label for an article from its title.
///
/// # Arguments
///
/// * `article` - The article to classify; only its title is read
///
/// # Returns
///
/// The first [`Category`] whose keywords match, or [`Category::General`].
pub fn classify(article: &Article) -> Category {
    classify_title(&article.title)
}

/// Classify a bare title string.
pub fn classify_title(title: &str) -> Category {
    let title = title.to_lowercase();
    CATEGORY_KEYWORDS
        .iter()
        .find(|(_, keywords)| {
            keywords
                .iter()
                .any(|keyword| title.contains(&keyword.to_lowercase()))
        })
        .map(|(category, _)| *category)
        .unwrap_or(Category::General)
}
