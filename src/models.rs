//! Data models for scraped articles and their topic labels.
//!
//! This module defines the core data structures used throughout the application:
//! - [`Article`]: One headline extracted from a source's front page
//! - [`Category`]: The topic label derived from an article's title
//!
//! Categories are never stored on an [`Article`]. They are derived on demand by
//! [`crate::categorize::classify`] whenever the filter or a presenter needs one.

use chrono::{DateTime, FixedOffset};
use serde::Serialize;
use std::fmt;

/// A single news item extracted from a source page.
///
/// Only the extractor constructs these, and it never builds one without a
/// title and an absolute link.
///
/// # Fields
///
/// * `title` - The headline text, never empty
/// * `link` - Absolute URL of the story
/// * `summary` - Teaser paragraph, if the page had one
/// * `publish_date` - Machine-readable publication time, if the page had one
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Article {
    /// The headline text.
    pub title: String,
    /// Absolute URL of the story, already resolved against the source URL.
    pub link: String,
    /// The first paragraph inside the article container.
    pub summary: Option<String>,
    /// Publication time with the offset the page declared.
    pub publish_date: Option<DateTime<FixedOffset>>,
}

/// Topic label assigned to an article by keyword matching.
///
/// The declaration order matches the precedence used by the categorizer,
/// with [`Category::General`] as the fallback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Politics,
    Sports,
    Health,
    Technology,
    General,
}

impl Category {
    /// Every label, in precedence order.
    pub const ALL: [Category; 5] = [
        Category::Politics,
        Category::Sports,
        Category::Health,
        Category::Technology,
        Category::General,
    ];

    /// The lowercase label operators type when choosing preferences.
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Politics => "politics",
            Category::Sports => "sports",
            Category::Health => "health",
            Category::Technology => "technology",
            Category::General => "general",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
