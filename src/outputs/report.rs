//! Plain-text rendering of the personalized digest.
//!
//! # Layout
//!
//! ```text
//! Aggregated and Categorized News:
//!
//! Category: sports
//! Title: India wins cricket match
//! Summary: No summary available.
//! Link: https://example.com/world/news1
//! Published: 2025-05-06
//!
//! ```

use crate::categorize::classify;
use crate::models::Article;

pub const HEADING: &str = "Aggregated and Categorized News:";
pub const NO_SUMMARY: &str = "No summary available.";
pub const NO_DATE: &str = "Date not available.";

/// Render articles as one text block each, preceded by a heading.
///
/// The category of each article is derived here; nothing is written back to
/// the articles.
pub fn render(articles: &[Article]) -> String {
    let mut out = format!("{HEADING}\n\n");
    for article in articles {
        let summary = article.summary.as_deref().unwrap_or(NO_SUMMARY);
        let published = article
            .publish_date
            .map(|d| d.format("%Y-%m-%d").to_string())
            .unwrap_or_else(|| NO_DATE.to_string());

        out.push_str(&format!(
            "Category: {}\nTitle: {}\nSummary: {summary}\nLink: {}\nPublished: {published}\n\n",
            classify(article),
            article.title,
            article.link,
        ));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::DateTime;

    #[test]
    fn test_render_full_article() {
        let articles = vec![Article {
            title: "India wins cricket match".to_string(),
            link: "https://example.com/world/news1".to_string(),
            summary: Some("Last-ball finish.".to_string()),
            publish_date: Some(DateTime::parse_from_rfc3339("2025-05-06T23:30:00+05:30").unwrap()),
        }];

        let text = render(&articles);
        assert_eq!(
            text,
            "Aggregated and Categorized News:\n\n\
             Category: sports\n\
             Title: India wins cricket match\n\
             Summary: Last-ball finish.\n\
             Link: https://example.com/world/news1\n\
             Published: 2025-05-06\n\n"
        );
    }

    #[test]
    fn test_render_placeholders() {
        let articles = vec![Article {
            title: "Quiet day".to_string(),
            link: "https://example.com/quiet".to_string(),
            summary: None,
            publish_date: None,
        }];

        let text = render(&articles);
        assert!(text.contains("Category: general\n"));
        assert!(text.contains(&format!("Summary: {NO_SUMMARY}\n")));
        assert!(text.contains(&format!("Published: {NO_DATE}\n")));
    }

    #[test]
    fn test_render_keeps_order() {
        let make = |title: &str| Article {
            title: title.to_string(),
            link: "https://example.com/x".to_string(),
            summary: None,
            publish_date: None,
        };
        let text = render(&[make("First"), make("Second")]);
        let first = text.find("Title: First").unwrap();
        let second = text.find("Title: Second").unwrap();
        assert!(first < second);
    }

    #[test]
    fn test_render_separates_blocks_with_blank_line() {
        let make = |title: &str| Article {
            title: title.to_string(),
            link: "https://example.com/x".to_string(),
            summary: None,
            publish_date: None,
        };
        let text = render(&[make("First"), make("Second")]);
        assert!(text.contains(&format!(
            "Published: {NO_DATE}\n\nCategory: general\nTitle: Second\n"
        )));
        assert!(text.ends_with(&format!("Published: {NO_DATE}\n\n")));
    }
}
