//! Source retrieval and article extraction.
//!
//! Each source goes through the same two steps:
//!
//! 1. **Fetching**: Download the front page markup ([`fetch`])
//! 2. **Extraction**: Turn `<article>` containers into records ([`extract`])
//!
//! # Sources
//!
//! | Outlet | URL |
//! |--------|-----|
//! | BBC News | `https://www.bbc.com/news` |
//! | The Hindu | `https://www.thehindu.com/` |
//! | CNN World | `https://www.cnn.com/world` |
//! | New York Times | `https://www.nytimes.com/` |
//! | Daily Thanthi | `https://www.dailythanthi.com/` |
//! | Way2News Tamil | `https://tamil.way2news.com/` |
//! | Indian Express | `https://indianexpress.com/` |
//! | NDTV India | `https://www.ndtv.com/india` |
//! | Hindustan Times | `https://www.hindustantimes.com/` |
//!
//! Failed fetches are reported and skipped without affecting other sources.

pub mod extract;
pub mod fetch;

/// Front pages scraped on every run, in processing order.
pub const SOURCES: &[&str] = &[
    "https://www.bbc.com/news",
    "https://www.thehindu.com/",
    "https://www.cnn.com/world",
    "https://www.nytimes.com/",
    "https://www.dailythanthi.com/",
    "https://tamil.way2news.com/",
    "https://indianexpress.com/",
    "https://www.ndtv.com/india#pfrom=home-ndtv_mainnavigation",
    "https://www.hindustantimes.com/",
];

#[cfg(test)]
mod tests {
    use super::*;
    use url::Url;

    #[test]
    fn test_sources_are_absolute_urls() {
        for source in SOURCES {
            let url = Url::parse(source).unwrap();
            assert_eq!(url.scheme(), "https");
            assert!(url.host_str().is_some());
        }
    }
}
