//! Article extraction from front-page markup.
//!
//! Every `<article>` element on a page is a candidate. A candidate becomes an
//! [`Article`] only when it has both an `<h2>` headline and an `<a href>`
//! link; anything else is dropped without complaint.
//!
//! # Field Sources
//!
//! | Field | Element | Notes |
//! |-------|---------|-------|
//! | `title` | first `h2` | whitespace collapsed, must be non-empty |
//! | `link` | first `a[href]` | joined onto the source URL |
//! | `summary` | first `p` | absent when missing or blank |
//! | `publish_date` | first `time[datetime]` | ISO-8601, see [`DatePolicy`] |

use crate::error::ExtractError;
use crate::models::Article;
use chrono::{DateTime, FixedOffset, Local, NaiveDate, NaiveDateTime, TimeZone};
use itertools::Itertools;
use once_cell::sync::Lazy;
use scraper::{ElementRef, Html, Selector};
use tracing::{debug, info, instrument, warn};
use url::Url;

static ARTICLE: Lazy<Selector> = Lazy::new(|| selector("article"));
static HEADLINE: Lazy<Selector> = Lazy::new(|| selector("h2"));
static LINK: Lazy<Selector> = Lazy::new(|| selector("a[href]"));
static PARAGRAPH: Lazy<Selector> = Lazy::new(|| selector("p"));
static TIME: Lazy<Selector> = Lazy::new(|| selector("time"));

fn selector(css: &str) -> Selector {
    Selector::parse(css).expect("static selector")
}

/// Canonical layout handed to `chrono` once a value has been normalised.
const CANONICAL_WITH_OFFSET: &str = "%Y-%m-%dT%H:%M:%S%.f%:z";
const CANONICAL_NAIVE: &str = "%Y-%m-%dT%H:%M:%S%.f";

/// What to do with a `datetime` attribute that is present but unparseable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DatePolicy {
    /// Keep the article and leave its date absent.
    #[default]
    Skip,
    /// Fail extraction of the whole page with [`ExtractError::MalformedDate`].
    Abort,
}

/// Extract article records from a page.
///
/// # Arguments
///
/// * `content` - Raw page markup
/// * `base_url` - URL the page was fetched from, used to resolve relative links
/// * `dates` - Handling of malformed publish dates
///
/// # Returns
///
/// Articles in document order.
///
/// # Errors
///
/// [`ExtractError::BaseUrl`] if `base_url` does not parse, and
/// [`ExtractError::MalformedDate`] under [`DatePolicy::Abort`].
#[instrument(level = "info", skip(content))]
pub fn extract(
    content: &str,
    base_url: &str,
    dates: DatePolicy,
) -> Result<Vec<Article>, ExtractError> {
    let base = Url::parse(base_url)?;
    let document = Html::parse_document(content);

    let mut articles = Vec::new();
    let mut skipped = 0usize;
    for container in document.select(&ARTICLE) {
        match article_from_container(container, &base, dates)? {
            Some(article) => articles.push(article),
            None => skipped += 1,
        }
    }

    info!(count = articles.len(), skipped, "Extracted articles");
    Ok(articles)
}

fn article_from_container(
    container: ElementRef<'_>,
    base: &Url,
    dates: DatePolicy,
) -> Result<Option<Article>, ExtractError> {
    let Some(title) = container
        .select(&HEADLINE)
        .next()
        .map(collapsed_text)
        .filter(|t| !t.is_empty())
    else {
        debug!("Container without headline");
        return Ok(None);
    };

    let Some(href) = container
        .select(&LINK)
        .next()
        .and_then(|a| a.value().attr("href"))
    else {
        debug!(%title, "Container without link");
        return Ok(None);
    };

    let link = match base.join(href.trim()) {
        Ok(link) => link.to_string(),
        Err(e) => {
            debug!(%title, href, error = %e, "Unresolvable link");
            return Ok(None);
        }
    };

    let summary = container
        .select(&PARAGRAPH)
        .next()
        .map(collapsed_text)
        .filter(|s| !s.is_empty());

    let publish_date = match container
        .select(&TIME)
        .next()
        .and_then(|t| t.value().attr("datetime"))
    {
        None => None,
        Some(raw) => match parse_publish_date(raw) {
            Ok(date) => Some(date),
            Err(e) if dates == DatePolicy::Abort => return Err(e),
            Err(e) => {
                warn!(%link, error = %e, "Ignoring malformed publish date");
                None
            }
        },
    };

    Ok(Some(Article {
        title,
        link,
        summary,
        publish_date,
    }))
}

/// Text content of an element with whitespace runs collapsed to one space.
fn collapsed_text(element: ElementRef<'_>) -> String {
    element.text().collect::<String>().split_whitespace().join(" ")
}

/// Parse an ISO-8601 `datetime` attribute.
///
/// Accepts extended and basic forms, reduced precision down to the hour,
/// `Z` or `±HH[:MM]` offsets and `.`/`,` fractions. Values without an offset
/// are read as local time; a bare date is local midnight.
///
/// # Errors
///
/// [`ExtractError::MalformedDate`] when the value is not ISO-8601.
pub fn parse_publish_date(raw: &str) -> Result<DateTime<FixedOffset>, ExtractError> {
    let value = raw.trim();
    let malformed = || ExtractError::MalformedDate {
        value: raw.to_string(),
    };

    if let Ok(date) = DateTime::parse_from_rfc3339(value) {
        return Ok(date);
    }

    let parts = IsoParts::split(value).ok_or_else(malformed)?;
    let naive = match (parts.time, parts.offset) {
        (Some(time), Some(offset)) => {
            let canonical = format!("{}T{time}{offset}", parts.date);
            return DateTime::parse_from_str(&canonical, CANONICAL_WITH_OFFSET)
                .map_err(|_| malformed());
        }
        (Some(time), None) => {
            let canonical = format!("{}T{time}", parts.date);
            NaiveDateTime::parse_from_str(&canonical, CANONICAL_NAIVE)
                .map_err(|_| malformed())?
        }
        (None, _) => NaiveDate::parse_from_str(&parts.date, "%Y-%m-%d")
            .ok()
            .and_then(|d| d.and_hms_opt(0, 0, 0))
            .ok_or_else(malformed)?,
    };

    Ok(Local
        .from_local_datetime(&naive)
        .earliest()
        .map(|local| local.fixed_offset())
        .unwrap_or_else(|| naive.and_utc().fixed_offset()))
}

/// An ISO-8601 value rewritten into the pieces of the canonical layouts.
#[derive(Debug, PartialEq, Eq)]
struct IsoParts {
    /// `YYYY-MM-DD`
    date: String,
    /// `HH:MM:SS[.f]`
    time: Option<String>,
    /// `±HH:MM`
    offset: Option<String>,
}

impl IsoParts {
    fn split(value: &str) -> Option<Self> {
        let (date, rest) = match value.find(['T', ' ']) {
            Some(i) => (&value[..i], Some(&value[i + 1..])),
            None => (value, None),
        };
        let date = expand_date(date);

        let Some(rest) = rest else {
            return Some(Self {
                date,
                time: None,
                offset: None,
            });
        };

        let (clock, offset) = if let Some(clock) = rest.strip_suffix(['Z', 'z']) {
            (clock, Some("+00:00".to_string()))
        } else if let Some(i) = rest.rfind(['+', '-']) {
            (&rest[..i], Some(expand_offset(&rest[i..])?))
        } else {
            (rest, None)
        };

        Some(Self {
            date,
            time: Some(expand_clock(clock)?),
            offset,
        })
    }
}

/// `YYYYMMDD` → `YYYY-MM-DD`; anything else is left for `chrono` to judge.
fn expand_date(date: &str) -> String {
    if date.len() == 8 && date.bytes().all(|b| b.is_ascii_digit()) {
        format!("{}-{}-{}", &date[..4], &date[4..6], &date[6..])
    } else {
        date.to_string()
    }
}

/// `HH`, `HH:MM`, `HHMM`, `HH:MM:SS` or `HHMMSS`, with an optional fraction,
/// padded out to `HH:MM:SS[.f]`.
fn expand_clock(clock: &str) -> Option<String> {
    let (whole, fraction) = match clock.find(['.', ',']) {
        Some(i) => (&clock[..i], Some(&clock[i + 1..])),
        None => (clock, None),
    };

    let digits = whole.replace(':', "");
    let separated = whole.contains(':');
    if separated && whole.split(':').any(|field| field.len() != 2) {
        return None;
    }
    if !matches!(digits.len(), 2 | 4 | 6) || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }

    let mut fields = ["00"; 3];
    for (i, field) in fields.iter_mut().enumerate().take(digits.len() / 2) {
        *field = &digits[2 * i..2 * i + 2];
    }
    let mut time = fields.join(":");

    if let Some(fraction) = fraction {
        if fraction.is_empty() || !fraction.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        time.push('.');
        time.push_str(fraction);
    }
    Some(time)
}

/// `±HH`, `±HHMM` or `±HH:MM` → `±HH:MM`.
fn expand_offset(offset: &str) -> Option<String> {
    let (sign, rest) = offset.split_at(1);
    let digits = rest.replace(':', "");
    if !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    match digits.len() {
        2 => Some(format!("{sign}{digits}:00")),
        4 => Some(format!("{sign}{}:{}", &digits[..2], &digits[2..])),
        _ => None,
    }
}
