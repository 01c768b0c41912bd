//! The fetch → extract → filter → render run.
//!
//! # Stages
//!
//! 1. **Preferences**: Read the operator's comma-separated labels
//! 2. **Collection**: Fetch every source and extract its articles into one corpus
//! 3. **Filtering**: Select recent articles in preferred categories, once, over the whole corpus
//! 4. **Rendering**: Format the survivors, or report that nothing matched
//!
//! A failed fetch only empties that source's contribution. Sources are
//! fetched one at a time unless a higher concurrency is requested; the corpus
//! keeps source order either way.
//!
//! Prompts, progress lines and fetch diagnostics go to a writer chosen by the
//! caller, so JSON output on stdout stays parseable.

use crate::cli::OutputFormat;
use crate::error::RunError;
use crate::filter::{self, Preferences};
use crate::models::{Article, Category};
use crate::outputs::{json, report};
use crate::scrapers::extract::{DatePolicy, extract};
use crate::scrapers::fetch::PageFetcher;
use chrono::{DateTime, Utc};
use futures::stream::{self, StreamExt};
use itertools::Itertools;
use std::cell::RefCell;
use std::io::Write;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{error, info, instrument};

/// Printed when filtering leaves nothing to show.
pub const NO_RESULTS: &str = "No personalized news items found.";

/// Knobs for one run, all defaulting to the plain sequential behaviour.
#[derive(Debug, Clone, Copy)]
pub struct RunOptions {
    /// Maximum number of sources fetched at once.
    pub concurrency: usize,
    /// Handling of malformed publish dates.
    pub dates: DatePolicy,
    /// Presenter used for the final output.
    pub format: OutputFormat,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            concurrency: 1,
            dates: DatePolicy::default(),
            format: OutputFormat::Text,
        }
    }
}

/// Ask the operator for category preferences on stdin.
///
/// The prompt is written to `prompt`. End of input counts as an empty
/// answer, which selects nothing.
pub async fn prompt_preferences(prompt: &mut dyn Write) -> std::io::Result<Preferences> {
    let available = Category::ALL.iter().map(Category::as_str).join(", ");
    writeln!(prompt, "Available Categories: {available}")?;
    write!(prompt, "Enter preferred categories separated by commas: ")?;
    prompt.flush()?;

    let mut line = String::new();
    BufReader::new(tokio::io::stdin()).read_line(&mut line).await?;
    Ok(Preferences::parse(&line))
}

/// Write one operator-facing line and flush it straight away.
fn progress_line(progress: &RefCell<&mut dyn Write>, line: &str) -> std::io::Result<()> {
    let mut out = progress.borrow_mut();
    writeln!(out, "{line}")?;
    out.flush()
}

/// Fetch every source and gather the extracted articles.
///
/// A `Fetching news from: <url>` line is written to `progress` before each
/// fetch, followed by the diagnostic when the fetch fails. Fetch failures are
/// not errors here; the source simply contributes nothing.
///
/// # Arguments
///
/// * `fetcher` - Page retrieval backend
/// * `sources` - Base URLs, in the order their articles should appear
/// * `options` - Concurrency and date handling
/// * `progress` - Destination for progress lines and fetch diagnostics
///
/// # Errors
///
/// Stops at the first extraction failure (an invalid source URL, or a
/// malformed date under [`DatePolicy::Abort`]) or failed progress write.
#[instrument(
    level = "info",
    skip_all,
    fields(sources = sources.len(), concurrency = options.concurrency)
)]
pub async fn collect_corpus<F: PageFetcher>(
    fetcher: &F,
    sources: &[&str],
    options: &RunOptions,
    progress: &mut dyn Write,
) -> Result<Vec<Article>, RunError> {
    let dates = options.dates;
    let progress = RefCell::new(progress);
    let progress = &progress;

    let pages = stream::iter(sources.iter().copied())
        .map(|url| async move {
            progress_line(progress, &format!("Fetching news from: {url}"))?;
            match fetcher.fetch(url).await {
                Ok(body) => Ok::<_, RunError>(extract(&body, url, dates)?),
                Err(e) => {
                    progress_line(progress, &e.to_string())?;
                    error!(%url, error = %e, "Fetch failed; skipping source");
                    Ok(Vec::new())
                }
            }
        })
        .buffered(options.concurrency.max(1));
    let mut pages = std::pin::pin!(pages);

    let mut corpus = Vec::new();
    while let Some(page) = pages.next().await {
        corpus.extend(page?);
    }

    info!(count = corpus.len(), "Collected corpus");
    Ok(corpus)
}

/// Run the whole pipeline and return the text to show the operator.
///
/// # Arguments
///
/// * `fetcher` - Page retrieval backend
/// * `sources` - Base URLs to scrape
/// * `preferences` - Labels the operator asked for
/// * `options` - Run knobs
/// * `now` - Reference time for the recency filter
/// * `progress` - Destination for progress lines and fetch diagnostics
///
/// # Returns
///
/// The rendered digest. In text mode an empty selection yields
/// [`NO_RESULTS`]; in JSON mode it yields an empty digest.
pub async fn run<F: PageFetcher>(
    fetcher: &F,
    sources: &[&str],
    preferences: &Preferences,
    options: &RunOptions,
    now: DateTime<Utc>,
    progress: &mut dyn Write,
) -> Result<String, RunError> {
    let corpus = collect_corpus(fetcher, sources, options, progress).await?;
    let selected = filter::select(corpus, preferences, now);

    let rendered = match options.format {
        OutputFormat::Json => json::render(&selected, preferences, now)?,
        OutputFormat::Text if selected.is_empty() => NO_RESULTS.to_string(),
        OutputFormat::Text => report::render(&selected),
    };
    Ok(rendered)
}
