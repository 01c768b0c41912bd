//! # News Digest
//!
//! A personalized headline aggregator that scrapes the front pages of a fixed
//! set of news sites, tags every headline with a topic by keyword matching,
//! and prints the recent ones in the categories the operator cares about.
//!
//! ## Usage
//!
//! ```sh
//! news_digest
//! news_digest --categories sports,technology
//! ```
//!
//! ## Architecture
//!
//! The application follows a linear pipeline:
//! 1. **Preferences**: Read comma-separated categories from the flag or stdin
//! 2. **Fetching**: Download each source's front page (sequential by default)
//! 3. **Extraction**: Turn `<article>` containers into article records
//! 4. **Filtering**: Keep articles at most 7 days old in a preferred category
//! 5. **Output**: Print a text or JSON digest
//!
//! Logs go to stderr. Progress lines share stdout with a text digest; with
//! `--format json` they move to stderr so stdout carries only the JSON.

use chrono::Utc;
use clap::Parser;
use std::error::Error;
use std::io::Write;
use tracing::{debug, info, instrument};
use tracing_subscriber::{EnvFilter, fmt as tfmt};

mod categorize;
mod cli;
mod error;
mod filter;
mod models;
mod outputs;
mod pipeline;
mod scrapers;

use cli::{Cli, OutputFormat};
use filter::Preferences;
use scrapers::SOURCES;
use scrapers::fetch::HttpFetcher;

#[tokio::main]
#[instrument]
async fn main() -> Result<(), Box<dyn Error>> {
    // --- Tracing init ---
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tfmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .init();

    let start_time = std::time::Instant::now();
    info!("news_digest starting up");

    let args = Cli::parse();
    debug!(?args, "Parsed CLI arguments");

    let options = args.run_options();
    let mut progress: Box<dyn Write> = match options.format {
        OutputFormat::Text => Box::new(std::io::stdout()),
        OutputFormat::Json => Box::new(std::io::stderr()),
    };

    let preferences = match args.categories.as_deref() {
        Some(line) => Preferences::parse(line),
        None => pipeline::prompt_preferences(&mut *progress).await?,
    };
    let labels: Vec<&str> = preferences.labels().collect();
    info!(?labels, "Preferences read");

    let fetcher = HttpFetcher::new(args.timeout())?;
    let output = pipeline::run(
        &fetcher,
        SOURCES,
        &preferences,
        &options,
        Utc::now(),
        &mut *progress,
    )
    .await?;
    println!("{output}");

    let elapsed = start_time.elapsed();
    info!(
        ?elapsed,
        secs = elapsed.as_secs(),
        millis = elapsed.subsec_millis(),
        "Execution complete"
    );

    Ok(())
}
