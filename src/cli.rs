//! Command-line interface definitions for News Digest.
//!
//! Every option is optional. With no flags the program behaves as a plain
//! interactive run: prompt for categories, fetch each source in turn with no
//! timeout, skip malformed dates, and print a text report.

use crate::pipeline::RunOptions;
use crate::scrapers::extract::DatePolicy;
use clap::{Parser, ValueEnum};
use std::time::Duration;

/// How the filtered digest is printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable report
    Text,
    /// Pretty-printed JSON
    Json,
}

/// Command-line arguments for the News Digest application.
///
/// # Examples
///
/// ```sh
/// # Interactive: prompts for categories on stdin
/// news_digest
///
/// # Non-interactive, four sources at a time, 20 second timeout
/// news_digest --categories sports,technology --concurrency 4 --timeout-secs 20
///
/// # Faithful behaviour: a malformed publish date ends the run
/// news_digest --strict-dates
/// ```
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Comma-separated categories; prompts on stdin when omitted
    #[arg(short, long)]
    pub categories: Option<String>,

    /// Per-request timeout in seconds (default: wait indefinitely)
    #[arg(short, long)]
    pub timeout_secs: Option<u64>,

    /// Number of sources fetched at once
    #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u16).range(1..))]
    pub concurrency: u16,

    /// Abort the run when a page carries a malformed publish date
    #[arg(long)]
    pub strict_dates: bool,

    /// Output format for the digest
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

impl Cli {
    /// The configured request timeout, if any.
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }

    /// Run options derived from the flags.
    pub fn run_options(&self) -> RunOptions {
        RunOptions {
            concurrency: usize::from(self.concurrency),
            dates: if self.strict_dates {
                DatePolicy::Abort
            } else {
                DatePolicy::Skip
            },
            format: self.format,
        }
    }
}
